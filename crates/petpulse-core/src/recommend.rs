//! Product recommendations from mood and personality
//!
//! A static affiliate catalog queried by the current mood, with personality
//! matches ranked ahead of plain mood matches when a profile exists.

use serde::Serialize;

use crate::models::PersonalityProfile;

/// Default number of recommendations returned
pub const DEFAULT_RECOMMENDATION_LIMIT: usize = 3;

/// Product category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductCategory {
    Toy,
    Food,
    Health,
    Training,
    Comfort,
}

impl ProductCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Toy => "toy",
            Self::Food => "food",
            Self::Health => "health",
            Self::Training => "training",
            Self::Comfort => "comfort",
        }
    }
}

impl std::fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One catalog entry
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Product {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub price: &'static str,
    pub category: ProductCategory,
    pub target_moods: &'static [&'static str],
    pub target_personalities: &'static [&'static str],
    pub rating: f64,
    pub review_count: u32,
}

/// The product catalog
pub const PRODUCT_CATALOG: &[Product] = &[
    Product {
        id: "interactive-puzzle-toy",
        name: "Interactive Puzzle Feeder",
        description: "Mental stimulation toy that reduces anxiety and boredom",
        price: "$24.99",
        category: ProductCategory::Toy,
        target_moods: &["Anxious", "Bored", "Curious"],
        target_personalities: &["Chill Introvert", "Anxious Angel"],
        rating: 4.8,
        review_count: 1247,
    },
    Product {
        id: "rope-tug-toy",
        name: "Heavy Duty Rope Tug Toy",
        description: "Perfect for high-energy play sessions and bonding",
        price: "$16.99",
        category: ProductCategory::Toy,
        target_moods: &["Excited", "Playful", "Happy"],
        target_personalities: &["Playful Diva", "Adventure Seeker"],
        rating: 4.6,
        review_count: 892,
    },
    Product {
        id: "calming-chew-toy",
        name: "Calming Lavender Chew Toy",
        description: "Infused with natural lavender to promote relaxation",
        price: "$19.99",
        category: ProductCategory::Comfort,
        target_moods: &["Anxious", "Stressed"],
        target_personalities: &["Gentle Giant", "Anxious Angel"],
        rating: 4.7,
        review_count: 634,
    },
    Product {
        id: "calming-treats",
        name: "Natural Calming Treats",
        description: "Chamomile and L-theanine treats for stress relief",
        price: "$22.99",
        category: ProductCategory::Food,
        target_moods: &["Anxious", "Stressed"],
        target_personalities: &["Anxious Angel", "Gentle Giant"],
        rating: 4.5,
        review_count: 456,
    },
    Product {
        id: "training-treats",
        name: "High-Value Training Treats",
        description: "Irresistible treats perfect for training sessions",
        price: "$18.99",
        category: ProductCategory::Training,
        target_moods: &["Curious", "Playful"],
        target_personalities: &["Adventure Seeker", "Playful Diva"],
        rating: 4.9,
        review_count: 1123,
    },
    Product {
        id: "orthopedic-bed",
        name: "Memory Foam Orthopedic Bed",
        description: "Ultimate comfort for rest and relaxation",
        price: "$89.99",
        category: ProductCategory::Comfort,
        target_moods: &["Content", "Tired"],
        target_personalities: &["Chill Introvert", "Gentle Giant"],
        rating: 4.8,
        review_count: 789,
    },
    Product {
        id: "anxiety-vest",
        name: "Calming Anxiety Vest",
        description: "Gentle pressure therapy for anxious pets",
        price: "$34.99",
        category: ProductCategory::Health,
        target_moods: &["Anxious", "Stressed"],
        target_personalities: &["Anxious Angel", "Gentle Giant"],
        rating: 4.4,
        review_count: 567,
    },
    Product {
        id: "agility-kit",
        name: "Backyard Agility Training Kit",
        description: "Complete set for active dogs who love challenges",
        price: "$79.99",
        category: ProductCategory::Training,
        target_moods: &["Excited", "Playful", "Energetic"],
        target_personalities: &["Adventure Seeker", "Playful Diva"],
        rating: 4.7,
        review_count: 345,
    },
];

/// Recommend products for a mood, personality-aware when a profile exists
///
/// Personality matches are ranked ahead of plain mood matches (duplicates
/// removed), then everything is ordered by rating descending and cut to
/// `limit`.
pub fn recommend_products(
    mood: &str,
    personality: Option<&PersonalityProfile>,
    limit: usize,
) -> Vec<&'static Product> {
    let mut recommendations: Vec<&'static Product> = PRODUCT_CATALOG
        .iter()
        .filter(|p| p.target_moods.contains(&mood))
        .collect();

    if let Some(profile) = personality {
        let personality_matches: Vec<&'static Product> = PRODUCT_CATALOG
            .iter()
            .filter(|p| {
                p.target_personalities
                    .contains(&profile.archetype.as_str())
            })
            .collect();

        let mut combined = personality_matches;
        for product in recommendations {
            if !combined.iter().any(|p| p.id == product.id) {
                combined.push(product);
            }
        }
        recommendations = combined;
    }

    recommendations.sort_by(|a, b| {
        b.rating
            .partial_cmp(&a.rating)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    recommendations.truncate(limit);
    recommendations
}
