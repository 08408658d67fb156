//! Mood calendar, trend, and mood-of-the-week aggregation
//!
//! Everything in this module is a pure function over `(analyses, now)` - no
//! persistence, no side effects. Callers inject the clock, which keeps the
//! window math testable at exact boundaries.

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use serde::Serialize;

use crate::models::Analysis;

/// Fallback color for moods without a table entry
pub const NEUTRAL_COLOR: &str = "#6b7280";

/// Color for calendar days with no observations
pub const EMPTY_DAY_COLOR: &str = "#f3f4f6";

/// Sentinel mood label when a window holds no observations
pub const NO_DATA_MOOD: &str = "No data";

/// Number of trailing 7-day windows in a trend series
pub const TREND_WEEKS: usize = 8;

/// Fixed mood -> display color table
const MOOD_COLORS: &[(&str, &str)] = &[
    ("Happy", "#10b981"),
    ("Excited", "#f59e0b"),
    ("Playful", "#8b5cf6"),
    ("Content", "#06b6d4"),
    ("Curious", "#3b82f6"),
    ("Anxious", "#f97316"),
    ("Stressed", "#ef4444"),
    ("Hungry", "#eab308"),
    ("Territorial", "#7c3aed"),
    ("Attention-seeking", "#ec4899"),
];

/// Look up the display color for a mood label (neutral when unmapped)
pub fn mood_color(mood: &str) -> &'static str {
    MOOD_COLORS
        .iter()
        .find(|(m, _)| *m == mood)
        .map(|(_, c)| *c)
        .unwrap_or(NEUTRAL_COLOR)
}

/// One day in a month's mood calendar
#[derive(Debug, Clone, Serialize)]
pub struct MoodCalendarDay {
    pub date: NaiveDate,
    /// Dominant primary mood that day; `None` when nothing was recorded
    pub mood: Option<String>,
    pub color: String,
    pub analyses: Vec<Analysis>,
}

/// Per-week counts for the tracked trend moods
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoodTrendPoint {
    /// Label of the window start, rendered "month/day"
    pub week: String,
    pub happy: u32,
    pub excited: u32,
    pub anxious: u32,
    pub playful: u32,
    pub content: u32,
    pub curious: u32,
}

/// Dominant mood over the trailing 7 days
#[derive(Debug, Clone, Serialize)]
pub struct MoodOfWeek {
    pub mood: String,
    pub count: usize,
    pub color: String,
}

/// Build the mood calendar for one month
///
/// Returns exactly one entry per day of the month, in ascending date order.
/// The dominant mood for a day is the primary label with the highest count;
/// ties keep the label seen first that day. An unrepresentable year/month
/// yields an empty calendar.
pub fn build_mood_calendar(analyses: &[Analysis], year: i32, month: u32) -> Vec<MoodCalendarDay> {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return Vec::new();
    };

    let mut calendar = Vec::new();
    for date in first
        .iter_days()
        .take_while(|d| d.year() == year && d.month() == month)
    {
        let day_analyses: Vec<Analysis> = analyses
            .iter()
            .filter(|a| a.recorded_at.date_naive() == date)
            .cloned()
            .collect();

        match dominant_primary(&day_analyses) {
            Some((mood, _)) => {
                let color = mood_color(&mood).to_string();
                calendar.push(MoodCalendarDay {
                    date,
                    mood: Some(mood),
                    color,
                    analyses: day_analyses,
                });
            }
            None => calendar.push(MoodCalendarDay {
                date,
                mood: None,
                color: EMPTY_DAY_COLOR.to_string(),
                analyses: day_analyses,
            }),
        }
    }

    calendar
}

/// Build the 8-week mood trend series ending with the week containing `today`
///
/// Windows are consecutive 7-day spans `[start, start + 6 days]`, oldest
/// first; each analysis lands in exactly one window. Primary labels are
/// matched case-insensitively against the tracked moods; anything else is
/// not counted in any bucket.
pub fn build_mood_trends(analyses: &[Analysis], today: NaiveDate) -> Vec<MoodTrendPoint> {
    let mut trends = Vec::with_capacity(TREND_WEEKS);

    for i in (0..TREND_WEEKS as i64).rev() {
        let week_start = today - Duration::days(i * 7);
        let week_end = week_start + Duration::days(6);

        let mut point = MoodTrendPoint {
            week: format!("{}/{}", week_start.month(), week_start.day()),
            happy: 0,
            excited: 0,
            anxious: 0,
            playful: 0,
            content: 0,
            curious: 0,
        };

        for analysis in analyses {
            let date = analysis.recorded_at.date_naive();
            if date < week_start || date > week_end {
                continue;
            }
            match analysis.mood.primary.to_lowercase().as_str() {
                "happy" => point.happy += 1,
                "excited" => point.excited += 1,
                "anxious" => point.anxious += 1,
                "playful" => point.playful += 1,
                "content" => point.content += 1,
                "curious" => point.curious += 1,
                _ => {}
            }
        }

        trends.push(point);
    }

    trends
}

/// Dominant mood over `[now - 7 days, now]`
///
/// Returns the sentinel ("No data", 0, neutral) when nothing was recorded in
/// the window. Ties keep the first-seen label.
pub fn mood_of_the_week(analyses: &[Analysis], now: DateTime<Utc>) -> MoodOfWeek {
    let cutoff = now - Duration::days(7);
    let recent = analyses
        .iter()
        .filter(|a| a.recorded_at >= cutoff && a.recorded_at <= now);

    match dominant_primary(recent) {
        Some((mood, count)) => {
            let color = mood_color(&mood).to_string();
            MoodOfWeek { mood, count, color }
        }
        None => MoodOfWeek {
            mood: NO_DATA_MOOD.to_string(),
            count: 0,
            color: NEUTRAL_COLOR.to_string(),
        },
    }
}

/// Highest-count primary label, ties broken by first-seen order
///
/// Counting preserves encounter order, and only a strictly higher count
/// displaces the current best - not alphabetical, not last-wins.
fn dominant_primary<'a>(
    analyses: impl IntoIterator<Item = &'a Analysis>,
) -> Option<(String, usize)> {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for analysis in analyses {
        let label = analysis.mood.primary.as_str();
        match counts.iter_mut().find(|(m, _)| *m == label) {
            Some((_, n)) => *n += 1,
            None => counts.push((label, 1)),
        }
    }

    let mut best: Option<(&str, usize)> = None;
    for (label, count) in counts {
        if best.map_or(true, |(_, best_count)| count > best_count) {
            best = Some((label, count));
        }
    }
    best.map(|(label, count)| (label.to_string(), count))
}
