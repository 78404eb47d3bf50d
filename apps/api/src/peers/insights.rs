use serde::Serialize;

use crate::peers::stats::RoleLevelStats;

pub const TOP_ROLE_LEVELS: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Insights {
    pub performance_level: &'static str,
    pub recommendation: String,
    pub next_milestone: &'static str,
    /// Highest-average role levels in the cohort.
    pub top_role_levels: Vec<String>,
}

pub fn performance_level(percentile: i32) -> &'static str {
    match percentile {
        p if p >= 90 => "Exceptional",
        p if p >= 75 => "Above Average",
        p if p >= 50 => "Average",
        p if p >= 25 => "Below Average",
        _ => "Needs Improvement",
    }
}

/// Milestones follow the histogram bands (60 / 70 / 80 / 90).
pub fn next_milestone(score: i32) -> &'static str {
    match score {
        s if s < 60 => "Reach Beginner level (60+)",
        s if s < 70 => "Reach Intermediate level (70+)",
        s if s < 80 => "Reach Advanced level (80+)",
        s if s < 90 => "Reach Expert level (90+)",
        _ => "Maintain Expert status",
    }
}

pub fn recommendation(score: i32, mean: f64) -> String {
    let diff = f64::from(score) - mean;
    if diff > 0.0 {
        format!("Excellent! You scored {diff:.1} points above the peer average.")
    } else if diff < 0.0 {
        format!(
            "You scored {:.1} points below the peer average. Focus on AI fundamentals to improve.",
            -diff
        )
    } else {
        "You scored exactly at the peer average.".to_string()
    }
}

/// Expects `role_levels` sorted by average, highest first.
pub fn top_role_levels(role_levels: &[RoleLevelStats]) -> Vec<String> {
    role_levels
        .iter()
        .take(TOP_ROLE_LEVELS)
        .map(|stats| stats.role_level.clone())
        .collect()
}

pub fn build_insights(
    score: i32,
    percentile: i32,
    mean: f64,
    role_levels: &[RoleLevelStats],
) -> Insights {
    Insights {
        performance_level: performance_level(percentile),
        recommendation: recommendation(score, mean),
        next_milestone: next_milestone(score),
        top_role_levels: top_role_levels(role_levels),
    }
}
