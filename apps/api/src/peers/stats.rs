//! Descriptive statistics over stored readiness scores.
//!
//! Pure functions; the handler fetches `PeerSample`s and passes them in.
//! An empty sample is a distinct outcome (`PeerComparison::InsufficientData`),
//! never a zero-filled report.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::assessment::PeerSample;
use crate::peers::insights::{build_insights, Insights};

/// Fixed display buckets, lowest first: (label, lower, upper) inclusive.
pub const SCORE_BUCKETS: &[(&str, i32, i32)] = &[
    ("0-59", 0, 59),
    ("60-69", 60, 69),
    ("70-79", 70, 79),
    ("80-89", 80, 89),
    ("90-100", 90, 100),
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreSummary {
    pub count: usize,
    pub mean: f64,
    pub median: i32,
    pub min: i32,
    pub max: i32,
    pub std_dev: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistogramBucket {
    pub label: &'static str,
    pub lower: i32,
    pub upper: i32,
    pub count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RelativePosition {
    Above,
    Average,
    Below,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoleLevelStats {
    /// `"unspecified"` for responses without a role level.
    pub role_level: String,
    pub sample_size: usize,
    pub average_score: f64,
    pub min_score: i32,
    pub max_score: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_position: Option<RelativePosition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score_difference: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeerReport {
    pub summary: ScoreSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_score: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percentile: Option<i32>,
    pub histogram: Vec<HistogramBucket>,
    pub journey_distribution: BTreeMap<String, usize>,
    pub knowledge_distribution: BTreeMap<String, usize>,
    pub role_levels: Vec<RoleLevelStats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insights: Option<Insights>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PeerComparison {
    InsufficientData,
    Available(Box<PeerReport>),
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn mean_of(scores: &[i32]) -> f64 {
    scores.iter().map(|&s| f64::from(s)).sum::<f64>() / scores.len() as f64
}

/// `None` for an empty sample. Median is the upper median (`sorted[n / 2]`);
/// std-dev is the population standard deviation.
pub fn summarize(scores: &[i32]) -> Option<ScoreSummary> {
    if scores.is_empty() {
        return None;
    }
    let mut sorted = scores.to_vec();
    sorted.sort_unstable();

    let mean = mean_of(&sorted);
    let variance = sorted
        .iter()
        .map(|&s| (f64::from(s) - mean).powi(2))
        .sum::<f64>()
        / sorted.len() as f64;

    Some(ScoreSummary {
        count: sorted.len(),
        mean: round2(mean),
        median: sorted[sorted.len() / 2],
        min: sorted[0],
        max: sorted[sorted.len() - 1],
        std_dev: round2(variance.sqrt()),
    })
}

/// Share of peers scoring strictly below `user_score`, as a rounded
/// percentage. `None` for an empty sample.
pub fn percentile_rank(scores: &[i32], user_score: i32) -> Option<i32> {
    if scores.is_empty() {
        return None;
    }
    let below = scores.iter().filter(|&&s| s < user_score).count();
    Some((below as f64 / scores.len() as f64 * 100.0).round() as i32)
}

pub fn histogram(scores: &[i32]) -> Vec<HistogramBucket> {
    SCORE_BUCKETS
        .iter()
        .map(|&(label, lower, upper)| HistogramBucket {
            label,
            lower,
            upper,
            count: scores
                .iter()
                .filter(|&&s| s >= lower && s <= upper)
                .count(),
        })
        .collect()
}

pub fn distribution<'a>(values: impl IntoIterator<Item = &'a str>) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for value in values {
        let key = if value.is_empty() { "unknown" } else { value };
        *counts.entry(key.to_string()).or_insert(0) += 1;
    }
    counts
}

/// Per-role-level averages, highest average first.
pub fn role_level_breakdown(samples: &[PeerSample], user_score: Option<i32>) -> Vec<RoleLevelStats> {
    let mut groups: BTreeMap<&str, Vec<i32>> = BTreeMap::new();
    for sample in samples {
        let key = sample.role_level.as_deref().unwrap_or("unspecified");
        groups.entry(key).or_default().push(sample.readiness_score);
    }

    let mut stats: Vec<RoleLevelStats> = groups
        .into_iter()
        .map(|(role_level, scores)| {
            let average = round2(mean_of(&scores));
            let (user_position, score_difference) = match user_score {
                Some(user) => {
                    let diff = round2(f64::from(user) - average);
                    let position = if diff > 0.0 {
                        RelativePosition::Above
                    } else if diff < 0.0 {
                        RelativePosition::Below
                    } else {
                        RelativePosition::Average
                    };
                    (Some(position), Some(diff))
                }
                None => (None, None),
            };
            RoleLevelStats {
                role_level: role_level.to_string(),
                sample_size: scores.len(),
                average_score: average,
                min_score: scores.iter().copied().min().unwrap_or(0),
                max_score: scores.iter().copied().max().unwrap_or(0),
                user_position,
                score_difference,
            }
        })
        .collect();

    stats.sort_by(|a, b| {
        b.average_score
            .partial_cmp(&a.average_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    stats
}

/// Full comparison over the given samples.
pub fn compare(samples: &[PeerSample], user_score: Option<i32>) -> PeerComparison {
    let scores: Vec<i32> = samples.iter().map(|s| s.readiness_score).collect();
    let Some(summary) = summarize(&scores) else {
        return PeerComparison::InsufficientData;
    };

    let percentile = user_score.and_then(|u| percentile_rank(&scores, u));
    let role_levels = role_level_breakdown(samples, user_score);
    let insights = match (user_score, percentile) {
        (Some(score), Some(pct)) => Some(build_insights(score, pct, summary.mean, &role_levels)),
        _ => None,
    };

    PeerComparison::Available(Box::new(PeerReport {
        histogram: histogram(&scores),
        journey_distribution: distribution(samples.iter().map(|s| s.journey.as_str())),
        knowledge_distribution: distribution(samples.iter().map(|s| s.knowledge.as_str())),
        role_levels,
        summary,
        user_score,
        percentile,
        insights,
    }))
}
