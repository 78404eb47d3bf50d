use serde::{Deserialize, Serialize};

use crate::assessment::answers::{Journey, Knowledge, LearningStyle};

pub const MAX_SCORE: i32 = 100;
pub const COMPONENT_MAX: i32 = 25;
pub const COMPONENT_FLOOR: i32 = 5;

/// Per-dimension contribution to the readiness score. Each component is in
/// [5, 25]; `total` is their sum clamped to [0, 100].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub journey: i32,
    pub knowledge: i32,
    pub automation: i32,
    pub learning_style: i32,
    pub total: i32,
}

pub fn journey_points(journey: Journey) -> i32 {
    match journey {
        Journey::Daily => 25,
        Journey::Weekly => 20,
        Journey::Monthly => 15,
        Journey::Rarely => 10,
        Journey::Never => 5,
    }
}

pub fn knowledge_points(knowledge: Knowledge) -> i32 {
    match knowledge {
        Knowledge::Expert => 25,
        Knowledge::Strategic => 20,
        Knowledge::Basics => 15,
        Knowledge::Lost => 10,
        Knowledge::New => 5,
    }
}

pub fn learning_style_points(style: LearningStyle) -> i32 {
    match style {
        LearningStyle::VeryFast => 25,
        LearningStyle::Fast => 20,
        LearningStyle::Moderate => 15,
        LearningStyle::Slow => 10,
        LearningStyle::VerySlow => 5,
    }
}

/// Inverse term: the more of their work a respondent thinks AI could take
/// over, the fewer points. `max(25 - round(pct / 4), 5)`, halves rounded up.
pub fn automation_points(automation_pct: i32) -> i32 {
    let pct = automation_pct.clamp(0, 100);
    // (pct + 2) / 4 == round-half-up(pct / 4) for non-negative pct
    (COMPONENT_MAX - (pct + 2) / 4).max(COMPONENT_FLOOR)
}

/// Computes the 0–100 readiness score from the four scored dimensions.
/// Inputs must already be normalized.
pub fn compute_readiness_score(
    journey: Journey,
    knowledge: Knowledge,
    automation_pct: i32,
    learning_style: LearningStyle,
) -> ScoreBreakdown {
    let journey = journey_points(journey);
    let knowledge = knowledge_points(knowledge);
    let automation = automation_points(automation_pct);
    let learning_style = learning_style_points(learning_style);

    let total = (journey + knowledge + automation + learning_style).clamp(0, MAX_SCORE);

    ScoreBreakdown {
        journey,
        knowledge,
        automation,
        learning_style,
        total,
    }
}
