use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::assessment::answers::{
    Goal, Journey, Knowledge, LearningStyle, RoleLevel, Superpower,
};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AssessmentRow {
    pub id: i32,
    pub respondent_id: i32,
    pub journey: String,
    pub industry: String,
    pub role_level: Option<String>,
    pub role_title: Option<String>,
    pub knowledge: String,
    pub automation_pct: i32,
    pub superpower: String,
    pub learning_style: String,
    pub goal: String,
    pub readiness_score: i32,
    pub completed_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// A fully normalized and scored response, ready to be inserted for a
/// respondent.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAssessment {
    pub journey: Journey,
    pub industry: String,
    pub role_level: Option<RoleLevel>,
    pub role_title: Option<String>,
    pub knowledge: Knowledge,
    pub automation_pct: i32,
    pub superpower: Superpower,
    pub learning_style: LearningStyle,
    pub goal: Goal,
    pub readiness_score: i32,
}

/// The columns peer aggregation needs from each matching response.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PeerSample {
    pub readiness_score: i32,
    pub journey: String,
    pub knowledge: String,
    pub role_level: Option<String>,
}
