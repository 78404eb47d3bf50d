use serde::{Deserialize, Serialize};

use crate::assessment::legacy::LegacyAnswers;

/// JSON field that clients send either as a number or as a string
/// (`"user_id": 7` and `"user_id": "7"` are both seen in the wild).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumberOrText {
    Number(f64),
    Text(String),
}

/// The nine questionnaire answers exactly as the client sent them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawAnswers {
    pub question_1_journey: Option<String>,
    pub question_2_industry: Option<String>,
    pub question_3a_level: Option<String>,
    pub question_3b_role_title: Option<String>,
    pub question_4_knowledge: Option<String>,
    pub question_5_automation_pct: Option<NumberOrText>,
    pub question_6_superpower: Option<String>,
    pub question_7_learning_style: Option<String>,
    pub question_8_goal: Option<String>,
}

/// Body of `POST /api/v1/assessments`.
///
/// Accepts the current field names and the prototype `ai_*` names; see
/// [`AssessmentSubmission::into_canonical`]. Any client-side score field is
/// ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AssessmentSubmission {
    #[serde(alias = "userId")]
    pub user_id: Option<NumberOrText>,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    #[serde(flatten)]
    pub answers: RawAnswers,
    #[serde(flatten)]
    pub legacy: LegacyAnswers,
}

impl AssessmentSubmission {
    /// Folds a legacy payload into the current answer fields. Current-shape
    /// payloads pass through untouched.
    pub fn into_canonical(self) -> Self {
        if !self.legacy.is_legacy() {
            return self;
        }
        tracing::debug!("Adapting legacy assessment payload");
        Self {
            answers: self.legacy.into_answers(),
            legacy: LegacyAnswers::default(),
            ..self
        }
    }
}
