//! Adapter for the prototype questionnaire payload (`ai_journey`,
//! `ai_understanding`, `learning_pref`, ...). Legacy clients still post it;
//! it is rewritten into [`RawAnswers`] and then takes the normal intake path.

use serde::Deserialize;

use crate::assessment::submission::{NumberOrText, RawAnswers};

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct LegacyAnswers {
    pub ai_journey: Option<String>,
    pub ai_industry: Option<String>,
    pub ai_role: Option<String>,
    pub ai_understanding: Option<String>,
    pub automation_pct: Option<NumberOrText>,
    pub ai_strength: Option<String>,
    pub learning_pref: Option<String>,
    pub future_goal: Option<String>,
}

impl LegacyAnswers {
    /// A payload is legacy when any of the identifying prototype fields is set.
    pub fn is_legacy(&self) -> bool {
        [
            &self.ai_journey,
            &self.ai_industry,
            &self.ai_role,
            &self.ai_understanding,
        ]
        .iter()
        .any(|field| field.as_deref().is_some_and(|v| !v.is_empty()))
    }

    /// `ai_role` doubles as the role title and the level hint; the
    /// normalizer buckets it into a level.
    pub fn into_answers(self) -> RawAnswers {
        RawAnswers {
            question_1_journey: self.ai_journey,
            question_2_industry: self.ai_industry,
            question_3a_level: self.ai_role.clone(),
            question_3b_role_title: self.ai_role,
            question_4_knowledge: self.ai_understanding,
            question_5_automation_pct: self.automation_pct,
            question_6_superpower: self.ai_strength,
            question_7_learning_style: self.learning_pref,
            question_8_goal: self.future_goal,
        }
    }
}
