//! Assessment intake: validate → normalize → score → resolve respondent and
//! insert, once per submission.
//!
//! Append-only: every call inserts a new response row, even for a respondent
//! who already has one. Inserts are never retried.

use serde::Serialize;
use tracing::info;

use crate::assessment::answers::Canonical;
use crate::assessment::normalize::{
    normalize_goal, normalize_industry, normalize_journey, normalize_knowledge,
    normalize_learning_style, normalize_role_level, normalize_superpower,
};
use crate::assessment::scoring::{compute_readiness_score, ScoreBreakdown};
use crate::assessment::store::AssessmentStore;
use crate::assessment::submission::{AssessmentSubmission, NumberOrText, RawAnswers};
use crate::assessment::validation::{
    check_free_text_lengths, parse_automation_pct, resolve_identifier, RespondentRef,
};
use crate::errors::AppError;
use crate::models::assessment::{AssessmentRow, NewAssessment};
use crate::models::respondent::ProfileUpdate;

#[derive(Debug, Clone, Serialize)]
pub struct IntakeOutcome {
    pub assessment_id: i32,
    pub respondent_id: i32,
    pub readiness_score: i32,
    pub breakdown: ScoreBreakdown,
}

/// Identity fields used to (re)attach an assessment to a respondent.
#[derive(Debug, Clone, Default, serde::Deserialize)]
#[serde(default)]
pub struct IdentityRequest {
    #[serde(alias = "userId")]
    pub user_id: Option<NumberOrText>,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Resolves a respondent reference to an id.
///
/// A numeric id must already exist. An email is find-or-created and its
/// profile upserted with whatever name/title fields were supplied.
pub async fn resolve_respondent(
    store: &dyn AssessmentStore,
    reference: RespondentRef,
    profile: &ProfileUpdate,
) -> Result<i32, AppError> {
    match reference {
        RespondentRef::Id(id) => {
            let respondent = store
                .respondent_by_id(id)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("Respondent {id} not found")))?;
            Ok(respondent.id)
        }
        RespondentRef::Email(email) => {
            let display_name = profile.display_name();
            let respondent = store
                .find_or_create_respondent(&email, display_name.as_deref())
                .await?;
            store.upsert_profile(respondent.id, profile).await?;
            Ok(respondent.id)
        }
    }
}

/// Normalizes the raw answers and computes the score. Pure.
pub fn build_assessment(
    answers: &RawAnswers,
    automation_pct: i32,
) -> (NewAssessment, ScoreBreakdown) {
    let journey = normalize_journey(answers.question_1_journey.as_deref());
    let knowledge = normalize_knowledge(answers.question_4_knowledge.as_deref());
    let learning_style = normalize_learning_style(answers.question_7_learning_style.as_deref());
    let breakdown = compute_readiness_score(journey, knowledge, automation_pct, learning_style);

    let role_title = non_empty(answers.question_3b_role_title.clone());
    let new = NewAssessment {
        journey,
        industry: normalize_industry(answers.question_2_industry.as_deref()),
        role_level: normalize_role_level(
            answers.question_3a_level.as_deref(),
            role_title.as_deref(),
        ),
        role_title,
        knowledge,
        automation_pct,
        superpower: normalize_superpower(answers.question_6_superpower.as_deref()),
        learning_style,
        goal: normalize_goal(answers.question_8_goal.as_deref()),
        readiness_score: breakdown.total,
    };
    (new, breakdown)
}

pub async fn submit_assessment(
    store: &dyn AssessmentStore,
    submission: AssessmentSubmission,
) -> Result<IntakeOutcome, AppError> {
    let AssessmentSubmission {
        user_id,
        email,
        first_name,
        last_name,
        answers,
        ..
    } = submission.into_canonical();

    // 1. Shape checks, the only rejections on this path
    let reference = resolve_identifier(user_id.as_ref(), email.as_deref())?;
    let automation_pct = parse_automation_pct(answers.question_5_automation_pct.as_ref())?;
    check_free_text_lengths(&answers)?;

    // 2. Normalize + score
    let (new, breakdown) = build_assessment(&answers, automation_pct);
    info!(
        event = "score_calculated",
        readiness_score = breakdown.total,
        journey = new.journey.as_str(),
        knowledge = new.knowledge.as_str(),
        learning_style = new.learning_style.as_str(),
        automation_pct,
        "Readiness score computed"
    );

    // 3. Append-only insert; a new respondent is only kept if the insert lands
    let row = match reference {
        RespondentRef::Id(id) => {
            let respondent_id =
                resolve_respondent(store, RespondentRef::Id(id), &ProfileUpdate::default())
                    .await?;
            store.insert_assessment(respondent_id, &new).await?
        }
        RespondentRef::Email(email) => {
            let profile = ProfileUpdate {
                first_name: non_empty(first_name),
                last_name: non_empty(last_name),
                job_title: non_empty(answers.question_3b_role_title.clone()),
            };
            store
                .record_assessment_for_email(&email, &profile, &new)
                .await?
        }
    };
    let respondent_id = row.respondent_id;
    info!(
        event = "assessment_completed",
        assessment_id = row.id,
        respondent_id,
        readiness_score = row.readiness_score,
        "Assessment stored"
    );

    Ok(IntakeOutcome {
        assessment_id: row.id,
        respondent_id,
        readiness_score: row.readiness_score,
        breakdown,
    })
}

/// Associates an existing assessment with a respondent resolved from the
/// identity fields (same rules as intake). The only mutation a stored
/// assessment ever sees.
pub async fn attach_identity(
    store: &dyn AssessmentStore,
    assessment_id: i32,
    request: IdentityRequest,
) -> Result<AssessmentRow, AppError> {
    let reference = resolve_identifier(request.user_id.as_ref(), request.email.as_deref())?;

    // Fail before creating a respondent for an assessment that doesn't exist
    if store.assessment_by_id(assessment_id).await?.is_none() {
        return Err(AppError::NotFound(format!(
            "Assessment {assessment_id} not found"
        )));
    }

    let profile = ProfileUpdate {
        first_name: non_empty(request.first_name),
        last_name: non_empty(request.last_name),
        job_title: None,
    };
    let respondent_id = resolve_respondent(store, reference, &profile).await?;

    let row = store
        .attach_respondent(assessment_id, respondent_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Assessment {assessment_id} not found")))?;

    info!("Attached assessment {assessment_id} to respondent {respondent_id}");
    Ok(row)
}
