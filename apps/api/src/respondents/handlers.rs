use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::assessment::intake::resolve_respondent;
use crate::assessment::validation::{is_valid_email, normalize_email, RespondentRef};
use crate::errors::AppError;
use crate::models::assessment::AssessmentRow;
use crate::models::respondent::{ProfileUpdate, RespondentProfileRow, RespondentRow};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub job_title: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct EmailQuery {
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct RespondentResponse {
    pub ok: bool,
    pub respondent: RespondentRow,
    pub profile: Option<RespondentProfileRow>,
}

#[derive(Debug, Serialize)]
pub struct LatestAssessmentResponse {
    pub ok: bool,
    pub assessment: AssessmentRow,
}

#[derive(Debug, Serialize)]
pub struct ReadinessScoreResponse {
    pub ok: bool,
    pub respondent_id: i32,
    pub readiness_score: i32,
    pub completed_at: DateTime<Utc>,
}

fn trimmed(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

async fn respondent_view(
    state: &AppState,
    respondent: RespondentRow,
) -> Result<RespondentResponse, AppError> {
    let profile = state.store.profile_by_respondent(respondent.id).await?;
    Ok(RespondentResponse {
        ok: true,
        respondent,
        profile,
    })
}

/// POST /api/v1/respondents
///
/// Find-or-create by email. Registering a known email returns the existing
/// respondent with any newly supplied profile fields merged in.
pub async fn handle_register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<Json<RespondentResponse>, AppError> {
    let email = normalize_email(&request.email);
    if !is_valid_email(&email) {
        return Err(AppError::Validation(format!(
            "'{email}' is not a valid email address"
        )));
    }

    let profile = ProfileUpdate {
        first_name: trimmed(request.first_name),
        last_name: trimmed(request.last_name),
        job_title: trimmed(request.job_title),
    };
    let id = resolve_respondent(state.store.as_ref(), RespondentRef::Email(email), &profile).await?;
    info!("Registered respondent {id}");

    let respondent = state
        .store
        .respondent_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Respondent {id} not found")))?;
    Ok(Json(respondent_view(&state, respondent).await?))
}

/// GET /api/v1/respondents?email=
pub async fn handle_find_by_email(
    State(state): State<AppState>,
    Query(query): Query<EmailQuery>,
) -> Result<Json<RespondentResponse>, AppError> {
    let email = normalize_email(&query.email);
    let respondent = state
        .store
        .respondent_by_email(&email)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No respondent with email {email}")))?;
    Ok(Json(respondent_view(&state, respondent).await?))
}

/// GET /api/v1/respondents/:id
pub async fn handle_get(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<RespondentResponse>, AppError> {
    let respondent = state
        .store
        .respondent_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Respondent {id} not found")))?;
    Ok(Json(respondent_view(&state, respondent).await?))
}

async fn latest_for(state: &AppState, id: i32) -> Result<AssessmentRow, AppError> {
    state
        .store
        .latest_assessment(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No assessment found for respondent {id}")))
}

/// GET /api/v1/respondents/:id/assessments/latest
pub async fn handle_latest_assessment(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<LatestAssessmentResponse>, AppError> {
    let assessment = latest_for(&state, id).await?;
    Ok(Json(LatestAssessmentResponse {
        ok: true,
        assessment,
    }))
}

/// GET /api/v1/respondents/:id/readiness-score
pub async fn handle_readiness_score(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ReadinessScoreResponse>, AppError> {
    let assessment = latest_for(&state, id).await?;
    Ok(Json(ReadinessScoreResponse {
        ok: true,
        respondent_id: id,
        readiness_score: assessment.readiness_score,
        completed_at: assessment.completed_at,
    }))
}
