use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::assessment::intake::{attach_identity, submit_assessment, IdentityRequest};
use crate::assessment::scoring::ScoreBreakdown;
use crate::assessment::submission::AssessmentSubmission;
use crate::errors::AppError;
use crate::models::assessment::AssessmentRow;
use crate::state::AppState;

pub const DEFAULT_LIST_LIMIT: i64 = 50;
pub const MAX_LIST_LIMIT: i64 = 200;

#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub ok: bool,
    pub assessment_id: i32,
    pub readiness_score: i32,
    pub user_id: i32,
    pub breakdown: ScoreBreakdown,
}

#[derive(Debug, Serialize)]
pub struct AssessmentResponse {
    pub ok: bool,
    pub assessment: AssessmentRow,
}

#[derive(Debug, Serialize)]
pub struct AssessmentListResponse {
    pub ok: bool,
    pub assessments: Vec<AssessmentRow>,
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub respondent_id: Option<i32>,
    pub limit: Option<i64>,
}

/// POST /api/v1/assessments
///
/// Accepts the current payload or the legacy `ai_*` payload. Always inserts a
/// new response; the score is computed here, never read from the body.
pub async fn handle_submit(
    State(state): State<AppState>,
    Json(submission): Json<AssessmentSubmission>,
) -> Result<Json<SubmitResponse>, AppError> {
    let outcome = submit_assessment(state.store.as_ref(), submission).await?;
    Ok(Json(SubmitResponse {
        ok: true,
        assessment_id: outcome.assessment_id,
        readiness_score: outcome.readiness_score,
        user_id: outcome.respondent_id,
        breakdown: outcome.breakdown,
    }))
}

/// GET /api/v1/assessments?respondent_id=&limit=
pub async fn handle_list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<AssessmentListResponse>, AppError> {
    let limit = query
        .limit
        .unwrap_or(DEFAULT_LIST_LIMIT)
        .clamp(1, MAX_LIST_LIMIT);
    let assessments = state
        .store
        .list_assessments(query.respondent_id, limit)
        .await?;
    Ok(Json(AssessmentListResponse {
        ok: true,
        assessments,
    }))
}

/// GET /api/v1/assessments/:id
pub async fn handle_get(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<AssessmentResponse>, AppError> {
    let assessment = state
        .store
        .assessment_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Assessment {id} not found")))?;
    Ok(Json(AssessmentResponse {
        ok: true,
        assessment,
    }))
}

/// PATCH /api/v1/assessments/:id/identity
///
/// Attaches contact info captured after the questionnaire to the assessment.
pub async fn handle_attach_identity(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(request): Json<IdentityRequest>,
) -> Result<Json<AssessmentResponse>, AppError> {
    let assessment = attach_identity(state.store.as_ref(), id, request).await?;
    Ok(Json(AssessmentResponse {
        ok: true,
        assessment,
    }))
}
