use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::assessment::handlers::{DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT};
use crate::employers::leads::{capture_lead, EmployerLeadRequest};
use crate::errors::AppError;
use crate::models::employer::EmployerLeadRow;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct EmployerLeadResponse {
    pub ok: bool,
    pub lead: EmployerLeadRow,
}

#[derive(Debug, Serialize)]
pub struct EmployerLeadListResponse {
    pub ok: bool,
    pub leads: Vec<EmployerLeadRow>,
}

#[derive(Debug, Deserialize)]
pub struct LeadListQuery {
    pub limit: Option<i64>,
}

/// POST /api/v1/employer-leads
pub async fn handle_capture(
    State(state): State<AppState>,
    Json(request): Json<EmployerLeadRequest>,
) -> Result<Json<EmployerLeadResponse>, AppError> {
    let lead = capture_lead(state.store.as_ref(), request).await?;
    Ok(Json(EmployerLeadResponse { ok: true, lead }))
}

/// GET /api/v1/employer-leads?limit=
pub async fn handle_list(
    State(state): State<AppState>,
    Query(query): Query<LeadListQuery>,
) -> Result<Json<EmployerLeadListResponse>, AppError> {
    let limit = query
        .limit
        .unwrap_or(DEFAULT_LIST_LIMIT)
        .clamp(1, MAX_LIST_LIMIT);
    let leads = state.store.list_employer_leads(limit).await?;
    Ok(Json(EmployerLeadListResponse { ok: true, leads }))
}
