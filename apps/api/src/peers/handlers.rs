use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::assessment::answers::{Canonical, RoleLevel};
use crate::assessment::normalize::{clean_token, normalize_industry};
use crate::assessment::store::PeerFilter;
use crate::errors::AppError;
use crate::peers::stats::{compare, PeerComparison, PeerReport};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ComparisonQuery {
    pub industry: Option<String>,
    pub role_level: Option<String>,
    /// Kept as text so a malformed value is a 400 with a useful message.
    pub score: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ComparisonResponse {
    pub ok: bool,
    pub filter: PeerFilter,
    pub report: PeerReport,
}

fn parse_filter(query: &ComparisonQuery) -> Result<PeerFilter, AppError> {
    let industry = Some(normalize_industry(query.industry.as_deref())).filter(|i| !i.is_empty());

    let role_level = match query.role_level.as_deref().map(clean_token) {
        Some(token) if !token.is_empty() => Some(RoleLevel::from_canonical(&token).ok_or_else(
            || AppError::Validation(format!("Unknown role_level '{token}'")),
        )?),
        _ => None,
    };

    Ok(PeerFilter {
        industry,
        role_level,
    })
}

fn parse_score(raw: Option<&str>) -> Result<Option<i32>, AppError> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };
    match raw.parse::<i32>() {
        Ok(score) if (0..=100).contains(&score) => Ok(Some(score)),
        _ => Err(AppError::Validation(
            "Invalid score parameter. Must be between 0 and 100.".to_string(),
        )),
    }
}

/// GET /api/v1/peers/comparison?industry=&role_level=&score=
///
/// Both filters optional; with neither the comparison is global.
pub async fn handle_peer_comparison(
    State(state): State<AppState>,
    Query(query): Query<ComparisonQuery>,
) -> Result<Json<ComparisonResponse>, AppError> {
    let filter = parse_filter(&query)?;
    let user_score = parse_score(query.score.as_deref())?;

    let samples = state.store.peer_samples(&filter).await?;
    info!(
        industry = filter.industry.as_deref().unwrap_or("*"),
        role_level = filter.role_level.map(|l| l.as_str()).unwrap_or("*"),
        samples = samples.len(),
        "Computing peer comparison"
    );

    match compare(&samples, user_score) {
        PeerComparison::Available(report) => Ok(Json(ComparisonResponse {
            ok: true,
            filter,
            report: *report,
        })),
        PeerComparison::InsufficientData => Err(AppError::InsufficientPeerData(
            "No assessment data available for comparison yet".to_string(),
        )),
    }
}
