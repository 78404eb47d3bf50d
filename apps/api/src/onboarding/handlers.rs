use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::assessment::handlers::SubmitResponse;
use crate::assessment::intake::submit_assessment;
use crate::employers::handlers::EmployerLeadResponse;
use crate::employers::leads::capture_lead;
use crate::errors::AppError;
use crate::onboarding::session::{OnboardingSession, SessionOutcome, StepAnswer};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub ok: bool,
    pub session: OnboardingSession,
    pub answered: usize,
    pub total_steps: usize,
}

impl From<OnboardingSession> for SessionResponse {
    fn from(session: OnboardingSession) -> Self {
        let (answered, total_steps) = session.progress();
        Self {
            ok: true,
            session,
            answered,
            total_steps,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AdvanceRequest {
    pub session: OnboardingSession,
    pub answer: StepAnswer,
}

#[derive(Debug, Deserialize)]
pub struct SessionRequest {
    pub session: OnboardingSession,
}

/// A finished session lands as an assessment or, on the employer path, a lead.
#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OnboardingSubmitResponse {
    Assessment(SubmitResponse),
    EmployerLead(EmployerLeadResponse),
}

/// POST /api/v1/onboarding/sessions
pub async fn handle_start() -> Json<SessionResponse> {
    let session = OnboardingSession::start();
    info!(session_id = %session.session_id, "Onboarding session started");
    Json(session.into())
}

/// POST /api/v1/onboarding/sessions/advance
pub async fn handle_advance(
    Json(request): Json<AdvanceRequest>,
) -> Result<Json<SessionResponse>, AppError> {
    let session = request.session.advance(request.answer)?;
    Ok(Json(session.into()))
}

/// POST /api/v1/onboarding/sessions/back
pub async fn handle_back(
    Json(request): Json<SessionRequest>,
) -> Result<Json<SessionResponse>, AppError> {
    let session = request.session.back()?;
    Ok(Json(session.into()))
}

/// POST /api/v1/onboarding/sessions/submit
///
/// Professional sessions run through the same intake as a direct submission;
/// employer sessions are captured as leads.
pub async fn handle_submit(
    State(state): State<AppState>,
    Json(request): Json<SessionRequest>,
) -> Result<Json<OnboardingSubmitResponse>, AppError> {
    let session_id = request.session.session_id;
    let response = match request.session.finish()? {
        SessionOutcome::Assessment(submission) => {
            let outcome = submit_assessment(state.store.as_ref(), submission).await?;
            info!(
                %session_id,
                assessment_id = outcome.assessment_id,
                "Onboarding session submitted"
            );
            OnboardingSubmitResponse::Assessment(SubmitResponse {
                ok: true,
                assessment_id: outcome.assessment_id,
                readiness_score: outcome.readiness_score,
                user_id: outcome.respondent_id,
                breakdown: outcome.breakdown,
            })
        }
        SessionOutcome::EmployerLead(request) => {
            let lead = capture_lead(state.store.as_ref(), request).await?;
            info!(%session_id, lead_id = lead.id, "Employer onboarding session submitted");
            OnboardingSubmitResponse::EmployerLead(EmployerLeadResponse { ok: true, lead })
        }
    };
    Ok(Json(response))
}
