//! Employer lead capture: the employer branch of onboarding ends here instead
//! of in a readiness assessment.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::assessment::normalize::{clean_token, normalize_industry};
use crate::assessment::store::AssessmentStore;
use crate::assessment::validation::{is_valid_email, normalize_email, MAX_FREE_TEXT_LEN};
use crate::errors::AppError;
use crate::models::employer::{EmployerLeadInput, EmployerLeadRow};

pub const TEAM_SIZES: &[&str] = &["1-10", "11-50", "51-200", "201-1000", "1000+"];

/// Offerings an employer can flag interest in.
pub const EMPLOYER_TOOLS: &[&str] = &[
    "industry-updates",
    "career-guidance",
    "hr-leadership",
    "qualified-employees",
];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmployerLeadRequest {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub company: Option<String>,
    pub job_title: Option<String>,
    pub team_size: Option<String>,
    pub industry: Option<String>,
    pub employer_tools: Vec<String>,
}

fn free_text(name: &str, value: Option<String>) -> Result<Option<String>, AppError> {
    let Some(value) = value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty()) else {
        return Ok(None);
    };
    if value.chars().count() > MAX_FREE_TEXT_LEN {
        return Err(AppError::Validation(format!(
            "{name} must be at most {MAX_FREE_TEXT_LEN} characters"
        )));
    }
    Ok(Some(value))
}

/// Tokens are cleaned and de-duplicated in order. Unknown tools are kept so
/// new offerings don't need a deploy, but are logged.
fn normalize_tools(raw: Vec<String>) -> Vec<String> {
    let mut tools: Vec<String> = Vec::with_capacity(raw.len());
    for token in raw.iter().map(|t| clean_token(t)) {
        if token.is_empty() || tools.contains(&token) {
            continue;
        }
        if !EMPLOYER_TOOLS.contains(&token.as_str()) {
            warn!(tool = %token, "Unrecognized employer tool");
        }
        tools.push(token);
    }
    tools
}

pub fn validate_lead(request: EmployerLeadRequest) -> Result<EmployerLeadInput, AppError> {
    let email = request.email.as_deref().map(normalize_email).unwrap_or_default();
    if email.is_empty() {
        return Err(AppError::Validation("email is required".to_string()));
    }
    if !is_valid_email(&email) {
        return Err(AppError::Validation(format!(
            "'{email}' is not a valid email address"
        )));
    }

    let team_size = free_text("team_size", request.team_size)?;
    if let Some(size) = team_size.as_deref() {
        if !TEAM_SIZES.contains(&size) {
            return Err(AppError::Validation(format!(
                "team_size must be one of {}",
                TEAM_SIZES.join(", ")
            )));
        }
    }

    let industry = free_text("industry", request.industry)?
        .map(|i| normalize_industry(Some(&i)));

    Ok(EmployerLeadInput {
        email,
        first_name: free_text("first_name", request.first_name)?,
        last_name: free_text("last_name", request.last_name)?,
        company: free_text("company", request.company)?,
        job_title: free_text("job_title", request.job_title)?,
        team_size,
        industry,
        employer_tools: normalize_tools(request.employer_tools),
    })
}

/// Validates and stores a lead. A known email gets its details replaced.
pub async fn capture_lead(
    store: &dyn AssessmentStore,
    request: EmployerLeadRequest,
) -> Result<EmployerLeadRow, AppError> {
    let lead = validate_lead(request)?;
    let row = store.upsert_employer_lead(&lead).await?;
    info!(
        event = "employer_lead_captured",
        lead_id = row.id,
        tools = row.employer_tools.len(),
        "Employer lead stored"
    );
    Ok(row)
}
