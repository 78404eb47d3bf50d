use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct EmployerLeadRow {
    pub id: i32,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub company: Option<String>,
    pub job_title: Option<String>,
    pub team_size: Option<String>,
    pub industry: Option<String>,
    pub employer_tools: Vec<String>,
    pub user_type: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A validated lead. Capturing the same email again overwrites every field
/// with the latest details.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmployerLeadInput {
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub company: Option<String>,
    pub job_title: Option<String>,
    pub team_size: Option<String>,
    pub industry: Option<String>,
    pub employer_tools: Vec<String>,
}
