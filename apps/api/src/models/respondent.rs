use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RespondentRow {
    pub id: i32,
    pub email: String,
    pub name: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RespondentProfileRow {
    pub id: i32,
    pub respondent_id: i32,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub job_title: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial profile data supplied alongside a submission.
/// `None` fields leave the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub job_title: Option<String>,
}

impl ProfileUpdate {
    /// "First Last", or whichever half is present.
    pub fn display_name(&self) -> Option<String> {
        let parts: Vec<&str> = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .filter(|p| !p.is_empty())
            .collect();
        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_joins_present_parts() {
        let update = ProfileUpdate {
            first_name: Some("Ada".to_string()),
            last_name: Some("Lovelace".to_string()),
            job_title: None,
        };
        assert_eq!(update.display_name().as_deref(), Some("Ada Lovelace"));
    }

    #[test]
    fn test_display_name_none_when_empty() {
        assert_eq!(ProfileUpdate::default().display_name(), None);
    }
}
