//! Input-shape checks that run before normalization.
//!
//! These are the only rejections on the intake path: a missing or malformed
//! identifier, a non-numeric automation percentage, or oversize free text.
//! Unknown answer tokens are not validated here; the normalizer absorbs them.

use crate::assessment::submission::{NumberOrText, RawAnswers};
use crate::errors::AppError;

pub const MAX_FREE_TEXT_LEN: usize = 100;
const MAX_EMAIL_LEN: usize = 254;

/// How a submission identifies its respondent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RespondentRef {
    Id(i32),
    /// Trimmed and lower-cased.
    Email(String),
}

/// A numeric id wins over an email; an empty-string id counts as absent.
pub fn resolve_identifier(
    user_id: Option<&NumberOrText>,
    email: Option<&str>,
) -> Result<RespondentRef, AppError> {
    if let Some(raw) = user_id {
        if let Some(id) = parse_respondent_id(raw)? {
            return Ok(RespondentRef::Id(id));
        }
    }

    match email.map(normalize_email) {
        Some(email) if !email.is_empty() => {
            if is_valid_email(&email) {
                Ok(RespondentRef::Email(email))
            } else {
                Err(AppError::Validation(format!(
                    "'{email}' is not a valid email address"
                )))
            }
        }
        _ => Err(AppError::Validation(
            "Provide either user_id or email".to_string(),
        )),
    }
}

fn parse_respondent_id(raw: &NumberOrText) -> Result<Option<i32>, AppError> {
    let invalid = || AppError::Validation("user_id must be a positive integer".to_string());

    let value = match raw {
        NumberOrText::Number(n) => *n,
        NumberOrText::Text(s) if s.trim().is_empty() => return Ok(None),
        NumberOrText::Text(s) => s.trim().parse::<f64>().map_err(|_| invalid())?,
    };

    if !value.is_finite() || value.fract() != 0.0 || value < 1.0 || value > f64::from(i32::MAX) {
        return Err(invalid());
    }
    Ok(Some(value as i32))
}

pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Syntactic check only: one `@`, a non-empty local part, and a dotted domain
/// with no empty labels.
pub fn is_valid_email(email: &str) -> bool {
    if email.len() > MAX_EMAIL_LEN || email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') || !domain.contains('.') {
        return false;
    }
    domain.split('.').all(|label| !label.is_empty())
}

/// Missing → 0; numbers and numeric strings are rounded and clamped to
/// [0, 100]; anything else is rejected.
pub fn parse_automation_pct(raw: Option<&NumberOrText>) -> Result<i32, AppError> {
    let invalid = || {
        AppError::Validation("question_5_automation_pct must be a number between 0 and 100".to_string())
    };

    let value = match raw {
        None => return Ok(0),
        Some(NumberOrText::Number(n)) => *n,
        Some(NumberOrText::Text(s)) if s.trim().is_empty() => return Ok(0),
        Some(NumberOrText::Text(s)) => s
            .trim()
            .trim_end_matches('%')
            .parse::<f64>()
            .map_err(|_| invalid())?,
    };

    if !value.is_finite() {
        return Err(invalid());
    }
    Ok(value.round().clamp(0.0, 100.0) as i32)
}

pub fn check_free_text_lengths(answers: &RawAnswers) -> Result<(), AppError> {
    let fields = [
        ("question_2_industry", answers.question_2_industry.as_deref()),
        ("question_3b_role_title", answers.question_3b_role_title.as_deref()),
    ];
    for (name, value) in fields {
        if let Some(v) = value {
            if v.trim().chars().count() > MAX_FREE_TEXT_LEN {
                return Err(AppError::Validation(format!(
                    "{name} must be at most {MAX_FREE_TEXT_LEN} characters"
                )));
            }
        }
    }
    Ok(())
}
