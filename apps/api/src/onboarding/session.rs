//! Onboarding session: the questionnaire step machine as a plain value.
//!
//! The session is serialized to the client after every step and posted back
//! with the next answer; the server keeps nothing between requests. The score
//! is recomputed at intake, so a hand-edited session cannot forge one.
//!
//! After `welcome` the respondent picks a path. Professionals take the
//! readiness questionnaire; employers leave lead details instead.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::assessment::submission::{AssessmentSubmission, NumberOrText, RawAnswers};
use crate::employers::leads::EmployerLeadRequest;
use crate::errors::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnboardingStep {
    Welcome,
    UserType,
    Journey,
    Industry,
    Role,
    Knowledge,
    Automation,
    Superpower,
    LearningStyle,
    Goal,
    Contact,
    EmployerTools,
    EmployerContact,
    Complete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserType {
    Professional,
    Employer,
}

pub const PROFESSIONAL_PATH: &[OnboardingStep] = &[
    OnboardingStep::Welcome,
    OnboardingStep::UserType,
    OnboardingStep::Journey,
    OnboardingStep::Industry,
    OnboardingStep::Role,
    OnboardingStep::Knowledge,
    OnboardingStep::Automation,
    OnboardingStep::Superpower,
    OnboardingStep::LearningStyle,
    OnboardingStep::Goal,
    OnboardingStep::Contact,
    OnboardingStep::Complete,
];

pub const EMPLOYER_PATH: &[OnboardingStep] = &[
    OnboardingStep::Welcome,
    OnboardingStep::UserType,
    OnboardingStep::EmployerTools,
    OnboardingStep::EmployerContact,
    OnboardingStep::Complete,
];

impl UserType {
    pub fn path(self) -> &'static [OnboardingStep] {
        match self {
            UserType::Professional => PROFESSIONAL_PATH,
            UserType::Employer => EMPLOYER_PATH,
        }
    }
}

/// One answer, tagged with the step it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum StepAnswer {
    Welcome,
    UserType {
        user_type: UserType,
    },
    Journey {
        value: String,
    },
    Industry {
        value: String,
    },
    Role {
        level: Option<String>,
        title: Option<String>,
    },
    Knowledge {
        value: String,
    },
    Automation {
        percent: NumberOrText,
    },
    Superpower {
        value: String,
    },
    LearningStyle {
        value: String,
    },
    Goal {
        value: String,
    },
    Contact {
        user_id: Option<NumberOrText>,
        email: Option<String>,
        first_name: Option<String>,
        last_name: Option<String>,
    },
    EmployerTools {
        #[serde(default)]
        tools: Vec<String>,
    },
    EmployerContact {
        email: Option<String>,
        first_name: Option<String>,
        last_name: Option<String>,
        company: Option<String>,
        job_title: Option<String>,
        team_size: Option<String>,
        industry: Option<String>,
    },
}

impl StepAnswer {
    pub fn step(&self) -> OnboardingStep {
        match self {
            StepAnswer::Welcome => OnboardingStep::Welcome,
            StepAnswer::UserType { .. } => OnboardingStep::UserType,
            StepAnswer::Journey { .. } => OnboardingStep::Journey,
            StepAnswer::Industry { .. } => OnboardingStep::Industry,
            StepAnswer::Role { .. } => OnboardingStep::Role,
            StepAnswer::Knowledge { .. } => OnboardingStep::Knowledge,
            StepAnswer::Automation { .. } => OnboardingStep::Automation,
            StepAnswer::Superpower { .. } => OnboardingStep::Superpower,
            StepAnswer::LearningStyle { .. } => OnboardingStep::LearningStyle,
            StepAnswer::Goal { .. } => OnboardingStep::Goal,
            StepAnswer::Contact { .. } => OnboardingStep::Contact,
            StepAnswer::EmployerTools { .. } => OnboardingStep::EmployerTools,
            StepAnswer::EmployerContact { .. } => OnboardingStep::EmployerContact,
        }
    }
}

/// Identity captured on the contact step.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactDetails {
    pub user_id: Option<NumberOrText>,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OnboardingSession {
    pub session_id: Uuid,
    pub step: OnboardingStep,
    #[serde(default)]
    pub user_type: Option<UserType>,
    #[serde(default)]
    pub answers: RawAnswers,
    #[serde(default)]
    pub contact: ContactDetails,
    #[serde(default)]
    pub employer: EmployerLeadRequest,
    pub started_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// What a completed session turns into.
#[derive(Debug, Clone)]
pub enum SessionOutcome {
    Assessment(AssessmentSubmission),
    EmployerLead(EmployerLeadRequest),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("expected an answer for step {expected:?}, got {got:?}")]
    StepMismatch {
        expected: OnboardingStep,
        got: OnboardingStep,
    },

    #[error("step {0:?} is not on this session's path")]
    OffPath(OnboardingStep),

    #[error("session is already complete")]
    AlreadyComplete,

    #[error("session is not complete (current step: {0:?})")]
    Incomplete(OnboardingStep),

    #[error("contact step needs a user_id or an email")]
    MissingContact,

    #[error("employer contact step needs an email")]
    MissingEmployerEmail,
}

impl From<SessionError> for AppError {
    fn from(err: SessionError) -> Self {
        AppError::Validation(err.to_string())
    }
}

fn present(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.trim().is_empty())
}

impl OnboardingSession {
    pub fn start() -> Self {
        let now = Utc::now();
        Self {
            session_id: Uuid::new_v4(),
            step: OnboardingStep::Welcome,
            user_type: None,
            answers: RawAnswers::default(),
            contact: ContactDetails::default(),
            employer: EmployerLeadRequest::default(),
            started_at: now,
            updated_at: now,
        }
    }

    /// Steps for the chosen path; professional until a type is picked.
    pub fn path(&self) -> &'static [OnboardingStep] {
        self.user_type.map_or(PROFESSIONAL_PATH, UserType::path)
    }

    fn position(&self) -> Result<usize, SessionError> {
        self.path()
            .iter()
            .position(|s| *s == self.step)
            .ok_or(SessionError::OffPath(self.step))
    }

    pub fn is_complete(&self) -> bool {
        self.step == OnboardingStep::Complete
    }

    /// Records the answer for the current step and moves to the next one.
    /// Going back and re-answering a step overwrites the earlier answer;
    /// re-answering the user type switches paths.
    pub fn advance(mut self, answer: StepAnswer) -> Result<Self, SessionError> {
        if self.is_complete() {
            return Err(SessionError::AlreadyComplete);
        }
        let position = self.position()?;
        if answer.step() != self.step {
            return Err(SessionError::StepMismatch {
                expected: self.step,
                got: answer.step(),
            });
        }

        match answer {
            StepAnswer::Welcome => {}
            StepAnswer::UserType { user_type } => self.user_type = Some(user_type),
            StepAnswer::Journey { value } => self.answers.question_1_journey = Some(value),
            StepAnswer::Industry { value } => self.answers.question_2_industry = Some(value),
            StepAnswer::Role { level, title } => {
                self.answers.question_3a_level = level;
                self.answers.question_3b_role_title = title;
            }
            StepAnswer::Knowledge { value } => self.answers.question_4_knowledge = Some(value),
            StepAnswer::Automation { percent } => {
                self.answers.question_5_automation_pct = Some(percent)
            }
            StepAnswer::Superpower { value } => self.answers.question_6_superpower = Some(value),
            StepAnswer::LearningStyle { value } => {
                self.answers.question_7_learning_style = Some(value)
            }
            StepAnswer::Goal { value } => self.answers.question_8_goal = Some(value),
            StepAnswer::Contact {
                user_id,
                email,
                first_name,
                last_name,
            } => {
                let has_id = matches!(&user_id, Some(NumberOrText::Number(_)))
                    || matches!(&user_id, Some(NumberOrText::Text(t)) if !t.trim().is_empty());
                if !has_id && !present(&email) {
                    return Err(SessionError::MissingContact);
                }
                self.contact = ContactDetails {
                    user_id,
                    email,
                    first_name,
                    last_name,
                };
            }
            StepAnswer::EmployerTools { tools } => self.employer.employer_tools = tools,
            StepAnswer::EmployerContact {
                email,
                first_name,
                last_name,
                company,
                job_title,
                team_size,
                industry,
            } => {
                if !present(&email) {
                    return Err(SessionError::MissingEmployerEmail);
                }
                self.employer = EmployerLeadRequest {
                    email,
                    first_name,
                    last_name,
                    company,
                    job_title,
                    team_size,
                    industry,
                    employer_tools: std::mem::take(&mut self.employer.employer_tools),
                };
            }
        }

        // UserType sits at the same position on every path, so `position`
        // stays valid after a path switch. Complete is last and rejected above.
        self.step = self
            .path()
            .get(position + 1)
            .copied()
            .unwrap_or(OnboardingStep::Complete);
        self.updated_at = Utc::now();
        Ok(self)
    }

    /// Saturates at `Welcome`.
    pub fn back(mut self) -> Result<Self, SessionError> {
        let position = self.position()?;
        self.step = self.path()[position.saturating_sub(1)];
        self.updated_at = Utc::now();
        Ok(self)
    }

    /// `(answered, total)` for progress indicators.
    pub fn progress(&self) -> (usize, usize) {
        let total = self.path().len() - 1;
        (self.position().unwrap_or_default(), total)
    }

    pub fn finish(self) -> Result<SessionOutcome, SessionError> {
        if !self.is_complete() {
            return Err(SessionError::Incomplete(self.step));
        }
        Ok(match self.user_type {
            Some(UserType::Employer) => SessionOutcome::EmployerLead(self.employer),
            _ => SessionOutcome::Assessment(AssessmentSubmission {
                user_id: self.contact.user_id,
                email: self.contact.email,
                first_name: self.contact.first_name,
                last_name: self.contact.last_name,
                answers: self.answers,
                legacy: Default::default(),
            }),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answer_for(step: OnboardingStep) -> StepAnswer {
        match step {
            OnboardingStep::Welcome => StepAnswer::Welcome,
            OnboardingStep::UserType => StepAnswer::UserType {
                user_type: UserType::Professional,
            },
            OnboardingStep::Journey => StepAnswer::Journey {
                value: "daily-user".to_string(),
            },
            OnboardingStep::Industry => StepAnswer::Industry {
                value: "Finance".to_string(),
            },
            OnboardingStep::Role => StepAnswer::Role {
                level: None,
                title: Some("Head of Risk, VP".to_string()),
            },
            OnboardingStep::Knowledge => StepAnswer::Knowledge {
                value: "strategic".to_string(),
            },
            OnboardingStep::Automation => StepAnswer::Automation {
                percent: NumberOrText::Number(30.0),
            },
            OnboardingStep::Superpower => StepAnswer::Superpower {
                value: "leadership".to_string(),
            },
            OnboardingStep::LearningStyle => StepAnswer::LearningStyle {
                value: "structured".to_string(),
            },
            OnboardingStep::Goal => StepAnswer::Goal {
                value: "changemaker".to_string(),
            },
            OnboardingStep::Contact => StepAnswer::Contact {
                user_id: None,
                email: Some("flow@example.com".to_string()),
                first_name: Some("Flo".to_string()),
                last_name: None,
            },
            OnboardingStep::EmployerTools => StepAnswer::EmployerTools {
                tools: vec!["career-guidance".to_string()],
            },
            OnboardingStep::EmployerContact => StepAnswer::EmployerContact {
                email: Some("talent@acme.com".to_string()),
                first_name: Some("Kim".to_string()),
                last_name: None,
                company: Some("Acme".to_string()),
                job_title: None,
                team_size: Some("11-50".to_string()),
                industry: None,
            },
            OnboardingStep::Complete => unreachable!("no answer for Complete"),
        }
    }

    fn walk_to(mut session: OnboardingSession, target: OnboardingStep) -> OnboardingSession {
        while session.step != target {
            let answer = answer_for(session.step);
            session = session.advance(answer).unwrap();
        }
        session
    }

    fn employer_session() -> OnboardingSession {
        walk_to(OnboardingSession::start(), OnboardingStep::UserType)
            .advance(StepAnswer::UserType {
                user_type: UserType::Employer,
            })
            .unwrap()
    }

    #[test]
    fn test_walks_every_professional_step_in_order() {
        let mut session = OnboardingSession::start();
        for expected in &PROFESSIONAL_PATH[..PROFESSIONAL_PATH.len() - 1] {
            assert_eq!(session.step, *expected);
            session = session.advance(answer_for(*expected)).unwrap();
        }
        assert!(session.is_complete());
        assert_eq!(session.progress(), (11, 11));
    }

    #[test]
    fn test_out_of_order_answer_rejected() {
        let session = OnboardingSession::start();
        let err = session
            .advance(StepAnswer::Goal {
                value: "balance".to_string(),
            })
            .unwrap_err();
        assert_eq!(
            err,
            SessionError::StepMismatch {
                expected: OnboardingStep::Welcome,
                got: OnboardingStep::Goal,
            }
        );
    }

    #[test]
    fn test_cannot_advance_past_complete() {
        let session = walk_to(OnboardingSession::start(), OnboardingStep::Complete);
        let err = session.advance(StepAnswer::Welcome).unwrap_err();
        assert_eq!(err, SessionError::AlreadyComplete);
    }

    #[test]
    fn test_back_saturates_at_welcome() {
        let session = OnboardingSession::start().back().unwrap();
        assert_eq!(session.step, OnboardingStep::Welcome);
    }

    #[test]
    fn test_back_then_reanswer_overwrites() {
        let session = walk_to(OnboardingSession::start(), OnboardingStep::Journey)
            .advance(StepAnswer::Journey {
                value: "new".to_string(),
            })
            .unwrap()
            .back()
            .unwrap()
            .advance(StepAnswer::Journey {
                value: "weekly".to_string(),
            })
            .unwrap();
        assert_eq!(session.answers.question_1_journey.as_deref(), Some("weekly"));
        assert_eq!(session.step, OnboardingStep::Industry);
    }

    #[test]
    fn test_contact_requires_identifier() {
        let session = walk_to(OnboardingSession::start(), OnboardingStep::Contact);
        let err = session
            .advance(StepAnswer::Contact {
                user_id: Some(NumberOrText::Text("  ".to_string())),
                email: Some(String::new()),
                first_name: None,
                last_name: None,
            })
            .unwrap_err();
        assert_eq!(err, SessionError::MissingContact);
    }

    #[test]
    fn test_incomplete_session_cannot_finish() {
        let err = OnboardingSession::start().finish().unwrap_err();
        assert_eq!(err, SessionError::Incomplete(OnboardingStep::Welcome));
    }

    #[test]
    fn test_professional_session_becomes_submission() {
        let session = walk_to(OnboardingSession::start(), OnboardingStep::Complete);
        let SessionOutcome::Assessment(submission) = session.finish().unwrap() else {
            panic!("expected an assessment submission");
        };
        assert_eq!(submission.email.as_deref(), Some("flow@example.com"));
        assert_eq!(
            submission.answers.question_3b_role_title.as_deref(),
            Some("Head of Risk, VP")
        );
        assert_eq!(
            submission.answers.question_5_automation_pct,
            Some(NumberOrText::Number(30.0))
        );
    }

    #[test]
    fn test_employer_path_skips_questionnaire() {
        let session = employer_session();
        assert_eq!(session.step, OnboardingStep::EmployerTools);
        assert_eq!(session.progress(), (2, 4));

        let session = walk_to(session, OnboardingStep::Complete);
        let SessionOutcome::EmployerLead(lead) = session.finish().unwrap() else {
            panic!("expected an employer lead");
        };
        assert_eq!(lead.email.as_deref(), Some("talent@acme.com"));
        assert_eq!(lead.company.as_deref(), Some("Acme"));
        assert_eq!(lead.employer_tools, vec!["career-guidance"]);
    }

    #[test]
    fn test_employer_contact_requires_email() {
        let session = walk_to(employer_session(), OnboardingStep::EmployerContact);
        let err = session
            .advance(StepAnswer::EmployerContact {
                email: None,
                first_name: Some("Kim".to_string()),
                last_name: None,
                company: None,
                job_title: None,
                team_size: None,
                industry: None,
            })
            .unwrap_err();
        assert_eq!(err, SessionError::MissingEmployerEmail);
    }

    #[test]
    fn test_switching_back_to_professional_path() {
        let session = employer_session().back().unwrap();
        assert_eq!(session.step, OnboardingStep::UserType);

        let session = session
            .advance(StepAnswer::UserType {
                user_type: UserType::Professional,
            })
            .unwrap();
        assert_eq!(session.step, OnboardingStep::Journey);
    }

    #[test]
    fn test_step_off_path_rejected() {
        let mut session = employer_session();
        session.step = OnboardingStep::Goal;
        let err = session
            .advance(StepAnswer::Goal {
                value: "balance".to_string(),
            })
            .unwrap_err();
        assert_eq!(err, SessionError::OffPath(OnboardingStep::Goal));
    }

    #[test]
    fn test_session_survives_json_round_trip() {
        let session = employer_session();
        let json = serde_json::to_string(&session).unwrap();
        let restored: OnboardingSession = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, session);
    }
}
