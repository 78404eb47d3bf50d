//! Assessment store: persistence seam for respondents, profiles, assessment
//! responses, and employer leads.
//!
//! Default: `PgAssessmentStore` over a `sqlx::PgPool`.
//! `AppState` holds an `Arc<dyn AssessmentStore>`; tests swap in the
//! in-memory store from `store::memory`.
//!
//! Expected tables:
//! - `respondents(id serial pk, email text unique not null, name text, created_at timestamptz default now())`
//! - `respondent_profiles(id serial pk, respondent_id int unique references respondents,
//!   first_name text, last_name text, job_title text, created_at, updated_at)`
//! - `assessment_responses(id serial pk, respondent_id int references respondents,
//!   journey, industry, role_level, role_title, knowledge, automation_pct int,
//!   superpower, learning_style, goal, readiness_score int, completed_at, created_at)`
//! - `employer_leads(id serial pk, email text unique not null, first_name, last_name,
//!   company, job_title, team_size, industry text, employer_tools text[] not null default '{}',
//!   user_type text not null default 'employer', created_at, updated_at)`

use async_trait::async_trait;
use serde::Serialize;
use sqlx::{PgExecutor, PgPool};

use crate::assessment::answers::{Canonical, RoleLevel};
use crate::errors::AppError;
use crate::models::assessment::{AssessmentRow, NewAssessment, PeerSample};
use crate::models::employer::{EmployerLeadInput, EmployerLeadRow};
use crate::models::respondent::{ProfileUpdate, RespondentProfileRow, RespondentRow};

pub const EMPLOYER_USER_TYPE: &str = "employer";

/// Slice of stored responses to aggregate over. `None` means "any".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PeerFilter {
    /// Lower-cased industry label.
    pub industry: Option<String>,
    pub role_level: Option<RoleLevel>,
}

/// Row counts surfaced by `/health`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StoreHealth {
    pub respondents: i64,
    pub profiles: i64,
    pub assessments: i64,
    pub employer_leads: i64,
}

#[async_trait]
pub trait AssessmentStore: Send + Sync {
    /// Returns the respondent with this (already normalized) email, creating
    /// it if absent. An existing respondent's name is left untouched.
    async fn find_or_create_respondent(
        &self,
        email: &str,
        name: Option<&str>,
    ) -> Result<RespondentRow, AppError>;

    async fn respondent_by_id(&self, id: i32) -> Result<Option<RespondentRow>, AppError>;

    async fn respondent_by_email(&self, email: &str) -> Result<Option<RespondentRow>, AppError>;

    /// Creates the profile if missing; otherwise overwrites only the fields
    /// that are `Some` in `update`.
    async fn upsert_profile(
        &self,
        respondent_id: i32,
        update: &ProfileUpdate,
    ) -> Result<RespondentProfileRow, AppError>;

    async fn profile_by_respondent(
        &self,
        respondent_id: i32,
    ) -> Result<Option<RespondentProfileRow>, AppError>;

    async fn insert_assessment(
        &self,
        respondent_id: i32,
        new: &NewAssessment,
    ) -> Result<AssessmentRow, AppError>;

    /// Find-or-create the respondent for `email`, merge `profile`, and insert
    /// the response as one unit. A failed insert leaves no respondent or
    /// profile behind.
    async fn record_assessment_for_email(
        &self,
        email: &str,
        profile: &ProfileUpdate,
        new: &NewAssessment,
    ) -> Result<AssessmentRow, AppError>;

    async fn assessment_by_id(&self, id: i32) -> Result<Option<AssessmentRow>, AppError>;

    /// Most recent by `completed_at`, ties broken by id.
    async fn latest_assessment(&self, respondent_id: i32)
        -> Result<Option<AssessmentRow>, AppError>;

    /// Newest first.
    async fn list_assessments(
        &self,
        respondent_id: Option<i32>,
        limit: i64,
    ) -> Result<Vec<AssessmentRow>, AppError>;

    /// Re-points an assessment at a respondent. Returns `None` if the
    /// assessment does not exist.
    async fn attach_respondent(
        &self,
        assessment_id: i32,
        respondent_id: i32,
    ) -> Result<Option<AssessmentRow>, AppError>;

    async fn peer_samples(&self, filter: &PeerFilter) -> Result<Vec<PeerSample>, AppError>;

    /// Insert-or-overwrite keyed by email.
    async fn upsert_employer_lead(
        &self,
        lead: &EmployerLeadInput,
    ) -> Result<EmployerLeadRow, AppError>;

    /// Newest first.
    async fn list_employer_leads(&self, limit: i64) -> Result<Vec<EmployerLeadRow>, AppError>;

    async fn health(&self) -> Result<StoreHealth, AppError>;
}

// ────────────────────────────────────────────────────────────────────────────
// PgAssessmentStore
// ────────────────────────────────────────────────────────────────────────────

pub struct PgAssessmentStore {
    pool: PgPool,
}

impl PgAssessmentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Statement helpers shared by the pooled methods and the intake transaction.

async fn upsert_respondent<'e, E: PgExecutor<'e>>(
    executor: E,
    email: &str,
    name: Option<&str>,
) -> Result<RespondentRow, sqlx::Error> {
    // The no-op DO UPDATE makes RETURNING yield the existing row too.
    sqlx::query_as::<_, RespondentRow>(
        r#"
        INSERT INTO respondents (email, name)
        VALUES ($1, $2)
        ON CONFLICT (email) DO UPDATE SET email = EXCLUDED.email
        RETURNING id, email, name, created_at
        "#,
    )
    .bind(email)
    .bind(name)
    .fetch_one(executor)
    .await
}

async fn merge_profile<'e, E: PgExecutor<'e>>(
    executor: E,
    respondent_id: i32,
    update: &ProfileUpdate,
) -> Result<RespondentProfileRow, sqlx::Error> {
    sqlx::query_as::<_, RespondentProfileRow>(
        r#"
        INSERT INTO respondent_profiles (respondent_id, first_name, last_name, job_title)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (respondent_id) DO UPDATE SET
            first_name = COALESCE(EXCLUDED.first_name, respondent_profiles.first_name),
            last_name  = COALESCE(EXCLUDED.last_name, respondent_profiles.last_name),
            job_title  = COALESCE(EXCLUDED.job_title, respondent_profiles.job_title),
            updated_at = NOW()
        RETURNING *
        "#,
    )
    .bind(respondent_id)
    .bind(update.first_name.as_deref())
    .bind(update.last_name.as_deref())
    .bind(update.job_title.as_deref())
    .fetch_one(executor)
    .await
}

async fn insert_response<'e, E: PgExecutor<'e>>(
    executor: E,
    respondent_id: i32,
    new: &NewAssessment,
) -> Result<AssessmentRow, sqlx::Error> {
    sqlx::query_as::<_, AssessmentRow>(
        r#"
        INSERT INTO assessment_responses
            (respondent_id, journey, industry, role_level, role_title, knowledge,
             automation_pct, superpower, learning_style, goal, readiness_score,
             completed_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, NOW())
        RETURNING *
        "#,
    )
    .bind(respondent_id)
    .bind(new.journey.as_str())
    .bind(&new.industry)
    .bind(new.role_level.map(|l| l.as_str()))
    .bind(new.role_title.as_deref())
    .bind(new.knowledge.as_str())
    .bind(new.automation_pct)
    .bind(new.superpower.as_str())
    .bind(new.learning_style.as_str())
    .bind(new.goal.as_str())
    .bind(new.readiness_score)
    .fetch_one(executor)
    .await
}

#[async_trait]
impl AssessmentStore for PgAssessmentStore {
    async fn find_or_create_respondent(
        &self,
        email: &str,
        name: Option<&str>,
    ) -> Result<RespondentRow, AppError> {
        Ok(upsert_respondent(&self.pool, email, name).await?)
    }

    async fn respondent_by_id(&self, id: i32) -> Result<Option<RespondentRow>, AppError> {
        Ok(sqlx::query_as::<_, RespondentRow>(
            "SELECT id, email, name, created_at FROM respondents WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn respondent_by_email(&self, email: &str) -> Result<Option<RespondentRow>, AppError> {
        Ok(sqlx::query_as::<_, RespondentRow>(
            "SELECT id, email, name, created_at FROM respondents WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn upsert_profile(
        &self,
        respondent_id: i32,
        update: &ProfileUpdate,
    ) -> Result<RespondentProfileRow, AppError> {
        Ok(merge_profile(&self.pool, respondent_id, update).await?)
    }

    async fn profile_by_respondent(
        &self,
        respondent_id: i32,
    ) -> Result<Option<RespondentProfileRow>, AppError> {
        Ok(sqlx::query_as::<_, RespondentProfileRow>(
            "SELECT * FROM respondent_profiles WHERE respondent_id = $1",
        )
        .bind(respondent_id)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn insert_assessment(
        &self,
        respondent_id: i32,
        new: &NewAssessment,
    ) -> Result<AssessmentRow, AppError> {
        Ok(insert_response(&self.pool, respondent_id, new).await?)
    }

    async fn record_assessment_for_email(
        &self,
        email: &str,
        profile: &ProfileUpdate,
        new: &NewAssessment,
    ) -> Result<AssessmentRow, AppError> {
        // Dropping `tx` on an early return rolls everything back
        let mut tx = self.pool.begin().await?;
        let display_name = profile.display_name();
        let respondent = upsert_respondent(&mut *tx, email, display_name.as_deref()).await?;
        merge_profile(&mut *tx, respondent.id, profile).await?;
        let row = insert_response(&mut *tx, respondent.id, new).await?;
        tx.commit().await?;
        Ok(row)
    }

    async fn assessment_by_id(&self, id: i32) -> Result<Option<AssessmentRow>, AppError> {
        Ok(
            sqlx::query_as::<_, AssessmentRow>("SELECT * FROM assessment_responses WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn latest_assessment(
        &self,
        respondent_id: i32,
    ) -> Result<Option<AssessmentRow>, AppError> {
        Ok(sqlx::query_as::<_, AssessmentRow>(
            r#"
            SELECT * FROM assessment_responses
            WHERE respondent_id = $1
            ORDER BY completed_at DESC, id DESC
            LIMIT 1
            "#,
        )
        .bind(respondent_id)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn list_assessments(
        &self,
        respondent_id: Option<i32>,
        limit: i64,
    ) -> Result<Vec<AssessmentRow>, AppError> {
        Ok(sqlx::query_as::<_, AssessmentRow>(
            r#"
            SELECT * FROM assessment_responses
            WHERE ($1::int IS NULL OR respondent_id = $1)
            ORDER BY completed_at DESC, id DESC
            LIMIT $2
            "#,
        )
        .bind(respondent_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn attach_respondent(
        &self,
        assessment_id: i32,
        respondent_id: i32,
    ) -> Result<Option<AssessmentRow>, AppError> {
        Ok(sqlx::query_as::<_, AssessmentRow>(
            "UPDATE assessment_responses SET respondent_id = $1 WHERE id = $2 RETURNING *",
        )
        .bind(respondent_id)
        .bind(assessment_id)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn peer_samples(&self, filter: &PeerFilter) -> Result<Vec<PeerSample>, AppError> {
        Ok(sqlx::query_as::<_, PeerSample>(
            r#"
            SELECT readiness_score, journey, knowledge, role_level
            FROM assessment_responses
            WHERE readiness_score IS NOT NULL
              AND ($1::text IS NULL OR industry = $1)
              AND ($2::text IS NULL OR role_level = $2)
            "#,
        )
        .bind(filter.industry.as_deref())
        .bind(filter.role_level.map(|l| l.as_str()))
        .fetch_all(&self.pool)
        .await?)
    }

    async fn upsert_employer_lead(
        &self,
        lead: &EmployerLeadInput,
    ) -> Result<EmployerLeadRow, AppError> {
        Ok(sqlx::query_as::<_, EmployerLeadRow>(
            r#"
            INSERT INTO employer_leads
                (email, first_name, last_name, company, job_title, team_size,
                 industry, employer_tools, user_type)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (email) DO UPDATE SET
                first_name     = EXCLUDED.first_name,
                last_name      = EXCLUDED.last_name,
                company        = EXCLUDED.company,
                job_title      = EXCLUDED.job_title,
                team_size      = EXCLUDED.team_size,
                industry       = EXCLUDED.industry,
                employer_tools = EXCLUDED.employer_tools,
                updated_at     = NOW()
            RETURNING *
            "#,
        )
        .bind(&lead.email)
        .bind(lead.first_name.as_deref())
        .bind(lead.last_name.as_deref())
        .bind(lead.company.as_deref())
        .bind(lead.job_title.as_deref())
        .bind(lead.team_size.as_deref())
        .bind(lead.industry.as_deref())
        .bind(&lead.employer_tools)
        .bind(EMPLOYER_USER_TYPE)
        .fetch_one(&self.pool)
        .await?)
    }

    async fn list_employer_leads(&self, limit: i64) -> Result<Vec<EmployerLeadRow>, AppError> {
        Ok(sqlx::query_as::<_, EmployerLeadRow>(
            "SELECT * FROM employer_leads ORDER BY created_at DESC, id DESC LIMIT $1",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn health(&self) -> Result<StoreHealth, AppError> {
        let (respondents, profiles, assessments, employer_leads): (i64, i64, i64, i64) =
            sqlx::query_as(
                r#"
                SELECT
                    (SELECT COUNT(*) FROM respondents),
                    (SELECT COUNT(*) FROM respondent_profiles),
                    (SELECT COUNT(*) FROM assessment_responses),
                    (SELECT COUNT(*) FROM employer_leads)
                "#,
            )
            .fetch_one(&self.pool)
            .await?;
        Ok(StoreHealth {
            respondents,
            profiles,
            assessments,
            employer_leads,
        })
    }
}

// ────────────────────────────────────────────────────────────────────────────
// In-memory store for tests
// ────────────────────────────────────────────────────────────────────────────
