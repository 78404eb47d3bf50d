pub mod health;

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::assessment::handlers as assessments;
use crate::employers::handlers as employers;
use crate::onboarding::handlers as onboarding;
use crate::peers::handlers as peers;
use crate::respondents::handlers as respondents;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Assessment intake
        .route(
            "/api/v1/assessments",
            post(assessments::handle_submit).get(assessments::handle_list),
        )
        .route("/api/v1/assessments/:id", get(assessments::handle_get))
        .route(
            "/api/v1/assessments/:id/identity",
            patch(assessments::handle_attach_identity),
        )
        // Respondents
        .route(
            "/api/v1/respondents",
            post(respondents::handle_register).get(respondents::handle_find_by_email),
        )
        .route("/api/v1/respondents/:id", get(respondents::handle_get))
        .route(
            "/api/v1/respondents/:id/assessments/latest",
            get(respondents::handle_latest_assessment),
        )
        .route(
            "/api/v1/respondents/:id/readiness-score",
            get(respondents::handle_readiness_score),
        )
        // Peer aggregation
        .route(
            "/api/v1/peers/comparison",
            get(peers::handle_peer_comparison),
        )
        // Guided onboarding
        .route("/api/v1/onboarding/sessions", post(onboarding::handle_start))
        .route(
            "/api/v1/onboarding/sessions/advance",
            post(onboarding::handle_advance),
        )
        .route(
            "/api/v1/onboarding/sessions/back",
            post(onboarding::handle_back),
        )
        .route(
            "/api/v1/onboarding/sessions/submit",
            post(onboarding::handle_submit),
        )
        // Employer leads
        .route(
            "/api/v1/employer-leads",
            post(employers::handle_capture).get(employers::handle_list),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request, StatusCode};
    use axum::response::Response;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::assessment::answers::RoleLevel;
    use crate::assessment::store::memory::MemoryStore;

    fn app(store: Arc<MemoryStore>) -> Router {
        build_router(AppState::new(store))
    }

    async fn send(router: Router, method: Method, uri: &str, body: Option<Value>) -> Response {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&body).unwrap()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        router.oneshot(request).await.expect("route executes")
    }

    async fn read_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn top_answers(email: &str) -> Value {
        json!({
            "email": email,
            "first_name": "Ada",
            "question_1_journey": "daily-user",
            "question_2_industry": "Technology",
            "question_3a_level": "senior",
            "question_3b_role_title": "Staff Engineer",
            "question_4_knowledge": "expert",
            "question_5_automation_pct": 0,
            "question_6_superpower": "creative",
            "question_7_learning_style": "veryfast",
            "question_8_goal": "leading"
        })
    }

    #[tokio::test]
    async fn test_health_reports_store_counts() {
        let store = Arc::new(MemoryStore::default());
        let response = send(app(store), Method::GET, "/health", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "careeros-api");
        assert_eq!(body["store"]["assessments"], 0);
        assert_eq!(body["store"]["employer_leads"], 0);
    }

    #[tokio::test]
    async fn test_health_degraded_when_store_down() {
        let store = Arc::new(MemoryStore::default());
        store.set_unavailable(true);
        let response = send(app(store), Method::GET, "/health", None).await;
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(read_json(response).await["status"], "degraded");
    }

    #[tokio::test]
    async fn test_submit_scores_top_answers_at_100() {
        let store = Arc::new(MemoryStore::default());
        let response = send(
            app(store.clone()),
            Method::POST,
            "/api/v1/assessments",
            Some(top_answers("ada@example.com")),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        assert_eq!(body["ok"], true);
        assert_eq!(body["readiness_score"], 100);
        assert_eq!(body["breakdown"]["automation"], 25);
        assert_eq!(store.assessment_count(), 1);
    }

    #[tokio::test]
    async fn test_submit_ignores_client_score() {
        let store = Arc::new(MemoryStore::default());
        let body = json!({
            "email": "low@example.com",
            "question_1_journey": "new",
            "question_4_knowledge": "new",
            "question_5_automation_pct": 100,
            "question_7_learning_style": "veryslow",
            "ai_readiness_score": 100
        });
        let response = send(app(store), Method::POST, "/api/v1/assessments", Some(body)).await;
        assert_eq!(read_json(response).await["readiness_score"], 20);
    }

    #[tokio::test]
    async fn test_submit_without_identity_is_400() {
        let store = Arc::new(MemoryStore::default());
        let body = json!({ "question_1_journey": "weekly" });
        let response = send(
            app(store.clone()),
            Method::POST,
            "/api/v1/assessments",
            Some(body),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(read_json(response).await["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(store.assessment_count(), 0);
    }

    #[tokio::test]
    async fn test_submit_with_unknown_user_id_is_404() {
        let store = Arc::new(MemoryStore::default());
        let body = json!({ "user_id": 999, "question_1_journey": "weekly" });
        let response = send(app(store), Method::POST, "/api/v1/assessments", Some(body)).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_submit_store_failure_is_500() {
        let store = Arc::new(MemoryStore::default());
        store.set_unavailable(true);
        let response = send(
            app(store),
            Method::POST,
            "/api/v1/assessments",
            Some(top_answers("down@example.com")),
        )
        .await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(read_json(response).await["error"]["code"], "DATABASE_ERROR");
    }

    #[tokio::test]
    async fn test_latest_and_readiness_score_follow_newest_submission() {
        let store = Arc::new(MemoryStore::default());
        let first = send(
            app(store.clone()),
            Method::POST,
            "/api/v1/assessments",
            Some(top_answers("repeat@example.com")),
        )
        .await;
        let user_id = read_json(first).await["user_id"].as_i64().unwrap();

        let mut second = top_answers("repeat@example.com");
        second["question_1_journey"] = json!("new");
        let second = send(app(store.clone()), Method::POST, "/api/v1/assessments", Some(second)).await;
        let second = read_json(second).await;
        assert_eq!(second["user_id"].as_i64(), Some(user_id));
        assert_eq!(store.assessment_count(), 2);

        let latest = send(
            app(store.clone()),
            Method::GET,
            &format!("/api/v1/respondents/{user_id}/assessments/latest"),
            None,
        )
        .await;
        assert_eq!(latest.status(), StatusCode::OK);
        let latest = read_json(latest).await;
        assert_eq!(latest["assessment"]["id"], second["assessment_id"]);

        let score = send(
            app(store),
            Method::GET,
            &format!("/api/v1/respondents/{user_id}/readiness-score"),
            None,
        )
        .await;
        assert_eq!(
            read_json(score).await["readiness_score"],
            second["readiness_score"]
        );
    }

    #[tokio::test]
    async fn test_readiness_score_without_assessment_is_404() {
        let store = Arc::new(MemoryStore::default());
        let registered = send(
            app(store.clone()),
            Method::POST,
            "/api/v1/respondents",
            Some(json!({ "email": "fresh@example.com" })),
        )
        .await;
        assert_eq!(registered.status(), StatusCode::OK);
        let id = read_json(registered).await["respondent"]["id"].as_i64().unwrap();

        let response = send(
            app(store),
            Method::GET,
            &format!("/api/v1/respondents/{id}/readiness-score"),
            None,
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_peer_comparison_empty_is_insufficient_data() {
        let store = Arc::new(MemoryStore::default());
        let response = send(
            app(store),
            Method::GET,
            "/api/v1/peers/comparison?industry=technology&score=80",
            None,
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            read_json(response).await["error"]["code"],
            "INSUFFICIENT_PEER_DATA"
        );
    }

    #[tokio::test]
    async fn test_peer_comparison_percentile() {
        let store = Arc::new(MemoryStore::default());
        for score in [50, 60, 70, 80, 90] {
            store.seed_score("technology", Some(RoleLevel::Senior), "weekly", score);
        }
        store.seed_score("finance", Some(RoleLevel::Senior), "weekly", 10);

        let response = send(
            app(store),
            Method::GET,
            "/api/v1/peers/comparison?industry=Technology&role_level=senior&score=75",
            None,
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        assert_eq!(body["report"]["percentile"], 60);
        assert_eq!(body["report"]["summary"]["count"], 5);
        assert_eq!(body["report"]["summary"]["median"], 70);
    }

    #[tokio::test]
    async fn test_peer_comparison_rejects_bad_score() {
        let store = Arc::new(MemoryStore::default());
        store.seed_score("technology", None, "weekly", 70);
        let response = send(
            app(store),
            Method::GET,
            "/api/v1/peers/comparison?score=150",
            None,
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_legacy_payload_is_accepted() {
        let store = Arc::new(MemoryStore::default());
        let body = json!({
            "email": "legacy@example.com",
            "ai_journey": "daily-user",
            "ai_industry": "Technology",
            "ai_role": "senior",
            "ai_understanding": "expert",
            "automation_pct": 0,
            "ai_strength": "creative",
            "learning_pref": "veryfast",
            "future_goal": "leading"
        });
        let response = send(app(store), Method::POST, "/api/v1/assessments", Some(body)).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(read_json(response).await["readiness_score"], 100);
    }

    #[tokio::test]
    async fn test_onboarding_session_flow_submits() {
        let store = Arc::new(MemoryStore::default());
        let started = send(app(store.clone()), Method::POST, "/api/v1/onboarding/sessions", None).await;
        assert_eq!(started.status(), StatusCode::OK);
        let mut session = read_json(started).await["session"].clone();

        let answers = [
            json!({ "step": "welcome" }),
            json!({ "step": "user_type", "user_type": "professional" }),
            json!({ "step": "journey", "value": "daily-user" }),
            json!({ "step": "industry", "value": "Technology" }),
            json!({ "step": "role", "level": "senior", "title": null }),
            json!({ "step": "knowledge", "value": "expert" }),
            json!({ "step": "automation", "percent": 0 }),
            json!({ "step": "superpower", "value": "creative" }),
            json!({ "step": "learning_style", "value": "veryfast" }),
            json!({ "step": "goal", "value": "leading" }),
            json!({ "step": "contact", "email": "onboard@example.com", "user_id": null, "first_name": null, "last_name": null }),
        ];
        for answer in answers {
            let response = send(
                app(store.clone()),
                Method::POST,
                "/api/v1/onboarding/sessions/advance",
                Some(json!({ "session": session, "answer": answer })),
            )
            .await;
            assert_eq!(response.status(), StatusCode::OK);
            session = read_json(response).await["session"].clone();
        }
        assert_eq!(session["step"], "complete");

        let submitted = send(
            app(store.clone()),
            Method::POST,
            "/api/v1/onboarding/sessions/submit",
            Some(json!({ "session": session })),
        )
        .await;
        assert_eq!(submitted.status(), StatusCode::OK);
        let body = read_json(submitted).await;
        assert_eq!(body["kind"], "assessment");
        assert_eq!(body["readiness_score"], 100);
        assert_eq!(store.assessment_count(), 1);
    }

    #[tokio::test]
    async fn test_employer_onboarding_flow_captures_lead() {
        let store = Arc::new(MemoryStore::default());
        let started = send(app(store.clone()), Method::POST, "/api/v1/onboarding/sessions", None).await;
        let mut session = read_json(started).await["session"].clone();
        let mut progress = Value::Null;

        let answers = [
            json!({ "step": "welcome" }),
            json!({ "step": "user_type", "user_type": "employer" }),
            json!({ "step": "employer_tools", "tools": ["hr-leadership", "qualified-employees"] }),
            json!({
                "step": "employer_contact",
                "email": "People@Acme.com",
                "first_name": "Kim",
                "last_name": "Lee",
                "company": "Acme",
                "job_title": "Head of People",
                "team_size": "51-200",
                "industry": "Technology"
            }),
        ];
        for answer in answers {
            let response = send(
                app(store.clone()),
                Method::POST,
                "/api/v1/onboarding/sessions/advance",
                Some(json!({ "session": session, "answer": answer })),
            )
            .await;
            assert_eq!(response.status(), StatusCode::OK);
            progress = read_json(response).await;
            session = progress["session"].clone();
        }
        assert_eq!(session["step"], "complete");
        assert_eq!(progress["answered"], 4);
        assert_eq!(progress["total_steps"], 4);

        let submitted = send(
            app(store.clone()),
            Method::POST,
            "/api/v1/onboarding/sessions/submit",
            Some(json!({ "session": session })),
        )
        .await;
        assert_eq!(submitted.status(), StatusCode::OK);
        let body = read_json(submitted).await;
        assert_eq!(body["kind"], "employer_lead");
        assert_eq!(body["lead"]["email"], "people@acme.com");
        assert_eq!(body["lead"]["user_type"], "employer");
        assert_eq!(store.assessment_count(), 0);
    }

    #[tokio::test]
    async fn test_employer_lead_capture_updates_by_email_and_lists() {
        let store = Arc::new(MemoryStore::default());
        let first = json!({ "email": "hr@globex.com", "company": "Globex", "team_size": "11-50" });
        let response = send(app(store.clone()), Method::POST, "/api/v1/employer-leads", Some(first)).await;
        assert_eq!(response.status(), StatusCode::OK);
        let id = read_json(response).await["lead"]["id"].clone();

        let second = json!({ "email": "HR@globex.com", "company": "Globex Corp", "team_size": "51-200" });
        let response = send(app(store.clone()), Method::POST, "/api/v1/employer-leads", Some(second)).await;
        assert_eq!(response.status(), StatusCode::OK);
        let lead = read_json(response).await["lead"].clone();
        assert_eq!(lead["id"], id);
        assert_eq!(lead["company"], "Globex Corp");

        let listed = send(app(store), Method::GET, "/api/v1/employer-leads?limit=10", None).await;
        assert_eq!(listed.status(), StatusCode::OK);
        let leads = read_json(listed).await["leads"].clone();
        assert_eq!(leads.as_array().map(Vec::len), Some(1));
        assert_eq!(leads[0]["team_size"], "51-200");
    }

    #[tokio::test]
    async fn test_employer_lead_without_email_is_400() {
        let store = Arc::new(MemoryStore::default());
        let body = json!({ "company": "Initech" });
        let response = send(app(store), Method::POST, "/api/v1/employer-leads", Some(body)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_onboarding_out_of_order_step_is_400() {
        let store = Arc::new(MemoryStore::default());
        let started = send(app(store.clone()), Method::POST, "/api/v1/onboarding/sessions", None).await;
        let session = read_json(started).await["session"].clone();
        let response = send(
            app(store),
            Method::POST,
            "/api/v1/onboarding/sessions/advance",
            Some(json!({ "session": session, "answer": { "step": "goal", "value": "balance" } })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
