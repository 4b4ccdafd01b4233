//! Shared fixtures for the HTTP integration tests.
//!
//! The app runs on a [`MemoryStore`], so these tests need no database.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use survey_api::auth::jwt::{generate_access_token, JwtConfig};
use survey_api::auth::password::hash_password;
use survey_api::config::{ServerConfig, StoreBackend};
use survey_api::router::build_app_router;
use survey_api::state::AppState;
use survey_db::models::user::{UpsertUser, User};
use survey_db::{MemoryStore, UserStore};

pub const ADMIN_EMAIL: &str = "admin@hospital.test";
pub const ADMIN_PASSWORD: &str = "test_password_123!";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        store_backend: StoreBackend::Memory,
        db_max_connections: 1,
        jwt: JwtConfig {
            secret: "integration-test-secret".to_string(),
            access_token_expiry_mins: 60,
        },
    }
}

/// A running app plus a handle on its store, for seeding.
pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryStore>,
    pub config: ServerConfig,
}

impl TestApp {
    /// A fresh router; `oneshot` consumes it, so take one per request.
    pub fn app(&self) -> Router {
        self.router.clone()
    }

    /// Create the admin account directly in the store.
    pub async fn seed_admin(&self) -> User {
        let password_hash = hash_password(ADMIN_PASSWORD).expect("hashing should succeed");
        self.store
            .upsert_user(&UpsertUser {
                name: "Administrador".to_string(),
                email: ADMIN_EMAIL.to_string(),
                password_hash,
                role: "global_admin".to_string(),
            })
            .await
            .expect("seeding admin should succeed")
    }

    /// A valid bearer token, signed with the test secret.
    pub fn token(&self) -> String {
        generate_access_token(uuid::Uuid::new_v4(), ADMIN_EMAIL, "admin", &self.config.jwt)
            .expect("token generation should succeed")
    }
}

/// Build the full application router over an empty [`MemoryStore`].
pub fn build_test_app() -> TestApp {
    let config = test_config();
    let store = Arc::new(MemoryStore::new());
    let state = AppState {
        responses: store.clone(),
        users: store.clone(),
        config: Arc::new(config.clone()),
    };
    TestApp {
        router: build_app_router(state, &config),
        store,
        config,
    }
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should be readable")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be JSON")
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

// ---------------------------------------------------------------------------
// Payloads
// ---------------------------------------------------------------------------

/// Questionnaire 1 submission body with every rating set to `rating`.
pub fn satisfaction_body(department: &str, rating: i64, would_recommend: i64) -> Value {
    json!({
        "patient_name": "Maria Silva",
        "patient_cpf": "52998224725",
        "patient_age": 54,
        "patient_gender": "Feminino",
        "admission_date": "2024-03-01",
        "discharge_date": "2024-03-05",
        "evaluated_department": department,
        "satisfaction": {
            "overall_care": rating,
            "nursing_care": rating,
            "medical_care": rating,
            "welcoming": rating,
            "cleanliness": rating,
            "comfort": rating,
            "response_time": rating,
            "would_recommend": would_recommend,
            "overall_satisfaction": rating
        },
        "experience": {
            "professionals_identified": true,
            "name_verified": true,
            "treatment_explained": true,
            "participated_in_decisions": false,
            "medication_instructions_clear": true,
            "discharge_orientation_complete": true,
            "knew_who_to_ask": false,
            "privacy_respected": true
        },
        "comments": "Equipe muito atenciosa"
    })
}

/// Questionnaire 2 submission body with every rating set to `rating`.
pub fn infrastructure_body(rating: i64, bracelet: &str) -> Value {
    let fields = [
        "hospital_overall_infrastructure",
        "common_areas_adequacy",
        "equipment_safety",
        "equipment_condition",
        "bed_comfort",
        "accommodation_needs",
        "meal_quality",
        "meal_timeliness",
        "nutrition_team_care",
        "hospital_signage",
        "team_communication_clarity",
        "medical_team_relationship",
        "diagnosis_explanation",
        "felt_heard_by_medical_team",
        "nursing_team_care",
        "nursing_team_availability",
        "felt_safe_with_care",
        "technology_access",
        "connectivity_satisfaction",
        "laundry_cleanliness_organization",
        "laundry_change_frequency",
    ];
    let infrastructure: serde_json::Map<String, Value> =
        fields.iter().map(|f| (f.to_string(), json!(rating))).collect();

    json!({
        "patient_name": "João Lima",
        "patient_cpf": "11144477735",
        "patient_age": 61,
        "patient_gender": "Masculino",
        "admission_date": "2024-02-10",
        "discharge_date": "2024-02-12",
        "infrastructure": infrastructure,
        "patient_safety": {
            "used_identification_bracelet": bracelet,
            "bracelet_info_correct": "Sim",
            "bed_identification": "Parcialmente",
            "identity_checked_before_procedures": "Não"
        }
    })
}
