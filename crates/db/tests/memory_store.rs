//! Behaviour of the in-process store the API tests run against.

mod common;

use assert_matches::assert_matches;
use chrono::{TimeZone, Utc};
use serde_json::json;
use survey_core::error::CoreError;
use survey_core::survey::SafetyAnswer;
use survey_db::models::form_response::FormResponseRow;
use survey_db::models::user::UpsertUser;
use survey_db::{MemoryStore, ResponseStore, StoreError, UserStore};

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

#[tokio::test]
async fn insert_assigns_id_and_timestamp() {
    let store = MemoryStore::new();
    let before = Utc::now();

    let record = store
        .insert_satisfaction(&common::satisfaction("Maria", "UTI", 4))
        .await
        .unwrap();

    assert!(record.created_at >= before);
    assert_eq!(record.evaluated_department, "UTI");
    assert_eq!(record.comments, "Atendimento excelente");

    let found = store.find_satisfaction(record.id).await.unwrap();
    assert_eq!(found, Some(record));
}

#[tokio::test]
async fn missing_comments_are_stored_empty() {
    let store = MemoryStore::new();
    let record = store
        .insert_infrastructure(&common::infrastructure("Ana", 3, SafetyAnswer::Yes))
        .await
        .unwrap();
    assert_eq!(record.comments, "");
}

#[tokio::test]
async fn list_is_most_recent_first() {
    let store = MemoryStore::new();
    for (name, day) in [("Jan", 5), ("Mar", 20), ("Feb", 11)] {
        let created_at = Utc.with_ymd_and_hms(2024, 3, day, 10, 0, 0).unwrap();
        store
            .seed_satisfaction(&common::satisfaction(name, "UTI", 3), created_at)
            .await
            .unwrap();
    }

    let names: Vec<String> = store
        .list_satisfaction()
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.patient.patient_name)
        .collect();
    assert_eq!(names, ["Mar", "Feb", "Jan"]);
}

#[tokio::test]
async fn unknown_id_is_none() {
    let store = MemoryStore::new();
    let found = store.find_infrastructure(uuid::Uuid::new_v4()).await.unwrap();
    assert!(found.is_none());
}

#[tokio::test]
async fn malformed_row_fails_the_whole_list() {
    let store = MemoryStore::new();
    store
        .insert_satisfaction(&common::satisfaction("Maria", "UTI", 4))
        .await
        .unwrap();

    let mut bad = FormResponseRow::from_new(
        &common::satisfaction("Broken", "UTI", 4),
        uuid::Uuid::new_v4(),
        Utc::now(),
    )
    .unwrap();
    bad.satisfaction = json!({ "overall_care": "great" });
    store.insert_raw_satisfaction(bad).await;

    let result = store.list_satisfaction().await;
    assert_matches!(result, Err(StoreError::Core(CoreError::DataIntegrity(_))));
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

fn admin(name: &str, hash: &str) -> UpsertUser {
    UpsertUser {
        name: name.to_string(),
        email: "admin@hospital.test".to_string(),
        password_hash: hash.to_string(),
        role: "global_admin".to_string(),
    }
}

#[tokio::test]
async fn upsert_resets_existing_user() {
    let store = MemoryStore::new();
    let first = store.upsert_user(&admin("Admin", "hash-1")).await.unwrap();
    let second = store.upsert_user(&admin("Administrador", "hash-2")).await.unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(second.name, "Administrador");
    assert_eq!(second.password_hash, "hash-2");
    assert_eq!(store.list_users().await.unwrap().len(), 1);

    let found = store.find_user_by_email("admin@hospital.test").await.unwrap();
    assert_eq!(found.map(|u| u.password_hash).as_deref(), Some("hash-2"));
    assert!(store.find_user_by_email("ADMIN@hospital.test").await.unwrap().is_none());
}
