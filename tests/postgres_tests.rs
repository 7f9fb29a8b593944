mod common;

use std::sync::Arc;

use reqwest::{Client, StatusCode};

use leadintake::config::Config;
use leadintake::models::{LeadRecord, LeadSubmission};
use leadintake::routes::SUBMISSION_PATH;
use leadintake::store::{PgRecordStore, RecordStore, StoreError, DEFAULT_SHEET};

use common::{example_lead, RecordingMailer, OPERATOR};

fn taro() -> LeadSubmission {
    LeadSubmission {
        name: "Taro".into(),
        email: "t@example.com".into(),
        job: "Engineer".into(),
        content: "Need help".into(),
        datetime: "12/25 14:00".into(),
        source: "ad".into(),
    }
}

#[tokio::test]
async fn append_stores_row_in_column_order() {
    let Some(db) = common::test_db().await else {
        return;
    };
    let store = PgRecordStore::new(db.pool.clone(), DEFAULT_SHEET);

    let returned = store.append(&taro()).await.unwrap();

    let stored: LeadRecord = sqlx::query_as(
        "SELECT id, submitted_at, name, email, job, content, datetime, source
         FROM consultation_submissions",
    )
    .fetch_one(&db.pool)
    .await
    .unwrap();

    assert_eq!(stored.id, returned.id);
    assert_eq!(stored.submitted_at, returned.submitted_at);
    assert_eq!(
        stored.row()[1..],
        ["Taro", "t@example.com", "Engineer", "Need help", "12/25 14:00", "ad"]
    );

    common::cleanup(db).await;
}

#[tokio::test]
async fn migration_rejects_blank_required_fields() {
    let Some(db) = common::test_db().await else {
        return;
    };

    let result = sqlx::query(
        "INSERT INTO consultation_submissions (id, submitted_at, name, email, content, datetime)
         VALUES (gen_random_uuid(), now(), '   ', 't@example.com', 'x', 'y')",
    )
    .execute(&db.pool)
    .await;
    assert!(result.is_err());

    common::cleanup(db).await;
}

#[tokio::test]
async fn missing_table_fails_without_notifications() {
    let Some(db) = common::test_db().await else {
        return;
    };
    let store = Arc::new(PgRecordStore::new(db.pool.clone(), "no_such_sheet"));

    let err = store.append(&taro()).await.unwrap_err();
    assert!(matches!(err, StoreError::SheetMissing(ref name) if name == "no_such_sheet"));

    let mailer = Arc::new(RecordingMailer::default());
    let addr = common::spawn_server(Config::local(OPERATOR), store, mailer.clone()).await;

    let resp = Client::new()
        .post(format!("http://{addr}{SUBMISSION_PATH}"))
        .json(&example_lead())
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert!(body["message"].as_str().unwrap().contains("no_such_sheet"));
    assert!(mailer.attempts().is_empty());

    common::cleanup(db).await;
}
