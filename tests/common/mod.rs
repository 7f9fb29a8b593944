#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use uuid::Uuid;

use leadintake::config::Config;
use leadintake::email::{Mailer, OutgoingMail};
use leadintake::routes::SUBMISSION_PATH;
use leadintake::store::{MemoryRecordStore, RecordStore};

pub const OPERATOR: &str = "ops@example.com";

/// Captures outgoing mail; recipients listed in `fail_for` get an error.
#[derive(Default)]
pub struct RecordingMailer {
    pub fail_for: Vec<String>,
    pub attempts: Mutex<Vec<OutgoingMail>>,
}

impl RecordingMailer {
    pub fn failing_for(recipients: &[&str]) -> Self {
        Self {
            fail_for: recipients.iter().map(|r| r.to_string()).collect(),
            attempts: Mutex::new(Vec::new()),
        }
    }

    pub fn attempts(&self) -> Vec<OutgoingMail> {
        self.attempts.lock().unwrap().clone()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, mail: &OutgoingMail) -> Result<(), String> {
        self.attempts.lock().unwrap().push(mail.clone());
        if self.fail_for.contains(&mail.to) {
            return Err(format!("mailbox unavailable: {}", mail.to));
        }
        Ok(())
    }
}

/// A running server backed by an in-memory store and a recording mailer.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
    pub store: Arc<MemoryRecordStore>,
    pub mailer: Arc<RecordingMailer>,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub fn submission_url(&self) -> String {
        self.url(SUBMISSION_PATH)
    }

    /// Post a JSON lead, return (body, status).
    pub async fn submit_json(&self, data: &Value) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.submission_url())
            .json(data)
            .send()
            .await
            .expect("submit json failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    /// Post a raw body with the given content type, return (body, status).
    pub async fn submit_raw(&self, content_type: &str, body: &str) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.submission_url())
            .header("content-type", content_type)
            .body(body.to_string())
            .send()
            .await
            .expect("submit raw failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }
}

pub fn example_lead() -> Value {
    json!({
        "name": "Taro",
        "email": "t@example.com",
        "job": "Engineer",
        "content": "Need help",
        "datetime": "12/25 14:00",
        "source": "ad"
    })
}

pub async fn spawn_app() -> TestApp {
    spawn_app_with(
        Config::local(OPERATOR),
        MemoryRecordStore::new(),
        RecordingMailer::default(),
    )
    .await
}

pub async fn spawn_app_with(
    config: Config,
    store: MemoryRecordStore,
    mailer: RecordingMailer,
) -> TestApp {
    let store = Arc::new(store);
    let mailer = Arc::new(mailer);

    let addr = spawn_server(config, store.clone(), mailer.clone()).await;

    TestApp {
        addr,
        client: Client::new(),
        store,
        mailer,
    }
}

/// Serve the router over any record store; returns the bound address.
pub async fn spawn_server(
    config: Config,
    store: Arc<dyn RecordStore>,
    mailer: Arc<RecordingMailer>,
) -> SocketAddr {
    let (app, _state) = leadintake::build_app(config, store, Some(mailer as Arc<dyn Mailer>));

    // Bind to random port
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await
        .expect("Server failed");
    });

    addr
}

/// A fresh, migrated Postgres database for one test.
pub struct TestDb {
    pub pool: PgPool,
    pub db_name: String,
}

fn with_database(base_url: &str, db_name: &str) -> String {
    base_url
        .rsplit_once('/')
        .map(|(base, _)| format!("{base}/{db_name}"))
        .unwrap_or_else(|| base_url.to_string())
}

/// Create a temporary database when `DATABASE_URL` is set; `None` skips
/// the calling test.
pub async fn test_db() -> Option<TestDb> {
    let _ = dotenvy::dotenv();

    let Ok(base_url) = std::env::var("DATABASE_URL") else {
        eprintln!("DATABASE_URL not set; skipping Postgres test");
        return None;
    };

    let db_name = format!("leadintake_test_{}", Uuid::now_v7().simple());

    let admin_pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&with_database(&base_url, "postgres"))
        .await
        .expect("Failed to connect to postgres for test DB creation");

    sqlx::query(&format!("CREATE DATABASE \"{db_name}\""))
        .execute(&admin_pool)
        .await
        .expect("Failed to create test database");

    admin_pool.close().await;

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&with_database(&base_url, &db_name))
        .await
        .expect("Failed to connect to test database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations on test database");

    Some(TestDb { pool, db_name })
}

/// Drop the test database after the test completes.
pub async fn cleanup(db: TestDb) {
    db.pool.close().await;

    let base_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for tests");
    let admin_pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&with_database(&base_url, "postgres"))
        .await
        .expect("Failed to connect for cleanup");

    let _ = sqlx::query(&format!(
        "DROP DATABASE IF EXISTS \"{}\" WITH (FORCE)",
        db.db_name
    ))
    .execute(&admin_pool)
    .await;

    admin_pool.close().await;
}
