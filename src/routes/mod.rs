pub mod ingest;

use axum::routing::post;
use axum::Router;

use crate::state::SharedState;

pub const SUBMISSION_PATH: &str = "/api/consultations";

pub fn ingest_routes() -> Router<SharedState> {
    Router::new().route(SUBMISSION_PATH, post(ingest::ingest))
}
