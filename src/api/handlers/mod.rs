mod crud;
mod weather;

pub use crud::*;
pub use weather::*;

use axum::{response::IntoResponse, Json};

// ============================================================
// Health
// ============================================================

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}
