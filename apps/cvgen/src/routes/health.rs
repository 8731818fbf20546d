use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns a simple status object with service version and registered versions.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    let versions: Vec<&str> = state.assembler.registry().names().collect();
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": env!("CARGO_PKG_NAME"),
        "versions": versions
    }))
}
