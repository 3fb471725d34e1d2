use actix_web::{get, HttpResponse};
use chrono::Utc;
use serde_json::{json, Map, Value};

use crate::services::AGENT_NAMES;

#[get("/health")]
async fn health_check() -> HttpResponse {
    let agents: Map<String, Value> = AGENT_NAMES
        .iter()
        .map(|name| (name.to_string(), json!("active")))
        .collect();

    HttpResponse::Ok().json(json!({
        "status": "healthy",
        "timestamp": Utc::now(),
        "agents": agents,
    }))
}
