use actix_web::{get, HttpResponse, Responder};
use serde_json::json;

#[get("/")]
async fn default() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "message": "Competitor Analysis API",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "active",
        "docs": "/api/v1",
        "health": "/api/v1/health",
    }))
}

pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(json!({
        "error": "Not found",
        "message": "No route matches this request",
        "type": "NotFound",
    }))
}
