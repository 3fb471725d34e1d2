use actix_web::{post, web, HttpResponse};

use crate::{domain::report::AnalysisRequest, services::Pipeline};

/// Runs the full pipeline synchronously. Fetch failures are reported in the
/// body with `success: false`, not through the status code.
#[post("/quick-analysis")]
async fn quick_analysis(
    pipeline: web::Data<Pipeline>,
    body: web::Json<AnalysisRequest>,
) -> HttpResponse {
    log::info!(
        "Quick analysis requested for {} (company: {})",
        body.url,
        body.company_name.as_deref().unwrap_or("not informed")
    );

    let report = pipeline.run(&body).await;

    HttpResponse::Ok().json(report)
}
