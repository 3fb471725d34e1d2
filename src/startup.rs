use std::net::TcpListener;

use actix_cors::Cors;
use actix_web::{
    dev::Server,
    error::{InternalError, JsonPayloadError},
    middleware::Logger,
    web::{self, Data},
    App, HttpRequest, HttpResponse, HttpServer,
};
use serde_json::json;
use url::Url;

use crate::{
    routes::{analysis_route, default_route, health_route},
    services::Pipeline,
};

pub fn run(
    listener: TcpListener,
    pipeline: Pipeline,
    allowed_origins: Vec<String>,
) -> Result<Server, std::io::Error> {
    check_origins(&allowed_origins)?;
    let pipeline = Data::new(pipeline);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(cors(&allowed_origins))
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .service(default_route::default)
            .service(
                web::scope("/api/v1")
                    .service(analysis_route::quick_analysis)
                    .service(health_route::health_check),
            )
            .default_service(web::to(default_route::not_found))
            .app_data(pipeline.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}

fn cors(allowed_origins: &[String]) -> Cors {
    allowed_origins
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
        .allow_any_method()
        .allow_any_header()
        .supports_credentials()
        .max_age(3600)
}

/// Origins must be absolute http(s) URLs; a wildcard cannot carry credentials.
fn check_origins(allowed_origins: &[String]) -> Result<(), std::io::Error> {
    for origin in allowed_origins {
        let valid = Url::parse(origin).is_ok_and(|url| matches!(url.scheme(), "http" | "https"));
        if !valid {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("invalid CORS origin `{}`", origin),
            ));
        }
    }

    Ok(())
}

fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    log::warn!("Rejected request body: {}", err);
    let response = HttpResponse::BadRequest().json(json!({
        "error": "Invalid request",
        "message": err.to_string(),
        "type": "JsonPayloadError",
    }));

    InternalError::from_response(err, response).into()
}
