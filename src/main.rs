use std::net::TcpListener;

use env_logger::Env;
use rival::{configuration::get_configuration, services::Pipeline, startup::run};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let configuration = get_configuration().map_err(|e| {
        log::error!("Failed to read configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidData, e)
    })?;

    let address = format!(
        "{}:{}",
        configuration.application.host, configuration.application.port
    );
    let listener = TcpListener::bind(&address)?;
    log::info!("Competitor analysis API listening on {}", address);

    let pipeline = Pipeline::from_settings(&configuration);

    run(listener, pipeline, configuration.application.allowed_origins)?.await
}
