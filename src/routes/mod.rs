pub mod analysis_route;
pub mod default_route;
pub mod health_route;
