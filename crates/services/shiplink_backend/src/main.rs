// File: services/shiplink_backend/src/main.rs
use shiplink_common::log_error;
use shiplink_config::load_config;
use std::process::ExitCode;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

mod app;

#[tokio::main]
async fn main() -> ExitCode {
    shiplink_common::init();

    let config = match load_config() {
        Ok(config) => Arc::new(config),
        Err(e) => {
            log_error(e, "Failed to load config");
            return ExitCode::FAILURE;
        }
    };

    let app = match app::build_app(config.clone()) {
        Ok(app) => app,
        Err(e) => {
            log_error(e, "Refusing to start");
            return ExitCode::FAILURE;
        }
    };

    // Bind and serve
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = match TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            log_error(e, &format!("Failed to bind {}", addr));
            return ExitCode::FAILURE;
        }
    };
    info!("Starting server at http://{}", addr);
    info!("API endpoints available at http://{}/api", addr);

    if let Err(e) = axum::serve(listener, app.into_make_service()).await {
        log_error(e, "Server error");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
