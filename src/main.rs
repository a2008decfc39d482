//! `fithub-server`: loads configuration, installs logging, serves the API.

use std::process::ExitCode;

use tracing_subscriber::{EnvFilter, fmt};

use fithub_core::config::AppConfig;

#[tokio::main]
async fn main() -> ExitCode {
    // FITHUB_ENV picks the `config/{env}.toml` overlay.
    let env = std::env::var("FITHUB_ENV").unwrap_or_else(|_| "development".to_string());
    let config = match AppConfig::load(&env) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("fithub-server: cannot load configuration for '{env}': {e}");
            return ExitCode::FAILURE;
        }
    };

    init_logging(&config);

    match fithub_api::run_server(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Server stopped with an error");
            ExitCode::FAILURE
        }
    }
}

/// `RUST_LOG` wins over `logging.level`.
fn init_logging(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    if config.logging.format == "json" {
        fmt()
            .json()
            .with_env_filter(filter)
            .with_current_span(false)
            .init();
    } else {
        fmt().with_env_filter(filter).with_target(true).init();
    }
}
