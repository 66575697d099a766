use std::fs::File;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use simplelog::{ConfigBuilder, WriteLogger};

use unibot::core::config::{self, CliOverrides};
use unibot::gateway::{GatewayError, HealthStatus, HttpGateway};

#[derive(Parser)]
#[command(name = "unibot", about = "Terminal chat client for the UniBot answer service")]
struct Args {
    /// Base URL of the answer service (e.g. http://localhost:8080)
    #[arg(long)]
    base_url: Option<String>,

    /// Per-request timeout in seconds (0 disables)
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Where to write the log
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Nothing is logged or written until the logger exists
    let loaded = config::load_config();
    let resolved = config::resolve(
        &loaded.config,
        &CliOverrides {
            base_url: args.base_url.as_deref(),
            timeout_secs: args.timeout,
            log_file: args.log_file.as_deref(),
            verbose: args.verbose,
        },
    );

    // The TUI owns stdout, so logs go to a file
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    match File::create(&resolved.log_file) {
        Ok(log_file) => {
            let _ = WriteLogger::init(resolved.log_level, log_config, log_file);
        }
        Err(e) => eprintln!(
            "unibot: cannot open log file {}: {}",
            resolved.log_file.display(),
            e
        ),
    }

    log::info!(
        "UniBot starting up (server: {}, timeout: {:?})",
        resolved.base_url,
        resolved.request_timeout
    );
    loaded.report();

    let gateway = HttpGateway::new(resolved.base_url.clone(), resolved.request_timeout)
        .map_err(std::io::Error::other)?;
    let status = health_status(gateway.health().await);

    unibot::tui::run(&resolved, Arc::new(gateway), status)
}

/// Title bar text for the startup health check. Never fatal: the user may start the
/// server after the client.
fn health_status(result: Result<HealthStatus, GatewayError>) -> String {
    match result {
        Ok(health) => {
            log::info!("Health check: {} {}", health.status, health.message);
            format!("server {}", health.status)
        }
        Err(e) => {
            log::warn!("Health check failed [{}]: {}", e.kind(), e);
            "server unreachable".to_string()
        }
    }
}
