//! FRIDAY — console entry point.
//!
//! Startup sequence:
//!   1. Load .env (if present)
//!   2. Load config
//!   3. Init logger at configured level
//!   4. Ensure the work directory exists
//!   5. Build the assistant and run the console until exit

use std::fs;

use tracing::info;

use friday::config;
use friday::error::AppError;
use friday::logger;
use friday::subsystems::agents::friday::Friday;
use friday::subsystems::comms::pty;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), AppError> {
    // Load .env if present — ignore errors (file is optional).
    let _ = dotenvy::dotenv();

    let config = config::load()?;
    logger::init(&config.log_level, config.log_file.as_deref())?;

    info!(
        name = %config.name,
        work_dir = %config.work_dir.display(),
        model = %config.model.provider,
        weather = config.weather_api_key.is_some(),
        news = config.news_api_key.is_some(),
        "config loaded"
    );

    fs::create_dir_all(&config.work_dir).map_err(|e| {
        AppError::StorageUnavailable(format!("cannot create {}: {e}", config.work_dir.display()))
    })?;
    if !config.memory_path().exists() {
        eprintln!(
            "warning: {} not found; chat replies stay offline until it exists (see config/memory.sample.json)",
            config.memory_path().display()
        );
    }

    let friday = Friday::from_config(&config)?;
    pty::run(&friday, &config.name).await?;

    info!("goodbye");
    Ok(())
}
