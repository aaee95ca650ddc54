//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `porkbun_exporter` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use porkbun_exporter::initialization::init_logger_with;
use porkbun_exporter::{run_exporter, Config, Opt};

#[tokio::main]
async fn main() -> Result<()> {
    // APIKEY and SECRET usually live in a .env file next to the binary's
    // working directory; a missing file is not an error
    if dotenvy::dotenv().is_err() {
        if let Ok(exe_path) = std::env::current_exe() {
            if let Some(exe_dir) = exe_path.parent() {
                let env_path = exe_dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                }
            }
        }
    }

    let opt = Opt::parse();

    init_logger_with(opt.log_level.clone().into(), opt.log_format.clone())
        .context("Failed to initialize logger")?;

    let config = match Config::try_from(opt) {
        Ok(config) => config,
        Err(e) => {
            log::error!("{}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_exporter(config).await {
        log::error!("porkbun_exporter error: {:#}", e);
        process::exit(1);
    }
    Ok(())
}
