//! item-service
//!
//! A CRUD service over an in-memory item collection, built with Tokio and Axum.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ──────────────▶ request id ─▶ trace ─▶ limits ─▶ metrics ─▶ router
//!                                                                   │
//!                              ┌────────────────────────────────────┤
//!                              ▼                                    ▼
//!                      /api/items handlers                   static front end
//!                              │                              (public/)
//!                              ▼
//!                   ItemRepository (single mutex)
//!                      items + id sequence
//! ```

use std::path::PathBuf;

use clap::Parser;

use item_service::config::{read_config, validate_config, ServiceConfig};
use item_service::lifecycle;

#[derive(Parser)]
#[command(name = "item-service")]
#[command(about = "In-memory item CRUD service", long_about = None)]
struct Args {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listener bind address
    #[arg(short, long)]
    bind: Option<String>,

    /// Override the static front end directory
    #[arg(long)]
    static_dir: Option<String>,

    /// Start with an empty collection instead of the sample items
    #[arg(long)]
    no_seed: bool,
}

impl Args {
    fn apply(&self, config: &mut ServiceConfig) {
        if let Some(bind) = &self.bind {
            config.listener.bind_address = bind.clone();
        }
        if let Some(dir) = &self.static_dir {
            config.static_files.dir = dir.clone();
        }
        if self.no_seed {
            config.store.seed_samples = false;
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => read_config(path)?,
        None => ServiceConfig::default(),
    };
    args.apply(&mut config);

    if let Err(errors) = validate_config(&config) {
        for error in &errors {
            eprintln!("invalid configuration: {}", error);
        }
        return Err(format!("{} configuration error(s)", errors.len()).into());
    }

    lifecycle::run(config).await?;
    Ok(())
}
