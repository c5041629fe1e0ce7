//! Quote Server - rebar pricing and quotation backend
//!
//! # Overview
//!
//! Prices TMT/rebar by brand and size, converts quantities between kg,
//! pieces ("nos") and bundles, assembles quotes with discounts, charges and
//! GST, and persists the catalog and saved quotes in an embedded database.
//!
//! # Module structure
//!
//! ```text
//! quote-server/src/
//! ├── core/      # config, state, server lifecycle
//! ├── api/       # HTTP routes and handlers
//! ├── db/        # redb storage and repositories
//! ├── pricing/   # weight resolution, item and quote calculators
//! ├── quotes/    # quote assembly, numbering, listing
//! ├── import/    # vendor bill extraction post-processing
//! └── utils/     # logging, validation, time
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod import;
pub mod pricing;
pub mod quotes;
pub mod utils;

// Re-export public types
pub use core::{Config, Server, ServerState};
pub use utils::{AppError, AppResult};

// Re-export unified error types from shared
pub use utils::{ErrorCategory, ErrorCode, ErrorResponse};

pub use utils::logger::init_logger_with_file;

/// Load `.env` and initialize logging
///
/// JSON log lines in production, human-readable otherwise. Logs also go to
/// `LOG_DIR` when that directory exists.
pub fn setup_environment() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    let config = Config::from_env();
    init_logger_with_file(
        Some(&config.log_level),
        config.is_production(),
        config.log_dir.as_deref(),
    );
    Ok(())
}

pub fn print_banner() {
    println!(
        r#"
   ____              __
  / __ \__  ______  / /____
 / / / / / / / __ \/ __/ _ \
/ /_/ / /_/ / /_/ / /_/  __/
\___\_\__,_/\____/\__/\___/
    "#
    );
}
