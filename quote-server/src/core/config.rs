use std::path::PathBuf;

/// Server configuration
///
/// # Environment variables
///
/// Every field can be overridden from the environment:
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | WORK_DIR | ./data | working directory (database) |
/// | HTTP_PORT | 3000 | HTTP listen port |
/// | ENVIRONMENT | development | runtime environment |
/// | LOG_LEVEL | info | tracing filter |
/// | LOG_DIR | (unset) | rolling log file directory |
/// | REQUEST_TIMEOUT_MS | 30000 | per-request timeout (ms) |
/// | QUOTE_NO_PREFIX | Q | prefix of generated quote numbers |
///
/// # Example
///
/// ```ignore
/// WORK_DIR=/srv/quotes HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Working directory holding the database
    pub work_dir: String,
    /// HTTP API port
    pub http_port: u16,
    /// development | production
    pub environment: String,
    /// tracing filter directive
    pub log_level: String,
    /// Rolling log output directory
    pub log_dir: Option<String>,
    /// Request timeout (ms)
    pub request_timeout_ms: u64,
    /// Prefix of generated quote numbers
    pub quote_no_prefix: String,
}

impl Config {
    /// Load configuration from the environment
    ///
    /// Unset variables fall back to their defaults.
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "./data".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok().filter(|d| !d.trim().is_empty()),
            request_timeout_ms: std::env::var("REQUEST_TIMEOUT_MS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(30000),
            quote_no_prefix: std::env::var("QUOTE_NO_PREFIX").unwrap_or_else(|_| "Q".into()),
        }
    }

    /// Override part of the configuration
    ///
    /// Mostly used by tests
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.http_port = http_port;
        config
    }

    /// Path of the redb database file
    pub fn database_path(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("quotes.redb")
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
