use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "Clinscribe";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default model used for extraction and report generation.
/// Override with `CLINSCRIBE_MODEL`.
pub const DEFAULT_MODEL: &str = "medgemma:4b";

/// Default listen address for the HTTP API. Override with `CLINSCRIBE_ADDR`.
pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8787";

/// Default log filter when `RUST_LOG` is unset.
pub fn default_log_filter() -> String {
    format!("{}=info,tower=warn", env!("CARGO_PKG_NAME"))
}

/// Get the application data directory
/// ~/Clinscribe/ on all platforms (user-visible, per design requirement)
pub fn app_data_dir() -> PathBuf {
    let home = dirs::home_dir().expect("Cannot determine home directory");
    home.join("Clinscribe")
}

/// Base directory for batch runs. Each run writes into a
/// `YYYY-MM-DD` subdirectory underneath.
pub fn batch_output_base() -> PathBuf {
    app_data_dir().join("batch_reports")
}

/// Fixed relative folder for single-report runs.
pub fn single_report_dir() -> PathBuf {
    PathBuf::from("generated_reports")
}

/// Model name to use, from env or default.
pub fn model_name() -> String {
    std::env::var("CLINSCRIBE_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string())
}

/// Listen address for the HTTP API, from env or default.
pub fn listen_addr() -> String {
    std::env::var("CLINSCRIBE_ADDR").unwrap_or_else(|_| DEFAULT_LISTEN_ADDR.to_string())
}
