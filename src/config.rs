use std::env;
use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "Cortex";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default listen port when `PORT` is not set.
pub const DEFAULT_PORT: u16 = 5000;

/// Runtime configuration, built once from the environment at process
/// start and passed explicitly to whoever needs it.
#[derive(Debug, Clone)]
pub struct Config {
    /// TCP port the portal listens on (`PORT`).
    pub port: u16,
    /// SQLite database file (`DB_NAME` under the data directory).
    pub db_path: PathBuf,
    /// Directory uploaded report files are stored in.
    pub uploads_dir: PathBuf,
}

impl Config {
    /// Read configuration from the environment.
    ///
    /// `CORTEX_DATA_DIR` overrides the default data directory; `DB_NAME`
    /// names the database file (without extension).
    pub fn from_env() -> Self {
        let port = env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        let data_dir = env::var("CORTEX_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| app_data_dir());

        let db_name = env::var("DB_NAME").unwrap_or_else(|_| "cortex".into());

        Self {
            port,
            db_path: data_dir.join(format!("{db_name}.db")),
            uploads_dir: data_dir.join("uploads"),
        }
    }
}

/// Get the application data directory
/// ~/Cortex/ on all platforms (user-visible)
pub fn app_data_dir() -> PathBuf {
    let home = dirs::home_dir().expect("Cannot determine home directory");
    home.join(APP_NAME)
}

/// Default tracing filter when `RUST_LOG` is not set.
pub fn default_log_filter() -> &'static str {
    "info"
}
