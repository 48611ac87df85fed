//! Runtime configuration for notepad front ends.
//!
//! Values come from explicit arguments first, then environment variables,
//! then platform defaults.

use std::path::PathBuf;

use crate::reminder::AuthorizationStatus;
use crate::util::normalize_text_option;

/// Environment variable overriding the database location
pub const DB_PATH_ENV: &str = "NOTEPAD_DB_PATH";
/// Environment variable controlling notification permission
pub const NOTIFICATIONS_ENV: &str = "NOTEPAD_NOTIFICATIONS";

const APP_DIR: &str = "notepad";
const DB_FILE: &str = "notepad.db";

/// Resolved runtime configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Local database file
    pub db_path: PathBuf,
    /// Starting notification permission
    pub notifications: AuthorizationStatus,
}

impl AppConfig {
    /// Resolve configuration from the process environment.
    pub fn from_env(db_path_override: Option<PathBuf>) -> Self {
        Self::resolve(
            db_path_override,
            std::env::var(DB_PATH_ENV).ok(),
            std::env::var(NOTIFICATIONS_ENV).ok(),
        )
    }

    /// Resolve configuration from explicit sources.
    ///
    /// Precedence for the database path: override, then `env_db_path`, then
    /// [`default_db_path`]. Blank environment values count as unset.
    pub fn resolve(
        db_path_override: Option<PathBuf>,
        env_db_path: Option<String>,
        env_notifications: Option<String>,
    ) -> Self {
        let db_path = db_path_override
            .or_else(|| normalize_text_option(env_db_path).map(PathBuf::from))
            .unwrap_or_else(default_db_path);

        Self {
            db_path,
            notifications: parse_notification_status(env_notifications.as_deref()),
        }
    }
}

/// Platform data directory location of the database
pub fn default_db_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
        .join(DB_FILE)
}

/// Map a `NOTEPAD_NOTIFICATIONS` value to a starting permission.
///
/// `off`, `denied`, `0` and `false` deny; anything else leaves the decision
/// to the first scheduling attempt.
pub fn parse_notification_status(value: Option<&str>) -> AuthorizationStatus {
    let Some(value) = value else {
        return AuthorizationStatus::NotDetermined;
    };
    match value.trim().to_ascii_lowercase().as_str() {
        "off" | "denied" | "0" | "false" => AuthorizationStatus::Denied,
        _ => AuthorizationStatus::NotDetermined,
    }
}
