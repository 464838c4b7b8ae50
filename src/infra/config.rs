//! Runtime configuration resolved from the data directory and environment.

use crate::error::AppError;
use std::path::PathBuf;

pub const ENV_DB_PATH: &str = "NEWSDESK_DB_PATH";
pub const ENV_LOG_DIR: &str = "NEWSDESK_LOG_DIR";
pub const ENV_LOG_LEVEL: &str = "NEWSDESK_LOG_LEVEL";

const APP_DIR_NAME: &str = "com.newsdesk.app";
const DB_FILE_NAME: &str = "newsdesk.db";
const DEFAULT_LOG_LEVEL: &str = "info";
const LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub log_dir: PathBuf,
    pub log_level: String,
}

impl AppConfig {
    /// Resolve from the process environment.
    pub fn from_env() -> Result<Self, AppError> {
        Self::resolve(|key| std::env::var(key).ok())
    }

    /// Resolve with an injectable lookup so tests don't touch the real environment.
    pub fn resolve<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let data_dir = app_data_dir();

        let db_path = lookup(ENV_DB_PATH)
            .map(PathBuf::from)
            .unwrap_or_else(|| data_dir.join(DB_FILE_NAME));
        let log_dir = lookup(ENV_LOG_DIR)
            .map(PathBuf::from)
            .unwrap_or_else(|| data_dir.join("logs"));
        let log_level = match lookup(ENV_LOG_LEVEL) {
            Some(level) => {
                let level = level.to_ascii_lowercase();
                if !LOG_LEVELS.contains(&level.as_str()) {
                    return Err(AppError::Config(format!(
                        "{} must be one of {}, got `{}`",
                        ENV_LOG_LEVEL,
                        LOG_LEVELS.join("/"),
                        level
                    )));
                }
                level
            }
            None => DEFAULT_LOG_LEVEL.to_string(),
        };

        Ok(Self {
            db_path,
            log_dir,
            log_level,
        })
    }
}

fn app_data_dir() -> PathBuf {
    let base = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
    base.join(APP_DIR_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn defaults_live_under_app_data_dir() {
        let cfg = AppConfig::resolve(|_| None).unwrap();
        assert!(cfg.db_path.ends_with("com.newsdesk.app/newsdesk.db"));
        assert!(cfg.log_dir.ends_with("com.newsdesk.app/logs"));
        assert_eq!(cfg.log_level, "info");
    }

    #[test]
    fn env_overrides_paths_and_level() {
        let vars = env(&[
            (ENV_DB_PATH, "/tmp/x/news.db"),
            (ENV_LOG_DIR, "/tmp/x/logs"),
            (ENV_LOG_LEVEL, "DEBUG"),
        ]);
        let cfg = AppConfig::resolve(|k| vars.get(k).cloned()).unwrap();
        assert_eq!(cfg.db_path, PathBuf::from("/tmp/x/news.db"));
        assert_eq!(cfg.log_dir, PathBuf::from("/tmp/x/logs"));
        assert_eq!(cfg.log_level, "debug");
    }

    #[test]
    fn blank_override_falls_back_to_default() {
        let vars = env(&[(ENV_DB_PATH, "   ")]);
        let cfg = AppConfig::resolve(|k| vars.get(k).cloned()).unwrap();
        assert!(cfg.db_path.ends_with("newsdesk.db"));
    }

    #[test]
    fn unknown_log_level_is_rejected() {
        let vars = env(&[(ENV_LOG_LEVEL, "loud")]);
        let err = AppConfig::resolve(|k| vars.get(k).cloned()).unwrap_err();
        assert_eq!(err.code(), "CONFIG_ERROR");
    }
}
