//! Global grader configuration manager.
//!
//! `AppConfig` is a lazily initialized, globally accessible singleton containing
//! runtime configuration values loaded from `.env` and environment variables.
//! It provides thread-safe access and mutation for tests or runtime overrides.

use std::env;
use std::sync::{OnceLock, RwLock};

/// Represents the complete grader configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub project_name: String,
    pub log_level: String,
    pub log_dir: String,
    pub log_file: String,
    pub log_to_stderr: bool,
    /// Directory the stage reports and the final report are written to.
    /// Empty means "next to the running executable".
    pub report_dir: String,
    pub test_output_path: String,
}

/// Lazily-initialized, thread-safe singleton instance of `AppConfig`.
static CONFIG_INSTANCE: OnceLock<RwLock<AppConfig>> = OnceLock::new();

impl AppConfig {
    /// Loads the configuration from `.env` and environment variables.
    ///
    /// Every variable has a default, so loading never fails.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            project_name: env::var("PROJECT_NAME").unwrap_or_else(|_| "pipeline-grader".into()),
            log_level: env::var("LOG_LEVEL")
                .unwrap_or_else(|_| "grader=info,marker=info,util=info".into()),
            log_dir: env::var("LOG_DIR").unwrap_or_else(|_| "logs".into()),
            log_file: env::var("LOG_FILE").unwrap_or_else(|_| "grader.log".into()),
            log_to_stderr: env::var("LOG_TO_STDERR").unwrap_or_else(|_| "false".into()) == "true",
            report_dir: env::var("REPORT_DIR").unwrap_or_default(),
            test_output_path: env::var("TEST_OUTPUT_PATH")
                .unwrap_or_else(|_| "dashboard-api/test-output.txt".into()),
        }
    }

    /// Returns a shared reference to the global configuration.
    ///
    /// A poisoned lock is recovered, since the config holds plain values.
    pub fn global() -> std::sync::RwLockReadGuard<'static, AppConfig> {
        CONFIG_INSTANCE
            .get_or_init(|| RwLock::new(AppConfig::from_env()))
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Resets the configuration by reloading from environment variables.
    ///
    /// Useful in tests to clear overrides.
    pub fn reset() {
        if let Some(lock) = CONFIG_INSTANCE.get() {
            let mut guard = lock.write().unwrap_or_else(|poisoned| poisoned.into_inner());
            *guard = AppConfig::from_env();
        }
    }

    fn set_field<F>(setter: F)
    where
        F: FnOnce(&mut AppConfig),
    {
        let lock = CONFIG_INSTANCE.get_or_init(|| RwLock::new(AppConfig::from_env()));
        let mut guard = lock.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        setter(&mut guard);
    }

    // --- Per-field setters below ---

    pub fn set_project_name(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.project_name = value.into());
    }

    pub fn set_log_level(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.log_level = value.into());
    }

    pub fn set_log_dir(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.log_dir = value.into());
    }

    pub fn set_log_file(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.log_file = value.into());
    }

    pub fn set_log_to_stderr(value: bool) {
        AppConfig::set_field(|cfg| cfg.log_to_stderr = value);
    }

    pub fn set_report_dir(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.report_dir = value.into());
    }

    pub fn set_test_output_path(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.test_output_path = value.into());
    }
}

pub fn project_name() -> String {
    AppConfig::global().project_name.clone()
}

pub fn log_level() -> String {
    AppConfig::global().log_level.clone()
}

pub fn log_dir() -> String {
    AppConfig::global().log_dir.clone()
}

pub fn log_file() -> String {
    AppConfig::global().log_file.clone()
}

pub fn log_to_stderr() -> bool {
    AppConfig::global().log_to_stderr
}

pub fn report_dir() -> String {
    AppConfig::global().report_dir.clone()
}

pub fn test_output_path() -> String {
    AppConfig::global().test_output_path.clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        unsafe {
            env::remove_var("REPORT_DIR");
            env::remove_var("LOG_TO_STDERR");
            env::remove_var("TEST_OUTPUT_PATH");
        }
        let cfg = AppConfig::from_env();
        assert_eq!(cfg.report_dir, "");
        assert!(!cfg.log_to_stderr);
        assert_eq!(cfg.test_output_path, "dashboard-api/test-output.txt");
    }

    #[test]
    #[serial]
    fn test_from_env_reads_overrides() {
        unsafe {
            env::set_var("REPORT_DIR", "/tmp/reports");
            env::set_var("LOG_TO_STDERR", "true");
        }
        let cfg = AppConfig::from_env();
        assert_eq!(cfg.report_dir, "/tmp/reports");
        assert!(cfg.log_to_stderr);
        unsafe {
            env::remove_var("REPORT_DIR");
            env::remove_var("LOG_TO_STDERR");
        }
    }

    #[test]
    #[serial]
    fn test_setter_and_reset() {
        unsafe {
            env::remove_var("REPORT_DIR");
        }
        AppConfig::set_report_dir("/somewhere/else");
        assert_eq!(report_dir(), "/somewhere/else");
        AppConfig::reset();
        assert_eq!(report_dir(), "");
    }
}
