use crate::presentation::config::{Environment, LoggingSettings};

pub const DEFAULT_FILTER: &str = "info,medigate=debug,tower_http=debug";

/// Configuration for tracing initialization.
#[derive(Debug, Clone)]
pub struct TracingConfig {
    pub environment: Environment,
    pub json_format: bool,
    pub default_filter: String,
}

impl TracingConfig {
    pub fn from_settings(settings: &LoggingSettings, environment: Environment) -> Self {
        let default_filter = if settings.level.trim().is_empty() {
            DEFAULT_FILTER.to_string()
        } else {
            settings.level.clone()
        };

        Self {
            environment,
            json_format: settings.enable_json,
            default_filter,
        }
    }
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            environment: Environment::from_env().unwrap_or(Environment::Local),
            json_format: false,
            default_filter: DEFAULT_FILTER.to_string(),
        }
    }
}
