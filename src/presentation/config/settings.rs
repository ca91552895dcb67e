use config::Environment as EnvironmentSource;
use config::{Config, ConfigError, File};
use serde::{Deserialize, Serialize};

use crate::application::services::SignalPipelineOptions;
use crate::infrastructure::observability::DEFAULT_FILTER;

use super::Environment;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub gateway: GatewaySettings,
    pub staging: StagingSettings,
    pub signal: SignalSettings,
    pub encoder: EncoderSettings,
    pub logging: LoggingSettings,
}

impl Settings {
    /// Layers built-in defaults, `appsettings.<Environment>` and `APP_*`
    /// variables (`APP_GATEWAY__BASE_URL`).
    pub fn load(environment: Environment) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(Config::try_from(&Settings::default())?)
            .add_source(
                File::with_name(&environment.settings_file()).required(false),
            )
            .add_source(
                EnvironmentSource::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__")
                    .list_separator(" ")
                    .with_list_parse_key("encoder.args")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub max_upload_mb: usize,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            max_upload_mb: 50,
        }
    }
}

impl ServerSettings {
    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_mb * 1024 * 1024
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewaySettings {
    pub base_url: String,
    pub predict_path: String,
    pub files_field: String,
    pub api_key: Option<String>,
    pub timeout_secs: Option<u64>,
    pub warm_up_on_start: bool,
}

impl Default for GatewaySettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:7860".to_string(),
            predict_path: "predict".to_string(),
            files_field: "files".to_string(),
            api_key: None,
            timeout_secs: None,
            warm_up_on_start: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StagingSettings {
    pub scratch_dir: String,
}

impl Default for StagingSettings {
    fn default() -> Self {
        Self {
            scratch_dir: std::env::temp_dir()
                .join("medigate-uploads")
                .display()
                .to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignalSettings {
    pub channel_count: usize,
    pub target_samples: usize,
    pub downsample_factor: Option<usize>,
}

impl Default for SignalSettings {
    fn default() -> Self {
        let defaults = SignalPipelineOptions::default();
        Self {
            channel_count: defaults.channel_count,
            target_samples: defaults.target_samples,
            downsample_factor: defaults.downsample_factor,
        }
    }
}

impl SignalSettings {
    pub fn pipeline_options(&self) -> SignalPipelineOptions {
        SignalPipelineOptions {
            channel_count: self.channel_count,
            target_samples: self.target_samples,
            downsample_factor: self.downsample_factor,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EncoderProvider {
    #[default]
    Native,
    Process,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EncoderSettings {
    pub provider: EncoderProvider,
    pub program: Option<String>,
    #[serde(default)]
    pub args: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
    pub enable_json: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: DEFAULT_FILTER.to_string(),
            enable_json: false,
        }
    }
}
