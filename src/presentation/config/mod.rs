mod environment;
mod settings;

pub use environment::{ENVIRONMENT_VAR, Environment};
pub use settings::{
    EncoderProvider, EncoderSettings, GatewaySettings, LoggingSettings, ServerSettings,
    Settings, SignalSettings, StagingSettings,
};
