use ::config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::env;

pub const DEFAULT_OBJECT_NAME: &str = "WebSphere:feature=kernel,name=ServerInfo";
pub const DEFAULT_VERSION_ATTRIBUTE: &str = "LibertyVersion";

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub server: ServerConfig,
    #[serde(default)]
    pub system: SystemSettings,
    #[serde(default)]
    pub runtime: RuntimeSettings,
    #[serde(default)]
    pub properties: PropertiesSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct SystemSettings {
    #[serde(default)]
    pub in_maintenance: bool,
}

/// Where the server version is published in the management registry
#[derive(Debug, Deserialize, Clone)]
pub struct RuntimeSettings {
    #[serde(default = "default_object_name")]
    pub object_name: String,
    #[serde(default = "default_version_attribute")]
    pub version_attribute: String,
    /// Version registered at startup, the crate version when unset
    pub server_version: Option<String>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct PropertiesSettings {
    /// Extra entries appended to the properties document
    #[serde(default)]
    pub custom: BTreeMap<String, String>,
}

fn default_object_name() -> String {
    DEFAULT_OBJECT_NAME.to_string()
}

fn default_version_attribute() -> String {
    DEFAULT_VERSION_ATTRIBUTE.to_string()
}

impl Default for RuntimeSettings {
    fn default() -> Self {
        Self {
            object_name: default_object_name(),
            version_attribute: default_version_attribute(),
            server_version: None,
        }
    }
}

impl RuntimeSettings {
    pub fn server_version(&self) -> String {
        self.server_version
            .clone()
            .unwrap_or_else(|| env!("CARGO_PKG_VERSION").to_string())
    }
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = Config::builder()
            .add_source(File::with_name("config/default"))
            // Optional per-environment overrides
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            .add_source(File::with_name("config/local").required(false))
            // Eg. `APP_SYSTEM__IN_MAINTENANCE=true ./target/system-sample`
            .add_source(
                Environment::with_prefix("app")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        s.try_deserialize()
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 9080,
            },
            system: SystemSettings::default(),
            runtime: RuntimeSettings::default(),
            properties: PropertiesSettings::default(),
        }
    }
}
