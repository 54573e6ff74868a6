use serde::Deserialize;
use std::env;
use uuid::Uuid;

use msp_core::{Language, PaymentMethod};
use msp_shared::Masked;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub auth: AuthConfig,
    pub platform: PlatformConfig,
    pub multisafepay: MerchantConfig,
    #[serde(default)]
    pub sales_channels: Vec<SalesChannelConfig>,
    #[serde(default)]
    pub payment_methods: Vec<PaymentMethod>,
    #[serde(default)]
    pub languages: Vec<Language>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
}

/// The e-commerce platform this integration is installed in
#[derive(Debug, Deserialize, Clone)]
pub struct PlatformConfig {
    #[serde(default = "default_platform_name")]
    pub name: String,
    pub version: String,
    pub plugin_version: String,
    pub base_url: String,
}

fn default_platform_name() -> String {
    "Shopware".to_string()
}

/// Global merchant settings, used when a sales channel has no override
#[derive(Debug, Deserialize, Clone)]
pub struct MerchantConfig {
    #[serde(default)]
    pub api_key: Masked<String>,
    #[serde(default = "default_environment")]
    pub environment: String,
    pub time_active: Option<u64>,
}

fn default_environment() -> String {
    "test".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct SalesChannelConfig {
    pub id: Uuid,
    pub name: String,
    pub language_id: Uuid,
    pub currency_iso: String,
    pub api_key: Option<Masked<String>>,
    pub environment: Option<String>,
    pub time_active: Option<u64>,
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Not checked in
            .add_source(config::File::with_name("config/local").required(false))
            // e.g. `MSP_MULTISAFEPAY__API_KEY=...`
            .add_source(config::Environment::with_prefix("MSP").separator("__"))
            .build()?;

        s.try_deserialize()
    }

    pub fn from_toml(toml: &str) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()?
            .try_deserialize()
    }
}
