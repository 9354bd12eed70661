//! Configuration management

use std::collections::HashMap;

use config::{Config, Environment, File};
use serde::Deserialize;
use validator::Validate;

use crate::constants::{DEFAULT_LOG_FILTER, DEFAULT_TIMEOUT_SECONDS};
use crate::error::AppError;

#[derive(Debug, Deserialize, Clone, Validate)]
pub struct AppConfig {
    pub app: AppSettings,
    #[validate(nested)]
    pub api: ApiSettings,
    pub session: SessionSettings,
    #[serde(default)]
    pub roles: HashMap<String, Vec<String>>,
    pub log: LogSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppSettings {
    pub env: String,
    pub name: String,
}

#[derive(Debug, Deserialize, Clone, Validate)]
pub struct ApiSettings {
    #[validate(url(message = "api.base_url must be an absolute URL"))]
    pub base_url: String,

    #[validate(range(min = 1, max = 300, message = "api.timeout_seconds must be between 1 and 300"))]
    pub timeout_seconds: u64,

    pub auth_header: AuthHeader,
}

/// Header used to carry the opaque API credential.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum AuthHeader {
    Authorization,
    XApiKey,
}

impl AuthHeader {
    pub fn header_name(&self) -> &'static str {
        match self {
            AuthHeader::Authorization => "Authorization",
            AuthHeader::XApiKey => "x-api-key",
        }
    }
}

/// Sign-in defaults; the command line may override each field.
#[derive(Debug, Deserialize, Clone)]
pub struct SessionSettings {
    pub role: String,
    pub employee_id: String,
    pub credential: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LogSettings {
    pub filter: String,
    pub dir: Option<String>,
}

impl AppConfig {
    /// Load `config/default`, `config/{APP_ENV}` and `CARGOOPS__*` environment overrides.
    pub fn load() -> Result<Self, AppError> {
        Self::load_from("config")
    }

    pub fn load_from(dir: &str) -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        let config = Config::builder()
            .set_default("app.env", env.clone())?
            .set_default("app.name", "cargoops-console")?
            .set_default("api.base_url", "http://127.0.0.1:3000/Prod")?
            .set_default("api.timeout_seconds", DEFAULT_TIMEOUT_SECONDS as i64)?
            .set_default("api.auth_header", "authorization")?
            .set_default("session.role", "")?
            .set_default("session.employee_id", "")?
            .set_default("session.credential", "")?
            .set_default("log.filter", DEFAULT_LOG_FILTER)?
            .add_source(File::with_name(&format!("{}/default", dir)).required(false))
            .add_source(File::with_name(&format!("{}/{}", dir, env)).required(false))
            .add_source(
                Environment::with_prefix("CARGOOPS")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let settings: AppConfig = config.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }
}
