//! TOML-based application configuration.
//!
//! Stores:
//! - Gateway settings (endpoint, model, sampling parameters)
//! - Reminder defaults (daily summary toggles and times)
//! - Server bind address
//!
//! Configuration is stored at `~/.config/routinely/config.toml`; setting
//! `ROUTINELY_ENV=dev` switches to `~/.config/routinely-dev/`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::ConfigError;

/// Model gateway configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Environment variable the API key is read from; the key itself is
    /// never written to the config file.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Reminder defaults seeded into every new session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemindersConfig {
    #[serde(default = "default_true")]
    pub morning_summary: bool,
    #[serde(default = "default_morning_time")]
    pub morning_summary_time: String,
    #[serde(default = "default_true")]
    pub evening_wrapup: bool,
    #[serde(default = "default_evening_time")]
    pub evening_wrapup_time: String,
    #[serde(default = "default_lead_minutes")]
    pub default_lead_minutes: u32,
}

/// HTTP server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/routinely/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub gateway: GatewayConfig,
    #[serde(default)]
    pub reminders: RemindersConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

// Default functions
fn default_base_url() -> String {
    "https://api.openai.com/v1".into()
}
fn default_api_key_env() -> String {
    "OPENAI_API_KEY".into()
}
fn default_model() -> String {
    "gpt-4o".into()
}
fn default_temperature() -> f32 {
    0.7
}
fn default_max_tokens() -> u32 {
    1000
}
fn default_timeout_secs() -> u64 {
    30
}
fn default_true() -> bool {
    true
}
fn default_morning_time() -> String {
    "7:00 AM".into()
}
fn default_evening_time() -> String {
    "9:00 PM".into()
}
fn default_lead_minutes() -> u32 {
    15
}
fn default_bind() -> String {
    "127.0.0.1:3000".into()
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key_env: default_api_key_env(),
            model: default_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for RemindersConfig {
    fn default() -> Self {
        Self {
            morning_summary: true,
            morning_summary_time: default_morning_time(),
            evening_wrapup: true,
            evening_wrapup_time: default_evening_time(),
            default_lead_minutes: default_lead_minutes(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

/// Returns `~/.config/routinely[-dev]/` based on ROUTINELY_ENV.
///
/// Set ROUTINELY_ENV=dev to use the development config directory.
pub fn config_dir() -> Result<PathBuf, ConfigError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("ROUTINELY_ENV").unwrap_or_else(|_| "production".to_string());
    let dir = if env == "dev" {
        base_dir.join("routinely-dev")
    } else {
        base_dir.join("routinely")
    };

    std::fs::create_dir_all(&dir).map_err(|e| ConfigError::LoadFailed {
        path: dir.clone(),
        message: e.to_string(),
    })?;
    Ok(dir)
}

impl Config {
    /// Path of the config file.
    pub fn path() -> Result<PathBuf, ConfigError> {
        Ok(config_dir()?.join("config.toml"))
    }

    /// Load the configuration, falling back to defaults when the file does
    /// not exist yet.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    /// Load from an explicit path.
    pub fn load_from(path: &PathBuf) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        toml::from_str(&raw).map_err(|e| ConfigError::ParseFailed(e.to_string()))
    }

    /// Save to the default location.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    /// Save to an explicit path.
    pub fn save_to(&self, path: &PathBuf) -> Result<(), ConfigError> {
        let raw = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        std::fs::write(path, raw).map_err(|e| ConfigError::SaveFailed {
            path: path.clone(),
            message: e.to_string(),
        })
    }

    /// Read a value by dot-separated key path, e.g. `gateway.model`.
    pub fn get(&self, key: &str) -> Result<serde_json::Value, ConfigError> {
        let root = serde_json::to_value(self).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        let mut current = &root;
        for part in key.split('.') {
            current = current
                .get(part)
                .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
        }
        Ok(current.clone())
    }

    /// Set a value by dot-separated key path, coercing `value` to the type
    /// already present at that key.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut root =
            serde_json::to_value(&*self).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;

        {
            let mut current = &mut root;
            let mut parts = key.split('.').peekable();
            if parts.peek().is_none() {
                return Err(ConfigError::UnknownKey(key.to_string()));
            }
            while let Some(part) = parts.next() {
                let is_leaf = parts.peek().is_none();
                if is_leaf {
                    let obj = current
                        .as_object_mut()
                        .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
                    let existing = obj
                        .get(part)
                        .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
                    let new_value = coerce_like(existing, key, value)?;
                    obj.insert(part.to_string(), new_value);
                } else {
                    current = current
                        .get_mut(part)
                        .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
                }
            }
        }

        *self = serde_json::from_value(root).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Ok(())
    }
}

fn coerce_like(
    existing: &serde_json::Value,
    key: &str,
    value: &str,
) -> Result<serde_json::Value, ConfigError> {
    let invalid = |message: String| ConfigError::InvalidValue {
        key: key.to_string(),
        message,
    };
    match existing {
        serde_json::Value::Bool(_) => value
            .parse::<bool>()
            .map(serde_json::Value::Bool)
            .map_err(|e| invalid(e.to_string())),
        serde_json::Value::Number(_) => {
            if let Ok(n) = value.parse::<u64>() {
                Ok(serde_json::Value::Number(n.into()))
            } else if let Ok(n) = value.parse::<f64>() {
                serde_json::Number::from_f64(n)
                    .map(serde_json::Value::Number)
                    .ok_or_else(|| invalid(format!("cannot represent '{value}' as number")))
            } else {
                Err(invalid(format!("cannot parse '{value}' as number")))
            }
        }
        serde_json::Value::String(_) => Ok(serde_json::Value::String(value.to_string())),
        other => Err(invalid(format!(
            "cannot set composite value of type {}",
            match other {
                serde_json::Value::Array(_) => "array",
                serde_json::Value::Object(_) => "object",
                _ => "null",
            }
        ))),
    }
}
