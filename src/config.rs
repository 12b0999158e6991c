// src/config.rs
use std::fmt::Debug;
use std::path::PathBuf;

use crate::error::AppError;

pub const ROUTER_URL: &str = "https://router.huggingface.co/v1/chat/completions";
pub const FALLBACK_MODEL: &str = "meta-llama/Llama-3.2-3B-Instruct";
pub const CUSTOM_MODEL: &str = "ZooDka/Aura-Therapy-Model-Exported";

/// Placeholder shipped in the sample `.env`; treated the same as no key.
pub const API_KEY_PLACEHOLDER: &str = "your_api_key_here";

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_STATIC_DIR: &str = "public";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {field}: {value} - {reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
}

/// Which upstream the relay talks to. Fixed for the lifetime of the process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayMode {
    /// Dedicated inference endpoint speaking the text-generation shape.
    CustomEndpoint { url: String },
    /// Public router speaking the chat-completions shape.
    Fallback { url: String, model: String },
}

impl RelayMode {
    pub fn url(&self) -> &str {
        match self {
            RelayMode::CustomEndpoint { url } | RelayMode::Fallback { url, .. } => url,
        }
    }

    pub fn model(&self) -> &str {
        match self {
            RelayMode::CustomEndpoint { .. } => CUSTOM_MODEL,
            RelayMode::Fallback { model, .. } => model,
        }
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, RelayMode::CustomEndpoint { .. })
    }

    pub fn fallback() -> Self {
        RelayMode::Fallback {
            url: ROUTER_URL.to_string(),
            model: FALLBACK_MODEL.to_string(),
        }
    }
}

#[derive(Clone)]
pub struct RelayConfig {
    pub mode: RelayMode,
    pub api_key: Option<String>,
    pub port: u16,
    pub static_dir: PathBuf,
}

impl Debug for RelayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RelayConfig")
            .field("mode", &self.mode)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("port", &self.port)
            .field("static_dir", &self.static_dir)
            .finish()
    }
}

impl RelayConfig {
    pub fn new(mode: RelayMode, api_key: Option<String>) -> Self {
        Self {
            mode,
            api_key,
            port: DEFAULT_PORT,
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
        }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mode = match lookup("HF_ENDPOINT_URL").filter(|url| !url.trim().is_empty()) {
            Some(url) => RelayMode::CustomEndpoint {
                url: url.trim().to_string(),
            },
            None => RelayMode::fallback(),
        };

        let port = match lookup("PORT").filter(|p| !p.trim().is_empty()) {
            Some(raw) => raw.trim().parse::<u16>().map_err(|e: std::num::ParseIntError| {
                ConfigError::InvalidValue {
                    field: "PORT".to_string(),
                    value: raw.clone(),
                    reason: e.to_string(),
                }
            })?,
            None => DEFAULT_PORT,
        };

        let static_dir = lookup("STATIC_DIR")
            .filter(|d| !d.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR));

        Ok(Self {
            mode,
            api_key: lookup("HUGGINGFACE_API_KEY"),
            port,
            static_dir,
        })
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key().is_ok()
    }

    /// The bearer credential, or `Misconfigured` when it is unset or still the placeholder.
    pub fn api_key(&self) -> Result<&str, AppError> {
        match self.api_key.as_deref() {
            Some(key) if !key.is_empty() && key != API_KEY_PLACEHOLDER => Ok(key),
            _ => Err(AppError::Misconfigured(
                "API key not configured. Please set HUGGINGFACE_API_KEY in your .env file."
                    .to_string(),
            )),
        }
    }
}
