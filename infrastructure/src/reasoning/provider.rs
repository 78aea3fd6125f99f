//! Provider selection and credentials.

use crate::config::FileProviderConfig;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Errors raised while setting up the reasoning engine. Fatal at startup.
#[derive(Debug, Error, PartialEq)]
pub enum ProviderSetupError {
    #[error("unknown provider '{0}' (expected openai, gemini or ollama)")]
    UnknownProvider(String),

    #[error("{provider} requires the {var} environment variable to be set")]
    MissingApiKey { provider: ProviderKind, var: &'static str },

    #[error("failed to build HTTP client: {0}")]
    HttpClient(String),
}

/// Backends reachable through an OpenAI-compatible chat completions endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    OpenAi,
    Gemini,
    Ollama,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::OpenAi => "openai",
            ProviderKind::Gemini => "gemini",
            ProviderKind::Ollama => "ollama",
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            ProviderKind::OpenAi => "gpt-4o",
            ProviderKind::Gemini => "gemini-2.5-flash",
            ProviderKind::Ollama => "gemma2:9b",
        }
    }

    pub fn default_base_url(&self) -> &'static str {
        match self {
            ProviderKind::OpenAi => "https://api.openai.com/v1",
            ProviderKind::Gemini => "https://generativelanguage.googleapis.com/v1beta/openai",
            ProviderKind::Ollama => "http://localhost:11434/v1",
        }
    }

    /// Environment variable holding the API key, if the provider needs one
    pub fn api_key_var(&self) -> Option<&'static str> {
        match self {
            ProviderKind::OpenAi => Some("OPENAI_API_KEY"),
            ProviderKind::Gemini => Some("GOOGLE_API_KEY"),
            ProviderKind::Ollama => None,
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = ProviderSetupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "openai" | "gpt" => Ok(ProviderKind::OpenAi),
            "gemini" | "google" => Ok(ProviderKind::Gemini),
            "ollama" | "llama" => Ok(ProviderKind::Ollama),
            other => Err(ProviderSetupError::UnknownProvider(other.to_string())),
        }
    }
}

/// Fully resolved connection settings for the chat completions endpoint.
#[derive(Clone, PartialEq)]
pub struct ProviderSettings {
    pub kind: ProviderKind,
    pub model: String,
    /// Base URL without the `/chat/completions` suffix
    pub base_url: String,
    pub api_key: Option<String>,
    pub temperature: f32,
    pub timeout: Duration,
}

impl ProviderSettings {
    /// Resolve settings from config and the process environment.
    pub fn from_config(config: &FileProviderConfig) -> Result<Self, ProviderSetupError> {
        Self::resolve(config, |var| std::env::var(var).ok())
    }

    /// Resolve settings with an explicit environment lookup.
    ///
    /// Explicit config values win over `OLLAMA_MODEL` / `OLLAMA_BASE_URL`,
    /// which win over the provider defaults. A provider that needs a key and
    /// has none is an error.
    pub fn resolve(
        config: &FileProviderConfig,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ProviderSetupError> {
        let kind: ProviderKind = config.kind.parse()?;
        let env = |var: &str| env(var).filter(|v| !v.trim().is_empty());

        let api_key = match kind.api_key_var() {
            Some(var) => Some(env(var).ok_or(ProviderSetupError::MissingApiKey {
                provider: kind,
                var,
            })?),
            None => None,
        };

        let (env_model, env_base_url) = match kind {
            ProviderKind::Ollama => (env("OLLAMA_MODEL"), env("OLLAMA_BASE_URL").map(ollama_api_url)),
            _ => (None, None),
        };

        let model = config
            .model
            .clone()
            .or(env_model)
            .unwrap_or_else(|| kind.default_model().to_string());
        let base_url = config
            .base_url
            .clone()
            .or(env_base_url)
            .unwrap_or_else(|| kind.default_base_url().to_string());

        Ok(Self {
            kind,
            model,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            temperature: config.temperature,
            timeout: Duration::from_secs(config.timeout_secs),
        })
    }

    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

impl std::fmt::Debug for ProviderSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderSettings")
            .field("kind", &self.kind)
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("has_api_key", &self.api_key.is_some())
            .field("temperature", &self.temperature)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// `OLLAMA_BASE_URL` conventionally points at the server root; the
/// OpenAI-compatible API lives under `/v1`.
fn ollama_api_url(url: String) -> String {
    let trimmed = url.trim_end_matches('/');
    if trimmed.ends_with("/v1") {
        trimmed.to_string()
    } else {
        format!("{}/v1", trimmed)
    }
}
