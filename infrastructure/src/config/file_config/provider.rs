//! Provider configuration from TOML (`[provider]` section)

use serde::{Deserialize, Serialize};

/// Raw provider configuration from TOML
///
/// API keys are never read from the file; they come from the environment.
///
/// # Example
///
/// ```toml
/// [provider]
/// kind = "ollama"                       # "openai", "gemini", "ollama"
/// model = "qwen2.5-coder:7b"
/// base_url = "http://gpu-box:11434/v1"
/// temperature = 0.0
/// timeout_secs = 120
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProviderConfig {
    pub kind: String,
    /// Model name (provider default when unset)
    pub model: Option<String>,
    /// Endpoint override (provider default when unset)
    pub base_url: Option<String>,
    pub temperature: f32,
    /// HTTP request timeout
    pub timeout_secs: u64,
}

impl Default for FileProviderConfig {
    fn default() -> Self {
        Self {
            kind: "openai".to_string(),
            model: None,
            base_url: None,
            temperature: 0.0,
            timeout_secs: 120,
        }
    }
}
