use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::VigilError;

/// Base URL of the chat-completion service. Required.
pub const ENV_URL: &str = "OPEN_WEBUI_URL";
/// Bearer credential for the service. Required.
pub const ENV_TOKEN: &str = "OPEN_WEBUI_TOKEN";
/// Base branch to diff against. Optional, defaults to `main`.
pub const ENV_BASE_REF: &str = "GITHUB_BASE_REF";
/// Model identifier override. Optional.
pub const ENV_MODEL: &str = "OPEN_WEBUI_MODEL";

/// Top-level configuration loaded from `.vigil.toml`.
///
/// Supports layered resolution: CLI flags > env vars > local config > defaults.
///
/// # Examples
///
/// ```
/// use vigil_core::VigilConfig;
///
/// let config = VigilConfig::default();
/// assert_eq!(config.diff.base_branch, "main");
/// assert_eq!(config.diff.max_diff_chars, 30_000);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VigilConfig {
    /// LLM endpoint settings.
    #[serde(default)]
    pub llm: LlmConfig,
    /// Diff collection settings.
    #[serde(default)]
    pub diff: DiffConfig,
}

impl VigilConfig {
    /// Load configuration from a TOML file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`VigilError::Io`] if the file cannot be read, or
    /// [`VigilError::Toml`] if the content is not valid TOML.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use vigil_core::VigilConfig;
    /// use std::path::Path;
    ///
    /// let config = VigilConfig::from_file(Path::new(".vigil.toml")).unwrap();
    /// ```
    pub fn from_file(path: &Path) -> Result<Self, VigilError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns [`VigilError::Toml`] if parsing fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use vigil_core::VigilConfig;
    ///
    /// let toml = r#"
    /// [diff]
    /// max_diff_chars = 50000
    /// "#;
    /// let config = VigilConfig::from_toml(toml).unwrap();
    /// assert_eq!(config.diff.max_diff_chars, 50_000);
    /// ```
    pub fn from_toml(content: &str) -> Result<Self, VigilError> {
        let config: Self = toml::from_str(content)?;
        Ok(config)
    }

    /// Overlay environment variables onto the configuration.
    ///
    /// Reads [`ENV_URL`], [`ENV_TOKEN`], [`ENV_BASE_REF`], and [`ENV_MODEL`].
    /// Empty values are ignored.
    pub fn apply_env(&mut self) {
        if let Some(url) = read_env(ENV_URL) {
            self.llm.base_url = Some(url);
        }
        if let Some(token) = read_env(ENV_TOKEN) {
            self.llm.api_key = Some(token);
        }
        if let Some(base) = read_env(ENV_BASE_REF) {
            self.diff.base_branch = base;
        }
        if let Some(model) = read_env(ENV_MODEL) {
            self.llm.model = model;
        }
    }

    /// Check that the required credentials are present.
    ///
    /// This is the only fatal configuration path: the binary exits with
    /// status 1 when it fails, before any git or network activity.
    ///
    /// # Errors
    ///
    /// Returns [`VigilError::Config`] naming every missing variable.
    ///
    /// # Examples
    ///
    /// ```
    /// use vigil_core::VigilConfig;
    ///
    /// let config = VigilConfig::default();
    /// let err = config.validate().unwrap_err();
    /// assert!(err.to_string().contains("OPEN_WEBUI_URL"));
    /// assert!(err.to_string().contains("OPEN_WEBUI_TOKEN"));
    /// ```
    pub fn validate(&self) -> Result<(), VigilError> {
        let mut missing = Vec::new();
        if self.llm.base_url.is_none() {
            missing.push(ENV_URL);
        }
        if self.llm.api_key.is_none() {
            missing.push(ENV_TOKEN);
        }
        if missing.is_empty() {
            Ok(())
        } else {
            Err(VigilError::Config(format!(
                "missing required environment variables: {}",
                missing.join(", ")
            )))
        }
    }
}

fn read_env(name: &str) -> Option<String> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Some(value),
        _ => None,
    }
}

/// LLM endpoint configuration.
///
/// # Examples
///
/// ```
/// use vigil_core::LlmConfig;
///
/// let config = LlmConfig::default();
/// assert_eq!(config.model, "gpt-4o");
/// assert!(config.base_url.is_none());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Model identifier.
    #[serde(default = "default_model")]
    pub model: String,
    /// Base URL of the OpenAI-compatible service.
    pub base_url: Option<String>,
    /// Bearer token for the service.
    pub api_key: Option<String>,
}

fn default_model() -> String {
    "gpt-4o".into()
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            base_url: None,
            api_key: None,
        }
    }
}

/// Diff collection configuration.
///
/// The size threshold and excluded path patterns are policy, not mechanism;
/// they are exposed here so callers and tests can tune them.
///
/// # Examples
///
/// ```
/// use vigil_core::DiffConfig;
///
/// let config = DiffConfig::default();
/// assert_eq!(config.base_branch, "main");
/// assert!(config.exclude.iter().any(|p| p == "*.svg"));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiffConfig {
    /// Base branch to diff against (default: `main`).
    #[serde(default = "default_base_branch")]
    pub base_branch: String,
    /// Path patterns excluded from the diff (default: lock files and SVGs).
    #[serde(default = "default_exclude")]
    pub exclude: Vec<String>,
    /// Hard character limit above which the diff is rejected, not truncated
    /// (default: 30,000).
    #[serde(default = "default_max_diff_chars")]
    pub max_diff_chars: usize,
}

fn default_base_branch() -> String {
    "main".into()
}

fn default_exclude() -> Vec<String> {
    vec![
        "package-lock.json".into(),
        "yarn.lock".into(),
        "pnpm-lock.yaml".into(),
        "Cargo.lock".into(),
        "*.svg".into(),
    ]
}

fn default_max_diff_chars() -> usize {
    30_000
}

impl Default for DiffConfig {
    fn default() -> Self {
        Self {
            base_branch: default_base_branch(),
            exclude: default_exclude(),
            max_diff_chars: default_max_diff_chars(),
        }
    }
}
