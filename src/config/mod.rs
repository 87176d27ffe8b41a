//! Configuration management.
//!
//! Values come from three layers, later layers winning: built-in defaults,
//! a TOML file, then `GUARDIA_*` environment variables.

use secrecy::SecretString;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Environment variable naming an explicit config file.
pub const CONFIG_PATH_ENV: &str = "GUARDIA_CONFIG_PATH";

/// Main configuration for guardia.
#[derive(Debug, Clone, Default)]
pub struct GuardiaConfig {
    /// Assessment provider configuration.
    pub llm: LlmConfig,
    /// Logging settings.
    pub logging: LoggingSettings,
    /// File the configuration was read from, if any.
    pub source: Option<PathBuf>,
}

/// Assessment provider configuration.
#[derive(Debug, Clone, Default)]
pub struct LlmConfig {
    /// Which provider answers assessments.
    pub provider: LlmProvider,
    /// Model name. Provider default when unset.
    pub model: Option<String>,
    /// API key. The provider's own environment variables are used when unset.
    pub api_key: Option<SecretString>,
    /// Base URL of the provider API.
    pub base_url: Option<String>,
    /// Sampling temperature.
    pub temperature: Option<f32>,
    /// Request timeout in milliseconds.
    pub timeout_ms: Option<u64>,
    /// Connect timeout in milliseconds.
    pub connect_timeout_ms: Option<u64>,
}

/// Available assessment providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LlmProvider {
    /// Google Gemini.
    #[default]
    Gemini,
    /// `OpenAI` chat completions.
    OpenAi,
}

impl LlmProvider {
    /// Parses a provider string. Unknown names fall back to Gemini.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "openai" | "open_ai" | "open-ai" => Self::OpenAi,
            _ => Self::Gemini,
        }
    }

    /// Returns the provider name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Gemini => "gemini",
            Self::OpenAi => "openai",
        }
    }
}

/// Logging settings as configured. Resolved by the observability module.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoggingSettings {
    /// `pretty` or `json`.
    pub format: Option<String>,
    /// Append log output to this file instead of stderr.
    pub file: Option<PathBuf>,
    /// Filter directive, e.g. `guardia=debug`.
    pub filter: Option<String>,
}

/// Configuration file structure (for TOML parsing).
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    /// LLM configuration.
    pub llm: Option<ConfigFileLlm>,
    /// Logging configuration.
    pub logging: Option<ConfigFileLogging>,
}

/// LLM section in config file.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFileLlm {
    /// Provider name.
    pub provider: Option<String>,
    /// Model name.
    pub model: Option<String>,
    /// API key, literal or `${VAR}`.
    pub api_key: Option<String>,
    /// Base URL.
    pub base_url: Option<String>,
    /// Temperature.
    pub temperature: Option<f32>,
    /// Request timeout.
    pub timeout_ms: Option<u64>,
    /// Connect timeout.
    pub connect_timeout_ms: Option<u64>,
}

/// Logging section in config file.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFileLogging {
    /// Output format.
    pub format: Option<String>,
    /// Log file path.
    pub file: Option<String>,
    /// Filter directive.
    pub filter: Option<String>,
}

impl GuardiaConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves configuration for the binary.
    ///
    /// Uses `explicit` if given, else `GUARDIA_CONFIG_PATH`, else the default
    /// location. Environment overrides are applied last.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicitly named file cannot be read or parsed.
    pub fn load(explicit: Option<&Path>) -> crate::Result<Self> {
        let from_env = std::env::var(CONFIG_PATH_ENV).ok().map(PathBuf::from);
        let config = match explicit.map(Path::to_path_buf).or(from_env) {
            Some(path) => Self::load_from_file(&path)?,
            None => Self::load_default(),
        };
        Ok(config.with_env_overrides())
    }

    /// Loads configuration from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(path: &Path) -> crate::Result<Self> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| crate::Error::OperationFailed {
                operation: "read_config_file".to_string(),
                cause: format!("{}: {e}", path.display()),
            })?;

        let file: ConfigFile =
            toml::from_str(&contents).map_err(|e| crate::Error::OperationFailed {
                operation: "parse_config_file".to_string(),
                cause: e.to_string(),
            })?;

        tracing::debug!(path = %path.display(), "Loaded config file");
        let mut config = Self::from_config_file(file);
        config.source = Some(path.to_path_buf());
        Ok(config)
    }

    /// Loads configuration from the default location.
    ///
    /// Returns defaults if the file is missing or unreadable.
    #[must_use]
    pub fn load_default() -> Self {
        let Some(path) = default_config_path() else {
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from_file(&path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Ignoring unreadable config file");
                Self::default()
            },
        }
    }

    /// Applies `GUARDIA_*` environment overrides.
    #[must_use]
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Applies overrides from an arbitrary lookup, keyed by variable name.
    #[must_use]
    pub fn with_overrides_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(provider) = get("GUARDIA_LLM_PROVIDER") {
            self.llm.provider = LlmProvider::parse(&provider);
        }
        if let Some(model) = get("GUARDIA_LLM_MODEL") {
            self.llm.model = Some(model);
        }
        if let Some(base_url) = get("GUARDIA_LLM_BASE_URL") {
            self.llm.base_url = Some(base_url);
        }
        if let Some(temperature) = get("GUARDIA_LLM_TEMPERATURE") {
            match temperature.trim().parse::<f32>() {
                Ok(t) => self.llm.temperature = Some(t),
                Err(_) => {
                    tracing::warn!(value = %temperature, "Ignoring invalid GUARDIA_LLM_TEMPERATURE");
                },
            }
        }
        if let Some(format) = get("GUARDIA_LOG_FORMAT") {
            self.logging.format = Some(format);
        }
        if let Some(file) = get("GUARDIA_LOG_FILE") {
            self.logging.file = Some(PathBuf::from(file));
        }
        self
    }

    /// Converts a `ConfigFile` to `GuardiaConfig`.
    fn from_config_file(file: ConfigFile) -> Self {
        let mut config = Self::default();

        if let Some(llm) = file.llm {
            if let Some(provider) = llm.provider {
                config.llm.provider = LlmProvider::parse(&provider);
            }
            config.llm.model = llm.model;
            config.llm.api_key = llm
                .api_key
                .and_then(|k| expand_env_reference(&k))
                .map(SecretString::from);
            config.llm.base_url = llm.base_url;
            config.llm.temperature = llm.temperature;
            config.llm.timeout_ms = llm.timeout_ms;
            config.llm.connect_timeout_ms = llm.connect_timeout_ms;
        }
        if let Some(logging) = file.logging {
            config.logging.format = logging.format;
            config.logging.file = logging.file.map(PathBuf::from);
            config.logging.filter = logging.filter;
        }

        config
    }
}

/// Returns `<config_dir>/guardia/config.toml` for this platform.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    directories::BaseDirs::new()
        .map(|dirs| dirs.config_dir().join("guardia").join("config.toml"))
}

/// Resolves `${VAR}` to the variable's value. Other strings pass through.
fn expand_env_reference(value: &str) -> Option<String> {
    let trimmed = value.trim();
    match trimmed
        .strip_prefix("${")
        .and_then(|rest| rest.strip_suffix('}'))
    {
        Some(var) => std::env::var(var).ok().filter(|v| !v.is_empty()),
        None if trimmed.is_empty() => None,
        None => Some(trimmed.to_string()),
    }
}
