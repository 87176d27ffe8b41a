//! Config CLI command.

use crate::config::GuardiaConfig;
use crate::llm::{DEFAULT_TEMPERATURE, LlmHttpConfig};
use std::io::{self, Write};

/// Writes the effective configuration. The API key is never printed.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn cmd_config_show<W: Write>(writer: &mut W, config: &GuardiaConfig) -> io::Result<()> {
    let http = LlmHttpConfig::from_config(&config.llm);

    writeln!(writer, "Current Configuration")?;
    writeln!(writer, "=====================")?;
    writeln!(writer)?;
    writeln!(
        writer,
        "Config File: {}",
        config
            .source
            .as_ref()
            .map_or_else(|| "(none)".to_string(), |p| p.display().to_string())
    )?;
    writeln!(writer)?;
    writeln!(writer, "LLM Configuration:")?;
    writeln!(writer, "  Provider: {}", config.llm.provider.as_str())?;
    writeln!(
        writer,
        "  Model: {}",
        config.llm.model.as_deref().unwrap_or("(default)")
    )?;
    writeln!(
        writer,
        "  Base URL: {}",
        config.llm.base_url.as_deref().unwrap_or("(default)")
    )?;
    writeln!(
        writer,
        "  API Key: {}",
        if config.llm.api_key.is_some() {
            "(set)"
        } else {
            "(from environment)"
        }
    )?;
    writeln!(
        writer,
        "  Temperature: {}",
        config.llm.temperature.unwrap_or(DEFAULT_TEMPERATURE)
    )?;
    writeln!(writer, "  Timeout: {}ms", http.timeout_ms)?;
    writeln!(writer, "  Connect Timeout: {}ms", http.connect_timeout_ms)?;
    writeln!(writer)?;
    writeln!(writer, "Logging:")?;
    writeln!(
        writer,
        "  Format: {}",
        config.logging.format.as_deref().unwrap_or("pretty")
    )?;
    writeln!(
        writer,
        "  File: {}",
        config
            .logging
            .file
            .as_ref()
            .map_or_else(|| "(stderr)".to_string(), |p| p.display().to_string())
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{LlmConfig, LlmProvider};
    use secrecy::SecretString;

    #[test]
    fn test_show_masks_api_key() {
        let config = GuardiaConfig {
            llm: LlmConfig {
                provider: LlmProvider::OpenAi,
                api_key: Some(SecretString::from("sk-very-secret".to_string())),
                ..Default::default()
            },
            ..Default::default()
        };
        let mut out = Vec::new();
        cmd_config_show(&mut out, &config).unwrap();
        let out = String::from_utf8(out).unwrap();

        assert!(out.contains("Provider: openai"));
        assert!(out.contains("API Key: (set)"));
        assert!(out.contains("Temperature: 0.7"));
        assert!(!out.contains("sk-very-secret"));
    }

    #[test]
    fn test_show_reports_loaded_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "[llm]\nprovider = \"openai\"\n").unwrap();
        let config = GuardiaConfig::load(Some(&path)).unwrap();

        let mut out = Vec::new();
        cmd_config_show(&mut out, &config).unwrap();
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains(&format!("Config File: {}", path.display())));

        let mut out = Vec::new();
        cmd_config_show(&mut out, &GuardiaConfig::default()).unwrap();
        assert!(String::from_utf8(out).unwrap().contains("Config File: (none)"));
    }
}
