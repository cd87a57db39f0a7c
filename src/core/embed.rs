use rust_embed::RustEmbed;
use std::str;

use crate::error::{CliError, Result};

const DEFAULT_CONFIG_NAME: &str = "default.toml";

#[derive(Debug, RustEmbed)]
#[folder = "config/"]
pub struct EmbeddedConfig;

impl EmbeddedConfig {
    pub fn get_config_string() -> Result<String> {
        match Self::get(DEFAULT_CONFIG_NAME) {
            Some(file) => {
                let content = str::from_utf8(&file.data).map_err(|e| {
                    CliError::Config(config::ConfigError::Message(format!(
                        "embedded config contains invalid UTF-8: {e}"
                    )))
                })?;
                Ok(content.to_string())
            }
            None => Err(CliError::Config(config::ConfigError::NotFound(
                DEFAULT_CONFIG_NAME.to_string(),
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_default_is_present() {
        let content = EmbeddedConfig::get_config_string().unwrap();
        assert!(content.contains("[copyright]"));
        assert!(content.contains("[version]"));
    }
}
