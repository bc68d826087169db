//! Bridge configuration file parsing.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid bridge config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Which accessor strategy wrappers are built with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessKind {
    /// Whatever the process-wide default slot holds.
    Default,
    /// Zero-arity members read as properties only when backed by a field or a writer.
    Attribute,
}

/// Ordering of the ids reported by `get_ids`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdOrder {
    /// Native ids first, most recently defined first, then host members.
    Compat,
    /// Native ids first in definition order, then host members.
    Source,
}

/// Complete bridge configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BridgeConfig {
    /// Tag naming the host ecosystem in `[tag ClassName]` renderings.
    pub tag: String,
    pub access: AccessKind,
    pub id_order: IdOrder,
}

#[derive(Deserialize, Default)]
struct ConfigFile {
    #[serde(default)]
    bridge: BridgeConfig,
}

impl BridgeConfig {
    pub fn new() -> Self {
        BridgeConfig {
            tag: "rust".to_string(),
            access: AccessKind::Default,
            id_order: IdOrder::Compat,
        }
    }

    /// Load configuration from a TOML file.
    ///
    /// Expected format:
    /// ```toml
    /// [bridge]
    /// tag = "rust"
    /// access = "default"    # or "attribute"
    /// id_order = "compat"   # or "source"
    /// ```
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let config = Self::parse(&content)?;
        debug!(path = %path.display(), ?config, "loaded bridge config");
        Ok(config)
    }

    /// Parse configuration from a TOML string. Missing keys keep their defaults.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile = toml::from_str(content)?;
        Ok(file.bridge)
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn with_access(mut self, access: AccessKind) -> Self {
        self.access = access;
        self
    }

    pub fn with_id_order(mut self, id_order: IdOrder) -> Self {
        self.id_order = id_order;
        self
    }
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_config() {
        let config = BridgeConfig::parse("").unwrap();
        assert_eq!(config, BridgeConfig::new());
        assert_eq!(config.tag, "rust");
        assert_eq!(config.access, AccessKind::Default);
        assert_eq!(config.id_order, IdOrder::Compat);
    }

    #[test]
    fn test_parse_full_config() {
        let config = BridgeConfig::parse(
            r#"
            [bridge]
            tag = "host"
            access = "attribute"
            id_order = "source"
            "#,
        )
        .unwrap();
        assert_eq!(config.tag, "host");
        assert_eq!(config.access, AccessKind::Attribute);
        assert_eq!(config.id_order, IdOrder::Source);
    }

    #[test]
    fn test_parse_partial_config_keeps_defaults() {
        let config = BridgeConfig::parse("[bridge]\nid_order = \"source\"\n").unwrap();
        assert_eq!(config.tag, "rust");
        assert_eq!(config.id_order, IdOrder::Source);
    }

    #[test]
    fn test_unknown_access_is_rejected() {
        let result = BridgeConfig::parse("[bridge]\naccess = \"reflective\"\n");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let result = BridgeConfig::parse("[bridge]\ncolour = \"blue\"\n");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_missing_file() {
        let result = BridgeConfig::load(Path::new("/nonexistent/bridge.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
