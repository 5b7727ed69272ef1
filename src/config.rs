//! Transcoding configuration.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::encode::OptionalShape;
use crate::model::leaves::NetworkId;

/// Vector name used when none is given.
pub const DEFAULT_VECTOR_NAME: &str = "complex_zkapp_command";

/// The single document name that selects the proper variant.
pub const PROPER_DISCRIMINANT: &str = "multiple_account_updates";

/// Invalid configuration values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A setting was given a value it does not know.
    #[error("unknown {setting} '{value}'")]
    UnknownValue {
        /// Setting name.
        setting: &'static str,
        /// Rejected value.
        value: String,
    },
}

/// Target schema variant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaVariant {
    /// Mainnet, expected hashes all canonical zero.
    #[default]
    Simple,
    /// Testnet, expected hashes read from the document.
    Proper,
}

impl SchemaVariant {
    /// Variant implied by a vector name.
    pub fn from_name(name: &str) -> Self {
        if name == PROPER_DISCRIMINANT {
            Self::Proper
        } else {
            Self::Simple
        }
    }

    /// Network the variant targets.
    pub fn network(self) -> NetworkId {
        match self {
            Self::Simple => NetworkId::Mainnet,
            Self::Proper => NetworkId::Testnet,
        }
    }
}

impl fmt::Display for SchemaVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Simple => write!(f, "simple"),
            Self::Proper => write!(f, "proper"),
        }
    }
}

impl FromStr for SchemaVariant {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "simple" => Ok(Self::Simple),
            "proper" => Ok(Self::Proper),
            _ => Err(ConfigError::UnknownValue {
                setting: "schema variant",
                value: s.to_string(),
            }),
        }
    }
}

/// Settings for one transcoding run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TranscodeConfig {
    /// Shape of every optional value in the record.
    pub optional_shape: OptionalShape,
    /// Target schema variant.
    pub variant: SchemaVariant,
    /// Test-vector name.
    pub name: String,
}

impl Default for TranscodeConfig {
    fn default() -> Self {
        Self {
            optional_shape: OptionalShape::Tagged,
            variant: SchemaVariant::Simple,
            name: DEFAULT_VECTOR_NAME.to_string(),
        }
    }
}

impl TranscodeConfig {
    /// Config for a named vector, variant taken from the name.
    pub fn for_name(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            variant: SchemaVariant::from_name(&name),
            name,
            ..Self::default()
        }
    }

    /// Create config from environment variables.
    ///
    /// `ZKAPP_VECTOR_NAME`, `ZKAPP_SCHEMA_VARIANT` (`simple` | `proper`) and
    /// `ZKAPP_OPTIONAL_SHAPE` (`tagged` | `flagged`). An explicit variant wins
    /// over the one implied by the name.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_named(None)
    }

    /// Like [`from_env`](Self::from_env), with `name` replacing `ZKAPP_VECTOR_NAME`.
    pub fn from_env_named(name: Option<String>) -> Result<Self, ConfigError> {
        Self::resolve(
            name.or_else(|| std::env::var("ZKAPP_VECTOR_NAME").ok()),
            std::env::var("ZKAPP_SCHEMA_VARIANT").ok().as_deref(),
            std::env::var("ZKAPP_OPTIONAL_SHAPE").ok().as_deref(),
        )
    }

    /// Build from raw setting values. The name only decides the variant when
    /// no variant is given.
    pub fn resolve(
        name: Option<String>,
        variant: Option<&str>,
        shape: Option<&str>,
    ) -> Result<Self, ConfigError> {
        let mut config = match name {
            Some(name) => Self::for_name(name),
            None => Self::default(),
        };
        if let Some(variant) = variant {
            config.variant = variant.parse()?;
        }
        if let Some(shape) = shape {
            config.optional_shape = shape.parse()?;
        }
        Ok(config)
    }

    /// Network the configured variant targets.
    pub fn network(&self) -> NetworkId {
        self.variant.network()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TranscodeConfig::default();
        assert_eq!(config.optional_shape, OptionalShape::Tagged);
        assert_eq!(config.variant, SchemaVariant::Simple);
        assert_eq!(config.name, DEFAULT_VECTOR_NAME);
        assert_eq!(config.network(), NetworkId::Mainnet);
    }

    #[test]
    fn test_discriminant_selects_proper() {
        assert_eq!(SchemaVariant::from_name("multiple_account_updates"), SchemaVariant::Proper);
        assert_eq!(SchemaVariant::from_name("Multiple_Account_Updates"), SchemaVariant::Simple);
        assert_eq!(SchemaVariant::from_name("single_account_update"), SchemaVariant::Simple);

        let config = TranscodeConfig::for_name(PROPER_DISCRIMINANT);
        assert_eq!(config.variant, SchemaVariant::Proper);
        assert_eq!(config.network(), NetworkId::Testnet);
    }

    #[test]
    fn test_variant_parse() {
        assert_eq!("PROPER".parse::<SchemaVariant>().unwrap(), SchemaVariant::Proper);
        assert_eq!(
            "fancy".parse::<SchemaVariant>(),
            Err(ConfigError::UnknownValue {
                setting: "schema variant",
                value: "fancy".to_string()
            })
        );
    }

    #[test]
    fn test_explicit_variant_beats_name() {
        let config =
            TranscodeConfig::resolve(Some(PROPER_DISCRIMINANT.to_string()), Some("simple"), None)
                .unwrap();
        assert_eq!(config.name, PROPER_DISCRIMINANT);
        assert_eq!(config.variant, SchemaVariant::Simple);
        assert_eq!(config.network(), NetworkId::Mainnet);

        let config =
            TranscodeConfig::resolve(Some(PROPER_DISCRIMINANT.to_string()), None, None).unwrap();
        assert_eq!(config.variant, SchemaVariant::Proper);

        let config = TranscodeConfig::resolve(None, Some("proper"), Some("flagged")).unwrap();
        assert_eq!(config.name, DEFAULT_VECTOR_NAME);
        assert_eq!(config.variant, SchemaVariant::Proper);
        assert_eq!(config.optional_shape, OptionalShape::Flagged);
    }

    #[test]
    fn test_resolve_rejects_unknown_values() {
        assert!(TranscodeConfig::resolve(None, Some("fancy"), None).is_err());
        assert!(TranscodeConfig::resolve(None, None, Some("both")).is_err());
    }
}
