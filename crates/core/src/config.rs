//! Codec configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `COMMUNIBASE_PHONE_REGION` - Default region for phone numbers (default: NL)
//! - `COMMUNIBASE_PHONE_FORMAT` - Default phone format template (default: `c (a) s`)

use thiserror::Error;

use crate::phone::{DEFAULT_FORMAT, DutchNumberPlan, plan_for_region};

const REGION_VAR: &str = "COMMUNIBASE_PHONE_REGION";
const FORMAT_VAR: &str = "COMMUNIBASE_PHONE_FORMAT";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Unsupported phone region: {0}")]
    UnsupportedRegion(String),
}

/// Phone codec configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecConfig {
    /// Region whose numbering plan decomposes national numbers
    pub region: String,
    /// Template used when formatting without an explicit template
    pub default_format: String,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            region: DutchNumberPlan::REGION.to_string(),
            default_format: DEFAULT_FORMAT.to_string(),
        }
    }
}

impl CodecConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the region is not supported or the format
    /// template is blank.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let config = Self {
            region: get_env_or_default(REGION_VAR, DutchNumberPlan::REGION),
            default_format: get_env_or_default(FORMAT_VAR, DEFAULT_FORMAT),
        };
        config.validate()?;
        Ok(config)
    }

    /// Check that the configuration can be used to build a codec.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the region is not supported or the format
    /// template is blank.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_format.trim().is_empty() {
            return Err(ConfigError::InvalidEnvVar(
                FORMAT_VAR.to_string(),
                "format template cannot be blank".to_string(),
            ));
        }
        self.number_plan().map(|_| ())
    }

    /// The numbering plan for the configured region.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnsupportedRegion`] for any region but `NL`.
    pub fn number_plan(&self) -> Result<DutchNumberPlan, ConfigError> {
        plan_for_region(&self.region).ok_or_else(|| ConfigError::UnsupportedRegion(self.region.clone()))
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::phone::{PhoneNumberCodec, PhoneNumberParts};

    #[test]
    fn test_default_config_is_valid() {
        let config = CodecConfig::default();
        assert_eq!(config.region, "NL");
        assert_eq!(config.default_format, "c (a) s");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_unsupported_region() {
        let config = CodecConfig {
            region: "BE".to_string(),
            ..CodecConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::UnsupportedRegion("BE".to_string()))
        );
        assert!(PhoneNumberCodec::from_config(&config).is_err());
    }

    #[test]
    fn test_blank_format() {
        let config = CodecConfig {
            default_format: "  ".to_string(),
            ..CodecConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidEnvVar(_, _))
        ));
    }

    #[test]
    fn test_codec_from_config_uses_default_format() {
        let config = CodecConfig {
            region: "nl".to_string(),
            default_format: "cas".to_string(),
        };
        let codec = PhoneNumberCodec::from_config(&config).unwrap();
        let parts = PhoneNumberParts::new("31", "20", "1234567");
        assert_eq!(codec.format(&parts, None), "+31201234567");
        assert_eq!(codec.plan().region(), "NL");
    }
}
