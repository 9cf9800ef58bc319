//! TOML configuration loader
//!
//! ```toml
//! [session]
//! target = 25
//! announce = true
//! rate = "game"        # fastest | game | ui | normal
//!
//! [classifier]
//! noise_threshold = 2.0
//! stop_deadband = 0.01
//! ```
//!
//! Every table and key is optional; missing values take their defaults.

use super::types::{ConfigError, ConfigFile, SessionConfig};

/// Parse and validate a TOML session configuration
pub fn parse_config(input: &str) -> Result<SessionConfig, ConfigError> {
    let file: ConfigFile = ::toml::from_str(input).map_err(|e| ConfigError::Syntax {
        offset: e.span().map(|span| span.start),
    })?;

    let config = SessionConfig::from(file);
    config.validate()?;

    debug!("Parsed session config (target {})", config.target);
    Ok(config)
}

impl SessionConfig {
    /// Parse a configuration from TOML text
    pub fn from_toml(input: &str) -> Result<Self, ConfigError> {
        parse_config(input)
    }
}
