//! Session configuration types

use core::fmt;

use repcount_core::config::{ClassifierConfig, ConfigFault};
use serde::{Deserialize, Serialize};

use crate::traits::SampleRate;

/// Default repetition target
pub const DEFAULT_TARGET: u32 = 20;

/// Largest selectable repetition target
pub const MAX_TARGET: u32 = 100;

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Malformed TOML or a value of the wrong type
    Syntax {
        /// Byte offset of the offending input, when known
        offset: Option<usize>,
    },
    /// Noise threshold is negative or not finite
    InvalidNoiseThreshold,
    /// Stop deadband is negative or not finite
    InvalidDeadband,
    /// Target count above [`MAX_TARGET`]
    TargetOutOfRange,
}

impl From<ConfigFault> for ConfigError {
    fn from(fault: ConfigFault) -> Self {
        match fault {
            ConfigFault::NoiseThreshold => ConfigError::InvalidNoiseThreshold,
            ConfigFault::StopDeadband => ConfigError::InvalidDeadband,
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Syntax { offset: Some(offset) } => {
                write!(f, "invalid configuration at byte {}", offset)
            }
            ConfigError::Syntax { offset: None } => f.write_str("invalid configuration"),
            ConfigError::InvalidNoiseThreshold => {
                f.write_str("noise threshold must be finite and non-negative")
            }
            ConfigError::InvalidDeadband => {
                f.write_str("stop deadband must be finite and non-negative")
            }
            ConfigError::TargetOutOfRange => write!(f, "target must be at most {}", MAX_TARGET),
        }
    }
}

/// Session settings
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SessionConfig {
    /// Stop counting once this many repetitions are reached
    pub target: u32,
    /// Speak each count aloud
    pub announce: bool,
    /// Sensor delivery rate requested on start
    pub rate: SampleRate,
    /// Classifier noise suppression
    pub classifier: ClassifierConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            target: DEFAULT_TARGET,
            announce: false,
            rate: SampleRate::Game,
            classifier: ClassifierConfig::default(),
        }
    }
}

impl SessionConfig {
    /// Check all values are within range
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.target > MAX_TARGET {
            return Err(ConfigError::TargetOutOfRange);
        }
        self.classifier.validate()?;
        Ok(())
    }
}

/// `[session]` table of the configuration file
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct SessionSection {
    pub target: u32,
    pub announce: bool,
    pub rate: SampleRate,
}

impl Default for SessionSection {
    fn default() -> Self {
        let defaults = SessionConfig::default();
        Self {
            target: defaults.target,
            announce: defaults.announce,
            rate: defaults.rate,
        }
    }
}

/// Whole configuration file
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct ConfigFile {
    pub session: SessionSection,
    pub classifier: ClassifierConfig,
}

impl From<ConfigFile> for SessionConfig {
    fn from(file: ConfigFile) -> Self {
        Self {
            target: file.session.target,
            announce: file.session.announce,
            rate: file.session.rate,
            classifier: file.classifier,
        }
    }
}
