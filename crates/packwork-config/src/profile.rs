//! Profile selection from the environment.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::Mode;
use crate::error::ConfigError;

/// Environment variable holding the production flag.
pub const PRODUCTION_FLAG_VAR: &str = "isProduction";

/// Value of [`PRODUCTION_FLAG_VAR`] that selects the production profile.
pub const PRODUCTION_SENTINEL: &str = "PRODUCTION";

/// Named configuration profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    #[default]
    Development,
    Production,
}

impl Profile {
    /// Production only for an exact sentinel match; anything else,
    /// including an absent flag, is development.
    pub fn from_flag(flag: Option<&str>) -> Self {
        match flag {
            Some(PRODUCTION_SENTINEL) => Profile::Production,
            _ => Profile::Development,
        }
    }

    /// Read [`PRODUCTION_FLAG_VAR`] from the process environment.
    pub fn from_env() -> Self {
        let flag = std::env::var(PRODUCTION_FLAG_VAR).ok();
        let profile = Self::from_flag(flag.as_deref());
        tracing::debug!(%profile, "selected profile from environment");
        profile
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Profile::Production)
    }

    pub fn mode(&self) -> Mode {
        match self {
            Profile::Development => Mode::Development,
            Profile::Production => Mode::Production,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Profile::Development => "development",
            Profile::Production => "production",
        }
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Profile {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Profile::Development),
            "production" | "prod" => Ok(Profile::Production),
            _ => Err(ConfigError::ProfileNotFound(s.to_string())),
        }
    }
}
