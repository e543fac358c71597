// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! This module defines environment variable names and default values used
//! throughout the application. Configuration is loaded from the environment
//! at startup.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `TOKEN_SECRET` | Secret key for signing and verifying tokens | Required |
//! | `TOKEN_LIFESPAN_HOURS` | Hours a token stays valid after issue | `48` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::fmt;

use chrono::TimeDelta;

/// Environment variable name for the token signing secret.
///
/// Must be non-blank. Changing it invalidates every outstanding token.
pub const TOKEN_SECRET_ENV: &str = "TOKEN_SECRET";

/// Environment variable name for the token lifespan in whole hours.
pub const TOKEN_LIFESPAN_HOURS_ENV: &str = "TOKEN_LIFESPAN_HOURS";

/// Default token lifespan (two days).
pub const DEFAULT_TOKEN_LIFESPAN_HOURS: i64 = 48;

/// Environment variable name for the log output format.
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info,tower_http=debug";

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("TOKEN_SECRET must be set to a non-empty value")]
    MissingSecret,
    #[error("TOKEN_LIFESPAN_HOURS must be a positive number of hours, got {0:?}")]
    InvalidLifespan(String),
}

/// Token service settings.
#[derive(Clone)]
pub struct TokenSettings {
    pub secret: String,
    pub lifespan: TimeDelta,
}

impl TokenSettings {
    /// Load settings from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load settings through `lookup`, which maps a variable name to its value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret = lookup(TOKEN_SECRET_ENV)
            .filter(|s| !s.trim().is_empty())
            .ok_or(ConfigError::MissingSecret)?;

        let lifespan = match lookup(TOKEN_LIFESPAN_HOURS_ENV) {
            None => TimeDelta::hours(DEFAULT_TOKEN_LIFESPAN_HOURS),
            Some(raw) => parse_lifespan_hours(&raw)?,
        };

        Ok(Self { secret, lifespan })
    }
}

fn parse_lifespan_hours(raw: &str) -> Result<TimeDelta, ConfigError> {
    let invalid = || ConfigError::InvalidLifespan(raw.to_string());

    let hours: i64 = raw.trim().parse().map_err(|_| invalid())?;
    if hours <= 0 {
        return Err(invalid());
    }
    TimeDelta::try_hours(hours).ok_or_else(invalid)
}

impl fmt::Debug for TokenSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenSettings")
            .field("secret", &"<redacted>")
            .field("lifespan", &self.lifespan)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn defaults_lifespan_to_48_hours() {
        let settings = TokenSettings::from_lookup(lookup(&[(TOKEN_SECRET_ENV, "s3cr3t")])).unwrap();
        assert_eq!(settings.secret, "s3cr3t");
        assert_eq!(settings.lifespan, TimeDelta::hours(48));
    }

    #[test]
    fn reads_lifespan_hours() {
        let settings = TokenSettings::from_lookup(lookup(&[
            (TOKEN_SECRET_ENV, "s3cr3t"),
            (TOKEN_LIFESPAN_HOURS_ENV, " 12 "),
        ]))
        .unwrap();
        assert_eq!(settings.lifespan, TimeDelta::hours(12));
    }

    #[test]
    fn secret_is_required() {
        assert_eq!(
            TokenSettings::from_lookup(lookup(&[])).unwrap_err(),
            ConfigError::MissingSecret
        );
        assert_eq!(
            TokenSettings::from_lookup(lookup(&[(TOKEN_SECRET_ENV, "  ")])).unwrap_err(),
            ConfigError::MissingSecret
        );
    }

    #[test]
    fn rejects_bad_lifespans() {
        for raw in ["0", "-4", "two", "", "1.5", "9223372036854775807"] {
            let result = TokenSettings::from_lookup(lookup(&[
                (TOKEN_SECRET_ENV, "s3cr3t"),
                (TOKEN_LIFESPAN_HOURS_ENV, raw),
            ]));
            assert_eq!(
                result.unwrap_err(),
                ConfigError::InvalidLifespan(raw.to_string()),
                "{raw:?} should be rejected"
            );
        }
    }

    #[test]
    fn debug_output_hides_the_secret() {
        let settings = TokenSettings::from_lookup(lookup(&[(TOKEN_SECRET_ENV, "s3cr3t")])).unwrap();
        assert!(!format!("{settings:?}").contains("s3cr3t"));
    }
}
