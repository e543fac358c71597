// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use crate::auth::{InitError, TokenService};
use crate::config::TokenSettings;

#[derive(Clone)]
pub struct AppState {
    pub tokens: Arc<TokenService>,
}

impl AppState {
    pub fn new(tokens: Arc<TokenService>) -> Self {
        Self { tokens }
    }

    /// Build the state with a token service initialized from `settings`.
    pub fn from_settings(settings: &TokenSettings) -> Result<Self, InitError> {
        let tokens = TokenService::new();
        tokens.initialize(&settings.secret, settings.lifespan)?;
        Ok(Self::new(Arc::new(tokens)))
    }
}

impl Default for AppState {
    /// State with an uninitialized token service.
    fn default() -> Self {
        Self::new(Arc::new(TokenService::new()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;

    #[test]
    fn from_settings_initializes_tokens() {
        let settings = TokenSettings {
            secret: "s3cr3t".to_string(),
            lifespan: TimeDelta::hours(2),
        };
        let state = AppState::from_settings(&settings).unwrap();
        assert!(state.tokens.is_initialized());
        assert_eq!(state.tokens.lifespan(), Some(TimeDelta::hours(2)));
    }

    #[test]
    fn from_settings_propagates_init_errors() {
        let settings = TokenSettings {
            secret: "s3cr3t".to_string(),
            lifespan: TimeDelta::zero(),
        };
        assert_eq!(
            AppState::from_settings(&settings).err(),
            Some(InitError::NonPositiveLifespan)
        );
    }

    #[test]
    fn clones_share_one_service() {
        let state = AppState::default();
        let clone = state.clone();
        assert!(Arc::ptr_eq(&state.tokens, &clone.tokens));
        assert!(!clone.tokens.is_initialized());
    }
}
