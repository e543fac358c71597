// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Axum extractor for authenticated users.
//!
//! Use the `Auth` extractor in handlers to require authentication:
//!
//! ```rust,ignore
//! async fn list_likes(Auth(payload): Auth) -> impl IntoResponse {
//!     // payload.user_id is the caller
//! }
//! ```

use axum::{extract::FromRequestParts, http::request::Parts};

use super::identity::{authenticate, AuthenticatedRequest};
use super::{AuthError, TokenPayload};
use crate::state::AppState;

/// Extractor for authenticated users.
///
/// Reuses the identity stored by the auth middleware when present,
/// otherwise verifies the bearer token itself.
pub struct Auth(pub TokenPayload);

impl FromRequestParts<AppState> for Auth {
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        // First check if middleware already authenticated the request
        if let Some(auth) = parts.extensions.get::<AuthenticatedRequest>() {
            return Ok(Auth(auth.payload.clone()));
        }

        let auth = authenticate(&parts.headers, &state.tokens)?;
        Ok(Auth(auth.payload))
    }
}

/// Optional authentication extractor.
///
/// Returns `None` if no valid authentication is present, instead of rejecting.
pub struct OptionalAuth(pub Option<TokenPayload>);

impl FromRequestParts<AppState> for OptionalAuth {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        match Auth::from_request_parts(parts, state).await {
            Ok(Auth(payload)) => Ok(OptionalAuth(Some(payload))),
            Err(_) => Ok(OptionalAuth(None)),
        }
    }
}
