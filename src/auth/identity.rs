// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authenticated request identity and bearer token parsing.

use axum::http::{header::AUTHORIZATION, HeaderMap};

use super::{AuthError, TokenPayload, TokenService, UserId};

/// Identity attached to a request that passed authentication.
///
/// Inserted into request extensions by
/// [`require_auth`](super::middleware::require_auth).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedRequest {
    /// Verified token payload
    pub payload: TokenPayload,
    /// The raw bearer token the payload was decoded from
    pub token: String,
}

impl AuthenticatedRequest {
    /// Id of the authenticated user.
    pub fn user_id(&self) -> UserId {
        self.payload.user_id
    }
}

/// Extract the token from an `Authorization: Bearer <token>` header value.
///
/// The value must be exactly two space-separated parts and the scheme must
/// be `Bearer`.
pub fn bearer_token(value: &str) -> Result<&str, AuthError> {
    let mut parts = value.split(' ');
    match (parts.next(), parts.next(), parts.next()) {
        (Some("Bearer"), Some(token), None) if !token.is_empty() => Ok(token),
        _ => Err(AuthError::InvalidAuthHeader),
    }
}

/// Authenticate a request from its headers.
pub fn authenticate(
    headers: &HeaderMap,
    tokens: &TokenService,
) -> Result<AuthenticatedRequest, AuthError> {
    let header = headers
        .get(AUTHORIZATION)
        .ok_or(AuthError::MissingAuthHeader)?
        .to_str()
        .map_err(|_| AuthError::InvalidAuthHeader)?;

    let token = bearer_token(header)?;

    let payload: TokenPayload = tokens.verify_and_decode(token)?;
    payload.validate()?;

    Ok(AuthenticatedRequest {
        payload,
        token: token.to_string(),
    })
}
