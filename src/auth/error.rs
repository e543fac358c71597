// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authentication errors.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Segment encoding, decoding and splitting failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    #[error("could not encode token segment: {0}")]
    Encoding(String),
    #[error("could not decode token segment: {0}")]
    Decoding(String),
    #[error("invalid number of token segments: expected 3 non-empty, got {segments}")]
    MalformedToken { segments: usize },
}

/// Failures of [`TokenService::initialize`](super::TokenService::initialize).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InitError {
    #[error("token service is already initialized")]
    AlreadyInitialized,
    #[error("secret key cannot be empty")]
    EmptySecret,
    #[error("lifespan must be positive")]
    NonPositiveLifespan,
}

/// Failures while issuing a token.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IssueError {
    #[error("token service is not initialized")]
    NotInitialized,
    #[error("could not encode token: {0}")]
    Encoding(String),
    /// `now + lifespan` does not fit in a timestamp.
    #[error("token expiry is out of range")]
    ExpiryOutOfRange,
}

/// Failures while verifying and decoding a token.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VerifyError {
    #[error("token service is not initialized")]
    NotInitialized,
    #[error("token is malformed: {0}")]
    MalformedToken(String),
    #[error("token signature verification failed")]
    SignatureMismatch,
    #[error("could not decode token: {0}")]
    Decoding(String),
    #[error("token has expired")]
    Expired,
}

impl VerifyError {
    /// Short code for logs. Never sent to clients.
    pub fn reason_code(&self) -> &'static str {
        match self {
            VerifyError::NotInitialized => "not_initialized",
            VerifyError::MalformedToken(_) => "malformed_token",
            VerifyError::SignatureMismatch => "signature_mismatch",
            VerifyError::Decoding(_) => "decoding_error",
            VerifyError::Expired => "token_expired",
        }
    }
}

impl From<CodecError> for IssueError {
    fn from(e: CodecError) -> Self {
        IssueError::Encoding(e.to_string())
    }
}

impl From<CodecError> for VerifyError {
    fn from(e: CodecError) -> Self {
        match e {
            CodecError::MalformedToken { .. } => VerifyError::MalformedToken(e.to_string()),
            CodecError::Encoding(msg) | CodecError::Decoding(msg) => VerifyError::Decoding(msg),
        }
    }
}

/// A token payload field failed validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid token payload: {field} {reason}")]
pub struct InvalidPayloadError {
    /// Name of the offending field.
    pub field: &'static str,
    /// What is wrong with it.
    pub reason: &'static str,
}

/// Request authentication error.
///
/// Every variant renders the same 401 body so callers cannot tell a bad
/// signature from an expired token or a missing header. The specific
/// cause is only available through [`AuthError::error_code`] for logging.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// No authorization header present
    #[error("Authorization header is required")]
    MissingAuthHeader,
    /// Header present but not `Bearer <token>`
    #[error("Invalid authorization header format (expected 'Bearer <token>')")]
    InvalidAuthHeader,
    /// Token failed verification
    #[error(transparent)]
    InvalidToken(#[from] VerifyError),
    /// Token verified but carried an unusable payload
    #[error(transparent)]
    InvalidPayload(#[from] InvalidPayloadError),
}

/// Message returned for every authentication failure.
pub const UNAUTHENTICATED_MESSAGE: &str = "Not authenticated";

/// Error code returned for every authentication failure.
pub const UNAUTHENTICATED_CODE: &str = "unauthenticated";

#[derive(Serialize)]
struct AuthErrorBody {
    error: &'static str,
    error_code: &'static str,
}

impl AuthError {
    /// Get the internal error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::MissingAuthHeader => "missing_auth_header",
            AuthError::InvalidAuthHeader => "invalid_auth_header",
            AuthError::InvalidToken(e) => e.reason_code(),
            AuthError::InvalidPayload(_) => "invalid_payload",
        }
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        StatusCode::UNAUTHORIZED
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        tracing::debug!(reason = self.error_code(), error = %self, "request authentication failed");

        let body = Json(AuthErrorBody {
            error: UNAUTHENTICATED_MESSAGE,
            error_code: UNAUTHENTICATED_CODE,
        });
        (self.status_code(), body).into_response()
    }
}
