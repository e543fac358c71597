// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Identity payload carried inside tokens.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::InvalidPayloadError;

/// Primary key of a user record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub i64);

impl UserId {
    /// Ids start at 1.
    pub fn validate(self) -> Result<(), InvalidPayloadError> {
        if self.0 < 1 {
            return Err(InvalidPayloadError {
                field: "UserID",
                reason: "must be a positive number",
            });
        }
        Ok(())
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity of the caller a token is issued to.
///
/// Serialized as `{"UserID": .., "Email": ..}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPayload {
    #[serde(rename = "UserID")]
    pub user_id: UserId,
    #[serde(rename = "Email")]
    pub email: String,
}

impl TokenPayload {
    /// Build a payload, rejecting a non-positive id or a blank email.
    pub fn new(user_id: UserId, email: impl Into<String>) -> Result<Self, InvalidPayloadError> {
        let payload = Self {
            user_id,
            email: email.into(),
        };
        payload.validate()?;
        Ok(payload)
    }

    /// Check the same invariants as [`TokenPayload::new`].
    ///
    /// Used on decoded payloads, which bypass the constructor.
    pub fn validate(&self) -> Result<(), InvalidPayloadError> {
        self.user_id.validate()?;
        if self.email.trim().is_empty() {
            return Err(InvalidPayloadError {
                field: "Email",
                reason: "cannot be blank",
            });
        }
        Ok(())
    }
}
