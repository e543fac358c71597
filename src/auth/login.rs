// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Token issuing for a user whose credentials were already checked.

use super::{InvalidPayloadError, IssueError, TokenPayload, TokenService, UserId};

/// Errors returned by [`issue_login_token`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoginTokenError {
    #[error("error creating payload for token: {0}")]
    InvalidPayload(#[from] InvalidPayloadError),
    #[error("error creating token: {0}")]
    Issue(#[from] IssueError),
}

/// Build the identity payload for `user_id`/`email` and issue a token for it.
pub fn issue_login_token(
    tokens: &TokenService,
    user_id: UserId,
    email: &str,
) -> Result<String, LoginTokenError> {
    let payload = TokenPayload::new(user_id, email)?;
    let token = tokens.issue(&payload)?;

    tracing::info!(user_id = %user_id, "issued login token");
    Ok(token)
}
