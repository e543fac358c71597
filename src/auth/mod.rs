// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Authentication Module
//!
//! Self-issued, self-verified tokens asserting the caller's identity.
//!
//! ## Auth Flow
//!
//! 1. Login checks credentials, then calls [`issue_login_token`]
//! 2. Client sends `Authorization: Bearer <token>` on later requests
//! 3. Server:
//!    - Splits the token into header, payload and signature segments
//!    - Recomputes the HMAC-SHA256 signature and compares in constant time
//!    - Decodes the payload and rejects it once `Expiry` has passed
//!    - Hands the typed [`TokenPayload`] to the handler
//!
//! ## Security
//!
//! - One secret, one algorithm (HS256), expiry-based validity only
//! - The secret and lifespan are fixed once [`TokenService::initialize`] succeeds
//! - Every failure is answered with the same 401 body

pub mod codec;
pub mod error;
pub mod extractor;
pub mod identity;
pub mod login;
pub mod middleware;
pub mod payload;
pub mod service;
pub mod signer;

pub use error::{AuthError, CodecError, InitError, InvalidPayloadError, IssueError, VerifyError};
pub use extractor::{Auth, OptionalAuth};
pub use identity::{authenticate, bearer_token, AuthenticatedRequest};
pub use login::{issue_login_token, LoginTokenError};
pub use middleware::require_auth;
pub use payload::{TokenPayload, UserId};
pub use service::{Clock, FixedClock, SystemClock, TokenService};
