// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Token issuing and verification.
//!
//! ## Token Format
//!
//! ```text
//! base64(header) "." base64(payload) "." base64(hmac_sha256(secret, base64(header) "." base64(payload)))
//! ```
//!
//! The service starts uninitialized and is initialized exactly once with a
//! secret and a lifespan. After that it is read-only and can be shared
//! across request handlers behind an `Arc`.

use std::fmt;
use std::sync::{Arc, OnceLock};

use chrono::{DateTime, TimeDelta, Utc};
use serde::{de::DeserializeOwned, Serialize};

use super::codec::{self, Header, Payload};
use super::error::{InitError, IssueError, VerifyError};
use super::signer;

/// Source of the current time.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock frozen at a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Key material set by [`TokenService::initialize`].
struct SigningKeys {
    secret: Vec<u8>,
    lifespan: TimeDelta,
}

impl fmt::Debug for SigningKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningKeys")
            .field("secret", &"<redacted>")
            .field("lifespan", &self.lifespan)
            .finish()
    }
}

/// Issues and verifies signed, expiring tokens.
pub struct TokenService {
    keys: OnceLock<SigningKeys>,
    clock: Arc<dyn Clock>,
}

impl TokenService {
    /// Create an uninitialized service reading the wall clock.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Create an uninitialized service reading `clock`.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            keys: OnceLock::new(),
            clock,
        }
    }

    /// Set the secret key and token lifespan.
    ///
    /// Can succeed only once per service. Concurrent callers race on a
    /// single slot: exactly one wins, the others get
    /// [`InitError::AlreadyInitialized`] and the winner's key stays in effect.
    pub fn initialize(&self, secret: &str, lifespan: TimeDelta) -> Result<(), InitError> {
        if self.keys.get().is_some() {
            return Err(InitError::AlreadyInitialized);
        }
        if secret.trim().is_empty() {
            return Err(InitError::EmptySecret);
        }
        if lifespan <= TimeDelta::zero() {
            return Err(InitError::NonPositiveLifespan);
        }

        self.keys
            .set(SigningKeys {
                secret: secret.as_bytes().to_vec(),
                lifespan,
            })
            .map_err(|_| InitError::AlreadyInitialized)?;

        tracing::info!(
            lifespan_secs = lifespan.num_seconds(),
            "token service initialized"
        );
        Ok(())
    }

    /// Whether [`initialize`](Self::initialize) has succeeded.
    pub fn is_initialized(&self) -> bool {
        self.keys.get().is_some()
    }

    /// Configured token lifespan, if initialized.
    pub fn lifespan(&self) -> Option<TimeDelta> {
        self.keys.get().map(|k| k.lifespan)
    }

    /// Issue a token carrying `data`, expiring one lifespan from now.
    pub fn issue<T: Serialize>(&self, data: &T) -> Result<String, IssueError> {
        self.issue_at(data, self.clock.now())
    }

    /// Issue a token as if the current time were `now`.
    pub fn issue_at<T: Serialize>(&self, data: &T, now: DateTime<Utc>) -> Result<String, IssueError> {
        let keys = self.keys.get().ok_or(IssueError::NotInitialized)?;

        let expiry = now
            .checked_add_signed(keys.lifespan)
            .ok_or(IssueError::ExpiryOutOfRange)?;

        let header_seg = codec::encode_segment(&Header::default())?;
        let payload_seg = codec::encode_segment(&Payload { data, expiry })?;
        let signature_seg = signer::sign_segment(&keys.secret, &header_seg, &payload_seg);

        tracing::debug!(%expiry, "issued token");

        Ok(format!("{header_seg}.{payload_seg}.{signature_seg}"))
    }

    /// Verify `token` and decode its data into `T`.
    pub fn verify_and_decode<T: DeserializeOwned>(&self, token: &str) -> Result<T, VerifyError> {
        self.verify_and_decode_at(token, self.clock.now())
    }

    /// Verify `token` as if the current time were `now`.
    ///
    /// Checks run in order: segment split, signature, decoding, expiry.
    /// Nothing is decoded before the signature has been checked.
    pub fn verify_and_decode_at<T: DeserializeOwned>(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<T, VerifyError> {
        let result = self.verify_inner(token, now);
        if let Err(ref e) = result {
            tracing::debug!(reason = e.reason_code(), "token verification failed");
        }
        result
    }

    fn verify_inner<T: DeserializeOwned>(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<T, VerifyError> {
        let keys = self.keys.get().ok_or(VerifyError::NotInitialized)?;

        let (header_seg, payload_seg, signature_seg) = codec::split_token(token)?;

        let expected = signer::sign_segment(&keys.secret, header_seg, payload_seg);
        if !signer::verify_equal(expected.as_bytes(), signature_seg.as_bytes()) {
            return Err(VerifyError::SignatureMismatch);
        }

        let header: Header = codec::decode_segment(header_seg)?;
        if !header.is_supported() {
            return Err(VerifyError::Decoding(format!(
                "unsupported token header {}/{}",
                header.typ, header.alg
            )));
        }

        let payload: Payload<T> = codec::decode_segment(payload_seg)?;
        if payload.expiry <= now {
            return Err(VerifyError::Expired);
        }

        Ok(payload.data)
    }
}

impl Default for TokenService {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenService")
            .field("keys", &self.keys.get())
            .finish_non_exhaustive()
    }
}
