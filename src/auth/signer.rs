// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! HMAC-SHA256 signing of `header.payload`.
//!
//! Pure functions; the key is supplied by the caller on every call.

use base64ct::{Base64, Encoding};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use super::codec::SEGMENT_SEPARATOR;

type HmacSha256 = Hmac<Sha256>;

/// Length of an HMAC-SHA256 tag in bytes.
pub const SIGNATURE_LEN: usize = 32;

/// Compute HMAC-SHA256 of `message` under `secret`.
///
/// Returns the bare tag; the message is never prepended to it.
pub fn sign(secret: &[u8], message: &[u8]) -> [u8; SIGNATURE_LEN] {
    // new_from_slice only reports InvalidLength, which HMAC never returns
    let mut mac = HmacSha256::new_from_slice(secret)
        .unwrap_or_else(|_| unreachable!("HMAC accepts keys of any length"));
    mac.update(message);

    let mut tag = [0u8; SIGNATURE_LEN];
    tag.copy_from_slice(&mac.finalize().into_bytes());
    tag
}

/// Base64 signature segment over `header_seg "." payload_seg`.
pub fn sign_segment(secret: &[u8], header_seg: &str, payload_seg: &str) -> String {
    let message = format!("{header_seg}{SEGMENT_SEPARATOR}{payload_seg}");
    Base64::encode_string(&sign(secret, message.as_bytes()))
}

/// Constant-time equality.
///
/// Slices of different length compare unequal; for equal lengths the running
/// time does not depend on where the first differing byte is.
pub fn verify_equal(a: &[u8], b: &[u8]) -> bool {
    a.ct_eq(b).into()
}
