// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Token segment encoding.
//!
//! A segment is the standard (padded) base64 of the JSON bytes of a value.
//! serde_json writes struct fields in declaration order, so the bytes a
//! signature is computed over are stable between issue and verify.

use base64ct::{Base64, Encoding};
use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use super::error::CodecError;

/// Separator between the three token segments.
pub const SEGMENT_SEPARATOR: char = '.';

/// Token type tag carried in every header.
pub const HEADER_TYP: &str = "JWT";

/// Signing algorithm tag carried in every header.
pub const HEADER_ALG: &str = "HS256";

/// Fixed token header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    pub typ: String,
    pub alg: String,
}

impl Header {
    /// True when both tags match the single scheme this crate signs with.
    pub fn is_supported(&self) -> bool {
        self.typ == HEADER_TYP && self.alg == HEADER_ALG
    }
}

impl Default for Header {
    fn default() -> Self {
        Self {
            typ: HEADER_TYP.to_string(),
            alg: HEADER_ALG.to_string(),
        }
    }
}

/// Token body: caller data plus the absolute expiry.
///
/// `Expiry` is serialized as an RFC 3339 UTC timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Payload<T> {
    pub data: T,
    pub expiry: DateTime<Utc>,
}

/// Serialize `value` to JSON and encode it as one base64 segment.
pub fn encode_segment<T: Serialize>(value: &T) -> Result<String, CodecError> {
    let bytes = serde_json::to_vec(value).map_err(|e| CodecError::Encoding(e.to_string()))?;
    Ok(Base64::encode_string(&bytes))
}

/// Decode one base64 segment into `T`.
///
/// Fails when the base64 is malformed or the JSON does not have `T`'s shape.
pub fn decode_segment<T: DeserializeOwned>(segment: &str) -> Result<T, CodecError> {
    let bytes = Base64::decode_vec(segment)
        .map_err(|e| CodecError::Decoding(format!("invalid base64: {e}")))?;
    serde_json::from_slice(&bytes).map_err(|e| CodecError::Decoding(e.to_string()))
}

/// Split a token into its header, payload and signature segments.
pub fn split_token(token: &str) -> Result<(&str, &str, &str), CodecError> {
    let parts: Vec<&str> = token.split(SEGMENT_SEPARATOR).collect();

    match parts.as_slice() {
        [header, payload, signature]
            if !header.is_empty() && !payload.is_empty() && !signature.is_empty() =>
        {
            Ok((*header, *payload, *signature))
        }
        _ => Err(CodecError::MalformedToken {
            segments: parts.len(),
        }),
    }
}
