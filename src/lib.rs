// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! MatchAPI Server - Token Authentication Core
//!
//! Signed, expiring identity tokens for the MatchAPI backend and the Axum
//! glue that authenticates requests with them.
//!
//! ## Modules
//!
//! - `auth` - Token codec, signer, service, identity payload and request authentication
//! - `config` - Environment variables and token settings
//! - `error` - JSON API errors
//! - `state` - Shared application state
//! - `telemetry` - Tracing subscriber setup

pub mod auth;
pub mod config;
pub mod error;
pub mod state;
pub mod telemetry;
