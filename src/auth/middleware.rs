// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authentication middleware for Axum.
//!
//! Applies authentication to a whole router subtree. Authenticated requests
//! carry an [`AuthenticatedRequest`] in their extensions, which the
//! [`Auth`](super::Auth) extractor picks up without verifying again.
//!
//! ```rust,ignore
//! let app = Router::new()
//!     .route("/v1/likes", get(list_likes))
//!     .layer(axum::middleware::from_fn_with_state(state.clone(), require_auth))
//!     .with_state(state);
//! ```

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use super::identity::{authenticate, AuthenticatedRequest};
use super::AuthError;
use crate::state::AppState;

/// Reject unauthenticated requests, attach the identity to the rest.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let auth: AuthenticatedRequest = authenticate(request.headers(), &state.tokens)?;
    request.extensions_mut().insert(auth);
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{Auth, TokenPayload, TokenService, UserId};
    use axum::{
        body::{to_bytes, Body},
        http::StatusCode,
        routing::get,
        Extension, Router,
    };
    use chrono::TimeDelta;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn create_test_state() -> AppState {
        let tokens = TokenService::new();
        tokens.initialize("test-secret", TimeDelta::hours(1)).unwrap();
        AppState::new(Arc::new(tokens))
    }

    async fn whoami(Extension(auth): Extension<AuthenticatedRequest>) -> String {
        auth.user_id().to_string()
    }

    async fn email(Auth(payload): Auth) -> String {
        payload.email
    }

    fn app(state: AppState) -> Router {
        Router::new()
            .route("/whoami", get(whoami))
            .route("/email", get(email))
            .layer(axum::middleware::from_fn_with_state(state.clone(), require_auth))
            .with_state(state)
    }

    async fn get_with(app: Router, uri: &str, authorization: Option<&str>) -> (StatusCode, String) {
        let mut builder = axum::http::Request::builder().uri(uri);
        if let Some(value) = authorization {
            builder = builder.header("Authorization", value);
        }
        let response = app.oneshot(builder.body(Body::empty()).unwrap()).await.unwrap();

        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn authenticated_request_reaches_handler() {
        let state = create_test_state();
        let payload = TokenPayload::new(UserId(7), "a@b.com").unwrap();
        let token = state.tokens.issue(&payload).unwrap();

        let (status, body) = get_with(app(state), "/whoami", Some(&format!("Bearer {token}"))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "7");
    }

    #[tokio::test]
    async fn extractor_reuses_middleware_identity() {
        let state = create_test_state();
        let payload = TokenPayload::new(UserId(7), "a@b.com").unwrap();
        let token = state.tokens.issue(&payload).unwrap();

        let (status, body) = get_with(app(state), "/email", Some(&format!("Bearer {token}"))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "a@b.com");
    }

    #[tokio::test]
    async fn missing_header_is_rejected() {
        let (status, body) = get_with(app(create_test_state()), "/whoami", None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(body.contains("unauthenticated"));
    }

    #[tokio::test]
    async fn rejections_do_not_reveal_the_cause() {
        let state = create_test_state();
        let (_, missing) = get_with(app(state.clone()), "/whoami", None).await;
        let (_, garbage) = get_with(app(state.clone()), "/whoami", Some("Bearer YQ==.YQ==.YQ==")).await;
        let (_, scheme) = get_with(app(state), "/whoami", Some("Basic dXNlcjpwYXNz")).await;

        assert_eq!(missing, garbage);
        assert_eq!(missing, scheme);
    }
}
