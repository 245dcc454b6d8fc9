//! Auth Middleware
//!
//! Lifts the session cookie into a [`PresentedToken`] request extension.
//! Resolution against the registry happens in the use cases, so every
//! router (auth, content) sees the same token the same way.

use std::convert::Infallible;
use std::fmt;
use std::sync::Arc;

use axum::body::Body;
use axum::extract::{FromRequestParts, State};
use axum::http::Request;
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::Response;

/// Raw session token presented by the client, if any
#[derive(Clone, Default)]
pub struct PresentedToken(pub Option<String>);

impl PresentedToken {
    pub fn as_deref(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

impl fmt::Debug for PresentedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Some(_) => f.write_str("PresentedToken(Some([REDACTED]))"),
            None => f.write_str("PresentedToken(None)"),
        }
    }
}

/// A missing extension reads as "no token presented".
impl<S> FromRequestParts<S> for PresentedToken
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts
            .extensions
            .get::<PresentedToken>()
            .cloned()
            .unwrap_or_default())
    }
}

/// Middleware that reads the session cookie named by its state
pub async fn capture_session_token(
    State(cookie_name): State<Arc<str>>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let token = platform::cookie::extract_cookie(req.headers(), &cookie_name);
    req.extensions_mut().insert(PresentedToken(token));
    next.run(req).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::Router;
    use axum::http::{StatusCode, header};
    use axum::routing::get;
    use tower::ServiceExt;

    async fn echo(token: PresentedToken) -> String {
        token.as_deref().unwrap_or("anonymous").to_string()
    }

    fn app() -> Router {
        Router::new()
            .route("/", get(echo))
            .layer(axum::middleware::from_fn_with_state(
                Arc::<str>::from("sid"),
                capture_session_token,
            ))
    }

    async fn body_text(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_cookie_becomes_token() {
        let request = Request::builder()
            .uri("/")
            .header(header::COOKIE, "theme=dark; sid=abc")
            .body(Body::empty())
            .unwrap();

        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "abc");
    }

    #[tokio::test]
    async fn test_no_cookie_is_anonymous() {
        let request = Request::builder().uri("/").body(Body::empty()).unwrap();
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(body_text(response).await, "anonymous");
    }

    #[test]
    fn test_debug_redacts() {
        let token = PresentedToken(Some("secret-token".to_string()));
        assert!(!format!("{:?}", token).contains("secret-token"));
    }
}
