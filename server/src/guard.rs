//! # Access Guard
//!
//! Admin-only routes sit behind [`require_admin`]. It looks at exactly one
//! thing, the role of the principal resolved for the request, and either
//! forwards the request untouched or answers `403` with
//! `{"message": "this route is accessible only for admins."}`.
//!
//! A request with no resolved principal is refused the same way.
//!
//! ## Resolving the principal
//!
//! Authentication happens in the gateway in front of this service. It forwards
//! the caller as two headers, `x-principal-id` and `x-principal-role`, which
//! [`resolve_principal`] turns into a [`Principal`] request extension. The
//! gateway must strip both headers from client traffic.
use axum::{
    extract::Request,
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use serde::Serialize;

use crate::error::AppError;

pub const PRINCIPAL_ID: &str = "x-principal-id";
pub const PRINCIPAL_ROLE: &str = "x-principal-role";
pub const ADMIN_ROLE: &str = "admin";

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Principal {
    pub id: String,
    pub role: String,
}

impl Principal {
    pub fn is_admin(&self) -> bool {
        self.role == ADMIN_ROLE
    }
}

fn header(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

pub async fn resolve_principal(mut request: Request, next: Next) -> Response {
    let headers = request.headers();

    if let (Some(id), Some(role)) = (header(headers, PRINCIPAL_ID), header(headers, PRINCIPAL_ROLE)) {
        request.extensions_mut().insert(Principal { id, role });
    }

    next.run(request).await
}

pub async fn require_admin(request: Request, next: Next) -> Result<Response, AppError> {
    let is_admin = request
        .extensions()
        .get::<Principal>()
        .is_some_and(Principal::is_admin);

    if !is_admin {
        return Err(AppError::AdminOnly);
    }

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use std::{
        io,
        sync::{
            atomic::{AtomicUsize, Ordering},
            Arc, Mutex,
        },
    };

    use axum::{
        body::Body,
        http::{Request, StatusCode},
        middleware::from_fn,
        routing::get,
        Router,
    };
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use tracing_subscriber::{fmt, EnvFilter};

    use super::*;

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn guarded(calls: Arc<AtomicUsize>) -> Router {
        Router::new()
            .route(
                "/admin",
                get(move || {
                    let calls = calls.clone();
                    async move {
                        calls.fetch_add(1, Ordering::SeqCst);
                        "downstream"
                    }
                }),
            )
            .route_layer(from_fn(require_admin))
    }

    fn request(principal: Option<Principal>) -> Request<Body> {
        let mut request = Request::builder().uri("/admin").body(Body::empty()).unwrap();
        if let Some(principal) = principal {
            request.extensions_mut().insert(principal);
        }
        request
    }

    fn principal(role: &str) -> Principal {
        Principal {
            id: "u1".to_string(),
            role: role.to_string(),
        }
    }

    async fn body(response: Response) -> Vec<u8> {
        response.into_body().collect().await.unwrap().to_bytes().to_vec()
    }

    #[tokio::test]
    async fn non_admin_roles_are_refused_without_reaching_handler() {
        for role in ["editor", "user", "", "Admin", "admin "] {
            let calls = Arc::new(AtomicUsize::new(0));
            let response = guarded(calls.clone())
                .oneshot(request(Some(principal(role))))
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::FORBIDDEN, "role {role:?}");
            let body: Value = serde_json::from_slice(&body(response).await).unwrap();
            assert_eq!(body, json!({ "message": "this route is accessible only for admins." }));
            assert_eq!(calls.load(Ordering::SeqCst), 0);
        }
    }

    #[tokio::test]
    async fn admin_reaches_handler_exactly_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let response = guarded(calls.clone())
            .oneshot(request(Some(principal("admin"))))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body(response).await, b"downstream");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn missing_principal_is_refused() {
        let calls = Arc::new(AtomicUsize::new(0));
        let response = guarded(calls.clone()).oneshot(request(None)).await.unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn refusal_emits_no_log_events() {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = fmt()
            .with_env_filter(EnvFilter::new("quill_server=trace"))
            .with_writer(move || writer.clone())
            .finish();
        let _default = tracing::subscriber::set_default(subscriber);

        for principal in [None, Some(principal("editor"))] {
            let response = guarded(Arc::new(AtomicUsize::new(0)))
                .oneshot(request(principal))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::FORBIDDEN);
        }

        assert!(captured.0.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn headers_resolve_into_principal() {
        let app = Router::new()
            .route(
                "/me",
                get(|request: Request<Body>| async move {
                    format!("{:?}", request.extensions().get::<Principal>())
                }),
            )
            .layer(from_fn(resolve_principal));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/me")
                    .header(PRINCIPAL_ID, "u9")
                    .header(PRINCIPAL_ROLE, "admin")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let text = String::from_utf8(body(response).await).unwrap();
        assert_eq!(text, format!("{:?}", Some(Principal { id: "u9".into(), role: "admin".into() })));
    }

    #[tokio::test]
    async fn partial_headers_resolve_nothing() {
        let app = Router::new()
            .route(
                "/me",
                get(|request: Request<Body>| async move {
                    request.extensions().get::<Principal>().is_some().to_string()
                }),
            )
            .layer(from_fn(resolve_principal));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/me")
                    .header(PRINCIPAL_ROLE, "admin")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(body(response).await, b"false");
    }
}
