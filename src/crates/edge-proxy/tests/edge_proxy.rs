use axum::body::Body;
use axum::http::{header, HeaderMap, Method, Request, StatusCode, Uri};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use std::path::Path;
use tempfile::TempDir;
use tokio::net::TcpListener;
use tower::ServiceExt;

use edge_proxy::{create_router, ProxyState};

async fn echo(method: Method, uri: Uri, headers: HeaderMap, body: String) -> Json<Value> {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    Json(json!({
        "method": method.as_str(),
        "path": uri.path(),
        "query": uri.query(),
        "x_custom": header("x-custom"),
        "host": header("host"),
        "body": body,
    }))
}

async fn teapot() -> impl IntoResponse {
    (
        StatusCode::IM_A_TEAPOT,
        [("x-upstream", "yes")],
        "short and stout",
    )
}

/// Start an upstream that echoes what it receives; returns its origin
async fn spawn_upstream() -> String {
    let app = Router::new()
        .route("/teapot", get(teapot))
        .fallback(echo);
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

fn public_dir() -> TempDir {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    std::fs::write(dir.path().join("index.html"), "<html>entry</html>").unwrap();
    std::fs::write(dir.path().join("app.js"), "console.log('app');").unwrap();
    dir
}

fn app(origin: &str, public: &Path) -> Router {
    create_router(ProxyState::new(origin).unwrap(), public, 1024)
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn test_forwards_with_prefix_stripped() {
    let origin = spawn_upstream().await;
    let public = public_dir();

    let response = app(&origin, public.path())
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/api/items?source=test")
                .header(header::CONTENT_TYPE, "application/json")
                .header("x-custom", "kept")
                .body(Body::from(r#"{"name":"Widget"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let echoed: Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(echoed["method"], "POST");
    assert_eq!(echoed["path"], "/items");
    assert_eq!(echoed["query"], "source=test");
    assert_eq!(echoed["x_custom"], "kept");
    assert_eq!(echoed["body"], r#"{"name":"Widget"}"#);
    assert_eq!(echoed["host"], origin.trim_start_matches("http://"));
}

#[tokio::test]
async fn test_bare_prefix_forwards_to_root() {
    let origin = spawn_upstream().await;
    let public = public_dir();

    let response = app(&origin, public.path())
        .oneshot(Request::builder().uri("/api").body(Body::empty()).unwrap())
        .await
        .unwrap();

    let echoed: Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(echoed["method"], "GET");
    assert_eq!(echoed["path"], "/");
}

#[tokio::test]
async fn test_prefix_with_trailing_slash_is_forwarded() {
    let origin = spawn_upstream().await;
    let public = public_dir();

    let response = app(&origin, public.path())
        .oneshot(Request::builder().uri("/api/?page=2").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let echoed: Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(echoed["path"], "/");
    assert_eq!(echoed["query"], "page=2");
}

#[tokio::test]
async fn test_relays_upstream_status_and_headers() {
    let origin = spawn_upstream().await;
    let public = public_dir();

    let response = app(&origin, public.path())
        .oneshot(Request::builder().uri("/api/teapot").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::IM_A_TEAPOT);
    assert_eq!(response.headers().get("x-upstream").unwrap(), "yes");
    assert_eq!(body_text(response).await, "short and stout");
}

#[tokio::test]
async fn test_unreachable_upstream_is_bad_gateway() {
    // Grab a free port, then close it so nothing is listening.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let origin = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);
    let public = public_dir();

    let response = app(&origin, public.path())
        .oneshot(Request::builder().uri("/api/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body: Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(body["error"], "Bad Gateway");
}

#[tokio::test]
async fn test_oversized_body_is_rejected() {
    let origin = spawn_upstream().await;
    let public = public_dir();

    let response = app(&origin, public.path())
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/api/items")
                .body(Body::from(vec![b'x'; 4096]))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn test_serves_static_asset() {
    let public = public_dir();

    let response = app("http://127.0.0.1:9", public.path())
        .oneshot(Request::builder().uri("/app.js").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "console.log('app');");
}

#[tokio::test]
async fn test_unmatched_path_falls_back_to_index() {
    let public = public_dir();

    for uri in ["/", "/items/42", "/some/client/route"] {
        let response = app("http://127.0.0.1:9", public.path())
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK, "{uri}");
        assert_eq!(body_text(response).await, "<html>entry</html>");
    }
}

#[tokio::test]
async fn test_prefix_lookalike_is_not_proxied() {
    let public = public_dir();

    let response = app("http://127.0.0.1:9", public.path())
        .oneshot(Request::builder().uri("/apiary").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "<html>entry</html>");
}
