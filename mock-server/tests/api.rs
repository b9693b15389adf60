use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, Echo};
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

// --- echo ---

#[tokio::test]
async fn echo_get_reports_path_and_query() {
    let resp = app()
        .oneshot(request("GET", "/api/search?q=rust&limit=5", ""))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let echo: Echo = body_json(resp).await;
    assert_eq!(echo.method, "GET");
    assert_eq!(echo.path, "/api/search");
    assert_eq!(echo.query.as_deref(), Some("q=rust&limit=5"));
    assert_eq!(echo.body, "");
}

#[tokio::test]
async fn echo_post_returns_body_verbatim() {
    let body = r#"{"name":"Bob","email":"bob@test.com"}"#;
    let resp = app().oneshot(request("POST", "/api/users", body)).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let echo: Echo = body_json(resp).await;
    assert_eq!(echo.method, "POST");
    assert_eq!(echo.body, body);
    assert!(echo.query.is_none());
}

#[tokio::test]
async fn echo_reports_headers() {
    let resp = app()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/items/7")
                .header("x-trace", "abc")
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();

    let echo: Echo = body_json(resp).await;
    assert_eq!(echo.method, "DELETE");
    assert_eq!(echo.headers.get("x-trace").map(String::as_str), Some("abc"));
}

// --- status ---

#[tokio::test]
async fn status_route_answers_with_requested_code() {
    let resp = app().oneshot(request("GET", "/status/404", "")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(&body_bytes(resp).await[..], b"status 404");
}

#[tokio::test]
async fn status_route_accepts_any_method() {
    let resp = app().oneshot(request("PUT", "/status/503", "{}")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn status_route_rejects_non_numeric_code() {
    let resp = app().oneshot(request("GET", "/status/teapot", "")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
