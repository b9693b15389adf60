use std::collections::BTreeMap;

use axum::{
    extract::Path,
    http::{HeaderMap, Method, StatusCode, Uri},
    routing::any,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;

/// What the server saw of a request, returned as the response body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Echo {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

pub fn app() -> Router {
    Router::new()
        .route("/status/{code}", any(status))
        .fallback(echo)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    log::info!("mock server listening on {:?}", listener.local_addr()?);
    axum::serve(listener, app()).await
}

async fn echo(method: Method, uri: Uri, headers: HeaderMap, body: String) -> Json<Echo> {
    let headers = headers
        .iter()
        .map(|(name, value)| {
            (
                name.as_str().to_string(),
                value.to_str().unwrap_or_default().to_string(),
            )
        })
        .collect();
    log::debug!("echo {method} {uri}");
    Json(Echo {
        method: method.to_string(),
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
        headers,
        body,
    })
}

/// Answer with the status code named in the path.
async fn status(Path(code): Path<u16>) -> Result<(StatusCode, String), StatusCode> {
    let status = StatusCode::from_u16(code).map_err(|_| StatusCode::BAD_REQUEST)?;
    Ok((status, format!("status {code}")))
}
