//! HTTP Server
//!
//! 组装中间件，绑定端口并在收到关闭信号后退出

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::Router;
use http::header::{AUTHORIZATION, CONTENT_TYPE};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use super::middleware::request_outcome_logging;
use super::routes::create_routes;
use super::state::AppState;

/// 请求体只有 JSON 文本，5000 字的泰文远小于此
const MAX_BODY_BYTES: usize = 64 * 1024;

/// 构建带全部中间件的 Router
pub fn build_router(state: Arc<AppState>) -> Router {
    // 前端可能与 API 分开部署，放开跨域
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers([AUTHORIZATION, CONTENT_TYPE])
        .expose_headers(Any)
        .max_age(Duration::from_secs(3600));

    create_routes(&state)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(middleware::from_fn(request_outcome_logging))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// HTTP 服务器
pub struct HttpServer {
    addr: String,
    state: Arc<AppState>,
}

impl HttpServer {
    /// `addr` 形如 `0.0.0.0:5001`
    pub fn new(addr: impl Into<String>, state: AppState) -> Self {
        Self {
            addr: addr.into(),
            state: Arc::new(state),
        }
    }

    /// 绑定配置地址并启动（带优雅关闭）
    pub async fn run_with_shutdown<F>(self, shutdown_signal: F) -> Result<(), std::io::Error>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let listener = TcpListener::bind(&self.addr).await?;
        self.serve(listener, shutdown_signal).await
    }

    /// 在已绑定的 listener 上提供服务
    pub async fn serve<F>(self, listener: TcpListener, shutdown_signal: F) -> Result<(), std::io::Error>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let local = listener.local_addr()?;
        info!(addr = %local, "HTTP server listening");

        axum::serve(listener, build_router(self.state))
            .with_graceful_shutdown(shutdown_signal)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ConvertSettings;
    use crate::infrastructure::adapters::{
        FakeTtsClient, FileAudioStorage, GoogleApiTranslator, GoogleTranslatorConfig,
        StaticVoiceCatalog,
    };
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request, StatusCode};
    use tempfile::TempDir;
    use tower::util::ServiceExt;

    async fn state(dir: &TempDir) -> AppState {
        let storage = Arc::new(FileAudioStorage::new(dir.path()).await.unwrap());
        // 这些测试不会走到翻译
        let translator =
            GoogleApiTranslator::new(GoogleTranslatorConfig::new("http://127.0.0.1:9")).unwrap();
        AppState::new(
            Arc::new(StaticVoiceCatalog::edge_chinese()),
            Arc::new(translator),
            Arc::new(FakeTtsClient::with_defaults()),
            storage,
            ConvertSettings::default(),
            dir.path().to_path_buf(),
        )
    }

    #[tokio::test]
    async fn test_oversized_body_is_rejected_as_json() {
        let dir = tempfile::tempdir().unwrap();
        let router = build_router(Arc::new(state(&dir).await));

        let text = "ก".repeat(MAX_BODY_BYTES);
        let body = serde_json::json!({ "text": text, "voice": "1" }).to_string();
        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/convert")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap();

        let response = router.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert!(json["error"].as_str().unwrap().starts_with("Invalid request body"));
    }

    #[tokio::test]
    async fn test_cors_preflight() {
        let dir = tempfile::tempdir().unwrap();
        let router = build_router(Arc::new(state(&dir).await));

        let request = Request::builder()
            .method(Method::OPTIONS)
            .uri("/api/convert")
            .header(header::ORIGIN, "http://localhost:3000")
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
            .body(Body::empty())
            .unwrap();

        let response = router.oneshot(request).await.unwrap();
        assert!(response.status().is_success());
        assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    }

    #[tokio::test]
    async fn test_serve_until_shutdown() {
        let dir = tempfile::tempdir().unwrap();
        let server = HttpServer::new("127.0.0.1:0", state(&dir).await);
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let (tx, rx) = tokio::sync::oneshot::channel::<()>();
        let handle = tokio::spawn(server.serve(listener, async {
            let _ = rx.await;
        }));

        let body: serde_json::Value = reqwest::get(format!("http://{}/api/ping", addr))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(body["status"], "ok");

        tx.send(()).unwrap();
        let result = tokio::time::timeout(Duration::from_secs(5), handle)
            .await
            .unwrap()
            .unwrap();
        assert!(result.is_ok());
    }
}
