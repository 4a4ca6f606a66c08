//! HTTP Middleware
//!
//! 请求结果日志：按路径和状态码决定日志级别，附带耗时

use std::time::Instant;

use axum::{
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::Response,
};

/// 请求结果的日志级别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum OutcomeLevel {
    Error,
    Warn,
    Debug,
}

/// 选择日志级别，`None` 表示不记录
///
/// 音频被 GC 后，页面上残留的 `<audio>` 仍会请求旧文件，这类 404 只记 debug
pub(crate) fn outcome_level(path: &str, status: StatusCode) -> Option<OutcomeLevel> {
    if status.is_server_error() {
        return Some(OutcomeLevel::Error);
    }
    if status == StatusCode::NOT_FOUND && (path.starts_with("/static/audio/") || path == "/favicon.ico") {
        return Some(OutcomeLevel::Debug);
    }
    if status.is_client_error() {
        return Some(OutcomeLevel::Warn);
    }
    None
}

/// 记录失败请求
///
/// 错误详情在 ApiError::into_response() 中记录，这里只记请求行、状态和耗时
pub async fn request_outcome_logging(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let started = Instant::now();

    let response = next.run(request).await;
    let status = response.status().as_u16();
    let elapsed_ms = started.elapsed().as_millis() as u64;

    match outcome_level(&path, response.status()) {
        Some(OutcomeLevel::Error) => {
            tracing::error!(%method, %path, status, elapsed_ms, "Request failed");
        }
        Some(OutcomeLevel::Warn) => {
            tracing::warn!(%method, %path, status, elapsed_ms, "Request rejected");
        }
        Some(OutcomeLevel::Debug) => {
            tracing::debug!(%method, %path, status, elapsed_ms, "Audio file gone");
        }
        None => {}
    }

    response
}
