//! HTTP Routes
//!
//! API Endpoints:
//! - /api/ping                         GET   存活检查
//! - /api/health                       GET   服务状态
//! - /api/voices                       GET   音色目录
//! - /api/convert                      POST  泰文 → 中文 → 语音
//! - /api/audio/:file_name/download    GET   下载音频（附件）
//! - /static/audio/<file>              GET   音频静态文件
//! - /                                 GET   前端页面（可选）

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::services::ServeDir;

use super::handlers;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes(state: &AppState) -> Router<Arc<AppState>> {
    let router = Router::new()
        .nest("/api", api_routes())
        .nest_service("/static/audio", ServeDir::new(&state.audio_dir));

    match &state.web_dir {
        Some(dir) => router.fallback_service(ServeDir::new(dir)),
        None => router,
    }
}

/// API 路由
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ping", get(handlers::ping))
        .route("/health", get(handlers::health))
        .route("/voices", get(handlers::list_voices))
        .route("/convert", post(handlers::convert))
        .route("/audio/:file_name/download", get(handlers::download_audio))
}
