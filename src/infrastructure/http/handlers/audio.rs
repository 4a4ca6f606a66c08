//! Audio Handlers

use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, StatusCode},
    response::Response,
};
use chrono::Local;
use std::sync::Arc;
use tokio_util::io::ReaderStream;

use crate::application::GetAudioQuery;
use crate::domain::conversion::download_file_name;
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 以附件形式下载已生成的音频
pub async fn download_audio(
    State(state): State<Arc<AppState>>,
    Path(file_name): Path<String>,
) -> Result<Response, ApiError> {
    let audio = state
        .get_audio_handler
        .handle(GetAudioQuery {
            file_name: file_name.clone(),
        })
        .await?;

    // 查询之后、打开之前文件可能刚被 GC
    let file = tokio::fs::File::open(&audio.path)
        .await
        .map_err(|e| open_failed(&file_name, e))?;

    let file_size = file
        .metadata()
        .await
        .map_err(|e| ApiError::Internal(format!("Failed to get file metadata: {}", e)))?
        .len();

    let body = Body::from_stream(ReaderStream::new(file));

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, audio.content_type)
        .header(header::CONTENT_LENGTH, file_size)
        .header(
            header::CONTENT_DISPOSITION,
            format!(
                "attachment; filename=\"{}\"",
                download_file_name(&Local::now(), audio.format)
            ),
        )
        .body(body)
        .map_err(|e| ApiError::Internal(format!("Failed to build response: {}", e)))
}

/// 错误信息只带客户端给出的文件名，不暴露服务器路径
fn open_failed(file_name: &str, e: std::io::Error) -> ApiError {
    match e.kind() {
        std::io::ErrorKind::NotFound => ApiError::NotFound(format!("Audio not found: {}", file_name)),
        _ => ApiError::Internal(format!("Failed to open audio file {}: {}", file_name, e.kind())),
    }
}
