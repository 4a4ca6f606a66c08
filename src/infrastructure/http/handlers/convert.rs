//! Convert HTTP Handler

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use std::sync::Arc;

use crate::application::ConvertCommand;
use crate::infrastructure::http::dto::{ConversionResultDto, ConvertRequest};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 泰文 → 中文 → 语音
pub async fn convert(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ConvertRequest>, JsonRejection>,
) -> Result<Json<ConversionResultDto>, ApiError> {
    let Json(req) = payload?;

    let command = ConvertCommand {
        text: req.text,
        voice: req.voice,
    };

    let response = state.convert_handler.handle(command).await?;

    Ok(Json(ConversionResultDto::from_response(
        response,
        &state.audio_url_prefix,
    )))
}
