//! Data Transfer Objects

use serde::{Deserialize, Serialize};

use crate::application::{ConvertResponse, HealthResponse, VoiceResponse};

// ============================================================================
// Convert DTOs
// ============================================================================

/// 转换请求
#[derive(Debug, Deserialize)]
pub struct ConvertRequest {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub voice: Option<String>,
}

/// 转换结果
#[derive(Debug, Serialize)]
pub struct ConversionResultDto {
    pub thai: String,
    pub chinese: String,
    pub translator: String,
    pub audio_url: String,
}

impl ConversionResultDto {
    /// `audio_url_prefix` 不带结尾斜杠，如 `/static/audio`
    pub fn from_response(response: ConvertResponse, audio_url_prefix: &str) -> Self {
        Self {
            audio_url: format!("{}/{}", audio_url_prefix, response.audio_file),
            thai: response.thai,
            chinese: response.chinese,
            translator: response.translator,
        }
    }
}

// ============================================================================
// Voice DTOs
// ============================================================================

#[derive(Debug, Serialize)]
pub struct VoiceDto {
    pub id: String,
    pub name: String,
    pub label: String,
}

impl From<VoiceResponse> for VoiceDto {
    fn from(voice: VoiceResponse) -> Self {
        Self {
            id: voice.id,
            name: voice.name,
            label: voice.label,
        }
    }
}

// ============================================================================
// Health DTOs
// ============================================================================

#[derive(Debug, Serialize)]
pub struct HealthDto {
    pub status: &'static str,
    pub tts_backend: bool,
    pub audio_files: u64,
    pub audio_bytes: u64,
}

impl From<HealthResponse> for HealthDto {
    fn from(health: HealthResponse) -> Self {
        Self {
            status: if health.tts_backend { "ok" } else { "degraded" },
            tts_backend: health.tts_backend,
            audio_files: health.audio_files,
            audio_bytes: health.audio_bytes,
        }
    }
}
