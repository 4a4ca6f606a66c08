//! Fake TTS Client - 离线调试用的 TTS 客户端
//!
//! 始终返回固定的音频数据，不实际调用 TTS 服务

use async_trait::async_trait;
use std::path::PathBuf;
use std::time::Duration;

use crate::application::ports::{SynthesisRequest, SynthesizedAudio, TtsEnginePort, TtsError};
use crate::domain::conversion::AudioFormat;

/// 一帧静音 MPEG-1 Layer III（128kbps / 44.1kHz）
fn silent_mp3_frame() -> Vec<u8> {
    let mut frame = vec![0u8; 417];
    frame[..4].copy_from_slice(&[0xFF, 0xFB, 0x90, 0x64]);
    frame
}

/// Fake TTS Client 配置
#[derive(Debug, Clone, Default)]
pub struct FakeTtsClientConfig {
    /// 固定返回的音频文件路径；为空时返回一帧静音 MP3
    pub audio_file_path: Option<PathBuf>,
    /// 模拟合成延迟（毫秒）
    pub latency_ms: u64,
}

/// Fake TTS Client
///
/// 用于前端联调和测试，始终返回配置的固定音频
pub struct FakeTtsClient {
    config: FakeTtsClientConfig,
    /// 缓存的音频数据
    audio_data: Vec<u8>,
}

impl FakeTtsClient {
    /// 创建新的 FakeTtsClient
    pub fn new(config: FakeTtsClientConfig) -> Result<Self, std::io::Error> {
        let audio_data = match &config.audio_file_path {
            Some(path) => std::fs::read(path)?,
            None => silent_mp3_frame(),
        };
        tracing::info!(
            path = ?config.audio_file_path,
            size = audio_data.len(),
            "FakeTtsClient initialized"
        );
        Ok(Self { config, audio_data })
    }

    /// 使用默认配置创建
    pub fn with_defaults() -> Self {
        Self {
            config: FakeTtsClientConfig::default(),
            audio_data: silent_mp3_frame(),
        }
    }
}

#[async_trait]
impl TtsEnginePort for FakeTtsClient {
    fn cache_fingerprint(&self) -> String {
        format!("fake|{:x}", md5::compute(&self.audio_data))
    }

    async fn synthesize(&self, request: SynthesisRequest) -> Result<SynthesizedAudio, TtsError> {
        if request.text.trim().is_empty() {
            return Err(TtsError::EmptyText);
        }

        tracing::debug!(
            text_len = request.text.len(),
            voice = %request.voice,
            "FakeTtsClient: returning fixed audio"
        );

        if self.config.latency_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.config.latency_ms)).await;
        }

        Ok(SynthesizedAudio {
            data: self.audio_data.clone(),
            format: AudioFormat::Mp3,
        })
    }
}
