//! TTS Engine Port - 语音合成引擎抽象
//!
//! 定义语音合成的抽象接口，具体实现在 infrastructure/adapters 层

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::conversion::AudioFormat;

/// TTS 错误
#[derive(Debug, Error)]
pub enum TtsError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Service error: {0}")]
    ServiceError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Text cannot be empty")]
    EmptyText,
}

/// 合成请求
#[derive(Debug, Clone)]
pub struct SynthesisRequest {
    /// 要合成的文本（中文译文）
    pub text: String,
    /// 后端音色名，如 "zh-CN-XiaoxiaoNeural"
    pub voice: String,
}

/// 合成结果
#[derive(Debug, Clone)]
pub struct SynthesizedAudio {
    /// 编码后的音频数据
    pub data: Vec<u8>,
    pub format: AudioFormat,
}

/// TTS Engine Port
///
/// 外部语音合成服务的抽象接口
#[async_trait]
pub trait TtsEnginePort: Send + Sync {
    /// 将文本合成为音频
    async fn synthesize(&self, request: SynthesisRequest) -> Result<SynthesizedAudio, TtsError>;

    /// 合成引擎指纹：后端与影响音频内容的参数（模型、语速等）
    ///
    /// 参与音频文件名计算，配置变化后不会复用旧音频
    fn cache_fingerprint(&self) -> String;

    /// 输出格式（用于在合成前计算音频文件名）
    fn output_format(&self) -> AudioFormat {
        AudioFormat::Mp3
    }

    /// 检查 TTS 服务是否可用
    async fn health_check(&self) -> bool {
        true // 默认实现
    }
}
