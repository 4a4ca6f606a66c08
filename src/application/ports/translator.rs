//! Translator Port - 翻译服务抽象
//!
//! `translate(text) -> (译文, 翻译器名称)`，具体实现在 infrastructure/adapters/translation

use async_trait::async_trait;
use thiserror::Error;

/// 翻译错误
#[derive(Debug, Error)]
pub enum TranslationError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Service error: {0}")]
    ServiceError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Empty translation")]
    EmptyResult,

    #[error("{0}")]
    AllFailed(String),
}

/// 翻译结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    /// 译文
    pub text: String,
    /// 产生译文的翻译器名称（展示给用户）
    pub translator: String,
}

/// Translator Port
#[async_trait]
pub trait TranslatorPort: Send + Sync {
    /// 翻译器名称，如 "google-api"
    fn name(&self) -> &str;

    async fn translate(&self, text: &str) -> Result<Translation, TranslationError>;
}
