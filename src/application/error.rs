//! 应用层错误定义
//!
//! 统一的命令/查询错误类型

use thiserror::Error;

use crate::application::ports::{AudioStorageError, CatalogError, TranslationError, TtsError};
use crate::domain::conversion::ConversionError;

/// 应用层错误
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// 资源未找到
    #[error("{resource_type} not found: {id}")]
    NotFound {
        resource_type: &'static str,
        id: String,
    },

    /// 验证错误
    #[error("{0}")]
    ValidationError(String),

    /// 音色目录不可用
    #[error("Voice catalog unavailable: {0}")]
    CatalogUnavailable(String),

    /// 翻译失败
    #[error("Translation failed: {0}")]
    TranslationFailed(String),

    /// 语音合成失败
    #[error("TTS generation failed: {0}")]
    SynthesisFailed(String),

    /// 存储错误
    #[error("Storage error: {0}")]
    StorageError(String),
}

impl ApplicationError {
    /// 创建 NotFound 错误
    pub fn not_found(resource_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            resource_type,
            id: id.into(),
        }
    }

    /// 创建验证错误
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError(message.into())
    }
}

impl From<ConversionError> for ApplicationError {
    fn from(err: ConversionError) -> Self {
        Self::ValidationError(err.to_string())
    }
}

impl From<CatalogError> for ApplicationError {
    fn from(err: CatalogError) -> Self {
        Self::CatalogUnavailable(err.to_string())
    }
}

impl From<TranslationError> for ApplicationError {
    fn from(err: TranslationError) -> Self {
        Self::TranslationFailed(err.to_string())
    }
}

impl From<TtsError> for ApplicationError {
    fn from(err: TtsError) -> Self {
        Self::SynthesisFailed(err.to_string())
    }
}

impl From<AudioStorageError> for ApplicationError {
    fn from(err: AudioStorageError) -> Self {
        Self::StorageError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_are_ui_ready() {
        let e: ApplicationError = ConversionError::EmptyText.into();
        assert_eq!(e.to_string(), "No text provided");

        let e: ApplicationError = TranslationError::EmptyResult.into();
        assert_eq!(e.to_string(), "Translation failed: Empty translation");

        let e: ApplicationError = TtsError::Timeout.into();
        assert_eq!(e.to_string(), "TTS generation failed: Request timeout");
    }

    #[test]
    fn test_storage_failure_keeps_cause() {
        let e: ApplicationError = AudioStorageError::IoError("disk full".into()).into();
        assert!(matches!(e, ApplicationError::StorageError(_)));
        assert_eq!(e.to_string(), "Storage error: IO error: disk full");
    }
}
