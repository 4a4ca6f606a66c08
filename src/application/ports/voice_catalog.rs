//! Voice Catalog Port - 音色目录抽象

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::voice::{Voice, VoiceId};

/// 音色目录错误
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Voice source unreachable: {0}")]
    Unavailable(String),

    #[error("Invalid voice entry: {0}")]
    InvalidEntry(String),

    #[error("Duplicate voice id: {0}")]
    DuplicateId(String),
}

/// Voice Catalog Port
///
/// 只读；同一目录多次调用 `list` 返回相同顺序的结果
#[async_trait]
pub trait VoiceCatalogPort: Send + Sync {
    /// 按展示顺序列出全部音色
    async fn list(&self) -> Result<Vec<Voice>, CatalogError>;

    /// 按 id 查找音色
    async fn find(&self, id: &VoiceId) -> Result<Option<Voice>, CatalogError> {
        Ok(self.list().await?.into_iter().find(|v| v.id() == id))
    }
}
