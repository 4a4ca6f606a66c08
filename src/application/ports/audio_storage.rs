//! Audio Storage Port - 出站端口
//!
//! 定义合成音频的存储和 GC 的抽象接口

use async_trait::async_trait;
use std::path::PathBuf;
use thiserror::Error;

use crate::domain::conversion::{AudioFileName, AudioKey};

/// 音频存储错误
#[derive(Debug, Error)]
pub enum AudioStorageError {
    #[error("IO error: {0}")]
    IoError(String),
}

/// GC 配置
#[derive(Debug, Clone)]
pub struct GcConfig {
    /// 音频文件保留时间（秒），按最后修改时间计算
    pub max_age_secs: u64,
    /// 最大存储空间（字节），0 表示不限制
    pub max_storage_bytes: u64,
}

impl Default for GcConfig {
    fn default() -> Self {
        Self {
            max_age_secs: 86400,                   // 24 小时
            max_storage_bytes: 1024 * 1024 * 1024, // 1 GB
        }
    }
}

/// 存储统计
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StorageStats {
    /// 已使用空间（字节）
    pub used_bytes: u64,
    /// 文件数量
    pub file_count: u64,
}

/// GC 结果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GcResult {
    /// 删除的文件数量
    pub deleted_files: u64,
    /// 释放的空间（字节）
    pub freed_bytes: u64,
}

/// 已存储的音频
#[derive(Debug, Clone)]
pub struct StoredAudio {
    pub file_name: AudioFileName,
    pub path: PathBuf,
    pub size_bytes: u64,
}

/// Audio Storage Port - 出站端口
///
/// 管理合成音频文件的存储和垃圾回收
#[async_trait]
pub trait AudioStoragePort: Send + Sync {
    /// 获取音频文件路径
    fn audio_path(&self, file_name: &AudioFileName) -> PathBuf;

    /// 查找已存在的音频，命中时刷新其修改时间
    async fn find_audio(&self, key: &AudioKey) -> Option<StoredAudio>;

    /// 保存音频数据（先写临时文件再重命名）
    async fn save_audio(&self, key: &AudioKey, data: &[u8]) -> Result<StoredAudio, AudioStorageError>;

    /// 检查音频是否存在
    async fn audio_exists(&self, file_name: &AudioFileName) -> bool;

    /// 获取存储统计
    async fn get_stats(&self) -> Result<StorageStats, AudioStorageError>;

    /// 执行垃圾回收：先按保留时间清理，再按最旧优先清理到容量上限
    async fn gc(&self, config: &GcConfig) -> Result<GcResult, AudioStorageError>;
}
