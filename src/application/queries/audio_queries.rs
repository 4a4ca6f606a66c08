//! Audio Queries - 音频查询

use std::path::PathBuf;

use crate::domain::conversion::AudioFormat;

/// 获取已生成音频查询
#[derive(Debug, Clone)]
pub struct GetAudioQuery {
    /// 请求中的文件名（未校验）
    pub file_name: String,
}

/// 获取音频响应
#[derive(Debug, Clone)]
pub struct GetAudioResponse {
    pub path: PathBuf,
    pub format: AudioFormat,
    pub content_type: String,
}
