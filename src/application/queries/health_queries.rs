//! Health Queries - 服务状态查询

/// 获取服务状态查询
#[derive(Debug, Clone)]
pub struct GetHealth;

/// 服务状态
#[derive(Debug, Clone)]
pub struct HealthResponse {
    /// 语音合成后端是否可达
    pub tts_backend: bool,
    /// 音频文件数量
    pub audio_files: u64,
    /// 音频占用空间（字节）
    pub audio_bytes: u64,
}
