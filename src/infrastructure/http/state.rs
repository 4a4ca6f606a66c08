//! Application State
//!
//! 包含所有 Command/Query Handlers 的应用状态

use std::path::PathBuf;
use std::sync::Arc;

use crate::application::{
    // Command handlers
    ConvertHandler, ConvertSettings,
    // Query handlers
    GetAudioHandler, GetHealthHandler, ListVoicesHandler,
    // Ports
    AudioStoragePort, TranslatorPort, TtsEnginePort, VoiceCatalogPort,
};

/// 应用状态
pub struct AppState {
    // ========== Command Handlers ==========
    pub convert_handler: ConvertHandler,

    // ========== Query Handlers ==========
    pub list_voices_handler: ListVoicesHandler,
    pub get_audio_handler: GetAudioHandler,
    pub get_health_handler: GetHealthHandler,

    // ========== Static files ==========
    /// 音频目录，挂载在 `/static/audio`
    pub audio_dir: PathBuf,
    /// 返回给客户端的音频 URL 前缀
    pub audio_url_prefix: String,
    /// 前端页面目录
    pub web_dir: Option<PathBuf>,
}

impl AppState {
    /// 创建应用状态
    pub fn new(
        voice_catalog: Arc<dyn VoiceCatalogPort>,
        translator: Arc<dyn TranslatorPort>,
        tts_engine: Arc<dyn TtsEnginePort>,
        audio_storage: Arc<dyn AudioStoragePort>,
        settings: ConvertSettings,
        audio_dir: PathBuf,
    ) -> Self {
        Self {
            convert_handler: ConvertHandler::new(
                voice_catalog.clone(),
                translator,
                tts_engine.clone(),
                audio_storage.clone(),
                settings,
            ),

            list_voices_handler: ListVoicesHandler::new(voice_catalog),
            get_audio_handler: GetAudioHandler::new(audio_storage.clone()),
            get_health_handler: GetHealthHandler::new(tts_engine, audio_storage),

            audio_dir,
            audio_url_prefix: "/static/audio".to_string(),
            web_dir: None,
        }
    }

    pub fn with_audio_url_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.audio_url_prefix = prefix.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_web_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.web_dir = Some(dir.into());
        self
    }
}
