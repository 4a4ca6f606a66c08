//! Health Query Handler

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::{AudioStoragePort, TtsEnginePort};
use crate::application::queries::{GetHealth, HealthResponse};

/// GetHealth Handler
pub struct GetHealthHandler {
    tts_engine: Arc<dyn TtsEnginePort>,
    audio_storage: Arc<dyn AudioStoragePort>,
}

impl GetHealthHandler {
    pub fn new(tts_engine: Arc<dyn TtsEnginePort>, audio_storage: Arc<dyn AudioStoragePort>) -> Self {
        Self {
            tts_engine,
            audio_storage,
        }
    }

    pub async fn handle(&self, _query: GetHealth) -> Result<HealthResponse, ApplicationError> {
        let tts_backend = self.tts_engine.health_check().await;
        let stats = self.audio_storage.get_stats().await?;

        Ok(HealthResponse {
            tts_backend,
            audio_files: stats.file_count,
            audio_bytes: stats.used_bytes,
        })
    }
}
