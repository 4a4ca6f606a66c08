//! Voice Query Handlers

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::VoiceCatalogPort;
use crate::application::queries::ListVoices;
use crate::domain::voice::Voice;

// ============================================================================
// Response DTOs
// ============================================================================

/// 音色条目响应
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceResponse {
    pub id: String,
    pub name: String,
    pub label: String,
}

impl From<Voice> for VoiceResponse {
    fn from(voice: Voice) -> Self {
        Self {
            id: voice.id().to_string(),
            name: voice.name().to_string(),
            label: voice.label().to_string(),
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// ListVoices Handler
pub struct ListVoicesHandler {
    voice_catalog: Arc<dyn VoiceCatalogPort>,
}

impl ListVoicesHandler {
    pub fn new(voice_catalog: Arc<dyn VoiceCatalogPort>) -> Self {
        Self { voice_catalog }
    }

    pub async fn handle(&self, _query: ListVoices) -> Result<Vec<VoiceResponse>, ApplicationError> {
        let voices = self.voice_catalog.list().await?;
        Ok(voices.into_iter().map(VoiceResponse::from).collect())
    }
}
