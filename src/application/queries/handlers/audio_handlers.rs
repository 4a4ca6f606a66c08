//! Audio Query Handlers

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::AudioStoragePort;
use crate::application::queries::audio_queries::{GetAudioQuery, GetAudioResponse};
use crate::domain::conversion::AudioFileName;

/// GetAudio Handler - 定位已生成的音频文件
pub struct GetAudioHandler {
    audio_storage: Arc<dyn AudioStoragePort>,
}

impl GetAudioHandler {
    pub fn new(audio_storage: Arc<dyn AudioStoragePort>) -> Self {
        Self { audio_storage }
    }

    pub async fn handle(&self, query: GetAudioQuery) -> Result<GetAudioResponse, ApplicationError> {
        let file_name = AudioFileName::parse(&query.file_name)?;

        if !self.audio_storage.audio_exists(&file_name).await {
            return Err(ApplicationError::not_found("Audio", file_name.as_str()));
        }

        let format = file_name.format();
        Ok(GetAudioResponse {
            path: self.audio_storage.audio_path(&file_name),
            format,
            content_type: format.mime_type().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::conversion::{AudioFormat, AudioKey};
    use crate::infrastructure::adapters::FileAudioStorage;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_get_existing_audio() {
        let dir = tempdir().unwrap();
        let storage = Arc::new(FileAudioStorage::new(dir.path()).await.unwrap());
        let key = AudioKey::new("test", "zh-CN-XiaoxiaoNeural", "你好", AudioFormat::Mp3);
        let stored = storage.save_audio(&key, b"ID3").await.unwrap();

        let handler = GetAudioHandler::new(storage);
        let result = handler
            .handle(GetAudioQuery {
                file_name: stored.file_name.to_string(),
            })
            .await
            .unwrap();

        assert_eq!(result.path, stored.path);
        assert_eq!(result.content_type, "audio/mpeg");
    }

    #[tokio::test]
    async fn test_rejects_foreign_file_name() {
        let dir = tempdir().unwrap();
        let storage = Arc::new(FileAudioStorage::new(dir.path()).await.unwrap());
        let handler = GetAudioHandler::new(storage);

        let err = handler
            .handle(GetAudioQuery {
                file_name: "../config.toml".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::ValidationError(_)));
    }

    #[tokio::test]
    async fn test_missing_audio_is_not_found() {
        let dir = tempdir().unwrap();
        let storage = Arc::new(FileAudioStorage::new(dir.path()).await.unwrap());
        let handler = GetAudioHandler::new(storage);

        let name = AudioKey::new("test", "v", "t", AudioFormat::Mp3).file_name();
        let err = handler
            .handle(GetAudioQuery {
                file_name: name.to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::NotFound { .. }));
    }
}
