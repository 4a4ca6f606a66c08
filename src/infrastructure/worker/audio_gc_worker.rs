//! Audio GC Worker - 定期清理过期音频

use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::{AudioStoragePort, GcConfig, GcResult};

/// Worker 配置
#[derive(Debug, Clone)]
pub struct AudioGcWorkerConfig {
    /// GC 间隔
    pub interval: Duration,
    /// 清理策略
    pub gc: GcConfig,
}

impl Default for AudioGcWorkerConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(3600),
            gc: GcConfig::default(),
        }
    }
}

/// 音频 GC Worker
///
/// 启动时立即执行一次，之后按固定间隔执行
pub struct AudioGcWorker {
    config: AudioGcWorkerConfig,
    storage: Arc<dyn AudioStoragePort>,
}

impl AudioGcWorker {
    pub fn new(config: AudioGcWorkerConfig, storage: Arc<dyn AudioStoragePort>) -> Self {
        Self { config, storage }
    }

    /// 执行一次 GC，错误只记录日志
    pub async fn run_once(&self) -> Option<GcResult> {
        match self.storage.gc(&self.config.gc).await {
            Ok(result) => Some(result),
            Err(e) => {
                tracing::error!(error = %e, "Audio GC failed");
                None
            }
        }
    }

    /// 启动 Worker
    pub async fn run(self) {
        tracing::info!(
            interval_secs = self.config.interval.as_secs(),
            max_age_secs = self.config.gc.max_age_secs,
            max_storage_bytes = self.config.gc.max_storage_bytes,
            "AudioGcWorker started"
        );

        let mut ticker = tokio::time::interval(self.config.interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            self.run_once().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::conversion::{AudioFormat, AudioKey};
    use crate::infrastructure::adapters::FileAudioStorage;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_run_once_enforces_capacity() {
        let temp_dir = tempdir().unwrap();
        let storage = Arc::new(FileAudioStorage::new(temp_dir.path()).await.unwrap());
        for text in ["a", "b", "c"] {
            let key = AudioKey::new("test", "v", text, AudioFormat::Mp3);
            storage.save_audio(&key, b"12345").await.unwrap();
        }

        let worker = AudioGcWorker::new(
            AudioGcWorkerConfig {
                interval: Duration::from_secs(60),
                gc: GcConfig {
                    max_age_secs: 86400,
                    max_storage_bytes: 10,
                },
            },
            storage.clone(),
        );
        let result = worker.run_once().await.unwrap();

        assert_eq!(result.deleted_files, 1);
        assert_eq!(storage.get_stats().await.unwrap().file_count, 2);
    }
}
