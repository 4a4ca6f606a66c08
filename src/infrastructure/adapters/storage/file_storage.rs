//! File Storage - 文件系统音频存储实现
//!
//! 实现 AudioStoragePort trait
//!
//! 目录布局（扁平）:
//! - `th_cn_tts_<md5>.mp3`              已完成的音频
//! - `.th_cn_tts_<md5>.mp3.<uuid>.tmp`  写入中的临时文件

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tokio::fs;
use uuid::Uuid;

use crate::application::ports::{
    AudioStorageError, AudioStoragePort, GcConfig, GcResult, StorageStats, StoredAudio,
};
use crate::domain::conversion::{AudioFileName, AudioKey};

/// 临时文件超过该时间仍未重命名即视为残留
const STALE_TEMP_SECS: u64 = 3600;

/// 目录中的一个音频文件
#[derive(Debug)]
struct AudioEntry {
    path: PathBuf,
    size: u64,
    modified: SystemTime,
}

/// 文件系统音频存储
pub struct FileAudioStorage {
    /// 存储根目录
    base_dir: PathBuf,
}

impl FileAudioStorage {
    /// 创建新的文件存储
    pub async fn new(base_dir: impl AsRef<Path>) -> Result<Self, AudioStorageError> {
        let base_dir = base_dir.as_ref().to_path_buf();

        // 确保目录存在
        fs::create_dir_all(&base_dir)
            .await
            .map_err(|e| AudioStorageError::IoError(e.to_string()))?;

        Ok(Self { base_dir })
    }

    /// 获取存储根目录
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// 列出音频文件；`temps` 收集残留的临时文件
    async fn scan(&self, temps: &mut Vec<AudioEntry>) -> Result<Vec<AudioEntry>, AudioStorageError> {
        let mut audio = Vec::new();
        let mut entries = fs::read_dir(&self.base_dir)
            .await
            .map_err(|e| AudioStorageError::IoError(e.to_string()))?;

        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| AudioStorageError::IoError(e.to_string()))?
        {
            let Ok(metadata) = entry.metadata().await else {
                continue;
            };
            if !metadata.is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().to_string();
            let item = AudioEntry {
                path: entry.path(),
                size: metadata.len(),
                modified: metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH),
            };

            if AudioFileName::parse(&name).is_ok() {
                audio.push(item);
            } else if name.starts_with(".th_cn_tts_") && name.ends_with(".tmp") {
                temps.push(item);
            }
        }

        Ok(audio)
    }

    async fn remove(&self, entry: &AudioEntry, result: &mut GcResult) {
        match fs::remove_file(&entry.path).await {
            Ok(()) => {
                result.deleted_files += 1;
                result.freed_bytes += entry.size;
            }
            Err(e) => {
                tracing::warn!(path = %entry.path.display(), error = %e, "Failed to delete audio file");
            }
        }
    }
}

/// 刷新文件修改时间，使 GC 视其为最近使用
async fn touch(path: PathBuf) -> std::io::Result<()> {
    tokio::task::spawn_blocking(move || {
        std::fs::File::options()
            .write(true)
            .open(&path)?
            .set_modified(SystemTime::now())
    })
    .await
    .map_err(std::io::Error::other)?
}

fn older_than(modified: SystemTime, now: SystemTime, secs: u64) -> bool {
    now.duration_since(modified)
        .map(|age| age > Duration::from_secs(secs))
        .unwrap_or(false)
}

#[async_trait]
impl AudioStoragePort for FileAudioStorage {
    fn audio_path(&self, file_name: &AudioFileName) -> PathBuf {
        self.base_dir.join(file_name.as_str())
    }

    async fn find_audio(&self, key: &AudioKey) -> Option<StoredAudio> {
        let file_name = key.file_name();
        let path = self.audio_path(&file_name);

        let metadata = fs::metadata(&path).await.ok()?;
        if !metadata.is_file() || metadata.len() == 0 {
            return None;
        }

        if let Err(e) = touch(path.clone()).await {
            tracing::debug!(path = %path.display(), error = %e, "Failed to refresh audio mtime");
        }

        Some(StoredAudio {
            file_name,
            path,
            size_bytes: metadata.len(),
        })
    }

    async fn save_audio(&self, key: &AudioKey, data: &[u8]) -> Result<StoredAudio, AudioStorageError> {
        let file_name = key.file_name();
        let audio_path = self.audio_path(&file_name);
        let temp_path = self
            .base_dir
            .join(format!(".{}.{}.tmp", file_name, Uuid::new_v4().simple()));

        fs::write(&temp_path, data)
            .await
            .map_err(|e| AudioStorageError::IoError(e.to_string()))?;

        if let Err(e) = fs::rename(&temp_path, &audio_path).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(AudioStorageError::IoError(e.to_string()));
        }

        tracing::debug!(
            "Saved audio: file={}, size={} bytes",
            file_name,
            data.len()
        );

        Ok(StoredAudio {
            file_name,
            path: audio_path,
            size_bytes: data.len() as u64,
        })
    }

    async fn audio_exists(&self, file_name: &AudioFileName) -> bool {
        fs::metadata(self.audio_path(file_name))
            .await
            .map(|m| m.is_file())
            .unwrap_or(false)
    }

    async fn get_stats(&self) -> Result<StorageStats, AudioStorageError> {
        let files = self.scan(&mut Vec::new()).await?;

        Ok(StorageStats {
            used_bytes: files.iter().map(|f| f.size).sum(),
            file_count: files.len() as u64,
        })
    }

    async fn gc(&self, config: &GcConfig) -> Result<GcResult, AudioStorageError> {
        let now = SystemTime::now();
        let mut result = GcResult::default();
        let mut temps = Vec::new();
        let files = self.scan(&mut temps).await?;

        for temp in temps.iter().filter(|t| older_than(t.modified, now, STALE_TEMP_SECS)) {
            self.remove(temp, &mut result).await;
        }

        // 1. 按保留时间清理
        let (expired, mut kept): (Vec<_>, Vec<_>) = files
            .into_iter()
            .partition(|f| older_than(f.modified, now, config.max_age_secs));
        for entry in &expired {
            self.remove(entry, &mut result).await;
        }

        // 2. 超出容量时最旧优先清理
        if config.max_storage_bytes > 0 {
            kept.sort_by_key(|f| f.modified);
            let mut used: u64 = kept.iter().map(|f| f.size).sum();
            for entry in &kept {
                if used <= config.max_storage_bytes {
                    break;
                }
                self.remove(entry, &mut result).await;
                used = used.saturating_sub(entry.size);
            }
        }

        if result.deleted_files > 0 {
            tracing::info!(
                deleted_files = result.deleted_files,
                freed_bytes = result.freed_bytes,
                "Audio GC completed"
            );
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::conversion::AudioFormat;
    use tempfile::tempdir;

    fn key(text: &str) -> AudioKey {
        AudioKey::new("test", "zh-CN-XiaoxiaoNeural", text, AudioFormat::Mp3)
    }

    fn age(path: &Path, secs: u64) {
        std::fs::File::options()
            .write(true)
            .open(path)
            .unwrap()
            .set_modified(SystemTime::now() - Duration::from_secs(secs))
            .unwrap();
    }

    #[tokio::test]
    async fn test_save_and_find_audio() {
        let temp_dir = tempdir().unwrap();
        let storage = FileAudioStorage::new(temp_dir.path()).await.unwrap();
        let key = key("你好");

        assert!(storage.find_audio(&key).await.is_none());

        // Save
        let stored = storage.save_audio(&key, b"fake mp3 data").await.unwrap();
        assert!(stored.path.exists());
        assert_eq!(stored.size_bytes, 13);
        assert_eq!(stored.file_name, key.file_name());

        // Find
        let found = storage.find_audio(&key).await.unwrap();
        assert_eq!(found.path, stored.path);
        assert!(storage.audio_exists(&stored.file_name).await);
    }

    #[tokio::test]
    async fn test_save_leaves_no_temp_files() {
        let temp_dir = tempdir().unwrap();
        let storage = FileAudioStorage::new(temp_dir.path()).await.unwrap();

        storage.save_audio(&key("a"), b"1").await.unwrap();
        storage.save_audio(&key("a"), b"22").await.unwrap();

        let names: Vec<_> = std::fs::read_dir(temp_dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec![key("a").file_name().to_string()]);
    }

    #[tokio::test]
    async fn test_find_refreshes_mtime() {
        let temp_dir = tempdir().unwrap();
        let storage = FileAudioStorage::new(temp_dir.path()).await.unwrap();
        let stored = storage.save_audio(&key("a"), b"data").await.unwrap();
        age(&stored.path, 7200);

        storage.find_audio(&key("a")).await.unwrap();

        let modified = std::fs::metadata(&stored.path).unwrap().modified().unwrap();
        assert!(!older_than(modified, SystemTime::now(), 60));
    }

    #[tokio::test]
    async fn test_stats_ignore_foreign_files() {
        let temp_dir = tempdir().unwrap();
        let storage = FileAudioStorage::new(temp_dir.path()).await.unwrap();
        storage.save_audio(&key("a"), b"1234").await.unwrap();
        storage.save_audio(&key("b"), b"56").await.unwrap();
        std::fs::write(temp_dir.path().join("README.txt"), b"keep me").unwrap();

        let stats = storage.get_stats().await.unwrap();
        assert_eq!(stats.file_count, 2);
        assert_eq!(stats.used_bytes, 6);
    }

    #[tokio::test]
    async fn test_gc_removes_expired_files() {
        let temp_dir = tempdir().unwrap();
        let storage = FileAudioStorage::new(temp_dir.path()).await.unwrap();
        let old = storage.save_audio(&key("old"), b"1234").await.unwrap();
        let fresh = storage.save_audio(&key("fresh"), b"56").await.unwrap();
        age(&old.path, 7200);

        let config = GcConfig {
            max_age_secs: 3600,
            max_storage_bytes: 0,
        };
        let result = storage.gc(&config).await.unwrap();

        assert_eq!(result.deleted_files, 1);
        assert_eq!(result.freed_bytes, 4);
        assert!(!old.path.exists());
        assert!(fresh.path.exists());
    }

    #[tokio::test]
    async fn test_gc_evicts_oldest_over_capacity() {
        let temp_dir = tempdir().unwrap();
        let storage = FileAudioStorage::new(temp_dir.path()).await.unwrap();
        let oldest = storage.save_audio(&key("1"), b"aaaa").await.unwrap();
        let middle = storage.save_audio(&key("2"), b"bbbb").await.unwrap();
        let newest = storage.save_audio(&key("3"), b"cccc").await.unwrap();
        age(&oldest.path, 300);
        age(&middle.path, 200);
        age(&newest.path, 100);

        let config = GcConfig {
            max_age_secs: 86400,
            max_storage_bytes: 8,
        };
        let result = storage.gc(&config).await.unwrap();

        assert_eq!(result.deleted_files, 1);
        assert!(!oldest.path.exists());
        assert!(middle.path.exists());
        assert!(newest.path.exists());
    }

    #[tokio::test]
    async fn test_gc_removes_stale_temp_files() {
        let temp_dir = tempdir().unwrap();
        let storage = FileAudioStorage::new(temp_dir.path()).await.unwrap();
        let stale = temp_dir.path().join(".th_cn_tts_x.mp3.123.tmp");
        let active = temp_dir.path().join(".th_cn_tts_y.mp3.456.tmp");
        std::fs::write(&stale, b"partial").unwrap();
        std::fs::write(&active, b"partial").unwrap();
        age(&stale, STALE_TEMP_SECS + 60);

        storage.gc(&GcConfig::default()).await.unwrap();

        assert!(!stale.exists());
        assert!(active.exists());
    }
}
