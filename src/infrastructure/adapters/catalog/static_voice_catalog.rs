//! Static Voice Catalog - 启动时构建的只读音色目录

use async_trait::async_trait;
use std::collections::HashSet;

use crate::application::ports::{CatalogError, VoiceCatalogPort};
use crate::domain::voice::{Voice, VoiceId, VoiceName};

/// 目录条目（来自配置）
#[derive(Debug, Clone)]
pub struct VoiceEntry {
    pub id: String,
    pub name: String,
    pub label: String,
}

impl VoiceEntry {
    pub fn new(id: &str, name: &str, label: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            label: label.to_string(),
        }
    }
}

/// 只读音色目录
///
/// 不变量: id 唯一，顺序与构建时一致
pub struct StaticVoiceCatalog {
    voices: Vec<Voice>,
}

impl StaticVoiceCatalog {
    pub fn new(voices: Vec<Voice>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for voice in &voices {
            if !seen.insert(voice.id().clone()) {
                return Err(CatalogError::DuplicateId(voice.id().to_string()));
            }
        }
        Ok(Self { voices })
    }

    pub fn from_entries(entries: &[VoiceEntry]) -> Result<Self, CatalogError> {
        let voices = entries
            .iter()
            .map(|entry| {
                let id = VoiceId::new(entry.id.as_str())
                    .map_err(|e| CatalogError::InvalidEntry(format!("{:?}: {}", entry.id, e)))?;
                let name = VoiceName::new(entry.name.as_str())
                    .map_err(|e| CatalogError::InvalidEntry(format!("{}: {}", id, e)))?;
                Ok(Voice::new(id, name, entry.label.as_str()))
            })
            .collect::<Result<Vec<_>, CatalogError>>()?;

        Self::new(voices)
    }

    /// 默认配置中的六个 Edge 中文音色
    #[cfg(test)]
    pub(crate) fn edge_chinese() -> Self {
        let entries: Vec<VoiceEntry> = crate::config::AppConfig::default()
            .voices
            .iter()
            .map(|v| VoiceEntry::new(&v.id, &v.name, &v.label))
            .collect();
        Self::from_entries(&entries).expect("default voices are valid")
    }
}

#[async_trait]
impl VoiceCatalogPort for StaticVoiceCatalog {
    async fn list(&self) -> Result<Vec<Voice>, CatalogError> {
        Ok(self.voices.clone())
    }

    async fn find(&self, id: &VoiceId) -> Result<Option<Voice>, CatalogError> {
        Ok(self.voices.iter().find(|v| v.id() == id).cloned())
    }
}
