//! Voice Context - Aggregate Root

use serde::{Deserialize, Serialize};

use super::{VoiceId, VoiceName};

/// Voice 聚合根
///
/// 不变量:
/// - id 在目录中唯一
/// - 创建后只读
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Voice {
    id: VoiceId,
    name: VoiceName,
    label: String,
}

impl Voice {
    pub fn new(id: VoiceId, name: VoiceName, label: impl Into<String>) -> Self {
        let label = label.into();
        // 未提供展示名时退回到后端音色名
        let label = if label.trim().is_empty() {
            name.as_str().to_string()
        } else {
            label
        };
        Self { id, name, label }
    }

    pub fn id(&self) -> &VoiceId {
        &self.id
    }

    pub fn name(&self) -> &VoiceName {
        &self.name
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}
