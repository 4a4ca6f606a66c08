//! Voice Context - Value Objects

use serde::{Deserialize, Serialize};

/// 音色标识（目录中的选项编号，如 "1"）
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VoiceId(String);

impl VoiceId {
    pub fn new(id: impl Into<String>) -> Result<Self, &'static str> {
        let id = id.into().trim().to_string();
        if id.is_empty() {
            return Err("voice id cannot be empty");
        }
        if id.len() > 64 {
            return Err("voice id cannot exceed 64 characters");
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for VoiceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 合成后端使用的音色名称（如 "zh-CN-XiaoxiaoNeural"）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceName(String);

impl VoiceName {
    pub fn new(name: impl Into<String>) -> Result<Self, &'static str> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err("voice name cannot be empty");
        }
        if name.len() > 100 {
            return Err("voice name cannot exceed 100 characters");
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for VoiceName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_voice_id_trims() {
        let id = VoiceId::new(" 3 ").unwrap();
        assert_eq!(id.as_str(), "3");
    }

    #[test]
    fn test_voice_id_rejects_blank() {
        assert!(VoiceId::new("   ").is_err());
        assert!(VoiceId::new("x".repeat(65)).is_err());
    }

    #[test]
    fn test_voice_name_rejects_empty() {
        assert!(VoiceName::new("").is_err());
        assert_eq!(
            VoiceName::new("zh-CN-YunxiNeural").unwrap().to_string(),
            "zh-CN-YunxiNeural"
        );
    }
}
