//! Conversion Context - Value Objects

use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};

use super::ConversionError;

/// 待翻译的泰文输入
///
/// 不变量:
/// - 去除首尾空白后非空
/// - 字符数不超过上限
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceText(String);

impl SourceText {
    pub fn new(raw: &str, max_chars: usize) -> Result<Self, ConversionError> {
        let text = raw.trim();
        if text.is_empty() {
            return Err(ConversionError::EmptyText);
        }
        let len = text.chars().count();
        if len > max_chars {
            return Err(ConversionError::TextTooLong { len, max: max_chars });
        }
        Ok(Self(text.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn char_count(&self) -> usize {
        self.0.chars().count()
    }
}

/// 音频格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioFormat {
    #[default]
    Mp3,
    Wav,
}

impl AudioFormat {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "mp3" => Some(Self::Mp3),
            "wav" => Some(Self::Wav),
            _ => None,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Mp3 => "mp3",
            Self::Wav => "wav",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Mp3 => "audio/mpeg",
            Self::Wav => "audio/wav",
        }
    }
}

const AUDIO_FILE_PREFIX: &str = "th_cn_tts_";

/// 音频内容键
///
/// 由 (合成引擎指纹, 音色名, 合成文本) 决定，相同输入映射到同一个文件；
/// 引擎配置（后端、模型、语速）变化后不会命中旧音频
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AudioKey {
    digest: String,
    format: AudioFormat,
}

impl AudioKey {
    pub fn new(engine: &str, voice_name: &str, text: &str, format: AudioFormat) -> Self {
        // 0x1f 分隔，避免 ("ab", "c") 与 ("a", "bc") 碰撞
        let digest = md5::compute(format!("{}\u{1f}{}\u{1f}{}", engine, voice_name, text));
        Self {
            digest: format!("{:x}", digest),
            format,
        }
    }

    pub fn digest(&self) -> &str {
        &self.digest
    }

    pub fn file_name(&self) -> AudioFileName {
        AudioFileName(format!(
            "{}{}.{}",
            AUDIO_FILE_PREFIX,
            self.digest,
            self.format.extension()
        ))
    }
}

/// 服务生成的音频文件名
///
/// 只接受 `th_cn_tts_<32 位十六进制>.<mp3|wav>`，不含任何路径分隔符
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AudioFileName(String);

impl AudioFileName {
    pub fn parse(name: &str) -> Result<Self, ConversionError> {
        let invalid = || ConversionError::InvalidAudioFileName(name.to_string());

        let rest = name.strip_prefix(AUDIO_FILE_PREFIX).ok_or_else(invalid)?;
        let (digest, ext) = rest.split_once('.').ok_or_else(invalid)?;

        if digest.len() != 32 || !digest.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f')) {
            return Err(invalid());
        }
        AudioFormat::from_extension(ext)
            .filter(|f| f.extension() == ext)
            .ok_or_else(invalid)?;

        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn format(&self) -> AudioFormat {
        self.0
            .rsplit('.')
            .next()
            .and_then(AudioFormat::from_extension)
            .unwrap_or_default()
    }
}

impl std::fmt::Display for AudioFileName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 浏览器下载时使用的文件名：`tts_output_<YYYYmmdd_HHMMSS>.<ext>`
pub fn download_file_name<Tz: TimeZone>(at: &DateTime<Tz>, format: AudioFormat) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!(
        "tts_output_{}.{}",
        at.format("%Y%m%d_%H%M%S"),
        format.extension()
    )
}
