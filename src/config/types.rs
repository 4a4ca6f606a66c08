//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;
use std::path::PathBuf;

/// 应用主配置
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,

    /// 翻译配置
    #[serde(default)]
    pub translation: TranslationConfig,

    /// TTS 引擎配置
    #[serde(default)]
    pub tts: TtsConfig,

    /// 音色目录
    #[serde(default = "default_voices")]
    pub voices: Vec<VoiceConfig>,

    /// 转换配置
    #[serde(default)]
    pub convert: ConvertConfig,

    /// 存储配置
    #[serde(default)]
    pub storage: StorageConfig,

    /// GC 配置
    #[serde(default)]
    pub gc: GcConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            translation: TranslationConfig::default(),
            tts: TtsConfig::default(),
            voices: default_voices(),
            convert: ConvertConfig::default(),
            storage: StorageConfig::default(),
            gc: GcConfig::default(),
            log: LogConfig::default(),
        }
    }
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,

    /// 对外访问地址，为空时 audio_url 使用相对路径
    #[serde(default)]
    pub base_url: String,

    /// 静态文件服务配置
    #[serde(default)]
    pub static_files: StaticFilesConfig,
}

/// 静态文件服务配置（前端页面）
#[derive(Debug, Clone, Deserialize)]
pub struct StaticFilesConfig {
    /// 是否启用静态文件服务
    #[serde(default = "default_static_enabled")]
    pub enabled: bool,

    /// 静态文件目录
    #[serde(default = "default_static_dir")]
    pub dir: PathBuf,
}

fn default_static_enabled() -> bool {
    true
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("web")
}

impl Default for StaticFilesConfig {
    fn default() -> Self {
        Self {
            enabled: default_static_enabled(),
            dir: default_static_dir(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5001
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            base_url: String::new(),
            static_files: StaticFilesConfig::default(),
        }
    }
}

impl ServerConfig {
    /// 获取服务器地址
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// 音频 URL 前缀
    pub fn audio_url_prefix(&self) -> String {
        format!("{}/static/audio", self.base_url.trim_end_matches('/'))
    }
}

/// 翻译器选择
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TranslationProvider {
    /// 按长度选择，失败切换
    #[default]
    Hybrid,
    GoogleApi,
    GoogleWeb,
}

impl TranslationProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hybrid => "hybrid",
            Self::GoogleApi => "google-api",
            Self::GoogleWeb => "google-web",
        }
    }
}

/// 翻译配置
#[derive(Debug, Clone, Deserialize)]
pub struct TranslationConfig {
    #[serde(default)]
    pub provider: TranslationProvider,

    /// gtx 接口基础 URL
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// 网页版基础 URL
    #[serde(default = "default_web_url")]
    pub web_url: String,

    /// 源语言
    #[serde(default = "default_source_lang")]
    pub source_lang: String,

    /// 目标语言
    #[serde(default = "default_target_lang")]
    pub target_lang: String,

    /// 短文本阈值（字符数），hybrid 模式下决定主翻译器
    #[serde(default = "default_short_text_threshold")]
    pub short_text_threshold: usize,

    /// 请求超时时间（秒）
    #[serde(default = "default_translation_timeout")]
    pub timeout_secs: u64,
}

fn default_api_url() -> String {
    "https://translate.googleapis.com".to_string()
}

fn default_web_url() -> String {
    "https://translate.google.com".to_string()
}

fn default_source_lang() -> String {
    "th".to_string()
}

fn default_target_lang() -> String {
    "zh-CN".to_string()
}

fn default_short_text_threshold() -> usize {
    500
}

fn default_translation_timeout() -> u64 {
    30
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            provider: TranslationProvider::default(),
            api_url: default_api_url(),
            web_url: default_web_url(),
            source_lang: default_source_lang(),
            target_lang: default_target_lang(),
            short_text_threshold: default_short_text_threshold(),
            timeout_secs: default_translation_timeout(),
        }
    }
}

/// 合成后端选择
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TtsProvider {
    #[default]
    Http,
    /// 返回固定音频，离线调试用
    Fake,
}

/// TTS 引擎配置
#[derive(Debug, Clone, Deserialize)]
pub struct TtsConfig {
    #[serde(default)]
    pub provider: TtsProvider,

    /// TTS 服务基础 URL
    #[serde(default = "default_tts_url")]
    pub url: String,

    /// 合成接口路径
    #[serde(default = "default_tts_endpoint")]
    pub endpoint_path: String,

    /// 模型名
    #[serde(default = "default_tts_model")]
    pub model: String,

    /// Bearer token
    #[serde(default)]
    pub api_key: Option<String>,

    /// 语速
    #[serde(default = "default_tts_speed")]
    pub speed: f32,

    /// 请求超时时间（秒）
    #[serde(default = "default_tts_timeout")]
    pub timeout_secs: u64,

    /// 请求未指定音色时使用的音色 id
    #[serde(default = "default_voice_id")]
    pub default_voice: String,

    /// fake 模式返回的音频文件
    #[serde(default)]
    pub fake_audio_path: Option<PathBuf>,
}

fn default_tts_url() -> String {
    "http://localhost:5050".to_string()
}

fn default_tts_endpoint() -> String {
    "/v1/audio/speech".to_string()
}

fn default_tts_model() -> String {
    "tts-1".to_string()
}

fn default_tts_speed() -> f32 {
    1.0
}

fn default_tts_timeout() -> u64 {
    60
}

fn default_voice_id() -> String {
    "1".to_string()
}

impl Default for TtsConfig {
    fn default() -> Self {
        Self {
            provider: TtsProvider::default(),
            url: default_tts_url(),
            endpoint_path: default_tts_endpoint(),
            model: default_tts_model(),
            api_key: None,
            speed: default_tts_speed(),
            timeout_secs: default_tts_timeout(),
            default_voice: default_voice_id(),
            fake_audio_path: None,
        }
    }
}

/// 音色目录条目
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VoiceConfig {
    pub id: String,
    /// 后端音色名
    pub name: String,
    /// 展示名
    #[serde(default)]
    pub label: String,
}

fn default_voices() -> Vec<VoiceConfig> {
    [
        ("1", "zh-CN-XiaoxiaoNeural", "Xiaoxiao (Female - Warm)"),
        ("2", "zh-CN-XiaoyiNeural", "Xiaoyi (Female - Lively)"),
        ("3", "zh-CN-YunxiaNeural", "Yunxia (Female - Cute)"),
        ("4", "zh-CN-YunxiNeural", "Yunxi (Male - Sunshine)"),
        ("5", "zh-CN-YunjianNeural", "Yunjian (Male - Passionate)"),
        ("6", "zh-CN-YunyangNeural", "Yunyang (Male - Professional)"),
    ]
    .into_iter()
    .map(|(id, name, label)| VoiceConfig {
        id: id.to_string(),
        name: name.to_string(),
        label: label.to_string(),
    })
    .collect()
}

/// 转换配置
#[derive(Debug, Clone, Deserialize)]
pub struct ConvertConfig {
    /// 输入最大字符数（Google 翻译单次上限 5000）
    #[serde(default = "default_max_text_chars")]
    pub max_text_chars: usize,

    /// 相同 (音色, 译文) 复用已有音频
    #[serde(default = "default_reuse_existing_audio")]
    pub reuse_existing_audio: bool,
}

fn default_max_text_chars() -> usize {
    5000
}

fn default_reuse_existing_audio() -> bool {
    true
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            max_text_chars: default_max_text_chars(),
            reuse_existing_audio: default_reuse_existing_audio(),
        }
    }
}

/// 存储配置
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// 音频存储目录
    #[serde(default = "default_audio_dir")]
    pub audio_dir: PathBuf,
}

fn default_audio_dir() -> PathBuf {
    PathBuf::from("data/audio")
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            audio_dir: default_audio_dir(),
        }
    }
}

/// GC（垃圾回收）配置
#[derive(Debug, Clone, Deserialize)]
pub struct GcConfig {
    /// 是否启用自动 GC
    #[serde(default = "default_gc_enabled")]
    pub enabled: bool,

    /// GC 间隔时间（秒）
    #[serde(default = "default_gc_interval")]
    pub interval_secs: u64,

    /// 音频保留时间（秒）
    #[serde(default = "default_max_age")]
    pub max_age_secs: u64,

    /// 最大存储空间（字节），0 表示不限制
    #[serde(default = "default_max_storage")]
    pub max_storage_bytes: u64,
}

fn default_gc_enabled() -> bool {
    true
}

fn default_gc_interval() -> u64 {
    3600 // 1 小时
}

fn default_max_age() -> u64 {
    86400 // 24 小时
}

fn default_max_storage() -> u64 {
    1024 * 1024 * 1024 // 1 GB
}

impl Default for GcConfig {
    fn default() -> Self {
        Self {
            enabled: default_gc_enabled(),
            interval_secs: default_gc_interval(),
            max_age_secs: default_max_age(),
            max_storage_bytes: default_max_storage(),
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}
