//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量
//! 2. 配置文件（config.toml）
//! 3. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

use super::types::{AppConfig, TtsProvider};

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// 加载应用配置
///
/// 按优先级从高到低合并配置：
/// 1. 环境变量（前缀 `THAIZH_`，层级分隔符 `__`）
/// 2. 配置文件（config.toml 或 config.local.toml）
/// 3. 默认值
///
/// # 环境变量示例
/// - `THAIZH_SERVER__PORT=8080`
/// - `THAIZH_TRANSLATION__PROVIDER=google-web`
/// - `THAIZH_TTS__URL=http://edge-tts:5050`
/// - `THAIZH_STORAGE__AUDIO_DIR=/data/audio`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 默认值（最低优先级），音色目录由 serde default 提供
    builder = builder
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 5001)?
        .set_default("server.static_files.enabled", true)?
        .set_default("server.static_files.dir", "web")?
        .set_default("translation.provider", "hybrid")?
        .set_default("translation.api_url", "https://translate.googleapis.com")?
        .set_default("translation.web_url", "https://translate.google.com")?
        .set_default("translation.source_lang", "th")?
        .set_default("translation.target_lang", "zh-CN")?
        .set_default("translation.short_text_threshold", 500)?
        .set_default("translation.timeout_secs", 30)?
        .set_default("tts.provider", "http")?
        .set_default("tts.url", "http://localhost:5050")?
        .set_default("tts.endpoint_path", "/v1/audio/speech")?
        .set_default("tts.model", "tts-1")?
        .set_default("tts.speed", 1.0)?
        .set_default("tts.timeout_secs", 60)?
        .set_default("tts.default_voice", "1")?
        .set_default("convert.max_text_chars", 5000)?
        .set_default("convert.reuse_existing_audio", true)?
        .set_default("storage.audio_dir", "data/audio")?
        .set_default("gc.enabled", true)?
        .set_default("gc.interval_secs", 3600)?
        .set_default("gc.max_age_secs", 86400)?
        .set_default("gc.max_storage_bytes", 1024_u64 * 1024 * 1024)?
        .set_default("log.level", "info")?;

    // 2. 添加配置文件（如果存在）
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 环境变量（最高优先级）
    // 例如: THAIZH_TTS__URL=http://edge-tts:5050
    // 注意: 环境变量名会被转换为小写
    builder = builder.add_source(
        Environment::with_prefix("THAIZH")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;

    let app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    validate_config(&app_config)?;

    Ok(app_config)
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "Server port cannot be 0".to_string(),
        ));
    }

    if config.translation.api_url.is_empty() || config.translation.web_url.is_empty() {
        return Err(ConfigError::ValidationError(
            "Translation URLs cannot be empty".to_string(),
        ));
    }

    if config.translation.short_text_threshold == 0 {
        return Err(ConfigError::ValidationError(
            "Short text threshold must be greater than 0".to_string(),
        ));
    }

    if config.tts.provider == TtsProvider::Http && config.tts.url.is_empty() {
        return Err(ConfigError::ValidationError(
            "TTS URL cannot be empty".to_string(),
        ));
    }

    if !(0.25..=4.0).contains(&config.tts.speed) {
        return Err(ConfigError::ValidationError(format!(
            "TTS speed must be between 0.25 and 4.0, got {}",
            config.tts.speed
        )));
    }

    if config.convert.max_text_chars == 0 {
        return Err(ConfigError::ValidationError(
            "Max text chars must be greater than 0".to_string(),
        ));
    }

    // 音色目录: 非空、id 唯一、包含默认音色
    if config.voices.is_empty() {
        return Err(ConfigError::ValidationError(
            "Voice catalog cannot be empty".to_string(),
        ));
    }

    let mut ids = HashSet::new();
    for voice in &config.voices {
        if !ids.insert(voice.id.trim()) {
            return Err(ConfigError::ValidationError(format!(
                "Duplicate voice id: {}",
                voice.id
            )));
        }
    }

    if !ids.contains(config.tts.default_voice.trim()) {
        return Err(ConfigError::ValidationError(format!(
            "Default voice {} is not in the voice catalog",
            config.tts.default_voice
        )));
    }

    if config.gc.enabled && config.gc.interval_secs == 0 {
        return Err(ConfigError::ValidationError(
            "GC interval cannot be 0 when GC is enabled".to_string(),
        ));
    }

    Ok(())
}

/// 打印配置信息（用于启动时日志）
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Server: {}:{}", config.server.host, config.server.port);
    tracing::info!("Translation Provider: {}", config.translation.provider.as_str());
    tracing::info!(
        "Translation: {} -> {}",
        config.translation.source_lang,
        config.translation.target_lang
    );
    tracing::info!("TTS Provider: {:?}", config.tts.provider);
    tracing::info!("TTS URL: {}", config.tts.url);
    tracing::info!("TTS Timeout: {}s", config.tts.timeout_secs);
    tracing::info!("Voices: {}", config.voices.len());
    tracing::info!("Default Voice: {}", config.tts.default_voice);
    tracing::info!("Max Text Chars: {}", config.convert.max_text_chars);
    tracing::info!("Audio Directory: {:?}", config.storage.audio_dir);
    tracing::info!("GC Enabled: {}", config.gc.enabled);
    if config.gc.enabled {
        tracing::info!("GC Interval: {}s", config.gc.interval_secs);
        tracing::info!("Audio Max Age: {}s", config.gc.max_age_secs);
    }
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}
