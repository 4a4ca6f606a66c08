//! ThaiZh TTS - 泰文 → 中文语音
//!
//! - Domain: conversion/, voice/
//! - Application: commands, queries, ports
//! - Infrastructure: http, adapters, worker

use std::sync::Arc;
use std::time::Duration;

use thaizh_tts::application::{
    ConvertSettings, GcConfig as StorageGcConfig, TranslatorPort, TtsEnginePort,
};
use thaizh_tts::config::{
    load_config, print_config, AppConfig, TranslationProvider, TtsProvider,
};
use thaizh_tts::infrastructure::adapters::{
    FakeTtsClient, FakeTtsClientConfig, FileAudioStorage, GoogleApiTranslator,
    GoogleTranslatorConfig, GoogleWebTranslator, HttpTtsClient, HttpTtsClientConfig,
    HybridTranslator, StaticVoiceCatalog, VoiceEntry,
};
use thaizh_tts::infrastructure::http::{AppState, HttpServer};
use thaizh_tts::infrastructure::worker::{AudioGcWorker, AudioGcWorkerConfig};

/// 按配置创建翻译器
fn build_translator(config: &AppConfig) -> anyhow::Result<Arc<dyn TranslatorPort>> {
    let t = &config.translation;
    let api_config = GoogleTranslatorConfig::new(&t.api_url)
        .with_languages(&t.source_lang, &t.target_lang)
        .with_timeout(t.timeout_secs);
    let web_config = GoogleTranslatorConfig::new(&t.web_url)
        .with_languages(&t.source_lang, &t.target_lang)
        .with_timeout(t.timeout_secs);

    let translator: Arc<dyn TranslatorPort> = match t.provider {
        TranslationProvider::GoogleApi => Arc::new(GoogleApiTranslator::new(api_config)?),
        TranslationProvider::GoogleWeb => Arc::new(GoogleWebTranslator::new(web_config)?),
        TranslationProvider::Hybrid => Arc::new(HybridTranslator::new(
            Arc::new(GoogleApiTranslator::new(api_config)?),
            Arc::new(GoogleWebTranslator::new(web_config)?),
            t.short_text_threshold,
        )),
    };
    Ok(translator)
}

/// 按配置创建语音合成引擎
fn build_tts_engine(config: &AppConfig) -> anyhow::Result<Arc<dyn TtsEnginePort>> {
    let tts = &config.tts;
    let engine: Arc<dyn TtsEnginePort> = match tts.provider {
        TtsProvider::Http => {
            let mut http = HttpTtsClientConfig {
                endpoint_path: tts.endpoint_path.clone(),
                model: tts.model.clone(),
                speed: tts.speed,
                ..HttpTtsClientConfig::new(&tts.url).with_timeout(tts.timeout_secs)
            };
            if let Some(key) = tts.api_key.as_deref().filter(|k| !k.is_empty()) {
                http = http.with_api_key(key);
            }
            Arc::new(HttpTtsClient::new(http)?)
        }
        // 始终返回固定音频，不调用 TTS 服务
        TtsProvider::Fake => Arc::new(FakeTtsClient::new(FakeTtsClientConfig {
            audio_file_path: tts.fake_audio_path.clone(),
            latency_ms: 0,
        })?),
    };
    Ok(engine)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    // 初始化日志
    let log_filter = format!(
        "{},thaizh_tts={},tower_http=debug",
        config.log.level, config.log.level
    );
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter)),
        )
        .init();

    tracing::info!("ThaiZh TTS - 泰文 → 中文语音");
    print_config(&config);

    // 音色目录
    let entries: Vec<VoiceEntry> = config
        .voices
        .iter()
        .map(|v| VoiceEntry::new(&v.id, &v.name, &v.label))
        .collect();
    let voice_catalog = Arc::new(StaticVoiceCatalog::from_entries(&entries)?);

    // 翻译器、语音合成引擎
    let translator = build_translator(&config)?;
    let tts_engine = build_tts_engine(&config)?;

    if !tts_engine.health_check().await {
        tracing::warn!(url = %config.tts.url, "TTS backend is not reachable, conversions will fail until it is up");
    }

    // 音频存储（目录不存在时创建）
    let audio_storage = Arc::new(FileAudioStorage::new(&config.storage.audio_dir).await?);

    // 启动 GC Worker
    if config.gc.enabled {
        let worker = AudioGcWorker::new(
            AudioGcWorkerConfig {
                interval: Duration::from_secs(config.gc.interval_secs),
                gc: StorageGcConfig {
                    max_age_secs: config.gc.max_age_secs,
                    max_storage_bytes: config.gc.max_storage_bytes,
                },
            },
            audio_storage.clone(),
        );
        tokio::spawn(worker.run());
    }

    // 创建 HTTP 服务器
    let settings = ConvertSettings {
        max_text_chars: config.convert.max_text_chars,
        default_voice: config.tts.default_voice.clone(),
        reuse_existing_audio: config.convert.reuse_existing_audio,
    };
    let mut state = AppState::new(
        voice_catalog,
        translator,
        tts_engine,
        audio_storage.clone(),
        settings,
        audio_storage.base_dir().to_path_buf(),
    )
    .with_audio_url_prefix(config.server.audio_url_prefix());

    if config.server.static_files.enabled {
        state = state.with_web_dir(&config.server.static_files.dir);
    }

    let server = HttpServer::new(config.server.addr(), state);

    // 启动服务器（带优雅关闭）
    server
        .run_with_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for ctrl-c");
                std::future::pending::<()>().await;
            }
            tracing::info!("Received shutdown signal");
        })
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}
