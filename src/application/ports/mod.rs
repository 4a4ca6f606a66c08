//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod audio_storage;
mod translator;
mod tts_engine;
mod voice_catalog;

pub use audio_storage::{
    AudioStorageError, AudioStoragePort, GcConfig, GcResult, StorageStats, StoredAudio,
};
pub use translator::{Translation, TranslationError, TranslatorPort};
pub use tts_engine::{SynthesisRequest, SynthesizedAudio, TtsEnginePort, TtsError};
pub use voice_catalog::{CatalogError, VoiceCatalogPort};
