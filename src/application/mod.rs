//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（Translator、TtsEngine、VoiceCatalog、AudioStorage）
//! - commands: CQRS 命令及处理器
//! - queries: CQRS 查询及处理器
//! - error: 应用层错误定义

pub mod commands;
pub mod error;
pub mod ports;
pub mod queries;

// Re-exports
pub use commands::{
    ConvertCommand,
    ConvertResponse,
    // Handlers
    handlers::{ConvertHandler, ConvertSettings},
};

pub use error::ApplicationError;

pub use ports::{
    // Audio storage
    AudioStorageError,
    AudioStoragePort,
    GcConfig,
    GcResult,
    StorageStats,
    StoredAudio,
    // Translator
    Translation,
    TranslationError,
    TranslatorPort,
    // TTS engine
    SynthesisRequest,
    SynthesizedAudio,
    TtsEnginePort,
    TtsError,
    // Voice catalog
    CatalogError,
    VoiceCatalogPort,
};

pub use queries::{
    // Audio queries
    GetAudioQuery,
    GetAudioResponse,
    // Health queries
    GetHealth,
    HealthResponse,
    // Voice queries
    ListVoices,
    // Handlers
    handlers::{GetAudioHandler, GetHealthHandler, ListVoicesHandler, VoiceResponse},
};
