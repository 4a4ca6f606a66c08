//! ThaiZh TTS - 泰文 → 中文翻译 + 语音合成服务
//!
//! 架构设计: DDD + CQRS + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Conversion Context: 输入文本、音频文件命名
//! - Voice Context: 音色目录条目
//!
//! 应用层 (application/):
//! - Ports: 端口定义（Translator, TtsEngine, VoiceCatalog, AudioStorage）
//! - Commands: 转换命令处理器
//! - Queries: 音色、音频、服务状态查询
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: JSON API + 静态文件
//! - Adapters: Google 翻译、TTS Client、音色目录、文件存储
//! - Worker: 音频目录 GC

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
