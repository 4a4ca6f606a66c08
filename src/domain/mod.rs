//! Domain Layer - 领域层
//!
//! 包含两个限界上下文:
//! - Voice Context: 音色目录
//! - Conversion Context: 文本校验与音频命名

pub mod conversion;
pub mod voice;
