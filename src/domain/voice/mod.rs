//! Voice Context - 音色限界上下文
//!
//! 职责:
//! - 音色目录条目（id / 后端音色名 / 展示名）

mod aggregate;
mod value_objects;

pub use aggregate::Voice;
pub use value_objects::{VoiceId, VoiceName};
