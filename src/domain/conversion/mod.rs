//! Conversion Context - 泰文 → 中文 → 语音 转换上下文
//!
//! 职责:
//! - 输入文本校验
//! - 音频文件命名（内容寻址）与下载文件名

mod errors;
mod value_objects;

pub use errors::ConversionError;
pub use value_objects::{download_file_name, AudioFileName, AudioFormat, AudioKey, SourceText};
