//! Conversion Context - Errors

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConversionError {
    #[error("No text provided")]
    EmptyText,

    #[error("Text too long: {len} characters (max {max})")]
    TextTooLong { len: usize, max: usize },

    #[error("Invalid audio file name: {0}")]
    InvalidAudioFileName(String),
}
