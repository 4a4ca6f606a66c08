//! Voice Catalog Adapter

mod static_voice_catalog;

pub use static_voice_catalog::{StaticVoiceCatalog, VoiceEntry};
