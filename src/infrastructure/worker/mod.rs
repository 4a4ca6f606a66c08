//! Worker Layer - Background Task Processing
//!
//! 实现 AudioGcWorker，定期清理生成的音频文件

mod audio_gc_worker;

pub use audio_gc_worker::{AudioGcWorker, AudioGcWorkerConfig};
