//! Convert Command Handler
//!
//! 泰文 → 翻译 → 中文 → 语音合成 → 音频文件

use std::sync::Arc;

use crate::application::commands::{ConvertCommand, ConvertResponse};
use crate::application::error::ApplicationError;
use crate::application::ports::{
    AudioStoragePort, SynthesisRequest, TranslatorPort, TtsEnginePort, VoiceCatalogPort,
};
use crate::domain::conversion::{AudioKey, SourceText};
use crate::domain::voice::{Voice, VoiceId};

/// 转换参数
#[derive(Debug, Clone)]
pub struct ConvertSettings {
    /// 输入最大字符数
    pub max_text_chars: usize,
    /// 请求未指定音色时使用的音色 id
    pub default_voice: String,
    /// 相同 (音色, 译文) 是否复用已有音频
    pub reuse_existing_audio: bool,
}

impl Default for ConvertSettings {
    fn default() -> Self {
        Self {
            max_text_chars: 5000,
            default_voice: "1".to_string(),
            reuse_existing_audio: true,
        }
    }
}

/// Convert Handler
///
/// 单次请求内顺序调用翻译和合成，不重试
pub struct ConvertHandler {
    voice_catalog: Arc<dyn VoiceCatalogPort>,
    translator: Arc<dyn TranslatorPort>,
    tts_engine: Arc<dyn TtsEnginePort>,
    audio_storage: Arc<dyn AudioStoragePort>,
    settings: ConvertSettings,
}

impl ConvertHandler {
    pub fn new(
        voice_catalog: Arc<dyn VoiceCatalogPort>,
        translator: Arc<dyn TranslatorPort>,
        tts_engine: Arc<dyn TtsEnginePort>,
        audio_storage: Arc<dyn AudioStoragePort>,
        settings: ConvertSettings,
    ) -> Self {
        Self {
            voice_catalog,
            translator,
            tts_engine,
            audio_storage,
            settings,
        }
    }

    pub async fn handle(&self, command: ConvertCommand) -> Result<ConvertResponse, ApplicationError> {
        // 1. 校验输入（失败时不产生任何音频）
        let source = SourceText::new(&command.text, self.settings.max_text_chars)?;
        let voice = self.resolve_voice(command.voice.as_deref()).await?;

        // 2. 翻译
        let translation = self.translator.translate(source.as_str()).await?;
        let chinese = translation.text.trim().to_string();
        if chinese.is_empty() {
            return Err(ApplicationError::TranslationFailed(format!(
                "{} returned an empty translation",
                translation.translator
            )));
        }

        tracing::info!(
            chars = source.char_count(),
            translator = %translation.translator,
            voice = %voice.name(),
            "Text translated"
        );

        // 3. 相同内容直接复用
        let key = AudioKey::new(
            &self.tts_engine.cache_fingerprint(),
            voice.name().as_str(),
            &chinese,
            self.tts_engine.output_format(),
        );
        if self.settings.reuse_existing_audio {
            if let Some(stored) = self.audio_storage.find_audio(&key).await {
                tracing::info!(file = %stored.file_name, "Reusing existing audio");
                return Ok(ConvertResponse {
                    thai: source.as_str().to_string(),
                    chinese,
                    translator: translation.translator,
                    voice_id: voice.id().to_string(),
                    audio_file: stored.file_name,
                    reused: true,
                });
            }
        }

        // 4. 合成
        let audio = self
            .tts_engine
            .synthesize(SynthesisRequest {
                text: chinese.clone(),
                voice: voice.name().to_string(),
            })
            .await?;
        if audio.data.is_empty() {
            return Err(ApplicationError::SynthesisFailed(
                "backend returned no audio".to_string(),
            ));
        }

        // 5. 落盘
        let stored = self.audio_storage.save_audio(&key, &audio.data).await?;

        tracing::info!(
            file = %stored.file_name,
            size = stored.size_bytes,
            "Conversion completed"
        );

        Ok(ConvertResponse {
            thai: source.as_str().to_string(),
            chinese,
            translator: translation.translator,
            voice_id: voice.id().to_string(),
            audio_file: stored.file_name,
            reused: false,
        })
    }

    /// 解析音色：缺省使用默认音色，未知 id 直接拒绝
    async fn resolve_voice(&self, requested: Option<&str>) -> Result<Voice, ApplicationError> {
        let raw = match requested.map(str::trim) {
            Some(id) if !id.is_empty() => id,
            _ => self.settings.default_voice.as_str(),
        };
        let id = VoiceId::new(raw).map_err(ApplicationError::validation)?;

        self.voice_catalog
            .find(&id)
            .await?
            .ok_or_else(|| ApplicationError::validation(format!("Unknown voice: {}", id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{
        SynthesizedAudio, Translation, TranslationError, TtsError,
    };
    use crate::domain::conversion::AudioFormat;
    use crate::domain::voice::VoiceName;
    use crate::infrastructure::adapters::{FileAudioStorage, StaticVoiceCatalog};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::tempdir;

    struct StubTranslator {
        result: Result<&'static str, &'static str>,
    }

    #[async_trait]
    impl TranslatorPort for StubTranslator {
        fn name(&self) -> &str {
            "stub"
        }

        async fn translate(&self, _text: &str) -> Result<Translation, TranslationError> {
            match self.result {
                Ok(text) => Ok(Translation {
                    text: text.to_string(),
                    translator: "stub".to_string(),
                }),
                Err(msg) => Err(TranslationError::ServiceError(msg.to_string())),
            }
        }
    }

    #[derive(Default)]
    struct RecordingTts {
        calls: AtomicUsize,
        fail: bool,
        silent: bool,
        last_request: std::sync::Mutex<Option<SynthesisRequest>>,
        /// 模拟的后端配置，同时决定返回的音频内容
        engine: &'static str,
    }

    #[async_trait]
    impl TtsEnginePort for RecordingTts {
        fn cache_fingerprint(&self) -> String {
            format!("recording|{}", self.engine)
        }

        async fn synthesize(&self, request: SynthesisRequest) -> Result<SynthesizedAudio, TtsError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_request.lock().unwrap() = Some(request);
            if self.fail {
                return Err(TtsError::ServiceError("HTTP 500".to_string()));
            }
            let data = if self.silent {
                Vec::new()
            } else {
                format!("ID3fake{}", self.engine).into_bytes()
            };
            Ok(SynthesizedAudio {
                data,
                format: AudioFormat::Mp3,
            })
        }
    }

    fn catalog() -> Arc<StaticVoiceCatalog> {
        let voices = vec![
            Voice::new(
                VoiceId::new("1").unwrap(),
                VoiceName::new("zh-CN-XiaoxiaoNeural").unwrap(),
                "Xiaoxiao",
            ),
            Voice::new(
                VoiceId::new("4").unwrap(),
                VoiceName::new("zh-CN-YunxiNeural").unwrap(),
                "Yunxi",
            ),
        ];
        Arc::new(StaticVoiceCatalog::new(voices).unwrap())
    }

    struct Fixture {
        handler: ConvertHandler,
        tts: Arc<RecordingTts>,
        dir: tempfile::TempDir,
    }

    async fn fixture(translation: Result<&'static str, &'static str>, tts: RecordingTts) -> Fixture {
        let dir = tempdir().unwrap();
        let (handler, tts) = handler_in(dir.path(), translation, tts).await;
        Fixture { handler, tts, dir }
    }

    async fn handler_in(
        dir: &std::path::Path,
        translation: Result<&'static str, &'static str>,
        tts: RecordingTts,
    ) -> (ConvertHandler, Arc<RecordingTts>) {
        let storage = Arc::new(FileAudioStorage::new(dir).await.unwrap());
        let tts = Arc::new(tts);
        let handler = ConvertHandler::new(
            catalog(),
            Arc::new(StubTranslator { result: translation }),
            tts.clone(),
            storage,
            ConvertSettings::default(),
        );
        (handler, tts)
    }

    fn command(text: &str, voice: Option<&str>) -> ConvertCommand {
        ConvertCommand {
            text: text.to_string(),
            voice: voice.map(str::to_string),
        }
    }

    fn file_count(dir: &std::path::Path) -> usize {
        std::fs::read_dir(dir).unwrap().count()
    }

    #[tokio::test]
    async fn test_convert_success() {
        let f = fixture(Ok("你好"), RecordingTts::default()).await;

        let result = f.handler.handle(command(" สวัสดี ", Some("4"))).await.unwrap();

        assert_eq!(result.thai, "สวัสดี");
        assert_eq!(result.chinese, "你好");
        assert_eq!(result.translator, "stub");
        assert_eq!(result.voice_id, "4");
        assert!(!result.reused);
        assert!(f.dir.path().join(result.audio_file.as_str()).exists());

        // 合成收到的是中文译文和后端音色名
        let request = f.tts.last_request.lock().unwrap().clone().unwrap();
        assert_eq!(request.text, "你好");
        assert_eq!(request.voice, "zh-CN-YunxiNeural");
    }

    #[tokio::test]
    async fn test_missing_voice_uses_default() {
        let f = fixture(Ok("你好"), RecordingTts::default()).await;

        let result = f.handler.handle(command("สวัสดี", None)).await.unwrap();
        assert_eq!(result.voice_id, "1");

        let result = f.handler.handle(command("สวัสดีครับ", Some("  "))).await.unwrap();
        assert_eq!(result.voice_id, "1");
    }

    #[tokio::test]
    async fn test_empty_text_creates_no_audio() {
        let f = fixture(Ok("你好"), RecordingTts::default()).await;

        let err = f.handler.handle(command("   ", Some("1"))).await.unwrap_err();

        assert!(matches!(err, ApplicationError::ValidationError(_)));
        assert_eq!(err.to_string(), "No text provided");
        assert_eq!(f.tts.calls.load(Ordering::SeqCst), 0);
        assert_eq!(file_count(f.dir.path()), 0);
    }

    #[tokio::test]
    async fn test_unknown_voice_is_rejected() {
        let f = fixture(Ok("你好"), RecordingTts::default()).await;

        let err = f.handler.handle(command("สวัสดี", Some("99"))).await.unwrap_err();

        assert_eq!(err.to_string(), "Unknown voice: 99");
        assert_eq!(f.tts.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_translation_error() {
        let f = fixture(Err("quota exceeded"), RecordingTts::default()).await;

        let err = f.handler.handle(command("สวัสดี", Some("1"))).await.unwrap_err();

        assert!(matches!(err, ApplicationError::TranslationFailed(_)));
        assert!(err.to_string().starts_with("Translation failed:"));
        assert_eq!(f.tts.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_blank_translation_is_an_error() {
        let f = fixture(Ok("  "), RecordingTts::default()).await;

        let err = f.handler.handle(command("สวัสดี", Some("1"))).await.unwrap_err();
        assert!(matches!(err, ApplicationError::TranslationFailed(_)));
    }

    #[tokio::test]
    async fn test_synthesis_error() {
        let tts = RecordingTts {
            fail: true,
            ..Default::default()
        };
        let f = fixture(Ok("你好"), tts).await;

        let err = f.handler.handle(command("สวัสดี", Some("1"))).await.unwrap_err();

        assert!(err.to_string().starts_with("TTS generation failed:"));
        assert_eq!(file_count(f.dir.path()), 0);
    }

    #[tokio::test]
    async fn test_empty_audio_is_an_error() {
        let tts = RecordingTts {
            silent: true,
            ..Default::default()
        };
        let f = fixture(Ok("你好"), tts).await;

        let err = f.handler.handle(command("สวัสดี", Some("1"))).await.unwrap_err();
        assert!(matches!(err, ApplicationError::SynthesisFailed(_)));
    }

    #[tokio::test]
    async fn test_identical_conversion_reuses_audio() {
        let f = fixture(Ok("你好"), RecordingTts::default()).await;

        let first = f.handler.handle(command("สวัสดี", Some("1"))).await.unwrap();
        let second = f.handler.handle(command("สวัสดี", Some("1"))).await.unwrap();

        assert_eq!(first.audio_file, second.audio_file);
        assert!(second.reused);
        assert_eq!(f.tts.calls.load(Ordering::SeqCst), 1);
        assert_eq!(file_count(f.dir.path()), 1);
    }

    #[tokio::test]
    async fn test_engine_change_does_not_reuse_audio() {
        let dir = tempdir().unwrap();
        let (before, _) = handler_in(
            dir.path(),
            Ok("你好"),
            RecordingTts {
                engine: "fake",
                ..Default::default()
            },
        )
        .await;
        let old = before.handle(command("สวัสดี", Some("1"))).await.unwrap();

        // 同一目录，换了合成后端
        let (after, tts) = handler_in(
            dir.path(),
            Ok("你好"),
            RecordingTts {
                engine: "edge",
                ..Default::default()
            },
        )
        .await;
        let new = after.handle(command("สวัสดี", Some("1"))).await.unwrap();

        assert!(!new.reused);
        assert_ne!(old.audio_file, new.audio_file);
        assert_eq!(tts.calls.load(Ordering::SeqCst), 1);
        let bytes = std::fs::read(dir.path().join(new.audio_file.as_str())).unwrap();
        assert_eq!(bytes, b"ID3fakeedge");
        assert_eq!(file_count(dir.path()), 2);
    }
}
