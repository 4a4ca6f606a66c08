//! Hybrid Translator
//!
//! 短文本优先使用 short_text 翻译器，长文本优先使用 long_text 翻译器；
//! 主翻译器失败（或返回空译文）时切换到另一个，结果标注 "(fallback)"

use async_trait::async_trait;
use std::sync::Arc;

use crate::application::ports::{Translation, TranslationError, TranslatorPort};

pub struct HybridTranslator {
    short_text: Arc<dyn TranslatorPort>,
    long_text: Arc<dyn TranslatorPort>,
    /// 短文本阈值（字符数，含）
    short_text_threshold: usize,
}

impl HybridTranslator {
    pub const NAME: &'static str = "hybrid";

    pub fn new(
        short_text: Arc<dyn TranslatorPort>,
        long_text: Arc<dyn TranslatorPort>,
        short_text_threshold: usize,
    ) -> Self {
        Self {
            short_text,
            long_text,
            short_text_threshold,
        }
    }

    async fn attempt(
        translator: &dyn TranslatorPort,
        text: &str,
    ) -> Result<Translation, TranslationError> {
        let translation = translator.translate(text).await?;
        if translation.text.trim().is_empty() {
            return Err(TranslationError::EmptyResult);
        }
        Ok(translation)
    }
}

#[async_trait]
impl TranslatorPort for HybridTranslator {
    fn name(&self) -> &str {
        Self::NAME
    }

    async fn translate(&self, text: &str) -> Result<Translation, TranslationError> {
        let (primary, secondary) = if text.chars().count() <= self.short_text_threshold {
            (&self.short_text, &self.long_text)
        } else {
            (&self.long_text, &self.short_text)
        };

        let primary_err = match Self::attempt(primary.as_ref(), text).await {
            Ok(translation) => return Ok(translation),
            Err(e) => e,
        };

        tracing::warn!(
            translator = %primary.name(),
            error = %primary_err,
            fallback = %secondary.name(),
            "Translator failed, switching to fallback"
        );

        match Self::attempt(secondary.as_ref(), text).await {
            Ok(translation) => Ok(Translation {
                text: translation.text,
                translator: format!("{} (fallback)", translation.translator),
            }),
            Err(secondary_err) => Err(TranslationError::AllFailed(format!(
                "All translators failed. {}: {}; {}: {}",
                primary.name(),
                primary_err,
                secondary.name(),
                secondary_err
            ))),
        }
    }
}
