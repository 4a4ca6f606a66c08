//! Google API Translator
//!
//! POST {base_url}/translate_a/single?client=gtx&sl=th&tl=zh-CN&dt=t
//! Body: q=<text> (form)
//! Response: [[["你好","สวัสดี",null,null,10], ...], null, "th", ...]

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use super::{build_client, ensure_success, map_request_error, GoogleTranslatorConfig};
use crate::application::ports::{Translation, TranslationError, TranslatorPort};

pub struct GoogleApiTranslator {
    client: Client,
    config: GoogleTranslatorConfig,
}

impl GoogleApiTranslator {
    pub const NAME: &'static str = "google-api";

    pub fn new(config: GoogleTranslatorConfig) -> Result<Self, TranslationError> {
        Ok(Self {
            client: build_client(&config)?,
            config,
        })
    }
}

/// 拼接 gtx 响应中每个句段的译文
fn parse_gtx_response(body: &Value) -> Result<String, TranslationError> {
    let segments = body
        .get(0)
        .and_then(Value::as_array)
        .ok_or_else(|| TranslationError::InvalidResponse("missing sentence array".to_string()))?;

    let text: String = segments
        .iter()
        .filter_map(|segment| segment.get(0).and_then(Value::as_str))
        .collect();

    if text.trim().is_empty() {
        return Err(TranslationError::EmptyResult);
    }
    Ok(text)
}

#[async_trait]
impl TranslatorPort for GoogleApiTranslator {
    fn name(&self) -> &str {
        Self::NAME
    }

    async fn translate(&self, text: &str) -> Result<Translation, TranslationError> {
        let url = self.config.endpoint("translate_a/single");

        tracing::debug!(url = %url, text_len = text.len(), "Sending translation request");

        let response = self
            .client
            .post(&url)
            .query(&[
                ("client", "gtx"),
                ("sl", self.config.source_lang.as_str()),
                ("tl", self.config.target_lang.as_str()),
                ("dt", "t"),
            ])
            .form(&[("q", text)])
            .send()
            .await
            .map_err(map_request_error)?;

        let body: Value = ensure_success(response)
            .await?
            .json()
            .await
            .map_err(|e| TranslationError::InvalidResponse(e.to_string()))?;

        let translated = parse_gtx_response(&body)?;

        tracing::debug!(result_len = translated.len(), "google-api translation completed");

        Ok(Translation {
            text: translated,
            translator: Self::NAME.to_string(),
        })
    }
}
