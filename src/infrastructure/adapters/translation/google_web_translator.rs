//! Google Web Translator
//!
//! GET {base_url}/m?sl=th&tl=zh-CN&q=<text>
//! 译文位于 `<div class="result-container">...</div>`

use async_trait::async_trait;
use regex::Regex;
use reqwest::Client;

use super::{build_client, ensure_success, map_request_error, GoogleTranslatorConfig};
use crate::application::ports::{Translation, TranslationError, TranslatorPort};

pub struct GoogleWebTranslator {
    client: Client,
    config: GoogleTranslatorConfig,
    result_pattern: Regex,
}

impl GoogleWebTranslator {
    pub const NAME: &'static str = "google-web";

    pub fn new(config: GoogleTranslatorConfig) -> Result<Self, TranslationError> {
        let result_pattern = Regex::new(r#"(?s)<div[^>]*class="result-container"[^>]*>(.*?)</div>"#)
            .map_err(|e| TranslationError::InvalidResponse(e.to_string()))?;

        Ok(Self {
            client: build_client(&config)?,
            config,
            result_pattern,
        })
    }

    fn extract(&self, html: &str) -> Result<String, TranslationError> {
        let raw = self
            .result_pattern
            .captures(html)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str())
            .ok_or_else(|| TranslationError::InvalidResponse("result container not found".to_string()))?;

        let text = html_escape::decode_html_entities(raw).trim().to_string();
        if text.is_empty() {
            return Err(TranslationError::EmptyResult);
        }
        Ok(text)
    }

    async fn request(&self, text: &str) -> Result<String, TranslationError> {
        let url = self.config.endpoint("m");

        tracing::debug!(url = %url, text_len = text.len(), "Sending translation request");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("sl", self.config.source_lang.as_str()),
                ("tl", self.config.target_lang.as_str()),
                ("q", text),
            ])
            .send()
            .await
            .map_err(map_request_error)?;

        let html = ensure_success(response)
            .await?
            .text()
            .await
            .map_err(|e| TranslationError::InvalidResponse(e.to_string()))?;

        self.extract(&html)
    }
}

/// 估算字符作为查询参数编码后的字节数
fn encoded_char_len(c: char) -> usize {
    if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '~' | ' ') {
        1
    } else {
        c.len_utf8() * 3
    }
}

fn encoded_len(text: &str) -> usize {
    text.chars().map(encoded_char_len).sum()
}

/// 按空白切分，每段编码后不超过 `budget`
///
/// 没有空白的超长片段按字符硬切
fn split_for_query(text: &str, budget: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for piece in text.split_inclusive(char::is_whitespace) {
        let piece_len = encoded_len(piece);
        if current_len + piece_len > budget && !current.is_empty() {
            chunks.push(std::mem::take(&mut current));
            current_len = 0;
        }

        if piece_len <= budget {
            current.push_str(piece);
            current_len += piece_len;
            continue;
        }

        for c in piece.chars() {
            let char_len = encoded_char_len(c);
            if current_len + char_len > budget && !current.is_empty() {
                chunks.push(std::mem::take(&mut current));
                current_len = 0;
            }
            current.push(c);
            current_len += char_len;
        }
    }
    chunks.push(current);

    chunks
        .into_iter()
        .map(|chunk| chunk.trim().to_string())
        .filter(|chunk| !chunk.is_empty())
        .collect()
}

#[async_trait]
impl TranslatorPort for GoogleWebTranslator {
    fn name(&self) -> &str {
        Self::NAME
    }

    async fn translate(&self, text: &str) -> Result<Translation, TranslationError> {
        let chunks = split_for_query(text, self.config.max_query_bytes);
        if chunks.len() > 1 {
            tracing::debug!(chunks = chunks.len(), "Text exceeds query budget, translating in parts");
        }

        // 分段顺序翻译，中文译文直接拼接
        let mut translated = String::new();
        for chunk in &chunks {
            translated.push_str(&self.request(chunk).await?);
        }
        if translated.is_empty() {
            return Err(TranslationError::EmptyResult);
        }

        tracing::debug!(result_len = translated.len(), "google-web translation completed");

        Ok(Translation {
            text: translated,
            translator: Self::NAME.to_string(),
        })
    }
}
