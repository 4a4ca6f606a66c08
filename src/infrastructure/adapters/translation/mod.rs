//! Translation Adapter - 泰文 → 中文翻译实现
//!
//! - google-api: translate.googleapis.com gtx 接口（JSON）
//! - google-web: translate.google.com 移动版页面（HTML）
//! - hybrid: 按文本长度选择主翻译器，失败时切换到另一个

mod google_api_translator;
mod google_web_translator;
mod hybrid_translator;

use std::time::Duration;

use reqwest::Client;

use crate::application::ports::TranslationError;

pub use google_api_translator::GoogleApiTranslator;
pub use google_web_translator::GoogleWebTranslator;
pub use hybrid_translator::HybridTranslator;

/// Google 翻译客户端配置
#[derive(Debug, Clone)]
pub struct GoogleTranslatorConfig {
    /// 服务基础 URL
    pub base_url: String,
    /// 源语言
    pub source_lang: String,
    /// 目标语言
    pub target_lang: String,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
    /// GET 请求中 q 参数编码后的上限（字节），超出时分段翻译
    pub max_query_bytes: usize,
}

impl GoogleTranslatorConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            source_lang: "th".to_string(),
            target_lang: "zh-CN".to_string(),
            timeout_secs: 30,
            max_query_bytes: 6000,
        }
    }

    pub fn with_languages(mut self, source: impl Into<String>, target: impl Into<String>) -> Self {
        self.source_lang = source.into();
        self.target_lang = target.into();
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }
}

const USER_AGENT: &str =
    "Mozilla/5.0 (Linux; Android 10) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Mobile Safari/537.36";

fn build_client(config: &GoogleTranslatorConfig) -> Result<Client, TranslationError> {
    Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| TranslationError::NetworkError(e.to_string()))
}

fn map_request_error(e: reqwest::Error) -> TranslationError {
    if e.is_timeout() {
        TranslationError::Timeout
    } else if e.is_connect() {
        TranslationError::NetworkError(format!("Cannot connect to translation service: {}", e))
    } else {
        TranslationError::NetworkError(e.to_string())
    }
}

async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, TranslationError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let error_text = response.text().await.unwrap_or_default();
    // Google 的错误页很长，只保留开头
    let snippet: String = error_text.chars().take(200).collect();
    Err(TranslationError::ServiceError(format!("HTTP {}: {}", status, snippet)))
}
