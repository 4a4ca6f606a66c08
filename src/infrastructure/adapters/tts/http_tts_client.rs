//! HTTP TTS Client - 调用外部语音合成 HTTP 服务
//!
//! 实现 TtsEnginePort trait，对接 OpenAI 兼容的 speech 接口
//! （Edge TTS 网关通常暴露此接口）
//!
//! 外部 TTS API:
//! POST http://localhost:5050/v1/audio/speech
//! Request: {"model": "tts-1", "input": "...", "voice": "zh-CN-XiaoxiaoNeural", "response_format": "mp3", "speed": 1.0}
//! Response: audio/mpeg binary

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

use crate::application::ports::{SynthesisRequest, SynthesizedAudio, TtsEnginePort, TtsError};
use crate::domain::conversion::AudioFormat;

/// 合成请求体 (JSON)
#[derive(Debug, Serialize)]
struct SpeechHttpRequest<'a> {
    model: &'a str,
    input: &'a str,
    voice: &'a str,
    response_format: &'a str,
    speed: f32,
}

/// HTTP TTS 客户端配置
#[derive(Debug, Clone)]
pub struct HttpTtsClientConfig {
    /// TTS 服务基础 URL
    pub base_url: String,
    /// 合成接口路径
    pub endpoint_path: String,
    /// 模型名（Edge 网关一般忽略）
    pub model: String,
    /// Bearer token
    pub api_key: Option<String>,
    /// 语速
    pub speed: f32,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
}

impl Default for HttpTtsClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5050".to_string(),
            endpoint_path: "/v1/audio/speech".to_string(),
            model: "tts-1".to_string(),
            api_key: None,
            speed: 1.0,
            timeout_secs: 60,
        }
    }
}

impl HttpTtsClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }
}

/// HTTP TTS 客户端
pub struct HttpTtsClient {
    client: Client,
    config: HttpTtsClientConfig,
}

impl HttpTtsClient {
    /// 创建新的 HTTP TTS 客户端
    pub fn new(config: HttpTtsClientConfig) -> Result<Self, TtsError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| TtsError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// 获取合成 URL
    fn speech_url(&self) -> String {
        let path = self.config.endpoint_path.trim_start_matches('/');
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), path)
    }

    /// 获取健康检查 URL
    fn health_url(&self) -> String {
        format!("{}/health", self.config.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl TtsEnginePort for HttpTtsClient {
    fn cache_fingerprint(&self) -> String {
        format!(
            "http|{}|{}|{}",
            self.speech_url(),
            self.config.model,
            self.config.speed
        )
    }

    async fn synthesize(&self, request: SynthesisRequest) -> Result<SynthesizedAudio, TtsError> {
        if request.text.trim().is_empty() {
            return Err(TtsError::EmptyText);
        }

        let body = SpeechHttpRequest {
            model: &self.config.model,
            input: &request.text,
            voice: &request.voice,
            response_format: AudioFormat::Mp3.extension(),
            speed: self.config.speed,
        };

        tracing::debug!(
            url = %self.speech_url(),
            text_len = request.text.len(),
            voice = %request.voice,
            "Sending TTS request"
        );

        let mut builder = self.client.post(self.speech_url()).json(&body);
        if let Some(api_key) = &self.config.api_key {
            builder = builder.bearer_auth(api_key);
        }

        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                TtsError::Timeout
            } else if e.is_connect() {
                TtsError::NetworkError(format!("Cannot connect to TTS service: {}", e))
            } else {
                TtsError::NetworkError(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(TtsError::ServiceError(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        // 拒绝返回 JSON 的“成功”响应（部分网关出错时仍返回 200）
        let is_json = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.starts_with("application/json"))
            .unwrap_or(false);
        if is_json {
            let error_text = response.text().await.unwrap_or_default();
            return Err(TtsError::InvalidResponse(format!(
                "expected audio, got JSON: {}",
                error_text
            )));
        }

        let data = response
            .bytes()
            .await
            .map_err(|e| TtsError::InvalidResponse(format!("Failed to read audio: {}", e)))?
            .to_vec();

        tracing::info!(
            voice = %request.voice,
            audio_size = data.len(),
            "TTS synthesis completed"
        );

        Ok(SynthesizedAudio {
            data,
            format: AudioFormat::Mp3,
        })
    }

    async fn health_check(&self) -> bool {
        match self
            .client
            .get(self.health_url())
            .timeout(Duration::from_secs(5))
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    #[test]
    fn test_config_default() {
        let config = HttpTtsClientConfig::default();
        assert_eq!(config.base_url, "http://localhost:5050");
        assert_eq!(config.timeout_secs, 60);
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_config_builder() {
        let config = HttpTtsClientConfig::new("http://example.com:9000")
            .with_timeout(30)
            .with_api_key("secret");
        assert_eq!(config.base_url, "http://example.com:9000");
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.api_key.as_deref(), Some("secret"));
    }

    #[test]
    fn test_fingerprint_tracks_audio_settings() {
        let base = HttpTtsClient::new(HttpTtsClientConfig::new("http://tts:5050")).unwrap();
        let faster = HttpTtsClient::new(HttpTtsClientConfig {
            speed: 1.5,
            ..HttpTtsClientConfig::new("http://tts:5050")
        })
        .unwrap();
        let other_model = HttpTtsClient::new(HttpTtsClientConfig {
            model: "tts-1-hd".to_string(),
            ..HttpTtsClientConfig::new("http://tts:5050")
        })
        .unwrap();
        let other_host = HttpTtsClient::new(HttpTtsClientConfig::new("http://tts2:5050")).unwrap();
        // 鉴权和超时不影响音频内容
        let with_key = HttpTtsClient::new(
            HttpTtsClientConfig::new("http://tts:5050")
                .with_api_key("secret")
                .with_timeout(5),
        )
        .unwrap();

        assert_eq!(base.cache_fingerprint(), "http|http://tts:5050/v1/audio/speech|tts-1|1");
        assert_ne!(base.cache_fingerprint(), faster.cache_fingerprint());
        assert_ne!(base.cache_fingerprint(), other_model.cache_fingerprint());
        assert_ne!(base.cache_fingerprint(), other_host.cache_fingerprint());
        assert_eq!(base.cache_fingerprint(), with_key.cache_fingerprint());
    }

    #[test]
    fn test_speech_url_joins_slashes() {
        let client = HttpTtsClient::new(HttpTtsClientConfig::new("http://tts:5050/")).unwrap();
        assert_eq!(client.speech_url(), "http://tts:5050/v1/audio/speech");
    }

    #[tokio::test]
    async fn test_synthesize_posts_chinese_text() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/audio/speech")
            .match_header("authorization", "Bearer secret")
            .match_body(Matcher::PartialJson(serde_json::json!({
                "input": "你好",
                "voice": "zh-CN-XiaoxiaoNeural",
                "response_format": "mp3",
            })))
            .with_status(200)
            .with_header("content-type", "audio/mpeg")
            .with_body(b"ID3audio")
            .create_async()
            .await;

        let client =
            HttpTtsClient::new(HttpTtsClientConfig::new(server.url()).with_api_key("secret")).unwrap();
        let audio = client
            .synthesize(SynthesisRequest {
                text: "你好".to_string(),
                voice: "zh-CN-XiaoxiaoNeural".to_string(),
            })
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(audio.data, b"ID3audio");
        assert_eq!(audio.format, AudioFormat::Mp3);
    }

    #[tokio::test]
    async fn test_synthesize_service_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1/audio/speech")
            .with_status(500)
            .with_body("voice not available")
            .create_async()
            .await;

        let client = HttpTtsClient::new(HttpTtsClientConfig::new(server.url())).unwrap();
        let err = client
            .synthesize(SynthesisRequest {
                text: "你好".to_string(),
                voice: "zh-CN-Nope".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, TtsError::ServiceError(ref msg) if msg.contains("voice not available")));
    }

    #[tokio::test]
    async fn test_synthesize_rejects_json_body() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1/audio/speech")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"error":"rate limited"}"#)
            .create_async()
            .await;

        let client = HttpTtsClient::new(HttpTtsClientConfig::new(server.url())).unwrap();
        let err = client
            .synthesize(SynthesisRequest {
                text: "你好".to_string(),
                voice: "zh-CN-XiaoxiaoNeural".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, TtsError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn test_empty_text_is_not_sent() {
        let client = HttpTtsClient::new(HttpTtsClientConfig::new("http://127.0.0.1:9")).unwrap();
        let err = client
            .synthesize(SynthesisRequest {
                text: "  ".to_string(),
                voice: "zh-CN-XiaoxiaoNeural".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, TtsError::EmptyText));
    }

    #[tokio::test]
    async fn test_health_check() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/health")
            .with_status(200)
            .create_async()
            .await;

        let client = HttpTtsClient::new(HttpTtsClientConfig::new(server.url())).unwrap();
        assert!(client.health_check().await);
    }
}
