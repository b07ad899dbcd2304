/// 语音转文字客户端
///
/// 以 multipart 方式上传录音到 OpenAI 兼容的 `/audio/transcriptions` 接口
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use tracing::debug;

use crate::config::Config;
use crate::error::ProviderError;
use crate::models::audio::AudioClip;
use crate::services::providers::Transcriber;

const PROVIDER: &str = "whisper";

#[derive(Debug, Deserialize)]
struct TranscriptionResponse {
    text: Option<String>,
}

/// 转写客户端
pub struct WhisperTranscriber {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
    model_name: String,
}

impl WhisperTranscriber {
    /// 创建新的转写客户端
    pub fn new(config: &Config) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: format!(
                "{}/audio/transcriptions",
                config.openai_api_base_url.trim_end_matches('/')
            ),
            api_key: config.openai_api_key.clone(),
            model_name: config.transcription_model.clone(),
        }
    }

    fn build_form(&self, audio: &AudioClip) -> Result<Form, ProviderError> {
        let file = Part::bytes(audio.bytes().to_vec())
            .file_name(audio.file_name().to_string())
            .mime_str(audio.mime_type())
            .map_err(|e| ProviderError::request_failed(PROVIDER, e))?;

        Ok(Form::new()
            .text("model", self.model_name.clone())
            .text("response_format", "json")
            .part("file", file))
    }
}

#[async_trait]
impl Transcriber for WhisperTranscriber {
    fn name(&self) -> &str {
        PROVIDER
    }

    async fn transcribe(&self, audio: &AudioClip) -> Result<String, ProviderError> {
        if audio.is_empty() {
            return Err(ProviderError::bad_response(PROVIDER, None, "录音数据为空"));
        }

        debug!(
            "上传录音进行转写: {} ({} 字节, {})",
            audio.file_name(),
            audio.len(),
            audio.mime_type()
        );

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .multipart(self.build_form(audio)?)
            .send()
            .await
            .map_err(|e| ProviderError::request_failed(PROVIDER, e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::request_failed(PROVIDER, e))?;

        if !status.is_success() {
            return Err(ProviderError::bad_response(
                PROVIDER,
                Some(status.as_u16()),
                body,
            ));
        }

        parse_transcription(&body)
    }
}

/// 解析转写接口的 JSON 响应
fn parse_transcription(body: &str) -> Result<String, ProviderError> {
    let parsed: TranscriptionResponse =
        serde_json::from_str(body).map_err(|source| ProviderError::JsonParseFailed {
            provider: PROVIDER.to_string(),
            source,
        })?;

    parsed
        .text
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ProviderError::empty_response(PROVIDER))
}
