/// 语音评分客户端（SpeechAce）
///
/// 上传录音和对应文本，获取单词 / 音节级发音分与流利度指标
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::debug;

use crate::config::Config;
use crate::error::ProviderError;
use crate::models::analysis::PhoneticScore;
use crate::models::audio::AudioClip;
use crate::services::providers::PhoneticScorer;

const PROVIDER: &str = "speechace";

#[derive(Debug, Deserialize)]
struct ScoringResponse {
    status: Option<String>,
    short_message: Option<String>,
    detail_message: Option<String>,
    text_score: Option<PhoneticScore>,
}

/// 语音评分客户端
pub struct SpeechAceScorer {
    http: reqwest::Client,
    api_url: String,
    api_key: String,
    dialect: String,
    user_id: String,
}

impl SpeechAceScorer {
    /// 创建新的评分客户端
    pub fn new(config: &Config) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_url: config.speechace_api_url.clone(),
            api_key: config.speechace_api_key.clone(),
            dialect: config.speechace_dialect.clone(),
            user_id: config.speechace_user_id.clone(),
        }
    }

    fn build_form(&self, transcript: &str, audio: &AudioClip) -> Result<Form, ProviderError> {
        let audio_part = Part::bytes(audio.bytes().to_vec())
            .file_name("audio.wav")
            .mime_str(audio.mime_type())
            .map_err(|e| ProviderError::request_failed(PROVIDER, e))?;

        Ok(Form::new()
            .text("include_fluency", "1")
            .text("text", transcript.to_string())
            .part("user_audio_file", audio_part))
    }
}

#[async_trait]
impl PhoneticScorer for SpeechAceScorer {
    fn name(&self) -> &str {
        PROVIDER
    }

    async fn score(
        &self,
        transcript: &str,
        audio: &AudioClip,
    ) -> Result<PhoneticScore, ProviderError> {
        debug!(
            "请求语音评分: 文本 {} 字符, 录音 {} 字节",
            transcript.len(),
            audio.len()
        );

        let response = self
            .http
            .post(&self.api_url)
            .query(&[
                ("key", self.api_key.as_str()),
                ("dialect", self.dialect.as_str()),
                ("user_id", self.user_id.as_str()),
            ])
            .multipart(self.build_form(transcript, audio)?)
            .send()
            .await
            .map_err(|e| ProviderError::request_failed(PROVIDER, e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::request_failed(PROVIDER, e))?;

        check_status(status, body).and_then(|body| parse_scoring_response(&body))
    }
}

/// 非 2xx 响应直接作为错误响应返回，保留状态码和原始内容
fn check_status(status: StatusCode, body: String) -> Result<String, ProviderError> {
    if status.is_success() {
        Ok(body)
    } else {
        Err(ProviderError::bad_response(
            PROVIDER,
            Some(status.as_u16()),
            body,
        ))
    }
}

/// 解析评分响应
///
/// SpeechAce 出错时依然返回 200，需要检查 `status` 字段
fn parse_scoring_response(body: &str) -> Result<PhoneticScore, ProviderError> {
    let parsed: ScoringResponse =
        serde_json::from_str(body).map_err(|source| ProviderError::JsonParseFailed {
            provider: PROVIDER.to_string(),
            source,
        })?;

    if parsed.status.as_deref() == Some("error") {
        let message = parsed
            .detail_message
            .or(parsed.short_message)
            .unwrap_or_else(|| "unknown error".to_string());
        return Err(ProviderError::bad_response(PROVIDER, None, message));
    }

    parsed
        .text_score
        .ok_or_else(|| ProviderError::empty_response(PROVIDER))
}
