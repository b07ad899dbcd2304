//! 外部服务接口 - 业务能力层
//!
//! 核心流程只依赖这里的 trait，具体的 HTTP / LLM 适配器在 `clients/`。
//! 测试中用假实现替换。

use async_trait::async_trait;

use crate::error::ProviderError;
use crate::models::analysis::{AnalysisKind, PhoneticScore, SemanticAssessment};
use crate::models::audio::AudioClip;

/// 语音转文字
#[async_trait]
pub trait Transcriber: Send + Sync {
    /// 服务名称（用于日志和错误信息）
    fn name(&self) -> &str;

    /// 转写一段录音
    async fn transcribe(&self, audio: &AudioClip) -> Result<String, ProviderError>;
}

/// 语义 / CEFR 分析（必选）
#[async_trait]
pub trait SemanticAnalyzer: Send + Sync {
    fn name(&self) -> &str;

    async fn analyze(
        &self,
        transcript: &str,
        kind: AnalysisKind,
    ) -> Result<SemanticAssessment, ProviderError>;
}

/// 发音 / 流利度评分（可选）
#[async_trait]
pub trait PhoneticScorer: Send + Sync {
    fn name(&self) -> &str;

    async fn score(
        &self,
        transcript: &str,
        audio: &AudioClip,
    ) -> Result<PhoneticScore, ProviderError>;
}
