//! 分析编排器 - 编排层
//!
//! 同时调用语义分析（必选）和语音评分（尽力而为），等两路都结束后合并结果。
//!
//! - 语义分析失败或超时：整个请求失败，返回 [`AnalysisFailure`]
//! - 语音评分失败或超时：记录警告，结果中不含语音评分
//!
//! 不做任何重试。

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error, info, warn};

use crate::clients::{OpenAiAnalyzer, SpeechAceScorer};
use crate::config::Config;
use crate::error::{AnalysisFailure, ProviderError};
use crate::models::analysis::{AnalysisKind, AnalysisOutcome, AnalysisRequest, SemanticAssessment};
use crate::services::providers::{PhoneticScorer, SemanticAnalyzer};
use crate::utils::logging::truncate_text;

/// 分析编排器
pub struct AnalysisOrchestrator {
    semantic: Arc<dyn SemanticAnalyzer>,
    phonetic: Arc<dyn PhoneticScorer>,
    semantic_timeout: Duration,
    phonetic_timeout: Duration,
}

impl AnalysisOrchestrator {
    /// 使用给定的服务实现创建编排器
    ///
    /// # 参数
    /// - `semantic`: 语义分析服务
    /// - `phonetic`: 语音评分服务
    /// - `semantic_timeout` / `phonetic_timeout`: 各自的超时时间
    pub fn new(
        semantic: Arc<dyn SemanticAnalyzer>,
        phonetic: Arc<dyn PhoneticScorer>,
        semantic_timeout: Duration,
        phonetic_timeout: Duration,
    ) -> Self {
        Self {
            semantic,
            phonetic,
            semantic_timeout,
            phonetic_timeout,
        }
    }

    /// 按配置创建默认的 OpenAI + SpeechAce 编排器
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            Arc::new(OpenAiAnalyzer::new(config)),
            Arc::new(SpeechAceScorer::new(config)),
            config.semantic_timeout(),
            config.phonetic_timeout(),
        )
    }

    /// 分析一段转写和录音
    ///
    /// 两路调用并发执行，一路失败不会提前取消另一路。
    ///
    /// # 返回
    /// 语义分析成功时返回合并结果（语音评分可能缺失），否则返回 [`AnalysisFailure`]
    pub async fn analyze(
        &self,
        request: &AnalysisRequest,
    ) -> Result<AnalysisOutcome, AnalysisFailure> {
        debug!(
            "开始分析 ({:?}): {}",
            request.kind,
            truncate_text(&request.transcript, 60)
        );

        let semantic_call = with_timeout(
            self.semantic.name(),
            self.semantic_timeout,
            self.semantic.analyze(&request.transcript, request.kind),
        );
        let phonetic_call = with_timeout(
            self.phonetic.name(),
            self.phonetic_timeout,
            self.phonetic.score(&request.transcript, &request.audio),
        );

        let (semantic, phonetic) = tokio::join!(semantic_call, phonetic_call);

        let phonetic = match phonetic {
            Ok(score) => Some(score),
            Err(e) => {
                warn!("⚠️ 语音评分不可用，报告将显示 unavailable: {}", e);
                None
            }
        };

        let semantic = semantic.map_err(|e| {
            error!("❌ 语义分析失败: {}", e);
            AnalysisFailure::from(e)
        })?;

        info!(
            "✓ 分析完成: CEFR {}, 语音评分{}",
            semantic
                .cefr_level
                .map_or_else(|| "未识别".to_string(), |level| level.to_string()),
            if phonetic.is_some() { "可用" } else { "缺失" }
        );

        Ok(AnalysisOutcome::merge(
            request.transcript.clone(),
            semantic,
            phonetic,
        ))
    }

    /// 只做语义分析（没有录音的写作样本）
    pub async fn assess_text(
        &self,
        text: &str,
        kind: AnalysisKind,
    ) -> Result<SemanticAssessment, AnalysisFailure> {
        with_timeout(
            self.semantic.name(),
            self.semantic_timeout,
            self.semantic.analyze(text, kind),
        )
        .await
        .map_err(|e| {
            error!("❌ 语义分析失败: {}", e);
            AnalysisFailure::from(e)
        })
    }
}

/// 给一次服务调用加上超时，超时视为该服务失败
async fn with_timeout<T>(
    provider: &str,
    after: Duration,
    call: impl Future<Output = Result<T, ProviderError>>,
) -> Result<T, ProviderError> {
    match tokio::time::timeout(after, call).await {
        Ok(result) => result,
        Err(_) => Err(ProviderError::timeout(provider, after)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::analysis::{PhoneticScore, WordScore};
    use crate::models::audio::AudioClip;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Instant;

    struct FakeSemantic {
        reply: Option<&'static str>,
        delay: Duration,
        calls: AtomicUsize,
    }

    impl FakeSemantic {
        fn ok(reply: &'static str, delay_ms: u64) -> Arc<Self> {
            Arc::new(Self {
                reply: Some(reply),
                delay: Duration::from_millis(delay_ms),
                calls: AtomicUsize::new(0),
            })
        }

        fn failing(delay_ms: u64) -> Arc<Self> {
            Arc::new(Self {
                reply: None,
                delay: Duration::from_millis(delay_ms),
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl SemanticAnalyzer for FakeSemantic {
        fn name(&self) -> &str {
            "fake-semantic"
        }

        async fn analyze(
            &self,
            _transcript: &str,
            _kind: AnalysisKind,
        ) -> Result<SemanticAssessment, ProviderError> {
            tokio::time::sleep(self.delay).await;
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.reply {
                Some(text) => Ok(SemanticAssessment::from_text(text)),
                None => Err(ProviderError::bad_response("fake-semantic", Some(500), "boom")),
            }
        }
    }

    struct FakePhonetic {
        succeed: bool,
        delay: Duration,
        finished: AtomicUsize,
    }

    impl FakePhonetic {
        fn new(succeed: bool, delay_ms: u64) -> Arc<Self> {
            Arc::new(Self {
                succeed,
                delay: Duration::from_millis(delay_ms),
                finished: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl PhoneticScorer for FakePhonetic {
        fn name(&self) -> &str {
            "fake-phonetic"
        }

        async fn score(
            &self,
            transcript: &str,
            _audio: &AudioClip,
        ) -> Result<PhoneticScore, ProviderError> {
            tokio::time::sleep(self.delay).await;
            self.finished.fetch_add(1, Ordering::SeqCst);
            if self.succeed {
                Ok(PhoneticScore {
                    text: Some(transcript.to_string()),
                    word_score_list: vec![WordScore {
                        word: "hello".to_string(),
                        quality_score: 92.0,
                        syllable_score_list: Vec::new(),
                    }],
                    ..Default::default()
                })
            } else {
                Err(ProviderError::empty_response("fake-phonetic"))
            }
        }
    }

    fn request() -> AnalysisRequest {
        AnalysisRequest::new(
            "I think remote work is better",
            AudioClip::webm(vec![1u8, 2, 3]),
            AnalysisKind::Opinion,
        )
    }

    fn orchestrator(
        semantic: Arc<FakeSemantic>,
        phonetic: Arc<FakePhonetic>,
        phonetic_timeout_ms: u64,
    ) -> AnalysisOrchestrator {
        AnalysisOrchestrator::new(
            semantic,
            phonetic,
            Duration::from_secs(5),
            Duration::from_millis(phonetic_timeout_ms),
        )
    }

    #[tokio::test]
    async fn test_both_succeed() {
        let orch = orchestrator(FakeSemantic::ok("Level B2", 5), FakePhonetic::new(true, 5), 1000);

        let outcome = orch.analyze(&request()).await.unwrap();
        assert!(!outcome.is_degraded());
        assert_eq!(outcome.transcript(), "I think remote work is better");
        assert_eq!(outcome.semantic().analysis, "Level B2");
        assert_eq!(outcome.phonetic().unwrap().word_score_list.len(), 1);
    }

    #[tokio::test]
    async fn test_phonetic_failure_degrades() {
        let orch = orchestrator(FakeSemantic::ok("A2", 5), FakePhonetic::new(false, 5), 1000);

        let outcome = orch.analyze(&request()).await.unwrap();
        assert!(outcome.is_degraded());
        assert!(outcome.phonetic().is_none());
    }

    #[tokio::test]
    async fn test_phonetic_timeout_degrades() {
        let orch = orchestrator(FakeSemantic::ok("C1", 5), FakePhonetic::new(true, 500), 20);

        let outcome = orch.analyze(&request()).await.unwrap();
        assert!(outcome.is_degraded());
    }

    #[tokio::test]
    async fn test_semantic_failure_waits_for_phonetic() {
        let phonetic = FakePhonetic::new(true, 80);
        let orch = orchestrator(FakeSemantic::failing(1), phonetic.clone(), 1000);

        let err = orch.analyze(&request()).await.unwrap_err();
        assert!(matches!(err.source, ProviderError::BadResponse { .. }));
        // 语义分析先失败，语音评分仍然跑完
        assert_eq!(phonetic.finished.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_semantic_timeout_is_failure() {
        let orch = AnalysisOrchestrator::new(
            FakeSemantic::ok("B1", 500),
            FakePhonetic::new(true, 1),
            Duration::from_millis(20),
            Duration::from_secs(1),
        );

        let err = orch.analyze(&request()).await.unwrap_err();
        assert!(matches!(err.source, ProviderError::Timeout { .. }));
    }

    #[tokio::test]
    async fn test_calls_run_concurrently() {
        let orch = orchestrator(FakeSemantic::ok("B2", 150), FakePhonetic::new(true, 150), 1000);

        let started = Instant::now();
        orch.analyze(&request()).await.unwrap();
        assert!(started.elapsed() < Duration::from_millis(290));
    }

    #[tokio::test]
    async fn test_assess_text_is_semantic_only() {
        let semantic = FakeSemantic::ok("Writing is at B1", 1);
        let phonetic = FakePhonetic::new(true, 1);
        let orch = orchestrator(semantic.clone(), phonetic.clone(), 1000);

        let assessment = orch.assess_text("Dear Sarah", AnalysisKind::Writing).await.unwrap();
        assert_eq!(assessment.cefr_level.map(|l| l.code()), Some("B1"));
        assert_eq!(semantic.calls.load(Ordering::SeqCst), 1);
        assert_eq!(phonetic.finished.load(Ordering::SeqCst), 0);
    }
}
