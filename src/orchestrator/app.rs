//! 测评运行器 - 编排层
//!
//! ## 职责
//!
//! 本模块是整个应用的入口，按向导顺序走完各个测评阶段。
//!
//! ## 核心功能
//!
//! 1. **应用初始化**：检查配置、加载难点分类表、创建各个服务客户端
//! 2. **口语阶段**：逐段转写录音，送入对话会话
//! 3. **观点陈述阶段**：转写录音后并发做语义分析和语音评分
//! 4. **听力 / 阅读阶段**：按固定题库给作答评分
//! 5. **写作阶段**：只做语义分析
//! 6. **报告输出**：汇总结果写入 JSON 文件，输出统计
//!
//! 联系方式、学习偏好两个阶段由外部界面完成，这里只记录日志。

use std::sync::Arc;

use tokio::fs;
use tracing::{debug, info, warn};

use crate::clients::WhisperTranscriber;
use crate::config::Config;
use crate::error::{AppError, AppResult, ConfigError};
use crate::models::{
    load_taxonomy_or_builtin, AnalysisKind, AnalysisOutcome, AnalysisRequest, AssessmentReport,
    AssessmentStage, AudioClip, Quiz, QuizResult, SemanticAssessment, SessionSummary, Taxonomy,
    LISTENING_QUIZ, READING_QUIZ,
};
use crate::orchestrator::analysis::AnalysisOrchestrator;
use crate::services::providers::Transcriber;
use crate::utils::logging::{
    log_stage_complete, log_stage_start, log_startup, print_final_stats, truncate_text,
};
use crate::workflow::{DialogueSession, StageCtx};

/// 运行统计
#[derive(Debug, Default, Clone, Copy)]
struct RunStats {
    completed: usize,
    degraded: usize,
}

/// 应用主结构
pub struct App {
    config: Config,
    taxonomy: Arc<Taxonomy>,
    transcriber: Arc<dyn Transcriber>,
    orchestrator: AnalysisOrchestrator,
}

impl App {
    /// 初始化应用
    ///
    /// # 错误
    /// 未配置 `OPENAI_API_KEY` 或分类表文件无法加载时返回错误
    pub async fn initialize(config: Config) -> AppResult<Self> {
        if config.openai_api_key.trim().is_empty() {
            return Err(ConfigError::MissingSetting {
                setting: "OPENAI_API_KEY",
            }
            .into());
        }
        if config.speechace_api_key.trim().is_empty() {
            warn!("⚠️ 未配置 SPEECHACE_API_KEY，语音评分将不可用");
        }

        let taxonomy = load_taxonomy_or_builtin(config.taxonomy_file.as_deref()).await?;
        log_startup(taxonomy.len(), config.speaking_audio_files.len());

        let transcriber = Arc::new(WhisperTranscriber::new(&config));
        let orchestrator = AnalysisOrchestrator::from_config(&config);

        Ok(Self::with_parts(config, taxonomy, transcriber, orchestrator))
    }

    /// 用现成的组件组装应用（测试中替换外部服务）
    pub fn with_parts(
        config: Config,
        taxonomy: Taxonomy,
        transcriber: Arc<dyn Transcriber>,
        orchestrator: AnalysisOrchestrator,
    ) -> Self {
        Self {
            config,
            taxonomy: Arc::new(taxonomy),
            transcriber,
            orchestrator,
        }
    }

    /// 运行应用主逻辑
    ///
    /// # 返回
    /// 写入文件的报告内容
    pub async fn run(&self) -> AppResult<AssessmentReport> {
        let mut report = AssessmentReport::new();
        let mut stats = RunStats::default();

        let mut current = AssessmentStage::ALL.first().copied();
        while let Some(stage) = current {
            current = stage.next();

            if !stage.is_core() {
                debug!("阶段 {} 由外部界面完成，跳过", stage);
                continue;
            }

            log_stage_start(stage);
            let ctx = StageCtx::new(stage);

            report = match stage {
                AssessmentStage::Speaking => match self.run_speaking_stage(ctx).await? {
                    Some(summary) => report.with_speaking(summary),
                    None => continue,
                },
                AssessmentStage::Opinion => match self.run_opinion_stage(ctx).await? {
                    Some(outcome) => {
                        if outcome.is_degraded() {
                            stats.degraded += 1;
                        }
                        report.with_opinion(outcome)
                    }
                    None => continue,
                },
                AssessmentStage::Listening => {
                    let answers = self.config.listening_answers.as_deref();
                    match run_quiz_stage(ctx, &LISTENING_QUIZ, answers) {
                        Some(result) => report.with_listening(result),
                        None => continue,
                    }
                }
                AssessmentStage::Reading => {
                    let answers = self.config.reading_answers.as_deref();
                    match run_quiz_stage(ctx, &READING_QUIZ, answers) {
                        Some(result) => report.with_reading(result),
                        None => continue,
                    }
                }
                AssessmentStage::Writing => match self.run_writing_stage(ctx).await? {
                    Some(assessment) => report.with_writing(assessment),
                    None => continue,
                },
                _ => continue,
            };

            stats.completed += 1;
            log_stage_complete(stage);
        }

        self.write_report(&report).await?;
        print_final_stats(stats.completed, stats.degraded, &self.config.report_output_file);

        Ok(report)
    }

    /// 口语阶段：逐段转写并推进对话会话
    ///
    /// 会话只接受两轮回答，多出的录音会被忽略
    async fn run_speaking_stage(&self, ctx: StageCtx) -> AppResult<Option<SessionSummary>> {
        let files = &self.config.speaking_audio_files;
        if files.is_empty() {
            warn!("{} ⚠️ 未配置口语录音，跳过", ctx);
            return Ok(None);
        }

        let mut session = DialogueSession::new(&self.taxonomy);

        for (idx, path) in files.iter().enumerate() {
            let ctx = ctx.with_item(idx + 1);
            if session.is_closed() {
                warn!(
                    "{} ⚠️ 对话已结束，忽略剩余 {} 段录音",
                    ctx,
                    files.len() - idx
                );
                break;
            }

            let clip = read_audio(path).await?;
            let transcript = self.transcriber.transcribe(&clip).await?;
            info!("{} 用户: {}", ctx, truncate_text(&transcript, 80));

            let reply = session.respond(transcript)?;
            info!("{} 助手: {}", ctx, reply.text);
        }

        Ok(Some(session.into_summary()))
    }

    /// 观点陈述阶段：转写后做完整分析
    async fn run_opinion_stage(&self, ctx: StageCtx) -> AppResult<Option<AnalysisOutcome>> {
        let Some(path) = self.config.opinion_audio_file.as_deref() else {
            warn!("{} ⚠️ 未配置观点陈述录音，跳过", ctx);
            return Ok(None);
        };

        let clip = read_audio(path).await?;
        let transcript = self.transcriber.transcribe(&clip).await?;
        info!("{} 转写: {}", ctx, truncate_text(&transcript, 80));

        let request = AnalysisRequest::new(transcript, clip, AnalysisKind::Opinion);
        let outcome = self.orchestrator.analyze(&request).await?;

        Ok(Some(outcome))
    }

    /// 写作阶段：没有录音，只做语义分析
    async fn run_writing_stage(&self, ctx: StageCtx) -> AppResult<Option<SemanticAssessment>> {
        let Some(path) = self.config.writing_sample_file.as_deref() else {
            warn!("{} ⚠️ 未配置写作样本，跳过", ctx);
            return Ok(None);
        };

        let text = fs::read_to_string(path)
            .await
            .map_err(|e| AppError::file(path, e))?;
        let text = text.trim();
        if text.is_empty() {
            warn!("{} ⚠️ 写作样本为空，跳过", ctx);
            return Ok(None);
        }

        let assessment = self
            .orchestrator
            .assess_text(text, AnalysisKind::Writing)
            .await?;

        Ok(Some(assessment))
    }

    /// 写入报告文件
    async fn write_report(&self, report: &AssessmentReport) -> AppResult<()> {
        let path = &self.config.report_output_file;
        let json = report.to_json_pretty()?;
        fs::write(path, json)
            .await
            .map_err(|e| AppError::file(path.as_str(), e))?;
        info!("✓ 报告已写入: {}", path);
        Ok(())
    }
}

/// 听力 / 阅读阶段：按题库评分，没有作答时跳过
fn run_quiz_stage(ctx: StageCtx, quiz: &Quiz, answers: Option<&[usize]>) -> Option<QuizResult> {
    let Some(answers) = answers else {
        warn!("{} ⚠️ 未配置{}测验作答，跳过", ctx, quiz.name);
        return None;
    };

    if answers.len() != quiz.questions.len() {
        warn!(
            "{} ⚠️ 作答数 {} 与题目数 {} 不一致，缺答按答错处理",
            ctx,
            answers.len(),
            quiz.questions.len()
        );
    }

    let result = quiz.score_answers(answers);
    info!(
        "{} 答对 {}/{} 题，得分 {}/{}",
        ctx, result.correct_answers, result.total_questions, result.score, result.max_score
    );
    Some(result)
}

/// 读取录音文件
async fn read_audio(path: &str) -> AppResult<AudioClip> {
    let bytes = fs::read(path).await.map_err(|e| AppError::file(path, e))?;
    Ok(AudioClip::from_path_bytes(path, bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_initialize_requires_api_key() {
        let result = App::initialize(Config::default()).await;
        assert!(matches!(
            result,
            Err(AppError::Config(ConfigError::MissingSetting {
                setting: "OPENAI_API_KEY"
            }))
        ));
    }

    #[tokio::test]
    async fn test_initialize_rejects_bad_taxonomy_file() {
        let config = Config {
            openai_api_key: "sk-test".to_string(),
            taxonomy_file: Some("/nonexistent/language_audit/taxonomy.toml".to_string()),
            ..Config::default()
        };
        assert!(matches!(
            App::initialize(config).await,
            Err(AppError::File { .. })
        ));
    }

    #[test]
    fn test_quiz_stage_scores_configured_answers() {
        let ctx = StageCtx::new(AssessmentStage::Reading);

        let result = run_quiz_stage(ctx, &READING_QUIZ, Some(&[2, 5][..])).unwrap();
        assert_eq!(result.correct_answers, 1);
        assert_eq!(result.total_questions, 3);

        assert!(run_quiz_stage(ctx, &READING_QUIZ, None).is_none());
    }

    #[tokio::test]
    async fn test_missing_audio_file() {
        let err = read_audio("/nonexistent/clip.webm").await.unwrap_err();
        assert!(matches!(err, AppError::File { .. }));
    }
}
