//! 报告输入
//!
//! 报告的排版、图表、PDF 都在外部完成，这里只定义报告需要的数据形状，
//! 以及语音评分缺失时的显式"不可用"状态。

use serde::{Deserialize, Serialize};

use crate::models::analysis::{AnalysisOutcome, PhoneticScore, SemanticAssessment, WordScore};
use crate::models::quiz::QuizResult;
use crate::models::transcript::SessionSummary;

/// 单词准确度达标线
pub const ACCURATE_WORD_THRESHOLD: f64 = 90.0;

/// 语音评分状态
///
/// 缺失时报告必须展示"不可用"，不能显示 0 或空白分数
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PhoneticStatus<'a> {
    Available(&'a PhoneticScore),
    Unavailable,
}

impl<'a> PhoneticStatus<'a> {
    pub fn of(outcome: &'a AnalysisOutcome) -> Self {
        match outcome.phonetic() {
            Some(score) => PhoneticStatus::Available(score),
            None => PhoneticStatus::Unavailable,
        }
    }

    /// 发音分（满分 100）的展示文本
    pub fn pronunciation_label(&self) -> String {
        self.scale_label(|s| s.speechace_score.as_ref().and_then(|v| v.pronunciation))
    }

    /// 流利度分（满分 100）的展示文本
    pub fn fluency_label(&self) -> String {
        self.scale_label(|s| s.speechace_score.as_ref().and_then(|v| v.fluency))
    }

    fn scale_label(&self, pick: impl Fn(&PhoneticScore) -> Option<f64>) -> String {
        match self {
            PhoneticStatus::Unavailable => "unavailable".to_string(),
            PhoneticStatus::Available(score) => match pick(score) {
                Some(value) => format!("{:.0}/100", value),
                None => "N/A".to_string(),
            },
        }
    }
}

/// 单词级发音统计
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WordAccuracySummary {
    /// 达标单词占比（百分比）
    pub accurate_share: f64,
    /// 未达标单词数
    pub words_needing_attention: usize,
    /// 平均单词得分
    pub average_score: f64,
}

impl WordAccuracySummary {
    /// 单词列表为空时返回 `None`
    pub fn from_words(words: &[WordScore]) -> Option<Self> {
        if words.is_empty() {
            return None;
        }

        let total = words.len() as f64;
        let accurate = words
            .iter()
            .filter(|w| w.quality_score >= ACCURATE_WORD_THRESHOLD)
            .count();
        let sum: f64 = words.iter().map(|w| w.quality_score).sum();

        Some(Self {
            accurate_share: accurate as f64 / total * 100.0,
            words_needing_attention: words.len() - accurate,
            average_score: sum / total,
        })
    }
}

/// 报告所需的全部测评数据
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssessmentReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speaking: Option<SessionSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opinion: Option<AnalysisOutcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opinion_words: Option<WordAccuracySummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub listening: Option<QuizResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reading: Option<QuizResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub writing: Option<SemanticAssessment>,
}

impl AssessmentReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_speaking(mut self, summary: SessionSummary) -> Self {
        self.speaking = Some(summary);
        self
    }

    /// 写入观点陈述结果，同时计算单词级统计
    pub fn with_opinion(mut self, outcome: AnalysisOutcome) -> Self {
        self.opinion_words = outcome
            .phonetic()
            .and_then(|score| WordAccuracySummary::from_words(&score.word_score_list));
        self.opinion = Some(outcome);
        self
    }

    pub fn with_listening(mut self, result: QuizResult) -> Self {
        self.listening = Some(result);
        self
    }

    pub fn with_reading(mut self, result: QuizResult) -> Self {
        self.reading = Some(result);
        self
    }

    pub fn with_writing(mut self, assessment: SemanticAssessment) -> Self {
        self.writing = Some(assessment);
        self
    }

    /// 观点陈述的语音评分状态（没有观点陈述结果时为 `None`）
    pub fn opinion_phonetic_status(&self) -> Option<PhoneticStatus<'_>> {
        self.opinion.as_ref().map(PhoneticStatus::of)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
