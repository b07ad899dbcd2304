//! 分析请求与分析结果
//!
//! `AnalysisOutcome` 的语义结果字段不是 `Option`：语义分析失败时
//! 只能得到 `AnalysisFailure`，不会出现缺少语义结果的记录。

use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use phf::phf_map;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::models::audio::AudioClip;

/// 分析类型，决定语义分析使用的提示词
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisKind {
    /// 口语观点陈述
    Opinion,
    /// 写作（邮件）
    Writing,
    /// 通用口语样本
    Speaking,
}

/// 分析请求（不可变）
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub transcript: String,
    pub audio: AudioClip,
    pub kind: AnalysisKind,
}

impl AnalysisRequest {
    pub fn new(transcript: impl Into<String>, audio: AudioClip, kind: AnalysisKind) -> Self {
        Self {
            transcript: transcript.into(),
            audio,
            kind,
        }
    }
}

// ========== CEFR ==========

/// CEFR 等级
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CefrLevel {
    A1,
    A2,
    B1,
    B2,
    C1,
    C2,
}

static CEFR_LEVELS: phf::Map<&'static str, CefrLevel> = phf_map! {
    "A1" => CefrLevel::A1,
    "A2" => CefrLevel::A2,
    "B1" => CefrLevel::B1,
    "B2" => CefrLevel::B2,
    "C1" => CefrLevel::C1,
    "C2" => CefrLevel::C2,
};

static CEFR_MENTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b([ABC][12])\b").expect("CEFR 正则表达式无效"));

impl CefrLevel {
    /// 解析等级代码（忽略大小写与首尾空白）
    pub fn parse(code: &str) -> Option<Self> {
        CEFR_LEVELS
            .get(code.trim().to_ascii_uppercase().as_str())
            .copied()
    }

    /// 找出文本中第一次提到的 CEFR 等级
    pub fn find_in(text: &str) -> Option<Self> {
        CEFR_MENTION
            .captures_iter(text)
            .filter_map(|cap| cap.get(1))
            .find_map(|m| Self::parse(m.as_str()))
    }

    pub fn code(self) -> &'static str {
        match self {
            CefrLevel::A1 => "A1",
            CefrLevel::A2 => "A2",
            CefrLevel::B1 => "B1",
            CefrLevel::B2 => "B2",
            CefrLevel::C1 => "C1",
            CefrLevel::C2 => "C2",
        }
    }
}

impl std::fmt::Display for CefrLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

// ========== 语义分析结果 ==========

/// 语义 / CEFR 分析结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SemanticAssessment {
    /// 服务返回的原始分析文本
    pub analysis: String,
    /// 分析文本中提到的 CEFR 等级
    pub cefr_level: Option<CefrLevel>,
}

impl SemanticAssessment {
    pub fn from_text(analysis: impl Into<String>) -> Self {
        let analysis = analysis.into();
        let cefr_level = CefrLevel::find_in(&analysis);
        Self {
            analysis,
            cefr_level,
        }
    }
}

// ========== 语音评分结果 ==========

/// 语音 / 流利度评分结果
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PhoneticScore {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub word_score_list: Vec<WordScore>,
    #[serde(default)]
    pub speechace_score: Option<ScaleScore>,
    #[serde(default)]
    pub ielts_score: Option<ScaleScore>,
    #[serde(default)]
    pub toeic_score: Option<ScaleScore>,
    #[serde(default)]
    pub cefr_score: Option<CefrScore>,
    #[serde(default)]
    pub fluency: Option<FluencyReport>,
}

/// 单词得分
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WordScore {
    pub word: String,
    pub quality_score: f64,
    #[serde(default)]
    pub syllable_score_list: Vec<SyllableScore>,
}

/// 音节得分
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SyllableScore {
    #[serde(default)]
    pub letters: String,
    pub quality_score: f64,
    #[serde(default)]
    pub stress_level: Option<u8>,
}

/// 某一量表下的发音 / 流利度分数
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScaleScore {
    #[serde(default)]
    pub pronunciation: Option<f64>,
    #[serde(default)]
    pub fluency: Option<f64>,
}

/// 服务给出的 CEFR 等级字符串
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CefrScore {
    #[serde(default)]
    pub pronunciation: Option<String>,
    #[serde(default)]
    pub fluency: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FluencyReport {
    #[serde(default)]
    pub overall_metrics: Option<FluencyMetrics>,
}

/// 整体流利度指标
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FluencyMetrics {
    /// 语速（词/秒）
    #[serde(default)]
    pub speech_rate: Option<f64>,
    #[serde(default)]
    pub all_pause_count: Option<u32>,
    /// 平均连续词数
    #[serde(default)]
    pub mean_length_run: Option<f64>,
    #[serde(default)]
    pub word_count: Option<u32>,
}

// ========== 合并结果 ==========

/// 一次分析请求的合并结果，创建后不可变
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisOutcome {
    transcript: String,
    semantic: SemanticAssessment,
    phonetic: Option<PhoneticScore>,
    merged_at: DateTime<Utc>,
}

impl AnalysisOutcome {
    /// 合并两路结果；语音评分缺失是合法的完整结果
    pub fn merge(
        transcript: impl Into<String>,
        semantic: SemanticAssessment,
        phonetic: Option<PhoneticScore>,
    ) -> Self {
        Self {
            transcript: transcript.into(),
            semantic,
            phonetic,
            merged_at: Utc::now(),
        }
    }

    pub fn transcript(&self) -> &str {
        &self.transcript
    }

    pub fn semantic(&self) -> &SemanticAssessment {
        &self.semantic
    }

    pub fn phonetic(&self) -> Option<&PhoneticScore> {
        self.phonetic.as_ref()
    }

    pub fn merged_at(&self) -> DateTime<Utc> {
        self.merged_at
    }

    /// 语音评分是否缺失
    pub fn is_degraded(&self) -> bool {
        self.phonetic.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cefr_parse() {
        assert_eq!(CefrLevel::parse("b2"), Some(CefrLevel::B2));
        assert_eq!(CefrLevel::parse(" C1 "), Some(CefrLevel::C1));
        assert_eq!(CefrLevel::parse("D1"), None);
        assert_eq!(CefrLevel::parse(""), None);
    }

    #[test]
    fn test_cefr_find_first_mention() {
        let text = "3. CEFR level: B1. The speaker is close to B2 in vocabulary.";
        assert_eq!(CefrLevel::find_in(text), Some(CefrLevel::B1));
        assert_eq!(CefrLevel::find_in("no level given, see AB12"), None);
    }

    #[test]
    fn test_semantic_assessment_extracts_level() {
        let assessment = SemanticAssessment::from_text("Overall this is a solid C1 sample.");
        assert_eq!(assessment.cefr_level, Some(CefrLevel::C1));
        assert_eq!(assessment.cefr_level.unwrap().to_string(), "C1");
    }

    #[test]
    fn test_phonetic_score_tolerates_missing_fields() {
        let score: PhoneticScore = serde_json::from_value(serde_json::json!({
            "text": "hello world",
            "word_score_list": [
                { "word": "hello", "quality_score": 95.0 },
                { "word": "world", "quality_score": 71.0, "syllable_score_list": [
                    { "letters": "world", "quality_score": 71.0, "stress_level": 1 }
                ]}
            ],
            "speechace_score": { "pronunciation": 83.0 },
            "cefr_score": { "pronunciation": "B2", "fluency": "B1" },
            "fluency": { "overall_metrics": { "speech_rate": 2.4, "all_pause_count": 3 } }
        }))
        .unwrap();

        assert_eq!(score.word_score_list.len(), 2);
        assert_eq!(score.word_score_list[1].syllable_score_list.len(), 1);
        assert_eq!(score.speechace_score.unwrap().fluency, None);
        assert!(score.ielts_score.is_none());
        let metrics = score.fluency.unwrap().overall_metrics.unwrap();
        assert_eq!(metrics.all_pause_count, Some(3));
        assert_eq!(metrics.mean_length_run, None);
    }

    #[test]
    fn test_outcome_without_phonetic_is_degraded() {
        let outcome = AnalysisOutcome::merge(
            "I like travelling",
            SemanticAssessment::from_text("CEFR level A2"),
            None,
        );
        assert!(outcome.is_degraded());
        assert_eq!(outcome.semantic().cefr_level, Some(CefrLevel::A2));
        assert_eq!(outcome.transcript(), "I like travelling");
    }
}
