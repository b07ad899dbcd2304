use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 发言方
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    User,
    Assistant,
}

/// 对话记录中的一条发言
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptTurn {
    pub speaker: Speaker,
    pub text: String,
    /// 序列化为 RFC 3339 / ISO-8601
    pub timestamp: DateTime<Utc>,
}

impl TranscriptTurn {
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Speaker::User, text)
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(Speaker::Assistant, text)
    }

    fn new(speaker: Speaker, text: impl Into<String>) -> Self {
        Self {
            speaker,
            text: text.into(),
            timestamp: Utc::now(),
        }
    }
}

/// 口语会话结束后交给报告的摘要
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    /// 识别出的难点分类（首次出现顺序，无重复）
    pub identified_categories: Vec<String>,
    pub focus_areas: Vec<String>,
    pub turns: Vec<TranscriptTurn>,
}
