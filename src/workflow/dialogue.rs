//! 口语对话会话 - 流程层
//!
//! 两轮对话的有限状态机：
//!
//! ```text
//! AwaitingFirstResponse --用户回答--> AwaitingSecondResponse --用户回答--> Closed
//! ```
//!
//! 第一轮回答经分类器识别难点并生成追问；第二轮回答只追加固定的结束语；
//! 关闭后的任何输入都被拒绝，调用方需要开启新会话。

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::SessionStateViolation;
use crate::models::taxonomy::Taxonomy;
use crate::models::transcript::{SessionSummary, Speaker, TranscriptTurn};
use crate::services::classifier::{self, ClassificationResult};
use crate::utils::logging::truncate_text;

/// 没有识别到任何难点时的追问
pub const FALLBACK_PROMPT: &str = "If I can interrupt for just a minute, could you repeat that please? What difficulties would you like to focus on?";

/// 第二轮回答后的结束语
pub const CLOSING_ACKNOWLEDGMENT: &str =
    "Thanks for your response, select continue when you are ready.";

const INTERRUPT_PREFIX: &str = "If I can interrupt for just a minute, I understand that you have difficulties with";

/// 会话状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DialogueStage {
    AwaitingFirstResponse,
    AwaitingSecondResponse,
    Closed,
}

/// 一次状态转移的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogueReply {
    /// 本轮追加的助手发言
    pub text: String,
    /// 本轮新识别的分类结果（第二轮为空）
    pub classifications: Vec<ClassificationResult>,
    /// 转移后的状态
    pub stage: DialogueStage,
}

/// 口语对话会话
///
/// 只能通过 [`DialogueSession::respond`] 推进；`&mut self` 保证同一时间
/// 只有一个转移在进行。
#[derive(Debug)]
pub struct DialogueSession<'t> {
    taxonomy: &'t Taxonomy,
    turns: Vec<TranscriptTurn>,
    identified_categories: Vec<String>,
    focus_areas: Vec<String>,
    stage: DialogueStage,
}

impl<'t> DialogueSession<'t> {
    /// 开启新会话
    pub fn new(taxonomy: &'t Taxonomy) -> Self {
        Self {
            taxonomy,
            turns: Vec::new(),
            identified_categories: Vec::new(),
            focus_areas: Vec::new(),
            stage: DialogueStage::AwaitingFirstResponse,
        }
    }

    pub fn stage(&self) -> DialogueStage {
        self.stage
    }

    pub fn turns(&self) -> &[TranscriptTurn] {
        &self.turns
    }

    /// 已识别的难点分类（首次出现顺序，无重复）
    pub fn identified_categories(&self) -> &[String] {
        &self.identified_categories
    }

    pub fn is_closed(&self) -> bool {
        self.stage == DialogueStage::Closed
    }

    /// 提交一条用户转写，返回助手的回复
    ///
    /// # 错误
    /// 会话已关闭时返回 [`SessionStateViolation`]，不会追加任何记录
    pub fn respond(
        &mut self,
        transcript: impl Into<String>,
    ) -> Result<DialogueReply, SessionStateViolation> {
        let transcript = transcript.into();

        match self.stage {
            DialogueStage::AwaitingFirstResponse => Ok(self.on_first_response(transcript)),
            DialogueStage::AwaitingSecondResponse => Ok(self.on_second_response(transcript)),
            DialogueStage::Closed => Err(SessionStateViolation),
        }
    }

    fn on_first_response(&mut self, transcript: String) -> DialogueReply {
        debug!("第一轮回答: {}", truncate_text(&transcript, 80));

        let classifications = classifier::classify(self.taxonomy, &transcript);
        for result in &classifications {
            if !self.identified_categories.contains(&result.category) {
                self.identified_categories.push(result.category.clone());
            }
        }
        for area in classifier::extract_focus_areas(&transcript) {
            if !self.focus_areas.contains(&area) {
                self.focus_areas.push(area);
            }
        }

        let reply = compose_follow_up(&self.identified_categories);
        info!(
            "识别到 {} 个难点分类: {:?}",
            self.identified_categories.len(),
            self.identified_categories
        );

        self.turns.push(TranscriptTurn::user(transcript));
        self.turns.push(TranscriptTurn::assistant(reply.clone()));
        self.stage = DialogueStage::AwaitingSecondResponse;

        DialogueReply {
            text: reply,
            classifications,
            stage: self.stage,
        }
    }

    fn on_second_response(&mut self, transcript: String) -> DialogueReply {
        debug!("第二轮回答: {}", truncate_text(&transcript, 80));

        self.turns.push(TranscriptTurn::user(transcript));
        self.turns
            .push(TranscriptTurn::assistant(CLOSING_ACKNOWLEDGMENT));
        self.stage = DialogueStage::Closed;

        DialogueReply {
            text: CLOSING_ACKNOWLEDGMENT.to_string(),
            classifications: Vec::new(),
            stage: self.stage,
        }
    }

    /// 生成摘要（会话可以处于任何状态）
    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            identified_categories: self.identified_categories.clone(),
            focus_areas: self.focus_areas.clone(),
            turns: self.turns.clone(),
        }
    }

    /// 结束会话并交出摘要
    pub fn into_summary(self) -> SessionSummary {
        SessionSummary {
            identified_categories: self.identified_categories,
            focus_areas: self.focus_areas,
            turns: self.turns,
        }
    }

    /// 最近一条助手发言
    pub fn last_assistant_turn(&self) -> Option<&TranscriptTurn> {
        self.turns
            .iter()
            .rev()
            .find(|turn| turn.speaker == Speaker::Assistant)
    }
}

/// 根据识别到的分类生成汇总追问
///
/// 一个分类用单数句式，多个分类用复数句式，没有分类时使用兜底提示
pub fn compose_follow_up(categories: &[String]) -> String {
    match categories.len() {
        0 => FALLBACK_PROMPT.to_string(),
        1 => format!(
            "{} {}. Could you tell me more?",
            INTERRUPT_PREFIX, categories[0]
        ),
        _ => format!(
            "{} {}. Can you tell me more about some of these?",
            INTERRUPT_PREFIX,
            categories.join(" and ")
        ),
    }
}
