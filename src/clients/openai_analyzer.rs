//! 语义分析客户端
//!
//! 调用 OpenAI 兼容的对话接口，对口语 / 写作样本给出分项评价和 CEFR 等级
//!
//! ## 技术栈
//! - 使用 `async-openai` crate 进行 API 调用
//! - 支持自定义 API 端点和模型

use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::ProviderError;
use crate::models::analysis::{AnalysisKind, SemanticAssessment};
use crate::services::providers::SemanticAnalyzer;

const PROVIDER: &str = "openai";

/// 通用口语样本的系统消息
const ASSESSOR_SYSTEM_MESSAGE: &str = "You are an expert CEFR language assessor.";

/// 语义分析客户端
pub struct OpenAiAnalyzer {
    client: Client<OpenAIConfig>,
    model_name: String,
}

impl OpenAiAnalyzer {
    /// 创建新的语义分析客户端
    pub fn new(config: &Config) -> Self {
        let openai_config = OpenAIConfig::new()
            .with_api_key(&config.openai_api_key)
            .with_api_base(&config.openai_api_base_url);

        Self {
            client: Client::with_config(openai_config),
            model_name: config.analysis_model.clone(),
        }
    }

    /// 发送一次对话请求，返回去除首尾空白的回复内容
    async fn send_to_llm(
        &self,
        user_message: &str,
        system_message: Option<&str>,
    ) -> Result<String, ProviderError> {
        debug!("调用 LLM API，模型: {}", self.model_name);
        debug!("用户消息长度: {} 字符", user_message.len());

        let mut messages = Vec::new();

        if let Some(sys_msg) = system_message {
            let system_msg = ChatCompletionRequestSystemMessageArgs::default()
                .content(sys_msg)
                .build()
                .map_err(|e| ProviderError::request_failed(PROVIDER, e))?;
            messages.push(ChatCompletionRequestMessage::System(system_msg));
        }

        let user_msg = ChatCompletionRequestUserMessageArgs::default()
            .content(user_message)
            .build()
            .map_err(|e| ProviderError::request_failed(PROVIDER, e))?;
        messages.push(ChatCompletionRequestMessage::User(user_msg));

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model_name)
            .messages(messages)
            .build()
            .map_err(|e| ProviderError::request_failed(PROVIDER, e))?;

        let response = self.client.chat().create(request).await.map_err(|e| {
            warn!("LLM API 调用失败: {}", e);
            ProviderError::request_failed(PROVIDER, e)
        })?;

        debug!("LLM API 调用成功");

        let content = response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .ok_or_else(|| ProviderError::empty_response(PROVIDER))?;

        Ok(content)
    }
}

#[async_trait]
impl SemanticAnalyzer for OpenAiAnalyzer {
    fn name(&self) -> &str {
        PROVIDER
    }

    async fn analyze(
        &self,
        transcript: &str,
        kind: AnalysisKind,
    ) -> Result<SemanticAssessment, ProviderError> {
        let (user_message, system_message) = build_analysis_messages(transcript, kind);
        let content = self.send_to_llm(&user_message, system_message).await?;
        Ok(SemanticAssessment::from_text(content))
    }
}

/// 按分析类型构建提示词
///
/// 返回 (user_message, system_message)
pub fn build_analysis_messages(
    transcript: &str,
    kind: AnalysisKind,
) -> (String, Option<&'static str>) {
    match kind {
        AnalysisKind::Opinion => (
            format!(
                r#"Analyze this English speaking sample and provide short responses for:
1. Ability to Understand: Assess how well the speaker demonstrates comprehension of the topic, including the use of appropriate responses and relevant vocabulary.
2. Ability to Communicate: Evaluate the speaker's overall ability to convey their thoughts clearly, including coherence, fluency, and effective use of language.
3. CEFR level (A1, A2, B1, B2, C1, or C2) with a brief explanation.
4. Key strengths and areas for improvement.

Speaking sample: "{}""#,
                transcript
            ),
            None,
        ),
        AnalysisKind::Writing => (
            format!(
                r#"Analyze this English writing sample and provide short responses for:
1. Task Achievement: Assess how well the writer addresses the task and communicates their ideas.
2. Coherence & Cohesion: Evaluate the organization, paragraph structure, and use of linking devices.
3. Vocabulary: Comment on range and accuracy of vocabulary use.
4. Grammar: Assess grammatical range and accuracy.
5. CEFR level (A1, A2, B1, B2, C1, or C2) with a brief explanation.
6. Key strengths and areas for improvement.

Writing sample: "{}""#,
                transcript
            ),
            None,
        ),
        AnalysisKind::Speaking => (
            format!(
                r#"Analyze this text and assess the speaker's language level on the CEFR scale (A1 to C2) considering:
1. Grammar complexity and accuracy
2. Vocabulary range and appropriateness
3. Coherence and flow of ideas
4. Overall fluency

Text to analyze: "{}"

Please provide a detailed analysis with specific examples from the text and a final CEFR level assessment."#,
                transcript
            ),
            Some(ASSESSOR_SYSTEM_MESSAGE),
        ),
    }
}
