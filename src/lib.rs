//! # Language Audit
//!
//! 自适应英语能力测评的核心库
//!
//! ## 架构设计
//!
//! 本系统采用分层架构：
//!
//! ### ① 数据层（Models）
//! - `models/` - 难点分类表、对话记录、分析请求与结果、听力 / 阅读测验、报告输入
//! - `loaders` - 从 TOML 加载自定义分类表
//!
//! ### ② 业务能力层（Services / Clients）
//! - `services/classifier` - 关键词难点分类，纯函数
//! - `services/providers` - 转写 / 语义分析 / 语音评分的接口
//! - `clients/` - 上述接口的 HTTP 实现
//!
//! ### ③ 流程层（Workflow）
//! - `DialogueSession` - 两轮口语对话的状态机
//! - `StageCtx` - 阶段日志上下文
//!
//! ### ④ 编排层（Orchestration）
//! - `AnalysisOrchestrator` - 并发分析与结果合并
//! - `App` - 按阶段运行完整测评
//!
//! ## 模块结构

pub mod clients;
pub mod config;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{AnalysisFailure, AppError, AppResult, ProviderError, SessionStateViolation};
pub use models::{
    AnalysisKind, AnalysisOutcome, AnalysisRequest, AssessmentReport, AudioClip, Taxonomy,
    TriggerCategory,
};
pub use orchestrator::{AnalysisOrchestrator, App};
pub use services::{classify, ClassificationResult, PhoneticScorer, SemanticAnalyzer, Transcriber};
pub use workflow::{DialogueReply, DialogueSession, DialogueStage};
