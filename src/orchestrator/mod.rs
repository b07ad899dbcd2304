//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责调度外部服务和测评阶段，是整个系统的"指挥中心"。
//!
//! ## 模块划分
//!
//! ### `app` - 测评运行器
//! - 管理应用生命周期（初始化、运行）
//! - 按顺序执行口语、观点陈述、写作阶段
//! - 写出报告 JSON 并输出统计信息
//!
//! ### `analysis` - 分析编排器
//! - 并发调用语义分析和语音评分
//! - 语义分析失败即失败，语音评分失败只降级
//! - 合并为一条不可变的分析结果
//!
//! ## 层次关系
//!
//! ```text
//! app (处理全部阶段)
//!     ↓
//! analysis (处理单个分析请求)      workflow::DialogueSession (口语对话)
//!     ↓                                 ↓
//! services (能力接口：转写 / 语义分析 / 语音评分 / 分类器)
//!     ↓
//! clients (具体实现：OpenAI / Whisper / SpeechAce)
//! ```
//!
//! ## 设计原则
//!
//! 1. **单一职责**：app 管阶段，analysis 管一次分析
//! 2. **依赖接口**：编排层只持有 `Arc<dyn Trait>`，不关心具体服务
//! 3. **向下依赖**：编排层 → workflow → services → models
//! 4. **无业务判断**：分类和对话逻辑都在下层

pub mod analysis;
pub mod app;

// 重新导出主要类型
pub use analysis::AnalysisOrchestrator;
pub use app::App;
