/// 日志工具模块
///
/// 提供日志初始化和输出的辅助函数
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::models::AssessmentStage;

/// 初始化日志
///
/// `RUST_LOG` 优先；否则默认 `info`，开启详细日志时为 `debug`
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // 重复初始化（例如测试中）直接忽略
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// 记录程序启动信息
///
/// # 参数
/// - `taxonomy_size`: 难点分类数量
/// - `speaking_clips`: 口语阶段录音数量
pub fn log_startup(taxonomy_size: usize, speaking_clips: usize) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 英语能力测评");
    info!("📚 难点分类数: {}", taxonomy_size);
    info!("🎙️ 口语录音数: {}", speaking_clips);
    info!("{}", "=".repeat(60));
}

/// 记录阶段开始信息
pub fn log_stage_start(stage: AssessmentStage) {
    info!("\n{}", "─".repeat(60));
    info!("📦 开始阶段: {}", stage);
    info!("{}", "─".repeat(60));
}

/// 记录阶段完成信息
pub fn log_stage_complete(stage: AssessmentStage) {
    info!("✓ 阶段完成: {}", stage);
}

/// 打印最终统计信息
///
/// # 参数
/// - `completed`: 完成的阶段数
/// - `degraded`: 语音评分缺失的阶段数
/// - `report_path`: 报告文件路径
pub fn print_final_stats(completed: usize, degraded: usize, report_path: &str) {
    info!("\n{}", "=".repeat(60));
    info!("📊 测评完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 完成阶段: {}", completed);
    info!("⚠️ 语音评分缺失: {}", degraded);
    info!("{}", "=".repeat(60));
    info!("\n报告已保存至: {}", report_path);
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
