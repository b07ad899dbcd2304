//! 阶段处理上下文
//!
//! 封装"我正在处理第几个阶段、第几段输入"这一信息，只用于日志前缀

use std::fmt::Display;

use crate::models::AssessmentStage;

/// 阶段处理上下文
#[derive(Debug, Clone, Copy)]
pub struct StageCtx {
    /// 当前阶段
    pub stage: AssessmentStage,

    /// 阶段在向导中的位置（从1开始）
    pub position: usize,

    /// 当前处理的输入序号（从1开始，没有多段输入时为 `None`）
    pub item: Option<usize>,
}

impl StageCtx {
    /// 创建新的阶段上下文
    pub fn new(stage: AssessmentStage) -> Self {
        let position = AssessmentStage::ALL
            .iter()
            .position(|s| *s == stage)
            .map_or(0, |idx| idx + 1);

        Self {
            stage,
            position,
            item: None,
        }
    }

    /// 派生出处理第 `item` 段输入的上下文
    pub fn with_item(self, item: usize) -> Self {
        Self {
            item: Some(item),
            ..self
        }
    }
}

impl Display for StageCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[阶段 {}/{} {}",
            self.position,
            AssessmentStage::ALL.len(),
            self.stage
        )?;
        if let Some(item) = self.item {
            write!(f, " 输入#{}", item)?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let ctx = StageCtx::new(AssessmentStage::Speaking);
        assert_eq!(ctx.to_string(), "[阶段 3/8 speaking]");
        assert_eq!(ctx.with_item(2).to_string(), "[阶段 3/8 speaking 输入#2]");
    }
}
