use serde::{Deserialize, Serialize};

/// 测评阶段（按向导顺序）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssessmentStage {
    /// 联系方式
    ContactInfo,
    /// 学习偏好
    LearnerPreferences,
    /// 口语对话
    Speaking,
    /// 观点陈述录音
    Opinion,
    /// 听力测验
    Listening,
    /// 阅读测验
    Reading,
    /// 写作
    Writing,
    /// 报告
    Report,
}

impl AssessmentStage {
    /// 全部阶段，按顺序
    pub const ALL: [AssessmentStage; 8] = [
        AssessmentStage::ContactInfo,
        AssessmentStage::LearnerPreferences,
        AssessmentStage::Speaking,
        AssessmentStage::Opinion,
        AssessmentStage::Listening,
        AssessmentStage::Reading,
        AssessmentStage::Writing,
        AssessmentStage::Report,
    ];

    /// 获取标准名称
    pub fn name(self) -> &'static str {
        match self {
            AssessmentStage::ContactInfo => "contact info",
            AssessmentStage::LearnerPreferences => "learner preferences",
            AssessmentStage::Speaking => "speaking",
            AssessmentStage::Opinion => "opinion",
            AssessmentStage::Listening => "listening",
            AssessmentStage::Reading => "reading",
            AssessmentStage::Writing => "writing",
            AssessmentStage::Report => "report",
        }
    }

    /// 下一个阶段，报告阶段之后没有后续
    pub fn next(self) -> Option<Self> {
        let idx = Self::ALL.iter().position(|s| *s == self)?;
        Self::ALL.get(idx + 1).copied()
    }

    /// 是否由本库处理（其余阶段属于外部界面）
    pub fn is_core(self) -> bool {
        matches!(
            self,
            AssessmentStage::Speaking
                | AssessmentStage::Opinion
                | AssessmentStage::Listening
                | AssessmentStage::Reading
                | AssessmentStage::Writing
        )
    }
}

impl std::fmt::Display for AssessmentStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_order() {
        let mut stage = AssessmentStage::ContactInfo;
        let mut visited = vec![stage];
        while let Some(next) = stage.next() {
            visited.push(next);
            stage = next;
        }
        assert_eq!(visited, AssessmentStage::ALL.to_vec());
        assert_eq!(AssessmentStage::Report.next(), None);
    }

    #[test]
    fn test_core_stages() {
        let core: Vec<_> = AssessmentStage::ALL
            .iter()
            .copied()
            .filter(|s| s.is_core())
            .collect();
        assert_eq!(
            core,
            vec![
                AssessmentStage::Speaking,
                AssessmentStage::Opinion,
                AssessmentStage::Listening,
                AssessmentStage::Reading,
                AssessmentStage::Writing
            ]
        );
    }
}
