//! 难点分类服务 - 业务能力层
//!
//! 只负责"从转写文本识别学习难点"能力，不关心对话流程
//!
//! 匹配规则是显式的启发式：触发短语作为子串出现即命中（忽略大小写），
//! 不做分词、词形还原或打分。

use serde::{Deserialize, Serialize};

use crate::models::taxonomy::Taxonomy;

/// 单个分类的识别结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// 分类标识
    pub category: String,
    /// 命中的触发短语（按分类表声明顺序，非空）
    pub matched_triggers: Vec<String>,
    /// 针对该分类的追问
    pub follow_up_prompt: String,
}

/// 识别转写文本中的学习难点
///
/// 按分类表声明顺序逐个检查分类，分类内按声明顺序收集全部命中的触发短语。
/// 空文本或没有命中时返回空列表，兜底提示由调用方负责。
pub fn classify(taxonomy: &Taxonomy, transcript: &str) -> Vec<ClassificationResult> {
    let lowered = transcript.to_lowercase();
    if lowered.trim().is_empty() {
        return Vec::new();
    }

    taxonomy
        .categories()
        .iter()
        .filter_map(|category| {
            let matched: Vec<String> = category
                .triggers()
                .iter()
                .filter(|trigger| lowered.contains(trigger.as_str()))
                .cloned()
                .collect();

            if matched.is_empty() {
                return None;
            }

            let follow_up_prompt = follow_up_prompt(&matched);
            Some(ClassificationResult {
                category: category.name().to_string(),
                matched_triggers: matched,
                follow_up_prompt,
            })
        })
        .collect()
}

/// 单个分类的追问模板
pub fn follow_up_prompt(matched_triggers: &[String]) -> String {
    format!(
        "I understand that {} is particularly challenging for you. Could you tell me more?",
        matched_triggers.join(" and ")
    )
}

// ========== 关注点 ==========

/// 报告中展示的关注点关键词（按展示顺序）
pub const FOCUS_KEYWORDS: &[&str] = &[
    "grammar",
    "vocabulary",
    "pronunciation",
    "speaking",
    "listening",
    "writing",
    "reading",
    "modal verbs",
    "tenses",
    "articles",
    "prepositions",
];

/// 提取转写文本中提到的关注点关键词
pub fn extract_focus_areas(transcript: &str) -> Vec<String> {
    let lowered = transcript.to_lowercase();
    FOCUS_KEYWORDS
        .iter()
        .filter(|keyword| lowered.contains(*keyword))
        .map(|keyword| (*keyword).to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::taxonomy::TriggerCategory;

    fn categories(results: &[ClassificationResult]) -> Vec<&str> {
        results.iter().map(|r| r.category.as_str()).collect()
    }

    #[test]
    fn test_grammar_and_tenses() {
        let taxonomy = Taxonomy::builtin();
        let results = classify(&taxonomy, "I really struggle with grammar and tenses");

        assert_eq!(categories(&results), vec!["grammar"]);
        let grammar = &results[0];
        assert!(grammar.matched_triggers.contains(&"grammar".to_string()));
        assert!(grammar.matched_triggers.contains(&"tenses".to_string()));
        assert_eq!(
            grammar.follow_up_prompt,
            "I understand that grammar and tenses is particularly challenging for you. Could you tell me more?"
        );
    }

    #[test]
    fn test_no_match_returns_empty() {
        let taxonomy = Taxonomy::builtin();
        assert!(classify(&taxonomy, "everything is fine").is_empty());
        assert!(classify(&taxonomy, "").is_empty());
        assert!(classify(&taxonomy, "   ").is_empty());
    }

    #[test]
    fn test_case_insensitive_match() {
        let taxonomy = Taxonomy::builtin();
        let results = classify(&taxonomy, "My PRONUNCIATION is weak");
        assert_eq!(categories(&results), vec!["pronunciation"]);
        assert_eq!(results[0].matched_triggers, vec!["pronunciation"]);
    }

    #[test]
    fn test_categories_in_declaration_order() {
        let taxonomy = Taxonomy::builtin();
        // 文本中先提到发音，但结果按分类表顺序排列
        let results = classify(&taxonomy, "pronunciation, and also grammar");
        assert_eq!(categories(&results), vec!["grammar", "pronunciation"]);
    }

    #[test]
    fn test_shared_trigger_hits_every_category() {
        let taxonomy = Taxonomy::builtin();
        let results = classify(&taxonomy, "small talk at work");
        assert_eq!(
            categories(&results),
            vec!["businessCommunication", "culturalDifferences"]
        );
    }

    #[test]
    fn test_matched_triggers_in_declaration_order() {
        let taxonomy = Taxonomy::new(vec![TriggerCategory::new(
            "grammar",
            ["articles", "tenses", "grammar"],
        )
        .unwrap()])
        .unwrap();

        let results = classify(&taxonomy, "grammar, tenses and articles");
        assert_eq!(
            results[0].matched_triggers,
            vec!["articles", "tenses", "grammar"]
        );
    }

    #[test]
    fn test_every_hit_has_a_substring_trigger() {
        let taxonomy = Taxonomy::builtin();
        let samples = [
            "I get nervous in meetings and my accent is strong",
            "Phrasal verbs and idioms confuse me",
            "I can't follow native speakers on phone calls",
            "nothing in particular",
        ];

        for sample in samples {
            let lowered = sample.to_lowercase();
            for result in classify(&taxonomy, sample) {
                assert!(!result.matched_triggers.is_empty());
                let category = taxonomy.get(&result.category).unwrap();
                for trigger in &result.matched_triggers {
                    assert!(category.triggers().contains(trigger));
                    assert!(lowered.contains(trigger.as_str()));
                }
            }
        }
    }

    #[test]
    fn test_classify_is_idempotent() {
        let taxonomy = Taxonomy::builtin();
        let text = "Writing emails and understanding accents in business meetings";
        assert_eq!(classify(&taxonomy, text), classify(&taxonomy, text));
    }

    #[test]
    fn test_extract_focus_areas() {
        assert_eq!(
            extract_focus_areas("Grammar, especially modal verbs, and my reading"),
            vec!["grammar", "reading", "modal verbs"]
        );
        assert!(extract_focus_areas("everything is fine").is_empty());
    }
}
