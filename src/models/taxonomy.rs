//! 学习难点分类表
//!
//! 难点分类 → 触发短语。分类表在进程启动时构建一次，之后只读，
//! 以引用方式传给分类器。

use serde::{Deserialize, Serialize};

use crate::error::TaxonomyError;

/// 单个难点分类
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TriggerCategory {
    name: String,
    triggers: Vec<String>,
}

impl TriggerCategory {
    /// 创建分类
    ///
    /// 触发词统一转小写并去除首尾空白；空触发词和重复触发词被丢弃，
    /// 保留首次出现的顺序。
    pub fn new<I, S>(name: impl Into<String>, triggers: I) -> Result<Self, TaxonomyError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(TaxonomyError::BlankName);
        }

        let mut normalized: Vec<String> = Vec::new();
        for trigger in triggers {
            let trigger = trigger.as_ref().trim().to_lowercase();
            if !trigger.is_empty() && !normalized.contains(&trigger) {
                normalized.push(trigger);
            }
        }

        if normalized.is_empty() {
            return Err(TaxonomyError::EmptyCategory { name });
        }

        Ok(Self {
            name,
            triggers: normalized,
        })
    }

    /// 分类标识（如 `grammar`、`businessCommunication`）
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 按声明顺序排列的触发短语（小写）
    pub fn triggers(&self) -> &[String] {
        &self.triggers
    }
}

/// 难点分类表（不可变）
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Taxonomy {
    categories: Vec<TriggerCategory>,
}

impl Taxonomy {
    /// 由分类列表构建，分类名称不能重复
    pub fn new(categories: Vec<TriggerCategory>) -> Result<Self, TaxonomyError> {
        if categories.is_empty() {
            return Err(TaxonomyError::NoCategories);
        }

        for (idx, category) in categories.iter().enumerate() {
            if categories[..idx].iter().any(|c| c.name == category.name) {
                return Err(TaxonomyError::DuplicateCategory {
                    name: category.name.clone(),
                });
            }
        }

        Ok(Self { categories })
    }

    /// 内置分类表
    pub fn builtin() -> Self {
        let categories = BUILTIN_CATEGORIES
            .iter()
            .map(|(name, triggers)| TriggerCategory {
                name: (*name).to_string(),
                triggers: triggers.iter().map(|t| (*t).to_string()).collect(),
            })
            .collect();

        Self { categories }
    }

    /// 从 TOML 文本构建分类表
    ///
    /// ```toml
    /// [[category]]
    /// name = "grammar"
    /// triggers = ["grammar", "tenses"]
    /// ```
    pub fn from_toml_str(content: &str) -> Result<Self, TaxonomyError> {
        let file: TaxonomyFile = toml::from_str(content)?;

        let categories = file
            .category
            .into_iter()
            .map(|entry| TriggerCategory::new(entry.name, entry.triggers))
            .collect::<Result<Vec<_>, _>>()?;

        Self::new(categories)
    }

    /// 按声明顺序遍历分类
    pub fn categories(&self) -> &[TriggerCategory] {
        &self.categories
    }

    /// 按名称查找分类
    pub fn get(&self, name: &str) -> Option<&TriggerCategory> {
        self.categories.iter().find(|c| c.name == name)
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

impl Default for Taxonomy {
    fn default() -> Self {
        Self::builtin()
    }
}

#[derive(Debug, Deserialize)]
struct TaxonomyFile {
    #[serde(default)]
    category: Vec<CategoryEntry>,
}

#[derive(Debug, Deserialize)]
struct CategoryEntry {
    name: String,
    triggers: Vec<String>,
}

// ========== 内置数据 ==========

const BUILTIN_CATEGORIES: &[(&str, &[&str])] = &[
    (
        "grammar",
        &[
            // 基础语法
            "grammar", "structure", "tenses", "rules", "sentence", "articles", "prepositions",
            "conjugation", "verb forms",
            // 时态
            "present tense", "past tense", "future tense", "perfect tense", "continuous tense",
            "conditional", "subjunctive", "modal verbs", "auxiliary verbs", "irregular verbs",
            "passive voice", "active voice",
            // 句子结构
            "word order", "clause", "complex sentences", "compound sentences", "relative clauses",
            "dependent clauses", "independent clauses", "sentence patterns", "syntax",
            // 词性
            "nouns", "pronouns", "adjectives", "adverbs", "conjunctions", "singular", "plural",
            "countable", "uncountable", "possessive", "determiners", "quantifiers",
            "comparatives", "superlatives",
        ],
    ),
    (
        "pronunciation",
        &[
            "pronunciation", "sound", "speak clearly", "pronounce", "intonation",
            "stress", "rhythm", "phonetics",
            // 具体发音
            "vowel sounds", "consonant sounds", "th sound", "r sound", "l sound",
            "word stress", "sentence stress", "connected speech", "linking sounds",
            // 发声习惯
            "pitch", "tone", "voice", "articulation", "enunciation", "clarity",
            "pronunciation patterns", "sound patterns", "mouth position", "tongue position",
        ],
    ),
    (
        "listening",
        &[
            "listening", "understand", "accent", "hearing", "comprehend", "fast speakers",
            "speed of speech", "native speakers",
            "different accents", "background noise", "multiple speakers", "natural speech",
            "connected speech", "reduced forms", "casual speech", "formal speech",
            // 场景
            "movies", "tv shows", "radio", "podcasts", "phone calls", "video calls",
            "conversations", "lectures", "announcements", "public speaking",
        ],
    ),
    (
        "vocabulary",
        &[
            "vocabulary", "words", "phrases", "terms", "lexis", "expressions",
            "collocations", "lack of words",
            "academic words", "business terms", "technical vocabulary", "casual words",
            "formal words", "slang", "idioms", "phrasal verbs", "synonyms", "antonyms",
            "word choice", "word usage", "word meaning", "context", "register",
            "appropriateness", "word families", "word formation", "derivatives",
        ],
    ),
    (
        "fluency",
        &[
            "fluency", "speak fast", "flow", "pauses", "continuous speech",
            "hesitation", "confidence",
            "speaking speed", "natural speech", "smooth speech", "connected speech",
            "speech rate", "pace", "rhythm", "automaticity",
            "getting stuck", "losing words", "mental blocks", "thinking time",
            "processing speed", "response time", "speaking anxiety", "speaking fear",
        ],
    ),
    (
        "businessCommunication",
        &[
            "emails", "meetings", "business", "negotiations", "presentations",
            "formal", "reports", "professional", "communication at work",
            "conference calls", "video meetings", "client meetings", "team meetings",
            "business writing", "business presentations", "networking", "small talk",
            // 文书
            "proposals", "contracts", "memos", "business letters", "executive summaries",
            "business reports", "meeting minutes", "business plans",
        ],
    ),
    (
        "culturalDifferences",
        &[
            "cultural", "politeness", "formal", "informal", "manners", "etiquette",
            "phrases", "small talk",
            "social norms", "customs", "traditions", "social expectations", "body language",
            "gestures", "eye contact", "personal space",
            "directness", "indirectness", "formality levels", "respect levels",
            "hierarchy", "social status", "relationship building", "networking",
        ],
    ),
    (
        "comprehension",
        &[
            "understand", "comprehension", "reading", "listening", "grasp meaning",
            "understanding text",
            "reading speed", "scanning", "skimming", "detailed reading", "critical reading",
            "academic reading", "technical reading", "reading strategies",
            "main ideas", "details", "inference", "context clues", "text organization",
            "authors purpose", "tone", "implied meaning",
        ],
    ),
    (
        "accent",
        &[
            "accent", "native accent", "foreign accent", "regional accent",
            "accent reduction", "accent modification", "accent training",
            "british accent", "american accent", "australian accent",
            "neutral accent", "standard accent",
            "accent clarity", "accent intelligibility", "accent comprehension",
            "accent improvement", "accent adaptation",
        ],
    ),
];
