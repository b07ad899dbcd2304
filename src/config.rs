use std::time::Duration;

/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    // --- 语义分析 / 转写（OpenAI 兼容接口）---
    pub openai_api_key: String,
    pub openai_api_base_url: String,
    pub analysis_model: String,
    pub transcription_model: String,
    // --- 语音评分（SpeechAce）---
    pub speechace_api_key: String,
    pub speechace_api_url: String,
    pub speechace_dialect: String,
    pub speechace_user_id: String,
    /// 语义分析超时（秒）
    pub semantic_timeout_secs: u64,
    /// 语音评分超时（秒）
    pub phonetic_timeout_secs: u64,
    /// 自定义难点分类表（TOML），为空时使用内置分类表
    pub taxonomy_file: Option<String>,
    // --- 测评输入 ---
    /// 口语阶段的录音文件（按回答顺序）
    pub speaking_audio_files: Vec<String>,
    /// 观点陈述阶段的录音文件
    pub opinion_audio_file: Option<String>,
    /// 听力测验作答（选项下标，按题目顺序）
    pub listening_answers: Option<Vec<usize>>,
    /// 阅读测验作答
    pub reading_answers: Option<Vec<usize>>,
    /// 写作阶段的文本文件
    pub writing_sample_file: Option<String>,
    /// 报告输出文件
    pub report_output_file: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            openai_api_key: String::new(),
            openai_api_base_url: "https://api.openai.com/v1".to_string(),
            analysis_model: "gpt-4".to_string(),
            transcription_model: "whisper-1".to_string(),
            speechace_api_key: String::new(),
            speechace_api_url: "https://api4.speechace.com/api/scoring/text/v9/json".to_string(),
            speechace_dialect: "en-us".to_string(),
            speechace_user_id: "language-audit".to_string(),
            semantic_timeout_secs: 60,
            phonetic_timeout_secs: 30,
            taxonomy_file: None,
            speaking_audio_files: Vec::new(),
            opinion_audio_file: None,
            listening_answers: None,
            reading_answers: None,
            writing_sample_file: None,
            report_output_file: "report.json".to_string(),
            verbose_logging: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            openai_api_key: std::env::var("OPENAI_API_KEY").unwrap_or(default.openai_api_key),
            openai_api_base_url: std::env::var("OPENAI_API_BASE_URL").unwrap_or(default.openai_api_base_url),
            analysis_model: std::env::var("ANALYSIS_MODEL").unwrap_or(default.analysis_model),
            transcription_model: std::env::var("TRANSCRIPTION_MODEL").unwrap_or(default.transcription_model),
            speechace_api_key: std::env::var("SPEECHACE_API_KEY").unwrap_or(default.speechace_api_key),
            speechace_api_url: std::env::var("SPEECHACE_API_URL").unwrap_or(default.speechace_api_url),
            speechace_dialect: std::env::var("SPEECHACE_DIALECT").unwrap_or(default.speechace_dialect),
            speechace_user_id: std::env::var("SPEECHACE_USER_ID").unwrap_or(default.speechace_user_id),
            semantic_timeout_secs: std::env::var("SEMANTIC_TIMEOUT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.semantic_timeout_secs),
            phonetic_timeout_secs: std::env::var("PHONETIC_TIMEOUT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.phonetic_timeout_secs),
            taxonomy_file: std::env::var("TAXONOMY_FILE").ok().filter(|v| !v.trim().is_empty()),
            speaking_audio_files: std::env::var("SPEAKING_AUDIO_FILES").map(|v| split_list(&v)).unwrap_or(default.speaking_audio_files),
            opinion_audio_file: std::env::var("OPINION_AUDIO_FILE").ok().filter(|v| !v.trim().is_empty()),
            listening_answers: std::env::var("LISTENING_ANSWERS").ok().and_then(|v| parse_answers(&v)),
            reading_answers: std::env::var("READING_ANSWERS").ok().and_then(|v| parse_answers(&v)),
            writing_sample_file: std::env::var("WRITING_SAMPLE_FILE").ok().filter(|v| !v.trim().is_empty()),
            report_output_file: std::env::var("REPORT_OUTPUT_FILE").unwrap_or(default.report_output_file),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
        }
    }

    pub fn semantic_timeout(&self) -> Duration {
        Duration::from_secs(self.semantic_timeout_secs)
    }

    pub fn phonetic_timeout(&self) -> Duration {
        Duration::from_secs(self.phonetic_timeout_secs)
    }
}

/// 解析逗号分隔的列表，忽略空项
fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// 解析逗号分隔的选项下标；为空或含有非数字项时返回 `None`
fn parse_answers(value: &str) -> Option<Vec<usize>> {
    let answers = split_list(value)
        .iter()
        .map(|item| item.parse().ok())
        .collect::<Option<Vec<usize>>>()?;
    (!answers.is_empty()).then_some(answers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_list_skips_blank_items() {
        assert_eq!(
            split_list(" first.webm, ,second.webm,"),
            vec!["first.webm".to_string(), "second.webm".to_string()]
        );
        assert!(split_list("").is_empty());
    }

    #[test]
    fn test_parse_answers() {
        assert_eq!(parse_answers("1, 2,0"), Some(vec![1, 2, 0]));
        assert_eq!(parse_answers("1,b,0"), None);
        assert_eq!(parse_answers(" "), None);
    }

    #[test]
    fn test_default_timeouts() {
        let config = Config::default();
        assert_eq!(config.semantic_timeout(), Duration::from_secs(60));
        assert_eq!(config.phonetic_timeout(), Duration::from_secs(30));
        assert_eq!(config.analysis_model, "gpt-4");
    }
}
