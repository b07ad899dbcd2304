use std::time::Duration;

use thiserror::Error;

/// 第三方库错误的统一装箱类型
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 外部服务调用错误（转写等硬依赖）
    #[error("外部服务错误: {0}")]
    Provider(#[from] ProviderError),
    /// 语义分析失败，阶段无法完成
    #[error(transparent)]
    Analysis(#[from] AnalysisFailure),
    /// 会话状态错误（调用方错误）
    #[error(transparent)]
    Session(#[from] SessionStateViolation),
    /// 难点分类表错误
    #[error("分类表错误: {0}")]
    Taxonomy(#[from] TaxonomyError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
    /// 文件操作错误
    #[error("文件错误 ({path}): {source}")]
    File {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 报告序列化失败
    #[error("报告序列化失败: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// 外部服务（转写 / 语义分析 / 语音评分）错误
#[derive(Debug, Error)]
pub enum ProviderError {
    /// 网络请求失败
    #[error("请求 {provider} 失败: {source}")]
    RequestFailed {
        provider: String,
        #[source]
        source: BoxError,
    },
    /// 服务返回错误响应
    #[error("{provider} 返回错误响应 (status={status:?}): {message}")]
    BadResponse {
        provider: String,
        status: Option<u16>,
        message: String,
    },
    /// 服务返回空结果
    #[error("{provider} 返回内容为空")]
    EmptyResponse { provider: String },
    /// 超时
    #[error("{provider} 在 {after:?} 内未响应")]
    Timeout { provider: String, after: Duration },
    /// JSON 解析失败
    #[error("{provider} 响应解析失败: {source}")]
    JsonParseFailed {
        provider: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ProviderError {
    /// 创建请求失败错误
    pub fn request_failed(
        provider: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        ProviderError::RequestFailed {
            provider: provider.into(),
            source: Box::new(source),
        }
    }

    /// 创建错误响应
    pub fn bad_response(
        provider: impl Into<String>,
        status: Option<u16>,
        message: impl Into<String>,
    ) -> Self {
        ProviderError::BadResponse {
            provider: provider.into(),
            status,
            message: message.into(),
        }
    }

    /// 创建空结果错误
    pub fn empty_response(provider: impl Into<String>) -> Self {
        ProviderError::EmptyResponse {
            provider: provider.into(),
        }
    }

    /// 创建超时错误
    pub fn timeout(provider: impl Into<String>, after: Duration) -> Self {
        ProviderError::Timeout {
            provider: provider.into(),
            after,
        }
    }
}

/// 必选的语义分析调用失败
///
/// 不存在"没有语义结果的分析记录"，这种情况一律以本错误返回
#[derive(Debug, Error)]
#[error("语义分析失败: {source}")]
pub struct AnalysisFailure {
    #[from]
    pub source: ProviderError,
}

/// 会话已关闭后仍提交转写内容
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("对话会话已关闭，拒绝新的转写内容（请开启新会话）")]
pub struct SessionStateViolation;

/// 难点分类表错误
#[derive(Debug, Error)]
pub enum TaxonomyError {
    /// 分类没有任何有效触发词
    #[error("分类 {name} 没有有效的触发词")]
    EmptyCategory { name: String },
    /// 分类名称重复
    #[error("分类名称重复: {name}")]
    DuplicateCategory { name: String },
    /// 分类名称为空
    #[error("分类名称不能为空")]
    BlankName,
    /// 分类表为空
    #[error("分类表中没有任何分类")]
    NoCategories,
    /// TOML 解析失败
    #[error("TOML解析失败: {0}")]
    TomlParseFailed(#[from] toml::de::Error),
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 必需的配置项缺失
    #[error("缺少必需的配置项 {setting}")]
    MissingSetting { setting: &'static str },
}

impl AppError {
    /// 创建文件读取错误
    pub fn file(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File {
            path: path.into(),
            source,
        }
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
