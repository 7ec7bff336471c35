use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 题目目录相关错误
    #[error("题目目录错误: {0}")]
    Catalog(#[from] CatalogError),
    /// 路由解析错误
    #[error("路由错误: {0}")]
    Route(#[from] RouteError),
    /// 答案存储错误
    #[error("存储错误: {0}")]
    Store(#[from] StoreError),
    /// 作答输入错误
    #[error("作答错误: {0}")]
    Responding(#[from] RespondingError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
    /// 其他错误
    #[error("错误: {0}")]
    Other(String),
}

/// 题目目录错误
#[derive(Debug, Error)]
pub enum CatalogError {
    /// 章节标识格式不合法
    #[error("章节标识不合法: '{slug}'")]
    InvalidSectionSlug { slug: String },
    /// 章节标识重复
    #[error("章节标识重复: '{slug}'")]
    DuplicateSection { slug: String },
    /// 未知的题目类型标签
    #[error("未知的题目类型: '{tag}'")]
    UnknownQuestionType { tag: String },
    /// 题目内容与类型不匹配
    #[error("题目 {slug}/{index} 内容不完整: {reason}")]
    InvalidContent {
        slug: String,
        index: usize,
        reason: String,
    },
    /// TOML 解析失败
    #[error("TOML解析失败: {0}")]
    TomlParseFailed(#[from] toml::de::Error),
}

/// 路由错误
///
/// 两种情况都是“关闭式失败”：绝不回退到相邻题目。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    /// 链接无法解码为合法地址，或地址不在目录中
    #[error("无效的题目地址: '{link}'")]
    InvalidAddress { link: String },
    /// 地址格式正确，但目录中没有对应题目
    #[error("找不到题目: {slug}/{index}")]
    NotFound { slug: String, index: usize },
}

/// 答案存储错误
#[derive(Debug, Error)]
pub enum StoreError {
    /// 读取快照失败
    #[error("读取会话快照失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 写入快照失败
    #[error("写入会话快照失败 ({path}): {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 快照 JSON 解析失败
    #[error("会话快照解析失败: {0}")]
    JsonParseFailed(#[from] serde_json::Error),
}

/// 作答输入错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RespondingError {
    /// 输入无法被当前题型理解
    #[error("无法理解的输入 '{input}': {reason}")]
    UnparsableInput { input: String, reason: String },
    /// 选项序号超出范围
    #[error("序号 {index} 超出范围 [1, {max}]")]
    IndexOutOfRange { index: usize, max: usize },
    /// 当前没有挂载的题目
    #[error("当前没有正在作答的题目")]
    NothingMounted,
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 环境变量解析失败
    #[error("环境变量 {var_name} 解析失败: 值 '{value}' 无法转换为 {expected_type}")]
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: String,
    },
    /// 标题模板缺少占位符
    #[error("标题模板 '{template}' 缺少 {{index}} 或 {{title}} 占位符")]
    InvalidTitleTemplate { template: String },
}

// ========== 便捷构造函数 ==========

impl RouteError {
    /// 创建无效地址错误
    pub fn invalid(link: impl Into<String>) -> Self {
        RouteError::InvalidAddress { link: link.into() }
    }

    /// 是否应当向路由层呈现为 404
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            RouteError::InvalidAddress { .. } | RouteError::NotFound { .. }
        )
    }
}

impl RespondingError {
    /// 创建输入解析错误
    pub fn unparsable(input: impl Into<String>, reason: impl Into<String>) -> Self {
        RespondingError::UnparsableInput {
            input: input.into(),
            reason: reason.into(),
        }
    }
}

impl CatalogError {
    /// 创建内容错误
    pub fn invalid_content(slug: &str, index: usize, reason: impl Into<String>) -> Self {
        CatalogError::InvalidContent {
            slug: slug.to_string(),
            index,
            reason: reason.into(),
        }
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_errors_surface_as_not_found() {
        assert!(RouteError::invalid("/x").is_not_found());
        assert!(RouteError::NotFound {
            slug: "s1".to_string(),
            index: 9
        }
        .is_not_found());
    }

    #[test]
    fn test_app_error_wraps_route_error() {
        let err: AppError = RouteError::invalid("/questionnaires/S1/0").into();
        assert!(matches!(err, AppError::Route(_)));
        assert!(err.to_string().contains("/questionnaires/S1/0"));
    }
}
