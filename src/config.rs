use crate::error::ConfigError;

/// 程序配置文件
#[derive(Clone, Debug)]
pub struct Config {
    /// 题目目录 TOML 文件路径
    pub catalog_path: String,
    /// 会话快照文件（为空则只在内存中保存答案）
    pub session_file: Option<String>,
    /// 章节标题模板，支持 `{index}` 与 `{title}` 占位符
    pub section_title_template: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 输出日志文件
    pub output_log_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_path: "data/questionnaire.toml".to_string(),
            session_file: None,
            section_title_template: "ตอนที่ {index}".to_string(),
            verbose_logging: false,
            output_log_file: "session.log".to_string(),
        }
    }
}

impl Config {
    /// 从环境变量读取配置，未设置的项使用默认值
    pub fn from_env() -> Result<Self, ConfigError> {
        let default = Self::default();
        let verbose_logging = match std::env::var("VERBOSE_LOGGING") {
            Ok(value) => parse_flag("VERBOSE_LOGGING", &value)?,
            Err(_) => default.verbose_logging,
        };
        Ok(Self {
            catalog_path: std::env::var("QUESTIONNAIRE_CATALOG").unwrap_or(default.catalog_path),
            session_file: std::env::var("SESSION_FILE").ok().filter(|v| !v.is_empty()).or(default.session_file),
            section_title_template: std::env::var("SECTION_TITLE_TEMPLATE").unwrap_or(default.section_title_template),
            verbose_logging,
            output_log_file: std::env::var("OUTPUT_LOG_FILE").unwrap_or(default.output_log_file),
        })
    }

    /// 检查配置是否可用
    pub fn validate(&self) -> Result<(), ConfigError> {
        let template = &self.section_title_template;
        if !template.contains("{index}") && !template.contains("{title}") {
            return Err(ConfigError::InvalidTitleTemplate {
                template: template.clone(),
            });
        }
        Ok(())
    }
}

/// 解析布尔型环境变量，接受 `true`/`false`/`1`/`0`
fn parse_flag(var_name: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        _ => Err(ConfigError::EnvVarParseFailed {
            var_name: var_name.to_string(),
            value: value.to_string(),
            expected_type: "bool".to_string(),
        }),
    }
}
