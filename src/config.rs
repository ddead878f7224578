//! 全局配置管理,存储所有可配置项

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{RspResult, RspostalError};

/// 国家代码命名空间（ISO 3166-1）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CodeFormat {
    /// 两位字母代码（NL）
    #[default]
    Alpha2,
    /// 三位字母代码（NLD）
    Alpha3,
    /// 三位数字代码（528）
    Numeric,
}

impl fmt::Display for CodeFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodeFormat::Alpha2 => write!(f, "alpha2"),
            CodeFormat::Alpha3 => write!(f, "alpha3"),
            CodeFormat::Numeric => write!(f, "numeric"),
        }
    }
}

impl FromStr for CodeFormat {
    type Err = RspostalError;

    fn from_str(s: &str) -> RspResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "alpha2" | "alpha-2" => Ok(CodeFormat::Alpha2),
            "alpha3" | "alpha-3" => Ok(CodeFormat::Alpha3),
            "numeric" => Ok(CodeFormat::Numeric),
            other => Err(RspostalError::InvalidArgument(format!(
                "未知的国家代码格式：{}（可选 alpha2 / alpha3 / numeric）",
                other
            ))),
        }
    }
}

/// 规则来源
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleOrigin {
    Embedded,           // 内置规则（编译期 include）
    LocalFile(PathBuf), // 本地文件规则（JSON / MessagePack）
}

/// 全局配置
#[derive(Debug, Clone)]
pub struct GlobalConfig {
    // 参数使用的国家代码格式
    pub code_format: CodeFormat,
    // 规则来源
    pub rule_origin: RuleOrigin,
    // 预置覆盖规则（国家代码 -> 正则，None 表示不限制格式）
    pub overrides: Vec<(String, Option<String>)>,
    // 是否启用详细日志
    pub verbose: bool,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            code_format: CodeFormat::Alpha2,
            rule_origin: RuleOrigin::Embedded,
            overrides: Vec::new(),
            verbose: false,
        }
    }
}

/// 配置管理器
pub struct ConfigManager;

impl ConfigManager {
    /// 获取默认配置
    pub fn get_default() -> GlobalConfig {
        GlobalConfig::default()
    }

    /// 自定义配置
    pub fn custom() -> CustomConfigBuilder {
        CustomConfigBuilder::new()
    }
}

/// 配置构建器（便于自定义配置）
#[derive(Debug, Clone, Default)]
pub struct CustomConfigBuilder {
    config: GlobalConfig,
}

impl CustomConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: GlobalConfig::default(),
        }
    }

    pub fn code_format(mut self, format: CodeFormat) -> Self {
        self.config.code_format = format;
        self
    }

    pub fn rule_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.rule_origin = RuleOrigin::LocalFile(path.into());
        self
    }

    /// 追加一条覆盖规则，pattern 为 None 时该国家不做格式限制
    pub fn override_pattern(mut self, country: impl Into<String>, pattern: Option<&str>) -> Self {
        self.config
            .overrides
            .push((country.into(), pattern.map(str::to_string)));
        self
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.config.verbose = verbose;
        self
    }

    pub fn build(self) -> GlobalConfig {
        self.config
    }
}
