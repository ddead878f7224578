//! 规则数据模型定义
//! 仅存储规则数据，无任何业务逻辑，支持序列化/反序列化

use std::collections::BTreeMap;
use std::fmt;
use serde::{Deserialize, Serialize};

/// 单个国家的邮编规则（从 postal_codes.json 解析）
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct CountryRule {
    // 正则源文本，未锚定；None 表示该国没有邮编格式
    #[serde(default)]
    pub pattern: Option<String>,
    // 合法邮编示例，仅用于错误提示
    #[serde(default)]
    pub example: Option<String>,
}

/// 完整规则库（两位字母代码 -> 规则）
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct RuleTable {
    pub rules: BTreeMap<String, CountryRule>,
}

impl RuleTable {
    /// 键统一转为大写
    pub fn canonicalize(self) -> Self {
        Self {
            rules: self
                .rules
                .into_iter()
                .map(|(key, rule)| (key.trim().to_ascii_uppercase(), rule))
                .collect(),
        }
    }
}

/// ISO 3166-1 国家记录（从 iso3166.json 解析）
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Country {
    pub name: String,
    pub alpha2: String,
    pub alpha3: String,
    pub numeric: String,
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}/{}/{})", self.name, self.alpha2, self.alpha3, self.numeric)
    }
}
