//! 规则字符串构建器
//! 生成 postal_code:NL,BE 与 postal_code_with:country 形式的规则描述

use std::fmt;

/// 规则名：显式国家代码
pub const POSTAL_CODE: &str = "postal_code";
/// 规则名：从其他字段读取国家代码
pub const POSTAL_CODE_WITH: &str = "postal_code_with";

/// 规则约束
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constraint {
    rule: &'static str,
    parameters: Vec<String>,
}

impl Constraint {
    /// postal_code 规则，参数为国家代码
    pub fn postal_code_for<I, S>(countries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            rule: POSTAL_CODE,
            parameters: countries.into_iter().map(Into::into).collect(),
        }
    }

    /// postal_code_with 规则，参数为字段路径
    pub fn postal_code_with<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            rule: POSTAL_CODE_WITH,
            parameters: fields.into_iter().map(Into::into).collect(),
        }
    }

    pub fn rule(&self) -> &str {
        self.rule
    }

    pub fn parameters(&self) -> &[String] {
        &self.parameters
    }

    /// 追加参数
    pub fn and(mut self, parameter: impl Into<String>) -> Self {
        self.parameters.push(parameter.into());
        self
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.parameters.is_empty() {
            write!(f, "{}", self.rule)
        } else {
            write!(f, "{}:{}", self.rule, self.parameters.join(","))
        }
    }
}
