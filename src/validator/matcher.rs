//! 匹配引擎：覆盖规则优先，其次规则集，决定邮编是否通过

use std::sync::Arc;
use serde_json::Value;
use tracing::{debug, warn};

use super::overrides::OverrideStore;
use crate::compiler::Pattern;
use crate::error::{RspResult, RspostalError};
use crate::rule::Rules;
use crate::utils::{FieldResolver, ValueConverter, POSTAL_CODE, POSTAL_CODE_WITH};

/// 国家代码解析结果
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// 既无覆盖规则也无内置规则
    Unrecognized,
    /// 国家已识别但不限制格式（覆盖规则模式为 None）
    Unconstrained,
    /// 需要整体匹配的模式
    Constrained(Pattern),
}

/// 匹配引擎
#[derive(Debug, Clone)]
pub struct MatchEngine {
    rules: Arc<dyn Rules>,
    overrides: Arc<OverrideStore>,
}

impl MatchEngine {
    pub fn new(rules: Arc<dyn Rules>, overrides: Arc<OverrideStore>) -> Self {
        Self { rules, overrides }
    }

    pub fn rules(&self) -> &Arc<dyn Rules> {
        &self.rules
    }

    pub fn overrides(&self) -> &Arc<OverrideStore> {
        &self.overrides
    }

    /// 切换规则集（覆盖规则保持不变）
    pub fn set_rules(&mut self, rules: Arc<dyn Rules>) {
        self.rules = rules;
    }

    /// 是否支持该国家代码（存在覆盖规则或内置规则）
    pub fn supports(&self, country: &str) -> bool {
        self.overrides.has(country) || self.rules.has(country)
    }

    /// 解析国家代码对应的模式
    pub fn pattern_for(&self, country: &str) -> RspResult<Resolution> {
        if self.overrides.has(country) {
            return Ok(match self.overrides.get(country)? {
                Some(pattern) => Resolution::Constrained(pattern),
                None => Resolution::Unconstrained,
            });
        }

        if self.rules.has(country) {
            return Ok(Resolution::Constrained(self.rules.get(country)?));
        }

        Ok(Resolution::Unrecognized)
    }

    /// 单一国家校验：所有值都必须非空且整体匹配（AND 语义）
    pub fn passes(&self, country: &str, values: &[Option<&str>]) -> bool {
        if !self.supports(country) {
            return false;
        }

        let pattern = match self.pattern_for(country) {
            Ok(Resolution::Constrained(pattern)) => pattern,
            Ok(Resolution::Unconstrained) => return true,
            Ok(Resolution::Unrecognized) => return false,
            Err(e) => {
                warn!("解析国家代码 {} 的模式失败：{}", country, e);
                return false;
            }
        };

        values.iter().all(|value| match value {
            Some(value) if !value.trim().is_empty() => {
                pattern.is_match(&value.to_ascii_uppercase())
            }
            _ => false,
        })
    }

    /// passes 的取反
    pub fn fails(&self, country: &str, values: &[Option<&str>]) -> bool {
        !self.passes(country, values)
    }

    /// 多国家校验：任一国家代码匹配即通过（OR 语义）
    ///
    /// 参数列表为空返回 InvalidArgument；值不是字符串或整数时直接返回 false；
    /// 空白国家代码被忽略，无法解析的国家代码跳过。
    pub fn validate_postal_code<S: AsRef<str>>(&self, value: &Value, parameters: &[S]) -> RspResult<bool> {
        if parameters.is_empty() {
            return Err(RspostalError::missing_parameters(POSTAL_CODE));
        }

        let Some(candidate) = ValueConverter::to_candidate(value) else {
            return Ok(false);
        };

        self.matches_any(&candidate, parameters)
    }

    /// 关联字段校验：国家代码从记录中的其他字段读取
    pub fn validate_postal_code_with<R, S>(&self, value: &Value, fields: &[S], data: &R) -> RspResult<bool>
    where
        R: FieldResolver + ?Sized,
        S: AsRef<str>,
    {
        if fields.is_empty() {
            return Err(RspostalError::missing_parameters(POSTAL_CODE_WITH));
        }

        let others: Vec<String> = ValueConverter::resolve_others(data, fields)
            .into_iter()
            .map(Option::unwrap_or_default)
            .collect();

        self.validate_postal_code(value, &others)
    }

    /// 依次尝试每个国家代码，命中即返回
    fn matches_any<S: AsRef<str>>(&self, candidate: &str, parameters: &[S]) -> RspResult<bool> {
        let value = candidate.to_ascii_uppercase();

        for country in parameters {
            let country: &str = country.as_ref();
            if country.trim().is_empty() {
                continue;
            }

            let matched = match self.pattern_for(country)? {
                Resolution::Constrained(pattern) => pattern.is_match(&value),
                Resolution::Unconstrained => true,
                Resolution::Unrecognized => {
                    debug!("跳过无法识别的国家代码：{}", country);
                    continue;
                }
            };

            if matched {
                debug!("邮编 {} 匹配国家代码 {}", value, country);
                return Ok(true);
            }
        }

        Ok(false)
    }
}
