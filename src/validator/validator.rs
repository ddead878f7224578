//! 邮编校验器：整合规则集、覆盖规则与消息替换，对外提供校验入口
use std::sync::Arc;
use serde_json::Value;
use tracing::debug;

use super::matcher::MatchEngine;
use super::overrides::OverrideStore;
use crate::config::{CodeFormat, GlobalConfig};
use crate::error::RspResult;
use crate::rule::{Iso3166, RuleLoader, RuleSetFactory, Rules};
use crate::utils::{replace_postal_code, ExampleList, FieldResolver, ValueConverter};

/// 邮编校验器
#[derive(Debug, Clone)]
pub struct PostalCodeValidator {
    engine: MatchEngine,
    factory: RuleSetFactory,
}

impl PostalCodeValidator {
    /// 由规则集工厂与覆盖规则存储创建
    pub fn new(factory: RuleSetFactory, format: CodeFormat, overrides: Arc<OverrideStore>) -> Self {
        let rules = factory.build(format);
        Self {
            engine: MatchEngine::new(rules, overrides),
            factory,
        }
    }

    /// 内置规则库 + 两位字母代码，覆盖规则为空
    pub fn embedded() -> Self {
        Self::new(
            RuleSetFactory::embedded(),
            CodeFormat::Alpha2,
            Arc::new(OverrideStore::new()),
        )
    }

    /// 按配置创建（加载规则库、选择代码格式、写入预置覆盖规则）
    pub async fn from_config(config: &GlobalConfig) -> RspResult<Self> {
        let table = RuleLoader::load_compiled(config).await?;
        let overrides = Arc::new(OverrideStore::new());
        overrides.add_bulk(config.overrides.iter().map(|(country, pattern)| (country, pattern.as_ref())))?;

        debug!(
            "校验器初始化完成，代码格式：{}，规则数：{}，覆盖规则数：{}",
            config.code_format,
            table.len(),
            overrides.len()
        );

        Ok(Self::new(
            RuleSetFactory::new(table, Iso3166::embedded()),
            config.code_format,
            overrides,
        ))
    }

    /// 匹配引擎（与校验器共享规则集和覆盖规则）
    pub fn matcher(&self) -> &MatchEngine {
        &self.engine
    }

    pub fn rules(&self) -> &Arc<dyn Rules> {
        self.engine.rules()
    }

    pub fn format(&self) -> CodeFormat {
        self.engine.rules().format()
    }

    /// 切换为指定规则集
    pub fn use_rules(&mut self, rules: Arc<dyn Rules>) {
        debug!("切换规则集：{}", rules.format());
        self.engine.set_rules(rules);
    }

    /// 切换国家代码格式
    pub fn use_format(&mut self, format: CodeFormat) {
        let rules = self.factory.build(format);
        self.use_rules(rules);
    }

    pub fn use_alpha2(&mut self) {
        self.use_format(CodeFormat::Alpha2);
    }

    pub fn use_alpha3(&mut self) {
        self.use_format(CodeFormat::Alpha3);
    }

    pub fn use_numeric(&mut self) {
        self.use_format(CodeFormat::Numeric);
    }

    /// 覆盖单个国家的模式，pattern 为 None 表示不限制格式
    pub fn override_pattern(&self, country: &str, pattern: Option<&str>) -> RspResult<()> {
        self.engine.overrides().add(country, pattern)
    }

    /// 批量覆盖
    pub fn override_many<I, K, P>(&self, entries: I) -> RspResult<()>
    where
        I: IntoIterator<Item = (K, Option<P>)>,
        K: AsRef<str>,
        P: AsRef<str>,
    {
        self.engine.overrides().add_bulk(entries)
    }

    /// postal_code 规则入口
    pub fn validate_postal_code<S: AsRef<str>>(&self, value: &Value, parameters: &[S]) -> RspResult<bool> {
        self.engine.validate_postal_code(value, parameters)
    }

    /// postal_code_with 规则入口
    pub fn validate_postal_code_with<R, S>(&self, value: &Value, fields: &[S], data: &R) -> RspResult<bool>
    where
        R: FieldResolver + ?Sized,
        S: AsRef<str>,
    {
        self.engine.validate_postal_code_with(value, fields, data)
    }

    /// 校验字符串邮编
    pub fn validate<S: AsRef<str>>(&self, value: &str, countries: &[S]) -> RspResult<bool> {
        self.validate_postal_code(&Value::String(value.to_string()), countries)
    }

    /// 参数对应的示例列表，仅保留已识别的国家代码
    pub fn examples<S: AsRef<str>>(&self, parameters: &[S]) -> ExampleList {
        let mut examples: ExampleList = Vec::with_capacity(parameters.len());
        for country in parameters {
            let country: &str = country.as_ref();
            if country.trim().is_empty() || !self.engine.supports(country) {
                continue;
            }
            // 同一参数只保留一次
            if examples.iter().any(|(seen, _)| seen == country) {
                continue;
            }

            // 先 has 再 get_example，避免换算错误外抛
            let example = if self.rules().has(country) {
                self.rules().get_example(country).ok().flatten()
            } else {
                None
            };
            examples.push((country.to_string(), example));
        }
        examples
    }

    /// 替换 postal_code 规则消息
    pub fn replace_postal_code<S: AsRef<str>>(&self, message: &str, attribute: &str, parameters: &[S]) -> String {
        replace_postal_code(message, attribute, &self.examples(parameters))
    }

    /// 替换 postal_code_with 规则消息（参数为字段路径）
    pub fn replace_postal_code_with<R, S>(&self, message: &str, attribute: &str, fields: &[S], data: &R) -> String
    where
        R: FieldResolver + ?Sized,
        S: AsRef<str>,
    {
        let others: Vec<String> = ValueConverter::resolve_others(data, fields)
            .into_iter()
            .flatten()
            .collect();
        self.replace_postal_code(message, attribute, &others)
    }
}

impl Default for PostalCodeValidator {
    fn default() -> Self {
        Self::embedded()
    }
}
