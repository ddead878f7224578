//! 规则集：按国家代码解析邮编模式与示例
//! 两位字母代码直接查表，三位字母 / 数字代码先换算再委托

use std::fmt::Debug;
use std::sync::Arc;

use super::iso3166::{CountryLookup, Iso3166};
use super::loader::RuleLoader;
use crate::compiler::{Pattern, PatternTable};
use crate::config::CodeFormat;
use crate::error::RspResult;

/// 规则集接口
pub trait Rules: Send + Sync + Debug {
    /// 是否存在该国家代码的规则；代码换算失败时返回 false
    fn has(&self, key: &str) -> bool;

    /// 获取规则模式；无规则时返回匹配任意输入的模式，代码换算失败时返回错误
    fn get(&self, key: &str) -> RspResult<Pattern>;

    /// 获取合法邮编示例；代码换算失败时返回错误
    fn get_example(&self, key: &str) -> RspResult<Option<String>>;

    /// 规则集使用的国家代码格式
    fn format(&self) -> CodeFormat;
}

/// ISO 3166-1 alpha-2 规则集
#[derive(Debug, Clone)]
pub struct Alpha2Rules {
    table: Arc<PatternTable>,
}

impl Alpha2Rules {
    pub fn new(table: Arc<PatternTable>) -> Self {
        Self { table }
    }

    /// 使用内置规则库
    pub fn embedded() -> Self {
        Self::new(RuleLoader::embedded_compiled())
    }

    pub fn table(&self) -> &Arc<PatternTable> {
        &self.table
    }
}

impl Rules for Alpha2Rules {
    fn has(&self, key: &str) -> bool {
        self.table.contains(key)
    }

    fn get(&self, key: &str) -> RspResult<Pattern> {
        Ok(self
            .table
            .get(key)
            .map(|rule| rule.pattern.clone())
            .unwrap_or_else(Pattern::any))
    }

    fn get_example(&self, key: &str) -> RspResult<Option<String>> {
        Ok(self.table.get(key).and_then(|rule| rule.example.clone()))
    }

    fn format(&self) -> CodeFormat {
        CodeFormat::Alpha2
    }
}

/// 代码换算策略：输入代码 -> 两位字母代码
type Convert = fn(&dyn CountryLookup, &str) -> RspResult<String>;

/// 先换算为两位字母代码，再委托 Alpha2Rules 的规则集
#[derive(Debug, Clone)]
pub struct NormalizingRules {
    rules: Alpha2Rules,
    countries: Arc<dyn CountryLookup>,
    convert: Convert,
    format: CodeFormat,
}

impl NormalizingRules {
    /// ISO 3166-1 alpha-3 规则集
    pub fn alpha3(rules: Alpha2Rules, countries: Arc<dyn CountryLookup>) -> Self {
        Self {
            rules,
            countries,
            convert: |countries, key| Ok(countries.alpha3(key)?.alpha2.clone()),
            format: CodeFormat::Alpha3,
        }
    }

    /// ISO 3166-1 numeric 规则集
    pub fn numeric(rules: Alpha2Rules, countries: Arc<dyn CountryLookup>) -> Self {
        Self {
            rules,
            countries,
            convert: |countries, key| Ok(countries.numeric(key)?.alpha2.clone()),
            format: CodeFormat::Numeric,
        }
    }

    fn convert(&self, key: &str) -> RspResult<String> {
        (self.convert)(self.countries.as_ref(), key)
    }
}

impl Rules for NormalizingRules {
    fn has(&self, key: &str) -> bool {
        match self.convert(key) {
            Ok(alpha2) => self.rules.has(&alpha2),
            Err(_) => false,
        }
    }

    fn get(&self, key: &str) -> RspResult<Pattern> {
        self.rules.get(&self.convert(key)?)
    }

    fn get_example(&self, key: &str) -> RspResult<Option<String>> {
        self.rules.get_example(&self.convert(key)?)
    }

    fn format(&self) -> CodeFormat {
        self.format
    }
}

/// 规则集工厂：按代码格式构建规则集，共享同一份规则表与ISO数据
#[derive(Debug, Clone)]
pub struct RuleSetFactory {
    rules: Alpha2Rules,
    countries: Arc<dyn CountryLookup>,
}

impl RuleSetFactory {
    pub fn new(table: Arc<PatternTable>, countries: Arc<dyn CountryLookup>) -> Self {
        Self {
            rules: Alpha2Rules::new(table),
            countries,
        }
    }

    /// 内置规则库 + 内置ISO数据
    pub fn embedded() -> Self {
        Self::new(RuleLoader::embedded_compiled(), Iso3166::embedded())
    }

    pub fn build(&self, format: CodeFormat) -> Arc<dyn Rules> {
        match format {
            CodeFormat::Alpha2 => Arc::new(self.rules.clone()),
            CodeFormat::Alpha3 => Arc::new(NormalizingRules::alpha3(
                self.rules.clone(),
                self.countries.clone(),
            )),
            CodeFormat::Numeric => Arc::new(NormalizingRules::numeric(
                self.rules.clone(),
                self.countries.clone(),
            )),
        }
    }
}
