//! 编译后模式模型
//! 正则编译后的结构

use std::collections::HashMap;
use std::fmt;
use regex::Regex;

#[derive(Debug, Clone)]
pub enum Matcher {
    Any, // 任意输入均匹配（国家已知但无邮编格式）
    Regex(Regex), // 正则全量匹配（编译时已锚定 ^...$）
}

/// 编译后的邮编模式
#[derive(Debug, Clone)]
pub struct Pattern {
    matcher: Matcher,
}

impl Pattern {
    /// 匹配任意输入的模式
    pub fn any() -> Self {
        Self { matcher: Matcher::Any }
    }

    /// 包装已锚定的正则
    pub(crate) fn from_regex(regex: Regex) -> Self {
        Self {
            matcher: Matcher::Regex(regex),
        }
    }

    /// 整体匹配判断
    #[inline]
    pub fn is_match(&self, input: &str) -> bool {
        match &self.matcher {
            Matcher::Any => true,
            Matcher::Regex(regex) => regex.is_match(input),
        }
    }

    pub fn is_any(&self) -> bool {
        matches!(self.matcher, Matcher::Any)
    }

    pub fn matcher(&self) -> &Matcher {
        &self.matcher
    }

    /// 规则描述
    pub fn describe(&self) -> &str {
        match &self.matcher {
            Matcher::Any => ".*",
            Matcher::Regex(r) => r.as_str(),
        }
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

// 正则本身不支持比较，按源文本判断
impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.describe() == other.describe()
    }
}

/// 单个国家编译后的规则
#[derive(Debug, Clone)]
pub struct CompiledCountryRule {
    pub pattern: Pattern,
    pub example: Option<String>,
}

/// 编译后的规则表（两位字母代码 -> 规则）
#[derive(Debug, Clone, Default)]
pub struct PatternTable {
    pub rules: HashMap<String, CompiledCountryRule>,
}

impl PatternTable {
    /// 按大写键查询
    pub fn get(&self, key: &str) -> Option<&CompiledCountryRule> {
        self.rules.get(&key.to_ascii_uppercase())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.rules.contains_key(&key.to_ascii_uppercase())
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
