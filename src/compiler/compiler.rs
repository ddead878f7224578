//! 规则编译器核心
//! 仅负责将原始规则编译为可执行的正则模式

use std::collections::HashMap;
use std::time::Instant;
use regex::RegexBuilder;
use tracing::debug;

use super::pattern::{CompiledCountryRule, Pattern, PatternTable};
use crate::rule::RuleTable;
use crate::error::{RspResult, RspostalError};

/// 规则编译器
pub struct RuleCompiler;

impl RuleCompiler {
    /// 编译规则库
    pub fn compile(rule_table: &RuleTable) -> RspResult<PatternTable> {
        let start = Instant::now();
        let mut rules = HashMap::with_capacity(rule_table.rules.len());
        let mut stats = CompileStats::default();

        for (country, rule) in &rule_table.rules {
            let pattern = match rule.pattern.as_deref() {
                Some(raw) => {
                    stats.regex_count += 1;
                    Self::compile_pattern(raw)?
                }
                None => {
                    stats.any_count += 1;
                    Pattern::any()
                }
            };

            rules.insert(
                country.to_ascii_uppercase(),
                CompiledCountryRule {
                    pattern,
                    example: rule.example.clone(),
                },
            );
        }

        debug!("规则编译完成，总耗时{:?}", start.elapsed());
        debug!(
            "编译统计：正则规则{}条、无格式限制{}条",
            stats.regex_count, stats.any_count
        );

        Ok(PatternTable { rules })
    }

    /// 编译单个规则表正则，整体锚定
    pub fn compile_pattern(raw_pattern: &str) -> RspResult<Pattern> {
        Self::build(raw_pattern, PatternFlags::default())
    }

    /// 编译覆盖规则正则（兼容 PCRE 分隔符写法 /.../imsx）
    pub fn compile_override(raw_pattern: &str) -> RspResult<Pattern> {
        let (source, flags) = Self::strip_delimiters(raw_pattern)?;
        Self::build(source, flags)
    }

    fn build(source: &str, flags: PatternFlags) -> RspResult<Pattern> {
        // x 模式下 # 注释会吞掉行尾的锚点，先换行
        let tail = if flags.extended { "\n" } else { "" };
        let regex = RegexBuilder::new(&format!("^(?:{}{})$", ascii_classes(source), tail))
            .case_insensitive(flags.case_insensitive)
            .multi_line(flags.multi_line)
            .dot_matches_new_line(flags.dot_all)
            .ignore_whitespace(flags.extended)
            .build()?;
        Ok(Pattern::from_regex(regex))
    }

    /// 移除PCRE分隔符并解析尾部修饰符
    fn strip_delimiters(raw_pattern: &str) -> RspResult<(&str, PatternFlags)> {
        let trimmed = raw_pattern.trim();
        let Some(body) = trimmed.strip_prefix('/') else {
            return Ok((trimmed, PatternFlags::default()));
        };

        let (source, flags) = body.rsplit_once('/').ok_or_else(|| {
            RspostalError::InvalidArgument(format!("覆盖规则缺少结束分隔符：{}", raw_pattern))
        })?;
        Ok((source, PatternFlags::parse(flags)?))
    }
}

/// PCRE 尾部修饰符
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct PatternFlags {
    case_insensitive: bool,
    multi_line: bool,
    dot_all: bool,
    extended: bool,
}

impl PatternFlags {
    fn parse(flags: &str) -> RspResult<Self> {
        let mut parsed = Self::default();
        for flag in flags.chars() {
            match flag {
                'i' => parsed.case_insensitive = true,
                'm' => parsed.multi_line = true,
                's' => parsed.dot_all = true,
                'x' => parsed.extended = true,
                // 输入本身就是 UTF-8
                'u' => {}
                other => {
                    return Err(RspostalError::InvalidArgument(format!(
                        "不支持的正则修饰符：{}",
                        other
                    )));
                }
            }
        }
        Ok(parsed)
    }
}

/// 将 Perl 字符类（\d \w \s 及其取反）与单词边界改写为 ASCII 语义
///
/// regex 默认按 Unicode 解释 \d，会放行全角、阿拉伯-印度等数字；
/// 改写为 POSIX 类后与字节语义的 PCRE 一致，其余语法原样保留。
fn ascii_classes(source: &str) -> String {
    let mut out = String::with_capacity(source.len() + 16);
    let mut chars = source.chars().peekable();
    // 字符类嵌套深度
    let mut depth = 0usize;
    // 刚进入字符类，紧随的 ] 是字面量
    let mut class_start = false;

    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                let Some(next) = chars.next() else {
                    out.push('\\');
                    break;
                };
                match (next, depth > 0) {
                    ('d', false) => out.push_str("[[:digit:]]"),
                    ('D', false) => out.push_str("[[:^digit:]]"),
                    ('w', false) => out.push_str("[[:word:]]"),
                    ('W', false) => out.push_str("[[:^word:]]"),
                    ('s', false) => out.push_str("[[:space:]]"),
                    ('S', false) => out.push_str("[[:^space:]]"),
                    ('b', false) => out.push_str("(?-u:\\b)"),
                    ('B', false) => out.push_str("(?-u:\\B)"),
                    ('d', true) => out.push_str("[:digit:]"),
                    ('D', true) => out.push_str("[:^digit:]"),
                    ('w', true) => out.push_str("[:word:]"),
                    ('W', true) => out.push_str("[:^word:]"),
                    ('s', true) => out.push_str("[:space:]"),
                    ('S', true) => out.push_str("[:^space:]"),
                    _ => {
                        out.push('\\');
                        out.push(next);
                    }
                }
            }
            '[' if depth > 0 && chars.peek() == Some(&':') => {
                // POSIX 类 [:name:] 原样复制
                out.push('[');
                let mut prev = '[';
                for posix in chars.by_ref() {
                    out.push(posix);
                    if prev == ':' && posix == ']' {
                        break;
                    }
                    prev = posix;
                }
            }
            '[' => {
                depth += 1;
                out.push('[');
                if chars.peek() == Some(&'^') {
                    chars.next();
                    out.push('^');
                }
                class_start = true;
                continue;
            }
            ']' if depth > 0 && !class_start => {
                depth -= 1;
                out.push(']');
            }
            _ => out.push(c),
        }
        class_start = false;
    }

    out
}

/// 编译统计信息
#[derive(Debug, Clone, Default)]
struct CompileStats {
    regex_count: usize,
    any_count: usize,
}
