//! 覆盖规则存储
//! 调用方提供的模式优先于内置规则，进程内有效，只增不删

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};
use tracing::debug;

use crate::compiler::{Pattern, RuleCompiler};
use crate::error::{RspResult, RspostalError};

/// 覆盖规则存储（国家代码大写 -> 可选模式）
/// 键存在即覆盖生效，模式为 None 表示该国家不做格式限制
#[derive(Debug, Default)]
pub struct OverrideStore {
    data: RwLock<HashMap<String, Option<Pattern>>>,
}

impl OverrideStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加单条覆盖规则（正则在插入时编译）
    pub fn add(&self, key: &str, pattern: Option<&str>) -> RspResult<()> {
        let compiled = pattern.map(RuleCompiler::compile_override).transpose()?;
        self.add_compiled(key, compiled);
        Ok(())
    }

    /// 添加已编译的覆盖规则
    pub fn add_compiled(&self, key: &str, pattern: Option<Pattern>) {
        let key = key.to_ascii_uppercase();
        debug!("添加覆盖规则：{} => {:?}", key, pattern.as_ref().map(Pattern::describe));
        self.data
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key, pattern);
    }

    /// 批量添加覆盖规则：全部编译成功后一次性合并，任一失败则不写入
    pub fn add_bulk<I, K, P>(&self, entries: I) -> RspResult<()>
    where
        I: IntoIterator<Item = (K, Option<P>)>,
        K: AsRef<str>,
        P: AsRef<str>,
    {
        let compiled = entries
            .into_iter()
            .map(|(key, pattern)| -> RspResult<(String, Option<Pattern>)> {
                let pattern = pattern
                    .map(|p| RuleCompiler::compile_override(p.as_ref()))
                    .transpose()?;
                Ok((key.as_ref().to_ascii_uppercase(), pattern))
            })
            .collect::<RspResult<Vec<_>>>()?;

        debug!("批量添加覆盖规则：{}条", compiled.len());
        self.data
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .extend(compiled);
        Ok(())
    }

    /// 是否存在覆盖规则
    pub fn has(&self, key: &str) -> bool {
        self.data
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(&key.to_ascii_uppercase())
    }

    /// 获取覆盖规则；调用前需先用 has 判断，否则返回 OverrideNotFound
    pub fn get(&self, key: &str) -> RspResult<Option<Pattern>> {
        let key = key.to_ascii_uppercase();
        self.data
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
            .cloned()
            .ok_or(RspostalError::OverrideNotFound(key))
    }

    pub fn len(&self) -> usize {
        self.data.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
