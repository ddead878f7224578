//! 规则加载管理器
//! 负责从内置数据或本地文件加载邮编规则库

use std::path::Path;
use std::sync::Arc;
use once_cell::sync::Lazy;
use tracing::{debug, warn};

use super::model::RuleTable;
use crate::compiler::{PatternTable, RuleCompiler};
use crate::config::{GlobalConfig, RuleOrigin};
use crate::error::{RspResult, RspostalError};

/// 内置规则数据（编译期嵌入）
static EMBEDDED_RULES_JSON: &str = include_str!("../../data/postal_codes.json");

/// 全局懒加载的内置编译规则库，内存中仅一份实例
static EMBEDDED_PATTERN_TABLE: Lazy<Arc<PatternTable>> = Lazy::new(|| {
    let table = RuleLoader::embedded().unwrap_or_else(|e| {
        panic!("内置邮编规则库解析失败：{}", e);
    });
    let compiled = RuleCompiler::compile(&table).unwrap_or_else(|e| {
        panic!("内置邮编规则库编译失败：{}", e);
    });
    Arc::new(compiled)
});

/// 规则文件类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleFileType {
    /// postal_codes.json 同结构
    Json,
    /// RuleLoader::to_msgpack 导出
    MsgPack,
}

impl RuleFileType {
    /// 按扩展名判断，未知扩展名按JSON处理
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("mp") || ext.eq_ignore_ascii_case("msgpack") => {
                RuleFileType::MsgPack
            }
            _ => RuleFileType::Json,
        }
    }
}

/// 规则加载管理器
pub struct RuleLoader;

impl RuleLoader {
    /// 解析内置规则库
    pub fn embedded() -> RspResult<RuleTable> {
        Self::from_json_str(EMBEDDED_RULES_JSON)
    }

    /// 获取内置编译规则库（首次访问时编译）
    pub fn embedded_compiled() -> Arc<PatternTable> {
        EMBEDDED_PATTERN_TABLE.clone()
    }

    /// 按配置加载规则库
    pub async fn load(config: &GlobalConfig) -> RspResult<RuleTable> {
        match &config.rule_origin {
            RuleOrigin::Embedded => {
                debug!("使用内置邮编规则库");
                Self::embedded()
            }
            RuleOrigin::LocalFile(path) => Self::load_file(path).await,
        }
    }

    /// 按配置加载并编译规则库，内置来源直接复用全局实例
    pub async fn load_compiled(config: &GlobalConfig) -> RspResult<Arc<PatternTable>> {
        match &config.rule_origin {
            RuleOrigin::Embedded => Ok(Self::embedded_compiled()),
            RuleOrigin::LocalFile(_) => {
                let table = Self::load(config).await?;
                Ok(Arc::new(RuleCompiler::compile(&table)?))
            }
        }
    }

    /// 从本地文件加载规则库
    pub async fn load_file(path: &Path) -> RspResult<RuleTable> {
        let data = tokio::fs::read(path).await.map_err(|e| {
            warn!("读取规则文件失败：{}，路径：{}", e, path.display());
            e
        })?;

        let table = match RuleFileType::from_path(path) {
            RuleFileType::Json => {
                let text = std::str::from_utf8(&data).map_err(|e| {
                    RspostalError::RuleLoadError(format!("规则文件不是合法UTF-8：{}", e))
                })?;
                Self::from_json_str(text)?
            }
            RuleFileType::MsgPack => Self::from_msgpack_slice(&data)?,
        };

        debug!("从本地文件加载规则库成功，路径：{}，规则数：{}", path.display(), table.rules.len());
        Ok(table)
    }

    /// 解析JSON规则
    pub fn from_json_str(json: &str) -> RspResult<RuleTable> {
        let table: RuleTable = serde_json::from_str(json)?;
        if table.rules.is_empty() {
            return Err(RspostalError::RuleLoadError("规则库为空".to_string()));
        }
        Ok(table.canonicalize())
    }

    /// 解析MessagePack规则
    pub fn from_msgpack_slice(bytes: &[u8]) -> RspResult<RuleTable> {
        let table: RuleTable = rmp_serde::from_slice(bytes)
            .map_err(|e| RspostalError::MsgPackError(format!("反序列化失败：{}", e)))?;
        if table.rules.is_empty() {
            return Err(RspostalError::RuleLoadError("规则库为空".to_string()));
        }
        Ok(table.canonicalize())
    }

    /// 将规则库序列化为MessagePack
    pub fn to_msgpack(table: &RuleTable) -> RspResult<Vec<u8>> {
        let bytes = rmp_serde::to_vec_named(table)
            .map_err(|e| RspostalError::MsgPackError(format!("序列化失败：{}", e)))?;
        debug!("规则库序列化成功，序列化后数据大小：{} 字节", bytes.len());
        Ok(bytes)
    }

    /// 将规则库导出到本地文件
    pub async fn save_msgpack(path: &Path, table: &RuleTable) -> RspResult<()> {
        let bytes = Self::to_msgpack(table)?;
        tokio::fs::write(path, bytes).await?;
        Ok(())
    }
}
