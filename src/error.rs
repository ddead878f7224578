//! 全局错误类型定义

use thiserror::Error;
use regex::Error as RegexError;
use serde_json::Error as SerdeJsonError;
use std::io::Error as IoError;

use crate::config::CodeFormat;

#[derive(Error, Debug)]
pub enum RspostalError {
    // 调用参数错误（编程错误，而非校验失败）
    #[error("{0}")]
    InvalidArgument(String),

    // 国家代码相关错误
    #[error("未找到{format}国家代码：{key}")]
    CountryNotFound { format: CodeFormat, key: String },
    #[error("未找到覆盖规则：{0}")]
    OverrideNotFound(String),

    // 编译相关错误
    #[error("正则编译失败：{0}")]
    RegexCompileError(#[from] RegexError),

    // 规则相关错误
    #[error("规则加载失败：{0}")]
    RuleLoadError(String),

    // 序列化/反序列化错误
    #[error("JSON解析失败：{0}")]
    JsonError(#[from] SerdeJsonError),
    #[error("MessagePack序列化/反序列化失败：{0}")]
    MsgPackError(String),

    // 基础错误
    #[error("IO操作失败：{0}")]
    IoError(#[from] IoError),
}

impl RspostalError {
    /// 规则缺少参数时的错误
    pub fn missing_parameters(rule: &str) -> Self {
        RspostalError::InvalidArgument(format!(
            "Validation rule {} requires at least 1 parameter.",
            rule
        ))
    }
}

// 全局Result类型
pub type RspResult<T> = Result<T, RspostalError>;
