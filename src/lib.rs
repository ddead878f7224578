//! rspostal - 按国家校验邮编格式（ISO 3166-1 alpha-2 / alpha-3 / numeric）

// 导出全局错误类型
pub use self::error::{RspostalError, RspResult};

// 导出配置模块
pub use self::config::{CodeFormat, ConfigManager, CustomConfigBuilder, GlobalConfig, RuleOrigin};

// 导出规则模块核心接口
pub use self::rule::{
    Alpha2Rules, Country, CountryLookup, CountryRule, Iso3166, NormalizingRules,
    RuleLoader, RuleSetFactory, RuleTable, Rules,
};

// 导出编译模块核心接口
pub use self::compiler::{Pattern, PatternTable, RuleCompiler};

// 导出校验模块核心接口
pub use self::validator::{MatchEngine, OverrideStore, PostalCodeValidator, Resolution};

// 导出工具模块核心接口
pub use self::utils::{replace_postal_code, Constraint, FieldResolver, ValueConverter};

// 声明所有子模块
pub mod config;
pub mod error;
pub mod rule;
pub mod compiler;
pub mod validator;
pub mod utils;
