//! 校验模块：覆盖规则、匹配引擎与对外校验入口
pub mod overrides;
pub mod matcher;
pub mod validator;

// 导出核心接口
pub use self::overrides::OverrideStore;
pub use self::matcher::{MatchEngine, Resolution};
pub use self::validator::PostalCodeValidator;
