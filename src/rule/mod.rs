//! 规则模块：负责规则的加载、数据模型定义、国家代码换算与规则集
pub mod model;
pub mod loader;
pub mod iso3166;
pub mod ruleset;

// 导出核心接口
pub use self::model::{Country, CountryRule, RuleTable};
pub use self::loader::{RuleFileType, RuleLoader};
pub use self::iso3166::{CountryLookup, Iso3166};
pub use self::ruleset::{Alpha2Rules, NormalizingRules, RuleSetFactory, Rules};
