//! 工具模块：字段解析、消息占位符替换、规则字符串构建
pub mod field_resolver;
pub mod message;
pub mod constraint;

pub use self::field_resolver::{FieldResolver, ValueConverter};
pub use self::message::{join_countries, join_examples, replace_postal_code, ExampleList};
pub use self::constraint::{Constraint, POSTAL_CODE, POSTAL_CODE_WITH};
