//! 关联字段解析工具
//! 从待校验记录中按点路径读取其他字段（country / countries.0 / address.country）

use serde_json::Value;

/// 字段解析接口
pub trait FieldResolver {
    /// 按点路径读取字段，不存在时返回 None
    fn resolve(&self, path: &str) -> Option<&Value>;
}

impl FieldResolver for Value {
    fn resolve(&self, path: &str) -> Option<&Value> {
        // 完整键优先（兼容键名本身带点的情况）
        if let Value::Object(map) = self {
            if let Some(value) = map.get(path) {
                return Some(value);
            }
        }

        path.split('.').try_fold(self, |current, segment| match current {
            Value::Object(map) => map.get(segment),
            Value::Array(items) => segment.parse::<usize>().ok().and_then(|idx| items.get(idx)),
            _ => None,
        })
    }
}

impl FieldResolver for serde_json::Map<String, Value> {
    fn resolve(&self, path: &str) -> Option<&Value> {
        if let Some(value) = self.get(path) {
            return Some(value);
        }
        let (head, rest) = path.split_once('.')?;
        self.get(head)?.resolve(rest)
    }
}

/// 值转换工具
pub struct ValueConverter;

impl ValueConverter {
    /// 字符串 / 整数转为候选字符串，其余类型（null、数组、对象、浮点、布尔）返回 None
    pub fn to_candidate(value: &Value) -> Option<String> {
        match value {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) if n.is_i64() || n.is_u64() => Some(n.to_string()),
            _ => None,
        }
    }

    /// 批量解析关联字段，缺失或类型不符的字段解析为 None
    pub fn resolve_others<R, S>(data: &R, fields: &[S]) -> Vec<Option<String>>
    where
        R: FieldResolver + ?Sized,
        S: AsRef<str>,
    {
        fields
            .iter()
            .map(|field| data.resolve(field.as_ref()).and_then(Self::to_candidate))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_resolve_dot_paths() {
        let data = json!({
            "country": "NL",
            "countries": ["US", "CA"],
            "address": {"country": "DE"},
            "dotted.key": "BE"
        });

        assert_eq!(data.resolve("country"), Some(&json!("NL")));
        assert_eq!(data.resolve("countries.1"), Some(&json!("CA")));
        assert_eq!(data.resolve("address.country"), Some(&json!("DE")));
        assert_eq!(data.resolve("dotted.key"), Some(&json!("BE")));
        assert_eq!(data.resolve("countries.5"), None);
        assert_eq!(data.resolve("countries.x"), None);
        assert_eq!(data.resolve("missing"), None);
        assert_eq!(data.resolve("country.inner"), None);
    }

    #[test]
    fn test_resolve_on_map() {
        let data = json!({"address": {"country": "DE"}});
        let map = data.as_object().unwrap();
        assert_eq!(map.resolve("address.country"), Some(&json!("DE")));
        assert_eq!(map.resolve("address.city"), None);
    }

    #[test]
    fn test_to_candidate_keeps_strings_and_integers() {
        assert_eq!(ValueConverter::to_candidate(&json!("us")), Some("us".to_string()));
        assert_eq!(ValueConverter::to_candidate(&json!(250)), Some("250".to_string()));
        assert_eq!(ValueConverter::to_candidate(&json!(-1)), Some("-1".to_string()));
        assert_eq!(ValueConverter::to_candidate(&json!(2.5)), None);
        assert_eq!(ValueConverter::to_candidate(&json!(null)), None);
        assert_eq!(ValueConverter::to_candidate(&json!(true)), None);
        assert_eq!(ValueConverter::to_candidate(&json!(["US"])), None);
        assert_eq!(ValueConverter::to_candidate(&json!({"c": "US"})), None);
    }

    #[test]
    fn test_resolve_others_maps_bad_fields_to_none() {
        let data = json!({"a": "NL", "b": ["US"], "c": null, "d": 528});
        let resolved = ValueConverter::resolve_others(&data, &["a", "b", "c", "d", "missing"]);
        assert_eq!(
            resolved,
            vec![Some("NL".to_string()), None, None, Some("528".to_string()), None]
        );
    }
}
