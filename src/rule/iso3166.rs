//! ISO 3166-1 国家代码参考数据
//! 提供三位字母 / 数字代码到两位字母代码的换算

use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::Arc;
use once_cell::sync::Lazy;
use tracing::debug;

use super::model::Country;
use crate::config::CodeFormat;
use crate::error::{RspResult, RspostalError};

/// 内置ISO 3166-1数据（编译期嵌入）
static EMBEDDED_ISO3166_JSON: &str = include_str!("../../data/iso3166.json");

/// 全局懒加载的内置ISO数据
static EMBEDDED_ISO3166: Lazy<Arc<Iso3166>> = Lazy::new(|| {
    let countries: Vec<Country> = serde_json::from_str(EMBEDDED_ISO3166_JSON).unwrap_or_else(|e| {
        panic!("内置ISO 3166数据解析失败：{}", e);
    });
    Arc::new(Iso3166::new(countries))
});

/// 国家代码查询接口
pub trait CountryLookup: Send + Sync + Debug {
    fn alpha2(&self, key: &str) -> RspResult<&Country>;
    fn alpha3(&self, key: &str) -> RspResult<&Country>;
    fn numeric(&self, key: &str) -> RspResult<&Country>;
}

/// 基于内存索引的ISO 3166-1数据集
#[derive(Debug, Clone)]
pub struct Iso3166 {
    countries: Vec<Country>,
    by_alpha2: HashMap<String, usize>,
    by_alpha3: HashMap<String, usize>,
    by_numeric: HashMap<String, usize>,
}

impl Iso3166 {
    pub fn new(countries: Vec<Country>) -> Self {
        let mut by_alpha2 = HashMap::with_capacity(countries.len());
        let mut by_alpha3 = HashMap::with_capacity(countries.len());
        let mut by_numeric = HashMap::with_capacity(countries.len());

        for (idx, country) in countries.iter().enumerate() {
            by_alpha2.insert(country.alpha2.to_ascii_uppercase(), idx);
            by_alpha3.insert(country.alpha3.to_ascii_uppercase(), idx);
            by_numeric.insert(country.numeric.clone(), idx);
        }

        debug!("ISO 3166数据索引完成，国家数：{}", countries.len());

        Self {
            countries,
            by_alpha2,
            by_alpha3,
            by_numeric,
        }
    }

    /// 获取内置数据集
    pub fn embedded() -> Arc<Iso3166> {
        EMBEDDED_ISO3166.clone()
    }

    pub fn all(&self) -> &[Country] {
        &self.countries
    }

    fn find(
        &self,
        index: &HashMap<String, usize>,
        lookup_key: &str,
        format: CodeFormat,
        key: &str,
    ) -> RspResult<&Country> {
        index
            .get(lookup_key)
            .map(|&idx| &self.countries[idx])
            .ok_or_else(|| RspostalError::CountryNotFound {
                format,
                key: key.to_string(),
            })
    }

    /// 数字代码补齐为三位（4 -> 004），非数字返回 None
    fn pad_numeric(key: &str) -> Option<String> {
        if key.is_empty() || key.len() > 3 || !key.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        Some(format!("{:0>3}", key))
    }
}

impl CountryLookup for Iso3166 {
    fn alpha2(&self, key: &str) -> RspResult<&Country> {
        let lookup_key = key.to_ascii_uppercase();
        self.find(&self.by_alpha2, &lookup_key, CodeFormat::Alpha2, key)
    }

    fn alpha3(&self, key: &str) -> RspResult<&Country> {
        let lookup_key = key.to_ascii_uppercase();
        self.find(&self.by_alpha3, &lookup_key, CodeFormat::Alpha3, key)
    }

    fn numeric(&self, key: &str) -> RspResult<&Country> {
        let lookup_key = Self::pad_numeric(key).ok_or_else(|| RspostalError::CountryNotFound {
            format: CodeFormat::Numeric,
            key: key.to_string(),
        })?;
        self.find(&self.by_numeric, &lookup_key, CodeFormat::Numeric, key)
    }
}
