//! 导航目标：路径 + 查询参数

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use url::form_urlencoded;

use crate::path::normalize_path;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Location {
    pub path: String,
    pub query: BTreeMap<String, String>,
}

impl Location {
    pub fn new(path: &str) -> Self {
        Self {
            path: normalize_path(path),
            query: BTreeMap::new(),
        }
    }

    /// 解析 `path?query#hash` 形式的地址，hash 部分被忽略
    pub fn parse(href: &str) -> Self {
        let href = href.split('#').next().unwrap_or_default();
        let (path, query) = href.split_once('?').unwrap_or((href, ""));
        Self {
            path: normalize_path(path),
            query: form_urlencoded::parse(query.as_bytes())
                .into_owned()
                .collect(),
        }
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    pub fn query(&self, key: &str) -> Option<&str> {
        self.query.get(key).map(String::as_str)
    }

    /// 查询参数中携带的原始目标地址
    pub fn redirect_target(&self, key: &str) -> Option<Location> {
        self.query(key)
            .filter(|target| !target.trim().is_empty())
            .map(Location::parse)
    }

    /// 序列化为地址字符串
    ///
    /// 查询值中的 `/` 与 `:` 保持原样，地址可读性与浏览器路由一致。
    pub fn href(&self) -> String {
        if self.query.is_empty() {
            return self.path.clone();
        }
        let query = self
            .query
            .iter()
            .map(|(k, v)| format!("{}={}", encode_query(k), encode_query(v)))
            .collect::<Vec<_>>()
            .join("&");
        format!("{}?{}", self.path, query)
    }
}

fn encode_query(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes())
        .collect::<String>()
        .replace("%2F", "/")
        .replace("%3A", ":")
}

impl Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.href())
    }
}

impl From<&str> for Location {
    fn from(href: &str) -> Self {
        Location::parse(href)
    }
}
