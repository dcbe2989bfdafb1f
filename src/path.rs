//! 路径规范化
//!
//! 视图注册表的键和路由路径都经过同一套规则处理，保证精确匹配。

pub const SEPARATOR: char = '/';

/// 规范化路径
///
/// 1. 去除首尾空白
/// 2. 保证有且仅有一个前导分隔符
/// 3. 去除所有尾部分隔符
///
/// 空串或仅由分隔符组成的输入规范化为根路径 `"/"`。
pub fn normalize_path(path: &str) -> String {
    let body = path.trim_matches(|c: char| c == SEPARATOR || c.is_whitespace());
    let mut normalized = String::with_capacity(body.len() + 1);
    normalized.push(SEPARATOR);
    normalized.push_str(body);
    normalized
}

/// 逐段规范化后拼接成一个规范路径，根片段会被忽略
pub fn join_paths(parts: &[&str]) -> String {
    let joined: String = parts
        .iter()
        .map(|p| normalize_path(p))
        .filter(|p| p != "/")
        .collect();
    if joined.is_empty() {
        SEPARATOR.to_string()
    } else {
        joined
    }
}
