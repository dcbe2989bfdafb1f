//! 视图注册表
//!
//! 启动时一次性登记两类视图来源（业务视图、布局视图），按规范化后的
//! 源路径建立索引。构建完成后只读，运行期只做精确键查找。

use std::collections::HashMap;

use tracing::{info, warn};

use crate::config::RouterConfig;
use crate::error::{RouterError, RouterResult};
use crate::path::normalize_path;

/// 视图来源
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewKind {
    /// 业务视图，位于 `feature_view_dir` 下
    Feature,
    /// 布局/外壳视图，位于 `layout_view_dir` 下的入口文件
    Layout,
}

#[derive(Debug, Clone)]
struct ViewEntry<V> {
    kind: ViewKind,
    view: V,
}

/// 不可变的 `路径 -> 视图加载器` 映射
#[derive(Debug, Clone)]
pub struct ViewRegistry<V> {
    entries: HashMap<String, ViewEntry<V>>,
    not_found: V,
}

impl<V> ViewRegistry<V> {
    pub fn builder() -> ViewRegistryBuilder<V> {
        ViewRegistryBuilder::new()
    }

    /// 精确匹配查找，未命中返回 `None`，由调用方推进回退链
    pub fn resolve(&self, path: &str) -> Option<&V> {
        self.entries.get(path).map(|entry| &entry.view)
    }

    /// 规范的 404 视图
    pub fn not_found(&self) -> &V {
        &self.not_found
    }

    pub fn kind_of(&self, path: &str) -> Option<ViewKind> {
        self.entries.get(path).map(|entry| entry.kind)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 已登记的全部路径（无序）
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

// =========================================================
// 构建器
// =========================================================

pub struct ViewRegistryBuilder<V> {
    sources: Vec<(ViewKind, String, V)>,
}

impl<V> Default for ViewRegistryBuilder<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> ViewRegistryBuilder<V> {
    pub fn new() -> Self {
        Self {
            sources: Vec::new(),
        }
    }

    pub fn feature_view(mut self, path: impl Into<String>, view: V) -> Self {
        self.sources.push((ViewKind::Feature, path.into(), view));
        self
    }

    pub fn layout_view(mut self, path: impl Into<String>, view: V) -> Self {
        self.sources.push((ViewKind::Layout, path.into(), view));
        self
    }

    pub fn feature_views<P, I>(mut self, views: I) -> Self
    where
        P: Into<String>,
        I: IntoIterator<Item = (P, V)>,
    {
        for (path, view) in views {
            self = self.feature_view(path, view);
        }
        self
    }

    pub fn layout_views<P, I>(mut self, views: I) -> Self
    where
        P: Into<String>,
        I: IntoIterator<Item = (P, V)>,
    {
        for (path, view) in views {
            self = self.layout_view(path, view);
        }
        self
    }
}

impl<V: Clone> ViewRegistryBuilder<V> {
    /// 展开并索引所有来源
    ///
    /// 业务视图必须位于 `feature_view_dir` 之下；布局视图必须位于
    /// `layout_view_dir` 之下且以 `view_index_suffix` 结尾。不符合约定的来源
    /// 被跳过。注册表中必须存在 `not_found_view`。
    pub fn build(self, config: &RouterConfig) -> RouterResult<ViewRegistry<V>> {
        let feature_dir = dir_prefix(&config.feature_view_dir);
        let layout_dir = dir_prefix(&config.layout_view_dir);

        let mut entries: HashMap<String, ViewEntry<V>> = HashMap::new();
        let mut skipped = 0usize;

        for (kind, raw, view) in self.sources {
            let key = normalize_path(&raw);
            let accepted = match kind {
                ViewKind::Feature => key.starts_with(&feature_dir),
                ViewKind::Layout => {
                    key.starts_with(&layout_dir) && key.ends_with(&config.view_index_suffix)
                }
            };
            if !accepted {
                warn!(path = %raw, ?kind, "view source outside its directory, skipped");
                skipped += 1;
                continue;
            }
            if entries.insert(key.clone(), ViewEntry { kind, view }).is_some() {
                warn!(path = %key, "duplicate view source, last one wins");
            }
        }

        let not_found_key = normalize_path(&config.not_found_view);
        let not_found = entries
            .get(&not_found_key)
            .map(|entry| entry.view.clone())
            .ok_or_else(|| RouterError::MissingNotFoundView(not_found_key.clone()))?;

        info!(
            views = entries.len(),
            skipped,
            not_found = %not_found_key,
            "view registry built"
        );

        Ok(ViewRegistry { entries, not_found })
    }
}

fn dir_prefix(dir: &str) -> String {
    let mut prefix = normalize_path(dir);
    if prefix != "/" {
        prefix.push('/');
    }
    prefix
}
