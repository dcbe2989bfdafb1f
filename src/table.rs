//! 路由表：只追加的路由登记与路径匹配
//!
//! 内存路由器与浏览器路由器共用。登记顺序即优先级：后登记的同名路由
//! 覆盖先登记的；兜底路由只在没有任何精确匹配时生效。

use crate::constant::CATCH_ALL_PATH;
use crate::path::normalize_path;
use crate::route::{RouteDef, RouteMeta};

/// 匹配链中的一条路由记录（不含子路由）
#[derive(Debug, Clone, PartialEq)]
pub struct MatchedRoute<V> {
    pub name: String,
    pub path: String,
    pub component: V,
    pub meta: RouteMeta,
    pub redirect: Option<String>,
}

impl<V: Clone> From<&RouteDef<V>> for MatchedRoute<V> {
    fn from(route: &RouteDef<V>) -> Self {
        Self {
            name: route.name.clone(),
            path: route.path.clone(),
            component: route.component.clone(),
            meta: route.meta.clone(),
            redirect: route.redirect.clone(),
        }
    }
}

/// 一次路径解析的结果：从根到叶的匹配链
#[derive(Debug, Clone, PartialEq)]
pub struct RouteMatch<V> {
    pub path: String,
    pub matched: Vec<MatchedRoute<V>>,
    /// 是否落在兜底路由上
    pub fallback: bool,
}

impl<V> RouteMatch<V> {
    pub fn leaf(&self) -> Option<&MatchedRoute<V>> {
        self.matched.last()
    }

    pub fn title(&self) -> Option<&str> {
        self.leaf().map(|route| route.meta.title.as_str())
    }

    /// 叶子路由声明的重定向
    pub fn redirect(&self) -> Option<&str> {
        self.leaf().and_then(|route| route.redirect.as_deref())
    }
}

#[derive(Debug, Clone)]
pub struct RouteTable<V> {
    routes: Vec<RouteDef<V>>,
    fallback: Option<RouteDef<V>>,
}

impl<V> Default for RouteTable<V> {
    fn default() -> Self {
        Self {
            routes: Vec::new(),
            fallback: None,
        }
    }
}

impl<V: Clone> RouteTable<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加一条顶层路由；从不删除或替换已登记的路由
    pub fn add(&mut self, route: RouteDef<V>) {
        if route.path == CATCH_ALL_PATH {
            self.fallback = Some(route);
        } else {
            self.routes.push(route);
        }
    }

    /// 已登记的顶层路由数（不含兜底路由）
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn routes(&self) -> &[RouteDef<V>] {
        &self.routes
    }

    pub fn has_fallback(&self) -> bool {
        self.fallback.is_some()
    }

    pub fn resolve(&self, path: &str) -> Option<RouteMatch<V>> {
        let target = normalize_path(path);

        for route in self.routes.iter().rev() {
            let mut chain = Vec::new();
            if find_chain(route, &target, &mut chain) {
                return Some(RouteMatch {
                    path: target,
                    matched: chain.into_iter().map(MatchedRoute::from).collect(),
                    fallback: false,
                });
            }
        }

        self.fallback.as_ref().map(|route| RouteMatch {
            path: target,
            matched: vec![MatchedRoute::from(route)],
            fallback: true,
        })
    }
}

fn find_chain<'a, V>(
    route: &'a RouteDef<V>,
    target: &str,
    chain: &mut Vec<&'a RouteDef<V>>,
) -> bool {
    chain.push(route);
    if route.path == target {
        return true;
    }
    for child in route.children.iter().rev() {
        if find_chain(child, target, chain) {
            return true;
        }
    }
    chain.pop();
    false
}
