//! 路由编译器
//!
//! 纯函数：权限森林 -> 路由定义森林。每个节点的视图按确定的回退链解析，
//! 任何一步都不会失败，最终兜底为规范的 404 视图。

use console_shared::PermissionNode;
use tracing::{debug, warn};

use crate::config::RouterConfig;
use crate::path::{join_paths, normalize_path};
use crate::registry::ViewRegistry;
use crate::route::{RouteDef, RouteMeta};

/// 视图是在回退链的哪一步命中的
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedBy {
    /// a. `source_root + component`
    Component,
    /// b. `feature_view_dir + permission_code + view_index_suffix`
    PermissionCode,
    /// c. 规范化后的 `component` 原样查找
    RawComponent,
    /// d. 404 视图
    NotFound,
}

pub struct RouteCompiler<'a, V> {
    registry: &'a ViewRegistry<V>,
    config: &'a RouterConfig,
}

impl<'a, V: Clone> RouteCompiler<'a, V> {
    pub fn new(registry: &'a ViewRegistry<V>, config: &'a RouterConfig) -> Self {
        Self { registry, config }
    }

    pub fn config(&self) -> &'a RouterConfig {
        self.config
    }

    pub fn registry(&self) -> &'a ViewRegistry<V> {
        self.registry
    }

    /// 编译权限森林，输出顺序与输入顺序一致
    ///
    /// 只有 `component` 为非空字符串的节点会生成路由；被过滤的节点连同其
    /// 整棵子树都不参与编译。
    pub fn compile(&self, nodes: &[PermissionNode]) -> Vec<RouteDef<V>> {
        self.compile_level(nodes, 0)
    }

    fn compile_level(&self, nodes: &[PermissionNode], depth: usize) -> Vec<RouteDef<V>> {
        if nodes.is_empty() {
            return Vec::new();
        }
        if depth >= self.config.max_depth {
            warn!(
                depth,
                dropped = nodes.len(),
                "permission tree deeper than max_depth, subtree dropped"
            );
            return Vec::new();
        }

        nodes
            .iter()
            .filter(|node| node.has_component())
            .map(|node| self.compile_node(node, depth))
            .collect()
    }

    fn compile_node(&self, node: &PermissionNode, depth: usize) -> RouteDef<V> {
        let (component, _) = self.resolve_view(node);
        let path = normalize_path(&node.permission_code);

        RouteDef {
            name: path.clone(),
            path,
            component,
            children: self.compile_level(&node.children, depth + 1),
            meta: RouteMeta {
                title: node.permission_name.clone(),
                hidden: !node.visible,
            },
            redirect: node.redirect.clone().filter(|r| !r.is_empty()),
        }
    }

    /// 按回退链解析节点的视图，在第一次命中时停止
    pub fn resolve_view(&self, node: &PermissionNode) -> (V, ResolvedBy) {
        let component = node
            .component
            .as_deref()
            .filter(|c| !c.is_empty())
            .map(normalize_path);

        let mut candidates = Vec::with_capacity(3);
        if let Some(component) = &component {
            candidates.push((
                ResolvedBy::Component,
                join_paths(&[self.config.source_root.as_str(), component.as_str()]),
            ));
        }
        candidates.push((
            ResolvedBy::PermissionCode,
            join_paths(&[
                self.config.feature_view_dir.as_str(),
                node.permission_code.as_str(),
                self.config.view_index_suffix.as_str(),
            ]),
        ));
        if let Some(component) = component {
            candidates.push((ResolvedBy::RawComponent, component));
        }

        for (step, key) in candidates {
            if let Some(view) = self.registry.resolve(&key) {
                debug!(code = %node.permission_code, key = %key, resolved_by = ?step, "view resolved");
                return (view.clone(), step);
            }
            debug!(code = %node.permission_code, key = %key, step = ?step, "view lookup missed");
        }

        warn!(
            code = %node.permission_code,
            component = ?node.component,
            "no view matched, falling back to not-found view"
        );
        (self.registry.not_found().clone(), ResolvedBy::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::{count_routes, flatten_routes};
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn registry() -> ViewRegistry<&'static str> {
        ViewRegistry::builder()
            .feature_views([
                ("/src/views/404/index.vue", "not-found"),
                ("/src/views/home/index.vue", "home"),
                ("/src/views/foo/bar.view", "foo-bar"),
                ("/src/views/rbac/user/index.vue", "rbac-user"),
                ("/src/views/sys/dict/index.vue", "sys-dict"),
            ])
            .layout_view("/src/components/layout/index.vue", "layout")
            .build(&RouterConfig::default())
            .unwrap()
    }

    fn page(id: &str, code: &str, component: &str) -> PermissionNode {
        PermissionNode::page(id, code, format!("page {id}")).with_component(component)
    }

    #[test]
    fn test_component_path_wins_first() {
        let registry = registry();
        let config = RouterConfig::default();
        let compiler = RouteCompiler::new(&registry, &config);

        let node = page("1", "/rbac/user", "/views/foo/bar.view");
        assert_eq!(compiler.resolve_view(&node), ("foo-bar", ResolvedBy::Component));

        let routes = compiler.compile(&[node]);
        assert_eq!(routes[0].component, "foo-bar");
    }

    #[test]
    fn test_permission_code_convention_is_second() {
        let registry = registry();
        let config = RouterConfig::default();
        let compiler = RouteCompiler::new(&registry, &config);

        // 空 component：跳过 a、c 两步
        let node = PermissionNode::page("1", "rbac/user/", "用户管理").with_component("");
        assert_eq!(
            compiler.resolve_view(&node),
            ("rbac-user", ResolvedBy::PermissionCode)
        );

        // component 指向不存在的文件：a 未命中，b 命中
        let node = page("2", "/rbac/user", "/views/rbac/missing.vue");
        assert_eq!(
            compiler.resolve_view(&node),
            ("rbac-user", ResolvedBy::PermissionCode)
        );
    }

    #[test]
    fn test_raw_component_is_third() {
        let registry = registry();
        let config = RouterConfig::default();
        let compiler = RouteCompiler::new(&registry, &config);

        let node = page("1", "/dict", "/src/views/sys/dict/index.vue/");
        assert_eq!(
            compiler.resolve_view(&node),
            ("sys-dict", ResolvedBy::RawComponent)
        );
    }

    #[test]
    fn test_unresolvable_falls_back_to_not_found() {
        let registry = registry();
        let config = RouterConfig::default();
        let compiler = RouteCompiler::new(&registry, &config);

        let node = page("1", "/reports", "/views/reports/index.vue");
        assert_eq!(
            compiler.resolve_view(&node),
            ("not-found", ResolvedBy::NotFound)
        );
        assert_eq!(compiler.compile(&[node])[0].component, "not-found");
    }

    #[test]
    fn test_route_shape() {
        let registry = registry();
        let config = RouterConfig::default();
        let compiler = RouteCompiler::new(&registry, &config);

        let node = page("2", "/", "/components/layout/index.vue")
            .with_redirect("/home")
            .with_child(page("3", "home/", "/views/home/index.vue").with_visible(false));

        let routes = compiler.compile(&[node]);
        assert_eq!(
            routes,
            vec![RouteDef {
                name: "/".into(),
                path: "/".into(),
                component: "layout",
                meta: RouteMeta {
                    title: "page 2".into(),
                    hidden: false,
                },
                redirect: Some("/home".into()),
                children: vec![RouteDef {
                    name: "/home".into(),
                    path: "/home".into(),
                    component: "home",
                    children: vec![],
                    meta: RouteMeta {
                        title: "page 3".into(),
                        hidden: true,
                    },
                    redirect: None,
                }],
            }]
        );
    }

    #[test]
    fn test_empty_redirect_is_not_attached() {
        let registry = registry();
        let config = RouterConfig::default();
        let compiler = RouteCompiler::new(&registry, &config);

        let routes = compiler.compile(&[page("1", "/home", "/views/home/index.vue").with_redirect("")]);
        assert_eq!(routes[0].redirect, None);
    }

    #[test]
    fn test_parent_without_component_drops_subtree() {
        // 当前行为：没有 component 的父节点会连同子树一起被排除
        let registry = registry();
        let config = RouterConfig::default();
        let compiler = RouteCompiler::new(&registry, &config);

        let gate = PermissionNode::page("10", "/rbac", "权限管理")
            .with_child(page("11", "/rbac/user", "/views/rbac/user/index.vue"));
        let routes = compiler.compile(&[gate, page("20", "/home", "/views/home/index.vue")]);

        assert_eq!(routes.len(), 1);
        assert_eq!(routes[0].path, "/home");
    }

    #[test]
    fn test_duplicate_codes_are_not_deduplicated() {
        let registry = registry();
        let config = RouterConfig::default();
        let compiler = RouteCompiler::new(&registry, &config);

        let routes = compiler.compile(&[
            page("1", "/home", "/views/home/index.vue"),
            page("2", "/home/", "/views/foo/bar.view"),
        ]);
        assert_eq!(routes.len(), 2);
        assert_eq!(routes[0].path, routes[1].path);
    }

    #[test]
    fn test_depth_guard_truncates_deep_chains() {
        let registry = registry();
        let config = RouterConfig {
            max_depth: 4,
            ..RouterConfig::default()
        };
        let compiler = RouteCompiler::new(&registry, &config);

        let mut node = page("leaf", "/l", "/views/home/index.vue");
        for i in 0..10 {
            node = page(&i.to_string(), &format!("/n{i}"), "/views/home/index.vue")
                .with_child(node);
        }
        let routes = compiler.compile(&[node]);
        assert_eq!(count_routes(&routes), 4);
    }

    #[test]
    fn test_empty_input() {
        let registry = registry();
        let config = RouterConfig::default();
        let compiler = RouteCompiler::new(&registry, &config);
        assert!(compiler.compile(&[]).is_empty());
    }

    // =========================================================
    // Properties
    // =========================================================

    fn arb_component() -> impl Strategy<Value = Option<String>> {
        prop_oneof![
            Just(None),
            Just(Some(String::new())),
            Just(Some("/views/home/index.vue".to_string())),
            "[a-z]{1,6}".prop_map(|s| Some(format!("/views/{s}/index.vue"))),
        ]
    }

    fn arb_forest() -> impl Strategy<Value = Vec<PermissionNode>> {
        let leaf = (0u32..1000, arb_component(), any::<bool>()).prop_map(
            |(id, component, visible)| {
                let mut node = PermissionNode::page(
                    id.to_string(),
                    format!("/p{id}"),
                    format!("page {id}"),
                )
                .with_visible(visible);
                node.component = component;
                node
            },
        );
        let tree = leaf.prop_recursive(4, 48, 4, |inner| {
            (inner.clone(), prop::collection::vec(inner, 0..4)).prop_map(
                |(mut node, children)| {
                    node.children = children;
                    node
                },
            )
        });
        prop::collection::vec(tree, 0..5)
    }

    /// 参与编译的节点数：自身有 component，且所有祖先都有 component
    fn routable_count(nodes: &[PermissionNode]) -> usize {
        nodes
            .iter()
            .filter(|n| n.has_component())
            .map(|n| 1 + routable_count(&n.children))
            .sum()
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_route_count_matches_componentized_nodes(forest in arb_forest()) {
            let registry = registry();
            let config = RouterConfig::default();
            let compiler = RouteCompiler::new(&registry, &config);

            let routes = compiler.compile(&forest);
            prop_assert_eq!(flatten_routes(&routes).len(), routable_count(&forest));
        }

        #[test]
        fn prop_compile_is_idempotent(forest in arb_forest()) {
            let registry = registry();
            let config = RouterConfig::default();
            let compiler = RouteCompiler::new(&registry, &config);

            let snapshot = forest.clone();
            let first = compiler.compile(&forest);
            let second = compiler.compile(&forest);
            prop_assert_eq!(first, second);
            prop_assert_eq!(forest, snapshot);
        }

        #[test]
        fn prop_order_is_preserved(forest in arb_forest()) {
            let registry = registry();
            let config = RouterConfig::default();
            let compiler = RouteCompiler::new(&registry, &config);

            let expected: Vec<String> = forest
                .iter()
                .filter(|n| n.has_component())
                .map(|n| normalize_path(&n.permission_code))
                .collect();
            let actual: Vec<String> = compiler
                .compile(&forest)
                .into_iter()
                .map(|r| r.path)
                .collect();
            prop_assert_eq!(actual, expected);
        }
    }
}
