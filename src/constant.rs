//! 静态路由集合
//!
//! 与服务端数据无关、启动时即登记的路由：登录页、布局外壳及其首页，
//! 以及兜底的 404 路由。

use console_shared::PermissionNode;

use crate::compiler::RouteCompiler;
use crate::config::RouterConfig;
use crate::route::{RouteDef, RouteMeta};

/// 兜底路由的路径，匹配任何未登记的地址
pub const CATCH_ALL_PATH: &str = "/:catchAll(.*)";

const LOGIN_COMPONENT: &str = "/components/login/index.vue";
const LAYOUT_COMPONENT: &str = "/components/layout/index.vue";
const HOME_COMPONENT: &str = "/views/home/index.vue";

/// 静态权限树：登录页 + 布局外壳（含首页）
pub fn constant_permissions(config: &RouterConfig) -> Vec<PermissionNode> {
    let login = PermissionNode::page("1", config.login_path.as_str(), "登录")
        .with_component(LOGIN_COMPONENT)
        .with_visible(false)
        .with_sort(1);

    let home = PermissionNode::page("3", config.home_path.as_str(), "首页")
        .with_component(HOME_COMPONENT)
        .with_icon("HomeOutline")
        .with_sort(1);

    let layout = PermissionNode::page("2", "/", "布局")
        .with_component(LAYOUT_COMPONENT)
        .with_redirect(config.home_path.as_str())
        .with_icon("HomeOutline")
        .with_sort(1)
        .with_child(home);

    vec![login, layout]
}

/// 兜底路由：渲染 404 视图，不做重定向
///
/// 刷新页面时动态路由尚未登记，目标地址会先落到这里，
/// 由导航守卫拉取权限后再重放原始导航。
pub fn catch_all_route<V: Clone>(compiler: &RouteCompiler<'_, V>) -> RouteDef<V> {
    RouteDef {
        name: CATCH_ALL_PATH.to_string(),
        path: CATCH_ALL_PATH.to_string(),
        component: compiler.registry().not_found().clone(),
        children: Vec::new(),
        meta: RouteMeta {
            title: compiler.config().not_found_title.clone(),
            hidden: true,
        },
        redirect: None,
    }
}

/// 编译静态路由表，末尾附加兜底路由
pub fn compile_constant_routes<V: Clone>(compiler: &RouteCompiler<'_, V>) -> Vec<RouteDef<V>> {
    let mut routes = compiler.compile(&constant_permissions(compiler.config()));
    routes.push(catch_all_route(compiler));
    routes
}
