//! 浏览器路由器
//!
//! 封装 web_sys 的 History API：所有对 window.history 的操作都集中在此模块。
//! 路由登记与匹配交给核心的 [`RouteTable`]，匹配结果通过信号驱动界面。

use std::cell::RefCell;

use console_router::table::{RouteMatch, RouteTable};
use console_router::{HistoryMode, Location, RouteDef, RouterPort};
use leptos::prelude::*;
use wasm_bindgen::prelude::*;

/// 视图即组件函数
pub type View = fn() -> AnyView;

/// 获取当前浏览器地址（路径 + 查询）
pub fn current_location() -> Location {
    let href = web_sys::window()
        .map(|w| w.location())
        .map(|loc| {
            format!(
                "{}{}",
                loc.pathname().unwrap_or_else(|_| "/".to_string()),
                loc.search().unwrap_or_default()
            )
        })
        .unwrap_or_else(|| "/".to_string());
    Location::parse(&href)
}

/// 推送 History 状态（内部工具函数）
fn push_history_state(href: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.push_state_with_url(&JsValue::NULL, "", Some(href));
        }
    }
}

/// 替换 History 状态（内部工具函数，用于重定向）
fn replace_history_state(href: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(href));
        }
    }
}

/// 路由渲染状态，通过 Context 共享给 [`RouterView`]
#[derive(Clone, Copy)]
pub struct RouterState {
    /// 从根到叶的匹配视图链
    matched: RwSignal<Vec<View>>,
    location: RwSignal<Location>,
}

impl RouterState {
    pub fn new() -> Self {
        Self {
            matched: RwSignal::new(Vec::new()),
            location: RwSignal::new(current_location()),
        }
    }

    pub fn location(&self) -> RwSignal<Location> {
        self.location
    }
}

/// 基于 History API 的 [`RouterPort`] 实现
pub struct BrowserRouter {
    table: RefCell<RouteTable<View>>,
    state: RouterState,
}

impl BrowserRouter {
    pub fn new(state: RouterState) -> Self {
        Self {
            table: RefCell::new(RouteTable::new()),
            state,
        }
    }
}

impl RouterPort<View> for BrowserRouter {
    fn add_route(&self, route: RouteDef<View>) {
        self.table.borrow_mut().add(route);
    }

    fn resolve(&self, path: &str) -> Option<RouteMatch<View>> {
        self.table.borrow().resolve(path)
    }

    fn commit(&self, location: &Location, mode: HistoryMode, matched: Option<&RouteMatch<View>>) {
        let href = location.href();
        match mode {
            HistoryMode::Push => push_history_state(&href),
            HistoryMode::Replace => replace_history_state(&href),
        }

        let views = matched
            .map(|m| m.matched.iter().map(|route| route.component).collect())
            .unwrap_or_default();
        self.state.matched.set(views);
        self.state.location.set(location.clone());
    }

    fn current(&self) -> Option<Location> {
        Some(current_location())
    }
}

/// 从 Context 获取路由渲染状态
pub fn use_router_state() -> RouterState {
    use_context::<RouterState>()
        .expect("RouterState not found in context. Ensure it is provided in App.")
}

// ============================================================================
// UI 组件
// ============================================================================

/// 路由出口组件
///
/// 渲染匹配链中第 `depth` 层的视图；布局视图内部再放一个 `depth + 1` 的出口。
#[component]
pub fn RouterView(#[prop(default = 0)] depth: usize) -> impl IntoView {
    let state = use_router_state();
    // 同一层视图不变时不重新渲染
    let view = Memo::new(move |_| state.matched.with(|views| views.get(depth).copied()));

    move || view.get().map(|render| render())
}
