//! 管理控制台浏览器外壳
//!
//! 路由核心（`console-router`）不依赖 DOM，这里为它提供浏览器实现：
//! - `web::router`: History API 路由器与路由出口
//! - `web::cookie`: Cookie 令牌存储
//! - `web::hooks`: 加载指示器与文档标题
//! - `web::log`: 核心日志输出到浏览器控制台
//! - `api`: 后端接口与认证协作方
//! - `auth`: 外壳上下文（导航器）与登录/退出
//! - `components`: UI 组件层

mod api;
mod auth;
mod components {
    pub mod home;
    pub mod layout;
    pub mod login;
    pub mod not_found;
}
mod config;
mod views;

use std::rc::Rc;

use console_router::{HistoryMode, Navigator, RouterConfig, RouterContext};
use leptos::prelude::*;
use wasm_bindgen::prelude::*;

use crate::api::{ConsoleApi, HttpAuthApi};
use crate::auth::ShellContext;
use crate::config::ShellConfig;

pub(crate) mod web {
    mod cookie;
    mod hooks;
    mod log;
    mod router;

    pub use cookie::CookieTokenStore;
    pub use hooks::BrowserHooks;
    pub use log::init_tracing;
    pub use router::{
        BrowserRouter, RouterState, RouterView, View, current_location, use_router_state,
    };
}

pub use web::init_tracing;
use web::{BrowserHooks, BrowserRouter, CookieTokenStore, RouterState, RouterView};

/// 浏览器后退/前进时重新走一遍导航守卫
fn init_popstate_listener(shell: ShellContext) {
    let closure = Closure::<dyn Fn()>::new(move || {
        let target = web::current_location();
        shell.navigate(&target.href(), HistoryMode::Replace);
    });

    if let Some(window) = web_sys::window() {
        let _ = window.add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
    }

    // 泄漏闭包以保持监听器存活
    closure.forget();
}

#[component]
pub fn App() -> impl IntoView {
    let shell_config = ShellConfig::default();
    let router_config = RouterConfig::default();

    // 1. 视图注册表：缺少 404 视图时无法启动
    let registry = match views::view_registry(&router_config) {
        Ok(registry) => registry,
        Err(e) => {
            web_sys::console::error_1(&format!("[Router] {}", e).into());
            return view! { <p class="p-6 text-error">"路由初始化失败"</p> }.into_any();
        }
    };

    // 2. 路由状态与导航器
    let state = RouterState::new();
    provide_context(state);
    let loading = RwSignal::new(false);

    let api = ConsoleApi::new(shell_config.api_base_url.as_str());
    let navigator = Rc::new(Navigator::new(
        RouterContext::new(router_config, registry),
        HttpAuthApi::new(api.clone()),
        CookieTokenStore::new(&shell_config),
        BrowserRouter::new(state),
        BrowserHooks::new(loading, shell_config.app_title.as_str()),
    ));
    navigator.boot();

    let shell = ShellContext::new(navigator, api, loading);
    provide_context(shell);

    // 3. 监听历史变化，并对当前地址做首次导航
    init_popstate_listener(shell);
    shell.navigate(&web::current_location().href(), HistoryMode::Replace);

    view! {
        <Show when=move || loading.get()>
            <progress class="progress progress-primary w-full fixed top-0 h-1"></progress>
        </Show>
        <RouterView />
    }
    .into_any()
}
