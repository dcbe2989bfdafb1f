//! 视图注册表
//!
//! 组件地址沿用后端权限树中的约定路径，键与后端下发的 `component`
//! 字段经过回退链拼接后的结果一一对应。

use console_router::{RouterConfig, RouterResult, ViewRegistry};
use leptos::prelude::*;

use crate::components::home::HomePage;
use crate::components::layout::LayoutPage;
use crate::components::login::LoginPage;
use crate::components::not_found::NotFoundPage;
use crate::web::View;

fn login_view() -> AnyView {
    view! { <LoginPage /> }.into_any()
}

fn layout_view() -> AnyView {
    view! { <LayoutPage /> }.into_any()
}

fn home_view() -> AnyView {
    view! { <HomePage /> }.into_any()
}

fn not_found_view() -> AnyView {
    view! { <NotFoundPage /> }.into_any()
}

pub fn view_registry(config: &RouterConfig) -> RouterResult<ViewRegistry<View>> {
    ViewRegistry::builder()
        .layout_view("/src/components/login/index.vue", login_view as View)
        .layout_view("/src/components/layout/index.vue", layout_view)
        .feature_view("/src/views/home/index.vue", home_view)
        .feature_view(config.not_found_view.as_str(), not_found_view)
        .build(config)
}
