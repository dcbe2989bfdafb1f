//! 认证模块
//!
//! 持有导航器并提供登录、退出、跳转等操作。组件只通过这里驱动导航，
//! 不直接触碰路由器。

use std::rc::Rc;

use console_router::{HistoryMode, Location, Navigation, Navigator, RouterError, RouterResult};
use console_shared::LoginReq;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{ConsoleApi, HttpAuthApi};
use crate::web::{BrowserHooks, BrowserRouter, CookieTokenStore, View};

pub type ShellNavigator =
    Navigator<HttpAuthApi, CookieTokenStore, BrowserRouter, BrowserHooks, View>;

/// 外壳上下文
///
/// 导航器含有 `Rc`/`RefCell`，只能以 local 方式存放。
#[derive(Clone, Copy)]
pub struct ShellContext {
    navigator: StoredValue<Rc<ShellNavigator>, LocalStorage>,
    api: StoredValue<ConsoleApi>,
    /// 导航进行中
    pub loading: RwSignal<bool>,
}

impl ShellContext {
    pub fn new(navigator: Rc<ShellNavigator>, api: ConsoleApi, loading: RwSignal<bool>) -> Self {
        Self {
            navigator: StoredValue::new_local(navigator),
            api: StoredValue::new(api),
            loading,
        }
    }

    pub fn navigator(&self) -> Rc<ShellNavigator> {
        self.navigator.get_value()
    }

    pub fn api(&self) -> ConsoleApi {
        self.api.get_value()
    }

    /// 跳转到站内地址
    pub fn navigate(&self, href: &str, mode: HistoryMode) {
        let navigator = self.navigator();
        let target = Location::parse(href);
        spawn_local(async move {
            report(navigator.navigate(target, mode).await);
        });
    }

    /// 处理接口错误：要求重新登录的业务码会把用户送回登录页
    pub fn handle_api_error(&self, err: &RouterError) {
        if !err.requires_relogin() {
            return;
        }
        let navigator = self.navigator();
        spawn_local(async move {
            report(navigator.expire_session().await);
        });
    }
}

fn report(result: RouterResult<Navigation>) {
    match result {
        Ok(nav) => web_sys::console::log_1(&format!("[Router] Navigated to {}", nav.location).into()),
        Err(e) => web_sys::console::error_1(&format!("[Router] Navigation failed: {}", e).into()),
    }
}

/// 从 Context 获取外壳上下文
pub fn use_shell() -> ShellContext {
    use_context::<ShellContext>().expect("ShellContext should be provided")
}

/// 登录并跳转到登录页记录的目标地址
///
/// 令牌由后端写入 Cookie，这里不需要手动保存。
pub async fn login(shell: ShellContext, req: LoginReq, login_location: Location) -> Result<(), String> {
    let detail = match shell.api().login(&req).await {
        Ok(detail) => detail,
        Err(e) => {
            shell.handle_api_error(&e);
            return Err(e.to_string());
        }
    };

    shell
        .navigator()
        .complete_login(detail, None, &login_location)
        .await
        .map(|_| ())
        .map_err(|e| e.to_string())
}

/// 注销；导航器负责清理令牌与会话并回到登录页
pub fn logout(shell: ShellContext) {
    let navigator = shell.navigator();
    spawn_local(async move {
        report(navigator.logout().await);
    });
}
