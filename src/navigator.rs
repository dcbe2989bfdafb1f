//! 导航器：把守卫裁决落实到具体路由器上
//!
//! 路由器本身（浏览器历史或内存实现）通过 [`RouterPort`] 接入；
//! 进度条与文档标题等副作用通过 [`NavigationHooks`] 接入。

use std::cell::RefCell;
use std::rc::Rc;

use console_shared::LoginUserDetail;
use tracing::{debug, info, warn};

use crate::constant::compile_constant_routes;
use crate::context::RouterContext;
use crate::error::{RouterError, RouterResult};
use crate::guard::{AuthApi, GuardDecision, NavigationGuard, TokenStore};
use crate::location::Location;
use crate::path::normalize_path;
use crate::route::{RouteDef, count_routes};
use crate::session::{RoutesResolved, SessionStore};
use crate::table::RouteMatch;

// =========================================================
// 适配接口 (Ports)
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryMode {
    Push,
    Replace,
}

/// 路由器接口
pub trait RouterPort<V> {
    /// 追加一条顶层路由
    fn add_route(&self, route: RouteDef<V>);

    fn resolve(&self, path: &str) -> Option<RouteMatch<V>>;

    /// 导航已确认：写入历史并渲染
    fn commit(&self, location: &Location, mode: HistoryMode, matched: Option<&RouteMatch<V>>);

    fn current(&self) -> Option<Location>;
}

impl<V, R: RouterPort<V> + ?Sized> RouterPort<V> for Rc<R> {
    fn add_route(&self, route: RouteDef<V>) {
        (**self).add_route(route)
    }

    fn resolve(&self, path: &str) -> Option<RouteMatch<V>> {
        (**self).resolve(path)
    }

    fn commit(&self, location: &Location, mode: HistoryMode, matched: Option<&RouteMatch<V>>) {
        (**self).commit(location, mode, matched)
    }

    fn current(&self) -> Option<Location> {
        (**self).current()
    }
}

/// 导航前后的副作用钩子，默认什么都不做
pub trait NavigationHooks {
    fn progress_start(&self) {}
    fn progress_finish(&self) {}
    fn set_title(&self, _title: &str) {}
}

pub struct NoopHooks;

impl NavigationHooks for NoopHooks {}

impl<H: NavigationHooks + ?Sized> NavigationHooks for Rc<H> {
    fn progress_start(&self) {
        (**self).progress_start()
    }

    fn progress_finish(&self) {
        (**self).progress_finish()
    }

    fn set_title(&self, title: &str) {
        (**self).set_title(title)
    }
}

/// 一次完成的导航
#[derive(Debug, Clone, PartialEq)]
pub struct Navigation {
    /// 最终落地的地址
    pub location: Location,
    pub mode: HistoryMode,
    /// 途经的重定向次数（含路由声明的重定向与重放）
    pub redirects: usize,
    pub title: Option<String>,
}

// =========================================================
// 导航器 (Navigator)
// =========================================================

pub struct Navigator<A, T, R, H, V> {
    guard: NavigationGuard<A, T, V>,
    router: R,
    hooks: H,
}

impl<A, T, R, H, V> Navigator<A, T, R, H, V>
where
    A: AuthApi,
    T: TokenStore,
    R: RouterPort<V>,
    H: NavigationHooks,
    V: Clone,
{
    pub fn new(context: RouterContext<V>, auth: A, tokens: T, router: R, hooks: H) -> Self {
        let session = Rc::new(RefCell::new(SessionStore::new()));
        Self {
            guard: NavigationGuard::new(auth, tokens, session, Rc::new(context)),
            router,
            hooks,
        }
    }

    pub fn guard(&self) -> &NavigationGuard<A, T, V> {
        &self.guard
    }

    pub fn router(&self) -> &R {
        &self.router
    }

    pub fn session(&self) -> &Rc<RefCell<SessionStore>> {
        self.guard.session()
    }

    pub fn context(&self) -> &Rc<RouterContext<V>> {
        self.guard.context()
    }

    /// 登记静态路由（含兜底路由），启动时调用一次
    pub fn boot(&self) {
        let routes = compile_constant_routes(&self.context().compiler());
        info!(routes = count_routes(&routes), "constant routes registered");
        for route in routes {
            self.router.add_route(route);
        }
    }

    /// 发起一次导航
    ///
    /// 路由声明的重定向先于守卫生效；守卫的重定向沿用原导航的历史模式，
    /// 重放则总是替换当前历史记录。
    pub async fn navigate(&self, to: Location, mode: HistoryMode) -> RouterResult<Navigation> {
        let limit = self.context().config().max_redirects;
        let origin = to.path.clone();
        let mut target = to;
        let mut mode = mode;
        let mut redirects = 0;

        loop {
            if let Some(redirect) = self.record_redirect(&target) {
                debug!(from = %target, to = %redirect, "following route redirect");
                redirects += 1;
                self.check_limit(&origin, redirects, limit)?;
                target = redirect;
                continue;
            }

            self.hooks.progress_start();
            match self.guard.before_each(&target).await {
                GuardDecision::Allow => return Ok(self.finish(target, mode, redirects)),
                GuardDecision::Redirect(next) => {
                    debug!(from = %target, to = %next, "guard redirect");
                    redirects += 1;
                    self.check_limit(&origin, redirects, limit)?;
                    target = next;
                }
                GuardDecision::Replay {
                    target: next,
                    routes,
                } => {
                    self.register(routes);
                    redirects += 1;
                    self.check_limit(&origin, redirects, limit)?;
                    target = next;
                    mode = HistoryMode::Replace;
                }
            }
        }
    }

    /// 登录成功
    ///
    /// 写入令牌（若由调用方持有）、填充会话并登记动态路由，然后前往
    /// 登录页 `redirect` 参数记录的地址，缺省为首页。
    pub async fn complete_login(
        &self,
        detail: LoginUserDetail,
        token: Option<&str>,
        login_location: &Location,
    ) -> RouterResult<Navigation> {
        if let Some(token) = token {
            self.guard.tokens().set_token(token);
        }

        let routes = self
            .session()
            .borrow_mut()
            .apply_user_detail(detail, &self.context().compiler());
        self.register(routes);

        let config = self.context().config();
        let login_path = normalize_path(&config.login_path);
        let target = login_location
            .redirect_target(&config.redirect_query_key)
            .filter(|target| target.path != login_path)
            .unwrap_or_else(|| Location::new(&config.home_path));

        info!(to = %target, "login completed");
        self.navigate(target, HistoryMode::Push).await
    }

    /// 退出登录；服务端退出失败不影响本地清理
    pub async fn logout(&self) -> RouterResult<Navigation> {
        if let Err(e) = self.guard.auth().logout().await {
            warn!(error = %e, "logout request failed, clearing local session anyway");
        }
        self.guard.tokens().remove_token();
        self.session().borrow_mut().clear();

        info!("logged out");
        let login = Location::new(&self.context().config().login_path);
        self.navigate(login, HistoryMode::Push).await
    }

    /// 服务端报告令牌失效（业务码 101/102）
    ///
    /// 清除令牌并以替换方式前往登录页，携带当前地址以便重新登录后返回。
    pub async fn expire_session(&self) -> RouterResult<Navigation> {
        self.guard.tokens().remove_token();

        let config = self.context().config();
        let current = self
            .router
            .current()
            .unwrap_or_else(|| Location::new(&config.home_path));
        warn!(current = %current, "session expired");

        let login = self.guard.login_location(&current);
        self.navigate(login, HistoryMode::Replace).await
    }

    fn record_redirect(&self, target: &Location) -> Option<Location> {
        let matched = self.router.resolve(&target.path)?;
        let redirect = matched.redirect()?;
        let next = Location::parse(redirect);
        (next.path != target.path).then_some(next)
    }

    fn register(&self, routes: RoutesResolved<V>) {
        for route in routes {
            self.router.add_route(route);
        }
    }

    fn check_limit(&self, origin: &str, redirects: usize, limit: usize) -> RouterResult<()> {
        if redirects > limit {
            self.hooks.progress_finish();
            warn!(path = origin, limit, "redirect limit exceeded");
            return Err(RouterError::RedirectLimit {
                path: origin.to_string(),
                limit,
            });
        }
        Ok(())
    }

    fn finish(&self, location: Location, mode: HistoryMode, redirects: usize) -> Navigation {
        let matched = self.router.resolve(&location.path);
        self.router.commit(&location, mode, matched.as_ref());

        let title = matched.as_ref().and_then(|m| m.title()).map(str::to_string);
        if let Some(title) = &title {
            self.hooks.set_title(title);
        }
        self.hooks.progress_finish();

        debug!(to = %location, ?mode, redirects, "navigation committed");
        Navigation {
            location,
            mode,
            redirects,
            title,
        }
    }
}
