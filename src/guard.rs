//! 导航守卫
//!
//! 每次导航前根据「是否持有令牌 / 目标是否为登录页 / 会话是否有效」决定放行、
//! 重定向或先拉取会话再重放导航。判定本身是纯函数 [`decide`]，
//! 只有拉取分支会等待网络。

use std::cell::RefCell;
use std::rc::Rc;

use async_trait::async_trait;
use console_shared::LoginUserDetail;
use tracing::{debug, info, warn};

use crate::context::RouterContext;
use crate::error::RouterResult;
use crate::location::Location;
use crate::path::normalize_path;
use crate::session::{RoutesResolved, SessionStore};

// =========================================================
// 协作者接口 (Adapters)
// =========================================================

/// 认证接口
#[async_trait(?Send)]
pub trait AuthApi {
    /// 用当前令牌查询用户详情（含权限树）
    async fn fetch_user_detail(&self) -> RouterResult<LoginUserDetail>;

    async fn logout(&self) -> RouterResult<()>;
}

/// 令牌存储（浏览器中为 Cookie）
pub trait TokenStore {
    fn get_token(&self) -> Option<String>;
    fn set_token(&self, token: &str);
    fn remove_token(&self);
}

impl<T: TokenStore + ?Sized> TokenStore for Rc<T> {
    fn get_token(&self) -> Option<String> {
        (**self).get_token()
    }

    fn set_token(&self, token: &str) {
        (**self).set_token(token)
    }

    fn remove_token(&self) {
        (**self).remove_token()
    }
}

#[async_trait(?Send)]
impl<A: AuthApi + ?Sized> AuthApi for Rc<A> {
    async fn fetch_user_detail(&self) -> RouterResult<LoginUserDetail> {
        (**self).fetch_user_detail().await
    }

    async fn logout(&self) -> RouterResult<()> {
        (**self).logout().await
    }
}

// =========================================================
// 判定表 (Decision Table)
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuardInput {
    pub has_token: bool,
    pub target_is_login: bool,
    pub session_is_fresh: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardAction {
    Allow,
    RedirectToLogin,
    RedirectToHome,
    FetchSession,
}

/// | 令牌 | 目标为登录页 | 会话有效 | 结果 |
/// |------|--------------|----------|------|
/// | 无   | 是           | -        | 放行 |
/// | 无   | 否           | -        | 重定向登录页 |
/// | 有   | 是           | -        | 重定向首页 |
/// | 有   | 否           | 是       | 放行 |
/// | 有   | 否           | 否       | 拉取会话 |
pub fn decide(input: GuardInput) -> GuardAction {
    match (input.has_token, input.target_is_login, input.session_is_fresh) {
        (false, true, _) => GuardAction::Allow,
        (false, false, _) => GuardAction::RedirectToLogin,
        (true, true, _) => GuardAction::RedirectToHome,
        (true, false, true) => GuardAction::Allow,
        (true, false, false) => GuardAction::FetchSession,
    }
}

/// 守卫的最终裁决
#[derive(Debug, Clone, PartialEq)]
pub enum GuardDecision<V> {
    Allow,
    Redirect(Location),
    /// 会话已重建：先登记 `routes`，再以替换历史的方式重放 `target`
    Replay {
        target: Location,
        routes: RoutesResolved<V>,
    },
}

// =========================================================
// 守卫 (Guard)
// =========================================================

pub struct NavigationGuard<A, T, V> {
    auth: A,
    tokens: T,
    session: Rc<RefCell<SessionStore>>,
    context: Rc<RouterContext<V>>,
}

impl<A, T, V> NavigationGuard<A, T, V>
where
    A: AuthApi,
    T: TokenStore,
    V: Clone,
{
    pub fn new(
        auth: A,
        tokens: T,
        session: Rc<RefCell<SessionStore>>,
        context: Rc<RouterContext<V>>,
    ) -> Self {
        Self {
            auth,
            tokens,
            session,
            context,
        }
    }

    pub fn auth(&self) -> &A {
        &self.auth
    }

    pub fn tokens(&self) -> &T {
        &self.tokens
    }

    pub fn session(&self) -> &Rc<RefCell<SessionStore>> {
        &self.session
    }

    pub fn context(&self) -> &Rc<RouterContext<V>> {
        &self.context
    }

    /// 当前状态对应的判定输入
    pub fn input_for(&self, to: &Location) -> GuardInput {
        GuardInput {
            has_token: self
                .tokens
                .get_token()
                .is_some_and(|token| !token.is_empty()),
            target_is_login: to.path == normalize_path(&self.context.config().login_path),
            session_is_fresh: self.session.borrow().is_fresh(),
        }
    }

    pub async fn before_each(&self, to: &Location) -> GuardDecision<V> {
        let input = self.input_for(to);
        let action = decide(input);
        debug!(to = %to, ?input, ?action, "guard decision");

        match action {
            GuardAction::Allow => GuardDecision::Allow,
            GuardAction::RedirectToLogin => GuardDecision::Redirect(self.login_location(to)),
            GuardAction::RedirectToHome => {
                GuardDecision::Redirect(Location::new(&self.context.config().home_path))
            }
            GuardAction::FetchSession => self.refresh_session(to).await,
        }
    }

    /// 带 `redirect=<原目标>` 的登录页地址
    pub fn login_location(&self, to: &Location) -> Location {
        let config = self.context.config();
        Location::new(&config.login_path).with_query(config.redirect_query_key.as_str(), to.href())
    }

    async fn refresh_session(&self, to: &Location) -> GuardDecision<V> {
        info!(to = %to, "session missing, fetching user detail");

        match self.auth.fetch_user_detail().await {
            Ok(detail) => {
                let routes = self
                    .session
                    .borrow_mut()
                    .apply_user_detail(detail, &self.context.compiler());
                info!(routes = routes.len(), "session restored, replaying navigation");
                GuardDecision::Replay {
                    target: to.clone(),
                    routes,
                }
            }
            Err(e) => {
                warn!(error = %e, "user detail fetch failed, redirecting to login");
                if let Err(e) = self.auth.logout().await {
                    warn!(error = %e, "logout after failed fetch also failed, ignored");
                }
                self.tokens.remove_token();
                GuardDecision::Redirect(self.login_location(to))
            }
        }
    }
}
