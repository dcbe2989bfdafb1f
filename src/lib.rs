//! 管理控制台的权限驱动路由核心
//!
//! 登录后后端返回一棵权限树，这里把它编译成路由表并登记到路由器；
//! 导航守卫在每次导航前检查令牌与会话，必要时先拉取权限再重放导航。
//!
//! 本 crate 不依赖 DOM：视图类型 `V` 由使用方决定（浏览器外壳中是组件函数，
//! 测试中是字符串），路由器、令牌存储与认证接口都通过 trait 接入。

pub mod compiler;
pub mod config;
pub mod constant;
pub mod context;
pub mod error;
pub mod guard;
pub mod location;
pub mod memory;
pub mod menu;
pub mod navigator;
pub mod path;
pub mod registry;
pub mod route;
pub mod session;
pub mod table;

pub use compiler::{ResolvedBy, RouteCompiler};
pub use config::RouterConfig;
pub use context::RouterContext;
pub use error::{RouterError, RouterResult};
pub use guard::{AuthApi, GuardDecision, NavigationGuard, TokenStore};
pub use location::Location;
pub use memory::MemoryRouter;
pub use navigator::{HistoryMode, Navigation, NavigationHooks, Navigator, RouterPort};
pub use registry::{ViewKind, ViewRegistry};
pub use route::{RouteDef, RouteMeta};
pub use session::{RoutesResolved, SessionStore, UserProfile};
pub use table::{RouteMatch, RouteTable};
