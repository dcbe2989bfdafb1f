//! 端到端导航流程：登录、刷新重建、会话失效

use std::cell::RefCell;
use std::rc::Rc;

use async_trait::async_trait;
use console_router::menu::build_menu;
use console_router::{
    AuthApi, HistoryMode, Location, MemoryRouter, NavigationHooks, Navigator, RouterConfig,
    RouterContext, RouterError, RouterPort, RouterResult, TokenStore, ViewRegistry,
};
use console_shared::{ApiResult, LoginUserDetail};
use pretty_assertions::assert_eq;

const DETAIL_ENVELOPE: &str = r#"{
    "code": 0,
    "success": true,
    "message": null,
    "time": 12,
    "data": {
        "id": "1",
        "userName": "admin",
        "realName": "管理员",
        "departCode": "D01",
        "departName": "研发部",
        "phone": null,
        "email": null,
        "remark": null,
        "roles": [{"id": "r1", "roleName": "超级管理员", "roleDepartCode": null}],
        "menus": [
            {
                "id": "10",
                "pid": "0",
                "permissionCode": "/rbac",
                "permissionName": "权限管理",
                "permissionType": 2,
                "component": "/components/layout/index.vue",
                "visible": true,
                "sort": 2,
                "redirect": "/rbac/user",
                "children": [
                    {
                        "id": "11",
                        "pid": "10",
                        "permissionCode": "/rbac/user",
                        "permissionName": "用户管理",
                        "permissionType": 2,
                        "component": "/views/rbac/user/index.vue",
                        "visible": true,
                        "children": [
                            {
                                "id": "12",
                                "pid": "11",
                                "permissionCode": "rbac:user:add",
                                "permissionName": "新增用户",
                                "permissionType": 3
                            }
                        ]
                    }
                ]
            },
            {
                "id": "20",
                "pid": "0",
                "permissionCode": "/monitor",
                "permissionName": "系统监控",
                "permissionType": 2,
                "component": "/views/monitor/missing.vue",
                "visible": true,
                "sort": 1
            }
        ]
    }
}"#;

const EXPIRED_ENVELOPE: &str = r#"{"code": 101, "success": false, "message": "token expired"}"#;

// =========================================================
// Collaborators
// =========================================================

#[derive(Default)]
struct Backend {
    envelope: RefCell<String>,
    fetches: RefCell<usize>,
    token: RefCell<Option<String>>,
    titles: RefCell<Vec<String>>,
}

struct EnvelopeAuth(Rc<Backend>);

#[async_trait(?Send)]
impl AuthApi for EnvelopeAuth {
    async fn fetch_user_detail(&self) -> RouterResult<LoginUserDetail> {
        *self.0.fetches.borrow_mut() += 1;
        let envelope: ApiResult<LoginUserDetail> =
            serde_json::from_str(&self.0.envelope.borrow())?;
        Ok(envelope.require_data()?)
    }

    async fn logout(&self) -> RouterResult<()> {
        Ok(())
    }
}

struct CookieJar(Rc<Backend>);

impl TokenStore for CookieJar {
    fn get_token(&self) -> Option<String> {
        self.0.token.borrow().clone()
    }

    fn set_token(&self, token: &str) {
        *self.0.token.borrow_mut() = Some(token.to_string());
    }

    fn remove_token(&self) {
        *self.0.token.borrow_mut() = None;
    }
}

struct TitleHooks(Rc<Backend>);

impl NavigationHooks for TitleHooks {
    fn set_title(&self, title: &str) {
        self.0.titles.borrow_mut().push(title.to_string());
    }
}

type Console = Navigator<
    EnvelopeAuth,
    CookieJar,
    Rc<MemoryRouter<&'static str>>,
    TitleHooks,
    &'static str,
>;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn console(backend: &Rc<Backend>, router: Rc<MemoryRouter<&'static str>>) -> Console {
    let config = RouterConfig::from_toml_str(
        r#"
        login_path = "/login"
        home_path = "/home"
        max_redirects = 6
        "#,
    )
    .unwrap();
    let registry = ViewRegistry::builder()
        .feature_views([
            ("/src/views/404/index.vue", "not-found"),
            ("/src/views/home/index.vue", "home"),
            ("/src/views/rbac/user/index.vue", "rbac-user"),
        ])
        .layout_views([
            ("/src/components/login/index.vue", "login"),
            ("/src/components/layout/index.vue", "layout"),
        ])
        .build(&config)
        .unwrap();

    let navigator = Navigator::new(
        RouterContext::new(config, registry),
        EnvelopeAuth(backend.clone()),
        CookieJar(backend.clone()),
        router,
        TitleHooks(backend.clone()),
    );
    navigator.boot();
    navigator
}

fn backend() -> Rc<Backend> {
    let backend = Rc::new(Backend::default());
    *backend.envelope.borrow_mut() = DETAIL_ENVELOPE.to_string();
    backend
}

fn login_detail(backend: &Backend) -> LoginUserDetail {
    let envelope: ApiResult<LoginUserDetail> =
        serde_json::from_str(&backend.envelope.borrow()).unwrap();
    envelope.require_data().unwrap()
}

// =========================================================
// Flows
// =========================================================

#[tokio::test]
async fn test_login_flow_returns_to_original_target() {
    init_tracing();
    let backend = backend();
    let router = Rc::new(MemoryRouter::new());
    let console = console(&backend, router.clone());

    let landed = console
        .navigate(Location::new("/rbac/user"), HistoryMode::Push)
        .await
        .unwrap();
    assert_eq!(landed.location.href(), "/login?redirect=/rbac/user");

    let detail = login_detail(&backend);
    let nav = console
        .complete_login(detail, Some("token-abc"), &landed.location)
        .await
        .unwrap();

    assert_eq!(nav.location, Location::new("/rbac/user"));
    assert_eq!(router.current_view(), Some("rbac-user"));
    assert_eq!(*backend.fetches.borrow(), 0);
    assert_eq!(
        *backend.titles.borrow(),
        vec!["登录".to_string(), "用户管理".to_string()]
    );

    let session = console.session().borrow();
    assert_eq!(session.profile().real_name, "管理员");
    assert!(session.has_permission("rbac:user:add"));
    assert!(!session.has_permission("rbac:user:delete"));

    let menu = build_menu(session.permissions(), 32);
    let top: Vec<_> = menu.iter().map(|item| item.path.as_str()).collect();
    // login 隐藏；静态布局与 /monitor 同为 sort 1，保持原顺序
    assert_eq!(top, ["/", "/monitor", "/rbac"]);
    assert_eq!(menu[2].children.len(), 1);
    assert!(menu[2].children[0].children.is_empty());
}

#[tokio::test]
async fn test_reload_rebuilds_session_and_replays() {
    init_tracing();
    let backend = backend();
    *backend.token.borrow_mut() = Some("token-abc".into());
    let router = Rc::new(MemoryRouter::new());
    let console = console(&backend, router.clone());

    let nav = console
        .navigate(Location::parse("/rbac/user?page=2"), HistoryMode::Push)
        .await
        .unwrap();

    assert_eq!(nav.location.path, "/rbac/user");
    assert_eq!(nav.location.query("page"), Some("2"));
    assert_eq!(nav.mode, HistoryMode::Replace);
    assert_eq!(*backend.fetches.borrow(), 1);
    assert_eq!(router.current_view(), Some("rbac-user"));

    // 路由声明的重定向：/rbac -> /rbac/user
    let nav = console
        .navigate(Location::new("/rbac"), HistoryMode::Push)
        .await
        .unwrap();
    assert_eq!(nav.location, Location::new("/rbac/user"));

    // 组件缺失的节点降级为 404 视图，但路由依然存在
    console
        .navigate(Location::new("/monitor"), HistoryMode::Push)
        .await
        .unwrap();
    assert_eq!(router.current_view(), Some("not-found"));
    let matched = router.resolve("/monitor").unwrap();
    assert!(!matched.fallback);

    assert_eq!(*backend.fetches.borrow(), 1);
}

#[tokio::test]
async fn test_expired_token_on_reload_goes_to_login() {
    init_tracing();
    let backend = backend();
    *backend.token.borrow_mut() = Some("stale".into());
    *backend.envelope.borrow_mut() = EXPIRED_ENVELOPE.to_string();
    let router = Rc::new(MemoryRouter::new());
    let console = console(&backend, router.clone());

    let nav = console
        .navigate(Location::new("/rbac/user"), HistoryMode::Push)
        .await
        .unwrap();

    assert_eq!(nav.location.href(), "/login?redirect=/rbac/user");
    assert!(backend.token.borrow().is_none());
    assert_eq!(router.current_view(), Some("login"));
}

#[tokio::test]
async fn test_relogin_code_triggers_session_expiry() {
    init_tracing();
    let backend = backend();
    let router = Rc::new(MemoryRouter::new());
    let console = console(&backend, router.clone());

    let detail = login_detail(&backend);
    console
        .complete_login(detail, Some("token-abc"), &Location::new("/login"))
        .await
        .unwrap();
    assert_eq!(router.current(), Some(Location::new("/home")));

    let envelope: ApiResult<LoginUserDetail> = serde_json::from_str(EXPIRED_ENVELOPE).unwrap();
    let err = RouterError::from(envelope.require_data().unwrap_err());
    assert!(err.requires_relogin());

    let nav = console.expire_session().await.unwrap();
    assert_eq!(nav.location.href(), "/login?redirect=/home");
    assert_eq!(nav.mode, HistoryMode::Replace);
    assert!(backend.token.borrow().is_none());
}
