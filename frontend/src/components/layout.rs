use crate::auth::{logout, use_shell};
use crate::web::{RouterView, use_router_state};
use console_router::HistoryMode;
use console_router::menu::{MenuItem, build_menu};
use leptos::prelude::*;

/// 布局外壳：侧边菜单 + 顶栏 + 子路由出口
#[component]
pub fn LayoutPage() -> impl IntoView {
    let shell = use_shell();
    let navigator = shell.navigator();

    // 会话在进入布局前已经建立，布局每次挂载时读取一次即可
    let (menu, real_name) = {
        let session = navigator.session().borrow();
        let max_depth = navigator.context().config().max_depth;
        (
            build_menu(session.permissions(), max_depth),
            session.profile().real_name.clone(),
        )
    };

    view! {
        <div class="drawer lg:drawer-open">
            <input id="nav-drawer" type="checkbox" class="drawer-toggle" />
            <div class="drawer-content flex flex-col">
                <div class="navbar bg-base-100 shadow-sm">
                    <div class="flex-1 px-2 font-bold">"管理控制台"</div>
                    <div class="flex-none gap-2">
                        <span class="text-sm">{real_name}</span>
                        <button class="btn btn-ghost btn-sm" on:click=move |_| logout(shell)>
                            "退出"
                        </button>
                    </div>
                </div>
                <main class="p-6">
                    <RouterView depth=1 />
                </main>
            </div>
            <div class="drawer-side">
                <label for="nav-drawer" class="drawer-overlay"></label>
                <ul class="menu bg-base-200 min-h-full w-64 p-4">
                    {menu.into_iter().map(menu_entry).collect_view()}
                </ul>
            </div>
        </div>
    }
}

fn menu_entry(item: MenuItem) -> AnyView {
    if item.children.is_empty() {
        return view! { <li><MenuLink path=item.path title=item.title /></li> }.into_any();
    }

    view! {
        <li>
            <details open>
                <summary>{item.title}</summary>
                <ul>{item.children.into_iter().map(menu_entry).collect_view()}</ul>
            </details>
        </li>
    }
    .into_any()
}

#[component]
fn MenuLink(path: String, title: String) -> impl IntoView {
    let shell = use_shell();
    let location = use_router_state().location();
    let href = path.clone();
    let on_click = move |ev: leptos::ev::MouseEvent| {
        ev.prevent_default();
        shell.navigate(&path, HistoryMode::Push);
    };
    let active = {
        let href = href.clone();
        move || location.with(|loc| loc.path == href)
    };

    view! {
        <a href=href class=("menu-active", active) on:click=on_click>
            {title}
        </a>
    }
}
