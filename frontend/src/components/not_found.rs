use crate::auth::use_shell;
use console_router::HistoryMode;
use leptos::prelude::*;

#[component]
pub fn NotFoundPage() -> impl IntoView {
    let shell = use_shell();
    let home = shell.navigator().context().config().home_path.clone();

    view! {
        <div class="flex items-center justify-center min-h-screen bg-base-200">
            <div class="text-center">
                <h1 class="text-6xl font-bold text-error">"404"</h1>
                <p class="text-xl mt-4">"页面未找到"</p>
                <button
                    class="btn btn-primary mt-6"
                    on:click=move |_| shell.navigate(&home, HistoryMode::Push)
                >
                    "返回首页"
                </button>
            </div>
        </div>
    }
}
