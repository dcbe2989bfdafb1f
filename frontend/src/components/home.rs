use crate::auth::use_shell;
use leptos::prelude::*;

#[component]
pub fn HomePage() -> impl IntoView {
    let navigator = use_shell().navigator();
    let profile = navigator.session().borrow().profile().clone();

    let roles = profile
        .roles
        .iter()
        .map(|role| role.role_name.clone())
        .collect::<Vec<_>>()
        .join("、");

    view! {
        <div class="card bg-base-100 shadow">
            <div class="card-body">
                <h2 class="card-title">"欢迎，" {profile.real_name}</h2>
                <p>"账号：" {profile.user_name}</p>
                <p>"部门：" {profile.depart_name}</p>
                <p>"角色：" {roles}</p>
            </div>
        </div>
    }
}
