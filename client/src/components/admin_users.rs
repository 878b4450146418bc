//! Admin console: user search, activation, and role management.

#[cfg(test)]
#[path = "admin_users_test.rs"]
mod admin_users_test;

use leptos::prelude::*;

use crate::components::alert::Alert;
use crate::net::types::{Role, User};
use crate::state::remote::{Remote, load_into, spawn_api};

/// `""` means all roles.
#[must_use]
pub fn parse_role_filter(raw: &str) -> Option<Role> {
    match raw {
        "member" => Some(Role::Member),
        "admin" => Some(Role::Admin),
        _ => None,
    }
}

/// Role a promote/demote toggle switches to.
#[must_use]
pub fn toggled_role(role: Role) -> Role {
    match role {
        Role::Member => Role::Admin,
        Role::Admin => Role::Member,
    }
}

/// Replace the row with the same id.
pub fn replace_user(users: &mut [User], updated: User) {
    if let Some(slot) = users.iter_mut().find(|u| u.id == updated.id) {
        *slot = updated;
    }
}

#[component]
pub fn AdminUsers() -> impl IntoView {
    let users = RwSignal::new(Remote::<Vec<User>>::Loading);
    let search = RwSignal::new(String::new());
    let role_filter = RwSignal::new(String::new());
    let action_error = RwSignal::new(None::<String>);
    let busy_id = RwSignal::new(None::<String>);

    let reload = move || {
        let term = search.get_untracked();
        let role = parse_role_filter(&role_filter.get_untracked());
        load_into(users, move |api| async move { api.admin_users(&term, role).await });
    };
    reload();

    let apply_update = move |result: Result<User, crate::net::error::ApiError>| {
        match result {
            Ok(user) => users.update(|u| u.update_ready(|list| replace_user(list, user))),
            Err(e) => action_error.set(Some(e.to_string())),
        }
        busy_id.set(None);
    };

    let toggle_active = move |user: User| {
        busy_id.set(Some(user.id.clone()));
        action_error.set(None);
        spawn_api(move |api| async move {
            apply_update(api.set_user_active(&user.id, !user.is_active).await);
        });
    };

    let toggle_role = move |user: User| {
        busy_id.set(Some(user.id.clone()));
        action_error.set(None);
        spawn_api(move |api| async move {
            apply_update(api.set_user_role(&user.id, toggled_role(user.role)).await);
        });
    };

    view! {
        <section class="admin-users">
            <form
                class="admin-toolbar"
                on:submit=move |ev: leptos::ev::SubmitEvent| {
                    ev.prevent_default();
                    reload();
                }
            >
                <input
                    class="form-field__input"
                    type="search"
                    placeholder="Search name, email, or phone"
                    prop:value=move || search.get()
                    on:input=move |ev| search.set(event_target_value(&ev))
                />
                <select
                    class="form-field__input"
                    on:change=move |ev| {
                        role_filter.set(event_target_value(&ev));
                        reload();
                    }
                >
                    <option value="">"All roles"</option>
                    <option value="member">"Members"</option>
                    <option value="admin">"Admins"</option>
                </select>
                <button class="btn" type="submit">
                    "Search"
                </button>
            </form>
            {move || action_error.get().map(|msg| view! { <Alert message=msg/> })}
            {move || match users.get() {
                Remote::Loading => view! { <p>"Loading users..."</p> }.into_any(),
                Remote::Failed(msg) => {
                    view! { <Alert message=msg on_retry=Callback::new(move |()| reload())/> }.into_any()
                }
                Remote::Ready(list) if list.is_empty() => {
                    view! { <p class="panel__empty">"No users match."</p> }.into_any()
                }
                Remote::Ready(list) => {
                    view! {
                        <table class="table">
                            <thead>
                                <tr>
                                    <th>"Name"</th>
                                    <th>"Email"</th>
                                    <th>"Phone"</th>
                                    <th>"Role"</th>
                                    <th>"Status"</th>
                                    <th></th>
                                </tr>
                            </thead>
                            <tbody>
                                {list
                                    .into_iter()
                                    .map(|user| {
                                        let id = user.id.clone();
                                        let busy = move || busy_id.get().as_deref() == Some(id.as_str());
                                        let active_user = user.clone();
                                        let role_user = user.clone();
                                        view! {
                                            <tr class:table__row--muted=!user.is_active>
                                                <td>{user.full_name()}</td>
                                                <td>{user.email.clone()}</td>
                                                <td>{user.phone_number.clone()}</td>
                                                <td>{user.role.as_str()}</td>
                                                <td>{if user.is_active { "Active" } else { "Inactive" }}</td>
                                                <td class="table__actions">
                                                    <button
                                                        class="btn"
                                                        disabled=busy.clone()
                                                        on:click=move |_| toggle_active(active_user.clone())
                                                    >
                                                        {if user.is_active { "Deactivate" } else { "Activate" }}
                                                    </button>
                                                    <button
                                                        class="btn"
                                                        disabled=busy
                                                        on:click=move |_| toggle_role(role_user.clone())
                                                    >
                                                        {if user.role == Role::Admin { "Demote" } else { "Promote" }}
                                                    </button>
                                                </td>
                                            </tr>
                                        }
                                    })
                                    .collect::<Vec<_>>()}
                            </tbody>
                        </table>
                    }
                        .into_any()
                }
            }}
        </section>
    }
}
