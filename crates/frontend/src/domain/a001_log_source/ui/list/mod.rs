use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::{Button, ButtonAppearance, Spinner};

use crate::domain::a001_log_source::api;
use crate::domain::a001_log_source::ui::add_dialog::AddSourceDialog;
use crate::layout::AppGlobalContext;
use crate::shared::toast::use_toaster;
use crate::system::auth::context::do_logout;
use crate::system::auth::use_auth;

/// Known sources plus the entry point to register a new one
#[component]
pub fn SourcesPage() -> impl IntoView {
    let app = use_context::<AppGlobalContext>().expect("AppGlobalContext context not found");
    let toaster = use_toaster();
    let (auth_state, set_auth_state) = use_auth();
    let show_add = RwSignal::new(false);

    if !app.sources_loaded.get_untracked() {
        spawn_local(async move {
            match api::fetch_sources().await {
                Ok(items) => app.set_sources(items),
                Err(e) => {
                    log::warn!("{}", e);
                    toaster.error(e, "Loading sources failed");
                }
            }
        });
    }

    let session = Memo::new(move |_| auth_state.with(|state| state.session()));
    let username = move || {
        auth_state.with(|state| {
            state
                .user_info
                .as_ref()
                .map(|user| user.username.clone())
                .unwrap_or_default()
        })
    };

    view! {
        <div class="page sources-page">
            <div class="page-header">
                <h2>"Log Sources"</h2>
                <div class="page-header__actions">
                    <span class="page-header__user">{username}</span>
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=move |_| show_add.set(true)
                    >
                        "Add Log Source"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| spawn_local(do_logout(set_auth_state, app))
                    >
                        "Sign out"
                    </Button>
                </div>
            </div>

            <Show
                when=move || app.sources_loaded.get()
                fallback=|| view! { <Spinner /> }
            >
                <table class="table">
                    <thead>
                        <tr>
                            <th>"ID"</th>
                            <th>"Name"</th>
                            <th>"Owner"</th>
                        </tr>
                    </thead>
                    <tbody>
                        <For
                            each=move || app.sources.get()
                            key=|source| source.id.clone()
                            children=move |source| {
                                view! {
                                    <tr>
                                        <td>{source.id.to_string()}</td>
                                        <td>{source.name}</td>
                                        <td>{source.owner.to_string()}</td>
                                    </tr>
                                }
                            }
                        />
                    </tbody>
                </table>
            </Show>

            {move || {
                session
                    .get()
                    .map(|session| {
                        view! {
                            <AddSourceDialog
                                show=show_add
                                on_hide=Callback::new(move |_| show_add.set(false))
                                session=session
                            />
                        }
                    })
            }}
        </div>
    }
}
