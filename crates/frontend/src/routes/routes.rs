use crate::domain::a001_log_source::ui::list::SourcesPage;
use crate::system::auth::use_auth;
use crate::system::pages::login::LoginPage;
use leptos::prelude::*;
use thaw::Spinner;

#[component]
pub fn AppRoutes() -> impl IntoView {
    let (auth_state, _) = use_auth();

    view! {
        <Show
            when=move || !auth_state.with(|state| state.restoring)
            fallback=|| view! { <div class="app-loading"><Spinner /></div> }
        >
            <Show
                when=move || auth_state.with(|state| state.session().is_some())
                fallback=|| view! { <LoginPage /> }
            >
                <SourcesPage />
            </Show>
        </Show>
    }
}
