use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::layout::AppGlobalContext;
use crate::system::auth::context::do_login;
use crate::system::auth::use_auth;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    fn is_complete(&self) -> bool {
        !self.username.trim().is_empty() && !self.password.is_empty()
    }
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let app = use_context::<AppGlobalContext>().expect("AppGlobalContext context not found");
    let (_, set_auth_state) = use_auth();

    let credentials = RwSignal::new(Credentials::default());
    let error = RwSignal::new(Option::<String>::None);
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let Credentials { username, password } = credentials.get_untracked();

        busy.set(true);
        error.set(None);
        spawn_local(async move {
            // On success the root view switches to the sources page
            if let Err(e) = do_login(username, password, set_auth_state, app).await {
                log::warn!("{}", e);
                let _ = error.try_set(Some(e));
            }
            let _ = busy.try_set(false);
        });
    };

    view! {
        <div class="login-container">
            <form class="login-box" on:submit=on_submit>
                <h1>"Log Sources"</h1>

                {move || error.get().map(|e| view! { <div class="error-message" role="alert">{e}</div> })}

                <label for="username">"Username"</label>
                <input
                    type="text"
                    id="username"
                    autocomplete="username"
                    prop:value=move || credentials.with(|c| c.username.clone())
                    on:input=move |ev| credentials.update(|c| c.username = event_target_value(&ev))
                    disabled=move || busy.get()
                />

                <label for="password">"Password"</label>
                <input
                    type="password"
                    id="password"
                    autocomplete="current-password"
                    prop:value=move || credentials.with(|c| c.password.clone())
                    on:input=move |ev| credentials.update(|c| c.password = event_target_value(&ev))
                    disabled=move || busy.get()
                />

                <button
                    type="submit"
                    class="btn btn-primary w-100"
                    disabled=move || busy.get() || !credentials.with(Credentials::is_complete)
                >
                    {move || if busy.get() { "Signing in..." } else { "Sign in" }}
                </button>
            </form>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_need_both_fields() {
        let mut credentials = Credentials::default();
        assert!(!credentials.is_complete());
        credentials.username = "admin".to_string();
        assert!(!credentials.is_complete());
        credentials.password = " ".to_string();
        assert!(credentials.is_complete());
        credentials.username = "  ".to_string();
        assert!(!credentials.is_complete());
    }
}
