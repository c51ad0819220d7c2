use contracts::domain::common::RecordId;
use contracts::system::auth::UserInfo;
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::{api, storage};
use crate::layout::AppGlobalContext;

#[derive(Clone, Debug, Default)]
pub struct AuthState {
    pub access_token: Option<String>,
    pub user_info: Option<UserInfo>,
    /// A stored session is being validated against the backend
    pub restoring: bool,
}

/// Identity of the signed-in user, handed explicitly to workflows that act on
/// their behalf.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    pub user_id: RecordId,
}

impl AuthState {
    pub fn session(&self) -> Option<Session> {
        self.access_token.as_ref()?;
        self.user_info.as_ref().map(|user| Session {
            user_id: user.id.clone(),
        })
    }
}

/// Auth context provider component
#[component]
pub fn AuthProvider(children: ChildrenFn) -> impl IntoView {
    let stored_token = storage::get_access_token();
    let (auth_state, set_auth_state) = signal(AuthState {
        restoring: stored_token.is_some(),
        ..AuthState::default()
    });

    if let Some(access_token) = stored_token {
        spawn_local(async move {
            let restored = restore_session(access_token).await;
            if restored.is_none() {
                storage::clear_tokens();
            }
            set_auth_state.set(restored.unwrap_or_default());
        });
    }

    provide_context(auth_state);
    provide_context(set_auth_state);

    children()
}

/// Validate a stored token, refreshing it once if the backend rejects it
async fn restore_session(access_token: String) -> Option<AuthState> {
    match api::get_current_user(&access_token).await {
        Ok(user_info) => {
            log::debug!("Session restored for {}", user_info.username);
            return Some(AuthState {
                access_token: Some(access_token),
                user_info: Some(user_info),
                restoring: false,
            });
        }
        Err(e) => log::debug!("Stored token rejected: {}", e),
    }

    let refresh_token = storage::get_refresh_token()?;
    let response = match api::refresh_token(refresh_token).await {
        Ok(response) => response,
        Err(e) => {
            log::info!("Session refresh failed: {}", e);
            return None;
        }
    };
    storage::save_access_token(&response.access_token);

    let user_info = api::get_current_user(&response.access_token).await.ok()?;
    Some(AuthState {
        access_token: Some(response.access_token),
        user_info: Some(user_info),
        restoring: false,
    })
}

/// Hook to access auth state
pub fn use_auth() -> (ReadSignal<AuthState>, WriteSignal<AuthState>) {
    let auth_state =
        use_context::<ReadSignal<AuthState>>().expect("AuthProvider not found in component tree");
    let set_auth_state =
        use_context::<WriteSignal<AuthState>>().expect("AuthProvider not found in component tree");

    (auth_state, set_auth_state)
}

/// Sign in, persist the tokens and start a new session with an empty store
pub async fn do_login(
    username: String,
    password: String,
    set_auth_state: WriteSignal<AuthState>,
    app: AppGlobalContext,
) -> Result<(), String> {
    let response = api::login(username, password).await?;

    storage::save_access_token(&response.access_token);
    storage::save_refresh_token(&response.refresh_token);
    log::info!("Signed in as {}", response.user.username);

    app.clear();
    set_auth_state.set(AuthState {
        access_token: Some(response.access_token),
        user_info: Some(response.user),
        restoring: false,
    });

    Ok(())
}

/// Revoke the refresh token, drop the local session and its sources
pub async fn do_logout(set_auth_state: WriteSignal<AuthState>, app: AppGlobalContext) {
    if let Some(refresh_token) = storage::get_refresh_token() {
        if let Err(e) = api::logout(refresh_token).await {
            log::warn!("{}", e);
        }
    }

    storage::clear_tokens();
    set_auth_state.set(AuthState::default());
    app.clear();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: i64) -> UserInfo {
        UserInfo {
            id: RecordId::Int(id),
            username: "admin".to_string(),
            full_name: None,
            email: None,
        }
    }

    #[test]
    fn test_session_requires_token_and_user() {
        let anonymous = AuthState::default();
        assert_eq!(anonymous.session(), None);

        let token_only = AuthState {
            access_token: Some("t".to_string()),
            ..AuthState::default()
        };
        assert_eq!(token_only.session(), None);

        let signed_in = AuthState {
            access_token: Some("t".to_string()),
            user_info: Some(user(9)),
            restoring: false,
        };
        assert_eq!(
            signed_in.session(),
            Some(Session {
                user_id: RecordId::Int(9)
            })
        );
    }
}
