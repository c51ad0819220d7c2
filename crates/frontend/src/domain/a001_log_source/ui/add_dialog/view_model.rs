use leptos::html;
use leptos::prelude::*;
use leptos::task::spawn_local;

use contracts::domain::a001_log_source::Source;

use super::state::{apply_outcome, AddSourceState, SubmitEffects, SubmitOutcome, SubmitRejected};
use crate::domain::a001_log_source::api;
use crate::domain::a001_log_source::errors::ErrorEntry;
use crate::layout::AppGlobalContext;
use crate::shared::toast::{use_toaster, Toaster};
use crate::system::auth::Session;

/// ViewModel for the "add source" dialog.
///
/// Created once per dialog instance, so every opening starts from an empty
/// draft without errors.
#[derive(Clone, Copy)]
pub struct AddSourceViewModel {
    pub state: RwSignal<AddSourceState>,
    /// Alert container that receives focus after a failed submission
    pub error_region: NodeRef<html::Div>,
    app: AppGlobalContext,
    toaster: Toaster,
}

impl AddSourceViewModel {
    pub fn new() -> Self {
        let app = use_context::<AppGlobalContext>().expect("AppGlobalContext context not found");
        Self {
            state: RwSignal::new(AddSourceState::new()),
            error_region: NodeRef::new(),
            app,
            toaster: use_toaster(),
        }
    }

    pub fn name(&self) -> String {
        self.state.with(|s| s.draft.name.clone())
    }

    pub fn is_submitting(&self) -> bool {
        self.state.with(|s| s.is_submitting())
    }

    pub fn field_error(&self) -> Option<&'static str> {
        self.state.with(|s| s.field_error())
    }

    pub fn error_entries(&self) -> Option<Vec<ErrorEntry>> {
        self.state
            .with(|s| s.error_payload().map(|payload| payload.display_entries()))
    }

    pub fn set_name(&self, value: String) {
        self.state.update(|s| s.set_name(value));
    }

    pub fn touch(&self) {
        self.state.update(|s| s.touch());
    }

    pub fn dismiss_error(&self) {
        self.state.update(|s| s.dismiss_error());
    }

    pub fn cancel_command(&self, on_hide: Callback<()>) {
        self.state.update(|s| s.cancel());
        on_hide.run(());
    }

    /// Validate, send the create request and apply its outcome
    pub fn submit_command(&self, session: Session, on_hide: Callback<()>) {
        let dto = match self.state.try_update(|s| s.begin_submit(&session)) {
            Some(Ok(dto)) => dto,
            Some(Err(SubmitRejected::Invalid(errors))) => {
                log::debug!("Source form invalid: {:?}", errors);
                return;
            }
            Some(Err(rejected)) => {
                log::debug!("Submit ignored: {:?}", rejected);
                return;
            }
            None => return,
        };

        log::debug!("Creating source '{}' for user {}", dto.name, dto.user);
        let this = *self;
        spawn_local(async move {
            let outcome = SubmitOutcome::from(api::create_source(&dto).await);
            // The dialog may already be gone if the user closed it meanwhile
            let _ = this.state.try_update(|s| s.resolve(&outcome));

            if let SubmitOutcome::Err(error) = &outcome {
                log::warn!("Adding source '{}' failed: {}", dto.name, error);
            }
            apply_outcome(outcome, &this.effects(on_hide));
        });
    }

    fn effects(&self, on_hide: Callback<()>) -> DialogEffects {
        DialogEffects {
            app: self.app,
            toaster: self.toaster,
            on_hide,
            error_region: self.error_region,
        }
    }
}

/// Collaborators touched once a submission resolves
struct DialogEffects {
    app: AppGlobalContext,
    toaster: Toaster,
    on_hide: Callback<()>,
    error_region: NodeRef<html::Div>,
}

impl SubmitEffects for DialogEffects {
    fn register_source(&self, source: Source) {
        self.app.register_source(source);
    }

    fn notify_success(&self, message: String, title: &str, lifetime_ms: u32) {
        self.toaster.success(message, title, lifetime_ms);
    }

    fn hide(&self) {
        self.on_hide.run(());
    }

    fn focus_errors(&self) {
        if let Some(Some(region)) = self.error_region.try_get_untracked() {
            let _ = region.focus();
        }
    }
}
