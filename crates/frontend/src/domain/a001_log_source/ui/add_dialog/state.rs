//! State machine of the "add source" dialog
//!
//! `Editing -> Submitting -> Failed | Closed(Created)`; `Failed` accepts edits
//! and resubmission. Every dialog instance starts in `Editing` with an empty
//! draft.

use contracts::domain::a001_log_source::{CreateSourceDto, Source, SourceDraft};
use contracts::shared::metadata::FieldErrors;

use crate::domain::a001_log_source::errors::{CreateSourceError, ErrorPayload};
use crate::system::auth::Session;

pub const SUCCESS_TOAST_TITLE: &str = "Successfully Added";
pub const SUCCESS_TOAST_LIFETIME_MS: u32 = 4000;

pub fn success_message(source: &Source) -> String {
    format!("Source '{}'is added successfully.", source.name)
}

/// Side effects of a resolved submission
pub trait SubmitEffects {
    fn register_source(&self, source: Source);
    fn notify_success(&self, message: String, title: &str, lifetime_ms: u32);
    /// Close the dialog through its host
    fn hide(&self);
    /// Move focus to the error alert
    fn focus_errors(&self);
}

/// Success: store, toast, then close. Failure: focus the alert.
pub fn apply_outcome(outcome: SubmitOutcome, effects: &impl SubmitEffects) {
    match outcome {
        SubmitOutcome::Ok(source) => {
            let message = success_message(&source);
            effects.register_source(source);
            effects.notify_success(message, SUCCESS_TOAST_TITLE, SUCCESS_TOAST_LIFETIME_MS);
            effects.hide();
        }
        SubmitOutcome::Err(_) => effects.focus_errors(),
        SubmitOutcome::Pending => {}
    }
}

/// Result of the create-source call as seen by the dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Pending,
    Ok(Source),
    Err(CreateSourceError),
}

impl From<Result<Source, CreateSourceError>> for SubmitOutcome {
    fn from(result: Result<Source, CreateSourceError>) -> Self {
        match result {
            Ok(source) => SubmitOutcome::Ok(source),
            Err(e) => SubmitOutcome::Err(e),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CloseReason {
    Cancelled,
    Created(Source),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogState {
    Editing,
    Submitting,
    Failed(ErrorPayload),
    Closed(CloseReason),
}

/// Why a submit did not produce a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitRejected {
    /// A request is already in flight
    Busy,
    Closed,
    Invalid(FieldErrors),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddSourceState {
    pub draft: SourceDraft,
    /// The field was edited, blurred or submitted; validation feedback is shown
    pub touched: bool,
    pub dialog: DialogState,
}

impl Default for AddSourceState {
    fn default() -> Self {
        Self::new()
    }
}

impl AddSourceState {
    pub fn new() -> Self {
        Self {
            draft: SourceDraft::default(),
            touched: false,
            dialog: DialogState::Editing,
        }
    }

    pub fn accepts_input(&self) -> bool {
        matches!(self.dialog, DialogState::Editing | DialogState::Failed(_))
    }

    pub fn is_submitting(&self) -> bool {
        self.dialog == DialogState::Submitting
    }

    pub fn is_open(&self) -> bool {
        !matches!(self.dialog, DialogState::Closed(_))
    }

    pub fn set_name(&mut self, name: String) {
        if self.accepts_input() {
            self.draft.name = name;
            self.touched = true;
        }
    }

    pub fn touch(&mut self) {
        self.touched = true;
    }

    /// Inline message for the name field
    pub fn field_error(&self) -> Option<&'static str> {
        if self.touched {
            self.draft.name_error()
        } else {
            None
        }
    }

    pub fn error_payload(&self) -> Option<&ErrorPayload> {
        match &self.dialog {
            DialogState::Failed(payload) => Some(payload),
            _ => None,
        }
    }

    /// Hide the server error alert
    pub fn dismiss_error(&mut self) {
        if matches!(self.dialog, DialogState::Failed(_)) {
            self.dialog = DialogState::Editing;
        }
    }

    /// Validate and enter `Submitting`.
    ///
    /// On `Ok` the caller must issue exactly one create request with the
    /// returned body and feed the result to [`Self::resolve`].
    pub fn begin_submit(&mut self, session: &Session) -> Result<CreateSourceDto, SubmitRejected> {
        match self.dialog {
            DialogState::Submitting => return Err(SubmitRejected::Busy),
            DialogState::Closed(_) => return Err(SubmitRejected::Closed),
            DialogState::Editing | DialogState::Failed(_) => {}
        }

        self.touched = true;
        self.draft.validate().map_err(SubmitRejected::Invalid)?;

        self.dialog = DialogState::Submitting;
        Ok(self.draft.to_create_dto(session.user_id.clone()))
    }

    /// Apply the outcome of the in-flight request.
    ///
    /// Outcomes arriving after the dialog was cancelled leave it closed.
    pub fn resolve(&mut self, outcome: &SubmitOutcome) {
        if !self.is_submitting() {
            return;
        }

        match outcome {
            SubmitOutcome::Pending => {}
            SubmitOutcome::Ok(source) => {
                self.dialog = DialogState::Closed(CloseReason::Created(source.clone()));
            }
            SubmitOutcome::Err(error) => {
                self.dialog = DialogState::Failed(ErrorPayload::from(error));
            }
        }
    }

    /// Close without creating anything
    pub fn cancel(&mut self) {
        if self.is_open() {
            self.dialog = DialogState::Closed(CloseReason::Cancelled);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::common::RecordId;
    use std::cell::RefCell;

    #[derive(Default)]
    struct Recorder {
        calls: RefCell<Vec<String>>,
    }

    impl SubmitEffects for Recorder {
        fn register_source(&self, source: Source) {
            self.calls.borrow_mut().push(format!("register {}", source.name));
        }

        fn notify_success(&self, message: String, title: &str, lifetime_ms: u32) {
            self.calls
                .borrow_mut()
                .push(format!("toast {} | {} | {}", message, title, lifetime_ms));
        }

        fn hide(&self) {
            self.calls.borrow_mut().push("hide".to_string());
        }

        fn focus_errors(&self) {
            self.calls.borrow_mut().push("focus".to_string());
        }
    }

    fn session() -> Session {
        Session {
            user_id: RecordId::Int(42),
        }
    }

    fn nginx() -> Source {
        Source {
            id: RecordId::Int(1),
            name: "Nginx".to_string(),
            owner: RecordId::Int(42),
        }
    }

    fn with_name(name: &str) -> AddSourceState {
        let mut state = AddSourceState::new();
        state.set_name(name.to_string());
        state
    }

    #[test]
    fn test_fresh_state_is_empty_and_quiet() {
        let state = AddSourceState::new();
        assert_eq!(state.draft.name, "");
        assert_eq!(state.dialog, DialogState::Editing);
        assert_eq!(state.field_error(), None);
        assert_eq!(state.error_payload(), None);
        assert!(state.accepts_input());
    }

    #[test]
    fn test_invalid_names_never_produce_a_request() {
        let long = "x".repeat(51);
        for (name, prefix) in [
            ("", "Source name is required"),
            ("a", "Too Short!"),
            (long.as_str(), "Too Long!"),
        ] {
            let mut state = AddSourceState::new();
            state.draft.name = name.to_string();
            let rejected = state.begin_submit(&session()).unwrap_err();
            match rejected {
                SubmitRejected::Invalid(errors) => assert!(errors["name"].starts_with(prefix)),
                other => panic!("unexpected rejection {:?}", other),
            }
            assert_eq!(state.dialog, DialogState::Editing);
            assert!(state.field_error().unwrap().starts_with(prefix));
        }
    }

    #[test]
    fn test_valid_name_produces_one_request() {
        let longest = "x".repeat(50);
        for name in ["ab", "Nginx", longest.as_str()] {
            let mut state = with_name(name);
            let dto = state.begin_submit(&session()).unwrap();
            assert_eq!(dto.name, name);
            assert_eq!(dto.user, RecordId::Int(42));
            assert!(state.is_submitting());
            assert_eq!(state.begin_submit(&session()), Err(SubmitRejected::Busy));
        }
    }

    #[test]
    fn test_input_locked_while_submitting() {
        let mut state = with_name("Nginx");
        state.begin_submit(&session()).unwrap();
        assert!(!state.accepts_input());
        state.set_name("Other".to_string());
        assert_eq!(state.draft.name, "Nginx");
    }

    #[test]
    fn test_success_closes_with_created_source() {
        let mut state = with_name("Nginx");
        state.begin_submit(&session()).unwrap();
        state.resolve(&SubmitOutcome::Pending);
        assert!(state.is_submitting());

        state.resolve(&SubmitOutcome::Ok(nginx()));
        assert_eq!(state.dialog, DialogState::Closed(CloseReason::Created(nginx())));
        assert!(!state.is_submitting());
        assert!(!state.is_open());
        assert_eq!(state.error_payload(), None);
    }

    #[test]
    fn test_success_message() {
        assert_eq!(
            success_message(&nginx()),
            "Source 'Nginx'is added successfully."
        );
        assert_eq!(SUCCESS_TOAST_LIFETIME_MS, 4000);
    }

    #[test]
    fn test_failure_keeps_draft_and_allows_retry() {
        let mut state = with_name("Nginx");
        state.begin_submit(&session()).unwrap();
        state.resolve(&SubmitOutcome::Err(CreateSourceError::Transport));

        assert!(state.is_open());
        assert!(state.accepts_input());
        assert_eq!(state.draft.name, "Nginx");
        let payload = state.error_payload().unwrap();
        assert_eq!(payload.entries()[0].message, "No Server Response");

        // New attempt clears the previous payload
        state.begin_submit(&session()).unwrap();
        assert_eq!(state.error_payload(), None);
    }

    #[test]
    fn test_dismiss_error_returns_to_editing() {
        let mut state = with_name("Nginx");
        state.begin_submit(&session()).unwrap();
        state.resolve(&SubmitOutcome::Err(CreateSourceError::NotFound));
        state.dismiss_error();
        assert_eq!(state.dialog, DialogState::Editing);
    }

    #[test]
    fn test_late_outcome_after_cancel_stays_closed() {
        let mut state = with_name("Nginx");
        state.begin_submit(&session()).unwrap();
        state.cancel();
        state.resolve(&SubmitOutcome::Err(CreateSourceError::Server { status: 500 }));
        assert_eq!(state.dialog, DialogState::Closed(CloseReason::Cancelled));
        assert_eq!(state.begin_submit(&session()), Err(SubmitRejected::Closed));
    }

    #[test]
    fn test_outcome_from_result() {
        assert_eq!(SubmitOutcome::from(Ok(nginx())), SubmitOutcome::Ok(nginx()));
        assert_eq!(
            SubmitOutcome::from(Err(CreateSourceError::NotFound)),
            SubmitOutcome::Err(CreateSourceError::NotFound)
        );
    }

    #[test]
    fn test_success_registers_then_notifies_then_hides() {
        let recorder = Recorder::default();
        apply_outcome(SubmitOutcome::Ok(nginx()), &recorder);
        assert_eq!(
            recorder.calls.into_inner(),
            vec![
                "register Nginx".to_string(),
                "toast Source 'Nginx'is added successfully. | Successfully Added | 4000".to_string(),
                "hide".to_string(),
            ]
        );
    }

    #[test]
    fn test_failure_only_focuses_errors() {
        let recorder = Recorder::default();
        apply_outcome(
            SubmitOutcome::Err(CreateSourceError::Server { status: 500 }),
            &recorder,
        );
        assert_eq!(recorder.calls.into_inner(), vec!["focus".to_string()]);

        let recorder = Recorder::default();
        apply_outcome(SubmitOutcome::Pending, &recorder);
        assert!(recorder.calls.into_inner().is_empty());
    }
}
