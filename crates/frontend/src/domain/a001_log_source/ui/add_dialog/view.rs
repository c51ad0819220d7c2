use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use thaw::{MessageBar, MessageBarIntent, Spinner, SpinnerSize};

use super::view_model::AddSourceViewModel;
use crate::shared::modal_frame::ModalFrame;
use crate::system::auth::Session;

/// Dialog host entry point: mounts a fresh form each time `show` turns true.
#[component]
pub fn AddSourceDialog(
    #[prop(into)] show: Signal<bool>,
    /// Called on cancel and after a successful submission
    on_hide: Callback<()>,
    session: Session,
) -> impl IntoView {
    let session = StoredValue::new(session);

    view! {
        <Show when=move || show.get()>
            <AddSourceForm session=session.get_value() on_hide=on_hide />
        </Show>
    }
}

#[component]
fn AddSourceForm(session: Session, on_hide: Callback<()>) -> impl IntoView {
    let vm = AddSourceViewModel::new();
    let session = StoredValue::new(session);

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        vm.submit_command(session.get_value(), on_hide);
    };

    let input_class = move || {
        if vm.field_error().is_some() {
            "form-control is-invalid"
        } else {
            "form-control"
        }
    };

    view! {
        <ModalFrame
            title="Add Log Source"
            on_close=Callback::new(move |_| vm.cancel_command(on_hide))
            modal_class="add-source-dialog"
        >
            <div class="error-region" node_ref=vm.error_region tabindex="-1">
                {move || {
                    vm.error_entries()
                        .map(|entries| {
                            view! {
                                <div class="errmsg" role="alert" aria-live="assertive">
                                    <MessageBar intent=MessageBarIntent::Error>
                                        <ul class="errmsg__list">
                                            {entries
                                                .into_iter()
                                                .map(|entry| {
                                                    view! { <li data-field=entry.field>{entry.message}</li> }
                                                })
                                                .collect_view()}
                                        </ul>
                                        <button
                                            type="button"
                                            class="btn-close"
                                            aria-label="Dismiss"
                                            on:click=move |_| vm.dismiss_error()
                                        >
                                            "×"
                                        </button>
                                    </MessageBar>
                                </div>
                            }
                        })
                }}
            </div>

            <form novalidate on:submit=on_submit>
                <div class="form-group">
                    <label for="name">
                        "Source name" <span class="text-danger">"*"</span>
                    </label>
                    <input
                        type="text"
                        id="name"
                        name="name"
                        placeholder="Source name"
                        class=input_class
                        aria-invalid=move || vm.field_error().is_some().to_string()
                        aria-describedby="name-message"
                        prop:value=move || vm.name()
                        on:input=move |ev| vm.set_name(event_target_value(&ev))
                        on:blur=move |_| vm.touch()
                        disabled=move || vm.is_submitting()
                    />
                    <div id="name-message" class="invalid-feedback">
                        {move || vm.field_error()}
                    </div>
                </div>

                <div class="form-actions">
                    <button
                        type="submit"
                        name="Add"
                        class="btn btn-primary w-100"
                        disabled=move || vm.is_submitting()
                    >
                        "ADD"
                        <Show when=move || vm.is_submitting()>
                            <span class="btn-spinner" role="status">
                                <Spinner size=SpinnerSize::Tiny />
                                <span class="visually-hidden">"Loading..."</span>
                            </span>
                        </Show>
                    </button>
                </div>
            </form>
        </ModalFrame>
    }
}
