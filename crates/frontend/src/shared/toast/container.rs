use leptos::prelude::*;

use super::{Toast, Toaster};

/// Fixed-position stack of the toasts currently held by the `Toaster`
#[component]
pub fn ToastContainer() -> impl IntoView {
    let toaster = super::use_toaster();

    view! {
        <div class="toast-container" aria-live="polite">
            <For
                each=move || toaster.toasts()
                key=|toast| toast.id
                children=move |toast: Toast| view! { <ToastItem toast=toast toaster=toaster /> }
            />
        </div>
    }
}

#[component]
fn ToastItem(toast: Toast, toaster: Toaster) -> impl IntoView {
    let id = toast.id;
    let class = format!("toast {}", toast.kind.css_class());
    let time = toast.created_at.format("%H:%M:%S").to_string();

    view! {
        <div class=class role="status">
            <div class="toast__header">
                <strong>{toast.title}</strong>
                <small>{time}</small>
                <button
                    type="button"
                    class="btn-close"
                    aria-label="Close"
                    on:click=move |_| toaster.dismiss(id)
                >
                    "×"
                </button>
            </div>
            <div class="toast__body">{toast.message}</div>
        </div>
    }
}
