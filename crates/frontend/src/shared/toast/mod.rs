//! Transient notifications ("toasts")
//!
//! `Toaster` is provided once at the application root. Each toast removes
//! itself after its lifetime unless it was dismissed earlier.

mod container;

pub use container::ToastContainer;

use chrono::{DateTime, Local};
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

pub type ToastId = u64;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Success,
    Warning,
    Error,
}

impl ToastKind {
    pub fn css_class(&self) -> &'static str {
        match self {
            ToastKind::Info => "toast--info",
            ToastKind::Success => "toast--success",
            ToastKind::Warning => "toast--warning",
            ToastKind::Error => "toast--error",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub id: ToastId,
    pub kind: ToastKind,
    pub title: String,
    pub message: String,
    pub lifetime_ms: u32,
    pub created_at: DateTime<Local>,
}

/// Ordered set of visible toasts
#[derive(Clone, Debug, Default)]
pub struct ToastQueue {
    next_id: ToastId,
    toasts: Vec<Toast>,
}

impl ToastQueue {
    pub fn push(
        &mut self,
        kind: ToastKind,
        title: impl Into<String>,
        message: impl Into<String>,
        lifetime_ms: u32,
    ) -> ToastId {
        self.next_id += 1;
        let id = self.next_id;
        self.toasts.push(Toast {
            id,
            kind,
            title: title.into(),
            message: message.into(),
            lifetime_ms,
            created_at: Local::now(),
        });
        id
    }

    /// Returns false when the toast was already gone
    pub fn remove(&mut self, id: ToastId) -> bool {
        let before = self.toasts.len();
        self.toasts.retain(|toast| toast.id != id);
        self.toasts.len() != before
    }

    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }
}

#[derive(Clone, Copy)]
pub struct Toaster {
    queue: RwSignal<ToastQueue>,
}

impl Toaster {
    pub const DEFAULT_LIFETIME_MS: u32 = 3000;

    pub fn new() -> Self {
        Self {
            queue: RwSignal::new(ToastQueue::default()),
        }
    }

    /// Show a toast and schedule its removal after `lifetime_ms`
    pub fn toast(
        &self,
        kind: ToastKind,
        message: impl Into<String>,
        title: impl Into<String>,
        lifetime_ms: u32,
    ) -> ToastId {
        let (message, title) = (message.into(), title.into());
        log::debug!("Toast {:?}: {} ({})", kind, message, title);

        let id = self
            .queue
            .try_update(|queue| queue.push(kind, title, message, lifetime_ms))
            .unwrap_or_default();

        let this = *self;
        spawn_local(async move {
            TimeoutFuture::new(lifetime_ms).await;
            this.dismiss(id);
        });

        id
    }

    pub fn success(&self, message: impl Into<String>, title: impl Into<String>, lifetime_ms: u32) -> ToastId {
        self.toast(ToastKind::Success, message, title, lifetime_ms)
    }

    pub fn error(&self, message: impl Into<String>, title: impl Into<String>) -> ToastId {
        self.toast(ToastKind::Error, message, title, Self::DEFAULT_LIFETIME_MS)
    }

    pub fn dismiss(&self, id: ToastId) {
        if self.queue.try_update(|queue| queue.remove(id)) == Some(true) {
            log::debug!("Toast {} removed", id);
        }
    }

    pub fn toasts(&self) -> Vec<Toast> {
        self.queue.with(|queue| queue.toasts().to_vec())
    }
}

impl Default for Toaster {
    fn default() -> Self {
        Self::new()
    }
}

pub fn use_toaster() -> Toaster {
    use_context::<Toaster>().expect("Toaster should be provided in the context")
}
