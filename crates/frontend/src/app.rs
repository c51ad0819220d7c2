use crate::layout::AppGlobalContext;
use crate::routes::routes::AppRoutes;
use crate::shared::toast::{ToastContainer, Toaster};
use crate::system::auth::AuthProvider;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    // Application-wide state: known sources
    provide_context(AppGlobalContext::new());

    // Notifications are shown above every page
    provide_context(Toaster::new());

    view! {
        <AuthProvider>
            <AppRoutes />
            <ToastContainer />
        </AuthProvider>
    }
}
