pub mod api_utils;
pub mod modal_frame;
pub mod toast;
