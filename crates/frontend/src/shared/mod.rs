pub mod api_utils;
pub mod client_log;
pub mod components;
pub mod date_utils;
pub mod form;
pub mod icons;
pub mod number_format;
pub mod page_frame;
pub mod toast;
