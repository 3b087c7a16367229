//! Tab management module
//!
//! - `page` - компонент TabPage, обёртка контента таба
//! - `registry` - маппинг tab.key → View
//! - `tab_labels` - заголовки табов и разбор ключей detail-табов

pub mod page;
pub mod registry;
pub mod tab_labels;

pub use page::TabPage;
pub use tab_labels::{detail_key, detail_tab_label, new_key, parse_detail_key, tab_label_for_key, title_for_key};
