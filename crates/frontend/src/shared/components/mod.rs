pub mod date_range;
pub mod error_box;
pub mod stat_card;

pub use date_range::DateRangeInputs;
pub use error_box::ErrorBox;
pub use stat_card::{StatCard, StatTone};
