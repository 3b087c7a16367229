pub mod details;
pub mod list;
pub mod overview;

use contracts::domain::a004_inventory_item::StockLevel;
use leptos::prelude::*;
use thaw::*;

/// Бейдж уровня остатка, общий для списка и сводки
pub fn stock_level_badge(level: StockLevel) -> AnyView {
    match level {
        StockLevel::OutOfStock => {
            view! { <Badge appearance=BadgeAppearance::Filled color=BadgeColor::Danger>"Нет"</Badge> }
                .into_any()
        }
        StockLevel::Low => {
            view! { <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Warning>"Мало"</Badge> }
                .into_any()
        }
        StockLevel::Ok => {
            view! { <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Success>"В норме"</Badge> }
                .into_any()
        }
    }
}
