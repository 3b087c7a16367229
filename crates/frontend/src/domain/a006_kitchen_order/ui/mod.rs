pub mod board;
pub mod details;
pub mod list;

use crate::shared::api_utils::post_json;
use contracts::domain::a006_kitchen_order::{
    KitchenOrder, OrderPriority, OrderStatus, StatusChangeRequest,
};
use contracts::domain::common::AggregateId;
use leptos::prelude::*;
use thaw::*;

pub fn status_badge(status: OrderStatus) -> AnyView {
    let color = match status {
        OrderStatus::Pending => BadgeColor::Informative,
        OrderStatus::Preparing => BadgeColor::Warning,
        OrderStatus::Ready => BadgeColor::Success,
        OrderStatus::Delivered => BadgeColor::Subtle,
    };
    view! { <Badge appearance=BadgeAppearance::Tint color=color>{status.display_name()}</Badge> }
        .into_any()
}

pub fn priority_badge(priority: OrderPriority) -> AnyView {
    let (appearance, color) = match priority {
        OrderPriority::Low => (BadgeAppearance::Tint, BadgeColor::Subtle),
        OrderPriority::Normal => (BadgeAppearance::Tint, BadgeColor::Informative),
        OrderPriority::High => (BadgeAppearance::Tint, BadgeColor::Severe),
        OrderPriority::Rush => (BadgeAppearance::Filled, BadgeColor::Danger),
    };
    view! { <Badge appearance=appearance color=color>{priority.display_name()}</Badge> }.into_any()
}

/// Перевод заказа в статус; сервер возвращает заказ целиком
pub async fn change_status(order_id: &str, status: OrderStatus) -> Result<KitchenOrder, String> {
    post_json(
        &format!("/api/kitchen_order/{}/status", order_id),
        &StatusChangeRequest { status },
    )
    .await
}

/// Перевод одной позиции; статус заказа сервер пересчитывает сам
pub async fn change_item_status(
    order: &KitchenOrder,
    item_id: &str,
    status: OrderStatus,
) -> Result<KitchenOrder, String> {
    post_json(
        &format!(
            "/api/kitchen_order/{}/items/{}/status",
            order.base.id.as_string(),
            item_id
        ),
        &StatusChangeRequest { status },
    )
    .await
}
