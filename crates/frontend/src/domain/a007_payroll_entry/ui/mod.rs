pub mod details;
pub mod list;

use crate::shared::api_utils::post_json;
use contracts::domain::a007_payroll_entry::{PayrollEntry, PayrollStatus};
use leptos::prelude::*;
use thaw::*;

pub fn payroll_status_badge(status: PayrollStatus) -> AnyView {
    let (appearance, color) = match status {
        PayrollStatus::Draft => (BadgeAppearance::Tint, BadgeColor::Subtle),
        PayrollStatus::Approved => (BadgeAppearance::Tint, BadgeColor::Informative),
        PayrollStatus::Paid => (BadgeAppearance::Filled, BadgeColor::Success),
    };
    view! { <Badge appearance=appearance color=color>{status.display_name()}</Badge> }.into_any()
}

/// Следующий шаг жизненного цикла для кнопки в строке/карточке
pub fn next_action(status: PayrollStatus) -> Option<(&'static str, &'static str)> {
    match status {
        PayrollStatus::Draft => Some(("approve", "Утвердить")),
        PayrollStatus::Approved => Some(("pay", "Выплатить")),
        PayrollStatus::Paid => None,
    }
}

/// POST /api/payroll/:id/{approve|pay}
pub async fn run_action(id: &str, action: &str) -> Result<PayrollEntry, String> {
    post_json(&format!("/api/payroll/{}/{}", id, action), &()).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paid_entry_has_no_next_action() {
        assert_eq!(next_action(PayrollStatus::Draft).map(|a| a.0), Some("approve"));
        assert_eq!(next_action(PayrollStatus::Approved).map(|a| a.0), Some("pay"));
        assert!(next_action(PayrollStatus::Paid).is_none());
    }
}
