//! Tab labels - единственный источник правды для заголовков табов.
//!
//! Ключи detail-табов: `{aggregate}_detail_{id}` и `{aggregate}_new`.

use contracts::domain::a001_staff::Staff;
use contracts::domain::a002_shift::Shift;
use contracts::domain::a003_vendor::Vendor;
use contracts::domain::a004_inventory_item::InventoryItem;
use contracts::domain::a005_expense::Expense;
use contracts::domain::a006_kitchen_order::KitchenOrder;
use contracts::domain::a007_payroll_entry::PayrollEntry;
use contracts::domain::common::AggregateRoot;

/// Агрегаты, у которых есть detail-таб
pub const DETAIL_AGGREGATES: &[&str] = &[
    "a001_staff",
    "a002_shift",
    "a003_vendor",
    "a004_inventory_item",
    "a005_expense",
    "a006_kitchen_order",
    "a007_payroll_entry",
];

/// Заголовок таба для статического ключа. Fallback: пустая строка.
pub fn tab_label_for_key(key: &str) -> &'static str {
    match key {
        "a001_staff" => Staff::list_name(),
        "a002_shift" => Shift::list_name(),
        "a002_shift_week" => "График на неделю",
        "a003_vendor" => Vendor::list_name(),
        "a004_inventory_item" => InventoryItem::list_name(),
        "a004_inventory_overview" => "Остатки и дозаказ",
        "a005_expense" => Expense::list_name(),
        "a006_kitchen_order" => KitchenOrder::list_name(),
        "a006_kitchen_order_board" => "Кухня",
        "a007_payroll_entry" => PayrollEntry::list_name(),
        "d400_operations_summary" => "Сводка",
        "sys_logs" => "Журнал",
        _ => "",
    }
}

fn element_name(aggregate: &str) -> &'static str {
    match aggregate {
        "a001_staff" => Staff::element_name(),
        "a002_shift" => Shift::element_name(),
        "a003_vendor" => Vendor::element_name(),
        "a004_inventory_item" => InventoryItem::element_name(),
        "a005_expense" => Expense::element_name(),
        "a006_kitchen_order" => KitchenOrder::element_name(),
        "a007_payroll_entry" => PayrollEntry::element_name(),
        _ => "",
    }
}

pub fn detail_key(aggregate: &str, id: &str) -> String {
    format!("{}_detail_{}", aggregate, id)
}

pub fn new_key(aggregate: &str) -> String {
    format!("{}_new", aggregate)
}

/// `("a001_staff", Some(id))` для detail-таба, `("a001_staff", None)` для нового
pub fn parse_detail_key(key: &str) -> Option<(&'static str, Option<&str>)> {
    DETAIL_AGGREGATES.iter().find_map(|aggregate| {
        let rest = key.strip_prefix(aggregate)?;
        if rest == "_new" {
            return Some((*aggregate, None));
        }
        rest.strip_prefix("_detail_")
            .filter(|id| !id.is_empty())
            .map(|id| (*aggregate, Some(id)))
    })
}

/// «<элемент> · <идентификатор>»
pub fn detail_tab_label(aggregate: &str, identifier: &str) -> String {
    format!("{} · {}", element_name(aggregate), identifier)
}

/// Заголовок для любого ключа, в том числе detail-табов.
/// Detail-view после загрузки заменяет его на код записи.
pub fn title_for_key(key: &str) -> String {
    let label = tab_label_for_key(key);
    if !label.is_empty() {
        return label.to_string();
    }
    match parse_detail_key(key) {
        Some((aggregate, None)) => detail_tab_label(aggregate, "новый"),
        Some((aggregate, Some(id))) => {
            detail_tab_label(aggregate, id.get(..8).unwrap_or(id))
        }
        None => key.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_detail_and_new_keys() {
        assert_eq!(
            parse_detail_key("a001_staff_detail_abc"),
            Some(("a001_staff", Some("abc")))
        );
        assert_eq!(parse_detail_key("a005_expense_new"), Some(("a005_expense", None)));
        assert_eq!(parse_detail_key("a001_staff"), None);
        assert_eq!(parse_detail_key("a001_staff_detail_"), None);
        assert_eq!(parse_detail_key("a006_kitchen_order_board"), None);
    }

    #[test]
    fn builders_match_parser() {
        let key = detail_key("a007_payroll_entry", "42");
        assert_eq!(parse_detail_key(&key), Some(("a007_payroll_entry", Some("42"))));
        assert_eq!(
            parse_detail_key(&new_key("a003_vendor")),
            Some(("a003_vendor", None))
        );
    }

    #[test]
    fn titles_for_static_detail_and_unknown_keys() {
        assert_eq!(title_for_key("a006_kitchen_order_board"), "Кухня");
        assert!(title_for_key("a002_shift_new").ends_with("· новый"));
        assert!(title_for_key("a001_staff_detail_0123456789").ends_with("· 01234567"));
        assert_eq!(title_for_key("whatever"), "whatever");
    }
}
