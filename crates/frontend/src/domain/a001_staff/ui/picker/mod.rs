use crate::shared::api_utils::get_json;
use contracts::domain::a001_staff::Staff;
use contracts::domain::common::AggregateId;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::collections::HashMap;

/// Элемент выпадающего списка сотрудников
#[derive(Clone, Debug, PartialEq)]
pub struct StaffPickerItem {
    pub id: String,
    pub name: String,
    pub is_active: bool,
}

impl From<Staff> for StaffPickerItem {
    fn from(s: Staff) -> Self {
        Self {
            id: s.base.id.as_string(),
            name: s.base.description,
            is_active: s.is_active,
        }
    }
}

pub async fn fetch_staff_items() -> Result<Vec<StaffPickerItem>, String> {
    let list: Vec<Staff> = get_json("/api/staff").await?;
    Ok(list.into_iter().map(Into::into).collect())
}

/// id -> ФИО, для подписей в списках смен и начислений
pub fn names_by_id(items: &[StaffPickerItem]) -> HashMap<String, String> {
    items
        .iter()
        .map(|i| (i.id.clone(), i.name.clone()))
        .collect()
}

/// Выбор сотрудника. Уволенные показываются, только если уже выбраны.
#[component]
pub fn StaffSelect(
    #[prop(into)] value: Signal<String>,
    on_change: Callback<String>,
    /// Текст пустого варианта: «Все сотрудники» в фильтре, «—» в форме
    empty_label: &'static str,
) -> impl IntoView {
    let items = RwSignal::new(Vec::<StaffPickerItem>::new());

    spawn_local(async move {
        match fetch_staff_items().await {
            Ok(list) => items.set(list),
            Err(e) => log::warn!("staff picker: {}", e),
        }
    });

    view! {
        <select
            class="picker-select"
            on:change=move |ev| on_change.run(event_target_value(&ev))
        >
            <option value="" selected=move || value.get().is_empty()>{empty_label}</option>
            {move || {
                let current = value.get();
                items
                    .get()
                    .into_iter()
                    .filter(|i| i.is_active || i.id == current)
                    .map(|i| {
                        // Опции приходят позже значения, поэтому выбор через `selected`
                        let selected = i.id == current;
                        view! { <option value=i.id.clone() selected=selected>{i.name}</option> }
                    })
                    .collect_view()
            }}
        </select>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_by_id_maps_every_item() {
        let items = vec![
            StaffPickerItem { id: "1".into(), name: "Анна".into(), is_active: true },
            StaffPickerItem { id: "2".into(), name: "Олег".into(), is_active: false },
        ];
        let names = names_by_id(&items);
        assert_eq!(names.get("2").map(String::as_str), Some("Олег"));
        assert_eq!(names.len(), 2);
    }
}
