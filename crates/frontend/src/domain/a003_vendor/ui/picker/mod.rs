use crate::shared::api_utils::get_json;
use contracts::domain::a003_vendor::Vendor;
use contracts::domain::common::AggregateId;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::collections::HashMap;

#[derive(Clone, Debug, PartialEq)]
pub struct VendorPickerItem {
    pub id: String,
    pub name: String,
    pub is_active: bool,
}

impl From<Vendor> for VendorPickerItem {
    fn from(v: Vendor) -> Self {
        Self {
            id: v.base.id.as_string(),
            name: v.base.description,
            is_active: v.is_active,
        }
    }
}

pub async fn fetch_vendor_items() -> Result<Vec<VendorPickerItem>, String> {
    let list: Vec<Vendor> = get_json("/api/vendor").await?;
    Ok(list.into_iter().map(Into::into).collect())
}

pub fn vendor_names(items: &[VendorPickerItem]) -> HashMap<String, String> {
    items
        .iter()
        .map(|i| (i.id.clone(), i.name.clone()))
        .collect()
}

/// Выбор поставщика; пустое значение означает «не указан»
#[component]
pub fn VendorSelect(
    #[prop(into)] value: Signal<Option<String>>,
    on_change: Callback<Option<String>>,
) -> impl IntoView {
    let items = RwSignal::new(Vec::<VendorPickerItem>::new());

    spawn_local(async move {
        match fetch_vendor_items().await {
            Ok(list) => items.set(list),
            Err(e) => log::warn!("vendor picker: {}", e),
        }
    });

    view! {
        <select
            class="picker-select"
            on:change=move |ev| {
                let id = event_target_value(&ev);
                on_change.run(if id.is_empty() { None } else { Some(id) });
            }
        >
            <option value="" selected=move || value.get().is_none()>"— не указан —"</option>
            {move || {
                let current = value.get().unwrap_or_default();
                items
                    .get()
                    .into_iter()
                    .filter(|i| i.is_active || i.id == current)
                    .map(|i| {
                        let selected = i.id == current;
                        view! { <option value=i.id.clone() selected=selected>{i.name}</option> }
                    })
                    .collect_view()
            }}
        </select>
    }
}
