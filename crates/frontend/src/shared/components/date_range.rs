use crate::shared::date_utils::{date_input_value, parse_date_input};
use chrono::NaiveDate;
use leptos::prelude::*;

/// Пара полей «с / по». Пустое или некорректное значение игнорируется.
#[component]
pub fn DateRangeInputs(date_from: RwSignal<NaiveDate>, date_to: RwSignal<NaiveDate>) -> impl IntoView {
    view! {
        <div class="date-range">
            <label>"С"</label>
            <input
                type="date"
                prop:value=move || date_input_value(date_from.get())
                on:change=move |ev| {
                    if let Some(d) = parse_date_input(&event_target_value(&ev)) {
                        date_from.set(d);
                    }
                }
            />
            <label>"по"</label>
            <input
                type="date"
                prop:value=move || date_input_value(date_to.get())
                on:change=move |ev| {
                    if let Some(d) = parse_date_input(&event_target_value(&ev)) {
                        date_to.set(d);
                    }
                }
            />
        </div>
    }
}
