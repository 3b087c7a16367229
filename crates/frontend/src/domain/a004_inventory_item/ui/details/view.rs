use super::view_model::InventoryItemDetailsViewModel;
use crate::domain::a003_vendor::ui::picker::VendorSelect;
use crate::domain::a004_inventory_item::ui::stock_level_badge;
use crate::shared::components::ErrorBox;
use crate::shared::date_utils::{date_input_value, parse_date_input};
use crate::shared::form::{number_input_value, opt_string, parse_number};
use crate::shared::icons::icon;
use crate::shared::number_format::{format_money, format_quantity};
use crate::shared::page_frame::{PageCategory, PageFrame};
use contracts::domain::a004_inventory_item::InventoryItemDto;
use leptos::prelude::*;
use thaw::*;

/// Числовое поле формы: значение применяется по `change`, мусор игнорируется
#[component]
fn NumberField(
    vm: InventoryItemDetailsViewModel,
    id: &'static str,
    label: &'static str,
    get: fn(&InventoryItemDto) -> f64,
    set: fn(&mut InventoryItemDto, f64),
) -> impl IntoView {
    view! {
        <div class="form-group">
            <label for=id>{label}</label>
            <input
                type="text"
                inputmode="decimal"
                id=id
                prop:value=move || vm.form.with(|f| number_input_value(get(f)))
                on:change=move |ev| {
                    if let Some(v) = parse_number(&event_target_value(&ev)) {
                        vm.form.update(|f| set(f, v));
                    }
                }
            />
        </div>
    }
}

#[component]
pub fn InventoryItemDetails(
    id: Option<String>,
    on_saved: Callback<()>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let vm = InventoryItemDetailsViewModel::new();
    vm.load_if_needed(id);

    let vendor_ref = Signal::derive(move || vm.form.get().vendor_ref);

    view! {
        <PageFrame page_id="a004_inventory_item--detail" category=PageCategory::Detail>
            <div class="details-header">
                <h3>{move || if vm.is_edit_mode() { "Складская позиция" } else { "Новая позиция" }}</h3>
                {move || stock_level_badge(vm.stock_level())}
            </div>

            <ErrorBox error=vm.error />

            <div class="details-form">
                <div class="form-group">
                    <label for="inv_description">"Наименование"</label>
                    <input
                        type="text"
                        id="inv_description"
                        prop:value=move || vm.form.get().description
                        on:input=move |ev| vm.form.update(|f| f.description = event_target_value(&ev))
                    />
                </div>

                <div class="form-row">
                    <div class="form-group">
                        <label for="inv_category">"Категория"</label>
                        <input
                            type="text"
                            id="inv_category"
                            prop:value=move || vm.form.get().category
                            on:input=move |ev| vm.form.update(|f| f.category = event_target_value(&ev))
                        />
                    </div>
                    <div class="form-group">
                        <label for="inv_unit">"Ед. изм."</label>
                        <input
                            type="text"
                            id="inv_unit"
                            prop:value=move || vm.form.get().unit
                            on:input=move |ev| vm.form.update(|f| f.unit = event_target_value(&ev))
                            placeholder="кг, л, шт"
                        />
                    </div>
                </div>

                <div class="form-row">
                    // Остаток правится напрямую только при создании, дальше через приход/списание
                    <Show
                        when=move || !vm.is_edit_mode()
                        fallback=move || view! {
                            <div class="form-group">
                                <label>"Остаток"</label>
                                <div class="form-value">
                                    {move || vm.form.with(|f| format_quantity(f.quantity, &f.unit))}
                                </div>
                            </div>
                        }
                    >
                        <NumberField
                            vm=vm
                            id="inv_quantity"
                            label="Начальный остаток"
                            get=|f| f.quantity
                            set=|f, v| f.quantity = v
                        />
                    </Show>
                    <NumberField
                        vm=vm
                        id="inv_min_quantity"
                        label="Минимальный остаток"
                        get=|f| f.min_quantity
                        set=|f, v| f.min_quantity = v
                    />
                    <NumberField
                        vm=vm
                        id="inv_unit_cost"
                        label="Цена за единицу"
                        get=|f| f.unit_cost
                        set=|f, v| f.unit_cost = v
                    />
                </div>

                <div class="form-hint">
                    {move || vm.form.with(|f| format!("Стоимость остатка: {}", format_money(f.quantity * f.unit_cost)))}
                </div>

                <div class="form-group">
                    <label>"Поставщик"</label>
                    <VendorSelect
                        value=vendor_ref
                        on_change=Callback::new(move |v: Option<String>| vm.form.update(|f| f.vendor_ref = v))
                    />
                </div>

                <div class="form-row">
                    <div class="form-group">
                        <label for="inv_expiry">"Годен до"</label>
                        <input
                            type="date"
                            id="inv_expiry"
                            prop:value=move || vm.form.get().expiry_date.map(date_input_value).unwrap_or_default()
                            on:change=move |ev| {
                                let value = parse_date_input(&event_target_value(&ev));
                                vm.form.update(|f| f.expiry_date = value);
                            }
                        />
                    </div>
                    <div class="form-group">
                        <label for="inv_location">"Место хранения"</label>
                        <input
                            type="text"
                            id="inv_location"
                            prop:value=move || vm.form.get().storage_location.unwrap_or_default()
                            on:input=move |ev| vm.form.update(|f| f.storage_location = opt_string(event_target_value(&ev)))
                        />
                    </div>
                </div>

                <div class="form-group">
                    <label for="inv_comment">"Комментарий"</label>
                    <textarea
                        id="inv_comment"
                        rows="2"
                        prop:value=move || vm.form.get().comment.unwrap_or_default()
                        on:input=move |ev| vm.form.update(|f| f.comment = opt_string(event_target_value(&ev)))
                    />
                </div>
            </div>

            <Show when=move || vm.is_edit_mode()>
                <div class="details-section">
                    <h4>"Приход / списание"</h4>
                    <Flex gap=FlexGap::Small align=FlexAlign::End>
                        <div class="form-group">
                            <label for="inv_adjust_delta">"Количество"</label>
                            <input
                                type="text"
                                inputmode="decimal"
                                id="inv_adjust_delta"
                                prop:value=move || vm.adjust_delta.get()
                                on:input=move |ev| vm.adjust_delta.set(event_target_value(&ev))
                            />
                        </div>
                        <div class="form-group">
                            <label for="inv_adjust_reason">"Причина"</label>
                            <input
                                type="text"
                                id="inv_adjust_reason"
                                prop:value=move || vm.adjust_reason.get()
                                on:input=move |ev| vm.adjust_reason.set(event_target_value(&ev))
                                placeholder="Поставка, порча, инвентаризация…"
                            />
                        </div>
                        <Button
                            appearance=ButtonAppearance::Secondary
                            disabled=Signal::derive(move || vm.saving.get())
                            on_click=move |_| vm.adjust_command(1.0)
                        >
                            {icon("plus")}
                            " Приход"
                        </Button>
                        <Button
                            appearance=ButtonAppearance::Secondary
                            disabled=Signal::derive(move || vm.saving.get())
                            on_click=move |_| vm.adjust_command(-1.0)
                        >
                            {icon("delete")}
                            " Списание"
                        </Button>
                    </Flex>
                </div>
            </Show>

            <div class="details-actions">
                <Button
                    appearance=ButtonAppearance::Primary
                    disabled=Signal::derive(move || vm.saving.get())
                    on_click=move |_| vm.save_command(on_saved)
                >
                    {icon("save")}
                    " Сохранить"
                </Button>
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_cancel.run(())>
                    {icon("cancel")}
                    " Отмена"
                </Button>
            </div>
        </PageFrame>
    }
}
