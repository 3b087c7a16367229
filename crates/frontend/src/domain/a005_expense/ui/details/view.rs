use super::view_model::ExpenseDetailsViewModel;
use crate::domain::a003_vendor::ui::picker::VendorSelect;
use crate::shared::components::ErrorBox;
use crate::shared::date_utils::{date_input_value, parse_date_input};
use crate::shared::form::{number_input_value, opt_string, parse_number};
use crate::shared::icons::icon;
use crate::shared::page_frame::{PageCategory, PageFrame};
use contracts::domain::a005_expense::{ExpenseCategory, PaymentMethod};
use leptos::prelude::*;
use thaw::*;

const PAYMENT_METHODS: [PaymentMethod; 3] = [
    PaymentMethod::Cash,
    PaymentMethod::Card,
    PaymentMethod::BankTransfer,
];

#[component]
pub fn ExpenseDetails(
    id: Option<String>,
    on_saved: Callback<()>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let vm = ExpenseDetailsViewModel::new();
    vm.load_if_needed(id);

    let vendor_ref = Signal::derive(move || vm.form.get().vendor_ref);

    view! {
        <PageFrame page_id="a005_expense--detail" category=PageCategory::Detail>
            <div class="details-header">
                <h3>{move || if vm.is_edit_mode() { "Редактирование расхода" } else { "Новый расход" }}</h3>
            </div>

            <ErrorBox error=vm.error />

            <div class="details-form">
                <div class="form-group">
                    <label for="expense_description">"Описание"</label>
                    <input
                        type="text"
                        id="expense_description"
                        prop:value=move || vm.form.get().description
                        on:input=move |ev| vm.form.update(|f| f.description = event_target_value(&ev))
                    />
                </div>

                <div class="form-row">
                    <div class="form-group">
                        <label for="expense_amount">"Сумма"</label>
                        <input
                            type="text"
                            inputmode="decimal"
                            id="expense_amount"
                            prop:value=move || number_input_value(vm.form.get().amount)
                            on:change=move |ev| {
                                if let Some(v) = parse_number(&event_target_value(&ev)) {
                                    vm.form.update(|f| f.amount = v);
                                }
                            }
                        />
                    </div>
                    <div class="form-group">
                        <label for="expense_date">"Дата"</label>
                        <input
                            type="date"
                            id="expense_date"
                            prop:value=move || date_input_value(vm.form.get().expense_date)
                            on:change=move |ev| {
                                if let Some(d) = parse_date_input(&event_target_value(&ev)) {
                                    vm.form.update(|f| f.expense_date = d);
                                }
                            }
                        />
                    </div>
                </div>

                <div class="form-row">
                    <div class="form-group">
                        <label for="expense_category">"Статья"</label>
                        <select
                            id="expense_category"
                            prop:value=move || vm.form.get().category.code()
                            on:change=move |ev| {
                                if let Some(c) = ExpenseCategory::from_code(&event_target_value(&ev)) {
                                    vm.form.update(|f| f.category = c);
                                }
                            }
                        >
                            {ExpenseCategory::all()
                                .into_iter()
                                .map(|c| view! { <option value=c.code()>{c.display_name()}</option> })
                                .collect_view()}
                        </select>
                    </div>
                    <div class="form-group">
                        <label for="expense_payment">"Оплата"</label>
                        <select
                            id="expense_payment"
                            prop:value=move || vm.form.get().payment_method.code()
                            on:change=move |ev| {
                                if let Some(m) = PaymentMethod::from_code(&event_target_value(&ev)) {
                                    vm.form.update(|f| f.payment_method = m);
                                }
                            }
                        >
                            {PAYMENT_METHODS
                                .into_iter()
                                .map(|m| view! { <option value=m.code()>{m.display_name()}</option> })
                                .collect_view()}
                        </select>
                    </div>
                </div>

                <div class="form-group">
                    <label>"Поставщик"</label>
                    <VendorSelect
                        value=vendor_ref
                        on_change=Callback::new(move |v: Option<String>| vm.form.update(|f| f.vendor_ref = v))
                    />
                </div>

                <div class="form-group">
                    <label for="expense_comment">"Комментарий"</label>
                    <textarea
                        id="expense_comment"
                        rows="2"
                        prop:value=move || vm.form.get().comment.unwrap_or_default()
                        on:input=move |ev| vm.form.update(|f| f.comment = opt_string(event_target_value(&ev)))
                    />
                </div>
            </div>

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
