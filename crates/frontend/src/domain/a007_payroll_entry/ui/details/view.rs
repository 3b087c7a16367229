use super::view_model::PayrollEntryDetailsViewModel;
use crate::domain::a007_payroll_entry::ui::{next_action, payroll_status_badge};
use crate::shared::components::ErrorBox;
use crate::shared::date_utils::format_date;
use crate::shared::form::{number_input_value, opt_string, parse_number};
use crate::shared::icons::icon;
use crate::shared::number_format::{format_hours, format_money};
use crate::shared::page_frame::{PageCategory, PageFrame};
use contracts::domain::a007_payroll_entry::PayrollEntry;
use leptos::prelude::*;
use thaw::*;

#[component]
pub fn PayrollEntryDetails(
    id: String,
    on_saved: Callback<()>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let vm = PayrollEntryDetailsViewModel::new(id);
    vm.load();

    let readonly = Signal::derive(move || !vm.is_editable());
    let field = move |f: fn(&PayrollEntry) -> String| {
        move || vm.entry.with(|e| e.as_ref().map(f).unwrap_or_default())
    };

    view! {
        <PageFrame page_id="a007_payroll_entry--detail" category=PageCategory::Detail>
            <div class="details-header">
                <h3>{field(|e| e.base.description.clone())}</h3>
                {move || vm.status().map(payroll_status_badge)}
            </div>

            <ErrorBox error=vm.error />

            <div class="details-summary">
                <div class="details-summary__row">
                    <span class="details-summary__label">"Период"</span>
                    <span>{field(|e| format!("{} – {}", format_date(e.period_start), format_date(e.period_end)))}</span>
                </div>
                <div class="details-summary__row">
                    <span class="details-summary__label">"Ставка"</span>
                    <span>{field(|e| format!("{} / ч", format_money(e.hourly_rate)))}</span>
                </div>
                <div class="details-summary__row">
                    <span class="details-summary__label">"Часы"</span>
                    <span>{field(|e| format!("{} + {} сверхурочно", format_hours(e.regular_hours), format_hours(e.overtime_hours)))}</span>
                </div>
                <div class="details-summary__row">
                    <span class="details-summary__label">"Начислено"</span>
                    <span>{field(|e| format_money(e.gross_pay))}</span>
                </div>
                <div class="details-summary__row">
                    <span class="details-summary__label">"Удержано"</span>
                    <span>{field(|e| format_money(e.deductions))}</span>
                </div>
                <div class="details-summary__row details-summary__row--total">
                    <span class="details-summary__label">"К выплате"</span>
                    <span>{field(|e| format_money(e.net_pay))}</span>
                </div>
            </div>

            <h4 class="section-title">"Корректировка"</h4>
            <div class="details-form">
                <div class="form-row">
                    <div class="form-group">
                        <label for="payroll_regular">"Обычные часы"</label>
                        <input
                            type="text"
                            inputmode="decimal"
                            id="payroll_regular"
                            prop:disabled=readonly
                            prop:value=move || number_input_value(vm.form.get().regular_hours)
                            on:change=move |ev| {
                                if let Some(v) = parse_number(&event_target_value(&ev)) {
                                    vm.form.update(|f| f.regular_hours = v);
                                }
                            }
                        />
                    </div>
                    <div class="form-group">
                        <label for="payroll_overtime">"Сверхурочные часы"</label>
                        <input
                            type="text"
                            inputmode="decimal"
                            id="payroll_overtime"
                            prop:disabled=readonly
                            prop:value=move || number_input_value(vm.form.get().overtime_hours)
                            on:change=move |ev| {
                                if let Some(v) = parse_number(&event_target_value(&ev)) {
                                    vm.form.update(|f| f.overtime_hours = v);
                                }
                            }
                        />
                    </div>
                </div>

                <div class="form-group form-group--inline">
                    <input
                        type="checkbox"
                        id="payroll_recalc"
                        prop:disabled=readonly
                        prop:checked=move || vm.form.get().deductions.is_none()
                        on:change=move |ev| {
                            let recalc = event_target_checked(&ev);
                            vm.form.update(|f| {
                                f.deductions = if recalc { None } else { Some(0.0) };
                            });
                        }
                    />
                    <label for="payroll_recalc">"Удержания по ставке"</label>
                </div>

                {move || vm.form.get().deductions.map(|d| view! {
                    <div class="form-group">
                        <label for="payroll_deductions">"Удержания"</label>
                        <input
                            type="text"
                            inputmode="decimal"
                            id="payroll_deductions"
                            prop:disabled=readonly
                            prop:value=number_input_value(d)
                            on:change=move |ev| {
                                if let Some(v) = parse_number(&event_target_value(&ev)) {
                                    vm.form.update(|f| f.deductions = Some(v));
                                }
                            }
                        />
                    </div>
                })}

                <div class="form-group">
                    <label for="payroll_comment">"Комментарий"</label>
                    <textarea
                        id="payroll_comment"
                        rows="3"
                        prop:disabled=readonly
                        prop:value=move || vm.form.get().comment.unwrap_or_default()
                        on:input=move |ev| vm.form.update(|f| f.comment = opt_string(event_target_value(&ev)))
                    />
                </div>
            </div>

            <div class="details-actions">
                <Button
                    appearance=ButtonAppearance::Primary
                    disabled=Signal::derive(move || vm.saving.get() || !vm.is_editable())
                    on_click=move |_| vm.save_command(on_saved)
                >
                    {icon("save")}
                    " Пересчитать"
                </Button>
                {move || vm.status().and_then(next_action).map(|(action, label)| view! {
                    <Button
                        appearance=ButtonAppearance::Secondary
                        disabled=Signal::derive(move || vm.saving.get())
                        on_click=move |_| vm.action_command(action)
                    >
                        {icon("check")}
                        " "
                        {label}
                    </Button>
                })}
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_cancel.run(())>
                    {icon("cancel")}
                    " Закрыть"
                </Button>
            </div>
        </PageFrame>
    }
}
