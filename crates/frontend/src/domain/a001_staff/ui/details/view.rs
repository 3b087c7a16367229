use super::view_model::StaffDetailsViewModel;
use crate::shared::components::ErrorBox;
use crate::shared::date_utils::{date_input_value, parse_date_input};
use crate::shared::form::{number_input_value, opt_string, parse_number};
use crate::shared::icons::icon;
use crate::shared::page_frame::{PageCategory, PageFrame};
use contracts::domain::a001_staff::StaffRole;
use leptos::prelude::*;
use thaw::*;

#[component]
pub fn StaffDetails(
    id: Option<String>,
    on_saved: Callback<()>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let vm = StaffDetailsViewModel::new();
    vm.load_if_needed(id);

    view! {
        <PageFrame page_id="a001_staff--detail" category=PageCategory::Detail>
            <div class="details-header">
                <h3>
                    {move || if vm.is_edit_mode() { "Редактирование сотрудника" } else { "Новый сотрудник" }}
                </h3>
            </div>

            <ErrorBox error=vm.error />

            <div class="details-form">
                <div class="form-group">
                    <label for="staff_description">"ФИО"</label>
                    <input
                        type="text"
                        id="staff_description"
                        prop:value=move || vm.form.get().description
                        on:input=move |ev| vm.form.update(|f| f.description = event_target_value(&ev))
                        placeholder="Фамилия Имя"
                    />
                </div>

                <div class="form-group">
                    <label for="staff_code">"Табельный код"</label>
                    <input
                        type="text"
                        id="staff_code"
                        prop:value=move || vm.form.get().code.unwrap_or_default()
                        on:input=move |ev| vm.form.update(|f| f.code = opt_string(event_target_value(&ev)))
                        placeholder="Присваивается автоматически"
                    />
                </div>

                <div class="form-group">
                    <label for="staff_role">"Должность"</label>
                    <select
                        id="staff_role"
                        prop:value=move || vm.form.get().role.code()
                        on:change=move |ev| {
                            if let Some(role) = StaffRole::from_code(&event_target_value(&ev)) {
                                vm.form.update(|f| f.role = role);
                            }
                        }
                    >
                        {StaffRole::all()
                            .into_iter()
                            .map(|r| view! { <option value=r.code()>{r.display_name()}</option> })
                            .collect_view()}
                    </select>
                </div>

                <div class="form-group">
                    <label for="staff_rate">"Ставка в час"</label>
                    <input
                        type="text"
                        inputmode="decimal"
                        id="staff_rate"
                        prop:value=move || number_input_value(vm.form.get().hourly_rate)
                        on:change=move |ev| {
                            if let Some(v) = parse_number(&event_target_value(&ev)) {
                                vm.form.update(|f| f.hourly_rate = v);
                            }
                        }
                    />
                </div>

                <div class="form-group">
                    <label for="staff_phone">"Телефон"</label>
                    <input
                        type="tel"
                        id="staff_phone"
                        prop:value=move || vm.form.get().phone.unwrap_or_default()
                        on:input=move |ev| vm.form.update(|f| f.phone = opt_string(event_target_value(&ev)))
                    />
                </div>

                <div class="form-group">
                    <label for="staff_email">"Email"</label>
                    <input
                        type="email"
                        id="staff_email"
                        prop:value=move || vm.form.get().email.unwrap_or_default()
                        on:input=move |ev| vm.form.update(|f| f.email = opt_string(event_target_value(&ev)))
                    />
                </div>

                <div class="form-group">
                    <label for="staff_hire_date">"Дата приёма"</label>
                    <input
                        type="date"
                        id="staff_hire_date"
                        prop:value=move || vm.form.get().hire_date.map(date_input_value).unwrap_or_default()
                        on:change=move |ev| {
                            let value = parse_date_input(&event_target_value(&ev));
                            vm.form.update(|f| f.hire_date = value);
                        }
                    />
                </div>

                <div class="form-group form-group--inline">
                    <input
                        type="checkbox"
                        id="staff_active"
                        prop:checked=move || vm.form.get().is_active
                        on:change=move |ev| vm.form.update(|f| f.is_active = event_target_checked(&ev))
                    />
                    <label for="staff_active">"Работает"</label>
                </div>

                <div class="form-group">
                    <label for="staff_comment">"Комментарий"</label>
                    <textarea
                        id="staff_comment"
                        rows="3"
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
                    {move || if vm.is_edit_mode() { " Сохранить" } else { " Создать" }}
                </Button>
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_cancel.run(())>
                    {icon("cancel")}
                    " Отмена"
                </Button>
            </div>
        </PageFrame>
    }
}
