use super::view_model::ShiftDetailsViewModel;
use crate::domain::a001_staff::ui::picker::StaffSelect;
use crate::shared::components::ErrorBox;
use crate::shared::date_utils::{date_input_value, format_time, parse_date_input, parse_time_input};
use crate::shared::form::opt_string;
use crate::shared::icons::icon;
use crate::shared::number_format::format_hours;
use crate::shared::page_frame::{PageCategory, PageFrame};
use contracts::domain::a001_staff::StaffRole;
use leptos::prelude::*;
use thaw::*;

#[component]
pub fn ShiftDetails(
    id: Option<String>,
    on_saved: Callback<()>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let vm = ShiftDetailsViewModel::new();
    vm.load_if_needed(id);

    let staff_ref = Signal::derive(move || vm.form.get().staff_ref);
    let crosses_midnight = move || vm.form.with(|f| f.end_time <= f.start_time);

    view! {
        <PageFrame page_id="a002_shift--detail" category=PageCategory::Detail>
            <div class="details-header">
                <h3>{move || if vm.is_edit_mode() { "Редактирование смены" } else { "Новая смена" }}</h3>
            </div>

            <ErrorBox error=vm.error />

            <div class="details-form">
                <div class="form-group">
                    <label>"Сотрудник"</label>
                    <StaffSelect
                        value=staff_ref
                        empty_label="—"
                        on_change=Callback::new(move |id: String| vm.form.update(|f| f.staff_ref = id))
                    />
                </div>

                <div class="form-group">
                    <label for="shift_role">"Роль на смене"</label>
                    <select
                        id="shift_role"
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
                    <label for="shift_date">"Дата"</label>
                    <input
                        type="date"
                        id="shift_date"
                        prop:value=move || date_input_value(vm.form.get().shift_date)
                        on:change=move |ev| {
                            if let Some(d) = parse_date_input(&event_target_value(&ev)) {
                                vm.form.update(|f| f.shift_date = d);
                            }
                        }
                    />
                </div>

                <div class="form-row">
                    <div class="form-group">
                        <label for="shift_start">"Начало"</label>
                        <input
                            type="time"
                            id="shift_start"
                            prop:value=move || format_time(vm.form.get().start_time)
                            on:change=move |ev| {
                                if let Some(t) = parse_time_input(&event_target_value(&ev)) {
                                    vm.form.update(|f| f.start_time = t);
                                }
                            }
                        />
                    </div>
                    <div class="form-group">
                        <label for="shift_end">"Конец"</label>
                        <input
                            type="time"
                            id="shift_end"
                            prop:value=move || format_time(vm.form.get().end_time)
                            on:change=move |ev| {
                                if let Some(t) = parse_time_input(&event_target_value(&ev)) {
                                    vm.form.update(|f| f.end_time = t);
                                }
                            }
                        />
                    </div>
                </div>

                <div class="form-hint">
                    {move || {
                        let hours = format_hours(vm.duration_hours());
                        if crosses_midnight() {
                            format!("Длительность {} (заканчивается на следующий день)", hours)
                        } else {
                            format!("Длительность {}", hours)
                        }
                    }}
                </div>

                <div class="form-group">
                    <label for="shift_comment">"Комментарий"</label>
                    <textarea
                        id="shift_comment"
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
