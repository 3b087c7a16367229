use super::view_model::KitchenOrderDetailsViewModel;
use crate::domain::a006_kitchen_order::ui::status_badge;
use crate::shared::components::ErrorBox;
use crate::shared::form::opt_string;
use crate::shared::icons::icon;
use crate::shared::page_frame::{PageCategory, PageFrame};
use contracts::domain::a006_kitchen_order::OrderPriority;
use leptos::prelude::*;
use thaw::*;

#[component]
pub fn KitchenOrderDetails(
    id: Option<String>,
    on_saved: Callback<()>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let vm = KitchenOrderDetailsViewModel::new();
    vm.load_if_needed(id);

    let item_count = move || vm.form.with(|f| f.items.len());

    view! {
        <PageFrame page_id="a006_kitchen_order--detail" category=PageCategory::Detail>
            <div class="details-header">
                <h3>{move || if vm.is_edit_mode() { "Редактирование заказа" } else { "Новый заказ" }}</h3>
                {move || vm.status.get().map(status_badge)}
            </div>

            <ErrorBox error=vm.error />

            <div class="details-form">
                <div class="form-row">
                    <div class="form-group">
                        <label for="order_table">"Стол"</label>
                        <input
                            type="text"
                            id="order_table"
                            prop:value=move || vm.form.get().table_number
                            on:input=move |ev| vm.form.update(|f| f.table_number = event_target_value(&ev))
                        />
                    </div>
                    <div class="form-group">
                        <label for="order_server">"Официант"</label>
                        <input
                            type="text"
                            id="order_server"
                            prop:value=move || vm.form.get().server_name.unwrap_or_default()
                            on:input=move |ev| vm.form.update(|f| f.server_name = opt_string(event_target_value(&ev)))
                        />
                    </div>
                </div>

                <div class="form-row">
                    <div class="form-group">
                        <label for="order_priority">"Приоритет"</label>
                        <select
                            id="order_priority"
                            prop:value=move || vm.form.get().priority.code()
                            on:change=move |ev| {
                                if let Some(p) = OrderPriority::from_code(&event_target_value(&ev)) {
                                    vm.form.update(|f| f.priority = p);
                                }
                            }
                        >
                            {OrderPriority::all()
                                .into_iter()
                                .map(|p| view! { <option value=p.code()>{p.display_name()}</option> })
                                .collect_view()}
                        </select>
                    </div>
                    <div class="form-group">
                        <label for="order_minutes">"Время приготовления, мин"</label>
                        <input
                            type="number"
                            min="1"
                            id="order_minutes"
                            prop:value=move || vm.form.get().estimated_minutes.map(|m| m.to_string()).unwrap_or_default()
                            on:change=move |ev| {
                                let minutes = event_target_value(&ev).trim().parse::<i64>().ok();
                                vm.form.update(|f| f.estimated_minutes = minutes);
                            }
                        />
                    </div>
                </div>

                <div class="details-section">
                    <h4>"Позиции"</h4>
                    <table class="order-items">
                        <thead>
                            <tr>
                                <th>"Блюдо"</th>
                                <th>"Кол-во"</th>
                                <th>"Примечание"</th>
                                <th></th>
                            </tr>
                        </thead>
                        <tbody>
                            // Ключ по индексу: строки редактируются на месте, новые добавляются в конец
                            <For
                                each=move || 0..item_count()
                                key=|index| *index
                                children=move |index| {
                                    view! {
                                        <tr>
                                            <td>
                                                <input
                                                    type="text"
                                                    prop:value=move || vm.form.with(|f| f.items.get(index).map(|i| i.name.clone()).unwrap_or_default())
                                                    on:input=move |ev| {
                                                        let value = event_target_value(&ev);
                                                        vm.update_item(index, |i| i.name = value);
                                                    }
                                                />
                                            </td>
                                            <td>
                                                <input
                                                    type="number"
                                                    min="1"
                                                    class="order-items__qty"
                                                    prop:value=move || vm.form.with(|f| f.items.get(index).map(|i| i.quantity.to_string()).unwrap_or_default())
                                                    on:change=move |ev| {
                                                        if let Ok(q) = event_target_value(&ev).trim().parse::<u32>() {
                                                            vm.update_item(index, |i| i.quantity = q);
                                                        }
                                                    }
                                                />
                                            </td>
                                            <td>
                                                <input
                                                    type="text"
                                                    prop:value=move || vm.form.with(|f| f.items.get(index).and_then(|i| i.notes.clone()).unwrap_or_default())
                                                    on:input=move |ev| {
                                                        let value = opt_string(event_target_value(&ev));
                                                        vm.update_item(index, |i| i.notes = value);
                                                    }
                                                    placeholder="без лука, прожарка…"
                                                />
                                            </td>
                                            <td>
                                                <Button
                                                    appearance=ButtonAppearance::Subtle
                                                    size=ButtonSize::Small
                                                    on_click=move |_| vm.remove_item(index)
                                                >
                                                    {icon("x")}
                                                </Button>
                                            </td>
                                        </tr>
                                    }
                                }
                            />
                        </tbody>
                    </table>
                    <Button appearance=ButtonAppearance::Secondary size=ButtonSize::Small on_click=move |_| vm.add_item()>
                        {icon("plus")}
                        " Позиция"
                    </Button>
                </div>

                <div class="form-group">
                    <label for="order_comment">"Комментарий к заказу"</label>
                    <textarea
                        id="order_comment"
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
