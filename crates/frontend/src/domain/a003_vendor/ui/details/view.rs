use super::view_model::VendorDetailsViewModel;
use crate::shared::components::ErrorBox;
use crate::shared::form::opt_string;
use crate::shared::icons::icon;
use crate::shared::page_frame::{PageCategory, PageFrame};
use leptos::prelude::*;
use thaw::*;

#[component]
pub fn VendorDetails(
    id: Option<String>,
    on_saved: Callback<()>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let vm = VendorDetailsViewModel::new();
    vm.load_if_needed(id);

    view! {
        <PageFrame page_id="a003_vendor--detail" category=PageCategory::Detail>
            <div class="details-header">
                <h3>{move || if vm.is_edit_mode() { "Редактирование поставщика" } else { "Новый поставщик" }}</h3>
            </div>

            <ErrorBox error=vm.error />

            <div class="details-form">
                <div class="form-group">
                    <label for="vendor_description">"Наименование"</label>
                    <input
                        type="text"
                        id="vendor_description"
                        prop:value=move || vm.form.get().description
                        on:input=move |ev| vm.form.update(|f| f.description = event_target_value(&ev))
                    />
                </div>

                <div class="form-group">
                    <label for="vendor_category">"Категория"</label>
                    <input
                        type="text"
                        id="vendor_category"
                        prop:value=move || vm.form.get().category
                        on:input=move |ev| vm.form.update(|f| f.category = event_target_value(&ev))
                        placeholder="Овощи, мясо, напитки…"
                    />
                </div>

                <div class="form-group">
                    <label for="vendor_contact">"Контактное лицо"</label>
                    <input
                        type="text"
                        id="vendor_contact"
                        prop:value=move || vm.form.get().contact_person.unwrap_or_default()
                        on:input=move |ev| vm.form.update(|f| f.contact_person = opt_string(event_target_value(&ev)))
                    />
                </div>

                <div class="form-row">
                    <div class="form-group">
                        <label for="vendor_phone">"Телефон"</label>
                        <input
                            type="tel"
                            id="vendor_phone"
                            prop:value=move || vm.form.get().phone.unwrap_or_default()
                            on:input=move |ev| vm.form.update(|f| f.phone = opt_string(event_target_value(&ev)))
                        />
                    </div>
                    <div class="form-group">
                        <label for="vendor_email">"Email"</label>
                        <input
                            type="email"
                            id="vendor_email"
                            prop:value=move || vm.form.get().email.unwrap_or_default()
                            on:input=move |ev| vm.form.update(|f| f.email = opt_string(event_target_value(&ev)))
                        />
                    </div>
                </div>

                <div class="form-group">
                    <label for="vendor_address">"Адрес"</label>
                    <input
                        type="text"
                        id="vendor_address"
                        prop:value=move || vm.form.get().address.unwrap_or_default()
                        on:input=move |ev| vm.form.update(|f| f.address = opt_string(event_target_value(&ev)))
                    />
                </div>

                <div class="form-group form-group--inline">
                    <input
                        type="checkbox"
                        id="vendor_active"
                        prop:checked=move || vm.form.get().is_active
                        on:change=move |ev| vm.form.update(|f| f.is_active = event_target_checked(&ev))
                    />
                    <label for="vendor_active">"Работаем"</label>
                </div>

                <div class="form-group">
                    <label for="vendor_comment">"Комментарий"</label>
                    <textarea
                        id="vendor_comment"
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
