use super::model;
use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::{detail_key, detail_tab_label};
use crate::shared::toast::{use_toast, ToastService};
use contracts::domain::a003_vendor::{Vendor, VendorDto};
use leptos::prelude::*;
use leptos::task::spawn_local;

#[derive(Clone, Copy)]
pub struct VendorDetailsViewModel {
    pub form: RwSignal<VendorDto>,
    pub error: RwSignal<Option<String>>,
    pub saving: RwSignal<bool>,
    toast: ToastService,
    ctx: AppGlobalContext,
}

impl VendorDetailsViewModel {
    pub fn new() -> Self {
        Self {
            form: RwSignal::new(VendorDto::default()),
            error: RwSignal::new(None),
            saving: RwSignal::new(false),
            toast: use_toast(),
            ctx: use_context::<AppGlobalContext>().expect("AppGlobalContext not found"),
        }
    }

    pub fn is_edit_mode(&self) -> bool {
        self.form.with(|f| f.id.is_some())
    }

    pub fn load_if_needed(&self, id: Option<String>) {
        let Some(id) = id else {
            return;
        };
        let this = *self;
        spawn_local(async move {
            match model::fetch_by_id(&id).await {
                Ok(vendor) => {
                    this.ctx.update_tab_title(
                        &detail_key("a003_vendor", &id),
                        &detail_tab_label("a003_vendor", &vendor.base.code),
                    );
                    this.form.set(VendorDto::from(&vendor));
                }
                Err(e) => this.error.set(Some(format!("Ошибка загрузки: {}", e))),
            }
        });
    }

    pub fn save_command(&self, on_saved: Callback<()>) {
        let current = self.form.get_untracked();
        if let Err(e) = Vendor::new_for_insert(&current, String::new()).validate() {
            self.error.set(Some(e));
            return;
        }

        let this = *self;
        this.error.set(None);
        this.saving.set(true);
        spawn_local(async move {
            match model::save_form(&current).await {
                Ok(_) => {
                    this.toast
                        .success(format!("Поставщик «{}» сохранён", current.description.trim()));
                    on_saved.run(());
                }
                Err(e) => {
                    this.error.set(Some(e.clone()));
                    this.toast.error(e);
                }
            }
            this.saving.set(false);
        });
    }
}
