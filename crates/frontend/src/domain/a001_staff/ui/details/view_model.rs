use super::model;
use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::{detail_key, detail_tab_label};
use crate::shared::toast::{use_toast, ToastService};
use contracts::domain::a001_staff::{Staff, StaffDto};
use leptos::prelude::*;
use leptos::task::spawn_local;

/// ViewModel формы сотрудника
#[derive(Clone, Copy)]
pub struct StaffDetailsViewModel {
    pub form: RwSignal<StaffDto>,
    pub error: RwSignal<Option<String>>,
    pub saving: RwSignal<bool>,
    toast: ToastService,
    ctx: AppGlobalContext,
}

impl StaffDetailsViewModel {
    pub fn new() -> Self {
        Self {
            form: RwSignal::new(StaffDto::default()),
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
                Ok(staff) => {
                    this.ctx.update_tab_title(
                        &detail_key("a001_staff", &id),
                        &detail_tab_label("a001_staff", &staff.base.code),
                    );
                    this.form.set(StaffDto::from(&staff));
                }
                Err(e) => this.error.set(Some(format!("Ошибка загрузки: {}", e))),
            }
        });
    }

    pub fn save_command(&self, on_saved: Callback<()>) {
        let current = self.form.get_untracked();
        if let Err(e) = validate_form(&current) {
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
                        .success(format!("Сотрудник «{}» сохранён", current.description.trim()));
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

/// Те же правила, что проверит сервер; код присвоит сервер
pub fn validate_form(dto: &StaffDto) -> Result<(), String> {
    let code = dto.code.clone().unwrap_or_else(|| "NEW".to_string());
    Staff::new_for_insert(dto, code).validate()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_staff_needs_a_name_and_valid_email() {
        let mut dto = StaffDto::default();
        assert!(validate_form(&dto).is_err());
        dto.description = "Иван Петров".into();
        assert!(validate_form(&dto).is_ok());
        dto.email = Some("not-an-email".into());
        assert!(validate_form(&dto).is_err());
    }
}
