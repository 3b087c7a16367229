use super::model;
use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::{detail_key, detail_tab_label};
use crate::shared::toast::{use_toast, ToastService};
use contracts::domain::a002_shift::{Shift, ShiftDto};
use leptos::prelude::*;
use leptos::task::spawn_local;

#[derive(Clone, Copy)]
pub struct ShiftDetailsViewModel {
    pub form: RwSignal<ShiftDto>,
    pub error: RwSignal<Option<String>>,
    pub saving: RwSignal<bool>,
    toast: ToastService,
    ctx: AppGlobalContext,
}

impl ShiftDetailsViewModel {
    pub fn new() -> Self {
        Self {
            form: RwSignal::new(ShiftDto::default()),
            error: RwSignal::new(None),
            saving: RwSignal::new(false),
            toast: use_toast(),
            ctx: use_context::<AppGlobalContext>().expect("AppGlobalContext not found"),
        }
    }

    pub fn is_edit_mode(&self) -> bool {
        self.form.with(|f| f.id.is_some())
    }

    /// Длительность по текущим значениям формы, с учётом перехода через полночь
    pub fn duration_hours(&self) -> f64 {
        self.form
            .with(|f| Shift::new_for_insert(f, String::new()).duration_hours())
    }

    pub fn load_if_needed(&self, id: Option<String>) {
        let Some(id) = id else {
            return;
        };
        let this = *self;
        spawn_local(async move {
            match model::fetch_by_id(&id).await {
                Ok(shift) => {
                    this.ctx.update_tab_title(
                        &detail_key("a002_shift", &id),
                        &detail_tab_label("a002_shift", &shift.base.code),
                    );
                    let mut dto = ShiftDto::from(&shift);
                    // Описание генерируется из даты и времени, пусть пересчитается
                    dto.description = None;
                    this.form.set(dto);
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
                    this.toast.success("Смена сохранена");
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

pub fn validate_form(dto: &ShiftDto) -> Result<(), String> {
    Shift::new_for_insert(dto, String::new()).validate()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    #[test]
    fn shift_needs_staff_and_distinct_times() {
        let mut dto = ShiftDto::default();
        assert!(validate_form(&dto).is_err());

        dto.staff_ref = "c7b7d0a2-0000-0000-0000-000000000001".into();
        assert!(validate_form(&dto).is_ok());

        dto.end_time = dto.start_time;
        assert!(validate_form(&dto).is_err());
    }

    #[test]
    fn night_shift_is_valid() {
        let dto = ShiftDto {
            staff_ref: "s".into(),
            start_time: NaiveTime::from_hms_opt(22, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(6, 0, 0).unwrap(),
            ..Default::default()
        };
        assert!(validate_form(&dto).is_ok());
        assert_eq!(Shift::new_for_insert(&dto, String::new()).duration_hours(), 8.0);
    }
}
