use super::model;
use crate::domain::a007_payroll_entry::ui::run_action;
use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::{detail_key, detail_tab_label};
use crate::shared::number_format::format_money;
use crate::shared::toast::{use_toast, ToastService};
use contracts::domain::a007_payroll_entry::{PayrollAdjustmentDto, PayrollEntry, PayrollStatus};
use leptos::prelude::*;
use leptos::task::spawn_local;

/// Форма корректировки из сохранённого начисления; удержания по умолчанию фиксированы
pub fn form_from_entry(entry: &PayrollEntry) -> PayrollAdjustmentDto {
    PayrollAdjustmentDto {
        regular_hours: entry.regular_hours,
        overtime_hours: entry.overtime_hours,
        deductions: Some(entry.deductions),
        comment: entry.base.comment.clone(),
    }
}

pub fn validate_form(dto: &PayrollAdjustmentDto) -> Result<(), String> {
    if dto.regular_hours < 0.0 || dto.overtime_hours < 0.0 {
        return Err("Часы не могут быть отрицательными".into());
    }
    if dto.deductions.is_some_and(|d| d < 0.0) {
        return Err("Удержания не могут быть отрицательными".into());
    }
    Ok(())
}

#[derive(Clone, Copy)]
pub struct PayrollEntryDetailsViewModel {
    pub entry: RwSignal<Option<PayrollEntry>>,
    pub form: RwSignal<PayrollAdjustmentDto>,
    pub error: RwSignal<Option<String>>,
    pub saving: RwSignal<bool>,
    id: StoredValue<String>,
    toast: ToastService,
    ctx: AppGlobalContext,
}

impl PayrollEntryDetailsViewModel {
    pub fn new(id: String) -> Self {
        Self {
            entry: RwSignal::new(None),
            form: RwSignal::new(PayrollAdjustmentDto::default()),
            error: RwSignal::new(None),
            saving: RwSignal::new(false),
            id: StoredValue::new(id),
            toast: use_toast(),
            ctx: use_context::<AppGlobalContext>().expect("AppGlobalContext not found"),
        }
    }

    pub fn status(&self) -> Option<PayrollStatus> {
        self.entry.with(|e| e.as_ref().map(|e| e.status))
    }

    pub fn is_editable(&self) -> bool {
        self.entry.with(|e| e.as_ref().is_some_and(|e| e.is_editable()))
    }

    fn apply(&self, entry: PayrollEntry) {
        self.form.set(form_from_entry(&entry));
        self.entry.set(Some(entry));
    }

    pub fn load(&self) {
        let this = *self;
        let id = self.id.get_value();
        spawn_local(async move {
            match model::fetch_by_id(&id).await {
                Ok(entry) => {
                    this.ctx.update_tab_title(
                        &detail_key("a007_payroll_entry", &id),
                        &detail_tab_label("a007_payroll_entry", &entry.base.description),
                    );
                    this.apply(entry);
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
        let id = self.id.get_value();
        this.error.set(None);
        this.saving.set(true);
        spawn_local(async move {
            match model::adjust(&id, &current).await {
                Ok(entry) => {
                    this.toast.success(format!(
                        "Начисление пересчитано: к выплате {}",
                        format_money(entry.net_pay)
                    ));
                    this.apply(entry);
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

    /// approve / pay; вкладка остаётся открытой с обновлённым статусом
    pub fn action_command(&self, action: &'static str) {
        let this = *self;
        let id = self.id.get_value();
        this.saving.set(true);
        spawn_local(async move {
            match run_action(&id, action).await {
                Ok(entry) => {
                    this.toast
                        .success(format!("Статус: {}", entry.status.display_name()));
                    this.apply(entry);
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

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use contracts::domain::a007_payroll_entry::{HoursBreakdown, PayrollSettings};

    #[test]
    fn form_keeps_saved_deductions() {
        let entry = PayrollEntry::calculate(
            "PAY-1".into(),
            "staff-1".into(),
            "Анна".into(),
            NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            NaiveDate::from_ymd_opt(2026, 3, 31).unwrap(),
            HoursBreakdown {
                regular: 40.0,
                overtime: 2.0,
            },
            100.0,
            &PayrollSettings {
                flat_deduction_rate: 0.1,
                ..Default::default()
            },
        );
        let form = form_from_entry(&entry);
        assert_eq!(form.regular_hours, 40.0);
        assert_eq!(form.overtime_hours, 2.0);
        assert_eq!(form.deductions, Some(entry.deductions));
    }

    #[test]
    fn negative_values_rejected() {
        let mut dto = PayrollAdjustmentDto {
            regular_hours: 10.0,
            ..Default::default()
        };
        assert!(validate_form(&dto).is_ok());
        dto.deductions = Some(-1.0);
        assert!(validate_form(&dto).is_err());
        dto.deductions = None;
        dto.overtime_hours = -0.5;
        assert!(validate_form(&dto).is_err());
    }
}
