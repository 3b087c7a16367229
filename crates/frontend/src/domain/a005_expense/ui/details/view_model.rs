use super::model;
use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::{detail_key, detail_tab_label};
use crate::shared::date_utils::today;
use crate::shared::toast::{use_toast, ToastService};
use contracts::domain::a005_expense::{Expense, ExpenseDto};
use leptos::prelude::*;
use leptos::task::spawn_local;

#[derive(Clone, Copy)]
pub struct ExpenseDetailsViewModel {
    pub form: RwSignal<ExpenseDto>,
    pub error: RwSignal<Option<String>>,
    pub saving: RwSignal<bool>,
    toast: ToastService,
    ctx: AppGlobalContext,
}

impl ExpenseDetailsViewModel {
    pub fn new() -> Self {
        Self {
            // Дата по умолчанию берётся из часового пояса браузера, а не UTC
            form: RwSignal::new(ExpenseDto {
                expense_date: today(),
                ..Default::default()
            }),
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
                Ok(expense) => {
                    this.ctx.update_tab_title(
                        &detail_key("a005_expense", &id),
                        &detail_tab_label("a005_expense", &expense.base.code),
                    );
                    this.form.set(ExpenseDto::from(&expense));
                }
                Err(e) => this.error.set(Some(format!("Ошибка загрузки: {}", e))),
            }
        });
    }

    pub fn save_command(&self, on_saved: Callback<()>) {
        let current = self.form.get_untracked();
        if let Err(e) = Expense::new_for_insert(&current, String::new()).validate() {
            self.error.set(Some(e));
            return;
        }

        let this = *self;
        this.error.set(None);
        this.saving.set(true);
        spawn_local(async move {
            match model::save_form(&current).await {
                Ok(_) => {
                    this.toast.success("Расход сохранён");
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
