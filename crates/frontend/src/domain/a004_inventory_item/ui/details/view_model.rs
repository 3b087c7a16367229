use super::model;
use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::{detail_key, detail_tab_label};
use crate::shared::form::{opt_string, parse_number};
use crate::shared::number_format::format_quantity;
use crate::shared::toast::{use_toast, ToastService};
use contracts::domain::a004_inventory_item::{
    InventoryItem, InventoryItemDto, StockAdjustmentRequest, StockLevel,
};
use leptos::prelude::*;
use leptos::task::spawn_local;

#[derive(Clone, Copy)]
pub struct InventoryItemDetailsViewModel {
    pub form: RwSignal<InventoryItemDto>,
    pub error: RwSignal<Option<String>>,
    pub saving: RwSignal<bool>,
    /// Поле «количество» блока прихода/списания, как ввёл пользователь
    pub adjust_delta: RwSignal<String>,
    pub adjust_reason: RwSignal<String>,
    toast: ToastService,
    ctx: AppGlobalContext,
}

impl InventoryItemDetailsViewModel {
    pub fn new() -> Self {
        Self {
            form: RwSignal::new(InventoryItemDto::default()),
            error: RwSignal::new(None),
            saving: RwSignal::new(false),
            adjust_delta: RwSignal::new(String::new()),
            adjust_reason: RwSignal::new(String::new()),
            toast: use_toast(),
            ctx: use_context::<AppGlobalContext>().expect("AppGlobalContext not found"),
        }
    }

    pub fn is_edit_mode(&self) -> bool {
        self.form.with(|f| f.id.is_some())
    }

    pub fn stock_level(&self) -> StockLevel {
        self.form
            .with(|f| InventoryItem::new_for_insert(f, String::new()).stock_level())
    }

    pub fn load_if_needed(&self, id: Option<String>) {
        let Some(id) = id else {
            return;
        };
        let this = *self;
        spawn_local(async move {
            match model::fetch_by_id(&id).await {
                Ok(item) => {
                    this.ctx.update_tab_title(
                        &detail_key("a004_inventory_item", &id),
                        &detail_tab_label("a004_inventory_item", &item.base.code),
                    );
                    this.form.set(InventoryItemDto::from(&item));
                }
                Err(e) => this.error.set(Some(format!("Ошибка загрузки: {}", e))),
            }
        });
    }

    pub fn save_command(&self, on_saved: Callback<()>) {
        let current = self.form.get_untracked();
        if let Err(e) = InventoryItem::new_for_insert(&current, String::new()).validate() {
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
                        .success(format!("Позиция «{}» сохранена", current.description.trim()));
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

    /// Приход (`sign = 1.0`) или списание (`sign = -1.0`) введённого количества.
    /// Форма остаётся открытой, остаток обновляется ответом сервера.
    pub fn adjust_command(&self, sign: f64) {
        let Some(id) = self.form.with_untracked(|f| f.id.clone()) else {
            return;
        };
        let request = match build_adjustment(
            &self.adjust_delta.get_untracked(),
            &self.adjust_reason.get_untracked(),
            sign,
        ) {
            Ok(r) => r,
            Err(e) => {
                self.error.set(Some(e));
                return;
            }
        };

        let this = *self;
        this.error.set(None);
        this.saving.set(true);
        spawn_local(async move {
            match model::adjust(&id, &request).await {
                Ok(item) => {
                    this.toast.success(format!(
                        "Остаток «{}»: {}",
                        item.base.description,
                        format_quantity(item.quantity, &item.unit)
                    ));
                    this.form.update(|f| f.quantity = item.quantity);
                    this.adjust_delta.set(String::new());
                    this.adjust_reason.set(String::new());
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

fn build_adjustment(delta: &str, reason: &str, sign: f64) -> Result<StockAdjustmentRequest, String> {
    let amount = parse_number(delta)
        .filter(|v| *v > 0.0)
        .ok_or_else(|| "Укажите количество больше нуля".to_string())?;
    Ok(StockAdjustmentRequest {
        delta: amount * sign,
        reason: opt_string(reason.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adjustment_sign_and_reason() {
        let r = build_adjustment("2,5", "  ", -1.0).unwrap();
        assert_eq!(r.delta, -2.5);
        assert_eq!(r.reason, None);

        let r = build_adjustment("4", "поставка", 1.0).unwrap();
        assert_eq!(r.delta, 4.0);
        assert_eq!(r.reason.as_deref(), Some("поставка"));
    }

    #[test]
    fn adjustment_rejects_zero_and_garbage() {
        assert!(build_adjustment("0", "", 1.0).is_err());
        assert!(build_adjustment("-3", "", 1.0).is_err());
        assert!(build_adjustment("abc", "", 1.0).is_err());
    }
}
