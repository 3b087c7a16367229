use super::model;
use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::{detail_key, detail_tab_label};
use crate::shared::toast::{use_toast, ToastService};
use chrono::Utc;
use contracts::domain::a006_kitchen_order::{
    KitchenOrder, KitchenOrderDto, KitchenOrderItemDto, OrderStatus, DEFAULT_PREP_MINUTES,
};
use leptos::prelude::*;
use leptos::task::spawn_local;

#[derive(Clone, Copy)]
pub struct KitchenOrderDetailsViewModel {
    pub form: RwSignal<KitchenOrderDto>,
    /// Статус загруженного заказа; форма его не меняет
    pub status: RwSignal<Option<OrderStatus>>,
    pub error: RwSignal<Option<String>>,
    pub saving: RwSignal<bool>,
    toast: ToastService,
    ctx: AppGlobalContext,
}

/// Пустая строка позиции для новой записи
pub fn blank_item() -> KitchenOrderItemDto {
    KitchenOrderItemDto {
        id: None,
        name: String::new(),
        quantity: 1,
        notes: None,
    }
}

/// Форма редактирует время приготовления в минутах, а не абсолютное время
pub fn form_from_order(order: &KitchenOrder) -> KitchenOrderDto {
    let mut dto = KitchenOrderDto::from(order);
    dto.estimated_minutes = Some((order.estimated_at - order.started_at).num_minutes());
    dto.estimated_at = None;
    dto
}

impl KitchenOrderDetailsViewModel {
    pub fn new() -> Self {
        Self {
            form: RwSignal::new(KitchenOrderDto {
                items: vec![blank_item()],
                estimated_minutes: Some(DEFAULT_PREP_MINUTES),
                ..Default::default()
            }),
            status: RwSignal::new(None),
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
                Ok(order) => {
                    this.ctx.update_tab_title(
                        &detail_key("a006_kitchen_order", &id),
                        &detail_tab_label("a006_kitchen_order", &order.base.code),
                    );
                    this.status.set(Some(order.status));
                    this.form.set(form_from_order(&order));
                }
                Err(e) => this.error.set(Some(format!("Ошибка загрузки: {}", e))),
            }
        });
    }

    pub fn add_item(&self) {
        self.form.update(|f| f.items.push(blank_item()));
    }

    pub fn remove_item(&self, index: usize) {
        self.form.update(|f| {
            if index < f.items.len() {
                f.items.remove(index);
            }
        });
    }

    pub fn update_item(&self, index: usize, apply: impl FnOnce(&mut KitchenOrderItemDto)) {
        self.form.update(|f| {
            if let Some(item) = f.items.get_mut(index) {
                apply(item);
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
                        .success(format!("Заказ для стола {} сохранён", current.table_number.trim()));
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

pub fn validate_form(dto: &KitchenOrderDto) -> Result<(), String> {
    if let Some(minutes) = dto.estimated_minutes {
        if minutes <= 0 {
            return Err("Время приготовления должно быть больше нуля".into());
        }
    }
    KitchenOrder::new_for_insert(dto, String::new(), Utc::now()).validate()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dto() -> KitchenOrderDto {
        KitchenOrderDto {
            table_number: "7".into(),
            items: vec![KitchenOrderItemDto {
                name: "Борщ".into(),
                ..blank_item()
            }],
            estimated_minutes: Some(15),
            ..Default::default()
        }
    }

    #[test]
    fn valid_order_passes() {
        assert!(validate_form(&dto()).is_ok());
    }

    #[test]
    fn rejects_empty_items_and_bad_minutes() {
        let mut d = dto();
        d.items[0].name.clear();
        assert!(validate_form(&d).is_err());

        let mut d = dto();
        d.items.clear();
        assert!(validate_form(&d).is_err());

        let mut d = dto();
        d.estimated_minutes = Some(0);
        assert!(validate_form(&d).is_err());
    }

    #[test]
    fn form_keeps_prep_minutes_of_loaded_order() {
        let order = KitchenOrder::new_for_insert(&dto(), "ORD-1".into(), Utc::now());
        let form = form_from_order(&order);
        assert_eq!(form.estimated_minutes, Some(15));
        assert_eq!(form.estimated_at, None);
        assert_eq!(form.items[0].id.as_deref(), Some(order.items[0].id.as_str()));
    }
}
