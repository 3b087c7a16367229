use crate::domain::common::BaseAggregate;
use crate::shared::order_timer::TimerSnapshot;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

crate::aggregate_id!(
    /// Уникальный идентификатор заказа кухни
    KitchenOrderId
);

/// Плановое время приготовления, если оценка не передана
pub const DEFAULT_PREP_MINUTES: i64 = 20;

/// Верхняя граница планового времени приготовления
pub const MAX_PREP_MINUTES: i64 = 24 * 60;

/// `started_at + minutes` без паники на переполнении.
///
/// Минуты зажимаются в `0..=MAX_PREP_MINUTES + 1`: выход за границы
/// ловит `validate()`.
fn estimate_from(started_at: DateTime<Utc>, minutes: i64) -> DateTime<Utc> {
    let minutes = minutes.clamp(0, MAX_PREP_MINUTES + 1);
    started_at
        .checked_add_signed(Duration::minutes(minutes))
        .unwrap_or(started_at)
}

// ============================================================================
// Enums
// ============================================================================

/// Статус заказа и позиции заказа.
///
/// Порядок объявления задаёт порядок жизненного цикла:
/// pending → preparing → ready → delivered.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Pending,
    Preparing,
    Ready,
    Delivered,
}

impl OrderStatus {
    pub fn code(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Preparing => "preparing",
            OrderStatus::Ready => "ready",
            OrderStatus::Delivered => "delivered",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Ожидает",
            OrderStatus::Preparing => "Готовится",
            OrderStatus::Ready => "Готов",
            OrderStatus::Delivered => "Выдан",
        }
    }

    pub fn all() -> Vec<OrderStatus> {
        vec![
            OrderStatus::Pending,
            OrderStatus::Preparing,
            OrderStatus::Ready,
            OrderStatus::Delivered,
        ]
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::all().into_iter().find(|s| s.code() == code)
    }

    /// Следующий статус по жизненному циклу
    pub fn next(&self) -> Option<OrderStatus> {
        match self {
            OrderStatus::Pending => Some(OrderStatus::Preparing),
            OrderStatus::Preparing => Some(OrderStatus::Ready),
            OrderStatus::Ready => Some(OrderStatus::Delivered),
            OrderStatus::Delivered => None,
        }
    }

    /// Переход допустим только вперёд (с пропуском шагов) или на месте
    pub fn can_transition_to(&self, next: OrderStatus) -> bool {
        next >= *self
    }
}

/// Приоритет заказа
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderPriority {
    Low,
    #[default]
    Normal,
    High,
    Rush,
}

impl OrderPriority {
    pub fn code(&self) -> &'static str {
        match self {
            OrderPriority::Low => "low",
            OrderPriority::Normal => "normal",
            OrderPriority::High => "high",
            OrderPriority::Rush => "rush",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            OrderPriority::Low => "Низкий",
            OrderPriority::Normal => "Обычный",
            OrderPriority::High => "Высокий",
            OrderPriority::Rush => "Срочно",
        }
    }

    pub fn all() -> Vec<OrderPriority> {
        vec![
            OrderPriority::Low,
            OrderPriority::Normal,
            OrderPriority::High,
            OrderPriority::Rush,
        ]
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::all().into_iter().find(|p| p.code() == code)
    }
}

// ============================================================================
// Line item
// ============================================================================

/// Позиция заказа со своим статусом приготовления
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KitchenOrderItem {
    pub id: String,
    pub name: String,
    pub quantity: u32,
    pub status: OrderStatus,
    pub notes: Option<String>,
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// Заказ, переданный на кухню.
///
/// `base.description` — человекочитаемая подпись ("Стол 5"),
/// `base.comment` — общие пожелания к заказу.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KitchenOrder {
    #[serde(flatten)]
    pub base: BaseAggregate<KitchenOrderId>,

    #[serde(rename = "tableNumber")]
    pub table_number: String,
    #[serde(rename = "serverName")]
    pub server_name: Option<String>,
    pub status: OrderStatus,
    pub priority: OrderPriority,
    pub items: Vec<KitchenOrderItem>,
    #[serde(rename = "startedAt")]
    pub started_at: DateTime<Utc>,
    /// Плановое время выдачи
    #[serde(rename = "estimatedAt")]
    pub estimated_at: DateTime<Utc>,
    #[serde(rename = "deliveredAt")]
    pub delivered_at: Option<DateTime<Utc>>,
}

impl KitchenOrder {
    pub fn new_for_insert(dto: &KitchenOrderDto, code: String, now: DateTime<Utc>) -> Self {
        let started_at = dto.started_at.unwrap_or(now);
        let mut order = Self {
            base: BaseAggregate::new(KitchenOrderId::new_v4(), code, String::new()),
            table_number: String::new(),
            server_name: None,
            status: OrderStatus::Pending,
            priority: dto.priority,
            items: Vec::new(),
            started_at,
            estimated_at: estimate_from(started_at, DEFAULT_PREP_MINUTES),
            delivered_at: None,
        };
        order.update(dto);
        order
    }

    /// Обновить данные из DTO.
    ///
    /// Статусы существующих позиций (совпадающих по `id`) сохраняются,
    /// новые позиции начинают с `Pending`.
    pub fn update(&mut self, dto: &KitchenOrderDto) {
        if let Some(code) = dto.code.as_ref().filter(|c| !c.trim().is_empty()) {
            self.base.code = code.clone();
        }
        self.table_number = dto.table_number.trim().to_string();
        self.base.description = format!("Стол {}", self.table_number);
        self.base.comment = dto.comment.clone().filter(|c| !c.trim().is_empty());
        self.server_name = dto.server_name.clone().filter(|s| !s.trim().is_empty());
        self.priority = dto.priority;
        if let Some(started_at) = dto.started_at {
            self.started_at = started_at;
        }
        self.estimated_at = match (dto.estimated_at, dto.estimated_minutes) {
            (Some(at), _) => at,
            (None, Some(minutes)) => estimate_from(self.started_at, minutes),
            (None, None) => self.estimated_at,
        };

        let previous = std::mem::take(&mut self.items);
        self.items = dto
            .items
            .iter()
            .map(|line| {
                let existing = line
                    .id
                    .as_ref()
                    .and_then(|id| previous.iter().find(|p| &p.id == id));
                KitchenOrderItem {
                    id: existing
                        .map(|p| p.id.clone())
                        .unwrap_or_else(|| Uuid::new_v4().to_string()),
                    name: line.name.trim().to_string(),
                    quantity: line.quantity,
                    status: existing.map(|p| p.status).unwrap_or_default(),
                    notes: line.notes.clone().filter(|n| !n.trim().is_empty()),
                }
            })
            .collect();
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.table_number.is_empty() {
            return Err("Не указан номер стола".into());
        }
        if self.items.is_empty() {
            return Err("Заказ должен содержать хотя бы одну позицию".into());
        }
        for item in &self.items {
            if item.name.is_empty() {
                return Err("Наименование позиции не может быть пустым".into());
            }
            if item.quantity == 0 {
                return Err(format!("Количество для «{}» должно быть больше нуля", item.name));
            }
        }
        if self.estimated_at <= self.started_at {
            return Err("Плановое время выдачи должно быть позже начала".into());
        }
        if self.estimated_at - self.started_at > Duration::minutes(MAX_PREP_MINUTES) {
            return Err("Время приготовления не может превышать 24 часа".into());
        }
        Ok(())
    }

    pub fn is_active(&self) -> bool {
        self.status != OrderStatus::Delivered
    }

    /// Сменить статус заказа.
    ///
    /// Позиции, отстающие от нового статуса, подтягиваются до него.
    /// При выдаче проставляется `delivered_at`.
    pub fn set_status(&mut self, next: OrderStatus, now: DateTime<Utc>) -> Result<(), String> {
        if !self.status.can_transition_to(next) {
            return Err(format!(
                "Недопустимый переход статуса: {} → {}",
                self.status.display_name(),
                next.display_name()
            ));
        }
        self.status = next;
        for item in &mut self.items {
            if item.status < next {
                item.status = next;
            }
        }
        self.stamp_delivery(now);
        Ok(())
    }

    /// Сменить статус одной позиции и пересчитать статус заказа
    pub fn set_item_status(
        &mut self,
        item_id: &str,
        next: OrderStatus,
        now: DateTime<Utc>,
    ) -> Result<(), String> {
        let item = self
            .items
            .iter_mut()
            .find(|i| i.id == item_id)
            .ok_or_else(|| format!("Позиция {} не найдена", item_id))?;
        if !item.status.can_transition_to(next) {
            return Err(format!(
                "Недопустимый переход статуса позиции «{}»: {} → {}",
                item.name,
                item.status.display_name(),
                next.display_name()
            ));
        }
        item.status = next;

        let derived = self.status_from_items();
        if derived > self.status {
            self.status = derived;
        }
        self.stamp_delivery(now);
        Ok(())
    }

    /// Статус заказа, выведенный из статусов позиций
    pub fn status_from_items(&self) -> OrderStatus {
        let Some(min) = self.items.iter().map(|i| i.status).min() else {
            return self.status;
        };
        if min >= OrderStatus::Ready {
            min
        } else if self.items.iter().any(|i| i.status >= OrderStatus::Preparing) {
            OrderStatus::Preparing
        } else {
            OrderStatus::Pending
        }
    }

    fn stamp_delivery(&mut self, now: DateTime<Utc>) {
        if self.status == OrderStatus::Delivered && self.delivered_at.is_none() {
            self.delivered_at = Some(now);
        }
    }

    pub fn timer(&self, now: DateTime<Utc>) -> TimerSnapshot {
        TimerSnapshot::compute(now, self.started_at, self.estimated_at)
    }

    pub fn total_portions(&self) -> u32 {
        self.items.iter().map(|i| i.quantity).sum()
    }
}

/// Порядок вывода активных заказов: сначала срочные, затем по плановому времени
pub fn sort_for_kitchen(orders: &mut [KitchenOrder]) {
    orders.sort_by(|a, b| {
        b.priority
            .cmp(&a.priority)
            .then(a.estimated_at.cmp(&b.estimated_at))
            .then(a.base.code.cmp(&b.base.code))
    });
}

crate::impl_aggregate_root!(
    KitchenOrder,
    KitchenOrderId,
    "a006",
    "kitchen_order",
    "Заказ кухни",
    "Заказы кухни"
);

// ============================================================================
// Forms / DTOs
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct KitchenOrderItemDto {
    pub id: Option<String>,
    pub name: String,
    pub quantity: u32,
    pub notes: Option<String>,
}

/// DTO для создания/обновления заказа кухни
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct KitchenOrderDto {
    pub id: Option<String>,
    pub code: Option<String>,
    #[serde(rename = "tableNumber")]
    pub table_number: String,
    #[serde(rename = "serverName")]
    pub server_name: Option<String>,
    pub priority: OrderPriority,
    pub items: Vec<KitchenOrderItemDto>,
    #[serde(rename = "startedAt")]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(rename = "estimatedAt")]
    pub estimated_at: Option<DateTime<Utc>>,
    /// Альтернатива `estimated_at`: минуты от начала
    #[serde(rename = "estimatedMinutes")]
    pub estimated_minutes: Option<i64>,
    pub comment: Option<String>,
}

impl From<&KitchenOrder> for KitchenOrderDto {
    fn from(o: &KitchenOrder) -> Self {
        use crate::domain::common::AggregateId;
        Self {
            id: Some(o.base.id.as_string()),
            code: Some(o.base.code.clone()),
            table_number: o.table_number.clone(),
            server_name: o.server_name.clone(),
            priority: o.priority,
            items: o
                .items
                .iter()
                .map(|i| KitchenOrderItemDto {
                    id: Some(i.id.clone()),
                    name: i.name.clone(),
                    quantity: i.quantity,
                    notes: i.notes.clone(),
                })
                .collect(),
            started_at: Some(o.started_at),
            estimated_at: Some(o.estimated_at),
            estimated_minutes: None,
            comment: o.base.comment.clone(),
        }
    }
}

/// Запрос на смену статуса заказа или позиции
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusChangeRequest {
    pub status: OrderStatus,
}

/// Настройки доски кухни, которые клиент берёт с сервера
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KitchenBoardSettings {
    /// За сколько минут до выдачи срабатывает оповещение
    pub alert_threshold_minutes: i64,
}

impl Default for KitchenBoardSettings {
    fn default() -> Self {
        Self {
            alert_threshold_minutes: crate::shared::order_timer::DEFAULT_ALERT_THRESHOLD_MINUTES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 6, 1, 18, 0, 0).unwrap()
    }

    fn order() -> KitchenOrder {
        let dto = KitchenOrderDto {
            table_number: "5".into(),
            items: vec![
                KitchenOrderItemDto {
                    name: "Борщ".into(),
                    quantity: 2,
                    ..Default::default()
                },
                KitchenOrderItemDto {
                    name: "Стейк".into(),
                    quantity: 1,
                    ..Default::default()
                },
            ],
            estimated_minutes: Some(25),
            ..Default::default()
        };
        KitchenOrder::new_for_insert(&dto, "ORD-0001".into(), t0())
    }

    #[test]
    fn new_order_defaults() {
        let o = order();
        assert_eq!(o.status, OrderStatus::Pending);
        assert_eq!(o.base.description, "Стол 5");
        assert_eq!(o.estimated_at, t0() + Duration::minutes(25));
        assert_eq!(o.total_portions(), 3);
        assert!(o.validate().is_ok());
        assert!(o.is_active());
    }

    #[test]
    fn default_estimate_is_applied_without_hint() {
        let dto = KitchenOrderDto {
            table_number: "1".into(),
            items: vec![KitchenOrderItemDto {
                name: "Чай".into(),
                quantity: 1,
                ..Default::default()
            }],
            ..Default::default()
        };
        let o = KitchenOrder::new_for_insert(&dto, "ORD-0002".into(), t0());
        assert_eq!(o.estimated_at, t0() + Duration::minutes(DEFAULT_PREP_MINUTES));
    }

    #[test]
    fn out_of_range_estimate_is_rejected_without_panic() {
        let mut dto = KitchenOrderDto {
            table_number: "3".into(),
            items: vec![KitchenOrderItemDto {
                name: "Суп".into(),
                quantity: 1,
                ..Default::default()
            }],
            estimated_minutes: Some(i64::MAX / 60),
            ..Default::default()
        };
        let o = KitchenOrder::new_for_insert(&dto, "ORD-0003".into(), t0());
        assert!(o.validate().is_err());

        dto.estimated_minutes = Some(i64::MIN);
        let o = KitchenOrder::new_for_insert(&dto, "ORD-0003".into(), t0());
        assert!(o.validate().is_err());

        dto.estimated_minutes = None;
        dto.started_at = Some(DateTime::<Utc>::MAX_UTC);
        let o = KitchenOrder::new_for_insert(&dto, "ORD-0003".into(), t0());
        assert!(o.validate().is_err());

        dto.started_at = None;
        dto.estimated_minutes = Some(MAX_PREP_MINUTES);
        let mut o = KitchenOrder::new_for_insert(&dto, "ORD-0003".into(), t0());
        assert!(o.validate().is_ok());
        dto.estimated_minutes = Some(MAX_PREP_MINUTES + 1);
        o.update(&dto);
        assert!(o.validate().is_err());
    }

    #[test]
    fn status_moves_forward_only() {
        let mut o = order();
        assert!(o.set_status(OrderStatus::Ready, t0()).is_ok());
        assert!(o.items.iter().all(|i| i.status == OrderStatus::Ready));
        assert!(o.set_status(OrderStatus::Preparing, t0()).is_err());
        assert_eq!(o.status, OrderStatus::Ready);
        assert!(o.set_status(OrderStatus::Ready, t0()).is_ok());
    }

    #[test]
    fn delivery_is_stamped_once() {
        let mut o = order();
        let later = t0() + Duration::minutes(30);
        o.set_status(OrderStatus::Delivered, later).unwrap();
        assert_eq!(o.delivered_at, Some(later));
        o.set_status(OrderStatus::Delivered, later + Duration::minutes(5))
            .unwrap();
        assert_eq!(o.delivered_at, Some(later));
        assert!(!o.is_active());
    }

    #[test]
    fn item_status_drives_order_status() {
        let mut o = order();
        let first = o.items[0].id.clone();
        let second = o.items[1].id.clone();

        o.set_item_status(&first, OrderStatus::Preparing, t0()).unwrap();
        assert_eq!(o.status, OrderStatus::Preparing);

        o.set_item_status(&first, OrderStatus::Ready, t0()).unwrap();
        assert_eq!(o.status, OrderStatus::Preparing);

        o.set_item_status(&second, OrderStatus::Ready, t0()).unwrap();
        assert_eq!(o.status, OrderStatus::Ready);

        o.set_item_status(&first, OrderStatus::Delivered, t0()).unwrap();
        assert_eq!(o.status, OrderStatus::Ready);
        o.set_item_status(&second, OrderStatus::Delivered, t0()).unwrap();
        assert_eq!(o.status, OrderStatus::Delivered);
        assert!(o.delivered_at.is_some());
    }

    #[test]
    fn item_status_cannot_move_back_or_reference_unknown_item() {
        let mut o = order();
        let first = o.items[0].id.clone();
        o.set_item_status(&first, OrderStatus::Ready, t0()).unwrap();
        assert!(o.set_item_status(&first, OrderStatus::Pending, t0()).is_err());
        assert!(o.set_item_status("missing", OrderStatus::Ready, t0()).is_err());
    }

    #[test]
    fn derived_status_never_lowers_order_status() {
        let mut o = order();
        o.set_status(OrderStatus::Preparing, t0()).unwrap();
        let first = o.items[0].id.clone();
        // all items are already Preparing; marking one Ready keeps the order Preparing
        o.set_item_status(&first, OrderStatus::Ready, t0()).unwrap();
        assert_eq!(o.status, OrderStatus::Preparing);
    }

    #[test]
    fn update_keeps_statuses_of_existing_lines() {
        let mut o = order();
        let first = o.items[0].id.clone();
        o.set_item_status(&first, OrderStatus::Ready, t0()).unwrap();

        let mut dto = KitchenOrderDto::from(&o);
        dto.items.push(KitchenOrderItemDto {
            name: "Компот".into(),
            quantity: 1,
            ..Default::default()
        });
        o.update(&dto);

        assert_eq!(o.items.len(), 3);
        assert_eq!(o.items[0].status, OrderStatus::Ready);
        assert_eq!(o.items[2].status, OrderStatus::Pending);
    }

    #[test]
    fn validation_catches_bad_input() {
        let mut o = order();
        o.items[0].quantity = 0;
        assert!(o.validate().is_err());

        let mut o = order();
        o.estimated_at = o.started_at;
        assert!(o.validate().is_err());

        let mut o = order();
        o.items.clear();
        assert!(o.validate().is_err());
    }

    #[test]
    fn kitchen_sort_puts_rush_first_then_earliest() {
        let mut a = order();
        a.base.code = "A".into();
        a.estimated_at = t0() + Duration::minutes(10);
        let mut b = order();
        b.base.code = "B".into();
        b.priority = OrderPriority::Rush;
        b.estimated_at = t0() + Duration::minutes(40);
        let mut c = order();
        c.base.code = "C".into();
        c.estimated_at = t0() + Duration::minutes(5);

        let mut list = vec![a, b, c];
        sort_for_kitchen(&mut list);
        let codes: Vec<&str> = list.iter().map(|o| o.base.code.as_str()).collect();
        assert_eq!(codes, vec!["B", "C", "A"]);
    }
}
