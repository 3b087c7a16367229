use crate::domain::common::BaseAggregate;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ============================================================================
// ID Type
// ============================================================================

crate::aggregate_id!(
    /// Уникальный идентификатор сотрудника
    StaffId
);

// ============================================================================
// Enums
// ============================================================================

/// Должность сотрудника
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StaffRole {
    Manager,
    Chef,
    LineCook,
    #[default]
    Server,
    Host,
    Bartender,
    Dishwasher,
}

impl StaffRole {
    pub fn code(&self) -> &'static str {
        match self {
            StaffRole::Manager => "manager",
            StaffRole::Chef => "chef",
            StaffRole::LineCook => "line_cook",
            StaffRole::Server => "server",
            StaffRole::Host => "host",
            StaffRole::Bartender => "bartender",
            StaffRole::Dishwasher => "dishwasher",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            StaffRole::Manager => "Управляющий",
            StaffRole::Chef => "Шеф-повар",
            StaffRole::LineCook => "Повар",
            StaffRole::Server => "Официант",
            StaffRole::Host => "Хостес",
            StaffRole::Bartender => "Бармен",
            StaffRole::Dishwasher => "Мойщик",
        }
    }

    pub fn all() -> Vec<StaffRole> {
        vec![
            StaffRole::Manager,
            StaffRole::Chef,
            StaffRole::LineCook,
            StaffRole::Server,
            StaffRole::Host,
            StaffRole::Bartender,
            StaffRole::Dishwasher,
        ]
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::all().into_iter().find(|r| r.code() == code)
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// Сотрудник ресторана
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Staff {
    /// `base.description` хранит ФИО сотрудника
    #[serde(flatten)]
    pub base: BaseAggregate<StaffId>,

    pub role: StaffRole,
    #[serde(rename = "hourlyRate")]
    pub hourly_rate: f64,
    pub phone: Option<String>,
    pub email: Option<String>,
    #[serde(rename = "hireDate")]
    pub hire_date: Option<NaiveDate>,
    #[serde(rename = "isActive")]
    pub is_active: bool,
}

impl Staff {
    /// Создать нового сотрудника для вставки в БД
    pub fn new_for_insert(dto: &StaffDto, code: String) -> Self {
        let mut staff = Self {
            base: BaseAggregate::new(StaffId::new_v4(), code, dto.description.clone()),
            role: dto.role,
            hourly_rate: dto.hourly_rate,
            phone: None,
            email: None,
            hire_date: None,
            is_active: true,
        };
        staff.update(dto);
        staff
    }

    /// Обновить данные из DTO
    pub fn update(&mut self, dto: &StaffDto) {
        if let Some(code) = dto.code.as_ref().filter(|c| !c.trim().is_empty()) {
            self.base.code = code.clone();
        }
        self.base.description = dto.description.trim().to_string();
        self.base.comment = dto.comment.clone();
        self.role = dto.role;
        self.hourly_rate = dto.hourly_rate;
        self.phone = normalize_optional(&dto.phone);
        self.email = normalize_optional(&dto.email);
        self.hire_date = dto.hire_date;
        self.is_active = dto.is_active;
    }

    /// Валидация данных
    pub fn validate(&self) -> Result<(), String> {
        if self.base.description.trim().is_empty() {
            return Err("ФИО сотрудника не может быть пустым".into());
        }
        if self.base.code.trim().is_empty() {
            return Err("Код не может быть пустым".into());
        }
        if !self.hourly_rate.is_finite() || self.hourly_rate < 0.0 {
            return Err("Почасовая ставка не может быть отрицательной".into());
        }
        if let Some(email) = &self.email {
            if !email.contains('@') {
                return Err("Некорректный email".into());
            }
        }
        Ok(())
    }

    pub fn full_name(&self) -> &str {
        &self.base.description
    }
}

fn normalize_optional(value: &Option<String>) -> Option<String> {
    value
        .as_ref()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

crate::impl_aggregate_root!(Staff, StaffId, "a001", "staff", "Сотрудник", "Сотрудники");

// ============================================================================
// Forms / DTOs
// ============================================================================

/// DTO для создания/обновления сотрудника
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffDto {
    pub id: Option<String>,
    pub code: Option<String>,
    pub description: String,
    pub role: StaffRole,
    #[serde(rename = "hourlyRate")]
    pub hourly_rate: f64,
    pub phone: Option<String>,
    pub email: Option<String>,
    #[serde(rename = "hireDate")]
    pub hire_date: Option<NaiveDate>,
    #[serde(rename = "isActive")]
    pub is_active: bool,
    pub comment: Option<String>,
}

impl Default for StaffDto {
    fn default() -> Self {
        Self {
            id: None,
            code: None,
            description: String::new(),
            role: StaffRole::default(),
            hourly_rate: 0.0,
            phone: None,
            email: None,
            hire_date: None,
            is_active: true,
            comment: None,
        }
    }
}

impl From<&Staff> for StaffDto {
    fn from(s: &Staff) -> Self {
        use crate::domain::common::AggregateId;
        Self {
            id: Some(s.base.id.as_string()),
            code: Some(s.base.code.clone()),
            description: s.base.description.clone(),
            role: s.role,
            hourly_rate: s.hourly_rate,
            phone: s.phone.clone(),
            email: s.email.clone(),
            hire_date: s.hire_date,
            is_active: s.is_active,
            comment: s.base.comment.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dto(name: &str, rate: f64) -> StaffDto {
        StaffDto {
            description: name.into(),
            hourly_rate: rate,
            ..Default::default()
        }
    }

    #[test]
    fn new_staff_is_active_and_valid() {
        let staff = Staff::new_for_insert(&dto("Анна Петрова", 450.0), "STF-001".into());
        assert!(staff.is_active);
        assert_eq!(staff.full_name(), "Анна Петрова");
        assert!(staff.validate().is_ok());
    }

    #[test]
    fn rejects_negative_rate_and_blank_name() {
        let staff = Staff::new_for_insert(&dto("Иван", -1.0), "STF-002".into());
        assert!(staff.validate().is_err());

        let staff = Staff::new_for_insert(&dto("   ", 100.0), "STF-003".into());
        assert!(staff.validate().is_err());
    }

    #[test]
    fn blank_optional_fields_are_dropped_and_email_checked() {
        let mut d = dto("Олег", 300.0);
        d.phone = Some("  ".into());
        d.email = Some("oleg.example.com".into());
        let staff = Staff::new_for_insert(&d, "STF-004".into());
        assert_eq!(staff.phone, None);
        assert!(staff.validate().is_err());
    }

    #[test]
    fn role_codes_round_trip() {
        for role in StaffRole::all() {
            assert_eq!(StaffRole::from_code(role.code()), Some(role));
        }
    }
}
