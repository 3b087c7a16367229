use super::calculation::{flat_deductions, gross_pay, round_money, HoursBreakdown, PayrollSettings};
use crate::domain::common::BaseAggregate;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

crate::aggregate_id!(
    /// Уникальный идентификатор начисления
    PayrollEntryId
);

/// Статус начисления: draft → approved → paid
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PayrollStatus {
    #[default]
    Draft,
    Approved,
    Paid,
}

impl PayrollStatus {
    pub fn code(&self) -> &'static str {
        match self {
            PayrollStatus::Draft => "draft",
            PayrollStatus::Approved => "approved",
            PayrollStatus::Paid => "paid",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            PayrollStatus::Draft => "Черновик",
            PayrollStatus::Approved => "Утверждено",
            PayrollStatus::Paid => "Выплачено",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        [PayrollStatus::Draft, PayrollStatus::Approved, PayrollStatus::Paid]
            .into_iter()
            .find(|s| s.code() == code)
    }
}

/// Начисление зарплаты сотруднику за период
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayrollEntry {
    /// `base.description` — ФИО сотрудника на момент расчёта
    #[serde(flatten)]
    pub base: BaseAggregate<PayrollEntryId>,

    #[serde(rename = "staffRef")]
    pub staff_ref: String,
    #[serde(rename = "periodStart")]
    pub period_start: NaiveDate,
    #[serde(rename = "periodEnd")]
    pub period_end: NaiveDate,
    #[serde(rename = "regularHours")]
    pub regular_hours: f64,
    #[serde(rename = "overtimeHours")]
    pub overtime_hours: f64,
    #[serde(rename = "hourlyRate")]
    pub hourly_rate: f64,
    #[serde(rename = "grossPay")]
    pub gross_pay: f64,
    pub deductions: f64,
    #[serde(rename = "netPay")]
    pub net_pay: f64,
    pub status: PayrollStatus,
}

impl PayrollEntry {
    /// Новое начисление-черновик по отработанным часам
    #[allow(clippy::too_many_arguments)]
    pub fn calculate(
        code: String,
        staff_ref: String,
        staff_name: String,
        period_start: NaiveDate,
        period_end: NaiveDate,
        hours: HoursBreakdown,
        hourly_rate: f64,
        settings: &PayrollSettings,
    ) -> Self {
        let gross = gross_pay(&hours, hourly_rate, settings);
        let deductions = flat_deductions(gross, settings);
        Self {
            base: BaseAggregate::new(PayrollEntryId::new_v4(), code, staff_name),
            staff_ref,
            period_start,
            period_end,
            regular_hours: hours.regular,
            overtime_hours: hours.overtime,
            hourly_rate,
            gross_pay: gross,
            deductions,
            net_pay: round_money(gross - deductions),
            status: PayrollStatus::Draft,
        }
    }

    pub fn hours(&self) -> HoursBreakdown {
        HoursBreakdown {
            regular: self.regular_hours,
            overtime: self.overtime_hours,
        }
    }

    pub fn is_editable(&self) -> bool {
        self.status == PayrollStatus::Draft
    }

    /// Ручная корректировка часов и удержаний (только черновик)
    pub fn adjust(
        &mut self,
        dto: &PayrollAdjustmentDto,
        settings: &PayrollSettings,
    ) -> Result<(), String> {
        if !self.is_editable() {
            return Err(format!(
                "Начисление в статусе «{}» нельзя изменить",
                self.status.display_name()
            ));
        }
        if dto.regular_hours < 0.0 || dto.overtime_hours < 0.0 {
            return Err("Часы не могут быть отрицательными".into());
        }
        let mut next = self.clone();
        next.regular_hours = dto.regular_hours;
        next.overtime_hours = dto.overtime_hours;
        next.gross_pay = gross_pay(&next.hours(), next.hourly_rate, settings);
        next.deductions = match dto.deductions {
            Some(d) => round_money(d),
            None => flat_deductions(next.gross_pay, settings),
        };
        next.net_pay = round_money(next.gross_pay - next.deductions);
        next.base.comment = dto.comment.clone();
        next.validate()?;
        *self = next;
        Ok(())
    }

    pub fn approve(&mut self) -> Result<(), String> {
        if self.status != PayrollStatus::Draft {
            return Err("Утвердить можно только черновик".into());
        }
        self.status = PayrollStatus::Approved;
        Ok(())
    }

    pub fn mark_paid(&mut self) -> Result<(), String> {
        if self.status != PayrollStatus::Approved {
            return Err("Выплатить можно только утверждённое начисление".into());
        }
        self.status = PayrollStatus::Paid;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.staff_ref.is_empty() {
            return Err("Не указан сотрудник".into());
        }
        if self.period_end < self.period_start {
            return Err("Конец периода раньше начала".into());
        }
        if self.deductions < 0.0 || self.deductions > self.gross_pay {
            return Err("Удержания должны быть в пределах начисленного".into());
        }
        Ok(())
    }
}

crate::impl_aggregate_root!(
    PayrollEntry,
    PayrollEntryId,
    "a007",
    "payroll_entry",
    "Начисление",
    "Зарплата"
);

/// Запрос на расчёт зарплаты за период
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayrollGenerateRequest {
    #[serde(rename = "periodStart")]
    pub period_start: NaiveDate,
    #[serde(rename = "periodEnd")]
    pub period_end: NaiveDate,
}

/// Результат расчёта
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayrollGenerateResponse {
    pub created: usize,
    pub replaced: usize,
    /// Сотрудники с уже утверждёнными/выплаченными начислениями за период
    pub skipped: usize,
    #[serde(rename = "totalGross")]
    pub total_gross: f64,
}

/// Ручная корректировка черновика
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PayrollAdjustmentDto {
    #[serde(rename = "regularHours")]
    pub regular_hours: f64,
    #[serde(rename = "overtimeHours")]
    pub overtime_hours: f64,
    /// `None` — пересчитать по плоской ставке
    pub deductions: Option<f64>,
    pub comment: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry() -> PayrollEntry {
        PayrollEntry::calculate(
            "PAY-1".into(),
            "staff-1".into(),
            "Анна".into(),
            NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            NaiveDate::from_ymd_opt(2026, 3, 15).unwrap(),
            HoursBreakdown {
                regular: 40.0,
                overtime: 4.0,
            },
            200.0,
            &PayrollSettings {
                flat_deduction_rate: 0.1,
                ..Default::default()
            },
        )
    }

    #[test]
    fn calculate_fills_amounts() {
        let e = entry();
        assert_eq!(e.gross_pay, 9_200.0);
        assert_eq!(e.deductions, 920.0);
        assert_eq!(e.net_pay, 8_280.0);
        assert_eq!(e.status, PayrollStatus::Draft);
        assert!(e.validate().is_ok());
    }

    #[test]
    fn lifecycle_is_strict() {
        let mut e = entry();
        assert!(e.mark_paid().is_err());
        e.approve().unwrap();
        assert!(e.approve().is_err());
        e.mark_paid().unwrap();
        assert_eq!(e.status, PayrollStatus::Paid);
    }

    #[test]
    fn adjust_only_in_draft_and_recomputes() {
        let settings = PayrollSettings::default();
        let mut e = entry();
        e.adjust(
            &PayrollAdjustmentDto {
                regular_hours: 10.0,
                overtime_hours: 0.0,
                deductions: Some(100.0),
                comment: None,
            },
            &settings,
        )
        .unwrap();
        assert_eq!(e.gross_pay, 2_000.0);
        assert_eq!(e.net_pay, 1_900.0);

        assert!(e
            .adjust(
                &PayrollAdjustmentDto {
                    regular_hours: 1.0,
                    overtime_hours: 0.0,
                    deductions: Some(500.0),
                    comment: None,
                },
                &settings,
            )
            .is_err());

        e.approve().unwrap();
        assert!(e.adjust(&PayrollAdjustmentDto::default(), &settings).is_err());
    }
}
