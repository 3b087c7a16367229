//! Расчёт часов и начислений по сменам.
//!
//! Налоговые таблицы не поддерживаются: удержания считаются
//! одной плоской ставкой от начисленной суммы.

use crate::domain::a002_shift::{week_start, Shift};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Параметры расчёта зарплаты
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PayrollSettings {
    /// Часы в неделю, после которых начинается переработка
    pub overtime_weekly_hours: f64,
    /// Коэффициент оплаты переработки
    pub overtime_multiplier: f64,
    /// Доля удержаний от начисленного (0.0..=1.0)
    pub flat_deduction_rate: f64,
}

impl Default for PayrollSettings {
    fn default() -> Self {
        Self {
            overtime_weekly_hours: 40.0,
            overtime_multiplier: 1.5,
            flat_deduction_rate: 0.0,
        }
    }
}

/// Часы за период, разбитые на обычные и переработку
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct HoursBreakdown {
    pub regular: f64,
    pub overtime: f64,
}

impl HoursBreakdown {
    pub fn total(&self) -> f64 {
        self.regular + self.overtime
    }

    /// Часы по сменам с датой начала в `[period_start, period_end]`.
    /// Переработка считается отдельно для каждой ISO-недели.
    pub fn from_shifts(
        shifts: &[Shift],
        period_start: NaiveDate,
        period_end: NaiveDate,
        settings: &PayrollSettings,
    ) -> Self {
        let mut per_week: BTreeMap<NaiveDate, f64> = BTreeMap::new();
        for shift in shifts
            .iter()
            .filter(|s| s.shift_date >= period_start && s.shift_date <= period_end)
        {
            *per_week.entry(week_start(shift.shift_date)).or_default() += shift.duration_hours();
        }

        per_week
            .values()
            .fold(HoursBreakdown::default(), |mut acc, &hours| {
                let overtime = (hours - settings.overtime_weekly_hours).max(0.0);
                acc.regular += hours - overtime;
                acc.overtime += overtime;
                acc
            })
    }
}

/// Округление денежной суммы до копеек
pub fn round_money(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Начисление за часы по ставке
pub fn gross_pay(hours: &HoursBreakdown, hourly_rate: f64, settings: &PayrollSettings) -> f64 {
    round_money(
        hours.regular * hourly_rate + hours.overtime * hourly_rate * settings.overtime_multiplier,
    )
}

/// Удержания по плоской ставке
pub fn flat_deductions(gross: f64, settings: &PayrollSettings) -> f64 {
    round_money(gross * settings.flat_deduction_rate.clamp(0.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a002_shift::ShiftDto;
    use chrono::NaiveTime;

    fn shift(day: u32, start: u32, end: u32) -> Shift {
        Shift::new_for_insert(
            &ShiftDto {
                staff_ref: "s".into(),
                shift_date: NaiveDate::from_ymd_opt(2026, 3, day).unwrap(),
                start_time: NaiveTime::from_hms_opt(start, 0, 0).unwrap(),
                end_time: NaiveTime::from_hms_opt(end, 0, 0).unwrap(),
                ..Default::default()
            },
            "SH".into(),
        )
    }

    fn march(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, day).unwrap()
    }

    #[test]
    fn overtime_is_per_week() {
        // week of 2026-03-02: 5 x 10h = 50h; week of 2026-03-09: 2 x 10h = 20h
        let mut shifts: Vec<Shift> = (2..=6).map(|d| shift(d, 8, 18)).collect();
        shifts.push(shift(9, 8, 18));
        shifts.push(shift(10, 8, 18));

        let hours =
            HoursBreakdown::from_shifts(&shifts, march(1), march(31), &PayrollSettings::default());
        assert_eq!(hours.regular, 60.0);
        assert_eq!(hours.overtime, 10.0);
        assert_eq!(hours.total(), 70.0);
    }

    #[test]
    fn shifts_outside_period_are_ignored() {
        let shifts = vec![shift(2, 8, 12), shift(20, 8, 12)];
        let hours =
            HoursBreakdown::from_shifts(&shifts, march(1), march(15), &PayrollSettings::default());
        assert_eq!(hours.total(), 4.0);
    }

    #[test]
    fn gross_and_deductions() {
        let settings = PayrollSettings {
            flat_deduction_rate: 0.13,
            ..Default::default()
        };
        let hours = HoursBreakdown {
            regular: 40.0,
            overtime: 2.0,
        };
        let gross = gross_pay(&hours, 300.0, &settings);
        assert_eq!(gross, 12_900.0);
        assert_eq!(flat_deductions(gross, &settings), 1_677.0);
    }

    #[test]
    fn money_rounding() {
        assert_eq!(round_money(10.005_1), 10.01);
        assert_eq!(round_money(3.333_333), 3.33);
    }
}
