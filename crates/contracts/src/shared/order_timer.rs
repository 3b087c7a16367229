//! Таймер заказа кухни: обратный отсчёт до расчётного времени выдачи
//! и однократное оповещение при приближении к нему.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Порог оповещения по умолчанию, минут
pub const DEFAULT_ALERT_THRESHOLD_MINUTES: i64 = 5;

/// Состояние отсчёта на момент `now`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    /// Оставшиеся минуты, округление вверх; отрицательные при просрочке
    #[serde(rename = "remainingMinutes")]
    pub remaining_minutes: i64,
    #[serde(rename = "remainingSeconds")]
    pub remaining_seconds: i64,
    /// Доля прошедшего времени, 0..=100
    #[serde(rename = "progressPercent")]
    pub progress_percent: f64,
    #[serde(rename = "isOverdue")]
    pub is_overdue: bool,
}

impl TimerSnapshot {
    pub fn compute(
        now: DateTime<Utc>,
        started_at: DateTime<Utc>,
        estimated_at: DateTime<Utc>,
    ) -> Self {
        let remaining_seconds = (estimated_at - now).num_seconds();
        let total_seconds = (estimated_at - started_at).num_seconds();
        let elapsed_seconds = (now - started_at).num_seconds();

        let progress_percent = if total_seconds <= 0 {
            100.0
        } else {
            (elapsed_seconds as f64 / total_seconds as f64 * 100.0).clamp(0.0, 100.0)
        };

        Self {
            remaining_minutes: ceil_div(remaining_seconds, 60),
            remaining_seconds,
            progress_percent,
            is_overdue: remaining_seconds < 0,
        }
    }

    /// "12:05" или "-03:10" для просроченных
    pub fn format_remaining(&self) -> String {
        let sign = if self.remaining_seconds < 0 { "-" } else { "" };
        let secs = self.remaining_seconds.abs();
        format!("{}{:02}:{:02}", sign, secs / 60, secs % 60)
    }
}

fn ceil_div(value: i64, divisor: i64) -> i64 {
    let q = value / divisor;
    if value % divisor > 0 {
        q + 1
    } else {
        q
    }
}

/// Оповещение, выданное таймером
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerAlert {
    pub remaining_minutes: i64,
    pub is_overdue: bool,
}

/// Однократный сигнал при пересечении порога.
///
/// Пока остаток не выше порога, повторных сигналов нет.
/// Если расчётное время сдвинули и остаток снова выше порога,
/// таймер перевзводится.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderTimer {
    threshold_minutes: i64,
    alerted: bool,
}

impl Default for OrderTimer {
    fn default() -> Self {
        Self::new(DEFAULT_ALERT_THRESHOLD_MINUTES)
    }
}

impl OrderTimer {
    pub fn new(threshold_minutes: i64) -> Self {
        Self {
            threshold_minutes,
            alerted: false,
        }
    }

    pub fn threshold_minutes(&self) -> i64 {
        self.threshold_minutes
    }

    pub fn has_alerted(&self) -> bool {
        self.alerted
    }

    pub fn observe(&mut self, snapshot: &TimerSnapshot) -> Option<TimerAlert> {
        if snapshot.remaining_minutes > self.threshold_minutes {
            self.alerted = false;
            return None;
        }
        if self.alerted {
            return None;
        }
        self.alerted = true;
        Some(TimerAlert {
            remaining_minutes: snapshot.remaining_minutes,
            is_overdue: snapshot.is_overdue,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn at(minute: i64, second: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap()
            + Duration::minutes(minute)
            + Duration::seconds(second)
    }

    #[test]
    fn snapshot_midway() {
        let s = TimerSnapshot::compute(at(10, 0), at(0, 0), at(20, 0));
        assert_eq!(s.remaining_minutes, 10);
        assert_eq!(s.remaining_seconds, 600);
        assert_eq!(s.progress_percent, 50.0);
        assert!(!s.is_overdue);
        assert_eq!(s.format_remaining(), "10:00");
    }

    #[test]
    fn remaining_minutes_round_up() {
        let s = TimerSnapshot::compute(at(14, 30), at(0, 0), at(20, 0));
        assert_eq!(s.remaining_minutes, 6);
    }

    #[test]
    fn overdue_is_negative_and_clamped() {
        let s = TimerSnapshot::compute(at(23, 10), at(0, 0), at(20, 0));
        assert!(s.is_overdue);
        assert_eq!(s.remaining_minutes, -3);
        assert_eq!(s.progress_percent, 100.0);
        assert_eq!(s.format_remaining(), "-03:10");
    }

    #[test]
    fn degenerate_interval_is_complete() {
        let s = TimerSnapshot::compute(at(0, 0), at(5, 0), at(5, 0));
        assert_eq!(s.progress_percent, 100.0);
        let before_start = TimerSnapshot::compute(at(0, 0), at(5, 0), at(20, 0));
        assert_eq!(before_start.progress_percent, 0.0);
    }

    #[test]
    fn alert_fires_once_below_threshold() {
        let mut timer = OrderTimer::default();
        let start = at(0, 0);
        let eta = at(20, 0);

        assert!(timer.observe(&TimerSnapshot::compute(at(10, 0), start, eta)).is_none());
        let alert = timer.observe(&TimerSnapshot::compute(at(15, 0), start, eta));
        assert_eq!(
            alert,
            Some(TimerAlert {
                remaining_minutes: 5,
                is_overdue: false
            })
        );
        assert!(timer.observe(&TimerSnapshot::compute(at(17, 0), start, eta)).is_none());
        assert!(timer.observe(&TimerSnapshot::compute(at(25, 0), start, eta)).is_none());
    }

    #[test]
    fn rearms_when_estimate_pushed_back() {
        let mut timer = OrderTimer::new(5);
        let start = at(0, 0);

        assert!(timer.observe(&TimerSnapshot::compute(at(16, 0), start, at(20, 0))).is_some());
        // estimate moved to +30
        assert!(timer.observe(&TimerSnapshot::compute(at(17, 0), start, at(30, 0))).is_none());
        assert!(!timer.has_alerted());
        assert!(timer.observe(&TimerSnapshot::compute(at(26, 0), start, at(30, 0))).is_some());
    }
}
