use crate::domain::a001_staff::StaffRole;
use crate::domain::common::BaseAggregate;
use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

crate::aggregate_id!(
    /// Уникальный идентификатор смены
    ShiftId
);

/// Смена сотрудника в расписании.
///
/// Если `end_time <= start_time`, смена переходит через полночь
/// и заканчивается на следующий день.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shift {
    #[serde(flatten)]
    pub base: BaseAggregate<ShiftId>,

    #[serde(rename = "staffRef")]
    pub staff_ref: String,
    #[serde(rename = "shiftDate")]
    pub shift_date: NaiveDate,
    #[serde(rename = "startTime")]
    pub start_time: NaiveTime,
    #[serde(rename = "endTime")]
    pub end_time: NaiveTime,
    pub role: StaffRole,
}

impl Shift {
    pub fn new_for_insert(dto: &ShiftDto, code: String) -> Self {
        let mut shift = Self {
            base: BaseAggregate::new(ShiftId::new_v4(), code, String::new()),
            staff_ref: String::new(),
            shift_date: dto.shift_date,
            start_time: dto.start_time,
            end_time: dto.end_time,
            role: dto.role,
        };
        shift.update(dto);
        shift
    }

    pub fn update(&mut self, dto: &ShiftDto) {
        if let Some(code) = dto.code.as_ref().filter(|c| !c.trim().is_empty()) {
            self.base.code = code.clone();
        }
        self.base.description = dto.description.clone().unwrap_or_else(|| {
            format!(
                "{} {}-{}",
                dto.shift_date.format("%d.%m.%Y"),
                dto.start_time.format("%H:%M"),
                dto.end_time.format("%H:%M")
            )
        });
        self.base.comment = dto.comment.clone();
        self.staff_ref = dto.staff_ref.trim().to_string();
        self.shift_date = dto.shift_date;
        self.start_time = dto.start_time;
        self.end_time = dto.end_time;
        self.role = dto.role;
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.staff_ref.is_empty() {
            return Err("Не указан сотрудник".into());
        }
        if self.start_time == self.end_time {
            return Err("Начало и конец смены совпадают".into());
        }
        Ok(())
    }

    pub fn starts_at(&self) -> NaiveDateTime {
        self.shift_date.and_time(self.start_time)
    }

    pub fn ends_at(&self) -> NaiveDateTime {
        let end = self.shift_date.and_time(self.end_time);
        if self.crosses_midnight() {
            end + Duration::days(1)
        } else {
            end
        }
    }

    pub fn crosses_midnight(&self) -> bool {
        self.end_time <= self.start_time
    }

    /// Длительность смены в часах
    pub fn duration_hours(&self) -> f64 {
        (self.ends_at() - self.starts_at()).num_minutes() as f64 / 60.0
    }

    /// Пересекаются ли интервалы `[start, end)` двух смен
    pub fn overlaps(&self, other: &Shift) -> bool {
        self.starts_at() < other.ends_at() && other.starts_at() < self.ends_at()
    }

    /// Понедельник недели, к которой относится смена
    pub fn week_start(&self) -> NaiveDate {
        week_start(self.shift_date)
    }
}

/// Понедельник ISO-недели для даты
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

crate::impl_aggregate_root!(Shift, ShiftId, "a002", "shift", "Смена", "Расписание смен");

/// DTO для создания/обновления смены
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShiftDto {
    pub id: Option<String>,
    pub code: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "staffRef")]
    pub staff_ref: String,
    #[serde(rename = "shiftDate")]
    pub shift_date: NaiveDate,
    #[serde(rename = "startTime")]
    pub start_time: NaiveTime,
    #[serde(rename = "endTime")]
    pub end_time: NaiveTime,
    pub role: StaffRole,
    pub comment: Option<String>,
}

impl Default for ShiftDto {
    fn default() -> Self {
        Self {
            id: None,
            code: None,
            description: None,
            staff_ref: String::new(),
            shift_date: chrono::Utc::now().date_naive(),
            start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap_or_default(),
            end_time: NaiveTime::from_hms_opt(17, 0, 0).unwrap_or_default(),
            role: StaffRole::default(),
            comment: None,
        }
    }
}

impl From<&Shift> for ShiftDto {
    fn from(s: &Shift) -> Self {
        use crate::domain::common::AggregateId;
        Self {
            id: Some(s.base.id.as_string()),
            code: Some(s.base.code.clone()),
            description: Some(s.base.description.clone()),
            staff_ref: s.staff_ref.clone(),
            shift_date: s.shift_date,
            start_time: s.start_time,
            end_time: s.end_time,
            role: s.role,
            comment: s.base.comment.clone(),
        }
    }
}

/// Расписание на неделю: смены, сгруппированные по дням
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeekSchedule {
    #[serde(rename = "weekStart")]
    pub week_start: NaiveDate,
    pub days: Vec<DaySchedule>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DaySchedule {
    pub date: NaiveDate,
    pub shifts: Vec<Shift>,
    #[serde(rename = "totalHours")]
    pub total_hours: f64,
}

impl WeekSchedule {
    /// Раскладывает смены по семи дням недели, начинающейся с `week_start`.
    /// Смены вне недели отбрасываются.
    pub fn build(week_start: NaiveDate, shifts: Vec<Shift>) -> Self {
        let mut days: Vec<DaySchedule> = (0..7)
            .map(|offset| DaySchedule {
                date: week_start + Duration::days(offset),
                shifts: Vec::new(),
                total_hours: 0.0,
            })
            .collect();

        for shift in shifts {
            let offset = (shift.shift_date - week_start).num_days();
            if (0..7).contains(&offset) {
                let day = &mut days[offset as usize];
                day.total_hours += shift.duration_hours();
                day.shifts.push(shift);
            }
        }
        for day in &mut days {
            day.shifts.sort_by_key(|s| s.start_time);
        }

        Self { week_start, days }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shift(staff: &str, date: (i32, u32, u32), start: (u32, u32), end: (u32, u32)) -> Shift {
        let dto = ShiftDto {
            staff_ref: staff.into(),
            shift_date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            start_time: NaiveTime::from_hms_opt(start.0, start.1, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(end.0, end.1, 0).unwrap(),
            ..Default::default()
        };
        Shift::new_for_insert(&dto, "SH-1".into())
    }

    #[test]
    fn regular_shift_duration() {
        let s = shift("a", (2026, 3, 2), (9, 0), (17, 30));
        assert!(!s.crosses_midnight());
        assert_eq!(s.duration_hours(), 8.5);
    }

    #[test]
    fn overnight_shift_ends_next_day() {
        let s = shift("a", (2026, 3, 2), (22, 0), (2, 0));
        assert!(s.crosses_midnight());
        assert_eq!(s.duration_hours(), 4.0);
        assert_eq!(s.ends_at().date(), NaiveDate::from_ymd_opt(2026, 3, 3).unwrap());
    }

    #[test]
    fn overlap_detection_is_half_open() {
        let morning = shift("a", (2026, 3, 2), (8, 0), (12, 0));
        let afternoon = shift("a", (2026, 3, 2), (12, 0), (16, 0));
        let lunch = shift("a", (2026, 3, 2), (11, 0), (13, 0));
        assert!(!morning.overlaps(&afternoon));
        assert!(morning.overlaps(&lunch));
        assert!(lunch.overlaps(&afternoon));
    }

    #[test]
    fn overnight_shift_overlaps_next_morning() {
        let night = shift("a", (2026, 3, 2), (22, 0), (6, 0));
        let early = shift("a", (2026, 3, 3), (5, 0), (9, 0));
        assert!(night.overlaps(&early));
    }

    #[test]
    fn equal_start_and_end_is_invalid() {
        let s = shift("a", (2026, 3, 2), (9, 0), (9, 0));
        assert!(s.validate().is_err());
        let s = shift("", (2026, 3, 2), (9, 0), (10, 0));
        assert!(s.validate().is_err());
    }

    #[test]
    fn week_schedule_groups_by_day() {
        // 2026-03-04 is a Wednesday
        let monday = week_start(NaiveDate::from_ymd_opt(2026, 3, 4).unwrap());
        assert_eq!(monday, NaiveDate::from_ymd_opt(2026, 3, 2).unwrap());

        let week = WeekSchedule::build(
            monday,
            vec![
                shift("a", (2026, 3, 4), (12, 0), (16, 0)),
                shift("b", (2026, 3, 4), (8, 0), (12, 0)),
                shift("a", (2026, 3, 10), (8, 0), (12, 0)),
            ],
        );
        assert_eq!(week.days.len(), 7);
        let wednesday = &week.days[2];
        assert_eq!(wednesday.shifts.len(), 2);
        assert_eq!(wednesday.shifts[0].staff_ref, "b");
        assert_eq!(wednesday.total_hours, 8.0);
        assert!(week.days.iter().all(|d| d.date < NaiveDate::from_ymd_opt(2026, 3, 9).unwrap()));
    }
}
