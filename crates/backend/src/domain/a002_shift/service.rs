use super::repository;
use crate::domain::a001_staff;
use crate::shared::error::ServiceError;
use chrono::{Duration, Local, NaiveDate, NaiveTime};
use contracts::domain::a002_shift::{week_start, Shift, ShiftDto, WeekSchedule};
use contracts::domain::common::AggregateId;
use uuid::Uuid;

fn generate_code() -> String {
    format!("SHF-{}", &Uuid::new_v4().simple().to_string()[..8])
}

/// Первая смена из `existing`, пересекающаяся с `candidate` (тот же сотрудник)
pub fn find_overlap<'a>(candidate: &Shift, existing: &'a [Shift]) -> Option<&'a Shift> {
    existing.iter().find(|other| {
        other.base.id != candidate.base.id
            && other.staff_ref == candidate.staff_ref
            && candidate.overlaps(other)
    })
}

async fn check_constraints(shift: &Shift) -> anyhow::Result<()> {
    shift.validate().map_err(ServiceError::Validation)?;

    let staff_id = Uuid::parse_str(&shift.staff_ref)
        .map_err(|_| ServiceError::Validation("Некорректная ссылка на сотрудника".into()))?;
    if a001_staff::service::get_by_id(staff_id).await?.is_none() {
        return Err(ServiceError::Validation("Сотрудник не найден".into()).into());
    }

    // смена через полночь может задеть соседние сутки
    let neighbours = repository::list_between(
        Some(shift.shift_date - Duration::days(1)),
        Some(shift.shift_date + Duration::days(1)),
        Some(&shift.staff_ref),
    )
    .await?;
    if let Some(other) = find_overlap(shift, &neighbours) {
        return Err(ServiceError::Conflict(format!(
            "Смена пересекается со сменой {} ({})",
            other.base.code, other.base.description
        ))
        .into());
    }
    Ok(())
}

pub async fn create(dto: ShiftDto) -> anyhow::Result<Uuid> {
    let code = dto.code.clone().unwrap_or_else(generate_code);
    let mut aggregate = Shift::new_for_insert(&dto, code);

    check_constraints(&aggregate).await?;
    aggregate.base.before_write();

    repository::insert(&aggregate).await
}

pub async fn update(dto: ShiftDto) -> anyhow::Result<()> {
    let id = dto
        .id
        .as_ref()
        .and_then(|s| Uuid::parse_str(s).ok())
        .ok_or_else(|| ServiceError::Validation("Некорректный ID".into()))?;

    let mut aggregate = repository::get_by_id(id)
        .await?
        .ok_or(ServiceError::NotFound)?;

    aggregate.update(&dto);
    check_constraints(&aggregate).await?;
    aggregate.base.before_write();

    repository::update(&aggregate).await
}

pub async fn delete(id: Uuid) -> anyhow::Result<bool> {
    repository::soft_delete(id).await
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<Shift>> {
    repository::get_by_id(id).await
}

pub async fn list(
    date_from: Option<NaiveDate>,
    date_to: Option<NaiveDate>,
    staff_ref: Option<&str>,
) -> anyhow::Result<Vec<Shift>> {
    repository::list_between(date_from, date_to, staff_ref).await
}

/// Расписание на ISO-неделю, содержащую `date`
pub async fn week(date: NaiveDate) -> anyhow::Result<WeekSchedule> {
    let monday = week_start(date);
    let shifts = repository::list_between(Some(monday), Some(monday + Duration::days(6)), None).await?;
    Ok(WeekSchedule::build(monday, shifts))
}

/// Смены текущей недели для тестовых сотрудников
pub async fn insert_test_data() -> anyhow::Result<()> {
    let staff = a001_staff::service::list_active().await?;
    let monday = week_start(Local::now().date_naive());
    let time = |h: u32| NaiveTime::from_hms_opt(h, 0, 0).unwrap_or_default();

    for (index, member) in staff.iter().enumerate() {
        // чередуем утренние и вечерние смены
        let (start, end) = if index % 2 == 0 { (8, 16) } else { (16, 23) };
        for day in 0..5 {
            let dto = ShiftDto {
                staff_ref: member.base.id.as_string(),
                shift_date: monday + Duration::days(day + (index as i64 % 2)),
                start_time: time(start),
                end_time: time(end),
                role: member.role,
                ..Default::default()
            };
            create(dto).await?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shift(staff: &str, day: u32, start: u32, end: u32) -> Shift {
        Shift::new_for_insert(
            &ShiftDto {
                staff_ref: staff.into(),
                shift_date: NaiveDate::from_ymd_opt(2026, 4, day).unwrap(),
                start_time: NaiveTime::from_hms_opt(start, 0, 0).unwrap(),
                end_time: NaiveTime::from_hms_opt(end, 0, 0).unwrap(),
                ..Default::default()
            },
            "SHF".into(),
        )
    }

    #[test]
    fn overlap_ignores_other_staff_and_self() {
        let existing = vec![shift("a", 6, 9, 17), shift("b", 6, 12, 20)];
        let candidate = shift("a", 6, 16, 22);
        let hit = find_overlap(&candidate, &existing).unwrap();
        assert_eq!(hit.staff_ref, "a");

        let same = existing[0].clone();
        assert!(find_overlap(&same, &existing[..1]).is_none());
    }

    #[test]
    fn touching_shifts_do_not_overlap() {
        let existing = vec![shift("a", 6, 9, 17)];
        assert!(find_overlap(&shift("a", 6, 17, 23), &existing).is_none());
    }

    #[test]
    fn overnight_shift_reaches_next_day() {
        let existing = vec![shift("a", 6, 22, 4)];
        assert!(find_overlap(&shift("a", 7, 3, 10), &existing).is_some());
        assert!(find_overlap(&shift("a", 7, 4, 10), &existing).is_none());
    }
}
