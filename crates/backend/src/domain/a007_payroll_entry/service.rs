use super::repository;
use crate::domain::{a001_staff, a002_shift};
use crate::shared::config;
use crate::shared::error::ServiceError;
use crate::shared::format::format_money;
use crate::shared::logger;
use chrono::NaiveDate;
use contracts::domain::a001_staff::Staff;
use contracts::domain::a002_shift::Shift;
use contracts::domain::a007_payroll_entry::{
    HoursBreakdown, PayrollAdjustmentDto, PayrollEntry, PayrollGenerateRequest,
    PayrollGenerateResponse, PayrollSettings, PayrollStatus,
};
use contracts::domain::common::AggregateId;
use uuid::Uuid;

/// Что делать с сотрудником при расчёте
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationAction {
    Create,
    /// Черновик за период уже есть и будет заменён
    Replace,
    /// Начисление утверждено или выплачено, не трогаем
    Skip,
}

pub fn generation_action(existing: &[PayrollEntry], staff_ref: &str) -> GenerationAction {
    let mine: Vec<&PayrollEntry> = existing.iter().filter(|e| e.staff_ref == staff_ref).collect();
    if mine.iter().any(|e| e.status != PayrollStatus::Draft) {
        GenerationAction::Skip
    } else if mine.is_empty() {
        GenerationAction::Create
    } else {
        GenerationAction::Replace
    }
}

/// Черновики начислений по сменам: по одному на сотрудника с отработанными часами
pub fn draft_entries(
    staff: &[Staff],
    shifts: &[Shift],
    period_start: NaiveDate,
    period_end: NaiveDate,
    settings: &PayrollSettings,
) -> Vec<PayrollEntry> {
    staff
        .iter()
        .filter_map(|member| {
            let staff_ref = member.base.id.as_string();
            let own: Vec<Shift> = shifts
                .iter()
                .filter(|s| s.staff_ref == staff_ref)
                .cloned()
                .collect();
            let hours = HoursBreakdown::from_shifts(&own, period_start, period_end, settings);
            if hours.total() <= 0.0 {
                return None;
            }
            Some(PayrollEntry::calculate(
                format!(
                    "PAY-{}-{}",
                    period_start.format("%Y%m%d"),
                    member.base.code
                ),
                staff_ref,
                member.full_name().to_string(),
                period_start,
                period_end,
                hours,
                member.hourly_rate,
                settings,
            ))
        })
        .collect()
}

/// Расчёт зарплаты за период
pub async fn generate(request: PayrollGenerateRequest) -> anyhow::Result<PayrollGenerateResponse> {
    if request.period_end < request.period_start {
        return Err(ServiceError::Validation("Конец периода раньше начала".into()).into());
    }
    let settings = config::get().payroll.settings();

    let staff = a001_staff::service::list_active().await?;
    let shifts = a002_shift::service::list(
        Some(request.period_start),
        Some(request.period_end),
        None,
    )
    .await?;
    let existing = repository::list_for_period(request.period_start, request.period_end).await?;

    let mut response = PayrollGenerateResponse {
        created: 0,
        replaced: 0,
        skipped: 0,
        total_gross: 0.0,
    };

    for mut entry in draft_entries(
        &staff,
        &shifts,
        request.period_start,
        request.period_end,
        &settings,
    ) {
        match generation_action(&existing, &entry.staff_ref) {
            GenerationAction::Skip => {
                response.skipped += 1;
                continue;
            }
            GenerationAction::Replace => {
                for old in existing.iter().filter(|e| e.staff_ref == entry.staff_ref) {
                    repository::soft_delete(old.base.id.value()).await?;
                }
                response.replaced += 1;
            }
            GenerationAction::Create => response.created += 1,
        }
        entry.validate().map_err(ServiceError::Validation)?;
        entry.base.before_write();
        response.total_gross += entry.gross_pay;
        repository::insert(&entry).await?;
    }

    logger::log(
        "payroll",
        &format!(
            "Расчёт за {} – {}: новых {}, заменено {}, пропущено {}, начислено {}",
            request.period_start.format("%d.%m.%Y"),
            request.period_end.format("%d.%m.%Y"),
            response.created,
            response.replaced,
            response.skipped,
            format_money(response.total_gross)
        ),
    );
    Ok(response)
}

pub async fn list(
    date_from: Option<NaiveDate>,
    date_to: Option<NaiveDate>,
) -> anyhow::Result<Vec<PayrollEntry>> {
    repository::list_overlapping(date_from, date_to).await
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<PayrollEntry>> {
    repository::get_by_id(id).await
}

async fn load(id: Uuid) -> anyhow::Result<PayrollEntry> {
    Ok(repository::get_by_id(id)
        .await?
        .ok_or(ServiceError::NotFound)?)
}

/// Ручная корректировка черновика
pub async fn adjust(id: Uuid, dto: PayrollAdjustmentDto) -> anyhow::Result<PayrollEntry> {
    let mut entry = load(id).await?;
    if !entry.is_editable() {
        return Err(ServiceError::Conflict(format!(
            "Начисление в статусе «{}» нельзя изменить",
            entry.status.display_name()
        ))
        .into());
    }
    entry
        .adjust(&dto, &config::get().payroll.settings())
        .map_err(ServiceError::Validation)?;
    entry.base.before_write();
    repository::update(&entry).await?;
    Ok(entry)
}

pub async fn approve(id: Uuid) -> anyhow::Result<PayrollEntry> {
    let mut entry = load(id).await?;
    entry.approve().map_err(ServiceError::Conflict)?;
    entry.base.before_write();
    repository::update(&entry).await?;
    logger::log(
        "payroll",
        &format!("{}: утверждено {}", entry.base.description, format_money(entry.net_pay)),
    );
    Ok(entry)
}

pub async fn mark_paid(id: Uuid) -> anyhow::Result<PayrollEntry> {
    let mut entry = load(id).await?;
    entry.mark_paid().map_err(ServiceError::Conflict)?;
    entry.base.before_write();
    repository::update(&entry).await?;
    logger::log(
        "payroll",
        &format!("{}: выплачено {}", entry.base.description, format_money(entry.net_pay)),
    );
    Ok(entry)
}

/// Удалить можно только черновик
pub async fn delete(id: Uuid) -> anyhow::Result<bool> {
    let entry = match repository::get_by_id(id).await? {
        Some(entry) => entry,
        None => return Ok(false),
    };
    if !entry.is_editable() {
        return Err(ServiceError::Conflict("Удалить можно только черновик".into()).into());
    }
    repository::soft_delete(id).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;
    use contracts::domain::a001_staff::StaffDto;
    use contracts::domain::a002_shift::ShiftDto;

    fn staff(name: &str, rate: f64) -> Staff {
        Staff::new_for_insert(
            &StaffDto {
                description: name.into(),
                hourly_rate: rate,
                ..Default::default()
            },
            format!("STF-{name}"),
        )
    }

    fn shift(member: &Staff, day: u32, hours: u32) -> Shift {
        Shift::new_for_insert(
            &ShiftDto {
                staff_ref: member.base.id.as_string(),
                shift_date: NaiveDate::from_ymd_opt(2026, 6, day).unwrap(),
                start_time: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
                end_time: NaiveTime::from_hms_opt(8 + hours, 0, 0).unwrap(),
                ..Default::default()
            },
            "SHF".into(),
        )
    }

    fn june(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 6, day).unwrap()
    }

    #[test]
    fn drafts_only_for_staff_with_hours() {
        let anna = staff("anna", 300.0);
        let boris = staff("boris", 400.0);
        let shifts = vec![shift(&anna, 1, 8), shift(&anna, 2, 8)];

        let drafts = draft_entries(
            &[anna.clone(), boris],
            &shifts,
            june(1),
            june(14),
            &PayrollSettings::default(),
        );
        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].staff_ref, anna.base.id.as_string());
        assert_eq!(drafts[0].regular_hours, 16.0);
        assert_eq!(drafts[0].gross_pay, 4_800.0);
        assert_eq!(drafts[0].base.description, "anna");
        assert_eq!(drafts[0].base.code, "PAY-20260601-STF-anna");
    }

    #[test]
    fn approved_entries_are_not_replaced() {
        let make = |status| {
            let mut e = PayrollEntry::calculate(
                "PAY".into(),
                "s1".into(),
                "s1".into(),
                june(1),
                june(14),
                HoursBreakdown {
                    regular: 1.0,
                    overtime: 0.0,
                },
                100.0,
                &PayrollSettings::default(),
            );
            e.status = status;
            e
        };

        assert_eq!(generation_action(&[], "s1"), GenerationAction::Create);
        assert_eq!(
            generation_action(&[make(PayrollStatus::Draft)], "s1"),
            GenerationAction::Replace
        );
        assert_eq!(
            generation_action(&[make(PayrollStatus::Approved)], "s1"),
            GenerationAction::Skip
        );
        assert_eq!(
            generation_action(&[make(PayrollStatus::Paid)], "s2"),
            GenerationAction::Create
        );
    }
}
