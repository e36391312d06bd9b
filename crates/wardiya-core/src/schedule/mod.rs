//! Schedule generation and filtering.

pub mod model;
pub mod resolver;

use chrono::{Days, NaiveDate};
use tracing::debug;

use crate::error::{RosterError, RosterResult};
use crate::rotation::model::{Participant, Role};
use crate::rotation::rotation_for;
use model::{RestDay, Schedule, WeekFilter, WeekRecord};

/// Default number of scheduled weeks.
pub const TOTAL_WEEKS: usize = 52;

/// Days between consecutive week starts.
pub const DAYS_PER_WEEK: i64 = 7;

/// Offset from a week's start to its last working day.
pub const WORK_WEEK_OFFSET_DAYS: u64 = 5;

/// Rest day applied to every week.
pub const REST_DAY: RestDay = RestDay::FridayOff;

/// Build `total_weeks` contiguous weeks starting at `anchor`.
pub fn generate(anchor: NaiveDate, total_weeks: usize) -> RosterResult<Schedule> {
    if total_weeks == 0 {
        return Err(RosterError::invalid_config("week count must be positive"));
    }
    let last_week_number = u32::try_from(total_weeks)
        .map_err(|_| RosterError::invalid_config(format!("week count {} is too large", total_weeks)))?;

    // The final week must end inside the calendar before anything is allocated.
    (total_weeks as u64 - 1)
        .checked_mul(DAYS_PER_WEEK as u64)
        .and_then(|days| days.checked_add(WORK_WEEK_OFFSET_DAYS))
        .and_then(|days| anchor.checked_add_days(Days::new(days)))
        .ok_or_else(|| out_of_calendar(anchor, total_weeks))?;

    let mut weeks = Vec::with_capacity(total_weeks);
    for i in 0..total_weeks {
        let week_start = anchor
            .checked_add_days(Days::new(i as u64 * DAYS_PER_WEEK as u64))
            .ok_or_else(|| out_of_calendar(anchor, total_weeks))?;
        let week_end = week_start
            .checked_add_days(Days::new(WORK_WEEK_OFFSET_DAYS))
            .ok_or_else(|| out_of_calendar(anchor, total_weeks))?;

        weeks.push(WeekRecord {
            week_number: i as u32 + 1,
            week_start,
            week_end,
            assignment: rotation_for(i),
            rest_day: REST_DAY,
        });
    }

    debug!(%anchor, weeks = last_week_number, "Schedule generated");
    Ok(Schedule { weeks })
}

fn out_of_calendar(anchor: NaiveDate, total_weeks: usize) -> RosterError {
    RosterError::invalid_config(format!(
        "{} weeks from {} runs past the supported calendar",
        total_weeks, anchor
    ))
}

/// Weeks matching `filter`, in schedule order.
pub fn filter<'a>(schedule: &'a Schedule, filter: &WeekFilter) -> Vec<&'a WeekRecord> {
    schedule.iter().filter(|w| filter.matches(w)).collect()
}

/// Weeks in which `participant` holds `role`.
pub fn filter_by_role(schedule: &Schedule, participant: Participant, role: Role) -> Vec<&WeekRecord> {
    filter(
        schedule,
        &WeekFilter {
            participant: Some(participant),
            role: Some(role),
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    fn anchor() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 3).unwrap()
    }

    #[test]
    fn test_first_week() {
        let schedule = generate(anchor(), TOTAL_WEEKS).unwrap();
        let week1 = schedule.get(0).unwrap();
        assert_eq!(week1.week_number, 1);
        assert_eq!(week1.week_start, anchor());
        assert_eq!(week1.week_end, NaiveDate::from_ymd_opt(2026, 1, 8).unwrap());
        assert_eq!(week1.assignment.first, Participant::Ahmed);
        assert_eq!(week1.rest_day, RestDay::FridayOff);
        assert_eq!(week1.date_range(), "03/01/2026 - 08/01/2026");
    }

    #[test]
    fn test_contiguity() {
        let schedule = generate(anchor(), TOTAL_WEEKS).unwrap();
        assert_eq!(schedule.len(), TOTAL_WEEKS);
        for (i, week) in schedule.iter().enumerate() {
            assert_eq!(week.week_number as usize, i + 1);
            assert_eq!(week.index(), i);
            assert_eq!((week.week_end - week.week_start).num_days(), 5);
            assert_eq!(week.assignment, rotation_for(i));
        }
        for pair in schedule.weeks().windows(2) {
            assert_eq!((pair[1].week_start - pair[0].week_start).num_days(), 7);
        }
    }

    #[test]
    fn test_week_starts_keep_anchor_weekday() {
        let schedule = generate(anchor(), TOTAL_WEEKS).unwrap();
        assert!(schedule
            .iter()
            .all(|w| w.week_start.weekday() == anchor().weekday()));
    }

    #[test]
    fn test_bounds() {
        let schedule = generate(anchor(), TOTAL_WEEKS).unwrap();
        assert_eq!(schedule.start(), Some(anchor()));
        assert_eq!(
            schedule.end_exclusive(),
            Some(NaiveDate::from_ymd_opt(2027, 1, 2).unwrap())
        );
    }

    #[test]
    fn test_zero_weeks_rejected() {
        let err = generate(anchor(), 0).unwrap_err();
        assert!(matches!(err, RosterError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_calendar_overflow_rejected() {
        let err = generate(NaiveDate::MAX, 2).unwrap_err();
        assert!(matches!(err, RosterError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_huge_week_count_rejected_before_allocating() {
        let err = generate(anchor(), 4_000_000_000).unwrap_err();
        assert!(matches!(err, RosterError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_filter_none_returns_all() {
        let schedule = generate(anchor(), TOTAL_WEEKS).unwrap();
        assert_eq!(filter(&schedule, &WeekFilter::none()).len(), TOTAL_WEEKS);
    }

    #[test]
    fn test_filter_by_participant_and_role() {
        let schedule = generate(anchor(), TOTAL_WEEKS).unwrap();

        let omar = filter(&schedule, &WeekFilter::participant(Participant::Omar));
        assert_eq!(omar.len(), TOTAL_WEEKS);

        let omar_first = filter_by_role(&schedule, Participant::Omar, Role::First);
        // Omar opens the third week of each cycle: indices 2, 5, 8, ...
        assert_eq!(omar_first.len(), 17);
        assert!(omar_first.iter().all(|w| w.index() % 3 == 2));
    }

    #[test]
    fn test_role_without_participant_is_ignored() {
        let schedule = generate(anchor(), 6).unwrap();
        let f = WeekFilter {
            participant: None,
            role: Some(Role::Second),
        };
        assert_eq!(filter(&schedule, &f).len(), 6);
    }
}
