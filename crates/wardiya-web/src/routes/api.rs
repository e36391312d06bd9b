//! JSON API handlers.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::MutexGuard;
use wardiya_core::controller::RosterController;
use wardiya_core::rotation::model::{Participant, Role};
use wardiya_core::schedule::model::{WeekFilter, WeekRecord};
use wardiya_core::schedule::resolver::{to_sentinel, SlotPosition};
use wardiya_core::schedule;

use crate::state::AppState;

type ApiError = (StatusCode, String);

#[derive(Debug, Default, Deserialize)]
pub struct ScheduleQuery {
    pub person: Option<String>,
    pub role: Option<String>,
}

/// One shift cell.
#[derive(Debug, Serialize)]
pub struct ShiftDto {
    pub role: Role,
    pub label: &'static str,
    pub person: Participant,
    /// Style key, e.g. "ahmed".
    pub slug: &'static str,
}

/// A week as the page renders it.
#[derive(Debug, Serialize)]
pub struct WeekDto {
    pub index: usize,
    pub week_number: u32,
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    pub week_start_formatted: String,
    pub week_end_formatted: String,
    pub shifts: Vec<ShiftDto>,
    pub rest_day: String,
    pub is_current: bool,
}

impl WeekDto {
    fn from_record(week: &WeekRecord, current: Option<usize>) -> Self {
        Self {
            index: week.index(),
            week_number: week.week_number,
            week_start: week.week_start,
            week_end: week.week_end,
            week_start_formatted: week.week_start_formatted(),
            week_end_formatted: week.week_end_formatted(),
            shifts: week
                .assignment
                .iter()
                .map(|(role, person)| ShiftDto {
                    role,
                    label: role.label(),
                    person,
                    slug: person.slug(),
                })
                .collect(),
            rest_day: week.rest_day.to_string(),
            is_current: current == Some(week.index()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ScheduleResponse {
    pub current_index: i64,
    pub filter: WeekFilter,
    pub weeks: Vec<WeekDto>,
}

#[derive(Debug, Serialize)]
pub struct CardDto {
    pub position: SlotPosition,
    pub label: &'static str,
    pub highlighted: bool,
    /// `None` renders as "Not Available".
    pub week: Option<WeekDto>,
}

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub today: NaiveDate,
    pub current_index: i64,
    pub cards: Vec<CardDto>,
}

#[derive(Debug, Serialize)]
pub struct CurrentResponse {
    pub today: NaiveDate,
    pub index: i64,
    pub week: Option<WeekDto>,
}

fn lock(state: &AppState) -> Result<MutexGuard<'_, RosterController>, ApiError> {
    state
        .controller
        .lock()
        .map_err(|_| (StatusCode::INTERNAL_SERVER_ERROR, "roster state unavailable".to_string()))
}

fn parse_filter(query: &ScheduleQuery) -> Result<WeekFilter, ApiError> {
    let participant = query
        .person
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .map(Participant::parse)
        .transpose()
        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;
    let role = query
        .role
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .map(Role::parse)
        .transpose()
        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;
    Ok(WeekFilter { participant, role })
}

/// GET /api/schedule?person=&role= - Filtered schedule table.
///
/// The filter is per request; the shared controller's filter is left alone.
pub async fn get_schedule(
    State(state): State<AppState>,
    Query(query): Query<ScheduleQuery>,
) -> Result<Json<ScheduleResponse>, ApiError> {
    let filter = parse_filter(&query)?;
    let controller = lock(&state)?;
    let current = controller.current_index();

    let weeks = schedule::filter(controller.schedule(), &filter)
        .into_iter()
        .map(|w| WeekDto::from_record(w, current))
        .collect();

    Ok(Json(ScheduleResponse {
        current_index: to_sentinel(current),
        filter,
        weeks,
    }))
}

/// GET /api/dashboard - Last / current / next cards.
pub async fn get_dashboard(State(state): State<AppState>) -> Result<Json<DashboardResponse>, ApiError> {
    let controller = lock(&state)?;
    let current = controller.current_index();
    let window = controller.display_window();

    let cards = window
        .slots()
        .into_iter()
        .map(|slot| CardDto {
            position: slot.position,
            label: slot.position.label(),
            highlighted: slot.highlighted,
            week: slot
                .index
                .and_then(|i| controller.schedule().get(i))
                .map(|w| WeekDto::from_record(w, current)),
        })
        .collect();

    Ok(Json(DashboardResponse {
        today: controller.today(),
        current_index: to_sentinel(current),
        cards,
    }))
}

/// GET /api/current - The resolved week, or index -1.
pub async fn get_current(State(state): State<AppState>) -> Result<Json<CurrentResponse>, ApiError> {
    let controller = lock(&state)?;
    let current = controller.current_index();

    Ok(Json(CurrentResponse {
        today: controller.today(),
        index: to_sentinel(current),
        week: controller.current_week().map(|w| WeekDto::from_record(w, current)),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use wardiya_core::clock::FixedClock;
    use wardiya_core::config::Settings;
    use wardiya_db::MemoryStore;

    fn state_at(y: i32, m: u32, d: u32) -> AppState {
        let clock = Arc::new(FixedClock::new(NaiveDate::from_ymd_opt(y, m, d).unwrap()));
        let controller = RosterController::new(Settings::default(), Arc::new(MemoryStore::new()), clock).unwrap();
        AppState::new(Arc::new(Mutex::new(controller)))
    }

    #[tokio::test]
    async fn test_dashboard_mid_schedule() {
        let Json(body) = get_dashboard(State(state_at(2026, 3, 1))).await.unwrap();
        assert_eq!(body.current_index, 8);
        let numbers: Vec<Option<u32>> = body
            .cards
            .iter()
            .map(|c| c.week.as_ref().map(|w| w.week_number))
            .collect();
        assert_eq!(numbers, vec![Some(8), Some(9), Some(10)]);
        assert!(body.cards[1].highlighted);
        assert_eq!(body.cards[1].label, "Current Week");
    }

    #[tokio::test]
    async fn test_dashboard_before_start() {
        let Json(body) = get_dashboard(State(state_at(2025, 12, 1))).await.unwrap();
        assert_eq!(body.current_index, -1);
        assert_eq!(body.cards[0].week.as_ref().unwrap().week_number, 1);
        assert!(body.cards.iter().all(|c| !c.highlighted));
    }

    #[tokio::test]
    async fn test_dashboard_first_week_has_empty_last_card() {
        let Json(body) = get_dashboard(State(state_at(2026, 1, 5))).await.unwrap();
        assert!(body.cards[0].week.is_none());
    }

    #[tokio::test]
    async fn test_schedule_filter() {
        let query = ScheduleQuery {
            person: Some("yousef".into()),
            role: Some("first".into()),
        };
        let Json(body) = get_schedule(State(state_at(2026, 1, 3)), Query(query)).await.unwrap();
        assert_eq!(body.weeks.len(), 17);
        assert_eq!(body.weeks[0].week_number, 2);
        assert_eq!(body.weeks[0].shifts[0].slug, "yousef");
        assert!(!body.weeks[0].is_current);
    }

    #[tokio::test]
    async fn test_schedule_unfiltered_marks_current() {
        let Json(body) = get_schedule(State(state_at(2026, 1, 3)), Query(ScheduleQuery::default()))
            .await
            .unwrap();
        assert_eq!(body.weeks.len(), 52);
        assert!(body.weeks[0].is_current);
        assert_eq!(body.weeks[0].rest_day, "Friday: OFF");
        assert_eq!(body.weeks[0].week_end_formatted, "08/01/2026");
    }

    #[tokio::test]
    async fn test_schedule_rejects_unknown_person() {
        let query = ScheduleQuery {
            person: Some("zaid".into()),
            role: None,
        };
        let err = get_schedule(State(state_at(2026, 1, 3)), Query(query)).await.unwrap_err();
        assert_eq!(err.0, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_current_out_of_range() {
        let Json(body) = get_current(State(state_at(2030, 1, 1))).await.unwrap();
        assert_eq!(body.index, -1);
        assert!(body.week.is_none());
    }
}
