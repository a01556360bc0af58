//! Schedule read endpoints.

use axum::extract::{Path, Query, State};
use axum::Json;
use database::{attempt, schedule, ContactAttempt, WeeklySchedule};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::state::AppState;

const DEFAULT_LIMIT: i64 = 20;
const MAX_LIMIT: i64 = 200;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub limit: Option<i64>,
}

/// A schedule with its contact history.
#[derive(Serialize)]
pub struct ScheduleDetail {
    pub schedule: WeeklySchedule,
    pub attempts: Vec<ContactAttempt>,
}

/// Recent schedules, newest first.
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<WeeklySchedule>>> {
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
    let schedules = schedule::list_recent(state.db.pool(), limit).await?;
    Ok(Json(schedules))
}

/// One schedule and every contact attempt made for it.
pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ScheduleDetail>> {
    let pool = state.db.pool();
    let schedule = schedule::get_schedule(pool, id).await?;
    let attempts = attempt::list_for_schedule(pool, id).await?;
    Ok(Json(ScheduleDetail { schedule, attempts }))
}
