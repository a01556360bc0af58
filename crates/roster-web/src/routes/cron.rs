//! Scheduled trigger endpoints.
//!
//! Each route runs one engine operation and returns its report. An external
//! scheduler calls them: weekly cycle on Monday, the response check hourly,
//! the check-in on Thursday and reminders on Saturday.

use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use scheduler::{CheckinReport, CycleReport, ReminderReport, SweepReport};

use crate::error::{Result, WebError};
use crate::state::AppState;

/// Start the weekly cycle.
pub async fn weekly_cycle(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<CycleReport>> {
    authorize(&state, &headers)?;
    let report = state.engine.start_weekly_cycle().await?;
    Ok(Json(report))
}

/// Time out unanswered requests.
pub async fn check_responses(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<SweepReport>> {
    authorize(&state, &headers)?;
    let report = state.engine.check_no_responses().await?;
    Ok(Json(report))
}

/// Ask the crew to re-confirm.
pub async fn midweek_checkin(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<CheckinReport>> {
    authorize(&state, &headers)?;
    let report = state.engine.send_midweek_checkin().await?;
    Ok(Json(report))
}

/// Send final reminders and record service.
pub async fn final_reminders(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<ReminderReport>> {
    authorize(&state, &headers)?;
    let report = state.engine.send_final_reminders().await?;
    Ok(Json(report))
}

fn authorize(state: &AppState, headers: &HeaderMap) -> Result<()> {
    let Some(expected) = state.cron_secret.as_deref() else {
        return Ok(());
    };

    let Some(value) = headers.get(axum::http::header::AUTHORIZATION) else {
        return Err(WebError::Unauthorized);
    };

    let Ok(value) = value.to_str() else {
        return Err(WebError::Unauthorized);
    };

    let token = value.strip_prefix("Bearer ").unwrap_or(value);
    if token != expected {
        return Err(WebError::Unauthorized);
    }

    Ok(())
}
