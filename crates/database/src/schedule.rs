//! Weekly schedule operations.
//!
//! The confirmed crew lives in `schedule_crew`, one row per participant with
//! a `position` column recording confirmation order. Crew changes and status
//! transitions are single conditional statements so that concurrent triggers
//! cannot duplicate a crew member or skip a promotion.

use chrono::NaiveDate;
use sqlx::SqlitePool;

use crate::error::{DatabaseError, Result};
use crate::models::WeeklySchedule;

/// Create an in-progress schedule for `service_date`.
///
/// Fails with `AlreadyExists` if the date already has a schedule.
pub async fn create_schedule(pool: &SqlitePool, service_date: NaiveDate) -> Result<WeeklySchedule> {
    let result = sqlx::query(
        r#"
        INSERT INTO schedules (service_date, status)
        VALUES (?, 'in_progress')
        "#,
    )
    .bind(service_date)
    .execute(pool)
    .await
    .map_err(|e| DatabaseError::from_insert(e, "Schedule", service_date.to_string()))?;

    get_schedule(pool, result.last_insert_rowid()).await
}

/// Get a schedule by ID, crew included.
pub async fn get_schedule(pool: &SqlitePool, id: i64) -> Result<WeeklySchedule> {
    let mut schedule = sqlx::query_as::<_, WeeklySchedule>(
        r#"
        SELECT id, service_date, status, created_at
        FROM schedules
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| DatabaseError::NotFound {
        entity: "Schedule",
        id: id.to_string(),
    })?;

    schedule.confirmed_ids = crew_ids(pool, schedule.id).await?;
    Ok(schedule)
}

/// Find the schedule for a service date, crew included.
pub async fn find_by_date(pool: &SqlitePool, service_date: NaiveDate) -> Result<Option<WeeklySchedule>> {
    let schedule = sqlx::query_as::<_, WeeklySchedule>(
        r#"
        SELECT id, service_date, status, created_at
        FROM schedules
        WHERE service_date = ?
        "#,
    )
    .bind(service_date)
    .fetch_optional(pool)
    .await?;

    match schedule {
        Some(mut schedule) => {
            schedule.confirmed_ids = crew_ids(pool, schedule.id).await?;
            Ok(Some(schedule))
        }
        None => Ok(None),
    }
}

/// List the most recent schedules, newest service date first.
pub async fn list_recent(pool: &SqlitePool, limit: i64) -> Result<Vec<WeeklySchedule>> {
    let mut schedules = sqlx::query_as::<_, WeeklySchedule>(
        r#"
        SELECT id, service_date, status, created_at
        FROM schedules
        ORDER BY service_date DESC
        LIMIT ?
        "#,
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;

    for schedule in &mut schedules {
        schedule.confirmed_ids = crew_ids(pool, schedule.id).await?;
    }

    Ok(schedules)
}

/// Confirmed participant IDs in confirmation order.
pub async fn crew_ids(pool: &SqlitePool, schedule_id: i64) -> Result<Vec<i64>> {
    let ids = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT participant_id
        FROM schedule_crew
        WHERE schedule_id = ?
        ORDER BY position ASC
        "#,
    )
    .bind(schedule_id)
    .fetch_all(pool)
    .await?;

    Ok(ids)
}

/// Append a participant to the crew.
///
/// Returns false if they were already on it.
pub async fn add_to_crew(pool: &SqlitePool, schedule_id: i64, participant_id: i64) -> Result<bool> {
    let result = sqlx::query(
        r#"
        INSERT OR IGNORE INTO schedule_crew (schedule_id, participant_id, position)
        VALUES (
            ?,
            ?,
            (SELECT COALESCE(MAX(position), 0) + 1 FROM schedule_crew WHERE schedule_id = ?)
        )
        "#,
    )
    .bind(schedule_id)
    .bind(participant_id)
    .bind(schedule_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Remove a participant from the crew.
///
/// Returns false if they were not on it.
pub async fn remove_from_crew(pool: &SqlitePool, schedule_id: i64, participant_id: i64) -> Result<bool> {
    let result = sqlx::query(
        r#"
        DELETE FROM schedule_crew
        WHERE schedule_id = ? AND participant_id = ?
        "#,
    )
    .bind(schedule_id)
    .bind(participant_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Move an in-progress schedule to confirmed once the crew has `crew_size` members.
///
/// Returns whether the status changed.
pub async fn promote_if_full(pool: &SqlitePool, schedule_id: i64, crew_size: i64) -> Result<bool> {
    let result = sqlx::query(
        r#"
        UPDATE schedules
        SET status = 'confirmed'
        WHERE id = ?
          AND status = 'in_progress'
          AND (SELECT COUNT(*) FROM schedule_crew WHERE schedule_id = ?) >= ?
        "#,
    )
    .bind(schedule_id)
    .bind(schedule_id)
    .bind(crew_size)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Move a confirmed schedule back to in-progress if the crew dropped below `crew_size`.
///
/// Only retractions call this. Returns whether the status changed.
pub async fn demote_if_short(pool: &SqlitePool, schedule_id: i64, crew_size: i64) -> Result<bool> {
    let result = sqlx::query(
        r#"
        UPDATE schedules
        SET status = 'in_progress'
        WHERE id = ?
          AND status = 'confirmed'
          AND (SELECT COUNT(*) FROM schedule_crew WHERE schedule_id = ?) < ?
        "#,
    )
    .bind(schedule_id)
    .bind(schedule_id)
    .bind(crew_size)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}
