//! Response ledger operations.
//!
//! Entries are append-only. The only mutation after insertion is the single
//! resolving write, guarded on the entry still being pending.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use crate::error::{DatabaseError, Result};
use crate::models::{AttemptKind, ContactAttempt, ResponseStatus};

/// Record a new pending contact attempt.
///
/// Fails with `AlreadyExists` if the participant already has a pending
/// attempt for this schedule.
pub async fn create_attempt(
    pool: &SqlitePool,
    participant_id: i64,
    schedule_id: i64,
    kind: AttemptKind,
    sent_at: DateTime<Utc>,
) -> Result<ContactAttempt> {
    let result = sqlx::query(
        r#"
        INSERT INTO contact_attempts (participant_id, schedule_id, kind, sent_at, response)
        VALUES (?, ?, ?, ?, 'pending')
        "#,
    )
    .bind(participant_id)
    .bind(schedule_id)
    .bind(kind)
    .bind(sent_at)
    .execute(pool)
    .await
    .map_err(|e| {
        DatabaseError::from_insert(
            e,
            "Pending attempt",
            format!("{}/{}", participant_id, schedule_id),
        )
    })?;

    get_attempt(pool, result.last_insert_rowid()).await
}

/// Get a ledger entry by ID.
pub async fn get_attempt(pool: &SqlitePool, id: i64) -> Result<ContactAttempt> {
    sqlx::query_as::<_, ContactAttempt>(
        r#"
        SELECT id, participant_id, schedule_id, kind, sent_at, response, responded_at
        FROM contact_attempts
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| DatabaseError::NotFound {
        entity: "Contact attempt",
        id: id.to_string(),
    })
}

/// The participant's most recently sent pending attempt, across all schedules.
pub async fn latest_pending_for(pool: &SqlitePool, participant_id: i64) -> Result<Option<ContactAttempt>> {
    let attempt = sqlx::query_as::<_, ContactAttempt>(
        r#"
        SELECT id, participant_id, schedule_id, kind, sent_at, response, responded_at
        FROM contact_attempts
        WHERE participant_id = ? AND response = 'pending'
        ORDER BY sent_at DESC, id DESC
        LIMIT 1
        "#,
    )
    .bind(participant_id)
    .fetch_optional(pool)
    .await?;

    Ok(attempt)
}

/// Resolve a pending attempt.
///
/// The write only applies while the entry is still pending. Returns false
/// when another caller resolved it first, or when `response` is itself
/// `Pending`.
pub async fn resolve_attempt(
    pool: &SqlitePool,
    id: i64,
    response: ResponseStatus,
    responded_at: DateTime<Utc>,
) -> Result<bool> {
    if response.is_pending() {
        return Ok(false);
    }

    let result = sqlx::query(
        r#"
        UPDATE contact_attempts
        SET response = ?, responded_at = ?
        WHERE id = ? AND response = 'pending'
        "#,
    )
    .bind(response)
    .bind(responded_at)
    .bind(id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Pending attempts sent at or before `cutoff`, oldest first.
pub async fn list_expired(pool: &SqlitePool, cutoff: DateTime<Utc>) -> Result<Vec<ContactAttempt>> {
    let attempts = sqlx::query_as::<_, ContactAttempt>(
        r#"
        SELECT id, participant_id, schedule_id, kind, sent_at, response, responded_at
        FROM contact_attempts
        WHERE response = 'pending' AND sent_at <= ?
        ORDER BY sent_at ASC, id ASC
        "#,
    )
    .bind(cutoff)
    .fetch_all(pool)
    .await?;

    Ok(attempts)
}

/// Every ledger entry for a schedule, in send order.
pub async fn list_for_schedule(pool: &SqlitePool, schedule_id: i64) -> Result<Vec<ContactAttempt>> {
    let attempts = sqlx::query_as::<_, ContactAttempt>(
        r#"
        SELECT id, participant_id, schedule_id, kind, sent_at, response, responded_at
        FROM contact_attempts
        WHERE schedule_id = ?
        ORDER BY sent_at ASC, id ASC
        "#,
    )
    .bind(schedule_id)
    .fetch_all(pool)
    .await?;

    Ok(attempts)
}

/// Whether the participant has an open attempt for the schedule.
pub async fn has_pending(pool: &SqlitePool, participant_id: i64, schedule_id: i64) -> Result<bool> {
    let found = sqlx::query_scalar::<_, i32>(
        r#"
        SELECT 1
        FROM contact_attempts
        WHERE participant_id = ? AND schedule_id = ? AND response = 'pending'
        "#,
    )
    .bind(participant_id)
    .bind(schedule_id)
    .fetch_optional(pool)
    .await?;

    Ok(found.is_some())
}
