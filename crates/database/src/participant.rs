//! Participant directory operations.
//!
//! Participants are never deleted; deactivation is a soft delete that keeps
//! their service history.

use chrono::NaiveDate;
use sqlx::SqlitePool;

use crate::error::{DatabaseError, Result};
use crate::models::{NewParticipant, Participant, ParticipantUpdate};
use crate::validation::{validate_name, validate_phone_number};

/// Add a participant to the directory.
///
/// Validates the name and phone number before writing.
pub async fn create_participant(pool: &SqlitePool, new: &NewParticipant) -> Result<Participant> {
    validate_name(&new.name)?;
    validate_phone_number(&new.phone_number)?;

    let result = sqlx::query(
        r#"
        INSERT INTO participants (name, phone_number, ordination_date)
        VALUES (?, ?, ?)
        "#,
    )
    .bind(new.name.trim())
    .bind(&new.phone_number)
    .bind(new.ordination_date)
    .execute(pool)
    .await
    .map_err(|e| DatabaseError::from_insert(e, "Participant", &new.phone_number))?;

    get_participant(pool, result.last_insert_rowid()).await
}

/// Get a participant by ID.
pub async fn get_participant(pool: &SqlitePool, id: i64) -> Result<Participant> {
    sqlx::query_as::<_, Participant>(
        r#"
        SELECT id, name, phone_number, ordination_date, times_served,
               last_served_date, is_active, created_at
        FROM participants
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| DatabaseError::NotFound {
        entity: "Participant",
        id: id.to_string(),
    })
}

/// Find a participant by phone number.
pub async fn find_by_phone(pool: &SqlitePool, phone_number: &str) -> Result<Option<Participant>> {
    let participant = sqlx::query_as::<_, Participant>(
        r#"
        SELECT id, name, phone_number, ordination_date, times_served,
               last_served_date, is_active, created_at
        FROM participants
        WHERE phone_number = ?
        "#,
    )
    .bind(phone_number)
    .fetch_optional(pool)
    .await?;

    Ok(participant)
}

/// Get several participants, returned in the order of `ids`.
///
/// Unknown IDs are skipped.
pub async fn get_participants(pool: &SqlitePool, ids: &[i64]) -> Result<Vec<Participant>> {
    let mut participants = Vec::with_capacity(ids.len());
    for id in ids {
        match get_participant(pool, *id).await {
            Ok(p) => participants.push(p),
            Err(DatabaseError::NotFound { .. }) => {
                tracing::warn!(participant_id = id, "Crew member missing from directory");
            }
            Err(e) => return Err(e),
        }
    }
    Ok(participants)
}

/// Apply a partial update to a participant.
///
/// Changed name or phone number fields are validated again.
pub async fn update_participant(
    pool: &SqlitePool,
    id: i64,
    update: &ParticipantUpdate,
) -> Result<Participant> {
    if let Some(name) = &update.name {
        validate_name(name)?;
    }
    if let Some(phone) = &update.phone_number {
        validate_phone_number(phone)?;
    }

    let result = sqlx::query(
        r#"
        UPDATE participants
        SET name = COALESCE(?, name),
            phone_number = COALESCE(?, phone_number),
            ordination_date = COALESCE(?, ordination_date),
            is_active = COALESCE(?, is_active)
        WHERE id = ?
        "#,
    )
    .bind(update.name.as_deref().map(str::trim))
    .bind(update.phone_number.as_deref())
    .bind(update.ordination_date)
    .bind(update.is_active)
    .bind(id)
    .execute(pool)
    .await
    .map_err(|e| {
        let phone = update.phone_number.clone().unwrap_or_default();
        DatabaseError::from_insert(e, "Participant", phone)
    })?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound {
            entity: "Participant",
            id: id.to_string(),
        });
    }

    get_participant(pool, id).await
}

/// Soft-delete a participant.
pub async fn deactivate_participant(pool: &SqlitePool, id: i64) -> Result<()> {
    let result = sqlx::query(
        r#"
        UPDATE participants
        SET is_active = 0
        WHERE id = ?
        "#,
    )
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound {
            entity: "Participant",
            id: id.to_string(),
        });
    }

    Ok(())
}

/// List every participant, active or not, in fairness order.
pub async fn list_participants(pool: &SqlitePool) -> Result<Vec<Participant>> {
    let participants = sqlx::query_as::<_, Participant>(
        r#"
        SELECT id, name, phone_number, ordination_date, times_served,
               last_served_date, is_active, created_at
        FROM participants
        ORDER BY last_served_date ASC NULLS FIRST, times_served ASC, id ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(participants)
}

/// List active participants ranked for selection.
///
/// Never-served participants come first, then oldest `last_served_date`,
/// then fewest `times_served`, then insertion order.
pub async fn list_active_ranked(pool: &SqlitePool) -> Result<Vec<Participant>> {
    let participants = sqlx::query_as::<_, Participant>(
        r#"
        SELECT id, name, phone_number, ordination_date, times_served,
               last_served_date, is_active, created_at
        FROM participants
        WHERE is_active = 1
        ORDER BY last_served_date ASC NULLS FIRST, times_served ASC, id ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(participants)
}

/// The best-ranked active participant never contacted for `schedule_id`.
pub async fn next_candidate(pool: &SqlitePool, schedule_id: i64) -> Result<Option<Participant>> {
    let participant = sqlx::query_as::<_, Participant>(
        r#"
        SELECT id, name, phone_number, ordination_date, times_served,
               last_served_date, is_active, created_at
        FROM participants
        WHERE is_active = 1
          AND id NOT IN (
              SELECT participant_id FROM contact_attempts WHERE schedule_id = ?
          )
        ORDER BY last_served_date ASC NULLS FIRST, times_served ASC, id ASC
        LIMIT 1
        "#,
    )
    .bind(schedule_id)
    .fetch_optional(pool)
    .await?;

    Ok(participant)
}

/// Credit a completed service.
///
/// Sets `last_served_date` and increments `times_served`. A participant
/// already credited for `service_date` (or later) is left alone, so a
/// repeated call for the same week does not count twice. Returns whether
/// the participant was credited.
pub async fn record_service(pool: &SqlitePool, id: i64, service_date: NaiveDate) -> Result<bool> {
    let result = sqlx::query(
        r#"
        UPDATE participants
        SET last_served_date = ?,
            times_served = times_served + 1
        WHERE id = ?
          AND (last_served_date IS NULL OR last_served_date < ?)
        "#,
    )
    .bind(service_date)
    .bind(id)
    .bind(service_date)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Count active participants.
pub async fn count_active(pool: &SqlitePool) -> Result<i64> {
    let count = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*) FROM participants WHERE is_active = 1
        "#,
    )
    .fetch_one(pool)
    .await?;

    Ok(count)
}
