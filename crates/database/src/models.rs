//! Database models.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A member of the rotating roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Participant {
    /// Auto-incrementing ID. Insertion order is the last ranking tie-break.
    pub id: i64,
    /// Display name used in messages.
    pub name: String,
    /// E.164 phone number (e.g., "+12345678901").
    pub phone_number: String,
    /// Ordination date, informational only.
    pub ordination_date: Option<NaiveDate>,
    /// Number of completed services.
    pub times_served: i64,
    /// Date of the most recent completed service.
    pub last_served_date: Option<NaiveDate>,
    /// Inactive participants are never selected but are kept for history.
    pub is_active: bool,
    /// Creation timestamp.
    pub created_at: String,
}

/// Fields required to add a participant to the directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewParticipant {
    pub name: String,
    pub phone_number: String,
    #[serde(default)]
    pub ordination_date: Option<NaiveDate>,
}

/// Partial update of a participant. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub ordination_date: Option<NaiveDate>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

/// Overall state of a weekly schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum ScheduleStatus {
    /// Still collecting confirmations.
    InProgress,
    /// Crew is full.
    Confirmed,
}

/// One record per service date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct WeeklySchedule {
    /// Auto-incrementing ID.
    pub id: i64,
    /// The Sunday being scheduled.
    pub service_date: NaiveDate,
    /// Participants who said yes, in confirmation order.
    #[sqlx(skip)]
    pub confirmed_ids: Vec<i64>,
    /// Current status.
    pub status: ScheduleStatus,
    /// Creation timestamp.
    pub created_at: String,
}

/// Outcome recorded on a contact attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum ResponseStatus {
    /// Waiting on a reply.
    Pending,
    /// Replied affirmatively.
    Yes,
    /// Replied negatively.
    No,
    /// Timed out without a reply.
    NoResponse,
}

impl ResponseStatus {
    /// Whether the attempt still awaits a reply.
    pub fn is_pending(&self) -> bool {
        matches!(self, ResponseStatus::Pending)
    }
}

/// Why a participant was contacted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum AttemptKind {
    /// Initial ask to serve.
    Invitation,
    /// Midweek re-confirmation of a crew member.
    Checkin,
}

/// A response ledger entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct ContactAttempt {
    /// Auto-incrementing ID.
    pub id: i64,
    /// Participant who was contacted.
    pub participant_id: i64,
    /// Schedule the contact was for.
    pub schedule_id: i64,
    /// Invitation or check-in.
    pub kind: AttemptKind,
    /// When the outbound message was sent.
    pub sent_at: DateTime<Utc>,
    /// Current outcome.
    pub response: ResponseStatus,
    /// When the attempt was resolved.
    pub responded_at: Option<DateTime<Utc>>,
}
