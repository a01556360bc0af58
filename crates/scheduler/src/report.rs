//! Results returned by engine operations.
//!
//! Every report carries the sends that failed. Those failures never undo the
//! writes that preceded them.

use database::WeeklySchedule;
use serde::Serialize;

/// A message that could not be handed to the transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SendFailure {
    pub recipient: String,
    pub error: String,
}

/// A normalised inbound answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Answer {
    Yes,
    No,
}

impl Answer {
    /// Parse a reply body. Accepts yes/y and no/n, case-insensitively,
    /// ignoring surrounding whitespace.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "yes" | "y" => Some(Answer::Yes),
            "no" | "n" => Some(Answer::No),
            _ => None,
        }
    }
}

/// Result of asking for the next candidate on a schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum QueueAdvance {
    /// Crew already full; nobody was asked.
    AlreadyConfirmed { schedule_id: i64 },
    /// A new candidate was invited.
    Invited { schedule_id: i64, participant_id: i64 },
    /// Every active participant has already been asked for this schedule.
    Exhausted { schedule_id: i64 },
}

/// Result of starting the weekly cycle.
#[derive(Debug, Clone, Serialize)]
pub struct CycleReport {
    /// The schedule for the upcoming Sunday.
    pub schedule: WeeklySchedule,
    /// True when the schedule existed before this call; nothing was written.
    pub already_exists: bool,
    /// Participants invited, in rank order.
    pub contacted: Vec<i64>,
    /// Fewer active participants than the crew size.
    pub understaffed: bool,
    pub send_failures: Vec<SendFailure>,
}

/// What an inbound reply did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ReplyOutcome {
    /// Yes: the participant is on the crew.
    Confirmed {
        participant_id: i64,
        schedule_id: i64,
        schedule_confirmed: bool,
    },
    /// No to an invitation.
    Declined { participant_id: i64, schedule_id: i64 },
    /// No to a check-in: the participant left the crew.
    Retracted { participant_id: i64, schedule_id: i64 },
    /// Neither yes nor no; a clarification was sent.
    InvalidResponse,
    /// Sender is not in the directory; ignored.
    UnknownNumber,
    /// Sender has nothing awaiting a reply; ignored.
    NoPendingRequest,
}

/// Result of handling one inbound reply.
#[derive(Debug, Clone, Serialize)]
pub struct ReplyReport {
    pub outcome: ReplyOutcome,
    /// Set when the reply freed a slot and the queue moved.
    pub queue: Option<QueueAdvance>,
    pub send_failures: Vec<SendFailure>,
}

impl ReplyReport {
    pub(crate) fn new(outcome: ReplyOutcome) -> Self {
        Self {
            outcome,
            queue: None,
            send_failures: Vec::new(),
        }
    }
}

/// Result of the timeout sweep.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SweepReport {
    /// Ledger entries marked no_response by this sweep.
    pub expired: Vec<i64>,
    /// Queue movements caused by those entries.
    pub advances: Vec<QueueAdvance>,
    pub send_failures: Vec<SendFailure>,
}

/// Result of the midweek check-in.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CheckinReport {
    /// The upcoming schedule, if one exists.
    pub schedule: Option<WeeklySchedule>,
    /// Crew members asked to re-confirm.
    pub prompted: Vec<i64>,
    /// Crew members skipped because they already had an open request.
    pub skipped: Vec<i64>,
    pub send_failures: Vec<SendFailure>,
}

/// Result of the pre-service reminders.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ReminderReport {
    /// The upcoming schedule, if one exists.
    pub schedule: Option<WeeklySchedule>,
    /// Crew members reminded.
    pub reminded: Vec<i64>,
    /// Crew members whose service was recorded by this call.
    pub credited: Vec<i64>,
    pub send_failures: Vec<SendFailure>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_answer_parse() {
        assert_eq!(Answer::parse("yes"), Some(Answer::Yes));
        assert_eq!(Answer::parse("  YES \n"), Some(Answer::Yes));
        assert_eq!(Answer::parse("Y"), Some(Answer::Yes));
        assert_eq!(Answer::parse("No"), Some(Answer::No));
        assert_eq!(Answer::parse("n"), Some(Answer::No));

        assert_eq!(Answer::parse("maybe"), None);
        assert_eq!(Answer::parse("yes please"), None);
        assert_eq!(Answer::parse(""), None);
    }

    #[test]
    fn test_outcome_serialization() {
        let json = serde_json::to_value(ReplyOutcome::NoPendingRequest).unwrap();
        assert_eq!(json["action"], "no_pending_request");

        let json = serde_json::to_value(ReplyOutcome::Declined {
            participant_id: 4,
            schedule_id: 1,
        })
        .unwrap();
        assert_eq!(json["action"], "declined");
        assert_eq!(json["participant_id"], 4);

        let json = serde_json::to_value(QueueAdvance::Exhausted { schedule_id: 1 }).unwrap();
        assert_eq!(json["result"], "exhausted");
    }
}
