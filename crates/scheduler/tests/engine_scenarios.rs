//! End-to-end scenarios for the scheduling engine.
//!
//! Each test runs against a fresh in-memory SQLite database with a recording
//! sender and a manual clock starting on Monday 2026-10-19 09:00 UTC, so the
//! target Sunday is 2026-10-25.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use database::{
    attempt, participant, schedule, AttemptKind, Database, NewParticipant, Participant,
    ResponseStatus, ScheduleStatus,
};
use scheduler::{
    Engine, EngineConfig, ManualClock, MessageSender, QueueAdvance, ReplyOutcome, SchedulerError,
};

// ============================================================================
// Fakes and helpers
// ============================================================================

/// Records every message; fails for recipients in `failing`.
#[derive(Default)]
struct RecordingSender {
    sent: Mutex<Vec<(String, String)>>,
    failing: Mutex<HashSet<String>>,
}

impl RecordingSender {
    fn fail_for(&self, recipient: &str) {
        self.failing.lock().unwrap().insert(recipient.to_string());
    }

    fn messages_to(&self, recipient: &str) -> Vec<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .filter(|(to, _)| to == recipient)
            .map(|(_, text)| text.clone())
            .collect()
    }

    fn count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait]
impl MessageSender for RecordingSender {
    async fn send_message(&self, recipient: &str, text: &str) -> Result<(), SchedulerError> {
        if self.failing.lock().unwrap().contains(recipient) {
            return Err(SchedulerError::SendFailed(format!("{} unreachable", recipient)));
        }
        self.sent
            .lock()
            .unwrap()
            .push((recipient.to_string(), text.to_string()));
        Ok(())
    }
}

struct Harness {
    db: Database,
    engine: Engine,
    sender: Arc<RecordingSender>,
    clock: Arc<ManualClock>,
}

fn monday() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 19, 9, 0, 0).unwrap()
}

fn sunday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 25).unwrap()
}

fn phone(i: usize) -> String {
    format!("+1555000{:04}", i)
}

async fn harness(config: EngineConfig) -> Harness {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    db.migrate().await.unwrap();

    let sender = Arc::new(RecordingSender::default());
    let clock = Arc::new(ManualClock::new(monday()));
    let engine = Engine::new(db.clone(), sender.clone(), config).with_clock(clock.clone());

    Harness {
        db,
        engine,
        sender,
        clock,
    }
}

async fn add_participants(h: &Harness, names: &[&str]) -> Vec<Participant> {
    let mut added = Vec::new();
    for (i, name) in names.iter().enumerate() {
        let p = participant::create_participant(
            h.db.pool(),
            &NewParticipant {
                name: name.to_string(),
                phone_number: phone(i + 1),
                ordination_date: None,
            },
        )
        .await
        .unwrap();
        added.push(p);
    }
    added
}

async fn reply(h: &Harness, p: &Participant, text: &str) -> scheduler::ReplyReport {
    h.engine
        .handle_inbound_reply(&p.phone_number, text)
        .await
        .unwrap()
}

async fn contacted_ids(h: &Harness, schedule_id: i64) -> Vec<i64> {
    attempt::list_for_schedule(h.db.pool(), schedule_id)
        .await
        .unwrap()
        .into_iter()
        .map(|a| a.participant_id)
        .collect()
}

/// No (participant, schedule) pair has more than one pending attempt.
async fn assert_single_pending(h: &Harness, schedule_id: i64) {
    let attempts = attempt::list_for_schedule(h.db.pool(), schedule_id)
        .await
        .unwrap();
    let mut seen = HashSet::new();
    for a in attempts.iter().filter(|a| a.response.is_pending()) {
        assert!(
            seen.insert(a.participant_id),
            "participant {} has two pending attempts",
            a.participant_id
        );
    }
}

// ============================================================================
// StartWeeklyCycle
// ============================================================================

#[tokio::test]
async fn test_start_contacts_top_three_in_rank_order() {
    let h = harness(EngineConfig::default()).await;
    let ps = add_participants(&h, &["Ammon", "Alma", "Nephi", "Moroni", "Enos"]).await;
    let pool = h.db.pool();

    // Ammon served most recently, Alma long ago, the rest never.
    participant::record_service(pool, ps[0].id, NaiveDate::from_ymd_opt(2026, 10, 18).unwrap())
        .await
        .unwrap();
    participant::record_service(pool, ps[1].id, NaiveDate::from_ymd_opt(2026, 6, 7).unwrap())
        .await
        .unwrap();

    let report = h.engine.start_weekly_cycle().await.unwrap();

    assert!(!report.already_exists);
    assert!(!report.understaffed);
    assert_eq!(report.schedule.service_date, sunday());
    assert_eq!(report.schedule.status, ScheduleStatus::InProgress);
    assert!(report.schedule.confirmed_ids.is_empty());
    assert_eq!(report.contacted, vec![ps[2].id, ps[3].id, ps[4].id]);

    let invite = &h.sender.messages_to(&ps[2].phone_number)[0];
    assert!(invite.contains("Nephi"));
    assert!(invite.contains("October 25, 2026"));
    assert!(invite.contains("8:50 AM"));
    assert!(invite.contains("Reply YES or NO"));
    assert!(invite.contains("24 hours"));
    assert!(h.sender.messages_to(&ps[0].phone_number).is_empty());

    let attempts = attempt::list_for_schedule(pool, report.schedule.id).await.unwrap();
    assert_eq!(attempts.len(), 3);
    assert!(attempts
        .iter()
        .all(|a| a.response == ResponseStatus::Pending && a.kind == AttemptKind::Invitation));
    assert!(attempts.iter().all(|a| a.sent_at == monday()));
}

#[tokio::test]
async fn test_times_served_breaks_ties() {
    let h = harness(EngineConfig::default()).await;
    let ps = add_participants(&h, &["A", "B", "C", "D"]).await;

    for (p, times) in ps.iter().zip([5, 1, 3, 2]) {
        serve(&h, p.id, times).await;
    }

    let report = h.engine.start_weekly_cycle().await.unwrap();
    assert_eq!(report.contacted, vec![ps[1].id, ps[3].id, ps[2].id]);
}

/// Credit `times` weekly services ending on 2026-09-06.
async fn serve(h: &Harness, id: i64, times: i64) {
    let last = NaiveDate::from_ymd_opt(2026, 9, 6).unwrap();
    for weeks_before in (0..times).rev() {
        let date = last - Duration::weeks(weeks_before);
        assert!(participant::record_service(h.db.pool(), id, date).await.unwrap());
    }
}

#[tokio::test]
async fn test_start_is_idempotent() {
    let h = harness(EngineConfig::default()).await;
    add_participants(&h, &["A", "B", "C", "D"]).await;

    let first = h.engine.start_weekly_cycle().await.unwrap();
    let sent = h.sender.count();

    h.clock.advance(Duration::hours(2));
    let second = h.engine.start_weekly_cycle().await.unwrap();

    assert!(second.already_exists);
    assert!(second.contacted.is_empty());
    assert_eq!(second.schedule.id, first.schedule.id);
    assert_eq!(h.sender.count(), sent);
    assert_eq!(contacted_ids(&h, first.schedule.id).await.len(), 3);
}

#[tokio::test]
async fn test_start_with_short_roster_is_understaffed() {
    let h = harness(EngineConfig::default()).await;
    let ps = add_participants(&h, &["A", "B", "C"]).await;
    participant::deactivate_participant(h.db.pool(), ps[1].id)
        .await
        .unwrap();

    let report = h.engine.start_weekly_cycle().await.unwrap();

    assert!(report.understaffed);
    assert_eq!(report.contacted, vec![ps[0].id, ps[2].id]);
    assert!(h.sender.messages_to(&ps[1].phone_number).is_empty());
}

#[tokio::test]
async fn test_start_with_empty_roster() {
    let h = harness(EngineConfig::default()).await;

    let report = h.engine.start_weekly_cycle().await.unwrap();

    assert!(report.understaffed);
    assert!(report.contacted.is_empty());
    assert_eq!(h.sender.count(), 0);
}

#[tokio::test]
async fn test_start_on_sunday_targets_next_week() {
    let h = harness(EngineConfig::default()).await;
    h.clock
        .set(Utc.with_ymd_and_hms(2026, 10, 25, 7, 0, 0).unwrap());

    assert_eq!(
        h.engine.upcoming_service_date(),
        NaiveDate::from_ymd_opt(2026, 11, 1).unwrap()
    );
}

#[tokio::test]
async fn test_send_failure_does_not_undo_invitation() {
    let h = harness(EngineConfig::default()).await;
    let ps = add_participants(&h, &["A", "B", "C"]).await;
    h.sender.fail_for(&ps[1].phone_number);

    let report = h.engine.start_weekly_cycle().await.unwrap();

    assert_eq!(report.contacted.len(), 3);
    assert_eq!(report.send_failures.len(), 1);
    assert_eq!(report.send_failures[0].recipient, ps[1].phone_number);
    assert!(attempt::has_pending(h.db.pool(), ps[1].id, report.schedule.id)
        .await
        .unwrap());
}

// ============================================================================
// HandleInboundReply
// ============================================================================

#[tokio::test]
async fn test_three_yes_replies_confirm_schedule() {
    let h = harness(EngineConfig::default()).await;
    let ps = add_participants(&h, &["A", "B", "C", "D"]).await;
    let cycle = h.engine.start_weekly_cycle().await.unwrap();
    let sid = cycle.schedule.id;

    let r = reply(&h, &ps[1], "yes").await;
    assert_eq!(
        r.outcome,
        ReplyOutcome::Confirmed {
            participant_id: ps[1].id,
            schedule_id: sid,
            schedule_confirmed: false
        }
    );
    assert!(r.queue.is_none());

    reply(&h, &ps[0], " Y ").await;
    let s = schedule::get_schedule(h.db.pool(), sid).await.unwrap();
    assert_eq!(s.status, ScheduleStatus::InProgress);

    let r = reply(&h, &ps[2], "YES").await;
    assert!(matches!(
        r.outcome,
        ReplyOutcome::Confirmed {
            schedule_confirmed: true,
            ..
        }
    ));

    let s = schedule::get_schedule(h.db.pool(), sid).await.unwrap();
    assert_eq!(s.status, ScheduleStatus::Confirmed);
    assert_eq!(s.confirmed_ids, vec![ps[1].id, ps[0].id, ps[2].id]);

    let ack = h.sender.messages_to(&ps[1].phone_number);
    assert_eq!(ack.len(), 2);
    assert!(ack[1].contains("confirmed"));
    assert!(ack[1].contains("Saturday"));

    let a = attempt::list_for_schedule(h.db.pool(), sid).await.unwrap();
    assert!(a.iter().all(|a| a.response == ResponseStatus::Yes));
    assert!(a.iter().all(|a| a.responded_at == Some(monday())));
}

#[tokio::test]
async fn test_all_decline_until_queue_exhausted() {
    let h = harness(EngineConfig::default()).await;
    let ps = add_participants(&h, &["A", "B", "C", "D", "E"]).await;
    let cycle = h.engine.start_weekly_cycle().await.unwrap();
    let sid = cycle.schedule.id;
    assert_eq!(cycle.contacted, vec![ps[0].id, ps[1].id, ps[2].id]);

    let r = reply(&h, &ps[0], "no").await;
    assert_eq!(
        r.outcome,
        ReplyOutcome::Declined {
            participant_id: ps[0].id,
            schedule_id: sid
        }
    );
    assert_eq!(
        r.queue,
        Some(QueueAdvance::Invited {
            schedule_id: sid,
            participant_id: ps[3].id
        })
    );
    assert!(h.sender.messages_to(&ps[0].phone_number)[1].contains("Thanks"));

    let r = reply(&h, &ps[1], "N").await;
    assert_eq!(
        r.queue,
        Some(QueueAdvance::Invited {
            schedule_id: sid,
            participant_id: ps[4].id
        })
    );

    let r = reply(&h, &ps[2], "No").await;
    assert_eq!(r.queue, Some(QueueAdvance::Exhausted { schedule_id: sid }));

    assert_eq!(h.sender.messages_to(&ps[3].phone_number).len(), 1);
    assert_eq!(h.sender.messages_to(&ps[4].phone_number).len(), 1);

    let r = reply(&h, &ps[3], "no").await;
    assert_eq!(r.queue, Some(QueueAdvance::Exhausted { schedule_id: sid }));
    let r = reply(&h, &ps[4], "no").await;
    assert_eq!(r.queue, Some(QueueAdvance::Exhausted { schedule_id: sid }));

    // Every participant asked exactly once.
    let mut contacted = contacted_ids(&h, sid).await;
    contacted.sort();
    let mut all: Vec<i64> = ps.iter().map(|p| p.id).collect();
    all.sort();
    assert_eq!(contacted, all);

    let s = schedule::get_schedule(h.db.pool(), sid).await.unwrap();
    assert_eq!(s.status, ScheduleStatus::InProgress);
    assert!(s.confirmed_ids.is_empty());
}

#[tokio::test]
async fn test_invalid_reply_prompts_without_state_change() {
    let h = harness(EngineConfig::default()).await;
    let ps = add_participants(&h, &["A"]).await;
    let cycle = h.engine.start_weekly_cycle().await.unwrap();

    let r = reply(&h, &ps[0], "maybe").await;

    assert_eq!(r.outcome, ReplyOutcome::InvalidResponse);
    let msgs = h.sender.messages_to(&ps[0].phone_number);
    assert_eq!(msgs.last().unwrap(), "Please reply YES or NO");

    let a = attempt::list_for_schedule(h.db.pool(), cycle.schedule.id)
        .await
        .unwrap();
    assert_eq!(a.len(), 1);
    assert_eq!(a[0].response, ResponseStatus::Pending);
}

#[tokio::test]
async fn test_unknown_number_is_ignored_silently() {
    let h = harness(EngineConfig::default()).await;
    add_participants(&h, &["A"]).await;
    h.engine.start_weekly_cycle().await.unwrap();
    let sent = h.sender.count();

    let r = h
        .engine
        .handle_inbound_reply("+19998887777", "yes")
        .await
        .unwrap();

    assert_eq!(r.outcome, ReplyOutcome::UnknownNumber);
    assert_eq!(h.sender.count(), sent);
}

#[tokio::test]
async fn test_reply_without_pending_request() {
    let h = harness(EngineConfig::default()).await;
    let ps = add_participants(&h, &["A"]).await;

    let r = reply(&h, &ps[0], "yes").await;

    assert_eq!(r.outcome, ReplyOutcome::NoPendingRequest);
    assert_eq!(h.sender.count(), 0);
}

#[tokio::test]
async fn test_repeated_yes_is_not_duplicated() {
    let h = harness(EngineConfig::default()).await;
    let ps = add_participants(&h, &["A", "B", "C"]).await;
    let cycle = h.engine.start_weekly_cycle().await.unwrap();

    reply(&h, &ps[0], "yes").await;
    let second = reply(&h, &ps[0], "yes").await;

    assert_eq!(second.outcome, ReplyOutcome::NoPendingRequest);
    let s = schedule::get_schedule(h.db.pool(), cycle.schedule.id)
        .await
        .unwrap();
    assert_eq!(s.confirmed_ids, vec![ps[0].id]);
}

// ============================================================================
// CheckNoResponses
// ============================================================================

#[tokio::test]
async fn test_sweep_respects_window_boundary() {
    let h = harness(EngineConfig::default()).await;
    let ps = add_participants(&h, &["A", "B", "C", "D"]).await;
    let cycle = h.engine.start_weekly_cycle().await.unwrap();
    let sid = cycle.schedule.id;

    h.clock.advance(Duration::hours(24) - Duration::seconds(1));
    let early = h.engine.check_no_responses().await.unwrap();
    assert!(early.expired.is_empty());
    assert!(early.advances.is_empty());

    h.clock.advance(Duration::seconds(1));
    let sweep = h.engine.check_no_responses().await.unwrap();
    assert_eq!(sweep.expired.len(), 3);
    assert_eq!(
        sweep.advances,
        vec![
            QueueAdvance::Invited {
                schedule_id: sid,
                participant_id: ps[3].id
            },
            QueueAdvance::Exhausted { schedule_id: sid },
            QueueAdvance::Exhausted { schedule_id: sid },
        ]
    );

    let a = attempt::list_for_schedule(h.db.pool(), sid).await.unwrap();
    let timed_out = a
        .iter()
        .filter(|a| a.response == ResponseStatus::NoResponse)
        .count();
    assert_eq!(timed_out, 3);
    assert_single_pending(&h, sid).await;

    // Nothing left to expire until D's window passes.
    let again = h.engine.check_no_responses().await.unwrap();
    assert!(again.expired.is_empty());
}

#[tokio::test]
async fn test_late_reply_after_timeout_is_ignored() {
    let h = harness(EngineConfig::default()).await;
    let ps = add_participants(&h, &["A", "B", "C", "D"]).await;
    let cycle = h.engine.start_weekly_cycle().await.unwrap();

    reply(&h, &ps[1], "yes").await;
    reply(&h, &ps[2], "yes").await;

    h.clock.advance(Duration::hours(25));
    let sweep = h.engine.check_no_responses().await.unwrap();
    assert_eq!(sweep.expired.len(), 1);

    let late = reply(&h, &ps[0], "YES").await;
    assert_eq!(late.outcome, ReplyOutcome::NoPendingRequest);

    let s = schedule::get_schedule(h.db.pool(), cycle.schedule.id)
        .await
        .unwrap();
    assert_eq!(s.confirmed_ids, vec![ps[1].id, ps[2].id]);
    assert_eq!(s.status, ScheduleStatus::InProgress);
}

#[tokio::test]
async fn test_timed_out_participant_never_asked_again() {
    let h = harness(EngineConfig::default()).await;
    let ps = add_participants(&h, &["A", "B", "C", "D", "E"]).await;
    let cycle = h.engine.start_weekly_cycle().await.unwrap();
    let sid = cycle.schedule.id;

    // A times out, B declines, C confirms.
    reply(&h, &ps[2], "yes").await;
    h.clock.advance(Duration::hours(1));
    reply(&h, &ps[1], "no").await; // invites D
    h.clock.advance(Duration::hours(23));
    let sweep = h.engine.check_no_responses().await.unwrap(); // A times out, invites E
    assert_eq!(sweep.expired.len(), 1);
    assert_eq!(
        sweep.advances,
        vec![QueueAdvance::Invited {
            schedule_id: sid,
            participant_id: ps[4].id
        }]
    );

    let r = reply(&h, &ps[3], "no").await;
    assert_eq!(r.queue, Some(QueueAdvance::Exhausted { schedule_id: sid }));

    let contacted = contacted_ids(&h, sid).await;
    let unique: HashSet<i64> = contacted.iter().copied().collect();
    assert_eq!(contacted.len(), unique.len());
    assert_eq!(h.sender.messages_to(&ps[0].phone_number).len(), 1);
}

// ============================================================================
// SendMidweekCheckin
// ============================================================================

#[tokio::test]
async fn test_checkin_retraction_reopens_schedule() {
    let h = harness(EngineConfig::default()).await;
    let ps = add_participants(&h, &["A", "B", "C", "D"]).await;
    let cycle = h.engine.start_weekly_cycle().await.unwrap();
    let sid = cycle.schedule.id;

    for p in &ps[..3] {
        reply(&h, p, "yes").await;
    }

    // Thursday.
    h.clock.advance(Duration::days(3));
    let checkin = h.engine.send_midweek_checkin().await.unwrap();
    assert_eq!(checkin.prompted, vec![ps[0].id, ps[1].id, ps[2].id]);
    assert!(checkin.skipped.is_empty());
    assert!(h
        .sender
        .messages_to(&ps[0].phone_number)
        .last()
        .unwrap()
        .contains("Reply YES to confirm or NO"));
    assert_single_pending(&h, sid).await;

    let r = reply(&h, &ps[1], "no").await;
    assert_eq!(
        r.outcome,
        ReplyOutcome::Retracted {
            participant_id: ps[1].id,
            schedule_id: sid
        }
    );
    assert_eq!(
        r.queue,
        Some(QueueAdvance::Invited {
            schedule_id: sid,
            participant_id: ps[3].id
        })
    );

    let s = schedule::get_schedule(h.db.pool(), sid).await.unwrap();
    assert_eq!(s.status, ScheduleStatus::InProgress);
    assert_eq!(s.confirmed_ids, vec![ps[0].id, ps[2].id]);

    // Re-confirming does not duplicate.
    let r = reply(&h, &ps[0], "yes").await;
    assert!(matches!(r.outcome, ReplyOutcome::Confirmed { schedule_confirmed: false, .. }));

    let r = reply(&h, &ps[3], "yes").await;
    assert!(matches!(r.outcome, ReplyOutcome::Confirmed { schedule_confirmed: true, .. }));

    let s = schedule::get_schedule(h.db.pool(), sid).await.unwrap();
    assert_eq!(s.confirmed_ids, vec![ps[0].id, ps[2].id, ps[3].id]);
    assert_eq!(s.status, ScheduleStatus::Confirmed);
}

#[tokio::test]
async fn test_checkin_skips_open_requests_and_missing_schedule() {
    let h = harness(EngineConfig::default()).await;
    let ps = add_participants(&h, &["A", "B", "C"]).await;

    let none = h.engine.send_midweek_checkin().await.unwrap();
    assert!(none.schedule.is_none());

    h.engine.start_weekly_cycle().await.unwrap();
    reply(&h, &ps[0], "yes").await;

    let first = h.engine.send_midweek_checkin().await.unwrap();
    assert_eq!(first.prompted, vec![ps[0].id]);

    let second = h.engine.send_midweek_checkin().await.unwrap();
    assert!(second.prompted.is_empty());
    assert_eq!(second.skipped, vec![ps[0].id]);
}

#[tokio::test]
async fn test_unanswered_checkin_on_confirmed_schedule_does_not_advance() {
    let h = harness(EngineConfig::default()).await;
    let ps = add_participants(&h, &["A", "B", "C", "D"]).await;
    h.engine.start_weekly_cycle().await.unwrap();
    for p in &ps[..3] {
        reply(&h, p, "yes").await;
    }

    h.engine.send_midweek_checkin().await.unwrap();
    h.clock.advance(Duration::hours(24));
    let sweep = h.engine.check_no_responses().await.unwrap();

    assert_eq!(sweep.expired.len(), 3);
    assert!(sweep.advances.is_empty());
    assert!(h.sender.messages_to(&ps[3].phone_number).is_empty());
}

// ============================================================================
// SendFinalReminders
// ============================================================================

#[tokio::test]
async fn test_final_reminders_credit_full_crew() {
    let h = harness(EngineConfig::default()).await;
    let ps = add_participants(&h, &["Ammon", "Alma", "Nephi", "Moroni"]).await;
    h.engine.start_weekly_cycle().await.unwrap();
    for p in &ps[..3] {
        reply(&h, p, "yes").await;
    }

    // Saturday.
    h.clock.advance(Duration::days(5));
    let report = h.engine.send_final_reminders().await.unwrap();

    assert_eq!(report.reminded.len(), 3);
    assert_eq!(report.credited, vec![ps[0].id, ps[1].id, ps[2].id]);

    let reminder = h.sender.messages_to(&ps[0].phone_number);
    let reminder = reminder.last().unwrap();
    assert!(reminder.contains("Alma and Nephi"));
    assert!(reminder.contains("October 25, 2026"));
    assert!(!reminder.contains("Ammon"));

    for p in &ps[..3] {
        let fetched = participant::get_participant(h.db.pool(), p.id).await.unwrap();
        assert_eq!(fetched.times_served, 1);
        assert_eq!(fetched.last_served_date, Some(sunday()));
    }
    let bench = participant::get_participant(h.db.pool(), ps[3].id).await.unwrap();
    assert_eq!(bench.times_served, 0);

    // A redelivered trigger does not count the service twice.
    let again = h.engine.send_final_reminders().await.unwrap();
    assert!(again.credited.is_empty());
    let fetched = participant::get_participant(h.db.pool(), ps[0].id).await.unwrap();
    assert_eq!(fetched.times_served, 1);
}

#[tokio::test]
async fn test_final_reminders_credit_partial_crew() {
    let h = harness(EngineConfig::default()).await;
    let ps = add_participants(&h, &["A", "B", "C"]).await;
    h.engine.start_weekly_cycle().await.unwrap();
    reply(&h, &ps[1], "yes").await;

    h.clock.advance(Duration::days(5));
    let report = h.engine.send_final_reminders().await.unwrap();

    assert_eq!(report.credited, vec![ps[1].id]);
    let reminder = h.sender.messages_to(&ps[1].phone_number);
    assert!(!reminder.last().unwrap().contains(" with "));

    // Next week's ranking puts the credited participant last.
    let ranked: Vec<i64> = participant::list_active_ranked(h.db.pool())
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.id)
        .collect();
    assert_eq!(ranked, vec![ps[0].id, ps[2].id, ps[1].id]);
}

#[tokio::test]
async fn test_final_reminders_without_crew() {
    let h = harness(EngineConfig::default()).await;
    add_participants(&h, &["A", "B", "C"]).await;

    let none = h.engine.send_final_reminders().await.unwrap();
    assert!(none.schedule.is_none());

    h.engine.start_weekly_cycle().await.unwrap();
    let sent = h.sender.count();
    let empty = h.engine.send_final_reminders().await.unwrap();
    assert!(empty.schedule.is_some());
    assert!(empty.reminded.is_empty());
    assert_eq!(h.sender.count(), sent);
}

// ============================================================================
// Configuration
// ============================================================================

#[tokio::test]
async fn test_custom_crew_size() {
    let h = harness(EngineConfig::default().with_crew_size(2)).await;
    let ps = add_participants(&h, &["A", "B", "C"]).await;

    let cycle = h.engine.start_weekly_cycle().await.unwrap();
    assert_eq!(cycle.contacted.len(), 2);

    reply(&h, &ps[0], "yes").await;
    let r = reply(&h, &ps[1], "yes").await;
    assert!(matches!(r.outcome, ReplyOutcome::Confirmed { schedule_confirmed: true, .. }));
}
