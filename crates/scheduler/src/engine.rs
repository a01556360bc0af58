//! The weekly assignment and confirmation workflow.

use std::sync::Arc;

use chrono::NaiveDate;
use database::{
    attempt, participant, schedule, AttemptKind, Database, DatabaseError, Participant,
    ResponseStatus, ScheduleStatus, WeeklySchedule,
};
use tracing::{debug, info, warn};

use crate::calendar::{format_long_date, next_service_date};
use crate::clock::{Clock, SystemClock};
use crate::config::EngineConfig;
use crate::error::Result;
use crate::messages;
use crate::report::{
    Answer, CheckinReport, CycleReport, QueueAdvance, ReminderReport, ReplyOutcome, ReplyReport,
    SendFailure, SweepReport,
};
use crate::sender::MessageSender;

/// Drives one weekly service slot from first invitation to final reminder.
///
/// Each public method is one unit of work started by an external trigger.
/// The engine holds no state between calls; everything it knows comes from
/// the database, so overlapping triggers coordinate only through the
/// conditional writes in the `database` crate.
pub struct Engine {
    /// Participant, schedule and ledger store.
    db: Database,
    /// Outbound transport.
    sender: Arc<dyn MessageSender>,
    /// Time source.
    clock: Arc<dyn Clock>,
    config: EngineConfig,
}

impl Engine {
    /// Create an engine on wall-clock time.
    pub fn new(db: Database, sender: Arc<dyn MessageSender>, config: EngineConfig) -> Self {
        Self {
            db,
            sender,
            clock: Arc::new(SystemClock),
            config,
        }
    }

    /// Replace the time source.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The Sunday the next cycle targets.
    pub fn upcoming_service_date(&self) -> NaiveDate {
        next_service_date(self.clock.now(), self.config.utc_offset)
    }

    fn crew_size(&self) -> i64 {
        self.config.crew_size as i64
    }

    /// Create the upcoming Sunday's schedule and invite the top-ranked crew.
    ///
    /// Idempotent: if the schedule already exists it is returned untouched.
    pub async fn start_weekly_cycle(&self) -> Result<CycleReport> {
        let pool = self.db.pool();
        let service_date = self.upcoming_service_date();

        if let Some(existing) = schedule::find_by_date(pool, service_date).await? {
            info!(%service_date, schedule_id = existing.id, "Schedule already exists");
            return Ok(Self::existing_cycle(existing));
        }

        let created = match schedule::create_schedule(pool, service_date).await {
            Ok(s) => s,
            Err(DatabaseError::AlreadyExists { .. }) => {
                // Another trigger created it between the lookup and the insert.
                let existing = schedule::find_by_date(pool, service_date)
                    .await?
                    .ok_or_else(|| DatabaseError::NotFound {
                        entity: "Schedule",
                        id: service_date.to_string(),
                    })?;
                info!(%service_date, schedule_id = existing.id, "Schedule already exists");
                return Ok(Self::existing_cycle(existing));
            }
            Err(e) => return Err(e.into()),
        };

        let ranked = participant::list_active_ranked(pool).await?;
        let mut contacted = Vec::new();
        let mut send_failures = Vec::new();

        for candidate in ranked.iter().take(self.config.crew_size) {
            if self
                .invite(candidate, &created, &mut send_failures)
                .await?
            {
                contacted.push(candidate.id);
            }
        }

        let understaffed = contacted.len() < self.config.crew_size;
        if understaffed {
            warn!(
                %service_date,
                active = ranked.len(),
                crew_size = self.config.crew_size,
                "Not enough active participants to fill the crew"
            );
        }

        info!(
            %service_date,
            schedule_id = created.id,
            contacted = contacted.len(),
            "Weekly cycle started"
        );

        Ok(CycleReport {
            schedule: created,
            already_exists: false,
            contacted,
            understaffed,
            send_failures,
        })
    }

    fn existing_cycle(schedule: WeeklySchedule) -> CycleReport {
        CycleReport {
            schedule,
            already_exists: true,
            contacted: Vec::new(),
            understaffed: false,
            send_failures: Vec::new(),
        }
    }

    /// Apply an inbound SMS reply.
    pub async fn handle_inbound_reply(&self, from: &str, raw_text: &str) -> Result<ReplyReport> {
        let pool = self.db.pool();

        let Some(answer) = Answer::parse(raw_text) else {
            let mut report = ReplyReport::new(ReplyOutcome::InvalidResponse);
            self.notify(from, messages::INVALID_REPLY, &mut report.send_failures)
                .await;
            return Ok(report);
        };

        let Some(participant) = participant::find_by_phone(pool, from).await? else {
            debug!(from, "Reply from unknown number ignored");
            return Ok(ReplyReport::new(ReplyOutcome::UnknownNumber));
        };

        let Some(pending) = attempt::latest_pending_for(pool, participant.id).await? else {
            debug!(participant_id = participant.id, "Reply with no pending request ignored");
            return Ok(ReplyReport::new(ReplyOutcome::NoPendingRequest));
        };

        let response = match answer {
            Answer::Yes => ResponseStatus::Yes,
            Answer::No => ResponseStatus::No,
        };
        let resolved =
            attempt::resolve_attempt(pool, pending.id, response, self.clock.now()).await?;
        if !resolved {
            // The sweep (or a duplicate delivery) got there first.
            debug!(attempt_id = pending.id, "Attempt already resolved");
            return Ok(ReplyReport::new(ReplyOutcome::NoPendingRequest));
        }

        let schedule_id = pending.schedule_id;
        info!(
            participant_id = participant.id,
            schedule_id,
            answer = ?answer,
            kind = ?pending.kind,
            "Reply recorded"
        );

        match answer {
            Answer::Yes => {
                let added = schedule::add_to_crew(pool, schedule_id, participant.id).await?;
                if !added {
                    debug!(participant_id = participant.id, schedule_id, "Already on crew");
                }
                if schedule::promote_if_full(pool, schedule_id, self.crew_size()).await? {
                    info!(schedule_id, "Schedule confirmed");
                }
                let current = schedule::get_schedule(pool, schedule_id).await?;

                let mut report = ReplyReport::new(ReplyOutcome::Confirmed {
                    participant_id: participant.id,
                    schedule_id,
                    schedule_confirmed: current.status == ScheduleStatus::Confirmed,
                });
                self.notify(
                    &participant.phone_number,
                    &messages::confirmation(&participant.name),
                    &mut report.send_failures,
                )
                .await;
                Ok(report)
            }
            Answer::No => {
                let retracted = pending.kind == AttemptKind::Checkin
                    && schedule::remove_from_crew(pool, schedule_id, participant.id).await?;

                let (outcome, ack) = if retracted {
                    if schedule::demote_if_short(pool, schedule_id, self.crew_size()).await? {
                        info!(schedule_id, "Schedule reopened after retraction");
                    }
                    (
                        ReplyOutcome::Retracted {
                            participant_id: participant.id,
                            schedule_id,
                        },
                        messages::retraction(&participant.name),
                    )
                } else {
                    (
                        ReplyOutcome::Declined {
                            participant_id: participant.id,
                            schedule_id,
                        },
                        messages::decline(&participant.name),
                    )
                };

                let mut report = ReplyReport::new(outcome);
                self.notify(&participant.phone_number, &ack, &mut report.send_failures)
                    .await;
                let advance = self
                    .advance_queue(schedule_id, &mut report.send_failures)
                    .await?;
                report.queue = Some(advance);
                Ok(report)
            }
        }
    }

    /// Invite the best-ranked participant not yet asked for this schedule.
    async fn advance_queue(
        &self,
        schedule_id: i64,
        send_failures: &mut Vec<SendFailure>,
    ) -> Result<QueueAdvance> {
        let pool = self.db.pool();
        let current = schedule::get_schedule(pool, schedule_id).await?;

        if current.status == ScheduleStatus::Confirmed {
            debug!(schedule_id, "Schedule already confirmed; queue not advanced");
            return Ok(QueueAdvance::AlreadyConfirmed { schedule_id });
        }

        // A candidate can be claimed by a concurrent trigger between the
        // lookup and the insert; the claim puts them in the contacted set,
        // so the next lookup moves past them.
        loop {
            let Some(candidate) = participant::next_candidate(pool, schedule_id).await? else {
                warn!(schedule_id, service_date = %current.service_date, "Queue exhausted");
                return Ok(QueueAdvance::Exhausted { schedule_id });
            };

            if self.invite(&candidate, &current, send_failures).await? {
                info!(schedule_id, participant_id = candidate.id, "Queue advanced");
                return Ok(QueueAdvance::Invited {
                    schedule_id,
                    participant_id: candidate.id,
                });
            }
        }
    }

    /// Mark every pending attempt older than the response window as
    /// `no_response` and move the queue for schedules still short-handed.
    pub async fn check_no_responses(&self) -> Result<SweepReport> {
        let pool = self.db.pool();
        let now = self.clock.now();
        let cutoff = now - self.config.response_window;

        let expired = attempt::list_expired(pool, cutoff).await?;
        let mut report = SweepReport::default();

        for entry in expired {
            if !attempt::resolve_attempt(pool, entry.id, ResponseStatus::NoResponse, now).await? {
                debug!(attempt_id = entry.id, "Attempt resolved before sweep");
                continue;
            }
            info!(
                attempt_id = entry.id,
                participant_id = entry.participant_id,
                schedule_id = entry.schedule_id,
                "No response within window"
            );
            report.expired.push(entry.id);

            let current = schedule::get_schedule(pool, entry.schedule_id).await?;
            if current.status != ScheduleStatus::Confirmed {
                let advance = self
                    .advance_queue(entry.schedule_id, &mut report.send_failures)
                    .await?;
                report.advances.push(advance);
            }
        }

        if !report.expired.is_empty() {
            info!(expired = report.expired.len(), "Timeout sweep complete");
        }

        Ok(report)
    }

    /// Ask every confirmed crew member of the upcoming schedule to re-confirm.
    ///
    /// Each prompt opens a fresh pending check-in, so a NO reply retracts.
    pub async fn send_midweek_checkin(&self) -> Result<CheckinReport> {
        let pool = self.db.pool();
        let service_date = self.upcoming_service_date();

        let Some(current) = schedule::find_by_date(pool, service_date).await? else {
            info!(%service_date, "No schedule for check-in");
            return Ok(CheckinReport::default());
        };

        let mut report = CheckinReport::default();
        let crew = participant::get_participants(pool, &current.confirmed_ids).await?;

        for member in &crew {
            let opened = attempt::create_attempt(
                pool,
                member.id,
                current.id,
                AttemptKind::Checkin,
                self.clock.now(),
            )
            .await;

            match opened {
                Ok(_) => {
                    self.notify(
                        &member.phone_number,
                        &messages::checkin(&member.name, &self.config.service_time),
                        &mut report.send_failures,
                    )
                    .await;
                    report.prompted.push(member.id);
                }
                Err(DatabaseError::AlreadyExists { .. }) => {
                    debug!(participant_id = member.id, "Check-in skipped; request already open");
                    report.skipped.push(member.id);
                }
                Err(e) => return Err(e.into()),
            }
        }

        info!(
            %service_date,
            schedule_id = current.id,
            prompted = report.prompted.len(),
            "Midweek check-in sent"
        );

        report.schedule = Some(current);
        Ok(report)
    }

    /// Remind the upcoming crew and record their service.
    ///
    /// Runs for any non-empty crew, full or not; partial crews are credited too.
    pub async fn send_final_reminders(&self) -> Result<ReminderReport> {
        let pool = self.db.pool();
        let service_date = self.upcoming_service_date();

        let Some(current) = schedule::find_by_date(pool, service_date).await? else {
            info!(%service_date, "No schedule for reminders");
            return Ok(ReminderReport::default());
        };

        let mut report = ReminderReport::default();
        if current.confirmed_ids.is_empty() {
            warn!(%service_date, schedule_id = current.id, "No confirmed crew to remind");
            report.schedule = Some(current);
            return Ok(report);
        }

        let crew = participant::get_participants(pool, &current.confirmed_ids).await?;
        let date = format_long_date(service_date);

        for member in &crew {
            let others: Vec<&str> = crew
                .iter()
                .filter(|p| p.id != member.id)
                .map(|p| p.name.as_str())
                .collect();
            self.notify(
                &member.phone_number,
                &messages::final_reminder(&date, &self.config.service_time, &others),
                &mut report.send_failures,
            )
            .await;
            report.reminded.push(member.id);
        }

        for member in &crew {
            if participant::record_service(pool, member.id, service_date).await? {
                report.credited.push(member.id);
            }
        }

        info!(
            %service_date,
            schedule_id = current.id,
            reminded = report.reminded.len(),
            credited = report.credited.len(),
            "Final reminders sent"
        );

        report.schedule = Some(current);
        Ok(report)
    }

    /// Record a pending invitation, then send it.
    ///
    /// Returns false without sending if the candidate already has an open
    /// request for this schedule.
    async fn invite(
        &self,
        candidate: &Participant,
        target: &WeeklySchedule,
        send_failures: &mut Vec<SendFailure>,
    ) -> Result<bool> {
        let opened = attempt::create_attempt(
            self.db.pool(),
            candidate.id,
            target.id,
            AttemptKind::Invitation,
            self.clock.now(),
        )
        .await;

        match opened {
            Ok(_) => {}
            Err(DatabaseError::AlreadyExists { .. }) => {
                debug!(participant_id = candidate.id, schedule_id = target.id, "Already invited");
                return Ok(false);
            }
            Err(e) => return Err(e.into()),
        }

        let text = messages::invitation(
            &candidate.name,
            &format_long_date(target.service_date),
            &self.config.service_time,
            self.config.response_window_hours(),
        );
        self.notify(&candidate.phone_number, &text, send_failures)
            .await;
        Ok(true)
    }

    /// Send a message, recording rather than propagating a failure.
    async fn notify(&self, recipient: &str, text: &str, send_failures: &mut Vec<SendFailure>) {
        if let Err(e) = self.sender.send_message(recipient, text).await {
            warn!(recipient, error = %e, "Message send failed");
            send_failures.push(SendFailure {
                recipient: recipient.to_string(),
                error: e.to_string(),
            });
        }
    }
}
