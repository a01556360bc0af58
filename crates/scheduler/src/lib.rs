//! Weekly crew assignment and confirmation engine.
//!
//! This crate provides the [`Engine`] type which fills one recurring Sunday
//! slot from a rotating roster, talking to participants over SMS.
//!
//! # Workflow
//!
//! ```text
//!  Monday            start_weekly_cycle    invite the top-ranked crew
//!     ↓
//!  on each SMS       handle_inbound_reply  YES → crew, NO → next candidate
//!     ↓
//!  hourly            check_no_responses    24h silence → next candidate
//!     ↓
//!  Thursday          send_midweek_checkin  crew re-confirms (NO retracts)
//!     ↓
//!  Saturday          send_final_reminders  remind crew, credit service
//! ```
//!
//! Ranking is oldest `last_served_date` first (never-served before anyone),
//! then fewest `times_served`, then directory insertion order.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use database::Database;
//! use scheduler::{Engine, EngineConfig, LoggingSender};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::connect("sqlite:roster.db?mode=rwc").await?;
//!     db.migrate().await?;
//!
//!     let engine = Engine::new(db, Arc::new(LoggingSender), EngineConfig::from_env()?);
//!     let report = engine.start_weekly_cycle().await?;
//!     println!("Contacted {} for {}", report.contacted.len(), report.schedule.service_date);
//!     Ok(())
//! }
//! ```

mod calendar;
mod clock;
mod config;
mod engine;
mod error;
mod messages;
mod report;
mod sender;

// Public exports
pub use calendar::{format_long_date, next_service_date};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{parse_utc_offset, EngineConfig, DEFAULT_CREW_SIZE, DEFAULT_SERVICE_TIME};
pub use engine::Engine;
pub use error::{Result, SchedulerError};
pub use report::{
    Answer, CheckinReport, CycleReport, QueueAdvance, ReminderReport, ReplyOutcome, ReplyReport,
    SendFailure, SweepReport,
};
pub use sender::{LoggingSender, MessageSender, NoOpSender};

/// Message templates, exposed for transports and tests that need the exact text.
pub mod templates {
    pub use crate::messages::*;
}
