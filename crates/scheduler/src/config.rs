//! Configuration for the scheduling engine.

use std::env;

use chrono::{Duration, FixedOffset, Offset, Utc};

use crate::error::SchedulerError;

/// Default number of participants needed each Sunday.
pub const DEFAULT_CREW_SIZE: usize = 3;

/// Default hours a participant has to reply before being skipped.
pub const DEFAULT_RESPONSE_WINDOW_HOURS: i64 = 24;

/// Default service time shown in messages.
pub const DEFAULT_SERVICE_TIME: &str = "8:50 AM";

/// Configuration for the engine.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Participants needed for a confirmed schedule.
    pub crew_size: usize,

    /// How long a contact attempt stays pending before the sweep skips it.
    pub response_window: Duration,

    /// Service time, as printed in messages.
    pub service_time: String,

    /// Local offset used to decide what day it is.
    pub utc_offset: FixedOffset,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            crew_size: DEFAULT_CREW_SIZE,
            response_window: Duration::hours(DEFAULT_RESPONSE_WINDOW_HOURS),
            service_time: DEFAULT_SERVICE_TIME.to_string(),
            utc_offset: utc(),
        }
    }
}

impl EngineConfig {
    /// Create configuration from environment variables.
    ///
    /// Optional environment variables:
    /// - `CREW_SIZE` - Participants per Sunday (default: 3)
    /// - `RESPONSE_WINDOW_HOURS` - Reply window in hours (default: 24)
    /// - `SERVICE_TIME` - Service time for messages (default: 8:50 AM)
    /// - `SERVICE_UTC_OFFSET` - Local offset such as `-07:00` (default: +00:00)
    pub fn from_env() -> Result<Self, SchedulerError> {
        let crew_size = match env::var("CREW_SIZE") {
            Ok(value) => value
                .parse::<usize>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| SchedulerError::Config(format!("invalid CREW_SIZE: {}", value)))?,
            Err(_) => DEFAULT_CREW_SIZE,
        };

        let window_hours = match env::var("RESPONSE_WINDOW_HOURS") {
            Ok(value) => value.parse::<i64>().ok().filter(|h| *h > 0).ok_or_else(|| {
                SchedulerError::Config(format!("invalid RESPONSE_WINDOW_HOURS: {}", value))
            })?,
            Err(_) => DEFAULT_RESPONSE_WINDOW_HOURS,
        };

        let service_time =
            env::var("SERVICE_TIME").unwrap_or_else(|_| DEFAULT_SERVICE_TIME.to_string());

        let utc_offset = match env::var("SERVICE_UTC_OFFSET") {
            Ok(value) => parse_utc_offset(&value)?,
            Err(_) => utc(),
        };

        Ok(Self {
            crew_size,
            response_window: Duration::hours(window_hours),
            service_time,
            utc_offset,
        })
    }

    /// Set the crew size.
    pub fn with_crew_size(mut self, crew_size: usize) -> Self {
        self.crew_size = crew_size;
        self
    }

    /// Set the response window.
    pub fn with_response_window(mut self, window: Duration) -> Self {
        self.response_window = window;
        self
    }

    /// Set the service time label.
    pub fn with_service_time(mut self, time: impl Into<String>) -> Self {
        self.service_time = time.into();
        self
    }

    /// Set the local UTC offset.
    pub fn with_utc_offset(mut self, offset: FixedOffset) -> Self {
        self.utc_offset = offset;
        self
    }

    /// Whole hours in the response window, for message text.
    pub fn response_window_hours(&self) -> i64 {
        self.response_window.num_hours()
    }
}

fn utc() -> FixedOffset {
    Utc.fix()
}

/// Parse an offset written as `+HH:MM`, `-HH:MM` or `Z`.
pub fn parse_utc_offset(value: &str) -> Result<FixedOffset, SchedulerError> {
    let invalid = || SchedulerError::Config(format!("invalid UTC offset: {}", value));
    let value = value.trim();

    if value.eq_ignore_ascii_case("z") {
        return Ok(utc());
    }

    let (sign, rest) = if let Some(rest) = value.strip_prefix('+') {
        (1, rest)
    } else if let Some(rest) = value.strip_prefix('-') {
        (-1, rest)
    } else {
        return Err(invalid());
    };

    let (hours, minutes) = rest.split_once(':').ok_or_else(invalid)?;
    let hours: i32 = hours.parse().map_err(|_| invalid())?;
    let minutes: i32 = minutes.parse().map_err(|_| invalid())?;
    if !(0..=23).contains(&hours) || !(0..=59).contains(&minutes) {
        return Err(invalid());
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60)).ok_or_else(invalid)
}
