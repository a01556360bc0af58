//! Route handlers for the roster web server.

pub mod cron;
pub mod health;
pub mod participants;
pub mod schedules;
pub mod sms;

use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the router with all routes.
pub fn router() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/health", get(health::health))
        // Scheduled triggers
        .route("/api/cron/weekly-cycle", get(cron::weekly_cycle))
        .route("/api/cron/check-responses", get(cron::check_responses))
        .route("/api/cron/midweek-checkin", get(cron::midweek_checkin))
        .route("/api/cron/final-reminders", get(cron::final_reminders))
        // Inbound SMS webhook
        .route("/api/sms/receive", post(sms::receive))
        // Directory
        .route(
            "/api/participants",
            get(participants::list).post(participants::create),
        )
        .route(
            "/api/participants/:id",
            get(participants::get)
                .put(participants::update)
                .delete(participants::deactivate),
        )
        // Schedules
        .route("/api/schedules", get(schedules::list))
        .route("/api/schedules/:id", get(schedules::detail))
        .layer(TraceLayer::new_for_http())
}
