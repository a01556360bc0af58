//! Inbound SMS webhook.

use axum::extract::rejection::FormRejection;
use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Form;
use sms_gateway::{InboundSms, EMPTY_TWIML, TWIML_CONTENT_TYPE};
use tracing::{error, info, warn};

use crate::state::AppState;

/// Apply an inbound reply.
///
/// Always answers 200 with empty TwiML so the provider never retries; the
/// engine sends any acknowledgment itself.
pub async fn receive(
    State(state): State<AppState>,
    form: Result<Form<InboundSms>, FormRejection>,
) -> Response {
    match form {
        Ok(Form(inbound)) => {
            match state
                .engine
                .handle_inbound_reply(&inbound.from, &inbound.body)
                .await
            {
                Ok(report) => {
                    info!(
                        from = %inbound.from,
                        sid = inbound.message_sid.as_deref().unwrap_or("-"),
                        outcome = ?report.outcome,
                        "Inbound SMS handled"
                    );
                }
                Err(e) => {
                    error!(from = %inbound.from, error = %e, "Failed to handle inbound SMS");
                }
            }
        }
        Err(rejection) => {
            warn!(error = %rejection, "Malformed SMS webhook");
        }
    }

    twiml()
}

fn twiml() -> Response {
    ([(header::CONTENT_TYPE, TWIML_CONTENT_TYPE)], EMPTY_TWIML).into_response()
}
