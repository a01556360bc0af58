//! Participant directory endpoints.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use database::{participant, NewParticipant, Participant, ParticipantUpdate};
use tracing::info;

use crate::error::Result;
use crate::state::AppState;

/// List every participant in rotation order.
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Participant>>> {
    let participants = participant::list_participants(state.db.pool()).await?;
    Ok(Json(participants))
}

/// Add a participant.
pub async fn create(
    State(state): State<AppState>,
    Json(new): Json<NewParticipant>,
) -> Result<(StatusCode, Json<Participant>)> {
    let created = participant::create_participant(state.db.pool(), &new).await?;
    info!(participant_id = created.id, "Participant added");
    Ok((StatusCode::CREATED, Json(created)))
}

/// Get one participant.
pub async fn get(State(state): State<AppState>, Path(id): Path<i64>) -> Result<Json<Participant>> {
    let found = participant::get_participant(state.db.pool(), id).await?;
    Ok(Json(found))
}

/// Apply a partial update.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(update): Json<ParticipantUpdate>,
) -> Result<Json<Participant>> {
    let updated = participant::update_participant(state.db.pool(), id, &update).await?;
    info!(participant_id = id, "Participant updated");
    Ok(Json(updated))
}

/// Take a participant out of rotation. History is kept.
pub async fn deactivate(State(state): State<AppState>, Path(id): Path<i64>) -> Result<StatusCode> {
    participant::deactivate_participant(state.db.pool(), id).await?;
    info!(participant_id = id, "Participant deactivated");
    Ok(StatusCode::NO_CONTENT)
}
