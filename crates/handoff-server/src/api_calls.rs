//! Call lifecycle handlers: create, context, status, end.

use crate::AppState;
use axum::extract::{Extension, Path};
use axum::http::StatusCode;
use axum::response::Json;
use handoff_sessions::{ids, SessionError};
use handoff_types::CallSession;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

/// Maps a [`SessionError`] to the HTTP response, logging conflicts.
///
/// `NotFound` → 404, state conflicts → 409.
pub(crate) fn session_err_to_response(e: SessionError) -> (StatusCode, String) {
    match e {
        SessionError::NotFound(_) => (StatusCode::NOT_FOUND, "Call session not found".to_string()),
        SessionError::NotTransferable(_) | SessionError::TransferNotInitiated(_) => {
            tracing::warn!(error = %e, "session state conflict");
            (StatusCode::CONFLICT, e.to_string())
        }
    }
}

#[derive(Deserialize)]
pub struct CreateCallRequest {
    #[serde(default)]
    pub caller_id: Option<String>,
    #[serde(default)]
    pub room_name: Option<String>,
}

/// POST /api/create-call
///
/// Creates a call session. When no room name is supplied a fresh room
/// is created at the provider; a supplied name is treated as already
/// existing. Mints tokens for the caller and a freshly identified
/// Agent A.
pub async fn create_call_handler(
    Extension(state): Extension<Arc<AppState>>,
    Json(payload): Json<CreateCallRequest>,
) -> Result<Json<Value>, (StatusCode, String)> {
    let caller_id = payload
        .caller_id
        .unwrap_or_else(|| format!("caller_{}", ids::short_hex()));

    let room_name = match payload.room_name {
        Some(existing) => existing,
        None => {
            let room_name = format!("call_{}", ids::short_hex());
            let room = state.rooms.create_room(&room_name).await;
            if room.is_fallback() {
                tracing::warn!(room = room_name, "room provider degraded, using fallback sid");
            }
            room_name
        }
    };

    let session = state.sessions.create(&caller_id, &room_name);

    let caller_token = state.rooms.mint_token(&room_name, &caller_id).into_value();
    let agent_a_id = format!("agent_a_{}", ids::short_hex());
    let agent_token = state.rooms.mint_token(&room_name, &agent_a_id).into_value();

    state
        .sessions
        .assign_agent_a(&session.session_id, &agent_a_id)
        .map_err(session_err_to_response)?;

    tracing::info!(
        session_id = session.session_id,
        room = room_name,
        caller = caller_id,
        "created call session"
    );

    Ok(Json(json!({
        "session_id": session.session_id,
        "room_name": room_name,
        "caller_token": caller_token,
        "agent_token": agent_token,
        "agent_id": agent_a_id,
        "ws_url": state.rooms.url(),
    })))
}

#[derive(Deserialize)]
pub struct AddContextRequest {
    #[serde(default)]
    pub session_id: String,
    #[serde(default)]
    pub message: String,
}

/// POST /api/add-context
///
/// Appends a free-text line to the session's summarization context.
pub async fn add_context_handler(
    Extension(state): Extension<Arc<AppState>>,
    Json(payload): Json<AddContextRequest>,
) -> Result<Json<Value>, (StatusCode, String)> {
    if payload.session_id.is_empty() || payload.message.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            "Missing session_id or message".to_string(),
        ));
    }

    if !state.sessions.contains(&payload.session_id) {
        return Err((
            StatusCode::NOT_FOUND,
            "Call session not found".to_string(),
        ));
    }

    state
        .summaries
        .add_context(&payload.session_id, &payload.message);

    Ok(Json(json!({ "message": "Context added successfully" })))
}

/// GET /api/call-status/:session_id
///
/// Read-only snapshot. Ended sessions remain readable.
pub async fn call_status_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> Result<Json<CallSession>, (StatusCode, String)> {
    let session = state
        .sessions
        .get(&session_id)
        .map_err(session_err_to_response)?;
    Ok(Json(session))
}

#[derive(Deserialize)]
pub struct EndCallRequest {
    #[serde(default)]
    pub session_id: String,
}

/// POST /api/end-call
///
/// Moves the session to `ended`, tears down both rooms (best effort),
/// and discards the summarization context. Room deletion failures are
/// logged and swallowed: a room that no longer exists is not an error.
pub async fn end_call_handler(
    Extension(state): Extension<Arc<AppState>>,
    Json(payload): Json<EndCallRequest>,
) -> Result<Json<Value>, (StatusCode, String)> {
    let session = state
        .sessions
        .end(&payload.session_id)
        .map_err(session_err_to_response)?;

    if let Err(e) = state.rooms.delete_room(&session.room_name).await {
        tracing::warn!(room = session.room_name, "failed to delete room: {}", e);
    } else {
        tracing::info!(room = session.room_name, "room deleted");
    }

    if let Some(transfer_room) = &session.transfer_room {
        if let Err(e) = state.rooms.delete_room(transfer_room).await {
            tracing::warn!(room = transfer_room, "failed to delete transfer room: {}", e);
        }
    }

    state.summaries.discard_context(&payload.session_id);

    Ok(Json(json!({
        "message": "Call ended successfully",
        "session_id": session.session_id,
        "room_name": session.room_name,
        "status": "ended",
    })))
}
