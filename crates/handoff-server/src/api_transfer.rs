//! Warm-transfer handlers: initiate, complete, agent exit.

use crate::api_calls::session_err_to_response;
use crate::AppState;
use axum::extract::Extension;
use axum::http::StatusCode;
use axum::response::Json;
use handoff_sessions::ids;
use handoff_types::{AgentStatus, Notification};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

#[derive(Deserialize)]
pub struct InitiateTransferRequest {
    #[serde(default)]
    pub session_id: String,
    #[serde(default)]
    pub agent_b_id: Option<String>,
}

/// POST /api/initiate-transfer
///
/// Summarizes the call so far, opens the briefing room, mints tokens
/// for both agents scoped to it, and queues a `transfer_request`
/// notification for Agent B. Retrying on a still-transferring session
/// overwrites the previous assignment; a completed or ended session is
/// rejected with 409.
pub async fn initiate_transfer_handler(
    Extension(state): Extension<Arc<AppState>>,
    Json(payload): Json<InitiateTransferRequest>,
) -> Result<Json<Value>, (StatusCode, String)> {
    let session_id = payload.session_id;
    let agent_b_id = payload
        .agent_b_id
        .unwrap_or_else(|| format!("agent_b_{}", ids::short_hex()));

    let transfer_room = state
        .sessions
        .begin_transfer(&session_id, &agent_b_id)
        .map_err(session_err_to_response)?;

    let summary = state.summaries.summarize(&session_id).await;
    state
        .sessions
        .set_summary(&session_id, &summary)
        .map_err(session_err_to_response)?;

    let room = state.rooms.create_room(&transfer_room).await;
    if room.is_fallback() {
        tracing::warn!(
            room = transfer_room,
            "room provider degraded, briefing room is a fallback"
        );
    }

    let session = state.sessions.get(&session_id).map_err(session_err_to_response)?;
    let agent_a_id = session.agent_a.unwrap_or_else(|| "agent_a".to_string());

    let agent_a_token = state
        .rooms
        .mint_token(&transfer_room, &agent_a_id)
        .into_value();
    let agent_b_token = state
        .rooms
        .mint_token(&transfer_room, &agent_b_id)
        .into_value();

    state.mailbox.push(Notification::transfer_request(
        &session_id,
        &agent_b_id,
        &transfer_room,
        &agent_b_token,
    ));

    state.agents.set_status(&agent_a_id, AgentStatus::Busy);
    state.agents.set_status(&agent_b_id, AgentStatus::Busy);

    tracing::info!(
        session_id,
        transfer_room,
        agent_b = agent_b_id,
        "transfer initiated"
    );

    Ok(Json(json!({
        "transfer_room": transfer_room,
        "agent_a_transfer_token": agent_a_token,
        "agent_b_transfer_token": agent_b_token,
        "call_summary": summary,
        "ws_url": state.rooms.url(),
    })))
}

#[derive(Deserialize)]
pub struct CompleteTransferRequest {
    #[serde(default)]
    pub session_id: String,
}

/// POST /api/complete-transfer
///
/// Mints a token for Agent B scoped to the original customer room,
/// marks the session `transferred`, and queues a `transfer_completed`
/// notification.
pub async fn complete_transfer_handler(
    Extension(state): Extension<Arc<AppState>>,
    Json(payload): Json<CompleteTransferRequest>,
) -> Result<Json<Value>, (StatusCode, String)> {
    let session = state
        .sessions
        .complete_transfer(&payload.session_id)
        .map_err(session_err_to_response)?;

    // complete_transfer guarantees agent_b is present.
    let agent_b_id = session.agent_b.unwrap_or_default();
    let original_room = session.room_name;

    let agent_b_token = state
        .rooms
        .mint_token(&original_room, &agent_b_id)
        .into_value();

    state.mailbox.push(Notification::transfer_completed(
        &payload.session_id,
        &agent_b_id,
        &original_room,
        &agent_b_token,
    ));

    if let Some(agent_a_id) = &session.agent_a {
        state.agents.set_status(agent_a_id, AgentStatus::Available);
    }
    state.agents.set_status(&agent_b_id, AgentStatus::Busy);

    tracing::info!(
        session_id = payload.session_id,
        agent_b = agent_b_id,
        "transfer completed"
    );

    Ok(Json(json!({
        "agent_b_original_token": agent_b_token,
        "original_room": original_room,
        "ws_url": state.rooms.url(),
        "message": "Transfer completed successfully",
        "notification_sent": true,
    })))
}

#[derive(Deserialize)]
pub struct AgentExitRequest {
    #[serde(default)]
    pub session_id: String,
    #[serde(default)]
    pub agent_id: String,
}

/// POST /api/agent-exit-room
///
/// Removes the agent from the primary room and marks the exit on the
/// session. Removal failures are logged and swallowed — the agent's
/// own client disconnect is an acceptable fallback.
pub async fn agent_exit_room_handler(
    Extension(state): Extension<Arc<AppState>>,
    Json(payload): Json<AgentExitRequest>,
) -> Result<Json<Value>, (StatusCode, String)> {
    let session = state
        .sessions
        .get(&payload.session_id)
        .map_err(session_err_to_response)?;

    if let Err(e) = state
        .rooms
        .remove_participant(&session.room_name, &payload.agent_id)
        .await
    {
        tracing::warn!(
            room = session.room_name,
            agent = payload.agent_id,
            "failed to remove agent from room: {}",
            e
        );
    } else {
        tracing::info!(
            room = session.room_name,
            agent = payload.agent_id,
            "agent removed from room"
        );
    }

    state
        .sessions
        .mark_agent_exited(&payload.session_id)
        .map_err(session_err_to_response)?;

    Ok(Json(json!({
        "message": format!("Agent {} exited room successfully", payload.agent_id),
        "room_name": session.room_name,
        "session_id": payload.session_id,
    })))
}
