//! Notification mailbox and agent directory handlers.

use crate::AppState;
use axum::extract::{Extension, Path};
use axum::response::Json;
use handoff_types::{Agent, Notification};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

#[derive(Deserialize)]
pub struct NotifyAgentBRequest {
    #[serde(default)]
    pub session_id: String,
    #[serde(default)]
    pub agent_b_id: String,
    #[serde(default)]
    pub transfer_room: String,
    #[serde(default)]
    pub agent_b_token: String,
}

/// POST /api/notify-agent-b
///
/// Queues a `transfer_request` notification for Agent B to poll. Also
/// usable as a webhook endpoint by external dialers, so unknown
/// session ids are accepted as-is.
pub async fn notify_agent_b_handler(
    Extension(state): Extension<Arc<AppState>>,
    Json(payload): Json<NotifyAgentBRequest>,
) -> Json<Value> {
    let notification = Notification::transfer_request(
        &payload.session_id,
        &payload.agent_b_id,
        &payload.transfer_room,
        &payload.agent_b_token,
    );

    state.mailbox.push(notification.clone());

    Json(json!({
        "message": "Agent B notified successfully",
        "notification": notification,
    }))
}

/// GET /api/notifications/:agent_id
///
/// Drains all pending notifications for the agent. Consumption is
/// at-most-once: a second immediate poll returns an empty list.
pub async fn get_notifications_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path(agent_id): Path<String>,
) -> Json<Value> {
    let notifications = state.mailbox.drain(&agent_id);
    Json(json!({ "notifications": notifications }))
}

/// GET /api/agents
///
/// The known-agent roster with current availability.
pub async fn list_agents_handler(
    Extension(state): Extension<Arc<AppState>>,
) -> Json<Vec<Agent>> {
    Json(state.agents.list())
}
