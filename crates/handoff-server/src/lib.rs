//! Warm-transfer orchestration server.
//!
//! Exposes the HTTP surface for call sessions, transfers, agent
//! notifications, and the optional telephony escape hatch. All call
//! state lives in process memory behind [`AppState`]; the external
//! providers (media rooms, summarization, telephony) are injected as
//! services that degrade gracefully when unconfigured.

pub mod api_calls;
pub mod api_notify;
pub mod api_telephony;
pub mod api_transfer;
pub mod config;

use axum::extract::DefaultBodyLimit;
use axum::http::HeaderValue;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use handoff_rooms::RoomService;
use handoff_sessions::{AgentDirectory, Mailbox, SessionStore};
use handoff_summary::SummaryService;
use handoff_telephony::TelephonyService;
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;

/// Maximum request body size (1 MiB). Context lines and transfer
/// requests are small; anything larger is malformed.
const MAX_REQUEST_BODY_BYTES: usize = 1024 * 1024;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Call-session records and their state machine.
    pub sessions: Arc<SessionStore>,
    /// Per-agent notification queues.
    pub mailbox: Arc<Mailbox>,
    /// Known-agent roster.
    pub agents: Arc<AgentDirectory>,
    /// Media-room provider client.
    pub rooms: Arc<RoomService>,
    /// Call context log + summarization backend.
    pub summaries: Arc<SummaryService>,
    /// Outbound telephony bridge.
    pub telephony: Arc<TelephonyService>,
    /// Origins allowed to call the API; empty means any.
    pub allowed_origins: Arc<Vec<String>>,
}

impl AppState {
    /// Builds the full service graph from configuration.
    pub fn from_config(config: &Config) -> Self {
        Self {
            sessions: Arc::new(SessionStore::new()),
            mailbox: Arc::new(Mailbox::new()),
            agents: Arc::new(AgentDirectory::with_default_roster()),
            rooms: Arc::new(RoomService::new(config.livekit.clone())),
            summaries: Arc::new(SummaryService::new(config.llm.clone())),
            telephony: Arc::new(TelephonyService::new(config.twilio.clone())),
            allowed_origins: Arc::new(config.cors.allowed_origins.clone()),
        }
    }
}

/// Liveness handler.
async fn root() -> Json<Value> {
    Json(json!({ "message": "Warm Transfer API is running" }))
}

/// Health check handler.
///
/// Reports which providers are configured plus the live call count, so
/// operators and the frontend can tell a degraded deployment from a
/// broken one.
async fn health(Extension(state): Extension<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "livekit_configured": state.rooms.is_enabled(),
        "twilio_configured": state.telephony.is_enabled(),
        "livekit_url": state.rooms.url(),
        "active_calls": state.sessions.active_count(),
    }))
}

/// Builds the application router with all routes.
pub fn app(state: AppState) -> Router {
    let cors = if state.allowed_origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<HeaderValue> = state
            .allowed_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    };

    Router::new()
        .route("/", get(root))
        .route("/api/health", get(health))
        .route("/api/create-call", post(api_calls::create_call_handler))
        .route("/api/add-context", post(api_calls::add_context_handler))
        .route(
            "/api/call-status/{session_id}",
            get(api_calls::call_status_handler),
        )
        .route("/api/end-call", post(api_calls::end_call_handler))
        .route(
            "/api/initiate-transfer",
            post(api_transfer::initiate_transfer_handler),
        )
        .route(
            "/api/complete-transfer",
            post(api_transfer::complete_transfer_handler),
        )
        .route(
            "/api/agent-exit-room",
            post(api_transfer::agent_exit_room_handler),
        )
        .route(
            "/api/notify-agent-b",
            post(api_notify::notify_agent_b_handler),
        )
        .route(
            "/api/notifications/{agent_id}",
            get(api_notify::get_notifications_handler),
        )
        .route("/api/agents", get(api_notify::list_agents_handler))
        .route(
            "/api/twilio-transfer",
            post(api_telephony::twilio_transfer_handler),
        )
        .layer(DefaultBodyLimit::max(MAX_REQUEST_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(Extension(Arc::new(state)))
}
