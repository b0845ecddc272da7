//! Telephony escape-hatch handler.

use crate::AppState;
use axum::extract::Extension;
use axum::http::StatusCode;
use axum::response::Json;
use handoff_telephony::TelephonyError;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

#[derive(Deserialize)]
pub struct TwilioTransferRequest {
    #[serde(default)]
    pub session_id: String,
    #[serde(default)]
    pub phone_number: String,
}

/// POST /api/twilio-transfer
///
/// Bypasses the room-transfer flow entirely: summarizes the call, then
/// places an outbound phone call that speaks the summary before
/// dialing the destination. 501 when Twilio is not configured.
pub async fn twilio_transfer_handler(
    Extension(state): Extension<Arc<AppState>>,
    Json(payload): Json<TwilioTransferRequest>,
) -> Result<Json<Value>, (StatusCode, String)> {
    if !state.telephony.is_enabled() {
        return Err((
            StatusCode::NOT_IMPLEMENTED,
            "Twilio integration not configured".to_string(),
        ));
    }

    if !state.sessions.contains(&payload.session_id) {
        return Err((
            StatusCode::NOT_FOUND,
            "Call session not found".to_string(),
        ));
    }

    if payload.phone_number.is_empty() {
        return Err((StatusCode::BAD_REQUEST, "Phone number required".to_string()));
    }

    let summary = state.summaries.summarize(&payload.session_id).await;

    let call_sid = state
        .telephony
        .transfer_call(&payload.phone_number, &summary)
        .await
        .map_err(|e| match e {
            TelephonyError::NotConfigured => {
                (StatusCode::NOT_IMPLEMENTED, e.to_string())
            }
            TelephonyError::Provider(_) => {
                tracing::error!("Twilio API error: {}", e);
                (StatusCode::BAD_REQUEST, e.to_string())
            }
            TelephonyError::Network(_) => {
                tracing::error!("Twilio request failed: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
            }
        })?;

    tracing::info!(
        session_id = payload.session_id,
        call_sid,
        "telephony transfer initiated"
    );

    Ok(Json(json!({
        "twilio_call_sid": call_sid,
        "call_summary": summary,
        "message": "Twilio transfer initiated",
    })))
}
