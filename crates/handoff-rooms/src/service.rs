use crate::config::LiveKitConfig;
use crate::error::RoomError;
use livekit_api::access_token::{AccessToken, VideoGrants};
use livekit_api::services::room::{CreateRoomOptions, RoomClient};
use serde::Serialize;
use std::time::Duration;
use uuid::Uuid;

/// A value obtained from the room provider, or synthesized locally
/// when the provider was unavailable.
///
/// Callers and tests branch on the variant instead of sniffing the
/// placeholder string formats.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Provided<T> {
    /// The provider returned this value.
    Live(T),
    /// The provider was unconfigured or failed; this is a local placeholder.
    Fallback(T),
}

impl<T> Provided<T> {
    pub fn value(&self) -> &T {
        match self {
            Provided::Live(v) | Provided::Fallback(v) => v,
        }
    }

    pub fn into_value(self) -> T {
        match self {
            Provided::Live(v) | Provided::Fallback(v) => v,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Provided::Fallback(_))
    }
}

/// Provider-side identity of a created room.
#[derive(Debug, Clone, Serialize)]
pub struct RoomInfo {
    pub room_name: String,
    pub sid: String,
}

/// One participant in a room, as reported by the provider.
#[derive(Debug, Clone, Serialize)]
pub struct RoomParticipant {
    pub identity: String,
    pub name: String,
}

fn fallback_sid() -> String {
    format!("mock_sid_{}", &Uuid::new_v4().simple().to_string()[..8])
}

fn fallback_token() -> String {
    format!("mock_token_{}", &Uuid::new_v4().simple().to_string()[..16])
}

/// Client for the external media-room service.
///
/// Holds no client at all when unconfigured; every operation then takes
/// the fallback path without touching the network.
pub struct RoomService {
    config: LiveKitConfig,
    client: Option<RoomClient>,
}

impl RoomService {
    pub fn new(config: LiveKitConfig) -> Self {
        let client = if config.is_configured() {
            Some(RoomClient::with_api_key(
                &config.url,
                &config.api_key,
                &config.api_secret,
            ))
        } else {
            tracing::warn!("LiveKit credentials not configured, room operations will use fallbacks");
            None
        };
        Self { config, client }
    }

    pub fn is_enabled(&self) -> bool {
        self.client.is_some()
    }

    pub fn url(&self) -> &str {
        &self.config.url
    }

    /// Creates a room, substituting a synthesized sid when the provider
    /// is unconfigured or the call fails.
    pub async fn create_room(&self, name: &str) -> Provided<RoomInfo> {
        let Some(client) = &self.client else {
            return Provided::Fallback(RoomInfo {
                room_name: name.to_string(),
                sid: fallback_sid(),
            });
        };

        match client.create_room(name, CreateRoomOptions::default()).await {
            Ok(room) => Provided::Live(RoomInfo {
                room_name: room.name,
                sid: room.sid,
            }),
            Err(e) => {
                tracing::error!(room = name, "failed to create room: {}", e);
                Provided::Fallback(RoomInfo {
                    room_name: name.to_string(),
                    sid: fallback_sid(),
                })
            }
        }
    }

    /// Deletes a room. A no-op when unconfigured; a room that no longer
    /// exists on the provider side surfaces as `Err` for the caller to
    /// log and swallow.
    pub async fn delete_room(&self, name: &str) -> Result<(), RoomError> {
        let Some(client) = &self.client else {
            return Ok(());
        };
        client
            .delete_room(name)
            .await
            .map_err(|e| RoomError::Service(e.to_string()))
    }

    /// Lists room participants, degrading to an empty list on any failure.
    pub async fn list_participants(&self, room_name: &str) -> Vec<RoomParticipant> {
        let Some(client) = &self.client else {
            return Vec::new();
        };
        match client.list_participants(room_name).await {
            Ok(participants) => participants
                .into_iter()
                .map(|p| RoomParticipant {
                    identity: p.identity,
                    name: p.name,
                })
                .collect(),
            Err(e) => {
                tracing::error!(room = room_name, "failed to list participants: {}", e);
                Vec::new()
            }
        }
    }

    /// Removes a participant from a room. A no-op when unconfigured.
    pub async fn remove_participant(&self, room: &str, identity: &str) -> Result<(), RoomError> {
        let Some(client) = &self.client else {
            return Ok(());
        };
        client
            .remove_participant(room, identity)
            .await
            .map_err(|e| RoomError::Service(e.to_string()))
    }

    /// Mints a signed join token granting join/publish/subscribe on
    /// one room, substituting a placeholder when unconfigured or when
    /// signing fails.
    pub fn mint_token(&self, room_name: &str, identity: &str) -> Provided<String> {
        if !self.config.is_configured() {
            return Provided::Fallback(fallback_token());
        }

        let token = AccessToken::with_api_key(&self.config.api_key, &self.config.api_secret)
            .with_identity(identity)
            .with_name(identity)
            .with_grants(VideoGrants {
                room_join: true,
                room: room_name.to_string(),
                can_publish: true,
                can_subscribe: true,
                ..Default::default()
            })
            .with_ttl(Duration::from_secs(self.config.token_ttl_seconds));

        match token.to_jwt() {
            Ok(jwt) => Provided::Live(jwt),
            Err(e) => {
                tracing::error!(room = room_name, "failed to sign join token: {}", e);
                Provided::Fallback(fallback_token())
            }
        }
    }
}
