use handoff_rooms::{LiveKitConfig, Provided, RoomService};

const DEFAULT_URL: &str = "http://localhost:7880";
const DEFAULT_KEY: &str = "devkey";
const DEFAULT_SECRET: &str = "secret";

#[tokio::test]
async fn unconfigured_create_room_takes_fallback_path() {
    let service = RoomService::new(LiveKitConfig::default());
    assert!(!service.is_enabled());

    let room = service.create_room("call_abc12345").await;
    assert!(room.is_fallback());
    assert_eq!(room.value().room_name, "call_abc12345");
    assert!(room.value().sid.starts_with("mock_sid_"));
}

#[tokio::test]
async fn unconfigured_token_is_a_placeholder() {
    let service = RoomService::new(LiveKitConfig::default());

    let token = service.mint_token("call_abc12345", "caller_1");
    assert!(token.is_fallback());
    assert!(token.value().starts_with("mock_token_"));
}

#[tokio::test]
async fn unconfigured_teardown_operations_are_noops() {
    let service = RoomService::new(LiveKitConfig::default());

    service.delete_room("call_abc12345").await.expect("delete");
    service
        .remove_participant("call_abc12345", "agent_a_1")
        .await
        .expect("remove");
    assert!(service.list_participants("call_abc12345").await.is_empty());
}

#[test]
fn configured_token_is_live_and_non_empty() {
    let service = RoomService::new(LiveKitConfig::new(DEFAULT_URL, DEFAULT_KEY, DEFAULT_SECRET));
    assert!(service.is_enabled());

    let token = service.mint_token("test-room", "user-123");
    assert!(matches!(token, Provided::Live(_)));
    assert!(!token.value().is_empty());
}

#[test]
fn token_grants_join_publish_subscribe() {
    use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
    use serde::Deserialize;

    let service = RoomService::new(LiveKitConfig::new(DEFAULT_URL, DEFAULT_KEY, DEFAULT_SECRET));
    let token = service.mint_token("perm-room", "user-perm").into_value();

    #[derive(Deserialize)]
    struct Claims {
        video: VideoClaims,
    }

    #[derive(Deserialize)]
    struct VideoClaims {
        #[serde(rename = "canPublish")]
        can_publish: bool,
        #[serde(rename = "canSubscribe")]
        can_subscribe: bool,
        #[serde(rename = "roomJoin")]
        room_join: bool,
        room: String,
    }

    let validation = Validation::new(Algorithm::HS256);
    let key = DecodingKey::from_secret(DEFAULT_SECRET.as_bytes());
    let token_data = decode::<Claims>(&token, &key, &validation).expect("Failed to decode token");

    assert!(token_data.claims.video.can_publish, "canPublish should be true");
    assert!(token_data.claims.video.can_subscribe, "canSubscribe should be true");
    assert!(token_data.claims.video.room_join, "roomJoin should be true");
    assert_eq!(token_data.claims.video.room, "perm-room");
}

#[test]
fn config_parses_from_toml_with_default_ttl() {
    let toml_str = r#"
        url = "ws://localhost:7880"
        api_key = "key"
        api_secret = "secret"
    "#;

    let config: LiveKitConfig = toml::from_str(toml_str).expect("parse TOML");
    assert!(config.is_configured());
    assert_eq!(config.token_ttl_seconds, 3600);
}

#[test]
fn debug_output_redacts_the_secret() {
    let config = LiveKitConfig::new(DEFAULT_URL, DEFAULT_KEY, "super-secret");
    let debug = format!("{:?}", config);
    assert!(debug.contains("[REDACTED]"));
    assert!(!debug.contains("super-secret"));
}
