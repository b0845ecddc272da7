use reqwest::Client;
use serde::Deserialize;

use crate::config::TwilioConfig;
use crate::error::TelephonyError;

const TWILIO_API_BASE: &str = "https://api.twilio.com/2010-04-01";

#[derive(Debug, Deserialize)]
struct CallResponse {
    sid: String,
}

#[derive(Debug, Deserialize)]
struct TwilioErrorBody {
    message: Option<String>,
}

/// Client for Twilio's Calls REST resource.
pub struct TelephonyService {
    config: TwilioConfig,
    client: Client,
}

impl TelephonyService {
    pub fn new(config: TwilioConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.config.is_configured()
    }

    /// Places an outbound call that speaks `summary` to the callee and
    /// then dials `to`. Returns the provider call sid.
    pub async fn transfer_call(&self, to: &str, summary: &str) -> Result<String, TelephonyError> {
        if !self.is_enabled() {
            return Err(TelephonyError::NotConfigured);
        }

        let twiml = build_transfer_twiml(to, summary);
        let url = format!(
            "{}/Accounts/{}/Calls.json",
            TWILIO_API_BASE, self.config.account_sid
        );

        let response = self
            .client
            .post(&url)
            .basic_auth(&self.config.account_sid, Some(&self.config.auth_token))
            .form(&[
                ("To", to),
                ("From", self.config.phone_number.as_str()),
                ("Twiml", twiml.as_str()),
            ])
            .send()
            .await
            .map_err(|e| TelephonyError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(TelephonyError::Provider(format!(
                "HTTP {status}: {}",
                error_detail(&body)
            )));
        }

        let call: CallResponse = response
            .json()
            .await
            .map_err(|e| TelephonyError::Provider(e.to_string()))?;
        Ok(call.sid)
    }
}

/// Pulls the `message` field out of a Twilio error body, falling back
/// to the raw body when it is not the usual JSON shape.
fn error_detail(body: &str) -> String {
    serde_json::from_str::<TwilioErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .unwrap_or_else(|| body.to_string())
}

/// Inline TwiML: speak the summary, then dial the destination.
fn build_transfer_twiml(to: &str, summary: &str) -> String {
    format!(
        "<Response><Say>Incoming warm transfer. Call summary: {}</Say><Dial>{}</Dial></Response>",
        escape_xml(summary),
        escape_xml(to)
    )
}

/// Minimal XML text escaping for TwiML bodies.
fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unconfigured_bridge_refuses_calls() {
        let service = TelephonyService::new(TwilioConfig::default());
        assert!(!service.is_enabled());

        let err = service.transfer_call("+15551234567", "summary").await;
        assert!(matches!(err, Err(TelephonyError::NotConfigured)));
    }

    #[test]
    fn twiml_speaks_summary_then_dials() {
        let twiml = build_transfer_twiml("+15551234567", "Customer wants a refund");
        assert_eq!(
            twiml,
            "<Response><Say>Incoming warm transfer. Call summary: Customer wants a refund</Say>\
             <Dial>+15551234567</Dial></Response>"
        );
    }

    #[test]
    fn twiml_escapes_markup_in_summary() {
        let twiml = build_transfer_twiml("+15551234567", "a < b & \"c\"");
        assert!(twiml.contains("a &lt; b &amp; &quot;c&quot;"));
        assert!(!twiml.contains("a < b"));
    }

    #[test]
    fn error_detail_prefers_the_message_field() {
        let body = r#"{"code": 21211, "message": "Invalid 'To' number", "status": 400}"#;
        assert_eq!(error_detail(body), "Invalid 'To' number");
    }

    #[test]
    fn error_detail_falls_back_to_the_raw_body() {
        assert_eq!(error_detail("gateway timeout"), "gateway timeout");
        assert_eq!(error_detail(r#"{"code": 20404}"#), r#"{"code": 20404}"#);
    }

    #[test]
    fn debug_output_redacts_the_auth_token() {
        let config = TwilioConfig {
            account_sid: "AC123".into(),
            auth_token: "tok-secret".into(),
            phone_number: "+15550000000".into(),
        };
        let debug = format!("{:?}", config);
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("tok-secret"));
    }
}
