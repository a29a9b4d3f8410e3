//! Lead delivery to the external (Zapier) webhook
//!
//! Delivery is best effort: one POST, no retry, and the outcome never
//! reaches the visitor. Unreachable and rejecting endpoints are logged the
//! same way.

use anyhow::Result;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use crate::models::WebhookPayload;

#[derive(Debug, Clone)]
pub struct WebhookClient {
    url: Option<String>,
    client: reqwest::Client,
}

impl WebhookClient {
    pub fn new(url: Option<String>) -> Self {
        Self {
            url,
            client: reqwest::Client::new(),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.url.is_some()
    }

    /// POST the payload, failing on connection errors and non-2xx statuses
    pub async fn send(&self, payload: &WebhookPayload) -> Result<()> {
        let Some(url) = &self.url else {
            return Ok(());
        };

        let response = self.client.post(url).json(payload).send().await?;

        if response.status().is_success() {
            info!("Webhook delivered lead {}", payload.lead_id);
            Ok(())
        } else {
            anyhow::bail!("Zapier webhook failed: {}", response.status())
        }
    }

    /// Fire-and-forget delivery on a detached task.
    ///
    /// Returns None when no webhook is configured. Dropping the handle does
    /// not cancel the delivery.
    pub fn dispatch(&self, payload: WebhookPayload) -> Option<JoinHandle<()>> {
        if !self.is_configured() {
            debug!("No webhook configured, skipping delivery of {}", payload.lead_id);
            return None;
        }

        let client = self.clone();
        Some(tokio::spawn(async move {
            if let Err(e) = client.send(&payload).await {
                error!("Webhook delivery for lead {} failed: {}", payload.lead_id, e);
            }
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload() -> WebhookPayload {
        WebhookPayload {
            lead_id: "LEAD-1700000000000-abcdefghi".to_string(),
            zip_code: "90210".to_string(),
            state: "California".to_string(),
            city: "San Francisco".to_string(),
            providers: crate::providers::providers_for_state("CA"),
            email: Some("jane@example.com".to_string()),
            phone: Some("5551234567".to_string()),
            first_name: Some("Jane".to_string()),
            last_name: Some("Doe".to_string()),
            address: None,
            monthly_bill: None,
            homeowner: Some(true),
            roof_shade: None,
            tcpa_consent: true,
            jornaya_lead_id: None,
            trusted_form_cert_url: None,
            timestamp: "2024-01-01T00:00:00.000Z".to_string(),
            source: "localhost".to_string(),
            user_agent: "test-agent".to_string(),
            ip_address: None,
        }
    }

    #[tokio::test]
    async fn test_send_posts_json() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/hooks/catch")
            .match_header("content-type", "application/json")
            .match_body(mockito::Matcher::PartialJson(serde_json::json!({
                "leadId": "LEAD-1700000000000-abcdefghi",
                "zipCode": "90210",
                "tcpaConsent": true,
                "userAgent": "test-agent"
            })))
            .with_status(200)
            .create_async()
            .await;

        let client = WebhookClient::new(Some(format!("{}/hooks/catch", server.url())));
        client.send(&payload()).await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_send_rejects_non_success() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/hooks/catch")
            .with_status(500)
            .create_async()
            .await;

        let client = WebhookClient::new(Some(format!("{}/hooks/catch", server.url())));
        let err = client.send(&payload()).await.unwrap_err();
        assert!(err.to_string().contains("500"));
    }

    #[tokio::test]
    async fn test_dispatch_swallows_unreachable() {
        let client = WebhookClient::new(Some("http://127.0.0.1:1/hooks/catch".to_string()));
        let handle = client.dispatch(payload()).unwrap();
        // the task itself finishes cleanly; the failure is only logged
        assert!(handle.await.is_ok());
    }

    #[tokio::test]
    async fn test_dispatch_without_url() {
        let client = WebhookClient::new(None);
        assert!(!client.is_configured());
        assert!(client.dispatch(payload()).is_none());
        assert!(client.send(&payload()).await.is_ok());
    }

    #[test]
    fn test_payload_omits_missing_fields() {
        let json = serde_json::to_value(payload()).unwrap();
        assert!(json.get("address").is_none());
        assert!(json.get("jornayaLeadId").is_none());
        assert_eq!(json["providers"][0]["zipCode"], "94102");
        assert_eq!(json["providers"].as_array().unwrap().len(), 4);
    }
}
