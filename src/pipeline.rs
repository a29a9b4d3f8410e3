//! Lead capture: provider lookup, lead submission and newsletter signup
//!
//! A lead counts as captured once it passes local validation. Webhook
//! delivery runs detached and the local log write is best effort; neither
//! can turn a validated submission into a failure.

use chrono::{SecondsFormat, Utc};
use serde::Deserialize;
use tracing::{info, warn};

use crate::config::Config;
use crate::error::LeadFormError;
use crate::ids::tagged_id;
use crate::models::{
    LeadFormData, LeadSubmissionResponse, NewsletterSubscription, RequestMeta, StoredLead,
    SubscribeResponse, WebhookPayload, ZipCodeLookupResponse,
};
use crate::providers::lookup_providers_by_state;
use crate::storage::LocalLog;
use crate::validation::{is_valid_email, is_valid_zip_code, phone_digits};
use crate::webhook::WebhookClient;
use crate::zip_states::{full_state_name, state_for_zip};

pub const THANK_YOU_PATH: &str = "/thank-you";

/// Resolve a ZIP to providers, full state name and city without delay
pub fn resolve_zip(zip: &str) -> ZipCodeLookupResponse {
    if !is_valid_zip_code(zip) {
        return ZipCodeLookupResponse::failure("Invalid ZIP code format");
    }

    let clean_zip = &zip[..5];
    let providers = lookup_providers_by_state(clean_zip);
    let state_code = match state_for_zip(clean_zip) {
        Some(code) if !providers.is_empty() => code,
        _ => return ZipCodeLookupResponse::failure("No providers found for this ZIP code"),
    };

    ZipCodeLookupResponse {
        success: true,
        providers,
        state: full_state_name(state_code),
        city: providers.first().map(|p| p.city.to_string()).unwrap_or_default(),
        message: None,
    }
}

/// Steps of the short (four page) lead form
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LeadFormStep {
    Contact,
    Bill,
    Qualification,
    Consent,
}

impl LeadFormStep {
    pub const ALL: [LeadFormStep; 4] = [
        LeadFormStep::Contact,
        LeadFormStep::Bill,
        LeadFormStep::Qualification,
        LeadFormStep::Consent,
    ];
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, |v| v.trim().is_empty())
}

/// Field errors for one page of the short lead form
pub fn validate_lead_form_step(form: &LeadFormData, step: LeadFormStep) -> Vec<LeadFormError> {
    let mut errors = Vec::new();

    match step {
        LeadFormStep::Contact => {
            if is_blank(&form.first_name) {
                errors.push(LeadFormError::MissingFirstName);
            }
            if is_blank(&form.last_name) {
                errors.push(LeadFormError::MissingLastName);
            }
            match form.email.as_deref() {
                Some(email) if !email.trim().is_empty() => {
                    if !is_valid_email(email) {
                        errors.push(LeadFormError::InvalidEmail);
                    }
                }
                _ => errors.push(LeadFormError::MissingEmail),
            }
            match form.phone.as_deref() {
                Some(phone) if !phone.trim().is_empty() => {
                    if phone.chars().filter(char::is_ascii_digit).count() != 10 {
                        errors.push(LeadFormError::InvalidPhone);
                    }
                }
                _ => errors.push(LeadFormError::MissingPhone),
            }
        }
        LeadFormStep::Bill => {
            if form.monthly_bill.is_none() {
                errors.push(LeadFormError::MissingBill);
            }
        }
        LeadFormStep::Qualification => {
            if form.roof_shade.is_none() {
                errors.push(LeadFormError::MissingRoofShade);
            }
            if form.credit_score.is_none() {
                errors.push(LeadFormError::MissingCreditScore);
            }
        }
        LeadFormStep::Consent => {
            if !form.tcpa_consent {
                errors.push(LeadFormError::ConsentRequired);
            }
        }
    }

    errors
}

/// Field errors across every page of the short lead form
pub fn validate_lead_form(form: &LeadFormData) -> Vec<LeadFormError> {
    LeadFormStep::ALL
        .iter()
        .flat_map(|step| validate_lead_form_step(form, *step))
        .collect()
}

pub struct LeadPipeline {
    config: Config,
    webhook: WebhookClient,
    log: LocalLog,
}

impl LeadPipeline {
    pub fn new(config: Config, log: LocalLog) -> Self {
        let webhook = WebhookClient::new(config.webhook_url.clone());
        Self { config, webhook, log }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn log(&self) -> &LocalLog {
        &self.log
    }

    /// Provider lookup as the ZIP step sees it, including the simulated delay
    pub async fn lookup_providers(&self, zip: &str) -> ZipCodeLookupResponse {
        tokio::time::sleep(self.config.lookup_delay).await;
        resolve_zip(zip)
    }

    /// Capture a lead.
    ///
    /// Requires a ZIP and TCPA consent. Everything after that succeeds:
    /// webhook delivery is dispatched in the background and a failed local
    /// log write is only logged.
    pub async fn submit_lead(&self, mut form: LeadFormData, meta: &RequestMeta) -> LeadSubmissionResponse {
        if form.zip_code.is_empty() || !form.tcpa_consent {
            return LeadSubmissionResponse::failure("ZIP code and TCPA consent are required");
        }

        // delivered and stored as raw digits whatever the visitor typed
        form.phone = form.phone.as_deref().map(phone_digits).filter(|p| !p.is_empty());

        let lead_id = tagged_id("LEAD");
        let lookup = self.lookup_providers(&form.zip_code).await;

        let payload = WebhookPayload {
            lead_id: lead_id.clone(),
            zip_code: form.zip_code.clone(),
            state: lookup.state,
            city: lookup.city,
            providers: lookup.providers,
            email: form.email.clone(),
            phone: form.phone.clone(),
            first_name: form.first_name.clone(),
            last_name: form.last_name.clone(),
            address: form.address.clone(),
            monthly_bill: form.monthly_bill,
            homeowner: form.homeowner,
            roof_shade: form.roof_shade,
            tcpa_consent: form.tcpa_consent,
            jornaya_lead_id: form.jornaya_lead_id.clone(),
            trusted_form_cert_url: form.trusted_form_cert_url.clone(),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            source: meta.source.clone(),
            user_agent: meta.user_agent.clone(),
            ip_address: meta.ip_address.clone(),
        };

        self.webhook.dispatch(payload);

        info!(
            "Lead submitted: {} (zip {}, {} providers)",
            lead_id,
            form.zip_code,
            lookup.providers.len()
        );

        let stored = StoredLead {
            lead_id: lead_id.clone(),
            form,
            stored_at: Utc::now(),
        };
        if let Err(e) = self.log.append_lead(&stored).await {
            warn!("Could not store lead {} locally: {}", lead_id, e);
        }

        LeadSubmissionResponse {
            success: true,
            lead_id,
            message: "Lead submitted successfully".to_string(),
            redirect_url: Some(THANK_YOU_PATH.to_string()),
        }
    }

    pub async fn subscribe_newsletter(&self, email: &str) -> SubscribeResponse {
        if email.is_empty() || !is_valid_email(email) {
            return SubscribeResponse {
                success: false,
                message: "Please enter a valid email address".to_string(),
            };
        }

        tokio::time::sleep(self.config.lookup_delay).await;

        let sub = NewsletterSubscription {
            email: email.to_string(),
            date: Utc::now(),
        };
        if let Err(e) = self.log.append_subscription(&sub).await {
            warn!("Could not store newsletter signup locally: {}", e);
        }

        SubscribeResponse {
            success: true,
            message: "Successfully subscribed to newsletter".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BillRange, CreditScore, RoofShade};
    use std::time::Duration;

    async fn pipeline(webhook_url: Option<String>) -> LeadPipeline {
        let config = Config {
            webhook_url,
            ..Config::for_tests()
        };
        LeadPipeline::new(config, LocalLog::in_memory().await.unwrap())
    }

    fn meta() -> RequestMeta {
        RequestMeta {
            source: "solar.example.com".to_string(),
            user_agent: "Mozilla/5.0 (test)".to_string(),
            ip_address: None,
        }
    }

    fn complete_form() -> LeadFormData {
        LeadFormData {
            zip_code: "90210".to_string(),
            email: Some("jane@example.com".to_string()),
            phone: Some("5551234567".to_string()),
            first_name: Some("Jane".to_string()),
            last_name: Some("Doe".to_string()),
            address: Some("1 Main St, San Francisco, California 90210".to_string()),
            monthly_bill: Some(BillRange::From151To200),
            homeowner: Some(true),
            roof_shade: Some(RoofShade::NoShade),
            credit_score: Some(CreditScore::Good),
            tcpa_consent: true,
            jornaya_lead_id: Some("JRN-1-abcdefghi".to_string()),
            trusted_form_cert_url: None,
        }
    }

    #[test]
    fn test_resolve_zip() {
        let found = resolve_zip("90210");
        assert!(found.success);
        assert_eq!(found.state, "California");
        assert_eq!(found.city, "San Francisco");
        assert_eq!(found.providers.len(), 4);

        let plus_four = resolve_zip("90210-1234");
        assert!(plus_four.success);
        assert_eq!(plus_four.providers, found.providers);
    }

    #[test]
    fn test_resolve_zip_failures() {
        let bad = resolve_zip("9021");
        assert!(!bad.success);
        assert_eq!(bad.message.as_deref(), Some("Invalid ZIP code format"));
        assert!(bad.providers.is_empty());

        let miss = resolve_zip("00501");
        assert!(!miss.success);
        assert_eq!(miss.message.as_deref(), Some("No providers found for this ZIP code"));
        assert!(miss.state.is_empty());
    }

    #[tokio::test]
    async fn test_lookup_providers_waits() {
        let config = Config {
            lookup_delay: Duration::from_millis(30),
            ..Config::for_tests()
        };
        let pipeline = LeadPipeline::new(config, LocalLog::in_memory().await.unwrap());

        let started = std::time::Instant::now();
        let result = pipeline.lookup_providers("99999").await;
        assert!(started.elapsed() >= Duration::from_millis(30));
        assert!(result.success);
        assert_eq!(result.state, "Washington");
    }

    #[tokio::test]
    async fn test_submit_requires_consent() {
        let pipeline = pipeline(None).await;
        let form = LeadFormData {
            tcpa_consent: false,
            ..complete_form()
        };

        let result = pipeline.submit_lead(form, &meta()).await;
        assert!(!result.success);
        assert!(result.lead_id.is_empty());
        assert_eq!(result.message, "ZIP code and TCPA consent are required");
        assert!(pipeline.log().leads().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_submit_requires_zip() {
        let pipeline = pipeline(None).await;
        let form = LeadFormData {
            zip_code: String::new(),
            ..complete_form()
        };
        assert!(!pipeline.submit_lead(form, &meta()).await.success);
    }

    #[tokio::test]
    async fn test_consent_false_never_calls_webhook() {
        let mut server = mockito::Server::new_async().await;
        let mock = server.mock("POST", "/hook").expect(0).create_async().await;

        let pipeline = pipeline(Some(format!("{}/hook", server.url()))).await;
        let form = LeadFormData {
            tcpa_consent: false,
            ..complete_form()
        };
        assert!(!pipeline.submit_lead(form, &meta()).await.success);

        tokio::time::sleep(Duration::from_millis(50)).await;
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_submit_success_logs_locally() {
        let pipeline = pipeline(None).await;
        let result = pipeline.submit_lead(complete_form(), &meta()).await;

        assert!(result.success);
        assert!(result.lead_id.starts_with("LEAD-"));
        assert_eq!(result.message, "Lead submitted successfully");
        assert_eq!(result.redirect_url.as_deref(), Some("/thank-you"));

        let leads = pipeline.log().leads().await.unwrap();
        assert_eq!(leads.len(), 1);
        assert_eq!(leads[0].lead_id, result.lead_id);
        assert_eq!(leads[0].form, complete_form());
    }

    #[tokio::test]
    async fn test_submit_succeeds_when_webhook_unreachable() {
        let pipeline = pipeline(Some("http://127.0.0.1:1/hook".to_string())).await;
        let result = pipeline.submit_lead(complete_form(), &meta()).await;
        assert!(result.success);
        assert!(!result.lead_id.is_empty());
    }

    #[tokio::test]
    async fn test_submit_succeeds_when_webhook_rejects() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server.mock("POST", "/hook").with_status(503).create_async().await;

        let pipeline = pipeline(Some(format!("{}/hook", server.url()))).await;
        let result = pipeline.submit_lead(complete_form(), &meta()).await;
        assert!(result.success);
    }

    #[tokio::test]
    async fn test_submit_delivers_payload() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/hook")
            .match_body(mockito::Matcher::PartialJson(serde_json::json!({
                "zipCode": "90210",
                "state": "California",
                "city": "San Francisco",
                "monthlyBill": "151-200",
                "jornayaLeadId": "JRN-1-abcdefghi",
                "source": "solar.example.com",
                "userAgent": "Mozilla/5.0 (test)"
            })))
            .with_status(200)
            .expect(1)
            .create_async()
            .await;

        let pipeline = pipeline(Some(format!("{}/hook", server.url()))).await;
        let result = pipeline.submit_lead(complete_form(), &meta()).await;
        assert!(result.success);

        for _ in 0..100 {
            if mock.matched_async().await {
                break;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_submit_strips_phone_formatting() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/hook")
            .match_body(mockito::Matcher::PartialJson(serde_json::json!({
                "phone": "8135550100"
            })))
            .with_status(200)
            .expect(1)
            .create_async()
            .await;

        let pipeline = pipeline(Some(format!("{}/hook", server.url()))).await;
        let form = LeadFormData {
            phone: Some("(813) 555-0100".to_string()),
            ..complete_form()
        };
        assert!(pipeline.submit_lead(form, &meta()).await.success);

        for _ in 0..100 {
            if mock.matched_async().await {
                break;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        mock.assert_async().await;

        let leads = pipeline.log().leads().await.unwrap();
        assert_eq!(leads[0].form.phone.as_deref(), Some("8135550100"));
    }

    #[tokio::test]
    async fn test_submit_with_unknown_zip_still_captured() {
        let pipeline = pipeline(None).await;
        let form = LeadFormData {
            zip_code: "00501".to_string(),
            ..complete_form()
        };
        assert!(pipeline.submit_lead(form, &meta()).await.success);
    }

    #[tokio::test]
    async fn test_newsletter() {
        let pipeline = pipeline(None).await;

        let bad = pipeline.subscribe_newsletter("not-an-email").await;
        assert!(!bad.success);
        assert_eq!(bad.message, "Please enter a valid email address");

        let ok = pipeline.subscribe_newsletter("news@example.com").await;
        assert!(ok.success);
        assert_eq!(ok.message, "Successfully subscribed to newsletter");

        let subs = pipeline.log().subscriptions().await.unwrap();
        assert_eq!(subs.len(), 1);
        assert_eq!(subs[0].email, "news@example.com");
    }

    #[test]
    fn test_lead_form_contact_step() {
        let empty = LeadFormData::default();
        assert_eq!(
            validate_lead_form_step(&empty, LeadFormStep::Contact),
            vec![
                LeadFormError::MissingFirstName,
                LeadFormError::MissingLastName,
                LeadFormError::MissingEmail,
                LeadFormError::MissingPhone,
            ]
        );

        let form = LeadFormData {
            email: Some("jane@nowhere".to_string()),
            phone: Some("(555) 123-4567".to_string()),
            ..complete_form()
        };
        assert_eq!(
            validate_lead_form_step(&form, LeadFormStep::Contact),
            vec![LeadFormError::InvalidEmail]
        );

        let blank_phone = LeadFormData {
            phone: Some("  ".to_string()),
            ..complete_form()
        };
        assert_eq!(
            validate_lead_form_step(&blank_phone, LeadFormStep::Contact),
            vec![LeadFormError::MissingPhone]
        );

        let eleven = LeadFormData {
            phone: Some("15551234567".to_string()),
            ..complete_form()
        };
        assert_eq!(
            validate_lead_form_step(&eleven, LeadFormStep::Contact),
            vec![LeadFormError::InvalidPhone]
        );
    }

    #[test]
    fn test_lead_form_all_steps() {
        assert!(validate_lead_form(&complete_form()).is_empty());

        let form = LeadFormData {
            credit_score: None,
            tcpa_consent: false,
            ..complete_form()
        };
        assert_eq!(
            validate_lead_form(&form),
            vec![LeadFormError::MissingCreditScore, LeadFormError::ConsentRequired]
        );
    }
}
