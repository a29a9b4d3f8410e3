//! Consent-tracking tokens (Jornaya LeadiD, TrustedForm)
//!
//! Tokens are minted once the visitor's ZIP resolves and ride along with the
//! lead for audit. The front end loads the vendor scripts from
//! [`script_urls`]; an unconfigured account id disables that vendor.

use crate::config::Config;
use crate::ids::tagged_id;

const JORNAYA_SCRIPT: &str = "https://leadid.com/js/jornaya.js";
const TRUSTED_FORM_SCRIPT: &str = "https://api.trustedform.com/trustedform.js";
const TRUSTED_FORM_CERT_BASE: &str = "https://cert.trustedform.com";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComplianceTokens {
    pub jornaya_lead_id: Option<String>,
    pub trusted_form_cert_url: Option<String>,
}

impl ComplianceTokens {
    pub fn init(config: &Config) -> Self {
        Self {
            jornaya_lead_id: init_jornaya(config),
            trusted_form_cert_url: init_trusted_form(config),
        }
    }
}

pub fn init_jornaya(config: &Config) -> Option<String> {
    config.jornaya_account_id.as_ref()?;
    Some(tagged_id("JRN"))
}

pub fn init_trusted_form(config: &Config) -> Option<String> {
    config.trusted_form_account_id.as_ref()?;
    Some(format!("{}/{}", TRUSTED_FORM_CERT_BASE, tagged_id("TF")))
}

/// Vendor scripts the page has to load for the configured accounts
pub fn script_urls(config: &Config) -> Vec<String> {
    let mut urls = Vec::new();
    if let Some(account) = &config.jornaya_account_id {
        urls.push(format!("{}?account={}", JORNAYA_SCRIPT, account));
    }
    if let Some(account) = &config.trusted_form_account_id {
        urls.push(format!("{}?account={}", TRUSTED_FORM_SCRIPT, account));
    }
    urls
}
