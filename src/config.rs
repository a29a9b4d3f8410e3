//! Runtime configuration
//!
//! Every integration is optional: an unset or empty variable turns the
//! integration off without error.

use std::time::Duration;

pub const WEBHOOK_URL_VAR: &str = "ZAPIER_WEBHOOK_URL";
pub const JORNAYA_ACCOUNT_VAR: &str = "JORNAYA_ACCOUNT_ID";
pub const TRUSTED_FORM_ACCOUNT_VAR: &str = "TRUSTED_FORM_ACCOUNT_ID";
pub const SITE_HOST_VAR: &str = "SOLAR_LEADS_SITE_HOST";
pub const LOOKUP_DELAY_VAR: &str = "SOLAR_LEADS_LOOKUP_DELAY_MS";

const DEFAULT_LOOKUP_DELAY_MS: u64 = 500;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub webhook_url: Option<String>,
    pub jornaya_account_id: Option<String>,
    pub trusted_form_account_id: Option<String>,
    /// Reported as the lead source when the request has no Host header
    pub site_host: Option<String>,
    /// Simulated latency of provider lookups and newsletter signups
    pub lookup_delay: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            webhook_url: None,
            jornaya_account_id: None,
            trusted_form_account_id: None,
            site_host: None,
            lookup_delay: Duration::from_millis(DEFAULT_LOOKUP_DELAY_MS),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup (the environment, a map in tests)
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let lookup_delay = non_empty(LOOKUP_DELAY_VAR)
            .and_then(|v| v.parse::<u64>().ok())
            .map(Duration::from_millis)
            .unwrap_or(Duration::from_millis(DEFAULT_LOOKUP_DELAY_MS));

        Self {
            webhook_url: non_empty(WEBHOOK_URL_VAR),
            jornaya_account_id: non_empty(JORNAYA_ACCOUNT_VAR),
            trusted_form_account_id: non_empty(TRUSTED_FORM_ACCOUNT_VAR),
            site_host: non_empty(SITE_HOST_VAR),
            lookup_delay,
        }
    }

    /// No integrations and no artificial delay
    pub fn for_tests() -> Self {
        Self {
            lookup_delay: Duration::ZERO,
            ..Self::default()
        }
    }
}
