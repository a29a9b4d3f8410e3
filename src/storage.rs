//! Two storage scopes with different lifetimes:
//! - [`SessionStore`]: per-funnel key/value pairs, gone when the session ends
//! - [`LocalLog`]: durable append-only record of leads and newsletter signups

use anyhow::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;

use crate::compliance::ComplianceTokens;
use crate::db::{self, DbConn};
use crate::models::{NewsletterSubscription, StoredLead};

pub const LEAD_ZIP_KEY: &str = "lead_zip";
pub const LEAD_JORNAYA_KEY: &str = "lead_jornaya";
pub const LEAD_TRUSTEDFORM_KEY: &str = "lead_trustedform";

/// Session-scoped key/value store for one funnel traversal
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionStore {
    values: HashMap<String, String>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        self.values.insert(key.to_string(), value.into());
    }

    /// Remember the ZIP and compliance tokens; disabled vendors store ""
    pub fn save_zip_step(&mut self, zip: &str, tokens: &ComplianceTokens) {
        self.set(LEAD_ZIP_KEY, zip);
        self.set(LEAD_JORNAYA_KEY, tokens.jornaya_lead_id.clone().unwrap_or_default());
        self.set(LEAD_TRUSTEDFORM_KEY, tokens.trusted_form_cert_url.clone().unwrap_or_default());
    }

    /// Compliance tokens as read back at submission, empty meaning absent
    pub fn compliance_tokens(&self) -> ComplianceTokens {
        let non_empty = |key| self.get(key).filter(|v| !v.is_empty()).map(str::to_string);
        ComplianceTokens {
            jornaya_lead_id: non_empty(LEAD_JORNAYA_KEY),
            trusted_form_cert_url: non_empty(LEAD_TRUSTEDFORM_KEY),
        }
    }
}

/// Durable log of captured leads and newsletter signups, kept for local
/// inspection only
#[derive(Clone)]
pub struct LocalLog {
    db: DbConn,
}

impl LocalLog {
    /// Open (or create) the RocksDB-backed log at `path`
    pub async fn open(path: &str) -> Result<Self> {
        let db = db::connect(path).await?;
        db::init_schema(&db).await?;
        Ok(Self { db })
    }

    pub async fn in_memory() -> Result<Self> {
        let db = db::connect_memory().await?;
        db::init_schema(&db).await?;
        Ok(Self { db })
    }

    pub async fn append_lead(&self, lead: &StoredLead) -> Result<()> {
        self.append("lead", lead).await
    }

    pub async fn append_subscription(&self, sub: &NewsletterSubscription) -> Result<()> {
        self.append("newsletter_sub", sub).await
    }

    /// All leads, oldest first
    pub async fn leads(&self) -> Result<Vec<StoredLead>> {
        self.select_all("SELECT * OMIT id FROM lead ORDER BY stored_at ASC").await
    }

    /// All newsletter signups, oldest first
    pub async fn subscriptions(&self) -> Result<Vec<NewsletterSubscription>> {
        self.select_all("SELECT * OMIT id FROM newsletter_sub ORDER BY date ASC").await
    }

    async fn append<T: Serialize>(&self, table: &str, entry: &T) -> Result<()> {
        let content = serde_json::to_value(entry)?;
        self.db
            .query(format!("CREATE {} CONTENT $content", table))
            .bind(("content", content))
            .await?
            .check()?;
        Ok(())
    }

    /// Record ids are omitted; they do not map onto JSON values
    async fn select_all<T: DeserializeOwned>(&self, query: &'static str) -> Result<Vec<T>> {
        let rows: Vec<serde_json::Value> = self.db.query(query).await?.take(0)?;
        rows.into_iter()
            .map(|row| serde_json::from_value(row).map_err(Into::into))
            .collect()
    }
}
