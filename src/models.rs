use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Electric utility serving a state
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ElectricProvider {
    pub id: &'static str,
    pub name: &'static str,
    pub state: &'static str,
    pub city: &'static str,
    pub zip_code: &'static str,
    pub service_area: &'static [&'static str],
}

/// Monthly power bill range
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum BillRange {
    #[serde(rename = "under-100")]
    Under100,
    #[serde(rename = "100-150")]
    From100To150,
    #[serde(rename = "151-200")]
    From151To200,
    #[serde(rename = "200-250")]
    From200To250,
    #[serde(rename = "250-300")]
    From250To300,
    #[serde(rename = "over-300")]
    Over300,
}

impl BillRange {
    pub const ALL: [BillRange; 6] = [
        BillRange::Under100,
        BillRange::From100To150,
        BillRange::From151To200,
        BillRange::From200To250,
        BillRange::From250To300,
        BillRange::Over300,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BillRange::Under100 => "under-100",
            BillRange::From100To150 => "100-150",
            BillRange::From151To200 => "151-200",
            BillRange::From200To250 => "200-250",
            BillRange::From250To300 => "250-300",
            BillRange::Over300 => "over-300",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BillRange::Under100 => "Under $100",
            BillRange::From100To150 => "$100 - $150",
            BillRange::From151To200 => "$151 - $200",
            BillRange::From200To250 => "$200 - $250",
            BillRange::From250To300 => "$250 - $300",
            BillRange::Over300 => "Over $300",
        }
    }
}

/// How much shade the roof gets
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum RoofShade {
    NoShade,
    LittleShade,
    LotShade,
    Uncertain,
}

impl RoofShade {
    pub const ALL: [RoofShade; 4] = [
        RoofShade::NoShade,
        RoofShade::LittleShade,
        RoofShade::LotShade,
        RoofShade::Uncertain,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RoofShade::NoShade => "no-shade",
            RoofShade::LittleShade => "little-shade",
            RoofShade::LotShade => "lot-shade",
            RoofShade::Uncertain => "uncertain",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RoofShade::NoShade => "No Shade",
            RoofShade::LittleShade => "A Little Shade",
            RoofShade::LotShade => "A Lot Of Shade",
            RoofShade::Uncertain => "Uncertain",
        }
    }
}

/// Self-reported credit score band (direct lead form only)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum CreditScore {
    Excellent,
    Good,
    Fair,
    Poor,
    NotSure,
}

impl CreditScore {
    pub fn as_str(&self) -> &'static str {
        match self {
            CreditScore::Excellent => "excellent",
            CreditScore::Good => "good",
            CreditScore::Fair => "fair",
            CreditScore::Poor => "poor",
            CreditScore::NotSure => "not-sure",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CreditScore::Excellent => "Excellent (720+)",
            CreditScore::Good => "Good (680-719)",
            CreditScore::Fair => "Fair (640-679)",
            CreditScore::Poor => "Poor (Below 640)",
            CreditScore::NotSure => "Not Sure",
        }
    }
}

/// Answers accumulated across the funnel steps
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FunnelRecord {
    pub zip_code: String,
    pub power_bill: Option<BillRange>,
    pub homeowner: bool,
    pub provider: String,
    pub roof_shade: Option<RoofShade>,
    pub address: String,
    pub city: String,
    /// Full state name as resolved from the ZIP
    pub state: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// Raw 10-digit phone number
    pub phone: String,
}

impl Default for FunnelRecord {
    fn default() -> Self {
        Self {
            zip_code: String::new(),
            power_bill: None,
            homeowner: true,
            provider: String::new(),
            roof_shade: None,
            address: String::new(),
            city: String::new(),
            state: String::new(),
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            phone: String::new(),
        }
    }
}

impl FunnelRecord {
    /// Single-line mailing address, e.g. "1 Main St, Los Angeles, California 90012"
    pub fn full_address(&self) -> String {
        format!("{}, {}, {} {}", self.address, self.city, self.state, self.zip_code)
    }

    /// Build the submission form. Empty compliance tokens count as absent.
    pub fn to_lead_form(
        &self,
        tcpa_consent: bool,
        jornaya_lead_id: Option<String>,
        trusted_form_cert_url: Option<String>,
    ) -> LeadFormData {
        LeadFormData {
            zip_code: self.zip_code.clone(),
            email: Some(self.email.clone()),
            phone: Some(self.phone.clone()),
            first_name: Some(self.first_name.clone()),
            last_name: Some(self.last_name.clone()),
            address: Some(self.full_address()),
            monthly_bill: self.power_bill,
            homeowner: Some(self.homeowner),
            roof_shade: self.roof_shade,
            credit_score: None,
            tcpa_consent,
            jornaya_lead_id: jornaya_lead_id.filter(|s| !s.is_empty()),
            trusted_form_cert_url: trusted_form_cert_url.filter(|s| !s.is_empty()),
        }
    }
}

/// Lead data handed to `submit_lead`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LeadFormData {
    #[serde(default)]
    pub zip_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monthly_bill: Option<BillRange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub homeowner: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roof_shade: Option<RoofShade>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credit_score: Option<CreditScore>,
    #[serde(default)]
    pub tcpa_consent: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jornaya_lead_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trusted_form_cert_url: Option<String>,
}

/// Where a submission came from
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestMeta {
    /// Hostname the visitor submitted from
    pub source: String,
    pub user_agent: String,
    pub ip_address: Option<String>,
}

/// Result of an async provider lookup
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ZipCodeLookupResponse {
    pub success: bool,
    pub providers: &'static [ElectricProvider],
    pub state: String,
    pub city: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ZipCodeLookupResponse {
    pub fn failure(message: &str) -> Self {
        Self {
            success: false,
            providers: &[],
            state: String::new(),
            city: String::new(),
            message: Some(message.to_string()),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LeadSubmissionResponse {
    pub success: bool,
    pub lead_id: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_url: Option<String>,
}

impl LeadSubmissionResponse {
    pub fn failure(message: &str) -> Self {
        Self {
            success: false,
            lead_id: String::new(),
            message: message.to_string(),
            redirect_url: None,
        }
    }
}

/// JSON body posted to the lead webhook
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WebhookPayload {
    pub lead_id: String,
    pub zip_code: String,
    pub state: String,
    pub city: String,
    pub providers: &'static [ElectricProvider],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monthly_bill: Option<BillRange>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub homeowner: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roof_shade: Option<RoofShade>,
    pub tcpa_consent: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jornaya_lead_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trusted_form_cert_url: Option<String>,
    /// RFC 3339 UTC with millisecond precision
    pub timestamp: String,
    pub source: String,
    pub user_agent: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
}

/// Lead as kept in the local log
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoredLead {
    pub lead_id: String,
    #[serde(flatten)]
    pub form: LeadFormData,
    pub stored_at: DateTime<Utc>,
}

/// Newsletter signup as kept in the local log
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewsletterSubscription {
    pub email: String,
    pub date: DateTime<Utc>,
}

/// Result of a newsletter signup
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SubscribeResponse {
    pub success: bool,
    pub message: String,
}
