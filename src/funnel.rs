//! Multi-step lead funnel
//!
//! ZIP -> bill -> homeowner -> provider -> roof shade -> address -> name ->
//! email -> phone/consent -> complete. Each step must pass its own checks
//! before the next opens. Going back never clears answers.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info};

use crate::compliance::ComplianceTokens;
use crate::error::FunnelError;
use crate::models::{
    BillRange, ElectricProvider, FunnelRecord, LeadSubmissionResponse, RequestMeta, RoofShade,
};
use crate::pipeline::LeadPipeline;
use crate::providers::provider_options;
use crate::storage::SessionStore;
use crate::validation::{is_valid_email, is_valid_zip_code, sanitize_zip_input};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    ZipCode,
    PowerBill,
    Homeowner,
    Provider,
    RoofShade,
    Address,
    Name,
    Email,
    Phone,
    Complete,
}

impl Step {
    pub const ALL: [Step; 10] = [
        Step::ZipCode,
        Step::PowerBill,
        Step::Homeowner,
        Step::Provider,
        Step::RoofShade,
        Step::Address,
        Step::Name,
        Step::Email,
        Step::Phone,
        Step::Complete,
    ];

    /// 1-based position; Complete is 10
    pub fn number(self) -> usize {
        self as usize + 1
    }

    pub fn next(self) -> Step {
        Step::ALL.get(self as usize + 1).copied().unwrap_or(Step::Complete)
    }

    /// Previous step, ZipCode stays put
    pub fn previous(self) -> Step {
        match self as usize {
            0 => Step::ZipCode,
            i => Step::ALL[i - 1],
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Step::ZipCode => "zip_code",
            Step::PowerBill => "power_bill",
            Step::Homeowner => "homeowner",
            Step::Provider => "provider",
            Step::RoofShade => "roof_shade",
            Step::Address => "address",
            Step::Name => "name",
            Step::Email => "email",
            Step::Phone => "phone",
            Step::Complete => "complete",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Answer for one step, tagged by step name
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum StepInput {
    ZipCode { zip_code: String },
    PowerBill { power_bill: BillRange },
    Homeowner { homeowner: bool },
    Provider { provider: String },
    RoofShade { roof_shade: RoofShade },
    Address { address: String },
    Name { first_name: String, last_name: String },
    Email { email: String },
    Phone {
        phone: String,
        #[serde(default)]
        consent: bool,
    },
}

impl StepInput {
    pub fn step(&self) -> Step {
        match self {
            StepInput::ZipCode { .. } => Step::ZipCode,
            StepInput::PowerBill { .. } => Step::PowerBill,
            StepInput::Homeowner { .. } => Step::Homeowner,
            StepInput::Provider { .. } => Step::Provider,
            StepInput::RoofShade { .. } => Step::RoofShade,
            StepInput::Address { .. } => Step::Address,
            StepInput::Name { .. } => Step::Name,
            StepInput::Email { .. } => Step::Email,
            StepInput::Phone { .. } => Step::Phone,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum StepOutcome {
    Advanced(Step),
    Completed(LeadSubmissionResponse),
}

/// One visitor's pass through the funnel
#[derive(Debug, Clone)]
pub struct FunnelSession {
    step: Step,
    record: FunnelRecord,
    providers: &'static [ElectricProvider],
    session: SessionStore,
    lead: Option<LeadSubmissionResponse>,
}

impl Default for FunnelSession {
    fn default() -> Self {
        Self::new()
    }
}

impl FunnelSession {
    pub fn new() -> Self {
        Self {
            step: Step::ZipCode,
            record: FunnelRecord::default(),
            providers: &[],
            session: SessionStore::new(),
            lead: None,
        }
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn record(&self) -> &FunnelRecord {
        &self.record
    }

    pub fn providers(&self) -> &'static [ElectricProvider] {
        self.providers
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Submission result once the funnel is complete
    pub fn lead(&self) -> Option<&LeadSubmissionResponse> {
        self.lead.as_ref()
    }

    pub fn provider_options(&self) -> Vec<String> {
        provider_options(self.providers)
    }

    fn expect_step(&self, expected: Step) -> Result<(), FunnelError> {
        if self.step != expected {
            return Err(FunnelError::WrongStep {
                expected,
                actual: self.step,
            });
        }
        Ok(())
    }

    fn advance(&mut self) -> Step {
        self.step = self.step.next();
        debug!("Funnel advanced to {}", self.step);
        self.step
    }

    /// Dispatch a tagged step answer
    pub async fn apply(
        &mut self,
        input: StepInput,
        pipeline: &LeadPipeline,
        meta: &RequestMeta,
    ) -> Result<StepOutcome, FunnelError> {
        let step = match input {
            StepInput::ZipCode { zip_code } => self.submit_zip(&zip_code, pipeline).await?,
            StepInput::PowerBill { power_bill } => self.select_power_bill(power_bill)?,
            StepInput::Homeowner { homeowner } => self.answer_homeowner(homeowner)?,
            StepInput::Provider { provider } => self.select_provider(&provider)?,
            StepInput::RoofShade { roof_shade } => self.select_roof_shade(roof_shade)?,
            StepInput::Address { address } => self.enter_address(&address)?,
            StepInput::Name { first_name, last_name } => self.enter_name(&first_name, &last_name)?,
            StepInput::Email { email } => self.enter_email(&email)?,
            StepInput::Phone { phone, consent } => {
                let lead = self.submit_phone(&phone, consent, pipeline, meta).await?;
                return Ok(StepOutcome::Completed(lead));
            }
        };
        Ok(StepOutcome::Advanced(step))
    }

    /// Resolve the ZIP, mint compliance tokens and open the bill step
    pub async fn submit_zip(&mut self, input: &str, pipeline: &LeadPipeline) -> Result<Step, FunnelError> {
        self.expect_step(Step::ZipCode)?;

        let zip = sanitize_zip_input(input);
        if !is_valid_zip_code(&zip) {
            return Err(FunnelError::InvalidZip);
        }

        let lookup = pipeline.lookup_providers(&zip).await;
        if !lookup.success || lookup.providers.is_empty() {
            let message = lookup
                .message
                .unwrap_or_else(|| "No providers found for this ZIP code".to_string());
            return Err(FunnelError::LookupMiss(message));
        }

        self.record.zip_code = zip.clone();
        self.record.city = lookup.city;
        self.record.state = lookup.state;
        self.providers = lookup.providers;

        let tokens = ComplianceTokens::init(pipeline.config());
        self.session.save_zip_step(&zip, &tokens);

        Ok(self.advance())
    }

    pub fn select_power_bill(&mut self, bill: BillRange) -> Result<Step, FunnelError> {
        self.expect_step(Step::PowerBill)?;
        self.record.power_bill = Some(bill);
        Ok(self.advance())
    }

    /// Renters are stopped here until they change the answer
    pub fn answer_homeowner(&mut self, homeowner: bool) -> Result<Step, FunnelError> {
        self.expect_step(Step::Homeowner)?;
        self.record.homeowner = homeowner;
        if !homeowner {
            return Err(FunnelError::NotHomeowner);
        }
        Ok(self.advance())
    }

    pub fn select_provider(&mut self, provider: &str) -> Result<Step, FunnelError> {
        self.expect_step(Step::Provider)?;
        let provider = provider.trim();
        if provider.is_empty() {
            return Err(FunnelError::MissingProvider);
        }
        self.record.provider = provider.to_string();
        Ok(self.advance())
    }

    pub fn select_roof_shade(&mut self, shade: RoofShade) -> Result<Step, FunnelError> {
        self.expect_step(Step::RoofShade)?;
        self.record.roof_shade = Some(shade);
        Ok(self.advance())
    }

    pub fn enter_address(&mut self, address: &str) -> Result<Step, FunnelError> {
        self.expect_step(Step::Address)?;
        let address = address.trim();
        if address.is_empty() {
            return Err(FunnelError::MissingAddress);
        }
        self.record.address = address.to_string();
        Ok(self.advance())
    }

    pub fn enter_name(&mut self, first_name: &str, last_name: &str) -> Result<Step, FunnelError> {
        self.expect_step(Step::Name)?;
        let (first_name, last_name) = (first_name.trim(), last_name.trim());
        if first_name.is_empty() {
            return Err(FunnelError::MissingFirstName);
        }
        if last_name.is_empty() {
            return Err(FunnelError::MissingLastName);
        }
        self.record.first_name = first_name.to_string();
        self.record.last_name = last_name.to_string();
        Ok(self.advance())
    }

    pub fn enter_email(&mut self, email: &str) -> Result<Step, FunnelError> {
        self.expect_step(Step::Email)?;
        if email.trim().is_empty() {
            return Err(FunnelError::MissingEmail);
        }
        if !is_valid_email(email) {
            return Err(FunnelError::InvalidEmail);
        }
        self.record.email = email.to_string();
        Ok(self.advance())
    }

    /// Last step: check phone and consent, then submit the lead
    pub async fn submit_phone(
        &mut self,
        phone: &str,
        consent: bool,
        pipeline: &LeadPipeline,
        meta: &RequestMeta,
    ) -> Result<LeadSubmissionResponse, FunnelError> {
        self.expect_step(Step::Phone)?;

        let digits: String = phone.chars().filter(char::is_ascii_digit).collect();
        if digits.len() != 10 {
            return Err(FunnelError::InvalidPhone);
        }
        if !consent {
            return Err(FunnelError::ConsentRequired);
        }
        self.record.phone = digits;

        let tokens = self.session.compliance_tokens();
        let form = self.record.to_lead_form(
            consent,
            tokens.jornaya_lead_id,
            tokens.trusted_form_cert_url,
        );

        let result = pipeline.submit_lead(form, meta).await;
        if !result.success {
            return Err(FunnelError::SubmissionRejected(result.message));
        }

        info!("Funnel complete, lead {}", result.lead_id);
        self.advance();
        self.lead = Some(result.clone());
        Ok(result)
    }

    /// One step back, keeping every answer
    pub fn back(&mut self) -> Result<Step, FunnelError> {
        self.back_to(self.step.previous())
    }

    /// Jump back to any earlier step, keeping every answer
    pub fn back_to(&mut self, step: Step) -> Result<Step, FunnelError> {
        if self.step == Step::Complete || step > self.step {
            return Err(FunnelError::WrongStep {
                expected: step,
                actual: self.step,
            });
        }
        self.step = step;
        Ok(self.step)
    }
}
