//! Flat CSV view of the lead log

use anyhow::Result;
use csv::WriterBuilder;
use serde::Serialize;
use std::io::Write;

use crate::models::StoredLead;

/// One CSV row per stored lead
#[derive(Debug, Serialize)]
pub struct LeadRow<'a> {
    pub lead_id: &'a str,
    pub stored_at: String,
    pub zip_code: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub email: &'a str,
    pub phone: &'a str,
    pub address: &'a str,
    pub monthly_bill: &'a str,
    pub homeowner: Option<bool>,
    pub roof_shade: &'a str,
    pub credit_score: &'a str,
    pub tcpa_consent: bool,
    pub jornaya_lead_id: &'a str,
    pub trusted_form_cert_url: &'a str,
}

impl<'a> From<&'a StoredLead> for LeadRow<'a> {
    fn from(lead: &'a StoredLead) -> Self {
        let form = &lead.form;
        let text = |v: &'a Option<String>| v.as_deref().unwrap_or_default();
        Self {
            lead_id: &lead.lead_id,
            stored_at: lead.stored_at.to_rfc3339(),
            zip_code: &form.zip_code,
            first_name: text(&form.first_name),
            last_name: text(&form.last_name),
            email: text(&form.email),
            phone: text(&form.phone),
            address: text(&form.address),
            monthly_bill: form.monthly_bill.map(|b| b.as_str()).unwrap_or_default(),
            homeowner: form.homeowner,
            roof_shade: form.roof_shade.map(|s| s.as_str()).unwrap_or_default(),
            credit_score: form.credit_score.map(|c| c.as_str()).unwrap_or_default(),
            tcpa_consent: form.tcpa_consent,
            jornaya_lead_id: text(&form.jornaya_lead_id),
            trusted_form_cert_url: text(&form.trusted_form_cert_url),
        }
    }
}

/// Write leads as CSV with a header row, returning the number of rows
pub fn write_leads_csv<W: Write>(leads: &[StoredLead], out: W) -> Result<usize> {
    let mut writer = WriterBuilder::new().has_headers(true).from_writer(out);
    for lead in leads {
        writer.serialize(LeadRow::from(lead))?;
    }
    writer.flush()?;
    Ok(leads.len())
}
