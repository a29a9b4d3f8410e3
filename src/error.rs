use crate::funnel::Step;

/// Why a funnel step or lead form did not advance.
///
/// Display text is the message shown to the visitor.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum FunnelError {
    #[error("Please enter a valid 5-digit ZIP code")]
    InvalidZip,
    #[error("{0}")]
    LookupMiss(String),
    #[error("Solar panels are typically only available for homeowners. You may want to discuss options with your landlord or consider community solar programs.")]
    NotHomeowner,
    #[error("Please select your electric provider")]
    MissingProvider,
    #[error("Please enter your street address")]
    MissingAddress,
    #[error("Please enter your first name")]
    MissingFirstName,
    #[error("Please enter your last name")]
    MissingLastName,
    #[error("Please enter your email address")]
    MissingEmail,
    #[error("Please enter a valid email address")]
    InvalidEmail,
    #[error("Please enter a valid 10-digit phone number")]
    InvalidPhone,
    #[error("You must agree to the terms to continue")]
    ConsentRequired,
    #[error("expected the {expected} step, funnel is at {actual}")]
    WrongStep { expected: Step, actual: Step },
    #[error("{0}")]
    SubmissionRejected(String),
}

impl FunnelError {
    /// Input the message belongs next to, None for step-level messages
    pub fn field(&self) -> Option<&'static str> {
        match self {
            FunnelError::InvalidZip => Some("zip_code"),
            FunnelError::NotHomeowner => Some("homeowner"),
            FunnelError::MissingProvider => Some("provider"),
            FunnelError::MissingAddress => Some("address"),
            FunnelError::MissingFirstName => Some("first_name"),
            FunnelError::MissingLastName => Some("last_name"),
            FunnelError::MissingEmail | FunnelError::InvalidEmail => Some("email"),
            FunnelError::InvalidPhone => Some("phone"),
            FunnelError::ConsentRequired => Some("tcpa_consent"),
            FunnelError::LookupMiss(_)
            | FunnelError::WrongStep { .. }
            | FunnelError::SubmissionRejected(_) => None,
        }
    }
}

/// Field error on the short lead form
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeadFormError {
    #[error("First name is required")]
    MissingFirstName,
    #[error("Last name is required")]
    MissingLastName,
    #[error("Email is required")]
    MissingEmail,
    #[error("Please enter a valid email")]
    InvalidEmail,
    #[error("Phone number is required")]
    MissingPhone,
    #[error("Please enter a valid 10-digit phone number")]
    InvalidPhone,
    #[error("Please select your monthly bill")]
    MissingBill,
    #[error("Please select roof shade level")]
    MissingRoofShade,
    #[error("Please select credit score range")]
    MissingCreditScore,
    #[error("You must consent to be contacted")]
    ConsentRequired,
}

impl LeadFormError {
    pub fn field(&self) -> &'static str {
        match self {
            LeadFormError::MissingFirstName => "first_name",
            LeadFormError::MissingLastName => "last_name",
            LeadFormError::MissingEmail | LeadFormError::InvalidEmail => "email",
            LeadFormError::MissingPhone | LeadFormError::InvalidPhone => "phone",
            LeadFormError::MissingBill => "monthly_bill",
            LeadFormError::MissingRoofShade => "roof_shade",
            LeadFormError::MissingCreditScore => "credit_score",
            LeadFormError::ConsentRequired => "tcpa_consent",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_and_fields() {
        assert_eq!(FunnelError::InvalidPhone.to_string(), "Please enter a valid 10-digit phone number");
        assert_eq!(FunnelError::InvalidEmail.field(), Some("email"));
        assert_eq!(
            FunnelError::LookupMiss("No providers found for this ZIP code".to_string()).to_string(),
            "No providers found for this ZIP code"
        );
        assert_eq!(FunnelError::LookupMiss(String::new()).field(), None);
    }

    #[test]
    fn test_lead_form_messages() {
        assert_eq!(LeadFormError::MissingEmail.to_string(), "Email is required");
        assert_eq!(LeadFormError::InvalidEmail.to_string(), "Please enter a valid email");
        assert_eq!(LeadFormError::MissingPhone.field(), "phone");
        assert_eq!(LeadFormError::ConsentRequired.to_string(), "You must consent to be contacted");
    }

    #[test]
    fn test_wrong_step_message() {
        let err = FunnelError::WrongStep {
            expected: Step::Email,
            actual: Step::ZipCode,
        };
        assert_eq!(err.to_string(), "expected the email step, funnel is at zip_code");
    }
}
