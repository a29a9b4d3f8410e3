//! REST API handlers for the lead funnel
//!
//! These handlers use the shared FunnelService.

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use super::service::{FunnelService, ServiceError};
use crate::compliance::script_urls;
use crate::config::Config;
use crate::error::{FunnelError, LeadFormError};
use crate::funnel::{FunnelSession, Step, StepInput};
use crate::models::{
    BillRange, ElectricProvider, FunnelRecord, LeadFormData, LeadSubmissionResponse, RequestMeta,
    RoofShade, SubscribeResponse, ZipCodeLookupResponse,
};
use crate::pipeline::validate_lead_form;
use crate::providers::providers_for_state;
use crate::validation::{format_phone, is_valid_zip_code};
use crate::zip_states::full_state_name;

// ============================================================================
// Response Types
// ============================================================================

#[derive(Serialize)]
pub struct Choice {
    pub value: String,
    pub label: String,
}

/// What the front end needs to render a funnel session
#[derive(Serialize)]
pub struct SessionView {
    pub id: Uuid,
    pub step: Step,
    pub step_number: usize,
    pub total_steps: usize,
    pub record: FunnelRecord,
    /// Phone as shown to the visitor, e.g. "(555) 123-4567"
    pub phone_display: String,
    /// Options for the current step, empty for free-text steps
    pub choices: Vec<Choice>,
    pub script_urls: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lead: Option<LeadSubmissionResponse>,
}

impl SessionView {
    fn new(id: Uuid, session: &FunnelSession, config: &Config) -> Self {
        Self {
            id,
            step: session.step(),
            step_number: session.step().number(),
            total_steps: Step::Phone.number(),
            record: session.record().clone(),
            phone_display: format_phone(&session.record().phone),
            choices: choices_for(session),
            script_urls: script_urls(config),
            lead: session.lead().cloned(),
        }
    }
}

fn choices_for(session: &FunnelSession) -> Vec<Choice> {
    match session.step() {
        Step::PowerBill => BillRange::ALL
            .iter()
            .map(|b| Choice {
                value: b.as_str().to_string(),
                label: b.label().to_string(),
            })
            .collect(),
        Step::Provider => session
            .provider_options()
            .into_iter()
            .map(|name| Choice {
                value: name.clone(),
                label: name,
            })
            .collect(),
        Step::RoofShade => RoofShade::ALL
            .iter()
            .map(|s| Choice {
                value: s.as_str().to_string(),
                label: s.label().to_string(),
            })
            .collect(),
        _ => Vec::new(),
    }
}

#[derive(Serialize)]
pub struct StateResponse {
    pub code: String,
    pub name: String,
    pub providers: &'static [ElectricProvider],
}

#[derive(Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<&'static str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldError>,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(status: StatusCode, error: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: error.into(),
            field: None,
            fields: Vec::new(),
        }),
    )
}

fn funnel_error(e: &FunnelError) -> ApiError {
    let status = match e {
        FunnelError::WrongStep { .. } => StatusCode::CONFLICT,
        _ => StatusCode::UNPROCESSABLE_ENTITY,
    };
    (
        status,
        Json(ErrorResponse {
            error: e.to_string(),
            field: e.field(),
            fields: Vec::new(),
        }),
    )
}

fn lead_form_error(first: &LeadFormError, errors: &[LeadFormError]) -> ApiError {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(ErrorResponse {
            error: first.to_string(),
            field: Some(first.field()),
            fields: errors
                .iter()
                .map(|e| FieldError {
                    field: e.field(),
                    message: e.to_string(),
                })
                .collect(),
        }),
    )
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::SessionNotFound(_) => api_error(StatusCode::NOT_FOUND, e.to_string()),
            ServiceError::Funnel(ref inner) => funnel_error(inner),
        }
    }
}

// ============================================================================
// Request Types
// ============================================================================

#[derive(Deserialize, Default)]
pub struct BackRequest {
    #[serde(default)]
    pub step: Option<Step>,
}

#[derive(Deserialize)]
pub struct NewsletterRequest {
    pub email: String,
}

/// Host without its port; bracketed IPv6 literals keep their brackets
fn strip_port(host: &str) -> &str {
    match host.rsplit_once(':') {
        Some((name, port)) if !host.ends_with(']') && port.bytes().all(|b| b.is_ascii_digit()) => name,
        _ => host,
    }
}

fn header_str<'a>(headers: &'a HeaderMap, name: header::HeaderName) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

/// Lead source, user agent and client IP as seen on the request
pub fn request_meta(headers: &HeaderMap, config: &Config) -> RequestMeta {
    let source = header_str(headers, header::HOST)
        .map(|host| strip_port(host).to_string())
        .or_else(|| config.site_host.clone())
        .unwrap_or_default();

    let ip_address = header_str(headers, header::HeaderName::from_static("x-forwarded-for"))
        .and_then(|v| v.split(',').next())
        .map(|ip| ip.trim().to_string())
        .filter(|ip| !ip.is_empty());

    RequestMeta {
        source,
        user_agent: header_str(headers, header::USER_AGENT).unwrap_or_default().to_string(),
        ip_address,
    }
}

// ============================================================================
// Handlers
// ============================================================================

pub type AppState = Arc<FunnelService>;

/// GET /api/v1/health
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({"status": "ok"}))
}

/// GET /api/v1/providers/:zip
pub async fn get_providers(
    State(service): State<AppState>,
    Path(zip): Path<String>,
) -> Result<Json<ZipCodeLookupResponse>, ApiError> {
    let result = service.pipeline().lookup_providers(&zip).await;
    if result.success {
        return Ok(Json(result));
    }

    let status = if is_valid_zip_code(&zip) {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::BAD_REQUEST
    };
    Err(api_error(status, result.message.unwrap_or_default()))
}

/// GET /api/v1/states/:code
pub async fn get_state(Path(code): Path<String>) -> Json<StateResponse> {
    let code = code.to_uppercase();
    Json(StateResponse {
        name: full_state_name(&code),
        providers: providers_for_state(&code),
        code,
    })
}

/// POST /api/v1/funnel
pub async fn start_funnel(State(service): State<AppState>) -> (StatusCode, Json<SessionView>) {
    let (id, session) = service.start_session().await;
    (
        StatusCode::CREATED,
        Json(SessionView::new(id, &session, service.pipeline().config())),
    )
}

/// GET /api/v1/funnel/:id
pub async fn get_funnel(
    State(service): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, ApiError> {
    let session = service.session(id).await?;
    Ok(Json(SessionView::new(id, &session, service.pipeline().config())))
}

/// POST /api/v1/funnel/:id/steps
pub async fn submit_step(
    State(service): State<AppState>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
    Json(input): Json<StepInput>,
) -> Result<Json<SessionView>, ApiError> {
    let config = service.pipeline().config();
    let meta = request_meta(&headers, config);
    let (_, session) = service.submit_step(id, input, &meta).await?;
    Ok(Json(SessionView::new(id, &session, config)))
}

/// POST /api/v1/funnel/:id/back
pub async fn go_back(
    State(service): State<AppState>,
    Path(id): Path<Uuid>,
    request: Option<Json<BackRequest>>,
) -> Result<Json<SessionView>, ApiError> {
    let target = request.and_then(|Json(r)| r.step);
    let session = service.go_back(id, target).await?;
    Ok(Json(SessionView::new(id, &session, service.pipeline().config())))
}

/// POST /api/v1/leads
pub async fn submit_lead(
    State(service): State<AppState>,
    headers: HeaderMap,
    Json(mut form): Json<LeadFormData>,
) -> Result<Json<LeadSubmissionResponse>, ApiError> {
    let errors = validate_lead_form(&form);
    if let Some(first) = errors.first() {
        return Err(lead_form_error(first, &errors));
    }

    // the short form only reaches homeowners
    form.homeowner.get_or_insert(true);

    let meta = request_meta(&headers, service.pipeline().config());
    let result = service.pipeline().submit_lead(form, &meta).await;
    if result.success {
        Ok(Json(result))
    } else {
        Err(api_error(StatusCode::BAD_REQUEST, result.message))
    }
}

/// POST /api/v1/newsletter
pub async fn subscribe(
    State(service): State<AppState>,
    Json(request): Json<NewsletterRequest>,
) -> Result<Json<SubscribeResponse>, ApiError> {
    let result = service.pipeline().subscribe_newsletter(&request.email).await;
    if result.success {
        Ok(Json(result))
    } else {
        let (status, Json(mut body)) = funnel_error(&FunnelError::InvalidEmail);
        body.error = result.message;
        Err((status, Json(body)))
    }
}
