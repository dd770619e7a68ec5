#![deny(unsafe_code)]

use axum::extract::{Query, State};
use axum::http::{StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tower_http::trace::TraceLayer;
use tracing::debug;
use zoomies_core::{
    DisplaySplit, DonationDefaults, DonationRequest, DonationSplit, FeeSchedule, ZoomiesError,
};

#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Values used when the donation form leaves a field blank.
    pub defaults: DonationDefaults,
    /// Largest amount or tip accepted, in currency units.
    pub max_amount: Decimal,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            defaults: DonationDefaults::default(),
            max_amount: Decimal::from(1_000_000),
        }
    }
}

#[derive(Clone)]
pub struct ServiceState {
    pub config: Arc<ServiceConfig>,
}

impl ServiceState {
    pub fn new(config: ServiceConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }
}

pub fn build_router(state: ServiceState) -> Router {
    Router::new()
        .route("/v1/health", get(health))
        .route("/v1/donations/fee-schedule", get(fee_schedule))
        .route("/v1/donations/quote", get(quote_query).post(quote_body))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteResponse {
    /// The request after clamping; this is what the split was computed on.
    pub request: DonationRequest,
    /// True when the submitted values were raised to the minimums.
    pub clamped: bool,
    pub split: DonationSplit,
    pub display: DisplaySplit,
}

/// Parse, clamp and price a donation.
pub fn quote_donation(
    config: &ServiceConfig,
    amount: Option<&str>,
    tip: Option<&str>,
) -> Result<QuoteResponse, ApiError> {
    let raw = DonationRequest::parse_input(amount, tip, config.defaults)?;
    let request = raw.clamped();
    request.ensure_at_most(config.max_amount)?;

    let split = request.split();
    debug!(
        amount = %request.amount,
        tip = %request.tip,
        clamped = raw != request,
        "Quoted donation"
    );

    Ok(QuoteResponse {
        request,
        clamped: raw != request,
        display: split.display(),
        split,
    })
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{message}")]
    Http { status: StatusCode, message: String },
    #[error(transparent)]
    Input(#[from] ZoomiesError),
}

impl ApiError {
    fn not_found(message: impl Into<String>) -> Self {
        Self::Http {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Http { status, .. } => *status,
            ApiError::Input(ZoomiesError::InvalidAmount { .. })
            | ApiError::Input(ZoomiesError::AmountOutOfRange { .. }) => StatusCode::BAD_REQUEST,
            ApiError::Input(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}

async fn not_found(uri: Uri) -> ApiError {
    ApiError::not_found(format!("no route for '{}'", uri.path()))
}

#[derive(Debug, Clone, Serialize)]
struct HealthResponse {
    status: &'static str,
    service: &'static str,
    fee_schedule: FeeSchedule,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        service: "zoomies-service",
        fee_schedule: FeeSchedule::STANDARD,
    })
}

#[derive(Debug, Clone, Serialize)]
struct FeeScheduleResponse {
    schedule: FeeSchedule,
    defaults: DonationDefaults,
    max_amount: Decimal,
}

async fn fee_schedule(State(state): State<ServiceState>) -> Json<FeeScheduleResponse> {
    Json(FeeScheduleResponse {
        schedule: FeeSchedule::STANDARD,
        defaults: state.config.defaults,
        max_amount: state.config.max_amount,
    })
}

#[derive(Debug, Clone, Deserialize)]
struct QuoteQuery {
    amount: Option<String>,
    tip: Option<String>,
}

async fn quote_query(
    State(state): State<ServiceState>,
    Query(query): Query<QuoteQuery>,
) -> Result<Json<QuoteResponse>, ApiError> {
    Ok(Json(quote_donation(
        &state.config,
        query.amount.as_deref(),
        query.tip.as_deref(),
    )?))
}

/// Form fields arrive either as JSON strings or numbers.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum AmountField {
    Text(String),
    Number(serde_json::Number),
}

impl AmountField {
    fn into_text(self) -> String {
        match self {
            AmountField::Text(text) => text,
            AmountField::Number(number) => number.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct QuoteBody {
    amount: Option<AmountField>,
    tip: Option<AmountField>,
}

async fn quote_body(
    State(state): State<ServiceState>,
    Json(body): Json<QuoteBody>,
) -> Result<Json<QuoteResponse>, ApiError> {
    let amount = body.amount.map(AmountField::into_text);
    let tip = body.tip.map(AmountField::into_text);
    Ok(Json(quote_donation(
        &state.config,
        amount.as_deref(),
        tip.as_deref(),
    )?))
}
