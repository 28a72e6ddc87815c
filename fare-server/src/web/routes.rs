//! HTTP route handlers.

use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use tracing::{error, info, warn};

use crate::domain::District;
use crate::resolver::{FareRequest, ResolveError, RouteResolver};
use crate::store::ReloadError;

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/fare/calculate", post(calculate_fare))
        .route("/fare/locations", get(list_locations))
        .route("/fare/validate-location", get(validate_location))
        .route("/guide/status", get(guide_status))
        .route("/guide/reload", post(reload_guide))
        .with_state(state)
}

async fn root() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        message: "Fair Fares API",
        status: "running",
    })
}

/// Health check endpoint.
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "healthy" })
}

fn parse_district(number: u32) -> Result<District, AppError> {
    District::new(number).map_err(|e| AppError::BadRequest {
        message: e.to_string(),
    })
}

/// Price a journey.
async fn calculate_fare(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<FareCalculationResponse>, AppError> {
    // Parse JSON manually so malformed bodies get the usual error shape
    let req: FareCalculationRequest = serde_json::from_slice(&body).map_err(|e| {
        warn!(error = %e, body = %String::from_utf8_lossy(&body), "Rejected fare request body");
        AppError::BadRequest {
            message: format!("Invalid JSON: {e}"),
        }
    })?;

    let mut request =
        FareRequest::new(parse_district(req.district)?, req.start_location).with_trike(req.include_trike);
    if let Some(destination) = req.destination {
        request = request.to(destination);
    }

    // The path search can be expensive on dense districts; keep it off the
    // async workers
    let loaded = state.guides.current().await;
    let config = state.config.clone();
    let quote = tokio::task::spawn_blocking(move || {
        RouteResolver::new(&loaded.guide, &config).resolve(&request)
    })
    .await
    .map_err(|e| AppError::Internal {
        message: format!("fare resolution task failed: {e}"),
    })??;

    Ok(Json(FareCalculationResponse::from_quote(&quote)))
}

/// List the locations of a district.
async fn list_locations(
    State(state): State<AppState>,
    Query(query): Query<LocationsQuery>,
) -> Result<Json<LocationsResponse>, AppError> {
    let district = parse_district(query.district)?;

    let loaded = state.guides.current().await;
    let resolver = RouteResolver::new(&loaded.guide, &state.config);
    let locations = resolver.locations(district).map_err(|e| AppError::NotFound {
        message: e.to_string(),
    })?;

    Ok(Json(LocationsResponse::new(district, &locations)))
}

/// Check whether a location exists in a district.
async fn validate_location(
    State(state): State<AppState>,
    Query(query): Query<ValidateLocationQuery>,
) -> Json<ValidateLocationResponse> {
    let valid = match District::new(query.district) {
        Ok(district) => {
            let loaded = state.guides.current().await;
            RouteResolver::new(&loaded.guide, &state.config).is_valid_location(&query.location, district)
        }
        Err(_) => false,
    };

    Json(ValidateLocationResponse {
        district: query.district,
        location: query.location,
        valid,
    })
}

/// Describe the loaded guide.
async fn guide_status(State(state): State<AppState>) -> Json<GuideStatusResponse> {
    let loaded = state.guides.current().await;
    Json(GuideStatusResponse::new(state.guides.source(), &loaded))
}

/// Re-read the guide from its source.
async fn reload_guide(State(state): State<AppState>) -> Result<Json<GuideStatusResponse>, AppError> {
    let loaded = state.guides.reload().await?;
    info!(source = %state.guides.source().path().display(), "Guide reloaded on request");
    Ok(Json(GuideStatusResponse::new(state.guides.source(), &loaded)))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Internal { message: String },
}

impl From<ResolveError> for AppError {
    fn from(e: ResolveError) -> Self {
        AppError::BadRequest {
            message: e.to_string(),
        }
    }
}

impl From<ReloadError> for AppError {
    fn from(e: ReloadError) -> Self {
        AppError::Internal {
            message: e.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!(%status, %message, "Request failed");
        } else {
            warn!(%status, %message, "Request rejected");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
