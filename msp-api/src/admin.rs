use axum::{
    extract::{Path, State},
    middleware,
    routing::post,
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use msp_core::Capability;

use crate::error::AppError;
use crate::middleware::{admin_auth_middleware, auth::has_permission, AdminClaims};
use crate::state::AppState;

const READ_PERMISSION: &str = "payment_method:read";
const CONFIG_PERMISSION: &str = "system_config:write";

pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/api/multisafepay/component-allowed", post(component_allowed))
        .route("/api/multisafepay/tokenization-allowed", post(tokenization_allowed))
        .route("/api/multisafepay/verify-api-key", post(verify_api_key))
        .route("/api/{version}/multisafepay/component-allowed", post(versioned_component_allowed))
        .route("/api/{version}/multisafepay/tokenization-allowed", post(versioned_tokenization_allowed))
        .route("/api/{version}/multisafepay/verify-api-key", post(versioned_verify_api_key))
        .route_layer(middleware::from_fn_with_state(state, admin_auth_middleware))
}

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapabilityRequest {
    pub payment_method_id: Uuid,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CapabilityResponse {
    pub success: bool,
    pub supported: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyApiKeyRequest {
    pub api_key: String,
    #[serde(default = "default_environment")]
    pub environment: String,
}

fn default_environment() -> String {
    msp_core::settings::TEST_ENVIRONMENT.to_string()
}

#[derive(Debug, Serialize, Deserialize)]
pub struct VerifyApiKeyResponse {
    pub success: bool,
}

// ============================================================================
// Capability Handlers
// ============================================================================

/// POST /api/multisafepay/component-allowed
pub async fn component_allowed(
    State(state): State<AppState>,
    Extension(claims): Extension<AdminClaims>,
    Json(req): Json<CapabilityRequest>,
) -> Result<Json<CapabilityResponse>, AppError> {
    capability_allowed(&state, &claims, req.payment_method_id, Capability::PaymentComponent).await
}

/// POST /api/multisafepay/tokenization-allowed
pub async fn tokenization_allowed(
    State(state): State<AppState>,
    Extension(claims): Extension<AdminClaims>,
    Json(req): Json<CapabilityRequest>,
) -> Result<Json<CapabilityResponse>, AppError> {
    capability_allowed(&state, &claims, req.payment_method_id, Capability::Tokenization).await
}

async fn versioned_component_allowed(
    State(state): State<AppState>,
    Path(version): Path<String>,
    claims: Extension<AdminClaims>,
    req: Json<CapabilityRequest>,
) -> Result<Json<CapabilityResponse>, AppError> {
    check_version(&version)?;
    component_allowed(State(state), claims, req).await
}

async fn versioned_tokenization_allowed(
    State(state): State<AppState>,
    Path(version): Path<String>,
    claims: Extension<AdminClaims>,
    req: Json<CapabilityRequest>,
) -> Result<Json<CapabilityResponse>, AppError> {
    check_version(&version)?;
    tokenization_allowed(State(state), claims, req).await
}

async fn capability_allowed(
    state: &AppState,
    claims: &AdminClaims,
    payment_method_id: Uuid,
    capability: Capability,
) -> Result<Json<CapabilityResponse>, AppError> {
    if !has_permission(claims, READ_PERMISSION) {
        return Err(AppError::AuthorizationError(format!("Missing permission {}", READ_PERMISSION)));
    }

    let payment_method = state.payment_methods.require(payment_method_id).await?;

    let supported = state
        .registry
        .supports(&payment_method.handler_identifier, capability);

    Ok(Json(CapabilityResponse { success: true, supported }))
}

// ============================================================================
// Credential Check
// ============================================================================

/// POST /api/multisafepay/verify-api-key
///
/// Tries the submitted credentials against the gateway listing before they are saved.
pub async fn verify_api_key(
    State(state): State<AppState>,
    Extension(claims): Extension<AdminClaims>,
    Json(req): Json<VerifyApiKeyRequest>,
) -> Result<Json<VerifyApiKeyResponse>, AppError> {
    if !has_permission(&claims, CONFIG_PERMISSION) {
        return Err(AppError::AuthorizationError(format!("Missing permission {}", CONFIG_PERMISSION)));
    }
    if req.api_key.trim().is_empty() {
        return Err(AppError::ValidationError("apiKey must not be empty".to_string()));
    }

    let client = state.clients.create_with_data(&req.api_key, &req.environment);
    match client.gateways().await {
        Ok(gateways) => {
            info!(admin = %claims.sub, gateways = gateways.len(), "API key verified");
            Ok(Json(VerifyApiKeyResponse { success: true }))
        }
        Err(e) if e.is_invalid_api_key() => {
            warn!(admin = %claims.sub, environment = %req.environment, "API key rejected");
            Ok(Json(VerifyApiKeyResponse { success: false }))
        }
        Err(e) => Err(AppError::from(e)),
    }
}

async fn versioned_verify_api_key(
    State(state): State<AppState>,
    Path(version): Path<String>,
    claims: Extension<AdminClaims>,
    req: Json<VerifyApiKeyRequest>,
) -> Result<Json<VerifyApiKeyResponse>, AppError> {
    check_version(&version)?;
    verify_api_key(State(state), claims, req).await
}

/// Accepts `v1`, `v2`, ... as the admin API version segment.
fn check_version(version: &str) -> Result<(), AppError> {
    let valid = version
        .strip_prefix('v')
        .map(|n| !n.is_empty() && n.chars().all(|c| c.is_ascii_digit()))
        .unwrap_or(false);
    if valid {
        Ok(())
    } else {
        Err(AppError::NotFoundError(format!("Unknown API version {}", version)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_version() {
        assert!(check_version("v1").is_ok());
        assert!(check_version("v12").is_ok());
        assert!(check_version("v").is_err());
        assert!(check_version("1").is_err());
        assert!(check_version("vX").is_err());
    }
}
