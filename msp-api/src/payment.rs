use axum::{extract::State, routing::post, Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{info, warn};
use uuid::Uuid;

use msp_core::Customer;
use msp_order::{PaymentError, PaymentTransaction, RequestDataBag, TransactionStatus};

use crate::error::AppError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/store-api/multisafepay/pay", post(pay))
        .route("/store-api/multisafepay/finalize", post(finalize))
}

// ============================================================================
// Request Types
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayRequest {
    pub sales_channel_id: Uuid,
    pub payment_method_id: Uuid,
    pub customer: Option<Customer>,
    pub transaction: PaymentTransaction,
    #[serde(default)]
    pub data_bag: RequestDataBag,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinalizeRequest {
    pub sales_channel_id: Uuid,
    pub payment_method_id: Uuid,
    pub customer: Option<Customer>,
    pub transaction: PaymentTransaction,
    /// Set when the customer came back through the cancel URL
    #[serde(default)]
    pub cancelled: bool,
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /store-api/multisafepay/pay
///
/// Creates the order at MultiSafepay and hands back the URL to send the customer to.
pub async fn pay(
    State(state): State<AppState>,
    Json(req): Json<PayRequest>,
) -> Result<Json<Value>, AppError> {
    let context = state
        .sales_channel_context(req.sales_channel_id, req.payment_method_id, req.customer)
        .await?;

    let payment_url = state
        .payments
        .pay(&req.transaction, &req.data_bag, &context)
        .await
        .map_err(payment_error)?;

    Ok(Json(json!({
        "success": true,
        "data": { "paymentUrl": payment_url },
    })))
}

/// POST /store-api/multisafepay/finalize
///
/// A cancelled or failed payment is an expected outcome and answers `success: false`
/// with the resulting status.
pub async fn finalize(
    State(state): State<AppState>,
    Json(req): Json<FinalizeRequest>,
) -> Result<Json<Value>, AppError> {
    let context = state
        .sales_channel_context(req.sales_channel_id, req.payment_method_id, req.customer)
        .await?;

    let (success, status) = match state.payments.finalize(&req.transaction, &context, req.cancelled).await {
        Ok(status) => (true, status),
        Err(PaymentError::CustomerCanceled(_)) => (false, TransactionStatus::Cancelled),
        Err(PaymentError::Finalize { order_number, status }) => {
            warn!(%order_number, ?status, "Payment not completed");
            (false, status)
        }
        Err(e) => return Err(payment_error(e)),
    };

    info!(order_number = %req.transaction.order.order_number, success, ?status, "Payment finalized");
    Ok(Json(json!({
        "success": success,
        "data": { "status": status },
    })))
}

fn payment_error(err: PaymentError) -> AppError {
    match err {
        PaymentError::Build(e) => AppError::ValidationError(e.to_string()),
        other => AppError::InternalServerError(other.to_string()),
    }
}
