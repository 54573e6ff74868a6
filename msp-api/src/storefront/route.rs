use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::BTreeMap;
use uuid::Uuid;

use msp_core::Customer;

use crate::error::AppError;
use crate::state::AppState;

use super::events::{PageKind, PageLoadedEvent, SubscriberError};

pub fn routes() -> Router<AppState> {
    Router::new().route("/store-api/multisafepay/checkout-data", post(checkout_data))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutDataRequest {
    pub sales_channel_id: Uuid,
    pub payment_method_id: Uuid,
    pub customer: Option<Customer>,
    #[serde(default = "default_page")]
    pub page: PageKind,
}

fn default_page() -> PageKind {
    PageKind::CheckoutConfirm
}

#[derive(Debug, Serialize)]
pub struct CheckoutDataResponse {
    pub page: PageKind,
    pub extensions: BTreeMap<String, Value>,
}

/// POST /store-api/multisafepay/checkout-data
///
/// Loads the requested page for a storefront context and returns whatever
/// the page subscribers attached to it.
pub async fn checkout_data(
    State(state): State<AppState>,
    Json(payload): Json<CheckoutDataRequest>,
) -> Result<Json<Value>, AppError> {
    // 1. Resolve the storefront context
    let context = state
        .sales_channel_context(payload.sales_channel_id, payload.payment_method_id, payload.customer)
        .await?;

    // 2. Let the subscribers enrich the page
    let mut event = PageLoadedEvent::new(payload.page, context);
    state.events.dispatch(&mut event).await.map_err(|e| match e {
        SubscriberError::Repository(core) => AppError::from(core),
        other => AppError::from(other),
    })?;

    let response = CheckoutDataResponse {
        page: event.kind,
        extensions: event.page.extensions().clone(),
    };
    Ok(Json(json!({ "success": true, "data": response })))
}
