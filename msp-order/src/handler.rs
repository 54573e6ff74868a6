use std::sync::Arc;

use tracing::{error, info, warn};

use msp_core::SalesChannelContext;
use msp_sdk::{ApiError, ClientFactory};

use crate::builder::BuilderError;
use crate::models::{PaymentTransaction, RequestDataBag, TransactionStatus};
use crate::request::OrderRequestService;

#[derive(Debug, thiserror::Error)]
pub enum PaymentError {
    #[error("Could not build order request: {0}")]
    Build(#[from] BuilderError),

    #[error("Payment could not be started for order {order_number}: {source}")]
    Initiate {
        order_number: String,
        #[source]
        source: ApiError,
    },

    #[error("No payment URL returned for order {0}")]
    MissingPaymentUrl(String),

    #[error("Customer canceled the payment for order {0}")]
    CustomerCanceled(String),

    #[error("Payment for order {order_number} finished with status {status:?}")]
    Finalize {
        order_number: String,
        status: TransactionStatus,
    },

    #[error("Order status could not be retrieved for order {order_number}: {source}")]
    Status {
        order_number: String,
        #[source]
        source: ApiError,
    },
}

/// Entry point the platform checkout calls for every MultiSafepay payment method
pub struct PaymentHandler {
    requests: OrderRequestService,
    clients: Arc<dyn ClientFactory>,
}

impl PaymentHandler {
    pub fn new(requests: OrderRequestService, clients: Arc<dyn ClientFactory>) -> Self {
        Self { requests, clients }
    }

    /// Create the order at MultiSafepay and return the URL the customer is sent to.
    pub async fn pay(
        &self,
        transaction: &PaymentTransaction,
        data_bag: &RequestDataBag,
        context: &SalesChannelContext,
    ) -> Result<String, PaymentError> {
        let order_number = transaction.order.order_number.clone();
        let request = self.requests.create(transaction, data_bag, context)?;
        let client = self.clients.create(Some(context.sales_channel_id()));

        let response = client.create_order(&request).await.map_err(|source| {
            error!(%order_number, error = %source, "Creating MultiSafepay order failed");
            PaymentError::Initiate { order_number: order_number.clone(), source }
        })?;

        let url = response
            .payment_url
            .ok_or_else(|| PaymentError::MissingPaymentUrl(order_number.clone()))?;
        info!(%order_number, "Redirecting customer to MultiSafepay");
        Ok(url)
    }

    /// Check the outcome once the customer returns to the shop.
    pub async fn finalize(
        &self,
        transaction: &PaymentTransaction,
        context: &SalesChannelContext,
        cancelled: bool,
    ) -> Result<TransactionStatus, PaymentError> {
        let order_number = transaction.order.order_number.clone();
        if cancelled {
            warn!(%order_number, "Customer canceled payment");
            return Err(PaymentError::CustomerCanceled(order_number));
        }

        let client = self.clients.create(Some(context.sales_channel_id()));
        let response = client
            .get_order(&order_number)
            .await
            .map_err(|source| PaymentError::Status { order_number: order_number.clone(), source })?;

        let status = response
            .status
            .as_deref()
            .map(TransactionStatus::from_api_status)
            .unwrap_or(TransactionStatus::Unknown);

        if !status.is_successful() {
            return Err(PaymentError::Finalize { order_number, status });
        }
        Ok(status)
    }
}
