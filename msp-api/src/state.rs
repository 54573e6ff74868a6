use std::sync::Arc;

use msp_core::{
    Customer, GatewayRegistry, PaymentMethodRepository, SalesChannelContext, SalesChannelRepository,
};
use msp_order::PaymentHandler;
use msp_sdk::ClientFactory;
use uuid::Uuid;

use crate::error::AppError;
use crate::storefront::EventDispatcher;

#[derive(Clone)]
pub struct AuthConfig {
    pub secret: String,
}

#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<GatewayRegistry>,
    pub payment_methods: Arc<dyn PaymentMethodRepository>,
    pub sales_channels: Arc<dyn SalesChannelRepository>,
    pub clients: Arc<dyn ClientFactory>,
    pub events: Arc<EventDispatcher>,
    pub payments: Arc<PaymentHandler>,
    pub auth: AuthConfig,
}

impl AppState {
    /// Storefront context for a store-API call. The customer is taken as sent
    /// by the storefront, which owns the customer session.
    pub async fn sales_channel_context(
        &self,
        sales_channel_id: Uuid,
        payment_method_id: Uuid,
        customer: Option<Customer>,
    ) -> Result<SalesChannelContext, AppError> {
        let sales_channel = self.sales_channels.require(sales_channel_id).await?;
        let payment_method = self.payment_methods.require(payment_method_id).await?;
        payment_method.ensure_active()?;

        Ok(SalesChannelContext {
            sales_channel,
            customer,
            payment_method,
        })
    }
}
