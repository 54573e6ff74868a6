use std::sync::Arc;

use tracing::info;

use msp_core::settings::keys;
use msp_core::{Gateway, GatewayRegistry, SalesChannelContext, SettingsService};
use msp_sdk::{GatewayInfo, OrderRequest, OrderType};

use crate::builder::{
    BuilderError, CustomerBuilder, DeliveryBuilder, OrderRequestBuilder, PaymentOptionsBuilder,
    PluginDetailsBuilder, SecondsActiveBuilder, ShoppingCartBuilder,
};
use crate::models::{PaymentTransaction, PlatformInfo, RequestDataBag};

/// Data bag key holding the iDEAL issuer picked on the checkout page.
pub const ISSUER_FIELD: &str = "issuer";

/// Creates the full order request for a checkout transaction
pub struct OrderRequestService {
    registry: GatewayRegistry,
    settings: Arc<dyn SettingsService>,
    builders: Vec<Box<dyn OrderRequestBuilder>>,
}

impl OrderRequestService {
    pub fn new(
        registry: GatewayRegistry,
        settings: Arc<dyn SettingsService>,
        builders: Vec<Box<dyn OrderRequestBuilder>>,
    ) -> Self {
        Self { registry, settings, builders }
    }

    /// Payment options, customer, delivery, cart, seconds active and plugin details.
    pub fn with_default_builders(
        registry: GatewayRegistry,
        settings: Arc<dyn SettingsService>,
        platform: PlatformInfo,
    ) -> Self {
        let builders: Vec<Box<dyn OrderRequestBuilder>> = vec![
            Box::new(PaymentOptionsBuilder::new(platform.shop_root_url.clone())),
            Box::new(CustomerBuilder),
            Box::new(DeliveryBuilder),
            Box::new(ShoppingCartBuilder::default()),
            Box::new(SecondsActiveBuilder::new(settings.clone())),
            Box::new(PluginDetailsBuilder::new(platform)),
        ];
        Self::new(registry, settings, builders)
    }

    pub fn create(
        &self,
        transaction: &PaymentTransaction,
        data_bag: &RequestDataBag,
        context: &SalesChannelContext,
    ) -> Result<OrderRequest, BuilderError> {
        let handler = context.handler_identifier();
        let gateway = self
            .registry
            .find_by_handler(handler)
            .ok_or_else(|| BuilderError::UnknownHandler(handler.to_string()))?;

        let order = &transaction.order;
        let mut request = OrderRequest::new(
            OrderType::Redirect,
            order.order_number.clone(),
            context.currency_iso(),
            order.amount_total,
        );
        request.gateway = self.gateway_code(gateway, context)?;
        request.description = format!("Payment for order #{}", order.order_number);

        if gateway == Gateway::Ideal {
            if let Some(issuer) = data_bag.get_str(ISSUER_FIELD) {
                request.order_type = OrderType::Direct;
                request.gateway_info = Some(GatewayInfo { issuer_id: issuer.to_string() });
            }
        }

        for builder in &self.builders {
            builder.build(&mut request, transaction, data_bag, context)?;
        }

        info!(
            order_number = %order.order_number,
            gateway = %request.gateway,
            order_type = ?request.order_type,
            "Order request created"
        );
        Ok(request)
    }

    fn gateway_code(&self, gateway: Gateway, context: &SalesChannelContext) -> Result<String, BuilderError> {
        if !gateway.is_generic() {
            return Ok(gateway.gateway_code().to_string());
        }

        self.settings
            .gateway_setting(&context.payment_method, keys::GATEWAY_CODE)
            .and_then(|v| v.as_str().map(str::to_string))
            .filter(|code| !code.is_empty())
            .ok_or_else(|| BuilderError::MissingSetting(keys::GATEWAY_CODE.to_string()))
    }
}
