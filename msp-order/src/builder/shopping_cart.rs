use tracing::debug;

use msp_core::SalesChannelContext;
use msp_sdk::{OrderRequest, ShoppingCart};

use super::{BuilderError, OrderRequestBuilder, ShoppingCartItemBuilder};
use super::{DiscountItemBuilder, OrderItemBuilder, ShippingItemBuilder};
use crate::models::{PaymentTransaction, RequestDataBag};

pub struct ShoppingCartBuilder {
    item_builders: Vec<Box<dyn ShoppingCartItemBuilder>>,
}

impl ShoppingCartBuilder {
    /// Item builders run in the given order, which is the order of the cart lines.
    pub fn new(item_builders: Vec<Box<dyn ShoppingCartItemBuilder>>) -> Self {
        Self { item_builders }
    }
}

impl Default for ShoppingCartBuilder {
    /// Products, then discounts, then shipping.
    fn default() -> Self {
        Self::new(vec![
            Box::new(OrderItemBuilder),
            Box::new(DiscountItemBuilder),
            Box::new(ShippingItemBuilder),
        ])
    }
}

impl OrderRequestBuilder for ShoppingCartBuilder {
    fn build(
        &self,
        request: &mut OrderRequest,
        transaction: &PaymentTransaction,
        _data_bag: &RequestDataBag,
        context: &SalesChannelContext,
    ) -> Result<(), BuilderError> {
        let currency = context.currency_iso();
        if currency.is_empty() {
            return Err(BuilderError::MissingCurrency);
        }

        let order = &transaction.order;
        let mut items = Vec::new();
        for builder in &self.item_builders {
            items.extend(builder.build(order, currency)?);
        }

        debug!(order_number = %order.order_number, lines = items.len(), "Shopping cart built");
        request.add_shopping_cart(ShoppingCart::new(items));
        Ok(())
    }
}
