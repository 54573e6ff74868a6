//! Builders that copy platform data into an outgoing [`OrderRequest`].
//!
//! An [`OrderRequestBuilder`] fills one part of the request. The shopping cart
//! is itself composed from [`ShoppingCartItemBuilder`]s, one per line item type,
//! whose outputs are concatenated in registration order.

pub mod customer;
pub mod details;
pub mod items;
pub mod payment_options;
pub mod shopping_cart;

use msp_core::{Order, SalesChannelContext};
use msp_sdk::{CartItem, OrderRequest};

use crate::models::{PaymentTransaction, RequestDataBag};

pub use customer::{CustomerBuilder, DeliveryBuilder};
pub use details::{PluginDetailsBuilder, SecondsActiveBuilder};
pub use items::{DiscountItemBuilder, OrderItemBuilder, ShippingItemBuilder};
pub use payment_options::PaymentOptionsBuilder;
pub use shopping_cart::ShoppingCartBuilder;

#[derive(Debug, thiserror::Error)]
pub enum BuilderError {
    #[error("No currency available for the sales channel")]
    MissingCurrency,

    #[error("Invalid line item {id}: {reason}")]
    InvalidLineItem { id: String, reason: String },

    #[error("No MultiSafepay gateway registered for handler {0}")]
    UnknownHandler(String),

    #[error("Missing setting: {0}")]
    MissingSetting(String),
}

pub trait OrderRequestBuilder: Send + Sync {
    fn build(
        &self,
        request: &mut OrderRequest,
        transaction: &PaymentTransaction,
        data_bag: &RequestDataBag,
        context: &SalesChannelContext,
    ) -> Result<(), BuilderError>;
}

/// Produces the cart lines for one kind of order content
pub trait ShoppingCartItemBuilder: Send + Sync {
    fn build(&self, order: &Order, currency: &str) -> Result<Vec<CartItem>, BuilderError>;
}
