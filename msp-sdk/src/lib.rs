pub mod client;
pub mod error;
pub mod factory;
pub mod models;

pub use client::{MultiSafepayClient, PaymentApi};
pub use error::{ApiError, ApiResult};
pub use factory::{ClientFactory, SdkFactory};
pub use models::{
    CartItem, CheckoutOptions, CustomerDetails, GatewayInfo, GatewayListing, Issuer, OrderRequest,
    OrderResponse, OrderType, PaymentOptions, PluginDetails, ShoppingCart,
};
