pub mod builder;
pub mod handler;
pub mod models;
pub mod request;

pub use builder::{BuilderError, OrderRequestBuilder, ShoppingCartBuilder, ShoppingCartItemBuilder};
pub use handler::{PaymentError, PaymentHandler};
pub use models::{PaymentTransaction, PlatformInfo, RequestDataBag, TransactionStatus};
pub use request::OrderRequestService;

#[cfg(test)]
pub(crate) mod test_support;
