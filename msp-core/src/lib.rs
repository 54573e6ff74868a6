pub mod context;
pub mod gateway;
pub mod order;
pub mod repository;
pub mod settings;

pub use context::{Customer, Language, Locale, PaymentMethod, SalesChannel, SalesChannelContext};
pub use gateway::{Capability, Gateway, GatewayRegistry};
pub use order::{Address, LineItemKind, Order, OrderCustomer, OrderLineItem, ShippingCosts};
pub use repository::{LanguageRepository, PaymentMethodRepository, SalesChannelRepository};
pub use settings::{Environment, SettingsService};

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    ValidationError(String),
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },
}

pub type CoreResult<T> = Result<T, CoreError>;
