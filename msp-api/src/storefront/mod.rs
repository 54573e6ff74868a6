//! Storefront page enrichment: page-loaded events, their subscribers and the
//! store-API route that drives them.

pub mod checkout;
pub mod events;
pub mod route;

pub use checkout::{CheckoutConfirmTemplateSubscriber, MultiSafepayStruct, EXTENSION_NAME};
pub use events::{EventDispatcher, Page, PageKind, PageLoadedEvent, PageSubscriber, SubscriberError};
