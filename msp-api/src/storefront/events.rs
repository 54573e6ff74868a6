use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use msp_core::{CoreError, SalesChannelContext};
use msp_sdk::ApiError;

/// Storefront pages that announce being loaded
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PageKind {
    CheckoutCart,
    CheckoutConfirm,
    CheckoutFinish,
    AccountEditOrder,
}

/// Rendered page data; subscribers attach extra data as named extensions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Page {
    extensions: BTreeMap<String, Value>,
}

impl Page {
    pub fn add_extension(&mut self, name: &str, extension: Value) {
        self.extensions.insert(name.to_string(), extension);
    }

    pub fn get_extension(&self, name: &str) -> Option<&Value> {
        self.extensions.get(name)
    }

    pub fn has_extension(&self, name: &str) -> bool {
        self.extensions.contains_key(name)
    }

    pub fn extensions(&self) -> &BTreeMap<String, Value> {
        &self.extensions
    }
}

#[derive(Debug, Clone)]
pub struct PageLoadedEvent {
    pub kind: PageKind,
    pub context: SalesChannelContext,
    pub page: Page,
}

impl PageLoadedEvent {
    pub fn new(kind: PageKind, context: SalesChannelContext) -> Self {
        Self { kind, context, page: Page::default() }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SubscriberError {
    #[error(transparent)]
    Repository(#[from] CoreError),

    #[error("MultiSafepay API call failed: {0}")]
    Api(#[from] ApiError),

    #[error("Could not serialize page extension: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[async_trait]
pub trait PageSubscriber: Send + Sync {
    fn subscribed_events(&self) -> &'static [PageKind];

    async fn on_page_loaded(&self, event: &mut PageLoadedEvent) -> Result<(), SubscriberError>;
}

/// Runs every subscriber interested in an event, in registration order.
#[derive(Default)]
pub struct EventDispatcher {
    subscribers: Vec<Arc<dyn PageSubscriber>>,
}

impl EventDispatcher {
    pub fn new(subscribers: Vec<Arc<dyn PageSubscriber>>) -> Self {
        Self { subscribers }
    }

    pub async fn dispatch(&self, event: &mut PageLoadedEvent) -> Result<(), SubscriberError> {
        for subscriber in &self.subscribers {
            if !subscriber.subscribed_events().contains(&event.kind) {
                continue;
            }
            debug!(kind = ?event.kind, "Dispatching page loaded event");
            subscriber.on_page_loaded(event).await?;
        }
        Ok(())
    }
}
