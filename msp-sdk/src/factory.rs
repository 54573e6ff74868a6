use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;

use msp_core::settings::{Environment, SettingsService};
use msp_shared::Masked;

use crate::client::{MultiSafepayClient, PaymentApi};

/// Builds API clients for callers that only need the [`PaymentApi`] surface.
pub trait ClientFactory: Send + Sync {
    /// Client configured from the stored settings of a sales channel.
    fn create(&self, sales_channel_id: Option<Uuid>) -> Arc<dyn PaymentApi>;

    /// Client for raw credentials, used to test a key before it is saved.
    fn create_with_data(&self, api_key: &str, environment: &str) -> Arc<dyn PaymentApi>;
}

/// Creates a fresh [`MultiSafepayClient`] on every call; nothing is cached.
pub struct SdkFactory {
    settings: Arc<dyn SettingsService>,
}

impl SdkFactory {
    pub fn new(settings: Arc<dyn SettingsService>) -> Self {
        Self { settings }
    }

    pub fn build(&self, sales_channel_id: Option<Uuid>) -> MultiSafepayClient {
        let live = self.settings.is_live_mode(sales_channel_id);
        debug!(?sales_channel_id, live, "Creating MultiSafepay client from settings");
        MultiSafepayClient::new(
            self.settings.api_key(sales_channel_id),
            live,
            reqwest::Client::new(),
        )
    }

    pub fn build_with_data(&self, api_key: &str, environment: &str) -> MultiSafepayClient {
        MultiSafepayClient::new(
            Masked::from(api_key),
            Environment::from_setting(environment).is_live(),
            reqwest::Client::new(),
        )
    }
}

impl ClientFactory for SdkFactory {
    fn create(&self, sales_channel_id: Option<Uuid>) -> Arc<dyn PaymentApi> {
        Arc::new(self.build(sales_channel_id))
    }

    fn create_with_data(&self, api_key: &str, environment: &str) -> Arc<dyn PaymentApi> {
        Arc::new(self.build_with_data(api_key, environment))
    }
}
