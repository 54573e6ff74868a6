use std::collections::HashMap;

use tracing::debug;
use uuid::Uuid;

use msp_core::{Environment, SettingsService};
use msp_shared::Masked;

use crate::app_config::{MerchantConfig, SalesChannelConfig};

/// Settings read from the configuration files; sales channel values override the global ones.
pub struct ConfigSettingsService {
    global: MerchantConfig,
    channels: HashMap<Uuid, SalesChannelConfig>,
}

impl ConfigSettingsService {
    pub fn new(global: MerchantConfig, channels: Vec<SalesChannelConfig>) -> Self {
        let channels = channels.into_iter().map(|c| (c.id, c)).collect();
        Self { global, channels }
    }

    fn channel(&self, sales_channel_id: Option<Uuid>) -> Option<&SalesChannelConfig> {
        sales_channel_id.and_then(|id| self.channels.get(&id))
    }
}

impl SettingsService for ConfigSettingsService {
    fn api_key(&self, sales_channel_id: Option<Uuid>) -> Masked<String> {
        let key = self
            .channel(sales_channel_id)
            .and_then(|c| c.api_key.clone())
            .filter(|k| !k.peek().is_empty())
            .unwrap_or_else(|| self.global.api_key.clone());
        debug!(?sales_channel_id, api_key = %key, "Resolved API key");
        key
    }

    fn environment(&self, sales_channel_id: Option<Uuid>) -> Environment {
        let value = self
            .channel(sales_channel_id)
            .and_then(|c| c.environment.as_deref())
            .filter(|e| !e.is_empty())
            .unwrap_or(&self.global.environment);
        Environment::from_setting(value)
    }

    fn time_active(&self, sales_channel_id: Option<Uuid>) -> Option<u64> {
        self.channel(sales_channel_id)
            .and_then(|c| c.time_active)
            .or(self.global.time_active)
    }
}
