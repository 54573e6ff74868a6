use msp_core::{SalesChannelContext, SettingsService};
use msp_sdk::{OrderRequest, PluginDetails};
use std::sync::Arc;

use super::{BuilderError, OrderRequestBuilder};
use crate::models::{PaymentTransaction, PlatformInfo, RequestDataBag};

/// Lifetime of the payment link, taken from the sales channel settings
pub struct SecondsActiveBuilder {
    settings: Arc<dyn SettingsService>,
}

impl SecondsActiveBuilder {
    pub fn new(settings: Arc<dyn SettingsService>) -> Self {
        Self { settings }
    }
}

impl OrderRequestBuilder for SecondsActiveBuilder {
    fn build(
        &self,
        request: &mut OrderRequest,
        _transaction: &PaymentTransaction,
        _data_bag: &RequestDataBag,
        context: &SalesChannelContext,
    ) -> Result<(), BuilderError> {
        request.seconds_active = self.settings.time_active(Some(context.sales_channel_id()));
        Ok(())
    }
}

pub struct PluginDetailsBuilder {
    platform: PlatformInfo,
}

impl PluginDetailsBuilder {
    pub fn new(platform: PlatformInfo) -> Self {
        Self { platform }
    }
}

impl OrderRequestBuilder for PluginDetailsBuilder {
    fn build(
        &self,
        request: &mut OrderRequest,
        _transaction: &PaymentTransaction,
        _data_bag: &RequestDataBag,
        _context: &SalesChannelContext,
    ) -> Result<(), BuilderError> {
        request.plugin = Some(PluginDetails {
            shop: self.platform.shop.clone(),
            shop_version: self.platform.shop_version.clone(),
            plugin_version: self.platform.plugin_version.clone(),
            shop_root_url: self.platform.shop_root_url.clone(),
        });
        Ok(())
    }
}
