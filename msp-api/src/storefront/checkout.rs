use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use msp_core::settings::keys;
use msp_core::{Capability, Gateway, GatewayRegistry, LanguageRepository, SalesChannelContext, SettingsService};
use msp_sdk::{ClientFactory, Issuer, PaymentApi};
use msp_shared::version;

use super::events::{PageKind, PageLoadedEvent, PageSubscriber, SubscriberError};

/// Name of the page extension carrying [`MultiSafepayStruct`].
pub const EXTENSION_NAME: &str = "multisafepay";

/// Platform versions below this one render the legacy checkout templates.
const LEGACY_TEMPLATE_VERSION: &str = "6.4";

/// Data the checkout templates need to render MultiSafepay payment methods
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MultiSafepayStruct {
    pub api_token: Option<String>,
    pub gateway_code: Option<String>,
    pub env: Option<String>,
    pub locale: String,
    pub show_tokenization: bool,
    pub issuers: Vec<Issuer>,
    pub last_used_issuer: Option<String>,
    pub shopware_compare: bool,
    pub payment_method_name: Option<String>,
    pub current_payment_method_id: String,
}

/// Enriches the confirm and edit-order pages with issuers, component data and
/// tokenization visibility.
pub struct CheckoutConfirmTemplateSubscriber {
    clients: Arc<dyn ClientFactory>,
    languages: Arc<dyn LanguageRepository>,
    settings: Arc<dyn SettingsService>,
    registry: Arc<GatewayRegistry>,
    platform_version: String,
}

impl CheckoutConfirmTemplateSubscriber {
    pub fn new(
        clients: Arc<dyn ClientFactory>,
        languages: Arc<dyn LanguageRepository>,
        settings: Arc<dyn SettingsService>,
        registry: Arc<GatewayRegistry>,
        platform_version: impl Into<String>,
    ) -> Self {
        Self {
            clients,
            languages,
            settings,
            registry,
            platform_version: platform_version.into(),
        }
    }

    /// Builds the extension, or `None` when the stored API key is rejected.
    pub async fn build_struct(
        &self,
        context: &SalesChannelContext,
    ) -> Result<Option<MultiSafepayStruct>, SubscriberError> {
        let sales_channel_id = context.sales_channel_id();
        let client = self.clients.create(Some(sales_channel_id));

        // 1. Issuers; a rejected key means nothing MultiSafepay-specific can be shown
        let issuers = match client.issuers_by_gateway_code(Gateway::Ideal.gateway_code()).await {
            Ok(issuers) => issuers,
            Err(e) if e.is_invalid_api_key() => {
                warn!(%sales_channel_id, "MultiSafepay API key rejected, skipping checkout data");
                return Ok(None);
            }
            Err(e) => {
                warn!(%sales_channel_id, error = %e, "Could not load iDEAL issuers");
                Vec::new()
            }
        };

        let handler = context.handler_identifier();
        let payment_method = &context.payment_method;
        let last_used_issuer = context
            .customer
            .as_ref()
            .and_then(|c| c.last_used_issuer())
            .map(str::to_string);

        // 2. Component payments need a token and the environment
        let component = self.settings.gateway_flag(payment_method, keys::COMPONENT, false);
        let (api_token, env) = if component {
            let token = client.api_token().await?;
            let env = self.settings.environment(Some(sales_channel_id));
            (Some(token), Some(env.as_str().to_string()))
        } else {
            (None, None)
        };

        // 3. Locale of the storefront language
        let language_id = context.sales_channel.language_id;
        let language = self.languages.require(language_id).await?;

        let payment_method_name = if self.registry.find_by_handler(handler) == Some(Gateway::Ideal) {
            Some(ideal_label(&issuers, last_used_issuer.as_deref()))
        } else {
            None
        };

        Ok(Some(MultiSafepayStruct {
            api_token,
            gateway_code: self.registry.gateway_code_for_handler(handler).map(str::to_string),
            env,
            locale: language.short_locale(),
            show_tokenization: self.show_tokenization(context),
            issuers,
            last_used_issuer,
            shopware_compare: version::is_lower_than(&self.platform_version, LEGACY_TEMPLATE_VERSION),
            payment_method_name,
            current_payment_method_id: payment_method.id.simple().to_string(),
        }))
    }

    fn show_tokenization(&self, context: &SalesChannelContext) -> bool {
        if context.is_guest() {
            return false;
        }
        if !self.registry.supports(context.handler_identifier(), Capability::Tokenization) {
            return false;
        }
        self.settings
            .gateway_flag(&context.payment_method, keys::TOKENIZATION, false)
    }
}

fn ideal_label(issuers: &[Issuer], last_used_issuer: Option<&str>) -> String {
    let name = Gateway::Ideal.name();
    last_used_issuer
        .and_then(|code| issuers.iter().find(|issuer| issuer.code == code))
        .map(|issuer| format!("{} ({})", name, issuer.description))
        .unwrap_or_else(|| name.to_string())
}

#[async_trait]
impl PageSubscriber for CheckoutConfirmTemplateSubscriber {
    fn subscribed_events(&self) -> &'static [PageKind] {
        &[PageKind::CheckoutConfirm, PageKind::AccountEditOrder]
    }

    async fn on_page_loaded(&self, event: &mut PageLoadedEvent) -> Result<(), SubscriberError> {
        let Some(data) = self.build_struct(&event.context).await? else {
            return Ok(());
        };
        debug!(
            payment_method = %data.current_payment_method_id,
            issuers = data.issuers.len(),
            "Adding MultiSafepay checkout data"
        );
        event.page.add_extension(EXTENSION_NAME, serde_json::to_value(data)?);
        Ok(())
    }
}
