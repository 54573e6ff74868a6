use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use msp_api::{
    app,
    state::{AppState, AuthConfig},
    storefront::{CheckoutConfirmTemplateSubscriber, EventDispatcher, PageSubscriber},
};
use msp_core::{GatewayRegistry, SettingsService};
use msp_order::{OrderRequestService, PaymentHandler, PlatformInfo};
use msp_sdk::{ClientFactory, SdkFactory};
use msp_store::{Config, ConfigSettingsService, InMemoryRepository};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "msp_api=debug,msp_sdk=debug,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load().context("Failed to load config")?;
    tracing::info!(
        port = config.server.port,
        platform = %config.platform.name,
        platform_version = %config.platform.version,
        "Starting MultiSafepay service"
    );

    // Settings and client factory
    let settings: Arc<dyn SettingsService> = Arc::new(ConfigSettingsService::new(
        config.multisafepay.clone(),
        config.sales_channels.clone(),
    ));
    let clients: Arc<dyn ClientFactory> = Arc::new(SdkFactory::new(settings.clone()));
    let registry = Arc::new(GatewayRegistry::default());

    // Seeded repositories
    let payment_methods = Arc::new(InMemoryRepository::with_payment_methods(config.payment_methods.clone()));
    let languages = Arc::new(InMemoryRepository::with_languages(config.languages.clone()));
    let sales_channels = Arc::new(InMemoryRepository::with_sales_channels(&config.sales_channels));
    tracing::info!(
        payment_methods = config.payment_methods.len(),
        languages = config.languages.len(),
        sales_channels = config.sales_channels.len(),
        "Repositories seeded"
    );

    // Checkout payments
    let platform = PlatformInfo {
        shop: config.platform.name.clone(),
        shop_version: config.platform.version.clone(),
        plugin_version: config.platform.plugin_version.clone(),
        shop_root_url: config.platform.base_url.clone(),
    };
    let requests = OrderRequestService::with_default_builders((*registry).clone(), settings.clone(), platform);
    let payments = Arc::new(PaymentHandler::new(requests, clients.clone()));

    // Page subscribers
    let checkout: Arc<dyn PageSubscriber> = Arc::new(CheckoutConfirmTemplateSubscriber::new(
        clients.clone(),
        languages,
        settings,
        registry.clone(),
        config.platform.version.clone(),
    ));
    let events = Arc::new(EventDispatcher::new(vec![checkout]));

    let app_state = AppState {
        registry,
        payment_methods,
        sales_channels,
        clients,
        events,
        payments,
        auth: AuthConfig {
            secret: config.auth.jwt_secret.clone(),
        },
    };

    let app = app(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
