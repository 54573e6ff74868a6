#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::{json, Map, Value};
use tower::ServiceExt;
use uuid::Uuid;

use msp_api::{
    app,
    middleware::AdminClaims,
    state::{AppState, AuthConfig},
    storefront::{CheckoutConfirmTemplateSubscriber, EventDispatcher, PageSubscriber},
};
use msp_core::{
    Address, Environment, GatewayRegistry, Language, LineItemKind, Locale, Order, OrderCustomer,
    OrderLineItem, PaymentMethod, SalesChannel, SettingsService, ShippingCosts,
};
use msp_order::{OrderRequestService, PaymentHandler, PlatformInfo};
use msp_sdk::{
    ApiError, ApiResult, ClientFactory, GatewayListing, Issuer, OrderRequest, OrderResponse, PaymentApi,
};
use msp_shared::Masked;
use msp_store::InMemoryRepository;

pub const SECRET: &str = "test-secret";
pub const VALID_KEY: &str = "valid-key";

// ============================================================================
// Fakes
// ============================================================================

/// Accepts only [`VALID_KEY`]; everything else is rejected like the real API does.
pub struct FakeApi {
    api_key: String,
    token_fails: bool,
    order_status: &'static str,
    created: Arc<Mutex<Vec<OrderRequest>>>,
}

impl FakeApi {
    fn check_key(&self) -> ApiResult<()> {
        if self.api_key != VALID_KEY {
            return Err(ApiError::InvalidApiKey);
        }
        Ok(())
    }
}

#[async_trait]
impl PaymentApi for FakeApi {
    async fn issuers_by_gateway_code(&self, _gateway_code: &str) -> ApiResult<Vec<Issuer>> {
        self.check_key()?;
        Ok(vec![Issuer { code: "0031".to_string(), description: "ABN AMRO".to_string() }])
    }

    async fn api_token(&self) -> ApiResult<String> {
        if self.token_fails {
            return Err(ApiError::Api { code: 500, message: "Token service unavailable".to_string() });
        }
        Ok("component-token".to_string())
    }

    async fn gateways(&self) -> ApiResult<Vec<GatewayListing>> {
        self.check_key()?;
        Ok(vec![GatewayListing { id: "IDEAL".to_string(), description: "iDEAL".to_string() }])
    }

    async fn create_order(&self, request: &OrderRequest) -> ApiResult<OrderResponse> {
        self.check_key()?;
        self.created.lock().unwrap().push(request.clone());
        Ok(OrderResponse {
            order_id: request.order_id.clone(),
            payment_url: Some(format!("https://payv2.multisafepay.com/connect/{}", request.order_id)),
            status: Some("initialized".to_string()),
            transaction_id: None,
        })
    }

    async fn get_order(&self, order_id: &str) -> ApiResult<OrderResponse> {
        self.check_key()?;
        Ok(OrderResponse {
            order_id: order_id.to_string(),
            payment_url: None,
            status: Some(self.order_status.to_string()),
            transaction_id: None,
        })
    }
}

pub struct FakeClients {
    pub stored_key: String,
    pub token_fails: bool,
    pub order_status: &'static str,
    pub created: Arc<Mutex<Vec<OrderRequest>>>,
}

impl FakeClients {
    pub fn new(stored_key: &str) -> Self {
        Self {
            stored_key: stored_key.to_string(),
            token_fails: false,
            order_status: "completed",
            created: Arc::default(),
        }
    }

    fn api(&self, api_key: &str) -> Arc<dyn PaymentApi> {
        Arc::new(FakeApi {
            api_key: api_key.to_string(),
            token_fails: self.token_fails,
            order_status: self.order_status,
            created: self.created.clone(),
        })
    }
}

impl ClientFactory for FakeClients {
    fn create(&self, _sales_channel_id: Option<Uuid>) -> Arc<dyn PaymentApi> {
        self.api(&self.stored_key)
    }

    fn create_with_data(&self, api_key: &str, _environment: &str) -> Arc<dyn PaymentApi> {
        self.api(api_key)
    }
}

pub struct TestSettings;

impl SettingsService for TestSettings {
    fn api_key(&self, _sales_channel_id: Option<Uuid>) -> Masked<String> {
        Masked::from(VALID_KEY)
    }

    fn environment(&self, _sales_channel_id: Option<Uuid>) -> Environment {
        Environment::Test
    }

    fn time_active(&self, _sales_channel_id: Option<Uuid>) -> Option<u64> {
        None
    }
}

// ============================================================================
// Fixtures
// ============================================================================

pub struct TestApp {
    pub router: Router,
    pub sales_channel_id: Uuid,
    pub language_id: Uuid,
    pub sales_channels: Arc<InMemoryRepository<SalesChannel>>,
    pub created_orders: Arc<Mutex<Vec<OrderRequest>>>,
}

pub fn payment_method(handler: &str, custom_fields: Value) -> PaymentMethod {
    PaymentMethod {
        id: Uuid::new_v4(),
        name: handler.rsplit('.').next().unwrap_or(handler).to_string(),
        handler_identifier: handler.to_string(),
        active: true,
        custom_fields: match custom_fields {
            Value::Object(map) => map,
            _ => Map::new(),
        },
    }
}

pub async fn test_app(methods: Vec<PaymentMethod>, stored_key: &str) -> TestApp {
    test_app_with(methods, FakeClients::new(stored_key)).await
}

pub async fn test_app_with(methods: Vec<PaymentMethod>, fake_clients: FakeClients) -> TestApp {
    let sales_channel_id = Uuid::new_v4();
    let language_id = Uuid::new_v4();
    let created_orders = fake_clients.created.clone();

    let settings: Arc<dyn SettingsService> = Arc::new(TestSettings);
    let clients: Arc<dyn ClientFactory> = Arc::new(fake_clients);
    let registry = Arc::new(GatewayRegistry::default());

    let languages = Arc::new(InMemoryRepository::with_languages(vec![Language {
        id: language_id,
        name: "Deutsch".to_string(),
        locale: Locale { id: Uuid::new_v4(), code: "de-DE".to_string() },
    }]));
    let sales_channels = Arc::new(InMemoryRepository::<SalesChannel>::new());
    sales_channels
        .insert(sales_channel_id, sales_channel(sales_channel_id, language_id))
        .await;

    let checkout: Arc<dyn PageSubscriber> = Arc::new(CheckoutConfirmTemplateSubscriber::new(
        clients.clone(),
        languages,
        settings.clone(),
        registry.clone(),
        "6.4.20.0",
    ));

    let requests = OrderRequestService::with_default_builders(
        (*registry).clone(),
        settings,
        PlatformInfo {
            shop: "Shopware".to_string(),
            shop_version: "6.4.20.0".to_string(),
            plugin_version: "2.5.0".to_string(),
            shop_root_url: "https://shop.example.com".to_string(),
        },
    );

    let state = AppState {
        registry,
        payment_methods: Arc::new(InMemoryRepository::with_payment_methods(methods)),
        sales_channels: sales_channels.clone(),
        clients: clients.clone(),
        events: Arc::new(EventDispatcher::new(vec![checkout])),
        payments: Arc::new(PaymentHandler::new(requests, clients)),
        auth: AuthConfig { secret: SECRET.to_string() },
    };

    TestApp {
        router: app(state),
        sales_channel_id,
        language_id,
        sales_channels,
        created_orders,
    }
}

pub fn sales_channel(id: Uuid, language_id: Uuid) -> SalesChannel {
    SalesChannel {
        id,
        name: "Storefront DE".to_string(),
        language_id,
        currency_iso: "EUR".to_string(),
    }
}

/// Payment transaction for order 10001: one product and shipping, 29.95 gross.
pub fn transaction() -> Value {
    let order = Order {
        id: Uuid::new_v4(),
        order_number: "10001".to_string(),
        amount_total: 2995,
        line_items: vec![OrderLineItem {
            id: Uuid::new_v4(),
            kind: LineItemKind::Product,
            label: "Hoodie".to_string(),
            description: None,
            product_number: Some("SW-2001".to_string()),
            quantity: 1,
            unit_price: 2500,
            tax_rate: 19.0,
            weight: None,
        }],
        shipping_costs: ShippingCosts { unit_price: 495, tax_rate: 19.0 },
        shipping_method_name: Some("DHL".to_string()),
        order_customer: OrderCustomer {
            customer_id: None,
            customer_number: "C-7".to_string(),
            first_name: "Anna".to_string(),
            last_name: "Schmidt".to_string(),
            email: "anna@example.com".to_string(),
        },
        billing_address: Address {
            first_name: "Anna".to_string(),
            last_name: "Schmidt".to_string(),
            street: "Hauptstrasse 5".to_string(),
            zip_code: "10115".to_string(),
            city: "Berlin".to_string(),
            country_iso: "DE".to_string(),
            phone_number: None,
            company: None,
        },
        shipping_address: None,
        created_at: Utc::now(),
    };

    json!({
        "order_transaction_id": Uuid::new_v4(),
        "order": order,
        "return_url": "https://shop.example.com/payment/finalize-transaction?_sw_payment_token=abc",
    })
}

pub fn token(role: &str, permissions: &[&str]) -> String {
    let claims = AdminClaims {
        sub: "admin-1".to_string(),
        email: "admin@example.com".to_string(),
        role: role.to_string(),
        permissions: permissions.iter().map(|p| p.to_string()).collect(),
        exp: (Utc::now() + Duration::hours(1)).timestamp() as usize,
    };
    encode(&Header::default(), &claims, &EncodingKey::from_secret(SECRET.as_bytes())).unwrap()
}

pub fn admin_token() -> String {
    token("SUPER_ADMIN", &[])
}

// ============================================================================
// Request helpers
// ============================================================================

pub async fn post_json(router: &Router, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = builder.body(Body::from(body.to_string())).unwrap();
    send(router, request).await
}

pub async fn get(router: &Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(router, request).await
}

async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or_else(|_| json!(null));
    (status, body)
}
