use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

use msp_shared::Masked;

use crate::error::{ApiError, ApiResult, INVALID_API_KEY_CODE};
use crate::models::{ApiEnvelope, ApiToken, GatewayListing, Issuer, OrderRequest, OrderResponse};

pub const LIVE_BASE_URL: &str = "https://api.multisafepay.com/v1/json/";
pub const TEST_BASE_URL: &str = "https://testapi.multisafepay.com/v1/json/";

/// The subset of the MultiSafepay API this integration talks to
#[async_trait]
pub trait PaymentApi: Send + Sync {
    /// Issuers (banks) offered for a gateway, e.g. `IDEAL`
    async fn issuers_by_gateway_code(&self, gateway_code: &str) -> ApiResult<Vec<Issuer>>;

    /// Short-lived token for the embedded payment component
    async fn api_token(&self) -> ApiResult<String>;

    /// Gateways enabled for the merchant account
    async fn gateways(&self) -> ApiResult<Vec<GatewayListing>>;

    async fn create_order(&self, request: &OrderRequest) -> ApiResult<OrderResponse>;

    async fn get_order(&self, order_id: &str) -> ApiResult<OrderResponse>;
}

/// JSON-over-HTTP client bound to one API key and environment
pub struct MultiSafepayClient {
    http: reqwest::Client,
    api_key: Masked<String>,
    live: bool,
    base_url: String,
}

impl MultiSafepayClient {
    pub fn new(api_key: Masked<String>, live: bool, http: reqwest::Client) -> Self {
        let base_url = if live { LIVE_BASE_URL } else { TEST_BASE_URL };
        Self {
            http,
            api_key,
            live,
            base_url: base_url.to_string(),
        }
    }

    /// Point the client at another host (sandbox proxies, local stubs).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        self.base_url = base_url;
        self
    }

    pub fn is_live(&self) -> bool {
        self.live
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn api_key(&self) -> &Masked<String> {
        &self.api_key
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "GET MultiSafepay");
        let resp = self
            .http
            .get(url)
            .header("api_key", self.api_key.peek())
            .send()
            .await?;
        Self::read(resp).await
    }

    async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(&self, path: &str, body: &B) -> ApiResult<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "POST MultiSafepay");
        let resp = self
            .http
            .post(url)
            .header("api_key", self.api_key.peek())
            .json(body)
            .send()
            .await?;
        Self::read(resp).await
    }

    async fn read<T: DeserializeOwned>(resp: reqwest::Response) -> ApiResult<T> {
        let status = resp.status();
        let body = resp.text().await?;
        decode_response(status, &body)
    }
}

/// Turn a raw HTTP answer into the payload or the matching [`ApiError`].
pub fn decode_response<T: DeserializeOwned>(status: StatusCode, body: &str) -> ApiResult<T> {
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return Err(ApiError::InvalidApiKey);
    }

    let envelope: ApiEnvelope = serde_json::from_str(body).map_err(|e| {
        ApiError::Decode(format!("HTTP {}: {}", status.as_u16(), e))
    })?;

    if !envelope.success {
        let code = envelope.error_code.unwrap_or(status.as_u16() as i64);
        if code == INVALID_API_KEY_CODE {
            return Err(ApiError::InvalidApiKey);
        }
        return Err(ApiError::Api {
            code,
            message: envelope.error_info.unwrap_or_default(),
        });
    }

    let data = envelope
        .data
        .ok_or_else(|| ApiError::Decode("response has no data".to_string()))?;
    serde_json::from_value(data).map_err(|e| ApiError::Decode(e.to_string()))
}

#[async_trait]
impl PaymentApi for MultiSafepayClient {
    async fn issuers_by_gateway_code(&self, gateway_code: &str) -> ApiResult<Vec<Issuer>> {
        self.get(&format!("issuers/{}", gateway_code)).await
    }

    async fn api_token(&self) -> ApiResult<String> {
        let token: ApiToken = self.get("auth/api_token").await?;
        Ok(token.api_token)
    }

    async fn gateways(&self) -> ApiResult<Vec<GatewayListing>> {
        self.get("gateways").await
    }

    async fn create_order(&self, request: &OrderRequest) -> ApiResult<OrderResponse> {
        self.post("orders", request).await
    }

    async fn get_order(&self, order_id: &str) -> ApiResult<OrderResponse> {
        self.get(&format!("orders/{}", order_id)).await
    }
}
