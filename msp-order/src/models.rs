use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use msp_core::Order;

/// Payment transaction handed over by the platform checkout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentTransaction {
    pub order_transaction_id: Uuid,
    pub order: Order,
    /// Where the customer comes back after paying
    pub return_url: String,
}

/// Form data posted with the checkout request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestDataBag(Map<String, Value>);

impl RequestDataBag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.0.insert(key.to_string(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Non-empty string value for `key`
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0
            .get(key)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }
}

/// Installation details reported along with every order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformInfo {
    pub shop: String,
    pub shop_version: String,
    pub plugin_version: String,
    pub shop_root_url: String,
}

/// Transaction state derived from the order status reported by the API
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionStatus {
    Paid,
    Pending,
    Cancelled,
    Failed,
    Refunded,
    Unknown,
}

impl TransactionStatus {
    pub fn from_api_status(status: &str) -> Self {
        match status {
            "completed" | "shipped" => TransactionStatus::Paid,
            "initialized" | "uncleared" | "reserved" => TransactionStatus::Pending,
            "canceled" | "cancelled" | "void" | "expired" => TransactionStatus::Cancelled,
            "declined" | "chargedback" => TransactionStatus::Failed,
            "refunded" | "partial_refunded" => TransactionStatus::Refunded,
            _ => TransactionStatus::Unknown,
        }
    }

    /// Whether the customer may continue to the order confirmation page
    pub fn is_successful(&self) -> bool {
        matches!(self, TransactionStatus::Paid | TransactionStatus::Pending)
    }
}
