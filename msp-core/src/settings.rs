use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use msp_shared::Masked;

use crate::context::PaymentMethod;

pub const LIVE_ENVIRONMENT: &str = "live";
pub const TEST_ENVIRONMENT: &str = "test";

/// Keys of the per-gateway settings stored on a payment method.
pub mod keys {
    pub const COMPONENT: &str = "component";
    pub const TOKENIZATION: &str = "tokenization";
    pub const GATEWAY_CODE: &str = "gateway_code";
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Live,
    #[default]
    Test,
}

impl Environment {
    /// Only the exact `live` token selects the live environment.
    pub fn from_setting(value: &str) -> Self {
        if value == LIVE_ENVIRONMENT {
            Environment::Live
        } else {
            Environment::Test
        }
    }

    pub fn is_live(&self) -> bool {
        matches!(self, Environment::Live)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Live => LIVE_ENVIRONMENT,
            Environment::Test => TEST_ENVIRONMENT,
        }
    }
}

/// Merchant configuration, resolved per sales channel.
///
/// `None` as sales channel id reads the global defaults.
pub trait SettingsService: Send + Sync {
    fn api_key(&self, sales_channel_id: Option<Uuid>) -> Masked<String>;

    fn environment(&self, sales_channel_id: Option<Uuid>) -> Environment;

    fn is_live_mode(&self, sales_channel_id: Option<Uuid>) -> bool {
        self.environment(sales_channel_id).is_live()
    }

    /// Seconds a created payment link stays valid, if configured.
    fn time_active(&self, sales_channel_id: Option<Uuid>) -> Option<u64>;

    fn gateway_setting(&self, payment_method: &PaymentMethod, key: &str) -> Option<Value> {
        payment_method.custom_fields.get(key).cloned()
    }

    /// Gateway setting read as a flag. Strings `"1"`/`"true"` and non-zero numbers count as set.
    fn gateway_flag(&self, payment_method: &PaymentMethod, key: &str, default: bool) -> bool {
        match self.gateway_setting(payment_method, key) {
            Some(Value::Bool(flag)) => flag,
            Some(Value::Number(n)) => n.as_f64().map(|v| v != 0.0).unwrap_or(default),
            Some(Value::String(s)) => matches!(s.as_str(), "1" | "true"),
            Some(Value::Null) | None => default,
            Some(_) => true,
        }
    }
}
