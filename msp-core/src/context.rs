use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::{CoreError, CoreResult};

/// Custom field on the customer holding the iDEAL issuer picked last time.
pub const LAST_USED_ISSUER_FIELD: &str = "last_used_issuer";

/// A configured storefront within the platform
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesChannel {
    pub id: Uuid,
    pub name: String,
    pub language_id: Uuid,
    pub currency_iso: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    pub id: Uuid,
    pub customer_number: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub guest: bool,
    #[serde(default)]
    pub custom_fields: Map<String, Value>,
}

impl Customer {
    pub fn last_used_issuer(&self) -> Option<&str> {
        self.custom_fields
            .get(LAST_USED_ISSUER_FIELD)
            .and_then(Value::as_str)
    }
}

/// Payment method entity; per-gateway settings live in its custom fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentMethod {
    pub id: Uuid,
    pub name: String,
    pub handler_identifier: String,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default)]
    pub custom_fields: Map<String, Value>,
}

fn default_active() -> bool {
    true
}

impl PaymentMethod {
    /// Inactive payment methods cannot be used at checkout.
    pub fn ensure_active(&self) -> CoreResult<()> {
        if self.active {
            Ok(())
        } else {
            Err(CoreError::ValidationError(format!("Payment method {} is not active", self.name)))
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Locale {
    pub id: Uuid,
    /// BCP 47 style code such as `en-GB`
    pub code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Language {
    pub id: Uuid,
    pub name: String,
    pub locale: Locale,
}

impl Language {
    /// Two-letter language part of the locale code (`en-GB` becomes `en`).
    pub fn short_locale(&self) -> String {
        self.locale.code.chars().take(2).collect()
    }
}

/// Everything the platform knows about the current storefront request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesChannelContext {
    pub sales_channel: SalesChannel,
    pub customer: Option<Customer>,
    pub payment_method: PaymentMethod,
}

impl SalesChannelContext {
    pub fn sales_channel_id(&self) -> Uuid {
        self.sales_channel.id
    }

    pub fn currency_iso(&self) -> &str {
        &self.sales_channel.currency_iso
    }

    pub fn handler_identifier(&self) -> &str {
        &self.payment_method.handler_identifier
    }

    /// No logged in customer counts as a guest.
    pub fn is_guest(&self) -> bool {
        self.customer.as_ref().map(|c| c.guest).unwrap_or(true)
    }
}
