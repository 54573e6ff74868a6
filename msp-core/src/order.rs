use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of a line item as stored by the platform
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LineItemKind {
    Product,
    Promotion,
    Custom,
    Credit,
}

/// A single line on a placed order. Prices are gross, in minor units.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLineItem {
    pub id: Uuid,
    pub kind: LineItemKind,
    pub label: String,
    pub description: Option<String>,
    pub product_number: Option<String>,
    pub quantity: u32,
    pub unit_price: i64,
    /// Tax rate in percent, e.g. `21.0`
    pub tax_rate: f64,
    pub weight: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShippingCosts {
    pub unit_price: i64,
    pub tax_rate: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Address {
    pub first_name: String,
    pub last_name: String,
    pub street: String,
    pub zip_code: String,
    pub city: String,
    pub country_iso: String,
    pub phone_number: Option<String>,
    pub company: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCustomer {
    pub customer_id: Option<Uuid>,
    pub customer_number: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

/// A placed order as handed over by the platform checkout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: Uuid,
    pub order_number: String,
    /// Gross total in minor units
    pub amount_total: i64,
    pub line_items: Vec<OrderLineItem>,
    pub shipping_costs: ShippingCosts,
    pub shipping_method_name: Option<String>,
    pub order_customer: OrderCustomer,
    pub billing_address: Address,
    pub shipping_address: Option<Address>,
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Delivery goes to the shipping address when one differs from billing.
    pub fn delivery_address(&self) -> &Address {
        self.shipping_address.as_ref().unwrap_or(&self.billing_address)
    }
}
