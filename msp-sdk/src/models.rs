use serde::{Deserialize, Serialize};

// ============================================================================
// Order request
// ============================================================================

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OrderType {
    /// Customer is sent to the hosted payment page
    Redirect,
    /// Payment is started without the payment page (e.g. iDEAL with a chosen issuer)
    Direct,
}

/// Body of `POST /orders`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderRequest {
    #[serde(rename = "type")]
    pub order_type: OrderType,
    pub order_id: String,
    pub gateway: String,
    pub currency: String,
    /// Amount in minor units
    pub amount: i64,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_options: Option<PaymentOptions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer: Option<CustomerDetails>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery: Option<CustomerDetails>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shopping_cart: Option<ShoppingCart>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checkout_options: Option<CheckoutOptions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seconds_active: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plugin: Option<PluginDetails>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gateway_info: Option<GatewayInfo>,
}

impl OrderRequest {
    pub fn new(order_type: OrderType, order_id: impl Into<String>, currency: impl Into<String>, amount: i64) -> Self {
        Self {
            order_type,
            order_id: order_id.into(),
            gateway: String::new(),
            currency: currency.into(),
            amount,
            description: String::new(),
            payment_options: None,
            customer: None,
            delivery: None,
            shopping_cart: None,
            checkout_options: None,
            seconds_active: None,
            plugin: None,
            gateway_info: None,
        }
    }

    /// Attach the cart together with the tax tables its items refer to.
    pub fn add_shopping_cart(&mut self, cart: ShoppingCart) {
        self.checkout_options = Some(CheckoutOptions::from_shopping_cart(&cart));
        self.shopping_cart = Some(cart);
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaymentOptions {
    pub notification_url: String,
    pub notification_method: String,
    pub redirect_url: String,
    pub cancel_url: String,
    pub close_window: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CustomerDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forwarded_ip: Option<String>,
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    pub address1: String,
    pub house_number: String,
    pub zip_code: String,
    pub city: String,
    pub country: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub referrer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PluginDetails {
    pub shop: String,
    pub shop_version: String,
    pub plugin_version: String,
    pub shop_root_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GatewayInfo {
    pub issuer_id: String,
}

// ============================================================================
// Shopping cart
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Weight {
    pub unit: String,
    pub value: f64,
}

/// One line in the shopping cart. `unit_price` is the price excluding tax in
/// major units; the tax is applied through the referenced tax table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartItem {
    pub name: String,
    pub description: String,
    pub unit_price: f64,
    pub quantity: u32,
    pub merchant_item_id: String,
    pub tax_table_selector: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<Weight>,
    #[serde(skip)]
    pub tax_rate: f64,
}

impl CartItem {
    /// Build an item from a gross unit price in minor units and a tax rate in percent.
    pub fn from_gross(
        name: impl Into<String>,
        merchant_item_id: impl Into<String>,
        gross_unit_price: i64,
        quantity: u32,
        tax_rate: f64,
    ) -> Self {
        let gross = gross_unit_price as f64 / 100.0;
        let net = gross / (1.0 + tax_rate / 100.0);
        Self {
            name: name.into(),
            description: String::new(),
            unit_price: round_to(net, 10),
            quantity,
            merchant_item_id: merchant_item_id.into(),
            tax_table_selector: tax_rate_label(tax_rate),
            weight: None,
            tax_rate,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_weight_kg(mut self, weight: Option<f64>) -> Self {
        self.weight = weight.map(|value| Weight { unit: "KG".to_string(), value });
        self
    }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// `21.0` becomes `"21"`, `5.5` stays `"5.5"`.
pub fn tax_rate_label(tax_rate: f64) -> String {
    format!("{}", tax_rate)
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ShoppingCart {
    pub items: Vec<CartItem>,
}

impl ShoppingCart {
    pub fn new(items: Vec<CartItem>) -> Self {
        Self { items }
    }

    /// Cart total including tax, in minor units.
    pub fn gross_total(&self) -> i64 {
        self.items
            .iter()
            .map(|item| {
                let gross = item.unit_price * (1.0 + item.tax_rate / 100.0);
                (gross * 100.0).round() as i64 * item.quantity as i64
            })
            .sum()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TaxRule {
    pub rate: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TaxTable {
    pub name: String,
    pub standalone: bool,
    pub rules: Vec<TaxRule>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TaxTables {
    pub alternate: Vec<TaxTable>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CheckoutOptions {
    pub tax_tables: TaxTables,
}

impl CheckoutOptions {
    /// One alternate tax table per distinct rate, in order of first appearance.
    pub fn from_shopping_cart(cart: &ShoppingCart) -> Self {
        let mut alternate: Vec<TaxTable> = Vec::new();
        for item in &cart.items {
            if alternate.iter().any(|t| t.name == item.tax_table_selector) {
                continue;
            }
            alternate.push(TaxTable {
                name: item.tax_table_selector.clone(),
                standalone: true,
                rules: vec![TaxRule { rate: round_to(item.tax_rate / 100.0, 4) }],
            });
        }
        Self { tax_tables: TaxTables { alternate } }
    }
}

// ============================================================================
// Responses
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Issuer {
    pub code: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiToken {
    pub api_token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayListing {
    pub id: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderResponse {
    pub order_id: String,
    #[serde(default)]
    pub payment_url: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub transaction_id: Option<serde_json::Value>,
}

/// Wrapper every JSON response of the API comes in
#[derive(Debug, Deserialize)]
pub struct ApiEnvelope {
    pub success: bool,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
    pub error_code: Option<i64>,
    pub error_info: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cart_item_from_gross_price() {
        let item = CartItem::from_gross("Shirt", "SW-1", 1210, 2, 21.0);
        assert_eq!(item.unit_price, 10.0);
        assert_eq!(item.tax_table_selector, "21");
        assert_eq!(item.quantity, 2);
    }

    #[test]
    fn test_checkout_options_dedupe_rates() {
        let cart = ShoppingCart::new(vec![
            CartItem::from_gross("A", "a", 1210, 1, 21.0),
            CartItem::from_gross("B", "b", 1090, 1, 9.0),
            CartItem::from_gross("C", "c", 2420, 1, 21.0),
        ]);
        let options = CheckoutOptions::from_shopping_cart(&cart);
        let names: Vec<&str> = options.tax_tables.alternate.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["21", "9"]);
        assert_eq!(options.tax_tables.alternate[0].rules[0].rate, 0.21);
    }

    #[test]
    fn test_order_request_serialization() {
        let mut request = OrderRequest::new(OrderType::Redirect, "10001", "EUR", 1210);
        request.gateway = "IDEAL".to_string();
        request.add_shopping_cart(ShoppingCart::new(vec![CartItem::from_gross("A", "a", 1210, 1, 21.0)]));

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["type"], "redirect");
        assert_eq!(json["gateway"], "IDEAL");
        assert_eq!(json["shopping_cart"]["items"][0]["tax_table_selector"], "21");
        assert!(json["shopping_cart"]["items"][0].get("tax_rate").is_none());
        assert_eq!(json["checkout_options"]["tax_tables"]["alternate"][0]["name"], "21");
        assert!(json.get("customer").is_none());
    }

    #[test]
    fn test_gross_total() {
        let cart = ShoppingCart::new(vec![
            CartItem::from_gross("A", "a", 1210, 2, 21.0),
            CartItem::from_gross("Shipping", "msp-shipping", 495, 1, 21.0),
        ]);
        assert_eq!(cart.gross_total(), 2915);
    }
}
