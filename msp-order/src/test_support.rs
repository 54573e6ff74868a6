use chrono::Utc;
use serde_json::Map;
use uuid::Uuid;

use msp_core::{
    Address, Customer, LineItemKind, Order, OrderCustomer, OrderLineItem, PaymentMethod, SalesChannel,
    SalesChannelContext, ShippingCosts,
};

use crate::models::PaymentTransaction;

fn line_item(kind: LineItemKind, label: &str, number: Option<&str>, quantity: u32, unit_price: i64, tax_rate: f64) -> OrderLineItem {
    OrderLineItem {
        id: Uuid::new_v4(),
        kind,
        label: label.to_string(),
        description: None,
        product_number: number.map(str::to_string),
        quantity,
        unit_price,
        tax_rate,
        weight: None,
    }
}

pub fn address() -> Address {
    Address {
        first_name: "Jan".to_string(),
        last_name: "Jansen".to_string(),
        street: "Kraanspoor 39C".to_string(),
        zip_code: "1033SC".to_string(),
        city: "Amsterdam".to_string(),
        country_iso: "NL".to_string(),
        phone_number: Some("0208500500".to_string()),
        company: None,
    }
}

/// Two products, a promotion and shipping; totals 59.25 gross.
pub fn order() -> Order {
    Order {
        id: Uuid::new_v4(),
        order_number: "10001".to_string(),
        amount_total: 5925,
        line_items: vec![
            line_item(LineItemKind::Product, "T-Shirt", Some("SW-1001"), 2, 2420, 21.0),
            line_item(LineItemKind::Product, "Book", Some("SW-1002"), 1, 1090, 9.0),
            line_item(LineItemKind::Promotion, "Summer sale", None, 1, -500, 21.0),
        ],
        shipping_costs: ShippingCosts { unit_price: 495, tax_rate: 21.0 },
        shipping_method_name: Some("Standard".to_string()),
        order_customer: OrderCustomer {
            customer_id: None,
            customer_number: "C-42".to_string(),
            first_name: "Jan".to_string(),
            last_name: "Jansen".to_string(),
            email: "jan@example.com".to_string(),
        },
        billing_address: address(),
        shipping_address: None,
        created_at: Utc::now(),
    }
}

pub fn transaction() -> PaymentTransaction {
    PaymentTransaction {
        order_transaction_id: Uuid::new_v4(),
        order: order(),
        return_url: "https://shop.example.com/payment/finalize-transaction?_sw_payment_token=abc".to_string(),
    }
}

pub fn payment_method(handler: &str) -> PaymentMethod {
    PaymentMethod {
        id: Uuid::new_v4(),
        name: "Payment".to_string(),
        handler_identifier: handler.to_string(),
        active: true,
        custom_fields: Map::new(),
    }
}

pub fn context_with_handler(currency: &str, handler: &str) -> SalesChannelContext {
    SalesChannelContext {
        sales_channel: SalesChannel {
            id: Uuid::new_v4(),
            name: "Storefront".to_string(),
            language_id: Uuid::new_v4(),
            currency_iso: currency.to_string(),
        },
        customer: Some(Customer {
            id: Uuid::new_v4(),
            customer_number: "C-42".to_string(),
            first_name: "Jan".to_string(),
            last_name: "Jansen".to_string(),
            email: "jan@example.com".to_string(),
            guest: false,
            custom_fields: Map::new(),
        }),
        payment_method: payment_method(handler),
    }
}

pub fn context(currency: &str) -> SalesChannelContext {
    context_with_handler(currency, "multisafepay.handler.ideal")
}
