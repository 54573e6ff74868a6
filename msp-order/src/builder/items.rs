use msp_core::{LineItemKind, Order, OrderLineItem};
use msp_sdk::CartItem;

use super::{BuilderError, ShoppingCartItemBuilder};

/// Merchant item id used for the shipping line.
pub const SHIPPING_ITEM_ID: &str = "msp-shipping";

/// Product lines and non-negative custom lines
pub struct OrderItemBuilder;

impl ShoppingCartItemBuilder for OrderItemBuilder {
    fn build(&self, order: &Order, _currency: &str) -> Result<Vec<CartItem>, BuilderError> {
        order
            .line_items
            .iter()
            .filter(|item| match item.kind {
                LineItemKind::Product => true,
                LineItemKind::Custom => item.unit_price >= 0,
                _ => false,
            })
            .map(|item| {
                validate_quantity(item)?;
                if item.unit_price < 0 {
                    return Err(BuilderError::InvalidLineItem {
                        id: item.id.to_string(),
                        reason: "negative product price".to_string(),
                    });
                }
                Ok(cart_item(item))
            })
            .collect()
    }
}

/// Promotions, credits and negative custom lines, sent with a negative unit price
pub struct DiscountItemBuilder;

impl ShoppingCartItemBuilder for DiscountItemBuilder {
    fn build(&self, order: &Order, _currency: &str) -> Result<Vec<CartItem>, BuilderError> {
        order
            .line_items
            .iter()
            .filter(|item| match item.kind {
                LineItemKind::Promotion | LineItemKind::Credit => true,
                LineItemKind::Custom => item.unit_price < 0,
                LineItemKind::Product => false,
            })
            .map(|item| {
                validate_quantity(item)?;
                let mut discounted = item.clone();
                discounted.unit_price = -item.unit_price.abs();
                Ok(cart_item(&discounted))
            })
            .collect()
    }
}

/// Single line carrying the order's shipping costs
pub struct ShippingItemBuilder;

impl ShoppingCartItemBuilder for ShippingItemBuilder {
    fn build(&self, order: &Order, _currency: &str) -> Result<Vec<CartItem>, BuilderError> {
        let name = order
            .shipping_method_name
            .clone()
            .unwrap_or_else(|| "Shipping".to_string());
        let costs = &order.shipping_costs;

        Ok(vec![CartItem::from_gross(
            name,
            SHIPPING_ITEM_ID,
            costs.unit_price,
            1,
            costs.tax_rate,
        )
        .with_description("Shipping")])
    }
}

fn validate_quantity(item: &OrderLineItem) -> Result<(), BuilderError> {
    if item.quantity == 0 {
        return Err(BuilderError::InvalidLineItem {
            id: item.id.to_string(),
            reason: "quantity is zero".to_string(),
        });
    }
    Ok(())
}

fn cart_item(item: &OrderLineItem) -> CartItem {
    let merchant_item_id = item
        .product_number
        .clone()
        .unwrap_or_else(|| item.id.simple().to_string());

    CartItem::from_gross(
        item.label.clone(),
        merchant_item_id,
        item.unit_price,
        item.quantity,
        item.tax_rate,
    )
    .with_description(item.description.clone().unwrap_or_default())
    .with_weight_kg(item.weight)
}
