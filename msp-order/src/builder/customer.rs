use msp_core::{Address, SalesChannelContext};
use msp_sdk::{CustomerDetails, OrderRequest};

use super::{BuilderError, OrderRequestBuilder};
use crate::models::{PaymentTransaction, RequestDataBag};

const DEFAULT_LOCALE: &str = "en_US";

/// Billing customer, plus browser details from the checkout request
pub struct CustomerBuilder;

impl OrderRequestBuilder for CustomerBuilder {
    fn build(
        &self,
        request: &mut OrderRequest,
        transaction: &PaymentTransaction,
        data_bag: &RequestDataBag,
        _context: &SalesChannelContext,
    ) -> Result<(), BuilderError> {
        let order = &transaction.order;
        let mut details = address_details(&order.billing_address);

        details.locale = Some(api_locale(data_bag.get_str("locale").unwrap_or(DEFAULT_LOCALE)));
        details.email = Some(order.order_customer.email.clone());
        details.reference = Some(order.order_customer.customer_number.clone());
        details.ip_address = data_bag.get_str("ip_address").map(str::to_string);
        details.forwarded_ip = data_bag.get_str("forwarded_ip").map(str::to_string);
        details.user_agent = data_bag.get_str("user_agent").map(str::to_string);
        details.referrer = data_bag.get_str("referrer").map(str::to_string);

        request.customer = Some(details);
        Ok(())
    }
}

/// Shipping address, falling back to the billing address
pub struct DeliveryBuilder;

impl OrderRequestBuilder for DeliveryBuilder {
    fn build(
        &self,
        request: &mut OrderRequest,
        transaction: &PaymentTransaction,
        _data_bag: &RequestDataBag,
        _context: &SalesChannelContext,
    ) -> Result<(), BuilderError> {
        let order = &transaction.order;
        let mut details = address_details(order.delivery_address());
        details.email = Some(order.order_customer.email.clone());
        request.delivery = Some(details);
        Ok(())
    }
}

fn address_details(address: &Address) -> CustomerDetails {
    let (street, house_number) = split_street(&address.street);
    CustomerDetails {
        first_name: address.first_name.clone(),
        last_name: address.last_name.clone(),
        company_name: address.company.clone(),
        address1: street,
        house_number,
        zip_code: address.zip_code.clone(),
        city: address.city.clone(),
        country: address.country_iso.clone(),
        phone: address.phone_number.clone(),
        ..CustomerDetails::default()
    }
}

/// `nl-NL` → `nl_NL`
fn api_locale(locale: &str) -> String {
    locale.replace('-', "_")
}

/// Split `"Kraanspoor 39C"` into `("Kraanspoor", "39C")`.
///
/// The house number is the trailing run of words starting at the last word
/// that begins with a digit. Streets without a number are returned unchanged.
pub fn split_street(street: &str) -> (String, String) {
    let words: Vec<&str> = street.split_whitespace().collect();
    let position = words
        .iter()
        .rposition(|w| w.chars().next().map(|c| c.is_ascii_digit()).unwrap_or(false));

    match position {
        Some(0) | None => (words.join(" "), String::new()),
        Some(index) => (words[..index].join(" "), words[index..].join(" ")),
    }
}
