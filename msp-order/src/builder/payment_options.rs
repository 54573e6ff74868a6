use msp_core::SalesChannelContext;
use msp_sdk::{OrderRequest, PaymentOptions};

use super::{BuilderError, OrderRequestBuilder};
use crate::models::{PaymentTransaction, RequestDataBag};

/// Path the API posts status notifications to.
pub const NOTIFICATION_PATH: &str = "/multisafepay/notification";

pub struct PaymentOptionsBuilder {
    shop_root_url: String,
}

impl PaymentOptionsBuilder {
    pub fn new(shop_root_url: impl Into<String>) -> Self {
        Self {
            shop_root_url: shop_root_url.into().trim_end_matches('/').to_string(),
        }
    }
}

impl OrderRequestBuilder for PaymentOptionsBuilder {
    fn build(
        &self,
        request: &mut OrderRequest,
        transaction: &PaymentTransaction,
        _data_bag: &RequestDataBag,
        _context: &SalesChannelContext,
    ) -> Result<(), BuilderError> {
        let separator = if transaction.return_url.contains('?') { '&' } else { '?' };

        request.payment_options = Some(PaymentOptions {
            notification_url: format!("{}{}", self.shop_root_url, NOTIFICATION_PATH),
            notification_method: "POST".to_string(),
            redirect_url: transaction.return_url.clone(),
            cancel_url: format!("{}{}cancel=1", transaction.return_url, separator),
            close_window: false,
        });
        Ok(())
    }
}
