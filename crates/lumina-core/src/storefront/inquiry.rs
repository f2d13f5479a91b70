//! Order inquiry text.
//!
//! Ordering is handled outside the engine by a messaging or form service;
//! this only composes the message the shopper sends there and the WhatsApp
//! link that pre-fills it.

use url::Url;

use crate::catalog::{DEFAULT_SIZE, Product, SIZES};
use crate::error::{LuminaError, Result};

const WHATSAPP_BASE_URL: &str = "https://wa.me";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderInquiry {
    /// Name the message greets.
    pub shop_name: String,
    pub product_name: String,
    pub price: String,
    pub size: String,
    pub color: String,
}

impl OrderInquiry {
    /// Builds an inquiry, defaulting to size `M` and the product's first color.
    pub fn for_product(
        shop_name: &str,
        product: &Product,
        size: Option<&str>,
        color: Option<&str>,
    ) -> Result<Self> {
        let size = match size {
            Some(wanted) => SIZES
                .iter()
                .find(|size| size.eq_ignore_ascii_case(wanted.trim()))
                .ok_or_else(|| LuminaError::not_found("size", wanted))?,
            None => &DEFAULT_SIZE,
        };

        let color = match color {
            Some(wanted) => product
                .colors
                .iter()
                .find(|color| color.eq_ignore_ascii_case(wanted.trim()))
                .map(String::as_str)
                .ok_or_else(|| LuminaError::not_found("color", wanted))?,
            None => product
                .default_color()
                .ok_or_else(|| LuminaError::not_found("color", &product.id))?,
        };

        Ok(Self {
            shop_name: shop_name.to_string(),
            product_name: product.name.clone(),
            price: product.price.clone(),
            size: size.to_string(),
            color: color.to_string(),
        })
    }

    /// Message body for the external messaging service.
    pub fn message(&self) -> String {
        format!(
            "Hi {}! I'd like to order: \n\nProduct: {}\nSize: {}\nColor: {}\nPrice: {}",
            self.shop_name, self.product_name, self.size, self.color, self.price
        )
    }

    /// `wa.me` link that opens a chat with `number`, the message pre-filled.
    ///
    /// Only the digits of `number` are kept, so `+1 (234) 567-890` works.
    pub fn whatsapp_url(&self, number: &str) -> Result<Url> {
        let digits: String = number.chars().filter(char::is_ascii_digit).collect();
        if digits.is_empty() {
            return Err(LuminaError::config(format!(
                "WhatsApp number '{number}' has no digits"
            )));
        }

        let base = format!("{WHATSAPP_BASE_URL}/{digits}");
        Url::parse_with_params(&base, &[("text", self.message())])
            .map_err(|e| LuminaError::internal(format!("Invalid WhatsApp link: {e}")))
    }
}
