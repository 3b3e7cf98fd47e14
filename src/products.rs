//! Products

use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    cart::Selection,
    ids::TypedId,
    pricing::{PriceError, money_from_decimal},
};

/// Product Id
pub type ProductId = TypedId<Product<'static>>;

/// Errors raised while decoding a catalog record into a [`Product`].
#[derive(Debug, Error, PartialEq)]
pub enum ProductError {
    /// The record carries a price that cannot be represented.
    #[error("product {id} has an invalid price: {source}")]
    InvalidPrice {
        /// Id of the offending product.
        id: ProductId,

        /// Underlying price conversion error.
        source: PriceError,
    },
}

/// Product record as served by the catalog endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    /// Product id
    pub id: ProductId,

    /// Display name
    pub title: String,

    /// Long description
    #[serde(default)]
    pub description: String,

    /// Unit price in major units
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,

    /// Image references, first one is the primary image
    #[serde(default)]
    pub images: Vec<String>,

    /// Available sizes
    #[serde(default)]
    pub sizes: Vec<String>,

    /// Available colors
    #[serde(default)]
    pub colors: Vec<String>,

    /// Catalog category, if the API reports one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl ProductRecord {
    /// Decode the record into a product priced in `currency`.
    ///
    /// # Errors
    ///
    /// Returns [`ProductError::InvalidPrice`] if the price is negative or too large.
    pub fn into_product(self, currency: &Currency) -> Result<Product<'_>, ProductError> {
        let price = match money_from_decimal(self.price, currency) {
            Ok(price) => price,
            Err(source) => {
                return Err(ProductError::InvalidPrice {
                    id: self.id,
                    source,
                });
            }
        };

        Ok(Product {
            id: self.id,
            title: self.title,
            description: self.description,
            price,
            images: self.images,
            sizes: self.sizes,
            colors: self.colors,
            category: self.category,
        })
    }
}

/// Product
#[derive(Debug, Clone, PartialEq)]
pub struct Product<'a> {
    /// Product id
    pub id: ProductId,

    /// Product title
    pub title: String,

    /// Product description
    pub description: String,

    /// Product unit price
    pub price: Money<'a, Currency>,

    /// Product images
    pub images: Vec<String>,

    /// Product sizes
    pub sizes: Vec<String>,

    /// Product colors
    pub colors: Vec<String>,

    /// Product category
    pub category: Option<String>,
}

impl Product<'_> {
    /// The primary image reference, if the product has any images.
    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }

    /// The selection a product card starts with: first size, first color, one unit.
    #[must_use]
    pub fn default_selection(&self) -> Selection {
        Selection {
            size: self.sizes.first().cloned(),
            color: self.colors.first().cloned(),
            quantity: 1,
        }
    }
}
