//! Storefront prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    api::{ApiError, HttpStorefrontApi, StorefrontApi},
    cart::{Cart, CartError, LineItem, Selection},
    catalog::{Catalog, CatalogError, Category, ProductFilter},
    checkout::{CheckoutError, CheckoutOutcome, checkout},
    config::{ApiConfig, CurrencyCode, LogFormat, LoggingConfig},
    ids::RawId,
    orders::{Customer, OrderConfirmation, OrderId, OrderLine, OrderRequest},
    pricing::PriceError,
    products::{Product, ProductError, ProductId, ProductRecord},
};
