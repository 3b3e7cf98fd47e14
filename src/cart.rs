//! Cart
//!
//! The session cart: an ordered list of line items keyed by
//! `(product id, size, color)`. Every operation is total; stale indexes and
//! out-of-contract quantities are absorbed rather than reported.

use rusty_money::{Money, iso::Currency};
use thiserror::Error;
use tracing::{debug, warn};

use crate::{
    pricing::line_total,
    products::{Product, ProductId},
};

/// Errors related to cart operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    /// A product's currency differs from the cart currency (product, product currency, cart currency).
    #[error("Product {0} has currency {1}, but cart has currency {2}")]
    CurrencyMismatch(ProductId, &'static str, &'static str),
}

/// Options chosen when adding a product to the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// Selected size, `None` when not applicable.
    pub size: Option<String>,

    /// Selected color, `None` when not applicable.
    pub color: Option<String>,

    /// Requested quantity. Values below one are treated as one.
    pub quantity: i64,
}

impl Default for Selection {
    fn default() -> Self {
        Self {
            size: None,
            color: None,
            quantity: 1,
        }
    }
}

impl Selection {
    /// Set the size.
    #[must_use]
    pub fn size(mut self, size: impl Into<String>) -> Self {
        self.size = Some(size.into());
        self
    }

    /// Set the color.
    #[must_use]
    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Set the quantity.
    #[must_use]
    pub fn quantity(mut self, quantity: i64) -> Self {
        self.quantity = quantity;
        self
    }
}

/// Clamp a requested quantity into the valid range `1..=u32::MAX`.
pub fn clamp_quantity(quantity: i64) -> u32 {
    u32::try_from(quantity.max(1)).unwrap_or(u32::MAX)
}

/// A cart slot.
///
/// Title, price and image are copied from the product when the slot is first
/// created and are not refreshed by later adds.
#[derive(Debug, Clone, PartialEq)]
pub struct LineItem<'a> {
    product_id: ProductId,
    title: String,
    unit_price: Money<'a, Currency>,
    image: Option<String>,
    size: Option<String>,
    color: Option<String>,
    quantity: u32,
}

impl<'a> LineItem<'a> {
    fn from_product(product: &Product<'a>, selection: Selection, quantity: u32) -> Self {
        Self {
            product_id: product.id.clone(),
            title: product.title.clone(),
            unit_price: product.price,
            image: product.primary_image().map(str::to_string),
            size: selection.size,
            color: selection.color,
            quantity,
        }
    }

    /// Whether this slot holds the given `(product, size, color)` triple.
    pub fn is_slot(&self, product_id: &ProductId, size: Option<&str>, color: Option<&str>) -> bool {
        self.product_id == *product_id
            && self.size.as_deref() == size
            && self.color.as_deref() == color
    }

    /// Product the slot was created from.
    pub fn product_id(&self) -> &ProductId {
        &self.product_id
    }

    /// Title copied at add time.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Unit price copied at add time.
    pub fn unit_price(&self) -> &Money<'a, Currency> {
        &self.unit_price
    }

    /// Image reference copied at add time.
    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    /// Selected size.
    pub fn size(&self) -> Option<&str> {
        self.size.as_deref()
    }

    /// Selected color.
    pub fn color(&self) -> Option<&str> {
        self.color.as_deref()
    }

    /// Number of units, always at least one.
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// `unit_price × quantity`.
    pub fn line_total(&self) -> Money<'a, Currency> {
        line_total(&self.unit_price, self.quantity)
    }

    /// Color and size joined for display, e.g. `"Black • M"`.
    pub fn variant_label(&self) -> String {
        [self.color.as_deref(), self.size.as_deref()]
            .into_iter()
            .flatten()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" • ")
    }
}

/// Cart
#[derive(Debug, Clone)]
pub struct Cart<'a> {
    items: Vec<LineItem<'a>>,
    currency: &'static Currency,
}

impl<'a> Cart<'a> {
    /// Create an empty cart priced in `currency`.
    #[must_use]
    pub fn new(currency: &'static Currency) -> Self {
        Cart {
            items: Vec::new(),
            currency,
        }
    }

    /// Add a product to the cart.
    ///
    /// If a slot with the same `(product, size, color)` already exists its
    /// quantity is increased and its other fields are left as they were.
    /// Otherwise a new slot is appended.
    ///
    /// A product priced in another currency leaves the cart unchanged; use
    /// [`Cart::try_add`] to observe the rejection.
    pub fn add(&mut self, product: &Product<'a>, selection: Selection) {
        if let Err(error) = self.try_add(product, selection) {
            warn!(%error, "rejected cart add");
        }
    }

    /// Add a product to the cart, rejecting products priced in another currency.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::CurrencyMismatch`] if the product's price is not in
    /// the cart currency.
    pub fn try_add(&mut self, product: &Product<'a>, selection: Selection) -> Result<(), CartError> {
        let product_currency = product.price.currency();

        if product_currency != self.currency {
            return Err(CartError::CurrencyMismatch(
                product.id.clone(),
                product_currency.iso_alpha_code,
                self.currency.iso_alpha_code,
            ));
        }

        let quantity = clamp_quantity(selection.quantity);

        let existing = self.items.iter_mut().find(|item| {
            item.is_slot(
                &product.id,
                selection.size.as_deref(),
                selection.color.as_deref(),
            )
        });

        if let Some(item) = existing {
            item.quantity = item.quantity.saturating_add(quantity);

            debug!(
                product = %product.id,
                quantity = item.quantity,
                "merged into existing cart slot"
            );

            return Ok(());
        }

        debug!(product = %product.id, quantity, "appended cart slot");

        self.items
            .push(LineItem::from_product(product, selection, quantity));

        Ok(())
    }

    /// Remove the item at `index`, shifting later items down.
    ///
    /// Returns the removed item, or `None` (leaving the cart unchanged) when
    /// `index` is out of range.
    pub fn remove_at(&mut self, index: usize) -> Option<LineItem<'a>> {
        if index >= self.items.len() {
            debug!(index, len = self.items.len(), "ignored stale remove");

            return None;
        }

        Some(self.items.remove(index))
    }

    /// Overwrite the quantity of the item at `index`, clamped to at least one.
    ///
    /// Returns the updated item, or `None` when `index` is out of range.
    pub fn set_quantity(&mut self, index: usize, quantity: i64) -> Option<&LineItem<'a>> {
        let len = self.items.len();

        let Some(item) = self.items.get_mut(index) else {
            debug!(index, len, "ignored stale quantity update");

            return None;
        };

        item.quantity = clamp_quantity(quantity);

        Some(&*item)
    }

    /// Remove every item.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Sum of `unit_price × quantity` over all items, zero when empty.
    pub fn subtotal(&self) -> Money<'a, Currency> {
        let minor_units = self
            .items
            .iter()
            .map(|item| item.line_total().to_minor_units())
            .fold(0_i64, i64::saturating_add);

        Money::from_minor(minor_units, self.currency)
    }

    /// Total number of units across all slots.
    pub fn unit_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    /// Get the item at `index`.
    pub fn get(&self, index: usize) -> Option<&LineItem<'a>> {
        self.items.get(index)
    }

    /// Items in insertion order.
    pub fn items(&self) -> &[LineItem<'a>] {
        &self.items
    }

    /// Iterate over the items in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &LineItem<'a>> {
        self.items.iter()
    }

    /// Get the number of slots in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the cart is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get the currency of the cart.
    #[must_use]
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }
}
