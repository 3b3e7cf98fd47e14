//! Orders

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    cart::{Cart, LineItem},
    ids::TypedId,
    pricing::decimal_from_money,
    products::ProductId,
};

/// Order Id
pub type OrderId = TypedId<OrderConfirmation>;

/// Customer details sent with an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    /// Customer name
    pub name: String,

    /// Contact email
    pub email: String,

    /// Shipping address
    pub address: String,
}

impl Default for Customer {
    fn default() -> Self {
        Self {
            name: "Guest".to_string(),
            email: "guest@example.com".to_string(),
            address: "N/A".to_string(),
        }
    }
}

/// One line of an order payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    /// Product the line was created from
    pub product_id: ProductId,

    /// Title captured when the product was added
    pub title: String,

    /// Unit price in major units
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,

    /// Number of units
    pub quantity: u32,

    /// Selected size
    pub size: Option<String>,

    /// Selected color
    pub color: Option<String>,

    /// Image reference, empty when the product had none
    pub image: String,
}

impl From<&LineItem<'_>> for OrderLine {
    fn from(item: &LineItem<'_>) -> Self {
        Self {
            product_id: item.product_id().clone(),
            title: item.title().to_string(),
            price: decimal_from_money(item.unit_price()),
            quantity: item.quantity(),
            size: item.size().map(str::to_string),
            color: item.color().map(str::to_string),
            image: item.image().unwrap_or_default().to_string(),
        }
    }
}

/// Payload for the order submission endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRequest {
    /// Ordered lines, in cart order
    pub items: Vec<OrderLine>,

    /// Cart subtotal in major units
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,

    /// Customer details
    pub customer: Customer,
}

impl OrderRequest {
    /// Build an order from the current contents of a cart.
    pub fn from_cart(cart: &Cart<'_>, customer: Customer) -> Self {
        Self {
            items: cart.iter().map(OrderLine::from).collect(),
            total: decimal_from_money(&cart.subtotal()),
            customer,
        }
    }
}

/// Successful order submission response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderConfirmation {
    /// Id assigned to the order
    pub id: OrderId,
}
