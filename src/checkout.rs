//! Checkout
//!
//! Turns the cart into an order, submits it, and empties the cart once the
//! API has accepted it. A failed submission leaves the cart as it was so the
//! customer can simply try again.

use std::fmt::{Display, Formatter, Result as FmtResult};

use thiserror::Error;
use tracing::{info, warn};

use crate::{
    api::{ApiError, StorefrontApi},
    cart::Cart,
    orders::{Customer, OrderConfirmation, OrderId, OrderRequest},
};

/// Errors that can occur during checkout.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// There is nothing in the cart to order.
    #[error("cart is empty")]
    EmptyCart,

    /// The order submission failed.
    #[error("checkout failed: {0}")]
    Api(#[from] ApiError),
}

/// Submit the contents of `cart` as an order for `customer`.
///
/// On success the cart is cleared and the confirmation is returned.
///
/// # Errors
///
/// - [`CheckoutError::EmptyCart`]: the cart has no items; nothing is sent.
/// - [`CheckoutError::Api`]: the API rejected or could not receive the order.
pub async fn checkout<A>(
    api: &A,
    cart: &mut Cart<'_>,
    customer: Customer,
) -> Result<OrderConfirmation, CheckoutError>
where
    A: StorefrontApi + ?Sized,
{
    if cart.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }

    let order = OrderRequest::from_cart(cart, customer);

    let confirmation = match api.create_order(&order).await {
        Ok(confirmation) => confirmation,
        Err(error) => {
            warn!(%error, lines = order.items.len(), "order was not placed");

            return Err(error.into());
        }
    };

    info!(order = %confirmation.id, total = %order.total, "order placed");

    cart.clear();

    Ok(confirmation)
}

/// User-facing result of a checkout attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutOutcome {
    /// The order was accepted.
    Placed(OrderId),

    /// The order was not placed; carries the message to show.
    Failed(String),
}

impl CheckoutOutcome {
    /// Whether the order was accepted.
    pub fn is_placed(&self) -> bool {
        matches!(self, CheckoutOutcome::Placed(_))
    }
}

impl From<Result<OrderConfirmation, CheckoutError>> for CheckoutOutcome {
    fn from(result: Result<OrderConfirmation, CheckoutError>) -> Self {
        match result {
            Ok(confirmation) => CheckoutOutcome::Placed(confirmation.id),
            Err(error) => CheckoutOutcome::Failed(error.to_string()),
        }
    }
}

impl Display for CheckoutOutcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            CheckoutOutcome::Placed(id) => write!(f, "Order placed! #{id}"),
            CheckoutOutcome::Failed(message) => write!(f, "Error: {message}"),
        }
    }
}
