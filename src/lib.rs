//! Storefront
//!
//! Storefront is a client for a clothing catalog API: it browses products,
//! keeps a session cart, and submits that cart as an order at checkout.

pub mod api;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod display;
pub mod ids;
pub mod observability;
pub mod orders;
pub mod prelude;
pub mod pricing;
pub mod products;
