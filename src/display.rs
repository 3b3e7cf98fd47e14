//! Terminal rendering for the catalog and the cart.

use std::io;

use tabled::{
    builder::Builder,
    settings::{
        Alignment, Color, Style,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{cart::Cart, catalog::Catalog};

/// Errors that can occur writing tables.
#[derive(Debug, Error)]
pub enum DisplayError {
    /// Writing to the output failed.
    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),
}

/// Writes the catalog as a table.
///
/// # Errors
///
/// Returns an error if the output cannot be written.
pub fn write_catalog(mut out: impl io::Write, catalog: &Catalog<'_>) -> Result<(), DisplayError> {
    if catalog.is_empty() {
        writeln!(out, "No products found.")?;

        return Ok(());
    }

    let mut builder = Builder::default();

    builder.push_record(["Id", "Product", "Sizes", "Colors", "Price"]);

    for product in catalog.iter() {
        builder.push_record([
            product.id.to_string(),
            product.title.clone(),
            product.sizes.join(", "),
            product.colors.join(", "),
            format!("{}", product.price),
        ]);
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(4..5), Alignment::right());

    writeln!(out, "{table}")?;

    Ok(())
}

/// Writes the cart lines followed by the subtotal.
///
/// # Errors
///
/// Returns an error if the output cannot be written.
pub fn write_cart(mut out: impl io::Write, cart: &Cart<'_>) -> Result<(), DisplayError> {
    if cart.is_empty() {
        writeln!(out, "Your cart is empty.")?;

        return Ok(());
    }

    let mut builder = Builder::default();

    builder.push_record(["", "Item", "Options", "Qty", "Price", "Total"]);

    for (idx, item) in cart.iter().enumerate() {
        builder.push_record([
            format!("#{:<3}", idx + 1),
            item.title().to_string(),
            item.variant_label(),
            item.quantity().to_string(),
            format!("{}", item.unit_price()),
            format!("{}", item.line_total()),
        ]);
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(3..6), Alignment::right());

    writeln!(out, "{table}")?;
    writeln!(out, " Subtotal: {}", cart.subtotal())?;

    Ok(())
}
