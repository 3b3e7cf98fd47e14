use std::{io, str::FromStr};

use clap::Args;
use rusty_money::iso::Currency;
use storefront::{
    api::StorefrontApi,
    cart::{Cart, Selection},
    catalog::{Catalog, ProductFilter},
    checkout::{CheckoutOutcome, checkout},
    display::{DisplayError, write_cart},
    orders::Customer,
    products::{Product, ProductId},
};
use thiserror::Error;

use super::CliError;

#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum ItemSpecError {
    #[error("item must start with a product id")]
    MissingProductId,

    #[error("item has more than four `:` separated parts: {0}")]
    TooManyParts(String),

    #[error("invalid quantity `{0}`")]
    InvalidQuantity(String),
}

/// A cart line requested on the command line as `ID[:SIZE[:COLOR[:QTY]]]`.
///
/// Empty parts fall back to the product's default selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ItemSpec {
    product_id: ProductId,
    size: Option<String>,
    color: Option<String>,
    quantity: Option<i64>,
}

impl ItemSpec {
    fn selection(&self, product: &Product<'_>) -> Selection {
        let defaults = product.default_selection();

        Selection {
            size: self.size.clone().or(defaults.size),
            color: self.color.clone().or(defaults.color),
            quantity: self.quantity.unwrap_or(defaults.quantity),
        }
    }
}

impl FromStr for ItemSpec {
    type Err = ItemSpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(':').map(str::trim).collect();

        if parts.len() > 4 {
            return Err(ItemSpecError::TooManyParts(s.to_string()));
        }

        let part = |idx: usize| {
            parts
                .get(idx)
                .copied()
                .filter(|value| !value.is_empty())
        };

        let product_id = part(0)
            .ok_or(ItemSpecError::MissingProductId)?
            .parse::<ProductId>()
            .unwrap_or_else(|never| match never {});

        let quantity = part(3)
            .map(|raw| {
                raw.parse::<i64>()
                    .map_err(|_err| ItemSpecError::InvalidQuantity(raw.to_string()))
            })
            .transpose()?;

        Ok(Self {
            product_id,
            size: part(1).map(str::to_string),
            color: part(2).map(str::to_string),
            quantity,
        })
    }
}

#[derive(Debug, Args)]
pub(crate) struct CheckoutArgs {
    /// Item to add, as ID[:SIZE[:COLOR[:QTY]]]; may be repeated
    #[arg(long = "item", required = true, value_name = "ID[:SIZE[:COLOR[:QTY]]]")]
    items: Vec<ItemSpec>,

    /// Customer name
    #[arg(long, default_value = "Guest")]
    name: String,

    /// Customer email
    #[arg(long, default_value = "guest@example.com")]
    email: String,

    /// Shipping address
    #[arg(long, default_value = "N/A")]
    address: String,

    /// Print the cart without placing the order
    #[arg(long)]
    dry_run: bool,
}

impl CheckoutArgs {
    fn customer(&self) -> Customer {
        Customer {
            name: self.name.clone(),
            email: self.email.clone(),
            address: self.address.clone(),
        }
    }
}

pub(crate) async fn run<A>(
    api: &A,
    currency: &'static Currency,
    args: CheckoutArgs,
    mut out: impl io::Write,
) -> Result<(), CliError>
where
    A: StorefrontApi + ?Sized,
{
    let catalog = Catalog::load(api, &ProductFilter::default(), currency).await?;
    let mut cart = Cart::new(currency);

    for spec in &args.items {
        let product = catalog
            .get(&spec.product_id)
            .ok_or_else(|| CliError::UnknownProduct(spec.product_id.clone()))?;

        cart.try_add(product, spec.selection(product))?;
    }

    write_cart(&mut out, &cart)?;

    if args.dry_run {
        return Ok(());
    }

    let outcome = CheckoutOutcome::from(checkout(api, &mut cart, args.customer()).await);

    writeln!(out, "{outcome}").map_err(DisplayError::from)?;

    if outcome.is_placed() {
        Ok(())
    } else {
        Err(CliError::CheckoutFailed)
    }
}

#[cfg(test)]
mod tests {
    use reqwest::StatusCode;
    use rust_decimal::Decimal;
    use rusty_money::iso::USD;
    use storefront::{
        api::{ApiError, MockStorefrontApi},
        orders::{OrderConfirmation, OrderId},
        products::ProductRecord,
    };
    use testresult::TestResult;

    use super::*;

    fn catalog_records() -> Vec<ProductRecord> {
        vec![
            ProductRecord {
                id: ProductId::from(1),
                title: "Oxford Shirt".to_string(),
                description: String::new(),
                price: Decimal::new(4999, 2),
                images: vec!["https://img.example/oxford.jpg".to_string()],
                sizes: vec!["S".to_string(), "M".to_string()],
                colors: vec!["White".to_string(), "Blue".to_string()],
                category: Some("tops".to_string()),
            },
            ProductRecord {
                id: ProductId::from("scarf"),
                title: "Wool Scarf".to_string(),
                description: String::new(),
                price: Decimal::new(35, 0),
                images: Vec::new(),
                sizes: Vec::new(),
                colors: Vec::new(),
                category: None,
            },
        ]
    }

    fn args(items: &[&str], dry_run: bool) -> Result<CheckoutArgs, ItemSpecError> {
        Ok(CheckoutArgs {
            items: items
                .iter()
                .map(|item| item.parse())
                .collect::<Result<_, _>>()?,
            name: "Guest".to_string(),
            email: "guest@example.com".to_string(),
            address: "N/A".to_string(),
            dry_run,
        })
    }

    #[test]
    fn parses_full_item_spec() -> TestResult {
        let spec: ItemSpec = "12:M:Black:3".parse()?;

        assert_eq!(
            spec,
            ItemSpec {
                product_id: ProductId::from(12),
                size: Some("M".to_string()),
                color: Some("Black".to_string()),
                quantity: Some(3),
            }
        );

        Ok(())
    }

    #[test]
    fn empty_parts_are_unset() -> TestResult {
        let spec: ItemSpec = "scarf::Grey".parse()?;

        assert_eq!(spec.product_id, ProductId::from("scarf"));
        assert_eq!(spec.size, None);
        assert_eq!(spec.color.as_deref(), Some("Grey"));
        assert_eq!(spec.quantity, None);

        Ok(())
    }

    #[test]
    fn rejects_malformed_item_specs() {
        assert_eq!(
            "".parse::<ItemSpec>(),
            Err(ItemSpecError::MissingProductId)
        );
        assert_eq!(
            "1:M:Black:2:extra".parse::<ItemSpec>(),
            Err(ItemSpecError::TooManyParts("1:M:Black:2:extra".to_string()))
        );
        assert_eq!(
            "1:M:Black:two".parse::<ItemSpec>(),
            Err(ItemSpecError::InvalidQuantity("two".to_string()))
        );
    }

    #[tokio::test]
    async fn dry_run_prints_cart_without_ordering() -> TestResult {
        let mut api = MockStorefrontApi::new();

        api.expect_list_products()
            .times(1)
            .returning(|_| Ok(catalog_records()));
        api.expect_create_order().never();

        let mut out = Vec::new();

        run(&api, USD, args(&["1", "1", "scarf"], true)?, &mut out).await?;

        let rendered = String::from_utf8(out)?;

        assert!(rendered.contains("White • S"), "defaults not applied: {rendered}");
        assert!(rendered.contains("Wool Scarf"), "missing scarf: {rendered}");
        assert!(!rendered.contains("Order placed"), "dry run placed an order");

        Ok(())
    }

    #[tokio::test]
    async fn places_order_and_prints_confirmation() -> TestResult {
        let mut api = MockStorefrontApi::new();

        api.expect_list_products()
            .returning(|_| Ok(catalog_records()));
        api.expect_create_order()
            .withf(|order| {
                order.items.len() == 2
                    && order.items.first().map(|line| line.quantity) == Some(2)
                    && order.total == Decimal::new(13_498, 2)
            })
            .times(1)
            .returning(|_| {
                Ok(OrderConfirmation {
                    id: OrderId::from("A-100"),
                })
            });

        let mut out = Vec::new();

        run(&api, USD, args(&["1:M:Blue:2", "scarf"], false)?, &mut out).await?;

        let rendered = String::from_utf8(out)?;

        assert!(rendered.contains("Order placed! #A-100"), "missing confirmation: {rendered}");

        Ok(())
    }

    #[tokio::test]
    async fn failed_order_is_reported() -> TestResult {
        let mut api = MockStorefrontApi::new();

        api.expect_list_products()
            .returning(|_| Ok(catalog_records()));
        api.expect_create_order().returning(|_| {
            Err(ApiError::Status {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                body: "boom".to_string(),
            })
        });

        let mut out = Vec::new();

        let result = run(&api, USD, args(&["scarf"], false)?, &mut out).await;

        assert!(
            matches!(result, Err(CliError::CheckoutFailed)),
            "expected checkout failure, got {result:?}"
        );
        assert!(String::from_utf8(out)?.contains("Error: checkout failed"));

        Ok(())
    }

    #[tokio::test]
    async fn numeric_item_finds_product_with_text_id() -> TestResult {
        let mut api = MockStorefrontApi::new();

        api.expect_list_products().returning(|_| {
            let mut records = catalog_records();

            if let Some(scarf) = records.get_mut(1) {
                scarf.id = ProductId::from("7");
            }

            Ok(records)
        });
        api.expect_create_order().never();

        let mut out = Vec::new();

        run(&api, USD, args(&["7::Grey:2"], true)?, &mut out).await?;

        let rendered = String::from_utf8(out)?;

        assert!(rendered.contains("Wool Scarf"), "missing scarf: {rendered}");
        assert!(rendered.contains("Grey"), "color not applied: {rendered}");

        Ok(())
    }

    #[tokio::test]
    async fn unknown_product_is_an_error() -> TestResult {
        let mut api = MockStorefrontApi::new();

        api.expect_list_products()
            .returning(|_| Ok(catalog_records()));

        let result = run(&api, USD, args(&["99"], true)?, Vec::new()).await;

        assert!(
            matches!(result, Err(CliError::UnknownProduct(ref id)) if *id == ProductId::from(99)),
            "expected unknown product, got {result:?}"
        );

        Ok(())
    }
}
