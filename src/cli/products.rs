use std::io;

use clap::Args;
use rusty_money::iso::Currency;
use storefront::{
    api::StorefrontApi,
    catalog::{Catalog, Category, ProductFilter},
    display::write_catalog,
};

use super::CliError;

#[derive(Debug, Args)]
pub(crate) struct ProductsArgs {
    /// Free-text search
    #[arg(short, long)]
    query: Option<String>,

    /// Restrict to one category
    #[arg(short, long, value_enum)]
    category: Option<Category>,
}

pub(crate) async fn run<A>(
    api: &A,
    currency: &'static Currency,
    args: ProductsArgs,
    out: impl io::Write,
) -> Result<(), CliError>
where
    A: StorefrontApi + ?Sized,
{
    let filter = ProductFilter {
        query: args.query,
        category: args.category,
    };

    let catalog = Catalog::load(api, &filter, currency).await?;

    write_catalog(out, &catalog)?;

    Ok(())
}
