use std::io;

use clap::{Parser, Subcommand};
use storefront::{
    api::HttpStorefrontApi,
    cart::CartError,
    catalog::CatalogError,
    config::{ApiConfig, LoggingConfig},
    display::DisplayError,
    products::ProductId,
};
use thiserror::Error;

mod checkout;
mod products;

#[derive(Debug, Parser)]
#[command(name = "storefront", about = "Storefront CLI", long_about = None)]
pub(crate) struct Cli {
    /// Storefront API settings.
    #[command(flatten)]
    api: ApiConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub(crate) logging: LoggingConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List catalog products
    Products(products::ProductsArgs),

    /// Build a cart from catalog products and place an order
    Checkout(checkout::CheckoutArgs),
}

#[derive(Debug, Error)]
pub(crate) enum CliError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Cart(#[from] CartError),

    #[error(transparent)]
    Display(#[from] DisplayError),

    #[error("product {0} is not in the catalog")]
    UnknownProduct(ProductId),

    #[error("order was not placed")]
    CheckoutFailed,
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), CliError> {
        let api = HttpStorefrontApi::new(&self.api);
        let currency = self.api.currency.currency();
        let out = io::stdout().lock();

        match self.command {
            Commands::Products(args) => products::run(&api, currency, args, out).await,
            Commands::Checkout(args) => checkout::run(&api, currency, args, out).await,
        }
    }
}
