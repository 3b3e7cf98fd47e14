//! Catalog

use std::fmt::{Display, Formatter, Result as FmtResult};

use clap::ValueEnum;
use rusty_money::iso::Currency;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::{
    api::{ApiError, StorefrontApi},
    products::{Product, ProductError, ProductId},
};

/// Errors raised while loading the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The listing request failed.
    #[error("failed to load products: {0}")]
    Api(#[from] ApiError),

    /// A listed product could not be decoded.
    #[error(transparent)]
    Product(#[from] ProductError),
}

/// Catalog category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Shirts, tees and knitwear
    Tops,

    /// Jackets and coats
    Outerwear,

    /// Trousers and shorts
    Bottoms,

    /// Shoes and boots
    Footwear,
}

impl Category {
    /// Query parameter value for this category.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Tops => "tops",
            Category::Outerwear => "outerwear",
            Category::Bottoms => "bottoms",
            Category::Footwear => "footwear",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// Filter for the product listing. The default filter lists the whole catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    /// Free-text search
    pub query: Option<String>,

    /// Restrict to one category
    pub category: Option<Category>,
}

impl ProductFilter {
    /// Query parameters for the listing request; blank values are omitted.
    pub fn query_pairs(&self) -> Vec<(&'static str, &str)> {
        let mut pairs = Vec::with_capacity(2);

        if let Some(query) = self
            .query
            .as_deref()
            .map(str::trim)
            .filter(|query| !query.is_empty())
        {
            pairs.push(("q", query));
        }

        if let Some(category) = self.category {
            pairs.push(("category", category.as_str()));
        }

        pairs
    }
}

/// Products returned by one listing, in the order the API returned them.
#[derive(Debug, Clone)]
pub struct Catalog<'a> {
    products: Vec<Product<'a>>,
}

impl<'a> Catalog<'a> {
    /// Create a catalog from already decoded products.
    #[must_use]
    pub fn new(products: Vec<Product<'a>>) -> Self {
        Self { products }
    }

    /// Fetch the products matching `filter` and price them in `currency`.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if the request fails or a product cannot be decoded.
    pub async fn load<A>(
        api: &A,
        filter: &ProductFilter,
        currency: &'a Currency,
    ) -> Result<Self, CatalogError>
    where
        A: StorefrontApi + ?Sized,
    {
        let records = api.list_products(filter).await?;

        let products = records
            .into_iter()
            .map(|record| record.into_product(currency))
            .collect::<Result<Vec<_>, _>>()?;

        info!(count = products.len(), "loaded catalog");

        Ok(Self { products })
    }

    /// Look up a product by id.
    ///
    /// An exact match wins; otherwise a numeric id also finds a product whose
    /// id is the same digits as text, and vice versa.
    pub fn get(&self, id: &ProductId) -> Option<&Product<'a>> {
        self.products
            .iter()
            .find(|product| product.id == *id)
            .or_else(|| {
                self.products
                    .iter()
                    .find(|product| product.id.as_raw().matches(id.as_raw()))
            })
    }

    /// Iterate over the products.
    pub fn iter(&self) -> impl Iterator<Item = &Product<'a>> {
        self.products.iter()
    }

    /// Get the number of products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Check if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use reqwest::StatusCode;
    use rust_decimal::Decimal;
    use rusty_money::{Money, iso::USD};
    use testresult::TestResult;

    use crate::{api::MockStorefrontApi, products::ProductRecord};

    use super::*;

    fn record(id: i64, title: &str, price: Decimal) -> ProductRecord {
        ProductRecord {
            id: ProductId::from(id),
            title: title.to_string(),
            description: String::new(),
            price,
            images: Vec::new(),
            sizes: Vec::new(),
            colors: Vec::new(),
            category: None,
        }
    }

    #[test]
    fn empty_filter_has_no_parameters() {
        assert!(ProductFilter::default().query_pairs().is_empty());
    }

    #[test]
    fn blank_query_is_omitted() {
        let filter = ProductFilter {
            query: Some("   ".to_string()),
            category: None,
        };

        assert!(filter.query_pairs().is_empty());
    }

    #[test]
    fn query_and_category_become_parameters() {
        let filter = ProductFilter {
            query: Some("linen".to_string()),
            category: Some(Category::Tops),
        };

        assert_eq!(
            filter.query_pairs(),
            vec![("q", "linen"), ("category", "tops")]
        );
    }

    #[test]
    fn category_serializes_lowercase() -> TestResult {
        assert_eq!(serde_json::to_string(&Category::Outerwear)?, "\"outerwear\"");
        assert_eq!(Category::Footwear.to_string(), "footwear");

        Ok(())
    }

    #[tokio::test]
    async fn load_decodes_products_in_order() -> TestResult {
        let mut api = MockStorefrontApi::new();

        api.expect_list_products()
            .withf(|filter| filter.category == Some(Category::Bottoms))
            .times(1)
            .returning(|_| {
                Ok(vec![
                    record(2, "Chinos", Decimal::new(6500, 2)),
                    record(1, "Jeans", Decimal::new(8900, 2)),
                ])
            });

        let filter = ProductFilter {
            query: None,
            category: Some(Category::Bottoms),
        };

        let catalog = Catalog::load(&api, &filter, USD).await?;

        let titles: Vec<&str> = catalog.iter().map(|p| p.title.as_str()).collect();

        assert_eq!(titles, vec!["Chinos", "Jeans"]);
        assert_eq!(
            catalog.get(&ProductId::from(1)).map(|p| p.price),
            Some(Money::from_minor(8900, USD))
        );
        assert!(catalog.get(&ProductId::from(3)).is_none());

        Ok(())
    }

    #[test]
    fn get_finds_numeric_text_ids_by_digits() -> TestResult {
        let mut textual = record(0, "Beanie", Decimal::new(1500, 2));
        textual.id = ProductId::from("7");

        let catalog = Catalog::new(vec![textual.into_product(USD)?]);

        assert_eq!(
            catalog.get(&ProductId::from(7)).map(|p| p.title.as_str()),
            Some("Beanie")
        );
        assert_eq!(
            catalog.get(&"7".parse::<ProductId>()?).map(|p| p.title.as_str()),
            Some("Beanie")
        );
        assert!(catalog.get(&ProductId::from(70)).is_none());

        Ok(())
    }

    #[tokio::test]
    async fn load_surfaces_api_failures() {
        let mut api = MockStorefrontApi::new();

        api.expect_list_products().returning(|_| {
            Err(ApiError::Status {
                status: StatusCode::SERVICE_UNAVAILABLE,
                body: "maintenance".to_string(),
            })
        });

        let result = Catalog::load(&api, &ProductFilter::default(), USD).await;

        assert!(
            matches!(result, Err(CatalogError::Api(ApiError::Status { .. }))),
            "expected api status error, got {result:?}"
        );
    }

    #[tokio::test]
    async fn load_rejects_negative_prices() {
        let mut api = MockStorefrontApi::new();

        api.expect_list_products()
            .returning(|_| Ok(vec![record(9, "Broken", Decimal::new(-100, 2))]));

        let result = Catalog::load(&api, &ProductFilter::default(), USD).await;

        assert!(
            matches!(result, Err(CatalogError::Product(_))),
            "expected product error, got {result:?}"
        );
    }
}
