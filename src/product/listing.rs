//! Route handlers that list products, optionally filtered by month and search text.

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use serde::{Deserialize, Serialize};

use crate::{Error, month::Month, store::ProductStore};

use super::{
    core::{Product, ProductSummary},
    query::{get_all_product_summaries, get_products_in_month},
};

/// The response body for the listing routes.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductList<T> {
    /// The matching products.
    pub all_trans: Vec<T>,
}

/// The query string for `/all`, e.g. `/all?month=02&search=bag`.
#[derive(Debug, Default, Deserialize)]
pub struct ProductSearchQuery {
    /// The unvalidated month.
    pub month: Option<String>,
    /// Text that must appear in the title or description. Empty matches everything.
    #[serde(default)]
    pub search: String,
}

/// List the ID, title, category and price of every product.
pub async fn get_all_products_endpoint(
    State(store): State<ProductStore>,
) -> Result<Json<ProductList<ProductSummary>>, Error> {
    let products = store.read(get_all_product_summaries).await?;

    Ok(Json(ProductList {
        all_trans: products,
    }))
}

/// List the full rows of products sold in a month, optionally filtered by search text.
pub async fn search_products_endpoint(
    State(store): State<ProductStore>,
    query: Result<Query<ProductSearchQuery>, QueryRejection>,
) -> Result<Json<ProductList<Product>>, Error> {
    let Query(query) = query?;
    let month = Month::parse(query.month.as_deref())?;
    let search = query.search;

    let products = store
        .read(move |connection| get_products_in_month(month, &search, connection))
        .await?;

    Ok(Json(ProductList {
        all_trans: products,
    }))
}
