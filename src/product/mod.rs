//! Products, i.e. the sale transactions every report is built from.
//!
//! This module contains:
//! - The `Product` model and `ProductBuilder` for seeding products
//! - The schema of the `products` table
//! - Queries and route handlers for listing and searching products

mod core;
mod listing;
mod query;

pub use core::{
    Product, ProductBuilder, ProductId, ProductSummary, count_products, create_product,
    create_products_table, map_product_row,
};
pub use listing::{ProductList, get_all_products_endpoint, search_products_endpoint};
pub use query::{get_all_product_summaries, get_products_in_month};

pub(crate) use query::MONTH_CONDITION;
