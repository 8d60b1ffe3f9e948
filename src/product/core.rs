//! Defines the core data models and table schema for product sales.

use rusqlite::{Connection, Row};
use serde::{Deserialize, Serialize};
use time::Date;

use crate::Error;

/// Alias for the integer type used for product IDs.
pub type ProductId = i64;

// ============================================================================
// MODELS
// ============================================================================

/// A product sale transaction, i.e. a listing of an item that may or may not have sold.
///
/// The table may come from an external import, so any text column may be `NULL`.
///
/// To create a new `Product`, use [Product::build].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// The ID of the product.
    pub id: ProductId,
    /// The name of the product.
    pub title: Option<String>,
    /// A text description of the product.
    pub description: Option<String>,
    /// The category of the product, e.g. "electronics".
    pub category: Option<String>,
    /// The listed price, `None` if the price was never recorded.
    pub price: Option<f64>,
    /// The date (and possibly time) of the sale as stored in the database.
    pub date_of_sale: String,
    /// Whether the product sold.
    pub sold: bool,
}

/// The columns of a [Product] shown in the unfiltered listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSummary {
    /// The ID of the product.
    pub id: ProductId,
    /// The name of the product.
    pub title: Option<String>,
    /// The category of the product.
    pub category: Option<String>,
    /// The listed price, `None` if the price was never recorded.
    pub price: Option<f64>,
}

impl Product {
    /// Create a new product.
    ///
    /// Shortcut for [ProductBuilder] for discoverability.
    pub fn build(title: &str, category: &str, price: f64, date_of_sale: Date) -> ProductBuilder {
        ProductBuilder {
            title: title.to_owned(),
            description: String::new(),
            category: category.to_owned(),
            price,
            date_of_sale,
            sold: false,
        }
    }
}

/// A builder for creating [Product] rows.
///
/// Products default to an empty description and to not being sold.
///
/// # Examples
///
/// ```ignore
/// use time::macros::date;
///
/// use crate::product::{Product, create_product};
///
/// let product = create_product(
///     Product::build("Fjallraven Backpack", "men's clothing", 329.85, date!(2021 - 11 - 27))
///         .description("Fits 15 inch laptops")
///         .sold(true),
///     &connection,
/// )
/// .unwrap();
/// ```
#[derive(Debug, PartialEq, Clone)]
pub struct ProductBuilder {
    /// The name of the product.
    pub title: String,
    /// A text description of the product.
    pub description: String,
    /// The category of the product.
    pub category: String,
    /// The listed price.
    pub price: f64,
    /// The date of the sale. Only its month is used by the reports.
    pub date_of_sale: Date,
    /// Whether the product sold.
    pub sold: bool,
}

impl ProductBuilder {
    /// Set the description for the product.
    pub fn description(mut self, description: &str) -> Self {
        description.clone_into(&mut self.description);
        self
    }

    /// Set whether the product sold.
    pub fn sold(mut self, sold: bool) -> Self {
        self.sold = sold;
        self
    }
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// Insert a product into the database from a builder.
///
/// The HTTP API never writes. This is used to seed databases and in tests.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is an SQL error.
pub fn create_product(builder: ProductBuilder, connection: &Connection) -> Result<Product, Error> {
    let product = connection
        .prepare(
            "INSERT INTO products (title, description, category, price, dateOfSale, sold)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             RETURNING id, title, description, category, price, dateOfSale, sold",
        )?
        .query_row(
            (
                builder.title,
                builder.description,
                builder.category,
                builder.price,
                builder.date_of_sale,
                builder.sold,
            ),
            map_product_row,
        )?;

    Ok(product)
}

/// Get the total number of products in the database.
///
/// # Errors
/// This function will return a [Error::SqlError] there is some SQL error.
pub fn count_products(connection: &Connection) -> Result<u32, Error> {
    connection
        .query_row("SELECT COUNT(id) FROM products;", [], |row| row.get(0))
        .map_err(|error| error.into())
}

/// Create the products table in the database.
///
/// # Errors
/// Returns an error if there is an SQL error.
pub fn create_products_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS products (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                description TEXT NOT NULL DEFAULT '',
                category TEXT NOT NULL,
                price REAL,
                dateOfSale TEXT NOT NULL,
                sold INTEGER NOT NULL DEFAULT 0
                )",
        (),
    )?;

    // Every report filters on the month of the sale date.
    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_products_date_of_sale ON products(dateOfSale);",
        (),
    )?;

    Ok(())
}

/// Map a database row to a Product.
///
/// The row must have the columns `id, title, description, category, price, dateOfSale, sold`
/// in that order.
pub fn map_product_row(row: &Row) -> Result<Product, rusqlite::Error> {
    let id = row.get(0)?;
    let title = row.get(1)?;
    let description = row.get(2)?;
    let category = row.get(3)?;
    let price = row.get(4)?;
    let date_of_sale = row.get(5)?;
    let sold = row.get(6)?;

    Ok(Product {
        id,
        title,
        description,
        category,
        price,
        date_of_sale,
        sold,
    })
}

// ============================================================================
// TESTS
// ============================================================================
