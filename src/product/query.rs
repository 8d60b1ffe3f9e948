//! Database queries for listing and searching products.

use rusqlite::{Connection, named_params};

use crate::{Error, month::Month};

use super::core::{Product, ProductSummary, map_product_row};

/// SQL condition matching rows whose sale date falls in the month bound to `:month`.
pub(crate) const MONTH_CONDITION: &str = "CAST(strftime('%m', dateOfSale) AS INTEGER) = :month";

/// Get the ID, title, category and price of every product, ordered by ID.
///
/// # Errors
/// Returns [Error::SqlError] if the query fails.
pub fn get_all_product_summaries(connection: &Connection) -> Result<Vec<ProductSummary>, Error> {
    connection
        .prepare("SELECT id, title, category, price FROM products ORDER BY id ASC")?
        .query_map([], |row| {
            Ok(ProductSummary {
                id: row.get(0)?,
                title: row.get(1)?,
                category: row.get(2)?,
                price: row.get(3)?,
            })
        })?
        .map(|product_result| product_result.map_err(Error::SqlError))
        .collect()
}

/// Get the products sold in `month` whose title or description contains `search`.
///
/// Matching uses SQLite's `LIKE`, so it ignores ASCII case. Wildcard characters
/// in `search` match literally. An empty `search` returns every product in `month`.
///
/// # Errors
/// Returns [Error::SqlError] if the query fails.
pub fn get_products_in_month(
    month: Month,
    search: &str,
    connection: &Connection,
) -> Result<Vec<Product>, Error> {
    let query = format!(
        "SELECT id, title, description, category, price, dateOfSale, sold FROM products \
        WHERE {MONTH_CONDITION} \
        AND (:search = '' OR title LIKE :pattern ESCAPE '\\' OR description LIKE :pattern ESCAPE '\\') \
        ORDER BY id ASC"
    );

    connection
        .prepare(&query)?
        .query_map(
            named_params! {
                ":month": month.as_u8(),
                ":search": search,
                ":pattern": contains_pattern(search),
            },
            map_product_row,
        )?
        .map(|product_result| product_result.map_err(Error::SqlError))
        .collect()
}

/// Build a `LIKE` pattern that matches any text containing `search`.
fn contains_pattern(search: &str) -> String {
    let mut pattern = String::with_capacity(search.len() + 2);
    pattern.push('%');

    for character in search.chars() {
        if matches!(character, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(character);
    }

    pattern.push('%');
    pattern
}
