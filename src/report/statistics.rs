//! Summary statistics for the products sold in a month.

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use rusqlite::{Connection, named_params};
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    month::{Month, MonthQuery},
    product::MONTH_CONDITION,
    store::ProductStore,
};

/// The total value of a month's products and how many of them sold.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    /// The sum of the price of every product in the month.
    pub total_sale: f64,
    /// The number of products in the month that sold.
    pub sold_items: u32,
    /// The number of products in the month that did not sell.
    pub not_sold_items: u32,
}

/// Compute the [Statistics] for `month`.
///
/// A month without products gives zero for every field.
///
/// # Errors
/// Returns [Error::SqlError] if the query fails.
pub fn get_statistics(month: Month, connection: &Connection) -> Result<Statistics, Error> {
    let query = format!(
        "SELECT
            COALESCE(SUM(price), 0.0),
            COALESCE(SUM(CASE WHEN sold = 1 THEN 1 ELSE 0 END), 0),
            COALESCE(SUM(CASE WHEN sold = 0 THEN 1 ELSE 0 END), 0)
        FROM products
        WHERE {MONTH_CONDITION}"
    );

    connection
        .prepare(&query)?
        .query_row(named_params! { ":month": month.as_u8() }, |row| {
            Ok(Statistics {
                total_sale: row.get(0)?,
                sold_items: row.get(1)?,
                not_sold_items: row.get(2)?,
            })
        })
        .map_err(|error| error.into())
}

/// Route handler for `/statistics?month=..`.
pub async fn get_statistics_endpoint(
    State(store): State<ProductStore>,
    query: Result<Query<MonthQuery>, QueryRejection>,
) -> Result<Json<Statistics>, Error> {
    let Query(query) = query?;
    let month = query.month()?;

    let statistics = store.read(move |connection| get_statistics(month, connection)).await?;

    Ok(Json(statistics))
}
