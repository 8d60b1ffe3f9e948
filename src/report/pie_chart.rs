//! Number of products per category in a month.

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

/// The number of products in a category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryCount {
    /// The name of the category, `None` for products without a category.
    pub category_name: Option<String>,
    /// The number of products in the category, always at least one.
    pub category_count: u32,
}

/// The category breakdown for a month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PieChart {
    /// One entry per category present in the month, ordered by name.
    pub category_counts: Vec<CategoryCount>,
}

/// Count the products in each category for `month`.
///
/// Categories without products in `month` are left out. Products without a
/// category are counted together under `None`, which sorts first.
///
/// # Errors
/// Returns [Error::SqlError] if the query fails.
pub fn get_pie_chart(month: Month, connection: &Connection) -> Result<PieChart, Error> {
    let query = format!(
        "SELECT category, COUNT(*) FROM products \
        WHERE {MONTH_CONDITION} \
        GROUP BY category \
        ORDER BY category ASC"
    );

    let category_counts = connection
        .prepare(&query)?
        .query_map(named_params! { ":month": month.as_u8() }, |row| {
            Ok(CategoryCount {
                category_name: row.get(0)?,
                category_count: row.get(1)?,
            })
        })?
        .collect::<Result<Vec<CategoryCount>, rusqlite::Error>>()?;

    Ok(PieChart { category_counts })
}

/// Route handler for `/piechart?month=..`.
pub async fn get_pie_chart_endpoint(
    State(store): State<ProductStore>,
    query: Result<Query<MonthQuery>, QueryRejection>,
) -> Result<Json<PieChart>, Error> {
    let Query(query) = query?;
    let month = query.month()?;

    let pie_chart = store.read(move |connection| get_pie_chart(month, connection)).await?;

    Ok(Json(pie_chart))
}
