//! Price histogram of the products sold in a month.
//!
//! Prices are counted in ten fixed, contiguous buckets. A price belongs to the
//! first bucket whose upper bound it does not exceed, so `100` is counted in
//! `0-100` and `100.5` in `101-200`. The last bucket has no upper bound.

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

/// A bucket of the price histogram.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceRange {
    /// The lower bound used in the bucket's label.
    pub min: u32,
    /// The inclusive upper bound, `None` for the last, unbounded bucket.
    pub max: Option<u32>,
}

impl PriceRange {
    /// The label of the bucket, e.g. "101-200" or "901-above".
    pub fn label(&self) -> String {
        match self.max {
            Some(max) => format!("{}-{}", self.min, max),
            None => format!("{}-above", self.min),
        }
    }
}

/// The buckets of the price histogram in ascending order.
pub const PRICE_RANGES: [PriceRange; 10] = [
    PriceRange { min: 0, max: Some(100) },
    PriceRange { min: 101, max: Some(200) },
    PriceRange { min: 201, max: Some(300) },
    PriceRange { min: 301, max: Some(400) },
    PriceRange { min: 401, max: Some(500) },
    PriceRange { min: 501, max: Some(600) },
    PriceRange { min: 601, max: Some(700) },
    PriceRange { min: 701, max: Some(800) },
    PriceRange { min: 801, max: Some(900) },
    PriceRange { min: 901, max: None },
];

/// The number of products in one bucket of the histogram.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceRangeCount {
    /// The label of the bucket, see [PriceRange::label].
    pub price_range: String,
    /// The number of products whose price falls in the bucket.
    pub count: u32,
}

/// The price histogram for a month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BarChart {
    /// One entry per bucket of [PRICE_RANGES], in the same order.
    pub price_range_counts: Vec<PriceRangeCount>,
}

/// Get the index into [PRICE_RANGES] of the bucket containing `price`.
///
/// Negative prices fall in the first bucket.
pub fn price_range_index(price: f64) -> usize {
    PRICE_RANGES
        .iter()
        .position(|range| range.max.is_some_and(|max| price <= f64::from(max)))
        .unwrap_or(PRICE_RANGES.len() - 1)
}

/// Count `prices` per bucket, including empty buckets.
pub fn count_prices_by_range(prices: &[f64]) -> Vec<PriceRangeCount> {
    let mut counts = [0u32; PRICE_RANGES.len()];

    for &price in prices {
        counts[price_range_index(price)] += 1;
    }

    PRICE_RANGES
        .iter()
        .zip(counts)
        .map(|(range, count)| PriceRangeCount {
            price_range: range.label(),
            count,
        })
        .collect()
}

/// Build the price histogram for `month`.
///
/// Products without a price are not counted.
///
/// # Errors
/// Returns [Error::SqlError] if the query fails.
pub fn get_bar_chart(month: Month, connection: &Connection) -> Result<BarChart, Error> {
    let query =
        format!("SELECT price FROM products WHERE {MONTH_CONDITION} AND price IS NOT NULL");

    let prices = connection
        .prepare(&query)?
        .query_map(named_params! { ":month": month.as_u8() }, |row| {
            row.get::<usize, f64>(0)
        })?
        .collect::<Result<Vec<f64>, rusqlite::Error>>()?;

    Ok(BarChart {
        price_range_counts: count_prices_by_range(&prices),
    })
}

/// Route handler for `/barchart?month=..`.
pub async fn get_bar_chart_endpoint(
    State(store): State<ProductStore>,
    query: Result<Query<MonthQuery>, QueryRejection>,
) -> Result<Json<BarChart>, Error> {
    let Query(query) = query?;
    let month = query.month()?;

    let bar_chart = store.read(move |connection| get_bar_chart(month, connection)).await?;

    Ok(Json(bar_chart))
}

#[cfg(test)]
mod tests {
    use serde_json::Value;
    use time::macros::date;

    use crate::{
        endpoints,
        month::Month,
        product::{Product, create_product},
        test_utils::{get_test_connection, get_test_server},
    };

    use super::{
        BarChart, PRICE_RANGES, count_prices_by_range, get_bar_chart, price_range_index,
    };

    #[test]
    fn labels_match_ranges() {
        let labels: Vec<_> = PRICE_RANGES.iter().map(|range| range.label()).collect();

        assert_eq!(
            labels,
            vec![
                "0-100", "101-200", "201-300", "301-400", "401-500", "501-600", "601-700",
                "701-800", "801-900", "901-above"
            ]
        );
    }

    #[test]
    fn bucket_boundaries_are_exact() {
        assert_eq!(price_range_index(0.0), 0);
        assert_eq!(price_range_index(100.0), 0);
        assert_eq!(price_range_index(100.5), 1);
        assert_eq!(price_range_index(101.0), 1);
        assert_eq!(price_range_index(200.0), 1);
        assert_eq!(price_range_index(900.0), 8);
        assert_eq!(price_range_index(900.01), 9);
        assert_eq!(price_range_index(901.0), 9);
        assert_eq!(price_range_index(1_000_000.0), 9);
    }

    #[test]
    fn negative_prices_fall_in_first_bucket() {
        assert_eq!(price_range_index(-5.0), 0);
    }

    #[test]
    fn counts_include_empty_buckets() {
        let got = count_prices_by_range(&[50.0, 100.0, 150.0, 5000.0]);

        assert_eq!(got.len(), PRICE_RANGES.len());
        let counts: Vec<_> = got.iter().map(|entry| entry.count).collect();
        assert_eq!(counts, vec![2, 1, 0, 0, 0, 0, 0, 0, 0, 1]);
        assert_eq!(got[9].price_range, "901-above");
    }

    #[test]
    fn no_prices_gives_ten_zero_buckets() {
        let got = count_prices_by_range(&[]);

        assert_eq!(got.len(), 10);
        assert!(got.iter().all(|entry| entry.count == 0));
    }

    #[test]
    fn bucket_counts_sum_to_priced_rows_in_month() {
        let conn = get_test_connection();
        let prices = [0.0, 99.99, 100.0, 101.0, 250.5, 899.0, 900.5, 12345.0];
        for price in prices {
            create_product(Product::build("p", "x", price, date!(2022 - 09 - 10)), &conn).unwrap();
        }
        create_product(Product::build("other", "x", 10.0, date!(2022 - 10 - 10)), &conn).unwrap();
        conn.execute(
            "INSERT INTO products (title, category, price, dateOfSale) \
            VALUES ('unpriced', 'x', NULL, '2022-09-11')",
            (),
        )
        .unwrap();

        for month in 1..=12 {
            let got = get_bar_chart(Month::new(month).unwrap(), &conn).unwrap();
            let total: u32 = got.price_range_counts.iter().map(|entry| entry.count).sum();
            let want = match month {
                9 => prices.len() as u32,
                10 => 1,
                _ => 0,
            };
            assert_eq!(total, want, "month {month}");
        }
    }

    #[tokio::test]
    async fn endpoint_returns_ordered_buckets() {
        let conn = get_test_connection();
        for price in [100.0, 101.0, 1_000_000.0] {
            create_product(Product::build("p", "x", price, date!(2022 - 04 - 10)), &conn).unwrap();
        }
        let server = get_test_server(conn);

        let response = server
            .get(endpoints::BAR_CHART)
            .add_query_param("month", "04")
            .await;

        response.assert_status_ok();
        let body = response.json::<BarChart>();
        assert_eq!(body.price_range_counts.len(), 10);
        assert_eq!(body.price_range_counts[0].price_range, "0-100");
        assert_eq!(body.price_range_counts[0].count, 1);
        assert_eq!(body.price_range_counts[1].price_range, "101-200");
        assert_eq!(body.price_range_counts[1].count, 1);
        assert_eq!(body.price_range_counts[9].price_range, "901-above");
        assert_eq!(body.price_range_counts[9].count, 1);
    }

    #[tokio::test]
    async fn endpoint_uses_camel_case_keys() {
        let server = get_test_server(get_test_connection());

        let response = server
            .get(endpoints::BAR_CHART)
            .add_query_param("month", "1")
            .await;

        let body = response.json::<Value>();
        assert_eq!(body["priceRangeCounts"][0]["priceRange"], "0-100");
        assert_eq!(body["priceRangeCounts"][0]["count"], 0);
    }

    #[tokio::test]
    async fn endpoint_rejects_missing_month() {
        let server = get_test_server(get_test_connection());

        server
            .get(endpoints::BAR_CHART)
            .await
            .assert_status_bad_request();
    }
}
