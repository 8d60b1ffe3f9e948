//! The combined report, which merges the statistics, bar chart and pie chart for a month.

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    month::{Month, MonthQuery},
    store::ProductStore,
};

use super::{
    bar_chart::{BarChart, get_bar_chart},
    pie_chart::{PieChart, get_pie_chart},
    statistics::{Statistics, get_statistics},
};

/// Every report for a month in one response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinedReport {
    /// Same as the body of `/statistics`.
    pub statistics: Statistics,
    /// Same as the body of `/barchart`.
    pub bar_chart: BarChart,
    /// Same as the body of `/piechart`.
    pub pie_chart: PieChart,
}

/// Build the three reports for `month` concurrently and merge them.
///
/// # Errors
/// Returns the first error from any of the three reports. No partial report is returned.
pub async fn get_combined_report(
    store: &ProductStore,
    month: Month,
) -> Result<CombinedReport, Error> {
    let (statistics, bar_chart, pie_chart) = tokio::try_join!(
        store.read(move |connection| get_statistics(month, connection)),
        store.read(move |connection| get_bar_chart(month, connection)),
        store.read(move |connection| get_pie_chart(month, connection)),
    )?;

    Ok(CombinedReport {
        statistics,
        bar_chart,
        pie_chart,
    })
}

/// Route handler for `/combinedData?month=..`.
pub async fn get_combined_data_endpoint(
    State(store): State<ProductStore>,
    query: Result<Query<MonthQuery>, QueryRejection>,
) -> Result<Json<CombinedReport>, Error> {
    let Query(query) = query?;
    let month = query.month()?;

    let report = get_combined_report(&store, month).await?;

    Ok(Json(report))
}
