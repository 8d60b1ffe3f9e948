//! The API endpoints URIs.

/// The route listing a summary of every product.
pub const ROOT: &str = "/";
/// The route listing the products of a month, optionally filtered by search text.
pub const ALL: &str = "/all";
/// The route for the summary statistics of a month.
pub const STATISTICS: &str = "/statistics";
/// The route for the price histogram of a month.
pub const BAR_CHART: &str = "/barchart";
/// The route for the category breakdown of a month.
pub const PIE_CHART: &str = "/piechart";
/// The route for the statistics, bar chart and pie chart of a month in one response.
pub const COMBINED_DATA: &str = "/combinedData";
