//! Monthly reports over the products table.
//!
//! Provides summary statistics, a price histogram (bar chart), a category
//! breakdown (pie chart), and a combined report that builds all three at once.

mod bar_chart;
mod combined;
mod pie_chart;
mod statistics;

pub use bar_chart::{
    BarChart, PRICE_RANGES, PriceRange, PriceRangeCount, get_bar_chart, get_bar_chart_endpoint,
};
pub use combined::{CombinedReport, get_combined_data_endpoint, get_combined_report};
pub use pie_chart::{CategoryCount, PieChart, get_pie_chart, get_pie_chart_endpoint};
pub use statistics::{Statistics, get_statistics, get_statistics_endpoint};
