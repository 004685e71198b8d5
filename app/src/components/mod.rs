//! Chart components.
//!
//! Each component is presentational: it derives view state from props via
//! the aggregator in `prism-types` and hands chart configuration to the
//! external renderer.

pub mod chart_legend;
pub mod chart_metrics;
pub mod funnel_chart;
pub mod percent_bar_chart;
pub mod pie_chart;

pub use chart_legend::ChartLegend;
pub use chart_metrics::ChartMetrics;
pub use funnel_chart::FunnelChart;
pub use percent_bar_chart::PercentBarChart;
pub use pie_chart::PieChart;
