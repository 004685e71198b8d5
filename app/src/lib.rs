//! Prism frontend: presentational chart components over ECharts.
//!
//! The components here own no business logic. They feed derived data from
//! `prism-types` (legend items, metric rows, color bands) into declarative
//! ECharts option objects and hand those to the external renderer through
//! the interop layer in [`echarts`].

#![allow(non_snake_case)]

pub mod app;
pub mod components;
pub mod echarts;
pub mod format;
