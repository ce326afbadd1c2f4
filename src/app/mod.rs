//! Native dashboard window.
//!
//! | Sub-module        | Responsibility |
//! | ----------------- | -------------- |
//! | [`dashboard_app`] | [`DashboardApp`] (eframe) wrapper: sidebar, panel grid, event dispatch |
//! | [`run`]           | Top-level [`run_dashboard()`] entry point and icon loading |

mod dashboard_app;
mod run;

pub use dashboard_app::DashboardApp;
pub use run::{run_dashboard, DataSources};
