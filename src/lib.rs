//! NiChart crate root: re-exports and module wiring.
//!
//! A multi-panel dashboard for exploring neuroimaging ROI measurements
//! against reference centile curves, built on egui/eframe:
//! - `data`: datasets, stores, overlays, figure composition and the
//!   [`Dashboard`] session controller (no UI dependencies beyond colors)
//! - `panels`: egui widgets for one plot panel and the dataset sidebar
//! - `tiles`: grid layout of the visible panels
//! - `app`: the eframe application and [`run_dashboard`]
//! - `config`: YAML-backed [`DashboardConfig`]

pub mod app;
pub mod config;
pub mod data;
pub mod error;
pub mod logging;
pub mod panels;
pub mod tiles;

// Public re-exports for a compact external API
pub use app::{run_dashboard, DashboardApp, DataSources};
pub use config::DashboardConfig;
pub use data::compose::{ComposeRequest, FigureComposer};
pub use data::dashboard::{Dashboard, DashboardEvent, DatasetRole};
pub use data::dataset::{Column, Dataset, Value};
pub use data::figure::{Figure, Layer, Layout};
pub use data::overlay::{Overlay, OverlayParams, OverlayScope, OverlaySelection};
pub use data::panel_registry::{PanelId, PanelRegistry, SizingClass};
pub use data::store::DatasetStore;
pub use data::trace_style::TraceStyle;
pub use error::{ConfigError, DatasetError, FigureError, IngestError, StoreError};
pub use logging::init_logging;
