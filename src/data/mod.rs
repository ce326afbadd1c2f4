pub mod compose;
pub mod dashboard;
pub mod dataset;
pub mod figure;
pub mod overlay;
pub mod panel_config;
pub mod panel_registry;
pub mod stats;
pub mod store;
pub mod trace_look;
pub mod trace_style;
