//! Dashboard configuration.
//!
//! All fields have defaults, so a YAML file only needs the keys it changes:
//!
//! ```yaml
//! panel_count: 6
//! plot_height: 400
//! roi_prefix: "MUSE_"
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::data::figure::{Layout, Margins};
use crate::data::overlay::OverlayParams;
use crate::data::stats;
use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Window title.
    pub title: String,
    /// Size of the panel slot pool.
    pub panel_count: usize,
    /// Figure height in points.
    pub plot_height: f32,
    /// Columns starting with this prefix are ROI (y) variables.
    pub roi_prefix: String,
    pub lowess_frac: f64,
    pub lowess_iterations: usize,
    /// Fill the band between consecutive centile lines.
    pub percentile_fill: bool,
    /// View-state token; keep it fixed to preserve zoom across updates.
    pub ui_revision: String,
    /// Margins as `[top, left, bottom, right]`.
    pub margins: [f32; 4],
    pub grid_color: [u8; 3],
    pub background: [u8; 3],
    /// Drop the first CSV column of user files loaded at startup (an exported
    /// row index). Uploads detect an index column from their header instead.
    pub user_index_column: bool,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            title: "NiChart".to_string(),
            panel_count: 4,
            plot_height: 800.0,
            roi_prefix: "MUSE_".to_string(),
            lowess_frac: stats::LOWESS_DEFAULT_FRAC,
            lowess_iterations: stats::LOWESS_DEFAULT_ITERATIONS,
            percentile_fill: true,
            ui_revision: "The User is always right".to_string(),
            margins: [50.0, 50.0, 50.0, 25.0],
            grid_color: [0xed, 0xed, 0xeb],
            background: [0xfa, 0xfa, 0xfa],
            user_index_column: true,
        }
    }
}

impl DashboardConfig {
    pub fn layout(&self) -> Layout {
        let [top, left, bottom, right] = self.margins;
        Layout {
            margins: Margins {
                top,
                left,
                bottom,
                right,
            },
            height: self.plot_height,
            grid_color: self.grid_color,
            paper_background: self.background,
            plot_background: self.background,
            ui_revision: self.ui_revision.clone(),
            ..Layout::default()
        }
    }

    pub fn overlay_params(&self) -> OverlayParams {
        OverlayParams {
            lowess_frac: self.lowess_frac,
            lowess_iterations: self.lowess_iterations,
            percentile_fill: self.percentile_fill,
        }
    }

    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path.as_ref())?;
        let cfg: DashboardConfig = serde_yaml::from_str(&text)?;
        info!(path = %path.as_ref().display(), "loaded dashboard config");
        Ok(cfg)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let text = serde_yaml::to_string(self)?;
        fs::write(path, text)?;
        Ok(())
    }
}
