//! Per-panel selections and the choices offered to the user.

use serde::{Deserialize, Serialize};

use super::dataset::Dataset;
use super::overlay::{Overlay, OverlayScope, OverlaySelection};
use super::panel_registry::PanelId;
use super::trace_style::TraceStyle;
use crate::error::FigureError;

/// Mutable state of one panel. Datasets are referenced by store key only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PanelConfig {
    pub reference_key: Option<String>,
    pub user_key: Option<String>,
    pub style: TraceStyle,
    /// Overlays in the order they were selected; this is also render order.
    pub overlays: Vec<OverlaySelection>,
    pub x_var: Option<String>,
    pub y_var: Option<String>,
}

impl PanelConfig {
    pub fn has_overlay(&self, sel: OverlaySelection) -> bool {
        self.overlays.contains(&sel)
    }

    /// Select `sel` (appended last) or deselect it if already selected.
    /// Returns whether it is selected afterwards.
    pub fn toggle_overlay(&mut self, sel: OverlaySelection) -> bool {
        if let Some(pos) = self.overlays.iter().position(|o| *o == sel) {
            self.overlays.remove(pos);
            false
        } else {
            self.overlays.push(sel);
            true
        }
    }

    /// Set or clear an overlay without disturbing the order of the others.
    pub fn set_overlay(&mut self, sel: OverlaySelection, on: bool) {
        if on != self.has_overlay(sel) {
            self.toggle_overlay(sel);
        }
    }

    pub fn set_style_id(&mut self, id: &str) -> Result<(), FigureError> {
        self.style = id.parse()?;
        Ok(())
    }

    /// Replace the overlay list from ids, each with its default scope. On an
    /// unknown id the current list is left untouched.
    pub fn set_overlay_ids(&mut self, ids: &[&str]) -> Result<(), FigureError> {
        let parsed = ids
            .iter()
            .map(|id| id.parse::<OverlaySelection>())
            .collect::<Result<Vec<_>, _>>()?;
        self.overlays.clear();
        for sel in parsed {
            self.set_overlay(sel, true);
        }
        Ok(())
    }
}

/// One [`PanelConfig`] per slot, independent of slot visibility.
#[derive(Debug, Clone)]
pub struct PanelConfigStore {
    configs: Vec<PanelConfig>,
}

impl PanelConfigStore {
    pub fn new(capacity: usize) -> Self {
        Self {
            configs: vec![PanelConfig::default(); capacity.max(1)],
        }
    }

    pub fn get(&self, id: PanelId) -> Option<&PanelConfig> {
        self.configs.get(id.slot())
    }

    pub fn get_mut(&mut self, id: PanelId) -> Option<&mut PanelConfig> {
        self.configs.get_mut(id.slot())
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (PanelId, &mut PanelConfig)> {
        self.configs
            .iter_mut()
            .enumerate()
            .map(|(i, c)| (PanelId(i), c))
    }
}

/// Overlays offered in the "Reference Layers" menu.
pub const REFERENCE_LAYER_OPTIONS: [OverlaySelection; 2] = [
    OverlaySelection {
        overlay: Overlay::Percentile,
        scope: OverlayScope::Reference,
    },
    OverlaySelection {
        overlay: Overlay::Lowess,
        scope: OverlayScope::Reference,
    },
];

/// Overlays offered in the "Data Layers" menu.
pub const DATA_LAYER_OPTIONS: [OverlaySelection; 2] = [
    OverlaySelection {
        overlay: Overlay::LinReg,
        scope: OverlayScope::Dataset,
    },
    OverlaySelection {
        overlay: Overlay::Lowess,
        scope: OverlayScope::Dataset,
    },
];

/// Variable names a panel can pick from for a given dataset.
///
/// Columns whose name starts with the ROI prefix are y candidates; all other
/// columns are x candidates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariableChoices {
    pub x: Vec<String>,
    pub y: Vec<String>,
}

impl VariableChoices {
    pub fn from_dataset(dataset: &Dataset, roi_prefix: &str) -> Self {
        let (y, x): (Vec<String>, Vec<String>) = dataset
            .column_names()
            .map(str::to_string)
            .partition(|name| name.starts_with(roi_prefix));
        Self { x, y }
    }

    pub fn default_x(&self) -> Option<&str> {
        self.x.first().map(String::as_str)
    }

    pub fn default_y(&self) -> Option<&str> {
        self.y.first().map(String::as_str)
    }
}
