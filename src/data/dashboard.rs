//! Dashboard session: dataset stores, panel slots, panel selections and the
//! figures composed from them.
//!
//! Every user interaction arrives as a [`DashboardEvent`] and is routed through
//! [`Dashboard::handle`], which mutates the affected panel's configuration and
//! recomposes its figure before returning. One `Dashboard` belongs to one
//! session; nothing is shared between sessions.

use std::collections::HashMap;
use std::path::Path;

use tracing::{info, warn};

use super::compose::{ComposeRequest, FigureComposer};
use super::dataset::Dataset;
use super::figure::Figure;
use super::overlay::OverlaySelection;
use super::panel_config::{PanelConfig, PanelConfigStore, VariableChoices};
use super::panel_registry::{PanelId, PanelRegistry, SizingClass};
use super::store::DatasetStore;
use super::trace_style::TraceStyle;
use crate::config::DashboardConfig;
use crate::error::{IngestError, StoreError};

#[cfg(feature = "events_debug")]
#[allow(unused_macros)]
macro_rules! events_debug { ($($arg:tt)*) => { tracing::debug!($($arg)*); } }

#[cfg(not(feature = "events_debug"))]
#[allow(unused_macros)]
macro_rules! events_debug {
    ($($arg:tt)*) => {{ /* no-op */ }};
}

/// Which of the two session stores a dataset belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatasetRole {
    /// Centile tables (e.g. population percentiles by age).
    Reference,
    /// Measurements being explored.
    User,
}

impl DatasetRole {
    pub fn label(&self) -> &'static str {
        match self {
            DatasetRole::Reference => "Reference",
            DatasetRole::User => "User data",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DashboardEvent {
    /// "New Plot": show the next hidden slot.
    AddPanel,
    /// Close button of a panel.
    RemovePanel(PanelId),
    SelectDataset {
        panel: PanelId,
        role: DatasetRole,
        key: String,
    },
    SetTraceStyle {
        panel: PanelId,
        style: TraceStyle,
    },
    ToggleOverlay {
        panel: PanelId,
        selection: OverlaySelection,
    },
    SetXVar {
        panel: PanelId,
        name: String,
    },
    SetYVar {
        panel: PanelId,
        name: String,
    },
}

pub struct Dashboard {
    config: DashboardConfig,
    reference: DatasetStore,
    user: DatasetStore,
    registry: PanelRegistry,
    panels: PanelConfigStore,
    composer: FigureComposer,
    figures: HashMap<PanelId, Figure>,
}

impl Dashboard {
    pub fn new(config: DashboardConfig) -> Self {
        let composer = FigureComposer::new(config.layout(), config.overlay_params());
        let mut dash = Self {
            registry: PanelRegistry::new(config.panel_count),
            panels: PanelConfigStore::new(config.panel_count),
            reference: DatasetStore::new(),
            user: DatasetStore::new(),
            composer,
            figures: HashMap::new(),
            config,
        };
        dash.recompose_visible();
        dash
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn store(&self, role: DatasetRole) -> &DatasetStore {
        match role {
            DatasetRole::Reference => &self.reference,
            DatasetRole::User => &self.user,
        }
    }

    pub fn registry(&self) -> &PanelRegistry {
        &self.registry
    }

    pub fn visible_panels(&self) -> Vec<PanelId> {
        self.registry.visible()
    }

    pub fn sizing_class(&self) -> SizingClass {
        self.registry.sizing_class()
    }

    pub fn panel_config(&self, id: PanelId) -> Option<&PanelConfig> {
        self.panels.get(id)
    }

    pub fn figure(&self, id: PanelId) -> Option<&Figure> {
        self.figures.get(&id)
    }

    /// x/y choices for a panel, taken from its selected user dataset.
    pub fn choices(&self, id: PanelId) -> VariableChoices {
        self.panels
            .get(id)
            .and_then(|cfg| cfg.user_key.as_deref())
            .and_then(|key| self.user.get(key).ok())
            .map(|ds| VariableChoices::from_dataset(ds, &self.config.roi_prefix))
            .unwrap_or_default()
    }

    /// Register a dataset under `key`. An existing key is never overwritten.
    ///
    /// Panels with no selection for `role` adopt the first registered key.
    pub fn register_dataset(
        &mut self,
        role: DatasetRole,
        key: impl Into<String>,
        dataset: Dataset,
    ) -> Result<(), StoreError> {
        let store = match role {
            DatasetRole::Reference => &mut self.reference,
            DatasetRole::User => &mut self.user,
        };
        store.put(key, dataset)?;
        let Some(first) = store.first_key().map(str::to_string) else {
            return Ok(());
        };
        for (_, cfg) in self.panels.iter_mut() {
            let slot = match role {
                DatasetRole::Reference => &mut cfg.reference_key,
                DatasetRole::User => &mut cfg.user_key,
            };
            if slot.is_none() {
                *slot = Some(first.clone());
            }
        }
        self.recompose_visible();
        Ok(())
    }

    /// Parse an uploaded CSV payload and register it. A parse failure leaves
    /// the stores untouched.
    ///
    /// A blank or `Unnamed: ...` first header cell marks an exported row index;
    /// that column is dropped. Every other column is kept.
    pub fn ingest_csv_str(
        &mut self,
        role: DatasetRole,
        key: &str,
        text: &str,
    ) -> Result<(), IngestError> {
        self.ingest_text(role, key, text, Dataset::has_index_header(text))
    }

    /// Read an uploaded CSV file and register it under its file stem.
    /// Returns the key used.
    pub fn ingest_csv_path(&mut self, role: DatasetRole, path: &Path) -> Result<String, IngestError> {
        let (key, text) = read_csv_file(path)?;
        self.ingest_csv_str(role, &key, &text)?;
        Ok(key)
    }

    /// Register a file named at startup. User files drop their first column
    /// when `user_index_column` is configured.
    pub fn preload_csv_path(&mut self, role: DatasetRole, path: &Path) -> Result<String, IngestError> {
        let (key, text) = read_csv_file(path)?;
        let index_column = (role == DatasetRole::User && self.config.user_index_column)
            || Dataset::has_index_header(&text);
        self.ingest_text(role, &key, &text, index_column)?;
        Ok(key)
    }

    fn ingest_text(
        &mut self,
        role: DatasetRole,
        key: &str,
        text: &str,
        index_column: bool,
    ) -> Result<(), IngestError> {
        let dataset = Dataset::from_csv_str(text, index_column).map_err(|e| {
            warn!(key, error = %e, "failed to parse uploaded dataset");
            e
        })?;
        self.register_dataset(role, key, dataset)?;
        Ok(())
    }

    /// Apply one interaction and recompose whatever it affects.
    ///
    /// Returns the panels whose figure was rebuilt.
    pub fn handle(&mut self, event: DashboardEvent) -> Vec<PanelId> {
        events_debug!(?event, "dashboard event");
        let target = match event {
            DashboardEvent::AddPanel => match self.registry.add_panel() {
                Some(id) => id,
                None => {
                    info!("all panel slots are already open");
                    return Vec::new();
                }
            },
            DashboardEvent::RemovePanel(id) => {
                self.registry.remove_panel(id);
                return Vec::new();
            }
            DashboardEvent::SelectDataset { panel, role, key } => {
                if !self.store(role).contains(&key) {
                    warn!(panel = %panel, key = %key, "selected dataset is not loaded");
                    return Vec::new();
                }
                let roi_prefix = self.config.roi_prefix.clone();
                let user = &self.user;
                let Some(cfg) = self.panels.get_mut(panel) else {
                    return Vec::new();
                };
                match role {
                    DatasetRole::Reference => cfg.reference_key = Some(key),
                    DatasetRole::User => {
                        if let Ok(ds) = user.get(&key) {
                            let choices = VariableChoices::from_dataset(ds, &roi_prefix);
                            if cfg.x_var.as_ref().is_some_and(|x| !choices.x.contains(x)) {
                                cfg.x_var = None;
                            }
                            if cfg.y_var.as_ref().is_some_and(|y| !choices.y.contains(y)) {
                                cfg.y_var = None;
                            }
                        }
                        cfg.user_key = Some(key);
                    }
                }
                panel
            }
            DashboardEvent::SetTraceStyle { panel, style } => {
                let Some(cfg) = self.panels.get_mut(panel) else {
                    return Vec::new();
                };
                cfg.style = style;
                panel
            }
            DashboardEvent::ToggleOverlay { panel, selection } => {
                let Some(cfg) = self.panels.get_mut(panel) else {
                    return Vec::new();
                };
                cfg.toggle_overlay(OverlaySelection::new(selection.overlay, selection.scope));
                panel
            }
            DashboardEvent::SetXVar { panel, name } => {
                let Some(cfg) = self.panels.get_mut(panel) else {
                    return Vec::new();
                };
                cfg.x_var = Some(name);
                panel
            }
            DashboardEvent::SetYVar { panel, name } => {
                let Some(cfg) = self.panels.get_mut(panel) else {
                    return Vec::new();
                };
                cfg.y_var = Some(name);
                panel
            }
        };

        if self.registry.is_visible(target) {
            self.recompose(target);
            vec![target]
        } else {
            Vec::new()
        }
    }

    fn recompose_visible(&mut self) {
        for id in self.registry.visible() {
            self.recompose(id);
        }
    }

    fn recompose(&mut self, id: PanelId) {
        let Some(cfg) = self.panels.get(id) else {
            return;
        };
        let layout = self.composer.layout.clone();
        let primary = cfg.user_key.as_deref().and_then(|k| self.user.get(k).ok());
        let reference = cfg
            .reference_key
            .as_deref()
            .and_then(|k| self.reference.get(k).ok());

        let figure = match primary {
            None => Figure::empty(layout),
            Some(ds) => {
                let choices = VariableChoices::from_dataset(ds, &self.config.roi_prefix);
                let x = cfg.x_var.as_deref().or(choices.default_x());
                let y = cfg.y_var.as_deref().or(choices.default_y());
                match (x, y) {
                    (Some(x), Some(y)) => {
                        let req = ComposeRequest {
                            primary: Some(ds),
                            reference,
                            style: cfg.style,
                            overlays: &cfg.overlays,
                            x,
                            y,
                        };
                        self.composer.compose(&req).unwrap_or_else(|e| {
                            warn!(panel = %id, error = %e, "rendering empty figure");
                            Figure::empty(layout)
                        })
                    }
                    _ => {
                        warn!(panel = %id, "dataset has no plottable x/y variables");
                        Figure::empty(layout)
                    }
                }
            }
        };
        self.figures.insert(id, figure);
    }
}

/// File stem (the dataset key) and contents of a CSV file.
fn read_csv_file(path: &Path) -> Result<(String, String), IngestError> {
    let key = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let text = std::fs::read_to_string(path).map_err(|e| {
        warn!(path = %path.display(), error = %e, "failed to read dataset file");
        IngestError::Dataset(e.into())
    })?;
    Ok((key, text))
}
