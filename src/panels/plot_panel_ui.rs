//! One dashboard panel: top bar, layer menu and chart.
//!
//! The panel never mutates the dashboard directly; every interaction is pushed
//! as a [`DashboardEvent`] and applied by the app after the frame is laid out.

use eframe::egui;
use egui::Ui;
use egui_phosphor::regular as icons;
use tracing::warn;

use crate::data::dashboard::{Dashboard, DashboardEvent, DatasetRole};
use crate::data::overlay::OverlaySelection;
use crate::data::panel_config::{DATA_LAYER_OPTIONS, REFERENCE_LAYER_OPTIONS};
use crate::data::panel_registry::PanelId;
use crate::data::trace_style::TraceStyle;

use super::figure_plot::show_figure;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MenuTab {
    #[default]
    Style,
    ReferenceLayers,
    DataLayers,
}

impl MenuTab {
    const ALL: [MenuTab; 3] = [MenuTab::Style, MenuTab::ReferenceLayers, MenuTab::DataLayers];

    fn title(&self) -> &'static str {
        match self {
            MenuTab::Style => "Style",
            MenuTab::ReferenceLayers => "Reference Layers",
            MenuTab::DataLayers => "Data Layers",
        }
    }
}

/// UI-only state of a panel (menu visibility and active tab).
pub struct PlotPanelUi {
    id: PanelId,
    menu_open: bool,
    menu_tab: MenuTab,
}

impl PlotPanelUi {
    pub const CLOSE_LABEL: &'static str = icons::X;
    pub const EXPORT_LABEL: &'static str = "Export figure JSON...";

    pub fn new(id: PanelId) -> Self {
        Self {
            id,
            menu_open: false,
            menu_tab: MenuTab::default(),
        }
    }

    pub fn id(&self) -> PanelId {
        self.id
    }

    pub fn title(&self) -> String {
        self.id.to_string()
    }

    pub fn ui(&mut self, ui: &mut Ui, dashboard: &Dashboard, events: &mut Vec<DashboardEvent>) {
        self.render_top_bar(ui, dashboard, events);
        if self.menu_open {
            ui.separator();
            self.render_menu(ui, dashboard, events);
        }
        ui.add_space(4.0);
        if let Some(figure) = dashboard.figure(self.id) {
            let plot_id = egui::Id::new((figure.layout.ui_revision.as_str(), self.id));
            show_figure(ui, figure, plot_id);
        }
    }

    fn render_top_bar(&mut self, ui: &mut Ui, dashboard: &Dashboard, events: &mut Vec<DashboardEvent>) {
        let Some(cfg) = dashboard.panel_config(self.id) else {
            return;
        };
        let choices = dashboard.choices(self.id);
        ui.horizontal(|ui| {
            if ui
                .selectable_label(self.menu_open, format!("{} {}", self.id, icons::LIST))
                .on_hover_text("Show or hide the layer menu")
                .clicked()
            {
                self.menu_open = !self.menu_open;
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui
                    .button(Self::CLOSE_LABEL)
                    .on_hover_text("Close this plot")
                    .clicked()
                {
                    events.push(DashboardEvent::RemovePanel(self.id));
                }

                let y_sel = cfg.y_var.clone().or(choices.default_y().map(str::to_string));
                if let Some(name) = self.combo(ui, "yvar", y_sel.as_deref(), &choices.y, "ROI") {
                    events.push(DashboardEvent::SetYVar { panel: self.id, name });
                }
                let x_sel = cfg.x_var.clone().or(choices.default_x().map(str::to_string));
                if let Some(name) = self.combo(ui, "xvar", x_sel.as_deref(), &choices.x, "X") {
                    events.push(DashboardEvent::SetXVar { panel: self.id, name });
                }
                for role in [DatasetRole::User, DatasetRole::Reference] {
                    let selected = match role {
                        DatasetRole::Reference => cfg.reference_key.as_deref(),
                        DatasetRole::User => cfg.user_key.as_deref(),
                    };
                    let keys = dashboard.store(role).list_keys();
                    let salt = match role {
                        DatasetRole::Reference => "refdata",
                        DatasetRole::User => "userdata",
                    };
                    if let Some(key) = self.combo(ui, salt, selected, keys, role.label()) {
                        events.push(DashboardEvent::SelectDataset {
                            panel: self.id,
                            role,
                            key,
                        });
                    }
                }
            });
        });
    }

    /// Dropdown over `options`; returns the newly picked entry, if any.
    fn combo(
        &self,
        ui: &mut Ui,
        salt: &str,
        selected: Option<&str>,
        options: &[String],
        placeholder: &str,
    ) -> Option<String> {
        let mut picked = None;
        egui::ComboBox::from_id_salt((self.id, salt))
            .selected_text(selected.unwrap_or(placeholder))
            .width(120.0)
            .show_ui(ui, |ui| {
                for opt in options {
                    let is_sel = selected == Some(opt.as_str());
                    if ui.selectable_label(is_sel, opt).clicked() && !is_sel {
                        picked = Some(opt.clone());
                    }
                }
            });
        picked
    }

    fn render_menu(&mut self, ui: &mut Ui, dashboard: &Dashboard, events: &mut Vec<DashboardEvent>) {
        let Some(cfg) = dashboard.panel_config(self.id) else {
            return;
        };
        ui.horizontal(|ui| {
            for tab in MenuTab::ALL {
                ui.selectable_value(&mut self.menu_tab, tab, tab.title());
            }
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button(Self::EXPORT_LABEL).clicked() {
                    self.export_figure(dashboard);
                }
            });
        });

        match self.menu_tab {
            MenuTab::Style => {
                ui.horizontal(|ui| {
                    for style in TraceStyle::ALL {
                        if ui.radio(cfg.style == style, style.label()).clicked()
                            && cfg.style != style
                        {
                            events.push(DashboardEvent::SetTraceStyle {
                                panel: self.id,
                                style,
                            });
                        }
                    }
                });
            }
            MenuTab::ReferenceLayers => {
                self.layer_checklist(ui, &REFERENCE_LAYER_OPTIONS, &cfg.overlays, events)
            }
            MenuTab::DataLayers => {
                self.layer_checklist(ui, &DATA_LAYER_OPTIONS, &cfg.overlays, events)
            }
        }
    }

    fn layer_checklist(
        &self,
        ui: &mut Ui,
        options: &[OverlaySelection],
        selected: &[OverlaySelection],
        events: &mut Vec<DashboardEvent>,
    ) {
        ui.horizontal(|ui| {
            for sel in options {
                let mut on = selected.contains(sel);
                if ui.checkbox(&mut on, sel.overlay.label()).changed() {
                    events.push(DashboardEvent::ToggleOverlay {
                        panel: self.id,
                        selection: *sel,
                    });
                }
            }
        });
    }

    fn export_figure(&self, dashboard: &Dashboard) {
        let Some(figure) = dashboard.figure(self.id) else {
            return;
        };
        let Some(path) = rfd::FileDialog::new()
            .set_file_name(format!("{}.json", self.id))
            .add_filter("JSON", &["json"])
            .save_file()
        else {
            return;
        };
        let result = figure
            .to_json()
            .map_err(std::io::Error::other)
            .and_then(|json| std::fs::write(&path, json));
        if let Err(e) = result {
            warn!(path = %path.display(), error = %e, "failed to export figure");
        }
    }
}
