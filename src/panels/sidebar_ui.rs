//! Left sidebar: dataset uploads, loaded datasets and the "New Plot" button.

use eframe::egui;
use egui::Ui;
use egui_phosphor::regular as icons;
use tracing::info;

use crate::data::dashboard::{Dashboard, DashboardEvent, DatasetRole};
use crate::data::panel_config::VariableChoices;

#[derive(Default)]
pub struct SidebarUi {
    /// Last ingestion problem, shown until the next successful upload.
    last_error: Option<String>,
}

impl SidebarUi {
    pub const NEW_PLOT_LABEL: &'static str = "New Plot";

    pub fn ui(&mut self, ui: &mut Ui, dashboard: &mut Dashboard, events: &mut Vec<DashboardEvent>) {
        ui.heading(dashboard.config().title.clone());
        ui.separator();

        for role in [DatasetRole::User, DatasetRole::Reference] {
            self.render_store(ui, dashboard, role);
            ui.separator();
        }

        if let Some(err) = &self.last_error {
            ui.colored_label(egui::Color32::LIGHT_RED, err);
            ui.separator();
        }

        let all_open = dashboard.registry().visible_count() >= dashboard.registry().capacity();
        let resp = ui.add_enabled(
            !all_open,
            egui::Button::new(format!("{} {}", icons::PLUS, Self::NEW_PLOT_LABEL)),
        );
        if resp.clicked() {
            events.push(DashboardEvent::AddPanel);
        }
    }

    fn render_store(&mut self, ui: &mut Ui, dashboard: &mut Dashboard, role: DatasetRole) {
        ui.strong(role.label());
        if ui
            .button(format!("{} Upload...", icons::UPLOAD_SIMPLE))
            .on_hover_text("Load one or more CSV files")
            .clicked()
        {
            if let Some(paths) = rfd::FileDialog::new()
                .add_filter("CSV", &["csv"])
                .pick_files()
            {
                self.last_error = None;
                for path in paths {
                    match dashboard.ingest_csv_path(role, &path) {
                        Ok(key) => info!(key = %key, ?role, "uploaded dataset"),
                        Err(e) => {
                            self.last_error = Some(format!("{}: {e}", path.display()));
                        }
                    }
                }
            }
        }

        let roi_prefix = dashboard.config().roi_prefix.clone();
        let store = dashboard.store(role);
        if store.is_empty() {
            ui.weak("No datasets loaded");
            return;
        }
        egui::Grid::new(("dataset_summary", role.label()))
            .striped(true)
            .show(ui, |ui| {
                for key in store.list_keys() {
                    ui.label(key);
                    if let Ok(ds) = store.get(key) {
                        ui.label(format!("{} rows", ds.len()));
                        if role == DatasetRole::User {
                            for roi in dataset_summary(ds, &roi_prefix) {
                                ui.label(roi);
                            }
                        }
                    }
                    ui.end_row();
                }
            });
    }
}

/// Means of the first two ROI columns, formatted for the summary grid.
fn dataset_summary(ds: &crate::data::dataset::Dataset, roi_prefix: &str) -> Vec<String> {
    let choices = VariableChoices::from_dataset(ds, roi_prefix);
    choices
        .y
        .iter()
        .take(2)
        .filter_map(|name| {
            let mean = ds.column_mean(name).ok().flatten()?;
            Some(format!("{}: {:.1}", name.trim_start_matches(roi_prefix), mean))
        })
        .collect()
}
