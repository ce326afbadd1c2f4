//! Standalone application wrapper for the dashboard.
//!
//! [`DashboardApp`] owns a [`Dashboard`] session plus the per-panel UI state
//! and implements [`eframe::App`]. Widgets only queue [`DashboardEvent`]s;
//! the queue is drained into [`Dashboard::handle`] at the end of each frame.

use eframe::egui;
use egui_tiles::Tree;
use tracing::debug;

use crate::data::dashboard::{Dashboard, DashboardEvent};
use crate::data::panel_registry::PanelId;
use crate::panels::{PlotPanelUi, SidebarUi};
use crate::tiles::{build_grid_tree, render_tile_grid, PanelPaneRef};

const TREE_ID: &str = "nichart_panels";

pub struct DashboardApp {
    pub dashboard: Dashboard,
    /// One entry per panel slot, indexed by [`PanelId::slot`].
    panel_uis: Vec<PlotPanelUi>,
    sidebar: SidebarUi,
    tree: Tree<PanelPaneRef>,
    /// Visible set the current `tree` was built for.
    tree_key: Vec<PanelId>,
}

impl DashboardApp {
    pub fn new(dashboard: Dashboard) -> Self {
        let panel_uis = dashboard
            .registry()
            .all_ids()
            .map(PlotPanelUi::new)
            .collect();
        let tree_key = dashboard.visible_panels();
        let tree = build_grid_tree(TREE_ID, &tree_key, dashboard.sizing_class());
        Self {
            dashboard,
            panel_uis,
            sidebar: SidebarUi::default(),
            tree,
            tree_key,
        }
    }

    /// Rebuild the tile tree when panels were opened or closed.
    fn sync_tree(&mut self) {
        let visible = self.dashboard.visible_panels();
        if visible != self.tree_key {
            let sizing = self.dashboard.sizing_class();
            debug!(panels = visible.len(), ?sizing, "rebuilding panel grid");
            self.tree = build_grid_tree(TREE_ID, &visible, sizing);
            self.tree_key = visible;
        }
    }

    /// Apply queued events in order.
    pub fn apply_events(&mut self, events: Vec<DashboardEvent>) {
        for event in events {
            self.dashboard.handle(event);
        }
        self.sync_tree();
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let mut events = Vec::new();

        egui::SidePanel::left("datasets")
            .resizable(true)
            .default_width(260.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    self.sidebar.ui(ui, &mut self.dashboard, &mut events);
                });
            });

        // Uploads in the sidebar may have changed what the panels show.
        self.sync_tree();

        egui::CentralPanel::default().show(ctx, |ui| {
            if self.tree_key.is_empty() {
                ui.centered_and_justified(|ui| {
                    ui.weak(format!("Press \"{}\" to open a plot", SidebarUi::NEW_PLOT_LABEL));
                });
                return;
            }
            render_tile_grid(
                ui,
                &mut self.tree,
                &mut self.panel_uis,
                &self.dashboard,
                &mut events,
            );
        });

        if !events.is_empty() {
            self.apply_events(events);
            ctx.request_repaint();
        }
    }
}
