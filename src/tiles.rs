//! Grid layout of the visible panels using `egui_tiles`.

use eframe::egui;
use egui_tiles::{Behavior, Container, ContainerKind, TileId, Tiles, Tree, UiResponse};

use crate::data::dashboard::{Dashboard, DashboardEvent};
use crate::data::panel_registry::{PanelId, SizingClass};
use crate::panels::PlotPanelUi;

/// Identifier stored inside an `egui_tiles::Tree`, referencing a panel slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PanelPaneRef {
    pub panel: PanelId,
}

/// Lay out `panels` in rows of `sizing.columns()` (rows filled top-down).
pub fn build_grid_tree(
    tree_id: &'static str,
    panels: &[PanelId],
    sizing: SizingClass,
) -> Tree<PanelPaneRef> {
    let columns = sizing.columns().max(1);
    if panels.is_empty() {
        return Tree::empty(tree_id);
    }

    let mut tiles: Tiles<PanelPaneRef> = Tiles::default();
    let pane_ids: Vec<_> = panels
        .iter()
        .map(|&panel| tiles.insert_pane(PanelPaneRef { panel }))
        .collect();

    let mut rows = Vec::new();
    for chunk in pane_ids.chunks(columns) {
        rows.push(
            tiles.insert_container(Container::new(ContainerKind::Horizontal, chunk.to_vec())),
        );
    }

    let root = if rows.len() == 1 {
        rows[0]
    } else {
        tiles.insert_container(Container::new(ContainerKind::Vertical, rows))
    };

    Tree::new(tree_id, root, tiles)
}

/// Render the tree into the available region. Panel interactions are
/// collected into `events`.
pub fn render_tile_grid(
    ui: &mut egui::Ui,
    tree: &mut Tree<PanelPaneRef>,
    panel_uis: &mut [PlotPanelUi],
    dashboard: &Dashboard,
    events: &mut Vec<DashboardEvent>,
) {
    let desired = ui.available_size();
    if desired.min_elem() <= 0.0 {
        ui.label("Expand the window to see the plots.");
        return;
    }

    ui.allocate_ui(desired, |dashboard_ui| {
        dashboard_ui.set_min_size(desired);
        dashboard_ui.set_clip_rect(dashboard_ui.max_rect());
        tree.set_width(desired.x);
        tree.set_height(desired.y);
        let mut behavior = PanelTilesBehavior {
            panel_uis,
            dashboard,
            events,
        };
        tree.ui(&mut behavior, dashboard_ui);
    });
}

struct PanelTilesBehavior<'a> {
    panel_uis: &'a mut [PlotPanelUi],
    dashboard: &'a Dashboard,
    events: &'a mut Vec<DashboardEvent>,
}

impl<'a> Behavior<PanelPaneRef> for PanelTilesBehavior<'a> {
    fn tab_title_for_pane(&mut self, pane: &PanelPaneRef) -> egui::WidgetText {
        pane.panel.to_string().into()
    }

    fn pane_ui(
        &mut self,
        ui: &mut egui::Ui,
        _tile_id: TileId,
        pane: &mut PanelPaneRef,
    ) -> UiResponse {
        match self.panel_uis.get_mut(pane.panel.slot()) {
            Some(panel_ui) => {
                egui::Frame::group(ui.style())
                    .inner_margin(egui::Margin::symmetric(8, 6))
                    .show(ui, |ui| {
                        ui.set_min_size(ui.available_size());
                        panel_ui.ui(ui, self.dashboard, self.events);
                    });
            }
            None => {
                ui.colored_label(egui::Color32::LIGHT_RED, "Missing plot panel");
            }
        }
        UiResponse::None
    }
}
