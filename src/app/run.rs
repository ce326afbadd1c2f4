//! Top-level entry point for running the dashboard as a native window.

use std::path::PathBuf;

use eframe::egui;
use tracing::{info, warn};

use crate::config::DashboardConfig;
use crate::data::dashboard::{Dashboard, DatasetRole};

use super::dashboard_app::DashboardApp;

/// CSV files to load into the session stores before the window opens.
#[derive(Debug, Clone, Default)]
pub struct DataSources {
    pub reference: Vec<PathBuf>,
    pub user: Vec<PathBuf>,
}

impl DataSources {
    fn load_into(&self, dashboard: &mut Dashboard) {
        let files = self
            .reference
            .iter()
            .map(|p| (DatasetRole::Reference, p))
            .chain(self.user.iter().map(|p| (DatasetRole::User, p)));
        for (role, path) in files {
            match dashboard.preload_csv_path(role, path) {
                Ok(key) => info!(key = %key, ?role, "preloaded dataset"),
                Err(e) => warn!(path = %path.display(), error = %e, "skipping dataset"),
            }
        }
    }
}

/// Launch the dashboard in a native window.
///
/// Datasets in `sources` are ingested first; files that fail to load are
/// logged and skipped. The call blocks until the window is closed.
pub fn run_dashboard(config: DashboardConfig, sources: DataSources) -> eframe::Result<()> {
    let title = config.title.clone();
    let mut dashboard = Dashboard::new(config);
    sources.load_into(&mut dashboard);
    let app = DashboardApp::new(dashboard);

    let mut viewport = egui::ViewportBuilder::default().with_inner_size(egui::vec2(1400.0, 900.0));
    if let Some(icon) = load_app_icon_svg() {
        viewport = viewport.with_icon(icon);
    }
    let opts = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        &title,
        opts,
        Box::new(|cc| {
            let mut fonts = egui::FontDefinitions::default();
            egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
            cc.egui_ctx.set_fonts(fonts);
            Ok(Box::new(app))
        }),
    )
}

/// Render the crate's `icon.svg` to an [`egui::IconData`], if it can be read.
fn load_app_icon_svg() -> Option<egui::IconData> {
    let svg_path = concat!(env!("CARGO_MANIFEST_DIR"), "/icon.svg");
    let data = std::fs::read(svg_path).ok()?;

    let opt = usvg::Options::default();
    let tree = usvg::Tree::from_data(&data, &opt).ok()?;
    let size = tree.size().to_int_size();
    if size.width() == 0 || size.height() == 0 {
        return None;
    }
    let mut pixmap = tiny_skia::Pixmap::new(size.width(), size.height())?;
    let mut canvas = pixmap.as_mut();
    resvg::render(&tree, tiny_skia::Transform::default(), &mut canvas);
    Some(egui::IconData {
        rgba: pixmap.take(),
        width: size.width(),
        height: size.height(),
    })
}
