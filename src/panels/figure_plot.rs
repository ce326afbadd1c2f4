//! Draw a composed [`Figure`] with egui_plot.

use eframe::egui;
use egui::{Color32, Stroke, Ui};
use egui_plot::{Legend, Line, Plot, PlotPoints, Points, Polygon};

use crate::data::figure::{Figure, Layout};
use crate::data::trace_look::TraceLook;

fn rgb(c: [u8; 3]) -> Color32 {
    Color32::from_rgb(c[0], c[1], c[2])
}

fn margin(layout: &Layout) -> egui::Margin {
    let m = layout.margins;
    let px = |v: f32| (v * 0.25).round().clamp(0.0, 127.0) as i8;
    egui::Margin {
        left: px(m.left),
        right: px(m.right),
        top: px(m.top),
        bottom: px(m.bottom),
    }
}

/// Band polygon between `lower` and `upper`: lower left-to-right, upper back.
fn band_polygon(lower: &[[f64; 2]], upper: &[[f64; 2]]) -> Vec<[f64; 2]> {
    lower
        .iter()
        .copied()
        .chain(upper.iter().rev().copied())
        .collect()
}

/// Render `figure` into `ui`.
///
/// `plot_id` must stay the same across recompositions for egui_plot to keep
/// the current pan/zoom; it is derived from the layout's `ui_revision` token.
pub fn show_figure(ui: &mut Ui, figure: &Figure, plot_id: egui::Id) {
    let layout = &figure.layout;
    let height = ui.available_height().min(layout.height).max(120.0);

    egui::Frame::default()
        .fill(rgb(layout.paper_background))
        .inner_margin(margin(layout))
        .show(ui, |ui| {
            if figure.is_empty() {
                ui.allocate_ui(egui::vec2(ui.available_width(), height), |ui| {
                    ui.centered_and_justified(|ui| {
                        ui.weak("No data selected");
                    });
                });
                return;
            }

            let mut plot = Plot::new(plot_id)
                .height(height)
                .show_grid(layout.show_grid)
                .legend(Legend::default());
            if let Some(x) = &layout.x_title {
                plot = plot.x_axis_label(x.clone());
            }
            if let Some(y) = &layout.y_title {
                plot = plot.y_axis_label(y.clone());
            }

            plot.show(ui, |plot_ui| {
                let mut previous: Option<Vec<[f64; 2]>> = None;
                for (index, layer) in figure.layers.iter().enumerate() {
                    let look = TraceLook::for_layer(index, layer);
                    let pts = layer.points();
                    // Empty names keep a layer out of the legend.
                    let name = if layer.show_legend {
                        layer.name.clone()
                    } else {
                        String::new()
                    };

                    if let (Some(fill), Some(prev)) = (look.fill_color, previous.as_ref()) {
                        let band = band_polygon(prev, &pts);
                        plot_ui.polygon(
                            Polygon::new("", PlotPoints::from(band))
                                .fill_color(fill)
                                .stroke(Stroke::NONE),
                        );
                    }
                    if look.show_line {
                        plot_ui.line(
                            Line::new(name.clone(), pts.clone())
                                .color(look.color)
                                .width(look.width)
                                .style(look.style),
                        );
                    }
                    if look.show_points && !pts.is_empty() {
                        plot_ui.points(
                            Points::new(name, pts.clone())
                                .radius(look.point_size)
                                .shape(look.marker)
                                .color(look.color),
                        );
                    }
                    previous = Some(pts);
                }
            });
        });
}
