//! TraceLook: visual styling for figure layers.

use eframe::egui;
use egui_plot::{LineStyle, MarkerShape};

use super::figure::{Fill, Layer, RenderKind};

/// The visual presentation of a layer (color, line style, markers).
#[derive(Debug, Clone)]
pub struct TraceLook {
    pub color: egui::Color32,
    pub width: f32,
    pub show_line: bool,
    pub show_points: bool,
    pub style: LineStyle,
    pub point_size: f32,
    pub marker: MarkerShape,
    /// Color of the band to the previous layer, if the layer has a fill.
    pub fill_color: Option<egui::Color32>,
}

impl Default for TraceLook {
    fn default() -> Self {
        Self {
            color: egui::Color32::GRAY,
            width: 1.5,
            show_line: true,
            show_points: false,
            style: LineStyle::Solid,
            point_size: 3.0,
            marker: MarkerShape::Circle,
            fill_color: None,
        }
    }
}

impl TraceLook {
    /// Look for the layer at `index` of a figure.
    pub fn for_layer(index: usize, layer: &Layer) -> Self {
        let (show_line, show_points) = match layer.kind {
            RenderKind::Markers => (false, true),
            RenderKind::Lines => (true, false),
            RenderKind::LinesMarkers => (true, true),
        };
        let fill_color = match layer.fill {
            Fill::ToNextY => Some(Self::band_fill_color()),
            Fill::None => None,
        };
        Self {
            color: Self::alloc_color(index),
            show_line,
            show_points,
            fill_color,
            ..Default::default()
        }
    }

    /// Translucent blue used between centile lines.
    pub fn band_fill_color() -> egui::Color32 {
        egui::Color32::from_rgba_unmultiplied(0, 176, 246, 51)
    }

    /// Allocate a distinct color for the given layer index.
    pub fn alloc_color(index: usize) -> egui::Color32 {
        const PALETTE: [egui::Color32; 10] = [
            egui::Color32::from_rgb(31, 119, 180),
            egui::Color32::from_rgb(255, 127, 14),
            egui::Color32::from_rgb(44, 160, 44),
            egui::Color32::from_rgb(214, 39, 40),
            egui::Color32::from_rgb(148, 103, 189),
            egui::Color32::from_rgb(140, 86, 75),
            egui::Color32::from_rgb(227, 119, 194),
            egui::Color32::from_rgb(127, 127, 127),
            egui::Color32::from_rgb(188, 189, 34),
            egui::Color32::from_rgb(23, 190, 207),
        ];
        PALETTE[index % PALETTE.len()]
    }
}
