//! Composed figures: the renderable description handed to a chart surface.
//!
//! A [`Figure`] is an ordered list of [`Layer`]s on one shared coordinate frame
//! plus a fixed [`Layout`]. Figures are rebuilt from scratch on every change and
//! never patched in place.

use serde::Serialize;

use crate::error::FigureError;

/// How a layer is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderKind {
    Markers,
    Lines,
    LinesMarkers,
}

/// Area fill attached to a line layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Fill {
    #[default]
    None,
    /// Fill the band between this layer and the layer rendered just before it.
    ToNextY,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layer {
    pub name: String,
    pub kind: RenderKind,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub show_legend: bool,
    pub fill: Fill,
}

impl Layer {
    /// Build a layer from `[x, y]` points, keeping their order.
    pub fn from_points(name: impl Into<String>, kind: RenderKind, points: &[[f64; 2]]) -> Self {
        Self {
            name: name.into(),
            kind,
            x: points.iter().map(|p| p[0]).collect(),
            y: points.iter().map(|p| p[1]).collect(),
            show_legend: false,
            fill: Fill::None,
        }
    }

    pub fn with_legend(mut self, show: bool) -> Self {
        self.show_legend = show;
        self
    }

    pub fn with_fill(mut self, fill: Fill) -> Self {
        self.fill = fill;
        self
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn points(&self) -> Vec<[f64; 2]> {
        self.x.iter().zip(&self.y).map(|(x, y)| [*x, *y]).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Margins {
    pub top: f32,
    pub left: f32,
    pub bottom: f32,
    pub right: f32,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            top: 50.0,
            left: 50.0,
            bottom: 50.0,
            right: 25.0,
        }
    }
}

/// Fixed presentation parameters applied to every composed figure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    pub margins: Margins,
    pub autosize: bool,
    pub height: f32,
    pub show_grid: bool,
    pub grid_color: [u8; 3],
    pub grid_width: f32,
    pub paper_background: [u8; 3],
    pub plot_background: [u8; 3],
    pub range_slider: bool,
    /// Stable view-state token: while it is unchanged the rendering surface keeps
    /// the user's pan/zoom across recompositions.
    pub ui_revision: String,
    pub x_title: Option<String>,
    pub y_title: Option<String>,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            margins: Margins::default(),
            autosize: true,
            height: 800.0,
            show_grid: true,
            grid_color: [0xed, 0xed, 0xeb],
            grid_width: 1.0,
            paper_background: [0xfa, 0xfa, 0xfa],
            plot_background: [0xfa, 0xfa, 0xfa],
            range_slider: false,
            ui_revision: "nichart-view".to_string(),
            x_title: None,
            y_title: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Figure {
    pub layers: Vec<Layer>,
    pub layout: Layout,
    /// Overlays left out of this figure and why.
    #[serde(skip)]
    pub skipped: Vec<FigureError>,
}

impl Figure {
    /// A figure with no layers: the "nothing selected yet" state.
    pub fn empty(layout: Layout) -> Self {
        Self {
            layers: Vec::new(),
            layout,
            skipped: Vec::new(),
        }
    }

    pub fn push_layer(&mut self, layer: Layer) {
        self.layers.push(layer);
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Serialize the layers and layout for an external rendering surface.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
