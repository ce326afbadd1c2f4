//! Primary trace styles: the single series every figure starts with.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::dataset::Dataset;
use super::figure::{Layer, RenderKind};
use crate::error::FigureError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraceStyle {
    /// One marker per row, no connecting line.
    #[default]
    Dots,
    /// Single series drawn as connected markers. ROI tables carry no
    /// open/high/low/close columns, so this is a plain (x, y) series.
    Bar,
}

impl TraceStyle {
    pub const ALL: [TraceStyle; 2] = [TraceStyle::Dots, TraceStyle::Bar];

    pub fn id(&self) -> &'static str {
        match self {
            TraceStyle::Dots => "dots",
            TraceStyle::Bar => "bar",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TraceStyle::Dots => "dots",
            TraceStyle::Bar => "bar",
        }
    }

    /// Render `(x, y)` of `dataset` as the primary layer.
    pub fn render(&self, dataset: &Dataset, x: &str, y: &str) -> Result<Layer, FigureError> {
        let mut points = dataset.xy_pairs(x, y)?;
        if dataset.is_empty() {
            return Err(FigureError::EmptyDataset);
        }
        let layer = match self {
            TraceStyle::Dots => Layer::from_points("datapoint", RenderKind::Markers, &points),
            TraceStyle::Bar => {
                points.sort_by(|a, b| a[0].total_cmp(&b[0]));
                Layer::from_points("datapoint", RenderKind::LinesMarkers, &points)
            }
        };
        Ok(layer.with_legend(false))
    }
}

impl fmt::Display for TraceStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for TraceStyle {
    type Err = FigureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TraceStyle::ALL
            .into_iter()
            .find(|style| style.id() == s)
            .ok_or_else(|| FigureError::UnknownTraceStyle(s.to_string()))
    }
}
