//! Overlay layers drawn on top of the primary trace.
//!
//! Each overlay reads one dataset and yields one or more layers for a figure.
//! Overlays never modify the dataset they read.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::dataset::Dataset;
use super::figure::{Fill, Layer, RenderKind};
use super::stats::{self, LinearFit};
use crate::error::FigureError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Overlay {
    /// Least-squares line through the selected (x, y).
    LinReg,
    /// LOWESS smoothing curve through the selected (x, y).
    Lowess,
    /// One line per centile column of a reference table.
    Percentile,
}

/// Which dataset an overlay reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlayScope {
    /// The panel's primary (user) dataset.
    Dataset,
    /// The panel's reference (centile) dataset.
    Reference,
}

impl Overlay {
    pub const ALL: [Overlay; 3] = [Overlay::LinReg, Overlay::Lowess, Overlay::Percentile];

    pub fn id(&self) -> &'static str {
        match self {
            Overlay::LinReg => "linreg",
            Overlay::Lowess => "lowess",
            Overlay::Percentile => "percentile",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Overlay::LinReg => "Lin Reg",
            Overlay::Lowess => "Lowess Reg",
            Overlay::Percentile => "Percentiles",
        }
    }

    /// Scope used when an overlay is requested by id alone.
    pub fn default_scope(&self) -> OverlayScope {
        match self {
            Overlay::LinReg | Overlay::Lowess => OverlayScope::Dataset,
            Overlay::Percentile => OverlayScope::Reference,
        }
    }

    /// Layers this overlay draws from `dataset`, in render order.
    pub fn apply(
        &self,
        dataset: &Dataset,
        x: &str,
        y: &str,
        params: &OverlayParams,
    ) -> Result<Vec<Layer>, FigureError> {
        match self {
            Overlay::LinReg => Ok(vec![linreg_layer(dataset, x, y)?]),
            Overlay::Lowess => Ok(vec![lowess_layer(dataset, x, y, params)?]),
            Overlay::Percentile => percentile_layers(dataset, params.percentile_fill),
        }
    }
}

impl fmt::Display for Overlay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Overlay {
    type Err = FigureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Overlay::ALL
            .into_iter()
            .find(|o| o.id() == s)
            .ok_or_else(|| FigureError::UnknownOverlay(s.to_string()))
    }
}

/// An overlay together with the dataset it should read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OverlaySelection {
    pub overlay: Overlay,
    pub scope: OverlayScope,
}

impl OverlaySelection {
    /// Percentile bands only exist in reference tables, so they are always
    /// reference-scoped whatever `scope` says.
    pub fn new(overlay: Overlay, scope: OverlayScope) -> Self {
        let scope = match overlay {
            Overlay::Percentile => OverlayScope::Reference,
            _ => scope,
        };
        Self { overlay, scope }
    }

    pub fn with_default_scope(overlay: Overlay) -> Self {
        Self::new(overlay, overlay.default_scope())
    }
}

impl FromStr for OverlaySelection {
    type Err = FigureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::with_default_scope(s.parse()?))
    }
}

/// Tunables for the overlay computations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayParams {
    pub lowess_frac: f64,
    pub lowess_iterations: usize,
    pub percentile_fill: bool,
}

impl Default for OverlayParams {
    fn default() -> Self {
        Self {
            lowess_frac: stats::LOWESS_DEFAULT_FRAC,
            lowess_iterations: stats::LOWESS_DEFAULT_ITERATIONS,
            percentile_fill: true,
        }
    }
}

/// Least-squares fit evaluated at every observed x, connected in ascending x.
fn linreg_layer(dataset: &Dataset, x: &str, y: &str) -> Result<Layer, FigureError> {
    let mut points = dataset.xy_pairs(x, y)?;
    let fit = LinearFit::fit(&points).ok_or_else(|| FigureError::InsufficientData {
        overlay: Overlay::LinReg.id().to_string(),
    })?;
    debug!(slope = fit.slope, intercept = fit.intercept, "linreg fit");
    for p in points.iter_mut() {
        p[1] = fit.predict(p[0]);
    }
    points.sort_by(|a, b| a[0].total_cmp(&b[0]));
    Ok(Layer::from_points("linregfit", RenderKind::Lines, &points))
}

fn lowess_layer(
    dataset: &Dataset,
    x: &str,
    y: &str,
    params: &OverlayParams,
) -> Result<Layer, FigureError> {
    let points = dataset.xy_pairs(x, y)?;
    if points.is_empty() {
        return Err(FigureError::InsufficientData {
            overlay: Overlay::Lowess.id().to_string(),
        });
    }
    let mut smoothed = stats::lowess(&points, params.lowess_frac, params.lowess_iterations);
    // Line layers must run left to right.
    if !smoothed.windows(2).all(|w| w[0][0] <= w[1][0]) {
        smoothed.sort_by(|a, b| a[0].total_cmp(&b[0]));
    }
    Ok(Layer::from_points("lowessfit", RenderKind::Lines, &smoothed))
}

/// One line per column after the first; the first column is the shared x axis.
fn percentile_layers(reference: &Dataset, fill: bool) -> Result<Vec<Layer>, FigureError> {
    let mut names = reference.column_names();
    let x_name = names.next().ok_or(FigureError::EmptyDataset)?.to_string();
    let centiles: Vec<String> = names.map(str::to_string).collect();

    let mut layers = Vec::with_capacity(centiles.len());
    for (i, name) in centiles.iter().enumerate() {
        let mut points = reference.xy_pairs(&x_name, name)?;
        points.sort_by(|a, b| a[0].total_cmp(&b[0]));
        let band = if fill && i > 0 { Fill::ToNextY } else { Fill::None };
        layers.push(
            Layer::from_points(name.clone(), RenderKind::Lines, &points)
                .with_legend(true)
                .with_fill(band),
        );
    }
    Ok(layers)
}
