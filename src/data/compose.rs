//! Figure composition: primary trace + ordered overlays + fixed layout.

use tracing::warn;

use super::dataset::Dataset;
use super::figure::{Figure, Layout};
use super::overlay::{OverlayParams, OverlayScope, OverlaySelection};
use super::trace_style::TraceStyle;
use crate::error::FigureError;

/// Everything one panel needs to be drawn.
#[derive(Debug, Clone, Copy)]
pub struct ComposeRequest<'a> {
    /// Dataset the primary trace (and dataset-scoped overlays) read.
    pub primary: Option<&'a Dataset>,
    /// Dataset reference-scoped overlays read. Pass `primary` again for
    /// single-dataset use.
    pub reference: Option<&'a Dataset>,
    pub style: TraceStyle,
    pub overlays: &'a [OverlaySelection],
    pub x: &'a str,
    pub y: &'a str,
}

#[derive(Debug, Clone, Default)]
pub struct FigureComposer {
    pub layout: Layout,
    pub params: OverlayParams,
}

impl FigureComposer {
    pub fn new(layout: Layout, params: OverlayParams) -> Self {
        Self { layout, params }
    }

    /// Compose one figure.
    ///
    /// - No primary dataset: an empty figure, not an error.
    /// - Primary trace failures (missing column, empty dataset) are returned.
    /// - Overlay failures drop that overlay only; the reason is logged and kept
    ///   in [`Figure::skipped`].
    pub fn compose(&self, req: &ComposeRequest<'_>) -> Result<Figure, FigureError> {
        let mut figure = Figure::empty(self.layout_for(req));
        let Some(primary) = req.primary else {
            return Ok(figure);
        };

        figure.push_layer(req.style.render(primary, req.x, req.y)?);

        for sel in req.overlays {
            let source = match sel.scope {
                OverlayScope::Dataset => Some(primary),
                OverlayScope::Reference => req.reference,
            };
            let Some(source) = source else {
                let err = FigureError::MissingReferenceDataset {
                    overlay: sel.overlay.id().to_string(),
                };
                warn!(%err, "skipping overlay");
                figure.skipped.push(err);
                continue;
            };
            match sel.overlay.apply(source, req.x, req.y, &self.params) {
                Ok(layers) => figure.layers.extend(layers),
                Err(err) => {
                    warn!(overlay = %sel.overlay, %err, "skipping overlay");
                    figure.skipped.push(err);
                }
            }
        }
        Ok(figure)
    }

    /// Compose from string identifiers, rejecting unknown ids.
    ///
    /// Overlays resolved this way use their default scope.
    pub fn compose_by_ids(
        &self,
        primary: Option<&Dataset>,
        reference: Option<&Dataset>,
        style_id: &str,
        overlay_ids: &[&str],
        x: &str,
        y: &str,
    ) -> Result<Figure, FigureError> {
        let style: TraceStyle = style_id.parse()?;
        let overlays = overlay_ids
            .iter()
            .map(|id| id.parse::<OverlaySelection>())
            .collect::<Result<Vec<_>, _>>()?;
        self.compose(&ComposeRequest {
            primary,
            reference,
            style,
            overlays: &overlays,
            x,
            y,
        })
    }

    fn layout_for(&self, req: &ComposeRequest<'_>) -> Layout {
        let mut layout = self.layout.clone();
        if req.primary.is_some() {
            layout.x_title = Some(req.x.to_string());
            layout.y_title = Some(req.y.to_string());
        }
        layout
    }
}
