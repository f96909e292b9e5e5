//! Recorded pad ink replayed onto rasters for printing.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use sheet_core::{InkOverlay, PadRect};
use tracing::{debug, warn};
use worksheet_core::{DrawingSurface, RasterInk, StrokePath};

/// `{ "pads": [ [stroke, ...], ... ] }`, strokes in pad-local millimetres.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct InkFile {
    #[serde(default)]
    pub pads: Vec<Vec<StrokePath>>,
}

impl InkFile {
    pub fn load(path: &Path) -> Result<Self> {
        let txt = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read ink from {}", path.display()))?;
        serde_json::from_str(&txt)
            .with_context(|| format!("Failed to parse ink file {}", path.display()))
    }

    /// Overlays for one page whose pads are recorded from `first_pad` on.
    /// Pads without strokes get none.
    pub fn overlays(
        &self,
        first_pad: usize,
        pads: &[PadRect],
        px_per_mm: f64,
    ) -> Result<Vec<InkOverlay>> {
        let recorded = self.pads.get(first_pad..).unwrap_or_default();
        let mut out = Vec::new();
        for (index, (strokes, rect)) in recorded.iter().zip(pads).enumerate() {
            if strokes.is_empty() {
                continue;
            }
            let raster = replay(strokes, rect, px_per_mm)?;
            debug!(pad = index, inked = raster.inked_pixels(), "ink replayed");
            out.push(InkOverlay::from_raster(index, &raster)?);
        }
        Ok(out)
    }

    /// Warn about strokes recorded for more pads than were rendered.
    pub fn check_pad_count(&self, rendered: usize) {
        if self.pads.len() > rendered {
            warn!(
                recorded = self.pads.len(),
                rendered, "ink for missing pads ignored"
            );
        }
    }
}

fn replay(strokes: &[StrokePath], rect: &PadRect, px_per_mm: f64) -> Result<RasterInk> {
    let (w, h) = rect.size_px(px_per_mm);
    let raster = RasterInk::new(w, h).context("ink raster alloc failed")?;
    let mut surface = DrawingSurface::<RasterInk>::new();
    surface.mount(raster);
    for stroke in strokes {
        surface.replay(&stroke.scaled(px_per_mm));
    }
    surface
        .into_canvas()
        .context("drawing surface lost its canvas")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pad() -> PadRect {
        PadRect {
            x: 14.0,
            y: 200.0,
            w: 50.0,
            h: 20.0,
        }
    }

    #[test]
    fn parses_nested_point_lists() {
        let ink: InkFile =
            serde_json::from_str(r#"{ "pads": [ [ [[1, 1], [10, 5]], [[2, 2]] ] ] }"#).unwrap();
        assert_eq!(ink.pads.len(), 1);
        assert_eq!(ink.pads[0].len(), 2);
        assert_eq!(ink.pads[0][0].points.len(), 2);
    }

    #[test]
    fn missing_pads_key_is_empty() {
        let ink: InkFile = serde_json::from_str("{}").unwrap();
        assert!(ink.pads.is_empty());
    }

    #[test]
    fn strokes_become_an_overlay_at_raster_resolution() {
        let ink: InkFile =
            serde_json::from_str(r#"{ "pads": [ [ [[5, 10], [45, 10]] ] ] }"#).unwrap();
        let raster = replay(&ink.pads[0], &pad(), 4.0).unwrap();
        assert_eq!((raster.pixmap().width(), raster.pixmap().height()), (200, 80));
        // Mid-stroke, in pixels.
        assert_eq!(raster.alpha_at(100, 40), 255);
        assert_eq!(raster.alpha_at(100, 10), 0);

        let overlays = ink.overlays(0, &[pad()], 4.0).unwrap();
        assert_eq!(overlays.len(), 1);
        assert_eq!(overlays[0].pad, 0);
        assert_eq!(&overlays[0].png[..4], b"\x89PNG");
    }

    #[test]
    fn pads_without_strokes_or_on_page_are_skipped() {
        let ink: InkFile = serde_json::from_str(
            r#"{ "pads": [ [], [ [[1, 1], [2, 2]] ], [ [[1, 1], [3, 3]] ] ] }"#,
        )
        .unwrap();
        let overlays = ink.overlays(0, &[pad(), pad()], 2.0).unwrap();
        assert_eq!(overlays.iter().map(|o| o.pad).collect::<Vec<_>>(), [1]);
    }

    #[test]
    fn later_pages_continue_the_pad_numbering() {
        let ink: InkFile = serde_json::from_str(
            r#"{ "pads": [ [ [[1, 1], [2, 2]] ], [ [[1, 1], [3, 3]] ] ] }"#,
        )
        .unwrap();
        let overlays = ink.overlays(1, &[pad()], 2.0).unwrap();
        assert_eq!(overlays.len(), 1);
        assert_eq!(overlays[0].pad, 0);
        assert!(ink.overlays(5, &[pad()], 2.0).unwrap().is_empty());
    }

    #[test]
    fn stroke_starting_off_the_pad_leaves_no_ink() {
        let strokes = vec![StrokePath::new([
            worksheet_core::Point::new(-5.0, 5.0),
            worksheet_core::Point::new(20.0, 5.0),
        ])];
        let raster = replay(&strokes, &pad(), 4.0).unwrap();
        assert!(raster.is_blank());
    }
}
