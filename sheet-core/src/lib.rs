//! A4 layout of worksheet pages as SVG, shared by the CLI and the browser shell.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use png::{BitDepth, ColorType, Encoder};
use serde::Serialize;
use thiserror::Error;
use worksheet_core::RasterInk;

pub mod icons;
mod layout;
pub mod palette;

pub use layout::build_page_svg;

/// A4 portrait, millimetres.
pub const PAGE_W_MM: f64 = 210.0;
pub const PAGE_H_MM: f64 = 297.0;

#[derive(Debug, Error)]
pub enum SheetError {
    #[error("png encoding failed: {0}")]
    Png(#[from] png::EncodingError),
    #[error("zero-sized ink layer")]
    EmptyInk,
}

/// Rectangle of a drawing pad on the page, millimetres from the top-left.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct PadRect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl PadRect {
    /// Pixel size at `px_per_mm`, at least 1 x 1.
    pub fn size_px(&self, px_per_mm: f64) -> (u32, u32) {
        (
            (self.w * px_per_mm).round().max(1.0) as u32,
            (self.h * px_per_mm).round().max(1.0) as u32,
        )
    }
}

/// One page rendered to SVG.
#[derive(Clone, Debug)]
pub struct RenderedSheet {
    pub svg: String,
    pub width_px: u32,
    pub height_px: u32,
    /// Drawing pads in document order.
    pub pads: Vec<PadRect>,
}

/// Ink of pad number `pad`, laid over it as an embedded PNG.
#[derive(Clone, Debug)]
pub struct InkOverlay {
    pub pad: usize,
    pub png: Vec<u8>,
}

impl InkOverlay {
    pub fn from_raster(pad: usize, ink: &RasterInk) -> Result<Self, SheetError> {
        let pm = ink.pixmap();
        if pm.width() == 0 || pm.height() == 0 {
            return Err(SheetError::EmptyInk);
        }
        let png = encode_rgba_to_png_bytes(pm.width(), pm.height(), &ink.to_rgba())?;
        Ok(InkOverlay { pad, png })
    }

    pub(crate) fn data_url(&self) -> String {
        format!("data:image/png;base64,{}", STANDARD.encode(&self.png))
    }
}

// RGBA -> PNG bytes (deterministic for same input)
pub fn encode_rgba_to_png_bytes(
    width: u32,
    height: u32,
    rgba: &[u8],
) -> Result<Vec<u8>, png::EncodingError> {
    let mut buf = Vec::new();
    {
        let mut enc = Encoder::new(&mut buf, width, height);
        enc.set_color(ColorType::Rgba);
        enc.set_depth(BitDepth::Eight);
        let mut writer = enc.write_header()?;
        writer.write_image_data(rgba)?;
    }
    Ok(buf)
}

pub(crate) fn svg_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Estimated advance of `s` at font size `size` (mm): CJK and other wide
/// glyphs take a full em, Latin about half.
pub fn text_width(s: &str, size: f64) -> f64 {
    s.chars()
        .map(|c| if (c as u32) < 0x0250 { 0.55 } else { 1.0 })
        .sum::<f64>()
        * size
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wide_glyphs_measure_a_full_em() {
        assert_eq!(text_width("星期一", 5.0), 15.0);
        assert!((text_width("Mon", 4.0) - 6.6).abs() < 1e-9);
        // Tone marks are Latin extended, not wide.
        assert!((text_width("xīng", 2.0) - 4.4).abs() < 1e-9);
    }

    #[test]
    fn escape_covers_markup_characters() {
        assert_eq!(svg_escape("a<b & \"c\">"), "a&lt;b &amp; &quot;c&quot;&gt;");
    }

    #[test]
    fn png_bytes_have_signature() {
        let bytes = encode_rgba_to_png_bytes(2, 1, &[0, 0, 0, 255, 255, 255, 255, 255]).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn pad_size_rounds_to_pixels() {
        let r = PadRect {
            x: 0.0,
            y: 0.0,
            w: 182.0,
            h: 64.0,
        };
        assert_eq!(r.size_px(4.0), (728, 256));
        assert_eq!(r.size_px(0.0), (1, 1));
    }
}
