use std::collections::HashMap;
use std::sync::Arc;

use anyhow::{Context, Result, anyhow};
use pdf_writer::{Content, Finish, Name, Pdf, Rect, Ref};
use png::{BitDepth, ColorType, Compression, Encoder, FilterType};
use sheet_core::{InkOverlay, RenderedSheet, build_page_svg};
use svg2pdf::ConversionOptions;
use tracing::{debug, info, warn};
use worksheet_core::Page;

use crate::config::FontConfig;

/// A4 in PDF points.
pub const A4_W_PT: f32 = 595.28;
pub const A4_H_PT: f32 = 841.89;

/// Embedded face first, then the configured file, then system fonts.
/// Expanded once per usvg release: resvg and svg2pdf pin different ones.
macro_rules! font_database {
    ($db:ty, $fonts:expr) => {{
        let cfg: &FontConfig = $fonts;
        let mut fontdb = <$db>::new();
        if fonts::has_embedded_font() {
            fontdb.load_font_data(fonts::FONT_BYTES.to_vec());
            // Map generic 'sans-serif' to the embedded font family
            let family_name = fontdb
                .faces()
                .next()
                .and_then(|face| face.families.first().map(|(n, _)| n.clone()));
            if let Some(name) = family_name {
                fontdb.set_sans_serif_family(name);
            }
        }
        if let Some(path) = &cfg.path {
            fontdb
                .load_font_file(path)
                .with_context(|| format!("Failed to load font {}", path.display()))?;
        }
        if cfg.system || fontdb.is_empty() {
            fontdb.load_system_fonts();
        }
        fontdb
    }};
}

/// Turns pages into SVG, PNG and PDF bytes with one font setup.
pub struct Renderer {
    options: usvg::Options<'static>,
    pdf_options: svg2pdf::usvg::Options<'static>,
    px_per_mm: f64,
}

impl Renderer {
    pub fn new(fonts: &FontConfig, px_per_mm: f64) -> Result<Self> {
        if !(px_per_mm.is_finite() && px_per_mm > 0.0) {
            return Err(anyhow!("px_per_mm must be positive, got {px_per_mm}"));
        }
        if fonts::has_embedded_font() {
            info!("using embedded font");
        } else {
            warn!("embedded font is missing, falling back to system fonts");
        }
        let mut opt = usvg::Options::default();
        opt.fontdb = Arc::new(font_database!(usvg::fontdb::Database, fonts));
        let mut pdf_opt = svg2pdf::usvg::Options::default();
        pdf_opt.fontdb = Arc::new(font_database!(svg2pdf::usvg::fontdb::Database, fonts));
        debug!(faces = opt.fontdb.len(), "font database ready");
        Ok(Renderer {
            options: opt,
            pdf_options: pdf_opt,
            px_per_mm,
        })
    }

    pub fn px_per_mm(&self) -> f64 {
        self.px_per_mm
    }

    /// Faces available to the PDF converter.
    pub fn font_faces(&self) -> usize {
        self.pdf_options.fontdb.len()
    }

    pub fn sheet(&self, page: &Page, overlays: &[InkOverlay]) -> RenderedSheet {
        build_page_svg(page, self.px_per_mm, overlays)
    }

    fn tree(&self, svg: &str) -> Result<usvg::Tree> {
        usvg::Tree::from_str(svg, &self.options).map_err(|e| anyhow!("SVG parse error: {e:?}"))
    }

    pub fn png(&self, sheet: &RenderedSheet) -> Result<Vec<u8>> {
        let tree = self.tree(&sheet.svg)?;
        let mut pixmap = tiny_skia::Pixmap::new(sheet.width_px, sheet.height_px)
            .context("pixmap alloc failed")?;
        let mut pm = pixmap.as_mut();
        resvg::render(&tree, tiny_skia::Transform::identity(), &mut pm);
        encode_png_deterministic(&pixmap)
    }

    /// One A4 page per sheet, each drawn from its converted SVG.
    pub fn pdf(&self, sheets: &[RenderedSheet]) -> Result<Vec<u8>> {
        let mut alloc = Ref::new(1);
        let catalog_id = alloc.bump();
        let tree_id = alloc.bump();
        let mut pdf = Pdf::new();
        let mut page_ids = Vec::with_capacity(sheets.len());

        for (i, sheet) in sheets.iter().enumerate() {
            let tree = svg2pdf::usvg::Tree::from_str(&sheet.svg, &self.pdf_options)
                .map_err(|e| anyhow!("SVG parse error: {e:?}"))?;
            let (chunk, svg_ref) = svg2pdf::to_chunk(&tree, ConversionOptions::default())
                .map_err(|e| anyhow!("PDF conversion of sheet {} failed: {e}", i + 1))?;
            let mut map = HashMap::new();
            let chunk = chunk.renumber(|old| *map.entry(old).or_insert_with(|| alloc.bump()));
            let svg_id = map
                .get(&svg_ref)
                .copied()
                .context("converted sheet lost its root object")?;
            pdf.extend(&chunk);

            let page_id = alloc.bump();
            let content_id = alloc.bump();
            page_ids.push(page_id);

            let svg_name = Name(b"S1");
            let mut page = pdf.page(page_id);
            page.media_box(Rect::new(0.0, 0.0, A4_W_PT, A4_H_PT));
            page.parent(tree_id);
            page.contents(content_id);
            page.resources().x_objects().pair(svg_name, svg_id);
            page.finish();

            // The converted drawing is a unit square.
            let mut content = Content::new();
            content.save_state();
            content.transform([A4_W_PT, 0.0, 0.0, A4_H_PT, 0.0, 0.0]);
            content.x_object(svg_name);
            content.restore_state();
            pdf.stream(content_id, &content.finish());
        }

        pdf.catalog(catalog_id).pages(tree_id);
        pdf.pages(tree_id)
            .kids(page_ids.iter().copied())
            .count(page_ids.len() as i32);
        debug!(pages = page_ids.len(), "pdf assembled");
        Ok(pdf.finish())
    }
}

// The page background is opaque, so premultiplied pixels are already straight RGBA.
fn encode_png_deterministic(pixmap: &tiny_skia::Pixmap) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    {
        let mut enc = Encoder::new(&mut buf, pixmap.width(), pixmap.height());
        enc.set_color(ColorType::Rgba);
        enc.set_depth(BitDepth::Eight);
        enc.set_filter(FilterType::NoFilter);
        enc.set_compression(Compression::Default);
        let mut writer = enc.write_header()?;
        writer.write_image_data(pixmap.data())?;
    }
    Ok(buf)
}
