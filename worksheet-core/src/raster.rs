use tiny_skia::{Color, LineCap, LineJoin, Paint, PathBuilder, Pixmap, Stroke, Transform};

use crate::Point;
use crate::surface::{InkCanvas, InkStyle};

/// Ink canvas backed by a `tiny-skia` pixmap. Transparent where nothing is
/// drawn.
#[derive(Clone)]
pub struct RasterInk {
    pixmap: Pixmap,
}

impl RasterInk {
    /// `None` for a zero-sized area.
    pub fn new(width: u32, height: u32) -> Option<Self> {
        Pixmap::new(width, height).map(|pixmap| RasterInk { pixmap })
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    pub fn alpha_at(&self, x: u32, y: u32) -> u8 {
        self.pixmap.pixel(x, y).map(|p| p.alpha()).unwrap_or(0)
    }

    pub fn inked_pixels(&self) -> usize {
        self.pixmap.pixels().iter().filter(|p| p.alpha() > 0).count()
    }

    pub fn is_blank(&self) -> bool {
        self.inked_pixels() == 0
    }

    /// Straight (non-premultiplied) RGBA bytes, row major.
    pub fn to_rgba(&self) -> Vec<u8> {
        self.pixmap
            .pixels()
            .iter()
            .flat_map(|p| {
                let c = p.demultiply();
                [c.red(), c.green(), c.blue(), c.alpha()]
            })
            .collect()
    }
}

impl InkCanvas for RasterInk {
    fn size(&self) -> (u32, u32) {
        (self.pixmap.width(), self.pixmap.height())
    }

    fn segment(&mut self, from: Point, to: Point, style: &InkStyle) {
        let mut pb = PathBuilder::new();
        pb.move_to(from.x as f32, from.y as f32);
        pb.line_to(to.x as f32, to.y as f32);
        let Some(path) = pb.finish() else {
            return;
        };
        let [r, g, b] = style.color;
        let mut paint = Paint::default();
        paint.set_color_rgba8(r, g, b, 255);
        paint.anti_alias = true;
        let stroke = Stroke {
            width: style.width,
            line_cap: LineCap::Round,
            line_join: LineJoin::Round,
            ..Stroke::default()
        };
        self.pixmap
            .stroke_path(&path, &paint, &stroke, Transform::identity(), None);
    }

    fn clear(&mut self) {
        self.pixmap.fill(Color::TRANSPARENT);
    }
}
