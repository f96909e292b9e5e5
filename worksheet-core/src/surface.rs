//! Freehand drawing surface: pointer gestures become ink segments on a canvas.
//!
//! The surface keeps only the pen position of the stroke in progress. Ink goes
//! straight to the canvas and is not retained as geometry, so a stroke is a
//! polyline of the sampled move positions.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::Point;
use crate::input::{InputEvent, Phase};

/// Stroke width in canvas pixels.
pub const INK_WIDTH: f32 = 4.0;
/// `#333`
pub const INK_COLOR: [u8; 3] = [0x33, 0x33, 0x33];

/// Pen settings. Caps and joins are always round.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InkStyle {
    pub width: f32,
    pub color: [u8; 3],
}

impl Default for InkStyle {
    fn default() -> Self {
        InkStyle {
            width: INK_WIDTH,
            color: INK_COLOR,
        }
    }
}

impl InkStyle {
    pub fn css_color(&self) -> String {
        let [r, g, b] = self.color;
        format!("#{r:02x}{g:02x}{b:02x}")
    }
}

/// Something ink can be laid on.
pub trait InkCanvas {
    /// Pixel size of the drawable area.
    fn size(&self) -> (u32, u32);
    /// Draw one straight, round-capped segment.
    fn segment(&mut self, from: Point, to: Point, style: &InkStyle);
    /// Erase everything drawn so far.
    fn clear(&mut self);
}

/// Inks both canvases; size is taken from the first.
impl<A: InkCanvas, B: InkCanvas> InkCanvas for (A, B) {
    fn size(&self) -> (u32, u32) {
        self.0.size()
    }

    fn segment(&mut self, from: Point, to: Point, style: &InkStyle) {
        self.0.segment(from, to, style);
        self.1.segment(from, to, style);
    }

    fn clear(&mut self) {
        self.0.clear();
        self.1.clear();
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PenState {
    Idle,
    Drawing { pen: Point },
}

/// One recorded pen-down to pen-up motion in surface-local coordinates.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StrokePath {
    pub points: Vec<Point>,
}

impl StrokePath {
    pub fn new(points: impl IntoIterator<Item = Point>) -> Self {
        StrokePath {
            points: points.into_iter().collect(),
        }
    }

    pub fn scaled(&self, factor: f64) -> StrokePath {
        StrokePath::new(
            self.points
                .iter()
                .map(|p| Point::new(p.x * factor, p.y * factor)),
        )
    }
}

/// Drawing surface over a canvas that may not exist yet.
///
/// Until [`mount`](Self::mount) supplies a canvas every operation is a no-op.
pub struct DrawingSurface<C> {
    canvas: Option<C>,
    origin: Point,
    style: InkStyle,
    state: PenState,
}

impl<C> Default for DrawingSurface<C> {
    fn default() -> Self {
        DrawingSurface {
            canvas: None,
            origin: Point::default(),
            style: InkStyle::default(),
            state: PenState::Idle,
        }
    }
}

impl<C: InkCanvas> DrawingSurface<C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach the canvas. The first mount sizes the surface for good; later
    /// calls are ignored and return `false`.
    pub fn mount(&mut self, canvas: C) -> bool {
        if self.canvas.is_some() {
            debug!("surface already mounted; ignoring remount");
            return false;
        }
        let (w, h) = canvas.size();
        debug!(w, h, "surface mounted");
        self.canvas = Some(canvas);
        true
    }

    pub fn is_mounted(&self) -> bool {
        self.canvas.is_some()
    }

    /// Viewport position of the surface's top-left corner.
    pub fn set_origin(&mut self, origin: Point) {
        self.origin = origin;
    }

    pub fn state(&self) -> PenState {
        self.state
    }

    pub fn is_drawing(&self) -> bool {
        matches!(self.state, PenState::Drawing { .. })
    }

    pub fn canvas(&self) -> Option<&C> {
        self.canvas.as_ref()
    }

    pub fn into_canvas(self) -> Option<C> {
        self.canvas
    }

    /// Feed one raw input event (viewport coordinates).
    pub fn handle(&mut self, event: &InputEvent) {
        match event.phase {
            Phase::Start => self.pen_down(event.local_point(self.origin)),
            Phase::Move => self.pen_move(event.local_point(self.origin)),
            Phase::End | Phase::Leave | Phase::Cancel => self.pen_up(),
        }
    }

    /// Begin a stroke at a surface-local point.
    pub fn pen_down(&mut self, local: Option<Point>) {
        let (Some(canvas), Some(p)) = (self.canvas.as_ref(), local) else {
            return;
        };
        let (w, h) = canvas.size();
        if p.x < 0.0 || p.y < 0.0 || p.x > w as f64 || p.y > h as f64 {
            trace!(x = p.x, y = p.y, "pen down outside surface");
            return;
        }
        self.state = PenState::Drawing { pen: p };
    }

    /// Extend the stroke in progress to a surface-local point.
    pub fn pen_move(&mut self, local: Option<Point>) {
        let PenState::Drawing { pen } = self.state else {
            return;
        };
        let (Some(canvas), Some(p)) = (self.canvas.as_mut(), local) else {
            return;
        };
        canvas.segment(pen, p, &self.style);
        self.state = PenState::Drawing { pen: p };
    }

    pub fn pen_up(&mut self) {
        self.state = PenState::Idle;
    }

    /// Wipe all ink. Stroke state is left as it is.
    pub fn clear(&mut self) {
        if let Some(canvas) = self.canvas.as_mut() {
            canvas.clear();
            debug!("surface cleared");
        }
    }

    /// Draw a recorded stroke as down, moves, up.
    pub fn replay(&mut self, stroke: &StrokePath) {
        let mut points = stroke.points.iter().copied();
        let Some(first) = points.next() else {
            return;
        };
        self.pen_down(Some(first));
        for p in points {
            self.pen_move(Some(p));
        }
        self.pen_up();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records segments instead of rasterising them.
    #[derive(Default)]
    struct Recorder {
        segments: Vec<(Point, Point)>,
        clears: usize,
    }

    impl InkCanvas for Recorder {
        fn size(&self) -> (u32, u32) {
            (200, 100)
        }

        fn segment(&mut self, from: Point, to: Point, _style: &InkStyle) {
            self.segments.push((from, to));
        }

        fn clear(&mut self) {
            self.segments.clear();
            self.clears += 1;
        }
    }

    fn mounted() -> DrawingSurface<Recorder> {
        let mut s = DrawingSurface::new();
        assert!(s.mount(Recorder::default()));
        s
    }

    fn segments(s: &DrawingSurface<Recorder>) -> &[(Point, Point)] {
        &s.canvas().unwrap().segments
    }

    #[test]
    fn down_then_moves_draw_a_polyline() {
        let mut s = mounted();
        s.handle(&InputEvent::mouse(Phase::Start, 10.0, 10.0));
        assert!(segments(&s).is_empty());
        s.handle(&InputEvent::mouse(Phase::Move, 20.0, 15.0));
        s.handle(&InputEvent::mouse(Phase::Move, 30.0, 40.0));
        assert_eq!(
            segments(&s),
            &[
                (Point::new(10.0, 10.0), Point::new(20.0, 15.0)),
                (Point::new(20.0, 15.0), Point::new(30.0, 40.0)),
            ]
        );
    }

    #[test]
    fn moves_after_pen_up_draw_nothing() {
        let mut s = mounted();
        s.handle(&InputEvent::mouse(Phase::Start, 10.0, 10.0));
        s.handle(&InputEvent::mouse(Phase::Move, 20.0, 10.0));
        s.handle(&InputEvent::mouse(Phase::End, 20.0, 10.0));
        assert_eq!(s.state(), PenState::Idle);
        s.handle(&InputEvent::mouse(Phase::Move, 90.0, 90.0));
        assert_eq!(segments(&s).len(), 1);
    }

    #[test]
    fn leave_and_cancel_end_the_stroke() {
        for phase in [Phase::Leave, Phase::Cancel] {
            let mut s = mounted();
            s.handle(&InputEvent::touch(Phase::Start, [(5.0, 5.0)]));
            assert!(s.is_drawing());
            s.handle(&InputEvent::touch(phase, Vec::<(f64, f64)>::new()));
            assert!(!s.is_drawing());
        }
    }

    #[test]
    fn origin_is_subtracted_from_viewport_coordinates() {
        let mut s = mounted();
        s.set_origin(Point::new(100.0, 200.0));
        s.handle(&InputEvent::touch(Phase::Start, [(110.0, 210.0)]));
        s.handle(&InputEvent::touch(Phase::Move, [(150.0, 260.0)]));
        assert_eq!(
            segments(&s),
            &[(Point::new(10.0, 10.0), Point::new(50.0, 60.0))]
        );
    }

    #[test]
    fn touch_move_without_points_keeps_the_pen() {
        let mut s = mounted();
        s.handle(&InputEvent::touch(Phase::Start, [(5.0, 5.0)]));
        s.handle(&InputEvent::touch(Phase::Move, Vec::<(f64, f64)>::new()));
        assert_eq!(
            s.state(),
            PenState::Drawing {
                pen: Point::new(5.0, 5.0)
            }
        );
        assert!(segments(&s).is_empty());
    }

    #[test]
    fn unmounted_surface_ignores_everything() {
        let mut s: DrawingSurface<Recorder> = DrawingSurface::new();
        s.handle(&InputEvent::mouse(Phase::Start, 1.0, 1.0));
        s.handle(&InputEvent::mouse(Phase::Move, 9.0, 9.0));
        s.clear();
        assert!(!s.is_mounted());
        assert_eq!(s.state(), PenState::Idle);
        assert!(s.canvas().is_none());
    }

    #[test]
    fn pen_down_outside_bounds_does_not_start_a_stroke() {
        let mut s = mounted();
        s.handle(&InputEvent::mouse(Phase::Start, -3.0, 10.0));
        s.handle(&InputEvent::mouse(Phase::Start, 10.0, 101.0));
        assert_eq!(s.state(), PenState::Idle);
    }

    #[test]
    fn stroke_from_the_top_left_corner_draws() {
        let mut s = mounted();
        s.handle(&InputEvent::mouse(Phase::Start, 0.0, 0.0));
        s.handle(&InputEvent::mouse(Phase::Move, 0.0, 30.0));
        assert_eq!(segments(&s).len(), 1);
    }

    #[test]
    fn clear_mid_stroke_keeps_drawing() {
        let mut s = mounted();
        s.handle(&InputEvent::mouse(Phase::Start, 10.0, 10.0));
        s.handle(&InputEvent::mouse(Phase::Move, 20.0, 10.0));
        s.clear();
        assert!(segments(&s).is_empty());
        assert!(s.is_drawing());
        s.handle(&InputEvent::mouse(Phase::Move, 30.0, 10.0));
        assert_eq!(
            segments(&s),
            &[(Point::new(20.0, 10.0), Point::new(30.0, 10.0))]
        );
    }

    #[test]
    fn second_mount_is_ignored() {
        let mut s = mounted();
        s.handle(&InputEvent::mouse(Phase::Start, 10.0, 10.0));
        s.handle(&InputEvent::mouse(Phase::Move, 20.0, 10.0));
        assert!(!s.mount(Recorder::default()));
        assert!(s.is_mounted());
        assert_eq!(segments(&s).len(), 1);
    }

    #[test]
    fn replay_draws_one_segment_per_step() {
        let mut s = mounted();
        let stroke = StrokePath::new([
            Point::new(1.0, 1.0),
            Point::new(2.0, 2.0),
            Point::new(3.0, 5.0),
        ]);
        s.replay(&stroke);
        assert_eq!(segments(&s).len(), 2);
        assert!(!s.is_drawing());
        s.replay(&StrokePath::default());
        assert_eq!(segments(&s).len(), 2);
    }

    #[test]
    fn stroke_paths_read_as_point_arrays() {
        let stroke: StrokePath = serde_json::from_str("[[0, 0], [4.5, 2]]").unwrap();
        assert_eq!(stroke.points, vec![Point::new(0.0, 0.0), Point::new(4.5, 2.0)]);
        assert_eq!(stroke.scaled(2.0).points[1], Point::new(9.0, 4.0));
    }

    #[test]
    fn pair_canvas_inks_both_sides() {
        let mut s: DrawingSurface<(Recorder, Recorder)> = DrawingSurface::new();
        s.mount((Recorder::default(), Recorder::default()));
        s.replay(&StrokePath::new([Point::new(1.0, 1.0), Point::new(5.0, 1.0)]));
        s.clear();
        let (a, b) = s.canvas().unwrap();
        assert_eq!((a.clears, b.clears), (1, 1));
    }

    #[test]
    fn css_color_is_hex() {
        assert_eq!(InkStyle::default().css_color(), "#333333");
    }
}
