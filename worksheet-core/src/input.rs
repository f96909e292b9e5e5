//! Mouse and touch input unified into one event shape.

use crate::Point;

/// Where in a press-drag-release gesture an event falls.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// mousedown / touchstart
    Start,
    /// mousemove / touchmove
    Move,
    /// mouseup / touchend
    End,
    /// mouseleave
    Leave,
    /// touchcancel
    Cancel,
}

/// Device-specific coordinates, in viewport space.
#[derive(Clone, Debug, PartialEq)]
pub enum Pointer {
    Mouse(Point),
    /// Active touch points; empty on the final touchend.
    Touch(Vec<Point>),
}

#[derive(Clone, Debug, PartialEq)]
pub struct InputEvent {
    pub phase: Phase,
    pub pointer: Pointer,
}

impl InputEvent {
    pub fn mouse(phase: Phase, x: f64, y: f64) -> Self {
        InputEvent {
            phase,
            pointer: Pointer::Mouse(Point::new(x, y)),
        }
    }

    pub fn touch<I>(phase: Phase, touches: I) -> Self
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        InputEvent {
            phase,
            pointer: Pointer::Touch(touches.into_iter().map(Point::from).collect()),
        }
    }

    /// Viewport coordinate of the event: the mouse position or the first
    /// touch point. `None` when the event carries no usable coordinate.
    /// Zero is a valid coordinate.
    pub fn client_point(&self) -> Option<Point> {
        let p = match &self.pointer {
            Pointer::Mouse(p) => *p,
            Pointer::Touch(touches) => *touches.first()?,
        };
        (p.x.is_finite() && p.y.is_finite()).then_some(p)
    }

    /// Coordinate relative to a surface whose bounding box starts at `origin`.
    pub fn local_point(&self, origin: Point) -> Option<Point> {
        self.client_point().map(|p| p - origin)
    }

    pub fn ends_stroke(&self) -> bool {
        matches!(self.phase, Phase::End | Phase::Leave | Phase::Cancel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mouse_and_touch_map_to_the_same_point() {
        let origin = Point::new(100.0, 50.0);
        let m = InputEvent::mouse(Phase::Move, 130.0, 70.0);
        let t = InputEvent::touch(Phase::Move, [(130.0, 70.0), (400.0, 400.0)]);
        assert_eq!(m.local_point(origin), Some(Point::new(30.0, 20.0)));
        assert_eq!(t.local_point(origin), m.local_point(origin));
    }

    #[test]
    fn zero_is_a_coordinate_not_an_absence() {
        let e = InputEvent::mouse(Phase::Start, 0.0, 0.0);
        assert_eq!(e.client_point(), Some(Point::new(0.0, 0.0)));
        let t = InputEvent::touch(Phase::Start, [(0.0, 12.0)]);
        assert_eq!(t.client_point(), Some(Point::new(0.0, 12.0)));
    }

    #[test]
    fn touch_end_without_touches_has_no_point() {
        let e = InputEvent::touch(Phase::End, Vec::<(f64, f64)>::new());
        assert_eq!(e.client_point(), None);
        assert_eq!(e.local_point(Point::new(5.0, 5.0)), None);
        assert!(e.ends_stroke());
    }

    #[test]
    fn non_finite_coordinates_are_dropped() {
        let e = InputEvent::mouse(Phase::Move, f64::NAN, 3.0);
        assert_eq!(e.client_point(), None);
    }
}
