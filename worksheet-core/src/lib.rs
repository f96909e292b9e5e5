//! Days-of-the-week worksheet model: designs and their pages, the navigation
//! controller, and the freehand drawing surface embedded on some pages.

use serde::{Deserialize, Serialize};

pub mod content;
pub mod design;
pub mod input;
pub mod navigation;
mod pages;
pub mod raster;
pub mod surface;

pub use content::{Block, Icon, Page, Section, Theme, Tint};
pub use design::{Design, ParseDesignError};
pub use input::{InputEvent, Phase, Pointer};
pub use navigation::Navigator;
pub use raster::RasterInk;
pub use surface::{DrawingSurface, InkCanvas, InkStyle, PenState, StrokePath};

/// Two dimensional point. Serialized as `[x, y]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }
}

impl From<(f64, f64)> for Point {
    fn from(v: (f64, f64)) -> Self {
        Point { x: v.0, y: v.1 }
    }
}

impl From<[f64; 2]> for Point {
    fn from(v: [f64; 2]) -> Self {
        Point { x: v[0], y: v[1] }
    }
}

impl From<Point> for [f64; 2] {
    fn from(p: Point) -> Self {
        [p.x, p.y]
    }
}

impl std::ops::Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}
