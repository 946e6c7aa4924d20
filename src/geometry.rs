/// Points per canvas unit. One canvas unit is one inch of the figure.
pub const POINTS_PER_UNIT: f32 = 72.0;

/// A 2D point, either in canvas units or in SVG points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: Point) -> f32 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Moves `distance` toward `target`. Returns `self` when both points coincide.
    pub fn toward(&self, target: Point, distance: f32) -> Point {
        let length = self.distance_to(target);
        if length <= f32::EPSILON {
            return *self;
        }
        let t = distance / length;
        Point::new(
            self.x + (target.x - self.x) * t,
            self.y + (target.y - self.y) * t,
        )
    }
}

/// Axis-aligned bounding box, y pointing down (SVG user space).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl BBox {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_corners(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        let (left, right) = if x1 <= x2 { (x1, x2) } else { (x2, x1) };
        let (top, bottom) = if y1 <= y2 { (y1, y2) } else { (y2, y1) };
        Self::new(left, top, right - left, bottom - top)
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn with_padding(&self, padding: f32) -> Self {
        Self::new(
            self.x - padding,
            self.y - padding,
            self.width + padding * 2.0,
            self.height + padding * 2.0,
        )
    }

    pub fn union(&self, other: &BBox) -> Self {
        let left = self.x.min(other.x);
        let top = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        Self::new(left, top, right - left, bottom - top)
    }
}

/// Running union of extents; empty until the first box is added.
#[derive(Debug, Clone, Copy, Default)]
pub struct Extents {
    bounds: Option<BBox>,
}

impl Extents {
    pub fn include(&mut self, bbox: BBox) {
        self.bounds = Some(match self.bounds {
            Some(current) => current.union(&bbox),
            None => bbox,
        });
    }

    pub fn include_point(&mut self, x: f32, y: f32) {
        self.include(BBox::new(x, y, 0.0, 0.0));
    }

    pub fn bounds(&self) -> Option<BBox> {
        self.bounds
    }
}
