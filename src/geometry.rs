use serde::Serialize;

/// Tolerance used when comparing solved floor-plan coordinates.
pub const EPSILON: f64 = 1e-6;

/// Extent measured in plan units (the square root of the area unit).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub const fn square(side: f64) -> Self {
        Self::new(side, side)
    }
}

/// Axis-aligned rectangle anchored at its top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// True when the interiors intersect; shared edges do not count.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right() - EPSILON
            && other.x < self.right() - EPSILON
            && self.y < other.bottom() - EPSILON
            && other.y < self.bottom() - EPSILON
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adjacent_rects_do_not_overlap() {
        let left = Rect::new(0.0, 0.0, 10.0, 5.0);
        let right = Rect::new(10.0, 0.0, 4.0, 5.0);
        assert!(!left.overlaps(&right));
        assert!(!right.overlaps(&left));
    }

    #[test]
    fn intersecting_rects_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(9.0, 9.0, 3.0, 3.0);
        assert!(a.overlaps(&b));
        assert_eq!(a.right(), 10.0);
        assert_eq!(b.bottom(), 12.0);
    }
}
