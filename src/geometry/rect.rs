//! Axis-aligned rectangle with edge and anchor accessors

use super::Vec2;

/// Named reference point on a rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    TopLeft,
    MidTop,
    TopRight,
    BottomLeft,
    MidBottom,
    BottomRight,
    Center,
}

/// A rectangle defined by top-left position and size
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Create a rect of the given size whose `anchor` sits on `point`
    pub fn from_anchor(anchor: Anchor, point: Vec2, w: f32, h: f32) -> Self {
        let mut rect = Self::new(0.0, 0.0, w, h);
        rect.set_anchor(anchor, point);
        rect
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.w * 0.5
    }

    pub fn center_y(&self) -> f32 {
        self.y + self.h * 0.5
    }

    pub fn set_left(&mut self, left: f32) {
        self.x = left;
    }

    pub fn set_right(&mut self, right: f32) {
        self.x = right - self.w;
    }

    pub fn set_top(&mut self, top: f32) {
        self.y = top;
    }

    pub fn set_bottom(&mut self, bottom: f32) {
        self.y = bottom - self.h;
    }

    pub fn top_left(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn mid_bottom(&self) -> Vec2 {
        Vec2::new(self.center_x(), self.bottom())
    }

    pub fn bottom_left(&self) -> Vec2 {
        Vec2::new(self.x, self.bottom())
    }

    pub fn bottom_right(&self) -> Vec2 {
        Vec2::new(self.right(), self.bottom())
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.center_x(), self.center_y())
    }

    /// Read the point for an anchor
    pub fn anchor(&self, anchor: Anchor) -> Vec2 {
        match anchor {
            Anchor::TopLeft => self.top_left(),
            Anchor::MidTop => Vec2::new(self.center_x(), self.y),
            Anchor::TopRight => Vec2::new(self.right(), self.y),
            Anchor::BottomLeft => self.bottom_left(),
            Anchor::MidBottom => self.mid_bottom(),
            Anchor::BottomRight => self.bottom_right(),
            Anchor::Center => self.center(),
        }
    }

    /// Move the rect so that its anchor sits on `point`, keeping the size
    pub fn set_anchor(&mut self, anchor: Anchor, point: Vec2) {
        let (fx, fy) = match anchor {
            Anchor::TopLeft => (0.0, 0.0),
            Anchor::MidTop => (0.5, 0.0),
            Anchor::TopRight => (1.0, 0.0),
            Anchor::BottomLeft => (0.0, 1.0),
            Anchor::MidBottom => (0.5, 1.0),
            Anchor::BottomRight => (1.0, 1.0),
            Anchor::Center => (0.5, 0.5),
        };
        self.x = point.x - self.w * fx;
        self.y = point.y - self.h * fy;
    }

    /// Resize, keeping the given anchor point fixed
    pub fn resized_at(&self, anchor: Anchor, w: f32, h: f32) -> Self {
        Self::from_anchor(anchor, self.anchor(anchor), w, h)
    }

    /// Translate in place
    pub fn shift(&mut self, dx: f32, dy: f32) {
        self.x += dx;
        self.y += dy;
    }

    /// Strict overlap test: rects that only share an edge do not intersect
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// Check if point is inside
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges_and_setters() {
        let mut r = Rect::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(r.right(), 40.0);
        assert_eq!(r.bottom(), 60.0);

        r.set_right(100.0);
        assert_eq!(r.x, 70.0);
        r.set_bottom(64.0);
        assert_eq!(r.y, 24.0);
        assert_eq!(r.w, 30.0);
    }

    #[test]
    fn test_touching_edges_do_not_intersect() {
        let a = Rect::new(0.0, 0.0, 64.0, 64.0);
        let b = Rect::new(64.0, 0.0, 64.0, 64.0);
        let c = Rect::new(0.0, 64.0, 64.0, 64.0);
        assert!(!a.intersects(&b));
        assert!(!a.intersects(&c));
        assert!(a.intersects(&Rect::new(63.0, 63.0, 10.0, 10.0)));
    }

    #[test]
    fn test_resize_keeps_anchor() {
        let r = Rect::new(100.0, 100.0, 40.0, 60.0);
        let resized = r.resized_at(Anchor::BottomRight, 20.0, 30.0);
        assert_eq!(resized.bottom_right(), r.bottom_right());
        assert_eq!(resized.w, 20.0);

        let same = r.resized_at(Anchor::MidBottom, 40.0, 60.0);
        assert_eq!(same, r);
    }

    #[test]
    fn test_contains() {
        let r = Rect::new(10.0, 20.0, 100.0, 50.0);
        assert!(r.contains(50.0, 40.0));
        assert!(!r.contains(5.0, 40.0));
        assert!(!r.contains(50.0, 100.0));
    }
}
