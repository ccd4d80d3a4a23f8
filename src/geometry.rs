//! Axis-aligned pixel rectangles with a top-left origin.
//!
//! Edge setters move the rectangle without resizing it, so clamping the
//! leading edge of a moving body is a single assignment.

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    pub fn from_size(size: (i32, i32)) -> Self {
        Self::new(0, 0, size.0, size.1)
    }

    // ── Edges ─────────────────────────────────────────────────────────────────

    pub fn left(&self) -> i32 {
        self.x
    }

    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    pub fn top(&self) -> i32 {
        self.y
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    pub fn centerx(&self) -> i32 {
        self.x + self.w / 2
    }

    pub fn centery(&self) -> i32 {
        self.y + self.h / 2
    }

    pub fn set_left(&mut self, v: i32) {
        self.x = v;
    }

    pub fn set_right(&mut self, v: i32) {
        self.x = v - self.w;
    }

    pub fn set_top(&mut self, v: i32) {
        self.y = v;
    }

    pub fn set_bottom(&mut self, v: i32) {
        self.y = v - self.h;
    }

    // ── Anchor points ─────────────────────────────────────────────────────────

    pub fn topleft(&self) -> Point {
        Point::new(self.left(), self.top())
    }

    pub fn topright(&self) -> Point {
        Point::new(self.right(), self.top())
    }

    pub fn midtop(&self) -> Point {
        Point::new(self.centerx(), self.top())
    }

    pub fn bottomleft(&self) -> Point {
        Point::new(self.left(), self.bottom())
    }

    pub fn bottomright(&self) -> Point {
        Point::new(self.right(), self.bottom())
    }

    pub fn midbottom(&self) -> Point {
        Point::new(self.centerx(), self.bottom())
    }

    pub fn center(&self) -> Point {
        Point::new(self.centerx(), self.centery())
    }

    /// Same size, moved so that `anchor` of the result lands on `p`.
    pub fn anchored(self, anchor: Anchor, p: Point) -> Self {
        let (w, h) = (self.w, self.h);
        let (x, y) = match anchor {
            Anchor::TopLeft => (p.x, p.y),
            Anchor::TopRight => (p.x - w, p.y),
            Anchor::MidTop => (p.x - w / 2, p.y),
            Anchor::BottomLeft => (p.x, p.y - h),
            Anchor::BottomRight => (p.x - w, p.y - h),
            Anchor::MidBottom => (p.x - w / 2, p.y - h),
            Anchor::Center => (p.x - w / 2, p.y - h / 2),
        };
        Self::new(x, y, w, h)
    }

    pub fn anchor_point(&self, anchor: Anchor) -> Point {
        match anchor {
            Anchor::TopLeft => self.topleft(),
            Anchor::TopRight => self.topright(),
            Anchor::MidTop => self.midtop(),
            Anchor::BottomLeft => self.bottomleft(),
            Anchor::BottomRight => self.bottomright(),
            Anchor::MidBottom => self.midbottom(),
            Anchor::Center => self.center(),
        }
    }

    /// Strict overlap test: rectangles that only share an edge do not collide.
    pub fn colliderect(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Anchor {
    TopLeft,
    TopRight,
    MidTop,
    BottomLeft,
    BottomRight,
    MidBottom,
    Center,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn touching_edges_do_not_collide() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(10, 0, 10, 10);
        assert!(!a.colliderect(&b));
        assert!(a.colliderect(&Rect::new(9, 9, 5, 5)));
    }

    #[test]
    fn anchored_keeps_the_requested_point() {
        let r = Rect::from_size((20, 30)).anchored(Anchor::MidBottom, Point::new(50, 100));
        assert_eq!(r.midbottom(), Point::new(50, 100));
        assert_eq!(r.w, 20);
        let r = r.anchored(Anchor::TopRight, Point::new(5, 5));
        assert_eq!(r.topright(), Point::new(5, 5));
    }

    #[test]
    fn edge_setters_translate_only() {
        let mut r = Rect::new(0, 0, 10, 20);
        r.set_right(100);
        r.set_bottom(50);
        assert_eq!(r, Rect::new(90, 30, 10, 20));
    }
}
