//! Axis-aligned bounding rectangles over `i64` coordinates.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An axis-aligned minimum bounding rectangle (MBR) over integer coordinates.
///
/// `x1 <= x2` and `y1 <= y2` are a caller contract, not something this type
/// enforces at runtime; violating it is asserted against in debug builds
/// (see [`Envelope::new`]) but must never corrupt a tree in release builds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Envelope {
    x1: i64,
    y1: i64,
    x2: i64,
    y2: i64,
}

impl Envelope {
    /// Creates a new envelope from its corners.
    ///
    /// `x1 <= x2` and `y1 <= y2` is a contract on the caller; it is checked
    /// with `debug_assert!` only.
    pub fn new(x1: i64, y1: i64, x2: i64, y2: i64) -> Self {
        debug_assert!(x1 <= x2 && y1 <= y2, "malformed envelope: {:?}", (x1, y1, x2, y2));
        Envelope { x1, y1, x2, y2 }
    }

    /// The empty envelope: the identity element of [`Envelope::extend`].
    ///
    /// Extending it by any envelope `r` yields exactly `r`.
    pub fn empty() -> Self {
        Envelope {
            x1: i64::MAX,
            y1: i64::MAX,
            x2: i64::MIN,
            y2: i64::MIN,
        }
    }

    pub fn x1(&self) -> i64 {
        self.x1
    }

    pub fn y1(&self) -> i64 {
        self.y1
    }

    pub fn x2(&self) -> i64 {
        self.x2
    }

    pub fn y2(&self) -> i64 {
        self.y2
    }

    fn width(&self) -> i64 {
        (self.x2 - self.x1).max(0)
    }

    fn height(&self) -> i64 {
        (self.y2 - self.y1).max(0)
    }

    /// `(x2 - x1) * (y2 - y1)`, clamped to zero for a degenerate/empty box.
    pub fn area(&self) -> i64 {
        self.width() * self.height()
    }

    /// `(x2 - x1) + (y2 - y1)`, the half-perimeter, clamped to zero.
    pub fn margin(&self) -> i64 {
        self.width() + self.height()
    }

    /// Mutates `self` into the smallest rectangle covering `self` and `other`.
    pub fn extend(&mut self, other: &Envelope) {
        self.x1 = self.x1.min(other.x1);
        self.y1 = self.y1.min(other.y1);
        self.x2 = self.x2.max(other.x2);
        self.y2 = self.y2.max(other.y2);
    }

    /// Returns the smallest rectangle covering `self` and `other`, without
    /// mutating either.
    pub fn extended(&self, other: &Envelope) -> Envelope {
        let mut result = *self;
        result.extend(other);
        result
    }

    /// Non-strict overlap: rectangles that only share an edge still intersect.
    pub fn intersects(&self, other: &Envelope) -> bool {
        self.x1 <= other.x2 && self.x2 >= other.x1 && self.y1 <= other.y2 && self.y2 >= other.y1
    }

    /// Non-strict containment: a rectangle contains itself, and equal edges count.
    pub fn contains(&self, other: &Envelope) -> bool {
        self.x1 <= other.x1 && self.y1 <= other.y1 && self.x2 >= other.x2 && self.y2 >= other.y2
    }

    /// The area of the geometric intersection of `self` and `other`, or 0 if
    /// they are disjoint.
    pub fn intersection_area(&self, other: &Envelope) -> i64 {
        let x1 = self.x1.max(other.x1);
        let y1 = self.y1.max(other.y1);
        let x2 = self.x2.min(other.x2);
        let y2 = self.y2.min(other.y2);
        Envelope { x1, y1, x2, y2 }.area()
    }

    /// The area enlargement incurred by extending `self` with `other`:
    /// `area(self.extended(other)) - area(self)`.
    pub fn enlargement(&self, other: &Envelope) -> i64 {
        self.extended(other).area() - self.area()
    }
}

#[cfg(test)]
mod test {
    use super::Envelope;

    #[test]
    fn area_and_margin() {
        let e = Envelope::new(0, 0, 10, 4);
        assert_eq!(e.area(), 40);
        assert_eq!(e.margin(), 14);
    }

    #[test]
    fn extend_is_commutative_and_idempotent() {
        let a = Envelope::new(0, 0, 2, 2);
        let b = Envelope::new(5, 5, 8, 8);
        let mut ab = a;
        ab.extend(&b);
        let mut ba = b;
        ba.extend(&a);
        assert_eq!(ab, ba);
        let mut ab_again = ab;
        ab_again.extend(&ab);
        assert_eq!(ab_again, ab);
    }

    #[test]
    fn extend_identity() {
        let r = Envelope::new(3, 4, 9, 20);
        assert_eq!(Envelope::empty().extended(&r), r);
    }

    #[test]
    fn touching_edges_intersect_and_contain() {
        let a = Envelope::new(0, 0, 10, 10);
        let b = Envelope::new(10, 10, 20, 20);
        assert!(a.intersects(&b));
        let c = Envelope::new(0, 0, 10, 10);
        assert!(a.contains(&c));
    }

    #[test]
    fn disjoint_has_zero_intersection_area() {
        let a = Envelope::new(0, 0, 1, 1);
        let b = Envelope::new(5, 5, 6, 6);
        assert!(!a.intersects(&b));
        assert_eq!(a.intersection_area(&b), 0);
    }

    #[test]
    fn enlargement_matches_union_minus_self() {
        let a = Envelope::new(0, 0, 10, 10);
        let b = Envelope::new(5, 5, 20, 6);
        let expected = a.extended(&b).area() - a.area();
        assert_eq!(a.enlargement(&b), expected);
    }
}
