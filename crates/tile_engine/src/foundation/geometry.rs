//! Integer geometry primitives
//!
//! Points, rectangles and boxes use integer coordinates so that movement and
//! collision stay pixel perfect. Integer division truncates toward zero like
//! Rust's `/`; use [`Point2::div_floor`] where floor semantics matter.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// A point (or vector) in integer 2-space
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Point2 {
    /// X coordinate
    pub x: i32,
    /// Y coordinate
    pub y: i32,
}

impl Point2 {
    /// The origin
    pub const ZERO: Self = Self { x: 0, y: 0 };

    /// Create a new point
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Componentwise multiplication
    pub const fn cmul(self, q: Self) -> Self {
        Self::new(self.x * q.x, self.y * q.y)
    }

    /// Componentwise division, truncating toward zero
    pub const fn cdiv(self, q: Self) -> Self {
        Self::new(self.x / q.x, self.y / q.y)
    }

    /// Componentwise division rounding toward negative infinity
    ///
    /// Only meaningful for positive divisors, which is all the tile map needs:
    /// `(-1, -1).div_floor((16, 16))` is `(-1, -1)` rather than `(0, 0)`.
    pub const fn div_floor(self, q: Self) -> Self {
        Self::new(self.x.div_euclid(q.x), self.y.div_euclid(q.y))
    }

    /// Dot product
    pub const fn dot(self, q: Self) -> i32 {
        self.x * q.x + self.y * q.y
    }

    /// Convert to floating point coordinates
    pub fn to_f64(self) -> (f64, f64) {
        (f64::from(self.x), f64::from(self.y))
    }
}

impl Add for Point2 {
    type Output = Self;
    fn add(self, q: Self) -> Self {
        Self::new(self.x + q.x, self.y + q.y)
    }
}

impl Sub for Point2 {
    type Output = Self;
    fn sub(self, q: Self) -> Self {
        self + -q
    }
}

impl Neg for Point2 {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

impl Mul<i32> for Point2 {
    type Output = Self;
    fn mul(self, k: i32) -> Self {
        Self::new(self.x * k, self.y * k)
    }
}

impl Div<i32> for Point2 {
    type Output = Self;
    /// Scalar division, truncating toward zero
    fn div(self, k: i32) -> Self {
        Self::new(self.x / k, self.y / k)
    }
}

impl fmt::Display for Point2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

/// A point (or vector) in integer 3-space
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Point3 {
    /// X coordinate
    pub x: i32,
    /// Y coordinate
    pub y: i32,
    /// Z coordinate
    pub z: i32,
}

impl Point3 {
    /// The origin
    pub const ZERO: Self = Self { x: 0, y: 0, z: 0 };

    /// Create a new point
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Componentwise multiplication
    pub const fn cmul(self, q: Self) -> Self {
        Self::new(self.x * q.x, self.y * q.y, self.z * q.z)
    }

    /// Componentwise division, truncating toward zero
    pub const fn cdiv(self, q: Self) -> Self {
        Self::new(self.x / q.x, self.y / q.y, self.z / q.z)
    }

    /// Drop the Z component
    pub const fn xy(self) -> Point2 {
        Point2::new(self.x, self.y)
    }

    /// Drop the Y component
    pub const fn xz(self) -> Point2 {
        Point2::new(self.x, self.z)
    }

    /// Componentwise minimum
    pub fn min(self, q: Self) -> Self {
        Self::new(self.x.min(q.x), self.y.min(q.y), self.z.min(q.z))
    }

    /// Componentwise maximum
    pub fn max(self, q: Self) -> Self {
        Self::new(self.x.max(q.x), self.y.max(q.y), self.z.max(q.z))
    }
}

impl Add for Point3 {
    type Output = Self;
    fn add(self, q: Self) -> Self {
        Self::new(self.x + q.x, self.y + q.y, self.z + q.z)
    }
}

impl Sub for Point3 {
    type Output = Self;
    fn sub(self, q: Self) -> Self {
        self + -q
    }
}

impl Neg for Point3 {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

impl Mul<i32> for Point3 {
    type Output = Self;
    fn mul(self, k: i32) -> Self {
        Self::new(self.x * k, self.y * k, self.z * k)
    }
}

impl Div<i32> for Point3 {
    type Output = Self;
    /// Scalar division, truncating toward zero
    fn div(self, k: i32) -> Self {
        Self::new(self.x / k, self.y / k, self.z / k)
    }
}

impl fmt::Display for Point3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{},{})", self.x, self.y, self.z)
    }
}

/// Integer isometric projection from 3-space onto the screen plane
///
/// A point projects to `(x + z/π.x, y + z/π.y)`. A zero divisor ignores Z on
/// that axis. Dividing (rather than multiplying) keeps Z from being
/// exaggerated and keeps the result on whole pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IntProjection {
    /// Divisor applied to Z before adding to X
    pub x: i32,
    /// Divisor applied to Z before adding to Y
    pub y: i32,
}

impl IntProjection {
    /// Create a new projection
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Project a 3D point
    pub const fn project(self, p: Point3) -> Point2 {
        let mut q = p.xy();
        if self.x != 0 {
            q.x += p.z / self.x;
        }
        if self.y != 0 {
            q.y += p.z / self.y;
        }
        q
    }
}

/// An axis-aligned rectangle in integer 2-space
///
/// `min` is inclusive and `max` exclusive. A rectangle may be built
/// backwards; [`Rect::canon`] fixes that. Equality is set equality, so every
/// empty rectangle equals every other empty rectangle.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Minimum corner
    pub min: Point2,
    /// Maximum corner
    pub max: Point2,
}

impl Rect {
    /// Create a rectangle from its corners
    pub const fn new(min: Point2, max: Point2) -> Self {
        Self { min, max }
    }

    /// Create a rectangle from a position and a size
    pub fn from_origin_size(origin: Point2, size: Point2) -> Self {
        Self::new(origin, origin + size)
    }

    /// Reports whether the rectangle contains no points
    pub const fn is_empty(&self) -> bool {
        self.min.x >= self.max.x || self.min.y >= self.max.y
    }

    /// Reports whether both rectangles have a non-empty intersection
    pub const fn overlaps(&self, other: &Self) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
    }

    /// Reports whether `p` lies inside the rectangle
    pub const fn contains(&self, p: Point2) -> bool {
        self.min.x <= p.x && p.x < self.max.x && self.min.y <= p.y && p.y < self.max.y
    }

    /// Width and height
    pub fn size(&self) -> Point2 {
        self.max - self.min
    }

    /// A copy with `min <= max` on every axis
    pub const fn canon(mut self) -> Self {
        if self.max.x < self.min.x {
            let t = self.min.x;
            self.min.x = self.max.x;
            self.max.x = t;
        }
        if self.max.y < self.min.y {
            let t = self.min.y;
            self.min.y = self.max.y;
            self.max.y = t;
        }
        self
    }
}

impl PartialEq for Rect {
    fn eq(&self, other: &Self) -> bool {
        (self.min == other.min && self.max == other.max) || (self.is_empty() && other.is_empty())
    }
}

impl Eq for Rect {}

impl Add<Point2> for Rect {
    type Output = Self;
    fn add(self, p: Point2) -> Self {
        Self::new(self.min + p, self.max + p)
    }
}

impl Sub<Point2> for Rect {
    type Output = Self;
    fn sub(self, p: Point2) -> Self {
        Self::new(self.min - p, self.max - p)
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.min, self.max)
    }
}

/// An axis-aligned rectangular prism in integer 3-space
///
/// Same conventions as [`Rect`], with a third axis.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Box3 {
    /// Minimum corner
    pub min: Point3,
    /// Maximum corner
    pub max: Point3,
}

impl Box3 {
    /// Create a box from its corners
    pub const fn new(min: Point3, max: Point3) -> Self {
        Self { min, max }
    }

    /// Reports whether the box contains no points
    pub const fn is_empty(&self) -> bool {
        self.min.x >= self.max.x || self.min.y >= self.max.y || self.min.z >= self.max.z
    }

    /// Reports whether both boxes have a non-empty intersection
    pub const fn overlaps(&self, other: &Self) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
            && self.min.z < other.max.z
            && other.min.z < self.max.z
    }

    /// Width, height and depth
    pub fn size(&self) -> Point3 {
        self.max - self.min
    }

    /// A copy with `min <= max` on every axis
    pub fn canon(self) -> Self {
        Self::new(self.min.min(self.max), self.min.max(self.max))
    }

    /// Smallest box containing both boxes. Empty boxes contribute nothing.
    pub fn union(self, other: Self) -> Self {
        if self.is_empty() {
            return other;
        }
        if other.is_empty() {
            return self;
        }
        Self::new(self.min.min(other.min), self.max.max(other.max))
    }

    /// The rectangle left after forgetting Z
    pub const fn xy(&self) -> Rect {
        Rect::new(self.min.xy(), self.max.xy())
    }

    /// The rectangle left after forgetting Y
    pub const fn xz(&self) -> Rect {
        Rect::new(self.min.xz(), self.max.xz())
    }

    /// The back face (minimum Z) projected through `projection`
    pub const fn back(&self, projection: IntProjection) -> Rect {
        let max = Point3::new(self.max.x, self.max.y, self.min.z);
        Rect::new(projection.project(self.min), projection.project(max))
    }

    /// The front face (maximum Z) projected through `projection`
    pub const fn front(&self, projection: IntProjection) -> Rect {
        let min = Point3::new(self.min.x, self.min.y, self.max.z);
        Rect::new(projection.project(min), projection.project(self.max))
    }
}

impl PartialEq for Box3 {
    fn eq(&self, other: &Self) -> bool {
        (self.min == other.min && self.max == other.max) || (self.is_empty() && other.is_empty())
    }
}

impl Eq for Box3 {}

impl Add<Point3> for Box3 {
    type Output = Self;
    fn add(self, p: Point3) -> Self {
        Self::new(self.min + p, self.max + p)
    }
}

impl Sub<Point3> for Box3 {
    type Output = Self;
    fn sub(self, p: Point3) -> Self {
        Self::new(self.min - p, self.max - p)
    }
}

impl fmt::Display for Box3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.min, self.max)
    }
}
