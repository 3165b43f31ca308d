//! Planar quantities read from the node and boundary condition tables.
//!
//! Everything lives in the single global X-Y frame of the problem. Values carry
//! whatever consistent units the tables were written in (metres and newtons for SI
//! input); no conversion happens here.

use nalgebra::Vector2;
use serde::Serialize;

/// Node location in the global frame, taken from the `x` and `y` node columns.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl Point {
    /// Place a point at `(x, y)`.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Position vector used by element measurement.
    #[must_use]
    pub fn to_vector(self) -> Vector2<f64> {
        Vector2::new(self.x, self.y)
    }
}

impl From<Vector2<f64>> for Point {
    fn from(value: Vector2<f64>) -> Self {
        Self::new(value.x, value.y)
    }
}

impl From<Point> for Vector2<f64> {
    fn from(value: Point) -> Self {
        value.to_vector()
    }
}

/// Nodal load from a type 2 boundary row. Nodes without such a row carry zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct Force {
    /// Load along X (`v1`).
    pub x: f64,
    /// Load along Y (`v2`).
    pub y: f64,
}

impl Force {
    /// Load with components `x` and `y`.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Solved translation of a node, read from its two degrees of freedom.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct Displacement {
    /// Translation along X.
    pub x: f64,
    /// Translation along Y.
    pub y: f64,
}

impl Displacement {
    /// Translation with components `x` and `y`.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<Vector2<f64>> for Displacement {
    fn from(value: Vector2<f64>) -> Self {
        Self::new(value.x, value.y)
    }
}

/// Shorthand for [`Point::new`].
///
/// # Examples
/// ```
/// use trussfem::point;
///
/// let apex = point(1.0, 1.5);
/// assert_eq!(apex.y, 1.5);
/// ```
#[must_use]
pub const fn point(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

/// Shorthand for [`Force::new`].
///
/// # Examples
/// ```
/// use trussfem::force;
///
/// let gravity = force(0.0, -9.81e3);
/// assert_eq!(gravity.x, 0.0);
/// ```
#[must_use]
pub const fn force(x: f64, y: f64) -> Force {
    Force::new(x, y)
}
