/// Policy for the x-coordinate acceptance test.
///
/// The original pipeline's scalar and vectorized paths disagreed on this
/// test, so the bound is an explicit, named option rather than an inferred
/// constant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum XBound {
    /// Accept iff `-bound < x <= bound`.
    Within(f32),
    /// No x test; every x is accepted.
    AcceptAll,
}

impl XBound {
    #[inline]
    fn accepts(&self, x: f32) -> bool {
        match *self {
            XBound::Within(bound) => -bound < x && x <= bound,
            XBound::AcceptAll => true,
        }
    }
}

/// Spatial acceptance filter applied before packing.
///
/// A point is accepted iff its camera-local depth lies in `(0, z_max]` and
/// its x coordinate passes the [`XBound`] policy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterPolicy {
    /// Inclusive far depth bound in meters.
    pub z_max: f32,
    /// The x-coordinate policy.
    pub x_bound: XBound,
}

impl Default for FilterPolicy {
    fn default() -> Self {
        Self {
            z_max: 1.5,
            x_bound: XBound::Within(2.0),
        }
    }
}

impl FilterPolicy {
    /// Test the acceptance predicate on camera-local coordinates.
    #[inline]
    pub fn accepts(&self, x: f32, z: f32) -> bool {
        z > 0.0 && z <= self.z_max && self.x_bound.accepts(x)
    }
}
