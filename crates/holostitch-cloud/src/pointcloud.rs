use glam::Vec3;

use crate::error::CloudError;

/// A colored point cloud with index-aligned points and RGB colors.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointCloud {
    // The points in the point cloud, camera or world frame meters.
    points: Vec<[f32; 3]>,
    // The colors of the points, one RGB triple per point.
    colors: Vec<[u8; 3]>,
}

impl PointCloud {
    /// Create a new point cloud from index-aligned points and colors.
    pub fn new(points: Vec<[f32; 3]>, colors: Vec<[u8; 3]>) -> Result<Self, CloudError> {
        if points.len() != colors.len() {
            return Err(CloudError::PointColorMismatch(points.len(), colors.len()));
        }
        Ok(Self { points, colors })
    }

    /// Create an empty point cloud with capacity for `n` points.
    pub fn with_capacity(n: usize) -> Self {
        Self {
            points: Vec::with_capacity(n),
            colors: Vec::with_capacity(n),
        }
    }

    /// Get the number of points in the point cloud.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the point cloud is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Get as reference the points in the point cloud.
    pub fn points(&self) -> &[[f32; 3]] {
        &self.points
    }

    /// Get as reference the colors of the points in the point cloud.
    pub fn colors(&self) -> &[[u8; 3]] {
        &self.colors
    }

    /// Append a single point with its color.
    #[inline]
    pub fn push(&mut self, point: [f32; 3], color: [u8; 3]) {
        self.points.push(point);
        self.colors.push(color);
    }

    /// Append all points of `other`, preserving their order.
    pub fn append(&mut self, other: &PointCloud) {
        self.points.extend_from_slice(&other.points);
        self.colors.extend_from_slice(&other.colors);
    }

    /// Remove all points, keeping the allocation.
    pub fn clear(&mut self) {
        self.points.clear();
        self.colors.clear();
    }

    /// Get the minimum bound of the point cloud.
    pub fn get_min_bound(&self) -> Vec3 {
        self.points
            .iter()
            .map(|p| Vec3::from_array(*p))
            .fold(Vec3::INFINITY, |a, b| a.min(b))
    }

    /// Get the maximum bound of the point cloud.
    pub fn get_max_bound(&self) -> Vec3 {
        self.points
            .iter()
            .map(|p| Vec3::from_array(*p))
            .fold(Vec3::NEG_INFINITY, |a, b| a.max(b))
    }
}
