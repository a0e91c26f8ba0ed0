#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Error types for the cloud module.
pub mod error;

/// Color image views and geometry records.
pub mod image;

/// Bulk linear algebra over point slices.
pub mod linalg;

/// Colored point cloud container.
pub mod pointcloud;

/// Rigid transforms between camera and world frames.
pub mod transform;

pub use error::CloudError;
pub use image::{ColorImage, ImageGeometry};
pub use pointcloud::PointCloud;
pub use transform::RigidTransform;
