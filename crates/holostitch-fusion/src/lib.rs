#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Camera endpoint and calibration configuration.
pub mod config;

/// Error types for the fusion module.
pub mod error;

/// Downstream serving of stitched clouds.
pub mod server;

/// The fan-out/fan-in stitching cycle.
pub mod stitcher;

pub use config::{CameraEndpoint, StitchConfig};
pub use error::FusionError;
pub use server::StitchServer;
pub use stitcher::Stitcher;
