#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Lane-batched packing path.
pub mod batch;

/// Error types for the pack module.
pub mod error;

/// Acceptance filter policies.
pub mod filter;

/// Packing entry points and options.
pub mod pack;

/// The packed wire element and quantization primitives.
pub mod packed;

pub use error::PackError;
pub use filter::{FilterPolicy, XBound};
pub use pack::{pack_points, PackOptions, PackReport};
pub use packed::{
    decode_points, dequantize_mm, encode_cloud, quantize_mm, PackedPoint, PACKED_STRIDE,
};
