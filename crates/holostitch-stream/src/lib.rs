#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Consumer-side stream client.
pub mod client;

/// Error types for the stream module.
pub mod error;

/// Producer-side camera session.
pub mod producer;

pub use client::StreamClient;
pub use error::StreamError;
pub use producer::{CameraSession, CapturedFrame, FrameSource};
