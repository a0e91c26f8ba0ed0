#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Error types for the wire module.
pub mod error;

/// Length-prefixed frame encoding and decoding.
pub mod frame;

/// Pull request tokens.
pub mod token;

pub use error::WireError;
pub use frame::{pull_frame, read_frame, read_pull, send_pull, write_frame, MAX_FRAME_BYTES};
pub use token::PullToken;
