/// An error type for the wire module.
///
/// Every variant is fatal for the session it occurs on; none is retried.
#[derive(thiserror::Error, Debug)]
pub enum WireError {
    /// Transport failure on the underlying stream.
    #[error("Stream I/O failed. {0}")]
    Io(#[from] std::io::Error),

    /// The peer closed the connection before a full frame arrived.
    #[error("connection closed before the declared frame was received")]
    TruncatedFrame,

    /// The declared payload size is not a whole number of packed points.
    #[error("frame declares {0} payload bytes, not a multiple of the {1} byte point size")]
    CorruptFrame(u32, usize),

    /// The declared payload size exceeds the protocol limit.
    #[error("frame declares {0} payload bytes, above the {1} byte limit")]
    FrameTooLarge(u32, usize),

    /// The producer received a byte that is not a known pull token.
    #[error("unrecognized pull token 0x{0:02x}")]
    BadToken(u8),

    /// The consumer went away while the producer waited for a pull token.
    #[error("connection closed while waiting for a pull token")]
    ConnectionClosed,
}
