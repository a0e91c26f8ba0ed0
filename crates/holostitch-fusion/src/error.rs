use holostitch_stream::StreamError;
use holostitch_wire::PullToken;

/// An error type for the fusion module.
#[derive(thiserror::Error, Debug)]
pub enum FusionError {
    /// One camera stream failed, failing the whole cycle.
    #[error("camera {camera} stream failed")]
    Camera {
        /// Index of the failing camera in configuration order.
        camera: usize,
        /// The underlying stream failure.
        #[source]
        source: StreamError,
    },

    /// A camera task panicked before reaching the barrier.
    #[error("camera {0} worker panicked")]
    WorkerPanic(usize),

    /// Protocol failure on the downstream connection.
    #[error(transparent)]
    Wire(#[from] holostitch_wire::WireError),

    /// The downstream consumer pulled a payload kind this server cannot emit.
    #[error("pull token {0:?} is not served downstream")]
    Unsupported(PullToken),

    /// Configuration could not be parsed.
    #[error("invalid stitch configuration: {0}")]
    Config(#[from] serde_json::Error),

    /// Configuration file could not be read.
    #[error("failed to read stitch configuration: {0}")]
    ConfigIo(#[from] std::io::Error),
}
