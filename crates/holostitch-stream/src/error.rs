use holostitch_wire::PullToken;

/// An error type for the stream module.
#[derive(thiserror::Error, Debug)]
pub enum StreamError {
    /// Protocol or transport failure on the session's connection.
    #[error(transparent)]
    Wire(#[from] holostitch_wire::WireError),

    /// Packing the captured frame failed.
    #[error(transparent)]
    Pack(#[from] holostitch_pack::PackError),

    /// The captured frame is inconsistent with the cached geometry.
    #[error(transparent)]
    Cloud(#[from] holostitch_cloud::CloudError),

    /// The frame source failed to deliver a capture.
    #[error("frame capture failed: {0}")]
    Capture(String),

    /// The consumer pulled a payload kind this session does not serve.
    #[error("pull token {0:?} is not served by this session")]
    Unsupported(PullToken),
}
