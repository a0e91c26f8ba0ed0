/// An error type for the pack module.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum PackError {
    /// Error when the vertex and texcoord arrays have different lengths.
    #[error("Vertex count ({0}) does not match texcoord count ({1})")]
    LengthMismatch(usize, usize),

    /// Error when the output buffer cannot hold all candidate points.
    #[error("Output buffer has {0} slots but {1} are required")]
    OutputTooSmall(usize, usize),

    /// Error from the color image view.
    #[error(transparent)]
    Image(#[from] holostitch_cloud::CloudError),

    /// The worker thread pool failed to build.
    #[error("failed to build thread pool: {0}")]
    ThreadPool(String),
}
