/// An error type for the cloud module.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum CloudError {
    /// Error when the points and colors arrays have different lengths.
    #[error("Points length ({0}) does not match colors length ({1})")]
    PointColorMismatch(usize, usize),

    /// Error when the image geometry is inconsistent.
    #[error("Invalid image geometry: {0}")]
    InvalidImageGeometry(String),

    /// Error when the image buffer is smaller than the geometry requires.
    #[error("Image buffer length ({0}) is smaller than required ({1})")]
    ImageBufferTooSmall(usize, usize),
}
