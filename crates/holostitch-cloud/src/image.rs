use crate::error::CloudError;

/// Geometry of a row-major color image buffer.
///
/// The byte offset of pixel `(x, y)` is `x * bytes_per_pixel + y * stride_bytes`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageGeometry {
    /// Width of the image in pixels.
    pub width: usize,
    /// Height of the image in pixels.
    pub height: usize,
    /// Number of bytes per pixel, at least 3 (RGB leading).
    pub bytes_per_pixel: usize,
    /// Number of bytes per image row, at least `width * bytes_per_pixel`.
    pub stride_bytes: usize,
}

impl ImageGeometry {
    /// Number of bytes the geometry requires from a backing buffer.
    #[inline]
    pub fn required_bytes(&self) -> usize {
        self.height * self.stride_bytes
    }
}

impl std::fmt::Display for ImageGeometry {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{}x{} ({} bpp, stride {})",
            self.width, self.height, self.bytes_per_pixel, self.stride_bytes
        )
    }
}

/// A bounds-checked view over a row-major color byte buffer.
///
/// Construction validates the buffer against the geometry once, so pixel
/// lookups on clamped coordinates cannot read out of bounds.
#[derive(Debug, Clone, Copy)]
pub struct ColorImage<'a> {
    geometry: ImageGeometry,
    data: &'a [u8],
}

impl<'a> ColorImage<'a> {
    /// Create a new image view from geometry and pixel data.
    ///
    /// # Errors
    ///
    /// Returns an error if the geometry is degenerate, the stride cannot hold
    /// a full row, fewer than 3 bytes per pixel are declared, or the buffer
    /// is shorter than `height * stride_bytes`.
    pub fn new(geometry: ImageGeometry, data: &'a [u8]) -> Result<Self, CloudError> {
        if geometry.width == 0 || geometry.height == 0 {
            return Err(CloudError::InvalidImageGeometry(format!(
                "zero sized image {geometry}"
            )));
        }
        if geometry.bytes_per_pixel < 3 {
            return Err(CloudError::InvalidImageGeometry(format!(
                "need at least 3 bytes per pixel, got {}",
                geometry.bytes_per_pixel
            )));
        }
        if geometry.stride_bytes < geometry.width * geometry.bytes_per_pixel {
            return Err(CloudError::InvalidImageGeometry(format!(
                "stride too small for row: {geometry}"
            )));
        }
        if data.len() < geometry.required_bytes() {
            return Err(CloudError::ImageBufferTooSmall(
                data.len(),
                geometry.required_bytes(),
            ));
        }
        Ok(Self { geometry, data })
    }

    /// Get the geometry of the image.
    #[inline]
    pub fn geometry(&self) -> ImageGeometry {
        self.geometry
    }

    /// Width of the image in pixels.
    #[inline]
    pub fn width(&self) -> usize {
        self.geometry.width
    }

    /// Height of the image in pixels.
    #[inline]
    pub fn height(&self) -> usize {
        self.geometry.height
    }

    /// Read the RGB triple at pixel `(x, y)`.
    ///
    /// Coordinates are clamped into the image, matching the texel clamping
    /// of the packing pipeline.
    #[inline]
    pub fn rgb(&self, x: usize, y: usize) -> [u8; 3] {
        let x = x.min(self.geometry.width - 1);
        let y = y.min(self.geometry.height - 1);
        let off = x * self.geometry.bytes_per_pixel + y * self.geometry.stride_bytes;
        [self.data[off], self.data[off + 1], self.data[off + 2]]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geometry_2x2() -> ImageGeometry {
        ImageGeometry {
            width: 2,
            height: 2,
            bytes_per_pixel: 3,
            stride_bytes: 6,
        }
    }

    #[test]
    fn test_image_view_rgb() -> Result<(), CloudError> {
        let data = [
            1, 2, 3, 4, 5, 6, //
            7, 8, 9, 10, 11, 12,
        ];
        let image = ColorImage::new(geometry_2x2(), &data)?;
        assert_eq!(image.rgb(0, 0), [1, 2, 3]);
        assert_eq!(image.rgb(1, 0), [4, 5, 6]);
        assert_eq!(image.rgb(0, 1), [7, 8, 9]);
        assert_eq!(image.rgb(1, 1), [10, 11, 12]);
        // out of range coordinates clamp to the border
        assert_eq!(image.rgb(5, 5), [10, 11, 12]);
        Ok(())
    }

    #[test]
    fn test_image_view_respects_stride() -> Result<(), CloudError> {
        let geometry = ImageGeometry {
            width: 1,
            height: 2,
            bytes_per_pixel: 4,
            stride_bytes: 8,
        };
        let data = [1, 2, 3, 0, 0, 0, 0, 0, 9, 8, 7, 0, 0, 0, 0, 0];
        let image = ColorImage::new(geometry, &data)?;
        assert_eq!(image.rgb(0, 1), [9, 8, 7]);
        Ok(())
    }

    #[test]
    fn test_image_view_too_small() {
        let data = [0u8; 11];
        let res = ColorImage::new(geometry_2x2(), &data);
        assert_eq!(res.err(), Some(CloudError::ImageBufferTooSmall(11, 12)));
    }
}
