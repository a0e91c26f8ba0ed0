/// Number of i16 slots one packed point occupies.
pub const PACKED_STRIDE: usize = 5;

/// Number of wire bytes one packed point occupies.
pub const PACKED_BYTES: usize = PACKED_STRIDE * 2;

/// Conversion rate between meters and the quantized unit (millimeters).
pub const CONV_RATE: f32 = 1000.0;

/// One quantized, color-carrying wire element.
///
/// Coordinates are millimeters truncated toward zero; the color channels are
/// packed as `color_lo = r | (g << 8)` and `color_hi = b`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PackedPoint {
    /// Quantized x coordinate in millimeters.
    pub x_mm: i16,
    /// Quantized y coordinate in millimeters.
    pub y_mm: i16,
    /// Quantized z coordinate in millimeters.
    pub z_mm: i16,
    /// Red in the low byte, green in the high byte.
    pub color_lo: i16,
    /// Blue in the low byte.
    pub color_hi: i16,
}

impl PackedPoint {
    /// Build a packed point from a world-space point and its color.
    #[inline]
    pub fn from_world(p: [f32; 3], rgb: [u8; 3]) -> Self {
        Self {
            x_mm: quantize_mm(p[0]),
            y_mm: quantize_mm(p[1]),
            z_mm: quantize_mm(p[2]),
            color_lo: (rgb[0] as i16) | ((rgb[1] as i16) << 8),
            color_hi: rgb[2] as i16,
        }
    }

    /// Read a packed point from five consecutive i16 slots.
    #[inline]
    pub fn from_slots(slots: &[i16; PACKED_STRIDE]) -> Self {
        Self {
            x_mm: slots[0],
            y_mm: slots[1],
            z_mm: slots[2],
            color_lo: slots[3],
            color_hi: slots[4],
        }
    }

    /// Write the packed point into five consecutive i16 slots.
    #[inline]
    pub fn write_to(&self, slots: &mut [i16]) {
        slots[0] = self.x_mm;
        slots[1] = self.y_mm;
        slots[2] = self.z_mm;
        slots[3] = self.color_lo;
        slots[4] = self.color_hi;
    }

    /// Dequantized point in meters.
    #[inline]
    pub fn point(&self) -> [f32; 3] {
        [
            dequantize_mm(self.x_mm),
            dequantize_mm(self.y_mm),
            dequantize_mm(self.z_mm),
        ]
    }

    /// Unpacked RGB color.
    #[inline]
    pub fn color(&self) -> [u8; 3] {
        let lo = self.color_lo as u16;
        [(lo & 0xff) as u8, (lo >> 8) as u8, (self.color_hi as u16 & 0xff) as u8]
    }
}

/// Quantize a meter coordinate to millimeters, truncated toward zero.
///
/// Values outside the i16 range wrap (two's complement truncation). This is a
/// wire-format limitation, kept as-is; callers that care can count overflows
/// via [`quantize_overflows`].
#[inline]
pub fn quantize_mm(v: f32) -> i16 {
    (v * CONV_RATE).trunc() as i32 as i16
}

/// Whether quantizing `v` wraps outside the i16 range.
#[inline]
pub fn quantize_overflows(v: f32) -> bool {
    let q = (v * CONV_RATE).trunc() as i32;
    q != q as i16 as i32
}

/// Dequantize a millimeter coordinate back to meters.
#[inline]
pub fn dequantize_mm(v: i16) -> f32 {
    v as f32 / CONV_RATE
}

/// Decode packed i16 slots into points and colors, keeping every
/// `downsample`-th point.
///
/// # Arguments
///
/// * `slots` - The packed buffer; its length must be a multiple of
///   [`PACKED_STRIDE`].
/// * `downsample` - Keep one point out of every `downsample` (1 keeps all).
pub fn decode_points(slots: &[i16], downsample: usize) -> (Vec<[f32; 3]>, Vec<[u8; 3]>) {
    let step = downsample.max(1);
    let count = slots.len() / PACKED_STRIDE;
    let mut points = Vec::with_capacity(count.div_ceil(step));
    let mut colors = Vec::with_capacity(count.div_ceil(step));

    for (i, chunk) in slots.chunks_exact(PACKED_STRIDE).enumerate() {
        if i % step != 0 {
            continue;
        }
        let packed = PackedPoint::from_slots(&[chunk[0], chunk[1], chunk[2], chunk[3], chunk[4]]);
        points.push(packed.point());
        colors.push(packed.color());
    }

    (points, colors)
}

/// Densely encode an already-transformed cloud into packed slots, 1:1.
///
/// The inverse of [`decode_points`] up to quantization; used to re-serve a
/// merged cloud downstream. Returns the number of encoded points.
///
/// PRECONDITION: `points` and `colors` are index-aligned and `out` holds at
/// least `points.len() * PACKED_STRIDE` slots.
pub fn encode_cloud(points: &[[f32; 3]], colors: &[[u8; 3]], out: &mut [i16]) -> usize {
    for ((p, rgb), slots) in points
        .iter()
        .zip(colors.iter())
        .zip(out.chunks_exact_mut(PACKED_STRIDE))
    {
        PackedPoint::from_world(*p, *rgb).write_to(slots);
    }
    points.len().min(colors.len())
}
