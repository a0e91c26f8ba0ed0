use std::marker::PhantomData;
use std::sync::atomic::{AtomicUsize, Ordering};

use rayon::prelude::*;

use holostitch_cloud::{ColorImage, RigidTransform};

use crate::batch;
use crate::error::PackError;
use crate::filter::FilterPolicy;
use crate::packed::{quantize_overflows, PackedPoint, PACKED_STRIDE};

/// Index range processed by one worker at a time.
const CHUNK_SIZE: usize = 8192;

/// Options controlling one packing pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PackOptions {
    /// Spatial acceptance filter; `None` packs every point densely.
    pub filter: Option<FilterPolicy>,
    /// Use the lane-batched path instead of the scalar one.
    pub vectorized: bool,
    /// Worker count; 1 runs serially on the caller thread.
    pub workers: usize,
}

impl Default for PackOptions {
    fn default() -> Self {
        Self {
            filter: None,
            vectorized: false,
            workers: 1,
        }
    }
}

/// Outcome of one packing pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackReport {
    /// Number of packed points written to the output buffer.
    pub points: usize,
    /// Number of points whose quantization wrapped outside the i16 range.
    ///
    /// Diagnostic only; the wire encoding is unaffected.
    pub overflows: usize,
}

impl PackReport {
    /// Size of the packed payload in bytes.
    #[inline]
    pub fn payload_bytes(&self) -> usize {
        self.points * PACKED_STRIDE * 2
    }
}

/// Output buffer shared across workers.
///
/// Slot indices are unique per point: the dense path uses the point index,
/// the filtered path claims indices from an atomic cursor. Either way no two
/// workers ever write the same slot.
pub(crate) struct SharedSlots<'a> {
    ptr: *mut i16,
    len: usize,
    _marker: PhantomData<&'a mut [i16]>,
}

// SAFETY: writes are disjoint by slot-uniqueness (see above), so concurrent
// access from multiple workers cannot race.
unsafe impl Send for SharedSlots<'_> {}
unsafe impl Sync for SharedSlots<'_> {}

impl<'a> SharedSlots<'a> {
    pub(crate) fn new(out: &'a mut [i16]) -> Self {
        Self {
            ptr: out.as_mut_ptr(),
            len: out.len(),
            _marker: PhantomData,
        }
    }

    /// Write one packed point into `slot`.
    ///
    /// # Safety
    ///
    /// `slot` must be claimed at most once across all workers of the pass
    /// and must lie within the buffer.
    #[inline]
    pub(crate) unsafe fn write(&self, slot: usize, packed: &PackedPoint) {
        let base = slot * PACKED_STRIDE;
        debug_assert!(base + PACKED_STRIDE <= self.len);
        let p = self.ptr.add(base);
        p.write(packed.x_mm);
        p.add(1).write(packed.y_mm);
        p.add(2).write(packed.z_mm);
        p.add(3).write(packed.color_lo);
        p.add(4).write(packed.color_hi);
    }
}

/// Everything a worker needs to pack a sub-range of the input.
pub(crate) struct PackContext<'a> {
    pub(crate) vertices: &'a [[f32; 3]],
    pub(crate) texcoords: &'a [[f32; 2]],
    pub(crate) image: &'a ColorImage<'a>,
    pub(crate) transform: &'a RigidTransform,
    pub(crate) filter: Option<FilterPolicy>,
    pub(crate) cursor: &'a AtomicUsize,
    pub(crate) overflows: &'a AtomicUsize,
    pub(crate) out: &'a SharedSlots<'a>,
}

/// Look up the texel a texcoord samples: floor of `value + 0.5`, clamped.
///
/// The floor-of-plus-half rounding is part of the pipeline contract and must
/// not be replaced with symmetric rounding.
#[inline]
pub(crate) fn texel(uv: &[f32; 2], width: usize, height: usize) -> (usize, usize) {
    let px = (uv[0] * width as f32 + 0.5).floor() as i64;
    let py = (uv[1] * height as f32 + 0.5).floor() as i64;
    (
        px.clamp(0, width as i64 - 1) as usize,
        py.clamp(0, height as i64 - 1) as usize,
    )
}

/// Pack the point at global index `gi`, claiming a slot if it is accepted.
#[inline]
pub(crate) fn pack_one(ctx: &PackContext<'_>, gi: usize) {
    let v = &ctx.vertices[gi];

    if let Some(filter) = &ctx.filter {
        if !filter.accepts(v[0], v[2]) {
            return;
        }
    }

    let (px, py) = texel(&ctx.texcoords[gi], ctx.image.width(), ctx.image.height());
    let rgb = ctx.image.rgb(px, py);
    let world = ctx.transform.apply(v);

    if world.iter().any(|&c| quantize_overflows(c)) {
        ctx.overflows.fetch_add(1, Ordering::Relaxed);
    }

    let slot = if ctx.filter.is_some() {
        ctx.cursor.fetch_add(1, Ordering::Relaxed)
    } else {
        gi
    };

    // SAFETY: `slot` is either the unique global index (dense path) or a
    // freshly claimed cursor value, and the buffer was sized up front.
    unsafe { ctx.out.write(slot, &PackedPoint::from_world(world, rgb)) };
}

fn pack_chunk_scalar(ctx: &PackContext<'_>, range: std::ops::Range<usize>) {
    for gi in range {
        pack_one(ctx, gi);
    }
}

/// Pack per-frame geometry into a caller-provided quantized buffer.
///
/// # Arguments
///
/// * `vertices` - Camera-local points in meters.
/// * `texcoords` - Index-aligned normalized texture coordinates.
/// * `image` - The color image the texcoords sample.
/// * `transform` - Rigid transform into the world frame, applied per point.
/// * `options` - Filter, path selection and worker count.
/// * `out` - Output buffer with at least `vertices.len() * 5` i16 slots.
///
/// # Returns
///
/// A [`PackReport`] with the packed point count. With filtering disabled the
/// count equals the input length and point `i` occupies slots `i*5..i*5+5`;
/// with filtering enabled the accepted points occupy the leading slots in an
/// arbitrary order.
pub fn pack_points(
    vertices: &[[f32; 3]],
    texcoords: &[[f32; 2]],
    image: &ColorImage<'_>,
    transform: &RigidTransform,
    options: &PackOptions,
    out: &mut [i16],
) -> Result<PackReport, PackError> {
    if vertices.len() != texcoords.len() {
        return Err(PackError::LengthMismatch(vertices.len(), texcoords.len()));
    }
    let required = vertices.len() * PACKED_STRIDE;
    if out.len() < required {
        return Err(PackError::OutputTooSmall(out.len(), required));
    }

    let n = vertices.len();
    let cursor = AtomicUsize::new(0);
    let overflows = AtomicUsize::new(0);
    let shared = SharedSlots::new(out);

    let ctx = PackContext {
        vertices,
        texcoords,
        image,
        transform,
        filter: options.filter,
        cursor: &cursor,
        overflows: &overflows,
        out: &shared,
    };

    let num_chunks = n.div_ceil(CHUNK_SIZE);
    let run_chunk = |ci: usize| {
        let range = ci * CHUNK_SIZE..((ci + 1) * CHUNK_SIZE).min(n);
        if options.vectorized {
            batch::pack_chunk_lanes::<{ batch::DEFAULT_LANES }>(&ctx, range);
        } else {
            pack_chunk_scalar(&ctx, range);
        }
    };

    if options.workers <= 1 {
        (0..num_chunks).for_each(run_chunk);
    } else {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(options.workers)
            .build()
            .map_err(|e| PackError::ThreadPool(e.to_string()))?;
        pool.install(|| (0..num_chunks).into_par_iter().for_each(run_chunk));
    }

    let points = if options.filter.is_some() {
        cursor.load(Ordering::Relaxed)
    } else {
        n
    };
    let report = PackReport {
        points,
        overflows: overflows.load(Ordering::Relaxed),
    };
    if report.overflows > 0 {
        log::warn!(
            "{} of {} points wrapped outside the i16 range",
            report.overflows,
            n
        );
    }
    log::debug!(
        "packed {} of {} points ({} bytes)",
        report.points,
        n,
        report.payload_bytes()
    );
    Ok(report)
}
