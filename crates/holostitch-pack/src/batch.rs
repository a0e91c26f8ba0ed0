//! Lane-batched packing path.
//!
//! Replaces the fixed 4-wide SSE intrinsics of the original pipeline with a
//! batch transform over a const-generic lane width: straight-line per-lane
//! loops the compiler can vectorize, with a scalar fallback for the tail.
//! The contract against the scalar path is set equivalence of accepted
//! points within one quantization unit, not bit-exact ordering.

use std::ops::Range;
use std::sync::atomic::Ordering;

use crate::pack::{pack_one, texel, PackContext};
use crate::packed::{quantize_overflows, PackedPoint};

/// Lane width used by the public vectorized path.
pub const DEFAULT_LANES: usize = 4;

/// Pack `range` in batches of `LANES` points, claiming compaction slots from
/// the shared cursor exactly like the scalar path.
pub(crate) fn pack_chunk_lanes<const LANES: usize>(ctx: &PackContext<'_>, range: Range<usize>) {
    let start = range.start;
    let full = (range.len() / LANES) * LANES;

    let mut base = start;
    while base < start + full {
        let mut wx = [0.0f32; LANES];
        let mut wy = [0.0f32; LANES];
        let mut wz = [0.0f32; LANES];
        let r = &ctx.transform.rotation;
        let t = &ctx.transform.translation;
        for l in 0..LANES {
            let p = &ctx.vertices[base + l];
            wx[l] = r[0][0] * p[0] + r[0][1] * p[1] + r[0][2] * p[2] + t[0];
            wy[l] = r[1][0] * p[0] + r[1][1] * p[1] + r[1][2] * p[2] + t[1];
            wz[l] = r[2][0] * p[0] + r[2][1] * p[1] + r[2][2] * p[2] + t[2];
        }

        let mut px = [0usize; LANES];
        let mut py = [0usize; LANES];
        for l in 0..LANES {
            (px[l], py[l]) = texel(
                &ctx.texcoords[base + l],
                ctx.image.width(),
                ctx.image.height(),
            );
        }

        let mut mask = [true; LANES];
        if let Some(filter) = &ctx.filter {
            for l in 0..LANES {
                let v = &ctx.vertices[base + l];
                mask[l] = filter.accepts(v[0], v[2]);
            }
        }

        for l in 0..LANES {
            if !mask[l] {
                continue;
            }
            let world = [wx[l], wy[l], wz[l]];
            if world.iter().any(|&c| quantize_overflows(c)) {
                ctx.overflows.fetch_add(1, Ordering::Relaxed);
            }
            let slot = if ctx.filter.is_some() {
                ctx.cursor.fetch_add(1, Ordering::Relaxed)
            } else {
                base + l
            };
            let rgb = ctx.image.rgb(px[l], py[l]);
            // SAFETY: slot uniqueness as in the scalar path; the buffer was
            // sized for every input point up front.
            unsafe { ctx.out.write(slot, &PackedPoint::from_world(world, rgb)) };
        }

        base += LANES;
    }

    // scalar fallback for the tail shorter than one batch
    for gi in start + full..range.end {
        pack_one(ctx, gi);
    }
}
