use rand::Rng;

use holostitch_cloud::{ColorImage, ImageGeometry, RigidTransform};
use holostitch_pack::{pack_points, FilterPolicy, PackOptions, PackedPoint, PACKED_STRIDE};

fn synthetic_frame(n: usize) -> (Vec<[f32; 3]>, Vec<[f32; 2]>, Vec<u8>, ImageGeometry) {
    let mut rng = rand::rng();
    let vertices = (0..n)
        .map(|_| {
            [
                rng.random_range(-4.0f32..4.0),
                rng.random_range(-2.0f32..2.0),
                rng.random_range(-0.5f32..3.0),
            ]
        })
        .collect();
    let texcoords = (0..n)
        .map(|_| [rng.random_range(-0.1f32..1.1), rng.random_range(-0.1f32..1.1)])
        .collect();

    let geometry = ImageGeometry {
        width: 64,
        height: 48,
        bytes_per_pixel: 3,
        stride_bytes: 64 * 3,
    };
    let data = (0..geometry.required_bytes()).map(|i| i as u8).collect();
    (vertices, texcoords, data, geometry)
}

fn tilted_transform() -> RigidTransform {
    RigidTransform::from([
        [-0.9998, 0.0093, 0.0188, 0.0],
        [-0.0164, 0.2160, -0.9762, 3.416],
        [-0.0131, -0.9763, -0.2158, 1.802],
        [0.0, 0.0, 0.0, 1.0],
    ])
}

fn packed_multiset(out: &[i16], count: usize) -> Vec<PackedPoint> {
    let mut points: Vec<PackedPoint> = out[..count * PACKED_STRIDE]
        .chunks_exact(PACKED_STRIDE)
        .map(|c| PackedPoint::from_slots(&[c[0], c[1], c[2], c[3], c[4]]))
        .collect();
    points.sort_by_key(|p| (p.x_mm, p.y_mm, p.z_mm, p.color_lo, p.color_hi));
    points
}

/// The accepted multiset must be independent of path and worker count; only
/// the slot permutation may differ.
#[test]
fn scalar_and_batched_paths_agree() {
    let (vertices, texcoords, data, geometry) = synthetic_frame(10_000);
    let image = ColorImage::new(geometry, &data).unwrap();
    let transform = tilted_transform();

    let mut reference_count = None;
    let mut reference_set = None;

    for vectorized in [false, true] {
        for workers in [1usize, 4] {
            let options = PackOptions {
                filter: Some(FilterPolicy::default()),
                vectorized,
                workers,
            };
            let mut out = vec![0i16; vertices.len() * PACKED_STRIDE];
            let report =
                pack_points(&vertices, &texcoords, &image, &transform, &options, &mut out)
                    .unwrap();

            let set = packed_multiset(&out, report.points);
            match (&reference_count, &reference_set) {
                (None, None) => {
                    reference_count = Some(report.points);
                    reference_set = Some(set);
                }
                (Some(count), Some(reference)) => {
                    assert_eq!(report.points, *count);
                    assert_eq!(&set, reference);
                }
                _ => unreachable!(),
            }
        }
    }
}

/// Filtered output count must match an independent scan of the predicate.
#[test]
fn compaction_count_matches_reference_scan() {
    let (vertices, texcoords, data, geometry) = synthetic_frame(5_000);
    let image = ColorImage::new(geometry, &data).unwrap();
    let policy = FilterPolicy::default();

    let expected = vertices
        .iter()
        .filter(|v| policy.accepts(v[0], v[2]))
        .count();

    let options = PackOptions {
        filter: Some(policy),
        vectorized: true,
        workers: 4,
    };
    let mut out = vec![0i16; vertices.len() * PACKED_STRIDE];
    let report = pack_points(
        &vertices,
        &texcoords,
        &image,
        &RigidTransform::IDENTITY,
        &options,
        &mut out,
    )
    .unwrap();

    assert_eq!(report.points, expected);
}

/// Unfiltered packing is a dense 1:1 layout regardless of worker count.
#[test]
fn dense_layout_is_stable_across_workers() {
    let (vertices, texcoords, data, geometry) = synthetic_frame(3_000);
    let image = ColorImage::new(geometry, &data).unwrap();
    let transform = tilted_transform();

    let mut serial = vec![0i16; vertices.len() * PACKED_STRIDE];
    pack_points(
        &vertices,
        &texcoords,
        &image,
        &transform,
        &PackOptions::default(),
        &mut serial,
    )
    .unwrap();

    let mut parallel = vec![0i16; vertices.len() * PACKED_STRIDE];
    let options = PackOptions {
        workers: 8,
        ..Default::default()
    };
    pack_points(
        &vertices, &texcoords, &image, &transform, &options, &mut parallel,
    )
    .unwrap();

    assert_eq!(serial, parallel);
}

/// Pack then decode: coordinates within one millimeter (quantization
/// truncates toward zero), colors exact.
#[test]
fn round_trip_within_quantization_epsilon() {
    let (vertices, texcoords, data, geometry) = synthetic_frame(2_000);
    let image = ColorImage::new(geometry, &data).unwrap();

    let mut out = vec![0i16; vertices.len() * PACKED_STRIDE];
    let report = pack_points(
        &vertices,
        &texcoords,
        &image,
        &RigidTransform::IDENTITY,
        &PackOptions::default(),
        &mut out,
    )
    .unwrap();
    assert_eq!(report.points, vertices.len());

    let (points, colors) = holostitch_pack::decode_points(&out, 1);
    for (i, (original, recovered)) in vertices.iter().zip(points.iter()).enumerate() {
        for k in 0..3 {
            assert!(
                (original[k] - recovered[k]).abs() < 0.00101,
                "point {i} axis {k}: {} vs {}",
                original[k],
                recovered[k]
            );
        }
        let (px, py) = {
            let uv = texcoords[i];
            let px = (uv[0] * 64.0 + 0.5).floor().clamp(0.0, 63.0) as usize;
            let py = (uv[1] * 48.0 + 0.5).floor().clamp(0.0, 47.0) as usize;
            (px, py)
        };
        assert_eq!(colors[i], image.rgb(px, py));
    }
}
