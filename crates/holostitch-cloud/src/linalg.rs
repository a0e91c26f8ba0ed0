/// Transform a set of points using a rotation and translation.
///
/// # Arguments
///
/// * `src_points` - A set of points to be transformed.
/// * `dst_r_src` - A rotation matrix.
/// * `dst_t_src` - A translation vector.
/// * `dst_points` - A pre-allocated slice to store the transformed points.
///
/// PRECONDITION: dst_points has the same length as src_points.
pub fn transform_points(
    src_points: &[[f32; 3]],
    dst_r_src: &[[f32; 3]; 3],
    dst_t_src: &[f32; 3],
    dst_points: &mut [[f32; 3]],
) {
    assert_eq!(src_points.len(), dst_points.len());
    if src_points.is_empty() {
        return;
    }

    // create a view of the rotation matrix
    let dst_r_src_mat = {
        let rot_slice = unsafe {
            std::slice::from_raw_parts(dst_r_src.as_ptr() as *const f32, dst_r_src.len() * 3)
        };
        faer::mat::from_row_major_slice(rot_slice, 3, 3)
    };

    // create view of the source points
    let points_in_src = {
        let src_points_slice = unsafe {
            std::slice::from_raw_parts(src_points.as_ptr() as *const f32, src_points.len() * 3)
        };
        // SAFETY: src_points_slice is an Nx3 matrix where each row represents a 3D point
        faer::mat::from_row_major_slice(src_points_slice, src_points.len(), 3)
    };

    // create a mutable view of the destination points
    let mut points_in_dst = {
        let dst_points_slice = unsafe {
            std::slice::from_raw_parts_mut(
                dst_points.as_mut_ptr() as *mut f32,
                dst_points.len() * 3,
            )
        };
        // SAFETY: dst_points_slice is a 3xN matrix where each column represents a 3D point
        faer::mat::from_column_major_slice_mut(dst_points_slice, 3, dst_points.len())
    };

    // perform the matrix multiplication
    faer::linalg::matmul::matmul(
        &mut points_in_dst,
        dst_r_src_mat,
        points_in_src.transpose(),
        None,
        1.0,
        faer::Parallelism::None,
    );

    let (tx, ty, tz) = (dst_t_src[0], dst_t_src[1], dst_t_src[2]);

    // SAFETY: points_in_dst is a 3xN matrix where each column represents a 3D point
    // The unchecked reads/writes are within bounds as we're only accessing indices 0,1,2
    for mut col in points_in_dst.col_iter_mut() {
        unsafe {
            col.write_unchecked(0, col.read_unchecked(0) + tx);
            col.write_unchecked(1, col.read_unchecked(1) + ty);
            col.write_unchecked(2, col.read_unchecked(2) + tz);
        }
    }
}
