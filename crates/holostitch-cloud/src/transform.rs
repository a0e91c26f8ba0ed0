use crate::linalg;

/// A rigid transform mapping one camera's local frame into the world frame.
///
/// Stored as a rotation matrix and translation vector, typically loaded from
/// the upper 3x4 block of a row-major 4x4 calibration matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RigidTransform {
    /// The 3x3 rotation matrix.
    pub rotation: [[f32; 3]; 3],
    /// The translation vector.
    pub translation: [f32; 3],
}

impl RigidTransform {
    /// The identity transform.
    pub const IDENTITY: Self = Self {
        rotation: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
        translation: [0.0, 0.0, 0.0],
    };

    /// Apply the transform to a single point.
    #[inline]
    pub fn apply(&self, p: &[f32; 3]) -> [f32; 3] {
        let r = &self.rotation;
        let t = &self.translation;
        [
            r[0][0] * p[0] + r[0][1] * p[1] + r[0][2] * p[2] + t[0],
            r[1][0] * p[0] + r[1][1] * p[1] + r[1][2] * p[2] + t[1],
            r[2][0] * p[0] + r[2][1] * p[1] + r[2][2] * p[2] + t[2],
        ]
    }

    /// Apply the transform to a slice of points in place.
    pub fn apply_in_place(&self, points: &mut [[f32; 3]]) {
        let src = points.to_vec();
        linalg::transform_points(&src, &self.rotation, &self.translation, points);
    }
}

impl Default for RigidTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl From<[[f32; 4]; 4]> for RigidTransform {
    /// Take the rotation and translation from a row-major 4x4 matrix.
    fn from(m: [[f32; 4]; 4]) -> Self {
        Self {
            rotation: [
                [m[0][0], m[0][1], m[0][2]],
                [m[1][0], m[1][1], m[1][2]],
                [m[2][0], m[2][1], m[2][2]],
            ],
            translation: [m[0][3], m[1][3], m[2][3]],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_identity() {
        let p = [0.1, 0.2, 1.0];
        assert_eq!(RigidTransform::IDENTITY.apply(&p), p);
    }

    #[test]
    fn test_from_matrix4() {
        let m = [
            [0.0, -1.0, 0.0, 1.0],
            [1.0, 0.0, 0.0, 2.0],
            [0.0, 0.0, 1.0, 3.0],
            [0.0, 0.0, 0.0, 1.0],
        ];
        let tf = RigidTransform::from(m);
        let p = tf.apply(&[1.0, 0.0, 0.0]);
        assert_relative_eq!(p[0], 1.0);
        assert_relative_eq!(p[1], 3.0);
        assert_relative_eq!(p[2], 3.0);
    }

    #[test]
    fn test_apply_in_place_matches_apply() {
        let tf = RigidTransform::from([
            [0.0, 0.0, 1.0, 0.5],
            [1.0, 0.0, 0.0, -0.5],
            [0.0, 1.0, 0.0, 0.25],
            [0.0, 0.0, 0.0, 1.0],
        ]);
        let mut points = vec![[1.0, 2.0, 3.0], [-0.5, 0.0, 4.0]];
        let expected: Vec<[f32; 3]> = points.iter().map(|p| tf.apply(p)).collect();
        tf.apply_in_place(&mut points);
        for (got, want) in points.iter().zip(expected.iter()) {
            for k in 0..3 {
                assert_relative_eq!(got[k], want[k], epsilon = 1e-5);
            }
        }
    }
}
