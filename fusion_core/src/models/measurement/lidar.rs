// fusion_core/src/models/measurement/lidar.rs

use crate::types::{LidarMatrix, LidarNoise};
use nalgebra::Vector2;

/// The lidar observes position directly: `z = H·x` with
/// H = [[1 0 0 0]; [0 1 0 0]].
pub fn measurement_matrix() -> LidarMatrix {
    LidarMatrix::new(
        1.0, 0.0, 0.0, 0.0, //
        0.0, 1.0, 0.0, 0.0,
    )
}

/// Builds the diagonal lidar noise covariance R from per-axis variances.
pub fn noise_covariance(variances: [f64; 2]) -> LidarNoise {
    LidarNoise::from_diagonal(&Vector2::from(variances))
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector4;

    #[test]
    fn projects_position_only() {
        let x = Vector4::new(3.0, -1.0, 10.0, 20.0);
        let z = measurement_matrix() * x;
        assert_eq!(z.as_slice(), &[3.0, -1.0]);
    }

    #[test]
    fn noise_is_diagonal() {
        let r = noise_covariance([0.0225, 0.0225]);
        assert_eq!(r[(0, 0)], 0.0225);
        assert_eq!(r[(1, 1)], 0.0225);
        assert_eq!(r[(0, 1)], 0.0);
    }
}
