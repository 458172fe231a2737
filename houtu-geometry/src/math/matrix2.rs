use bevy::math::{DMat2, DVec2};

pub trait Matrix2 {
    /// Counter-clockwise rotation by `angle` radians.
    fn from_rotation(angle: f64) -> DMat2;
    fn multiply_by_vector(&self, cartesian: DVec2) -> DVec2;
}

impl Matrix2 for DMat2 {
    fn from_rotation(angle: f64) -> DMat2 {
        let cos_angle = angle.cos();
        let sin_angle = angle.sin();
        DMat2::from_cols(
            DVec2::new(cos_angle, sin_angle),
            DVec2::new(-sin_angle, cos_angle),
        )
    }
    fn multiply_by_vector(&self, cartesian: DVec2) -> DVec2 {
        *self * cartesian
    }
}
