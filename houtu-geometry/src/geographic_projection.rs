use bevy::math::DVec3;

use crate::{ellipsoid::Ellipsoid, math::Cartographic, projection::Projection};

/// Equirectangular projection: longitude and latitude scaled by the semimajor
/// axis, height passed through.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeographicProjection {
    pub ellipsoid: Ellipsoid,
    pub semimajor_axis: f64,
    pub one_over_semimajor_axis: f64,
}
impl Default for GeographicProjection {
    fn default() -> Self {
        GeographicProjection::from_ellipsoid(&Ellipsoid::WGS84)
    }
}
impl Projection for GeographicProjection {
    fn ellipsoid(&self) -> &Ellipsoid {
        &self.ellipsoid
    }
    fn project(&self, cartographic: &Cartographic) -> DVec3 {
        DVec3::new(
            cartographic.longitude * self.semimajor_axis,
            cartographic.latitude * self.semimajor_axis,
            cartographic.height,
        )
    }
    fn un_project(&self, cartesian: &DVec3) -> Cartographic {
        Cartographic::new(
            cartesian.x * self.one_over_semimajor_axis,
            cartesian.y * self.one_over_semimajor_axis,
            cartesian.z,
        )
    }
    fn from_ellipsoid(ellipsoid: &Ellipsoid) -> Self {
        let semimajor_axis = ellipsoid.semimajor_axis();
        GeographicProjection {
            ellipsoid: *ellipsoid,
            semimajor_axis,
            one_over_semimajor_axis: 1.0 / semimajor_axis,
        }
    }
}
