use bevy::math::DVec3;
use serde::{Deserialize, Serialize};

use crate::error::GeometryError;
use crate::math::{Cartesian3, Cartographic, EPSILON14};
use crate::packable::Packable;

/// A quadratic surface `(x/a)^2 + (y/b)^2 + (z/c)^2 = 1` used to convert between
/// cartographic and Cartesian coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 3]", into = "[f64; 3]")]
pub struct Ellipsoid {
    pub radii: DVec3,
    pub radii_squared: DVec3,
    pub one_over_radii: DVec3,
    pub one_over_radii_squared: DVec3,
    pub minimum_radius: f64,
    pub maximum_radius: f64,
}
impl Default for Ellipsoid {
    fn default() -> Self {
        Ellipsoid::WGS84
    }
}
impl Ellipsoid {
    pub const WGS84: Ellipsoid = Ellipsoid {
        radii: DVec3::new(6378137.0, 6378137.0, 6356752.3142451793),
        radii_squared: DVec3::new(
            6378137.0 * 6378137.0,
            6378137.0 * 6378137.0,
            6356752.3142451793 * 6356752.3142451793,
        ),
        one_over_radii: DVec3::new(
            1.0 / 6378137.0,
            1.0 / 6378137.0,
            1.0 / 6356752.3142451793,
        ),
        one_over_radii_squared: DVec3::new(
            1.0 / (6378137.0 * 6378137.0),
            1.0 / (6378137.0 * 6378137.0),
            1.0 / (6356752.3142451793 * 6356752.3142451793),
        ),
        minimum_radius: 6356752.3142451793,
        maximum_radius: 6378137.0,
    };
    pub const UNIT_SPHERE: Ellipsoid = Ellipsoid {
        radii: DVec3::ONE,
        radii_squared: DVec3::ONE,
        one_over_radii: DVec3::ONE,
        one_over_radii_squared: DVec3::ONE,
        minimum_radius: 1.0,
        maximum_radius: 1.0,
    };

    pub fn new(x: f64, y: f64, z: f64) -> Self {
        let radii = DVec3::new(x, y, z);
        let radii_squared = DVec3::new(x * x, y * y, z * z);
        Ellipsoid {
            radii,
            radii_squared,
            one_over_radii: DVec3::new(1.0 / x, 1.0 / y, 1.0 / z),
            one_over_radii_squared: DVec3::new(
                1.0 / radii_squared.x,
                1.0 / radii_squared.y,
                1.0 / radii_squared.z,
            ),
            minimum_radius: x.min(y).min(z),
            maximum_radius: x.max(y).max(z),
        }
    }
    pub fn from_vec3(radii: DVec3) -> Self {
        Ellipsoid::new(radii.x, radii.y, radii.z)
    }
    pub fn semimajor_axis(&self) -> f64 {
        self.radii.x
    }
    /// Unit normal of the surface at a cartographic position. Exact for every
    /// latitude, including the poles.
    pub fn geodetic_surface_normal_cartographic(&self, cartographic: &Cartographic) -> DVec3 {
        let cos_latitude = cartographic.latitude.cos();
        DVec3::new(
            cos_latitude * cartographic.longitude.cos(),
            cos_latitude * cartographic.longitude.sin(),
            cartographic.latitude.sin(),
        )
    }
    /// Gradient of the implicit surface at `cartesian`, normalized. `None` at the
    /// center where the gradient vanishes.
    pub fn geodetic_surface_normal(&self, cartesian: &DVec3) -> Option<DVec3> {
        if cartesian.abs_diff_eq(DVec3::ZERO, EPSILON14) {
            return None;
        }
        Some(
            cartesian
                .multiply_components(&self.one_over_radii_squared)
                .normalize(),
        )
    }
    pub fn cartographic_to_cartesian(&self, cartographic: &Cartographic) -> DVec3 {
        let n = self.geodetic_surface_normal_cartographic(cartographic);
        let k = self.radii_squared.multiply_components(&n);
        let gamma = n.dot(k).sqrt();
        k / gamma + n * cartographic.height
    }
}
impl From<[f64; 3]> for Ellipsoid {
    fn from(radii: [f64; 3]) -> Self {
        Ellipsoid::new(radii[0], radii[1], radii[2])
    }
}
impl From<Ellipsoid> for [f64; 3] {
    fn from(ellipsoid: Ellipsoid) -> Self {
        ellipsoid.radii.to_array()
    }
}
impl Packable for Ellipsoid {
    const PACKED_LENGTH: usize = DVec3::PACKED_LENGTH;

    fn pack_into(&self, array: &mut [f64], starting_index: usize) -> Result<(), GeometryError> {
        self.radii.pack_into(array, starting_index)
    }
    fn unpack(array: &[f64], starting_index: usize) -> Result<Self, GeometryError> {
        let radii = DVec3::unpack(array, starting_index)?;
        if radii.min_element() <= 0.0 {
            return Err(GeometryError::InvalidArgument(format!(
                "ellipsoid radii must be positive, got {radii}"
            )));
        }
        Ok(Ellipsoid::from_vec3(radii))
    }
}
