use bevy::math::DVec3;

use crate::{ellipsoid::Ellipsoid, math::Cartographic};

pub trait Projection {
    fn ellipsoid(&self) -> &Ellipsoid;
    fn project(&self, cartographic: &Cartographic) -> DVec3;
    fn un_project(&self, cartesian: &DVec3) -> Cartographic;
    fn from_ellipsoid(ellipsoid: &Ellipsoid) -> Self
    where
        Self: Sized;
}
