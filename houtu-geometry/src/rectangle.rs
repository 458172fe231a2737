use std::f64::consts::{FRAC_PI_2, PI, TAU};

use serde::{Deserialize, Serialize};

use crate::error::GeometryError;
use crate::math::*;
use crate::packable::{packed_slice, packed_slice_mut, Packable};

/// A two dimensional region bounded by longitude and latitude, in radians.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rectangle {
    pub west: f64,
    pub south: f64,
    pub east: f64,
    pub north: f64,
}
impl Rectangle {
    pub const MAX_VALUE: Rectangle = Rectangle {
        west: -PI,
        south: -FRAC_PI_2,
        east: PI,
        north: FRAC_PI_2,
    };
    pub fn new(west: f64, south: f64, east: f64, north: f64) -> Self {
        Self {
            west,
            south,
            east,
            north,
        }
    }
    pub fn from_degrees(west: f64, south: f64, east: f64, north: f64) -> Self {
        Self {
            west: west.to_radians(),
            south: south.to_radians(),
            east: east.to_radians(),
            north: north.to_radians(),
        }
    }
    pub fn compute_width(&self) -> f64 {
        let mut east = self.east;
        if east < self.west {
            east += TAU;
        }
        east - self.west
    }
    pub fn compute_height(&self) -> f64 {
        self.north - self.south
    }
    pub fn equals_epsilon(&self, right: &Rectangle, absolute_epsilon: f64) -> bool {
        self == right
            || (self.west - right.west).abs() <= absolute_epsilon
                && (self.south - right.south).abs() <= absolute_epsilon
                && (self.east - right.east).abs() <= absolute_epsilon
                && (self.north - right.north).abs() <= absolute_epsilon
    }
    /// Whether every bound lies in its valid angular range.
    pub fn validate(&self) -> bool {
        (-FRAC_PI_2..=FRAC_PI_2).contains(&self.north)
            && (-FRAC_PI_2..=FRAC_PI_2).contains(&self.south)
            && (-PI..=PI).contains(&self.west)
            && (-PI..=PI).contains(&self.east)
    }
    pub fn south_west(&self) -> Cartographic {
        Cartographic::new(self.west, self.south, 0.0)
    }
    pub fn north_west(&self) -> Cartographic {
        Cartographic::new(self.west, self.north, 0.0)
    }
    pub fn south_east(&self) -> Cartographic {
        Cartographic::new(self.east, self.south, 0.0)
    }
    pub fn north_east(&self) -> Cartographic {
        Cartographic::new(self.east, self.north, 0.0)
    }
    pub fn center(&self) -> Cartographic {
        let mut east = self.east;
        if east < self.west {
            east += TAU;
        }
        let longitude = negative_pi_to_pi((self.west + east) * 0.5);
        let latitude = (self.south + self.north) * 0.5;
        Cartographic::new(longitude, latitude, 0.0)
    }
    pub fn contains(&self, cartographic: &Cartographic) -> bool {
        let mut longitude = cartographic.longitude;
        let latitude = cartographic.latitude;
        let west = self.west;
        let mut east = self.east;
        if east < west {
            east += TAU;
            if longitude < 0.0 {
                longitude += TAU;
            }
        }
        (longitude > west || equals_epsilon(longitude, west, Some(EPSILON14), None))
            && (longitude < east || equals_epsilon(longitude, east, Some(EPSILON14), None))
            && latitude >= self.south
            && latitude <= self.north
    }
}
impl Packable for Rectangle {
    const PACKED_LENGTH: usize = 4;

    fn pack_into(&self, array: &mut [f64], starting_index: usize) -> Result<(), GeometryError> {
        packed_slice_mut(array, starting_index, Self::PACKED_LENGTH)?
            .copy_from_slice(&[self.west, self.south, self.east, self.north]);
        Ok(())
    }
    fn unpack(array: &[f64], starting_index: usize) -> Result<Self, GeometryError> {
        let values = packed_slice(array, starting_index, Self::PACKED_LENGTH)?;
        Ok(Rectangle::new(values[0], values[1], values[2], values[3]))
    }
}
