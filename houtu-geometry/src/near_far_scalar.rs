use serde::{Deserialize, Serialize};

use crate::error::GeometryError;
use crate::packable::{packed_slice, packed_slice_mut, Packable};

/// A scalar that varies with camera distance, interpolated between `near_value`
/// at `near` and `far_value` at `far` and clamped outside that range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawNearFarScalar", rename_all = "camelCase")]
pub struct NearFarScalar {
    near: f64,
    near_value: f64,
    far: f64,
    far_value: f64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawNearFarScalar {
    near: f64,
    near_value: f64,
    far: f64,
    far_value: f64,
}

impl NearFarScalar {
    pub fn new(near: f64, near_value: f64, far: f64, far_value: f64) -> Result<Self, GeometryError> {
        if !(far > near) {
            return Err(GeometryError::InvalidArgument(format!(
                "far distance ({far}) must be greater than near distance ({near})"
            )));
        }
        Ok(NearFarScalar {
            near,
            near_value,
            far,
            far_value,
        })
    }
    pub fn near(&self) -> f64 {
        self.near
    }
    pub fn near_value(&self) -> f64 {
        self.near_value
    }
    pub fn far(&self) -> f64 {
        self.far
    }
    pub fn far_value(&self) -> f64 {
        self.far_value
    }
    pub fn evaluate(&self, distance: f64) -> f64 {
        let t = ((distance - self.near) / (self.far - self.near)).clamp(0.0, 1.0);
        self.near_value + (self.far_value - self.near_value) * t
    }
}
impl TryFrom<RawNearFarScalar> for NearFarScalar {
    type Error = GeometryError;

    fn try_from(raw: RawNearFarScalar) -> Result<Self, Self::Error> {
        NearFarScalar::new(raw.near, raw.near_value, raw.far, raw.far_value)
    }
}
impl Packable for NearFarScalar {
    const PACKED_LENGTH: usize = 4;

    fn pack_into(&self, array: &mut [f64], starting_index: usize) -> Result<(), GeometryError> {
        packed_slice_mut(array, starting_index, Self::PACKED_LENGTH)?
            .copy_from_slice(&[self.near, self.near_value, self.far, self.far_value]);
        Ok(())
    }
    fn unpack(array: &[f64], starting_index: usize) -> Result<Self, GeometryError> {
        let values = packed_slice(array, starting_index, Self::PACKED_LENGTH)?;
        NearFarScalar::new(values[0], values[1], values[2], values[3])
    }
}
