use bevy::math::DVec3;

use crate::error::GeometryError;

/// Types that can be flattened into a run of `f64` values and read back, so
/// geometry descriptions can be handed across thread or worker boundaries as
/// plain arrays.
pub trait Packable: Sized {
    const PACKED_LENGTH: usize;

    fn pack_into(&self, array: &mut [f64], starting_index: usize) -> Result<(), GeometryError>;
    fn unpack(array: &[f64], starting_index: usize) -> Result<Self, GeometryError>;

    fn pack(&self) -> Vec<f64> {
        let mut array = vec![0.0; Self::PACKED_LENGTH];
        // The buffer is sized from PACKED_LENGTH, so this cannot run short.
        let _ = self.pack_into(&mut array, 0);
        array
    }
}

pub(crate) fn packed_slice_mut(
    array: &mut [f64],
    starting_index: usize,
    length: usize,
) -> Result<&mut [f64], GeometryError> {
    let available = array.len();
    array
        .get_mut(starting_index..starting_index + length)
        .ok_or_else(|| {
            GeometryError::InvalidArgument(format!(
                "cannot pack {length} values at index {starting_index} into an array of {available}"
            ))
        })
}

pub(crate) fn packed_slice(
    array: &[f64],
    starting_index: usize,
    length: usize,
) -> Result<&[f64], GeometryError> {
    array
        .get(starting_index..starting_index + length)
        .ok_or_else(|| {
            GeometryError::InvalidArgument(format!(
                "cannot unpack {length} values at index {starting_index} from an array of {}",
                array.len()
            ))
        })
}

impl Packable for DVec3 {
    const PACKED_LENGTH: usize = 3;

    fn pack_into(&self, array: &mut [f64], starting_index: usize) -> Result<(), GeometryError> {
        packed_slice_mut(array, starting_index, Self::PACKED_LENGTH)?.copy_from_slice(&self.to_array());
        Ok(())
    }
    fn unpack(array: &[f64], starting_index: usize) -> Result<Self, GeometryError> {
        let values = packed_slice(array, starting_index, Self::PACKED_LENGTH)?;
        Ok(DVec3::new(values[0], values[1], values[2]))
    }
}
