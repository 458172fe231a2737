use serde::{Deserialize, Serialize};

use crate::error::GeometryError;
use crate::packable::{packed_slice, packed_slice_mut, Packable};

/// Which per-vertex attributes a geometry should compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct VertexFormat {
    pub position: bool,
    pub st: bool,
    pub normal: bool,
    pub tangent: bool,
    pub binormal: bool,
}
impl VertexFormat {
    pub const POSITION_ONLY: VertexFormat = VertexFormat {
        position: true,
        st: false,
        normal: false,
        tangent: false,
        binormal: false,
    };
    pub const POSITION_AND_NORMAL: VertexFormat = VertexFormat {
        position: true,
        st: false,
        normal: true,
        tangent: false,
        binormal: false,
    };
    pub const POSITION_AND_ST: VertexFormat = VertexFormat {
        position: true,
        st: true,
        normal: false,
        tangent: false,
        binormal: false,
    };
    pub const POSITION_NORMAL_AND_ST: VertexFormat = VertexFormat {
        position: true,
        st: true,
        normal: true,
        tangent: false,
        binormal: false,
    };
    pub const ALL: VertexFormat = VertexFormat {
        position: true,
        st: true,
        normal: true,
        tangent: true,
        binormal: true,
    };
    pub const DEFAULT: VertexFormat = VertexFormat::POSITION_NORMAL_AND_ST;

    /// Whether any attribute of the local surface frame is requested.
    pub fn needs_frame(&self) -> bool {
        self.normal || self.tangent || self.binormal
    }
}
impl Default for VertexFormat {
    fn default() -> Self {
        VertexFormat::DEFAULT
    }
}
fn flag(value: f64) -> bool {
    value == 1.0
}
fn as_flag(value: bool) -> f64 {
    if value {
        1.0
    } else {
        0.0
    }
}
impl Packable for VertexFormat {
    const PACKED_LENGTH: usize = 5;

    fn pack_into(&self, array: &mut [f64], starting_index: usize) -> Result<(), GeometryError> {
        packed_slice_mut(array, starting_index, Self::PACKED_LENGTH)?.copy_from_slice(&[
            as_flag(self.position),
            as_flag(self.st),
            as_flag(self.normal),
            as_flag(self.tangent),
            as_flag(self.binormal),
        ]);
        Ok(())
    }
    fn unpack(array: &[f64], starting_index: usize) -> Result<Self, GeometryError> {
        let values = packed_slice(array, starting_index, Self::PACKED_LENGTH)?;
        Ok(VertexFormat {
            position: flag(values[0]),
            st: flag(values[1]),
            normal: flag(values[2]),
            tangent: flag(values[3]),
            binormal: flag(values[4]),
        })
    }
}
