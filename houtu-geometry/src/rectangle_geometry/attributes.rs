use bevy::math::{DMat2, DVec2, DVec3};

use crate::{
    ellipsoid::Ellipsoid,
    geometry::{GeometryAttribute, GeometryAttributes},
    math::Matrix2,
    vertex_format::VertexFormat,
};

use super::sampler::SampleGrid;

/// One grid sample on the ellipsoid surface, with everything needed to place
/// it at any height and shade it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfacePoint {
    pub surface: DVec3,
    pub normal: DVec3,
    /// Unit vector toward increasing longitude.
    pub east: DVec3,
    pub st: DVec2,
}
impl SurfacePoint {
    pub fn position(&self, height: f64) -> DVec3 {
        self.surface + self.normal * height
    }
}

/// Orthonormal shading frame of a vertex.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TangentFrame {
    pub normal: DVec3,
    pub tangent: DVec3,
    pub binormal: DVec3,
}
impl TangentFrame {
    pub fn new(normal: DVec3, tangent: DVec3) -> Self {
        TangentFrame {
            normal,
            tangent,
            binormal: normal.cross(tangent).normalize(),
        }
    }
    /// Frame facing up out of the surface, tangent pointing east.
    pub fn top(point: &SurfacePoint) -> Self {
        TangentFrame::new(point.normal, point.east)
    }
    /// Frame facing down into the surface, tangent pointing east.
    pub fn bottom(point: &SurfacePoint) -> Self {
        TangentFrame::new(-point.normal, point.east)
    }
}

/// Texture coordinate of a grid sample relative to the unrotated rectangle,
/// `(0, 0)` at the southwest corner and `(1, 1)` at the northeast, turned
/// clockwise about the center by `st_rotation`.
pub fn compute_st(grid: &SampleGrid, row: usize, col: usize, st_rotation: f64) -> DVec2 {
    let st = DVec2::new(
        col as f64 / (grid.width - 1) as f64,
        1.0 - row as f64 / (grid.height - 1) as f64,
    );
    if st_rotation == 0.0 {
        return st;
    }
    let center = DVec2::splat(0.5);
    DMat2::from_rotation(-st_rotation).multiply_by_vector(st - center) + center
}

/// Samples every grid point in row-major order, northwest first.
pub fn compute_surface_points(
    grid: &SampleGrid,
    ellipsoid: &Ellipsoid,
    vertex_format: &VertexFormat,
    st_rotation: f64,
) -> Vec<SurfacePoint> {
    let mut points = Vec::with_capacity(grid.size());
    for row in 0..grid.height {
        for col in 0..grid.width {
            let cartographic = grid.cartographic(row, col);
            let (sin_longitude, cos_longitude) = cartographic.longitude.sin_cos();
            points.push(SurfacePoint {
                surface: ellipsoid.cartographic_to_cartesian(&cartographic),
                normal: ellipsoid.geodetic_surface_normal_cartographic(&cartographic),
                east: DVec3::new(-sin_longitude, cos_longitude, 0.0),
                st: if vertex_format.st {
                    compute_st(grid, row, col, st_rotation)
                } else {
                    DVec2::ZERO
                },
            });
        }
    }
    points
}

/// Growable attribute buffers that only hold what the vertex format asks for.
#[derive(Debug, Clone, Default)]
pub struct AttributeBuffers {
    vertex_format: VertexFormat,
    positions: Vec<f64>,
    st: Vec<f32>,
    normals: Vec<f32>,
    tangents: Vec<f32>,
    binormals: Vec<f32>,
    vertex_count: usize,
}
fn push_f32(buffer: &mut Vec<f32>, v: DVec3) {
    buffer.extend_from_slice(&[v.x as f32, v.y as f32, v.z as f32]);
}
impl AttributeBuffers {
    pub fn with_capacity(vertex_format: VertexFormat, vertex_count: usize) -> Self {
        let capacity = |requested: bool, components: usize| {
            if requested {
                vertex_count * components
            } else {
                0
            }
        };
        AttributeBuffers {
            vertex_format,
            positions: Vec::with_capacity(capacity(vertex_format.position, 3)),
            st: Vec::with_capacity(capacity(vertex_format.st, 2)),
            normals: Vec::with_capacity(capacity(vertex_format.normal, 3)),
            tangents: Vec::with_capacity(capacity(vertex_format.tangent, 3)),
            binormals: Vec::with_capacity(capacity(vertex_format.binormal, 3)),
            vertex_count: 0,
        }
    }
    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }
    pub fn push(&mut self, position: DVec3, frame: &TangentFrame, st: DVec2) {
        let format = self.vertex_format;
        if format.position {
            self.positions.extend_from_slice(&position.to_array());
        }
        if format.st {
            self.st.extend_from_slice(&[st.x as f32, st.y as f32]);
        }
        if format.normal {
            push_f32(&mut self.normals, frame.normal);
        }
        if format.tangent {
            push_f32(&mut self.tangents, frame.tangent);
        }
        if format.binormal {
            push_f32(&mut self.binormals, frame.binormal);
        }
        self.vertex_count += 1;
    }
    pub fn positions(&self) -> impl Iterator<Item = DVec3> + '_ {
        self.positions
            .chunks_exact(3)
            .map(|c| DVec3::new(c[0], c[1], c[2]))
    }
    pub fn into_attributes(self) -> GeometryAttributes {
        let format = self.vertex_format;
        GeometryAttributes {
            position: format
                .position
                .then(|| GeometryAttribute::doubles(3, self.positions)),
            st: format.st.then(|| GeometryAttribute::floats(2, self.st)),
            normal: format
                .normal
                .then(|| GeometryAttribute::floats(3, self.normals)),
            tangent: format
                .tangent
                .then(|| GeometryAttribute::floats(3, self.tangents)),
            binormal: format
                .binormal
                .then(|| GeometryAttribute::floats(3, self.binormals)),
        }
    }
}
