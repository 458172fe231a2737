use crate::{math::EPSILON1, vertex_format::VertexFormat};

use super::{
    attributes::{AttributeBuffers, SurfacePoint, TangentFrame},
    sampler::SampleGrid,
};

/// Extruded heights closer than this to the surface height produce a flat
/// sheet.
pub const EXTRUDE_EPSILON: f64 = EPSILON1;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Extrusion {
    Flat {
        height: f64,
    },
    Volumetric {
        min_height: f64,
        max_height: f64,
        close_top: bool,
        close_bottom: bool,
    },
}
impl Extrusion {
    pub fn new(height: f64, extruded_height: Option<f64>, close_top: bool, close_bottom: bool) -> Self {
        match extruded_height {
            Some(extruded) if (extruded - height).abs() > EXTRUDE_EPSILON => Extrusion::Volumetric {
                min_height: height.min(extruded),
                max_height: height.max(extruded),
                close_top,
                close_bottom,
            },
            _ => Extrusion::Flat { height },
        }
    }
    pub fn is_extruded(&self) -> bool {
        matches!(self, Extrusion::Volumetric { .. })
    }
    /// Every height at which vertices are placed.
    pub fn heights(&self) -> Vec<f64> {
        match *self {
            Extrusion::Flat { height } => vec![height],
            Extrusion::Volumetric {
                min_height,
                max_height,
                ..
            } => vec![min_height, max_height],
        }
    }
    pub fn vertex_count(&self, width: usize, height: usize) -> usize {
        let cap = width * height;
        match *self {
            Extrusion::Flat { .. } => cap,
            Extrusion::Volumetric {
                close_top,
                close_bottom,
                ..
            } => {
                let walls = 2 * (2 * width + 2 * height);
                walls + cap * (usize::from(close_top) + usize::from(close_bottom))
            }
        }
    }
}

/// Grid indices of the four wall sides: west running south, south running
/// east, east running north, north running west. Each side keeps both of its
/// corners so its vertices can carry their own normals.
pub fn wall_sides(width: usize, height: usize) -> [Vec<usize>; 4] {
    let last_row = (height - 1) * width;
    [
        (0..height).map(|row| row * width).collect(),
        (0..width).map(|col| last_row + col).collect(),
        (0..height).rev().map(|row| row * width + width - 1).collect(),
        (0..width).rev().collect(),
    ]
}

fn wall_frame(points: &[SurfacePoint], side: &[usize], k: usize) -> TangentFrame {
    let point = &points[side[k]];
    let along = if k + 1 < side.len() {
        points[side[k + 1]].surface - point.surface
    } else if k > 0 {
        point.surface - points[side[k - 1]].surface
    } else {
        return TangentFrame::top(point);
    };
    // sides collapse to a point at the poles
    match along.try_normalize() {
        Some(tangent) => match tangent.cross(point.normal).try_normalize() {
            Some(normal) => TangentFrame::new(normal, tangent),
            None => TangentFrame::top(point),
        },
        None => TangentFrame::top(point),
    }
}

/// Places every vertex of the mesh: the sheet alone when flat, otherwise the
/// top cap, the bottom cap and the wall ring, skipping caps left open.
pub fn build_vertices(
    grid: &SampleGrid,
    points: &[SurfacePoint],
    extrusion: &Extrusion,
    vertex_format: VertexFormat,
) -> AttributeBuffers {
    let mut buffers = AttributeBuffers::with_capacity(
        vertex_format,
        extrusion.vertex_count(grid.width, grid.height),
    );
    match *extrusion {
        Extrusion::Flat { height } => {
            for point in points {
                buffers.push(point.position(height), &TangentFrame::top(point), point.st);
            }
        }
        Extrusion::Volumetric {
            min_height,
            max_height,
            close_top,
            close_bottom,
        } => {
            if close_top {
                for point in points {
                    buffers.push(point.position(max_height), &TangentFrame::top(point), point.st);
                }
            }
            if close_bottom {
                for point in points {
                    buffers.push(point.position(min_height), &TangentFrame::bottom(point), point.st);
                }
            }
            for side in wall_sides(grid.width, grid.height) {
                for k in 0..side.len() {
                    let point = &points[side[k]];
                    let frame = wall_frame(points, &side, k);
                    buffers.push(point.position(max_height), &frame, point.st);
                    buffers.push(point.position(min_height), &frame, point.st);
                }
            }
        }
    }
    buffers
}
