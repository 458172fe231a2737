use bevy::{
    prelude::Mesh,
    render::{
        mesh::{Indices, MeshVertexAttribute},
        render_resource::{PrimitiveTopology, VertexFormat as WgpuVertexFormat},
    },
};

use crate::{bounding_sphere::BoundingSphere, error::GeometryError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentDatatype {
    Float,
    Double,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PrimitiveType {
    #[default]
    Triangles,
}

/// A flat, interleaving-free attribute buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct GeometryAttribute<T> {
    pub component_datatype: ComponentDatatype,
    pub components_per_attribute: usize,
    pub values: Vec<T>,
}
impl<T> GeometryAttribute<T> {
    pub fn count(&self) -> usize {
        self.values.len() / self.components_per_attribute
    }
}
impl GeometryAttribute<f64> {
    pub fn doubles(components_per_attribute: usize, values: Vec<f64>) -> Self {
        GeometryAttribute {
            component_datatype: ComponentDatatype::Double,
            components_per_attribute,
            values,
        }
    }
}
impl GeometryAttribute<f32> {
    pub fn floats(components_per_attribute: usize, values: Vec<f32>) -> Self {
        GeometryAttribute {
            component_datatype: ComponentDatatype::Float,
            components_per_attribute,
            values,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct GeometryAttributes {
    pub position: Option<GeometryAttribute<f64>>,
    pub st: Option<GeometryAttribute<f32>>,
    pub normal: Option<GeometryAttribute<f32>>,
    pub tangent: Option<GeometryAttribute<f32>>,
    pub binormal: Option<GeometryAttribute<f32>>,
}
impl GeometryAttributes {
    /// Number of attribute buffers present.
    pub fn len(&self) -> usize {
        self.counts().len()
    }
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
    fn counts(&self) -> Vec<(&'static str, usize)> {
        let mut counts = Vec::with_capacity(5);
        if let Some(a) = &self.position {
            counts.push(("position", a.count()));
        }
        if let Some(a) = &self.st {
            counts.push(("st", a.count()));
        }
        if let Some(a) = &self.normal {
            counts.push(("normal", a.count()));
        }
        if let Some(a) = &self.tangent {
            counts.push(("tangent", a.count()));
        }
        if let Some(a) = &self.binormal {
            counts.push(("binormal", a.count()));
        }
        counts
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    pub attributes: GeometryAttributes,
    pub indices: Vec<u32>,
    pub primitive_type: PrimitiveType,
    pub bounding_sphere: BoundingSphere,
}
impl Geometry {
    /// The shared vertex count of every attribute, or an error if the buffers
    /// disagree or an index points past the end.
    pub fn compute_number_of_vertices(&self) -> Result<usize, GeometryError> {
        let counts = self.attributes.counts();
        let mut number_of_vertices = None;
        for (name, count) in counts {
            match number_of_vertices {
                None => number_of_vertices = Some(count),
                Some(n) if n != count => {
                    return Err(GeometryError::InvalidGeometry(format!(
                        "attribute {name} has {count} vertices, expected {n}"
                    )));
                }
                Some(_) => {}
            }
        }
        let number_of_vertices = number_of_vertices.unwrap_or(0);
        if let Some(&max) = self.indices.iter().max() {
            if max as usize >= number_of_vertices {
                return Err(GeometryError::InvalidGeometry(format!(
                    "index {max} out of range for {number_of_vertices} vertices"
                )));
            }
        }
        Ok(number_of_vertices)
    }
}

/// Types that describe a geometry declaratively and can tessellate it.
pub trait CreateGeometry {
    fn create_geometry(&self) -> Result<Geometry, GeometryError>;
}

pub const ATTRIBUTE_BINORMAL: MeshVertexAttribute =
    MeshVertexAttribute::new("Vertex_Binormal", 988540917, WgpuVertexFormat::Float32x3);

fn to_float32x3<T: Copy + Into<f64>>(values: &[T]) -> Vec<[f32; 3]> {
    values
        .chunks_exact(3)
        .map(|c| {
            [
                Into::<f64>::into(c[0]) as f32,
                Into::<f64>::into(c[1]) as f32,
                Into::<f64>::into(c[2]) as f32,
            ]
        })
        .collect()
}

impl From<Geometry> for Mesh {
    fn from(geometry: Geometry) -> Self {
        let attributes = geometry.attributes;
        let mut mesh = Mesh::new(PrimitiveTopology::TriangleList);
        if let Some(position) = attributes.position {
            mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, to_float32x3(&position.values));
        }
        if let Some(normal) = attributes.normal {
            mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, to_float32x3(&normal.values));
        }
        if let Some(st) = attributes.st {
            let uvs: Vec<[f32; 2]> = st.values.chunks_exact(2).map(|c| [c[0], c[1]]).collect();
            mesh.insert_attribute(Mesh::ATTRIBUTE_UV_0, uvs);
        }
        if let Some(tangent) = attributes.tangent {
            // bevy tangents carry handedness in w
            let tangents: Vec<[f32; 4]> = tangent
                .values
                .chunks_exact(3)
                .map(|c| [c[0], c[1], c[2], 1.0])
                .collect();
            mesh.insert_attribute(Mesh::ATTRIBUTE_TANGENT, tangents);
        }
        if let Some(binormal) = attributes.binormal {
            mesh.insert_attribute(ATTRIBUTE_BINORMAL, to_float32x3(&binormal.values));
        }
        mesh.set_indices(Some(Indices::U32(geometry.indices)));
        mesh
    }
}
