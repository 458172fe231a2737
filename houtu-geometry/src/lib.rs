pub mod bounding_sphere;
pub mod ellipsoid;
pub mod error;
pub mod geographic_projection;
pub mod geometry;
pub mod math;
pub mod near_far_scalar;
pub mod packable;
pub mod projection;
pub mod rectangle;
pub mod rectangle_geometry;
pub mod vertex_format;

pub use bounding_sphere::BoundingSphere;
pub use ellipsoid::Ellipsoid;
pub use error::GeometryError;
pub use geographic_projection::GeographicProjection;
pub use geometry::{CreateGeometry, Geometry, GeometryAttribute, GeometryAttributes};
pub use near_far_scalar::NearFarScalar;
pub use packable::Packable;
pub use projection::Projection;
pub use rectangle::Rectangle;
pub use rectangle_geometry::{RectangleGeometry, RectangleGeometryOptions};
pub use vertex_format::VertexFormat;
