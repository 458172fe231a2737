use bevy::log::debug;
use bevy::math::DVec3;
use serde::{Deserialize, Serialize};

use crate::{
    bounding_sphere::BoundingSphere,
    ellipsoid::Ellipsoid,
    error::GeometryError,
    geometry::{CreateGeometry, Geometry, PrimitiveType},
    packable::{packed_slice, packed_slice_mut, Packable},
    rectangle::Rectangle,
    vertex_format::VertexFormat,
};

pub mod attributes;
pub mod extrude;
pub mod indices;
pub mod sampler;

use self::{
    attributes::compute_surface_points,
    extrude::{build_vertices, Extrusion},
    indices::build_indices,
    sampler::{grid_dimensions, sample, validate_granularity, validate_rectangle},
};

/// Default spacing between samples, in radians.
pub const DEFAULT_GRANULARITY: f64 = 0.1;

/// Declarative description of a rectangle on the ellipsoid, as read from an
/// options document. Everything but `rectangle` may be omitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RectangleGeometryOptions {
    pub rectangle: Option<Rectangle>,
    pub vertex_format: VertexFormat,
    pub ellipsoid: Ellipsoid,
    pub granularity: f64,
    pub height: f64,
    pub rotation: f64,
    pub st_rotation: f64,
    pub extruded_height: Option<f64>,
    pub close_top: bool,
    pub close_bottom: bool,
}
impl Default for RectangleGeometryOptions {
    fn default() -> Self {
        RectangleGeometryOptions {
            rectangle: None,
            vertex_format: VertexFormat::DEFAULT,
            ellipsoid: Ellipsoid::WGS84,
            granularity: DEFAULT_GRANULARITY,
            height: 0.0,
            rotation: 0.0,
            st_rotation: 0.0,
            extruded_height: None,
            close_top: true,
            close_bottom: true,
        }
    }
}
impl RectangleGeometryOptions {
    pub fn new(rectangle: Rectangle) -> Self {
        RectangleGeometryOptions {
            rectangle: Some(rectangle),
            ..Default::default()
        }
    }
    pub fn from_json(json: &str) -> Result<Self, GeometryError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// A cartographic rectangle on the ellipsoid, optionally rotated and extruded
/// into a volume. Validated on construction; tessellated by
/// [`CreateGeometry::create_geometry`].
#[derive(Debug, Clone, PartialEq)]
pub struct RectangleGeometry {
    rectangle: Rectangle,
    vertex_format: VertexFormat,
    ellipsoid: Ellipsoid,
    granularity: f64,
    height: f64,
    rotation: f64,
    st_rotation: f64,
    extruded_height: Option<f64>,
    close_top: bool,
    close_bottom: bool,
}
impl RectangleGeometry {
    pub fn new(options: RectangleGeometryOptions) -> Result<Self, GeometryError> {
        let rectangle = options.rectangle.ok_or_else(|| {
            GeometryError::InvalidArgument("options.rectangle is required".into())
        })?;
        validate_rectangle(&rectangle)?;
        validate_granularity(options.granularity)?;
        grid_dimensions(&rectangle, options.granularity)?;
        if !(options.vertex_format.position
            || options.vertex_format.st
            || options.vertex_format.needs_frame())
        {
            return Err(GeometryError::InvalidArgument(
                "options.vertexFormat must request at least one attribute".into(),
            ));
        }
        if options.ellipsoid.minimum_radius <= 0.0 || options.ellipsoid.minimum_radius.is_nan() {
            return Err(GeometryError::InvalidArgument(format!(
                "ellipsoid radii must be positive, got {:?}",
                options.ellipsoid.radii
            )));
        }
        Ok(RectangleGeometry {
            rectangle,
            vertex_format: options.vertex_format,
            ellipsoid: options.ellipsoid,
            granularity: options.granularity,
            height: options.height,
            rotation: options.rotation,
            st_rotation: options.st_rotation,
            extruded_height: options.extruded_height,
            close_top: options.close_top,
            close_bottom: options.close_bottom,
        })
    }
    pub fn from_json(json: &str) -> Result<Self, GeometryError> {
        RectangleGeometry::new(RectangleGeometryOptions::from_json(json)?)
    }
    pub fn rectangle(&self) -> &Rectangle {
        &self.rectangle
    }
    pub fn vertex_format(&self) -> VertexFormat {
        self.vertex_format
    }
    pub fn ellipsoid(&self) -> &Ellipsoid {
        &self.ellipsoid
    }
    pub fn extrusion(&self) -> Extrusion {
        Extrusion::new(
            self.height,
            self.extruded_height,
            self.close_top,
            self.close_bottom,
        )
    }
}

impl CreateGeometry for RectangleGeometry {
    fn create_geometry(&self) -> Result<Geometry, GeometryError> {
        let grid = sample(
            &self.rectangle,
            self.granularity,
            self.rotation,
            &self.ellipsoid,
        )?;
        let points = compute_surface_points(
            &grid,
            &self.ellipsoid,
            &self.vertex_format,
            self.st_rotation,
        );
        let extrusion = self.extrusion();
        let buffers = build_vertices(&grid, &points, &extrusion, self.vertex_format);
        let indices = build_indices(grid.width, grid.height, &extrusion);

        let hull: Vec<DVec3> = extrusion
            .heights()
            .into_iter()
            .flat_map(|height| points.iter().map(move |point| point.position(height)))
            .collect();
        let bounding_sphere = BoundingSphere::from_points(&hull);

        debug!(
            "tessellated rectangle {:?} into a {}x{} grid, {} vertices, {} indices",
            self.rectangle,
            grid.width,
            grid.height,
            buffers.vertex_count(),
            indices.len()
        );

        Ok(Geometry {
            attributes: buffers.into_attributes(),
            indices,
            primitive_type: PrimitiveType::Triangles,
            bounding_sphere,
        })
    }
}

fn flag(value: bool) -> f64 {
    if value {
        1.0
    } else {
        0.0
    }
}

impl Packable for RectangleGeometry {
    const PACKED_LENGTH: usize =
        Rectangle::PACKED_LENGTH + Ellipsoid::PACKED_LENGTH + VertexFormat::PACKED_LENGTH + 8;

    fn pack_into(&self, array: &mut [f64], starting_index: usize) -> Result<(), GeometryError> {
        packed_slice_mut(array, starting_index, Self::PACKED_LENGTH)?;
        let mut index = starting_index;
        self.rectangle.pack_into(array, index)?;
        index += Rectangle::PACKED_LENGTH;
        self.ellipsoid.pack_into(array, index)?;
        index += Ellipsoid::PACKED_LENGTH;
        self.vertex_format.pack_into(array, index)?;
        index += VertexFormat::PACKED_LENGTH;
        packed_slice_mut(array, index, 8)?.copy_from_slice(&[
            self.granularity,
            self.height,
            self.rotation,
            self.st_rotation,
            flag(self.extruded_height.is_some()),
            self.extruded_height.unwrap_or(0.0),
            flag(self.close_top),
            flag(self.close_bottom),
        ]);
        Ok(())
    }
    fn unpack(array: &[f64], starting_index: usize) -> Result<Self, GeometryError> {
        packed_slice(array, starting_index, Self::PACKED_LENGTH)?;
        let mut index = starting_index;
        let rectangle = Rectangle::unpack(array, index)?;
        index += Rectangle::PACKED_LENGTH;
        let ellipsoid = Ellipsoid::unpack(array, index)?;
        index += Ellipsoid::PACKED_LENGTH;
        let vertex_format = VertexFormat::unpack(array, index)?;
        index += VertexFormat::PACKED_LENGTH;
        let values = packed_slice(array, index, 8)?;
        RectangleGeometry::new(RectangleGeometryOptions {
            rectangle: Some(rectangle),
            vertex_format,
            ellipsoid,
            granularity: values[0],
            height: values[1],
            rotation: values[2],
            st_rotation: values[3],
            extruded_height: (values[4] == 1.0).then_some(values[5]),
            close_top: values[6] == 1.0,
            close_bottom: values[7] == 1.0,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::{FRAC_PI_2, PI};

    use bevy::{math::DMat2, prelude::Mesh};

    use super::*;
    use crate::{
        geographic_projection::GeographicProjection,
        geometry::ATTRIBUTE_BINORMAL,
        math::{Cartesian3, Cartographic, Matrix2, EPSILON14, EPSILON6, EPSILON8, EPSILON9},
        projection::Projection,
    };

    fn options(rectangle: Rectangle, vertex_format: VertexFormat) -> RectangleGeometryOptions {
        RectangleGeometryOptions {
            vertex_format,
            granularity: 1.0,
            ..RectangleGeometryOptions::new(rectangle)
        }
    }

    fn create(options: RectangleGeometryOptions) -> Geometry {
        RectangleGeometry::new(options)
            .unwrap()
            .create_geometry()
            .unwrap()
    }

    fn position(geometry: &Geometry, vertex: usize) -> DVec3 {
        let values = &geometry.attributes.position.as_ref().unwrap().values;
        DVec3::new(values[3 * vertex], values[3 * vertex + 1], values[3 * vertex + 2])
    }

    fn last_position(geometry: &Geometry) -> DVec3 {
        position(geometry, geometry.compute_number_of_vertices().unwrap() - 1)
    }

    fn normal(geometry: &Geometry, vertex: usize) -> DVec3 {
        let values = &geometry.attributes.normal.as_ref().unwrap().values;
        DVec3::new(
            values[3 * vertex] as f64,
            values[3 * vertex + 1] as f64,
            values[3 * vertex + 2] as f64,
        )
    }

    #[test]
    fn computes_positions() {
        let rectangle = Rectangle::new(-2.0, -1.0, 0.0, 1.0);
        let m = create(options(rectangle, VertexFormat::POSITION_ONLY));
        assert_eq!(m.attributes.position.as_ref().unwrap().values.len(), 9 * 3);
        assert_eq!(m.indices.len(), 8 * 3);

        let expected_nw = Ellipsoid::WGS84.cartographic_to_cartesian(&rectangle.north_west());
        let expected_se = Ellipsoid::WGS84.cartographic_to_cartesian(&rectangle.south_east());
        assert!(position(&m, 0).equals_epsilon(expected_nw, Some(EPSILON9), None));
        assert!(last_position(&m).equals_epsilon(expected_se, Some(EPSILON9), None));
    }

    #[test]
    fn computes_all_attributes() {
        let m = create(options(Rectangle::new(-2.0, -1.0, 0.0, 1.0), VertexFormat::ALL));
        let attributes = &m.attributes;
        assert_eq!(attributes.len(), 5);
        assert_eq!(attributes.position.as_ref().unwrap().values.len(), 9 * 3);
        assert_eq!(attributes.st.as_ref().unwrap().values.len(), 9 * 2);
        assert_eq!(attributes.normal.as_ref().unwrap().values.len(), 9 * 3);
        assert_eq!(attributes.tangent.as_ref().unwrap().values.len(), 9 * 3);
        assert_eq!(attributes.binormal.as_ref().unwrap().values.len(), 9 * 3);
        assert_eq!(m.indices.len(), 8 * 3);
        assert_eq!(m.compute_number_of_vertices().unwrap(), 9);
    }

    #[test]
    fn position_only_yields_one_buffer() {
        let m = create(options(Rectangle::new(-2.0, -1.0, 0.0, 1.0), VertexFormat::POSITION_ONLY));
        assert_eq!(m.attributes.len(), 1);
        assert!(m.attributes.st.is_none());
        assert!(m.attributes.normal.is_none());
    }

    #[test]
    fn default_format_counts_follow_the_grid() {
        for (rectangle, granularity) in [
            (Rectangle::new(-2.0, -1.0, 0.0, 1.0), 1.0),
            (Rectangle::new(0.1, 0.2, 0.45, 0.3), 0.1),
            (Rectangle::from_degrees(-10.0, 40.0, 15.0, 50.0), DEFAULT_GRANULARITY),
        ] {
            let grid = sample(&rectangle, granularity, 0.0, &Ellipsoid::WGS84).unwrap();
            let m = create(RectangleGeometryOptions {
                granularity,
                ..RectangleGeometryOptions::new(rectangle)
            });
            assert_eq!(m.attributes.len(), 3);
            assert_eq!(m.compute_number_of_vertices().unwrap(), grid.width * grid.height);
            assert_eq!(m.indices.len(), 3 * 2 * (grid.width - 1) * (grid.height - 1));
        }
    }

    fn rotated_corner(corner: &Cartographic, angle: f64) -> DVec3 {
        let projection = GeographicProjection::default();
        let projected = projection.project(corner).truncate();
        let rotated = DMat2::from_rotation(angle).multiply_by_vector(projected);
        let cartographic = projection.un_project(&rotated.extend(0.0));
        Ellipsoid::WGS84.cartographic_to_cartesian(&cartographic)
    }

    #[test]
    fn computes_positions_with_rotation() {
        let rectangle = Rectangle::new(-1.0, -1.0, 1.0, 1.0);
        let m = create(RectangleGeometryOptions {
            rotation: FRAC_PI_2,
            ..options(rectangle, VertexFormat::POSITION_ONLY)
        });
        assert_eq!(m.attributes.position.as_ref().unwrap().values.len(), 9 * 3);
        assert_eq!(m.indices.len(), 8 * 3);

        let expected = rotated_corner(&rectangle.south_east(), FRAC_PI_2);
        assert!(last_position(&m).equals_epsilon(expected, Some(EPSILON6), None));
    }

    #[test]
    fn computes_vertices_with_pi_rotation() {
        let rectangle = Rectangle::new(-1.0, -1.0, 1.0, 1.0);
        let m = create(RectangleGeometryOptions {
            rotation: PI,
            ..options(rectangle, VertexFormat::DEFAULT)
        });
        assert_eq!(m.compute_number_of_vertices().unwrap(), 9);
        assert_eq!(m.indices.len(), 8 * 3);

        let nw = Ellipsoid::WGS84.cartographic_to_cartesian(&rectangle.north_west());
        let se = Ellipsoid::WGS84.cartographic_to_cartesian(&rectangle.south_east());
        assert!(position(&m, 0).equals_epsilon(se, Some(EPSILON8), None));
        assert!(last_position(&m).equals_epsilon(nw, Some(EPSILON8), None));
    }

    #[test]
    fn computes_texture_coordinates_with_rotation() {
        let m = create(RectangleGeometryOptions {
            st_rotation: FRAC_PI_2,
            ..options(Rectangle::new(-1.0, -1.0, 1.0, 1.0), VertexFormat::POSITION_AND_ST)
        });
        let st = &m.attributes.st.as_ref().unwrap().values;
        assert_eq!(m.attributes.position.as_ref().unwrap().values.len(), 9 * 3);
        assert_eq!(st.len(), 9 * 2);
        assert_eq!(m.indices.len(), 8 * 3);
        assert!((st[st.len() - 2] as f64).abs() <= EPSILON14);
        assert!((st[st.len() - 1] as f64).abs() <= EPSILON14);
    }

    #[test]
    fn st_rotation_leaves_positions_alone() {
        let rectangle = Rectangle::new(-1.0, -1.0, 1.0, 1.0);
        let plain = create(options(rectangle, VertexFormat::POSITION_AND_ST));
        let turned = create(RectangleGeometryOptions {
            st_rotation: 0.7,
            ..options(rectangle, VertexFormat::POSITION_AND_ST)
        });
        assert_eq!(plain.attributes.position, turned.attributes.position);
        assert_ne!(plain.attributes.st, turned.attributes.st);
    }

    #[test]
    fn throws_without_rectangle() {
        assert!(matches!(
            RectangleGeometry::new(RectangleGeometryOptions::default()),
            Err(GeometryError::InvalidArgument(_))
        ));
    }

    #[test]
    fn throws_if_rotated_rectangle_is_invalid() {
        let geometry = RectangleGeometry::new(RectangleGeometryOptions {
            rotation: FRAC_PI_2,
            ..RectangleGeometryOptions::new(Rectangle::new(-FRAC_PI_2, 1.0, FRAC_PI_2, FRAC_PI_2))
        })
        .unwrap();
        assert!(matches!(
            geometry.create_geometry(),
            Err(GeometryError::InvalidGeometry(_))
        ));
    }

    #[test]
    fn throws_if_east_is_less_than_west() {
        assert!(matches!(
            RectangleGeometry::new(RectangleGeometryOptions::new(Rectangle::new(
                FRAC_PI_2, -FRAC_PI_2, -FRAC_PI_2, FRAC_PI_2
            ))),
            Err(GeometryError::InvalidArgument(_))
        ));
    }

    #[test]
    fn throws_if_north_is_less_than_south() {
        assert!(matches!(
            RectangleGeometry::new(RectangleGeometryOptions::new(Rectangle::new(
                -FRAC_PI_2, FRAC_PI_2, FRAC_PI_2, -FRAC_PI_2
            ))),
            Err(GeometryError::InvalidArgument(_))
        ));
    }

    #[test]
    fn throws_if_granularity_is_too_fine_to_index() {
        let result = RectangleGeometry::new(RectangleGeometryOptions {
            granularity: 1e-300,
            ..RectangleGeometryOptions::new(Rectangle::new(-0.3, -0.2, 0.4, 0.5))
        });
        assert!(matches!(result, Err(GeometryError::InvalidArgument(_))));
    }

    #[test]
    fn triangles_face_along_their_vertex_normals() {
        let rectangle = Rectangle::new(-0.3, -0.2, 0.4, 0.5);
        for rotation in [0.0, 0.3, FRAC_PI_2, PI, -1.0] {
            for extruded_height in [None, Some(50000.0), Some(-50000.0)] {
                let m = create(RectangleGeometryOptions {
                    vertex_format: VertexFormat::POSITION_AND_NORMAL,
                    granularity: 0.1,
                    rotation,
                    extruded_height,
                    ..RectangleGeometryOptions::new(rectangle)
                });
                assert!(!m.indices.is_empty());
                for triangle in m.indices.chunks_exact(3) {
                    let [i0, i1, i2] = [triangle[0] as usize, triangle[1] as usize, triangle[2] as usize];
                    let p0 = position(&m, i0);
                    let face = (position(&m, i1) - p0).cross(position(&m, i2) - p0);
                    let shading = normal(&m, i0) + normal(&m, i1) + normal(&m, i2);
                    assert!(
                        face.dot(shading) > 0.0,
                        "rotation {rotation}, extruded {extruded_height:?}, triangle {triangle:?}"
                    );
                }
            }
        }
    }

    #[test]
    fn throws_on_empty_vertex_format() {
        let format = VertexFormat {
            position: false,
            st: false,
            normal: false,
            tangent: false,
            binormal: false,
        };
        assert!(RectangleGeometry::new(options(Rectangle::new(0.0, 0.0, 0.5, 0.5), format)).is_err());
    }

    fn extruded(close_top: bool, close_bottom: bool, format: VertexFormat) -> Geometry {
        create(RectangleGeometryOptions {
            extruded_height: Some(2.0),
            close_top,
            close_bottom,
            ..options(Rectangle::new(-2.0, -1.0, 0.0, 1.0), format)
        })
    }

    #[test]
    fn computes_positions_extruded() {
        let m = extruded(true, true, VertexFormat::POSITION_ONLY);
        assert_eq!(m.attributes.position.as_ref().unwrap().values.len(), (9 + 8 + 4) * 3 * 2);
        assert_eq!(m.indices.len(), (8 * 2 + 4 * 4) * 3);
        assert_eq!(m.compute_number_of_vertices().unwrap(), (9 + 8 + 4) * 2);
    }

    #[test]
    fn computes_all_attributes_extruded() {
        let m = extruded(true, true, VertexFormat::ALL);
        let attributes = &m.attributes;
        assert_eq!(attributes.position.as_ref().unwrap().values.len(), (9 + 8 + 4) * 3 * 2);
        assert_eq!(attributes.st.as_ref().unwrap().values.len(), (9 + 8 + 4) * 2 * 2);
        assert_eq!(attributes.normal.as_ref().unwrap().values.len(), (9 + 8 + 4) * 3 * 2);
        assert_eq!(attributes.tangent.as_ref().unwrap().values.len(), (9 + 8 + 4) * 3 * 2);
        assert_eq!(attributes.binormal.as_ref().unwrap().values.len(), (9 + 8 + 4) * 3 * 2);
        assert_eq!(m.indices.len(), (8 * 2 + 4 * 4) * 3);
    }

    #[test]
    fn computes_positions_with_rotation_extruded() {
        let rectangle = Rectangle::new(-1.0, -1.0, 1.0, 1.0);
        let m = create(RectangleGeometryOptions {
            rotation: FRAC_PI_2,
            extruded_height: Some(2.0),
            ..options(rectangle, VertexFormat::POSITION_ONLY)
        });
        assert_eq!(m.attributes.position.as_ref().unwrap().values.len(), (9 + 8 + 4) * 3 * 2);
        assert_eq!(m.indices.len(), (8 * 2 + 4 * 4) * 3);

        // southeast sample of the bottom cap, which sits on the surface
        let expected = rotated_corner(&rectangle.south_east(), FRAC_PI_2);
        assert!(position(&m, 9 + 8).equals_epsilon(expected, Some(EPSILON6), None));
    }

    #[test]
    fn computes_extruded_top_open() {
        let m = extruded(false, true, VertexFormat::POSITION_ONLY);
        assert_eq!(m.attributes.position.as_ref().unwrap().values.len(), ((8 + 4) * 2 + 9) * 3);
        assert_eq!(m.indices.len(), (8 + 4 * 4) * 3);
    }

    #[test]
    fn computes_extruded_bottom_open() {
        let m = extruded(true, false, VertexFormat::POSITION_ONLY);
        assert_eq!(m.attributes.position.as_ref().unwrap().values.len(), ((8 + 4) * 2 + 9) * 3);
        assert_eq!(m.indices.len(), (8 + 4 * 4) * 3);
    }

    #[test]
    fn computes_extruded_top_and_bottom_open() {
        let m = extruded(false, false, VertexFormat::POSITION_ONLY);
        assert_eq!(m.attributes.position.as_ref().unwrap().values.len(), (8 + 4) * 2 * 3);
        assert_eq!(m.indices.len(), 4 * 3 * 4);
    }

    #[test]
    fn computes_non_extruded_rectangle_if_height_is_small() {
        let rectangle = Rectangle::new(-2.0, -1.0, 0.0, 1.0);
        let m = create(RectangleGeometryOptions {
            extruded_height: Some(0.1),
            ..options(rectangle, VertexFormat::POSITION_ONLY)
        });
        assert_eq!(m.attributes.position.as_ref().unwrap().values.len(), 9 * 3);
        assert_eq!(m.indices.len(), 8 * 3);
        assert_eq!(m, create(options(rectangle, VertexFormat::POSITION_ONLY)));
    }

    #[test]
    fn base_height_lifts_the_sheet() {
        let rectangle = Rectangle::new(-2.0, -1.0, 0.0, 1.0);
        let m = create(RectangleGeometryOptions {
            height: 100.0,
            ..options(rectangle, VertexFormat::POSITION_ONLY)
        });
        let expected = Ellipsoid::WGS84.cartographic_to_cartesian(&rectangle.north_west().with_height(100.0));
        assert!(position(&m, 0).equals_epsilon(expected, Some(EPSILON9), None));
    }

    #[test]
    fn bounding_sphere_encloses_every_vertex() {
        let m = extruded(true, true, VertexFormat::POSITION_ONLY);
        let count = m.compute_number_of_vertices().unwrap();
        for vertex in 0..count {
            assert!(m.bounding_sphere.contains(&position(&m, vertex), 1e-4));
        }
    }

    #[test]
    fn options_parse_from_json() {
        let geometry = RectangleGeometry::from_json(
            r#"{
                "rectangle": { "west": -2.0, "south": -1.0, "east": 0.0, "north": 1.0 },
                "vertexFormat": { "position": true, "st": false, "normal": false },
                "granularity": 1.0,
                "extrudedHeight": 2.0,
                "closeTop": false
            }"#,
        )
        .unwrap();
        assert_eq!(
            geometry,
            RectangleGeometry::new(RectangleGeometryOptions {
                extruded_height: Some(2.0),
                close_top: false,
                ..options(Rectangle::new(-2.0, -1.0, 0.0, 1.0), VertexFormat::POSITION_ONLY)
            })
            .unwrap()
        );
        assert_eq!(geometry.create_geometry().unwrap().indices.len(), (8 + 4 * 4) * 3);

        assert!(matches!(
            RectangleGeometry::from_json(r#"{ "granularity": 1.0 }"#),
            Err(GeometryError::InvalidArgument(_))
        ));
        assert!(matches!(
            RectangleGeometry::from_json("{ not json"),
            Err(GeometryError::Options(_))
        ));
    }

    #[test]
    fn pack_and_unpack() {
        let geometry = RectangleGeometry::new(RectangleGeometryOptions {
            rotation: 0.25,
            st_rotation: 0.5,
            extruded_height: Some(1000.0),
            close_bottom: false,
            ..options(Rectangle::new(-0.2, -0.1, 0.3, 0.4), VertexFormat::ALL)
        })
        .unwrap();
        let mut array = vec![0.0; RectangleGeometry::PACKED_LENGTH + 2];
        geometry.pack_into(&mut array, 2).unwrap();
        assert_eq!(RectangleGeometry::unpack(&array, 2).unwrap(), geometry);

        let packed = geometry.pack();
        assert_eq!(packed.len(), 20);
        assert!(RectangleGeometry::unpack(&packed[..19], 0).is_err());
    }

    #[test]
    fn tessellates_concurrently() {
        let geometry = RectangleGeometry::new(RectangleGeometryOptions {
            extruded_height: Some(5000.0),
            ..options(Rectangle::new(-0.5, -0.5, 0.5, 0.5), VertexFormat::ALL)
        })
        .unwrap();
        let expected = geometry.create_geometry().unwrap();
        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|_| scope.spawn(|| geometry.create_geometry().unwrap()))
                .collect();
            for handle in handles {
                assert_eq!(handle.join().unwrap(), expected);
            }
        });
    }

    #[test]
    fn converts_into_a_mesh() {
        let m = extruded(true, true, VertexFormat::ALL);
        let mesh = Mesh::from(m);
        assert_eq!(mesh.count_vertices(), 42);
        assert_eq!(mesh.indices().map(|indices| indices.len()), Some(96));
        assert!(mesh.attribute(Mesh::ATTRIBUTE_UV_0).is_some());
        assert!(mesh.attribute(Mesh::ATTRIBUTE_TANGENT).is_some());
        assert!(mesh.attribute(ATTRIBUTE_BINORMAL).is_some());
    }
}
