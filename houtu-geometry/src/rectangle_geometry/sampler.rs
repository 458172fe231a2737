use std::f64::consts::{FRAC_PI_2, TAU};

use bevy::math::DMat2;

use crate::{
    ellipsoid::Ellipsoid,
    error::GeometryError,
    geographic_projection::GeographicProjection,
    math::{Cartographic, Matrix2},
    projection::Projection,
    rectangle::Rectangle,
};

/// A regular grid of cartographic samples covering a (possibly rotated)
/// rectangle. Rows run north to south, columns west to east, both in the frame
/// of the unrotated rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleGrid {
    pub width: usize,
    pub height: usize,
    pub nw_corner: Cartographic,
    pub gran_x_cos: f64,
    pub gran_y_cos: f64,
    pub gran_x_sin: f64,
    pub gran_y_sin: f64,
    /// Axis-aligned bounds of the sampled footprint after rotation.
    pub bounds: Rectangle,
}
impl SampleGrid {
    pub fn size(&self) -> usize {
        self.width * self.height
    }
    /// Number of grid points on the outer ring, counting each corner once.
    pub fn perimeter(&self) -> usize {
        2 * self.width + 2 * self.height - 4
    }
    pub fn cartographic(&self, row: usize, col: usize) -> Cartographic {
        let row = row as f64;
        let col = col as f64;
        let latitude = self.nw_corner.latitude - self.gran_y_cos * row + self.gran_x_sin * col;
        let longitude = self.nw_corner.longitude + self.gran_y_sin * row + self.gran_x_cos * col;
        Cartographic::new(longitude, latitude, 0.0)
    }
}

/// Rejects rectangles that cannot describe a footprint. Runs before any
/// sampling work.
pub fn validate_rectangle(rectangle: &Rectangle) -> Result<(), GeometryError> {
    if !rectangle.validate() {
        return Err(GeometryError::InvalidArgument(format!(
            "rectangle bounds out of range: {rectangle:?}"
        )));
    }
    if rectangle.north < rectangle.south {
        return Err(GeometryError::InvalidArgument(
            "options.rectangle.north must be greater than options.rectangle.south".into(),
        ));
    }
    if rectangle.east < rectangle.west {
        return Err(GeometryError::InvalidArgument(
            "options.rectangle.east must be greater than options.rectangle.west".into(),
        ));
    }
    if rectangle.north == rectangle.south || rectangle.east == rectangle.west {
        return Err(GeometryError::InvalidArgument(format!(
            "rectangle has zero area: {rectangle:?}"
        )));
    }
    Ok(())
}

pub fn validate_granularity(granularity: f64) -> Result<(), GeometryError> {
    if !(granularity.is_finite() && granularity > 0.0) {
        return Err(GeometryError::InvalidArgument(format!(
            "granularity must be a positive number, got {granularity}"
        )));
    }
    Ok(())
}

fn too_dense(granularity: f64) -> GeometryError {
    GeometryError::InvalidArgument(format!(
        "granularity {granularity} produces more vertices than 32-bit indices can address"
    ))
}

fn grid_dimension(extent: f64, granularity: f64) -> Result<usize, GeometryError> {
    let segments = (extent / granularity).ceil();
    if !(segments.is_finite() && segments < u32::MAX as f64) {
        return Err(too_dense(granularity));
    }
    (segments as usize)
        .checked_add(1)
        .ok_or_else(|| too_dense(granularity))
}

/// Row and column counts of the grid covering `rectangle`. Fails when even the
/// largest mesh built on the grid, both caps plus walls, would need indices
/// beyond `u32::MAX`.
pub fn grid_dimensions(rectangle: &Rectangle, granularity: f64) -> Result<(usize, usize), GeometryError> {
    let width = grid_dimension(rectangle.compute_width(), granularity)?;
    let height = grid_dimension(rectangle.compute_height(), granularity)?;
    let vertex_count = width
        .checked_mul(height)
        .and_then(|cap| cap.checked_mul(2))
        .and_then(|caps| {
            width
                .checked_add(height)
                .and_then(|ring| ring.checked_mul(4))
                .and_then(|walls| caps.checked_add(walls))
        })
        .ok_or_else(|| too_dense(granularity))?;
    if vertex_count > u32::MAX as usize {
        return Err(too_dense(granularity));
    }
    Ok((width, height))
}

pub fn sample(
    rectangle: &Rectangle,
    granularity: f64,
    rotation: f64,
    ellipsoid: &Ellipsoid,
) -> Result<SampleGrid, GeometryError> {
    validate_rectangle(rectangle)?;
    validate_granularity(granularity)?;

    let dx = rectangle.compute_width();
    let dy = rectangle.compute_height();
    let (width, height) = grid_dimensions(rectangle, granularity)?;
    let granularity_x = dx / (width - 1) as f64;
    let granularity_y = dy / (height - 1) as f64;

    let mut grid = SampleGrid {
        width,
        height,
        nw_corner: rectangle.north_west(),
        gran_x_cos: granularity_x,
        gran_y_cos: granularity_y,
        gran_x_sin: 0.0,
        gran_y_sin: 0.0,
        bounds: *rectangle,
    };
    if rotation == 0.0 {
        return Ok(grid);
    }

    let projection = GeographicProjection::from_ellipsoid(ellipsoid);
    let center = projection.project(&rectangle.center()).truncate();
    let nw_corner = projection.project(&grid.nw_corner).truncate();
    let rotated = DMat2::from_rotation(rotation).multiply_by_vector(nw_corner - center) + center;
    grid.nw_corner = projection.un_project(&rotated.extend(0.0));

    let (sin_rotation, cos_rotation) = rotation.sin_cos();
    grid.gran_x_cos = granularity_x * cos_rotation;
    grid.gran_y_cos = granularity_y * cos_rotation;
    grid.gran_x_sin = granularity_x * sin_rotation;
    grid.gran_y_sin = granularity_y * sin_rotation;

    let corners = [
        grid.cartographic(0, 0),
        grid.cartographic(0, width - 1),
        grid.cartographic(height - 1, 0),
        grid.cartographic(height - 1, width - 1),
    ];
    let bounds = corners.iter().skip(1).fold(
        Rectangle::new(
            corners[0].longitude,
            corners[0].latitude,
            corners[0].longitude,
            corners[0].latitude,
        ),
        |r, c| {
            Rectangle::new(
                r.west.min(c.longitude),
                r.south.min(c.latitude),
                r.east.max(c.longitude),
                r.north.max(c.latitude),
            )
        },
    );
    if bounds.north > FRAC_PI_2 || bounds.south < -FRAC_PI_2 {
        return Err(GeometryError::InvalidGeometry(
            "rotated rectangle is invalid: it crosses over either the north or south pole".into(),
        ));
    }
    if bounds.east - bounds.west >= TAU {
        return Err(GeometryError::InvalidGeometry(
            "rotated rectangle is invalid: it spans the full circle of longitude".into(),
        ));
    }
    grid.bounds = bounds;
    Ok(grid)
}
