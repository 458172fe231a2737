use super::extrude::{wall_sides, Extrusion};

/// Two triangles per grid cell, counter-clockwise seen from outside the
/// ellipsoid. `reverse` flips every triangle for caps that face inward.
pub fn cap_indices(width: usize, height: usize, offset: u32, reverse: bool, indices: &mut Vec<u32>) {
    let width_u32 = width as u32;
    for row in 0..height.saturating_sub(1) {
        for col in 0..width.saturating_sub(1) {
            let upper_left = offset + (row * width + col) as u32;
            let lower_left = upper_left + width_u32;
            let lower_right = lower_left + 1;
            let upper_right = upper_left + 1;
            if reverse {
                indices.extend_from_slice(&[
                    upper_right,
                    lower_left,
                    upper_left,
                    lower_right,
                    lower_left,
                    upper_right,
                ]);
            } else {
                indices.extend_from_slice(&[
                    upper_left,
                    lower_left,
                    upper_right,
                    upper_right,
                    lower_left,
                    lower_right,
                ]);
            }
        }
    }
}

/// Quads between consecutive top/bottom vertex pairs of each side of the wall
/// ring. Pairs are stored top first; sides do not connect to each other.
pub fn wall_indices(side_lengths: &[usize], offset: u32, indices: &mut Vec<u32>) {
    let mut pair = 0u32;
    for &length in side_lengths {
        for _ in 0..length.saturating_sub(1) {
            let upper_left = offset + 2 * pair;
            let lower_left = upper_left + 1;
            let upper_right = upper_left + 2;
            let lower_right = upper_left + 3;
            indices.extend_from_slice(&[
                upper_left,
                lower_left,
                upper_right,
                upper_right,
                lower_left,
                lower_right,
            ]);
            pair += 1;
        }
        pair += 1;
    }
}

pub fn index_count(width: usize, height: usize, extrusion: &Extrusion) -> usize {
    let cap = 6 * (width - 1) * (height - 1);
    match *extrusion {
        Extrusion::Flat { .. } => cap,
        Extrusion::Volumetric {
            close_top,
            close_bottom,
            ..
        } => {
            let walls = 6 * (2 * (width - 1) + 2 * (height - 1));
            walls + cap * (usize::from(close_top) + usize::from(close_bottom))
        }
    }
}

/// Triangle list for a grid of `width` by `height` samples laid out the way
/// the extrusion builder emits vertices: top cap, bottom cap, wall ring.
pub fn build_indices(width: usize, height: usize, extrusion: &Extrusion) -> Vec<u32> {
    let mut indices = Vec::with_capacity(index_count(width, height, extrusion));
    match *extrusion {
        Extrusion::Flat { .. } => cap_indices(width, height, 0, false, &mut indices),
        Extrusion::Volumetric {
            close_top,
            close_bottom,
            ..
        } => {
            let cap_size = (width * height) as u32;
            let mut offset = 0;
            if close_top {
                cap_indices(width, height, offset, false, &mut indices);
                offset += cap_size;
            }
            if close_bottom {
                cap_indices(width, height, offset, true, &mut indices);
                offset += cap_size;
            }
            wall_indices(&wall_sides(width, height).map(|side| side.len()), offset, &mut indices);
        }
    }
    indices
}
