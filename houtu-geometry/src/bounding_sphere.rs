use bevy::math::DVec3;

#[derive(Debug, Clone, PartialEq, Copy, Default)]
pub struct BoundingSphere {
    pub center: DVec3,
    pub radius: f64,
}
impl BoundingSphere {
    pub fn new(center: DVec3, radius: f64) -> Self {
        Self { center, radius }
    }
    /// Tight sphere around a point set: the smaller of Ritter's sphere and the
    /// sphere centered on the axis-aligned bounds.
    pub fn from_points(positions: &[DVec3]) -> Self {
        let Some(&first) = positions.first() else {
            return Self::default();
        };

        let mut x_min = first;
        let mut y_min = first;
        let mut z_min = first;
        let mut x_max = first;
        let mut y_max = first;
        let mut z_max = first;

        for &current in positions.iter().skip(1) {
            if current.x < x_min.x {
                x_min = current;
            }
            if current.x > x_max.x {
                x_max = current;
            }
            if current.y < y_min.y {
                y_min = current;
            }
            if current.y > y_max.y {
                y_max = current;
            }
            if current.z < z_min.z {
                z_min = current;
            }
            if current.z > z_max.z {
                z_max = current;
            }
        }

        let x_span = (x_max - x_min).length_squared();
        let y_span = (y_max - y_min).length_squared();
        let z_span = (z_max - z_min).length_squared();

        let mut diameter1 = x_min;
        let mut diameter2 = x_max;
        let mut max_span = x_span;
        if y_span > max_span {
            max_span = y_span;
            diameter1 = y_min;
            diameter2 = y_max;
        }
        if z_span > max_span {
            diameter1 = z_min;
            diameter2 = z_max;
        }

        let mut ritter_center = (diameter1 + diameter2) * 0.5;
        let mut radius_squared = (diameter2 - ritter_center).length_squared();
        let mut ritter_radius = radius_squared.sqrt();

        let min_box_pt = DVec3::new(x_min.x, y_min.y, z_min.z);
        let max_box_pt = DVec3::new(x_max.x, y_max.y, z_max.z);
        let naive_center = (min_box_pt + max_box_pt) * 0.5;

        let mut naive_radius: f64 = 0.0;
        for &current in positions {
            naive_radius = naive_radius.max((current - naive_center).length());

            // grow the Ritter sphere to include points that fall outside
            let old_center_to_point_squared = (current - ritter_center).length_squared();
            if old_center_to_point_squared > radius_squared {
                let old_center_to_point = old_center_to_point_squared.sqrt();
                ritter_radius = (ritter_radius + old_center_to_point) * 0.5;
                radius_squared = ritter_radius * ritter_radius;
                let old_to_new = old_center_to_point - ritter_radius;
                ritter_center =
                    (ritter_center * ritter_radius + current * old_to_new) / old_center_to_point;
            }
        }

        if ritter_radius < naive_radius {
            Self::new(ritter_center, ritter_radius)
        } else {
            Self::new(naive_center, naive_radius)
        }
    }
    pub fn contains(&self, point: &DVec3, epsilon: f64) -> bool {
        point.distance(self.center) <= self.radius + epsilon
    }
}
