use nalgebra::{Point2, Point3, Vector3};

/// Converts viewport pixel coordinates into normalized device coordinates.
/// Both axes land in [-1, 1], with Y inverted (pixel y grows downward).
/// Coordinates outside the viewport simply fall outside the unit square.
pub fn viewport_to_ndc(x: f32, y: f32, width: f32, height: f32) -> Point2<f32> {
    Point2::new((x / width) * 2.0 - 1.0, -(y / height) * 2.0 + 1.0)
}

#[derive(Debug, Clone, Copy)]
pub struct Ray {
    pub origin: Point3<f32>,
    pub dir: Vector3<f32>,
}

impl Ray {
    pub fn new(origin: Point3<f32>, dir: Vector3<f32>) -> Self {
        Ray {
            origin,
            dir: dir.normalize(),
        }
    }
}

/// Distance along the ray to a sphere, or None if the ray misses.
/// A ray starting inside the sphere reports distance 0; a sphere entirely
/// behind the origin is a miss.
pub fn toi_with_sphere(ray: &Ray, center: &Point3<f32>, radius: f32) -> Option<f32> {
    let oc = ray.origin - center;
    let b = oc.dot(&ray.dir);
    let c = oc.norm_squared() - radius * radius;
    let discriminant = b * b - c;
    if discriminant < 0.0 {
        return None;
    }

    let sqrt_d = discriminant.sqrt();
    let t_enter = -b - sqrt_d;
    let t_exit = -b + sqrt_d;
    if t_exit < 0.0 {
        None
    } else if t_enter < 0.0 {
        Some(0.0)
    } else {
        Some(t_enter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn ndc_center_and_corners() {
        let center = viewport_to_ndc(400.0, 300.0, 800.0, 600.0);
        assert_relative_eq!(center.x, 0.0);
        assert_relative_eq!(center.y, 0.0);

        let top_left = viewport_to_ndc(0.0, 0.0, 800.0, 600.0);
        assert_relative_eq!(top_left.x, -1.0);
        assert_relative_eq!(top_left.y, 1.0);

        let bottom_right = viewport_to_ndc(800.0, 600.0, 800.0, 600.0);
        assert_relative_eq!(bottom_right.x, 1.0);
        assert_relative_eq!(bottom_right.y, -1.0);
    }

    #[test]
    fn ndc_outside_viewport_is_out_of_range() {
        let outside = viewport_to_ndc(900.0, -50.0, 800.0, 600.0);
        assert!(outside.x > 1.0);
        assert!(outside.y > 1.0);
    }

    #[test]
    fn ray_hits_sphere_head_on() {
        let ray = Ray::new(Point3::new(0.0, 0.0, 10.0), Vector3::new(0.0, 0.0, -1.0));
        let toi = toi_with_sphere(&ray, &Point3::origin(), 2.0).unwrap();
        assert_relative_eq!(toi, 8.0);
    }

    #[test]
    fn ray_misses_offset_sphere() {
        let ray = Ray::new(Point3::new(0.0, 0.0, 10.0), Vector3::new(0.0, 0.0, -1.0));
        assert!(toi_with_sphere(&ray, &Point3::new(5.0, 0.0, 0.0), 2.0).is_none());
    }

    #[test]
    fn sphere_behind_origin_is_a_miss() {
        let ray = Ray::new(Point3::new(0.0, 0.0, 10.0), Vector3::new(0.0, 0.0, 1.0));
        assert!(toi_with_sphere(&ray, &Point3::origin(), 2.0).is_none());
    }

    #[test]
    fn origin_inside_sphere_reports_zero() {
        let ray = Ray::new(Point3::origin(), Vector3::new(1.0, 0.0, 0.0));
        let toi = toi_with_sphere(&ray, &Point3::origin(), 2.0).unwrap();
        assert_relative_eq!(toi, 0.0);
    }

    #[test]
    fn grazing_ray_still_hits() {
        // Passes exactly along the edge of the sphere
        let ray = Ray::new(Point3::new(2.0, 0.0, 10.0), Vector3::new(0.0, 0.0, -1.0));
        assert!(toi_with_sphere(&ray, &Point3::origin(), 2.0).is_some());
    }
}
