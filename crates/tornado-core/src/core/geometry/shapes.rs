use nalgebra::{Point3, Unit, Vector3};

/// An infinite line through `origin` along a unit `direction`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line3D {
    pub origin: Point3<f64>,
    pub direction: Unit<Vector3<f64>>,
}

impl Line3D {
    pub fn new(origin: Point3<f64>, direction: Unit<Vector3<f64>>) -> Self {
        Self { origin, direction }
    }

    /// Axial coordinate of `point` measured from `origin`.
    pub fn parameter_of(&self, point: &Point3<f64>) -> f64 {
        (point - self.origin).dot(self.direction.as_ref())
    }

    pub fn point_at(&self, alpha: f64) -> Point3<f64> {
        self.origin + self.direction.into_inner() * alpha
    }

    pub fn distance_to(&self, point: &Point3<f64>) -> f64 {
        let foot = self.point_at(self.parameter_of(point));
        (point - foot).norm()
    }
}

/// A finite cylinder between two end-cap centers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cylinder {
    pub head: Point3<f64>,
    pub tail: Point3<f64>,
    pub radius: f64,
}

impl Cylinder {
    pub fn length(&self) -> f64 {
        (self.head - self.tail).norm()
    }

    pub fn axis(&self) -> Option<Unit<Vector3<f64>>> {
        Unit::try_new(self.head - self.tail, 1e-12)
    }

    pub fn contains(&self, point: &Point3<f64>) -> bool {
        let Some(axis) = self.axis() else {
            return false;
        };
        let along = (point - self.tail).dot(axis.as_ref());
        if along < 0.0 || along > self.length() {
            return false;
        }
        let radial = (point - self.tail) - axis.into_inner() * along;
        radial.norm() <= self.radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_parameter_and_distance() {
        let line = Line3D::new(Point3::new(0.0, 1.0, 0.0), Vector3::z_axis());
        let p = Point3::new(3.0, 1.0, 4.0);
        assert!((line.parameter_of(&p) - 4.0).abs() < 1e-12);
        assert!((line.distance_to(&p) - 3.0).abs() < 1e-12);
        assert_eq!(line.point_at(2.0), Point3::new(0.0, 1.0, 2.0));
    }

    #[test]
    fn cylinder_contains_points_inside_its_extent() {
        let cylinder = Cylinder {
            head: Point3::new(0.0, 0.0, 10.0),
            tail: Point3::origin(),
            radius: 2.0,
        };
        assert!((cylinder.length() - 10.0).abs() < 1e-12);
        assert!(cylinder.contains(&Point3::new(1.0, 1.0, 5.0)));
        assert!(!cylinder.contains(&Point3::new(3.0, 0.0, 5.0)));
        assert!(!cylinder.contains(&Point3::new(0.0, 0.0, 10.5)));
    }

    #[test]
    fn degenerate_cylinder_has_no_axis() {
        let cylinder = Cylinder {
            head: Point3::origin(),
            tail: Point3::origin(),
            radius: 1.0,
        };
        assert!(cylinder.axis().is_none());
        assert!(!cylinder.contains(&Point3::origin()));
    }
}
