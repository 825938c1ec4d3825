use super::error::GeometryError;
use nalgebra::{Matrix3, Point3, Unit, Vector3};

/// Weighted mean of `points`. Uniform weights are used when `weights` is `None`.
pub fn weighted_centroid(
    points: &[Point3<f64>],
    weights: Option<&[f64]>,
) -> Result<Point3<f64>, GeometryError> {
    if points.is_empty() {
        return Err(GeometryError::InsufficientPoints {
            required: 1,
            found: 0,
        });
    }
    check_weights(points, weights)?;

    let mut sum = Vector3::zeros();
    let mut total = 0.0;
    for (i, p) in points.iter().enumerate() {
        let w = weight_at(weights, i);
        sum += p.coords * w;
        total += w;
    }

    if total == 0.0 {
        return Err(GeometryError::DegenerateWeights);
    }
    Ok(Point3::from(sum / total))
}

fn check_weights(points: &[Point3<f64>], weights: Option<&[f64]>) -> Result<(), GeometryError> {
    match weights {
        Some(w) if w.len() != points.len() => Err(GeometryError::WeightCountMismatch {
            points: points.len(),
            weights: w.len(),
        }),
        _ => Ok(()),
    }
}

#[inline]
fn weight_at(weights: Option<&[f64]>, i: usize) -> f64 {
    weights.map_or(1.0, |w| w[i])
}

/// An infinite plane stored as a unit normal plus the plane point closest to the origin.
///
/// Because the origin is the foot of the perpendicular from the coordinate origin
/// (not the centroid of the fitted points), two fits of the same plane compare equal
/// regardless of how their points were weighted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane3D {
    normal: Unit<Vector3<f64>>,
    origin: Point3<f64>,
}

impl Plane3D {
    /// Builds the plane through `point` with the given normal.
    pub fn from_point_and_normal(point: &Point3<f64>, normal: Unit<Vector3<f64>>) -> Self {
        let origin = Point3::from(normal.into_inner() * point.coords.dot(normal.as_ref()));
        Self { normal, origin }
    }

    /// Least-squares plane through weighted points.
    ///
    /// The normal is the eigenvector belonging to the smallest eigenvalue of the
    /// weighted covariance matrix, i.e. the direction of least variance.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::InsufficientPoints`] for fewer than three points, and
    /// weight errors when `weights` does not match `points` or sums to zero.
    pub fn best_fit(
        points: &[Point3<f64>],
        weights: Option<&[f64]>,
    ) -> Result<Self, GeometryError> {
        if points.len() < 3 {
            return Err(GeometryError::InsufficientPoints {
                required: 3,
                found: points.len(),
            });
        }
        let centroid = weighted_centroid(points, weights)?;

        let mut covariance = Matrix3::<f64>::zeros();
        let mut total = 0.0;
        for (i, p) in points.iter().enumerate() {
            let w = weight_at(weights, i);
            let d = p - centroid;
            total += w;
            for a in 0..3 {
                for b in a..3 {
                    covariance[(a, b)] += w * d[a] * d[b];
                }
            }
        }
        for a in 0..3 {
            for b in a..3 {
                covariance[(a, b)] /= total;
                covariance[(b, a)] = covariance[(a, b)];
            }
        }

        let eigen = covariance.symmetric_eigen();
        let smallest = eigen
            .eigenvalues
            .iter()
            .enumerate()
            .min_by(|a, b| a.1.total_cmp(b.1))
            .map_or(0, |(i, _)| i);
        let normal = Unit::new_normalize(eigen.eigenvectors.column(smallest).into_owned());

        Ok(Self::from_point_and_normal(&centroid, normal))
    }

    pub fn normal(&self) -> Unit<Vector3<f64>> {
        self.normal
    }

    /// The point on the plane closest to the coordinate origin.
    pub fn origin(&self) -> Point3<f64> {
        self.origin
    }

    pub fn signed_distance(&self, point: &Point3<f64>) -> f64 {
        point.coords.dot(self.normal.as_ref()) - self.origin.coords.dot(self.normal.as_ref())
    }

    pub fn distance(&self, point: &Point3<f64>) -> f64 {
        self.signed_distance(point).abs()
    }

    pub fn project(&self, point: &Point3<f64>) -> Point3<f64> {
        point - self.normal.into_inner() * self.signed_distance(point)
    }

    /// Absolute cosine of the angle between the two normals; 1.0 for parallel planes
    /// in either orientation.
    pub fn normal_alignment(&self, other: &Plane3D) -> f64 {
        self.normal.dot(other.normal.as_ref()).abs()
    }
}
