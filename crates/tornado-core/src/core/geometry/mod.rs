//! # Geometry
//!
//! Numerical primitives shared by the inference passes: a uniform spatial hash for
//! fixed-radius neighbor queries, weighted centroids, least-squares plane fitting and
//! the axis/cylinder shapes used to describe helices.

pub mod error;
pub mod plane;
pub mod shapes;
pub mod spatial;

pub use error::GeometryError;
pub use plane::{Plane3D, weighted_centroid};
pub use shapes::{Cylinder, Line3D};
pub use spatial::SpatialHash3D;
