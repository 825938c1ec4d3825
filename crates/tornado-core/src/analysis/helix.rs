use super::base_pairs::BasePair;
use super::config::HelixConfig;
use super::duplex::Duplex;
use crate::core::geometry::{Cylinder, GeometryError, Line3D, Plane3D};
use crate::core::models::molecule::Molecule;
use nalgebra::{Point3, Unit, Vector3};
use tracing::{instrument, trace};

const C1_NAME: &str = " C1*";
const DIRECTION_EPSILON: f64 = 1e-9;

/// Where one base pair sits on its duplex axis.
#[derive(Debug, Clone, PartialEq)]
pub struct BasePairPosition {
    pub base_pair: BasePair,
    /// Coordinate of the helix center along the axis direction.
    pub axial_position: f64,
    pub helix_center: Point3<f64>,
    pub plane: Plane3D,
}

/// The axial slab of a duplex cylinder assigned to one residue.
///
/// The two residues of a base pair share `start..end` and split the slab by the
/// plane through the axis perpendicular to `direction`: each residue owns the half
/// that `direction` points into.
#[derive(Debug, Clone, PartialEq)]
pub struct ResidueWedge {
    pub residue: usize,
    pub start: f64,
    pub end: f64,
    pub direction: Unit<Vector3<f64>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DuplexGeometry {
    /// Helix axis; its origin is the axis point closest to the coordinate origin.
    pub axis: Line3D,
    pub cylinder: Cylinder,
    /// Padded axial extent, in the same coordinate as [`BasePairPosition::axial_position`].
    pub min_position: f64,
    pub max_position: f64,
    /// Contributing base pairs ordered along the axis.
    pub base_pairs: Vec<BasePairPosition>,
    pub wedges: Vec<ResidueWedge>,
}

impl DuplexGeometry {
    pub fn length(&self) -> f64 {
        self.max_position - self.min_position
    }

    pub fn wedge_for(&self, residue: usize) -> Option<&ResidueWedge> {
        self.wedges.iter().find(|w| w.residue == residue)
    }
}

/// Fits a cylinder around the base stack of a duplex.
///
/// The axis direction is the sign-aligned mean of the base-pair plane normals; it
/// passes through the mean of the per-pair helix centers. Base pairs lacking a plane
/// or a helix center are left out.
pub struct DuplexGeometryEstimator<'a> {
    config: &'a HelixConfig,
}

impl<'a> DuplexGeometryEstimator<'a> {
    pub fn new(config: &'a HelixConfig) -> Self {
        Self { config }
    }

    /// # Errors
    ///
    /// [`GeometryError::InsufficientPoints`] when no base pair contributes, and
    /// [`GeometryError::DegenerateDirection`] when the normals cancel out.
    #[instrument(skip_all, name = "duplex_geometry", fields(base_pairs = duplex.len()))]
    pub fn estimate(
        &self,
        molecule: &Molecule,
        duplex: &Duplex,
    ) -> Result<DuplexGeometry, GeometryError> {
        let mut contributors = Vec::with_capacity(duplex.len());
        for &pair in duplex.base_pairs() {
            let geometry = pair.base_plane(molecule).and_then(|plane| {
                pair.helix_center(molecule, self.config.center_offset)
                    .map(|center| (plane, center))
            });
            match geometry {
                Ok((plane, center)) => contributors.push((pair, plane, center)),
                Err(e) => {
                    trace!(pair = %pair.label(molecule), error = %e, "Base pair left out of helix fit")
                }
            }
        }
        if contributors.is_empty() {
            return Err(GeometryError::InsufficientPoints {
                required: 1,
                found: 0,
            });
        }

        let mut normal_sum = Vector3::zeros();
        let mut center_sum = Vector3::zeros();
        for (_, plane, center) in &contributors {
            let mut normal = plane.normal().into_inner();
            if normal.dot(&normal_sum) < 0.0 {
                normal = -normal;
            }
            normal_sum += normal;
            center_sum += center.coords;
        }
        let direction = Unit::try_new(normal_sum, DIRECTION_EPSILON)
            .ok_or(GeometryError::DegenerateDirection("helix axis"))?;
        let centroid = center_sum / contributors.len() as f64;
        let offset = centroid - direction.into_inner() * direction.dot(&centroid);
        let axis = Line3D::new(Point3::from(offset), direction);

        let mut positions: Vec<BasePairPosition> = contributors
            .into_iter()
            .map(|(base_pair, plane, helix_center)| BasePairPosition {
                base_pair,
                axial_position: axis.parameter_of(&helix_center),
                helix_center,
                plane,
            })
            .collect();
        positions.sort_by(|a, b| a.axial_position.total_cmp(&b.axial_position));

        let first = positions.first().map_or(0.0, |p| p.axial_position);
        let last = positions.last().map_or(0.0, |p| p.axial_position);
        let min_position = first - self.config.end_padding;
        let max_position = last + self.config.end_padding;

        let cylinder = Cylinder {
            head: axis.point_at(max_position),
            tail: axis.point_at(min_position),
            radius: self.config.cylinder_radius,
        };

        let wedges = self.wedges(molecule, &axis, &positions, min_position, max_position);

        Ok(DuplexGeometry {
            axis,
            cylinder,
            min_position,
            max_position,
            base_pairs: positions,
            wedges,
        })
    }

    /// Splits the axial range at the midpoints between consecutive base pairs.
    fn wedges(
        &self,
        molecule: &Molecule,
        axis: &Line3D,
        positions: &[BasePairPosition],
        min_position: f64,
        max_position: f64,
    ) -> Vec<ResidueWedge> {
        let mut wedges = Vec::with_capacity(positions.len() * 2);
        for (k, position) in positions.iter().enumerate() {
            let start = match k {
                0 => min_position,
                _ => (position.axial_position + positions[k - 1].axial_position) / 2.0,
            };
            let end = match positions.get(k + 1) {
                Some(next) => (position.axial_position + next.axial_position) / 2.0,
                None => max_position,
            };

            let pair = position.base_pair;
            let Some(direction) = slicing_direction(molecule, pair, axis) else {
                trace!(pair = %pair.label(molecule), "No slicing direction for base pair");
                continue;
            };
            wedges.push(ResidueWedge {
                residue: pair.residue1(),
                start,
                end,
                direction,
            });
            wedges.push(ResidueWedge {
                residue: pair.residue2(),
                start,
                end,
                direction: Unit::new_unchecked(-direction.into_inner()),
            });
        }
        wedges
    }
}

/// C1*(residue1) -> C1*(residue2), made perpendicular to the axis.
fn slicing_direction(
    molecule: &Molecule,
    pair: BasePair,
    axis: &Line3D,
) -> Option<Unit<Vector3<f64>>> {
    let c11 = molecule.require_atom_position(pair.residue1(), C1_NAME).ok()?;
    let c12 = molecule.require_atom_position(pair.residue2(), C1_NAME).ok()?;
    let along = c12 - c11;
    let axial = axis.direction.into_inner() * along.dot(axis.direction.as_ref());
    Unit::try_new(along - axial, DIRECTION_EPSILON)
}
