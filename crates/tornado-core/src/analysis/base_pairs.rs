use super::config::{BasePairConfig, ConfigError};
use crate::core::geometry::{GeometryError, Plane3D, SpatialHash3D, weighted_centroid};
use crate::core::models::group::AtomGroup;
use crate::core::models::molecule::Molecule;
use crate::core::models::residue::Residue;
use crate::core::models::traits::{HasAtoms, HasResidueSequence};
use nalgebra::{Point3, Vector3};
use tracing::{info, instrument, trace};

const C1_NAME: &str = " C1*";
const DIRECTION_EPSILON: f64 = 1e-9;

/// Two paired nucleotides of one molecule, identified by residue index.
///
/// The residues are stored in canonical order (lower sequence number first, then
/// insertion code), so `BasePair::new(m, a, b) == BasePair::new(m, b, a)` and both
/// hash identically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BasePair {
    residue1: usize,
    residue2: usize,
}

impl BasePair {
    pub fn new(molecule: &Molecule, a: usize, b: usize) -> Self {
        let key = |index: usize| (molecule.residue(index).map(Residue::sequence_key), index);
        if key(a) <= key(b) {
            Self {
                residue1: a,
                residue2: b,
            }
        } else {
            Self {
                residue1: b,
                residue2: a,
            }
        }
    }

    pub fn residue1(&self) -> usize {
        self.residue1
    }

    pub fn residue2(&self) -> usize {
        self.residue2
    }

    pub fn contains(&self, residue_index: usize) -> bool {
        self.residue1 == residue_index || self.residue2 == residue_index
    }

    /// Residue sequence numbers of both partners.
    pub fn numbers(&self, molecule: &Molecule) -> (i32, i32) {
        let number = |i| molecule.residue(i).map_or(0, |r: &Residue| r.number);
        (number(self.residue1), number(self.residue2))
    }

    /// Sum of the two residue numbers; constant along an antiparallel helix.
    pub fn phase(&self, molecule: &Molecule) -> i32 {
        let (n1, n2) = self.numbers(molecule);
        n1 + n2
    }

    /// Short label such as `A1:U20`.
    pub fn label(&self, molecule: &Molecule) -> String {
        let label = |i| molecule.residue(i).map_or_else(|| format!("#{i}"), Residue::label);
        format!("{}:{}", label(self.residue1), label(self.residue2))
    }

    fn base_positions(&self, molecule: &Molecule) -> Vec<Point3<f64>> {
        AtomGroup::base(molecule, self.residue1)
            .union(&AtomGroup::base(molecule, self.residue2))
            .atoms()
            .map(|(_, atom)| atom.position)
            .collect()
    }

    /// Unweighted best-fit plane through the base atoms of both residues.
    pub fn base_plane(&self, molecule: &Molecule) -> Result<Plane3D, GeometryError> {
        Plane3D::best_fit(&self.base_positions(molecule), None)
    }

    /// Estimated point on the axis of a double helix containing this pair.
    ///
    /// The C1*-C1* vector crossed with the base-pair normal gives the minor/major
    /// groove direction; it is oriented toward the base centroid and followed for
    /// `offset` Ångströms from the C1*-C1* midpoint.
    pub fn helix_center(&self, molecule: &Molecule, offset: f64) -> Result<Point3<f64>, GeometryError> {
        let positions = self.base_positions(molecule);
        let plane = Plane3D::best_fit(&positions, None)?;
        let base_centroid = weighted_centroid(&positions, None)?;

        let c11 = molecule.require_atom_position(self.residue1, C1_NAME)?;
        let c12 = molecule.require_atom_position(self.residue2, C1_NAME)?;
        let c1_midpoint = Point3::from((c11.coords + c12.coords) * 0.5);
        let toward_bases = base_centroid - c1_midpoint;

        let pair_direction = (c12 - c11)
            .try_normalize(DIRECTION_EPSILON)
            .ok_or(GeometryError::DegenerateDirection("C1*-C1* vector"))?;
        let mut groove: Vector3<f64> = pair_direction
            .cross(plane.normal().as_ref())
            .try_normalize(DIRECTION_EPSILON)
            .ok_or(GeometryError::DegenerateDirection("groove direction"))?;
        if groove.dot(&toward_bases) < 0.0 {
            groove = -groove;
        }
        Ok(c1_midpoint + groove * offset)
    }
}

struct BaseGeometry {
    centroid: Point3<f64>,
    plane: Plane3D,
}

/// Finds base pairs from base-group geometry.
///
/// Candidate partners come from a spatial hash of base centroids. Each candidate
/// then has to pass, in order: a minimum sequence separation, parallel base planes,
/// both centroids lying near the other base's plane, and an O/N contact between the
/// two residues.
pub struct BasePairDetector<'a> {
    config: &'a BasePairConfig,
}

impl<'a> BasePairDetector<'a> {
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when `config` fails [`BasePairConfig::validate`].
    pub fn new(config: &'a BasePairConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    fn base_geometry(molecule: &Molecule, index: usize) -> Result<BaseGeometry, GeometryError> {
        let base = AtomGroup::base(molecule, index);
        Ok(BaseGeometry {
            centroid: base.center_of_mass()?,
            plane: base.best_plane()?,
        })
    }

    /// Smallest distance between oxygen or nitrogen atoms of two residues.
    fn min_polar_distance(molecule: &Molecule, a: usize, b: usize) -> Option<f64> {
        let polar = |index: usize| -> Vec<Point3<f64>> {
            molecule.residues()[index]
                .atoms()
                .iter()
                .filter_map(|&id| molecule.atom(id))
                .filter(|atom| atom.element().is_polar())
                .map(|atom| atom.position)
                .collect()
        };
        let (pa, pb) = (polar(a), polar(b));
        pa.iter()
            .flat_map(|p| pb.iter().map(move |q| (p - q).norm()))
            .min_by(f64::total_cmp)
    }

    /// All base pairs in `molecule`, sorted by residue index.
    #[instrument(skip_all, name = "base_pair_detection", fields(chain = %molecule.chain_id))]
    pub fn detect(&self, molecule: &Molecule) -> Vec<BasePair> {
        let residues = molecule.residues();
        let mut geometry: Vec<Option<BaseGeometry>> = Vec::with_capacity(residues.len());
        let mut hash = SpatialHash3D::new(self.config.centroid_cell_size);

        for (index, residue) in residues.iter().enumerate() {
            if !residue.class().is_nucleotide() {
                geometry.push(None);
                continue;
            }
            match Self::base_geometry(molecule, index) {
                Ok(base) => {
                    hash.put(base.centroid, index);
                    geometry.push(Some(base));
                }
                Err(e) => {
                    trace!(residue = %residue.label(), error = %e, "No usable base plane");
                    geometry.push(None);
                }
            }
        }

        let min_alignment = self.config.plane_angle.to_radians().cos();
        let mut pairs = Vec::new();
        for (index, base) in geometry.iter().enumerate() {
            let Some(base) = base else { continue };

            let mut candidates: Vec<usize> = hash
                .neighbor_values(&base.centroid, self.config.centroid_cutoff)
                .into_iter()
                .copied()
                .filter(|&other| other > index)
                .collect();
            candidates.sort_unstable();

            for other in candidates {
                let Some(other_base) = &geometry[other] else {
                    continue;
                };
                let separation = (residues[index].number - residues[other].number).abs();
                if separation < self.config.min_sequence_distance {
                    continue;
                }
                if base.plane.normal_alignment(&other_base.plane) < min_alignment {
                    continue;
                }
                if base.plane.distance(&other_base.centroid) > self.config.plane_height
                    || other_base.plane.distance(&base.centroid) > self.config.plane_height
                {
                    continue;
                }
                let touching = Self::min_polar_distance(molecule, index, other)
                    .is_some_and(|d| d <= self.config.polar_contact);
                if !touching {
                    continue;
                }
                pairs.push(BasePair::new(molecule, index, other));
            }
        }

        pairs.sort_unstable();
        info!(
            nucleotides = hash.len(),
            base_pairs = pairs.len(),
            "Base-pair detection complete."
        );
        pairs
    }
}
