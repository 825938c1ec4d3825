use super::atom::Atom;
use super::ids::AtomId;
use super::residue::Residue;
use super::topology::Bond;
use crate::core::geometry::{GeometryError, Plane3D, weighted_centroid};
use nalgebra::Point3;

/// Anything that exposes a set of positioned atoms.
///
/// Aggregate properties have default implementations that recompute from the atom
/// set; owners that maintain running totals override them.
pub trait HasAtoms {
    fn atom(&self, id: AtomId) -> Option<&Atom>;

    /// Atom ids in insertion order.
    fn atom_ids(&self) -> &[AtomId];

    fn atom_count(&self) -> usize {
        self.atom_ids().len()
    }

    fn atoms(&self) -> impl Iterator<Item = (AtomId, &Atom)> {
        self.atom_ids()
            .iter()
            .filter_map(move |&id| self.atom(id).map(|atom| (id, atom)))
    }

    fn mass(&self) -> f64 {
        self.atoms().map(|(_, atom)| atom.mass()).sum()
    }

    fn center_of_mass(&self) -> Result<Point3<f64>, GeometryError> {
        let (positions, masses) = positions_and_masses(self);
        weighted_centroid(&positions, Some(&masses))
    }

    /// Mass-weighted least-squares plane through the atoms.
    fn best_plane(&self) -> Result<Plane3D, GeometryError> {
        let (positions, masses) = positions_and_masses(self);
        Plane3D::best_fit(&positions, Some(&masses))
    }
}

fn positions_and_masses<T: HasAtoms + ?Sized>(source: &T) -> (Vec<Point3<f64>>, Vec<f64>) {
    source
        .atoms()
        .map(|(_, atom)| (atom.position, atom.mass()))
        .unzip()
}

pub trait HasBonds {
    fn bonds(&self) -> &[Bond];

    /// Atoms covalently bonded to `id`; empty for unknown ids.
    fn bonded_neighbors(&self, id: AtomId) -> &[AtomId];

    fn bond_count(&self) -> usize {
        self.bonds().len()
    }

    fn is_bonded(&self, a: AtomId, b: AtomId) -> bool {
        self.bonded_neighbors(a).contains(&b)
    }
}

/// An ordered residue sequence with index-based neighbor navigation.
pub trait HasResidueSequence {
    fn residues(&self) -> &[Residue];

    fn residue_count(&self) -> usize {
        self.residues().len()
    }

    fn residue(&self, index: usize) -> Option<&Residue> {
        self.residues().get(index)
    }

    fn previous_residue(&self, index: usize) -> Option<usize> {
        self.residue(index)?.previous()
    }

    fn next_residue(&self, index: usize) -> Option<usize> {
        self.residue(index)?.next()
    }

    /// Looks up a residue by sequence number and insertion code.
    fn residue_by_key(&self, number: i32, insertion_code: char) -> Option<usize>;

    /// First residue with the given sequence number, ignoring insertion codes.
    fn residue_by_number(&self, number: i32) -> Option<usize>;

    /// One-letter sequence string in chain order.
    fn sequence(&self) -> String {
        self.residues()
            .iter()
            .map(|r| r.class().one_letter_code())
            .collect()
    }
}
