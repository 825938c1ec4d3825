use super::atom::Atom;
use super::ids::AtomId;
use super::molecule::Molecule;
use super::traits::HasAtoms;

/// Atom names making up a nucleotide's nitrogenous base.
pub const BASE_GROUP_ATOM_NAMES: [&str; 15] = [
    " N1 ", " C2 ", " N3 ", " C4 ", " C5 ", " C6 ", " N7 ", " C8 ", " N9 ", " O2 ", " N2 ",
    " O4 ", " N4 ", " O6 ", " N6 ",
];

/// Atom names making up a nucleotide's ribose or deoxyribose.
pub const SUGAR_GROUP_ATOM_NAMES: [&str; 9] = [
    " C1*", " C2*", " O2*", " C3*", " O3*", " C4*", " O4*", " C5*", " O5*",
];

/// Atom names making up a nucleotide's phosphate.
pub const PHOSPHATE_GROUP_ATOM_NAMES: [&str; 6] = [" P  ", " OP1", " OP2", " O1P", " O2P", " O5*"];

/// A borrowed subset of a molecule's atoms, such as one residue's base ring.
#[derive(Debug, Clone)]
pub struct AtomGroup<'a> {
    molecule: &'a Molecule,
    ids: Vec<AtomId>,
}

impl<'a> AtomGroup<'a> {
    pub fn new(molecule: &'a Molecule, ids: Vec<AtomId>) -> Self {
        Self { molecule, ids }
    }

    /// Atoms of residue `residue_index` whose names appear in `names`, in `names` order.
    ///
    /// Only the first alternate location of each name is taken.
    pub fn from_residue(molecule: &'a Molecule, residue_index: usize, names: &[&str]) -> Self {
        let ids = names
            .iter()
            .filter_map(|name| molecule.residue_atom(residue_index, name))
            .map(|(id, _)| id)
            .collect();
        Self { molecule, ids }
    }

    pub fn base(molecule: &'a Molecule, residue_index: usize) -> Self {
        Self::from_residue(molecule, residue_index, &BASE_GROUP_ATOM_NAMES)
    }

    pub fn sugar(molecule: &'a Molecule, residue_index: usize) -> Self {
        Self::from_residue(molecule, residue_index, &SUGAR_GROUP_ATOM_NAMES)
    }

    pub fn phosphate(molecule: &'a Molecule, residue_index: usize) -> Self {
        Self::from_residue(molecule, residue_index, &PHOSPHATE_GROUP_ATOM_NAMES)
    }

    /// Concatenates two groups drawn from the same molecule.
    pub fn union(&self, other: &AtomGroup<'a>) -> Self {
        let mut ids = self.ids.clone();
        ids.extend(other.ids.iter().filter(|id| !self.ids.contains(id)));
        Self {
            molecule: self.molecule,
            ids,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl HasAtoms for AtomGroup<'_> {
    fn atom(&self, id: AtomId) -> Option<&Atom> {
        self.molecule.atom(id)
    }

    fn atom_ids(&self) -> &[AtomId] {
        &self.ids
    }
}
