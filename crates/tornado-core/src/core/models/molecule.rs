use super::atom::Atom;
use super::ids::AtomId;
use super::kind::MoleculeKind;
use super::residue::{Residue, ResidueClass};
use super::secondary::SecondaryStructure;
use super::topology::{Bond, BondOrigin};
use super::traits::{HasAtoms, HasBonds, HasResidueSequence};
use crate::core::geometry::GeometryError;
use nalgebra::{Point3, Vector3};
use slotmap::{SecondaryMap, SlotMap};
use std::collections::{HashMap, HashSet};

/// A molecule: atoms, the bonds among them, and (for polymers) an ordered residue
/// sequence.
///
/// Atoms are stored in a slot map for stable ids and kept in insertion order.
/// Total mass and the mass-weighted coordinate sum are updated on every atom
/// insertion, so [`HasAtoms::mass`] and [`HasAtoms::center_of_mass`] never have to
/// rescan the atom set.
#[derive(Debug, Clone, Default)]
pub struct Molecule {
    /// Chain identifier shared by the molecule's residues (' ' when absent).
    pub chain_id: char,
    kind: MoleculeKind,
    atoms: SlotMap<AtomId, Atom>,
    /// Atom ids in insertion order.
    atom_order: Vec<AtomId>,
    /// Residues in chain order.
    residues: Vec<Residue>,
    /// Lookup from (sequence number, insertion code) to residue index.
    residue_key_map: HashMap<(i32, char), usize>,
    /// Lookup from sequence number to the first residue carrying it.
    residue_number_map: HashMap<i32, usize>,
    bonds: Vec<Bond>,
    /// Unordered atom pairs already bonded, stored with the smaller id first.
    bond_pairs: HashSet<(AtomId, AtomId)>,
    /// Adjacency list for bond connectivity, indexed by atom id.
    bond_adjacency: SecondaryMap<AtomId, Vec<AtomId>>,
    mass: f64,
    mass_weighted_sum: Vector3<f64>,
    secondary_structures: Vec<SecondaryStructure>,
}

impl Molecule {
    pub fn new(chain_id: char) -> Self {
        Self {
            chain_id,
            ..Self::default()
        }
    }

    pub fn kind(&self) -> MoleculeKind {
        self.kind
    }

    pub(crate) fn set_kind(&mut self, kind: MoleculeKind) {
        self.kind = kind;
    }

    /// Adds an atom that belongs to no residue.
    pub fn add_atom(&mut self, atom: Atom) -> AtomId {
        self.mass += atom.mass();
        self.mass_weighted_sum += atom.position.coords * atom.mass();
        let id = self.atoms.insert(atom);
        self.atom_order.push(id);
        self.bond_adjacency.insert(id, Vec::new());
        id
    }

    /// Appends a residue to the end of the chain and returns its index.
    ///
    /// Returns `None` if a residue with the same number and insertion code already
    /// exists.
    pub fn add_residue(
        &mut self,
        number: i32,
        insertion_code: char,
        name: &str,
        class: ResidueClass,
    ) -> Option<usize> {
        let key = (number, insertion_code);
        if self.residue_key_map.contains_key(&key) {
            return None;
        }
        let index = self.residues.len();
        self.residues.push(Residue::new(
            number,
            insertion_code,
            self.chain_id,
            name,
            class,
        ));
        self.residue_key_map.insert(key, index);
        self.residue_number_map.entry(number).or_insert(index);
        Some(index)
    }

    /// Adds an atom and registers it with the residue at `residue_index`.
    ///
    /// # Return
    ///
    /// Returns the new atom's id, or `None` if the residue does not exist.
    pub fn add_atom_to_residue(&mut self, residue_index: usize, mut atom: Atom) -> Option<AtomId> {
        if residue_index >= self.residues.len() {
            return None;
        }
        atom.residue = Some(residue_index);
        let name = atom.name.clone();
        let id = self.add_atom(atom);
        self.residues[residue_index].add_atom(&name, id);
        Some(id)
    }

    /// Adds a covalent bond between two atoms of this molecule.
    ///
    /// Bonds are unordered and deduplicated: adding `(a, b)` after `(b, a)` is a no-op.
    ///
    /// # Return
    ///
    /// `Some(true)` if a new bond was recorded, `Some(false)` if it already existed,
    /// and `None` if either atom is missing or both ids are the same atom.
    pub fn add_bond(&mut self, a: AtomId, b: AtomId, origin: BondOrigin) -> Option<bool> {
        if a == b || !self.atoms.contains_key(a) || !self.atoms.contains_key(b) {
            return None;
        }
        let bond = Bond::new(a, b, origin);
        if !self
            .bond_pairs
            .insert((bond.atom1_id(), bond.atom2_id()))
        {
            return Some(false);
        }
        self.bonds.push(bond);
        self.bond_adjacency.get_mut(a)?.push(b);
        self.bond_adjacency.get_mut(b)?.push(a);
        Some(true)
    }

    pub fn residue_of(&self, atom_id: AtomId) -> Option<&Residue> {
        let index = self.atoms.get(atom_id)?.residue?;
        self.residues.get(index)
    }

    pub(crate) fn residues_mut(&mut self) -> &mut [Residue] {
        &mut self.residues
    }

    /// Atom of residue `residue_index` named `name`, accepting either prime spelling.
    pub fn residue_atom(&self, residue_index: usize, name: &str) -> Option<(AtomId, &Atom)> {
        let id = self.residues.get(residue_index)?.atom(name)?;
        self.atoms.get(id).map(|atom| (id, atom))
    }

    /// Position of a named atom, reported as [`GeometryError::MissingAtom`] when absent.
    pub fn require_atom_position(
        &self,
        residue_index: usize,
        name: &str,
    ) -> Result<Point3<f64>, GeometryError> {
        self.residue_atom(residue_index, name)
            .map(|(_, atom)| atom.position)
            .ok_or_else(|| GeometryError::MissingAtom {
                residue: self
                    .residues
                    .get(residue_index)
                    .map_or_else(|| format!("#{residue_index}"), Residue::label),
                atom: name.trim().to_string(),
            })
    }

    pub fn secondary_structures(&self) -> &[SecondaryStructure] {
        &self.secondary_structures
    }

    pub fn add_secondary_structure(&mut self, structure: SecondaryStructure) {
        self.secondary_structures.push(structure);
    }
}

impl HasAtoms for Molecule {
    fn atom(&self, id: AtomId) -> Option<&Atom> {
        self.atoms.get(id)
    }

    fn atom_ids(&self) -> &[AtomId] {
        &self.atom_order
    }

    fn mass(&self) -> f64 {
        self.mass
    }

    fn center_of_mass(&self) -> Result<Point3<f64>, GeometryError> {
        if self.atom_order.is_empty() {
            return Err(GeometryError::InsufficientPoints {
                required: 1,
                found: 0,
            });
        }
        if self.mass == 0.0 {
            return Err(GeometryError::DegenerateWeights);
        }
        Ok(Point3::from(self.mass_weighted_sum / self.mass))
    }
}

impl HasBonds for Molecule {
    fn bonds(&self) -> &[Bond] {
        &self.bonds
    }

    fn bonded_neighbors(&self, id: AtomId) -> &[AtomId] {
        self.bond_adjacency
            .get(id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

impl HasResidueSequence for Molecule {
    fn residues(&self) -> &[Residue] {
        &self.residues
    }

    fn residue_by_key(&self, number: i32, insertion_code: char) -> Option<usize> {
        self.residue_key_map.get(&(number, insertion_code)).copied()
    }

    fn residue_by_number(&self, number: i32) -> Option<usize> {
        self.residue_number_map.get(&number).copied()
    }
}
