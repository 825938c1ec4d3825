use crate::core::models::atom::Atom;
use crate::core::models::ids::AtomId;
use crate::core::models::molecule::Molecule;
use crate::core::models::topology::BondOrigin;
use crate::core::models::traits::{HasAtoms, HasResidueSequence};
use crate::core::topology::bonds::{AtomNamePair, linkage_bonds};
use crate::core::topology::registry::ResidueRegistry;
use tracing::{debug, instrument, trace};

/// Adds bonds that are known by atom name rather than found by distance.
///
/// Intra-residue bonds come from each residue type's generic dictionary; inter-residue
/// bonds (peptide and phosphodiester) join sequence-adjacent residues of the same
/// polymer family. Neither is distance-checked. Atoms missing from a residue simply
/// contribute no bond.
pub struct ResidueLinker<'r> {
    registry: &'r ResidueRegistry,
}

impl<'r> ResidueLinker<'r> {
    pub fn new(registry: &'r ResidueRegistry) -> Self {
        Self { registry }
    }

    /// Adds each residue's dictionary bonds and returns how many were new.
    #[instrument(skip_all, name = "dictionary_bonds", fields(chain = %molecule.chain_id))]
    pub fn add_dictionary_bonds(&self, molecule: &mut Molecule) -> usize {
        let mut pairs = Vec::new();
        for index in 0..molecule.residue_count() {
            let class = molecule.residues()[index].class();
            let dictionary = self.registry.residue_type(class).generic_bonds();
            pairs.extend(named_pairs(molecule, index, index, dictionary));
        }

        let added = add_all(molecule, pairs, BondOrigin::Dictionary);
        debug!(added, "Added residue dictionary bonds.");
        added
    }

    /// Links consecutive residues as previous/next and adds their backbone bonds.
    ///
    /// Adjacency is positional: numbering gaps do not break the chain, but residues
    /// whose chain identifiers differ are never linked.
    #[instrument(skip_all, name = "residue_linking", fields(chain = %molecule.chain_id))]
    pub fn link(&self, molecule: &mut Molecule) -> usize {
        let count = molecule.residue_count();
        let mut pairs = Vec::new();
        let mut links = 0;

        for index in 1..count {
            let (previous, next) = {
                let residues = molecule.residues();
                (&residues[index - 1], &residues[index])
            };
            if previous.chain_id != next.chain_id {
                trace!(
                    previous = %previous.label(),
                    next = %next.label(),
                    "Chain boundary, residues not linked"
                );
                continue;
            }
            let dictionary = linkage_bonds(previous.class(), next.class());
            pairs.extend(named_pairs(molecule, index - 1, index, dictionary));

            let residues = molecule.residues_mut();
            residues[index - 1].next = Some(index);
            residues[index].previous = Some(index - 1);
            links += 1;
        }

        let added = add_all(molecule, pairs, BondOrigin::Linkage);
        debug!(links, added, "Linked residue sequence.");
        added
    }
}

/// Atom pairs named by `dictionary`, the first name looked up in residue `first`
/// and the second in residue `second`, within each alternate location.
fn named_pairs(
    molecule: &Molecule,
    first: usize,
    second: usize,
    dictionary: &[AtomNamePair],
) -> Vec<(AtomId, AtomId)> {
    let residues = molecule.residues();
    let (Some(r1), Some(r2)) = (residues.get(first), residues.get(second)) else {
        return Vec::new();
    };

    let mut pairs = Vec::new();
    for (name1, name2) in dictionary {
        for &a in r1.atoms_named(name1) {
            for &b in r2.atoms_named(name2) {
                let (Some(atom_a), Some(atom_b)) = (molecule.atom(a), molecule.atom(b)) else {
                    continue;
                };
                if alt_locs_compatible(atom_a, atom_b) {
                    pairs.push((a, b));
                }
            }
        }
    }
    pairs
}

fn alt_locs_compatible(a: &Atom, b: &Atom) -> bool {
    match (a.pdb_info(), b.pdb_info()) {
        (Some(ia), Some(ib)) => ia.alt_loc_compatible(ib),
        _ => true,
    }
}

fn add_all(molecule: &mut Molecule, pairs: Vec<(AtomId, AtomId)>, origin: BondOrigin) -> usize {
    pairs
        .into_iter()
        .filter(|&(a, b)| molecule.add_bond(a, b, origin) == Some(true))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::io::records::AtomRecord;
    use crate::core::models::builder::StructureBuilder;
    use crate::core::models::traits::HasBonds;
    use nalgebra::Point3;

    fn build(records: &[AtomRecord]) -> Molecule {
        let registry = ResidueRegistry::standard();
        let mut builder = StructureBuilder::new(&registry);
        builder.extend(records);
        builder.build().remove(0)
    }

    fn at(name: &str, residue: &str, number: i32, x: f64) -> AtomRecord {
        AtomRecord::new(name, residue, number, Point3::new(x, 0.0, 0.0)).with_chain('A')
    }

    fn bonded(molecule: &Molecule, r1: usize, n1: &str, r2: usize, n2: &str) -> bool {
        match (molecule.residue_atom(r1, n1), molecule.residue_atom(r2, n2)) {
            (Some((a, _)), Some((b, _))) => molecule.is_bonded(a, b),
            _ => false,
        }
    }

    #[test]
    fn dictionary_bonds_ignore_distance_and_missing_atoms() {
        let mut molecule = build(&[
            at(" N  ", "ALA", 1, 0.0),
            at(" CA ", "ALA", 1, 40.0),
            at(" C  ", "ALA", 1, 80.0),
        ]);
        let registry = ResidueRegistry::standard();
        let added = ResidueLinker::new(&registry).add_dictionary_bonds(&mut molecule);

        assert_eq!(added, 2);
        assert!(bonded(&molecule, 0, " N  ", 0, " CA "));
        assert!(bonded(&molecule, 0, " CA ", 0, " C  "));
        assert!(molecule.bonds().iter().all(|b| b.origin == BondOrigin::Dictionary));
    }

    #[test]
    fn prime_spellings_match_star_dictionary_names() {
        let mut molecule = build(&[at(" C1'", "U", 1, 0.0), at(" N1 ", "U", 1, 1.5)]);
        let registry = ResidueRegistry::standard();
        ResidueLinker::new(&registry).add_dictionary_bonds(&mut molecule);
        assert!(bonded(&molecule, 0, " C1*", 0, " N1 "));
    }

    #[test]
    fn alternate_locations_bond_only_within_their_own_set() {
        let mut molecule = build(&[
            at(" CA ", "SER", 1, 0.0),
            at(" CB ", "SER", 1, 1.5).with_alt_loc('A'),
            at(" CB ", "SER", 1, 1.6).with_alt_loc('B'),
            at(" OG ", "SER", 1, 3.0).with_alt_loc('A'),
        ]);
        let registry = ResidueRegistry::standard();
        let added = ResidueLinker::new(&registry).add_dictionary_bonds(&mut molecule);

        let residue = &molecule.residues()[0];
        let ca = residue.atom(" CA ").unwrap();
        let cbs = residue.atoms_named(" CB ");
        let og = residue.atom(" OG ").unwrap();
        // Only CB(A)-OG(A) shares a location; the blank CA is its own location.
        assert_eq!(added, 1);
        assert!(molecule.is_bonded(cbs[0], og));
        assert!(!molecule.is_bonded(cbs[1], og));
        assert!(!molecule.is_bonded(ca, cbs[0]));
        assert!(!molecule.is_bonded(ca, cbs[1]));
    }

    #[test]
    fn link_sets_neighbors_and_adds_phosphodiester_bonds() {
        let mut molecule = build(&[
            at(" O3'", "G", 1, 0.0),
            at(" P  ", "C", 2, 1.6),
            at(" O3'", "C", 2, 5.0),
            at(" P  ", "A", 7, 6.6),
        ]);
        let registry = ResidueRegistry::standard();
        let added = ResidueLinker::new(&registry).link(&mut molecule);

        assert_eq!(added, 2);
        assert_eq!(molecule.previous_residue(0), None);
        assert_eq!(molecule.next_residue(0), Some(1));
        assert_eq!(molecule.previous_residue(2), Some(1));
        assert!(bonded(&molecule, 0, " O3*", 1, " P  "));
        assert!(bonded(&molecule, 1, " O3*", 2, " P  "));
        assert!(molecule.bonds().iter().all(|b| b.origin == BondOrigin::Linkage));
    }

    #[test]
    fn mixed_families_link_without_backbone_bonds() {
        let mut molecule = build(&[at(" C  ", "ALA", 1, 0.0), at(" P  ", "G", 2, 1.5)]);
        let registry = ResidueRegistry::standard();
        let added = ResidueLinker::new(&registry).link(&mut molecule);
        assert_eq!(added, 0);
        assert_eq!(molecule.next_residue(0), Some(1));
    }

    #[test]
    fn peptide_bond_joins_amino_acids() {
        let mut molecule = build(&[at(" C  ", "GLY", 1, 0.0), at(" N  ", "PRO", 2, 1.33)]);
        let registry = ResidueRegistry::standard();
        ResidueLinker::new(&registry).link(&mut molecule);
        assert!(bonded(&molecule, 0, " C  ", 1, " N  "));
    }
}
