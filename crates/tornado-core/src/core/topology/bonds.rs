//! Generic bond dictionaries: atom-name pairs expected to be covalently bonded.
//!
//! Names are fixed-width PDB atom names. Sugar atoms use the legacy `*` prime
//! notation; residues resolve `'` spellings to the same atoms.

use crate::core::models::residue::{AminoAcid, NucleotideBase, ResidueClass};

pub type AtomNamePair = (&'static str, &'static str);

pub const AMINO_ACID_BACKBONE_BONDS: &[AtomNamePair] = &[
    (" N  ", " CA "),
    (" CA ", " C  "),
    (" C  ", " O  "),
    (" C  ", " OXT"),
    (" CA ", " CB "),
];

/// Side-chain bonds shared by every amino acid; pairs naming atoms a residue lacks are skipped.
pub const AMINO_ACID_SIDE_CHAIN_BONDS: &[AtomNamePair] = &[
    (" CB ", " CG "),
    (" CB ", " CG1"),
    (" CB ", " CG2"),
    (" CB ", " OG "),
    (" CB ", " OG1"),
    (" CB ", " SG "),
    (" CG ", " CD "),
    (" CG ", " CD1"),
    (" CG ", " CD2"),
    (" CG1", " CD1"),
    (" CG ", " OD "),
    (" CG ", " OD1"),
    (" CG ", " OD2"),
    (" CG ", " ND "),
    (" CG ", " ND1"),
    (" CG ", " ND2"),
    (" CG ", " SD "),
    (" CD ", " CE "),
    (" CD ", " OE "),
    (" CD ", " OE1"),
    (" CD ", " OE2"),
    (" CD ", " NE "),
    (" CD ", " NE2"),
    (" CD1", " CE1"),
    (" CD2", " CE2"),
    (" CD2", " NE2"),
    (" ND1", " CE1"),
    (" NE2", " CE1"),
    (" SD ", " CE "),
    (" CE ", " NZ "),
    (" CE1", " CZ "),
    (" CE2", " CZ "),
    (" NE ", " CZ "),
    (" CZ ", " OH "),
    (" CZ ", " NH1"),
    (" CZ ", " NH2"),
];

pub const PROLINE_RING_BONDS: &[AtomNamePair] = &[(" CD ", " N  ")];

pub const TRYPTOPHAN_RING_BONDS: &[AtomNamePair] = &[
    (" CD1", " NE1"),
    (" NE1", " CE2"),
    (" CD2", " CE3"),
    (" CE3", " CZ3"),
    (" CZ3", " CH2"),
    (" CH2", " CZ2"),
    (" CZ2", " CE2"),
];

pub const NUCLEOTIDE_SUGAR_PHOSPHATE_BONDS: &[AtomNamePair] = &[
    (" C1*", " C2*"),
    (" C2*", " C3*"),
    (" C3*", " C4*"),
    (" C4*", " C5*"),
    (" C1*", " O4*"),
    (" C2*", " O2*"),
    (" C3*", " O3*"),
    (" C4*", " O4*"),
    (" C5*", " O5*"),
    (" O5*", " P  "),
    (" O1P", " P  "),
    (" O2P", " P  "),
    (" OP1", " P  "),
    (" OP2", " P  "),
];

/// Ring and exocyclic bonds of the nitrogenous base; purine-only pairs are skipped
/// for pyrimidines because the atoms are absent.
pub const NUCLEOTIDE_BASE_BONDS: &[AtomNamePair] = &[
    (" N1 ", " C2 "),
    (" C2 ", " N3 "),
    (" N3 ", " C4 "),
    (" C4 ", " C5 "),
    (" C5 ", " C6 "),
    (" C6 ", " N1 "),
    (" C5 ", " N7 "),
    (" N7 ", " C8 "),
    (" C8 ", " N9 "),
    (" N9 ", " C4 "),
    (" C2 ", " O2 "),
    (" C2 ", " N2 "),
    (" C4 ", " N4 "),
    (" C4 ", " O4 "),
    (" C6 ", " N6 "),
    (" C6 ", " O6 "),
];

pub const PURINE_GLYCOSIDIC_BONDS: &[AtomNamePair] = &[(" C1*", " N9 ")];

pub const PYRIMIDINE_GLYCOSIDIC_BONDS: &[AtomNamePair] = &[(" C1*", " N1 ")];

pub const THYMINE_METHYL_BONDS: &[AtomNamePair] = &[(" C5 ", " C7 "), (" C5 ", " C5M")];

/// Peptide bond: carbonyl carbon of the previous residue to amide nitrogen of the next.
pub const PEPTIDE_LINKAGE: &[AtomNamePair] = &[(" C  ", " N  ")];

/// Phosphodiester bond: 3' oxygen of the previous nucleotide to phosphorus of the next.
pub const PHOSPHODIESTER_LINKAGE: &[AtomNamePair] = &[(" O3*", " P  ")];

/// Full intra-residue dictionary for a residue class.
pub fn intra_residue_bonds(class: ResidueClass) -> Vec<AtomNamePair> {
    let mut bonds = Vec::new();
    match class {
        ResidueClass::AminoAcid(aa) => {
            bonds.extend_from_slice(AMINO_ACID_BACKBONE_BONDS);
            bonds.extend_from_slice(AMINO_ACID_SIDE_CHAIN_BONDS);
            match aa {
                AminoAcid::Proline => bonds.extend_from_slice(PROLINE_RING_BONDS),
                AminoAcid::Tryptophan => bonds.extend_from_slice(TRYPTOPHAN_RING_BONDS),
                _ => {}
            }
        }
        ResidueClass::Nucleotide(base) => {
            bonds.extend_from_slice(NUCLEOTIDE_SUGAR_PHOSPHATE_BONDS);
            bonds.extend_from_slice(NUCLEOTIDE_BASE_BONDS);
            if base.is_purine() {
                bonds.extend_from_slice(PURINE_GLYCOSIDIC_BONDS);
            } else {
                bonds.extend_from_slice(PYRIMIDINE_GLYCOSIDIC_BONDS);
            }
            if base == NucleotideBase::Thymine {
                bonds.extend_from_slice(THYMINE_METHYL_BONDS);
            }
        }
        ResidueClass::Solvent | ResidueClass::Unknown => {}
    }
    bonds
}

/// Inter-residue dictionary for two sequence-adjacent residues, or empty when the
/// residues are not of the same polymer family.
pub fn linkage_bonds(previous: ResidueClass, next: ResidueClass) -> &'static [AtomNamePair] {
    match (previous, next) {
        (ResidueClass::AminoAcid(_), ResidueClass::AminoAcid(_)) => PEPTIDE_LINKAGE,
        (ResidueClass::Nucleotide(_), ResidueClass::Nucleotide(_)) => PHOSPHODIESTER_LINKAGE,
        _ => &[],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn proline_closes_its_ring() {
        let pro = intra_residue_bonds(ResidueClass::AminoAcid(AminoAcid::Proline));
        assert!(pro.contains(&(" CD ", " N  ")));
        let ala = intra_residue_bonds(ResidueClass::AminoAcid(AminoAcid::Alanine));
        assert!(!ala.contains(&(" CD ", " N  ")));
        assert!(ala.contains(&(" N  ", " CA ")));
    }

    #[test]
    fn glycosidic_bond_depends_on_base_family() {
        let g = intra_residue_bonds(ResidueClass::Nucleotide(NucleotideBase::Guanine));
        let u = intra_residue_bonds(ResidueClass::Nucleotide(NucleotideBase::Uracil));
        assert!(g.contains(&(" C1*", " N9 ")) && !g.contains(&(" C1*", " N1 ")));
        assert!(u.contains(&(" C1*", " N1 ")) && !u.contains(&(" C1*", " N9 ")));
    }

    #[test]
    fn only_thymine_gets_the_methyl_bond() {
        let t = intra_residue_bonds(ResidueClass::Nucleotide(NucleotideBase::Thymine));
        let c = intra_residue_bonds(ResidueClass::Nucleotide(NucleotideBase::Cytosine));
        assert!(t.contains(&(" C5 ", " C7 ")));
        assert!(!c.contains(&(" C5 ", " C7 ")));
    }

    #[test]
    fn solvent_and_unknown_have_no_dictionary() {
        assert!(intra_residue_bonds(ResidueClass::Solvent).is_empty());
        assert!(intra_residue_bonds(ResidueClass::Unknown).is_empty());
    }

    #[test]
    fn linkage_requires_matching_families() {
        let a = ResidueClass::Nucleotide(NucleotideBase::Adenine);
        let ala = ResidueClass::AminoAcid(AminoAcid::Alanine);
        assert_eq!(linkage_bonds(a, a), PHOSPHODIESTER_LINKAGE);
        assert_eq!(linkage_bonds(ala, ala), PEPTIDE_LINKAGE);
        assert!(linkage_bonds(a, ala).is_empty());
        assert!(linkage_bonds(ResidueClass::Solvent, ResidueClass::Solvent).is_empty());
    }
}
