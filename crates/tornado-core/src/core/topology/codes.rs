use crate::core::models::residue::{AminoAcid, NucleotideBase, ResidueClass};
use phf::{Map, Set, phf_map, phf_set};

static AMINO_ACID_CODES: Map<&'static str, AminoAcid> = phf_map! {
    "ALA" => AminoAcid::Alanine,
    "GLY" => AminoAcid::Glycine,
    "ILE" => AminoAcid::Isoleucine,
    "LEU" => AminoAcid::Leucine,
    "PRO" => AminoAcid::Proline,
    "VAL" => AminoAcid::Valine,
    "PHE" => AminoAcid::Phenylalanine,
    "TRP" => AminoAcid::Tryptophan,
    "TYR" => AminoAcid::Tyrosine,
    "ASN" => AminoAcid::Asparagine,
    "CYS" => AminoAcid::Cysteine,
    "GLN" => AminoAcid::Glutamine,
    "SER" => AminoAcid::Serine,
    "THR" => AminoAcid::Threonine,
    "MET" => AminoAcid::Methionine,
    "ARG" => AminoAcid::Arginine,
    "HIS" => AminoAcid::Histidine,
    "LYS" => AminoAcid::Lysine,
    "ASP" => AminoAcid::AsparticAcid,
    "GLU" => AminoAcid::GlutamicAcid,
};

static NUCLEOTIDE_CODES: Map<&'static str, NucleotideBase> = phf_map! {
    // --- Canonical one-letter codes ---
    "A" => NucleotideBase::Adenine,
    "C" => NucleotideBase::Cytosine,
    "G" => NucleotideBase::Guanine,
    "I" => NucleotideBase::Inosine,
    "T" => NucleotideBase::Thymine,
    "U" => NucleotideBase::Uracil,

    // --- Deoxy codes ---
    "DA" => NucleotideBase::Adenine,
    "DC" => NucleotideBase::Cytosine,
    "DG" => NucleotideBase::Guanine,
    "DI" => NucleotideBase::Inosine,
    "DT" => NucleotideBase::Thymine,
    "DU" => NucleotideBase::Uracil,

    // --- Modified, mapped to parent base ---
    "+A" => NucleotideBase::Adenine,
    "1MA" => NucleotideBase::Adenine,
    "+C" => NucleotideBase::Cytosine,
    "5MC" => NucleotideBase::Cytosine,
    "OMC" => NucleotideBase::Cytosine,
    "DOC" => NucleotideBase::Cytosine,
    "+G" => NucleotideBase::Guanine,
    "2MG" => NucleotideBase::Guanine,
    "7MG" => NucleotideBase::Guanine,
    "M2G" => NucleotideBase::Guanine,
    "YG" => NucleotideBase::Guanine,
    "OMG" => NucleotideBase::Guanine,
    "+I" => NucleotideBase::Inosine,
    "+T" => NucleotideBase::Thymine,
    "+U" => NucleotideBase::Uracil,
    "PSU" => NucleotideBase::Uracil,
    "H2U" => NucleotideBase::Uracil,
    "5MU" => NucleotideBase::Uracil,
    "4SU" => NucleotideBase::Uracil,
};

static SOLVENT_CODES: Set<&'static str> = phf_set! {
    "HOH", "WAT", "H2O", "SOL", "TIP", "DOD", "D2O",
    "SO4", "SUL", "PO4",
};

/// Hetero groups commonly found in structures that are not worth a warning.
static KNOWN_HETERO_CODES: Set<&'static str> = phf_set! {
    "BRO", "HOH", "MG", "MO3", "NA", "ZN",
};

/// Canonical form of a residue code: trimmed and upper-cased.
pub fn normalize_code(code: &str) -> String {
    code.trim().to_ascii_uppercase()
}

pub fn amino_acid_for_code(code: &str) -> Option<AminoAcid> {
    AMINO_ACID_CODES.get(normalize_code(code).as_str()).copied()
}

pub fn nucleotide_for_code(code: &str) -> Option<NucleotideBase> {
    NUCLEOTIDE_CODES.get(normalize_code(code).as_str()).copied()
}

pub fn is_amino_acid_code(code: &str) -> bool {
    amino_acid_for_code(code).is_some()
}

pub fn is_nucleotide_code(code: &str) -> bool {
    nucleotide_for_code(code).is_some()
}

pub fn is_solvent_code(code: &str) -> bool {
    SOLVENT_CODES.contains(normalize_code(code).as_str())
}

pub fn is_dna_code(code: &str) -> bool {
    nucleotide_for_code(code).is_some_and(NucleotideBase::occurs_in_dna)
}

pub fn is_rna_code(code: &str) -> bool {
    nucleotide_for_code(code).is_some_and(NucleotideBase::occurs_in_rna)
}

pub fn is_known_hetero_code(code: &str) -> bool {
    KNOWN_HETERO_CODES.contains(normalize_code(code).as_str())
}

/// Classifies a residue code against the static tables.
///
/// Tables are consulted in the order amino acid, nucleotide, solvent; `"UNK"` and
/// anything unmatched is [`ResidueClass::Unknown`].
pub fn classify_code(code: &str) -> ResidueClass {
    if let Some(aa) = amino_acid_for_code(code) {
        ResidueClass::AminoAcid(aa)
    } else if let Some(base) = nucleotide_for_code(code) {
        ResidueClass::Nucleotide(base)
    } else if is_solvent_code(code) {
        ResidueClass::Solvent
    } else {
        ResidueClass::Unknown
    }
}

pub(crate) fn standard_amino_acid_codes() -> impl Iterator<Item = (&'static str, AminoAcid)> {
    AMINO_ACID_CODES.entries().map(|(k, v)| (*k, *v))
}

pub(crate) fn standard_nucleotide_codes() -> impl Iterator<Item = (&'static str, NucleotideBase)> {
    NUCLEOTIDE_CODES.entries().map(|(k, v)| (*k, *v))
}

pub(crate) fn standard_solvent_codes() -> impl Iterator<Item = &'static str> {
    SOLVENT_CODES.iter().copied()
}
