use super::ids::AtomId;
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AminoAcid {
    // --- Aliphatic, Nonpolar ---
    Alanine,    // ALA
    Glycine,    // GLY
    Isoleucine, // ILE
    Leucine,    // LEU
    Proline,    // PRO
    Valine,     // VAL

    // --- Aromatic ---
    Phenylalanine, // PHE
    Tryptophan,    // TRP
    Tyrosine,      // TYR

    // --- Polar, Uncharged ---
    Asparagine, // ASN
    Cysteine,   // CYS
    Glutamine,  // GLN
    Serine,     // SER
    Threonine,  // THR
    Methionine, // MET

    // --- Positively Charged (Basic) ---
    Arginine,  // ARG
    Histidine, // HIS
    Lysine,    // LYS

    // --- Negatively Charged (Acidic) ---
    AsparticAcid, // ASP
    GlutamicAcid, // GLU
}

impl AminoAcid {
    pub const ALL: [AminoAcid; 20] = [
        Self::Alanine,
        Self::Glycine,
        Self::Isoleucine,
        Self::Leucine,
        Self::Proline,
        Self::Valine,
        Self::Phenylalanine,
        Self::Tryptophan,
        Self::Tyrosine,
        Self::Asparagine,
        Self::Cysteine,
        Self::Glutamine,
        Self::Serine,
        Self::Threonine,
        Self::Methionine,
        Self::Arginine,
        Self::Histidine,
        Self::Lysine,
        Self::AsparticAcid,
        Self::GlutamicAcid,
    ];

    pub fn three_letter_code(self) -> &'static str {
        match self {
            Self::Alanine => "ALA",
            Self::Glycine => "GLY",
            Self::Isoleucine => "ILE",
            Self::Leucine => "LEU",
            Self::Proline => "PRO",
            Self::Valine => "VAL",
            Self::Phenylalanine => "PHE",
            Self::Tryptophan => "TRP",
            Self::Tyrosine => "TYR",
            Self::Asparagine => "ASN",
            Self::Cysteine => "CYS",
            Self::Glutamine => "GLN",
            Self::Serine => "SER",
            Self::Threonine => "THR",
            Self::Methionine => "MET",
            Self::Arginine => "ARG",
            Self::Histidine => "HIS",
            Self::Lysine => "LYS",
            Self::AsparticAcid => "ASP",
            Self::GlutamicAcid => "GLU",
        }
    }

    pub fn one_letter_code(self) -> char {
        match self {
            Self::Alanine => 'A',
            Self::Glycine => 'G',
            Self::Isoleucine => 'I',
            Self::Leucine => 'L',
            Self::Proline => 'P',
            Self::Valine => 'V',
            Self::Phenylalanine => 'F',
            Self::Tryptophan => 'W',
            Self::Tyrosine => 'Y',
            Self::Asparagine => 'N',
            Self::Cysteine => 'C',
            Self::Glutamine => 'Q',
            Self::Serine => 'S',
            Self::Threonine => 'T',
            Self::Methionine => 'M',
            Self::Arginine => 'R',
            Self::Histidine => 'H',
            Self::Lysine => 'K',
            Self::AsparticAcid => 'D',
            Self::GlutamicAcid => 'E',
        }
    }

    pub fn full_name(self) -> &'static str {
        match self {
            Self::Alanine => "Alanine",
            Self::Glycine => "Glycine",
            Self::Isoleucine => "Isoleucine",
            Self::Leucine => "Leucine",
            Self::Proline => "Proline",
            Self::Valine => "Valine",
            Self::Phenylalanine => "Phenylalanine",
            Self::Tryptophan => "Tryptophan",
            Self::Tyrosine => "Tyrosine",
            Self::Asparagine => "Asparagine",
            Self::Cysteine => "Cysteine",
            Self::Glutamine => "Glutamine",
            Self::Serine => "Serine",
            Self::Threonine => "Threonine",
            Self::Methionine => "Methionine",
            Self::Arginine => "Arginine",
            Self::Histidine => "Histidine",
            Self::Lysine => "Lysine",
            Self::AsparticAcid => "Aspartic Acid",
            Self::GlutamicAcid => "Glutamic Acid",
        }
    }
}

/// Parent base of a nucleotide. Modified nucleotides map to their unmodified parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NucleotideBase {
    Adenine,
    Cytosine,
    Guanine,
    Inosine,
    Thymine,
    Uracil,
}

impl NucleotideBase {
    pub const ALL: [NucleotideBase; 6] = [
        Self::Adenine,
        Self::Cytosine,
        Self::Guanine,
        Self::Inosine,
        Self::Thymine,
        Self::Uracil,
    ];

    pub fn one_letter_code(self) -> char {
        match self {
            Self::Adenine => 'A',
            Self::Cytosine => 'C',
            Self::Guanine => 'G',
            Self::Inosine => 'I',
            Self::Thymine => 'T',
            Self::Uracil => 'U',
        }
    }

    pub fn full_name(self) -> &'static str {
        match self {
            Self::Adenine => "Adenylate",
            Self::Cytosine => "Cytidylate",
            Self::Guanine => "Guanylate",
            Self::Inosine => "Inosinate",
            Self::Thymine => "Thymidylate",
            Self::Uracil => "Uridylate",
        }
    }

    pub fn is_purine(self) -> bool {
        matches!(self, Self::Adenine | Self::Guanine | Self::Inosine)
    }

    pub fn is_pyrimidine(self) -> bool {
        !self.is_purine()
    }

    pub fn occurs_in_dna(self) -> bool {
        matches!(
            self,
            Self::Adenine | Self::Cytosine | Self::Guanine | Self::Thymine
        )
    }

    pub fn occurs_in_rna(self) -> bool {
        matches!(
            self,
            Self::Adenine | Self::Cytosine | Self::Guanine | Self::Uracil
        )
    }
}

/// Semantic classification of a residue, resolved once from its code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ResidueClass {
    AminoAcid(AminoAcid),
    Nucleotide(NucleotideBase),
    Solvent,
    #[default]
    Unknown,
}

impl ResidueClass {
    pub fn is_amino_acid(&self) -> bool {
        matches!(self, Self::AminoAcid(_))
    }

    pub fn is_nucleotide(&self) -> bool {
        matches!(self, Self::Nucleotide(_))
    }

    pub fn is_solvent(&self) -> bool {
        matches!(self, Self::Solvent)
    }

    pub fn nucleotide_base(&self) -> Option<NucleotideBase> {
        match self {
            Self::Nucleotide(base) => Some(*base),
            _ => None,
        }
    }

    /// One-letter code used in sequence strings; `'X'` for anything without one.
    pub fn one_letter_code(&self) -> char {
        match self {
            Self::AminoAcid(aa) => aa.one_letter_code(),
            Self::Nucleotide(base) => base.one_letter_code(),
            Self::Solvent | Self::Unknown => 'X',
        }
    }
}

impl fmt::Display for ResidueClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AminoAcid(aa) => write!(f, "{}", aa.full_name()),
            Self::Nucleotide(base) => write!(f, "{}", base.full_name()),
            Self::Solvent => f.write_str("Solvent"),
            Self::Unknown => f.write_str("Unknown"),
        }
    }
}

/// Rewrites modern prime notation (`C1'`) to the legacy star notation (`C1*`)
/// used by the residue bond dictionaries.
pub fn normalize_atom_name(name: &str) -> String {
    name.replace('\'', "*")
}

/// A residue within a molecule.
///
/// Atoms are referenced by [`AtomId`]; the atoms themselves live in the parent
/// molecule. Sequence neighbors are stored as indices into the molecule's residue
/// list and are only set by residue linking.
#[derive(Debug, Clone, PartialEq)]
pub struct Residue {
    /// Residue sequence number from the source.
    pub number: i32,
    /// Insertion code (' ' when absent).
    pub insertion_code: char,
    /// Chain identifier (' ' when absent).
    pub chain_id: char,
    /// Residue code as written, trimmed (e.g., "ALA", "A", "PSU").
    pub name: String,
    class: ResidueClass,
    pub(crate) atoms: Vec<AtomId>,
    atom_name_map: HashMap<String, Vec<AtomId>>,
    pub(crate) previous: Option<usize>,
    pub(crate) next: Option<usize>,
}

impl Residue {
    pub(crate) fn new(
        number: i32,
        insertion_code: char,
        chain_id: char,
        name: &str,
        class: ResidueClass,
    ) -> Self {
        Self {
            number,
            insertion_code,
            chain_id,
            name: name.trim().to_string(),
            class,
            atoms: Vec::new(),
            atom_name_map: HashMap::new(),
            previous: None,
            next: None,
        }
    }

    /// Registers an atom under its raw, trimmed and prime-normalized names.
    pub(crate) fn add_atom(&mut self, atom_name: &str, atom_id: AtomId) {
        self.atoms.push(atom_id);

        let normalized = normalize_atom_name(atom_name);
        let mut keys = vec![
            atom_name.to_string(),
            atom_name.trim().to_string(),
            normalized.trim().to_string(),
            normalized,
        ];
        keys.sort();
        keys.dedup();
        for key in keys {
            self.atom_name_map.entry(key).or_default().push(atom_id);
        }
    }

    pub fn class(&self) -> ResidueClass {
        self.class
    }

    pub fn atoms(&self) -> &[AtomId] {
        &self.atoms
    }

    /// First atom registered under `name`. Both `" C1'"` and `" C1*"` spellings resolve.
    pub fn atom(&self, name: &str) -> Option<AtomId> {
        self.atoms_named(name).first().copied()
    }

    /// All atoms registered under `name`, one per alternate location.
    pub fn atoms_named(&self, name: &str) -> &[AtomId] {
        self.atom_name_map
            .get(name)
            .or_else(|| self.atom_name_map.get(&normalize_atom_name(name)))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn previous(&self) -> Option<usize> {
        self.previous
    }

    pub fn next(&self) -> Option<usize> {
        self.next
    }

    /// Sort key used for canonical ordering: number first, then insertion code.
    pub fn sequence_key(&self) -> (i32, char) {
        (self.number, self.insertion_code)
    }

    /// Short human-readable label such as `G12` or `A7B`.
    pub fn label(&self) -> String {
        let mut label = format!("{}{}", self.class.one_letter_code(), self.number);
        if self.insertion_code != ' ' {
            label.push(self.insertion_code);
        }
        label
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::KeyData;

    fn dummy_atom_id(n: u64) -> AtomId {
        AtomId::from(KeyData::from_ffi(n))
    }

    #[test]
    fn new_residue_initializes_fields_correctly() {
        let residue = Residue::new(
            10,
            ' ',
            'A',
            " GLY ",
            ResidueClass::AminoAcid(AminoAcid::Glycine),
        );
        assert_eq!(residue.number, 10);
        assert_eq!(residue.name, "GLY");
        assert_eq!(residue.chain_id, 'A');
        assert!(residue.atoms().is_empty());
        assert!(residue.atom(" CA ").is_none());
        assert!(residue.previous().is_none());
        assert!(residue.next().is_none());
    }

    #[test]
    fn atoms_resolve_by_raw_trimmed_and_prime_normalized_names() {
        let mut residue = Residue::new(
            1,
            ' ',
            'A',
            "G",
            ResidueClass::Nucleotide(NucleotideBase::Guanine),
        );
        let c1 = dummy_atom_id(1);
        residue.add_atom(" C1'", c1);

        assert_eq!(residue.atom(" C1'"), Some(c1));
        assert_eq!(residue.atom(" C1*"), Some(c1));
        assert_eq!(residue.atom("C1*"), Some(c1));
        assert_eq!(residue.atom("C1'"), Some(c1));
        assert_eq!(residue.atoms(), &[c1]);
    }

    #[test]
    fn alternate_locations_share_a_name() {
        let mut residue = Residue::new(
            3,
            ' ',
            'A',
            "SER",
            ResidueClass::AminoAcid(AminoAcid::Serine),
        );
        let og_a = dummy_atom_id(1);
        let og_b = dummy_atom_id(2);
        residue.add_atom(" OG ", og_a);
        residue.add_atom(" OG ", og_b);

        assert_eq!(residue.atom(" OG "), Some(og_a));
        assert_eq!(residue.atoms_named(" OG "), &[og_a, og_b]);
        assert_eq!(residue.atoms().len(), 2);
    }

    #[test]
    fn label_includes_insertion_code_when_present() {
        let plain = Residue::new(
            7,
            ' ',
            'A',
            "A",
            ResidueClass::Nucleotide(NucleotideBase::Adenine),
        );
        let inserted = Residue::new(
            7,
            'B',
            'A',
            "A",
            ResidueClass::Nucleotide(NucleotideBase::Adenine),
        );
        assert_eq!(plain.label(), "A7");
        assert_eq!(inserted.label(), "A7B");
        assert!(plain.sequence_key() < inserted.sequence_key());
    }

    #[test]
    fn nucleotide_bases_partition_into_purines_and_pyrimidines() {
        let purines: Vec<_> = NucleotideBase::ALL
            .iter()
            .filter(|b| b.is_purine())
            .map(|b| b.one_letter_code())
            .collect();
        assert_eq!(purines, vec!['A', 'G', 'I']);
        assert!(NucleotideBase::Thymine.occurs_in_dna());
        assert!(!NucleotideBase::Thymine.occurs_in_rna());
        assert!(NucleotideBase::Uracil.occurs_in_rna());
    }

    #[test]
    fn amino_acid_codes_are_unique() {
        let mut codes: Vec<_> = AminoAcid::ALL.iter().map(|a| a.three_letter_code()).collect();
        codes.sort();
        codes.dedup();
        assert_eq!(codes.len(), 20);
    }
}
