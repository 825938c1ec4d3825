use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SecondaryStructureKind {
    Helix,
    Strand,
    /// A base-paired double-helical region of a nucleic acid.
    Duplex,
}

impl fmt::Display for SecondaryStructureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::Helix => "Helix",
                Self::Strand => "Strand",
                Self::Duplex => "Duplex",
            }
        )
    }
}

/// A secondary-structure annotation over residues of one molecule.
#[derive(Debug, Clone, PartialEq)]
pub struct SecondaryStructure {
    pub kind: SecondaryStructureKind,
    /// Residue indices into the owning molecule, in the order they were added.
    pub residues: Vec<usize>,
    /// Where the annotation came from (e.g., "base-pair detection", "HELIX record").
    pub source: String,
}

impl SecondaryStructure {
    pub fn new(kind: SecondaryStructureKind, source: &str) -> Self {
        Self {
            kind,
            residues: Vec::new(),
            source: source.to_string(),
        }
    }

    pub fn add_residue(&mut self, index: usize) {
        if !self.residues.contains(&index) {
            self.residues.push(index);
        }
    }

    pub fn contains(&self, index: usize) -> bool {
        self.residues.contains(&index)
    }
}
