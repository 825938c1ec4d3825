use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Broad classification of a molecule, decided after its residues are assembled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MoleculeKind {
    Protein,
    Dna,
    Rna,
    /// Nucleic acid whose DNA/RNA identity could not be decided.
    NucleicAcid,
    /// Polymer of residues that are neither amino acids nor nucleotides.
    Biopolymer,
    Solvent,
    #[default]
    Other,
}

impl MoleculeKind {
    pub fn is_nucleic_acid(&self) -> bool {
        matches!(self, Self::Dna | Self::Rna | Self::NucleicAcid)
    }

    pub fn is_polymer(&self) -> bool {
        matches!(
            self,
            Self::Protein | Self::Dna | Self::Rna | Self::NucleicAcid | Self::Biopolymer
        )
    }
}

#[derive(Debug, Error)]
#[error("Invalid molecule kind string")]
pub struct ParseMoleculeKindError;

impl FromStr for MoleculeKind {
    type Err = ParseMoleculeKindError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "protein" => Ok(Self::Protein),
            "dna" => Ok(Self::Dna),
            "rna" => Ok(Self::Rna),
            "nucleic-acid" | "nucleic_acid" | "nucleicacid" => Ok(Self::NucleicAcid),
            "biopolymer" => Ok(Self::Biopolymer),
            "solvent" | "water" => Ok(Self::Solvent),
            "other" => Ok(Self::Other),
            _ => Err(ParseMoleculeKindError),
        }
    }
}

impl fmt::Display for MoleculeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::Protein => "Protein",
                Self::Dna => "DNA",
                Self::Rna => "RNA",
                Self::NucleicAcid => "Nucleic Acid",
                Self::Biopolymer => "Biopolymer",
                Self::Solvent => "Solvent",
                Self::Other => "Other",
            }
        )
    }
}
