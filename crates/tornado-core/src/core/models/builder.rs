use super::kind::MoleculeKind;
use super::molecule::Molecule;
use super::residue::ResidueClass;
use super::traits::{HasAtoms, HasResidueSequence};
use crate::core::io::records::AtomRecord;
use crate::core::topology::codes::is_known_hetero_code;
use crate::core::topology::registry::ResidueRegistry;
use tracing::debug;

/// Ribose atom names looked up when deciding between DNA and RNA.
const RIBOSE_C2_NAME: &str = " C2*";
const RIBOSE_O2_NAME: &str = " O2*";

/// Small all-H/O molecules at or below this size are treated as solvent.
const MAX_SOLVENT_ATOMS: usize = 10;

/// Splits an atom-record stream into molecules.
///
/// Records are consumed in file order. A new molecule starts when the chain
/// identifier changes, or when the previous residue was solvent and the residue
/// key changes (so every water becomes its own molecule). A new residue starts
/// whenever the `(number, insertion code)` key changes.
pub struct StructureBuilder<'r> {
    registry: &'r ResidueRegistry,
    molecules: Vec<Molecule>,
    current: Option<Molecule>,
    current_residue: Option<usize>,
}

impl<'r> StructureBuilder<'r> {
    pub fn new(registry: &'r ResidueRegistry) -> Self {
        Self {
            registry,
            molecules: Vec::new(),
            current: None,
            current_residue: None,
        }
    }

    pub fn push(&mut self, record: &AtomRecord) -> &mut Self {
        let chain_id = record.chain();
        let key = (record.residue_number, record.insertion());

        let starts_molecule = match &self.current {
            None => true,
            Some(molecule) if molecule.chain_id != chain_id => true,
            Some(molecule) => self
                .current_residue
                .and_then(|idx| molecule.residue(idx))
                .is_some_and(|res| res.class().is_solvent() && res.sequence_key() != key),
        };
        if starts_molecule {
            self.finish_current();
            self.current = Some(Molecule::new(chain_id));
        }

        let Some(molecule) = self.current.as_mut() else {
            return self;
        };

        let same_residue = self
            .current_residue
            .and_then(|idx| molecule.residue(idx))
            .is_some_and(|res| res.sequence_key() == key);
        if !same_residue {
            let index = match molecule.residue_by_key(key.0, key.1) {
                Some(existing) => existing,
                None => {
                    let class = self.registry.classify(&record.residue_name);
                    if class == ResidueClass::Unknown
                        && !is_known_hetero_code(&record.residue_name)
                    {
                        debug!(
                            residue = record.residue_name.trim(),
                            number = record.residue_number,
                            chain = %chain_id,
                            "Unrecognized residue code"
                        );
                    }
                    match molecule.add_residue(key.0, key.1, &record.residue_name, class) {
                        Some(index) => index,
                        None => return self,
                    }
                }
            };
            self.current_residue = Some(index);
        }

        if let Some(index) = self.current_residue {
            molecule.add_atom_to_residue(index, record.to_atom());
        }
        self
    }

    pub fn extend<'a>(&mut self, records: impl IntoIterator<Item = &'a AtomRecord>) -> &mut Self {
        for record in records {
            self.push(record);
        }
        self
    }

    /// Finishes assembly and assigns each molecule its [`MoleculeKind`].
    pub fn build(mut self) -> Vec<Molecule> {
        self.finish_current();
        self.molecules
    }

    fn finish_current(&mut self) {
        if let Some(mut molecule) = self.current.take() {
            let kind = determine_kind(&molecule);
            debug!(chain = %molecule.chain_id, %kind, residues = molecule.residue_count(), "Assembled molecule");
            molecule.set_kind(kind);
            self.molecules.push(molecule);
        }
        self.current_residue = None;
    }
}

/// Classifies an assembled molecule from its residue content.
pub fn determine_kind(molecule: &Molecule) -> MoleculeKind {
    let residues = molecule.residues();
    let protein = residues.iter().filter(|r| r.class().is_amino_acid()).count();
    let nucleotides: Vec<usize> = residues
        .iter()
        .enumerate()
        .filter(|(_, r)| r.class().is_nucleotide())
        .map(|(i, _)| i)
        .collect();

    if protein >= 1 && protein >= nucleotides.len() {
        return MoleculeKind::Protein;
    }

    if !nucleotides.is_empty() {
        return nucleic_acid_kind(molecule, &nucleotides);
    }

    let non_solvent = residues.iter().filter(|r| !r.class().is_solvent()).count();
    if non_solvent > 2 {
        return MoleculeKind::Biopolymer;
    }

    let small_water_like = molecule.atom_count() <= MAX_SOLVENT_ATOMS
        && molecule
            .atoms()
            .all(|(_, atom)| matches!(atom.element().symbol, "H" | "O"));
    let all_solvent = !residues.is_empty() && residues.iter().all(|r| r.class().is_solvent());
    if molecule.atom_count() > 0 && (small_water_like || all_solvent) {
        return MoleculeKind::Solvent;
    }

    MoleculeKind::Other
}

fn nucleic_acid_kind(molecule: &Molecule, nucleotides: &[usize]) -> MoleculeKind {
    let with_c2 = nucleotides
        .iter()
        .filter(|&&i| molecule.residue_atom(i, RIBOSE_C2_NAME).is_some())
        .count();
    let with_o2 = nucleotides
        .iter()
        .filter(|&&i| molecule.residue_atom(i, RIBOSE_O2_NAME).is_some())
        .count();

    let has_ribose = with_c2 > 1 && with_c2 as f64 / nucleotides.len() as f64 > 0.2;
    if has_ribose {
        return if with_o2 as f64 / with_c2 as f64 > 0.5 {
            MoleculeKind::Rna
        } else {
            MoleculeKind::Dna
        };
    }

    let residues = molecule.residues();
    let bases = nucleotides
        .iter()
        .filter_map(|&i| residues[i].class().nucleotide_base());
    let (dna, rna) = bases.fold((0usize, 0usize), |(dna, rna), base| {
        (
            dna + usize::from(base.occurs_in_dna()),
            rna + usize::from(base.occurs_in_rna()),
        )
    });
    match dna.cmp(&rna) {
        std::cmp::Ordering::Greater => MoleculeKind::Dna,
        std::cmp::Ordering::Less => MoleculeKind::Rna,
        std::cmp::Ordering::Equal => MoleculeKind::NucleicAcid,
    }
}
