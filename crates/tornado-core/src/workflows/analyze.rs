use crate::analysis::base_pairs::{BasePair, BasePairDetector};
use crate::analysis::bonds::BondInferenceEngine;
use crate::analysis::config::AnalysisConfig;
use crate::analysis::duplex::{Duplex, DuplexClusterer};
use crate::analysis::error::AnalysisError;
use crate::analysis::helix::{DuplexGeometry, DuplexGeometryEstimator};
use crate::analysis::linkage::ResidueLinker;
use crate::analysis::progress::{Progress, ProgressReporter};
use crate::core::io::records::AtomRecord;
use crate::core::models::builder::StructureBuilder;
use crate::core::models::molecule::Molecule;
use crate::core::models::traits::{HasAtoms, HasBonds, HasResidueSequence};
use crate::core::topology::registry::ResidueRegistry;
use tracing::{debug, info, instrument};

/// A detected duplex and, when it could be estimated, its helix geometry.
#[derive(Debug, Clone)]
pub struct DuplexReport {
    pub duplex: Duplex,
    pub geometry: Option<DuplexGeometry>,
}

/// One analyzed molecule together with everything found in it.
#[derive(Debug, Clone)]
pub struct MoleculeAnalysis {
    pub molecule: Molecule,
    pub dictionary_bonds: usize,
    pub linkage_bonds: usize,
    pub distance_bonds: usize,
    pub base_pairs: Vec<BasePair>,
    pub duplexes: Vec<DuplexReport>,
}

#[derive(Debug, Clone, Default)]
pub struct StructureAnalysis {
    pub molecules: Vec<MoleculeAnalysis>,
}

impl StructureAnalysis {
    pub fn atom_count(&self) -> usize {
        self.molecules.iter().map(|m| m.molecule.atom_count()).sum()
    }

    pub fn bond_count(&self) -> usize {
        self.molecules.iter().map(|m| m.molecule.bond_count()).sum()
    }

    pub fn base_pair_count(&self) -> usize {
        self.molecules.iter().map(|m| m.base_pairs.len()).sum()
    }

    pub fn duplex_count(&self) -> usize {
        self.molecules.iter().map(|m| m.duplexes.len()).sum()
    }
}

/// Assembles `records` into molecules and runs every analysis pass on them.
///
/// # Errors
///
/// Fails only for an invalid configuration or an empty record stream. Problems
/// confined to a residue, base pair or duplex are logged and skipped.
#[instrument(skip_all, name = "analysis_workflow")]
pub fn run(
    records: &[AtomRecord],
    registry: &ResidueRegistry,
    config: &AnalysisConfig,
    reporter: &ProgressReporter,
) -> Result<StructureAnalysis, AnalysisError> {
    config.validate()?;
    if records.is_empty() {
        return Err(AnalysisError::EmptyInput);
    }
    let passes = Passes::new(registry, config)?;

    // === Phase 1: Assembly ===
    reporter.report(Progress::PhaseStart { name: "Assembly" });
    let mut builder = StructureBuilder::new(registry);
    builder.extend(records);
    let molecules = builder.build();
    info!(
        records = records.len(),
        molecules = molecules.len(),
        "Assembled molecules from atom records."
    );
    reporter.report(Progress::PhaseFinish);

    // === Phase 2: Per-molecule passes ===
    reporter.report(Progress::PhaseStart { name: "Analysis" });
    let total = molecules.len();
    let analyses = molecules
        .into_iter()
        .enumerate()
        .map(|(index, molecule)| {
            reporter.report(Progress::MoleculeStart { index, total });
            passes.analyze(molecule)
        })
        .collect();
    reporter.report(Progress::PhaseFinish);

    let analysis = StructureAnalysis {
        molecules: analyses,
    };
    info!(
        atoms = analysis.atom_count(),
        bonds = analysis.bond_count(),
        base_pairs = analysis.base_pair_count(),
        duplexes = analysis.duplex_count(),
        "Structure analysis complete."
    );
    Ok(analysis)
}

/// The per-molecule passes, built once from a validated configuration.
struct Passes<'a> {
    linker: ResidueLinker<'a>,
    bonds: Option<BondInferenceEngine<'a>>,
    base_pairs: BasePairDetector<'a>,
    duplexes: DuplexClusterer<'a>,
    helix: DuplexGeometryEstimator<'a>,
}

impl<'a> Passes<'a> {
    fn new(registry: &'a ResidueRegistry, config: &'a AnalysisConfig) -> Result<Self, AnalysisError> {
        let bonds = if config.bonds.infer_from_distance {
            Some(BondInferenceEngine::new(&config.bonds)?)
        } else {
            None
        };
        Ok(Self {
            linker: ResidueLinker::new(registry),
            bonds,
            base_pairs: BasePairDetector::new(&config.base_pairs)?,
            duplexes: DuplexClusterer::new(&config.duplexes),
            helix: DuplexGeometryEstimator::new(&config.helix),
        })
    }

    fn analyze(&self, mut molecule: Molecule) -> MoleculeAnalysis {
        let dictionary_bonds = self.linker.add_dictionary_bonds(&mut molecule);
        let linkage_bonds = self.linker.link(&mut molecule);
        let distance_bonds = self
            .bonds
            .as_ref()
            .map_or(0, |engine| engine.apply(&mut molecule));

        let mut analysis = MoleculeAnalysis {
            molecule,
            dictionary_bonds,
            linkage_bonds,
            distance_bonds,
            base_pairs: Vec::new(),
            duplexes: Vec::new(),
        };
        if !analysis.molecule.kind().is_nucleic_acid() {
            debug!(
                chain = %analysis.molecule.chain_id,
                kind = %analysis.molecule.kind(),
                "Skipping nucleic-acid passes"
            );
            return analysis;
        }

        let molecule = &mut analysis.molecule;
        let base_pairs = self.base_pairs.detect(molecule);
        let duplexes = self.duplexes.cluster(molecule, &base_pairs);

        let mut reports = Vec::with_capacity(duplexes.len());
        for duplex in duplexes {
            let geometry = match self.helix.estimate(molecule, &duplex) {
                Ok(geometry) => Some(geometry),
                Err(e) => {
                    debug!(
                        chain = %molecule.chain_id,
                        residues = molecule.residue_count(),
                        error = %e,
                        "Skipping duplex geometry"
                    );
                    None
                }
            };
            molecule.add_secondary_structure(duplex.to_secondary_structure());
            reports.push(DuplexReport { duplex, geometry });
        }

        analysis.base_pairs = base_pairs;
        analysis.duplexes = reports;
        analysis
    }
}
