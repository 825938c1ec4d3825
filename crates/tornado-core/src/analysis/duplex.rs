use super::base_pairs::BasePair;
use super::config::DuplexConfig;
use crate::core::geometry::Plane3D;
use crate::core::models::molecule::Molecule;
use crate::core::models::secondary::{SecondaryStructure, SecondaryStructureKind};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, info, instrument, trace};

/// Source label recorded on duplex annotations.
pub const DUPLEX_SOURCE: &str = "base-pair clustering";

/// One clustered helical region: its base pairs and the residues they reference.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Duplex {
    base_pairs: Vec<BasePair>,
    residues: BTreeSet<usize>,
}

impl Duplex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_base_pair(&mut self, pair: BasePair) {
        if self.base_pairs.contains(&pair) {
            return;
        }
        self.residues.insert(pair.residue1());
        self.residues.insert(pair.residue2());
        self.base_pairs.push(pair);
    }

    pub fn base_pairs(&self) -> &[BasePair] {
        &self.base_pairs
    }

    /// Residue indices in ascending order.
    pub fn residues(&self) -> impl Iterator<Item = usize> + '_ {
        self.residues.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.base_pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.base_pairs.is_empty()
    }

    pub fn contains_residue(&self, index: usize) -> bool {
        self.residues.contains(&index)
    }

    pub fn to_secondary_structure(&self) -> SecondaryStructure {
        let mut structure = SecondaryStructure::new(SecondaryStructureKind::Duplex, DUPLEX_SOURCE);
        for index in self.residues() {
            structure.add_residue(index);
        }
        structure
    }
}

/// Groups base pairs into antiparallel duplexes by single-linkage clustering.
///
/// Two base pairs are linkable when their phases (residue-number sums) lie within
/// `sequence_cutoff` of each other, their first and second residue numbers each
/// differ by at most `sequence_cutoff`, and their base-pair planes are parallel
/// within `plane_angle`. Clusters are the connected components of that relation,
/// grown greedily from the lowest unassigned pair; clusters smaller than
/// `min_base_pairs` are dropped. Overlapping helices are not split.
pub struct DuplexClusterer<'a> {
    config: &'a DuplexConfig,
}

impl<'a> DuplexClusterer<'a> {
    pub fn new(config: &'a DuplexConfig) -> Self {
        Self { config }
    }

    fn links(&self, molecule: &Molecule, pairs: &[BasePair]) -> BTreeMap<usize, BTreeSet<usize>> {
        let planes: Vec<Option<Plane3D>> = pairs
            .iter()
            .map(|pair| match pair.base_plane(molecule) {
                Ok(plane) => Some(plane),
                Err(e) => {
                    trace!(pair = %pair.label(molecule), error = %e, "Base pair has no plane");
                    None
                }
            })
            .collect();
        let numbers: Vec<(i32, i32)> = pairs.iter().map(|p| p.numbers(molecule)).collect();

        let mut by_phase: BTreeMap<i32, Vec<usize>> = BTreeMap::new();
        for (index, (n1, n2)) in numbers.iter().enumerate() {
            by_phase.entry(n1 + n2).or_default().push(index);
        }

        let cutoff = self.config.sequence_cutoff;
        let min_alignment = self.config.plane_angle.to_radians().cos();
        let mut links: BTreeMap<usize, BTreeSet<usize>> = BTreeMap::new();

        for (index, &(n1, n2)) in numbers.iter().enumerate() {
            let Some(plane) = &planes[index] else { continue };
            let phase = n1 + n2;
            for (_, others) in by_phase.range(phase - cutoff..=phase + cutoff) {
                for &other in others {
                    if other <= index {
                        continue;
                    }
                    let (m1, m2) = numbers[other];
                    if (n1 - m1).abs() > cutoff || (n2 - m2).abs() > cutoff {
                        continue;
                    }
                    let Some(other_plane) = &planes[other] else {
                        continue;
                    };
                    if plane.normal_alignment(other_plane) < min_alignment {
                        continue;
                    }
                    links.entry(index).or_default().insert(other);
                    links.entry(other).or_default().insert(index);
                }
            }
        }
        links
    }

    /// Clusters `pairs` into duplexes. The same input always yields the same clusters.
    #[instrument(skip_all, name = "duplex_clustering", fields(chain = %molecule.chain_id))]
    pub fn cluster(&self, molecule: &Molecule, pairs: &[BasePair]) -> Vec<Duplex> {
        let links = self.links(molecule, pairs);
        let mut unassigned: BTreeSet<usize> = links.keys().copied().collect();
        let mut duplexes = Vec::new();

        while let Some(start) = unassigned.pop_first() {
            let mut fresh = BTreeSet::from([start]);
            let mut stale = BTreeSet::new();
            let mut members = Vec::new();

            while let Some(current) = fresh.pop_first() {
                members.push(current);
                unassigned.remove(&current);
                stale.insert(current);
                for &neighbor in links.get(&current).into_iter().flatten() {
                    if !stale.contains(&neighbor) {
                        fresh.insert(neighbor);
                    }
                }
            }

            if members.len() < self.config.min_base_pairs {
                debug!(size = members.len(), "Discarding undersized base-pair cluster");
                continue;
            }
            members.sort_unstable();
            let mut duplex = Duplex::new();
            for index in members {
                duplex.add_base_pair(pairs[index]);
            }
            duplexes.push(duplex);
        }

        info!(
            base_pairs = pairs.len(),
            duplexes = duplexes.len(),
            "Duplex clustering complete."
        );
        duplexes
    }
}
