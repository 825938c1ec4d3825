use super::config::{BondConfig, ConfigError};
use crate::core::geometry::SpatialHash3D;
use crate::core::models::atom::Atom;
use crate::core::models::ids::AtomId;
use crate::core::models::molecule::Molecule;
use crate::core::models::topology::BondOrigin;
use crate::core::models::traits::HasAtoms;
use tracing::{info, instrument};

/// Infers covalent bonds from atom positions and element radii.
///
/// A pair is bonded when its distance falls inside a window derived from the sum of
/// covalent radii and the sum of van der Waals radii:
///
/// - lower bound: `min_factor * covalent`
/// - upper bound: `min(covalent + vdw_fraction * (vdw - covalent), max_factor * covalent)`
///
/// Pairs whose covalent sum reaches their van der Waals sum are never bonded.
#[derive(Debug, Clone)]
pub struct BondInferenceEngine<'a> {
    config: &'a BondConfig,
}

impl<'a> BondInferenceEngine<'a> {
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when `config` fails [`BondConfig::validate`];
    /// the hash cell size is taken from it.
    pub fn new(config: &'a BondConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Accepted distance range for a pair of atoms, or `None` if the elements
    /// cannot form a well-defined covalent bond.
    pub fn distance_window(&self, a: &Atom, b: &Atom) -> Option<(f64, f64)> {
        let covalent = a.covalent_radius() + b.covalent_radius();
        let van_der_waals = a.vdw_radius() + b.vdw_radius();
        if covalent >= van_der_waals {
            return None;
        }
        let min = self.config.min_factor * covalent;
        let max = (covalent + self.config.vdw_fraction * (van_der_waals - covalent))
            .min(self.config.max_factor * covalent);
        Some((min, max))
    }

    /// File metadata check: chain and alternate location must agree when both atoms
    /// carry them.
    fn metadata_compatible(&self, a: &Atom, b: &Atom) -> bool {
        let (Some(ia), Some(ib)) = (a.pdb_info(), b.pdb_info()) else {
            return true;
        };
        if self.config.require_matching_chain && ia.chain_id != ib.chain_id {
            return false;
        }
        if self.config.require_matching_alt_loc && !ia.alt_loc_compatible(ib) {
            return false;
        }
        true
    }

    pub fn is_bonded(&self, a: &Atom, b: &Atom) -> bool {
        let Some((min, max)) = self.distance_window(a, b) else {
            return false;
        };
        let distance = a.distance(b);
        (min..=max).contains(&distance) && self.metadata_compatible(a, b)
    }

    /// All bonded atom pairs in `molecule`, each unordered pair reported once with the
    /// smaller id first, sorted.
    pub fn infer(&self, molecule: &Molecule) -> Vec<(AtomId, AtomId)> {
        let max_radius = self.config.max_covalent_radius;
        let mut hash = SpatialHash3D::new(max_radius);
        for (id, atom) in molecule.atoms() {
            hash.put(atom.position, id);
        }

        let mut pairs = Vec::new();
        for (id, atom) in molecule.atoms() {
            let radius = (atom.covalent_radius() + max_radius) * self.config.search_scale;
            for &other_id in hash.neighbor_values(&atom.position, radius) {
                if other_id <= id {
                    continue;
                }
                let Some(other) = molecule.atom(other_id) else {
                    continue;
                };
                if self.is_bonded(atom, other) {
                    pairs.push((id, other_id));
                }
            }
        }
        pairs.sort_unstable();
        pairs
    }

    /// Adds every inferred bond to `molecule` and returns how many were new.
    #[instrument(skip_all, name = "bond_inference", fields(chain = %molecule.chain_id))]
    pub fn apply(&self, molecule: &mut Molecule) -> usize {
        let pairs = self.infer(molecule);
        let candidates = pairs.len();
        let added = pairs
            .into_iter()
            .filter(|&(a, b)| molecule.add_bond(a, b, BondOrigin::Distance) == Some(true))
            .count();
        info!(
            atoms = molecule.atom_count(),
            candidates, added, "Distance-based bond inference complete."
        );
        added
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::atom::PdbAtomInfo;
    use crate::core::models::element::{Element, UNKNOWN_ELEMENT, known_elements};
    use crate::core::models::traits::HasBonds;
    use nalgebra::Point3;

    fn atom(symbol: &str, x: f64) -> Atom {
        Atom::new(" X  ", Element::lookup(symbol).unwrap(), Point3::new(x, 0.0, 0.0))
    }

    fn with_metadata(atom: Atom, chain_id: char, alt_loc: char) -> Atom {
        atom.with_pdb_info(PdbAtomInfo {
            serial: None,
            residue_name: "UNK".to_string(),
            chain_id,
            residue_number: 1,
            insertion_code: ' ',
            alt_loc,
            occupancy: 1.0,
            temperature_factor: 0.0,
        })
    }

    fn molecule_of(atoms: Vec<Atom>) -> (Molecule, Vec<AtomId>) {
        let mut molecule = Molecule::new('A');
        let ids = atoms.into_iter().map(|a| molecule.add_atom(a)).collect();
        (molecule, ids)
    }

    #[test]
    fn carbon_carbon_single_bond_is_found() {
        let config = BondConfig::default();
        let engine = BondInferenceEngine::new(&config).unwrap();
        let (mut molecule, ids) = molecule_of(vec![atom("C", 0.0), atom("C", 1.54)]);
        assert_eq!(engine.apply(&mut molecule), 1);
        assert!(molecule.is_bonded(ids[0], ids[1]));
        assert!(molecule.is_bonded(ids[1], ids[0]));
        assert_eq!(molecule.bonds()[0].origin, BondOrigin::Distance);
    }

    #[test]
    fn distant_carbons_are_not_bonded() {
        let config = BondConfig::default();
        let engine = BondInferenceEngine::new(&config).unwrap();
        let (mut molecule, _) = molecule_of(vec![atom("C", 0.0), atom("C", 5.0)]);
        assert_eq!(engine.apply(&mut molecule), 0);
        assert_eq!(molecule.bond_count(), 0);
    }

    #[test]
    fn every_valid_element_pair_bonds_at_covalent_distance_only() {
        let config = BondConfig::default();
        let engine = BondInferenceEngine::new(&config).unwrap();
        let elements: Vec<_> = known_elements().collect();
        for a in &elements {
            for b in &elements {
                let covalent = a.covalent_radius + b.covalent_radius;
                if covalent >= a.vdw_radius + b.vdw_radius {
                    continue;
                }
                let origin = Atom::new(" A  ", a, Point3::origin());
                let at_covalent = Atom::new(" B  ", b, Point3::new(covalent, 0.0, 0.0));
                let stretched = Atom::new(" B  ", b, Point3::new(1.30 * covalent, 0.0, 0.0));
                assert!(
                    engine.is_bonded(&origin, &at_covalent),
                    "{}-{} should bond at {covalent}",
                    a.symbol,
                    b.symbol
                );
                assert!(
                    !engine.is_bonded(&origin, &stretched),
                    "{}-{} should not bond at 1.30x",
                    a.symbol,
                    b.symbol
                );

                let (mut molecule, ids) = molecule_of(vec![origin, at_covalent]);
                assert_eq!(engine.apply(&mut molecule), 1);
                assert_eq!(molecule.bonded_neighbors(ids[1]), &[ids[0]]);
            }
        }
    }

    #[test]
    fn too_short_contacts_are_rejected() {
        let config = BondConfig::default();
        let engine = BondInferenceEngine::new(&config).unwrap();
        assert!(!engine.is_bonded(&atom("C", 0.0), &atom("C", 0.9)));
    }

    #[test]
    fn ill_defined_pairs_have_no_window() {
        let config = BondConfig::default();
        let engine = BondInferenceEngine::new(&config).unwrap();
        static OVERSIZED: Element = Element {
            name: "Oversized",
            symbol: "Ov",
            mass: 1.0,
            vdw_radius: 1.0,
            covalent_radius: 1.0,
        };
        let a = Atom::new(" OV ", &OVERSIZED, Point3::origin());
        let b = Atom::new(" OV ", &OVERSIZED, Point3::new(2.0, 0.0, 0.0));
        assert!(engine.distance_window(&a, &b).is_none());
        assert!(!engine.is_bonded(&a, &b));
    }

    #[test]
    fn unknown_elements_still_participate() {
        let config = BondConfig::default();
        let engine = BondInferenceEngine::new(&config).unwrap();
        let (mut molecule, _) = molecule_of(vec![
            Atom::new(" Q1 ", &UNKNOWN_ELEMENT, Point3::origin()),
            Atom::new(" Q2 ", &UNKNOWN_ELEMENT, Point3::new(1.5, 0.0, 0.0)),
        ]);
        assert_eq!(engine.apply(&mut molecule), 1);
    }

    #[test]
    fn chain_and_alt_loc_mismatches_block_bonds() {
        let config = BondConfig::default();
        let engine = BondInferenceEngine::new(&config).unwrap();

        let a = with_metadata(atom("C", 0.0), 'A', ' ');
        let other_chain = with_metadata(atom("C", 1.54), 'B', ' ');
        assert!(!engine.is_bonded(&a, &other_chain));

        let alt_a = with_metadata(atom("C", 0.0), 'A', 'A');
        let alt_b = with_metadata(atom("C", 1.54), 'A', 'B');
        assert!(!engine.is_bonded(&alt_a, &alt_b));

        let blank = with_metadata(atom("C", 1.54), 'A', ' ');
        assert!(!engine.is_bonded(&alt_a, &blank));
        assert!(!engine.is_bonded(&blank, &alt_a));

        let same_alt = with_metadata(atom("C", 1.54), 'A', 'A');
        assert!(engine.is_bonded(&alt_a, &same_alt));

        let loose = BondConfig {
            require_matching_alt_loc: false,
            ..BondConfig::default()
        };
        assert!(BondInferenceEngine::new(&loose).unwrap().is_bonded(&alt_a, &blank));

        let relaxed = BondConfig {
            require_matching_chain: false,
            ..BondConfig::default()
        };
        assert!(BondInferenceEngine::new(&relaxed).unwrap().is_bonded(&a, &other_chain));
    }

    #[test]
    fn invalid_config_is_rejected_before_hashing() {
        let zero_cell = BondConfig {
            max_covalent_radius: 0.0,
            ..BondConfig::default()
        };
        assert!(matches!(
            BondInferenceEngine::new(&zero_cell),
            Err(ConfigError::Invalid { field: "bonds.max-covalent-radius", .. })
        ));
    }

    #[test]
    fn inferred_pairs_are_unique_and_sorted() {
        let config = BondConfig::default();
        let engine = BondInferenceEngine::new(&config).unwrap();
        let (molecule, _) = molecule_of(vec![
            atom("C", 0.0),
            atom("C", 1.54),
            atom("C", 3.08),
            atom("O", 4.51),
        ]);
        let pairs = engine.infer(&molecule);
        assert_eq!(pairs.len(), 3);
        assert!(pairs.windows(2).all(|w| w[0] < w[1]));
        assert!(pairs.iter().all(|(a, b)| a < b));
        assert_eq!(engine.infer(&molecule), pairs);
    }
}
