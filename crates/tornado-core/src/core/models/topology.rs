use super::atom::Atom;
use super::ids::AtomId;
use nalgebra::Point3;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// How a bond entered the molecule's bond graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BondOrigin {
    /// Inferred from inter-atomic distance and element radii.
    #[default]
    Distance,
    /// Added from a residue type's intra-residue bond dictionary.
    Dictionary,
    /// Added between sequence-adjacent residues (peptide or phosphodiester).
    Linkage,
}

#[derive(Debug, Error)]
#[error("Invalid bond origin string")]
pub struct ParseBondOriginError;

impl FromStr for BondOrigin {
    type Err = ParseBondOriginError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "distance" => Ok(Self::Distance),
            "dictionary" => Ok(Self::Dictionary),
            "linkage" => Ok(Self::Linkage),
            _ => Err(ParseBondOriginError),
        }
    }
}

impl fmt::Display for BondOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::Distance => "Distance",
                Self::Dictionary => "Dictionary",
                Self::Linkage => "Linkage",
            }
        )
    }
}

/// An unordered covalent bond between two atoms.
///
/// Endpoints are stored in ascending id order so that `Bond::new(a, b)` and
/// `Bond::new(b, a)` compare and hash identically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bond {
    atom1_id: AtomId,
    atom2_id: AtomId,
    pub origin: BondOrigin,
}

impl Bond {
    pub fn new(a: AtomId, b: AtomId, origin: BondOrigin) -> Self {
        let (atom1_id, atom2_id) = if a <= b { (a, b) } else { (b, a) };
        Self {
            atom1_id,
            atom2_id,
            origin,
        }
    }

    pub fn atom1_id(&self) -> AtomId {
        self.atom1_id
    }

    pub fn atom2_id(&self) -> AtomId {
        self.atom2_id
    }

    pub fn contains(&self, atom_id: AtomId) -> bool {
        self.atom1_id == atom_id || self.atom2_id == atom_id
    }

    pub fn partner(&self, atom_id: AtomId) -> Option<AtomId> {
        if self.atom1_id == atom_id {
            Some(self.atom2_id)
        } else if self.atom2_id == atom_id {
            Some(self.atom1_id)
        } else {
            None
        }
    }

    /// Point along the bond that divides it in the ratio of the two covalent radii.
    ///
    /// `atom1` and `atom2` must be the atoms referenced by this bond, in either order;
    /// the result is measured from whichever is passed first.
    pub fn covalent_midpoint(atom1: &Atom, atom2: &Atom) -> Point3<f64> {
        let r1 = atom1.covalent_radius();
        let r2 = atom2.covalent_radius();
        let fraction = r1 / (r1 + r2);
        atom1.position + (atom2.position - atom1.position) * fraction
    }
}
