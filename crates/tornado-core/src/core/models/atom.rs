use super::element::Element;
use nalgebra::Point3;

/// Alternate-location code used when a record has none.
pub const NO_ALT_LOC: char = ' ';

/// File-derived metadata carried by atoms that came from a coordinate file.
///
/// Atoms built directly in code usually have none of this, which is why
/// [`Atom::pdb_info`] is optional and queried once rather than assumed.
#[derive(Debug, Clone, PartialEq)]
pub struct PdbAtomInfo {
    /// Atom serial number from the source file, if present.
    pub serial: Option<u32>,
    /// Residue code as written in the file (e.g., "ALA", "  A").
    pub residue_name: String,
    /// Chain identifier (' ' when absent).
    pub chain_id: char,
    /// Residue sequence number.
    pub residue_number: i32,
    /// Insertion code (' ' when absent).
    pub insertion_code: char,
    /// Alternate-location code ([`NO_ALT_LOC`] when absent).
    pub alt_loc: char,
    pub occupancy: f64,
    pub temperature_factor: f64,
}

impl PdbAtomInfo {
    /// Two atoms share an alternate location only when their codes are identical;
    /// a blank code is its own location.
    pub fn alt_loc_compatible(&self, other: &PdbAtomInfo) -> bool {
        self.alt_loc == other.alt_loc
    }
}

/// A positioned atom.
///
/// The atom does not own its bonds; connectivity lives in the parent
/// [`Molecule`](super::molecule::Molecule). The owning residue is recorded as an
/// index into the molecule's residue sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// Fixed-width atom name as written in the source (e.g., `" CA "`).
    pub name: String,
    /// The element this atom was constructed from.
    element: &'static Element,
    /// Cartesian coordinates in Ångströms.
    pub position: Point3<f64>,
    /// Index of the owning residue within the parent molecule, if any.
    pub(crate) residue: Option<usize>,
    pdb: Option<PdbAtomInfo>,
}

impl Atom {
    pub fn new(name: &str, element: &'static Element, position: Point3<f64>) -> Self {
        Self {
            name: name.to_string(),
            element,
            position,
            residue: None,
            pdb: None,
        }
    }

    pub fn with_pdb_info(mut self, info: PdbAtomInfo) -> Self {
        self.pdb = Some(info);
        self
    }

    pub fn element(&self) -> &'static Element {
        self.element
    }

    pub fn mass(&self) -> f64 {
        self.element.mass
    }

    pub fn covalent_radius(&self) -> f64 {
        self.element.covalent_radius
    }

    pub fn vdw_radius(&self) -> f64 {
        self.element.vdw_radius
    }

    pub fn residue_index(&self) -> Option<usize> {
        self.residue
    }

    pub fn pdb_info(&self) -> Option<&PdbAtomInfo> {
        self.pdb.as_ref()
    }

    pub fn alt_loc(&self) -> char {
        self.pdb.as_ref().map_or(NO_ALT_LOC, |info| info.alt_loc)
    }

    pub fn distance(&self, other: &Atom) -> f64 {
        nalgebra::distance(&self.position, &other.position)
    }
}
