use crate::core::models::atom::{Atom, NO_ALT_LOC, PdbAtomInfo};
use crate::core::models::element::Element;
use nalgebra::Point3;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RecordError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Line {line}: {message}")]
    InvalidRecord { line: u64, message: String },
}

/// One atom as delivered by a structure file reader.
///
/// `name` keeps the file's fixed-width spacing (e.g. `" CA "`), because residue bond
/// dictionaries match on the padded names.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AtomRecord {
    #[serde(default)]
    pub serial: Option<u32>,
    pub name: String,
    #[serde(default)]
    pub alt_loc: Option<char>,
    pub residue_name: String,
    #[serde(default)]
    pub chain_id: Option<char>,
    pub residue_number: i32,
    #[serde(default)]
    pub insertion_code: Option<char>,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    #[serde(default)]
    pub occupancy: Option<f64>,
    #[serde(default)]
    pub temp_factor: Option<f64>,
    #[serde(default)]
    pub element: Option<String>,
}

impl AtomRecord {
    pub fn new(name: &str, residue_name: &str, residue_number: i32, position: Point3<f64>) -> Self {
        Self {
            serial: None,
            name: name.to_string(),
            alt_loc: None,
            residue_name: residue_name.to_string(),
            chain_id: None,
            residue_number,
            insertion_code: None,
            x: position.x,
            y: position.y,
            z: position.z,
            occupancy: None,
            temp_factor: None,
            element: None,
        }
    }

    pub fn with_chain(mut self, chain_id: char) -> Self {
        self.chain_id = Some(chain_id);
        self
    }

    pub fn with_alt_loc(mut self, alt_loc: char) -> Self {
        self.alt_loc = Some(alt_loc);
        self
    }

    pub fn with_insertion_code(mut self, insertion_code: char) -> Self {
        self.insertion_code = Some(insertion_code);
        self
    }

    pub fn with_element(mut self, symbol: &str) -> Self {
        self.element = Some(symbol.to_string());
        self
    }

    pub fn position(&self) -> Point3<f64> {
        Point3::new(self.x, self.y, self.z)
    }

    pub fn chain(&self) -> char {
        self.chain_id.unwrap_or(' ')
    }

    pub fn insertion(&self) -> char {
        self.insertion_code.unwrap_or(' ')
    }

    /// Element from the explicit symbol, or inferred from the atom name when blank.
    pub fn resolve_element(&self) -> &'static Element {
        match self.element.as_deref().map(str::trim) {
            Some(symbol) if !symbol.is_empty() => Element::resolve(symbol),
            _ => Element::infer_from_atom_name(&self.name),
        }
    }

    /// Rejects records whose coordinates cannot be placed.
    pub fn validate(&self, line: u64) -> Result<(), RecordError> {
        if !(self.x.is_finite() && self.y.is_finite() && self.z.is_finite()) {
            return Err(RecordError::InvalidRecord {
                line,
                message: format!("non-finite coordinates for atom '{}'", self.name.trim()),
            });
        }
        if self.name.trim().is_empty() {
            return Err(RecordError::InvalidRecord {
                line,
                message: "empty atom name".to_string(),
            });
        }
        Ok(())
    }

    /// Builds an [`Atom`] carrying this record's file metadata.
    pub fn to_atom(&self) -> Atom {
        Atom::new(&self.name, self.resolve_element(), self.position()).with_pdb_info(PdbAtomInfo {
            serial: self.serial,
            residue_name: self.residue_name.clone(),
            chain_id: self.chain(),
            residue_number: self.residue_number,
            insertion_code: self.insertion(),
            alt_loc: self.alt_loc.unwrap_or(NO_ALT_LOC),
            occupancy: self.occupancy.unwrap_or(1.0),
            temperature_factor: self.temp_factor.unwrap_or(0.0),
        })
    }
}

/// Records read from one input, plus the rows that had to be skipped.
#[derive(Debug, Default)]
pub struct RecordSet {
    pub records: Vec<AtomRecord>,
    pub skipped: Vec<RecordError>,
}
