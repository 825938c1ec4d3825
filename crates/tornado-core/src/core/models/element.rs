use phf::phf_map;
use std::fmt;
use thiserror::Error;
use tracing::warn;

/// Physical constants for a chemical element.
///
/// Radii are in Ångströms and masses in daltons. Atoms hold a `&'static Element`,
/// so the radii seen by bond inference can never drift from the table below.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Element {
    /// Full element name (e.g., "Carbon").
    pub name: &'static str,
    /// Periodic-table symbol with conventional capitalization (e.g., "Cl").
    pub symbol: &'static str,
    /// Atomic mass in daltons.
    pub mass: f64,
    /// Van der Waals radius in Ångströms.
    pub vdw_radius: f64,
    /// Covalent radius in Ångströms.
    pub covalent_radius: f64,
}

const fn element(
    name: &'static str,
    symbol: &'static str,
    mass: f64,
    vdw_radius: f64,
    covalent_radius: f64,
) -> Element {
    Element {
        name,
        symbol,
        mass,
        vdw_radius,
        covalent_radius,
    }
}

/// Placeholder used when a symbol cannot be resolved.
pub static UNKNOWN_ELEMENT: Element = element("Unknown", "?", 10.0, 1.50, 0.75);

static ELEMENTS: phf::Map<&'static str, Element> = phf_map! {
    "H" => element("Hydrogen", "H", 1.008, 1.20, 0.37),
    "LI" => element("Lithium", "Li", 6.941, 1.82, 1.34),
    "B" => element("Boron", "B", 10.811, 1.75, 0.82),
    "C" => element("Carbon", "C", 12.01, 1.70, 0.77),
    "N" => element("Nitrogen", "N", 14.01, 1.55, 0.75),
    "O" => element("Oxygen", "O", 16.00, 1.52, 0.73),
    "F" => element("Fluorine", "F", 19.00, 1.47, 0.71),
    "NA" => element("Sodium", "Na", 22.00, 2.27, 1.54),
    "MG" => element("Magnesium", "Mg", 24.00, 1.73, 1.30),
    "P" => element("Phosphorus", "P", 31.00, 1.80, 1.06),
    "S" => element("Sulfur", "S", 32.06, 1.80, 1.02),
    "CL" => element("Chlorine", "Cl", 35.453, 1.75, 0.99),
    "K" => element("Potassium", "K", 39.098, 2.75, 1.96),
    "CA" => element("Calcium", "Ca", 40.078, 1.94, 1.74),
    "MN" => element("Manganese", "Mn", 54.938, 1.61, 1.39),
    "FE" => element("Iron", "Fe", 55.845, 1.56, 1.25),
    "NI" => element("Nickel", "Ni", 58.693, 1.63, 1.21),
    "CU" => element("Copper", "Cu", 63.546, 1.40, 1.38),
    "ZN" => element("Zinc", "Zn", 65.409, 1.39, 1.31),
    "SE" => element("Selenium", "Se", 78.96, 1.90, 1.16),
    "BR" => element("Bromine", "Br", 79.904, 1.85, 1.14),
    "I" => element("Iodine", "I", 126.90, 1.98, 1.33),
};

static SYMBOLS_BY_NAME: phf::Map<&'static str, &'static str> = phf_map! {
    "HYDROGEN" => "H",
    "LITHIUM" => "LI",
    "BORON" => "B",
    "CARBON" => "C",
    "NITROGEN" => "N",
    "OXYGEN" => "O",
    "FLUORINE" => "F",
    "SODIUM" => "NA",
    "MAGNESIUM" => "MG",
    "PHOSPHORUS" => "P",
    "SULFUR" => "S",
    "SULPHUR" => "S",
    "CHLORINE" => "CL",
    "POTASSIUM" => "K",
    "CALCIUM" => "CA",
    "MANGANESE" => "MN",
    "IRON" => "FE",
    "NICKEL" => "NI",
    "COPPER" => "CU",
    "ZINC" => "ZN",
    "SELENIUM" => "SE",
    "BROMINE" => "BR",
    "IODINE" => "I",
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown element '{0}'")]
pub struct UnknownElementError(pub String);

impl Element {
    /// Looks up an element by symbol or full name, ignoring case and surrounding whitespace.
    pub fn lookup(name_or_symbol: &str) -> Result<&'static Element, UnknownElementError> {
        let key = name_or_symbol.trim().to_ascii_uppercase();
        ELEMENTS
            .get(key.as_str())
            .or_else(|| {
                SYMBOLS_BY_NAME
                    .get(key.as_str())
                    .and_then(|symbol| ELEMENTS.get(*symbol))
            })
            .ok_or_else(|| UnknownElementError(name_or_symbol.trim().to_string()))
    }

    /// Like [`Element::lookup`], but falls back to [`UNKNOWN_ELEMENT`] with a warning.
    pub fn resolve(name_or_symbol: &str) -> &'static Element {
        Self::lookup(name_or_symbol).unwrap_or_else(|e| {
            warn!(error = %e, "Falling back to placeholder element radii");
            &UNKNOWN_ELEMENT
        })
    }

    /// Infers an element from a fixed-width atom name such as `" CA "` or `"FE  "`.
    ///
    /// Names that start in the first column are tried as two-letter symbols first
    /// (`"MG  "`, `"CL1 "`). Otherwise the first alphabetic character is used, which
    /// skips the leading digit of hydrogen names like `"1HB "`.
    pub fn infer_from_atom_name(atom_name: &str) -> &'static Element {
        let mut chars = atom_name.chars();
        if let (Some(first), Some(second)) = (chars.next(), chars.next()) {
            if first.is_ascii_alphabetic() && second.is_ascii_alphabetic() {
                let two: String = [first, second].iter().collect();
                if let Ok(element) = Self::lookup(&two) {
                    return element;
                }
            }
        }

        match atom_name.chars().find(|c| c.is_ascii_alphabetic()) {
            Some(c) => Self::resolve(&c.to_string()),
            None => Self::resolve(atom_name),
        }
    }

    pub fn is_unknown(&self) -> bool {
        std::ptr::eq(self, &UNKNOWN_ELEMENT)
    }

    /// True for oxygen and nitrogen, the atoms that can form base-pair hydrogen bonds.
    pub fn is_polar(&self) -> bool {
        matches!(self.symbol, "O" | "N")
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol)
    }
}

/// Iterates over every tabulated element (excluding the placeholder).
pub fn known_elements() -> impl Iterator<Item = &'static Element> {
    ELEMENTS.values()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_accepts_symbols_and_names_in_any_case() {
        assert_eq!(Element::lookup("c").unwrap().symbol, "C");
        assert_eq!(Element::lookup(" Cl ").unwrap().symbol, "Cl");
        assert_eq!(Element::lookup("nitrogen").unwrap().symbol, "N");
        assert_eq!(Element::lookup("SULPHUR").unwrap().symbol, "S");
    }

    #[test]
    fn lookup_reports_unknown_symbols() {
        let err = Element::lookup("Xx").unwrap_err();
        assert_eq!(err, UnknownElementError("Xx".to_string()));
    }

    #[test]
    fn resolve_falls_back_to_placeholder_radii() {
        let element = Element::resolve("Qq");
        assert!(element.is_unknown());
        assert_eq!(element.covalent_radius, 0.75);
        assert_eq!(element.vdw_radius, 1.50);
        assert_eq!(element.mass, 10.0);
    }

    #[test]
    fn carbon_constants_match_table() {
        let carbon = Element::lookup("C").unwrap();
        assert_eq!(carbon.mass, 12.01);
        assert_eq!(carbon.vdw_radius, 1.70);
        assert_eq!(carbon.covalent_radius, 0.77);
        assert!(!carbon.is_unknown());
    }

    #[test]
    fn infers_elements_from_padded_atom_names() {
        assert_eq!(Element::infer_from_atom_name(" CA ").symbol, "C");
        assert_eq!(Element::infer_from_atom_name(" N1 ").symbol, "N");
        assert_eq!(Element::infer_from_atom_name(" O3*").symbol, "O");
        assert_eq!(Element::infer_from_atom_name("1HB ").symbol, "H");
        assert_eq!(Element::infer_from_atom_name("MG  ").symbol, "Mg");
        assert_eq!(Element::infer_from_atom_name("FE  ").symbol, "Fe");
        assert_eq!(Element::infer_from_atom_name("HG21").symbol, "H");
    }

    #[test]
    fn polar_atoms_are_oxygen_and_nitrogen() {
        assert!(Element::lookup("O").unwrap().is_polar());
        assert!(Element::lookup("N").unwrap().is_polar());
        assert!(!Element::lookup("C").unwrap().is_polar());
        assert!(!Element::lookup("S").unwrap().is_polar());
    }

    #[test]
    fn known_elements_excludes_placeholder() {
        assert_eq!(known_elements().count(), 22);
        assert!(known_elements().all(|e| !e.is_unknown()));
    }
}
