use super::bonds::{AtomNamePair, intra_residue_bonds};
use super::codes::{
    amino_acid_for_code, normalize_code, nucleotide_for_code, standard_amino_acid_codes,
    standard_nucleotide_codes, standard_solvent_codes,
};
use crate::core::models::residue::{AminoAcid, NucleotideBase, ResidueClass};
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use thiserror::Error;

/// Shared, immutable description of one residue type.
#[derive(Debug, Clone, PartialEq)]
pub struct ResidueType {
    pub class: ResidueClass,
    pub three_letter_code: String,
    pub one_letter_code: char,
    pub name: String,
    generic_bonds: Vec<AtomNamePair>,
}

impl ResidueType {
    fn for_class(class: ResidueClass) -> Self {
        let (three_letter_code, name) = match class {
            ResidueClass::AminoAcid(aa) => {
                (aa.three_letter_code().to_string(), aa.full_name().to_string())
            }
            ResidueClass::Nucleotide(base) => {
                (base.one_letter_code().to_string(), base.full_name().to_string())
            }
            ResidueClass::Solvent => ("HOH".to_string(), "Solvent".to_string()),
            ResidueClass::Unknown => ("UNK".to_string(), "Unknown".to_string()),
        };
        Self {
            class,
            three_letter_code,
            one_letter_code: class.one_letter_code(),
            name,
            generic_bonds: intra_residue_bonds(class),
        }
    }

    /// Atom-name pairs expected to be bonded within a residue of this type.
    pub fn generic_bonds(&self) -> &[AtomNamePair] {
        &self.generic_bonds
    }
}

/// Read-only lookup from residue codes to [`ResidueType`] descriptors.
///
/// Built once through [`RegistryBuilder`] and then shared by reference; nothing
/// mutates it after construction.
#[derive(Debug, Clone)]
pub struct ResidueRegistry {
    amino_acids: HashMap<String, AminoAcid>,
    nucleotides: HashMap<String, NucleotideBase>,
    solvents: HashSet<String>,
    types: HashMap<ResidueClass, ResidueType>,
    unknown: ResidueType,
}

impl ResidueRegistry {
    /// Registry holding only the built-in code tables.
    pub fn standard() -> Self {
        RegistryBuilder::new().build()
    }

    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// Classifies a residue code, checking amino acids, then nucleotides, then solvent.
    pub fn classify(&self, code: &str) -> ResidueClass {
        let code = normalize_code(code);
        if let Some(aa) = self.amino_acids.get(&code) {
            ResidueClass::AminoAcid(*aa)
        } else if let Some(base) = self.nucleotides.get(&code) {
            ResidueClass::Nucleotide(*base)
        } else if self.solvents.contains(&code) {
            ResidueClass::Solvent
        } else {
            ResidueClass::Unknown
        }
    }

    pub fn residue_type(&self, class: ResidueClass) -> &ResidueType {
        self.types.get(&class).unwrap_or(&self.unknown)
    }

    pub fn lookup(&self, code: &str) -> &ResidueType {
        self.residue_type(self.classify(code))
    }

    /// Finds a type by residue code or by full name (e.g., "Tryptophan"), ignoring case.
    pub fn find(&self, code_or_name: &str) -> Option<&ResidueType> {
        match self.classify(code_or_name) {
            ResidueClass::Unknown => {
                let wanted = code_or_name.trim();
                self.types
                    .values()
                    .find(|t| t.name.eq_ignore_ascii_case(wanted))
            }
            class => Some(self.residue_type(class)),
        }
    }

    pub fn amino_acid_by_one_letter(&self, code: char) -> Option<&ResidueType> {
        let code = code.to_ascii_uppercase();
        AminoAcid::ALL
            .iter()
            .find(|aa| aa.one_letter_code() == code)
            .map(|aa| self.residue_type(ResidueClass::AminoAcid(*aa)))
    }
}

impl Default for ResidueRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

#[derive(Debug, Error)]
pub enum RegistryLoadError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
    #[error("Alias '{alias}' refers to unknown parent residue '{parent}'")]
    UnknownParent { alias: String, parent: String },
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct AliasFile {
    #[serde(default)]
    amino_acids: HashMap<String, String>,
    #[serde(default)]
    nucleotides: HashMap<String, String>,
    #[serde(default)]
    solvent: Vec<String>,
}

/// Assembles a [`ResidueRegistry`] from the built-in tables plus optional aliases.
#[derive(Debug, Clone)]
pub struct RegistryBuilder {
    amino_acids: HashMap<String, AminoAcid>,
    nucleotides: HashMap<String, NucleotideBase>,
    solvents: HashSet<String>,
}

impl Default for RegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self {
            amino_acids: standard_amino_acid_codes()
                .map(|(code, aa)| (code.to_string(), aa))
                .collect(),
            nucleotides: standard_nucleotide_codes()
                .map(|(code, base)| (code.to_string(), base))
                .collect(),
            solvents: standard_solvent_codes().map(str::to_string).collect(),
        }
    }

    pub fn alias_amino_acid(mut self, code: &str, parent: AminoAcid) -> Self {
        self.amino_acids.insert(normalize_code(code), parent);
        self
    }

    pub fn alias_nucleotide(mut self, code: &str, parent: NucleotideBase) -> Self {
        self.nucleotides.insert(normalize_code(code), parent);
        self
    }

    pub fn alias_solvent(mut self, code: &str) -> Self {
        self.solvents.insert(normalize_code(code));
        self
    }

    /// Adds aliases from a TOML file of the form:
    ///
    /// ```toml
    /// solvent = ["EDO"]
    ///
    /// [amino-acids]
    /// MSE = "MET"
    ///
    /// [nucleotides]
    /// 5BU = "U"
    /// ```
    pub fn with_aliases_file(self, path: &Path) -> Result<Self, RegistryLoadError> {
        let content = std::fs::read_to_string(path).map_err(|e| RegistryLoadError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        let aliases: AliasFile = toml::from_str(&content).map_err(|e| RegistryLoadError::Toml {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        self.with_aliases(aliases)
    }

    fn with_aliases(mut self, aliases: AliasFile) -> Result<Self, RegistryLoadError> {
        for (alias, parent) in aliases.amino_acids {
            let aa = amino_acid_for_code(&parent)
                .ok_or_else(|| RegistryLoadError::UnknownParent { alias: alias.clone(), parent })?;
            self = self.alias_amino_acid(&alias, aa);
        }
        for (alias, parent) in aliases.nucleotides {
            let base = nucleotide_for_code(&parent)
                .ok_or_else(|| RegistryLoadError::UnknownParent { alias: alias.clone(), parent })?;
            self = self.alias_nucleotide(&alias, base);
        }
        for code in aliases.solvent {
            self = self.alias_solvent(&code);
        }
        Ok(self)
    }

    pub fn build(self) -> ResidueRegistry {
        let mut types = HashMap::new();
        let classes = AminoAcid::ALL
            .iter()
            .map(|aa| ResidueClass::AminoAcid(*aa))
            .chain(NucleotideBase::ALL.iter().map(|b| ResidueClass::Nucleotide(*b)))
            .chain(std::iter::once(ResidueClass::Solvent));
        for class in classes {
            types.insert(class, ResidueType::for_class(class));
        }

        ResidueRegistry {
            amino_acids: self.amino_acids,
            nucleotides: self.nucleotides,
            solvents: self.solvents,
            types,
            unknown: ResidueType::for_class(ResidueClass::Unknown),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn standard_registry_matches_static_classification() {
        let registry = ResidueRegistry::standard();
        for code in ["ALA", "TRP", "G", "PSU", "HOH", "SO4", "XYZ"] {
            assert_eq!(registry.classify(code), super::super::codes::classify_code(code));
        }
    }

    #[test]
    fn descriptors_carry_codes_and_bond_dictionaries() {
        let registry = ResidueRegistry::standard();
        let trp = registry.lookup("trp");
        assert_eq!(trp.three_letter_code, "TRP");
        assert_eq!(trp.one_letter_code, 'W');
        assert_eq!(trp.name, "Tryptophan");
        assert!(trp.generic_bonds().contains(&(" CD1", " NE1")));

        let unknown = registry.lookup("ATP");
        assert_eq!(unknown.class, ResidueClass::Unknown);
        assert!(unknown.generic_bonds().is_empty());
    }

    #[test]
    fn find_accepts_full_names() {
        let registry = ResidueRegistry::standard();
        let gly = registry.find("glycine").unwrap();
        assert_eq!(gly.class, ResidueClass::AminoAcid(AminoAcid::Glycine));
        assert_eq!(
            registry.find("Uridylate").map(|t| t.class),
            Some(ResidueClass::Nucleotide(NucleotideBase::Uracil))
        );
        assert!(registry.find("Unobtainium").is_none());
    }

    #[test]
    fn one_letter_lookup_is_for_amino_acids() {
        let registry = ResidueRegistry::standard();
        assert_eq!(
            registry.amino_acid_by_one_letter('w').map(|t| t.three_letter_code.as_str()),
            Some("TRP")
        );
        assert!(registry.amino_acid_by_one_letter('B').is_none());
    }

    #[test]
    fn builder_aliases_extend_classification() {
        let registry = ResidueRegistry::builder()
            .alias_amino_acid("MSE", AminoAcid::Methionine)
            .alias_nucleotide("5BU", NucleotideBase::Uracil)
            .alias_solvent("edo")
            .build();
        assert_eq!(
            registry.classify("MSE"),
            ResidueClass::AminoAcid(AminoAcid::Methionine)
        );
        assert_eq!(
            registry.classify("5bu"),
            ResidueClass::Nucleotide(NucleotideBase::Uracil)
        );
        assert_eq!(registry.classify("EDO"), ResidueClass::Solvent);
        assert_eq!(ResidueRegistry::standard().classify("MSE"), ResidueClass::Unknown);
    }

    #[test]
    fn aliases_load_from_toml_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "solvent = [\"EDO\"]\n\n[amino-acids]\nMSE = \"MET\"\n\n[nucleotides]\n5BU = \"U\""
        )
        .unwrap();

        let registry = RegistryBuilder::new()
            .with_aliases_file(file.path())
            .unwrap()
            .build();
        assert_eq!(
            registry.classify("MSE"),
            ResidueClass::AminoAcid(AminoAcid::Methionine)
        );
        assert_eq!(registry.classify("EDO"), ResidueClass::Solvent);
    }

    #[test]
    fn alias_to_unknown_parent_is_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[amino-acids]\nXXX = \"NOPE\"").unwrap();
        let result = RegistryBuilder::new().with_aliases_file(file.path());
        assert!(matches!(
            result,
            Err(RegistryLoadError::UnknownParent { ref parent, .. }) if parent == "NOPE"
        ));
    }

    #[test]
    fn missing_alias_file_reports_io_error() {
        let result = RegistryBuilder::new().with_aliases_file(Path::new("/no/such/aliases.toml"));
        assert!(matches!(result, Err(RegistryLoadError::Io { .. })));
    }
}
