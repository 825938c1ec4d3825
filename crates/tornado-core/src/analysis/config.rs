use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid value for '{field}': {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Distance heuristics for covalent bond inference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct BondConfig {
    /// Largest covalent radius expected among common elements; also the hash cell size.
    pub max_covalent_radius: f64,
    /// Neighbor search radius is `(r_a + max_covalent_radius) * search_scale`.
    pub search_scale: f64,
    /// Lower bound as a fraction of the covalent distance.
    pub min_factor: f64,
    /// Fraction of the covalent-to-vdW gap allowed above the covalent distance.
    pub vdw_fraction: f64,
    /// Upper bound as a fraction of the covalent distance.
    pub max_factor: f64,
    pub require_matching_chain: bool,
    pub require_matching_alt_loc: bool,
    /// Run the distance pass at all; dictionary and linkage bonds are always added.
    pub infer_from_distance: bool,
}

impl Default for BondConfig {
    fn default() -> Self {
        Self {
            max_covalent_radius: 1.40,
            search_scale: 1.5,
            min_factor: 0.75,
            vdw_fraction: 0.25,
            max_factor: 1.25,
            require_matching_chain: true,
            require_matching_alt_loc: true,
            infer_from_distance: true,
        }
    }
}

impl BondConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("bonds.max-covalent-radius", self.max_covalent_radius)?;
        positive("bonds.search-scale", self.search_scale)?;
        positive("bonds.min-factor", self.min_factor)?;
        positive("bonds.max-factor", self.max_factor)?;
        if !(self.vdw_fraction >= 0.0 && self.vdw_fraction.is_finite()) {
            return Err(ConfigError::Invalid {
                field: "bonds.vdw-fraction",
                reason: format!("must be non-negative, got {}", self.vdw_fraction),
            });
        }
        if self.min_factor > self.max_factor {
            return Err(ConfigError::Invalid {
                field: "bonds.min-factor",
                reason: format!(
                    "must not exceed max-factor ({} > {})",
                    self.min_factor, self.max_factor
                ),
            });
        }
        Ok(())
    }
}

/// Thresholds for accepting two nucleotides as a base pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct BasePairConfig {
    pub min_sequence_distance: i32,
    pub centroid_cutoff: f64,
    /// Maximum angle between the two base planes, in degrees.
    pub plane_angle: f64,
    /// Maximum distance of either base centroid from the other base's plane.
    pub plane_height: f64,
    /// Closest O/N contact required between the two bases.
    pub polar_contact: f64,
    pub centroid_cell_size: f64,
}

impl Default for BasePairConfig {
    fn default() -> Self {
        Self {
            min_sequence_distance: 3,
            centroid_cutoff: 8.70,
            plane_angle: 46.0,
            plane_height: 3.20,
            polar_contact: 3.20,
            centroid_cell_size: 4.0,
        }
    }
}

impl BasePairConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("base-pairs.centroid-cutoff", self.centroid_cutoff)?;
        positive("base-pairs.plane-height", self.plane_height)?;
        positive("base-pairs.polar-contact", self.polar_contact)?;
        positive("base-pairs.centroid-cell-size", self.centroid_cell_size)?;
        angle("base-pairs.plane-angle", self.plane_angle)?;
        if self.min_sequence_distance < 0 {
            return Err(ConfigError::Invalid {
                field: "base-pairs.min-sequence-distance",
                reason: "must not be negative".to_string(),
            });
        }
        Ok(())
    }
}

/// Single-linkage clustering of base pairs into duplexes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct DuplexConfig {
    pub sequence_cutoff: i32,
    /// Maximum angle between linked base-pair planes, in degrees.
    pub plane_angle: f64,
    pub min_base_pairs: usize,
}

impl Default for DuplexConfig {
    fn default() -> Self {
        Self {
            sequence_cutoff: 4,
            plane_angle: 20.0,
            min_base_pairs: 3,
        }
    }
}

impl DuplexConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        angle("duplexes.plane-angle", self.plane_angle)?;
        if self.sequence_cutoff < 0 {
            return Err(ConfigError::Invalid {
                field: "duplexes.sequence-cutoff",
                reason: "must not be negative".to_string(),
            });
        }
        if self.min_base_pairs == 0 {
            return Err(ConfigError::Invalid {
                field: "duplexes.min-base-pairs",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

/// Helix axis and enclosing cylinder estimation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct HelixConfig {
    /// Distance from the C1*-C1* midpoint to the estimated helix center.
    pub center_offset: f64,
    /// Added to both ends of the axial extent.
    pub end_padding: f64,
    pub cylinder_radius: f64,
}

impl Default for HelixConfig {
    fn default() -> Self {
        Self {
            center_offset: 5.90,
            end_padding: 1.6,
            cylinder_radius: 8.0,
        }
    }
}

impl HelixConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("helix.center-offset", self.center_offset)?;
        positive("helix.cylinder-radius", self.cylinder_radius)?;
        if !(self.end_padding >= 0.0 && self.end_padding.is_finite()) {
            return Err(ConfigError::Invalid {
                field: "helix.end-padding",
                reason: "must be non-negative".to_string(),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct AnalysisConfig {
    pub bonds: BondConfig,
    pub base_pairs: BasePairConfig,
    pub duplexes: DuplexConfig,
    pub helix: HelixConfig,
}

impl AnalysisConfig {
    pub fn builder() -> AnalysisConfigBuilder {
        AnalysisConfigBuilder::new()
    }

    /// Loads and validates a TOML configuration file. Missing keys take their defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.bonds.validate()?;
        self.base_pairs.validate()?;
        self.duplexes.validate()?;
        self.helix.validate()
    }

    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("must be a positive distance, got {value}"),
        })
    }
}

fn angle(field: &'static str, degrees: f64) -> Result<(), ConfigError> {
    if degrees > 0.0 && degrees <= 90.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("angle must lie in (0, 90] degrees, got {degrees}"),
        })
    }
}

#[derive(Default)]
pub struct AnalysisConfigBuilder {
    config: AnalysisConfig,
}

impl AnalysisConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bonds(mut self, bonds: BondConfig) -> Self {
        self.config.bonds = bonds;
        self
    }
    pub fn base_pairs(mut self, base_pairs: BasePairConfig) -> Self {
        self.config.base_pairs = base_pairs;
        self
    }
    pub fn duplexes(mut self, duplexes: DuplexConfig) -> Self {
        self.config.duplexes = duplexes;
        self
    }
    pub fn helix(mut self, helix: HelixConfig) -> Self {
        self.config.helix = helix;
        self
    }
    pub fn infer_bonds_from_distance(mut self, enabled: bool) -> Self {
        self.config.bonds.infer_from_distance = enabled;
        self
    }
    pub fn centroid_cutoff(mut self, cutoff: f64) -> Self {
        self.config.base_pairs.centroid_cutoff = cutoff;
        self
    }
    pub fn base_pair_plane_angle(mut self, degrees: f64) -> Self {
        self.config.base_pairs.plane_angle = degrees;
        self
    }
    pub fn min_base_pairs(mut self, n: usize) -> Self {
        self.config.duplexes.min_base_pairs = n;
        self
    }
    pub fn cylinder_radius(mut self, radius: f64) -> Self {
        self.config.helix.cylinder_radius = radius;
        self
    }

    pub fn build(self) -> Result<AnalysisConfig, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}
