use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    #[error("Insufficient points: {required} required, {found} supplied")]
    InsufficientPoints { required: usize, found: usize },

    #[error("Point and weight counts differ ({points} points, {weights} weights)")]
    WeightCountMismatch { points: usize, weights: usize },

    #[error("Weights sum to zero")]
    DegenerateWeights,

    #[error("Residue {residue} has no atom named '{atom}'")]
    MissingAtom { residue: String, atom: String },

    #[error("Degenerate direction: {0}")]
    DegenerateDirection(&'static str),
}
