use thiserror::Error;

/// Reasons a Lorenz/Gini computation is rejected.
///
/// The computation is all-or-nothing: any of these aborts it before a curve
/// is produced.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LorenzError {
    /// The input sequence contained no regions.
    #[error("dataset contains no regions")]
    EmptyDataset,

    /// A region has zero population, or the resource total is zero.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}
