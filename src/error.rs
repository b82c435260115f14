use thiserror::Error;

/// Errors raised by the analysis operations.
///
/// Undefined correlations are not errors; they are carried as `None`
/// inside [`crate::analysis::CorrelationMatrix`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    /// Empty selection, or a label outside the species set.
    #[error("invalid selection: {0}")]
    InvalidSelection(String),

    /// Too few samples for the requested statistic.
    #[error("insufficient data: need at least {required} samples, got {actual}")]
    InsufficientData { required: usize, actual: usize },
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
