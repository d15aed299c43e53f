//! Error types for the dice core.

/// Errors that can occur while interpreting dice input.
///
/// Rolling itself never fails; these only surface when text is turned into
/// dice kinds or groups at the input boundary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    /// A die label did not name one of the supported shapes.
    #[error("unknown die: {0}")]
    UnknownDie(String),

    /// A dice group token such as `2d6` could not be parsed.
    #[error("invalid dice group: {0}")]
    InvalidGroup(String),

    /// A preset lookup by name found nothing.
    #[error("preset not found: {0}")]
    PresetNotFound(String),
}

/// Convenience result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;
