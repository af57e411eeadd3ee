use thiserror::Error;

pub type HfResult<T> = Result<T, HfError>;

/// Errors shared across hvacflow crates.
///
/// Every crate-level error converts into one of these at the top of the
/// stack; the split mirrors how a run aborts.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HfError {
    /// The model input cannot be simulated as given.
    #[error("Configuration error: {what}")]
    Configuration { what: String },

    #[error("Invariant violated: {what}")]
    Invariant { what: String },
}

impl HfError {
    /// Whether fixing the model input can resolve this error.
    pub fn is_configuration(&self) -> bool {
        matches!(self, HfError::Configuration { .. })
    }
}
