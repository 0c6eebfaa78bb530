use crate::*;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ClosureError {
  #[error("maximum number of closures in shader group exceeded ({limit})")]
  EntryCapacityExceeded { limit: usize },
  #[error("closure pool exhausted: {requested} more bytes requested with {used} of {limit} used")]
  PoolCapacityExceeded {
    requested: usize,
    used: usize,
    limit: usize,
  },
  #[error("maximum number of ior entries exceeded ({limit})")]
  IorCapacityExceeded { limit: usize },
  #[error("invalid {parameter}: {value}")]
  UnrecognizedVariant {
    parameter: &'static str,
    value: String,
  },
  #[error("closure {closure} received a parameter block of another closure kind")]
  ParameterMismatch { closure: ClosureId },
}

impl ClosureError {
  /// the shader emitted more terms than the configured budget allows
  pub fn is_capacity_exceeded(&self) -> bool {
    matches!(
      self,
      Self::EntryCapacityExceeded { .. }
        | Self::PoolCapacityExceeded { .. }
        | Self::IorCapacityExceeded { .. }
    )
  }
}
