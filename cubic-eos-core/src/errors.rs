use thiserror::Error;

/// Error type for improperly defined states, unparameterized formulations and convergence problems.
#[derive(Error, Debug)]
pub enum EosError {
    #[error("Undetermined state: {0}.")]
    UndeterminedState(String),
    #[error("Overdetermined state: {0}.")]
    OverdeterminedState(String),
    #[error("The {0} formulation does not provide {1}.")]
    Unparameterized(String, String),
    #[error("`{0}` did not converge within the maximum number of iterations.")]
    NotConverged(String),
    #[error("`{0}` encountered illegal values during the iteration.")]
    IterationFailed(String),
    #[error("Invalid state in {0}: {1} = {2}.")]
    InvalidState(String, String, f64),
    #[error("No physical volume root at T = {0} K and p = {1} Pa.")]
    NoPhysicalRoot(f64, f64),
    #[cfg(feature = "rayon")]
    #[error(transparent)]
    RayonError(#[from] rayon::ThreadPoolBuildError),
}

/// Convenience type for `Result<T, EosError>`.
pub type EosResult<T> = Result<T, EosError>;

/// Return an [EosError::InvalidState] if `value` is not finite and strictly positive.
pub(crate) fn ensure_positive(context: &str, name: &str, value: f64) -> EosResult<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(EosError::InvalidState(
            String::from(context),
            String::from(name),
            value,
        ))
    }
}
