#![warn(clippy::all)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::too_many_arguments)]
//! Formulation independent machinery of the `cubic-eos` project.
//!
//! The crate contains everything that is needed to evaluate a pure substance
//! with a cubic equation of state of the generic form
//!
//! $$p=\frac{RT}{v-b}-\frac{a\alpha(T)}{(v+\delta_1b)(v+\delta_2b)}$$
//!
//! once the universal constants $\delta_1$, $\delta_2$ and the temperature
//! dependent attractive term $a\alpha(T)$ are provided by a concrete
//! formulation through the [CubicEquationOfState] trait.

/// Print messages with level `Verbosity::Iter` or higher.
#[macro_export]
macro_rules! log_iter {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= Verbosity::Iter {
            println!($($arg)*);
        }
    }
}

/// Print messages with level `Verbosity::Result` or higher.
#[macro_export]
macro_rules! log_result {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= Verbosity::Result {
            println!($($arg)*);
        }
    }
}

/// Field-wise approximate equality.
macro_rules! impl_approx_eq {
    ($name:ident { $($field:ident),+ }) => {
        impl AbsDiffEq for $name {
            type Epsilon = f64;

            fn default_epsilon() -> f64 {
                f64::EPSILON
            }

            fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
                $(self.$field.abs_diff_eq(&other.$field, epsilon))&&+
            }
        }

        impl RelativeEq for $name {
            fn default_max_relative() -> f64 {
                f64::EPSILON
            }

            fn relative_eq(&self, other: &Self, epsilon: f64, max_relative: f64) -> bool {
                $(self.$field.relative_eq(&other.$field, epsilon, max_relative))&&+
            }
        }
    };
}

mod derivatives;
mod equation_of_state;
mod errors;
pub mod parameter;
mod phase;
mod roots;
mod state;
mod temperature_iteration;

pub use derivatives::{
    departures, derivatives_and_departures, first_derivatives, second_derivatives,
    second_derivatives_mixed, Departures, DerivativesAndDepartures, FirstDerivatives,
    MixedDerivatives, SecondDerivatives,
};
pub use equation_of_state::{
    AlphaTerm, CriticalParameters, CubicEquationOfState, Delta, Evaluation,
};
pub use errors::{EosError, EosResult};
pub use phase::{classify, physical_volumes, Phase, PhaseAssignment, PhaseCriterion};
pub use roots::{volume_polynomial, volume_solutions, VolumeRoots};
pub use state::{Branch, State, StateBuilder, StateOptions, StateVec};
pub use temperature_iteration::temperature_iteration;

/// Molar gas constant in J/(mol K) (CODATA 2014).
pub const RGAS: f64 = 8.3144598;

/// Level of detail in the iteration output.
#[derive(Copy, Clone, Debug, PartialOrd, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Do not print output.
    #[default]
    None,
    /// Print information about the success of failure of the iteration.
    Result,
    /// Print a detailed output for every iteration.
    Iter,
}

/// Options for the iterative solvers.
///
/// If the values are [None], solver specific default
/// values are used.
#[derive(Copy, Clone, Debug, Default)]
pub struct SolverOptions {
    /// Maximum number of iterations.
    pub max_iter: Option<usize>,
    /// Tolerance.
    pub tol: Option<f64>,
    /// Iteration output indicated by the [Verbosity] enum.
    pub verbosity: Verbosity,
}

impl From<(Option<usize>, Option<f64>, Option<Verbosity>)> for SolverOptions {
    fn from(options: (Option<usize>, Option<f64>, Option<Verbosity>)) -> Self {
        Self {
            max_iter: options.0,
            tol: options.1,
            verbosity: options.2.unwrap_or(Verbosity::None),
        }
    }
}

impl SolverOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = Some(max_iter);
        self
    }

    pub fn tol(mut self, tol: f64) -> Self {
        self.tol = Some(tol);
        self
    }

    pub fn verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Resolve the options with solver specific defaults.
    pub fn unwrap_or(self, max_iter: usize, tol: f64) -> (usize, f64, Verbosity) {
        (
            self.max_iter.unwrap_or(max_iter),
            self.tol.unwrap_or(tol),
            self.verbosity,
        )
    }
}
