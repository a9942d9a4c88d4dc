#![warn(clippy::all)]
#![allow(clippy::too_many_arguments)]
//! Cubic equations of state for pure substances.
//!
//! Given two of temperature, pressure and molar volume, a [State] holds the
//! third variable, the liquid and gas roots of the cubic, the label of the
//! stable phase and analytic first and second order derivatives together
//! with departure functions for both branches.
//!
//! ```
//! # use cubic_eos::cubic::Cubic;
//! # use cubic_eos::{CriticalRecord, EosResult, Phase, StateBuilder};
//! # use std::sync::Arc;
//! # fn main() -> EosResult<()> {
//! let hexane = CriticalRecord::new(507.6, 3.025e6, 0.2975);
//! let eos = Arc::new(Cubic::peng_robinson(hexane)?);
//! let state = StateBuilder::new(&eos)
//!     .temperature(299.0)
//!     .pressure(1e6)
//!     .build()?;
//! assert_eq!(state.phase, Phase::Liquid);
//! assert!((state.volume - 1.3022208e-4).abs() < 1e-10);
//! # Ok(())
//! # }
//! ```

pub mod cubic;

pub use cubic_eos_core::parameter::CriticalRecord;
pub use cubic_eos_core::{
    CubicEquationOfState, Delta, EosError, EosResult, Evaluation, Phase, PhaseCriterion,
    SolverOptions, State, StateBuilder, StateOptions, StateVec, Verbosity, RGAS,
};
