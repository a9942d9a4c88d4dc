use super::{State, StateOptions};
use crate::equation_of_state::{CubicEquationOfState, Evaluation};
use crate::errors::EosResult;
use crate::phase::PhaseCriterion;
use crate::SolverOptions;
use std::sync::Arc;

/// A simple tool to construct [State]s with arbitrary input parameters.
///
/// # Examples
/// ```
/// # use cubic_eos_core::{AlphaTerm, CriticalParameters, CubicEquationOfState, Delta, EosResult, Phase, StateBuilder};
/// # use num_dual::DualNum;
/// # use std::sync::Arc;
/// # struct VanDerWaals;
/// # impl std::fmt::Display for VanDerWaals {
/// #     fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { write!(f, "vdW") }
/// # }
/// # impl CubicEquationOfState for VanDerWaals {
/// #     fn delta(&self) -> Delta { Delta::VAN_DER_WAALS }
/// #     fn critical_parameters(&self) -> EosResult<CriticalParameters> { CriticalParameters::new(0.1362, 3.22e-5) }
/// #     fn a_alpha<D: DualNum<f64> + Copy>(&self, _: D) -> EosResult<D> { Ok(D::from(0.1362)) }
/// #     fn a_alpha_and_derivatives_quick(&self, _: f64) -> EosResult<AlphaTerm> { Ok(AlphaTerm::new(0.1362, 0.0, 0.0)) }
/// # }
/// # fn main() -> EosResult<()> {
/// let eos = Arc::new(VanDerWaals);
/// let state = StateBuilder::new(&eos)
///     .temperature(300.0)
///     .pressure(1e5)
///     .build()?;
/// assert_eq!(state.phase, Phase::Gas);
///
/// // the same state from pressure and volume using the literal computation path
/// let literal = StateBuilder::new(&eos)
///     .pressure(1e5)
///     .volume(state.volume)
///     .literal()
///     .build()?;
/// assert!((literal.temperature - 300.0).abs() < 1e-6);
/// # Ok(())
/// # }
/// ```
pub struct StateBuilder<E> {
    eos: Arc<E>,
    temperature: Option<f64>,
    pressure: Option<f64>,
    volume: Option<f64>,
    options: StateOptions,
}

impl<E: CubicEquationOfState> StateBuilder<E> {
    /// Create a new `StateBuilder` for the given equation of state.
    pub fn new(eos: &Arc<E>) -> Self {
        StateBuilder {
            eos: eos.clone(),
            temperature: None,
            pressure: None,
            volume: None,
            options: StateOptions::default(),
        }
    }

    /// Provide the temperature in K for the new state.
    pub fn temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Provide the pressure in Pa for the new state.
    pub fn pressure(mut self, pressure: f64) -> Self {
        self.pressure = Some(pressure);
        self
    }

    /// Provide the molar volume in m³/mol for the new state.
    pub fn volume(mut self, volume: f64) -> Self {
        self.volume = Some(volume);
        self
    }

    /// Use the closed form computation path (default).
    pub fn quick(mut self) -> Self {
        self.options.evaluation = Evaluation::Quick;
        self
    }

    /// Use the literal computation path.
    pub fn literal(mut self) -> Self {
        self.options.evaluation = Evaluation::Literal;
        self
    }

    /// Select the computation path.
    pub fn evaluation(mut self, evaluation: Evaluation) -> Self {
        self.options.evaluation = evaluation;
        self
    }

    /// Policy for states with a single physical root.
    pub fn phase_criterion(mut self, criterion: PhaseCriterion) -> Self {
        self.options.criterion = criterion;
        self
    }

    /// Options of the temperature iteration.
    pub fn solver_options(mut self, options: SolverOptions) -> Self {
        self.options.solver = options;
        self
    }

    /// Try to build the state with the given inputs.
    pub fn build(self) -> EosResult<State<E>> {
        State::new(
            &self.eos,
            self.temperature,
            self.pressure,
            self.volume,
            self.options,
        )
    }
}
