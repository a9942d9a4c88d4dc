//! Description of a thermodynamic state.
//!
//! A [State] is an immutable snapshot that is created once from two of
//! temperature, pressure and molar volume. All derived properties (volume
//! roots, phase assignment and the derivative sets of both branches) are
//! computed during construction.
use crate::derivatives::{
    departures, derivatives_and_departures, first_derivatives, second_derivatives,
    second_derivatives_mixed, Departures, DerivativesAndDepartures, FirstDerivatives,
    MixedDerivatives, SecondDerivatives,
};
use crate::equation_of_state::{AlphaTerm, CubicEquationOfState, Delta, Evaluation};
use crate::errors::{ensure_positive, EosError, EosResult};
use crate::phase::{physical_volumes, Phase, PhaseAssignment, PhaseCriterion};
use crate::roots::{volume_solutions, VolumeRoots};
use crate::{SolverOptions, RGAS};
use approx::{AbsDiffEq, RelativeEq};
use ndarray::ArrayView1;
use std::fmt;
use std::sync::Arc;

mod builder;
mod statevec;
pub use builder::StateBuilder;
pub use statevec::StateVec;

/// Relative tolerance for the pressure of a state given with temperature, pressure and volume.
const TOL_OVERDETERMINED: f64 = 1e-8;

/// Options for the construction of a [State].
#[derive(Debug, Clone, Copy, Default)]
pub struct StateOptions {
    /// Computation path of roots, alpha term and derivatives.
    pub evaluation: Evaluation,
    /// Policy for states with a single physical root.
    pub criterion: PhaseCriterion,
    /// Options of the temperature iteration.
    pub solver: SolverOptions,
}

impl StateOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn evaluation(mut self, evaluation: Evaluation) -> Self {
        self.evaluation = evaluation;
        self
    }

    pub fn criterion(mut self, criterion: PhaseCriterion) -> Self {
        self.criterion = criterion;
        self
    }

    pub fn solver(mut self, solver: SolverOptions) -> Self {
        self.solver = solver;
        self
    }
}

/// Derivatives and departure functions of one physical root.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Branch {
    pub temperature: f64,
    pub pressure: f64,
    pub volume: f64,
    pub first: FirstDerivatives,
    pub second: SecondDerivatives,
    pub mixed: MixedDerivatives,
    pub departures: Departures,
}

impl_approx_eq!(Branch {
    temperature,
    pressure,
    volume,
    first,
    second,
    mixed,
    departures
});

impl Branch {
    fn new(temperature: f64, pressure: f64, volume: f64, d: DerivativesAndDepartures) -> Self {
        Self {
            temperature,
            pressure,
            volume,
            first: d.first,
            second: d.second,
            mixed: d.mixed,
            departures: d.departures,
        }
    }

    /// Compressibility factor $Z=\frac{Pv}{RT}$
    pub fn compressibility(&self) -> f64 {
        self.pressure * self.volume / (RGAS * self.temperature)
    }

    /// Isobaric expansivity $\frac{1}{v}\left(\frac{\partial v}{\partial T}\right)_P$
    pub fn isobaric_expansivity(&self) -> f64 {
        self.first.dv_dt / self.volume
    }

    /// Isothermal compressibility $-\frac{1}{v}\left(\frac{\partial v}{\partial P}\right)_T$
    pub fn isothermal_compressibility(&self) -> f64 {
        -self.first.dv_dp / self.volume
    }

    /// Phase identification parameter
    /// $\Pi=v\left(\frac{P_{TV}}{P_T}-\frac{P_{VV}}{P_V}\right)$
    ///
    /// Values above one indicate a liquid-like, values below one a gas-like root.
    pub fn phase_identification_parameter(&self) -> f64 {
        self.volume
            * (self.mixed.d2p_dtdv / self.first.dp_dt - self.second.d2p_dv2 / self.first.dp_dv)
    }

    /// Fugacity coefficient $\varphi$
    pub fn fugacity_coefficient(&self) -> f64 {
        self.departures.ln_phi.exp()
    }

    /// Fugacity $f=\varphi P$ in Pa
    pub fn fugacity(&self) -> f64 {
        self.fugacity_coefficient() * self.pressure
    }

    /// Returns `true` if the root is mechanically stable ($P_V<0$).
    pub fn is_mechanically_stable(&self) -> bool {
        self.first.dp_dv < 0.0
    }
}

/// Thermodynamic state of a pure substance described by a cubic equation of state.
#[derive(Debug)]
pub struct State<E> {
    /// Equation of state
    pub eos: Arc<E>,
    /// Temperature $T$ in K
    pub temperature: f64,
    /// Pressure $P$ in Pa
    pub pressure: f64,
    /// Molar volume $v$ in m³/mol
    pub volume: f64,
    /// Label of the stable phase
    pub phase: Phase,
    /// All three roots of the cubic at $T$ and $P$
    pub roots: VolumeRoots,
    /// Attractive term at $T$
    pub alpha: AlphaTerm,
    /// Liquid branch (smallest physical root)
    pub liquid: Branch,
    /// Gas branch (largest physical root)
    pub gas: Branch,
    /// Options used to create the state
    pub options: StateOptions,
}

impl<E> Clone for State<E> {
    fn clone(&self) -> Self {
        Self {
            eos: self.eos.clone(),
            temperature: self.temperature,
            pressure: self.pressure,
            volume: self.volume,
            phase: self.phase,
            roots: self.roots,
            alpha: self.alpha,
            liquid: self.liquid,
            gas: self.gas,
            options: self.options,
        }
    }
}

impl<E> fmt::Display for State<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "T = {:.5} K, P = {:.5e} Pa, v = {:.5e} m³/mol, phase = {}",
            self.temperature, self.pressure, self.volume, self.phase
        )
    }
}

/// # State constructors
impl<E: CubicEquationOfState> State<E> {
    /// Return a new `State` for the combination of inputs.
    ///
    /// Exactly two of temperature, pressure and volume determine the state.
    /// If all three are given, the pressure has to be consistent with the
    /// equation of state. The [StateBuilder] provides a convenient way of
    /// calling this function.
    ///
    /// # Errors
    ///
    /// When fewer than two inputs are given, when the inputs are inconsistent
    /// or when the formulation is not parameterized.
    pub fn new(
        eos: &Arc<E>,
        temperature: Option<f64>,
        pressure: Option<f64>,
        volume: Option<f64>,
        options: StateOptions,
    ) -> EosResult<Self> {
        match (temperature, pressure, volume) {
            (Some(t), Some(p), None) => Self::new_tp(eos, t, p, options),
            (Some(t), None, Some(v)) => Self::new_tv(eos, t, v, options),
            (None, Some(p), Some(v)) => Self::new_pv(eos, p, v, options),
            (Some(t), Some(p), Some(v)) => {
                let p_eos = eos.pressure(t, v)?;
                if (p_eos - p).abs() > TOL_OVERDETERMINED * p.abs() {
                    return Err(EosError::OverdeterminedState(format!(
                        "pressure {p} Pa is inconsistent with {p_eos} Pa at T = {t} K and v = {v} m³/mol"
                    )));
                }
                Self::solve(eos, t, p, Some(v), options)
            }
            _ => Err(EosError::UndeterminedState(String::from(
                "Exactly two of temperature, pressure and volume are required",
            ))),
        }
    }

    /// Return a new `State` at given temperature and pressure.
    ///
    /// The molar volume is the root of the stable phase.
    pub fn new_tp(
        eos: &Arc<E>,
        temperature: f64,
        pressure: f64,
        options: StateOptions,
    ) -> EosResult<Self> {
        Self::solve(eos, temperature, pressure, None, options)
    }

    /// Return a new `State` at given temperature and molar volume.
    pub fn new_tv(
        eos: &Arc<E>,
        temperature: f64,
        volume: f64,
        options: StateOptions,
    ) -> EosResult<Self> {
        let pressure = ensure_positive("state", "pressure", eos.pressure(temperature, volume)?)?;
        Self::solve(eos, temperature, pressure, Some(volume), options)
    }

    /// Return a new `State` at given pressure and molar volume.
    pub fn new_pv(
        eos: &Arc<E>,
        pressure: f64,
        volume: f64,
        options: StateOptions,
    ) -> EosResult<Self> {
        let temperature =
            eos.solve_temperature(pressure, volume, options.evaluation, options.solver)?;
        Self::solve(eos, temperature, pressure, Some(volume), options)
    }

    fn solve(
        eos: &Arc<E>,
        temperature: f64,
        pressure: f64,
        volume: Option<f64>,
        options: StateOptions,
    ) -> EosResult<Self> {
        let b = eos.critical_parameters()?.b;
        let alpha = eos.a_alpha_and_derivatives(temperature, options.evaluation)?;
        let roots = volume_solutions(
            temperature,
            pressure,
            b,
            alpha.a_alpha,
            &eos.delta(),
            options.evaluation,
        )?;
        Self::from_solution(eos, temperature, pressure, volume, roots, alpha, options)
    }

    /// Assemble the state from a solution of the equation of state.
    ///
    /// Classifies the roots and evaluates the derivative sets of the liquid and
    /// the gas branch with the computation path given in `options`. If
    /// `volume` is `None`, the volume of the stable phase is used.
    pub fn from_solution(
        eos: &Arc<E>,
        temperature: f64,
        pressure: f64,
        volume: Option<f64>,
        roots: VolumeRoots,
        alpha: AlphaTerm,
        options: StateOptions,
    ) -> EosResult<Self> {
        let b = eos.critical_parameters()?.b;
        let delta = eos.delta();
        let evaluate = |v: f64| {
            branch_derivatives(temperature, pressure, v, b, &alpha, &delta, options.evaluation)
        };

        let (v_l, v_g) = physical_volumes(&roots, temperature, pressure, b)?;
        let liquid = evaluate(v_l);
        let gas = if v_g == v_l { liquid } else { evaluate(v_g) };
        let assignment = PhaseAssignment::new(
            temperature,
            pressure,
            (v_l, v_g),
            options.criterion.threshold(&delta),
            [liquid.departures.ln_phi, gas.departures.ln_phi],
        );
        let volume = volume.unwrap_or_else(|| assignment.volume());

        Ok(Self {
            eos: eos.clone(),
            temperature,
            pressure,
            volume,
            phase: assignment.phase,
            roots,
            alpha,
            liquid: Branch::new(temperature, pressure, v_l, liquid),
            gas: Branch::new(temperature, pressure, v_g, gas),
            options,
        })
    }

    /// States along an isotherm for every given pressure.
    pub fn isotherm(
        eos: &Arc<E>,
        temperature: f64,
        pressures: ArrayView1<f64>,
        options: StateOptions,
    ) -> EosResult<Vec<Self>> {
        pressures
            .iter()
            .map(|&p| Self::new_tp(eos, temperature, p, options))
            .collect()
    }
}

#[cfg(feature = "rayon")]
impl<E: CubicEquationOfState + Send + Sync> State<E> {
    /// States along an isotherm evaluated in parallel chunks of `chunksize` pressures.
    pub fn par_isotherm(
        eos: &Arc<E>,
        temperature: f64,
        pressures: ArrayView1<f64>,
        chunksize: usize,
        thread_pool: rayon::ThreadPool,
        options: StateOptions,
    ) -> EosResult<Vec<Self>> {
        use ndarray::Axis;
        use rayon::prelude::*;

        let chunks: Vec<Vec<Self>> = thread_pool.install(|| {
            pressures
                .axis_chunks_iter(Axis(0), chunksize)
                .into_par_iter()
                .map(|p| Self::isotherm(eos, temperature, p, options))
                .collect::<EosResult<_>>()
        })?;
        Ok(chunks.into_iter().flatten().collect())
    }
}

impl<E: CubicEquationOfState> State<E> {
    /// Real roots larger than the covolume of the formulation.
    pub fn physical_roots(&self) -> EosResult<Vec<f64>> {
        let b = self.eos.critical_parameters()?.b;
        Ok(self
            .roots
            .iter()
            .filter(|r| r.im == 0.0 && r.re > b)
            .map(|r| r.re)
            .collect())
    }
}

impl<E> State<E> {
    /// The branch of the stable phase.
    pub fn stable(&self) -> &Branch {
        self.branch(self.phase)
    }

    /// The branch of the given phase.
    pub fn branch(&self, phase: Phase) -> &Branch {
        match phase {
            Phase::Liquid => &self.liquid,
            Phase::Gas => &self.gas,
        }
    }

    /// Compressibility factor of the state.
    pub fn compressibility(&self) -> f64 {
        self.pressure * self.volume / (RGAS * self.temperature)
    }
}

fn branch_derivatives(
    temperature: f64,
    pressure: f64,
    volume: f64,
    b: f64,
    alpha: &AlphaTerm,
    delta: &Delta,
    evaluation: Evaluation,
) -> DerivativesAndDepartures {
    match evaluation {
        Evaluation::Quick => {
            derivatives_and_departures(temperature, pressure, volume, b, alpha, delta)
        }
        Evaluation::Literal => DerivativesAndDepartures {
            first: first_derivatives(temperature, volume, b, alpha, delta),
            second: second_derivatives(temperature, volume, b, alpha, delta),
            mixed: second_derivatives_mixed(temperature, volume, b, alpha, delta),
            departures: departures(temperature, pressure, volume, b, alpha, delta),
        },
    }
}
