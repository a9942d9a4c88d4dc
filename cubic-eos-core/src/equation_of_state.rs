use crate::errors::{ensure_positive, EosResult};
use crate::roots::{volume_solutions, VolumeRoots};
use crate::temperature_iteration::temperature_iteration;
use crate::{SolverOptions, RGAS};
use approx::{AbsDiffEq, RelativeEq};
use num_dual::{Dual2_64, DualNum};
use std::f64::consts::SQRT_2;
use std::fmt;

/// Universal constants of the generic cubic equation of state.
///
/// The attractive term of the pressure reads $a\alpha/((v+\delta_1b)(v+\delta_2b))$.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Delta {
    pub d1: f64,
    pub d2: f64,
    pub d12: f64,
}

impl From<(f64, f64)> for Delta {
    fn from(value: (f64, f64)) -> Self {
        Delta {
            d1: value.0,
            d2: value.1,
            d12: value.0 - value.1,
        }
    }
}

impl Delta {
    /// $\delta_1 = 1 + \sqrt{2}$, $\delta_2 = 1 - \sqrt{2}$
    pub const PENG_ROBINSON: Delta = Delta {
        d1: 1.0 + SQRT_2,
        d2: 1.0 - SQRT_2,
        d12: 2.0 * SQRT_2,
    };

    /// $\delta_1 = 1$, $\delta_2 = 0$
    pub const REDLICH_KWONG: Delta = Delta {
        d1: 1.0,
        d2: 0.0,
        d12: 1.0,
    };

    /// $\delta_1 = \delta_2 = 0$
    pub const VAN_DER_WAALS: Delta = Delta {
        d1: 0.0,
        d2: 0.0,
        d12: 0.0,
    };

    /// Universal critical constants $(\Omega_a, \Omega_b, Z_c)$ of the formulation.
    ///
    /// See https://doi.org/10.1016/j.fluid.2012.05.008
    pub fn critical_constants(&self) -> (f64, f64, f64) {
        let (r1, r2) = (-self.d1, -self.d2);
        let eta_c = 1.0
            / (((1.0 - r1) * (1.0 - r2).powi(2)).cbrt()
                + ((1.0 - r2) * (1.0 - r1).powi(2)).cbrt()
                + 1.0);
        let omega_a = (1.0 - eta_c * r1) * (1.0 - eta_c * r2) / (1.0 - eta_c)
            * (2.0 - eta_c * (r1 + r2))
            / (3.0 - eta_c * (1.0 + r1 + r2)).powi(2);
        let omega_b = eta_c / (3.0 - eta_c * (1.0 + r1 + r2));
        (omega_a, omega_b, omega_b / eta_c)
    }

    /// Denominator $(v+\delta_1b)(v+\delta_2b)$ of the attractive term.
    #[inline]
    pub fn denominator<D: DualNum<f64> + Copy>(&self, volume: D, b: f64) -> D {
        (volume + b * self.d1) * (volume + b * self.d2)
    }

    /// Pressure of the generic cubic equation of state.
    pub fn pressure<D: DualNum<f64> + Copy>(
        &self,
        temperature: D,
        volume: D,
        b: f64,
        a_alpha: D,
    ) -> D {
        temperature * RGAS / (volume - b) - a_alpha / self.denominator(volume, b)
    }

    /// $\int_v^\infty\frac{\mathrm{d}v'}{(v'+\delta_1b)(v'+\delta_2b)}$
    pub fn attraction_integral(&self, volume: f64, b: f64) -> f64 {
        if self.d12.abs() < f64::EPSILON {
            (volume + self.d1 * b).recip()
        } else {
            ((volume + self.d1 * b) / (volume + self.d2 * b)).ln() / (self.d12 * b)
        }
    }
}

/// Attractive and repulsive parameters $a$ and $b$ at the critical point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CriticalParameters {
    /// attractive parameter in Pa m⁶/mol²
    pub a: f64,
    /// covolume in m³/mol
    pub b: f64,
}

impl CriticalParameters {
    pub fn new(a: f64, b: f64) -> EosResult<Self> {
        ensure_positive("critical parameters", "a", a)?;
        ensure_positive("critical parameters", "b", b)?;
        Ok(Self { a, b })
    }
}

/// The temperature dependent attractive term and its temperature derivatives.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlphaTerm {
    pub a_alpha: f64,
    pub da_alpha_dt: f64,
    pub d2a_alpha_dt2: f64,
}

impl AlphaTerm {
    pub fn new(a_alpha: f64, da_alpha_dt: f64, d2a_alpha_dt2: f64) -> Self {
        Self {
            a_alpha,
            da_alpha_dt,
            d2a_alpha_dt2,
        }
    }
}

impl_approx_eq!(AlphaTerm {
    a_alpha,
    da_alpha_dt,
    d2a_alpha_dt2
});

/// Computation path used by the solvers and the derivative engine.
///
/// Both paths fulfill the same postconditions and agree to floating point
/// tolerance. `Quick` uses hand-reduced closed forms, `Literal` evaluates
/// the defining expressions directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Evaluation {
    #[default]
    Quick,
    Literal,
}

/// A cubic equation of state for a single substance.
///
/// Implementors provide the universal constants and the attractive term.
/// Formulations without concrete constants return
/// [EosError::Unparameterized](crate::EosError::Unparameterized) from
/// every method that requires them, while the generic arithmetic that
/// only needs $\delta_1$ and $\delta_2$ stays available.
pub trait CubicEquationOfState: fmt::Display {
    /// Universal constants of the formulation.
    fn delta(&self) -> Delta;

    /// The parameters $a$ and $b$ of the substance.
    fn critical_parameters(&self) -> EosResult<CriticalParameters>;

    /// The attractive term $a\alpha(T)$ for arbitrary (dual) temperatures.
    fn a_alpha<D: DualNum<f64> + Copy>(&self, temperature: D) -> EosResult<D>;

    /// Closed form evaluation of $a\alpha$ and its first two temperature derivatives.
    fn a_alpha_and_derivatives_quick(&self, temperature: f64) -> EosResult<AlphaTerm>;

    /// Initial value for the temperature iteration at given pressure and volume.
    ///
    /// The default neglects the temperature dependence of $\alpha$.
    fn temperature_estimate(&self, pressure: f64, volume: f64) -> EosResult<f64> {
        let CriticalParameters { a, b } = self.critical_parameters()?;
        let delta = self.delta();
        Ok((pressure + a / delta.denominator(volume, b)) * (volume - b) / RGAS)
    }

    /// $a\alpha$ and its temperature derivatives using the selected computation path.
    fn a_alpha_and_derivatives(
        &self,
        temperature: f64,
        evaluation: Evaluation,
    ) -> EosResult<AlphaTerm> {
        ensure_positive("alpha function", "temperature", temperature)?;
        match evaluation {
            Evaluation::Quick => self.a_alpha_and_derivatives_quick(temperature),
            Evaluation::Literal => {
                let a_alpha = self.a_alpha(Dual2_64::from(temperature).derivative())?;
                Ok(AlphaTerm::new(a_alpha.re, a_alpha.v1, a_alpha.v2))
            }
        }
    }

    /// Pressure at given temperature and molar volume.
    fn pressure(&self, temperature: f64, volume: f64) -> EosResult<f64> {
        let b = self.critical_parameters()?.b;
        ensure_positive("pressure", "temperature", temperature)?;
        ensure_positive("pressure", "volume - b", volume - b)?;
        let a_alpha = self.a_alpha(temperature)?;
        Ok(self.delta().pressure(temperature, volume, b, a_alpha))
    }

    /// The three (possibly complex) volume roots at given temperature and pressure.
    fn volume_solutions(
        &self,
        temperature: f64,
        pressure: f64,
        evaluation: Evaluation,
    ) -> EosResult<VolumeRoots> {
        let b = self.critical_parameters()?.b;
        let alpha = self.a_alpha_and_derivatives(temperature, evaluation)?;
        volume_solutions(
            temperature,
            pressure,
            b,
            alpha.a_alpha,
            &self.delta(),
            evaluation,
        )
    }

    /// Temperature at given pressure and molar volume.
    fn solve_temperature(
        &self,
        pressure: f64,
        volume: f64,
        evaluation: Evaluation,
        options: SolverOptions,
    ) -> EosResult<f64>
    where
        Self: Sized,
    {
        temperature_iteration(self, pressure, volume, evaluation, options)
    }

    /// Critical compressibility factor of the formulation.
    fn critical_compressibility(&self) -> f64 {
        self.delta().critical_constants().2
    }
}
