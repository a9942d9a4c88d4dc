//! Cubic equations of state of the van der Waals family for a single substance.
//!
//! The generic pressure equation
//!
//! $$p=\frac{RT}{v-b}-\frac{a\alpha(T)}{(v+\delta_1b)(v+\delta_2b)}$$
//!
//! is parameterized by the universal constants $\delta_1$, $\delta_2$, the
//! critical constants $\Omega_a$, $\Omega_b$ and a Soave-type alpha function.
use cubic_eos_core::parameter::CriticalRecord;
use cubic_eos_core::{
    AlphaTerm, CriticalParameters, CubicEquationOfState, Delta, EosError, EosResult,
    Evaluation, RGAS,
};
use num_dual::DualNum;
use std::fmt;

mod alpha;
pub use alpha::{
    alpha_and_derivatives, Alpha, AlphaFunction, PengRobinson1976, PengRobinson1978,
    RedlichKwong1972,
};

/// Critical constants $\Omega_a$ and $\Omega_b$ of a formulation.
///
/// The values are the solution of the critical conditions for the
/// respective $\delta_1$ and $\delta_2$ and are not recomputed at runtime.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelConstants {
    pub omega_a: f64,
    pub omega_b: f64,
}

impl ModelConstants {
    pub const PENG_ROBINSON: Self = Self {
        omega_a: 0.45723552892138218,
        omega_b: 0.07779607390388846,
    };

    pub const REDLICH_KWONG: Self = Self {
        omega_a: 0.42748023354034140,
        omega_b: 0.08664034996495772,
    };

    /// Attractive parameter $a=\Omega_a\frac{R^2T_c^2}{p_c}$ and covolume $b=\Omega_b\frac{RT_c}{p_c}$.
    pub fn compute_ab(&self, tc: f64, pc: f64) -> (f64, f64) {
        let rtc = RGAS * tc;
        (self.omega_a * rtc * rtc / pc, self.omega_b * rtc / pc)
    }
}

#[derive(Debug, Clone, Copy)]
struct Model {
    constants: ModelConstants,
    alpha: Alpha,
    kappa: f64,
    parameters: CriticalParameters,
}

/// A cubic equation of state for a single substance.
///
/// Concrete formulations are created with [Cubic::peng_robinson],
/// [Cubic::peng_robinson_1978] and [Cubic::soave_redlich_kwong]. The
/// formulation created with [Cubic::generic] only knows $\delta_1$ and
/// $\delta_2$ and returns [EosError::Unparameterized] from every method that
/// requires $a$, $b$ or $\alpha$.
#[derive(Debug, Clone)]
pub struct Cubic {
    record: CriticalRecord,
    delta: Delta,
    name: String,
    model: Option<Model>,
}

impl Cubic {
    /// Build a parameterized formulation.
    pub fn new(
        name: &str,
        record: CriticalRecord,
        delta: Delta,
        constants: ModelConstants,
        alpha: Alpha,
    ) -> EosResult<Self> {
        record.validate()?;
        let (a, b) = constants.compute_ab(record.tc, record.pc);
        let parameters = CriticalParameters::new(a, b)?;
        let kappa = alpha.kappa(record.acentric_factor);
        Ok(Self {
            record,
            delta,
            name: name.into(),
            model: Some(Model {
                constants,
                alpha,
                kappa,
                parameters,
            }),
        })
    }

    /// Peng-Robinson (1976) equation of state.
    pub fn peng_robinson(record: CriticalRecord) -> EosResult<Self> {
        Self::new(
            "Peng-Robinson",
            record,
            Delta::PENG_ROBINSON,
            ModelConstants::PENG_ROBINSON,
            PengRobinson1976.into(),
        )
    }

    /// Peng-Robinson equation of state with the 1978 correlation for $\kappa$.
    pub fn peng_robinson_1978(record: CriticalRecord) -> EosResult<Self> {
        Self::new(
            "Peng-Robinson (1978)",
            record,
            Delta::PENG_ROBINSON,
            ModelConstants::PENG_ROBINSON,
            PengRobinson1978.into(),
        )
    }

    /// Soave-Redlich-Kwong equation of state.
    pub fn soave_redlich_kwong(record: CriticalRecord) -> EosResult<Self> {
        Self::new(
            "Soave-Redlich-Kwong",
            record,
            Delta::REDLICH_KWONG,
            ModelConstants::REDLICH_KWONG,
            RedlichKwong1972.into(),
        )
    }

    /// Unparameterized formulation that only provides the generic arithmetic.
    pub fn generic(record: CriticalRecord, delta: Delta) -> Self {
        Self {
            record,
            delta,
            name: String::from("generic cubic"),
            model: None,
        }
    }

    pub fn record(&self) -> &CriticalRecord {
        &self.record
    }

    /// Shape parameter of the alpha function.
    pub fn kappa(&self) -> EosResult<f64> {
        Ok(self.model("a shape parameter")?.kappa)
    }

    pub fn constants(&self) -> EosResult<ModelConstants> {
        Ok(self.model("critical constants")?.constants)
    }

    pub fn alpha(&self) -> EosResult<Alpha> {
        Ok(self.model("an alpha function")?.alpha)
    }

    fn model(&self, property: &str) -> EosResult<&Model> {
        self.model
            .as_ref()
            .ok_or_else(|| EosError::Unparameterized(self.name.clone(), property.into()))
    }
}

impl fmt::Display for Cubic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.record)
    }
}

impl CubicEquationOfState for Cubic {
    fn delta(&self) -> Delta {
        self.delta
    }

    fn critical_parameters(&self) -> EosResult<CriticalParameters> {
        Ok(self.model("critical parameters")?.parameters)
    }

    fn a_alpha<D: DualNum<f64> + Copy>(&self, temperature: D) -> EosResult<D> {
        let m = self.model("an alpha function")?;
        Ok(m.alpha.alpha(m.kappa, temperature / self.record.tc) * m.parameters.a)
    }

    fn a_alpha_and_derivatives_quick(&self, temperature: f64) -> EosResult<AlphaTerm> {
        let m = self.model("an alpha function")?;
        Ok(alpha_and_derivatives(
            temperature,
            self.record.tc,
            m.kappa,
            m.parameters.a,
            Evaluation::Quick,
        ))
    }

    /// Closed form temperature for given pressure and volume.
    ///
    /// With $s=\sqrt{T}$ the pressure equation is a quadratic in $s$ for
    /// Soave-type alpha functions.
    fn temperature_estimate(&self, pressure: f64, volume: f64) -> EosResult<f64> {
        let m = self.model("a temperature estimate")?;
        let CriticalParameters { a, b } = m.parameters;
        let den = self.delta.denominator(volume, b);
        let c_a = 1.0 + m.kappa;
        let c_b = m.kappa / self.record.tc.sqrt();

        let qa = RGAS / (volume - b) - a * c_b * c_b / den;
        let qb = 2.0 * a * c_a * c_b / den;
        let qc = -(a * c_a * c_a / den + pressure);
        let s = (-qb + (qb * qb - 4.0 * qa * qc).sqrt()) / (2.0 * qa);
        let t = s * s;
        if s.is_finite() && s > 0.0 {
            Ok(t)
        } else {
            Ok((pressure + a / den) * (volume - b) / RGAS)
        }
    }
}
