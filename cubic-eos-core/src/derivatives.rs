//! Analytic partial derivatives and departure functions.
//!
//! All functions are pure and evaluated on a single branch (liquid or gas)
//! defined by its temperature and molar volume. Derivatives of the pressure
//! follow from direct differentiation of the equation of state, derivatives
//! of volume and temperature from the implicit function theorem.
use crate::equation_of_state::{AlphaTerm, Delta};
use crate::RGAS;
use approx::{AbsDiffEq, RelativeEq};

/// First partial derivatives among temperature, pressure and volume.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FirstDerivatives {
    pub dp_dt: f64,
    pub dp_dv: f64,
    pub dv_dt: f64,
    pub dv_dp: f64,
    pub dt_dv: f64,
    pub dt_dp: f64,
}

impl FirstDerivatives {
    /// `[dP_dT, dP_dV, dV_dT, dV_dP, dT_dV, dT_dP]`
    pub fn to_array(&self) -> [f64; 6] {
        [
            self.dp_dt, self.dp_dv, self.dv_dt, self.dv_dp, self.dt_dv, self.dt_dp,
        ]
    }

    fn from_pressure_derivatives(dp_dt: f64, dp_dv: f64) -> Self {
        let dv_dt = -dp_dt / dp_dv;
        Self {
            dp_dt,
            dp_dv,
            dv_dt,
            dv_dp: dp_dv.recip(),
            dt_dv: dv_dt.recip(),
            dt_dp: dp_dt.recip(),
        }
    }
}

/// Pure second partial derivatives.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SecondDerivatives {
    pub d2p_dt2: f64,
    pub d2p_dv2: f64,
    pub d2v_dt2: f64,
    pub d2v_dp2: f64,
    pub d2t_dv2: f64,
    pub d2t_dp2: f64,
}

/// Mixed second partial derivatives.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MixedDerivatives {
    /// $\left(\frac{\partial^2V}{\partial P\partial T}\right)$ of $V(T,P)$
    pub d2v_dpdt: f64,
    /// $\left(\frac{\partial^2P}{\partial T\partial V}\right)$ of $P(T,V)$
    pub d2p_dtdv: f64,
    /// $\left(\frac{\partial^2T}{\partial P\partial V}\right)$ of $T(P,V)$
    pub d2t_dpdv: f64,
}

/// Residual properties relative to the ideal gas at the same temperature and pressure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Departures {
    /// enthalpy departure in J/mol
    pub enthalpy: f64,
    /// entropy departure in J/(mol K)
    pub entropy: f64,
    /// Gibbs energy departure in J/mol
    pub gibbs_energy: f64,
    /// isochoric heat capacity departure in J/(mol K)
    pub isochoric_heat_capacity: f64,
    /// isobaric heat capacity departure in J/(mol K)
    pub isobaric_heat_capacity: f64,
    /// logarithm of the fugacity coefficient
    pub ln_phi: f64,
}

/// All derivatives and departures of a single branch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivativesAndDepartures {
    pub first: FirstDerivatives,
    pub second: SecondDerivatives,
    pub mixed: MixedDerivatives,
    pub departures: Departures,
}

impl_approx_eq!(FirstDerivatives { dp_dt, dp_dv, dv_dt, dv_dp, dt_dv, dt_dp });
impl_approx_eq!(SecondDerivatives { d2p_dt2, d2p_dv2, d2v_dt2, d2v_dp2, d2t_dv2, d2t_dp2 });
impl_approx_eq!(MixedDerivatives { d2v_dpdt, d2p_dtdv, d2t_dpdv });
impl_approx_eq!(Departures {
    enthalpy,
    entropy,
    gibbs_energy,
    isochoric_heat_capacity,
    isobaric_heat_capacity,
    ln_phi
});
impl_approx_eq!(DerivativesAndDepartures { first, second, mixed, departures });

fn pressure_first(
    temperature: f64,
    volume: f64,
    b: f64,
    alpha: &AlphaTerm,
    delta: &Delta,
) -> (f64, f64) {
    let den = delta.denominator(volume, b);
    let dden = 2.0 * volume + (delta.d1 + delta.d2) * b;
    (
        RGAS / (volume - b) - alpha.da_alpha_dt / den,
        -RGAS * temperature / (volume - b).powi(2) + alpha.a_alpha * dden / (den * den),
    )
}

/// $P_{TT}$, $P_{VV}$ and $P_{TV}$
fn pressure_second(
    temperature: f64,
    volume: f64,
    b: f64,
    alpha: &AlphaTerm,
    delta: &Delta,
) -> (f64, f64, f64) {
    let den = delta.denominator(volume, b);
    let dden = 2.0 * volume + (delta.d1 + delta.d2) * b;
    let d2p_dt2 = -alpha.d2a_alpha_dt2 / den;
    let d2p_dv2 = 2.0 * RGAS * temperature / (volume - b).powi(3)
        + alpha.a_alpha * (2.0 * den - 2.0 * dden * dden) / den.powi(3);
    let d2p_dtdv = -RGAS / (volume - b).powi(2) + alpha.da_alpha_dt * dden / (den * den);
    (d2p_dt2, d2p_dv2, d2p_dtdv)
}

/// $\left(\frac{\partial P}{\partial T}\right)_V$, $\left(\frac{\partial P}{\partial V}\right)_T$ and their reciprocal and implicit counterparts.
pub fn first_derivatives(
    temperature: f64,
    volume: f64,
    b: f64,
    alpha: &AlphaTerm,
    delta: &Delta,
) -> FirstDerivatives {
    let (dp_dt, dp_dv) = pressure_first(temperature, volume, b, alpha, delta);
    FirstDerivatives::from_pressure_derivatives(dp_dt, dp_dv)
}

/// Second partial derivatives of $P(T,V)$, $V(T,P)$ and $T(P,V)$ with respect to a single variable.
pub fn second_derivatives(
    temperature: f64,
    volume: f64,
    b: f64,
    alpha: &AlphaTerm,
    delta: &Delta,
) -> SecondDerivatives {
    let first = first_derivatives(temperature, volume, b, alpha, delta);
    let (d2p_dt2, d2p_dv2, d2p_dtdv) = pressure_second(temperature, volume, b, alpha, delta);
    second_from_pressure(&first, d2p_dt2, d2p_dv2, d2p_dtdv)
}

fn second_from_pressure(
    first: &FirstDerivatives,
    d2p_dt2: f64,
    d2p_dv2: f64,
    d2p_dtdv: f64,
) -> SecondDerivatives {
    let FirstDerivatives {
        dp_dt,
        dp_dv,
        dv_dt,
        dt_dv,
        ..
    } = *first;
    SecondDerivatives {
        d2p_dt2,
        d2p_dv2,
        d2v_dt2: -((d2p_dt2 + d2p_dtdv * dv_dt) * dp_dv - dp_dt * (d2p_dtdv + d2p_dv2 * dv_dt))
            / (dp_dv * dp_dv),
        d2v_dp2: -d2p_dv2 / dp_dv.powi(3),
        d2t_dv2: -((d2p_dv2 + d2p_dtdv * dt_dv) * dp_dt - dp_dv * (d2p_dtdv + d2p_dt2 * dt_dv))
            / (dp_dt * dp_dt),
        d2t_dp2: -d2p_dt2 / dp_dt.powi(3),
    }
}

/// Mixed second partial derivatives.
///
/// $P_{TV}$ is independent of the order of differentiation. The mixed
/// derivatives of $V(T,P)$ and $T(P,V)$ follow from differentiating
/// $V_P=1/P_V$ along an isobar and $T_P=1/P_T$ along an isobar.
pub fn second_derivatives_mixed(
    temperature: f64,
    volume: f64,
    b: f64,
    alpha: &AlphaTerm,
    delta: &Delta,
) -> MixedDerivatives {
    let first = first_derivatives(temperature, volume, b, alpha, delta);
    let (d2p_dt2, d2p_dv2, d2p_dtdv) = pressure_second(temperature, volume, b, alpha, delta);
    mixed_from_pressure(&first, d2p_dt2, d2p_dv2, d2p_dtdv)
}

fn mixed_from_pressure(
    first: &FirstDerivatives,
    d2p_dt2: f64,
    d2p_dv2: f64,
    d2p_dtdv: f64,
) -> MixedDerivatives {
    MixedDerivatives {
        d2v_dpdt: -(d2p_dtdv + d2p_dv2 * first.dv_dt) / (first.dp_dv * first.dp_dv),
        d2p_dtdv,
        d2t_dpdv: -(d2p_dt2 * first.dt_dv + d2p_dtdv) / (first.dp_dt * first.dp_dt),
    }
}

/// Departure functions from closed form integration of the pressure from infinite volume.
pub fn departures(
    temperature: f64,
    pressure: f64,
    volume: f64,
    b: f64,
    alpha: &AlphaTerm,
    delta: &Delta,
) -> Departures {
    let first = first_derivatives(temperature, volume, b, alpha, delta);
    let integral = delta.attraction_integral(volume, b);
    let rt = RGAS * temperature;
    let enthalpy = pressure * volume - rt
        + (temperature * alpha.da_alpha_dt - alpha.a_alpha) * integral;
    let entropy = RGAS * (pressure * (volume - b) / rt).ln() + alpha.da_alpha_dt * integral;
    let gibbs_energy = enthalpy - temperature * entropy;
    let isochoric_heat_capacity = temperature * alpha.d2a_alpha_dt2 * integral;
    Departures {
        enthalpy,
        entropy,
        gibbs_energy,
        isochoric_heat_capacity,
        isobaric_heat_capacity: isochoric_heat_capacity
            - temperature * first.dp_dt * first.dp_dt / first.dp_dv
            - RGAS,
        ln_phi: gibbs_energy / rt,
    }
}

/// Fused evaluation of all derivatives and departures of a branch.
///
/// Shares every subexpression between the individual quantities and agrees
/// with the composition of [first_derivatives], [second_derivatives],
/// [second_derivatives_mixed] and [departures] to floating point tolerance.
pub fn derivatives_and_departures(
    temperature: f64,
    pressure: f64,
    volume: f64,
    b: f64,
    alpha: &AlphaTerm,
    delta: &Delta,
) -> DerivativesAndDepartures {
    let AlphaTerm {
        a_alpha,
        da_alpha_dt: da,
        d2a_alpha_dt2: d2a,
    } = *alpha;
    let rt = RGAS * temperature;
    let x = (volume - b).recip();
    let den = delta.denominator(volume, b);
    let inv_den = den.recip();
    let dden = 2.0 * volume + (delta.d1 + delta.d2) * b;
    let dden_inv_den2 = dden * inv_den * inv_den;

    let dp_dt = RGAS * x - da * inv_den;
    let dp_dv = -rt * x * x + a_alpha * dden_inv_den2;
    let first = FirstDerivatives::from_pressure_derivatives(dp_dt, dp_dv);

    let d2p_dt2 = -d2a * inv_den;
    let d2p_dv2 =
        2.0 * rt * x * x * x + 2.0 * a_alpha * inv_den * inv_den * (1.0 - dden * dden * inv_den);
    let d2p_dtdv = -RGAS * x * x + da * dden_inv_den2;
    let second = second_from_pressure(&first, d2p_dt2, d2p_dv2, d2p_dtdv);
    let mixed = mixed_from_pressure(&first, d2p_dt2, d2p_dv2, d2p_dtdv);

    let integral = delta.attraction_integral(volume, b);
    let enthalpy = pressure * volume - rt + (temperature * da - a_alpha) * integral;
    let entropy = RGAS * (pressure / (rt * x)).ln() + da * integral;
    let gibbs_energy = enthalpy - temperature * entropy;
    let isochoric_heat_capacity = temperature * d2a * integral;
    let departures = Departures {
        enthalpy,
        entropy,
        gibbs_energy,
        isochoric_heat_capacity,
        isobaric_heat_capacity: isochoric_heat_capacity
            - temperature * dp_dt * dp_dt / dp_dv
            - RGAS,
        ln_phi: gibbs_energy / rt,
    };

    DerivativesAndDepartures {
        first,
        second,
        mixed,
        departures,
    }
}
