//! Temperature dependence of the attractive term.
use cubic_eos_core::{AlphaTerm, Evaluation};
use enum_dispatch::enum_dispatch;
use num_dual::{Dual2_64, DualNum};
use serde::{Deserialize, Serialize};

mod soave;
pub use soave::{PengRobinson1976, PengRobinson1978, RedlichKwong1972};

/// Soave-type alpha function $\alpha=\left(1+\kappa\left(1-\sqrt{T/T_c}\right)\right)^2$.
///
/// Implementors only differ in the correlation of the shape parameter
/// $\kappa$ with the acentric factor.
#[enum_dispatch]
pub trait AlphaFunction {
    /// Shape parameter $\kappa(\omega)$.
    fn kappa(&self, acentric_factor: f64) -> f64;

    /// $\alpha$ at the (dual) reduced temperature.
    fn alpha<D: DualNum<f64> + Copy>(&self, kappa: f64, reduced_temperature: D) -> D {
        soave(kappa, reduced_temperature)
    }
}

#[enum_dispatch(AlphaFunction)]
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub enum Alpha {
    PengRobinson1976,
    PengRobinson1978,
    RedlichKwong1972,
}

#[inline]
fn soave<D: DualNum<f64> + Copy>(kappa: f64, reduced_temperature: D) -> D {
    ((-reduced_temperature.sqrt() + 1.0) * kappa + 1.0).powi(2)
}

/// $a\alpha$ and its first two temperature derivatives.
///
/// The quick path evaluates the hand-reduced derivatives, the literal path
/// differentiates $a\alpha(T)$ with second order dual numbers.
pub fn alpha_and_derivatives(
    temperature: f64,
    tc: f64,
    kappa: f64,
    a: f64,
    evaluation: Evaluation,
) -> AlphaTerm {
    match evaluation {
        Evaluation::Quick => {
            let sqrt_ttc = (temperature * tc).sqrt();
            let f = 1.0 + kappa * (1.0 - (temperature / tc).sqrt());
            AlphaTerm::new(
                a * f * f,
                -a * kappa * f / sqrt_ttc,
                0.5 * a * kappa * (kappa / tc + f / sqrt_ttc) / temperature,
            )
        }
        Evaluation::Literal => {
            let a_alpha = soave(kappa, Dual2_64::from(temperature).derivative() / tc) * a;
            AlphaTerm::new(a_alpha.re, a_alpha.v1, a_alpha.v2)
        }
    }
}
