use crate::equation_of_state::{CriticalParameters, CubicEquationOfState, Evaluation};
use crate::errors::{ensure_positive, EosError, EosResult};
use crate::{SolverOptions, Verbosity, RGAS};
use num_dual::Dual64;

const MAX_ITER_TEMPERATURE: usize = 50;
const TOL_TEMPERATURE: f64 = 1e-10;

/// Temperature at which the equation of state yields the given pressure and molar volume.
///
/// Newton iteration on $P(T,v)-P$. The quick path starts from the analytic
/// estimate of the formulation and uses the closed form temperature
/// derivative of $a\alpha$. The literal path starts from the estimate with
/// $\alpha=1$ and differentiates the pressure with dual numbers. Both
/// converge to the same temperature.
pub fn temperature_iteration<E: CubicEquationOfState>(
    eos: &E,
    pressure: f64,
    volume: f64,
    evaluation: Evaluation,
    options: SolverOptions,
) -> EosResult<f64> {
    let (max_iter, tol, verbosity) = options.unwrap_or(MAX_ITER_TEMPERATURE, TOL_TEMPERATURE);
    let CriticalParameters { a, b } = eos.critical_parameters()?;
    ensure_positive("temperature iteration", "pressure", pressure)?;
    ensure_positive("temperature iteration", "volume - b", volume - b)?;
    let delta = eos.delta();
    let den = delta.denominator(volume, b);

    let mut t = match evaluation {
        Evaluation::Quick => eos.temperature_estimate(pressure, volume)?,
        Evaluation::Literal => (pressure + a / den) * (volume - b) / RGAS,
    };
    if !(t.is_finite() && t > 0.0) {
        return Err(EosError::IterationFailed(String::from(
            "Temperature iteration",
        )));
    }

    log_iter!(
        verbosity,
        " iter |    residual    |   temperature   |   step    "
    );
    log_iter!(verbosity, "{:-<52}", "");
    log_iter!(verbosity, " {:4} |                | {:13.8} |", 0, t);

    for i in 1..=max_iter {
        let (p, dp_dt) = match evaluation {
            Evaluation::Quick => {
                let alpha = eos.a_alpha_and_derivatives_quick(t)?;
                (
                    delta.pressure(t, volume, b, alpha.a_alpha),
                    RGAS / (volume - b) - alpha.da_alpha_dt / den,
                )
            }
            Evaluation::Literal => {
                let t_dual = Dual64::from(t).derivative();
                let p = delta.pressure(t_dual, Dual64::from(volume), b, eos.a_alpha(t_dual)?);
                (p.re, p.eps)
            }
        };

        let residual = p - pressure;
        let mut step = -residual / dp_dt;
        if !step.is_finite() {
            return Err(EosError::IterationFailed(String::from(
                "Temperature iteration",
            )));
        }
        // keep the temperature positive
        while t + step <= 0.0 {
            step *= 0.5;
        }
        t += step;

        log_iter!(
            verbosity,
            " {:4} | {:14.8e} | {:13.8} | {:9.2e}",
            i,
            residual.abs() / pressure,
            t,
            step
        );

        if (step / t).abs() < tol {
            log_result!(
                verbosity,
                "Temperature iteration converged in {} step(s)\n",
                i
            );
            return Ok(t);
        }
    }
    Err(EosError::NotConverged(String::from("Temperature iteration")))
}
