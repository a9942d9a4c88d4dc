use crate::hexane;
use approx::assert_relative_eq;
use cubic_eos::{CubicEquationOfState, Evaluation, Phase, State, StateOptions, RGAS};
use cubic_eos_core::{volume_polynomial, volume_solutions, VolumeRoots};
use num_complex::Complex64;
use std::error::Error;

fn max_distance(x: &VolumeRoots, y: &VolumeRoots) -> f64 {
    x.iter().zip(y.iter()).map(|(a, b)| (a - b).norm()).fold(0.0, f64::max)
}

fn scale(x: &VolumeRoots) -> f64 {
    x.iter().map(|r| r.norm()).fold(0.0, f64::max)
}

#[test]
fn quick_and_literal_roots_agree() -> Result<(), Box<dyn Error>> {
    let eos = hexane()?;
    let b = eos.critical_parameters()?.b;
    for i in 0..=18 {
        let t = 250.0 + 25.0 * i as f64;
        for j in 0..=28 {
            let p = 10f64.powf(0.25 * j as f64);
            let quick = eos.volume_solutions(t, p, Evaluation::Quick)?;
            let literal = eos.volume_solutions(t, p, Evaluation::Literal)?;
            assert!(max_distance(&quick, &literal) < 1e-9 * scale(&quick));
            for (q, l) in quick.iter().zip(literal.iter()) {
                if q.im == 0.0 && l.im == 0.0 {
                    assert_relative_eq!(q.re, l.re, max_relative = 1e-9);
                }
            }

            // every physical root reproduces the pressure
            for v in quick.iter().filter(|r| r.im == 0.0 && r.re > b) {
                assert_relative_eq!(eos.pressure(t, v.re)?, p, max_relative = 1e-5);
            }
        }
    }
    Ok(())
}

#[test]
fn low_pressure_liquid_branch() -> Result<(), Box<dyn Error>> {
    let eos = hexane()?;
    let literal = StateOptions::new().evaluation(Evaluation::Literal);
    for (t, p, v_l, v_g) in [
        (300.0, 1.0, 1.3066291109489598e-4, 2494.3365272454284),
        (250.0, 1.0, 1.2377263217858158e-4, 2078.613062405598),
        (300.0, 10.0, 1.3066290851878194e-4, 249.43238123946097),
    ] {
        let s1 = State::new_tp(&eos, t, p, StateOptions::new())?;
        let s2 = State::new_tp(&eos, t, p, literal)?;
        assert_eq!(s1.phase, Phase::Gas);
        assert_eq!(s2.phase, Phase::Gas);
        assert_relative_eq!(s1.liquid.volume, v_l, max_relative = 1e-10);
        assert_relative_eq!(s1.gas.volume, v_g, max_relative = 1e-10);
        assert_relative_eq!(s1.liquid, s2.liquid, max_relative = 1e-7);
        assert_relative_eq!(s1.gas, s2.gas, max_relative = 1e-7);
        assert_relative_eq!(eos.pressure(t, s1.liquid.volume)?, p, max_relative = 1e-5);
        assert_relative_eq!(eos.pressure(t, s2.liquid.volume)?, p, max_relative = 1e-5);
        assert!(s1.liquid.is_mechanically_stable());
    }
    Ok(())
}

#[test]
fn near_critical_roots() -> Result<(), Box<dyn Error>> {
    let eos = hexane()?;
    let (tc, pc) = (eos.record().tc, eos.record().pc);
    let vc = eos.critical_compressibility() * RGAS * tc / pc;
    for (t, p) in [
        (tc, pc),
        (0.9999 * tc, pc),
        (1.0001 * tc, 1.0001 * pc),
        (tc, 0.999 * pc),
        (1.001 * tc, 1.001 * pc),
    ] {
        let quick = eos.volume_solutions(t, p, Evaluation::Quick)?;
        let literal = eos.volume_solutions(t, p, Evaluation::Literal)?;
        // roots are ill-conditioned close to the triple root at the critical point
        assert!(max_distance(&quick, &literal) < 1e-6 * scale(&quick));
        for root in quick.iter() {
            assert_relative_eq!(root.re, vc, max_relative = 0.25);
        }
    }
    Ok(())
}

#[test]
fn trait_method_and_free_function_agree() -> Result<(), Box<dyn Error>> {
    let eos = hexane()?;
    let b = eos.critical_parameters()?.b;
    let delta = eos.delta();
    for evaluation in [Evaluation::Quick, Evaluation::Literal] {
        for (t, p) in [(299.0, 1e6), (400.0, 1e6), (499.0, 1e5)] {
            let alpha = eos.a_alpha_and_derivatives(t, evaluation)?;
            let roots = volume_solutions(t, p, b, alpha.a_alpha, &delta, evaluation)?;
            assert_eq!(roots, eos.volume_solutions(t, p, evaluation)?);

            // every root solves the monic polynomial
            let [c2, c1, c0] = volume_polynomial(t, p, b, alpha.a_alpha, &delta);
            for v in roots {
                let residual: Complex64 = ((v + c2) * v + c1) * v + c0;
                assert!(residual.norm() < 1e-12 * scale(&roots).powi(3));
            }
        }
    }
    Ok(())
}

#[test]
fn canonical_order() -> Result<(), Box<dyn Error>> {
    let eos = hexane()?;
    let roots = eos.volume_solutions(299.0, 1e6, Evaluation::Literal)?;
    assert_eq!(roots[0].im, 0.0);
    assert!(roots[1].im > 0.0);
    assert_eq!(roots[2], roots[1].conj());
    assert_relative_eq!(roots[0].re, 1.3022208100139953e-4, max_relative = 1e-10);

    let roots = eos.volume_solutions(400.0, 1e6, Evaluation::Literal)?;
    assert!(roots.iter().all(|r| r.im == 0.0));
    assert!(roots[0].re < roots[1].re && roots[1].re < roots[2].re);
    Ok(())
}
