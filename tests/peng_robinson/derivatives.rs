use crate::hexane;
use approx::assert_relative_eq;
use cubic_eos::{CubicEquationOfState, State, StateOptions, RGAS};
use num_dual::HyperDual64;
use std::error::Error;

#[test]
fn reciprocity_and_triple_product() -> Result<(), Box<dyn Error>> {
    let eos = hexane()?;
    for t in [250.0, 350.0, 450.0, 550.0, 700.0] {
        for p in [1e4, 1e5, 1e6, 1e7] {
            let state = State::new_tp(&eos, t, p, StateOptions::default())?;
            for branch in [&state.liquid, &state.gas] {
                let d = branch.first;
                assert_relative_eq!(d.dv_dt * d.dt_dv, 1.0, max_relative = 1e-12);
                assert_relative_eq!(d.dv_dp * d.dp_dv, 1.0, max_relative = 1e-12);
                assert_relative_eq!(d.dt_dp * d.dp_dt, 1.0, max_relative = 1e-12);
                assert_relative_eq!(d.dp_dt * d.dt_dv * d.dv_dp, -1.0, max_relative = 1e-12);
            }
        }
    }
    Ok(())
}

#[test]
fn mixed_pressure_derivative_with_hyperdual_numbers() -> Result<(), Box<dyn Error>> {
    let eos = hexane()?;
    let b = eos.critical_parameters()?.b;
    let delta = eos.delta();
    for (t, p) in [(299.0, 1e6), (400.0, 1e6), (499.0, 1e5)] {
        let state = State::new_tp(&eos, t, p, StateOptions::default())?;
        for branch in [&state.liquid, &state.gas] {
            let t_dual = HyperDual64::from(t).derivative1();
            let v_dual = HyperDual64::from(branch.volume).derivative2();
            let pressure = delta.pressure(t_dual, v_dual, b, eos.a_alpha(t_dual)?);
            assert_relative_eq!(pressure.re, p, max_relative = 1e-8);
            assert_relative_eq!(pressure.eps1, branch.first.dp_dt, max_relative = 1e-10);
            assert_relative_eq!(pressure.eps2, branch.first.dp_dv, max_relative = 1e-10);
            assert_relative_eq!(
                pressure.eps1eps2,
                branch.mixed.d2p_dtdv,
                max_relative = 1e-10
            );

            let t_dual = HyperDual64::new(t, 1.0, 1.0, 0.0);
            let pressure = delta.pressure(t_dual, branch.volume.into(), b, eos.a_alpha(t_dual)?);
            assert_relative_eq!(pressure.eps1eps2, branch.second.d2p_dt2, max_relative = 1e-10);
        }
    }
    Ok(())
}

#[test]
fn second_derivatives_of_the_volume() -> Result<(), Box<dyn Error>> {
    let eos = hexane()?;
    let options = StateOptions::default();
    let volume = |t: f64, p: f64| -> Result<f64, Box<dyn Error>> {
        Ok(State::new_tp(&eos, t, p, options)?.volume)
    };

    // liquid
    let (t, p) = (299.0, 1e6);
    let state = State::new_tp(&eos, t, p, options)?;
    let h = 0.1;
    let d2v_dt2 = (volume(t + h, p)? - 2.0 * state.volume + volume(t - h, p)?) / (h * h);
    assert_relative_eq!(d2v_dt2, state.liquid.second.d2v_dt2, max_relative = 1e-4);
    assert_relative_eq!(state.liquid.second.d2v_dt2, 1.1688513685e-9, max_relative = 1e-7);

    // gas
    let (t, p) = (499.0, 1e5);
    let state = State::new_tp(&eos, t, p, options)?;
    let (ht, hp) = (0.01, 100.0);
    let d2v_dp2 = (volume(t, p + hp)? - 2.0 * state.volume + volume(t, p - hp)?) / (hp * hp);
    assert_relative_eq!(d2v_dp2, state.gas.second.d2v_dp2, max_relative = 1e-4);

    let d2v_dpdt = (volume(t + ht, p + hp)? - volume(t + ht, p - hp)? - volume(t - ht, p + hp)?
        + volume(t - ht, p - hp)?)
        / (4.0 * ht * hp);
    assert_relative_eq!(d2v_dpdt, state.gas.mixed.d2v_dpdt, max_relative = 1e-4);
    Ok(())
}

#[test]
fn second_derivatives_of_the_temperature() -> Result<(), Box<dyn Error>> {
    let eos = hexane()?;
    let state = State::new_tp(&eos, 299.0, 1e6, StateOptions::default())?;
    let branch = state.stable();
    let d = branch.first;
    let s = branch.second;
    let m = branch.mixed;

    // T(P, v) is linear in P at constant v
    assert_relative_eq!(s.d2t_dp2, -s.d2p_dt2 * d.dt_dp.powi(3), max_relative = 1e-12);
    assert!(s.d2t_dp2 > 0.0);

    // d/dv (dT/dP) equals d/dP (dT/dv)
    let d2t_dvdp = (-m.d2p_dtdv / d.dp_dt + d.dp_dv * s.d2p_dt2 / d.dp_dt.powi(2)) * d.dt_dp;
    assert_relative_eq!(d2t_dvdp, m.d2t_dpdv, max_relative = 1e-10);
    assert_relative_eq!(m.d2t_dpdv, 0.06994170496262668, max_relative = 1e-7);
    assert_relative_eq!(s.d2t_dv2, -2.915789413e11, max_relative = 1e-7);
    Ok(())
}

#[test]
fn departures_are_consistent() -> Result<(), Box<dyn Error>> {
    let eos = hexane()?;
    for (t, p) in [(299.0, 1e6), (400.0, 1e6), (499.0, 1e5), (600.0, 5e6)] {
        let state = State::new_tp(&eos, t, p, StateOptions::default())?;
        for branch in [&state.liquid, &state.gas] {
            let dep = branch.departures;
            assert_relative_eq!(
                dep.gibbs_energy,
                dep.enthalpy - t * dep.entropy,
                max_relative = 1e-10
            );
            assert_relative_eq!(
                dep.ln_phi,
                dep.gibbs_energy / (RGAS * t),
                max_relative = 1e-12
            );
            assert!(dep.isobaric_heat_capacity > dep.isochoric_heat_capacity);
        }
    }
    Ok(())
}
