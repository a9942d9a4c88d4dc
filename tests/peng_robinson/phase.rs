use crate::hexane;
use approx::assert_relative_eq;
use cubic_eos::{Evaluation, Phase, PhaseCriterion, State, StateOptions, StateVec};
use ndarray::arr1;
use std::error::Error;

#[test]
fn gas_state() -> Result<(), Box<dyn Error>> {
    let eos = hexane()?;
    let state = State::new_tp(&eos, 499.0, 1e5, StateOptions::default())?;
    assert_eq!(state.phase, Phase::Gas);
    assert_relative_eq!(state.volume, 0.040936188574487914, max_relative = 1e-10);
    assert!(state.stable().phase_identification_parameter() < 1.0);
    Ok(())
}

#[test]
fn three_root_states() -> Result<(), Box<dyn Error>> {
    let eos = hexane()?;
    let state = State::new_tp(&eos, 400.0, 1e6, StateOptions::default())?;
    let roots = state.physical_roots()?;
    assert_eq!(roots.len(), 3);
    assert_relative_eq!(roots[0], 1.5607313188529e-4, max_relative = 1e-9);
    assert_relative_eq!(roots[1], 9.192951633907556e-4, max_relative = 1e-9);
    assert_relative_eq!(roots[2], 2.1418760907613733e-3, max_relative = 1e-9);
    assert_eq!(state.phase, Phase::Liquid);
    assert_eq!(state.liquid.volume, roots[0]);
    assert_eq!(state.gas.volume, roots[2]);
    assert_eq!(state.volume, state.liquid.volume);
    assert!(state.liquid.departures.ln_phi < state.gas.departures.ln_phi);

    let state = State::new_tp(&eos, 300.0, 1e4, StateOptions::default())?;
    assert_eq!(state.phase, Phase::Gas);
    assert_relative_eq!(state.volume, 0.24801434000422606, max_relative = 1e-9);
    assert!(state.gas.departures.ln_phi < state.liquid.departures.ln_phi);
    assert!(state.gas.fugacity() < state.liquid.fugacity());

    let state = State::new_tp(&eos, 450.0, 1.5e6, StateOptions::default())?;
    assert_eq!(state.phase, Phase::Liquid);
    Ok(())
}

#[test]
fn branches_are_mechanically_stable() -> Result<(), Box<dyn Error>> {
    let eos = hexane()?;
    for evaluation in [Evaluation::Quick, Evaluation::Literal] {
        for (t, p) in [(400.0, 1e6), (300.0, 1e4), (450.0, 1.5e6)] {
            let state = State::new_tp(&eos, t, p, StateOptions::new().evaluation(evaluation))?;
            assert!(state.liquid.is_mechanically_stable());
            assert!(state.gas.is_mechanically_stable());
            assert!(state.liquid.phase_identification_parameter() > 1.0);
            assert!(state.gas.phase_identification_parameter() < 1.0);
            assert!(state.liquid.isothermal_compressibility() < state.gas.isothermal_compressibility());
        }
    }
    Ok(())
}

#[test]
fn custom_phase_criterion() -> Result<(), Box<dyn Error>> {
    let eos = hexane()?;
    // supercritical state with Z = 0.651
    let state = State::new_tp(&eos, 600.0, 5e6, StateOptions::default())?;
    assert_eq!(state.phase, Phase::Gas);
    assert_relative_eq!(state.compressibility(), 0.6512992217114135, max_relative = 1e-9);

    let options = StateOptions::new().criterion(PhaseCriterion::Compressibility(0.7));
    let state = State::new_tp(&eos, 600.0, 5e6, options)?;
    assert_eq!(state.phase, Phase::Liquid);

    // the criterion does not affect states with several physical roots
    let state = State::new_tp(&eos, 300.0, 1e4, options)?;
    assert_eq!(state.phase, Phase::Gas);
    Ok(())
}

#[test]
fn isotherm() -> Result<(), Box<dyn Error>> {
    let eos = hexane()?;
    let pressures = arr1(&[1e3, 1e4, 3e4, 1e5, 1e6, 3e6]);
    let states = State::isotherm(&eos, 299.0, pressures.view(), StateOptions::default())?;
    let states: StateVec<_> = states.iter().collect();

    assert_eq!(states.len(), 6);
    assert_eq!(states.pressure(), pressures);
    let phases: Vec<_> = states.iter().map(|s| s.phase).collect();
    assert_eq!(
        phases,
        vec![
            Phase::Gas,
            Phase::Gas,
            Phase::Liquid,
            Phase::Liquid,
            Phase::Liquid,
            Phase::Liquid
        ]
    );
    let liquid = states.liquid_volume();
    for i in 1..liquid.len() {
        assert!(liquid[i] < liquid[i - 1]);
    }
    assert!(states.compressibility()[0] > 0.99);
    Ok(())
}

#[cfg(feature = "rayon")]
#[test]
fn parallel_isotherm() -> Result<(), Box<dyn Error>> {
    let eos = hexane()?;
    let pressures = ndarray::Array1::linspace(1e4, 5e6, 50);
    let thread_pool = rayon::ThreadPoolBuilder::new().num_threads(4).build()?;
    let serial = State::isotherm(&eos, 350.0, pressures.view(), StateOptions::default())?;
    let parallel = State::par_isotherm(
        &eos,
        350.0,
        pressures.view(),
        8,
        thread_pool,
        StateOptions::default(),
    )?;
    assert_eq!(serial.len(), parallel.len());
    for (s, p) in serial.iter().zip(parallel.iter()) {
        assert_eq!(s.phase, p.phase);
        assert_eq!(s.volume, p.volume);
        assert_eq!(s.liquid, p.liquid);
        assert_eq!(s.gas, p.gas);
    }
    Ok(())
}
