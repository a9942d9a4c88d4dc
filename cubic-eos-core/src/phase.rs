use crate::equation_of_state::Delta;
use crate::errors::{EosError, EosResult};
use crate::roots::VolumeRoots;
use crate::RGAS;
use std::fmt;

/// Label of the stable phase of a state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Liquid,
    Gas,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Liquid => write!(f, "l"),
            Self::Gas => write!(f, "g"),
        }
    }
}

/// Policy for labeling a state with a single physical volume root.
///
/// A root is classified as liquid if its compressibility factor
/// $Z=\frac{Pv}{RT}$ is below the threshold.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PhaseCriterion {
    /// Critical compressibility factor of the formulation (0.3074 for Peng-Robinson).
    #[default]
    CriticalCompressibility,
    /// User defined compressibility factor.
    Compressibility(f64),
}

impl PhaseCriterion {
    /// Compressibility factor separating liquid from gas.
    pub fn threshold(&self, delta: &Delta) -> f64 {
        match self {
            Self::CriticalCompressibility => delta.critical_constants().2,
            Self::Compressibility(z) => *z,
        }
    }
}

/// Liquid and gas volumes selected from the roots and the label of the stable phase.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhaseAssignment {
    pub v_l: f64,
    pub v_g: f64,
    pub phase: Phase,
}

impl PhaseAssignment {
    /// Label the physical volumes `(v_l, v_g)` with the stable phase.
    ///
    /// A single volume is labeled by the compressibility threshold, otherwise
    /// the branch with the lower fugacity coefficient is stable. `ln_phi`
    /// holds the values of the liquid and the gas branch and is only used if
    /// the volumes are distinct.
    pub fn new(
        temperature: f64,
        pressure: f64,
        (v_l, v_g): (f64, f64),
        threshold: f64,
        [ln_phi_l, ln_phi_g]: [f64; 2],
    ) -> Self {
        let phase = if v_l == v_g {
            if pressure * v_l / (RGAS * temperature) < threshold {
                Phase::Liquid
            } else {
                Phase::Gas
            }
        } else if ln_phi_l <= ln_phi_g {
            Phase::Liquid
        } else {
            Phase::Gas
        };
        Self { v_l, v_g, phase }
    }

    /// Molar volume of the stable phase.
    pub fn volume(&self) -> f64 {
        match self.phase {
            Phase::Liquid => self.v_l,
            Phase::Gas => self.v_g,
        }
    }

    /// Returns `true` if liquid and gas volumes are distinct.
    pub fn is_two_branch(&self) -> bool {
        self.v_l != self.v_g
    }
}

/// Smallest and largest real roots larger than the covolume `b`.
///
/// With a single physical root both volumes coincide.
pub fn physical_volumes(
    roots: &VolumeRoots,
    temperature: f64,
    pressure: f64,
    b: f64,
) -> EosResult<(f64, f64)> {
    let mut physical = roots.iter().filter(|r| r.im == 0.0 && r.re > b).map(|r| r.re);
    let first = physical
        .next()
        .ok_or(EosError::NoPhysicalRoot(temperature, pressure))?;
    Ok(physical.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))))
}

/// Select liquid and gas volumes from the roots of the cubic.
///
/// Only real roots larger than the covolume `b` are physical. With a single
/// physical root both volumes coincide and the phase follows from the
/// compressibility threshold. Otherwise the smallest root is the liquid, the
/// largest root the gas and the intermediate root is discarded. The stable
/// phase is the one with the lower fugacity coefficient given by `ln_phi`.
pub fn classify<F: Fn(f64) -> f64>(
    roots: &VolumeRoots,
    temperature: f64,
    pressure: f64,
    b: f64,
    threshold: f64,
    ln_phi: F,
) -> EosResult<PhaseAssignment> {
    let (v_l, v_g) = physical_volumes(roots, temperature, pressure, b)?;
    let ln_phi = if v_l == v_g {
        [0.0; 2]
    } else {
        [ln_phi(v_l), ln_phi(v_g)]
    };
    Ok(PhaseAssignment::new(
        temperature,
        pressure,
        (v_l, v_g),
        threshold,
        ln_phi,
    ))
}
