//! Substance records consumed by cubic formulations.
use crate::errors::{ensure_positive, EosResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Critical data of a single substance.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Default)]
pub struct CriticalRecord {
    /// critical temperature in Kelvin
    pub tc: f64,
    /// critical pressure in Pascal
    pub pc: f64,
    /// acentric factor
    pub acentric_factor: f64,
}

impl CriticalRecord {
    /// Create a new pure substance record.
    pub fn new(tc: f64, pc: f64, acentric_factor: f64) -> Self {
        Self {
            tc,
            pc,
            acentric_factor,
        }
    }

    /// Check that the critical point is physical.
    pub fn validate(&self) -> EosResult<()> {
        ensure_positive("critical record", "tc", self.tc)?;
        ensure_positive("critical record", "pc", self.pc)?;
        if !self.acentric_factor.is_finite() {
            return Err(crate::EosError::InvalidState(
                String::from("critical record"),
                String::from("acentric_factor"),
                self.acentric_factor,
            ));
        }
        Ok(())
    }
}

impl fmt::Display for CriticalRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CriticalRecord(tc={} K", self.tc)?;
        write!(f, ", pc={} Pa", self.pc)?;
        write!(f, ", acentric factor={})", self.acentric_factor)
    }
}
