use super::AlphaFunction;
use serde::{Deserialize, Serialize};

/// Original Peng-Robinson correlation.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct PengRobinson1976;

impl AlphaFunction for PengRobinson1976 {
    #[inline]
    fn kappa(&self, acentric_factor: f64) -> f64 {
        let w = acentric_factor;
        0.37464 + w * (1.54226 - w * 0.26992)
    }
}

/// Peng-Robinson correlation with a cubic polynomial for heavy substances.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct PengRobinson1978;

impl AlphaFunction for PengRobinson1978 {
    #[inline]
    fn kappa(&self, acentric_factor: f64) -> f64 {
        let w = acentric_factor;
        if w <= 0.491 {
            0.37464 + w * (1.54226 - w * 0.26992)
        } else {
            // use higher-order polynomial if w > w(n-decane)
            0.379642 + w * (1.48503 + w * (-0.164423 + w * 0.016666))
        }
    }
}

/// Soave correlation for the Redlich-Kwong equation of state.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct RedlichKwong1972;

impl AlphaFunction for RedlichKwong1972 {
    #[inline]
    fn kappa(&self, acentric_factor: f64) -> f64 {
        let w = acentric_factor;
        0.48 + w * (1.574 - w * 0.176)
    }
}
