use super::State;
use crate::phase::Phase;
use ndarray::Array1;
use std::iter::FromIterator;
use std::ops::Deref;

/// A list of states for a simple access to properties
/// of multiple states.
pub struct StateVec<'a, E>(pub Vec<&'a State<E>>);

impl<'a, E> FromIterator<&'a State<E>> for StateVec<'a, E> {
    fn from_iter<I: IntoIterator<Item = &'a State<E>>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a, E> IntoIterator for StateVec<'a, E> {
    type Item = &'a State<E>;
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a, E> Deref for StateVec<'a, E> {
    type Target = Vec<&'a State<E>>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<'a, E> StateVec<'a, E> {
    fn map<F: Fn(&State<E>) -> f64>(&self, f: F) -> Array1<f64> {
        Array1::from_shape_fn(self.0.len(), |i| f(self.0[i]))
    }

    pub fn temperature(&self) -> Array1<f64> {
        self.map(|s| s.temperature)
    }

    pub fn pressure(&self) -> Array1<f64> {
        self.map(|s| s.pressure)
    }

    pub fn volume(&self) -> Array1<f64> {
        self.map(|s| s.volume)
    }

    pub fn compressibility(&self) -> Array1<f64> {
        self.map(|s| s.compressibility())
    }

    pub fn liquid_volume(&self) -> Array1<f64> {
        self.map(|s| s.liquid.volume)
    }

    pub fn gas_volume(&self) -> Array1<f64> {
        self.map(|s| s.gas.volume)
    }

    /// Returns `true` for every liquid state.
    pub fn is_liquid(&self) -> Array1<bool> {
        Array1::from_shape_fn(self.0.len(), |i| self.0[i].phase == Phase::Liquid)
    }

    pub fn enthalpy_departure(&self) -> Array1<f64> {
        self.map(|s| s.stable().departures.enthalpy)
    }

    pub fn entropy_departure(&self) -> Array1<f64> {
        self.map(|s| s.stable().departures.entropy)
    }

    pub fn isobaric_heat_capacity_departure(&self) -> Array1<f64> {
        self.map(|s| s.stable().departures.isobaric_heat_capacity)
    }

    pub fn ln_phi(&self) -> Array1<f64> {
        self.map(|s| s.stable().departures.ln_phi)
    }
}
