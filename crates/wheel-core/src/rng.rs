//! Injectable uniform random sources.
//!
//! The engine only ever asks for one float in `[0, 1)` at a time. Any
//! `rand::RngCore` works directly; `FnSource` adapts closures and
//! `ScriptedSource` replays a fixed sequence for reproducible spins.

use rand::{Rng, RngCore};

pub trait RandomSource {
    /// A uniform draw in `[0, 1)`.
    fn next_unit(&mut self) -> f64;
}

impl<R: RngCore + ?Sized> RandomSource for R {
    fn next_unit(&mut self) -> f64 {
        self.gen::<f64>()
    }
}

/// Wraps a closure such as `|| js_sys::Math::random()`.
pub struct FnSource<F>(pub F);

impl<F: FnMut() -> f64> RandomSource for FnSource<F> {
    fn next_unit(&mut self) -> f64 {
        (self.0)()
    }
}

/// Replays the given draws in order, starting over when exhausted.
#[derive(Clone, Debug)]
pub struct ScriptedSource {
    values: Vec<f64>,
    cursor: usize,
}

impl ScriptedSource {
    pub fn new(values: impl Into<Vec<f64>>) -> Self {
        let mut values = values.into();
        if values.is_empty() {
            values.push(0.0);
        }
        Self { values, cursor: 0 }
    }

    /// Number of draws taken so far.
    pub fn draws(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for ScriptedSource {
    fn next_unit(&mut self) -> f64 {
        let v = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        v
    }
}

/// Pull a draw and force it into `[0, 1)`; NaN maps to 0.
#[inline]
pub(crate) fn unit_draw(rng: &mut dyn RandomSource) -> f64 {
    let v = rng.next_unit();
    if v.is_nan() {
        return 0.0;
    }
    v.clamp(0.0, 1.0 - f64::EPSILON)
}
