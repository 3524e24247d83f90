//! Fixed-step classical Runge-Kutta driver.
//!
//! The driver reports state at caller-chosen query times, taking `substeps`
//! equal RK4 steps between each consecutive pair.

use crate::trajectory::Trajectory;
use crate::SimError;
use seven_books_core::{StateVector, VectorField, STATE_DIM};
use std::cmp::Ordering;

/// `n` evenly spaced points from `start` to `end` inclusive.
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            (0..n)
                .map(|i| if i == n - 1 { end } else { start + step * i as f64 })
                .collect()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rk4 {
    pub substeps: usize,
}

impl Default for Rk4 {
    fn default() -> Self {
        Self { substeps: 10 }
    }
}

#[inline]
fn axpy(y: &StateVector, h: f64, k: &StateVector) -> StateVector {
    let mut out = *y;
    for i in 0..STATE_DIM {
        out[i] += h * k[i];
    }
    out
}

impl Rk4 {
    pub fn new(substeps: usize) -> Self {
        Self { substeps }
    }

    /// One RK4 step of size `h` from `(t, y)`.
    pub fn step<F: VectorField + ?Sized>(
        field: &F,
        y: &StateVector,
        t: f64,
        h: f64,
    ) -> StateVector {
        let k1 = field.derivatives(y, t);
        let k2 = field.derivatives(&axpy(y, h / 2.0, &k1), t + h / 2.0);
        let k3 = field.derivatives(&axpy(y, h / 2.0, &k2), t + h / 2.0);
        let k4 = field.derivatives(&axpy(y, h, &k3), t + h);

        let mut next = *y;
        for i in 0..STATE_DIM {
            next[i] += h / 6.0 * (k1[i] + 2.0 * k2[i] + 2.0 * k3[i] + k4[i]);
        }
        next
    }

    /// Integrate from `y0` at `times[0]`, recording the state at every query time.
    ///
    /// Query times must be strictly increasing. Stops with
    /// [`SimError::NonFinite`] as soon as any component blows up.
    pub fn integrate<F: VectorField + ?Sized>(
        &self,
        field: &F,
        y0: StateVector,
        times: &[f64],
    ) -> Result<Trajectory, SimError> {
        if self.substeps == 0 {
            return Err(SimError::ZeroSubsteps);
        }
        let Some(&t0) = times.first() else {
            return Ok(Trajectory::default());
        };
        for (index, pair) in times.windows(2).enumerate() {
            if pair[1].partial_cmp(&pair[0]) != Some(Ordering::Greater) {
                return Err(SimError::NonMonotonicTimes { index: index + 1 });
            }
        }
        check_finite(&y0, t0)?;

        tracing::debug!(
            samples = times.len(),
            substeps = self.substeps,
            t_start = t0,
            t_end = times[times.len() - 1],
            "integration started"
        );

        let mut trajectory = Trajectory::with_capacity(times.len());
        trajectory.push(t0, y0);

        let mut y = y0;
        for pair in times.windows(2) {
            let (ta, tb) = (pair[0], pair[1]);
            let h = (tb - ta) / self.substeps as f64;
            for k in 0..self.substeps {
                let t = ta + h * k as f64;
                y = Self::step(field, &y, t, h);
                check_finite(&y, t + h)?;
            }
            trajectory.push(tb, y);
        }

        tracing::debug!(final_state = ?y, "integration finished");
        Ok(trajectory)
    }
}

fn check_finite(y: &StateVector, time: f64) -> Result<(), SimError> {
    match y.iter().position(|v| !v.is_finite()) {
        Some(component) => Err(SimError::NonFinite { time, component }),
        None => Ok(()),
    }
}
