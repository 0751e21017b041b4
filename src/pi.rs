//! Midpoint-rule estimate of pi, the classic companion demo for the
//! scheduling experiments: integrate 4/(1+x^2) over [0,1] by summing
//! the integrand at interval midpoints.
//!
//! Each worker accumulates a partial sum over its own contiguous slice
//! of the interval; the partials are combined only after every worker
//! has joined.  There is no shared accumulator to contend on.

extern crate crossbeam;

use crossbeam::thread::ScopedJoinHandle;

/// Estimates pi from `samples` midpoint evaluations spread across
/// `threads` workers.  Zero samples yield zero.
pub fn estimate(samples: u64, threads: usize) -> f64 {
    if samples == 0 {
        return 0.0;
    }
    let threads = threads.max(1);
    let inv = 1.0 / (samples as f64);
    let mut total = 0.0;
    crossbeam::scope(|spawner| {
        let handles: Vec<ScopedJoinHandle<f64>> = (0..threads)
            .map(|worker| {
                spawner.spawn(move |_| {
                    let span = samples / (threads as u64);
                    let begin = (worker as u64) * span;
                    let end = if worker == threads - 1 {
                        samples
                    } else {
                        begin + span
                    };
                    let mut local = 0.0;
                    for i in begin..end {
                        let x = ((i as f64) + 0.5) * inv;
                        local += 4.0 / (x * x + 1.0);
                    }
                    local
                })
            })
            .collect();
        total = handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .sum();
    })
    .unwrap();
    total * inv
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn the_estimate_converges() {
        assert!((estimate(1_000_000, 1) - PI).abs() < 1e-9);
    }

    #[test]
    fn worker_counts_only_reassociate_the_sum() {
        let one = estimate(500_000, 1);
        let four = estimate(500_000, 4);
        assert!((one - four).abs() < 1e-9);
    }

    #[test]
    fn zero_samples_yield_zero() {
        assert_eq!(estimate(0, 4), 0.0);
    }

    #[test]
    fn more_workers_than_samples_is_harmless() {
        assert!((estimate(10, 64) - PI).abs() < 0.01);
    }
}
