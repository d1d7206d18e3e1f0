// Copyright (c) 2022, Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Difficulty schedule. The number of squarings grows with `log2` of a caller supplied progress
//! counter, so a writer which has already produced many outputs has to do more sequential work for
//! the next one.

use tracing::warn;

/// Lower bound on the number of iterations. With zero iterations the output would be the input.
pub const MIN_ITERATIONS: u64 = 1;

/// Upper bound on the number of iterations. The delay is computed with the exponent `2^iterations`
/// written out in full, which takes `iterations / 8` bytes.
pub const MAX_ITERATIONS: u64 = 1 << 32;

/// Return the number of iterations for a call with the given progress counter:
/// `base_iterations` if `progress` is `None`, 0 or 1, and `floor(base_iterations * log2(progress))`
/// otherwise. The result is clamped to the range [MIN_ITERATIONS]..=[MAX_ITERATIONS].
///
/// Prover and verifier must agree on this value bit for bit, so the computation uses nothing but
/// IEEE-754 operations on the same inputs.
pub fn effective_iterations(base_iterations: u64, progress: Option<u64>) -> u64 {
    let iterations = match progress {
        Some(progress) if progress > 1 => {
            let growth_factor = (progress as f64).log2();
            // Float to int casts truncate toward zero and saturate.
            (base_iterations as f64 * growth_factor) as u64
        }
        _ => base_iterations,
    };

    if iterations < MIN_ITERATIONS {
        warn!(
            "Effective iteration count for base {} and progress {:?} is {}, using {}",
            base_iterations, progress, iterations, MIN_ITERATIONS
        );
        return MIN_ITERATIONS;
    }
    if iterations > MAX_ITERATIONS {
        warn!(
            "Effective iteration count for base {} and progress {:?} is {}, using {}",
            base_iterations, progress, iterations, MAX_ITERATIONS
        );
        return MAX_ITERATIONS;
    }
    iterations
}
