// Copyright (c) 2022, Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Sampling of random primes used as the security parameter `L` of a proof.

use num_bigint::BigUint;
use num_prime::nt_funcs::is_prime;
use num_prime::PrimalityTestConfig;
use tracing::trace;

use crate::error::{VdfError, VdfResult};
use crate::AllowedRng;

/// Bit length of the security parameter `L`.
pub const SECURITY_PARAMETER_BITS: usize = 128;

/// Number of Miller-Rabin rounds in the primality test. The probability that a composite passes is
/// at most 4^-20.
pub const MILLER_RABIN_ROUNDS: usize = 20;

/// Sample a uniformly random prime of exactly [SECURITY_PARAMETER_BITS] bits.
pub fn sample_security_parameter<R: AllowedRng>(rng: &mut R) -> VdfResult<BigUint> {
    sample_prime(rng, SECURITY_PARAMETER_BITS)
}

/// Sample a random prime of exactly `bit_length` bits. Candidates are drawn from `rng`, the top bit
/// is set to fix the length and the bottom bit to make it odd, and this is repeated until a
/// candidate passes [is_probable_prime].
///
/// Fails with [VdfError::InvalidInput] if `bit_length < 2`, since no such prime exists, and with
/// [VdfError::EntropyFailure] if `rng` fails to produce bytes.
pub fn sample_prime<R: AllowedRng>(rng: &mut R, bit_length: usize) -> VdfResult<BigUint> {
    if bit_length < 2 {
        return Err(VdfError::InvalidInput);
    }
    let mut bytes = vec![0u8; bit_length.div_ceil(8)];
    let mut rejected = 0usize;
    loop {
        rng.try_fill_bytes(&mut bytes)?;
        let mut candidate = BigUint::from_bytes_be(&bytes);

        // Drop any excess bits when the length is not a multiple of 8.
        candidate >>= bytes.len() * 8 - bit_length;
        candidate.set_bit(bit_length as u64 - 1, true);
        candidate.set_bit(0, true);

        if is_probable_prime(&candidate) {
            trace!("Sampled a {bit_length}-bit prime after {rejected} rejected candidates");
            return Ok(candidate);
        }
        rejected += 1;
    }
}

/// Check if the input is a probable prime using [MILLER_RABIN_ROUNDS] rounds of Miller-Rabin
/// combined with a strong Lucas test (Baillie-PSW).
pub fn is_probable_prime(x: &BigUint) -> bool {
    let mut config = PrimalityTestConfig::bpsw();
    config.sprp_trials = MILLER_RABIN_ROUNDS;
    is_prime(x, Some(config)).probably()
}
