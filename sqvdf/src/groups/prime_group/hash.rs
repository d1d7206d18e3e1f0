// Copyright (c) 2022, Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Deterministic derivation of group elements from arbitrary byte strings, used to turn a seed into
//! a VDF input.

use std::cmp::min;
use std::sync::Arc;

use num_bigint::BigUint;
use num_integer::Integer;
use sha2::{Digest, Sha256};

use crate::groups::prime_group::modulus::PrimeModulus;
use crate::groups::prime_group::PrimeGroupElement;

/// Domain separation tag prepended to every hashed block.
const HASH_TO_GROUP_DST: &[u8] = b"sqvdf-hash-to-group-v1";

/// Extra bytes sampled beyond the size of the modulus so the bias of the final reduction is
/// negligible (at most 2^-128).
const EXTRA_BYTES: usize = 16;

impl PrimeGroupElement {
    /// Hash a message to an element of the group defined by `modulus`. The message is expanded with
    /// SHA-256 in counter mode to the byte length of the modulus plus [EXTRA_BYTES] and reduced.
    pub fn hash_to_group(message: &[u8], modulus: &Arc<PrimeModulus>) -> Self {
        let length_in_bytes = (modulus.bits() as usize).div_ceil(8) + EXTRA_BYTES;

        let mut blob = Vec::with_capacity(length_in_bytes);
        let mut counter = 0u32;
        while blob.len() < length_in_bytes {
            let hash = Sha256::new()
                .chain_update(HASH_TO_GROUP_DST)
                .chain_update(counter.to_be_bytes())
                .chain_update(message)
                .finalize();
            blob.extend_from_slice(&hash[..min(hash.len(), length_in_bytes - blob.len())]);
            counter += 1;
        }

        let value = BigUint::from_bytes_be(&blob).mod_floor(modulus.value());
        Self::new(value, modulus)
    }
}
