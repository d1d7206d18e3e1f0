// Copyright (c) 2022, Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

use crate::error::{VdfError, VdfResult};
use crate::groups::prime_group::biguint_serde;
use lazy_static::lazy_static;
use num_bigint::BigUint;
use num_traits::Num;
use serde::{Deserialize, Serialize};

/// The prime defining the group. It is chosen and distributed out-of-band; the only check done
/// here is that it is large enough for the group to be non-trivial.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct PrimeModulus {
    #[serde(with = "biguint_serde")]
    value: BigUint,
}

impl PrimeModulus {
    pub fn value(&self) -> &BigUint {
        &self.value
    }

    /// Size of the modulus in bits.
    pub fn bits(&self) -> u64 {
        self.value.bits()
    }

    /// Parse a modulus from a big-endian hex string.
    pub fn from_hex(hex: &str) -> VdfResult<Self> {
        let value = BigUint::from_str_radix(hex, 16).map_err(|_| VdfError::InvalidInput)?;
        Self::try_from(value)
    }
}

impl TryFrom<BigUint> for PrimeModulus {
    type Error = VdfError;

    fn try_from(value: BigUint) -> VdfResult<Self> {
        if value < BigUint::from(3u8) {
            return Err(VdfError::InvalidInput);
        }
        Ok(Self { value })
    }
}

lazy_static! {
    // 1024-bit MODP group prime, "Oakley group 2" (RFC 2409, section 6.2). This is a safe prime.
    pub static ref OAKLEY_GROUP_2_MODULUS: PrimeModulus = PrimeModulus {
        value: BigUint::from_str_radix("FFFFFFFFFFFFFFFFC90FDAA22168C234C4C6628B80DC1CD129024E088A67CC74020BBEA63B139B22514A08798E3404DDEF9519B3CD3A431B302B0A6DF25F14374FE1356D6D51C245E485B576625E7EC6F44C42E9A63A3620FFFFFFFFFFFFFFFF", 16).unwrap(),
    };
}
