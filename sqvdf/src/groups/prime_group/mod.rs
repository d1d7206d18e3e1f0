// Copyright (c) 2022, Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! The multiplicative group of integers modulo a prime, written additively: `a + b` is the
//! product `a * b mod p` and doubling is squaring.

use std::ops::{Add, Mul, Shl};
use std::sync::Arc;

use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::One;

use modulus::PrimeModulus;

use crate::error::{VdfError, VdfResult};
use crate::groups::{Doubling, ParameterizedGroupElement};

/// Serialization and deserialization for `num_bigint::BigUint`. The format used in num_bigint is
/// a serialization of the u32 words which is hard to port to other platforms. Instead, we serialize
/// a big integer in big-endian byte order. See also [BigUint::to_bytes_be].
pub(crate) mod biguint_serde;
pub mod hash;
pub mod modulus;
pub mod multiplier;

#[derive(Debug, Eq, PartialEq)]
pub struct PrimeGroupElement {
    value: BigUint,
    modulus: Arc<PrimeModulus>,
}

impl Clone for PrimeGroupElement {
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
            // Ensure that we don't do a deep clone of the modulus.
            modulus: Arc::clone(&self.modulus),
        }
    }
}

impl Add<Self> for PrimeGroupElement {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        self.add(&rhs)
    }
}

impl Add<&Self> for PrimeGroupElement {
    type Output = Self;

    fn add(self, rhs: &Self) -> Self::Output {
        assert_eq!(self.modulus, rhs.modulus);
        Self {
            value: self.value.mul(&rhs.value).mod_floor(self.modulus.value()),
            modulus: self.modulus,
        }
    }
}

impl Doubling for PrimeGroupElement {
    fn double(&self) -> Self {
        Self {
            value: self.value.modpow(&BigUint::from(2u8), self.modulus.value()),
            modulus: Arc::clone(&self.modulus),
        }
    }

    /// Compute `self^(2^n) mod p` as a single exponentiation. The exponent is not reduced, so this
    /// costs `n` sequential squarings.
    fn repeated_doubling(&self, n: u64) -> Self {
        let exponent = BigUint::one().shl(n);
        Self {
            value: self.value.modpow(&exponent, self.modulus.value()),
            modulus: Arc::clone(&self.modulus),
        }
    }
}

impl ParameterizedGroupElement for PrimeGroupElement {
    type ParameterType = Arc<PrimeModulus>;

    fn zero(parameter: &Self::ParameterType) -> Self {
        Self {
            value: BigUint::one(),
            modulus: Arc::clone(parameter),
        }
    }

    fn is_in_group(&self, parameter: &Self::ParameterType) -> bool {
        self.modulus.value() == parameter.value()
    }
}

impl PrimeGroupElement {
    /// Wrap an integer as an element of the group defined by `modulus`. The value is kept as given;
    /// it is not reduced.
    pub fn new(value: BigUint, modulus: &Arc<PrimeModulus>) -> Self {
        Self {
            value,
            modulus: Arc::clone(modulus),
        }
    }

    /// Decode a big-endian encoded integer as an element of the group defined by `modulus`.
    pub fn from_bytes(bytes: &[u8], modulus: &Arc<PrimeModulus>) -> VdfResult<Self> {
        if bytes.is_empty() {
            return Err(VdfError::InvalidInput);
        }
        Ok(Self::new(BigUint::from_bytes_be(bytes), modulus))
    }

    /// Big-endian encoding of the value.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.value.to_bytes_be()
    }

    pub fn modulus(&self) -> &BigUint {
        self.modulus.value()
    }

    pub fn value(&self) -> &BigUint {
        &self.value
    }

    pub fn into_value(self) -> BigUint {
        self.value
    }
}
