// Copyright (c) 2022, Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

use crate::groups::prime_group::PrimeGroupElement;
use crate::groups::ScalarMultiplier;
use num_bigint::BigUint;

/// Fixed-base exponentiation without precomputation. Scalar multiplication in the additively
/// written group is `base^scalar mod p`.
pub struct Multiplier {
    base_element: PrimeGroupElement,
}

impl ScalarMultiplier<PrimeGroupElement, BigUint> for Multiplier {
    fn new(base_element: PrimeGroupElement) -> Self {
        Self { base_element }
    }

    fn mul(&self, scalar: &BigUint) -> PrimeGroupElement {
        let value = self
            .base_element
            .value()
            .modpow(scalar, self.base_element.modulus());
        PrimeGroupElement::new(value, &self.base_element.modulus)
    }
}
