// Copyright (c) 2022, Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

use std::ops::Add;

pub mod prime_group;

/// Trait impl'd by group elements which can be doubled. In a multiplicatively written group this
/// is squaring.
pub trait Doubling {
    /// Compute 2 * Self.
    fn double(&self) -> Self;

    /// Compute 2^n * Self.
    fn repeated_doubling(&self, n: u64) -> Self;
}

/// Trait implemented by elements of an additive group where the group is parameterized, for example
/// by the modulus in case of the group being Z mod p.
pub trait ParameterizedGroupElement:
    Sized + Clone + for<'a> Add<&'a Self, Output = Self> + Add<Output = Self> + Eq + Doubling
{
    /// The type of the parameter which uniquely defines this group.
    type ParameterType;

    /// Return an instance of the identity element in this group.
    fn zero(parameter: &Self::ParameterType) -> Self;

    /// Returns true if this is an element of the group defined by `parameter`.
    fn is_in_group(&self, parameter: &Self::ParameterType) -> bool;
}

/// Trait for scalar multiplication for a fixed group element, e.g. by using precomputed values.
pub trait ScalarMultiplier<G, S> {
    /// Create a new scalar multiplier with the given base element.
    fn new(base_element: G) -> Self;

    /// Compute `self.base_element * scalar`.
    fn mul(&self, scalar: &S) -> G;
}
