// Copyright (c) 2022, Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! This module contains an implementation of a verifiable delay function (VDF), using repeated
//! squaring modulo a prime and Wesolowski-style proofs.

use crate::error::VdfResult;

pub mod schedule;
pub mod wesolowski;

/// This represents a Verifiable Delay Function (VDF) construction whose difficulty may depend on a
/// progress counter.
pub trait VDF {
    /// The type of the input to the VDF.
    type InputType;

    /// The type of the output from the VDF.
    type OutputType;

    /// The type of the proof of correctness for this VDF.
    type ProofType;

    /// Evaluate this VDF and return the output and a proof of correctness. `progress` is the number
    /// of prior successful computations by the caller, or `None` to use the base difficulty.
    fn compute(
        &self,
        input: &Self::InputType,
        progress: Option<u64>,
    ) -> VdfResult<(Self::OutputType, Self::ProofType)>;

    /// Verify the output and proof from a VDF. `progress` must be the value used when computing.
    fn verify(
        &self,
        input: &Self::InputType,
        output: &Self::OutputType,
        proof: &Self::ProofType,
        progress: Option<u64>,
    ) -> bool;
}
