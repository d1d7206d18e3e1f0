// Copyright (c) 2022, Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! A verifiable delay function built from repeated squaring in the multiplicative group modulo a
//! prime, with Wesolowski-style proofs and a progress based difficulty schedule.
#![warn(
    future_incompatible,
    nonstandard_style,
    rust_2018_idioms,
    rust_2021_compatibility
)]

use rand::rngs::{OsRng, StdRng, ThreadRng};
use rand::{CryptoRng, RngCore};

pub mod error;
pub mod groups;
pub mod math;
pub mod vdf;

#[cfg(test)]
pub(crate) mod test_helpers;

/// Trait impl'd by RNGs that may be used to sample the security parameter of a proof.
pub trait AllowedRng: CryptoRng + RngCore {}

impl AllowedRng for OsRng {}

// StdRng uses ChaCha12 and is only deterministic when seeded, which is what the tests rely on.
impl AllowedRng for StdRng {}

impl AllowedRng for ThreadRng {}
