// Copyright (c) 2022, Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Errors returned by this crate.
//!
//! Computing a VDF output can only fail if the secure random source used to sample the proof's
//! security parameter fails. A proof that does not check out is not an error: verification simply
//! returns `false`.

use thiserror::Error;

pub type VdfResult<T> = Result<T, VdfError>;

#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum VdfError {
    /// Invalid value was given to the function
    #[error("Invalid value was given to the function")]
    InvalidInput,

    /// The random source could not supply bytes.
    #[error("Entropy source failure: {0}")]
    EntropyFailure(String),
}

impl From<rand::Error> for VdfError {
    fn from(e: rand::Error) -> Self {
        VdfError::EntropyFailure(e.to_string())
    }
}
