// Copyright (c) 2022, Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

use num_bigint::BigUint;
use serde::de::Error;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Decode a big-endian byte vector. Only the encoding produced by [serialize] is accepted: it is
/// non-empty and has no leading zero bytes, except for the single byte encoding of zero. This
/// makes the encoding of an integer unique.
pub(crate) fn deserialize<'de, D>(deserializer: D) -> Result<BigUint, D::Error>
where
    D: Deserializer<'de>,
{
    let bytes = <Vec<u8>>::deserialize(deserializer)?;
    match bytes.as_slice() {
        [] => Err(D::Error::custom("empty integer encoding")),
        [0, _, ..] => Err(D::Error::custom("integer encoding has leading zeros")),
        _ => Ok(BigUint::from_bytes_be(&bytes)),
    }
}

pub(crate) fn serialize<S>(value: &BigUint, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    value.to_bytes_be().serialize(serializer)
}
