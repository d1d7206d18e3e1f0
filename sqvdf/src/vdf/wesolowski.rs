// Copyright (c) 2022, Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

use std::ops::Shl;
use std::sync::Arc;

use num_bigint::BigUint;
use num_traits::{One, Zero};
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{VdfError, VdfResult};
use crate::groups::prime_group::biguint_serde;
use crate::groups::prime_group::modulus::{PrimeModulus, OAKLEY_GROUP_2_MODULUS};
use crate::groups::prime_group::multiplier::Multiplier;
use crate::groups::prime_group::PrimeGroupElement;
use crate::groups::{Doubling, ParameterizedGroupElement, ScalarMultiplier};
use crate::math::prime::sample_security_parameter;
use crate::vdf::schedule::effective_iterations;
use crate::vdf::VDF;
use crate::AllowedRng;

/// Default number of squarings for a call without progress tracking.
pub const DEFAULT_BASE_ITERATIONS: u64 = 250_000;

/// The two externally supplied constants defining a VDF instance.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct VdfParameters {
    pub modulus: PrimeModulus,
    pub base_iterations: u64,
}

impl Default for VdfParameters {
    fn default() -> Self {
        Self {
            modulus: OAKLEY_GROUP_2_MODULUS.clone(),
            base_iterations: DEFAULT_BASE_ITERATIONS,
        }
    }
}

/// A proof that an output was computed from a given input. `l` is the random prime security
/// parameter and `y = input^(2^iterations mod l)`. The proof is only meaningful together with the
/// input and progress value it was generated for.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct WesolowskiProof {
    #[serde(with = "biguint_serde")]
    y: BigUint,
    #[serde(with = "biguint_serde")]
    l: BigUint,
}

impl WesolowskiProof {
    pub fn new(y: BigUint, l: BigUint) -> Self {
        Self { y, l }
    }

    pub fn y(&self) -> &BigUint {
        &self.y
    }

    pub fn l(&self) -> &BigUint {
        &self.l
    }

    /// Serialize this proof using bcs. Both integers are written big-endian.
    pub fn to_bytes(&self) -> VdfResult<Vec<u8>> {
        bcs::to_bytes(self).map_err(|_| VdfError::InvalidInput)
    }

    pub fn from_bytes(bytes: &[u8]) -> VdfResult<Self> {
        bcs::from_bytes(bytes).map_err(|_| VdfError::InvalidInput)
    }
}

/// An implementation of Wesolowski's VDF construction (https://eprint.iacr.org/2018/623) over the
/// multiplicative group modulo a prime.
///
/// The instance only holds immutable parameters, so it can be shared between threads and used for
/// concurrent calls with different inputs.
#[derive(Clone, Debug)]
pub struct WesolowskisVDF {
    modulus: Arc<PrimeModulus>,
    base_iterations: u64,
}

impl WesolowskisVDF {
    /// Create a new VDF using the group defined by the given modulus. Evaluating this VDF without
    /// progress tracking will require computing `input^(2^base_iterations)`, which requires
    /// `base_iterations` sequential squarings.
    pub fn new(modulus: PrimeModulus, base_iterations: u64) -> Self {
        Self {
            modulus: Arc::new(modulus),
            base_iterations,
        }
    }

    pub fn from_parameters(parameters: VdfParameters) -> Self {
        Self::new(parameters.modulus, parameters.base_iterations)
    }

    pub fn modulus(&self) -> &Arc<PrimeModulus> {
        &self.modulus
    }

    pub fn base_iterations(&self) -> u64 {
        self.base_iterations
    }

    /// Interpret an integer as an element of the group of this VDF.
    pub fn element(&self, value: BigUint) -> PrimeGroupElement {
        PrimeGroupElement::new(value, &self.modulus)
    }

    /// The number of squarings required for a call with the given progress counter.
    pub fn iterations(&self, progress: Option<u64>) -> u64 {
        let iterations = effective_iterations(self.base_iterations, progress);
        match progress {
            Some(progress) => debug!(
                "Progress {} gives {} iterations (base {})",
                progress, iterations, self.base_iterations
            ),
            None => debug!(
                "No progress tracking, using {} iterations (base {})",
                iterations, self.base_iterations
            ),
        }
        iterations
    }

    /// Compute `input^(2^iterations) mod p`. This is the sequential part of the VDF and cannot fail.
    /// The exponent is written out in full, so `iterations` should not exceed
    /// [MAX_ITERATIONS](crate::vdf::schedule::MAX_ITERATIONS).
    pub fn evaluate(&self, input: &PrimeGroupElement, iterations: u64) -> PrimeGroupElement {
        self.element(input.value().clone()).repeated_doubling(iterations)
    }

    /// Create a proof for `input` and the given number of iterations. This does not need the output
    /// and only requires an exponentiation with an exponent smaller than the security parameter.
    pub fn generate_proof<R: AllowedRng>(
        &self,
        input: &PrimeGroupElement,
        iterations: u64,
        rng: &mut R,
    ) -> VdfResult<WesolowskiProof> {
        let l = sample_security_parameter(rng)?;
        let r = two_to_the_power_mod(iterations, &l);

        let multiplier = Multiplier::new(self.element(input.value().clone()));
        let y = multiplier.mul(&r).into_value();

        Ok(WesolowskiProof { y, l })
    }

    /// Same as [VDF::compute] but with a caller supplied source of randomness for the proof.
    pub fn compute_with_rng<R: AllowedRng>(
        &self,
        input: &PrimeGroupElement,
        progress: Option<u64>,
        rng: &mut R,
    ) -> VdfResult<(PrimeGroupElement, WesolowskiProof)> {
        let iterations = self.iterations(progress);

        // The proof only needs randomness, so create it first to fail before the long computation
        // if the random source is broken.
        let proof = self.generate_proof(input, iterations, rng)?;
        let output = self.evaluate(input, iterations);
        debug!("Computed VDF output with {} iterations", iterations);

        Ok((output, proof))
    }
}

impl VDF for WesolowskisVDF {
    type InputType = PrimeGroupElement;
    type OutputType = PrimeGroupElement;
    type ProofType = WesolowskiProof;

    fn compute(
        &self,
        input: &PrimeGroupElement,
        progress: Option<u64>,
    ) -> VdfResult<(PrimeGroupElement, WesolowskiProof)> {
        self.compute_with_rng(input, progress, &mut OsRng)
    }

    fn verify(
        &self,
        input: &PrimeGroupElement,
        output: &PrimeGroupElement,
        proof: &WesolowskiProof,
        progress: Option<u64>,
    ) -> bool {
        if !output.is_in_group(&self.modulus) {
            debug!("Output is not an element of the group of this VDF");
            return false;
        }
        if proof.l.is_zero() {
            debug!("Proof has a zero security parameter");
            return false;
        }

        let iterations = self.iterations(progress);

        // With 2^iterations = q * l + r, the output is input^(q * l) * input^r where y = input^r.
        let r = two_to_the_power_mod(iterations, &proof.l);
        let exponent = BigUint::one().shl(iterations) - r;

        // The input is read as an integer in this group, as in `compute`.
        let multiplier = Multiplier::new(self.element(input.value().clone()));
        let expected = multiplier.mul(&exponent) + &self.element(proof.y.clone());

        expected == *output
    }
}

/// Compute `2^exponent mod modulus`.
fn two_to_the_power_mod(exponent: u64, modulus: &BigUint) -> BigUint {
    BigUint::from(2u8).modpow(&BigUint::from(exponent), modulus)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::FailingRng;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const GENESIS_INPUT: &str = "f92d7accb0004af0565148cdb657e0199574ad70dbaed4ecdfdec345943bb24a2612cfe3e45bafb59120dce8c4550640b56664072e814a55266d0441f9708650";

    fn genesis_input(vdf: &WesolowskisVDF) -> PrimeGroupElement {
        let bytes = hex::decode(GENESIS_INPUT).unwrap();
        PrimeGroupElement::from_bytes(&bytes, vdf.modulus()).unwrap()
    }

    fn small_vdf(base_iterations: u64) -> WesolowskisVDF {
        WesolowskisVDF::new(
            PrimeModulus::try_from(BigUint::from(1_000_003u32)).unwrap(),
            base_iterations,
        )
    }

    #[test]
    fn test_compute_and_verify() {
        let vdf = WesolowskisVDF::new(OAKLEY_GROUP_2_MODULUS.clone(), 1000);
        let input = genesis_input(&vdf);
        let mut rng = StdRng::from_seed([0u8; 32]);

        for progress in [None, Some(0), Some(1), Some(2), Some(17)] {
            let (output, proof) = vdf.compute_with_rng(&input, progress, &mut rng).unwrap();
            assert!(vdf.verify(&input, &output, &proof, progress));
            assert_eq!(proof.l().bits(), 128);
        }
    }

    #[test]
    fn test_compute_with_os_rng() {
        let vdf = WesolowskisVDF::new(OAKLEY_GROUP_2_MODULUS.clone(), 500);
        let input = genesis_input(&vdf);
        let (output, proof) = vdf.compute(&input, None).unwrap();
        assert!(vdf.verify(&input, &output, &proof, None));
    }

    #[test]
    fn test_evaluate() {
        // 5^(2^3) = 390625 = 16 mod 23
        let vdf = WesolowskisVDF::new(PrimeModulus::try_from(BigUint::from(23u32)).unwrap(), 3);
        let input = vdf.element(BigUint::from(5u32));
        assert_eq!(vdf.evaluate(&input, 3).value(), &BigUint::from(16u32));

        // Matches sequential squaring and is deterministic
        let vdf = small_vdf(100);
        let input = vdf.element(BigUint::from(12345u32));
        let mut expected = input.clone();
        for _ in 0..100 {
            expected = expected.double();
        }
        assert_eq!(vdf.evaluate(&input, 100), expected);
        assert_eq!(vdf.evaluate(&input, 100), vdf.evaluate(&input, 100));
    }

    #[test]
    fn test_output_is_independent_of_randomness() {
        let vdf = WesolowskisVDF::new(OAKLEY_GROUP_2_MODULUS.clone(), 300);
        let input = genesis_input(&vdf);
        let (output1, proof1) = vdf
            .compute_with_rng(&input, Some(5), &mut StdRng::from_seed([1u8; 32]))
            .unwrap();
        let (output2, proof2) = vdf
            .compute_with_rng(&input, Some(5), &mut StdRng::from_seed([2u8; 32]))
            .unwrap();
        assert_eq!(output1, output2);
        assert_ne!(proof1.l(), proof2.l());
        assert!(vdf.verify(&input, &output1, &proof2, Some(5)));
    }

    #[test]
    fn test_proof_structure() {
        let vdf = small_vdf(64);
        let input = vdf.element(BigUint::from(2u32));
        let iterations = vdf.iterations(None);
        let proof = vdf
            .generate_proof(&input, iterations, &mut StdRng::from_seed([3u8; 32]))
            .unwrap();

        let r = (BigUint::one() << 64u32) % proof.l();
        let expected = BigUint::from(2u32).modpow(&r, &BigUint::from(1_000_003u32));
        assert_eq!(proof.y(), &expected);
    }

    #[test]
    fn test_invalid_proofs() {
        let vdf = WesolowskisVDF::new(OAKLEY_GROUP_2_MODULUS.clone(), 1000);
        let input = genesis_input(&vdf);
        let mut rng = StdRng::from_seed([4u8; 32]);
        let (output, proof) = vdf.compute_with_rng(&input, Some(10), &mut rng).unwrap();
        assert!(vdf.verify(&input, &output, &proof, Some(10)));

        // Different input
        let other_input = vdf.element(input.value() + 1u32);
        assert!(!vdf.verify(&other_input, &output, &proof, Some(10)));

        // Tampered output byte
        let mut output_bytes = output.to_bytes();
        output_bytes[10] ^= 0x01;
        let modified_output = PrimeGroupElement::from_bytes(&output_bytes, vdf.modulus()).unwrap();
        assert!(!vdf.verify(&input, &modified_output, &proof, Some(10)));

        // Tampered proof
        let modified_proof = WesolowskiProof::new(proof.y() + 1u32, proof.l().clone());
        assert!(!vdf.verify(&input, &output, &modified_proof, Some(10)));
        let modified_proof = WesolowskiProof::new(proof.y().clone(), proof.l() + 2u32);
        assert!(!vdf.verify(&input, &output, &modified_proof, Some(10)));
        let zero_proof = WesolowskiProof::new(proof.y().clone(), BigUint::zero());
        assert!(!vdf.verify(&input, &output, &zero_proof, Some(10)));

        // Different progress
        assert!(!vdf.verify(&input, &output, &proof, Some(11)));
        assert!(!vdf.verify(&input, &output, &proof, None));

        // Output from another group
        let other_vdf = small_vdf(1000);
        let foreign_output = other_vdf.element(output.value().clone());
        assert!(!vdf.verify(&input, &foreign_output, &proof, Some(10)));
    }

    #[test]
    fn test_input_from_other_group() {
        // The input is only an integer, so an element carrying another modulus is read in the group
        // of this VDF by both compute and verify.
        let vdf = WesolowskisVDF::new(OAKLEY_GROUP_2_MODULUS.clone(), 50);
        let other_modulus = Arc::new(PrimeModulus::try_from(BigUint::from(23u32)).unwrap());
        let input = PrimeGroupElement::new(BigUint::from(5u32), &other_modulus);

        let (output, proof) = vdf
            .compute_with_rng(&input, None, &mut StdRng::from_seed([8u8; 32]))
            .unwrap();
        assert!(output.is_in_group(vdf.modulus()));
        assert_eq!(output, vdf.evaluate(&vdf.element(BigUint::from(5u32)), 50));
        assert!(vdf.verify(&input, &output, &proof, None));
        assert!(vdf.verify(&vdf.element(BigUint::from(5u32)), &output, &proof, None));
    }

    #[test]
    fn test_edge_case_inputs() {
        let vdf = small_vdf(20);
        let p = vdf.modulus().value().clone();
        let mut rng = StdRng::from_seed([10u8; 32]);

        for value in [
            BigUint::zero(),
            BigUint::one(),
            &p - 1u32,
            p.clone(),
            &p + 5u32,
            &p * &p + 2u32,
        ] {
            let input = vdf.element(value.clone());
            let (output, proof) = vdf.compute_with_rng(&input, Some(3), &mut rng).unwrap();
            assert!(output.value() < &p);
            assert!(vdf.verify(&input, &output, &proof, Some(3)), "input {value}");
        }
    }

    #[test]
    fn test_entropy_failure() {
        let vdf = small_vdf(10);
        let input = vdf.element(BigUint::from(2u32));
        assert!(matches!(
            vdf.compute_with_rng(&input, None, &mut FailingRng),
            Err(VdfError::EntropyFailure(_))
        ));
    }

    #[test]
    fn test_zero_base_iterations() {
        let vdf = small_vdf(0);
        let input = vdf.element(BigUint::from(3u32));
        let (output, proof) = vdf
            .compute_with_rng(&input, None, &mut StdRng::from_seed([5u8; 32]))
            .unwrap();
        // The floor of one iteration applies, so the output is the square of the input.
        assert_eq!(output.value(), &BigUint::from(9u32));
        assert!(vdf.verify(&input, &output, &proof, None));
    }

    #[test]
    fn test_proof_serialization() {
        let vdf = small_vdf(10);
        let input = vdf.element(BigUint::from(7u32));
        let (_, proof) = vdf
            .compute_with_rng(&input, None, &mut StdRng::from_seed([6u8; 32]))
            .unwrap();
        let bytes = proof.to_bytes().unwrap();
        assert_eq!(WesolowskiProof::from_bytes(&bytes).unwrap(), proof);
        assert!(WesolowskiProof::from_bytes(&bytes[..bytes.len() - 1]).is_err());
    }

    #[test]
    fn test_parameters() {
        let parameters = VdfParameters::default();
        assert_eq!(parameters.base_iterations, DEFAULT_BASE_ITERATIONS);
        assert_eq!(parameters.modulus.bits(), 1024);

        let bytes = bcs::to_bytes(&parameters).unwrap();
        let decoded: VdfParameters = bcs::from_bytes(&bytes).unwrap();
        assert_eq!(decoded, parameters);

        let vdf = WesolowskisVDF::from_parameters(decoded);
        assert_eq!(vdf.base_iterations(), DEFAULT_BASE_ITERATIONS);
        assert_eq!(vdf.iterations(Some(4)), 2 * DEFAULT_BASE_ITERATIONS);
    }

    #[test]
    fn test_concurrent_calls() {
        let vdf = WesolowskisVDF::new(OAKLEY_GROUP_2_MODULUS.clone(), 200);
        let vdf = &vdf;
        std::thread::scope(|s| {
            let handles: Vec<_> = (0..4u64)
                .map(|i| {
                    s.spawn(move || {
                        let input = vdf.element(BigUint::from(1000u64 + i));
                        let (output, proof) = vdf.compute(&input, Some(i)).unwrap();
                        vdf.verify(&input, &output, &proof, Some(i))
                    })
                })
                .collect();
            for handle in handles {
                assert!(handle.join().unwrap());
            }
        });
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn test_round_trip(
            input in proptest::collection::vec(any::<u8>(), 1..48),
            progress in proptest::option::of(0u64..1000),
            seed in any::<[u8; 32]>(),
        ) {
            // Inputs of up to 384 bits cover values far above the modulus.
            let vdf = small_vdf(30);
            let input = PrimeGroupElement::from_bytes(&input, vdf.modulus()).unwrap();
            let (output, proof) = vdf
                .compute_with_rng(&input, progress, &mut StdRng::from_seed(seed))
                .unwrap();
            prop_assert!(vdf.verify(&input, &output, &proof, progress));
        }
    }

    fn run_chain(base_iterations: u64, length: u64) {
        let vdf = WesolowskisVDF::new(OAKLEY_GROUP_2_MODULUS.clone(), base_iterations);
        let mut rng = StdRng::from_seed([9u8; 32]);

        let mut next = genesis_input(&vdf);
        let mut previous_iterations = 0;
        for progress in 0..length {
            let iterations = vdf.iterations(Some(progress));
            assert!(iterations >= previous_iterations);
            previous_iterations = iterations;

            let (output, proof) = vdf
                .compute_with_rng(&next, Some(progress), &mut rng)
                .unwrap();
            assert!(vdf.verify(&next, &output, &proof, Some(progress)));
            next = output;
        }
    }

    #[test]
    fn test_chained_outputs() {
        run_chain(100, 100);
    }

    #[test]
    #[ignore = "slow: 100 chained evaluations with 250000 base iterations"]
    fn test_chained_outputs_full_difficulty() {
        let vdf = WesolowskisVDF::from_parameters(VdfParameters::default());
        let input = genesis_input(&vdf);
        let (output, proof) = vdf.compute(&input, None).unwrap();
        assert!(vdf.verify(&input, &output, &proof, None));

        run_chain(DEFAULT_BASE_ITERATIONS, 100);
    }
}
