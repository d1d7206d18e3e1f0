// Copyright (c) 2022, Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

use clap::Parser;
use num_bigint::BigUint;
use rand::rngs::OsRng;
use sqvdf::groups::prime_group::modulus::{PrimeModulus, OAKLEY_GROUP_2_MODULUS};
use sqvdf::groups::prime_group::PrimeGroupElement;
use sqvdf::math::prime::sample_security_parameter;
use sqvdf::vdf::wesolowski::{WesolowskiProof, WesolowskisVDF, DEFAULT_BASE_ITERATIONS};
use sqvdf::vdf::VDF;
use std::io::{Error, ErrorKind};

#[derive(Parser)]
#[command(name = "vdf-cli")]
#[command(about = "Verifiable delay function using repeated squaring modulo a prime with Wesolowski proofs", long_about = None)]
enum Command {
    /// Compute VDF output and proof.
    Evaluate(EvaluateArguments),

    /// Verify an output.
    Verify(VerifyArguments),

    /// Print the number of squarings required for a given progress value.
    Iterations(IterationsArguments),

    /// Hash a binary message to a group element.
    Hash(HashArguments),

    /// Sample a random 128-bit prime.
    Prime,
}

#[derive(Parser, Clone)]
struct ParameterArguments {
    /// The hex encoded prime modulus (default is the 1024-bit prime from RFC 2409).
    #[clap(long)]
    modulus: Option<String>,

    /// The number of squarings without progress tracking.
    #[clap(long, default_value_t = DEFAULT_BASE_ITERATIONS)]
    base_iterations: u64,
}

#[derive(Parser, Clone)]
struct EvaluateArguments {
    /// The hex encoded input to the VDF.
    #[clap(long)]
    input: String,

    /// The number of prior outputs by the same writer.
    #[clap(long)]
    progress: Option<u64>,

    #[clap(flatten)]
    parameters: ParameterArguments,
}

#[derive(Parser, Clone)]
struct VerifyArguments {
    /// The input to the VDF.
    #[clap(long)]
    input: String,

    /// The output of the VDF.
    #[clap(short, long)]
    output: String,

    /// The proof of the correctness of the VDF output.
    #[clap(short, long)]
    proof: String,

    /// The progress value used when computing the output.
    #[clap(long)]
    progress: Option<u64>,

    #[clap(flatten)]
    parameters: ParameterArguments,
}

#[derive(Parser, Clone)]
struct IterationsArguments {
    #[clap(long)]
    progress: Option<u64>,

    #[clap(flatten)]
    parameters: ParameterArguments,
}

#[derive(Parser, Clone)]
struct HashArguments {
    /// The hex encoded input to the hash function.
    #[clap(short, long)]
    message: String,

    #[clap(flatten)]
    parameters: ParameterArguments,
}

fn main() {
    // Filtered by RUST_LOG, which defaults to errors only.
    tracing_subscriber::fmt::init();

    match execute(Command::parse()) {
        Ok(res) => {
            println!("{}", res);
            std::process::exit(exitcode::OK);
        }
        Err(e) => {
            println!("Error: {}", e);
            std::process::exit(exitcode::DATAERR);
        }
    }
}

fn create_vdf(arguments: ParameterArguments) -> Result<WesolowskisVDF, Error> {
    let modulus = match arguments.modulus {
        Some(modulus) => PrimeModulus::from_hex(&modulus)
            .map_err(|_| Error::new(ErrorKind::InvalidInput, "Invalid modulus."))?,
        None => OAKLEY_GROUP_2_MODULUS.clone(),
    };
    Ok(WesolowskisVDF::new(modulus, arguments.base_iterations))
}

fn decode_element(
    vdf: &WesolowskisVDF,
    hex_string: &str,
    name: &str,
) -> Result<PrimeGroupElement, Error> {
    let bytes = hex::decode(hex_string).map_err(|_| {
        Error::new(
            ErrorKind::InvalidInput,
            format!("Invalid {} hex string.", name),
        )
    })?;
    PrimeGroupElement::from_bytes(&bytes, vdf.modulus())
        .map_err(|_| Error::new(ErrorKind::InvalidInput, format!("Invalid {}.", name)))
}

fn encode_integer(value: &BigUint) -> String {
    hex::encode(value.to_bytes_be())
}

fn execute(cmd: Command) -> Result<String, Error> {
    match cmd {
        Command::Evaluate(arguments) => {
            let vdf = create_vdf(arguments.parameters)?;
            let input = decode_element(&vdf, &arguments.input, "input")?;

            let (output, proof) = vdf
                .compute(&input, arguments.progress)
                .map_err(|e| Error::new(ErrorKind::Other, e))?;
            let proof_bytes = proof
                .to_bytes()
                .map_err(|e| Error::new(ErrorKind::Other, e))?;

            let mut result = "Output: ".to_string();
            result.push_str(&encode_integer(output.value()));
            result.push_str("\nProof:  ");
            result.push_str(&hex::encode(proof_bytes));
            Ok(result)
        }

        Command::Verify(arguments) => {
            let vdf = create_vdf(arguments.parameters)?;
            let input = decode_element(&vdf, &arguments.input, "input")?;
            let output = decode_element(&vdf, &arguments.output, "output")?;
            let proof = WesolowskiProof::from_bytes(&hex::decode(arguments.proof).map_err(
                |_| Error::new(ErrorKind::InvalidInput, "Invalid proof hex string."),
            )?)
            .map_err(|_| Error::new(ErrorKind::InvalidInput, "Invalid proof."))?;

            let verifies = vdf.verify(&input, &output, &proof, arguments.progress);

            let mut result = "Verified: ".to_string();
            result.push_str(&verifies.to_string());
            Ok(result)
        }

        Command::Iterations(arguments) => {
            let vdf = create_vdf(arguments.parameters)?;
            let mut result = "Iterations: ".to_string();
            result.push_str(&vdf.iterations(arguments.progress).to_string());
            Ok(result)
        }

        Command::Hash(arguments) => {
            let vdf = create_vdf(arguments.parameters)?;
            let message = hex::decode(arguments.message)
                .map_err(|_| Error::new(ErrorKind::InvalidInput, "Invalid message."))?;
            let output = PrimeGroupElement::hash_to_group(&message, vdf.modulus());

            let mut result = "Output: ".to_string();
            result.push_str(&encode_integer(output.value()));
            Ok(result)
        }

        Command::Prime => {
            let prime = sample_security_parameter(&mut OsRng)
                .map_err(|e| Error::new(ErrorKind::Other, e))?;
            let mut result = "Prime: ".to_string();
            result.push_str(&encode_integer(&prime));
            Ok(result)
        }
    }
}
