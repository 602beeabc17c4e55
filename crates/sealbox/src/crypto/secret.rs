//! High-entropy bearer secret generation.

use sha2::{Digest, Sha512};
use thiserror::Error;

use crate::rand::{RandomSource, SystemRandom};

/// Byte length of the random seed hashed into every secret.
const SEED_LEN: usize = 64;

/// Errors produced by secret generation.
#[derive(Debug, Error)]
pub enum SecretError {
    /// The OS randomness source could not produce a seed.
    #[error("secure randomness unavailable")]
    RandomnessUnavailable,
}

/// Generate a bearer secret: `prefix` followed by 128 lowercase hex characters.
///
/// A fresh 64-byte seed is drawn from the OS CSPRNG and hashed with SHA-512;
/// the hex digest is appended to `prefix` verbatim. The prefix is neither
/// validated nor escaped — callers pick one that stays legal wherever the
/// secret travels (for example, inside a bearer-token header). The module
/// never stores or compares generated secrets; persistence is the caller's
/// responsibility.
///
/// # Errors
///
/// Returns [`SecretError::RandomnessUnavailable`] if the seed cannot be
/// drawn; fatal for this call, never retried internally.
pub fn generate_secret(prefix: &str) -> Result<String, SecretError> {
    generate_with(&SystemRandom, prefix)
}

fn generate_with(random: &dyn RandomSource, prefix: &str) -> Result<String, SecretError> {
    let mut seed = [0u8; SEED_LEN];
    random
        .fill(&mut seed)
        .map_err(|_| SecretError::RandomnessUnavailable)?;

    let digest = Sha512::digest(seed);
    Ok(format!("{prefix}{}", hex::encode(digest)))
}
