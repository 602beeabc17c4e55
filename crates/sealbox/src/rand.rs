//! Secure random-byte plumbing shared by the cipher and the secret generator.

use thiserror::Error;

/// The operating system's randomness source could not produce bytes.
///
/// Fatal for the current operation; never retried internally. The embedding
/// application decides whether to abort or fail the enclosing operation.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("secure randomness unavailable")]
pub struct RandomError;

/// Source of cryptographically secure random bytes.
///
/// The only implementation shipped here is [`SystemRandom`]. The trait exists
/// so the randomness-unavailable path can be exercised in tests; substituting
/// a non-cryptographic generator voids every security property of this crate.
#[cfg_attr(test, mockall::automock)]
pub trait RandomSource {
    /// Fill `buf` entirely with random bytes.
    ///
    /// # Errors
    ///
    /// Returns [`RandomError`] if the underlying source cannot satisfy the
    /// request.
    fn fill(&self, buf: &mut [u8]) -> Result<(), RandomError>;
}

/// OS CSPRNG-backed [`RandomSource`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRandom;

impl RandomSource for SystemRandom {
    fn fill(&self, buf: &mut [u8]) -> Result<(), RandomError> {
        getrandom::fill(buf).map_err(|_| RandomError)
    }
}
