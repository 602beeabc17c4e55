//! AES-GCM encryption and decryption of individual opaque strings.
//!
//! The key length selects the cipher variant: 16 bytes → AES-128-GCM,
//! 24 bytes → AES-192-GCM, 32 bytes → AES-256-GCM. Every [`Cipher::encrypt`]
//! call draws a fresh 96-bit nonce from the OS CSPRNG; nonce reuse under the
//! same key breaks both confidentiality and authentication, so the nonce is
//! never cached, derived, or counted.

use aes_gcm::{
    aead::{generic_array::typenum::U12, Aead, KeyInit},
    aes::Aes192,
    Aes128Gcm, Aes256Gcm, AesGcm, Nonce,
};
use base64::{
    alphabet,
    engine::{
        general_purpose::{GeneralPurpose, GeneralPurposeConfig},
        DecodePaddingMode,
    },
    Engine as _,
};
use thiserror::Error;
use tracing::debug;

use crate::rand::{RandomSource, SystemRandom};

/// Byte length of an AES-GCM nonce (12 bytes = 96 bits).
pub const NONCE_LEN: usize = 12;

/// Byte length of the authentication tag appended to every ciphertext.
pub const TAG_LEN: usize = 16;

/// AES-192-GCM; the `aes-gcm` crate only aliases the 128- and 256-bit variants.
type Aes192Gcm = AesGcm<Aes192, U12>;

/// Token encoding: URL-safe base64, emitted with padding (the historical wire
/// format), accepted with or without.
const TOKEN_ENCODING: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Errors produced by [`Cipher`] construction, encryption, and decryption.
#[derive(Debug, Error)]
pub enum CipherError {
    /// The key is not 16, 24, or 32 bytes long.
    #[error("invalid key length: expected 16, 24, or 32 bytes, got {0}")]
    InvalidKeyLength(usize),

    /// The plaintext or token argument was empty.
    #[error("input must not be empty")]
    EmptyInput,

    /// The token is not valid URL-safe base64.
    #[error("token is not valid base64")]
    MalformedToken(#[source] base64::DecodeError),

    /// The decoded token is shorter than the mandatory nonce prefix.
    #[error("token is too short to contain a nonce")]
    TruncatedToken,

    /// Tag verification failed. Deliberately carries no detail about which
    /// check failed, so callers cannot be used as a decryption oracle.
    #[error("token authentication failed")]
    AuthenticationFailed,

    /// The OS randomness source could not produce a nonce.
    #[error("secure randomness unavailable")]
    RandomnessUnavailable,
}

/// AES-GCM instance selected by key length at construction.
#[derive(Clone)]
enum Keyed {
    Aes128(Aes128Gcm),
    Aes192(Aes192Gcm),
    Aes256(Aes256Gcm),
}

impl Keyed {
    fn algorithm(&self) -> &'static str {
        match self {
            Keyed::Aes128(_) => "aes-128-gcm",
            Keyed::Aes192(_) => "aes-192-gcm",
            Keyed::Aes256(_) => "aes-256-gcm",
        }
    }
}

/// Authenticated symmetric cipher over a fixed key.
///
/// Construct once per key and reuse for many calls. The instance holds only
/// the expanded key schedule, never mutates after construction, and is safe
/// to share across threads.
#[derive(Clone)]
pub struct Cipher {
    keyed: Keyed,
}

impl std::fmt::Debug for Cipher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print key material — not even in debug builds.
        write!(f, "Cipher({}, key [REDACTED])", self.keyed.algorithm())
    }
}

impl Cipher {
    /// Build a cipher from raw key bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CipherError::InvalidKeyLength`] unless `key` is exactly 16,
    /// 24, or 32 bytes. The length is validated here, never at call time.
    pub fn new(key: &[u8]) -> Result<Self, CipherError> {
        let invalid = |_| CipherError::InvalidKeyLength(key.len());
        let keyed = match key.len() {
            16 => Keyed::Aes128(Aes128Gcm::new_from_slice(key).map_err(invalid)?),
            24 => Keyed::Aes192(Aes192Gcm::new_from_slice(key).map_err(invalid)?),
            32 => Keyed::Aes256(Aes256Gcm::new_from_slice(key).map_err(invalid)?),
            other => return Err(CipherError::InvalidKeyLength(other)),
        };
        debug!(algorithm = keyed.algorithm(), "cipher initialised");
        Ok(Self { keyed })
    }

    /// Encrypt `plaintext` into a self-contained, URL-safe token.
    ///
    /// A fresh nonce is drawn for every call and prepended to the ciphertext
    /// before encoding, so the token round-trips through URLs, headers, and
    /// query parameters without further escaping.
    ///
    /// # Errors
    ///
    /// - [`CipherError::EmptyInput`] if `plaintext` is empty.
    /// - [`CipherError::RandomnessUnavailable`] if the nonce cannot be drawn;
    ///   fatal for this call, never retried internally.
    /// - [`CipherError::AuthenticationFailed`] on an internal AEAD error
    ///   (unreachable with a valid key schedule and in-memory payloads).
    pub fn encrypt(&self, plaintext: &[u8]) -> Result<String, CipherError> {
        self.encrypt_with(&SystemRandom, plaintext)
    }

    fn encrypt_with(
        &self,
        random: &dyn RandomSource,
        plaintext: &[u8],
    ) -> Result<String, CipherError> {
        if plaintext.is_empty() {
            return Err(CipherError::EmptyInput);
        }

        let mut nonce_bytes = [0u8; NONCE_LEN];
        random
            .fill(&mut nonce_bytes)
            .map_err(|_| CipherError::RandomnessUnavailable)?;
        let nonce = Nonce::from_slice(&nonce_bytes);

        let ciphertext = match &self.keyed {
            Keyed::Aes128(aead) => aead.encrypt(nonce, plaintext),
            Keyed::Aes192(aead) => aead.encrypt(nonce, plaintext),
            Keyed::Aes256(aead) => aead.encrypt(nonce, plaintext),
        }
        .map_err(|_| CipherError::AuthenticationFailed)?;

        let mut raw = Vec::with_capacity(NONCE_LEN + ciphertext.len());
        raw.extend_from_slice(&nonce_bytes);
        raw.extend_from_slice(&ciphertext);

        Ok(TOKEN_ENCODING.encode(raw))
    }

    /// Decrypt a token produced by [`Cipher::encrypt`], returning the original
    /// plaintext bytes exactly.
    ///
    /// # Errors
    ///
    /// - [`CipherError::EmptyInput`] if `token` is empty.
    /// - [`CipherError::MalformedToken`] if the text is not valid base64.
    /// - [`CipherError::TruncatedToken`] if the decoded bytes cannot contain
    ///   a nonce.
    /// - [`CipherError::AuthenticationFailed`] if tag verification fails for
    ///   any reason: wrong key, tampering, or truncation beyond the nonce.
    pub fn decrypt(&self, token: &str) -> Result<Vec<u8>, CipherError> {
        if token.is_empty() {
            return Err(CipherError::EmptyInput);
        }

        let raw = TOKEN_ENCODING
            .decode(token)
            .map_err(CipherError::MalformedToken)?;
        if raw.len() < NONCE_LEN {
            return Err(CipherError::TruncatedToken);
        }

        let (nonce_bytes, ciphertext) = raw.split_at(NONCE_LEN);
        let nonce = Nonce::from_slice(nonce_bytes);

        match &self.keyed {
            Keyed::Aes128(aead) => aead.decrypt(nonce, ciphertext),
            Keyed::Aes192(aead) => aead.decrypt(nonce, ciphertext),
            Keyed::Aes256(aead) => aead.decrypt(nonce, ciphertext),
        }
        .map_err(|_| CipherError::AuthenticationFailed)
    }
}
