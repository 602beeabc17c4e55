//! Core security primitives: authenticated string encryption and bearer
//! secret generation.
//!
//! This module is intentionally free of transport and storage concerns; keys
//! and prefixes arrive as in-memory parameters from the embedding application.
//!
//! # Token format
//!
//! ```text
//! base64url( nonce(12 bytes) || ciphertext || tag(16 bytes) )
//! ```
//!
//! The nonce prefix and the padded URL-safe encoding are binding: previously
//! issued tokens must keep decrypting across releases.

pub mod cipher;
pub mod secret;

pub use cipher::{Cipher, CipherError};
pub use secret::{generate_secret, SecretError};
