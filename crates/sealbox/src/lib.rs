//! Security-primitive utilities: authenticated encryption of opaque strings,
//! high-entropy bearer secrets, and the small obfuscation helpers around them.
//!
//! The crate holds no global state and performs no I/O beyond reading the
//! operating system's randomness source. Every configured type ([`Cipher`],
//! [`IdentifierCodec`]) is an immutable value object: construct it once per
//! key or alphabet and share it freely across threads.

pub mod codec;
pub mod crypto;
pub mod net;
pub mod rand;
pub mod template;

pub use codec::IdentifierCodec;
pub use crypto::cipher::Cipher;
pub use crypto::secret::generate_secret;
