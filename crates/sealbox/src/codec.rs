//! Reversible identifier obfuscation over a caller-supplied 32-symbol
//! alphabet.
//!
//! This is alphabet substitution, not encryption: it hides the shape of
//! sequential or structured identifiers and nothing more. The encoding is an
//! unpadded base-32 regrouping of the input bits, most significant bit first,
//! with the final partial group zero-padded on the right.

use thiserror::Error;

/// Number of symbols in a codec alphabet (one per 5-bit group).
pub const ALPHABET_LEN: usize = 32;

/// Marks bytes outside the alphabet in the reverse lookup table.
const INVALID: u8 = 0xFF;

/// Errors produced by [`IdentifierCodec`].
#[derive(Debug, Error)]
pub enum CodecError {
    /// The alphabet is not exactly 32 distinct ASCII symbols.
    #[error("alphabet must be {ALPHABET_LEN} distinct ASCII symbols")]
    InvalidAlphabet,

    /// The input was empty.
    #[error("input must not be empty")]
    EmptyInput,

    /// The input contains a symbol outside the alphabet.
    #[error("input contains a symbol outside the alphabet")]
    InvalidSymbol,

    /// The input length can never be produced by the encoder.
    #[error("input length {0} is not a valid encoding length")]
    InvalidLength(usize),

    /// The final symbol carries non-zero padding bits.
    #[error("input has non-zero trailing bits")]
    TrailingBits,
}

/// Stateless bijection between raw bytes and a 32-symbol alphabet.
///
/// Construct once per alphabet and reuse; the instance is immutable and safe
/// to share across threads. [`IdentifierCodec::decode`] is the exact inverse
/// of [`IdentifierCodec::encode`] for any codec-produced output.
#[derive(Clone)]
pub struct IdentifierCodec {
    alphabet: [u8; ALPHABET_LEN],
    reverse: [u8; 256],
}

impl std::fmt::Debug for IdentifierCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentifierCodec")
            .field("alphabet", &std::str::from_utf8(&self.alphabet).unwrap_or("<non-utf8>"))
            .finish()
    }
}

impl IdentifierCodec {
    /// Build a codec from a 32-symbol alphabet.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::InvalidAlphabet`] unless `alphabet` is exactly
    /// 32 bytes of distinct ASCII.
    pub fn new(alphabet: &str) -> Result<Self, CodecError> {
        let bytes = alphabet.as_bytes();
        if bytes.len() != ALPHABET_LEN || !bytes.iter().all(u8::is_ascii) {
            return Err(CodecError::InvalidAlphabet);
        }

        let mut table = [0u8; ALPHABET_LEN];
        table.copy_from_slice(bytes);

        let mut reverse = [INVALID; 256];
        for (value, &symbol) in table.iter().enumerate() {
            if reverse[usize::from(symbol)] != INVALID {
                return Err(CodecError::InvalidAlphabet);
            }
            reverse[usize::from(symbol)] = value as u8;
        }

        Ok(Self {
            alphabet: table,
            reverse,
        })
    }

    /// Encode `input` into the alphabet, five bits per symbol, no padding
    /// characters.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::EmptyInput`] if `input` is empty.
    pub fn encode(&self, input: &[u8]) -> Result<String, CodecError> {
        if input.is_empty() {
            return Err(CodecError::EmptyInput);
        }

        let mut out = String::with_capacity(input.len() * 8 / 5 + 1);
        let mut bits: u16 = 0;
        let mut pending = 0usize;
        for &byte in input {
            bits = (bits << 8) | u16::from(byte);
            pending += 8;
            while pending >= 5 {
                pending -= 5;
                out.push(char::from(
                    self.alphabet[usize::from((bits >> pending) & 0x1F)],
                ));
            }
        }
        if pending > 0 {
            // Final partial group, zero-padded on the right.
            out.push(char::from(
                self.alphabet[usize::from((bits << (5 - pending)) & 0x1F)],
            ));
        }
        Ok(out)
    }

    /// Decode a string previously produced by [`IdentifierCodec::encode`].
    ///
    /// # Errors
    ///
    /// - [`CodecError::EmptyInput`] if `input` is empty.
    /// - [`CodecError::InvalidSymbol`] for any byte outside the alphabet.
    /// - [`CodecError::InvalidLength`] for lengths the encoder can never emit.
    /// - [`CodecError::TrailingBits`] when the zero padding in the final
    ///   symbol is violated.
    pub fn decode(&self, input: &str) -> Result<Vec<u8>, CodecError> {
        if input.is_empty() {
            return Err(CodecError::EmptyInput);
        }
        // An unpadded 5-bit encoding of n bytes has ceil(8n/5) symbols, so
        // valid lengths mod 8 are exactly {0, 2, 4, 5, 7}.
        if matches!(input.len() % 8, 1 | 3 | 6) {
            return Err(CodecError::InvalidLength(input.len()));
        }

        let mut out = Vec::with_capacity(input.len() * 5 / 8);
        let mut bits: u16 = 0;
        let mut pending = 0usize;
        for &symbol in input.as_bytes() {
            let value = self.reverse[usize::from(symbol)];
            if value == INVALID {
                return Err(CodecError::InvalidSymbol);
            }
            bits = (bits << 5) | u16::from(value);
            pending += 5;
            if pending >= 8 {
                pending -= 8;
                out.push((bits >> pending) as u8);
            }
        }
        // The encoder zero-pads the final group; anything else is corrupt.
        if pending > 0 && bits & ((1u16 << pending) - 1) != 0 {
            return Err(CodecError::TrailingBits);
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALPHABET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdef";

    fn codec() -> IdentifierCodec {
        IdentifierCodec::new(ALPHABET).unwrap()
    }

    #[test]
    fn known_vector() {
        let codec = codec();
        let encoded = codec.encode(b"Sample").unwrap();
        assert_eq!(encoded, "KNQWacDMMU");
        assert_eq!(codec.decode(&encoded).unwrap(), b"Sample");
    }

    #[test]
    fn round_trips_various_lengths() {
        let codec = codec();
        for len in 1..=16u8 {
            let input: Vec<u8> = (0..len).map(|i| i.wrapping_mul(37).wrapping_add(11)).collect();
            let encoded = codec.encode(&input).unwrap();
            assert_eq!(codec.decode(&encoded).unwrap(), input, "len {len}");
        }
    }

    #[test]
    fn rejects_short_alphabet() {
        assert!(matches!(
            IdentifierCodec::new("SHORTENCODER"),
            Err(CodecError::InvalidAlphabet)
        ));
    }

    #[test]
    fn rejects_duplicate_symbols() {
        assert!(matches!(
            IdentifierCodec::new("AACDEFGHIJKLMNOPQRSTUVWXYZabcdef"),
            Err(CodecError::InvalidAlphabet)
        ));
    }

    #[test]
    fn rejects_non_ascii_alphabet() {
        // 32 bytes long, but the last symbol is multi-byte UTF-8.
        assert!(matches!(
            IdentifierCodec::new("ABCDEFGHIJKLMNOPQRSTUVWXYZabcdé"),
            Err(CodecError::InvalidAlphabet)
        ));
    }

    #[test]
    fn rejects_empty_inputs() {
        let codec = codec();
        assert!(matches!(codec.encode(b""), Err(CodecError::EmptyInput)));
        assert!(matches!(codec.decode(""), Err(CodecError::EmptyInput)));
    }

    #[test]
    fn rejects_symbol_outside_alphabet() {
        assert!(matches!(
            codec().decode("KNQW0"),
            Err(CodecError::InvalidSymbol)
        ));
    }

    #[test]
    fn rejects_impossible_lengths() {
        let codec = codec();
        for input in ["A", "ABC", "ABCDEF"] {
            assert!(
                matches!(codec.decode(input), Err(CodecError::InvalidLength(_))),
                "{input}"
            );
        }
    }

    #[test]
    fn rejects_nonzero_trailing_bits() {
        // The valid "Sample" encoding ends in U; V flips a padding bit.
        assert!(matches!(
            codec().decode("KNQWacDMMV"),
            Err(CodecError::TrailingBits)
        ));
    }
}
