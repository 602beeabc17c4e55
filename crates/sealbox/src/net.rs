//! IPv4 dotted-quad / integer conversion.
//!
//! A stateless bijection over exactly the closed range [0, 4294967295].
//! Conversion runs on unsigned integers end to end, so the boundary values 0
//! and 4294967295 need no sign handling.

use std::net::Ipv4Addr;

use thiserror::Error;

/// Errors produced by address conversion.
#[derive(Debug, Error)]
pub enum AddrError {
    /// The input is not a dotted-quad IPv4 address.
    #[error("invalid IPv4 address format: {0}")]
    Format(String),

    /// The integer is outside the IPv4 range.
    #[error("value out of IPv4 range: {0}")]
    Range(u64),
}

/// Convert a dotted-quad IPv4 string to its big-endian integer form.
///
/// # Errors
///
/// Returns [`AddrError::Format`] for anything that is not a strict dotted
/// quad — IPv6 text such as `"::1"` included.
pub fn address_to_number(input: &str) -> Result<u32, AddrError> {
    let addr: Ipv4Addr = input
        .parse()
        .map_err(|_| AddrError::Format(input.to_owned()))?;
    Ok(u32::from(addr))
}

/// Convert an integer back to its dotted-quad IPv4 string.
///
/// Takes `u64` so out-of-range values are representable and rejected
/// explicitly rather than silently truncated at the boundary.
///
/// # Errors
///
/// Returns [`AddrError::Range`] for values above 4294967295.
pub fn number_to_address(input: u64) -> Result<String, AddrError> {
    let value = u32::try_from(input).map_err(|_| AddrError::Range(input))?;
    Ok(Ipv4Addr::from(value).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const CASES: &[(&str, u32)] = &[
        ("192.168.0.1", 3232235521),
        ("0.0.0.0", 0),
        ("255.255.255.255", 4294967295),
    ];

    #[test]
    fn address_to_number_vectors() {
        for &(addr, number) in CASES {
            assert_eq!(address_to_number(addr).unwrap(), number, "{addr}");
        }
    }

    #[test]
    fn number_to_address_vectors() {
        for &(addr, number) in CASES {
            assert_eq!(number_to_address(u64::from(number)).unwrap(), addr, "{number}");
        }
    }

    #[test]
    fn rejects_malformed_addresses() {
        for input in ["invalid_ip", "::1", "1.2.3", "1.2.3.4.5", "256.0.0.1", ""] {
            assert!(
                matches!(address_to_number(input), Err(AddrError::Format(_))),
                "{input:?}"
            );
        }
    }

    #[test]
    fn rejects_out_of_range_numbers() {
        assert!(matches!(
            number_to_address(4_294_967_296),
            Err(AddrError::Range(4_294_967_296))
        ));
        assert!(matches!(number_to_address(u64::MAX), Err(AddrError::Range(_))));
    }
}
