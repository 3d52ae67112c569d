//! Meridian's standard string encoding for public types.
//!
//! We're using [bech32m](https://github.com/bitcoin/bips/blob/master/bip-0350.mediawiki),
//! a format with a human-readable part, followed by base32 encoding with a
//! limited character set with checksum check.
//!
//! To use this encoding for a new type, add a HRP (human-readable part) const
//! below and use it to `impl string_encoding::Format for YourType`.

use bech32::Bech32m;
pub use bech32::Hrp;
use thiserror::Error;

// Human-readable parts of Bech32m encoding
//
// Invariant: HRPs must be unique !!!
//
/// `AccountId` human-readable part
pub const ACCOUNT_HRP: &str = "mrn";
/// `ValidatorId` human-readable part
pub const VALIDATOR_HRP: &str = "mrnvaloper";

#[allow(missing_docs)]
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("Error decoding from Bech32m: {0}")]
    DecodeBech32(bech32::DecodeError),
    #[error("Unexpected Bech32m human-readable part {0}, expected {1}")]
    UnexpectedBech32Hrp(String, String),
    #[error("Invalid payload length {0}, expected {1}")]
    InvalidLength(usize, usize),
}

/// Format to string with bech32m
pub trait Format: Sized {
    /// Human-readable part
    const HRP: Hrp;

    /// Encoded bytes representation of `Self`.
    type EncodedBytes<'a>: AsRef<[u8]>
    where
        Self: 'a;

    /// Encode `Self` to a string
    fn encode(&self) -> String {
        bech32::encode::<Bech32m>(Self::HRP, self.to_bytes().as_ref())
            .unwrap_or_else(|_| {
                panic!(
                    "The human-readable part {} should never cause a failure",
                    Self::HRP
                )
            })
    }

    /// Try to decode `Self` from a string
    fn decode(string: impl AsRef<str>) -> Result<Self, DecodeError> {
        let (hrp, bytes) = bech32::decode(string.as_ref())
            .map_err(DecodeError::DecodeBech32)?;
        if hrp != Self::HRP {
            return Err(DecodeError::UnexpectedBech32Hrp(
                hrp.to_string(),
                Self::HRP.to_string(),
            ));
        }
        Self::decode_bytes(&bytes)
    }

    /// Encode `Self` to bytes
    fn to_bytes(&self) -> Self::EncodedBytes<'_>;

    /// Try to decode `Self` from bytes
    fn decode_bytes(bytes: &[u8]) -> Result<Self, DecodeError>;
}

/// Implement [`std::fmt::Display`] and [`std::str::FromStr`] via
/// [`Format`].
#[macro_export]
macro_rules! impl_display_and_from_str_via_format {
    ($t:path) => {
        impl std::fmt::Display for $t {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", $crate::string_encoding::Format::encode(self))
            }
        }

        impl std::str::FromStr for $t {
            type Err = $crate::string_encoding::DecodeError;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                $crate::string_encoding::Format::decode(s)
            }
        }
    };
}

#[cfg(test)]
pub mod test {
    use super::*;

    #[test]
    fn test_hrps() {
        // Make sure that all HRPs are valid
        assert!(Hrp::parse(ACCOUNT_HRP).is_ok());
        assert!(Hrp::parse(VALIDATOR_HRP).is_ok());
    }
}

/// Testing helpers
#[cfg(any(test, feature = "testing"))]
pub mod testing {
    use core::fmt::Debug;

    use super::Format;

    /// String encoding roundtrip test
    pub fn test_string_formatting<T: Format + Eq + Debug>(val: &T) {
        let str = Format::encode(val);
        let decoded: T = Format::decode(str).unwrap();
        assert_eq!(val, &decoded)
    }
}
