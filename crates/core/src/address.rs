//! Account and validator addresses.
//!
//! Meridian uses two disjoint bech32m namespaces: account addresses carry the
//! [`ACCOUNT_HRP`] prefix, validator operator addresses the [`VALIDATOR_HRP`]
//! prefix. Both wrap the same 20-byte payload, but a string from one
//! namespace never decodes as the other.

use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

use crate::impl_display_and_from_str_via_format;
use crate::string_encoding::{
    self, Format, Hrp, ACCOUNT_HRP, VALIDATOR_HRP,
};

/// The length of an address payload in bytes.
pub const ADDRESS_LEN: usize = 20;

/// Error from decoding an address from a string
pub type DecodeError = string_encoding::DecodeError;

/// Result of decoding an address from a string
pub type Result<T> = std::result::Result<T, DecodeError>;

/// An account address.
///
/// The canonical form is the 20-byte payload; the text form is its bech32m
/// encoding under [`ACCOUNT_HRP`].
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    BorshSerialize,
    BorshDeserialize,
    Serialize,
    Deserialize,
)]
pub struct AccountId([u8; ADDRESS_LEN]);

/// A validator operator address.
///
/// Same payload width as [`AccountId`], but encoded under [`VALIDATOR_HRP`].
/// The two namespaces are disjoint by construction.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    BorshSerialize,
    BorshDeserialize,
    Serialize,
    Deserialize,
)]
pub struct ValidatorId([u8; ADDRESS_LEN]);

impl AccountId {
    /// The canonical payload bytes.
    pub fn as_bytes(&self) -> &[u8; ADDRESS_LEN] {
        &self.0
    }
}

impl ValidatorId {
    /// The canonical payload bytes.
    pub fn as_bytes(&self) -> &[u8; ADDRESS_LEN] {
        &self.0
    }
}

impl From<[u8; ADDRESS_LEN]> for AccountId {
    fn from(payload: [u8; ADDRESS_LEN]) -> Self {
        Self(payload)
    }
}

impl From<[u8; ADDRESS_LEN]> for ValidatorId {
    fn from(payload: [u8; ADDRESS_LEN]) -> Self {
        Self(payload)
    }
}

fn decode_payload(bytes: &[u8]) -> Result<[u8; ADDRESS_LEN]> {
    bytes.try_into().map_err(|_| {
        DecodeError::InvalidLength(bytes.len(), ADDRESS_LEN)
    })
}

impl Format for AccountId {
    type EncodedBytes<'a> = &'a [u8; ADDRESS_LEN];

    const HRP: Hrp = Hrp::parse_unchecked(ACCOUNT_HRP);

    fn to_bytes(&self) -> &[u8; ADDRESS_LEN] {
        &self.0
    }

    fn decode_bytes(bytes: &[u8]) -> Result<Self> {
        decode_payload(bytes).map(Self)
    }
}

impl Format for ValidatorId {
    type EncodedBytes<'a> = &'a [u8; ADDRESS_LEN];

    const HRP: Hrp = Hrp::parse_unchecked(VALIDATOR_HRP);

    fn to_bytes(&self) -> &[u8; ADDRESS_LEN] {
        &self.0
    }

    fn decode_bytes(bytes: &[u8]) -> Result<Self> {
        decode_payload(bytes).map(Self)
    }
}

impl_display_and_from_str_via_format!(AccountId);
impl_display_and_from_str_via_format!(ValidatorId);

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::string_encoding::testing::test_string_formatting;

    #[test]
    fn test_account_address_roundtrip() {
        test_string_formatting(&testing::account_id(7));
        test_string_formatting(&testing::validator_id(7));
    }

    #[test]
    fn test_decoding_is_deterministic() {
        let encoded = testing::account_id(3).encode();
        let first = AccountId::decode(&encoded).unwrap();
        let second = AccountId::decode(&encoded).unwrap();
        assert_eq!(first.as_bytes(), second.as_bytes());
    }

    #[test]
    fn test_malformed_address_is_rejected() {
        assert_matches!(
            AccountId::decode("xyz123"),
            Err(DecodeError::DecodeBech32(_))
        );
        assert_matches!(
            ValidatorId::decode(""),
            Err(DecodeError::DecodeBech32(_))
        );
    }

    #[test]
    fn test_checksum_is_verified() {
        let mut encoded = testing::account_id(9).encode();
        // flip the last data character to break the checksum
        let last = encoded.pop().unwrap();
        encoded.push(if last == 'q' { 'p' } else { 'q' });
        assert_matches!(
            AccountId::decode(&encoded),
            Err(DecodeError::DecodeBech32(_))
        );
    }

    #[test]
    fn test_namespaces_are_disjoint() {
        let validator = testing::validator_id(1).encode();
        assert_matches!(
            AccountId::decode(&validator),
            Err(DecodeError::UnexpectedBech32Hrp(_, _))
        );
        let account = testing::account_id(1).encode();
        assert_matches!(
            ValidatorId::decode(&account),
            Err(DecodeError::UnexpectedBech32Hrp(_, _))
        );
    }

    #[test]
    fn test_payload_length_is_checked() {
        let short = bech32::encode::<bech32::Bech32m>(
            AccountId::HRP,
            &[0xAA_u8; 12],
        )
        .unwrap();
        assert_matches!(
            AccountId::decode(short),
            Err(DecodeError::InvalidLength(12, ADDRESS_LEN))
        );
    }
}

/// Testing helpers
#[cfg(any(test, feature = "testing"))]
pub mod testing {
    use super::*;

    /// An arbitrary fixed account address
    pub fn account_id(fill: u8) -> AccountId {
        AccountId([fill; ADDRESS_LEN])
    }

    /// An arbitrary fixed validator address
    pub fn validator_id(fill: u8) -> ValidatorId {
        ValidatorId([fill; ADDRESS_LEN])
    }
}
