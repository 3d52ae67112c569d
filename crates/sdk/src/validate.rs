//! Parameter validation performed before any network access.
//!
//! Dispatchers run these checks in declared parameter order and
//! short-circuit on the first failure, so the error a caller sees always
//! names the leftmost invalid parameter. No check touches the network.

use meridian_core::address::{AccountId, ValidatorId};
use meridian_core::chain::BlockHeight;
use meridian_core::string_encoding::Format;

use crate::error::ValidationError;

/// Decode an account address parameter.
pub(crate) fn account(
    param: &'static str,
    raw: &str,
) -> Result<AccountId, ValidationError> {
    AccountId::decode(raw)
        .map_err(|error| ValidationError::Address { param, error })
}

/// Decode a validator address parameter.
pub(crate) fn validator(
    param: &'static str,
    raw: &str,
) -> Result<ValidatorId, ValidationError> {
    ValidatorId::decode(raw)
        .map_err(|error| ValidationError::Address { param, error })
}

/// Check a height parameter. Block 0 is not addressable.
pub(crate) fn height(
    param: &'static str,
    raw: u64,
) -> Result<BlockHeight, ValidationError> {
    if raw == 0 {
        return Err(ValidationError::ZeroHeight { param });
    }
    Ok(BlockHeight(raw))
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use meridian_core::address::testing::validator_id;
    use meridian_core::string_encoding::Format;

    use super::*;

    #[test]
    fn test_param_name_is_attached() {
        assert_matches!(
            account("delegator", "not-an-address"),
            Err(ValidationError::Address {
                param: "delegator",
                ..
            })
        );
    }

    #[test]
    fn test_role_mismatch_is_rejected() {
        let encoded = validator_id(4).encode();
        assert_matches!(
            account("delegator", &encoded),
            Err(ValidationError::Address {
                param: "delegator",
                ..
            })
        );
        assert!(validator("validator", &encoded).is_ok());
    }

    #[test]
    fn test_zero_height_is_rejected() {
        assert_matches!(
            height("height", 0),
            Err(ValidationError::ZeroHeight { param: "height" })
        );
        assert_eq!(height("height", 7).unwrap(), BlockHeight(7));
    }
}
