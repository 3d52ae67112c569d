//! SDK RPC queries.
//!
//! One dispatcher function per node procedure. Every dispatcher follows the
//! same protocol: validate identity parameters in declared order, build the
//! request (threading pagination for list procedures), run the channel call
//! under a fresh execution scope and relay the outcome. A call that fails
//! validation never reaches the channel.

use meridian_core::pagination::PageRequest;

use crate::channel::{IbcChannel, StakingChannel};
use crate::error::Result;
use crate::queries::ibc::{
    QueryClientParamsRequest, QueryClientParamsResponse,
    QueryClientStateRequest, QueryClientStateResponse,
};
use crate::queries::staking::{
    QueryDelegationRequest, QueryDelegationResponse,
    QueryDelegatorDelegationsRequest, QueryDelegatorDelegationsResponse,
    QueryDelegatorUnbondingDelegationsRequest,
    QueryDelegatorUnbondingDelegationsResponse,
    QueryDelegatorValidatorRequest, QueryDelegatorValidatorResponse,
    QueryDelegatorValidatorsRequest, QueryDelegatorValidatorsResponse,
    QueryHistoricalRecordRequest, QueryHistoricalRecordResponse,
    QueryParamsRequest, QueryParamsResponse, QueryPoolRequest,
    QueryPoolResponse, QueryRedelegationsRequest, QueryRedelegationsResponse,
    QueryValidatorDelegationsRequest, QueryValidatorDelegationsResponse,
    QueryValidatorRequest, QueryValidatorResponse,
    QueryValidatorUnbondingDelegationsRequest,
    QueryValidatorUnbondingDelegationsResponse, QueryValidatorsRequest,
    QueryValidatorsResponse, ValidatorStatus,
};
use crate::queries::staking::{
    DelegatorDelegations, DelegatorUnbonds, DelegatorValidators,
    Redelegations, ValidatorDelegations, ValidatorSet, ValidatorUnbonds,
};
use crate::{validate, Query};

/// Query the staking module parameters.
pub async fn query_staking_params<C: StakingChannel + Sync>(
    query: &Query<C>,
) -> Result<QueryParamsResponse> {
    let req = QueryParamsRequest {};
    query
        .scoped(|signal| query.channel().params(signal, req))
        .await
}

/// Query the bonded and unbonded token pools.
pub async fn query_pool<C: StakingChannel + Sync>(
    query: &Query<C>,
) -> Result<QueryPoolResponse> {
    let req = QueryPoolRequest {};
    query
        .scoped(|signal| query.channel().pool(signal, req))
        .await
}

/// Query the delegation between a delegator and a validator.
pub async fn query_delegation<C: StakingChannel + Sync>(
    query: &Query<C>,
    delegator: &str,
    validator: &str,
) -> Result<QueryDelegationResponse> {
    let delegator = validate::account("delegator", delegator)?;
    let validator = validate::validator("validator", validator)?;
    let req = QueryDelegationRequest {
        delegator,
        validator,
    };
    query
        .scoped(|signal| query.channel().delegation(signal, req))
        .await
}

/// Query all the delegations of a delegator.
pub async fn query_delegator_delegations<C: StakingChannel + Sync>(
    query: &Query<C>,
    delegator: &str,
    pagination: Option<PageRequest<DelegatorDelegations>>,
) -> Result<QueryDelegatorDelegationsResponse> {
    let delegator = validate::account("delegator", delegator)?;
    let req = QueryDelegatorDelegationsRequest {
        delegator,
        pagination: pagination.unwrap_or_else(|| {
            PageRequest::from_defaults(&query.options().pagination)
        }),
    };
    query
        .scoped(|signal| query.channel().delegator_delegations(signal, req))
        .await
}

/// Query all the unbonding delegations of a delegator.
pub async fn query_delegator_unbonding_delegations<C: StakingChannel + Sync>(
    query: &Query<C>,
    delegator: &str,
    pagination: Option<PageRequest<DelegatorUnbonds>>,
) -> Result<QueryDelegatorUnbondingDelegationsResponse> {
    let delegator = validate::account("delegator", delegator)?;
    let req = QueryDelegatorUnbondingDelegationsRequest {
        delegator,
        pagination: pagination.unwrap_or_else(|| {
            PageRequest::from_defaults(&query.options().pagination)
        }),
    };
    query
        .scoped(|signal| {
            query.channel().delegator_unbonding_delegations(signal, req)
        })
        .await
}

/// Query the validator set, optionally restricted to one bonding state.
pub async fn query_validators<C: StakingChannel + Sync>(
    query: &Query<C>,
    status: Option<ValidatorStatus>,
    pagination: Option<PageRequest<ValidatorSet>>,
) -> Result<QueryValidatorsResponse> {
    let req = QueryValidatorsRequest {
        status,
        pagination: pagination.unwrap_or_else(|| {
            PageRequest::from_defaults(&query.options().pagination)
        }),
    };
    query
        .scoped(|signal| query.channel().validators(signal, req))
        .await
}

/// Query one validator's record.
pub async fn query_validator<C: StakingChannel + Sync>(
    query: &Query<C>,
    validator: &str,
) -> Result<QueryValidatorResponse> {
    let validator = validate::validator("validator", validator)?;
    let req = QueryValidatorRequest { validator };
    query
        .scoped(|signal| query.channel().validator(signal, req))
        .await
}

/// Query all the delegations to a validator.
pub async fn query_validator_delegations<C: StakingChannel + Sync>(
    query: &Query<C>,
    validator: &str,
    pagination: Option<PageRequest<ValidatorDelegations>>,
) -> Result<QueryValidatorDelegationsResponse> {
    let validator = validate::validator("validator", validator)?;
    let req = QueryValidatorDelegationsRequest {
        validator,
        pagination: pagination.unwrap_or_else(|| {
            PageRequest::from_defaults(&query.options().pagination)
        }),
    };
    query
        .scoped(|signal| query.channel().validator_delegations(signal, req))
        .await
}

/// Query all the unbonding delegations from a validator.
pub async fn query_validator_unbonding_delegations<C: StakingChannel + Sync>(
    query: &Query<C>,
    validator: &str,
    pagination: Option<PageRequest<ValidatorUnbonds>>,
) -> Result<QueryValidatorUnbondingDelegationsResponse> {
    let validator = validate::validator("validator", validator)?;
    let req = QueryValidatorUnbondingDelegationsRequest {
        validator,
        pagination: pagination.unwrap_or_else(|| {
            PageRequest::from_defaults(&query.options().pagination)
        }),
    };
    query
        .scoped(|signal| {
            query.channel().validator_unbonding_delegations(signal, req)
        })
        .await
}

/// Query the redelegations of a delegator between two validators.
pub async fn query_redelegations<C: StakingChannel + Sync>(
    query: &Query<C>,
    delegator: &str,
    src_validator: &str,
    dst_validator: &str,
    pagination: Option<PageRequest<Redelegations>>,
) -> Result<QueryRedelegationsResponse> {
    let delegator = validate::account("delegator", delegator)?;
    let validator_src = validate::validator("src_validator", src_validator)?;
    let validator_dst = validate::validator("dst_validator", dst_validator)?;
    let req = QueryRedelegationsRequest {
        delegator,
        validator_src,
        validator_dst,
        pagination: pagination.unwrap_or_else(|| {
            PageRequest::from_defaults(&query.options().pagination)
        }),
    };
    query
        .scoped(|signal| query.channel().redelegations(signal, req))
        .await
}

/// Query the validators a delegator is bonded to.
pub async fn query_delegator_validators<C: StakingChannel + Sync>(
    query: &Query<C>,
    delegator: &str,
    pagination: Option<PageRequest<DelegatorValidators>>,
) -> Result<QueryDelegatorValidatorsResponse> {
    let delegator = validate::account("delegator", delegator)?;
    let req = QueryDelegatorValidatorsRequest {
        delegator,
        pagination: pagination.unwrap_or_else(|| {
            PageRequest::from_defaults(&query.options().pagination)
        }),
    };
    query
        .scoped(|signal| query.channel().delegator_validators(signal, req))
        .await
}

/// Query one validator's record as seen by one of its delegators.
pub async fn query_delegator_validator<C: StakingChannel + Sync>(
    query: &Query<C>,
    delegator: &str,
    validator: &str,
) -> Result<QueryDelegatorValidatorResponse> {
    let delegator = validate::account("delegator", delegator)?;
    let validator = validate::validator("validator", validator)?;
    let req = QueryDelegatorValidatorRequest {
        delegator,
        validator,
    };
    query
        .scoped(|signal| query.channel().delegator_validator(signal, req))
        .await
}

/// Query the validator-set snapshot at a past height.
pub async fn query_historical_record<C: StakingChannel + Sync>(
    query: &Query<C>,
    height: u64,
) -> Result<QueryHistoricalRecordResponse> {
    let height = validate::height("height", height)?;
    let req = QueryHistoricalRecordRequest { height };
    query
        .scoped(|signal| query.channel().historical_record(signal, req))
        .await
}

/// Query the IBC client module parameters.
pub async fn query_client_params<C: IbcChannel + Sync>(
    query: &Query<C>,
) -> Result<QueryClientParamsResponse> {
    let req = QueryClientParamsRequest {};
    query
        .scoped(|signal| query.channel().client_params(signal, req))
        .await
}

/// Query the state of one IBC client.
pub async fn query_client_state<C: IbcChannel + Sync>(
    query: &Query<C>,
    client_id: &str,
) -> Result<QueryClientStateResponse> {
    let req = QueryClientStateRequest {
        client_id: client_id.to_owned(),
    };
    query
        .scoped(|signal| query.channel().client_state(signal, req))
        .await
}

#[cfg(test)]
mod test {
    use std::sync::Arc;
    use std::time::Duration;

    use assert_matches::assert_matches;
    use meridian_core::address::testing::{account_id, validator_id};
    use meridian_core::pagination::{PageRequest, DEFAULT_PAGE_LIMIT};
    use meridian_core::string_encoding::Format;

    use super::*;
    use crate::error::{Error, QueryError, ValidationError};
    use crate::testing::{self, Recorded, TestChannel};
    use crate::QueryOptions;

    fn handle(
        channel: TestChannel,
    ) -> (Query<TestChannel>, Arc<TestChannel>) {
        let channel = Arc::new(channel);
        (Query::from_channel(Arc::clone(&channel)), channel)
    }

    #[tokio::test]
    async fn test_malformed_validator_never_reaches_channel() {
        // A handle with a 5 second timeout and default pagination
        let channel = Arc::new(TestChannel::new());
        let query = Query::new(
            Arc::clone(&channel),
            QueryOptions {
                timeout: Duration::from_secs(5),
                ..Default::default()
            },
        );
        let err = query_validator(&query, "xyz123").await.unwrap_err();
        assert_matches!(
            err,
            Error::Validation(ValidationError::Address {
                param: "validator",
                ..
            })
        );
        assert_eq!(channel.calls(), 0);
    }

    #[tokio::test]
    async fn test_composite_lookup_reports_first_invalid_parameter() {
        let (query, channel) = handle(TestChannel::new());
        let delegator = account_id(1).encode();
        let src = validator_id(2).encode();

        // both validator parameters invalid: the leftmost one is reported
        let err =
            query_redelegations(&query, &delegator, "xyz123", "zzz", None)
                .await
                .unwrap_err();
        assert_matches!(
            err,
            Error::Validation(ValidationError::Address {
                param: "src_validator",
                ..
            })
        );

        // valid source, invalid destination
        let err = query_redelegations(&query, &delegator, &src, "zzz", None)
            .await
            .unwrap_err();
        assert_matches!(
            err,
            Error::Validation(ValidationError::Address {
                param: "dst_validator",
                ..
            })
        );

        // an account string in a validator slot is a namespace error, still
        // reported for the leftmost invalid parameter
        let err = query_redelegations(
            &query, &delegator, &delegator, &src, None,
        )
        .await
        .unwrap_err();
        assert_matches!(
            err,
            Error::Validation(ValidationError::Address {
                param: "src_validator",
                ..
            })
        );

        assert_eq!(channel.calls(), 0);
    }

    #[tokio::test]
    async fn test_explicit_carrier_reaches_wire_unmodified() {
        let (query, channel) = handle(TestChannel::new());
        let delegator = account_id(1).encode();
        let carrier = PageRequest::with_limit(10);
        query_delegator_delegations(
            &query,
            &delegator,
            Some(carrier.clone()),
        )
        .await
        .unwrap();
        assert_matches!(
            channel.last_request(),
            Some(Recorded::DelegatorDelegations(req)) => {
                assert_eq!(req.delegator, account_id(1));
                assert_eq!(req.pagination, carrier);
            }
        );
    }

    #[tokio::test]
    async fn test_default_pagination_is_filled_in() {
        let (query, channel) = handle(TestChannel::new());
        let validator = validator_id(2).encode();
        query_validator_delegations(&query, &validator, None)
            .await
            .unwrap();
        assert_matches!(
            channel.last_request(),
            Some(Recorded::ValidatorDelegations(req)) => {
                assert_eq!(req.pagination.key, None);
                assert_eq!(req.pagination.limit, DEFAULT_PAGE_LIMIT);
                assert!(!req.pagination.count_total);
                assert!(!req.pagination.reverse);
            }
        );
    }

    #[tokio::test]
    async fn test_status_filter_is_threaded() {
        let (query, channel) = handle(TestChannel::new());
        query_validators(&query, Some(ValidatorStatus::Bonded), None)
            .await
            .unwrap();
        assert_matches!(
            channel.last_request(),
            Some(Recorded::Validators(req)) => {
                assert_eq!(req.status, Some(ValidatorStatus::Bonded));
            }
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_deadline_elapses_and_channel_observes_cancellation() {
        let channel =
            Arc::new(TestChannel::with_latency(Duration::from_secs(60)));
        let query = Query::new(
            Arc::clone(&channel),
            QueryOptions {
                timeout: Duration::from_secs(5),
                ..Default::default()
            },
        );
        let err = query_pool(&query).await.unwrap_err();
        assert_matches!(err, Error::Timeout(_));
        // the call reached the channel and was then signalled to abort
        assert_eq!(channel.calls(), 1);
        assert!(channel.last_signal().unwrap().is_cancelled());
    }

    #[test_log::test(tokio::test)]
    async fn test_remote_error_is_relayed() {
        let (query, channel) =
            handle(TestChannel::failing("validator does not exist"));
        let validator = validator_id(3).encode();
        let err = query_validator(&query, &validator).await.unwrap_err();
        assert_matches!(
            err,
            Error::Query(QueryError::NoResponse(msg)) => {
                assert!(msg.contains("validator does not exist"));
            }
        );
        assert_eq!(channel.calls(), 1);
    }

    #[test_log::test(tokio::test)]
    async fn test_response_passes_through_unmodified() {
        let (query, _channel) = handle(TestChannel::new());
        let res = query_staking_params(&query).await.unwrap();
        assert_eq!(res.params, testing::sample_staking_params());
        let delegator = account_id(1).encode();
        let validator = validator_id(2).encode();
        let res = query_delegation(&query, &delegator, &validator)
            .await
            .unwrap();
        assert_eq!(res.delegation, testing::sample_delegation_response());
    }

    #[tokio::test]
    async fn test_zero_height_is_rejected_before_the_network() {
        let (query, channel) = handle(TestChannel::new());
        let err = query_historical_record(&query, 0).await.unwrap_err();
        assert_matches!(
            err,
            Error::Validation(ValidationError::ZeroHeight {
                param: "height"
            })
        );
        assert_eq!(channel.calls(), 0);

        query_historical_record(&query, 42).await.unwrap();
        assert_matches!(
            channel.last_request(),
            Some(Recorded::HistoricalRecord(req)) => {
                assert_eq!(req.height.0, 42);
            }
        );
    }

    #[tokio::test]
    async fn test_client_queries() {
        let (query, channel) = handle(TestChannel::new());
        query_client_params(&query).await.unwrap();
        query_client_state(&query, "07-tendermint-0").await.unwrap();
        assert_matches!(
            channel.last_request(),
            Some(Recorded::ClientState(req)) => {
                assert_eq!(req.client_id, "07-tendermint-0");
            }
        );
        assert_eq!(channel.calls(), 2);
    }

    #[tokio::test]
    async fn test_calls_are_independent() {
        let (query, channel) = handle(TestChannel::new());
        let delegator = account_id(1).encode();
        let validator = validator_id(2).encode();
        let (a, b) = tokio::join!(
            query_delegator_delegations(&query, &delegator, None),
            query_validator(&query, &validator),
        );
        a.unwrap();
        b.unwrap();
        assert_eq!(channel.calls(), 2);
    }
}
