//! The remote procedure channel.
//!
//! One strongly-typed call per node procedure, grouped by node module. The
//! channel is an injected dependency: it is constructed and owned by the
//! embedding session, shared read-only by any number of query handles, and
//! never reconfigured from here.

use std::fmt::{Debug, Display};

use async_trait::async_trait;

use crate::control_flow::ScopeSignal;
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
    QueryValidatorsResponse,
};

/// Staking read procedures of a Meridian node.
///
/// Implementations must tolerate concurrent calls; queries sharing one
/// handle run in parallel. Every call receives the signal of the execution
/// scope bounding it and should abandon in-flight work once the signal
/// fires.
#[async_trait]
pub trait StakingChannel {
    /// Channel-level transport error.
    type Error: Display + Debug + Send + Sync;

    /// Staking module parameters.
    async fn params(
        &self,
        signal: ScopeSignal,
        request: QueryParamsRequest,
    ) -> Result<QueryParamsResponse, Self::Error>;

    /// The bonded and unbonded token pools.
    async fn pool(
        &self,
        signal: ScopeSignal,
        request: QueryPoolRequest,
    ) -> Result<QueryPoolResponse, Self::Error>;

    /// One delegation record.
    async fn delegation(
        &self,
        signal: ScopeSignal,
        request: QueryDelegationRequest,
    ) -> Result<QueryDelegationResponse, Self::Error>;

    /// All delegations of a delegator.
    async fn delegator_delegations(
        &self,
        signal: ScopeSignal,
        request: QueryDelegatorDelegationsRequest,
    ) -> Result<QueryDelegatorDelegationsResponse, Self::Error>;

    /// All unbonding delegations of a delegator.
    async fn delegator_unbonding_delegations(
        &self,
        signal: ScopeSignal,
        request: QueryDelegatorUnbondingDelegationsRequest,
    ) -> Result<QueryDelegatorUnbondingDelegationsResponse, Self::Error>;

    /// The validator set.
    async fn validators(
        &self,
        signal: ScopeSignal,
        request: QueryValidatorsRequest,
    ) -> Result<QueryValidatorsResponse, Self::Error>;

    /// One validator's record.
    async fn validator(
        &self,
        signal: ScopeSignal,
        request: QueryValidatorRequest,
    ) -> Result<QueryValidatorResponse, Self::Error>;

    /// All delegations to a validator.
    async fn validator_delegations(
        &self,
        signal: ScopeSignal,
        request: QueryValidatorDelegationsRequest,
    ) -> Result<QueryValidatorDelegationsResponse, Self::Error>;

    /// All unbonding delegations from a validator.
    async fn validator_unbonding_delegations(
        &self,
        signal: ScopeSignal,
        request: QueryValidatorUnbondingDelegationsRequest,
    ) -> Result<QueryValidatorUnbondingDelegationsResponse, Self::Error>;

    /// Redelegations between a source and destination validator.
    async fn redelegations(
        &self,
        signal: ScopeSignal,
        request: QueryRedelegationsRequest,
    ) -> Result<QueryRedelegationsResponse, Self::Error>;

    /// The validators a delegator is bonded to.
    async fn delegator_validators(
        &self,
        signal: ScopeSignal,
        request: QueryDelegatorValidatorsRequest,
    ) -> Result<QueryDelegatorValidatorsResponse, Self::Error>;

    /// One validator's record, scoped to a delegator.
    async fn delegator_validator(
        &self,
        signal: ScopeSignal,
        request: QueryDelegatorValidatorRequest,
    ) -> Result<QueryDelegatorValidatorResponse, Self::Error>;

    /// The validator-set snapshot at a past height.
    async fn historical_record(
        &self,
        signal: ScopeSignal,
        request: QueryHistoricalRecordRequest,
    ) -> Result<QueryHistoricalRecordResponse, Self::Error>;
}

/// IBC client read procedures of a Meridian node.
#[async_trait]
pub trait IbcChannel {
    /// Channel-level transport error.
    type Error: Display + Debug + Send + Sync;

    /// IBC client module parameters.
    async fn client_params(
        &self,
        signal: ScopeSignal,
        request: QueryClientParamsRequest,
    ) -> Result<QueryClientParamsResponse, Self::Error>;

    /// The state of one IBC client.
    async fn client_state(
        &self,
        signal: ScopeSignal,
        request: QueryClientStateRequest,
    ) -> Result<QueryClientStateResponse, Self::Error>;
}
