//! Testing helpers.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use meridian_core::address::testing::{account_id, validator_id};
use meridian_core::chain::BlockHeight;
use meridian_core::token::Amount;
use thiserror::Error;
use tokio::time::{sleep, Duration};

use crate::channel::{IbcChannel, StakingChannel};
use crate::control_flow::ScopeSignal;
use crate::queries::ibc::{
    AnyClientState, ClientParams, QueryClientParamsRequest,
    QueryClientParamsResponse, QueryClientStateRequest,
    QueryClientStateResponse,
};
use crate::queries::staking::{
    Delegation, DelegationResponse, HistoricalRecord, Pool,
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
    QueryValidatorsResponse, Redelegation, RedelegationEntry, StakingParams,
    UnbondingDelegation, UnbondingEntry, Validator, ValidatorStatus,
};

/// Error type returned by a [`TestChannel`] configured to fail.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct TestChannelError(pub String);

/// Every request a [`TestChannel`] can observe.
#[derive(Clone, Debug, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum Recorded {
    Params(QueryParamsRequest),
    Pool(QueryPoolRequest),
    Delegation(QueryDelegationRequest),
    DelegatorDelegations(QueryDelegatorDelegationsRequest),
    DelegatorUnbonding(QueryDelegatorUnbondingDelegationsRequest),
    Validators(QueryValidatorsRequest),
    Validator(QueryValidatorRequest),
    ValidatorDelegations(QueryValidatorDelegationsRequest),
    ValidatorUnbonding(QueryValidatorUnbondingDelegationsRequest),
    Redelegations(QueryRedelegationsRequest),
    DelegatorValidators(QueryDelegatorValidatorsRequest),
    DelegatorValidator(QueryDelegatorValidatorRequest),
    HistoricalRecord(QueryHistoricalRecordRequest),
    ClientParams(QueryClientParamsRequest),
    ClientState(QueryClientStateRequest),
}

/// A recording stand-in for a node channel.
///
/// Counts the invocations that reach it, stores every observed request and
/// the scope signal of the latest call, and answers with fixed sample data
/// after an optional artificial latency.
#[derive(Debug, Default)]
pub struct TestChannel {
    latency: Duration,
    failure: Option<String>,
    calls: AtomicUsize,
    last_signal: Mutex<Option<ScopeSignal>>,
    requests: Mutex<Vec<Recorded>>,
}

impl TestChannel {
    /// A channel that answers immediately.
    pub fn new() -> Self {
        Self::default()
    }

    /// A channel that answers after `latency`.
    pub fn with_latency(latency: Duration) -> Self {
        Self {
            latency,
            ..Self::default()
        }
    }

    /// A channel that fails every call with `message`.
    pub fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_owned()),
            ..Self::default()
        }
    }

    /// Number of procedure invocations that reached the channel.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// The signal handed to the latest invocation.
    pub fn last_signal(&self) -> Option<ScopeSignal> {
        self.last_signal.lock().unwrap().clone()
    }

    /// Every observed request, in arrival order.
    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    /// The latest observed request.
    pub fn last_request(&self) -> Option<Recorded> {
        self.requests.lock().unwrap().last().cloned()
    }

    async fn observe(
        &self,
        signal: ScopeSignal,
        request: Recorded,
    ) -> Result<(), TestChannelError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_signal.lock().unwrap() = Some(signal);
        self.requests.lock().unwrap().push(request);
        if !self.latency.is_zero() {
            sleep(self.latency).await;
        }
        match &self.failure {
            Some(message) => Err(TestChannelError(message.clone())),
            None => Ok(()),
        }
    }
}

/// The staking parameters a [`TestChannel`] answers with.
pub fn sample_staking_params() -> StakingParams {
    StakingParams {
        unbonding_blocks: 100_800,
        max_validators: 100,
        max_entries: 7,
        historical_entries: 10_000,
        bond_denom: "umrn".to_owned(),
    }
}

/// The pool a [`TestChannel`] answers with.
pub fn sample_pool() -> Pool {
    Pool {
        bonded_tokens: Amount::from(4_000_000_u64),
        not_bonded_tokens: Amount::from(250_000_u64),
    }
}

/// The validator a [`TestChannel`] answers with.
pub fn sample_validator() -> Validator {
    Validator {
        operator: validator_id(2),
        jailed: false,
        status: ValidatorStatus::Bonded,
        tokens: Amount::from(1_000_000_u64),
        delegator_shares: Amount::from(1_000_000_u64),
    }
}

/// The delegation a [`TestChannel`] answers with.
pub fn sample_delegation_response() -> DelegationResponse {
    DelegationResponse {
        delegation: Delegation {
            delegator: account_id(1),
            validator: validator_id(2),
            shares: Amount::from(500_u64),
        },
        balance: Amount::from(500_u64),
    }
}

/// The unbonding delegation a [`TestChannel`] answers with.
pub fn sample_unbonding_delegation() -> UnbondingDelegation {
    UnbondingDelegation {
        delegator: account_id(1),
        validator: validator_id(2),
        entries: vec![UnbondingEntry {
            creation_height: BlockHeight(90),
            completion_height: BlockHeight(100_890),
            initial_balance: Amount::from(200_u64),
            balance: Amount::from(200_u64),
        }],
    }
}

/// The redelegation a [`TestChannel`] answers with.
pub fn sample_redelegation() -> Redelegation {
    Redelegation {
        delegator: account_id(1),
        validator_src: validator_id(2),
        validator_dst: validator_id(3),
        entries: vec![RedelegationEntry {
            creation_height: BlockHeight(95),
            completion_height: BlockHeight(100_895),
            initial_balance: Amount::from(300_u64),
            shares: Amount::from(300_u64),
        }],
    }
}

/// The client params a [`TestChannel`] answers with.
pub fn sample_client_params() -> ClientParams {
    ClientParams {
        allowed_clients: vec!["07-tendermint".to_owned()],
    }
}

/// The client state a [`TestChannel`] answers with.
pub fn sample_client_state() -> AnyClientState {
    AnyClientState {
        type_url: "/ibc.lightclients.tendermint.v1.ClientState".to_owned(),
        value: vec![0xC0, 0xFF, 0xEE],
    }
}

#[async_trait]
impl StakingChannel for TestChannel {
    type Error = TestChannelError;

    async fn params(
        &self,
        signal: ScopeSignal,
        request: QueryParamsRequest,
    ) -> Result<QueryParamsResponse, Self::Error> {
        self.observe(signal, Recorded::Params(request)).await?;
        Ok(QueryParamsResponse {
            params: sample_staking_params(),
        })
    }

    async fn pool(
        &self,
        signal: ScopeSignal,
        request: QueryPoolRequest,
    ) -> Result<QueryPoolResponse, Self::Error> {
        self.observe(signal, Recorded::Pool(request)).await?;
        Ok(QueryPoolResponse {
            pool: sample_pool(),
        })
    }

    async fn delegation(
        &self,
        signal: ScopeSignal,
        request: QueryDelegationRequest,
    ) -> Result<QueryDelegationResponse, Self::Error> {
        self.observe(signal, Recorded::Delegation(request)).await?;
        Ok(QueryDelegationResponse {
            delegation: sample_delegation_response(),
        })
    }

    async fn delegator_delegations(
        &self,
        signal: ScopeSignal,
        request: QueryDelegatorDelegationsRequest,
    ) -> Result<QueryDelegatorDelegationsResponse, Self::Error> {
        self.observe(signal, Recorded::DelegatorDelegations(request))
            .await?;
        Ok(QueryDelegatorDelegationsResponse {
            delegations: vec![sample_delegation_response()],
            pagination: None,
        })
    }

    async fn delegator_unbonding_delegations(
        &self,
        signal: ScopeSignal,
        request: QueryDelegatorUnbondingDelegationsRequest,
    ) -> Result<QueryDelegatorUnbondingDelegationsResponse, Self::Error> {
        self.observe(signal, Recorded::DelegatorUnbonding(request))
            .await?;
        Ok(QueryDelegatorUnbondingDelegationsResponse {
            unbonding_delegations: vec![sample_unbonding_delegation()],
            pagination: None,
        })
    }

    async fn validators(
        &self,
        signal: ScopeSignal,
        request: QueryValidatorsRequest,
    ) -> Result<QueryValidatorsResponse, Self::Error> {
        self.observe(signal, Recorded::Validators(request)).await?;
        Ok(QueryValidatorsResponse {
            validators: vec![sample_validator()],
            pagination: None,
        })
    }

    async fn validator(
        &self,
        signal: ScopeSignal,
        request: QueryValidatorRequest,
    ) -> Result<QueryValidatorResponse, Self::Error> {
        self.observe(signal, Recorded::Validator(request)).await?;
        Ok(QueryValidatorResponse {
            validator: sample_validator(),
        })
    }

    async fn validator_delegations(
        &self,
        signal: ScopeSignal,
        request: QueryValidatorDelegationsRequest,
    ) -> Result<QueryValidatorDelegationsResponse, Self::Error> {
        self.observe(signal, Recorded::ValidatorDelegations(request))
            .await?;
        Ok(QueryValidatorDelegationsResponse {
            delegations: vec![sample_delegation_response()],
            pagination: None,
        })
    }

    async fn validator_unbonding_delegations(
        &self,
        signal: ScopeSignal,
        request: QueryValidatorUnbondingDelegationsRequest,
    ) -> Result<QueryValidatorUnbondingDelegationsResponse, Self::Error> {
        self.observe(signal, Recorded::ValidatorUnbonding(request))
            .await?;
        Ok(QueryValidatorUnbondingDelegationsResponse {
            unbonding_delegations: vec![sample_unbonding_delegation()],
            pagination: None,
        })
    }

    async fn redelegations(
        &self,
        signal: ScopeSignal,
        request: QueryRedelegationsRequest,
    ) -> Result<QueryRedelegationsResponse, Self::Error> {
        self.observe(signal, Recorded::Redelegations(request))
            .await?;
        Ok(QueryRedelegationsResponse {
            redelegations: vec![sample_redelegation()],
            pagination: None,
        })
    }

    async fn delegator_validators(
        &self,
        signal: ScopeSignal,
        request: QueryDelegatorValidatorsRequest,
    ) -> Result<QueryDelegatorValidatorsResponse, Self::Error> {
        self.observe(signal, Recorded::DelegatorValidators(request))
            .await?;
        Ok(QueryDelegatorValidatorsResponse {
            validators: vec![sample_validator()],
            pagination: None,
        })
    }

    async fn delegator_validator(
        &self,
        signal: ScopeSignal,
        request: QueryDelegatorValidatorRequest,
    ) -> Result<QueryDelegatorValidatorResponse, Self::Error> {
        self.observe(signal, Recorded::DelegatorValidator(request))
            .await?;
        Ok(QueryDelegatorValidatorResponse {
            validator: sample_validator(),
        })
    }

    async fn historical_record(
        &self,
        signal: ScopeSignal,
        request: QueryHistoricalRecordRequest,
    ) -> Result<QueryHistoricalRecordResponse, Self::Error> {
        let height = request.height;
        self.observe(signal, Recorded::HistoricalRecord(request))
            .await?;
        Ok(QueryHistoricalRecordResponse {
            record: HistoricalRecord {
                height,
                validators: vec![sample_validator()],
            },
        })
    }
}

#[async_trait]
impl IbcChannel for TestChannel {
    type Error = TestChannelError;

    async fn client_params(
        &self,
        signal: ScopeSignal,
        request: QueryClientParamsRequest,
    ) -> Result<QueryClientParamsResponse, Self::Error> {
        self.observe(signal, Recorded::ClientParams(request)).await?;
        Ok(QueryClientParamsResponse {
            params: sample_client_params(),
        })
    }

    async fn client_state(
        &self,
        signal: ScopeSignal,
        request: QueryClientStateRequest,
    ) -> Result<QueryClientStateResponse, Self::Error> {
        self.observe(signal, Recorded::ClientState(request)).await?;
        Ok(QueryClientStateResponse {
            client_state: sample_client_state(),
            proof_height: BlockHeight(100_000),
        })
    }
}
