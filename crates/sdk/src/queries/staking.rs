//! Staking module queries.

use borsh::{BorshDeserialize, BorshSerialize};
use meridian_core::address::{AccountId, ValidatorId};
use meridian_core::chain::BlockHeight;
use meridian_core::pagination::{PageFamily, PageRequest, PageResponse};
use meridian_core::token::Amount;
use serde::{Deserialize, Serialize};

// Endpoint families for page cursors.
//
// Invariant: one marker per list procedure; cursors never cross markers.

/// Page cursors of the validator-set listing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValidatorSet {}

impl PageFamily for ValidatorSet {
    const NAME: &'static str = "validator_set";
}

/// Page cursors of a delegator's delegation listing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DelegatorDelegations {}

impl PageFamily for DelegatorDelegations {
    const NAME: &'static str = "delegator_delegations";
}

/// Page cursors of a delegator's unbonding listing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DelegatorUnbonds {}

impl PageFamily for DelegatorUnbonds {
    const NAME: &'static str = "delegator_unbonds";
}

/// Page cursors of a validator's delegation listing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValidatorDelegations {}

impl PageFamily for ValidatorDelegations {
    const NAME: &'static str = "validator_delegations";
}

/// Page cursors of a validator's unbonding listing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValidatorUnbonds {}

impl PageFamily for ValidatorUnbonds {
    const NAME: &'static str = "validator_unbonds";
}

/// Page cursors of the redelegation listing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Redelegations {}

impl PageFamily for Redelegations {
    const NAME: &'static str = "redelegations";
}

/// Page cursors of a delegator's bonded-validator listing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DelegatorValidators {}

impl PageFamily for DelegatorValidators {
    const NAME: &'static str = "delegator_validators";
}

/// The bonding state of a validator.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    BorshSerialize,
    BorshDeserialize,
    Serialize,
    Deserialize,
)]
pub enum ValidatorStatus {
    /// Not in the active set and past the unbonding period.
    Unbonded,
    /// Leaving the active set, stake still locked.
    Unbonding,
    /// In the active set.
    Bonded,
}

/// A validator's record in the staking module.
#[derive(
    Clone,
    Debug,
    PartialEq,
    Eq,
    BorshSerialize,
    BorshDeserialize,
    Serialize,
    Deserialize,
)]
pub struct Validator {
    /// Operator address.
    pub operator: ValidatorId,
    /// Whether the validator is jailed for a fault.
    pub jailed: bool,
    /// Bonding state.
    pub status: ValidatorStatus,
    /// Total tokens bonded to this validator.
    pub tokens: Amount,
    /// Total shares issued against the bonded tokens.
    pub delegator_shares: Amount,
}

/// A delegation of stake from an account to a validator.
#[derive(
    Clone,
    Debug,
    PartialEq,
    Eq,
    BorshSerialize,
    BorshDeserialize,
    Serialize,
    Deserialize,
)]
pub struct Delegation {
    /// The delegating account.
    pub delegator: AccountId,
    /// The validator delegated to.
    pub validator: ValidatorId,
    /// Shares held against the validator's bond.
    pub shares: Amount,
}

/// A delegation together with its current token balance.
#[derive(
    Clone,
    Debug,
    PartialEq,
    Eq,
    BorshSerialize,
    BorshDeserialize,
    Serialize,
    Deserialize,
)]
pub struct DelegationResponse {
    /// The delegation record.
    pub delegation: Delegation,
    /// Token value of the shares at the queried block.
    pub balance: Amount,
}

/// One unbonding tranche.
#[derive(
    Clone,
    Debug,
    PartialEq,
    Eq,
    BorshSerialize,
    BorshDeserialize,
    Serialize,
    Deserialize,
)]
pub struct UnbondingEntry {
    /// Height at which the unbond was requested.
    pub creation_height: BlockHeight,
    /// Height at which the stake unlocks.
    pub completion_height: BlockHeight,
    /// Tokens at unbond time.
    pub initial_balance: Amount,
    /// Tokens remaining after slashes.
    pub balance: Amount,
}

/// All unbonding stake between one delegator and one validator.
#[derive(
    Clone,
    Debug,
    PartialEq,
    Eq,
    BorshSerialize,
    BorshDeserialize,
    Serialize,
    Deserialize,
)]
pub struct UnbondingDelegation {
    /// The unbonding account.
    pub delegator: AccountId,
    /// The validator being unbonded from.
    pub validator: ValidatorId,
    /// Tranches, oldest first.
    pub entries: Vec<UnbondingEntry>,
}

/// One redelegation tranche.
#[derive(
    Clone,
    Debug,
    PartialEq,
    Eq,
    BorshSerialize,
    BorshDeserialize,
    Serialize,
    Deserialize,
)]
pub struct RedelegationEntry {
    /// Height at which the redelegation was requested.
    pub creation_height: BlockHeight,
    /// Height at which the tranche matures.
    pub completion_height: BlockHeight,
    /// Tokens moved at redelegation time.
    pub initial_balance: Amount,
    /// Shares received on the destination validator.
    pub shares: Amount,
}

/// Stake moving between two validators for one delegator.
#[derive(
    Clone,
    Debug,
    PartialEq,
    Eq,
    BorshSerialize,
    BorshDeserialize,
    Serialize,
    Deserialize,
)]
pub struct Redelegation {
    /// The redelegating account.
    pub delegator: AccountId,
    /// Validator the stake is moving away from.
    pub validator_src: ValidatorId,
    /// Validator the stake is moving to.
    pub validator_dst: ValidatorId,
    /// Tranches, oldest first.
    pub entries: Vec<RedelegationEntry>,
}

/// Parameters of the staking module.
#[derive(
    Clone,
    Debug,
    PartialEq,
    Eq,
    BorshSerialize,
    BorshDeserialize,
    Serialize,
    Deserialize,
)]
pub struct StakingParams {
    /// Blocks an unbond stays locked.
    pub unbonding_blocks: u64,
    /// Size of the active validator set.
    pub max_validators: u32,
    /// Max simultaneous unbonding/redelegation tranches per pair.
    pub max_entries: u32,
    /// Historical records kept by the node.
    pub historical_entries: u32,
    /// Denomination of the staking token.
    pub bond_denom: String,
}

/// The bonded and unbonded token pools.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    BorshSerialize,
    BorshDeserialize,
    Serialize,
    Deserialize,
)]
pub struct Pool {
    /// Tokens bonded to active validators.
    pub bonded_tokens: Amount,
    /// Tokens outside the active bond.
    pub not_bonded_tokens: Amount,
}

/// Snapshot of the validator set at a past height.
#[derive(
    Clone,
    Debug,
    PartialEq,
    Eq,
    BorshSerialize,
    BorshDeserialize,
    Serialize,
    Deserialize,
)]
pub struct HistoricalRecord {
    /// The snapshot height.
    pub height: BlockHeight,
    /// The validator set at that height.
    pub validators: Vec<Validator>,
}

// Request/response envelopes. Wire encoding is the channel's concern; these
// are plain in-process values.

/// Request the staking module parameters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct QueryParamsRequest {}

/// The staking module parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueryParamsResponse {
    /// Current parameters.
    pub params: StakingParams,
}

/// Request the token pools.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct QueryPoolRequest {}

/// The token pools.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QueryPoolResponse {
    /// Current pools.
    pub pool: Pool,
}

/// Request one delegation record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QueryDelegationRequest {
    /// The delegating account.
    pub delegator: AccountId,
    /// The validator delegated to.
    pub validator: ValidatorId,
}

/// One delegation record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueryDelegationResponse {
    /// The delegation with its balance.
    pub delegation: DelegationResponse,
}

/// Request all delegations of a delegator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueryDelegatorDelegationsRequest {
    /// The delegating account.
    pub delegator: AccountId,
    /// Page selection.
    pub pagination: PageRequest<DelegatorDelegations>,
}

/// A page of a delegator's delegations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueryDelegatorDelegationsResponse {
    /// Delegations in this page.
    pub delegations: Vec<DelegationResponse>,
    /// Continuation state.
    pub pagination: Option<PageResponse<DelegatorDelegations>>,
}

/// Request all unbonding delegations of a delegator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueryDelegatorUnbondingDelegationsRequest {
    /// The unbonding account.
    pub delegator: AccountId,
    /// Page selection.
    pub pagination: PageRequest<DelegatorUnbonds>,
}

/// A page of a delegator's unbonding delegations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueryDelegatorUnbondingDelegationsResponse {
    /// Unbonding delegations in this page.
    pub unbonding_delegations: Vec<UnbondingDelegation>,
    /// Continuation state.
    pub pagination: Option<PageResponse<DelegatorUnbonds>>,
}

/// Request the validator set, optionally filtered by status.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueryValidatorsRequest {
    /// Restrict the listing to one bonding state. `None` lists all.
    pub status: Option<ValidatorStatus>,
    /// Page selection.
    pub pagination: PageRequest<ValidatorSet>,
}

/// A page of the validator set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueryValidatorsResponse {
    /// Validators in this page.
    pub validators: Vec<Validator>,
    /// Continuation state.
    pub pagination: Option<PageResponse<ValidatorSet>>,
}

/// Request one validator's record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QueryValidatorRequest {
    /// Operator address.
    pub validator: ValidatorId,
}

/// One validator's record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueryValidatorResponse {
    /// The validator.
    pub validator: Validator,
}

/// Request all delegations to a validator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueryValidatorDelegationsRequest {
    /// Operator address.
    pub validator: ValidatorId,
    /// Page selection.
    pub pagination: PageRequest<ValidatorDelegations>,
}

/// A page of a validator's delegations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueryValidatorDelegationsResponse {
    /// Delegations in this page.
    pub delegations: Vec<DelegationResponse>,
    /// Continuation state.
    pub pagination: Option<PageResponse<ValidatorDelegations>>,
}

/// Request all unbonding delegations from a validator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueryValidatorUnbondingDelegationsRequest {
    /// Operator address.
    pub validator: ValidatorId,
    /// Page selection.
    pub pagination: PageRequest<ValidatorUnbonds>,
}

/// A page of a validator's unbonding delegations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueryValidatorUnbondingDelegationsResponse {
    /// Unbonding delegations in this page.
    pub unbonding_delegations: Vec<UnbondingDelegation>,
    /// Continuation state.
    pub pagination: Option<PageResponse<ValidatorUnbonds>>,
}

/// Request the redelegations of a delegator, optionally narrowed to a
/// source and destination validator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueryRedelegationsRequest {
    /// The redelegating account.
    pub delegator: AccountId,
    /// Validator the stake is moving away from.
    pub validator_src: ValidatorId,
    /// Validator the stake is moving to.
    pub validator_dst: ValidatorId,
    /// Page selection.
    pub pagination: PageRequest<Redelegations>,
}

/// A page of redelegations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueryRedelegationsResponse {
    /// Redelegations in this page.
    pub redelegations: Vec<Redelegation>,
    /// Continuation state.
    pub pagination: Option<PageResponse<Redelegations>>,
}

/// Request the validators a delegator is bonded to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueryDelegatorValidatorsRequest {
    /// The delegating account.
    pub delegator: AccountId,
    /// Page selection.
    pub pagination: PageRequest<DelegatorValidators>,
}

/// A page of a delegator's bonded validators.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueryDelegatorValidatorsResponse {
    /// Validators in this page.
    pub validators: Vec<Validator>,
    /// Continuation state.
    pub pagination: Option<PageResponse<DelegatorValidators>>,
}

/// Request one validator's record as seen by one of its delegators.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QueryDelegatorValidatorRequest {
    /// The delegating account.
    pub delegator: AccountId,
    /// Operator address.
    pub validator: ValidatorId,
}

/// One validator's record, scoped to a delegator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueryDelegatorValidatorResponse {
    /// The validator.
    pub validator: Validator,
}

/// Request the validator-set snapshot at a past height.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QueryHistoricalRecordRequest {
    /// The snapshot height.
    pub height: BlockHeight,
}

/// The validator-set snapshot at a past height.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueryHistoricalRecordResponse {
    /// The snapshot.
    pub record: HistoricalRecord,
}
