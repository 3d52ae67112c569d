//! IBC client module queries.

use borsh::{BorshDeserialize, BorshSerialize};
use meridian_core::chain::BlockHeight;
use serde::{Deserialize, Serialize};

/// Parameters of the IBC client module.
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
pub struct ClientParams {
    /// Client types the node accepts.
    pub allowed_clients: Vec<String>,
}

/// An opaque, type-tagged client state blob.
///
/// Relayed exactly as the node produced it; decoding the inner value is the
/// caller's concern.
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
pub struct AnyClientState {
    /// Type of the encoded state.
    pub type_url: String,
    /// The encoded state.
    pub value: Vec<u8>,
}

/// Request the IBC client module parameters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct QueryClientParamsRequest {}

/// The IBC client module parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueryClientParamsResponse {
    /// Current parameters.
    pub params: ClientParams,
}

/// Request the state of one IBC client.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueryClientStateRequest {
    /// Identifier of the client, e.g. `07-tendermint-0`.
    pub client_id: String,
}

/// The state of one IBC client.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueryClientStateResponse {
    /// The client state blob.
    pub client_state: AnyClientState,
    /// Height at which the state was read.
    pub proof_height: BlockHeight,
}
