//! Typed request and response envelopes for node read procedures.
//!
//! One struct pair per procedure. Responses are relayed to the caller
//! exactly as the channel produced them; this crate never reinterprets
//! remote-returned data.

pub mod ibc;
pub mod staking;
