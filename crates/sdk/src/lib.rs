//! SDK for querying a Meridian node.
//!
//! A [`Query`] handle pairs a shared remote procedure channel with the
//! configuration applied to every call: a default page shape and a per-call
//! timeout. The [`rpc`] module exposes one dispatcher function per node
//! procedure; every dispatcher validates its parameters before the network
//! is touched, threads pagination for list procedures, bounds the call with
//! a fresh [`control_flow::QueryScope`] and relays the node's answer
//! unmodified.

#![warn(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod channel;
pub mod control_flow;
pub mod error;
pub mod queries;
pub mod rpc;
#[cfg(any(test, feature = "testing"))]
pub mod testing;
mod validate;

use std::fmt::Display;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use meridian_core::pagination::PageDefaults;

use crate::control_flow::{QueryScope, ScopeSignal};
pub use crate::error::{Error, Result};

/// Timeout applied when a handle is built with default options.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Per-handle query configuration.
///
/// Immutable after construction; a handle may be shared across tasks and
/// read concurrently without synchronization.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QueryOptions {
    /// Page shape applied when a caller provides no carrier.
    pub pagination: PageDefaults,
    /// Deadline applied to every remote call.
    pub timeout: Duration,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            pagination: PageDefaults::default(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// A handle for querying a Meridian node.
///
/// Holds a shared reference to the remote procedure channel; the channel
/// outlives any single query and may serve many handles concurrently. The
/// handle itself carries no per-call state, so one handle can drive any
/// number of parallel queries.
#[derive(Debug)]
pub struct Query<C> {
    channel: Arc<C>,
    options: QueryOptions,
}

impl<C> Clone for Query<C> {
    fn clone(&self) -> Self {
        Self {
            channel: Arc::clone(&self.channel),
            options: self.options,
        }
    }
}

impl<C> Query<C> {
    /// A handle over `channel` with the given options.
    pub fn new(channel: Arc<C>, options: QueryOptions) -> Self {
        Self { channel, options }
    }

    /// A handle over `channel` with default options.
    pub fn from_channel(channel: Arc<C>) -> Self {
        Self::new(channel, QueryOptions::default())
    }

    /// The underlying remote procedure channel.
    pub fn channel(&self) -> &C {
        &self.channel
    }

    /// The configuration applied to every call.
    pub fn options(&self) -> &QueryOptions {
        &self.options
    }

    /// A handle over the same channel with a different per-call timeout.
    ///
    /// The original handle is untouched; this is how a caller overrides the
    /// deadline for one call without reconfiguring the shared channel.
    pub fn with_timeout(&self, timeout: Duration) -> Self {
        Self {
            channel: Arc::clone(&self.channel),
            options: QueryOptions {
                timeout,
                ..self.options
            },
        }
    }

    /// Acquire the execution scope for one remote call.
    pub fn scope(&self) -> QueryScope {
        QueryScope::acquire(self.options.timeout)
    }

    /// Run one channel call under a fresh execution scope.
    ///
    /// Acquisition and release are paired here once, so no dispatcher can
    /// forget to release a scope on any exit path. The channel call gets
    /// the scope's signal and is aborted when the deadline elapses.
    pub(crate) async fn scoped<T, E, Fut>(
        &self,
        call: impl FnOnce(ScopeSignal) -> Fut,
    ) -> Result<T>
    where
        Fut: Future<Output = std::result::Result<T, E>>,
        E: Display,
    {
        let scope = self.scope();
        tracing::debug!(timeout = ?self.options.timeout, "dispatching query");
        let fut = call(scope.signal());
        scope.enter(fut).await
    }
}
