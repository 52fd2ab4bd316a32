//! Client for the leader's lock API.
//!
//! The leader holds the authoritative key/value lock map and serializes
//! every mutation. Clients read a key with [`LeaderClient::get`] and
//! mutate it with [`LeaderClient::compare_and_swap`]. Both travel over
//! the same `GET /api/leader/v0/lock/{key}` route; the presence of a
//! request body is what selects a compare-and-swap over a plain read.
//! The leader depends on that quirk, so [`LockRequest`] keeps the two
//! shapes distinct in code while the wire conflates them.

pub mod payloads;

use crate::error::Result;
use crate::socket::SocketClient;
use hyper::Method;
use payloads::{CasRequest, CasResponse, ValueResponse};
use serde::de::DeserializeOwned;
use std::path::Path;

/// Route prefix for the lock API.
const LOCK_ROUTE: &str = "/api/leader/v0/lock/";

/// A request against one lock key.
///
/// Both variants are issued as `GET` on the same route: a `Read` has no
/// body, a `CompareAndSwap` carries `{"old", "new"}`.
#[derive(Debug, Clone, Copy)]
pub enum LockRequest<'a> {
    /// Read the current value.
    Read,
    /// Atomically replace `old` with `new`, or change nothing.
    CompareAndSwap { old: &'a str, new: &'a str },
}

/// Client for the lock API of the leader serving one socket.
#[derive(Debug)]
pub struct LeaderClient {
    socket: SocketClient,
}

impl LeaderClient {
    /// Connect to the leader serving the socket at `path`.
    pub async fn connect(path: &Path, token: Option<String>) -> Result<Self> {
        Ok(Self {
            socket: SocketClient::connect(path, token).await?,
        })
    }

    /// Get the current value of the lock key. Unheld keys read as `""`.
    pub async fn get(&self, key: &str) -> Result<String> {
        let resp: ValueResponse = self.issue(key, LockRequest::Read).await?;
        Ok(resp.value)
    }

    /// Atomically compare-and-swap the old value for the new value, or
    /// perform no modification. Returns the most up-to-date value for
    /// the key, and reports whether the new value was written.
    ///
    /// The returned value lets callers diagnose a refused swap without a
    /// second round trip.
    pub async fn compare_and_swap(
        &self,
        key: &str,
        old: &str,
        new: &str,
    ) -> Result<(String, bool)> {
        let resp: CasResponse = self
            .issue(key, LockRequest::CompareAndSwap { old, new })
            .await?;
        Ok((resp.value, resp.swapped))
    }

    /// Issue a [`LockRequest`] for `key`. The single place that maps the
    /// tagged request onto the body-presence quirk of the wire format.
    async fn issue<Resp>(&self, key: &str, request: LockRequest<'_>) -> Result<Resp>
    where
        Resp: DeserializeOwned,
    {
        let route = lock_route(key);
        match request {
            LockRequest::Read => {
                self.socket
                    .call(Method::GET, &route, None::<&CasRequest>)
                    .await
            }
            LockRequest::CompareAndSwap { old, new } => {
                let body = CasRequest {
                    old: old.to_string(),
                    new: new.to_string(),
                };
                self.socket.call(Method::GET, &route, Some(&body)).await
            }
        }
    }
}

/// Build the route for `key`, percent-encoding it as one path segment.
fn lock_route(key: &str) -> String {
    format!("{}{}", LOCK_ROUTE, urlencoding::encode(key))
}
