//! HTTP-over-Unix-socket transport for the leader API.
//!
//! The leader serves a small JSON API on a local socket. This module
//! carries one request and one response per call: JSON in, JSON out, an
//! optional bearer token, and `{"error": ...}` decoding for non-200
//! statuses. There is no retry and no caching; callers that want to poll
//! do so themselves, and callers that want a deadline drop the future.

use crate::error::{LatchError, Result};
use http_body_util::{BodyExt, Full};
use hyper::body::Bytes;
use hyper::client::conn::http1;
use hyper::header::{AUTHORIZATION, CONTENT_TYPE, HOST};
use hyper::{Method, Request, StatusCode};
use hyper_util::rt::TokioIo;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::os::unix::fs::FileTypeExt;
use std::path::{Path, PathBuf};
use tokio::net::UnixStream;
use tracing::debug;

/// Error response body the leader uses for any non-200 status.
#[derive(Debug, serde::Deserialize)]
struct ErrorResponse {
    error: String,
}

/// Client for a JSON API served over a Unix domain socket.
///
/// `connect` validates up front that the path names a live socket, so
/// commands fail fast with an actionable message instead of on first
/// use. Each call dials a fresh connection; the CLI issues at most a few
/// requests per invocation, so there is nothing to pool.
#[derive(Debug)]
pub struct SocketClient {
    path: PathBuf,
    token: Option<String>,
}

impl SocketClient {
    /// Create a client for the socket at `path`.
    ///
    /// Fails with [`LatchError::Connection`] if the path is absent, is
    /// not a Unix socket, or refuses a test connection.
    pub async fn connect(path: &Path, token: Option<String>) -> Result<Self> {
        let connection_error = |reason: String| LatchError::Connection {
            path: path.to_path_buf(),
            reason,
        };

        let meta = std::fs::metadata(path)
            .map_err(|e| connection_error(format!("stat socket: {}", e)))?;
        if !meta.file_type().is_socket() {
            return Err(connection_error("not a socket".to_string()));
        }

        // Probe with a throwaway connection so a dead leader is reported
        // here rather than mid-operation.
        let probe = UnixStream::connect(path)
            .await
            .map_err(|e| connection_error(format!("socket test connection: {}", e)))?;
        drop(probe);

        Ok(Self {
            path: path.to_path_buf(),
            token,
        })
    }

    /// Perform one API call.
    ///
    /// `body` is serialized as a JSON request body if present. The token,
    /// if any, rides in the `Authorization` header. A 200 response is
    /// decoded into `Resp`; any other status is decoded as the leader's
    /// `{"error": ...}` payload and surfaced as [`LatchError::Api`].
    pub async fn call<Req, Resp>(
        &self,
        method: Method,
        route: &str,
        body: Option<&Req>,
    ) -> Result<Resp>
    where
        Req: Serialize,
        Resp: DeserializeOwned,
    {
        let mut builder = Request::builder()
            .method(method)
            .uri(route)
            // Routing is by path; the authority is notional.
            .header(HOST, "leader");
        if let Some(token) = &self.token {
            builder = builder.header(AUTHORIZATION, format!("Bearer {}", token));
        }

        let request = match body {
            Some(body) => {
                let buf = serde_json::to_vec(body)
                    .map_err(|e| LatchError::Transport(format!("encoding request: {}", e)))?;
                builder
                    .header(CONTENT_TYPE, "application/json")
                    .body(Full::new(Bytes::from(buf)))
            }
            None => builder.body(Full::new(Bytes::new())),
        }
        .map_err(|e| LatchError::Transport(format!("building request: {}", e)))?;

        let stream = UnixStream::connect(&self.path)
            .await
            .map_err(|e| LatchError::Transport(format!("dialing socket: {}", e)))?;
        let (mut sender, conn) = http1::handshake(TokioIo::new(stream))
            .await
            .map_err(|e| LatchError::Transport(format!("handshake: {}", e)))?;

        // The connection task finishes once the response is fully read
        // and the sender is dropped.
        tokio::spawn(async move {
            if let Err(e) = conn.await {
                debug!("leader connection closed with error: {}", e);
            }
        });

        debug!(route, "calling leader API");
        let response = sender
            .send_request(request)
            .await
            .map_err(|e| LatchError::Transport(format!("sending request: {}", e)))?;

        let status = response.status();
        let body = response
            .into_body()
            .collect()
            .await
            .map_err(|e| LatchError::Transport(format!("reading response: {}", e)))?
            .to_bytes();

        if status != StatusCode::OK {
            let err: ErrorResponse = serde_json::from_slice(&body)
                .map_err(|e| LatchError::Transport(format!("decoding error response: {}", e)))?;
            return Err(LatchError::Api(err.error));
        }

        serde_json::from_slice(&body)
            .map_err(|e| LatchError::Transport(format!("decoding response: {}", e)))
    }
}
