//! In-process leader for tests.
//!
//! Serves the lock API on a real Unix socket backed by a mutex-guarded
//! map, so client tests exercise the full wire path: the socket dial,
//! the http1 exchange, the JSON payloads, and per-key CAS serialized by
//! the store lock. The store treats values as uninterpreted strings,
//! exactly like the real leader.

use crate::leader::payloads::{CasRequest, CasResponse, ValueResponse};
use http_body_util::{BodyExt, Full};
use hyper::body::{Bytes, Incoming};
use hyper::header::{AUTHORIZATION, CONTENT_TYPE};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use tokio::net::UnixListener;
use tokio::task::JoinHandle;

/// Route prefix served by the test leader.
const LOCK_ROUTE: &str = "/api/leader/v0/lock/";

type Store = Arc<Mutex<HashMap<String, String>>>;

type LeaderResponse = std::result::Result<Response<Full<Bytes>>, std::convert::Infallible>;

/// Handle to a test leader serving on a socket in a temp directory.
///
/// Dropping the handle aborts the accept loop and removes the socket
/// along with the temp directory.
pub(crate) struct TestLeader {
    pub(crate) path: PathBuf,
    store: Store,
    accept_task: JoinHandle<()>,
    // Keeps the socket directory alive for the leader's lifetime.
    _dir: TempDir,
}

impl TestLeader {
    /// Start a leader with no token requirement.
    pub(crate) async fn spawn() -> Self {
        Self::spawn_with_token(None).await
    }

    /// Start a leader that rejects calls lacking `Bearer <token>`.
    pub(crate) async fn spawn_with_token(token: Option<&str>) -> Self {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("leader.sock");
        let listener = UnixListener::bind(&path).unwrap();
        let store = Store::default();
        let token = token.map(str::to_owned);

        let accept_store = store.clone();
        let accept_task = tokio::spawn(async move {
            loop {
                let Ok((stream, _)) = listener.accept().await else {
                    break;
                };
                let store = accept_store.clone();
                let token = token.clone();
                tokio::spawn(async move {
                    let service = service_fn(move |req| {
                        let store = store.clone();
                        let token = token.clone();
                        async move { handle(store, token, req).await }
                    });
                    // Clients dial one connection per call.
                    let _ = http1::Builder::new()
                        .serve_connection(TokioIo::new(stream), service)
                        .await;
                });
            }
        });

        Self {
            path,
            store,
            accept_task,
            _dir: dir,
        }
    }

    /// Read a value straight out of the store, bypassing the API.
    pub(crate) fn value(&self, key: &str) -> String {
        self.store.lock().unwrap().get(key).cloned().unwrap_or_default()
    }

    /// Seed a value straight into the store, bypassing the API.
    pub(crate) fn set_value(&self, key: &str, value: &str) {
        self.store
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
    }
}

impl Drop for TestLeader {
    fn drop(&mut self) {
        self.accept_task.abort();
    }
}

async fn handle(store: Store, token: Option<String>, req: Request<Incoming>) -> LeaderResponse {
    if let Some(token) = &token {
        let expected = format!("Bearer {}", token);
        let authorized = req
            .headers()
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            == Some(expected.as_str());
        if !authorized {
            return error_response(StatusCode::UNAUTHORIZED, "invalid or missing token");
        }
    }

    let path = req.uri().path().to_string();
    let Some(encoded_key) = path.strip_prefix(LOCK_ROUTE) else {
        return error_response(StatusCode::NOT_FOUND, "unknown route");
    };
    let Ok(key) = urlencoding::decode(encoded_key) else {
        return error_response(StatusCode::BAD_REQUEST, "malformed key encoding");
    };
    let key = key.into_owned();

    let body = match req.into_body().collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(_) => return error_response(StatusCode::BAD_REQUEST, "unreadable body"),
    };

    // Body presence selects between read and CAS, as in the real leader.
    if body.is_empty() {
        let value = store.lock().unwrap().get(&key).cloned().unwrap_or_default();
        return json_response(&ValueResponse { value });
    }

    let Ok(cas) = serde_json::from_slice::<CasRequest>(&body) else {
        return error_response(StatusCode::BAD_REQUEST, "malformed compare-and-swap body");
    };

    // Holding the store mutex across read-compare-write is what makes
    // each CAS linearizable per key.
    let mut store = store.lock().unwrap();
    let current = store.get(&key).cloned().unwrap_or_default();
    let swapped = current == cas.old;
    let value = if swapped {
        store.insert(key, cas.new.clone());
        cas.new
    } else {
        current
    };
    json_response(&CasResponse { value, swapped })
}

fn json_response<T: serde::Serialize>(payload: &T) -> LeaderResponse {
    let body = serde_json::to_vec(payload).unwrap();
    Ok(Response::builder()
        .status(StatusCode::OK)
        .header(CONTENT_TYPE, "application/json")
        .body(Full::new(Bytes::from(body)))
        .unwrap())
}

fn error_response(status: StatusCode, message: &str) -> LeaderResponse {
    let body = serde_json::to_vec(&serde_json::json!({ "error": message })).unwrap();
    Ok(Response::builder()
        .status(status)
        .header(CONTENT_TYPE, "application/json")
        .body(Full::new(Bytes::from(body)))
        .unwrap())
}
