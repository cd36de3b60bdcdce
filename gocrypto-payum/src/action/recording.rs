//! In-memory gateway used by the action tests.

use std::{collections::VecDeque, sync::Mutex};

use serde_json::{Value, json};

use super::CaptureAction;
use crate::{
    api::{Credentials, Endpoints, GoCryptoApi},
    error::{CaptureError, Result},
    transport::{GatewayTransport, TransportResponse},
};

pub(crate) const RETURN_URL: &str = "https://shop.test/after";

#[derive(Debug)]
pub(crate) struct RecordedRequest {
    pub(crate) url: String,
    pub(crate) headers: Vec<(String, String)>,
    pub(crate) body: Vec<u8>,
}

impl RecordedRequest {
    pub(crate) fn header(&self, name: &str) -> Option<&str> {
        self.headers.iter().find(|(k, _)| k == name).map(|(_, v)| v.as_str())
    }

    pub(crate) fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap()
    }
}

/// Replies with queued responses in order and records every request.
#[derive(Debug, Default)]
pub(crate) struct RecordingTransport {
    responses: Mutex<VecDeque<Result<TransportResponse>>>,
    pub(crate) requests: Mutex<Vec<RecordedRequest>>,
}

impl RecordingTransport {
    pub(crate) fn replying(responses: Vec<Result<TransportResponse>>) -> Self {
        Self { responses: Mutex::new(responses.into()), requests: Mutex::default() }
    }

    pub(crate) fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

impl GatewayTransport for RecordingTransport {
    async fn post<'a>(
        &'a self,
        url: &'a str,
        headers: &'a [(&'a str, &'a str)],
        body: &'a [u8],
    ) -> Result<TransportResponse> {
        self.requests.lock().unwrap().push(RecordedRequest {
            url: url.to_owned(),
            headers: headers.iter().map(|&(k, v)| (k.to_owned(), v.to_owned())).collect(),
            body: body.to_vec(),
        });
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(CaptureError::Transport("no response queued".to_owned())))
    }
}

pub(crate) fn reply(status: u16, body: &Value) -> Result<TransportResponse> {
    Ok(TransportResponse { status, body: serde_json::to_vec(body).unwrap() })
}

pub(crate) fn auth_ok() -> Result<TransportResponse> {
    reply(200, &json!({"status": 1, "data": {"access_token": "tok"}}))
}

pub(crate) fn charge_ok() -> Result<TransportResponse> {
    reply(200, &json!({"status": 1, "data": {"redirect_url": "https://pay.test/abc"}}))
}

pub(crate) fn api(production: bool) -> GoCryptoApi {
    GoCryptoApi::new(
        Credentials::new("client-1", "secret-1", "shop.test", "Test Shop", production),
        Endpoints::default(),
    )
}

pub(crate) fn action(
    responses: Vec<Result<TransportResponse>>,
) -> CaptureAction<RecordingTransport> {
    CaptureAction::new(RecordingTransport::replying(responses)).with_api(api(false))
}

/// Single-threaded runtime for driving async captures inside `proptest!`.
pub(crate) fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap()
}
