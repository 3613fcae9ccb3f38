// Shared helpers for the integration tests: a transport that replays
// scripted responses and records every request it receives.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use texie_cli::{
    HttpRequest, HttpResponse, MemoryTokenStore, TexieCloud, Transport, TransportError,
};

#[derive(Default)]
pub struct FakeTransport {
    responses: Mutex<VecDeque<Result<HttpResponse, TransportError>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl FakeTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn respond(&self, status: u16, body: &str) {
        self.responses.lock().unwrap().push_back(Ok(HttpResponse {
            status,
            body: body.as_bytes().to_vec(),
        }));
    }

    pub fn fail(&self, error: TransportError) {
        self.responses.lock().unwrap().push_back(Err(error));
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn post(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Network("no scripted response".into())))
    }
}

/// Client over a fake transport and an in-memory token slot.
pub fn client() -> (TexieCloud, Arc<FakeTransport>, Arc<MemoryTokenStore>) {
    let transport = FakeTransport::new();
    let tokens = Arc::new(MemoryTokenStore::new());
    let cloud = TexieCloud::new(transport.clone(), tokens.clone());
    (cloud, transport, tokens)
}

/// Configured client with `token` already stored.
pub fn configured_client(token: &str) -> (TexieCloud, Arc<FakeTransport>) {
    let transport = FakeTransport::new();
    let tokens = Arc::new(MemoryTokenStore::with_token(token));
    let cloud = TexieCloud::new(transport.clone(), tokens);
    cloud.configure("client-id", "client-secret");
    (cloud, transport)
}

pub fn form_value<'a>(request: &'a HttpRequest, key: &str) -> Option<&'a str> {
    match &request.body {
        texie_cli::RequestBody::Form(pairs) => pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str()),
        _ => None,
    }
}
