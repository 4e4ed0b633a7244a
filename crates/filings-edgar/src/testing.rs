//! Scripted transport for unit tests.

use async_trait::async_trait;
use filings_core::{FilingsError, Result};
use std::collections::VecDeque;
use std::sync::Mutex;

use crate::transport::{HttpResponse, Transport};

#[derive(Debug)]
enum Step {
    Respond(HttpResponse),
    NetworkError,
}

/// Replays queued responses in order and records requested URLs.
#[derive(Debug, Default)]
pub(crate) struct ScriptedTransport {
    steps: Mutex<VecDeque<Step>>,
    urls: Mutex<Vec<String>>,
}

impl ScriptedTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(self, response: HttpResponse) -> Self {
        self.steps.lock().unwrap().push_back(Step::Respond(response));
        self
    }

    pub(crate) fn respond(self, status: u16, body: &str) -> Self {
        self.push(HttpResponse::new(status, body))
    }

    pub(crate) fn fail_network(self) -> Self {
        self.steps.lock().unwrap().push_back(Step::NetworkError);
        self
    }

    pub(crate) fn calls(&self) -> usize {
        self.urls.lock().unwrap().len()
    }

    pub(crate) fn requested_urls(&self) -> Vec<String> {
        self.urls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn get(&self, url: &str) -> Result<HttpResponse> {
        self.urls.lock().unwrap().push(url.to_string());
        let step = self.steps.lock().unwrap().pop_front();
        match step {
            Some(Step::Respond(response)) => Ok(response),
            Some(Step::NetworkError) => Err(FilingsError::Network("connection reset".to_string())),
            None => panic!("unexpected request to {url}"),
        }
    }
}
