// SPDX-FileCopyrightText: 2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

//! An in-process stand-in for the API server. Responses are canned per path
//! (including the query string), and a path can be held so that its requests
//! stay in flight until the test releases them.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use reqwest::StatusCode;
use tokio::sync::Semaphore;

use crate::error::Result;

use super::{Request, Response, Transport};

#[derive(Default)]
struct State {
    responses: HashMap<String, (StatusCode, serde_json::Value)>,
    gates: HashMap<String, Arc<Semaphore>>,
    requests: Vec<Request>,
}

#[derive(Clone, Default)]
pub(crate) struct Mock {
    state: Arc<Mutex<State>>,
}

pub(crate) struct Gate(Arc<Semaphore>);

impl Gate {
    pub(crate) fn release(&self) {
        self.0.add_permits(1);
    }
}

impl Mock {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn respond(&self, path: &str, status: u16, body: serde_json::Value) -> &Self {
        let status = StatusCode::from_u16(status).unwrap();
        _ = self
            .state
            .lock()
            .unwrap()
            .responses
            .insert(path.to_owned(), (status, body));
        self
    }

    pub(crate) fn hold(&self, path: &str) -> Gate {
        let semaphore = Arc::new(Semaphore::new(0));
        _ = self
            .state
            .lock()
            .unwrap()
            .gates
            .insert(path.to_owned(), Arc::clone(&semaphore));
        Gate(semaphore)
    }

    pub(crate) fn requests(&self) -> Vec<Request> {
        self.state.lock().unwrap().requests.clone()
    }

    pub(crate) fn count(&self, path: &str) -> usize {
        self.state
            .lock()
            .unwrap()
            .requests
            .iter()
            .filter(|req| req.path == path)
            .count()
    }

    /// Yields to other tasks until a request for `path` has been sent.
    pub(crate) async fn requested(&self, path: &str) {
        while self.count(path) == 0 {
            tokio::task::yield_now().await;
        }
    }
}

#[async_trait]
impl Transport for Mock {
    async fn send(&self, req: Request) -> Result<Response> {
        let path = req.path.clone();
        let request_id = req.request_id().map(str::to_owned);
        let gate = {
            let mut state = self.state.lock().unwrap();
            state.requests.push(req);
            state.gates.get(&path).cloned()
        };

        if let Some(gate) = gate {
            gate.acquire().await.unwrap().forget();
        }

        let (status, body) = self
            .state
            .lock()
            .unwrap()
            .responses
            .get(&path)
            .cloned()
            .unwrap_or((StatusCode::NOT_FOUND, serde_json::Value::Null));
        Ok(Response {
            status,
            request_id,
            body,
        })
    }
}
