// SPDX-FileCopyrightText: 2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

#[cfg(test)]
pub(crate) mod mock;
mod remote;

use async_trait::async_trait;
use reqwest::{
    header::{HeaderMap, HeaderName, HeaderValue},
    Method, StatusCode,
};
use url::form_urlencoded;
use uuid::Uuid;

use crate::error::{self, Result};

pub(crate) use remote::Remote;

pub(crate) static REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

#[derive(Clone, Debug)]
pub(crate) struct Request {
    pub(crate) method: Method,
    pub(crate) path: String,
    pub(crate) headers: HeaderMap,
    pub(crate) body: Option<serde_json::Value>,
}

impl Request {
    pub(crate) fn new(method: Method, path: &str) -> Self {
        let mut headers = HeaderMap::new();
        // A hyphenated UUID is always a valid header value.
        if let Ok(id) = HeaderValue::from_str(&Uuid::new_v4().to_string()) {
            _ = headers.insert(REQUEST_ID.clone(), id);
        }

        Self {
            method,
            path: path.to_owned(),
            headers,
            body: None,
        }
    }

    pub(crate) fn get(path: &str) -> Self {
        Self::new(Method::GET, path)
    }

    pub(crate) fn post<T: serde::Serialize>(path: &str, body: &T) -> Result<Self> {
        let mut req = Self::new(Method::POST, path);
        req.body = Some(serde_json::to_value(body)?);
        Ok(req)
    }

    /// Appends query parameters, preserving any that are already present.
    pub(crate) fn with_query<'pair, I>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'pair str, &'pair str)>,
    {
        let query = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(pairs)
            .finish();
        if !query.is_empty() {
            self.path.push(if self.path.contains('?') { '&' } else { '?' });
            self.path.push_str(&query);
        }
        self
    }

    pub(crate) fn request_id(&self) -> Option<&str> {
        self.headers
            .get(&REQUEST_ID)
            .and_then(|value| value.to_str().ok())
    }
}

#[derive(Clone, Debug)]
pub(crate) struct Response {
    pub(crate) status: StatusCode,
    pub(crate) request_id: Option<String>,
    pub(crate) body: serde_json::Value,
}

impl Response {
    /// Turns any non-2xx status into an error, keeping the server's message
    /// when it sent one.
    pub(crate) fn error_for_status(self) -> Result<Self> {
        if self.status.is_success() {
            return Ok(self);
        }

        let message = self
            .body
            .get("message")
            .and_then(serde_json::Value::as_str)
            .or_else(|| self.body.as_str())
            .or_else(|| self.status.canonical_reason())
            .unwrap_or("unknown error")
            .to_owned();
        Err(error::Http::Status {
            status: self.status,
            request_id: self.request_id,
            message,
        }
        .into())
    }
}

#[async_trait]
pub(crate) trait Transport: Send + Sync {
    async fn send(&self, req: Request) -> Result<Response>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Box<T> {
    async fn send(&self, req: Request) -> Result<Response> {
        (**self).send(req).await
    }
}
