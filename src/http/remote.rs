// SPDX-FileCopyrightText: 2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use url::Url;

use crate::{error::Result, metadata};

use super::{Request, Response, Transport, REQUEST_ID};

/// Talks to a webca.io API server over HTTP(S).
pub(crate) struct Remote {
    origin: Url,
    client: Client,
}

impl Remote {
    pub(crate) fn new(origin: Url) -> Result<Self> {
        let client = Client::builder()
            .user_agent(format!(
                "{}/{}",
                *metadata::CLIENT_TYPE_ID,
                env!("CARGO_PKG_VERSION")
            ))
            .build()?;

        Ok(Self { origin, client })
    }
}

#[async_trait]
impl Transport for Remote {
    async fn send(&self, req: Request) -> Result<Response> {
        let url = self.origin.join(&req.path)?;
        let sent_id = req.request_id().map(str::to_owned);
        debug!("{} {}", req.method, url);

        let mut builder = self.client.request(req.method, url).headers(req.headers);
        if let Some(ref body) = req.body {
            builder = builder.json(body);
        }
        let resp = builder.send().await?;

        let status = resp.status();
        let request_id = resp
            .headers()
            .get(&REQUEST_ID)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned)
            .or(sent_id);
        let bytes = resp.bytes().await?;
        debug!(
            "Response {} ({} bytes, request id {})",
            status,
            bytes.len(),
            request_id.as_deref().unwrap_or("-")
        );

        let body = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                serde_json::Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };

        Ok(Response {
            status,
            request_id,
            body,
        })
    }
}
