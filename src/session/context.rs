// SPDX-FileCopyrightText: 2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use secrecy::{ExposeSecret as _, SecretString};

use crate::{
    error::{self, Result},
    http,
};

/// Credentials attached to every outgoing request. Only the session paths of
/// the store replace it; everything else receives a copy.
#[derive(Clone, Debug, Default)]
pub(crate) struct Context {
    token: Option<SecretString>,
}

impl Context {
    pub(crate) const fn with_token(token: SecretString) -> Self {
        Self { token: Some(token) }
    }

    pub(crate) const fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub(crate) fn headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        if let Some(ref token) = self.token {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", token.expose_secret()))
                .map_err(error::Http::from)?;
            value.set_sensitive(true);
            _ = headers.insert(AUTHORIZATION, value);
        }
        Ok(headers)
    }

    pub(crate) fn authorize(&self, req: &mut http::Request) -> Result<()> {
        req.headers.extend(self.headers()?);
        Ok(())
    }
}
