// SPDX-FileCopyrightText: 2022-2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use secrecy::{ExposeSecret as _, SecretString};
use tokio::task;

use crate::error::Result;

#[derive(Debug, Clone)]
pub(crate) struct Request {
    label: String,
    error: Option<String>,
}

pub(crate) struct RequestBuilder {
    label: String,
    error: Option<String>,
}

impl RequestBuilder {
    pub(crate) fn new(label: &str) -> Self {
        Self {
            label: label.to_owned(),
            error: None,
        }
    }

    pub(crate) fn with_error(mut self, error: &str) -> Self {
        self.error = Some(error.to_owned());
        self
    }

    pub(crate) fn into_request(self) -> Request {
        Request {
            label: self.label,
            error: self.error,
        }
    }
}

#[async_trait]
pub(crate) trait Prompt: Send + Sync {
    async fn prompt(&self, req: Request) -> Result<Option<SecretString>>;
}

#[async_trait]
impl<T: Prompt + ?Sized> Prompt for Box<T> {
    async fn prompt(&self, req: Request) -> Result<Option<SecretString>> {
        (**self).prompt(req).await
    }
}

/// Asks each prompt in turn until one produces a password.
#[async_trait]
impl<T: Prompt> Prompt for Vec<T> {
    async fn prompt(&self, req: Request) -> Result<Option<SecretString>> {
        for candidate in self {
            if let r @ (Ok(Some(_)) | Err(_)) = candidate.prompt(req.clone()).await {
                return r;
            }
        }

        Ok(None)
    }
}

/// A password given up front, for example on the command line. An empty one
/// counts as not given.
pub(crate) struct Given(pub(crate) Option<SecretString>);

#[async_trait]
impl Prompt for Given {
    async fn prompt(&self, _: Request) -> Result<Option<SecretString>> {
        Ok(self
            .0
            .clone()
            .filter(|password| !password.expose_secret().is_empty()))
    }
}

pub(crate) struct RpasswordPrompt;

#[async_trait]
impl Prompt for RpasswordPrompt {
    async fn prompt(&self, req: Request) -> Result<Option<SecretString>> {
        if let Some(error) = req.error {
            eprintln!("Error: {error}");
        }

        let label = format!("{}: ", req.label);
        Ok(Some(
            task::spawn_blocking(move || rpassword::prompt_password(label).map(SecretString::new))
                .await??,
        ))
    }
}

/// The given password if there is one, otherwise whatever the terminal
/// supplies.
pub(crate) async fn obtain(given: Option<SecretString>, label: &str) -> Result<SecretString> {
    let prompt: Vec<Box<dyn Prompt>> = vec![Box::new(Given(given)), Box::new(RpasswordPrompt)];
    let mut req = RequestBuilder::new(label).into_request();
    loop {
        match prompt.prompt(req).await? {
            Some(password) if !password.expose_secret().is_empty() => return Ok(password),
            Some(_) | None => {
                req = RequestBuilder::new(label)
                    .with_error("a password is required")
                    .into_request();
            }
        }
    }
}
