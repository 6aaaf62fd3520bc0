// SPDX-FileCopyrightText: 2022-2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use std::{convert::Infallible, io, result};

use reqwest::{header::InvalidHeaderValue, StatusCode};
use thiserror::Error;

pub(crate) type Result<T, E = Error> = result::Result<T, E>;

#[derive(Error, Debug)]
pub(crate) enum Error {
    #[error("IO operation failed: {0}")]
    Io(#[from] io::Error),
    #[error("JSON format error: {0}")]
    Json(serde_json::Error),
    #[error("HTTP error: {0}")]
    Http(#[from] Http),
    #[error("invalid input: {0}")]
    Validation(#[from] Validation),
    #[error("session error: {0}")]
    Session(#[from] Session),
    #[error("background task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
    #[error("command execution failed")]
    Command,
}

impl From<serde_json::Error> for Error {
    fn from(value: serde_json::Error) -> Self {
        // LINT: Deliberate fall-through that should catch future cases added to
        // the enum.
        #[allow(clippy::wildcard_enum_match_arm)]
        match value.classify() {
            serde_json::error::Category::Io => Self::Io(value.into()),
            _ => Self::Json(value),
        }
    }
}

impl From<Infallible> for Error {
    fn from(value: Infallible) -> Self {
        match value {}
    }
}

impl From<reqwest::Error> for Error {
    fn from(value: reqwest::Error) -> Self {
        Self::Http(Http::Transport(value))
    }
}

impl From<url::ParseError> for Error {
    fn from(value: url::ParseError) -> Self {
        Self::Http(Http::Url(value))
    }
}

#[derive(Error, Debug)]
pub(crate) enum Http {
    #[error("request could not be delivered: {0}")]
    Transport(reqwest::Error),
    #[error("server responded with {status}: {message}")]
    Status {
        status: StatusCode,
        request_id: Option<String>,
        message: String,
    },
    #[error("invalid request URL: {0}")]
    Url(url::ParseError),
    #[error("invalid header value: {0}")]
    Header(#[from] InvalidHeaderValue),
}

impl Http {
    pub(crate) const fn status(&self) -> Option<StatusCode> {
        match *self {
            Self::Status { status, .. } => Some(status),
            Self::Transport(_) | Self::Url(_) | Self::Header(_) => None,
        }
    }
}

impl Error {
    /// The HTTP status that caused this error, if it came from a server
    /// response.
    pub(crate) const fn status(&self) -> Option<StatusCode> {
        match *self {
            Self::Http(ref e) => e.status(),
            Self::Io(_)
            | Self::Json(_)
            | Self::Validation(_)
            | Self::Session(_)
            | Self::Join(_)
            | Self::Command => None,
        }
    }
}

#[derive(Error, Debug)]
pub(crate) enum Validation {
    #[error("no certificate id was given")]
    MissingCertificateId,
    #[error(r#"invalid certificate id "{}": {1}"#, .0.escape_default())]
    InvalidCertificateId(String, uuid::Error),
}

#[derive(Error, Debug)]
pub(crate) enum Session {
    #[error("another authentication attempt is already in progress")]
    AuthenticationInProgress,
    #[error("already logged in as {0}")]
    AlreadyAuthenticated(String),
    #[error("not logged in")]
    NotAuthenticated,
}
