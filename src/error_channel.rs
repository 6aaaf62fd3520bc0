// SPDX-FileCopyrightText: 2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;

use reqwest::StatusCode;

use crate::{error::Error, store::Store};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum ErrorKind {
    /// Malformed input that never reached the network.
    Validation,
    /// The server rejected our token or credentials.
    Authentication,
    /// The server already has what we tried to create.
    Conflict,
    Transport,
}

impl From<&Error> for ErrorKind {
    fn from(value: &Error) -> Self {
        if let Error::Validation(_) = *value {
            return Self::Validation;
        }

        match value.status() {
            Some(StatusCode::UNAUTHORIZED) => Self::Authentication,
            Some(StatusCode::CONFLICT) => Self::Conflict,
            Some(_) | None => Self::Transport,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match *self {
            Self::Validation => "invalid input",
            Self::Authentication => "authentication failed",
            Self::Conflict => "conflict",
            Self::Transport => "request failed",
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct ErrorDescriptor {
    pub(crate) kind: ErrorKind,
    pub(crate) message: String,
}

impl fmt::Display for ErrorDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

/// Holds the most recent failure until whoever displayed it dismisses it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct ErrorState {
    error: Option<ErrorDescriptor>,
}

impl ErrorState {
    pub(crate) const fn current(&self) -> Option<&ErrorDescriptor> {
        self.error.as_ref()
    }

    pub(crate) fn report(&mut self, kind: ErrorKind, message: String) {
        self.error = Some(ErrorDescriptor { kind, message });
    }

    /// Returns whether there was anything to dismiss.
    pub(crate) fn dismiss(&mut self) -> bool {
        self.error.take().is_some()
    }
}

impl Store {
    pub(crate) async fn report_error(&self, kind: ErrorKind, message: String) {
        self.update(|shared| shared.state.error.report(kind, message))
            .await;
    }

    pub(crate) async fn report(&self, err: &Error) {
        self.report_error(err.into(), err.to_string()).await;
    }

    pub(crate) async fn dismiss_error(&self) {
        if self.select(|state| state.error.current().is_some()).await {
            _ = self.update(|shared| shared.state.error.dismiss()).await;
        }
    }
}
