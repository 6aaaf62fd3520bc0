// SPDX-FileCopyrightText: 2022-2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use log::error;

use crate::{
    error::{self, Result},
    hooks::SessionHook,
    model::User,
    store::Store,
};

pub(crate) mod create;
pub(crate) mod download;
pub(crate) mod health;
pub(crate) mod list;
pub(crate) mod login;
pub(crate) mod logout;
pub(crate) mod options;
pub(crate) mod show;
pub(crate) mod signup;
pub(crate) mod whoami;

#[async_trait]
pub(crate) trait Command {
    async fn execute(self, store: Store) -> Result<()>;
}

/// Turns whatever the error channel holds into the command's failure.
pub(crate) async fn settle(store: &Store) -> Result<()> {
    match store.select(|state| state.error.current().cloned()).await {
        Some(err) => {
            error!("{}", err);
            store.dismiss_error().await;
            Err(error::Error::Command)
        }
        None => Ok(()),
    }
}

/// Restores the saved session and returns its user.
pub(crate) async fn require_session(store: &Store) -> Result<User> {
    let mut hook = SessionHook::new(store.clone());
    _ = hook.render().await;
    store.idle().await;
    settle(store).await?;

    match store.select(|state| state.session.user().cloned()).await {
        Some(user) => Ok(user),
        None => {
            error!("{}; log in first", error::Session::NotAuthenticated);
            Err(error::Error::Command)
        }
    }
}
