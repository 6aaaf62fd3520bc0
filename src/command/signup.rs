// SPDX-FileCopyrightText: 2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use clap::Parser;
use log::error;
use secrecy::SecretString;

use crate::{
    error::{self, Result},
    model::Registration,
    password,
    store::Store,
};

/// Create a new account along with its first user, then log in as that user.
#[derive(Debug, Parser)]
pub(crate) struct Command {
    /// The name of the account to create.
    #[arg(long)]
    account_name: String,

    /// The email address of the account's first user.
    #[clap()]
    email: String,

    /// The new user's password. Prompted for when not given.
    #[arg(long, env = "WEBCA_PASSWORD", hide_env_values = true)]
    password: Option<SecretString>,
}

#[async_trait]
impl super::Command for Command {
    async fn execute(self, store: Store) -> Result<()> {
        let registration = Registration {
            account_name: self.account_name,
            email: self.email,
            password: password::obtain(self.password, "New password").await?,
        };

        let mut succeeded = false;
        store.sign_up(registration, |ok| succeeded = ok).await;
        super::settle(&store).await?;

        if !succeeded {
            error!(
                "The signup did not go through; another attempt is in progress or a user is \
                 already logged in"
            );
            return Err(error::Error::Command);
        }
        if let Some(user) = store.select(|state| state.session.user().cloned()).await {
            println!(
                "Created account {} and logged in as {}",
                user.account.name, user.email
            );
        }
        Ok(())
    }
}
