// SPDX-FileCopyrightText: 2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use clap::Parser;
use log::error;
use secrecy::SecretString;

use crate::{
    error::{self, Result},
    model::Credentials,
    password,
    store::Store,
};

/// Log in with an existing user and save the session for later commands.
#[derive(Debug, Parser)]
pub(crate) struct Command {
    /// The email address of the user.
    #[clap()]
    email: String,

    /// The user's password. Prompted for when not given.
    #[arg(long, env = "WEBCA_PASSWORD", hide_env_values = true)]
    password: Option<SecretString>,
}

#[async_trait]
impl super::Command for Command {
    async fn execute(self, store: Store) -> Result<()> {
        let credentials = Credentials {
            email: self.email,
            password: password::obtain(self.password, "Password").await?,
        };

        let mut succeeded = false;
        store.login(credentials, |ok| succeeded = ok).await;
        super::settle(&store).await?;

        if !succeeded {
            error!(
                "The login did not go through; another attempt is in progress or a user is \
                 already logged in"
            );
            return Err(error::Error::Command);
        }
        if let Some(user) = store.select(|state| state.session.user().cloned()).await {
            println!("Logged in as {} ({})", user.email, user.account.name);
        }
        Ok(())
    }
}
