// SPDX-FileCopyrightText: 2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use clap::Parser;
use tabled::{
    settings::{Panel, Style},
    Table, Tabled,
};

use crate::{error::Result, model::User, store::Store};

#[derive(Tabled)]
struct Row<'user> {
    #[tabled(rename = "Email")]
    email: &'user str,
    #[tabled(rename = "Role")]
    role: &'user str,
    #[tabled(rename = "Account")]
    account: &'user str,
    #[tabled(rename = "Account ID")]
    account_id: String,
}

impl<'user> From<&'user User> for Row<'user> {
    fn from(user: &'user User) -> Self {
        Self {
            email: &user.email,
            role: &user.role,
            account: &user.account.name,
            account_id: user.account.id.to_string(),
        }
    }
}

/// Show the user of the saved session.
#[derive(Debug, Parser)]
pub(crate) struct Command {}

#[async_trait]
impl super::Command for Command {
    async fn execute(self, store: Store) -> Result<()> {
        let user = super::require_session(&store).await?;
        println!(
            "{}",
            Table::new([Row::from(&user)])
                .with(Style::rounded())
                .with(Panel::footer(format!(
                    "Member since {}",
                    user.created_at.format("%Y-%m-%d")
                )))
        );
        Ok(())
    }
}
