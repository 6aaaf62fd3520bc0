// SPDX-FileCopyrightText: 2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use clap::Parser;
use tabled::{settings::Style, Table, Tabled};

use crate::{error::Result, hooks::OptionsHook, store::Store};

#[derive(Tabled)]
struct Row {
    #[tabled(rename = "Option")]
    name: &'static str,
    #[tabled(rename = "Choices")]
    choices: String,
}

/// Show what the server accepts when creating a certificate.
#[derive(Debug, Parser)]
pub(crate) struct Command {}

#[async_trait]
impl super::Command for Command {
    async fn execute(self, store: Store) -> Result<()> {
        let mut hook = OptionsHook::new(store.clone());
        _ = hook.render().await;
        store.idle().await;
        super::settle(&store).await?;

        let Some(options) = hook.render().await else {
            return Ok(());
        };
        let rows = [
            Row {
                name: "Type",
                choices: options
                    .types
                    .iter()
                    .map(|type_| type_.as_str())
                    .collect::<Vec<_>>()
                    .join(", "),
            },
            Row {
                name: "Algorithm",
                choices: options.algorithms.join(", "),
            },
            Row {
                name: "Format",
                choices: options.formats.join(", "),
            },
        ];
        println!("{}", Table::new(rows).with(Style::rounded()));
        Ok(())
    }
}
