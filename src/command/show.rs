// SPDX-FileCopyrightText: 2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use clap::Parser;
use log::error;
use tabled::{
    settings::{Rotate, Style},
    Table,
};

use crate::{
    error::{self, Result},
    hooks::{SelectedHook, SignatoriesHook},
    store::Store,
};

use super::list::Row;

/// Show a single certificate and the chain that signed it.
#[derive(Debug, Parser)]
pub(crate) struct Command {
    /// The ID of the certificate.
    #[clap()]
    id: String,

    /// Print the PEM body instead of the summary.
    #[arg(long)]
    body: bool,
}

#[async_trait]
impl super::Command for Command {
    async fn execute(self, store: Store) -> Result<()> {
        _ = super::require_session(&store).await?;

        let mut selected = SelectedHook::new(store.clone());
        let mut signatories = SignatoriesHook::new(store.clone());
        _ = selected.render(Some(self.id.as_str())).await;
        _ = signatories.render().await;
        store.idle().await;
        super::settle(&store).await?;

        let Some(certificate) = selected.render(Some(self.id.as_str())).await.certificate else {
            error!("Certificate {} was not found", self.id);
            return Err(error::Error::Command);
        };
        if self.body {
            println!("{}", certificate.body);
            return Ok(());
        }

        let state = store.select(|state| state.certificates.clone()).await;
        println!(
            "{}",
            Table::new([Row::new(&certificate, &state)])
                .with(Rotate::Left)
                .with(Style::rounded())
        );

        let chain = state.chain_of(&certificate);
        if chain.len() > 1 {
            println!("Chain:");
            for (depth, link) in chain.iter().enumerate() {
                println!("{:indent$}{} ({})", "", link.name, link.type_, indent = depth * 2);
            }
        }
        Ok(())
    }
}
