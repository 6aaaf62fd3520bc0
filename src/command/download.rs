// SPDX-FileCopyrightText: 2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use std::{
    fs,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use clap::Parser;
use log::info;

use crate::{error::Result, hooks::certificate_id_from, store::Store};

/// Download the body of a certificate as a file.
#[derive(Debug, Parser)]
pub(crate) struct Command {
    /// The ID of the certificate.
    #[clap()]
    id: String,

    /// Include every signing certificate up to the root.
    #[arg(long)]
    fullchain: bool,

    /// Where to write the file. Defaults to the name the server suggests, in
    /// the current directory. Use `-` for standard output.
    #[arg(long, short, value_hint = clap::ValueHint::FilePath)]
    output: Option<PathBuf>,
}

#[async_trait]
impl super::Command for Command {
    async fn execute(self, store: Store) -> Result<()> {
        let id = match certificate_id_from(Some(self.id.as_str())) {
            Ok(id) => id,
            Err(err) => {
                store.report(&err).await;
                return super::settle(&store).await;
            }
        };
        _ = super::require_session(&store).await?;

        let Ok(attachment) = store.certificate_body(id, self.fullchain).await else {
            return super::settle(&store).await;
        };

        // Only the file name the server suggests is used, never its directory.
        let output = self.output.unwrap_or_else(|| {
            Path::new(&attachment.filename)
                .file_name()
                .map_or_else(|| PathBuf::from("certificate.pem"), PathBuf::from)
        });
        if output.as_os_str() == "-" {
            print!("{}", attachment.body);
        } else {
            fs::write(&output, attachment.body)?;
            info!("Wrote {} to {}", attachment.content_type, output.display());
            println!("{}", output.display());
        }
        Ok(())
    }
}
