// SPDX-FileCopyrightText: 2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use clap::Parser;
use tabled::{
    settings::{object::Segment, Alignment, Modify, Style},
    Table, Tabled,
};

use crate::{
    cache::CertificateState,
    error::Result,
    hooks::{CertificatesHook, SignatoriesHook},
    model::Certificate,
    store::Store,
};

#[derive(Tabled)]
pub(super) struct Row<'certificate> {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: &'certificate str,
    #[tabled(rename = "Type")]
    type_: String,
    #[tabled(rename = "Signed By")]
    signed_by: String,
    #[tabled(rename = "Expires")]
    expires_at: String,
}

impl<'certificate> Row<'certificate> {
    pub(super) fn new(certificate: &'certificate Certificate, state: &CertificateState) -> Self {
        let signed_by = match (certificate.signatory_id, state.signer_of(certificate)) {
            (None, _) => "(self-signed)".to_owned(),
            (Some(_), Some(signer)) => signer.name.clone(),
            (Some(id), None) => id.to_string(),
        };
        Self {
            id: certificate.id.to_string(),
            name: &certificate.name,
            type_: certificate.type_.to_string(),
            signed_by,
            expires_at: certificate.expires_at.format("%Y-%m-%d").to_string(),
        }
    }
}

/// List the certificates of the logged-in user's account.
#[derive(Debug, Parser)]
pub(crate) struct Command {
    /// Only list certificates that can sign others.
    #[arg(long, short)]
    signing: bool,
}

#[async_trait]
impl super::Command for Command {
    async fn execute(self, store: Store) -> Result<()> {
        _ = super::require_session(&store).await?;

        // Signatories are always loaded so the signer column can be named.
        let mut signatories = SignatoriesHook::new(store.clone());
        let mut certificates = CertificatesHook::new(store.clone());
        _ = signatories.render().await;
        if !self.signing {
            _ = certificates.render().await;
        }
        store.idle().await;
        super::settle(&store).await?;

        let listed = if self.signing {
            signatories.render().await
        } else {
            certificates.render().await.certificates().to_vec()
        };
        if listed.is_empty() {
            println!("No certificates");
            return Ok(());
        }

        let state = store.select(|state| state.certificates.clone()).await;
        println!(
            "{}",
            Table::new(listed.iter().map(|certificate| Row::new(certificate, &state)))
                .with(Style::rounded())
                .with(Modify::new(Segment::new(1.., 1..=1)).with(Alignment::left()))
        );
        Ok(())
    }
}
