// SPDX-FileCopyrightText: 2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use clap::Parser;
use log::{error, warn};
use secrecy::SecretString;

use crate::{
    error::{self, Result},
    hooks::{certificate_id_from, OptionsHook},
    model::{CertificateRequest, CertificateSubject, CertificateType, KeyOptions, Signatory},
    password,
    store::Store,
};

/// Issue a new certificate. Anything other than a root CA must name the
/// certificate that signs it.
#[derive(Debug, Parser)]
pub(crate) struct Command {
    /// A name for the certificate, unique within the account.
    #[clap()]
    name: String,

    /// The kind of certificate to issue.
    #[arg(long = "type", short, value_enum, default_value_t = CertificateType::Certificate)]
    type_: CertificateType,

    /// The subject's common name.
    #[arg(long)]
    common_name: String,

    #[arg(long)]
    country: Option<String>,

    #[arg(long)]
    locality: Option<String>,

    #[arg(long)]
    organization: Option<String>,

    #[arg(long)]
    organizational_unit: Option<String>,

    #[arg(long)]
    email: Option<String>,

    /// The key algorithm. See `options` for what the server accepts.
    #[arg(long, default_value = "RSA")]
    algorithm: String,

    #[arg(long, default_value_t = 2048)]
    key_size: u32,

    /// The password protecting the new private key. Prompted for when not
    /// given.
    #[arg(long, env = "WEBCA_KEY_PASSWORD", hide_env_values = true)]
    password: Option<SecretString>,

    /// The ID of the signing certificate.
    #[arg(long)]
    signatory: Option<String>,

    /// The password protecting the signing certificate's private key.
    #[arg(long, env = "WEBCA_SIGNATORY_PASSWORD", hide_env_values = true)]
    signatory_password: Option<SecretString>,
}

impl Command {
    async fn signatory(&mut self, store: &Store) -> Result<Option<Signatory>> {
        match (self.type_, self.signatory.as_deref()) {
            (CertificateType::RootCa, None) => Ok(None),
            (CertificateType::RootCa, Some(_)) => {
                error!("A root CA signs itself and cannot name a signatory");
                Err(error::Error::Command)
            }
            (CertificateType::IntermediateCa | CertificateType::Certificate, raw) => {
                let id = match certificate_id_from(raw) {
                    Ok(id) => id,
                    Err(err) => {
                        store.report(&err).await;
                        super::settle(store).await?;
                        return Err(error::Error::Command);
                    }
                };
                let password =
                    password::obtain(self.signatory_password.take(), "Signatory password").await?;
                Ok(Some(Signatory { id, password }))
            }
        }
    }
}

#[async_trait]
impl super::Command for Command {
    async fn execute(mut self, store: Store) -> Result<()> {
        _ = super::require_session(&store).await?;

        let mut options = OptionsHook::new(store.clone());
        _ = options.render().await;
        store.idle().await;
        super::settle(&store).await?;
        if let Some(options) = options.render().await {
            if !options.algorithms.is_empty() && !options.algorithms.contains(&self.algorithm) {
                warn!(
                    "The server does not list {} among its algorithms ({})",
                    self.algorithm,
                    options.algorithms.join(", ")
                );
            }
        }

        let signatory = self.signatory(&store).await?;
        let request = CertificateRequest {
            name: self.name,
            subject: CertificateSubject {
                common_name: self.common_name,
                country: self.country,
                locality: self.locality,
                organization: self.organization,
                organizational_unit: self.organizational_unit,
                email: self.email,
            },
            type_: self.type_,
            algorithm: self.algorithm,
            password: password::obtain(self.password, "Key password").await?,
            options: KeyOptions {
                key_size: self.key_size,
            },
            signatory,
        };

        match store.create_certificate(request).await {
            Ok(certificate) => {
                println!("{}", certificate.id);
                Ok(())
            }
            Err(_) => super::settle(&store).await,
        }
    }
}
