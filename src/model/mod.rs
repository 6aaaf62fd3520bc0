// SPDX-FileCopyrightText: 2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

pub(crate) mod timestamp;

use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use secrecy::{ExposeSecret as _, SecretString};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

macro_rules! identifier {
    ($(#[$attr:meta])* $name:ident) => {
        $(#[$attr])*
        #[derive(Copy, Clone, Debug, Deserialize, Serialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[serde(transparent)]
        pub(crate) struct $name(Uuid);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s).map(Self)
            }
        }

        impl From<Uuid> for $name {
            fn from(value: Uuid) -> Self {
                Self(value)
            }
        }
    };
}

identifier!(
    /// Tenant boundary. Every user and certificate belongs to exactly one.
    AccountId
);
identifier!(UserId);
identifier!(CertificateId);

fn expose<S: Serializer>(secret: &SecretString, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(secret.expose_secret())
}

/// The API server writes absent references as empty strings.
fn optional_identifier<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: fmt::Display,
{
    match Option::<String>::deserialize(deserializer)?.as_deref() {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(de::Error::custom),
    }
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Account {
    pub(crate) id: AccountId,
    pub(crate) name: String,
    #[serde(with = "timestamp")]
    pub(crate) created_at: DateTime<Utc>,
    #[serde(with = "timestamp")]
    pub(crate) updated_at: DateTime<Utc>,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct User {
    pub(crate) id: UserId,
    pub(crate) email: String,
    pub(crate) role: String,
    #[serde(with = "timestamp")]
    pub(crate) created_at: DateTime<Utc>,
    #[serde(with = "timestamp")]
    pub(crate) updated_at: DateTime<Utc>,
    pub(crate) account: Account,
}

#[derive(Copy, Clone, Debug, Deserialize, Serialize, PartialEq, Eq, Hash, ValueEnum)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub(crate) enum CertificateType {
    RootCa,
    IntermediateCa,
    Certificate,
}

impl CertificateType {
    /// Types whose private keys may sign other certificates.
    pub(crate) const SIGNING: [Self; 2] = [Self::RootCa, Self::IntermediateCa];

    pub(crate) fn is_signing(self) -> bool {
        Self::SIGNING.contains(&self)
    }

    pub(crate) const fn as_str(self) -> &'static str {
        match self {
            Self::RootCa => "ROOT_CA",
            Self::IntermediateCa => "INTERMEDIATE_CA",
            Self::Certificate => "CERTIFICATE",
        }
    }
}

impl fmt::Display for CertificateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match *self {
            Self::RootCa => "Root CA",
            Self::IntermediateCa => "Intermediate CA",
            Self::Certificate => "Certificate",
        })
    }
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Certificate {
    pub(crate) id: CertificateId,
    pub(crate) name: String,
    #[serde(rename = "type")]
    pub(crate) type_: CertificateType,
    pub(crate) serial_number: u64,
    pub(crate) body: String,
    #[serde(default)]
    pub(crate) format: String,
    #[serde(default, deserialize_with = "optional_identifier")]
    pub(crate) account_id: Option<AccountId>,
    #[serde(
        default,
        alias = "signedBy",
        deserialize_with = "optional_identifier",
        skip_serializing_if = "Option::is_none"
    )]
    pub(crate) signatory_id: Option<CertificateId>,
    #[serde(with = "timestamp")]
    pub(crate) created_at: DateTime<Utc>,
    #[serde(with = "timestamp")]
    pub(crate) expires_at: DateTime<Utc>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub(crate) struct CertificateOptions {
    #[serde(default)]
    pub(crate) types: Vec<CertificateType>,
    #[serde(default)]
    pub(crate) algorithms: Vec<String>,
    #[serde(default)]
    pub(crate) formats: Vec<String>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CertificatePage {
    #[serde(default)]
    pub(crate) current_page: u32,
    #[serde(default)]
    pub(crate) total_pages: u32,
    #[serde(default)]
    pub(crate) total_results: u32,
    #[serde(default)]
    pub(crate) results_per_page: u32,
    pub(crate) results: Vec<Certificate>,
}

#[derive(Clone, Debug, Serialize)]
pub(crate) struct Credentials {
    pub(crate) email: String,
    #[serde(serialize_with = "expose")]
    pub(crate) password: SecretString,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Registration {
    pub(crate) account_name: String,
    pub(crate) email: String,
    #[serde(serialize_with = "expose")]
    pub(crate) password: SecretString,
}

/// What the server hands back for a successful login or signup.
#[derive(Clone, Debug, Deserialize)]
pub(crate) struct Authentication {
    pub(crate) token: SecretString,
    pub(crate) user: User,
}

#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CertificateSubject {
    pub(crate) common_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) locality: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) organization: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) organizational_unit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) email: Option<String>,
}

#[derive(Copy, Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct KeyOptions {
    pub(crate) key_size: u32,
}

#[derive(Clone, Debug, Serialize)]
pub(crate) struct Signatory {
    pub(crate) id: CertificateId,
    #[serde(serialize_with = "expose")]
    pub(crate) password: SecretString,
}

#[derive(Clone, Debug, Serialize)]
pub(crate) struct CertificateRequest {
    pub(crate) name: String,
    pub(crate) subject: CertificateSubject,
    #[serde(rename = "type")]
    pub(crate) type_: CertificateType,
    pub(crate) algorithm: String,
    #[serde(serialize_with = "expose")]
    pub(crate) password: SecretString,
    pub(crate) options: KeyOptions,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) signatory: Option<Signatory>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Attachment {
    pub(crate) body: String,
    pub(crate) content_type: String,
    pub(crate) filename: String,
}
