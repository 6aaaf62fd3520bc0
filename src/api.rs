// SPDX-FileCopyrightText: 2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use log::debug;
use serde::{de::IgnoredAny, Deserialize};

use crate::{
    error::{self, Result},
    http::{Request, Transport},
    model::{
        AccountId, Attachment, Authentication, Certificate, CertificateId, CertificateOptions,
        CertificatePage, CertificateRequest, CertificateType, Credentials, Registration, User,
        UserId,
    },
    session::Context,
};

pub(crate) mod paths {
    use crate::model::{CertificateId, UserId};

    pub(crate) const SIGNUP: &str = "/api/v1/signup";
    pub(crate) const LOGIN: &str = "/api/v1/login";
    pub(crate) const CERTIFICATE_OPTIONS: &str = "/api/v1/certificate-options";
    pub(crate) const CERTIFICATES: &str = "/api/v1/certificates";
    pub(crate) const HEALTH: &str = "/health";

    pub(crate) fn user(id: UserId) -> String {
        format!("/api/v1/users/{id}")
    }

    pub(crate) fn certificate(id: CertificateId) -> String {
        format!("{CERTIFICATES}/{id}")
    }

    pub(crate) fn certificate_body(id: CertificateId) -> String {
        format!("{CERTIFICATES}/{id}/body")
    }
}

#[async_trait]
pub(crate) trait Executor {
    type Response;

    async fn execute(self, transport: &dyn Transport, context: &Context) -> Result<Self::Response>
    where
        Self: TryInto<Request> + Send + Sized,
        error::Error: From<<Self as TryInto<Request>>::Error>,
        Self::Response: for<'de> Deserialize<'de> + Send,
    {
        let mut req = self.try_into()?;
        context.authorize(&mut req)?;
        debug!("{} {}", req.method, req.path);

        let resp = transport.send(req).await?.error_for_status()?;
        Ok(serde_json::from_value(resp.body)?)
    }
}

pub(crate) struct SignUp(pub(crate) Registration);

impl TryFrom<SignUp> for Request {
    type Error = error::Error;

    fn try_from(value: SignUp) -> Result<Self, Self::Error> {
        Self::post(paths::SIGNUP, &value.0)
    }
}

impl Executor for SignUp {
    type Response = Authentication;
}

pub(crate) struct Login(pub(crate) Credentials);

impl TryFrom<Login> for Request {
    type Error = error::Error;

    fn try_from(value: Login) -> Result<Self, Self::Error> {
        Self::post(paths::LOGIN, &value.0)
    }
}

impl Executor for Login {
    type Response = Authentication;
}

pub(crate) struct GetUser {
    pub(crate) id: UserId,
}

impl From<GetUser> for Request {
    fn from(value: GetUser) -> Self {
        Self::get(&paths::user(value.id))
    }
}

impl Executor for GetUser {
    type Response = User;
}

pub(crate) struct GetCertificateOptions;

impl From<GetCertificateOptions> for Request {
    fn from(_: GetCertificateOptions) -> Self {
        Self::get(paths::CERTIFICATE_OPTIONS)
    }
}

impl Executor for GetCertificateOptions {
    type Response = CertificateOptions;
}

/// Lists an account's certificates. An empty type filter lists all of them.
pub(crate) struct GetCertificates {
    pub(crate) account_id: AccountId,
    pub(crate) types: Vec<CertificateType>,
}

impl GetCertificates {
    pub(crate) const fn all(account_id: AccountId) -> Self {
        Self {
            account_id,
            types: Vec::new(),
        }
    }

    pub(crate) fn signing(account_id: AccountId) -> Self {
        Self {
            account_id,
            types: CertificateType::SIGNING.to_vec(),
        }
    }
}

impl From<GetCertificates> for Request {
    fn from(value: GetCertificates) -> Self {
        let account_id = value.account_id.to_string();
        Self::get(paths::CERTIFICATES)
            .with_query([("accountId", account_id.as_str())])
            .with_query(value.types.iter().map(|type_| ("type", type_.as_str())))
    }
}

impl Executor for GetCertificates {
    type Response = CertificatePage;
}

pub(crate) struct GetCertificate {
    pub(crate) id: CertificateId,
}

impl From<GetCertificate> for Request {
    fn from(value: GetCertificate) -> Self {
        Self::get(&paths::certificate(value.id))
    }
}

impl Executor for GetCertificate {
    type Response = Certificate;
}

pub(crate) struct CreateCertificate(pub(crate) CertificateRequest);

impl TryFrom<CreateCertificate> for Request {
    type Error = error::Error;

    fn try_from(value: CreateCertificate) -> Result<Self, Self::Error> {
        Self::post(paths::CERTIFICATES, &value.0)
    }
}

impl Executor for CreateCertificate {
    type Response = Certificate;
}

pub(crate) struct GetCertificateBody {
    pub(crate) id: CertificateId,
    pub(crate) fullchain: bool,
}

impl From<GetCertificateBody> for Request {
    fn from(value: GetCertificateBody) -> Self {
        let req = Self::get(&paths::certificate_body(value.id));
        if value.fullchain {
            req.with_query([("fullchain", "true")])
        } else {
            req
        }
    }
}

impl Executor for GetCertificateBody {
    type Response = Attachment;
}

pub(crate) struct Health;

impl From<Health> for Request {
    fn from(_: Health) -> Self {
        Self::get(paths::HEALTH)
    }
}

impl Executor for Health {
    type Response = IgnoredAny;
}
