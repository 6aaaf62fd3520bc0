// SPDX-FileCopyrightText: 2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use std::collections::{HashMap, HashSet};

use log::{debug, info};

use crate::{
    api,
    error::Result,
    model::{
        AccountId, Attachment, Certificate, CertificateId, CertificateOptions, CertificateRequest,
    },
    store::{ResourceKey, Store},
};

/// A certificate list that belongs to one account at a time.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct Certificates {
    account_id: Option<AccountId>,
    certificates: Vec<Certificate>,
    loaded: bool,
}

impl Certificates {
    pub(crate) const fn account_id(&self) -> Option<AccountId> {
        self.account_id
    }

    pub(crate) fn certificates(&self) -> &[Certificate] {
        &self.certificates
    }

    pub(crate) fn is_loaded_for(&self, account_id: AccountId) -> bool {
        self.loaded && self.account_id == Some(account_id)
    }

    /// Points the slice at `account_id`, dropping anything held for another
    /// account.
    fn scope(&mut self, account_id: AccountId) {
        if self.account_id != Some(account_id) {
            *self = Self {
                account_id: Some(account_id),
                ..Self::default()
            };
        }
    }

    fn replace(&mut self, account_id: AccountId, certificates: Vec<Certificate>) -> bool {
        if self.account_id != Some(account_id) {
            return false;
        }
        self.certificates = certificates;
        self.loaded = true;
        true
    }

    fn insert(&mut self, certificate: &Certificate) {
        let same_account = certificate
            .account_id
            .map_or(true, |id| self.account_id == Some(id));
        if self.loaded
            && same_account
            && !self.certificates.iter().any(|c| c.id == certificate.id)
        {
            self.certificates.push(certificate.clone());
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct Options {
    pub(crate) options: Option<CertificateOptions>,
}

/// The certificate a detail view is showing.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct Selected {
    id: Option<CertificateId>,
    pub(crate) certificate: Option<Certificate>,
    pub(crate) loading: bool,
}

impl Selected {
    pub(crate) const fn id(&self) -> Option<CertificateId> {
        self.id
    }

    fn select(&mut self, id: CertificateId) {
        if self.id != Some(id) {
            self.certificate = None;
        }
        self.id = Some(id);
        self.loading = true;
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct CertificateState {
    pub(crate) options: Options,
    pub(crate) certificates: Certificates,
    pub(crate) signatories: Certificates,
    pub(crate) selected: Selected,
}

impl CertificateState {
    pub(crate) fn clear_account_scoped(&mut self) {
        self.certificates = Certificates::default();
        self.signatories = Certificates::default();
        self.selected = Selected::default();
    }

    fn insert(&mut self, certificate: &Certificate) {
        self.certificates.insert(certificate);
        if certificate.type_.is_signing() {
            self.signatories.insert(certificate);
        }
    }

    /// Every certificate currently held, by id.
    pub(crate) fn index(&self) -> HashMap<CertificateId, &Certificate> {
        self.certificates
            .certificates
            .iter()
            .chain(&self.signatories.certificates)
            .chain(&self.selected.certificate)
            .map(|certificate| (certificate.id, certificate))
            .collect()
    }

    pub(crate) fn signer_of(&self, certificate: &Certificate) -> Option<&Certificate> {
        let id = certificate.signatory_id?;
        self.index().get(&id).copied()
    }

    /// `certificate` followed by each known signer up to the root. Stops at
    /// the first signer that is not held, or on a cycle.
    pub(crate) fn chain_of<'a>(&'a self, certificate: &'a Certificate) -> Vec<&'a Certificate> {
        let index = self.index();
        let mut seen = HashSet::new();
        let mut chain = vec![];
        let mut next = Some(certificate);
        while let Some(current) = next {
            if !seen.insert(current.id) {
                break;
            }
            chain.push(current);
            next = current
                .signatory_id
                .and_then(|id| index.get(&id).copied());
        }
        chain
    }
}

impl Store {
    /// Fetches the creation form options. Concurrent calls share one request.
    pub(crate) async fn fetch_certificate_options(&self) {
        let key = ResourceKey::Options;
        if !self.begin(key, |_| true).await {
            return;
        }

        let result = self.call(api::GetCertificateOptions).await;
        let result = self
            .complete(key, |shared| {
                result.map(|options| shared.state.certificates.options.options = Some(options))
            })
            .await;
        if let Err(err) = result {
            self.fail(&err).await;
        }
    }

    pub(crate) async fn fetch_certificates_for_account(&self, account_id: Option<AccountId>) {
        let Some(account_id) = account_id else {
            return;
        };
        let key = ResourceKey::Certificates(account_id);
        if !self
            .begin(key, |state| {
                state.certificates.certificates.scope(account_id);
                true
            })
            .await
        {
            return;
        }

        let result = self.call(api::GetCertificates::all(account_id)).await;
        let result = self
            .complete(key, |shared| {
                let slice = &mut shared.state.certificates.certificates;
                if slice.account_id() != Some(account_id) {
                    debug!("Discarding stale response for {}", key);
                    return Ok(());
                }
                result.map(|page| _ = slice.replace(account_id, page.results))
            })
            .await;
        if let Err(err) = result {
            self.fail(&err).await;
        }
    }

    /// Fetches the certificates that can sign others. Skipped when they are
    /// already held for the account.
    pub(crate) async fn fetch_signing_certificates(&self, account_id: Option<AccountId>) {
        let Some(account_id) = account_id else {
            return;
        };
        let key = ResourceKey::Signatories(account_id);
        if !self
            .begin(key, |state| {
                if state.certificates.signatories.is_loaded_for(account_id) {
                    debug!("Signing certificates for {} are already loaded", account_id);
                    return false;
                }
                state.certificates.signatories.scope(account_id);
                true
            })
            .await
        {
            return;
        }

        let result = self.call(api::GetCertificates::signing(account_id)).await;
        let result = self
            .complete(key, |shared| {
                let slice = &mut shared.state.certificates.signatories;
                if slice.account_id() != Some(account_id) {
                    debug!("Discarding stale response for {}", key);
                    return Ok(());
                }
                result.map(|page| _ = slice.replace(account_id, page.results))
            })
            .await;
        if let Err(err) = result {
            self.fail(&err).await;
        }
    }

    pub(crate) async fn fetch_certificate_by_id(&self, id: CertificateId) {
        let key = ResourceKey::Certificate(id);
        if !self
            .begin(key, |state| {
                state.certificates.selected.select(id);
                true
            })
            .await
        {
            return;
        }

        let result = self.call(api::GetCertificate { id }).await;
        let result = self
            .complete(key, |shared| {
                let selected = &mut shared.state.certificates.selected;
                if selected.id != Some(id) {
                    debug!("Discarding stale response for {}", key);
                    return Ok(());
                }
                selected.loading = false;
                result.map(|certificate| selected.certificate = Some(certificate))
            })
            .await;
        if let Err(err) = result {
            self.fail(&err).await;
        }
    }

    /// Issues a new certificate and adds it to whichever loaded lists it
    /// belongs in.
    pub(crate) async fn create_certificate(
        &self,
        request: CertificateRequest,
    ) -> Result<Certificate> {
        let name = request.name.clone();
        match self.call(api::CreateCertificate(request)).await {
            Ok(certificate) => {
                info!("Created {} {} ({})", certificate.type_, name, certificate.id);
                self.update(|shared| shared.state.certificates.insert(&certificate))
                    .await;
                Ok(certificate)
            }
            Err(err) => {
                self.fail(&err).await;
                Err(err)
            }
        }
    }

    pub(crate) async fn certificate_body(
        &self,
        id: CertificateId,
        fullchain: bool,
    ) -> Result<Attachment> {
        let result = self.call(api::GetCertificateBody { id, fullchain }).await;
        if let Err(ref err) = result {
            self.fail(err).await;
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};

    use crate::{
        api::paths,
        error_channel::ErrorKind,
        http::mock::Mock,
        model::{fixtures, CertificateType},
        store::testing,
    };

    use super::*;

    const ROOT: &str = "5d4a1a0e-8e3f-4a7d-9d7c-6a4f0c1b2e31";
    const INTERMEDIATE: &str = "7c2b9f14-0a3e-4c55-8d21-3f6e9b0a4d72";
    const LEAF: &str = "b3e8d6c5-21f4-4a9b-bc07-9e1d2a3f4c58";

    fn account(id: &str) -> AccountId {
        id.parse().unwrap()
    }

    fn list_path(account_id: &str) -> String {
        format!("{}?accountId={account_id}", paths::CERTIFICATES)
    }

    fn signing_path(account_id: &str) -> String {
        format!(
            "{}?accountId={account_id}&type=ROOT_CA&type=INTERMEDIATE_CA",
            paths::CERTIFICATES
        )
    }

    fn page(certificates: &[Value]) -> Value {
        json!({
            "currentPage": 1,
            "totalPages": 1,
            "totalResults": certificates.len(),
            "resultsPerPage": 25,
            "results": certificates,
        })
    }

    fn ids(slice: &Certificates) -> Vec<String> {
        slice
            .certificates()
            .iter()
            .map(|certificate| certificate.id.to_string())
            .collect()
    }

    #[test]
    fn signer_and_chain() {
        let root = fixtures::certificate(ROOT, "ROOT_CA", "");
        let intermediate = fixtures::certificate(INTERMEDIATE, "INTERMEDIATE_CA", ROOT);
        let leaf = fixtures::certificate(LEAF, "CERTIFICATE", INTERMEDIATE);

        let mut state = CertificateState::default();
        state.signatories.scope(account(fixtures::ACCOUNT_ID));
        _ = state.signatories.replace(
            account(fixtures::ACCOUNT_ID),
            vec![root.clone(), intermediate.clone()],
        );

        assert_eq!(state.signer_of(&leaf), Some(&intermediate));
        assert_eq!(state.signer_of(&root), None);
        assert_eq!(
            state
                .chain_of(&leaf)
                .into_iter()
                .map(|certificate| certificate.id)
                .collect::<Vec<_>>(),
            vec![leaf.id, intermediate.id, root.id]
        );
    }

    #[test]
    fn chain_stops_on_cycle() {
        let a = fixtures::certificate(ROOT, "INTERMEDIATE_CA", INTERMEDIATE);
        let b = fixtures::certificate(INTERMEDIATE, "INTERMEDIATE_CA", ROOT);

        let mut state = CertificateState::default();
        state.certificates.scope(account(fixtures::ACCOUNT_ID));
        _ = state
            .certificates
            .replace(account(fixtures::ACCOUNT_ID), vec![a.clone(), b]);

        assert_eq!(state.chain_of(&a).len(), 2);
    }

    #[tokio::test]
    async fn concurrent_options_fetches_share_a_request() {
        let mock = Mock::new();
        let (store, _) = testing::store(&mock);
        _ = mock.respond(
            paths::CERTIFICATE_OPTIONS,
            200,
            json!({
                "types": ["ROOT_CA", "INTERMEDIATE_CA", "CERTIFICATE"],
                "algorithms": ["RSA"],
                "formats": ["PEM"],
            }),
        );
        let gate = mock.hold(paths::CERTIFICATE_OPTIONS);

        for _ in 0..3 {
            let background = store.clone();
            store.spawn(async move { background.fetch_certificate_options().await });
        }
        mock.requested(paths::CERTIFICATE_OPTIONS).await;
        for _ in 0..3 {
            tokio::task::yield_now().await;
        }
        gate.release();
        store.idle().await;

        assert_eq!(mock.count(paths::CERTIFICATE_OPTIONS), 1);
        let options = store
            .select(|state| state.certificates.options.options.clone())
            .await
            .unwrap();
        assert_eq!(options.types.len(), 3);
        assert_eq!(options.algorithms, vec!["RSA".to_owned()]);
    }

    #[tokio::test]
    async fn account_switch_discards_stale_list() {
        let mock = Mock::new();
        let (store, _) = testing::signed_in(&mock, fixtures::ACCOUNT_ID).await;
        _ = mock
            .respond(
                &list_path(fixtures::ACCOUNT_ID),
                200,
                page(&[fixtures::certificate_json(ROOT, "a-root", "ROOT_CA", "")]),
            )
            .respond(
                &list_path(fixtures::OTHER_ACCOUNT_ID),
                200,
                page(&[fixtures::certificate_json(LEAF, "b-leaf", "CERTIFICATE", "")]),
            );
        let gate = mock.hold(&list_path(fixtures::ACCOUNT_ID));

        let background = store.clone();
        store.spawn(async move {
            background
                .fetch_certificates_for_account(Some(account(fixtures::ACCOUNT_ID)))
                .await;
        });
        mock.requested(&list_path(fixtures::ACCOUNT_ID)).await;

        store
            .fetch_certificates_for_account(Some(account(fixtures::OTHER_ACCOUNT_ID)))
            .await;
        gate.release();
        store.idle().await;

        let slice = store
            .select(|state| state.certificates.certificates.clone())
            .await;
        assert_eq!(slice.account_id(), Some(account(fixtures::OTHER_ACCOUNT_ID)));
        assert_eq!(ids(&slice), vec![LEAF.to_owned()]);
        assert!(store.select(|state| state.error.current().is_none()).await);
    }

    #[tokio::test]
    async fn returning_to_an_account_in_flight_shows_its_list() {
        let mock = Mock::new();
        let (store, _) = testing::signed_in(&mock, fixtures::ACCOUNT_ID).await;
        _ = mock
            .respond(
                &list_path(fixtures::ACCOUNT_ID),
                200,
                page(&[fixtures::certificate_json(ROOT, "a-root", "ROOT_CA", "")]),
            )
            .respond(
                &list_path(fixtures::OTHER_ACCOUNT_ID),
                200,
                page(&[fixtures::certificate_json(LEAF, "b-leaf", "CERTIFICATE", "")]),
            );
        let gate = mock.hold(&list_path(fixtures::ACCOUNT_ID));

        let background = store.clone();
        store.spawn(async move {
            background
                .fetch_certificates_for_account(Some(account(fixtures::ACCOUNT_ID)))
                .await;
        });
        mock.requested(&list_path(fixtures::ACCOUNT_ID)).await;

        store
            .fetch_certificates_for_account(Some(account(fixtures::OTHER_ACCOUNT_ID)))
            .await;
        store
            .fetch_certificates_for_account(Some(account(fixtures::ACCOUNT_ID)))
            .await;
        let slice = store
            .select(|state| state.certificates.certificates.clone())
            .await;
        assert_eq!(slice.account_id(), Some(account(fixtures::ACCOUNT_ID)));
        assert!(slice.certificates().is_empty());

        gate.release();
        store.idle().await;

        let slice = store
            .select(|state| state.certificates.certificates.clone())
            .await;
        assert_eq!(slice.account_id(), Some(account(fixtures::ACCOUNT_ID)));
        assert!(slice.is_loaded_for(account(fixtures::ACCOUNT_ID)));
        assert_eq!(ids(&slice), vec![ROOT.to_owned()]);
        assert_eq!(mock.count(&list_path(fixtures::ACCOUNT_ID)), 1);
    }

    #[tokio::test]
    async fn account_switch_discards_stale_signatories() {
        let mock = Mock::new();
        let (store, _) = testing::signed_in(&mock, fixtures::ACCOUNT_ID).await;
        _ = mock
            .respond(
                &signing_path(fixtures::ACCOUNT_ID),
                200,
                page(&[fixtures::certificate_json(ROOT, "a-root", "ROOT_CA", "")]),
            )
            .respond(
                &signing_path(fixtures::OTHER_ACCOUNT_ID),
                200,
                page(&[fixtures::certificate_json(
                    INTERMEDIATE,
                    "b-issuing",
                    "INTERMEDIATE_CA",
                    "",
                )]),
            );
        let gate = mock.hold(&signing_path(fixtures::ACCOUNT_ID));

        let background = store.clone();
        store.spawn(async move {
            background
                .fetch_signing_certificates(Some(account(fixtures::ACCOUNT_ID)))
                .await;
        });
        mock.requested(&signing_path(fixtures::ACCOUNT_ID)).await;

        store
            .fetch_signing_certificates(Some(account(fixtures::OTHER_ACCOUNT_ID)))
            .await;
        gate.release();
        store.idle().await;

        let slice = store
            .select(|state| state.certificates.signatories.clone())
            .await;
        assert!(slice.is_loaded_for(account(fixtures::OTHER_ACCOUNT_ID)));
        assert!(!slice.is_loaded_for(account(fixtures::ACCOUNT_ID)));
        assert_eq!(ids(&slice), vec![INTERMEDIATE.to_owned()]);
        assert!(store.select(|state| state.error.current().is_none()).await);

        gate.release();
        store
            .fetch_signing_certificates(Some(account(fixtures::ACCOUNT_ID)))
            .await;
        let slice = store
            .select(|state| state.certificates.signatories.clone())
            .await;
        assert_eq!(ids(&slice), vec![ROOT.to_owned()]);
        assert_eq!(mock.count(&signing_path(fixtures::ACCOUNT_ID)), 2);
    }

    #[tokio::test]
    async fn failed_fetch_keeps_previous_list() {
        let mock = Mock::new();
        let (store, _) = testing::signed_in(&mock, fixtures::ACCOUNT_ID).await;
        let path = list_path(fixtures::ACCOUNT_ID);
        _ = mock.respond(
            &path,
            200,
            page(&[fixtures::certificate_json(ROOT, "root", "ROOT_CA", "")]),
        );
        let account_id = Some(account(fixtures::ACCOUNT_ID));

        store.fetch_certificates_for_account(account_id).await;
        _ = mock.respond(&path, 500, json!({ "message": "database unavailable" }));
        store.fetch_certificates_for_account(account_id).await;

        let state = store.snapshot().await;
        assert_eq!(ids(&state.certificates.certificates), vec![ROOT.to_owned()]);
        let error = state.error.current().unwrap();
        assert_eq!(error.kind, ErrorKind::Transport);
        assert!(error.message.contains("database unavailable"));
        assert!(state.session.is_authenticated());
    }

    #[tokio::test]
    async fn missing_account_skips_fetch() {
        let mock = Mock::new();
        let (store, _) = testing::store(&mock);

        store.fetch_certificates_for_account(None).await;
        store.fetch_signing_certificates(None).await;

        assert!(mock.requests().is_empty());
    }

    #[tokio::test]
    async fn loaded_signatories_are_not_refetched() {
        let mock = Mock::new();
        let (store, _) = testing::signed_in(&mock, fixtures::ACCOUNT_ID).await;
        let path = signing_path(fixtures::ACCOUNT_ID);
        _ = mock.respond(
            &path,
            200,
            page(&[fixtures::certificate_json(ROOT, "root", "ROOT_CA", "")]),
        );
        let account_id = Some(account(fixtures::ACCOUNT_ID));

        store.fetch_signing_certificates(account_id).await;
        store.fetch_signing_certificates(account_id).await;

        assert_eq!(mock.count(&path), 1);
        assert!(store
            .select(|state| state
                .certificates
                .signatories
                .is_loaded_for(account(fixtures::ACCOUNT_ID)))
            .await);
    }

    #[tokio::test]
    async fn selected_certificate() {
        let mock = Mock::new();
        let (store, _) = testing::signed_in(&mock, fixtures::ACCOUNT_ID).await;
        let id: CertificateId = LEAF.parse().unwrap();
        _ = mock.respond(
            &paths::certificate(id),
            200,
            fixtures::certificate_json(LEAF, "leaf", "CERTIFICATE", INTERMEDIATE),
        );

        store.fetch_certificate_by_id(id).await;

        let selected = store
            .select(|state| state.certificates.selected.clone())
            .await;
        assert_eq!(selected.id(), Some(id));
        assert!(!selected.loading);
        assert_eq!(selected.certificate.unwrap().name, "leaf");
    }

    #[tokio::test]
    async fn late_certificate_response_is_discarded() {
        let mock = Mock::new();
        let (store, _) = testing::signed_in(&mock, fixtures::ACCOUNT_ID).await;
        let first: CertificateId = ROOT.parse().unwrap();
        let second: CertificateId = LEAF.parse().unwrap();
        _ = mock
            .respond(
                &paths::certificate(first),
                200,
                fixtures::certificate_json(ROOT, "root", "ROOT_CA", ""),
            )
            .respond(
                &paths::certificate(second),
                200,
                fixtures::certificate_json(LEAF, "leaf", "CERTIFICATE", ROOT),
            );
        let gate = mock.hold(&paths::certificate(first));

        let background = store.clone();
        store.spawn(async move { background.fetch_certificate_by_id(first).await });
        mock.requested(&paths::certificate(first)).await;

        store.fetch_certificate_by_id(second).await;
        gate.release();
        store.idle().await;

        let selected = store
            .select(|state| state.certificates.selected.clone())
            .await;
        assert_eq!(selected.id(), Some(second));
        assert!(!selected.loading);
        assert_eq!(selected.certificate.unwrap().name, "leaf");
    }

    #[tokio::test]
    async fn returning_to_a_certificate_in_flight_shows_it() {
        let mock = Mock::new();
        let (store, _) = testing::signed_in(&mock, fixtures::ACCOUNT_ID).await;
        let first: CertificateId = ROOT.parse().unwrap();
        let second: CertificateId = LEAF.parse().unwrap();
        _ = mock
            .respond(
                &paths::certificate(first),
                200,
                fixtures::certificate_json(ROOT, "root", "ROOT_CA", ""),
            )
            .respond(
                &paths::certificate(second),
                200,
                fixtures::certificate_json(LEAF, "leaf", "CERTIFICATE", ROOT),
            );
        let gate = mock.hold(&paths::certificate(first));

        let background = store.clone();
        store.spawn(async move { background.fetch_certificate_by_id(first).await });
        mock.requested(&paths::certificate(first)).await;

        store.fetch_certificate_by_id(second).await;
        store.fetch_certificate_by_id(first).await;
        let selected = store
            .select(|state| state.certificates.selected.clone())
            .await;
        assert_eq!(selected.id(), Some(first));
        assert!(selected.loading);
        assert!(selected.certificate.is_none());

        gate.release();
        store.idle().await;

        let selected = store
            .select(|state| state.certificates.selected.clone())
            .await;
        assert_eq!(selected.id(), Some(first));
        assert!(!selected.loading);
        assert_eq!(selected.certificate.unwrap().name, "root");
        assert_eq!(mock.count(&paths::certificate(first)), 1);
    }

    #[tokio::test]
    async fn created_certificate_joins_loaded_lists() {
        let mock = Mock::new();
        let (store, _) = testing::signed_in(&mock, fixtures::ACCOUNT_ID).await;
        let account_id = Some(account(fixtures::ACCOUNT_ID));
        _ = mock
            .respond(&list_path(fixtures::ACCOUNT_ID), 200, page(&[]))
            .respond(&signing_path(fixtures::ACCOUNT_ID), 200, page(&[]))
            .respond(
                paths::CERTIFICATES,
                200,
                fixtures::certificate_json(INTERMEDIATE, "issuing", "INTERMEDIATE_CA", ROOT),
            );
        store.fetch_certificates_for_account(account_id).await;
        store.fetch_signing_certificates(account_id).await;

        let created = store
            .create_certificate(CertificateRequest {
                name: "issuing".to_owned(),
                subject: crate::model::CertificateSubject {
                    common_name: "Issuing CA".to_owned(),
                    ..Default::default()
                },
                type_: CertificateType::IntermediateCa,
                algorithm: "RSA".to_owned(),
                password: secrecy::SecretString::new("hunter2".to_owned()),
                options: crate::model::KeyOptions { key_size: 2048 },
                signatory: None,
            })
            .await
            .unwrap();

        let state = store.snapshot().await;
        assert_eq!(created.id.to_string(), INTERMEDIATE);
        assert_eq!(ids(&state.certificates.certificates), vec![INTERMEDIATE.to_owned()]);
        assert_eq!(ids(&state.certificates.signatories), vec![INTERMEDIATE.to_owned()]);
    }

    #[tokio::test]
    async fn certificate_body_download() {
        let mock = Mock::new();
        let (store, _) = testing::signed_in(&mock, fixtures::ACCOUNT_ID).await;
        let id: CertificateId = LEAF.parse().unwrap();
        _ = mock.respond(
            &format!("{}?fullchain=true", paths::certificate_body(id)),
            200,
            json!({
                "body": "-----BEGIN CERTIFICATE-----\n...",
                "contentType": "application/x-pem-file",
                "filename": "leaf.chain.pem",
            }),
        );

        let attachment = store.certificate_body(id, true).await.unwrap();
        assert_eq!(attachment.filename, "leaf.chain.pem");

        let err = store.certificate_body(id, false).await.unwrap_err();
        assert_eq!(err.status(), Some(reqwest::StatusCode::NOT_FOUND));
    }
}
