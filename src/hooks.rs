// SPDX-FileCopyrightText: 2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

//! Per-view adapters over the store. Each hook is rendered repeatedly and
//! starts a fetch only when its inputs change, the way a component effect
//! would.

use log::error;

use crate::{
    cache,
    error::{self, Error},
    model::{AccountId, Certificate, CertificateId, CertificateOptions},
    store::{State, Store},
};

/// Remembers the inputs of the last run.
#[derive(Debug)]
pub(crate) struct Effect<D> {
    deps: Option<D>,
}

impl<D: PartialEq> Effect<D> {
    pub(crate) const fn new() -> Self {
        Self { deps: None }
    }

    /// True on the first call and whenever `deps` differs from the last call.
    pub(crate) fn changed(&mut self, deps: D) -> bool {
        if self.deps.as_ref() == Some(&deps) {
            return false;
        }
        self.deps = Some(deps);
        true
    }
}

impl<D: PartialEq> Default for Effect<D> {
    fn default() -> Self {
        Self::new()
    }
}

/// The account whose data views should show.
fn account_id(state: &State) -> Option<AccountId> {
    state.session.account_id()
}

pub(crate) struct SessionHook {
    store: Store,
    effect: Effect<()>,
}

impl SessionHook {
    pub(crate) fn new(store: Store) -> Self {
        Self {
            store,
            effect: Effect::new(),
        }
    }

    /// Restores any saved session on first render.
    pub(crate) async fn render(&mut self) -> bool {
        if self.effect.changed(()) {
            let store = self.store.clone();
            self.store
                .spawn(async move { store.restore_session().await });
        }
        self.store
            .select(|state| state.session.is_authenticated())
            .await
    }
}

pub(crate) struct OptionsHook {
    store: Store,
    effect: Effect<()>,
}

impl OptionsHook {
    pub(crate) fn new(store: Store) -> Self {
        Self {
            store,
            effect: Effect::new(),
        }
    }

    pub(crate) async fn render(&mut self) -> Option<CertificateOptions> {
        if self.effect.changed(()) {
            let store = self.store.clone();
            self.store
                .spawn(async move { store.fetch_certificate_options().await });
        }
        self.store
            .select(|state| state.certificates.options.options.clone())
            .await
    }
}

pub(crate) struct CertificatesHook {
    store: Store,
    effect: Effect<Option<AccountId>>,
}

impl CertificatesHook {
    pub(crate) fn new(store: Store) -> Self {
        Self {
            store,
            effect: Effect::new(),
        }
    }

    pub(crate) async fn render(&mut self) -> cache::Certificates {
        let (account_id, certificates) = self
            .store
            .select(|state| (account_id(state), state.certificates.certificates.clone()))
            .await;
        if self.effect.changed(account_id) && account_id.is_some() {
            let store = self.store.clone();
            self.store.spawn(async move {
                store.fetch_certificates_for_account(account_id).await;
            });
        }
        certificates
    }
}

pub(crate) struct SignatoriesHook {
    store: Store,
    effect: Effect<(Option<AccountId>, bool)>,
}

impl SignatoriesHook {
    pub(crate) fn new(store: Store) -> Self {
        Self {
            store,
            effect: Effect::new(),
        }
    }

    pub(crate) async fn render(&mut self) -> Vec<Certificate> {
        let (account_id, loaded, signatories) = self
            .store
            .select(|state| {
                let account_id = account_id(state);
                let slice = &state.certificates.signatories;
                (
                    account_id,
                    account_id.map_or(false, |id| slice.is_loaded_for(id)),
                    slice.certificates().to_vec(),
                )
            })
            .await;
        if self.effect.changed((account_id, loaded)) && account_id.is_some() && !loaded {
            let store = self.store.clone();
            self.store.spawn(async move {
                store.fetch_signing_certificates(account_id).await;
            });
        }
        signatories
    }
}

pub(crate) struct SelectedHook {
    store: Store,
    effect: Effect<Option<String>>,
}

impl SelectedHook {
    pub(crate) fn new(store: Store) -> Self {
        Self {
            store,
            effect: Effect::new(),
        }
    }

    /// Renders the detail view for the raw id taken from a route or command
    /// line. A missing or malformed id is reported and never sent.
    pub(crate) async fn render(&mut self, certificate_id: Option<&str>) -> cache::Selected {
        if self.effect.changed(certificate_id.map(str::to_owned)) {
            match certificate_id_from(certificate_id) {
                Ok(id) => {
                    let store = self.store.clone();
                    self.store
                        .spawn(async move { store.fetch_certificate_by_id(id).await });
                }
                Err(err) => {
                    error!("{}", err);
                    self.store.report(&err).await;
                }
            }
        }
        self.store
            .select(|state| state.certificates.selected.clone())
            .await
    }
}

/// Parses a raw certificate id without touching the network.
pub(crate) fn certificate_id_from(certificate_id: Option<&str>) -> Result<CertificateId, Error> {
    let raw = certificate_id.ok_or(error::Validation::MissingCertificateId)?;
    raw.parse()
        .map_err(|err| error::Validation::InvalidCertificateId(raw.to_owned(), err).into())
}
