// SPDX-FileCopyrightText: 2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use std::{collections::HashSet, fmt, future::Future, sync::Arc};

use futures_util::lock::{Mutex, MutexGuard};
use log::{debug, info, warn};
use serde::Deserialize;
use tokio_util::task::TaskTracker;

use crate::{
    api::{self, Executor},
    cache::CertificateState,
    error::{self, Result},
    error_channel::{ErrorKind, ErrorState},
    http::{self, Transport},
    model::{AccountId, CertificateId},
    session,
    storage::Storage,
};

/// The identity under which duplicate fetches are suppressed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) enum ResourceKey {
    Options,
    Certificates(AccountId),
    Signatories(AccountId),
    Certificate(CertificateId),
}

impl fmt::Display for ResourceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Options => write!(f, "options"),
            Self::Certificates(ref id) => write!(f, "certificates:{id}"),
            Self::Signatories(ref id) => write!(f, "signatories:{id}"),
            Self::Certificate(ref id) => write!(f, "certificate:{id}"),
        }
    }
}

/// Everything a front end renders from.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct State {
    pub(crate) session: session::State,
    pub(crate) certificates: CertificateState,
    pub(crate) error: ErrorState,
}

pub(crate) struct Shared {
    pub(crate) state: State,
    pub(crate) context: session::Context,
    in_flight: HashSet<ResourceKey>,
}

struct Inner {
    shared: Mutex<Shared>,
    transport: Box<dyn Transport>,
    storage: Mutex<Box<dyn Storage<session::Data>>>,
    tasks: TaskTracker,
}

#[derive(Clone)]
pub(crate) struct Store {
    inner: Arc<Inner>,
}

impl Store {
    pub(crate) fn new<T, S>(transport: T, storage: S) -> Self
    where
        T: Transport + 'static,
        S: Storage<session::Data> + 'static,
    {
        Self {
            inner: Arc::new(Inner {
                shared: Mutex::new(Shared {
                    state: State::default(),
                    context: session::Context::default(),
                    in_flight: HashSet::new(),
                }),
                transport: Box::new(transport),
                storage: Mutex::new(Box::new(storage)),
                tasks: TaskTracker::new(),
            }),
        }
    }

    pub(crate) async fn select<R, F: FnOnce(&State) -> R>(&self, f: F) -> R {
        f(&self.inner.shared.lock().await.state)
    }

    pub(crate) async fn snapshot(&self) -> State {
        self.select(State::clone).await
    }

    pub(crate) async fn context(&self) -> session::Context {
        self.inner.shared.lock().await.context.clone()
    }

    pub(crate) async fn update<R, F: FnOnce(&mut Shared) -> R>(&self, f: F) -> R {
        f(&mut *self.inner.shared.lock().await)
    }

    pub(crate) async fn storage(&self) -> MutexGuard<'_, Box<dyn Storage<session::Data>>> {
        self.inner.storage.lock().await
    }

    /// Runs `prepare`, then marks `key` as in flight. Returns false when
    /// `prepare` declines or a request for `key` is already out. `prepare`
    /// always runs under the same lock, so a return to a key whose request
    /// is still out points the slice back at it and that response lands.
    pub(crate) async fn begin<F>(&self, key: ResourceKey, prepare: F) -> bool
    where
        F: FnOnce(&mut State) -> bool,
    {
        self.update(|shared| {
            if !prepare(&mut shared.state) {
                return false;
            }
            if !shared.in_flight.insert(key) {
                debug!("A fetch of {} is already in flight", key);
                return false;
            }
            true
        })
        .await
    }

    pub(crate) async fn complete<R, F: FnOnce(&mut Shared) -> R>(
        &self,
        key: ResourceKey,
        f: F,
    ) -> R {
        self.update(|shared| {
            _ = shared.in_flight.remove(&key);
            f(shared)
        })
        .await
    }

    pub(crate) async fn call<E>(&self, endpoint: E) -> Result<E::Response>
    where
        E: Executor + TryInto<http::Request> + Send,
        error::Error: From<<E as TryInto<http::Request>>::Error>,
        E::Response: for<'de> Deserialize<'de> + Send,
    {
        let context = self.context().await;
        endpoint.execute(&*self.inner.transport, &context).await
    }

    /// Routes a failed fetch to the error channel. A rejected token also
    /// ends the session.
    pub(crate) async fn fail(&self, err: &error::Error) {
        warn!("{}", err);
        if ErrorKind::from(err) == ErrorKind::Authentication
            && self.context().await.is_authenticated()
        {
            info!("The server no longer accepts our session; logging out");
            self.logout().await;
        }
        self.report(err).await;
    }

    pub(crate) fn spawn<F>(&self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        _ = self.inner.tasks.spawn(task);
    }

    /// Waits until every spawned fetch has finished.
    pub(crate) async fn idle(&self) {
        let tasks = &self.inner.tasks;
        _ = tasks.close();
        tasks.wait().await;
        _ = tasks.reopen();
    }

    pub(crate) async fn check_backend_health(&self) -> Result<()> {
        match self.call(api::Health).await {
            Ok(_) => {
                info!("Backend is healthy");
                Ok(())
            }
            Err(err) => {
                self.fail(&err).await;
                Err(err)
            }
        }
    }
}
