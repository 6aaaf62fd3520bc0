// SPDX-FileCopyrightText: 2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

mod context;

use log::{debug, info, warn};
use secrecy::{ExposeSecret as _, SecretString};
use serde::{Deserialize, Serialize};

use crate::{
    api::{self, Executor},
    error::{self, Result},
    error_channel::ErrorKind,
    http,
    model::{AccountId, Authentication, Credentials, Registration, User, UserId},
    store::Store,
};

pub(crate) use context::Context;

/// What survives between invocations: enough to ask the server who we are.
#[derive(Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Data {
    auth_token: Option<String>,
    user_id: Option<UserId>,
}

impl Data {
    pub(crate) fn new(token: &SecretString, user_id: UserId) -> Self {
        Self {
            auth_token: Some(token.expose_secret().clone()),
            user_id: Some(user_id),
        }
    }

    /// Both halves, or nothing. A record missing either one cannot be
    /// restored.
    fn into_parts(self) -> Option<(SecretString, UserId)> {
        match (self.auth_token, self.user_id) {
            (Some(token), Some(user_id)) if !token.is_empty() => {
                Some((SecretString::new(token), user_id))
            }
            _ => None,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) enum State {
    #[default]
    Unauthenticated,
    Authenticating,
    Authenticated(User),
}

impl State {
    pub(crate) const fn user(&self) -> Option<&User> {
        match *self {
            Self::Authenticated(ref user) => Some(user),
            Self::Unauthenticated | Self::Authenticating => None,
        }
    }

    pub(crate) fn account_id(&self) -> Option<AccountId> {
        self.user().map(|user| user.account.id)
    }

    pub(crate) const fn is_authenticated(&self) -> bool {
        matches!(*self, Self::Authenticated(_))
    }

    pub(crate) const fn is_authenticating(&self) -> bool {
        matches!(*self, Self::Authenticating)
    }
}

impl Store {
    /// Moves to `Authenticating` unless another attempt is running or a user
    /// is already signed in.
    async fn begin_authentication(&self, context: Option<Context>) -> Result<()> {
        self.update(|shared| match shared.state.session {
            State::Unauthenticated => {
                shared.state.session = State::Authenticating;
                if let Some(context) = context {
                    shared.context = context;
                }
                Ok(())
            }
            State::Authenticating => Err(error::Session::AuthenticationInProgress.into()),
            State::Authenticated(ref user) => {
                Err(error::Session::AlreadyAuthenticated(user.email.clone()).into())
            }
        })
        .await
    }

    /// Settles an attempt. Returns false when the attempt was abandoned while
    /// the request was out, for example by a logout.
    async fn finish_authentication(&self, context: Context, user: User) -> bool {
        self.update(|shared| {
            if !shared.state.session.is_authenticating() {
                return false;
            }
            shared.context = context;
            shared.state.session = State::Authenticated(user);
            true
        })
        .await
    }

    async fn abandon_authentication(&self) {
        self.update(|shared| {
            if shared.state.session.is_authenticating() {
                shared.state.session = State::Unauthenticated;
                shared.context = Context::default();
            }
        })
        .await;
    }

    async fn authenticate<E>(&self, endpoint: E) -> Result<()>
    where
        E: Executor<Response = Authentication> + TryInto<http::Request> + Send,
        error::Error: From<<E as TryInto<http::Request>>::Error>,
    {
        self.begin_authentication(None).await?;

        let auth = match self.call(endpoint).await {
            Ok(auth) => auth,
            Err(err) => {
                self.abandon_authentication().await;
                return Err(err);
            }
        };

        let data = Data::new(&auth.token, auth.user.id);
        let email = auth.user.email.clone();
        if !self
            .finish_authentication(Context::with_token(auth.token), auth.user)
            .await
        {
            debug!("Authentication for {} was abandoned", email);
            return Err(error::Session::NotAuthenticated.into());
        }

        info!("Logged in as {}", email);
        if let Err(err) = self.storage().await.update(&data).await {
            warn!("Could not save the session, it will end with this process: {}", err);
        }
        Ok(())
    }

    /// Runs `then` with whether the attempt succeeded. Failures other than a
    /// rejected concurrent attempt are reported to the error channel.
    async fn settle_authentication<F>(
        &self,
        result: Result<()>,
        describe: fn(&error::Error) -> String,
        then: F,
    ) where
        F: FnOnce(bool) + Send,
    {
        match result {
            Ok(()) => then(true),
            Err(error::Error::Session(err)) => {
                warn!("Ignoring authentication attempt: {}", err);
                then(false);
            }
            Err(err) => {
                warn!("{}", err);
                self.report_error(ErrorKind::from(&err), describe(&err))
                    .await;
                then(false);
            }
        }
    }

    pub(crate) async fn login<F>(&self, credentials: Credentials, then: F)
    where
        F: FnOnce(bool) + Send,
    {
        let result = self.authenticate(api::Login(credentials)).await;
        self.settle_authentication(
            result,
            |err| match ErrorKind::from(err) {
                ErrorKind::Authentication => "the email or password is incorrect".to_owned(),
                ErrorKind::Validation | ErrorKind::Conflict | ErrorKind::Transport => {
                    err.to_string()
                }
            },
            then,
        )
        .await;
    }

    pub(crate) async fn sign_up<F>(&self, registration: Registration, then: F)
    where
        F: FnOnce(bool) + Send,
    {
        let result = self.authenticate(api::SignUp(registration)).await;
        self.settle_authentication(
            result,
            |err| match ErrorKind::from(err) {
                ErrorKind::Conflict => {
                    "a user with that email already exists for the account".to_owned()
                }
                ErrorKind::Validation | ErrorKind::Authentication | ErrorKind::Transport => {
                    err.to_string()
                }
            },
            then,
        )
        .await;
    }

    /// Picks up the session saved by an earlier login, if there is one.
    pub(crate) async fn restore_session(&self) {
        let saved = match self.storage().await.get().await {
            Ok(saved) => saved.and_then(Data::into_parts),
            Err(err) => {
                warn!("Could not read the saved session: {}", err);
                None
            }
        };
        let Some((token, user_id)) = saved else {
            debug!("No saved session to restore");
            return;
        };

        if let Err(err) = self
            .begin_authentication(Some(Context::with_token(token)))
            .await
        {
            debug!("Not restoring the saved session: {}", err);
            return;
        }

        let user = match self.call(api::GetUser { id: user_id }).await {
            Ok(user) => user,
            Err(err) => {
                self.abandon_authentication().await;
                if ErrorKind::from(&err) == ErrorKind::Authentication {
                    info!("The saved session has expired");
                    if let Err(err) = self.storage().await.clear().await {
                        warn!("Could not remove the expired session: {}", err);
                    }
                }
                warn!("{}", err);
                self.report(&err).await;
                return;
            }
        };

        let context = self.context().await;
        let email = user.email.clone();
        if self.finish_authentication(context, user).await {
            info!("Restored session for {}", email);
        }
    }

    /// Drops the session and everything fetched on its behalf. Certificate
    /// options are not account-scoped and stay.
    pub(crate) async fn logout(&self) {
        self.update(|shared| {
            shared.state.session = State::Unauthenticated;
            shared.context = Context::default();
            shared.state.certificates.clear_account_scoped();
        })
        .await;

        if let Err(err) = self.storage().await.clear().await {
            warn!("Could not remove the saved session: {}", err);
        }
        debug!("Logged out");
    }
}
