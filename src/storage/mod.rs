// SPDX-FileCopyrightText: 2022-2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

mod file;
mod memory;

use std::path::Path;

use async_trait::async_trait;

use crate::error::Result;

pub(crate) use file::File;
pub(crate) use memory::Memory;

pub(crate) trait Persistence {
    /// Where the record lives between invocations, if anywhere.
    fn location(&self) -> Option<&Path>;
}

impl<T: Persistence + ?Sized> Persistence for Box<T> {
    fn location(&self) -> Option<&Path> {
        (**self).location()
    }
}

/// A single record, such as the saved login session. Clearing a record that
/// does not exist succeeds.
#[async_trait]
pub(crate) trait Storage<T>: Send + Sync + Persistence {
    async fn get(&mut self) -> Result<Option<T>>;
    async fn update(&mut self, data: &T) -> Result<()>;
    async fn clear(&mut self) -> Result<()>;
}

#[async_trait]
impl<Tn: Sync, T: Storage<Tn> + ?Sized> Storage<Tn> for Box<T> {
    async fn get(&mut self) -> Result<Option<Tn>> {
        (**self).get().await
    }

    async fn update(&mut self, data: &Tn) -> Result<()> {
        (**self).update(data).await
    }

    async fn clear(&mut self) -> Result<()> {
        (**self).clear().await
    }
}
