// SPDX-FileCopyrightText: 2022-2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use std::{path::Path, sync::Arc};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::Result;

use super::{Persistence, Storage};

/// Keeps the record for the lifetime of the process. Clones share the same
/// record.
pub(crate) struct Memory<T> {
    data: Arc<RwLock<Option<T>>>,
}

impl<T> Memory<T> {
    pub(crate) fn new() -> Self {
        Self::default()
    }
}

impl<T> Clone for Memory<T> {
    fn clone(&self) -> Self {
        Self {
            data: Arc::clone(&self.data),
        }
    }
}

impl<T> Persistence for Memory<T> {
    fn location(&self) -> Option<&Path> {
        None
    }
}

#[async_trait]
impl<T: Send + Sync + Clone> Storage<T> for Memory<T> {
    async fn get(&mut self) -> Result<Option<T>> {
        Ok(self.data.read().await.clone())
    }

    async fn update(&mut self, data: &T) -> Result<()> {
        *self.data.write().await = Some(data.clone());
        Ok(())
    }

    async fn clear(&mut self) -> Result<()> {
        *self.data.write().await = None;
        Ok(())
    }
}

impl<T> Default for Memory<T> {
    fn default() -> Self {
        Self {
            data: Arc::new(RwLock::new(None)),
        }
    }
}
