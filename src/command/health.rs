// SPDX-FileCopyrightText: 2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use clap::Parser;

use crate::{error::Result, store::Store};

/// Check that the API server is reachable and healthy.
#[derive(Debug, Parser)]
pub(crate) struct Command {}

#[async_trait]
impl super::Command for Command {
    async fn execute(self, store: Store) -> Result<()> {
        if store.check_backend_health().await.is_ok() {
            println!("OK");
        }
        super::settle(&store).await
    }
}
