// SPDX-FileCopyrightText: 2022-2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]
#![deny(elided_lifetimes_in_paths)]
#![warn(
    rust_2018_idioms,
    future_incompatible,
    unused,
    unused_lifetimes,
    unused_qualifications,
    unused_results,
    anonymous_parameters,
    deprecated_in_future,
    elided_lifetimes_in_paths,
    explicit_outlives_requirements,
    keyword_idents,
    macro_use_extern_crate,
    missing_doc_code_examples,
    private_doc_tests,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::cargo,
    clippy::unseparated_literal_suffix,
    clippy::decimal_literal_representation,
    clippy::single_char_lifetime_names,
    clippy::fallible_impl_from,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::wildcard_enum_match_arm,
    clippy::deref_by_slicing,
    clippy::default_numeric_fallback,
    clippy::shadow_reuse,
    clippy::clone_on_ref_ptr,
    clippy::todo,
    clippy::string_add,
    clippy::use_debug,
    clippy::future_not_send
)]
#![cfg_attr(not(test), warn(clippy::panic_in_result_fn))]

mod api;
mod cache;
mod command;
mod error;
mod error_channel;
mod hooks;
mod http;
mod metadata;
mod model;
mod password;
mod session;
mod storage;
mod store;

use std::process;

use async_trait::async_trait;
use clap::{Parser, Subcommand};
use error::Result;
use log::{debug, error};
use url::Url;

#[derive(Debug, Subcommand)]
enum Command {
    Signup(command::signup::Command),
    Login(command::login::Command),
    Logout(command::logout::Command),
    Whoami(command::whoami::Command),
    List(command::list::Command),
    Show(command::show::Command),
    Options(command::options::Command),
    Create(command::create::Command),
    Download(command::download::Command),
    Health(command::health::Command),
}

#[async_trait]
impl command::Command for Command {
    async fn execute(self, store: store::Store) -> Result<()> {
        match self {
            Self::Signup(cmd) => cmd.execute(store).await,
            Self::Login(cmd) => cmd.execute(store).await,
            Self::Logout(cmd) => cmd.execute(store).await,
            Self::Whoami(cmd) => cmd.execute(store).await,
            Self::List(cmd) => cmd.execute(store).await,
            Self::Show(cmd) => cmd.execute(store).await,
            Self::Options(cmd) => cmd.execute(store).await,
            Self::Create(cmd) => cmd.execute(store).await,
            Self::Download(cmd) => cmd.execute(store).await,
            Self::Health(cmd) => cmd.execute(store).await,
        }
    }
}

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// The origin of the API server. Request paths are resolved against it.
    #[arg(long, env = "WEBCA_URL", default_value = "http://localhost:28080", value_parser = Url::parse)]
    url: Url,

    /// Keep the session in memory only, so that it ends with this command.
    #[arg(long)]
    no_persist_session: bool,

    #[clap(subcommand)]
    command: Command,
}

fn get_session_storage(args: &Args) -> Box<dyn storage::Storage<session::Data>> {
    if !args.no_persist_session {
        if let Some(file_storage) = storage::File::new(metadata::SESSION_FILE) {
            return Box::new(file_storage);
        }
        debug!("No data directory is available, so the session will not be saved");
    }

    Box::new(storage::Memory::<session::Data>::new())
}

async fn run(args: Args) -> Result<()> {
    let storage = get_session_storage(&args);
    if let Some(location) = storage::Persistence::location(&storage) {
        debug!("Session is stored at {}", location.display());
    }

    let store = store::Store::new(http::Remote::new(args.url)?, storage);
    command::Command::execute(args.command, store).await
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let logger_env = env_logger::Env::new()
        .filter_or("WEBCA_LOG", "warn")
        .write_style("WEBCA_LOG_STYLE");
    env_logger::Builder::from_env(logger_env).init();

    if let Err(e) = run(Args::parse()).await {
        error!("We encountered an error: {}", e);
        process::exit(1);
    };
}
