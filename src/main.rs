// SPDX-FileCopyrightText: 2026 The cupt developers
// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

use std::convert::Infallible;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::str::FromStr;

use cupt::app;
use cupt::client::Client;
use cupt::types::{ClientId, Credentials, PoolId};

use anyhow::{anyhow, Context as _};
use clap::{Parser, Subcommand};
use confargs::{prefix_char_filter, Toml};
use serde::Serialize;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// A Cognito User Pool tool.
///
/// Wrap values with special characters in single quotes: a single leading
/// and trailing `'` is removed from every value.
///
/// Any command-line options listed here may be specified by one or
/// more configuration files, which can be used by passing the
/// name of the file on the command-line with the syntax `@config.toml`.
/// The configuration file must contain valid TOML table mapping argument
/// names to their values.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Path to the JSON credentials file with `accessKeyId`,
    /// `secretAccessKey` and `region`.
    #[arg(short, long, global = true, value_parser = unquote::<PathBuf>)]
    credentials: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Add a user pool user with a generated username.
    #[command(visible_alias = "a")]
    Add {
        #[command(flatten)]
        pool: PoolArgs,

        #[command(flatten)]
        user: UserArgs,
    },

    /// Get all user pool users.
    #[command(visible_alias = "g")]
    Get {
        #[command(flatten)]
        pool: PoolArgs,
    },

    /// Log in as a user pool user.
    #[command(visible_alias = "l")]
    Login {
        #[command(flatten)]
        pool: PoolArgs,

        #[command(flatten)]
        user: UserArgs,
    },

    /// Serialize all user pool users to a file.
    #[command(visible_alias = "b")]
    Backup {
        #[command(flatten)]
        pool: PoolArgs,

        #[command(flatten)]
        file: FileArgs,
    },

    /// Restore a user pool's users from a serialized JSON file.
    #[command(visible_alias = "r")]
    Restore {
        #[command(flatten)]
        pool: PoolArgs,

        #[command(flatten)]
        file: FileArgs,
    },
}

#[derive(clap::Args, Debug)]
struct PoolArgs {
    /// The user pool id to use.
    #[arg(short = 'p', long = "poolid", value_parser = parse::<PoolId>)]
    pool: PoolId,
}

#[derive(clap::Args, Debug)]
struct UserArgs {
    /// The user pool client id to use.
    #[arg(short = 'C', long = "clientid", value_parser = parse::<ClientId>)]
    client: ClientId,

    /// The email of the user.
    #[arg(short, long, value_parser = unquote::<String>)]
    email: String,

    /// The password of the user.
    #[arg(short = 'P', long, value_parser = unquote::<String>)]
    password: String,
}

#[derive(clap::Args, Debug)]
struct FileArgs {
    /// The JSON file users are serialized to or restored from.
    #[arg(short, long, value_parser = unquote::<PathBuf>)]
    file: PathBuf,
}

/// Strips a single leading and a single trailing `'`.
fn trim_quotes(s: &str) -> &str {
    let s = s.strip_prefix('\'').unwrap_or(s);
    s.strip_suffix('\'').unwrap_or(s)
}

fn unquote<T: for<'a> From<&'a str>>(s: &str) -> Result<T, Infallible> {
    Ok(trim_quotes(s).into())
}

fn parse<T: FromStr<Err = anyhow::Error>>(s: &str) -> anyhow::Result<T> {
    trim_quotes(s).parse()
}

fn open_buffered(p: impl AsRef<Path>) -> io::Result<impl BufRead> {
    File::open(p).map(BufReader::new)
}

fn connect(credentials: Option<&Path>) -> anyhow::Result<Client> {
    let path = credentials
        .ok_or_else(|| anyhow!("path to the credentials file must be given with `--credentials`"))?;
    let creds = open_buffered(path)
        .with_context(|| format!("Failed to open credentials file `{}`", path.display()))
        .and_then(Credentials::read)
        .with_context(|| format!("Failed to read credentials from `{}`", path.display()))?;
    Client::builder(creds)
        .build()
        .context("Failed to build directory client")
}

fn print_json(val: &impl Serialize) -> anyhow::Result<()> {
    let mut out = io::stdout().lock();
    serde_json::to_writer_pretty(&mut out, val).context("Failed to encode output as JSON")?;
    writeln!(out).context("Failed to write output")
}

fn run() -> anyhow::Result<()> {
    let Args {
        credentials,
        command,
    } = confargs::args::<Toml>(prefix_char_filter::<'@'>)
        .context("Failed to parse config")
        .map(Args::parse_from)?;
    let credentials = credentials.as_deref();

    match command {
        Command::Add {
            pool: PoolArgs { pool },
            user:
                UserArgs {
                    client,
                    email,
                    password,
                },
        } => {
            let dir = connect(credentials)?;
            print_json(&app::add_user(&dir, &pool, &client, &email, &password)?)
        }

        Command::Get {
            pool: PoolArgs { pool },
        } => {
            let dir = connect(credentials)?;
            print_json(&app::list_users(&dir, &pool, app::BATCH_SIZE)?)
        }

        Command::Login {
            pool: PoolArgs { pool },
            user:
                UserArgs {
                    client,
                    email,
                    password,
                },
        } => {
            let dir = connect(credentials)?;
            print_json(&app::login(&dir, &pool, &client, &email, &password)?)
        }

        Command::Backup {
            pool: PoolArgs { pool },
            file: FileArgs { file },
        } => {
            info!(
                target: "main",
                "Beginning backup process. This may take a while (about 5 seconds per 100 users)."
            );
            let dir = connect(credentials)?;
            let n = app::backup(&dir, &pool, &file)?;
            info!(target: "main", "Serialized {n} users to `{}`.", file.display());
            Ok(())
        }

        Command::Restore {
            pool: PoolArgs { pool },
            file: FileArgs { file },
        } => {
            info!(
                target: "main",
                "Beginning restoration process. This may take quite a long time (about 50 seconds per 100 users)."
            );
            let dir = connect(credentials)?;
            let summary = app::restore_file(&dir, &pool, &file)?;
            info!(
                target: "main",
                "Restoration completed. Restored {summary} users successfully."
            );
            Ok(())
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(target: "main", "{e:#}");
            ExitCode::FAILURE
        }
    }
}
