// SPDX-FileCopyrightText: 2026 The cupt developers
// SPDX-License-Identifier: Apache-2.0

use cupt_client::Directory;
use cupt_type::{AuthOutcome, Challenge, ClientId, PoolId, Tokens};

use anyhow::{bail, Context, Result};
use tracing::trace;

/// Signs in as `username` and returns the issued tokens.
///
/// Challenges are not answered: a sign-in that requires one fails.
pub fn login(
    dir: &impl Directory,
    pool: &PoolId,
    client: &ClientId,
    username: &str,
    password: &str,
) -> Result<Tokens> {
    trace!(target: "cupt::login", "signing in as `{username}` to `{pool}`");
    match dir
        .initiate_auth(pool, client, username, password)
        .with_context(|| format!("failed to sign in as `{username}`"))?
    {
        AuthOutcome::Tokens(tokens) => Ok(tokens),
        AuthOutcome::Challenge(Challenge { name, .. }) => {
            bail!("signing in as `{username}` requires answering the `{name}` challenge")
        }
    }
}
