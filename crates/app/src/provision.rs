// SPDX-FileCopyrightText: 2026 The cupt developers
// SPDX-License-Identifier: Apache-2.0

use super::temporary_password;

use cupt_client::{Directory, NewUser};
use cupt_type::{Attribute, AuthOutcome, Challenge, ClientId, PoolId, Tokens};

use anyhow::{anyhow, bail, Context, Result};
use serde::Serialize;
use tracing::{info, trace};
use uuid::Uuid;

pub const EMAIL: &str = "email";
pub const EMAIL_VERIFIED: &str = "email_verified";

/// A freshly provisioned account
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Account {
    pub username: String,
    pub tokens: Tokens,
}

/// Creates a user with a random UUID username and a verified `email`, then
/// signs in once to replace the temporary password with `password`.
pub fn add_user(
    dir: &impl Directory,
    pool: &PoolId,
    client: &ClientId,
    email: &str,
    password: &str,
) -> Result<Account> {
    let username = Uuid::new_v4().to_string();
    trace!(target: "cupt::provision", "creating `{username}` for `{email}` in `{pool}`");

    let temporary = temporary_password();
    dir.create_user(
        pool,
        NewUser {
            username: &username,
            temporary_password: &temporary,
            attributes: &[
                Attribute::new(EMAIL, email),
                Attribute::new(EMAIL_VERIFIED, "true"),
            ],
        },
    )
    .context("failed to create the user")?;
    info!(target: "cupt::provision", "created user `{username}` for `{email}`");

    let tokens = match dir
        .initiate_auth(pool, client, &username, &temporary)
        .context("failed to sign in as the newly created user")?
    {
        AuthOutcome::Tokens(tokens) => tokens,
        AuthOutcome::Challenge(challenge) if challenge.is_new_password_required() => {
            let session = challenge
                .session
                .as_deref()
                .ok_or_else(|| anyhow!("`{}` challenge carries no session", challenge.name))?;
            dir.respond_to_new_password_challenge(pool, client, &username, password, session)
                .context("failed to assign the newly created user's password")?
        }
        AuthOutcome::Challenge(Challenge { name, .. }) => {
            bail!("unexpected `{name}` challenge signing in as the newly created user")
        }
    };
    Ok(Account { username, tokens })
}
