// SPDX-FileCopyrightText: 2026 The cupt developers
// SPDX-License-Identifier: Apache-2.0

use super::{Client, NewUser, Result};

use std::collections::BTreeMap;

use cupt_type::{Attribute, AuthOutcome, Challenge, ClientId, Cursor, Page, PoolId, Tokens};

use anyhow::bail;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Authentication flow that takes the password in the clear from a trusted
/// administrative caller.
const AUTH_FLOW: &str = "ADMIN_NO_SRP_AUTH";

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct ListUsersInput<'a> {
    user_pool_id: &'a PoolId,
    limit: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pagination_token: Option<&'a Cursor>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct CreateUserInput<'a> {
    user_pool_id: &'a PoolId,
    username: &'a str,
    temporary_password: &'a str,
    user_attributes: &'a [Attribute],
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct InitiateAuthInput<'a> {
    auth_flow: &'a str,
    user_pool_id: &'a PoolId,
    client_id: &'a str,
    auth_parameters: BTreeMap<&'static str, &'a str>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct RespondToAuthChallengeInput<'a> {
    challenge_name: &'a str,
    user_pool_id: &'a PoolId,
    client_id: &'a str,
    challenge_responses: BTreeMap<&'static str, &'a str>,
    session: &'a str,
}

/// Response of both initiating authentication and answering a challenge
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct AuthOutput {
    #[serde(default)]
    authentication_result: Option<Tokens>,

    #[serde(default)]
    challenge_name: Option<String>,

    #[serde(default)]
    challenge_parameters: Option<BTreeMap<String, String>>,

    #[serde(default)]
    session: Option<String>,
}

impl AuthOutput {
    fn into_outcome(self) -> Result<AuthOutcome> {
        match self {
            AuthOutput {
                authentication_result: Some(tokens),
                ..
            } => Ok(AuthOutcome::Tokens(tokens)),
            AuthOutput {
                challenge_name: Some(name),
                challenge_parameters,
                session,
                ..
            } => Ok(AuthOutcome::Challenge(Challenge {
                name,
                session,
                parameters: challenge_parameters.unwrap_or_default(),
            })),
            _ => bail!("response carries neither tokens nor a challenge"),
        }
    }
}

/// The directory service operations scoped to one user pool
#[derive(Clone, Copy, Debug)]
pub struct Pool<'a> {
    client: &'a Client,
    id: &'a PoolId,
}

impl<'a> Pool<'a> {
    pub fn new(client: &'a Client, id: &'a PoolId) -> Self {
        Self { client, id }
    }

    pub fn id(&self) -> &PoolId {
        self.id
    }

    pub fn list_users(&self, limit: u32, cursor: Option<&Cursor>) -> Result<Page> {
        let page: Page = self.client.call(
            "ListUsers",
            &ListUsersInput {
                user_pool_id: self.id,
                limit,
                pagination_token: cursor,
            },
        )?;
        debug!(
            target: "cupt::client",
            "listed {} users of `{}`, more: {}",
            page.users.len(),
            self.id,
            page.cursor.is_some()
        );
        Ok(page)
    }

    pub fn create_user(&self, user: NewUser<'_>) -> Result<()> {
        // The created user is echoed back; only success matters here.
        let _: serde_json::Value = self.client.call(
            "AdminCreateUser",
            &CreateUserInput {
                user_pool_id: self.id,
                username: user.username,
                temporary_password: user.temporary_password,
                user_attributes: user.attributes,
            },
        )?;
        debug!(target: "cupt::client", "created `{}` in `{}`", user.username, self.id);
        Ok(())
    }

    pub fn initiate_auth(
        &self,
        client: &ClientId,
        username: &str,
        password: &str,
    ) -> Result<AuthOutcome> {
        let out: AuthOutput = self.client.call(
            "AdminInitiateAuth",
            &InitiateAuthInput {
                auth_flow: AUTH_FLOW,
                user_pool_id: self.id,
                client_id: client.as_str(),
                auth_parameters: BTreeMap::from([("USERNAME", username), ("PASSWORD", password)]),
            },
        )?;
        out.into_outcome()
    }

    pub fn respond_to_new_password_challenge(
        &self,
        client: &ClientId,
        username: &str,
        new_password: &str,
        session: &str,
    ) -> Result<Tokens> {
        let out: AuthOutput = self.client.call(
            "AdminRespondToAuthChallenge",
            &RespondToAuthChallengeInput {
                challenge_name: Challenge::NEW_PASSWORD_REQUIRED,
                user_pool_id: self.id,
                client_id: client.as_str(),
                challenge_responses: BTreeMap::from([
                    ("USERNAME", username),
                    ("NEW_PASSWORD", new_password),
                ]),
                session,
            },
        )?;
        match out.into_outcome()? {
            AuthOutcome::Tokens(tokens) => Ok(tokens),
            AuthOutcome::Challenge(Challenge { name, .. }) => {
                bail!("service issued another challenge `{name}`")
            }
        }
    }
}
