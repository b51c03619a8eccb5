// SPDX-FileCopyrightText: 2026 The cupt developers
// SPDX-License-Identifier: Apache-2.0

use super::{Client, Result};

use cupt_type::{Attribute, AuthOutcome, ClientId, Cursor, Page, PoolId, Tokens};

/// A user to be created with a temporary password
#[derive(Clone, Copy, Debug)]
pub struct NewUser<'a> {
    pub username: &'a str,
    pub temporary_password: &'a str,
    pub attributes: &'a [Attribute],
}

/// Operations of a remote user directory.
///
/// Every call blocks until the service responds. Implementations perform no
/// retries: any error is reported to the caller as is.
pub trait Directory {
    /// Lists at most `limit` users of `pool`, starting at `cursor` if given.
    fn list_users(&self, pool: &PoolId, limit: u32, cursor: Option<&Cursor>) -> Result<Page>;

    /// Creates `user` in `pool`. The account must change its password on
    /// first sign-in.
    fn create_user(&self, pool: &PoolId, user: NewUser<'_>) -> Result<()>;

    /// Authenticates `username` with `password` as an administrator.
    fn initiate_auth(
        &self,
        pool: &PoolId,
        client: &ClientId,
        username: &str,
        password: &str,
    ) -> Result<AuthOutcome>;

    /// Answers a new password challenge issued in `session`.
    fn respond_to_new_password_challenge(
        &self,
        pool: &PoolId,
        client: &ClientId,
        username: &str,
        new_password: &str,
        session: &str,
    ) -> Result<Tokens>;
}

impl Directory for Client {
    fn list_users(&self, pool: &PoolId, limit: u32, cursor: Option<&Cursor>) -> Result<Page> {
        self.pool(pool).list_users(limit, cursor)
    }

    fn create_user(&self, pool: &PoolId, user: NewUser<'_>) -> Result<()> {
        self.pool(pool).create_user(user)
    }

    fn initiate_auth(
        &self,
        pool: &PoolId,
        client: &ClientId,
        username: &str,
        password: &str,
    ) -> Result<AuthOutcome> {
        self.pool(pool).initiate_auth(client, username, password)
    }

    fn respond_to_new_password_challenge(
        &self,
        pool: &PoolId,
        client: &ClientId,
        username: &str,
        new_password: &str,
        session: &str,
    ) -> Result<Tokens> {
        self.pool(pool)
            .respond_to_new_password_challenge(client, username, new_password, session)
    }
}

