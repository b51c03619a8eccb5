// SPDX-FileCopyrightText: 2026 The cupt developers
// SPDX-License-Identifier: Apache-2.0

use std::cell::{Cell, RefCell};
use std::collections::HashSet;

use cupt_client::{Directory, NewUser, Result};
use cupt_type::{
    Attribute, AuthOutcome, Challenge, ClientId, Cursor, Page, PoolId, Tokens, UserRecord,
};

use anyhow::{bail, ensure};

/// A user created through [Directory::create_user]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Created {
    pub username: String,
    pub temporary_password: String,
    pub attributes: Vec<Attribute>,
}

/// An in-memory user pool
///
/// Cursors are the decimal offset of the next user.
#[derive(Debug, Default)]
pub struct FakeDirectory {
    /// Users returned by listings
    pub users: Vec<UserRecord>,
    /// Serve at most this many users per page, regardless of the limit
    pub page_cap: Option<usize>,
    /// Return a cursor on the last page, too
    pub trailing_cursor: bool,
    /// Fail the listing request with this (zero-based) index
    pub fail_page: Option<usize>,
    /// Fail creation of these usernames
    pub fail_create: HashSet<String>,
    /// Fail every creation
    pub fail_create_all: bool,
    /// Challenge issued on sign-in, if any
    pub challenge: Option<String>,

    pub list_calls: Cell<usize>,
    pub created: RefCell<Vec<Created>>,
    pub responses: RefCell<Vec<(String, String, String)>>,
}

pub fn record(i: usize) -> UserRecord {
    UserRecord::new(
        format!("user{i}"),
        vec![
            Attribute::new("sub", format!("3c1b-{i}")),
            Attribute::new("email", format!("user{i}@example.com")),
            Attribute::new("email_verified", "true"),
        ],
    )
}

pub fn tokens(username: &str) -> Tokens {
    Tokens {
        access_token: format!("access-{username}"),
        expires_in: Some(3600),
        token_type: Some("Bearer".into()),
        refresh_token: None,
        id_token: None,
    }
}

pub fn pool() -> PoolId {
    "us-east-1_aBcD3fG".parse().unwrap()
}

pub fn client() -> ClientId {
    "1example23456789".parse().unwrap()
}

impl FakeDirectory {
    pub fn with_users(n: usize) -> Self {
        Self {
            users: (0..n).map(record).collect(),
            ..Default::default()
        }
    }
}

impl Directory for FakeDirectory {
    fn list_users(&self, pool: &PoolId, limit: u32, cursor: Option<&Cursor>) -> Result<Page> {
        assert_eq!(pool, &self::pool());

        let call = self.list_calls.get();
        self.list_calls.set(call + 1);
        if self.fail_page == Some(call) {
            bail!("InternalErrorException: listing page {call} failed")
        }

        let start = match cursor {
            Some(cursor) => cursor.as_str().parse()?,
            None => 0,
        };
        ensure!(start <= self.users.len(), "invalid pagination token");
        let mut n = limit as usize;
        if let Some(cap) = self.page_cap {
            n = n.min(cap);
        }
        let end = self.users.len().min(start + n);
        let cursor = if end < self.users.len() || self.trailing_cursor {
            Some(end.to_string().into())
        } else {
            None
        };
        Ok(Page {
            users: self.users[start..end].to_vec(),
            cursor,
        })
    }

    fn create_user(&self, pool: &PoolId, user: NewUser<'_>) -> Result<()> {
        assert_eq!(pool, &self::pool());

        if self.fail_create_all || self.fail_create.contains(user.username) {
            bail!("UsernameExistsException: User account already exists")
        }
        self.created.borrow_mut().push(Created {
            username: user.username.into(),
            temporary_password: user.temporary_password.into(),
            attributes: user.attributes.to_vec(),
        });
        Ok(())
    }

    fn initiate_auth(
        &self,
        _pool: &PoolId,
        client: &ClientId,
        username: &str,
        password: &str,
    ) -> Result<AuthOutcome> {
        assert_eq!(client, &self::client());

        let created = self.created.borrow();
        match created.iter().find(|user| user.username == username) {
            Some(user) if user.temporary_password == password => {}
            _ => bail!("NotAuthorizedException: Incorrect username or password."),
        }
        Ok(match &self.challenge {
            Some(name) => AuthOutcome::Challenge(Challenge {
                name: name.clone(),
                session: Some(format!("session-{username}")),
                parameters: Default::default(),
            }),
            None => AuthOutcome::Tokens(tokens(username)),
        })
    }

    fn respond_to_new_password_challenge(
        &self,
        _pool: &PoolId,
        _client: &ClientId,
        username: &str,
        new_password: &str,
        session: &str,
    ) -> Result<Tokens> {
        ensure!(
            session == format!("session-{username}"),
            "NotAuthorizedException: Invalid session for the user."
        );
        self.responses.borrow_mut().push((
            username.into(),
            new_password.into(),
            session.into(),
        ));
        Ok(tokens(username))
    }
}
