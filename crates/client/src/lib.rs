// SPDX-FileCopyrightText: 2026 The cupt developers
// SPDX-License-Identifier: Apache-2.0

#![warn(rust_2018_idioms, unused_lifetimes, unused_qualifications, clippy::all)]
#![forbid(unsafe_code)]

mod directory;
mod pool;
mod request;
mod sign;

pub use directory::*;
pub use pool::*;

pub use cupt_type as types;

pub use anyhow::{Context, Result};
pub use url::Url;

use cupt_type::{Credentials, PoolId};

/// Signing name of the directory service.
const SERVICE: &str = "cognito-idp";

#[derive(Debug)]
pub struct Client {
    inner: ureq::Agent,
    root: Url,
    credentials: Credentials,
}

impl Client {
    pub fn builder(credentials: Credentials) -> ClientBuilder {
        ClientBuilder::new(credentials)
    }

    pub fn pool<'a>(&'a self, id: &'a PoolId) -> Pool<'a> {
        Pool::new(self, id)
    }

    /// Returns the endpoint requests are sent to.
    pub fn endpoint(&self) -> &Url {
        &self.root
    }
}

pub struct ClientBuilder {
    inner: ureq::AgentBuilder,
    credentials: Credentials,
    endpoint: Option<Url>,
}

impl ClientBuilder {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            inner: ureq::AgentBuilder::new(),
            credentials,
            endpoint: None,
        }
    }

    /// Overrides the regional endpoint derived from the credentials.
    pub fn endpoint(mut self, url: Url) -> Self {
        self.endpoint = Some(url);
        self
    }

    pub fn build(self) -> Result<Client> {
        let root = match self.endpoint {
            Some(url) => url,
            None => format!("https://{SERVICE}.{}.amazonaws.com/", self.credentials.region)
                .parse()
                .context("failed to construct endpoint URL from region")?,
        };
        Ok(Client {
            inner: self.inner.build(),
            root,
            credentials: self.credentials,
        })
    }
}
