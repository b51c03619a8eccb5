// SPDX-FileCopyrightText: 2026 The cupt developers
// SPDX-License-Identifier: Apache-2.0

//! AWS Signature Version 4 request signing.

use std::collections::BTreeMap;

use cupt_type::Credentials;

use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};

pub(crate) const ALGORITHM: &str = "AWS4-HMAC-SHA256";

/// Format of the `X-Amz-Date` header.
pub(crate) const TIMESTAMP_FORMAT: &str = "%Y%m%dT%H%M%SZ";

const DATE_FORMAT: &str = "%Y%m%d";

type HmacSha256 = Hmac<Sha256>;

fn hmac(key: &[u8], data: &[u8]) -> Vec<u8> {
    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC accepts keys of any length");
    mac.update(data);
    mac.finalize().into_bytes().to_vec()
}

/// The parts of an HTTP request covered by the signature
#[derive(Debug)]
pub(crate) struct Request<'a> {
    pub method: &'a str,
    pub path: &'a str,
    pub query: &'a str,
    /// Header names must be lowercase.
    pub headers: &'a BTreeMap<String, String>,
    pub payload: &'a [u8],
}

impl Request<'_> {
    fn signed_headers(&self) -> String {
        self.headers
            .keys()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(";")
    }

    fn canonical(&self) -> String {
        let mut canonical = format!("{}\n{}\n{}\n", self.method, self.path, self.query);
        for (name, value) in self.headers {
            canonical.push_str(&format!("{name}:{}\n", value.trim()));
        }
        canonical.push('\n');
        canonical.push_str(&self.signed_headers());
        canonical.push('\n');
        canonical.push_str(&hex::encode(Sha256::digest(self.payload)));
        canonical
    }
}

#[derive(Debug)]
pub(crate) struct Signer<'a> {
    credentials: &'a Credentials,
    service: &'a str,
}

impl<'a> Signer<'a> {
    pub fn new(credentials: &'a Credentials, service: &'a str) -> Self {
        Self {
            credentials,
            service,
        }
    }

    fn scope(&self, date: &str) -> String {
        format!(
            "{date}/{}/{}/aws4_request",
            self.credentials.region, self.service
        )
    }

    fn key(&self, date: &str) -> Vec<u8> {
        let secret = format!("AWS4{}", self.credentials.secret_access_key);
        let key = hmac(secret.as_bytes(), date.as_bytes());
        let key = hmac(&key, self.credentials.region.as_bytes());
        let key = hmac(&key, self.service.as_bytes());
        hmac(&key, b"aws4_request")
    }

    /// Returns the `Authorization` header value for `req` issued at `time`.
    ///
    /// `req` must carry an `x-amz-date` header formatted from the same `time`.
    pub fn authorization(&self, req: &Request<'_>, time: DateTime<Utc>) -> String {
        let date = time.format(DATE_FORMAT).to_string();
        let scope = self.scope(&date);
        let string_to_sign = format!(
            "{ALGORITHM}\n{}\n{scope}\n{}",
            time.format(TIMESTAMP_FORMAT),
            hex::encode(Sha256::digest(req.canonical().as_bytes())),
        );
        let signature = hex::encode(hmac(&self.key(&date), string_to_sign.as_bytes()));
        format!(
            "{ALGORITHM} Credential={}/{scope}, SignedHeaders={}, Signature={signature}",
            self.credentials.access_key_id,
            req.signed_headers(),
        )
    }
}
