// SPDX-FileCopyrightText: 2026 The cupt developers
// SPDX-License-Identifier: Apache-2.0

use std::fmt;
use std::io::Read;

use anyhow::{bail, Context};
use serde::Deserialize;

/// Static access credentials and the region of the directory service
#[derive(Clone, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub region: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"<redacted>")
            .field("region", &self.region)
            .finish()
    }
}

impl Credentials {
    /// Reads a JSON credentials document, e.g.
    ///
    /// ```json
    /// { "accessKeyId": "AKIDEXAMPLE", "secretAccessKey": "...", "region": "us-east-1" }
    /// ```
    pub fn read(rdr: impl Read) -> anyhow::Result<Self> {
        let creds: Self =
            serde_json::from_reader(rdr).context("failed to decode credentials as JSON")?;
        if creds.access_key_id.is_empty() {
            bail!("empty `accessKeyId` in credentials")
        }
        if creds.region.is_empty() {
            bail!("empty `region` in credentials")
        }
        Ok(creds)
    }
}
