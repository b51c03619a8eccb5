// SPDX-FileCopyrightText: 2026 The cupt developers
// SPDX-License-Identifier: Apache-2.0

use std::fmt::Display;
use std::str::FromStr;

use anyhow::{anyhow, bail};
use serde::{Deserialize, Serialize};

/// A user pool identifier of the form `<region>_<id>`, e.g. `us-east-1_aBcD3fG`
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[repr(transparent)]
#[serde(try_from = "String", into = "String")]
pub struct Id(String);

impl Id {
    /// Returns the region the pool lives in.
    pub fn region(&self) -> &str {
        self.0.split_once('_').map(|(region, _)| region).unwrap_or_default()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Id {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (region, id) = s
            .split_once('_')
            .ok_or_else(|| anyhow!("user pool id must have the form `<region>_<id>`"))?;
        if region.is_empty()
            || region
                .find(|c| !matches!(c, '0'..='9' | 'a'..='z' | '-'))
                .is_some()
        {
            bail!("invalid region in user pool id")
        }
        if id.is_empty() || id.find(|c: char| !c.is_ascii_alphanumeric()).is_some() {
            bail!("invalid characters in user pool id")
        }
        Ok(Self(s.into()))
    }
}

impl TryFrom<String> for Id {
    type Error = anyhow::Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Id> for String {
    fn from(id: Id) -> Self {
        id.0
    }
}

impl AsRef<str> for Id {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for Id {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
