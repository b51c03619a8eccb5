// SPDX-FileCopyrightText: 2026 The cupt developers
// SPDX-License-Identifier: Apache-2.0

use super::{nullable, Attribute};

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Name of the attribute the directory service assigns on creation.
///
/// The service rejects client-supplied values for it, so it must be stripped
/// from a record before the record is replayed into a create call.
pub const MANAGED_ATTRIBUTE: &str = "sub";

/// A user record as listed by the directory service
///
/// Only the username and attributes are interpreted. All other fields the
/// service reports (status, timestamps, MFA options, ...) are kept verbatim
/// in `custom` so that an exported record carries everything that was listed.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Record {
    pub username: String,

    #[serde(default, deserialize_with = "nullable")]
    pub attributes: Vec<Attribute>,

    /// Custom fields
    #[serde(flatten)]
    pub custom: BTreeMap<String, Value>,
}

impl Record {
    pub fn new(username: impl Into<String>, attributes: Vec<Attribute>) -> Self {
        Self {
            username: username.into(),
            attributes,
            custom: Default::default(),
        }
    }

    /// Returns the value of the first attribute called `name`.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attr| attr.name == name)
            .map(|attr| attr.value.as_str())
    }

    /// Removes the first [MANAGED_ATTRIBUTE] attribute and returns it.
    pub fn redact(&mut self) -> Option<Attribute> {
        let idx = self
            .attributes
            .iter()
            .position(|attr| attr.name == MANAGED_ATTRIBUTE)?;
        Some(self.attributes.remove(idx))
    }
}
