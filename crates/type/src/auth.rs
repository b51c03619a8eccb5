// SPDX-FileCopyrightText: 2026 The cupt developers
// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Tokens issued on successful authentication
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Tokens {
    pub access_token: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_token: Option<String>,
}

/// A step the caller must satisfy before tokens are issued
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Challenge {
    pub name: String,
    pub session: Option<String>,
    pub parameters: BTreeMap<String, String>,
}

impl Challenge {
    /// Issued on first sign-in of a user created with a temporary password.
    pub const NEW_PASSWORD_REQUIRED: &'static str = "NEW_PASSWORD_REQUIRED";

    pub fn is_new_password_required(&self) -> bool {
        self.name == Self::NEW_PASSWORD_REQUIRED
    }
}

/// Result of initiating authentication
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Outcome {
    Tokens(Tokens),
    Challenge(Challenge),
}
