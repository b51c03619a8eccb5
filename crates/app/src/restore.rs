// SPDX-FileCopyrightText: 2026 The cupt developers
// SPDX-License-Identifier: Apache-2.0

use super::{snapshot, temporary_password};

use std::fmt::Display;
use std::path::Path;

use cupt_client::{Directory, NewUser};
use cupt_type::{PoolId, UserRecord};

use anyhow::Result;
use tracing::{debug, info, trace, warn};

/// Tally of a restore run
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct Summary {
    /// Users created successfully
    pub restored: usize,
    /// Users attempted
    pub total: usize,
}

impl Display for Summary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} of {}", self.restored, self.total)
    }
}

/// Recreates `users` in `pool` one at a time, in order.
///
/// Each user keeps its username and attributes, minus the service-managed
/// one, and receives a random temporary password it must replace on first
/// sign-in. A failure to create one user is logged and does not stop the
/// rest.
pub fn restore(
    dir: &impl Directory,
    pool: &PoolId,
    users: impl IntoIterator<Item = UserRecord>,
) -> Summary {
    let mut summary = Summary::default();
    for mut user in users {
        summary.total += 1;
        if let Some(attr) = user.redact() {
            trace!(target: "cupt::restore", "dropped `{}` of `{}`", attr.name, user.username);
        }

        let password = temporary_password();
        match dir.create_user(
            pool,
            NewUser {
                username: &user.username,
                temporary_password: &password,
                attributes: &user.attributes,
            },
        ) {
            Ok(()) => {
                summary.restored += 1;
                debug!(target: "cupt::restore", "restored `{}`", user.username);
            }
            Err(e) => warn!(
                target: "cupt::restore",
                "failed to restore user `{}`: {e:#}",
                user.username
            ),
        }
    }
    summary
}

/// Restores the snapshot at `path` into `pool`.
///
/// Only reading the snapshot can fail; see [restore] for how individual
/// users are handled.
pub fn restore_file(dir: &impl Directory, pool: &PoolId, path: impl AsRef<Path>) -> Result<Summary> {
    let path = path.as_ref();
    let users = snapshot::read(path)?;
    info!(target: "cupt::restore", "read {} users from `{}`", users.len(), path.display());
    Ok(restore(dir, pool, users))
}
