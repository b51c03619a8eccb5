// SPDX-FileCopyrightText: 2026 The cupt developers
// SPDX-License-Identifier: Apache-2.0

use super::snapshot;

use std::path::Path;

use cupt_client::Directory;
use cupt_type::{Page, PoolId, UserRecord};

use anyhow::{ensure, Context, Result};
use tracing::{debug, trace};

/// Maximum number of users requested per page.
pub const BATCH_SIZE: u32 = 5;

/// Lists every user of `pool` in the order the service returns them,
/// requesting pages of `batch` users.
///
/// The listing ends on a page without a cursor or on a page holding fewer
/// than `batch` users, whichever comes first. Any failed request fails the
/// whole listing.
pub fn list_users(dir: &impl Directory, pool: &PoolId, batch: u32) -> Result<Vec<UserRecord>> {
    trace!(target: "cupt::backup", "listing users of `{pool}` in batches of {batch}");
    ensure!(batch > 0, "batch size must be positive");

    let mut users = vec![];
    let mut cursor = None;
    for n in 1usize.. {
        let Page {
            users: page,
            cursor: next,
        } = dir
            .list_users(pool, batch, cursor.as_ref())
            .with_context(|| format!("failed to list users of `{pool}`"))?;
        let full = page.len() >= batch as usize;
        users.extend(page);
        debug!(target: "cupt::backup", "page {n}: {} users so far", users.len());

        match next.filter(|next| !next.is_empty()) {
            Some(next) if full => cursor = Some(next),
            _ => break,
        }
    }
    Ok(users)
}

/// Lists every user of `pool` and writes them to `path`, returning the
/// number of users written.
///
/// Nothing is written unless the listing completes.
pub fn backup(dir: &impl Directory, pool: &PoolId, path: impl AsRef<Path>) -> Result<usize> {
    let path = path.as_ref();
    let users = list_users(dir, pool, BATCH_SIZE)?;
    let n = snapshot::write(path, &users)?;
    debug!(target: "cupt::backup", "serialized {n} users to `{}`", path.display());
    Ok(n)
}
