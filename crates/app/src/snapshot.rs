// SPDX-FileCopyrightText: 2026 The cupt developers
// SPDX-License-Identifier: Apache-2.0

//! On-disk snapshot of a user pool: a single JSON array of user records
//! in listing order.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use cupt_type::UserRecord;

use anyhow::{Context, Result};
use tempfile::Builder;

#[cfg(unix)]
use std::{fs::Permissions, os::unix::fs::PermissionsExt};

/// Mode of a written snapshot, before the process umask applies.
#[cfg(unix)]
const MODE: u32 = 0o644;

/// Writes `users` to `path` as a JSON array and returns the number of users
/// written.
///
/// The snapshot is written next to `path` and moved into place once
/// complete, so `path` either keeps its previous contents or holds the whole
/// snapshot.
pub fn write(path: impl AsRef<Path>, users: &[UserRecord]) -> Result<usize> {
    let path = path.as_ref();
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let mut builder = Builder::new();
    #[cfg(unix)]
    builder.permissions(Permissions::from_mode(MODE));
    let mut file = builder
        .tempfile_in(dir)
        .with_context(|| format!("failed to create temporary file in `{}`", dir.display()))?;
    {
        let mut w = BufWriter::new(file.as_file_mut());
        serde_json::to_writer(&mut w, users).context("failed to encode users as JSON")?;
        w.flush().context("failed to write users")?;
    }
    file.persist(path)
        .with_context(|| format!("failed to write users to `{}`", path.display()))?;
    Ok(users.len())
}

/// Reads the user records stored at `path`.
///
/// A `null` document is read as an empty snapshot.
pub fn read(path: impl AsRef<Path>) -> Result<Vec<UserRecord>> {
    let path = path.as_ref();
    let file =
        File::open(path).with_context(|| format!("failed to open `{}`", path.display()))?;
    serde_json::from_reader::<_, Option<Vec<UserRecord>>>(BufReader::new(file))
        .map(Option::unwrap_or_default)
        .with_context(|| format!("failed to decode users from `{}`", path.display()))
}
