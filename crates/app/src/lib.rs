// SPDX-FileCopyrightText: 2026 The cupt developers
// SPDX-License-Identifier: Apache-2.0

#![warn(rust_2018_idioms, unused_lifetimes, unused_qualifications, clippy::all)]
#![forbid(unsafe_code)]

pub mod backup;
pub mod login;
pub mod password;
pub mod provision;
pub mod restore;
pub mod snapshot;

pub use backup::{backup, list_users, BATCH_SIZE};
pub use login::login;
pub use password::temporary_password;
pub use provision::{add_user, Account};
pub use restore::{restore, restore_file, Summary};
